use super::Dividend;
use crate::http::*;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, error, trace};

// dividends
// ----------------------------------------------------------------------------

/// Fetch the dividend history for `ticker` from the Alpha Vantage monthly
/// adjusted series, oldest first; months with no distribution are dropped.
///
/// Requires the `ALPHAVANTAGE_API` environment variable.
pub async fn fetch_dividends(
    http_client: &HttpClient,
    ticker: &str,
) -> anyhow::Result<Vec<Dividend>> {
    let time = std::time::Instant::now();

    let key = var("ALPHAVANTAGE_API")
        .map_err(|_| anyhow::anyhow!("environment variable ALPHAVANTAGE_API is not set"))?;
    let url = format!(
        "https://www.alphavantage.co/query?function=TIME_SERIES_MONTHLY_ADJUSTED&symbol={ticker}&apikey={key}"
    );

    trace!("fetching Alpha Vantage dividends for [{ticker}]");
    let response: MonthlyResponse = http_client
        .get(url)
        .send()
        .await
        .map_err(|err| {
            error!("failed to fetch Alpha Vantage dividends for [{ticker}], error({err})");
            err
        })?
        .json()
        .await
        .map_err(|err| {
            error!("failed to parse Alpha Vantage dividends for [{ticker}], error({err})");
            err
        })?;

    let dividends = dividends_from(response)
        .ok_or_else(|| anyhow::anyhow!("no Alpha Vantage data found for [{ticker}]"))?;

    debug!(
        "[{ticker}] {} dividend payments collected. {}",
        dividends.len(),
        crate::time_elapsed(time)
    );

    Ok(dividends)
}

// transform the monthly series; `None` when the series key is missing from
// the body (unknown symbol, exhausted key, etc.)
fn dividends_from(response: MonthlyResponse) -> Option<Vec<Dividend>> {
    let series = response.series?;

    let mut dividends: Vec<Dividend> = series
        .into_iter()
        .filter_map(|(dated, bar)| {
            let date = NaiveDate::parse_from_str(&dated, "%Y-%m-%d").ok()?;
            let amount = bar.dividend_amount.parse::<f64>().ok()?;
            (amount > 0.0).then_some(Dividend { date, amount })
        })
        .collect();

    dividends.sort_by_key(|dividend| dividend.date);

    Some(dividends)
}

// de
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct MonthlyResponse {
    #[serde(rename = "Monthly Adjusted Time Series")]
    series: Option<HashMap<String, MonthlyBar>>,
}

#[derive(Debug, Deserialize)]
struct MonthlyBar {
    #[serde(rename = "7. dividend amount")]
    dividend_amount: String,
}

/////////////////////////////////////////////////////////////////////////////////
// tests
/////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn zero_dividend_months_are_dropped() {
        let response: MonthlyResponse = serde_json::from_value(json!({
            "Monthly Adjusted Time Series": {
                "2024-06-28": { "7. dividend amount": "0.9570" },
                "2024-05-31": { "7. dividend amount": "0.0000" },
                "2024-04-30": { "7. dividend amount": "0.8810" }
            }
        }))
        .unwrap();

        let dividends = dividends_from(response).unwrap();
        assert_eq!(dividends.len(), 2);
        assert_eq!(dividends[0].amount, 0.8810);
        assert_eq!(dividends[1].amount, 0.9570);
    }

    #[test]
    fn missing_series_key_is_an_error_upstream() {
        let response: MonthlyResponse = serde_json::from_value(json!({
            "Information": "the demo API key has no quota left"
        }))
        .unwrap();

        assert!(dividends_from(response).is_none());
    }

    #[test]
    fn unparseable_rows_are_skipped() {
        let response: MonthlyResponse = serde_json::from_value(json!({
            "Monthly Adjusted Time Series": {
                "2024-06-28": { "7. dividend amount": "0.9570" },
                "not a date": { "7. dividend amount": "0.5000" },
                "2024-04-30": { "7. dividend amount": "n/a" }
            }
        }))
        .unwrap();

        let dividends = dividends_from(response).unwrap();
        assert_eq!(dividends.len(), 1);
        assert_eq!(dividends[0].amount, 0.9570);
    }
}
