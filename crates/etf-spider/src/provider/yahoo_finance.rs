use super::Dividend;
use crate::http::*;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, error, trace};

// dividends
// ----------------------------------------------------------------------------

/// Fetch the dividend history for `ticker` from the Yahoo Finance chart
/// endpoint, oldest first. A fund with no distributions on record yields an
/// empty history, not an error.
pub async fn fetch_dividends(
    http_client: &HttpClient,
    ticker: &str,
) -> anyhow::Result<Vec<Dividend>> {
    let time = std::time::Instant::now();

    let url = format!(
        "https://query1.finance.yahoo.com/v8/finance/chart/{ticker}?range=10y&interval=1mo&events=div"
    );

    trace!("fetching Yahoo Finance dividends for [{ticker}]");
    let response: DividendResponse = http_client
        .get(url)
        .send()
        .await
        .map_err(|err| {
            error!("failed to fetch Yahoo Finance dividends for [{ticker}], error({err})");
            err
        })?
        .json()
        .await
        .map_err(|err| {
            error!("failed to parse Yahoo Finance dividends for [{ticker}], error({err})");
            err
        })?;

    let dividends = dividends_from(response)
        .ok_or_else(|| anyhow::anyhow!("no chart results found for [{ticker}]"))?;

    debug!(
        "[{ticker}] {} dividend payments collected. {}",
        dividends.len(),
        crate::time_elapsed(time)
    );

    Ok(dividends)
}

// transform the deserialized chart envelope; `None` only when the envelope
// itself carried no results
fn dividends_from(response: DividendResponse) -> Option<Vec<Dividend>> {
    let results = response.chart.result?;
    let base = results.into_iter().next()?;

    let mut dividends: Vec<Dividend> = base
        .events
        .and_then(|events| events.dividends)
        .unwrap_or_default()
        .into_values()
        .filter_map(|event| {
            let date = chrono::DateTime::from_timestamp(event.date, 0)?.date_naive();
            Some(Dividend {
                date,
                amount: event.amount,
            })
        })
        .collect();

    dividends.sort_by_key(|dividend| dividend.date);

    Some(dividends)
}

// fund profile
// ----------------------------------------------------------------------------

/// Fund facts and composition, reshaped from Yahoo's quoteSummary modules.
#[derive(Debug, Clone, Default)]
pub struct FundProfile {
    pub dividend_rate: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub ex_dividend_date: Option<NaiveDate>,
    pub top_holdings: Vec<Holding>,
    /// Raw sector-weight fragment, left loosely typed for normalization.
    pub sector_weights: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct Holding {
    pub symbol: String,
    pub name: String,
    pub fraction: Option<f64>,
}

/// Fetch fund facts, top holdings and the sector-weight fragment for
/// `ticker` from the Yahoo Finance quoteSummary endpoint.
pub async fn fetch_fund(http_client: &HttpClient, ticker: &str) -> anyhow::Result<FundProfile> {
    let time = std::time::Instant::now();

    let url = format!(
        "https://query1.finance.yahoo.com/v10/finance/quoteSummary/{ticker}?modules=summaryDetail,topHoldings"
    );

    trace!("fetching Yahoo Finance fund profile for [{ticker}]");
    let response: QuoteSummaryResponse = http_client
        .get(url)
        .send()
        .await
        .map_err(|err| {
            error!("failed to fetch Yahoo Finance fund profile for [{ticker}], error({err})");
            err
        })?
        .json()
        .await
        .map_err(|err| {
            error!("failed to parse Yahoo Finance fund profile for [{ticker}], error({err})");
            err
        })?;

    let profile = profile_from(response)
        .ok_or_else(|| anyhow::anyhow!("no quoteSummary results found for [{ticker}]"))?;

    debug!("[{ticker}] fund profile collected. {}", crate::time_elapsed(time));

    Ok(profile)
}

fn profile_from(response: QuoteSummaryResponse) -> Option<FundProfile> {
    let results = response.quote_summary.result?;
    let modules = results.into_iter().next()?;

    let detail = modules.summary_detail.unwrap_or_default();
    let composition = modules.top_holdings.unwrap_or_default();

    let top_holdings = composition
        .holdings
        .unwrap_or_default()
        .into_iter()
        .filter_map(|holding| {
            Some(Holding {
                symbol: holding.symbol?,
                name: holding.holding_name.unwrap_or_default(),
                fraction: holding.holding_percent.and_then(|percent| percent.raw),
            })
        })
        .collect();

    Some(FundProfile {
        dividend_rate: detail.dividend_rate.and_then(|field| field.raw),
        dividend_yield: detail.dividend_yield.and_then(|field| field.raw),
        ex_dividend_date: detail
            .ex_dividend_date
            .and_then(|field| field.raw)
            .and_then(|timestamp| chrono::DateTime::from_timestamp(timestamp as i64, 0))
            .map(|datetime| datetime.date_naive()),
        top_holdings,
        sector_weights: composition
            .sector_weightings
            .map(|entries| flatten_sector_weightings(&entries)),
    })
}

/// Yahoo wraps every weight as a `{"raw": 0.2, "fmt": "20.00%"}` pair;
/// unwrap each entry to a plain `sector -> number` before the fragment is
/// normalized. Entries that carry no `raw` number are left as-is for the
/// normalizer to skip and log.
fn flatten_sector_weightings(entries: &[Value]) -> Value {
    Value::Array(
        entries
            .iter()
            .map(|entry| match entry {
                Value::Object(pairs) => Value::Object(
                    pairs
                        .iter()
                        .map(|(sector, value)| {
                            let weight = match value {
                                Value::Object(wrapped) => {
                                    wrapped.get("raw").cloned().unwrap_or(value.clone())
                                }
                                other => other.clone(),
                            };
                            (sector.clone(), weight)
                        })
                        .collect(),
                ),
                other => other.clone(),
            })
            .collect(),
    )
}

// de
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct DividendResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    events: Option<Events>,
}

#[derive(Debug, Deserialize)]
struct Events {
    dividends: Option<HashMap<String, DividendEvent>>,
}

#[derive(Debug, Deserialize)]
struct DividendEvent {
    amount: f64,
    date: i64,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummary,
}

#[derive(Debug, Deserialize)]
struct QuoteSummary {
    result: Option<Vec<Modules>>,
}

#[derive(Debug, Deserialize)]
struct Modules {
    #[serde(rename = "summaryDetail")]
    summary_detail: Option<SummaryDetail>,
    #[serde(rename = "topHoldings")]
    top_holdings: Option<TopHoldings>,
}

#[derive(Debug, Default, Deserialize)]
struct SummaryDetail {
    #[serde(rename = "dividendRate")]
    dividend_rate: Option<RawField>,
    #[serde(rename = "dividendYield")]
    dividend_yield: Option<RawField>,
    #[serde(rename = "exDividendDate")]
    ex_dividend_date: Option<RawField>,
}

#[derive(Debug, Default, Deserialize)]
struct TopHoldings {
    holdings: Option<Vec<RawHolding>>,
    #[serde(rename = "sectorWeightings")]
    sector_weightings: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct RawHolding {
    symbol: Option<String>,
    #[serde(rename = "holdingName")]
    holding_name: Option<String>,
    #[serde(rename = "holdingPercent")]
    holding_percent: Option<RawField>,
}

// Yahoo sends `{}` when a field has no value, so `raw` stays optional
#[derive(Debug, Deserialize)]
struct RawField {
    raw: Option<f64>,
}

/////////////////////////////////////////////////////////////////////////////////
// tests
/////////////////////////////////////////////////////////////////////////////////
