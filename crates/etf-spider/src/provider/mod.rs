use chrono::NaiveDate;

/// ETF dividends, fund facts, holdings and sector weightings from the
/// [Yahoo Finance API]; inspiration from Python's [yfinance] library.
///
/// [Yahoo Finance API]: https://query1.finance.yahoo.com
/// [yfinance]: https://github.com/ranaroussi/yfinance/
pub mod yahoo_finance;

/// Dividend history from the [Alpha Vantage API]; requires a free API key.
///
/// [Alpha Vantage API]: https://www.alphavantage.co/documentation/
pub mod alpha_vantage;

/// One cash distribution, common to every provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Dividend {
    pub date: NaiveDate,
    pub amount: f64,
}
