mod cli;

// remote imports
use clap::Parser;
use cli::{ChartStyle, Cli, TraceLevel};
use etf_spider::provider::{alpha_vantage, yahoo_finance};
use etf_spider::render::{self, ChartKind, RenderContext};
use etf_spider::sector;
use tracing::{subscriber, trace, Level};
use tracing_subscriber::FmtSubscriber;

////////////////////////////////////////////////////////////////////////////

// preproccess the trace level
fn preprocess(trace_level: Level) {
    let my_subscriber = FmtSubscriber::builder()
        .with_max_level(trace_level)
        .finish();
    subscriber::set_global_default(my_subscriber).expect("Set subscriber");
}

////////////////////////////////////////////////////////////////////////////

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // open the .env file for API keys
    dotenv::dotenv().ok();

    // set the trace level
    if let Some(trace_level) = cli.trace {
        preprocess(match trace_level {
            TraceLevel::DEBUG => Level::DEBUG,
            TraceLevel::ERROR => Level::ERROR,
            TraceLevel::INFO => Level::INFO,
            TraceLevel::TRACE => Level::TRACE,
            TraceLevel::WARN => Level::WARN,
        });
    }
    trace!("command line input recorded: {cli:?}");

    let http_client = etf_spider::std_client_build();

    // read cli inputs
    use cli::Commands::*;
    match cli.command {
        // `etf sectors <TICKER>`: fetch, normalize and present sector weights
        Sectors { ticker, chart, out } => {
            let profile = yahoo_finance::fetch_fund(&http_client, &ticker).await?;
            let table = sector::normalize(profile.sector_weights.as_ref())?;

            render::print_sectors(&ticker, &table);

            if let Some(out) = out {
                let kind = match chart.unwrap_or(ChartStyle::Bar) {
                    ChartStyle::Bar => ChartKind::Bar,
                    ChartStyle::Pie => ChartKind::Pie,
                };
                let ctx = RenderContext::new(out, format!("{ticker} Sector Weights"));
                render::render_sector_chart(&ctx, kind, &table)?;
            }
        }

        // `etf dividends <TICKER>`: fetch and present the dividend history
        Dividends {
            ticker,
            source,
            limit,
            out,
        } => {
            let dividends = match source {
                cli::Source::Yahoo => {
                    yahoo_finance::fetch_dividends(&http_client, &ticker).await?
                }
                cli::Source::AlphaVantage => {
                    alpha_vantage::fetch_dividends(&http_client, &ticker).await?
                }
            };

            render::print_dividends(&ticker, &dividends, limit);

            if let Some(out) = out {
                let ctx = RenderContext::new(out, format!("{ticker} Dividend History"));
                render::render_dividend_chart(&ctx, &dividends)?;
            }
        }

        // `etf info <TICKER>`: fund facts, holdings and sector weights
        Info { ticker } => {
            let profile = yahoo_finance::fetch_fund(&http_client, &ticker).await?;
            let table = sector::normalize(profile.sector_weights.as_ref())?;
            render::print_fund(&ticker, &profile, &table);
        }

        // `etf compare <TICKERS>`: one row of dividend facts per fund,
        // fetched one at a time; the upstream APIs rate-limit aggressively
        Compare { tickers } => {
            let mut rows = Vec::with_capacity(tickers.len());
            for ticker in tickers {
                let profile = yahoo_finance::fetch_fund(&http_client, &ticker).await?;
                rows.push((ticker, profile));
            }
            render::print_comparison(&rows);
        }
    }

    Ok(())
}
