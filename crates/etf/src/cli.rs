use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sets the level of tracing.
    #[arg(short, long, global = true)]
    pub trace: Option<TraceLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a fund's sector weightings, optionally charting them.
    Sectors {
        /// ETF ticker symbol.
        #[arg(default_value = "VTI")]
        ticker: String,

        /// Chart style; bar when a chart is requested without one.
        #[arg(short, long, value_enum)]
        chart: Option<ChartStyle>,

        /// Write a chart artifact to this path.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print a fund's dividend history, optionally charting it.
    Dividends {
        /// ETF ticker symbol.
        #[arg(default_value = "VTI")]
        ticker: String,

        /// Data provider to fetch from.
        #[arg(short, long, value_enum, default_value_t = Source::Yahoo)]
        source: Source,

        /// How many of the most recent payments to print.
        #[arg(short, long, default_value_t = 10)]
        limit: usize,

        /// Write a chart artifact to this path.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print fund facts, top holdings and sector weightings.
    Info {
        /// ETF ticker symbol.
        #[arg(default_value = "VTI")]
        ticker: String,
    },

    /// Compare dividend facts across several funds.
    Compare {
        /// ETF ticker symbols.
        #[arg(required = true)]
        tickers: Vec<String>,
    },
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
#[clap(rename_all = "UPPERCASE")]
pub enum TraceLevel {
    DEBUG,
    ERROR,
    INFO,
    TRACE,
    WARN,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChartStyle {
    /// Sector per bar, weight as height.
    Bar,

    /// Sector per slice, weight as share.
    Pie,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Source {
    /// Yahoo Finance chart endpoint; no key required.
    Yahoo,

    /// Alpha Vantage monthly adjusted series; needs ALPHAVANTAGE_API.
    AlphaVantage,
}
