//! Presentation of fetched ETF data: percentage-formatted terminal rows and
//! PNG chart artifacts.
//!
//! Chart rendering is driven by a caller-owned [`RenderContext`]; there is no
//! process-wide drawing surface shared between invocations.

use crate::provider::yahoo_finance::FundProfile;
use crate::provider::Dividend;
use crate::sector::SectorWeightTable;
use colored::Colorize;
use plotters::prelude::*;
use std::path::PathBuf;
use tracing::{debug, info};

/////////////////////////////////////////////////////////////////////////////////
// terminal output
/////////////////////////////////////////////////////////////////////////////////

pub fn print_sectors(ticker: &str, table: &SectorWeightTable) {
    println!("{}", format!("--- Sector Weights for {ticker} ---").bold());
    if table.is_empty() {
        println!("No sector weight data found.");
        return;
    }

    for row in table {
        println!("{}: {:.2}%", row.sector.cyan(), row.weight * 100.0);
    }
}

/// Print the last `limit` dividend payments, oldest of those first.
pub fn print_dividends(ticker: &str, dividends: &[Dividend], limit: usize) {
    println!("{}", format!("--- Dividends for {ticker} ---").bold());
    if dividends.is_empty() {
        println!("No dividend data found.");
        return;
    }

    let tail = &dividends[dividends.len().saturating_sub(limit)..];
    for dividend in tail {
        println!("{}  {:.4}", dividend.date.to_string().cyan(), dividend.amount);
    }
}

pub fn print_fund(ticker: &str, profile: &FundProfile, sectors: &SectorWeightTable) {
    println!("{}", format!("--- Fund Facts for {ticker} ---").bold());
    println!("Annual Dividend Rate: {}", fmt_amount(profile.dividend_rate));
    println!("Dividend Yield: {}", fmt_fraction(profile.dividend_yield));
    println!(
        "Ex-Dividend Date: {}",
        profile
            .ex_dividend_date
            .map(|date| date.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    );

    println!("\n{}", format!("--- Top Holdings for {ticker} ---").bold());
    if profile.top_holdings.is_empty() {
        println!("No holdings data found.");
    } else {
        for holding in profile.top_holdings.iter().take(10) {
            println!(
                "{:<6} {}  {}",
                holding.symbol.cyan(),
                holding.name,
                fmt_fraction(holding.fraction)
            );
        }
    }

    println!();
    print_sectors(ticker, sectors);
}

/// One comparison row per fund.
pub fn print_comparison(rows: &[(String, FundProfile)]) {
    println!("{}", "--- ETF Comparison ---".bold());
    println!("{:<8} {:>14} {:>10}", "Ticker", "Dividend Rate", "Yield");
    for (ticker, profile) in rows {
        println!(
            "{:<8} {:>14} {:>10}",
            ticker.cyan(),
            fmt_amount(profile.dividend_rate),
            fmt_fraction(profile.dividend_yield)
        );
    }
}

fn fmt_amount(value: Option<f64>) -> String {
    value
        .map(|value| format!("{value:.2}"))
        .unwrap_or_else(|| "N/A".to_string())
}

fn fmt_fraction(value: Option<f64>) -> String {
    value
        .map(|value| format!("{:.2}%", value * 100.0))
        .unwrap_or_else(|| "N/A".to_string())
}

/////////////////////////////////////////////////////////////////////////////////
// charts
/////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Pie,
}

/// Where and how a chart is drawn; constructed by the caller per invocation
/// and dropped afterwards.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl RenderContext {
    pub fn new(path: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            width: 1024,
            height: 768,
            title: title.into(),
        }
    }
}

const PALETTE: [RGBColor; 10] = [
    RGBColor(66, 133, 244),
    RGBColor(219, 68, 55),
    RGBColor(244, 180, 0),
    RGBColor(15, 157, 88),
    RGBColor(171, 71, 188),
    RGBColor(0, 172, 193),
    RGBColor(255, 112, 67),
    RGBColor(158, 157, 36),
    RGBColor(92, 107, 192),
    RGBColor(240, 98, 146),
];

// plotters error types differ per call site; fold them all into anyhow here
fn chart_err<E: std::fmt::Display>(err: E) -> anyhow::Error {
    anyhow::anyhow!("chart rendering failed: {err}")
}

/// Draw the sector-weight table as a bar or pie chart PNG.
pub fn render_sector_chart(
    ctx: &RenderContext,
    kind: ChartKind,
    table: &SectorWeightTable,
) -> anyhow::Result<()> {
    if table.is_empty() {
        info!("no sector weight data to chart, skipping {:?}", ctx.path);
        return Ok(());
    }

    let root = BitMapBackend::new(&ctx.path, (ctx.width, ctx.height)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    match kind {
        ChartKind::Bar => draw_sector_bars(ctx, &root, table)?,
        ChartKind::Pie => draw_sector_pie(ctx, &root, table)?,
    }

    root.present().map_err(chart_err)?;
    debug!("sector chart written to {:?}", ctx.path);

    Ok(())
}

fn draw_sector_bars(
    ctx: &RenderContext,
    root: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>,
    table: &SectorWeightTable,
) -> anyhow::Result<()> {
    let top = table
        .iter()
        .map(|row| row.weight)
        .fold(f64::MIN, f64::max)
        .max(0.01);

    let mut chart = ChartBuilder::on(root)
        .caption(&ctx.title, ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(120)
        .y_label_area_size(56)
        .build_cartesian_2d(0i32..table.len() as i32, 0f64..top * 1.15)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(table.len())
        .x_label_formatter(&|at| {
            table
                .get(*at as usize)
                .map(|row| row.sector.clone())
                .unwrap_or_default()
        })
        .y_label_formatter(&|weight| format!("{:.0}%", weight * 100.0))
        .y_desc("Weight")
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(table.iter().enumerate().map(|(at, row)| {
            let color = PALETTE[at % PALETTE.len()];
            Rectangle::new(
                [(at as i32, 0.0), (at as i32 + 1, row.weight)],
                color.mix(0.7).filled(),
            )
        }))
        .map_err(chart_err)?;

    Ok(())
}

fn draw_sector_pie(
    ctx: &RenderContext,
    root: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>,
    table: &SectorWeightTable,
) -> anyhow::Result<()> {
    let root = root
        .titled(&ctx.title, ("sans-serif", 28))
        .map_err(chart_err)?;

    let sizes: Vec<f64> = table.iter().map(|row| row.weight.max(0.0)).collect();
    let labels: Vec<String> = table.iter().map(|row| row.sector.clone()).collect();
    let colors: Vec<RGBColor> = (0..table.len())
        .map(|at| PALETTE[at % PALETTE.len()])
        .collect();

    let center = (ctx.width as i32 / 2, ctx.height as i32 / 2);
    let radius = (ctx.width.min(ctx.height) as f64) * 0.33;

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.label_style(("sans-serif", 18).into_font().color(&BLACK));
    root.draw(&pie).map_err(chart_err)?;

    Ok(())
}

/// Draw the dividend history as a line chart PNG, amount over date.
pub fn render_dividend_chart(ctx: &RenderContext, dividends: &[Dividend]) -> anyhow::Result<()> {
    if dividends.is_empty() {
        info!("no dividend data to chart, skipping {:?}", ctx.path);
        return Ok(());
    }

    let first = dividends[0].date;
    let mut last = dividends[dividends.len() - 1].date;
    if first == last {
        // a single payment still needs a non-degenerate axis
        last = last + chrono::Duration::days(1);
    }
    let top = dividends
        .iter()
        .map(|dividend| dividend.amount)
        .fold(f64::MIN, f64::max)
        .max(0.01);

    let root = BitMapBackend::new(&ctx.path, (ctx.width, ctx.height)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&ctx.title, ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(56)
        .build_cartesian_2d(first..last, 0f64..top * 1.15)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .y_desc("Dividend Amount ($)")
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(LineSeries::new(
            dividends
                .iter()
                .map(|dividend| (dividend.date, dividend.amount)),
            &PALETTE[0],
        ))
        .map_err(chart_err)?;

    chart
        .draw_series(
            dividends
                .iter()
                .map(|dividend| Circle::new((dividend.date, dividend.amount), 3, PALETTE[0].filled())),
        )
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    debug!("dividend chart written to {:?}", ctx.path);

    Ok(())
}
