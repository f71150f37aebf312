//! Plain-text and JSON rendering of menus and results.

use std::io::{self, Write};

use serde::Serialize;

use crate::processing::{
    BrandIndex, BrandStats, RankingMethod, StageOutcome, StageReport, Summary, Threshold,
};
use crate::session::QueryOutcome;
use crate::types::Record;

/// Title-case a lowercase key: first letter of each alphabetic run is uppercased.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Format an integer with `,` thousands separators.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Dollar amount rounded to whole units, e.g. `$12,345`.
pub fn money(amount: f64) -> String {
    let rounded = amount.round();
    if rounded < 0.0 {
        format!("-${}", thousands((-rounded) as u64))
    } else {
        format!("${}", thousands(rounded as u64))
    }
}

pub fn separator(out: &mut impl Write, ch: char, width: usize) -> io::Result<()> {
    writeln!(out, "{}", ch.to_string().repeat(width))
}

pub fn brand_menu(out: &mut impl Write, index: &BrandIndex) -> io::Result<()> {
    writeln!(out, "\nAvailable brands ({} total):", index.len())?;
    separator(out, '-', 40)?;
    for (i, (brand, count)) in index.brand_counts().enumerate() {
        writeln!(out, "{:2}. {:<15} ({count} cars)", i + 1, title_case(brand))?;
    }
    writeln!(out, "{:2}. Show all brands statistics", index.len() + 1)
}

pub fn brand_statistics(out: &mut impl Write, stats: &[BrandStats]) -> io::Result<()> {
    writeln!(out, "\nBrand Statistics:")?;
    separator(out, '-', 60)?;
    writeln!(out, "{:<15} {:<6} {:<12} Price Range", "Brand", "Cars", "Avg Price")?;
    separator(out, '-', 60)?;
    for s in stats {
        writeln!(
            out,
            "{:<15} {:<6} {:>9}   {} - {}",
            title_case(&s.brand),
            s.count,
            money(s.price.average),
            money(s.price.min as f64),
            money(s.price.max as f64),
        )?;
    }
    writeln!(out)
}

pub fn ranking_menu(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\nHow would you like to rank the cars?")?;
    separator(out, '-', 40)?;
    for m in RankingMethod::ALL {
        writeln!(out, "{}. {}", m.menu_key(), m.label())?;
    }
    Ok(())
}

/// Feedback after the price-ceiling stage.
pub fn price_feedback(out: &mut impl Write, report: &StageReport, max: &Threshold<f64>) -> io::Result<()> {
    match (&report.outcome, max) {
        (StageOutcome::Applied, Threshold::Value(max)) => writeln!(
            out,
            "Filtered to {} cars under {}",
            report.remaining,
            money(*max)
        ),
        (StageOutcome::Ignored { .. }, _) => writeln!(out, "Invalid price entered, skipping price filter"),
        _ => Ok(()),
    }
}

/// Feedback after the year-floor stage.
pub fn year_feedback(out: &mut impl Write, report: &StageReport, min: &Threshold<i32>) -> io::Result<()> {
    match (&report.outcome, min) {
        (StageOutcome::Applied, Threshold::Value(min)) => writeln!(
            out,
            "Filtered to {} cars from {min} or newer",
            report.remaining
        ),
        (StageOutcome::Ignored { .. }, _) => writeln!(out, "Invalid year entered, skipping year filter"),
        _ => Ok(()),
    }
}

fn record_block(out: &mut impl Write, rank: usize, car: &Record) -> io::Result<()> {
    writeln!(out, "{rank:2}. {} ({})", title_case(&car.model), car.year)?;
    writeln!(out, " Price: ${}", thousands(car.price))?;
    writeln!(out, " Year: {}", car.year)?;
    writeln!(out, " Mileage: {} miles", thousands(car.mileage))?;
    writeln!(out, " Color: {}", title_case(&car.color))?;
    if let Some(per_year) = car.price_per_year() {
        writeln!(out, "Value Score: {}/year", money(per_year))?;
    }
    writeln!(out)
}

fn summary_line(out: &mut impl Write, summary: &Summary) -> io::Result<()> {
    match summary.price {
        Some(price) if summary.count > 1 => writeln!(
            out,
            "\nSummary: {} cars, Average price: {}, Price range: {} - {}",
            summary.count,
            money(price.average),
            money(price.min as f64),
            money(price.max as f64),
        ),
        _ => Ok(()),
    }
}

/// Text view of a query result: top records, overflow count, summary.
pub fn results(out: &mut impl Write, outcome: &QueryOutcome<'_>) -> io::Result<()> {
    let brand = title_case(&outcome.brand);
    if outcome.is_no_match() {
        return writeln!(out, "No cars found matching your criteria for {brand}.");
    }

    let top = outcome.top();
    writeln!(
        out,
        "\nTop {} cars from '{brand}' ranked by {}:",
        top.shown.len(),
        outcome.method.label()
    )?;
    separator(out, '=', 80)?;
    for (i, car) in top.shown.iter().enumerate() {
        record_block(out, i + 1, car)?;
    }
    if top.remaining > 0 {
        writeln!(out, "... and {} more cars available", top.remaining)?;
    }
    summary_line(out, &outcome.summary)
}

#[derive(Serialize)]
struct JsonResults<'o, 'a> {
    brand: &'o str,
    method: &'static str,
    stages: &'o [StageReport],
    top: &'o [&'a Record],
    remaining: usize,
    summary: &'o Summary,
}

/// JSON view of a query result (same content as [`results`]).
pub fn results_json(out: &mut impl Write, outcome: &QueryOutcome<'_>) -> io::Result<()> {
    let top = outcome.top();
    let view = JsonResults {
        brand: &outcome.brand,
        method: outcome.method.id(),
        stages: &outcome.stages,
        top: top.shown,
        remaining: top.remaining,
        summary: &outcome.summary,
    };
    serde_json::to_writer_pretty(&mut *out, &view).map_err(io::Error::other)?;
    writeln!(out)
}
