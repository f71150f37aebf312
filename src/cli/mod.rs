//! Interactive terminal front end.
//!
//! [`Cli`] holds the command-line flags; [`run`] loads the dataset and drives an [`Interactive`]
//! menu loop over any `BufRead`/`Write` pair (stdin/stdout in the binary, byte buffers in tests).
//!
//! Entering `q` at any prompt (or closing input) ends the session cleanly.

pub mod render;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use crate::error::LoadError;
use crate::ingestion::{CompositeObserver, FileObserver, LoadObserver, LoadOptions, StdErrObserver};
use crate::processing::filter::{by_max_price, by_min_year};
use crate::processing::{RankingMethod, SortAlgorithm, Threshold, summarize};
use crate::session::{Query, Session, SessionOptions};

#[derive(Parser, Debug, Clone)]
#[command(name = "car-ranking")]
#[command(about = "Rank used-car listings of a brand by price, year, mileage or value", long_about = None)]
#[command(version)]
pub struct Cli {
    /// CSV file with vehicle listings
    #[arg(default_value = "USA_cars_datasets.csv")]
    pub path: PathBuf,

    /// Number of ranked cars to show
    #[arg(short, long, default_value = "10")]
    pub limit: usize,

    /// Append load events to this file
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// Log load events (including every skipped row) to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Use a guaranteed O(n log n) stable merge sort instead of the partition sort
    #[arg(long = "stable-merge")]
    pub stable_merge: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn load_options(&self) -> LoadOptions {
        let mut observers: Vec<Arc<dyn LoadObserver>> = Vec::new();
        if self.verbose {
            observers.push(Arc::new(StdErrObserver));
        }
        if let Some(path) = &self.log_file {
            observers.push(Arc::new(FileObserver::new(path)));
        }

        let observer: Option<Arc<dyn LoadObserver>> = match observers.len() {
            0 => None,
            1 => observers.pop(),
            _ => Some(Arc::new(CompositeObserver::new(observers))),
        };
        LoadOptions {
            observer,
            ..LoadOptions::default()
        }
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            display_limit: self.limit,
            sort_algorithm: if self.stable_merge {
                SortAlgorithm::Merge
            } else {
                SortAlgorithm::Partition
            },
            ..SessionOptions::default()
        }
    }
}

/// Load the dataset named by `cli` and run the interactive loop.
///
/// Returns [`ExitCode::FAILURE`] when the load fails; the loop is never entered in that case.
pub fn run<R: BufRead, W: Write>(cli: &Cli, input: R, mut out: W) -> io::Result<ExitCode> {
    writeln!(out, "Car Ranking System")?;
    render::separator(&mut out, '=', 50)?;

    let session = match Session::load(&cli.path, &cli.load_options(), cli.session_options()) {
        Ok(session) => session,
        Err(e) => {
            load_failure(&mut out, cli, &e)?;
            return Ok(ExitCode::FAILURE);
        }
    };

    if session.rejected() > 0 {
        writeln!(out, "Note: Skipped {} rows due to invalid data", session.rejected())?;
    }
    writeln!(
        out,
        "Successfully loaded {} cars from {} brands",
        session.accepted(),
        session.index().len()
    )?;

    Interactive::new(&session, input, out, cli.json).run()?;
    Ok(ExitCode::SUCCESS)
}

fn load_failure(out: &mut impl Write, cli: &Cli, e: &LoadError) -> io::Result<()> {
    match e {
        LoadError::Io(err) if err.kind() == io::ErrorKind::NotFound => {
            writeln!(out, "Error: Could not find the file '{}'.", cli.path.display())?;
            writeln!(out, "Please make sure the file exists in the correct location.")
        }
        LoadError::Csv(err)
            if matches!(err.kind(), ::csv::ErrorKind::Io(e) if e.kind() == io::ErrorKind::NotFound) =>
        {
            writeln!(out, "Error: Could not find the file '{}'.", cli.path.display())?;
            writeln!(out, "Please make sure the file exists in the correct location.")
        }
        LoadError::NoValidRows { rejected } => {
            if *rejected > 0 {
                writeln!(out, "Note: Skipped {rejected} rows due to invalid data")?;
            }
            writeln!(out, "Error: No valid data found in the CSV file.")
        }
        other => writeln!(out, "Error loading data: {other}"),
    }
}

/// Whether the loop should keep going.
enum Step<T> {
    Next(T),
    Quit,
}

/// The menu loop over a loaded [`Session`].
pub struct Interactive<'s, R, W> {
    session: &'s Session,
    input: R,
    out: W,
    json: bool,
}

impl<'s, R: BufRead, W: Write> Interactive<'s, R, W> {
    pub fn new(session: &'s Session, input: R, out: W, json: bool) -> Self {
        Self {
            session,
            input,
            out,
            json,
        }
    }

    /// Run until the user quits or declines another search.
    pub fn run(mut self) -> io::Result<()> {
        loop {
            writeln!(self.out)?;
            render::separator(&mut self.out, '=', 50)?;
            if let Step::Quit = self.search_once()? {
                break;
            }
        }
        writeln!(self.out, "\nThank you for using the Car Ranking System!")
    }

    fn search_once(&mut self) -> io::Result<Step<()>> {
        let Step::Next(brand) = self.select_brand()? else {
            return Ok(Step::Quit);
        };
        let Step::Next(query) = self.select_filters(&brand)? else {
            return Ok(Step::Quit);
        };
        let Some(query) = query else {
            writeln!(
                self.out,
                "No cars available for the brand '{brand}' with your criteria."
            )?;
            return Ok(Step::Next(()));
        };
        let Step::Next(method) = self.select_method()? else {
            return Ok(Step::Quit);
        };

        let outcome = self.session.run_query(&Query { method, ..query });
        if self.json {
            render::results_json(&mut self.out, &outcome)?;
        } else {
            render::results(&mut self.out, &outcome)?;
        }

        match self.prompt("\nWould you like to search again? (y/n): ")? {
            Some(answer) if matches!(answer.to_lowercase().as_str(), "y" | "yes") => Ok(Step::Next(())),
            _ => Ok(Step::Quit),
        }
    }

    fn select_brand(&mut self) -> io::Result<Step<String>> {
        let session = self.session;
        let index = session.index();
        render::brand_menu(&mut self.out, index)?;
        let brands: Vec<&str> = index.brands().collect();

        loop {
            let msg = format!("\nSelect a brand (1-{}) or 'q' to quit: ", brands.len());
            let Some(choice) = self.prompt(&msg)? else {
                return Ok(Step::Quit);
            };
            if choice.eq_ignore_ascii_case("q") {
                return Ok(Step::Quit);
            }
            match choice.parse::<usize>() {
                Ok(n) if n == brands.len() + 1 => {
                    render::brand_statistics(&mut self.out, &session.brand_statistics())?;
                }
                Ok(n) if (1..=brands.len()).contains(&n) => {
                    return Ok(Step::Next(brands[n - 1].to_owned()));
                }
                Ok(_) => writeln!(
                    self.out,
                    "Invalid choice. Please select a number between 1 and {}.",
                    brands.len()
                )?,
                Err(_) => writeln!(self.out, "Invalid input. Please enter a number or 'q' to quit.")?,
            }
        }
    }

    /// Prompt for the optional thresholds, reporting each stage as it runs.
    ///
    /// Yields `None` when nothing survives.
    fn select_filters(&mut self, brand: &str) -> io::Result<Step<Option<Query>>> {
        let session = self.session;
        let (clean, _) = session.candidates(brand);
        let Some(price_range) = summarize(&clean).price else {
            return Ok(Step::Next(None));
        };
        let mut query = Query::new(brand, RankingMethod::Price);

        writeln!(
            self.out,
            "\nFound {} clean vehicles for {}",
            clean.len(),
            render::title_case(brand)
        )?;
        writeln!(
            self.out,
            "Price range: {} - {}",
            render::money(price_range.min as f64),
            render::money(price_range.max as f64)
        )?;
        let Some(raw) = self.prompt("Enter maximum price (or press Enter to skip): ")? else {
            return Ok(Step::Quit);
        };
        if raw.eq_ignore_ascii_case("q") {
            return Ok(Step::Quit);
        }
        query.max_price = Threshold::parse_price(&raw);
        let (remaining, report) = by_max_price(&clean, &query.max_price);
        render::price_feedback(&mut self.out, &report, &query.max_price)?;

        let Some((oldest, newest)) = summarize(&remaining).years else {
            return Ok(Step::Next(None));
        };
        writeln!(self.out, "Year range: {oldest} - {newest}")?;
        let Some(raw) = self.prompt("Enter minimum year (or press Enter to skip): ")? else {
            return Ok(Step::Quit);
        };
        if raw.eq_ignore_ascii_case("q") {
            return Ok(Step::Quit);
        }
        query.min_year = Threshold::parse(&raw);
        let (remaining, report) = by_min_year(&remaining, &query.min_year);
        render::year_feedback(&mut self.out, &report, &query.min_year)?;

        if remaining.is_empty() {
            return Ok(Step::Next(None));
        }
        Ok(Step::Next(Some(query)))
    }

    fn select_method(&mut self) -> io::Result<Step<RankingMethod>> {
        render::ranking_menu(&mut self.out)?;
        let n = RankingMethod::ALL.len();
        loop {
            let msg = format!("\nSelect a ranking method (1-{n}) or 'q' to quit: ");
            let Some(choice) = self.prompt(&msg)? else {
                return Ok(Step::Quit);
            };
            if choice.eq_ignore_ascii_case("q") {
                return Ok(Step::Quit);
            }
            match RankingMethod::from_selection(&choice) {
                Some(method) => return Ok(Step::Next(method)),
                None => writeln!(
                    self.out,
                    "Invalid choice. Please select a number between 1 and {n}."
                )?,
            }
        }
    }

    /// Print `msg` and read one trimmed line. `None` on end of input.
    fn prompt(&mut self, msg: &str) -> io::Result<Option<String>> {
        write!(self.out, "{msg}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }
}
