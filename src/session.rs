//! Interactive session
//!
//! Holds the loaded dataset and re-renders the chosen view from scratch on
//! every selection. Nothing is cached between selections.

use crate::dataset::Dataset;
use crate::error::Result;
use crate::render::{render, OutputFormat};
use crate::view::{build_report, ReportOptions, View};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Show(View),
    Quit,
}

/// Interpret one line of menu input: a number, a view label, or quit
pub fn parse_selection(input: &str) -> Option<Selection> {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
        return Some(Selection::Quit);
    }
    if let Ok(n) = trimmed.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|idx| View::ALL.get(idx).copied())
            .map(Selection::Show);
    }
    trimmed.parse::<View>().ok().map(Selection::Show)
}

pub struct Session {
    dataset: Dataset,
    options: ReportOptions,
}

impl Session {
    pub fn new(dataset: Dataset, options: ReportOptions) -> Self {
        Self { dataset, options }
    }

    pub fn render(&self, view: View, format: OutputFormat) -> Result<String> {
        let report = build_report(&self.dataset, view, &self.options)?;
        render(&report, format)
    }

    /// Menu loop until quit or end of input
    pub fn run_interactive<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> Result<()> {
        loop {
            writeln!(output, "Navigation")?;
            for (idx, view) in View::ALL.iter().enumerate() {
                writeln!(output, "  [{}] {}", idx + 1, view)?;
            }
            write!(output, "Choose a dashboard section (q to quit): ")?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                debug!("End of input, leaving session");
                writeln!(output)?;
                return Ok(());
            }

            match parse_selection(&line) {
                Some(Selection::Quit) => return Ok(()),
                Some(Selection::Show(view)) => match self.render(view, OutputFormat::Text) {
                    Ok(text) => writeln!(output, "\n{}", text)?,
                    Err(e) => {
                        warn!("View {} failed: {}", view, e);
                        writeln!(output, "\nCould not render {}: {}\n", view, e)?;
                    }
                },
                None => writeln!(output, "Invalid choice. Please try again.\n")?,
            }
        }
    }
}
