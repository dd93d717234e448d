//! Interactive terminal front end
//!
//! Reads one query per line, runs exactly one search per non-empty line and
//! prints the formatted result with terminal styling. The About and How-to
//! panels are printed on start and on `:help`. Commands start with `:` so
//! any plain word can still be searched.

use crate::format::{ENTRY_DELIMITER, LINK_MARKER, SNIPPET_MARKER};
use crate::types::{Query, TOP_RESULTS};
use crate::{search_internet, SerperClient};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, Write};
use std::time::Duration;

pub const PROMPT: &str = "🔎 Enter your search query:";
pub const BUSY_MESSAGE: &str = "Searching the internet...";

/// One line of operator input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Query(Query),
    Empty,
    Help,
    Quit,
}

pub fn parse_submission(line: &str) -> Submission {
    let trimmed = line.trim();
    match trimmed {
        "" => Submission::Empty,
        ":q" | ":quit" => Submission::Quit,
        ":h" | ":help" => Submission::Help,
        _ => match Query::new(trimmed) {
            Ok(query) => Submission::Query(query),
            Err(_) => Submission::Empty,
        },
    }
}

pub fn banner() -> String {
    format!(
        "{}\n{}",
        "🔍 Internet Search Tool".bold().blue(),
        "Enter a search query to get the top results from the internet using Serper API."
    )
}

pub fn about_panel() -> String {
    let features = [
        format!("Top {TOP_RESULTS} search results"),
        "Real-time web search".to_string(),
        "Clean, formatted output".to_string(),
    ];

    let mut panel = format!("{}\n", "ℹ️  About".bold());
    panel.push_str("This search tool uses the Serper API to fetch search results from Google.\n");
    panel.push_str(&format!("{}\n", "Features:".bold()));
    for feature in features {
        panel.push_str(&format!("• {feature}\n"));
    }
    panel
}

pub fn usage_panel() -> String {
    let mut panel = format!("{}\n", "🛠️  How to use:".bold());
    panel.push_str("1. Enter your search query\n");
    panel.push_str("2. Press Enter to search\n");
    panel.push_str("3. View the results below\n");
    panel.push_str(&format!("{}\n", "Type ':help' to see this again, ':q' to leave.".dimmed()));
    panel
}

/// Render formatted search text for the terminal.
///
/// `**title**` lines become bold, link lines are underlined and the entry
/// delimiter becomes a horizontal rule. Anything else is printed as-is.
pub fn render_rich(text: &str) -> String {
    text.lines()
        .map(|line| {
            if let Some(title) = line
                .strip_prefix("**")
                .and_then(|rest| rest.strip_suffix("**"))
            {
                title.bold().to_string()
            } else if let Some(link) = line.strip_prefix(LINK_MARKER) {
                format!("{LINK_MARKER} {}", link.trim_start().blue().underline())
            } else if let Some(snippet) = line.strip_prefix(SNIPPET_MARKER) {
                format!("{SNIPPET_MARKER} {}", snippet.trim_start().italic())
            } else if line == ENTRY_DELIMITER {
                "─".repeat(60).dimmed().to_string()
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Read-search-print loop over arbitrary input and output streams
pub struct Shell<'a, R, W> {
    client: &'a SerperClient,
    input: R,
    output: W,
    spinner: bool,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(client: &'a SerperClient, input: R, output: W) -> Self {
        Self {
            client,
            input,
            output,
            spinner: true,
        }
    }

    /// Show or hide the busy spinner while a search is running
    pub fn with_spinner(mut self, spinner: bool) -> Self {
        self.spinner = spinner;
        self
    }

    /// Run until end of input or `:q`. Returns the number of searches made.
    pub async fn run(&mut self) -> io::Result<usize> {
        writeln!(self.output, "{}\n", banner())?;
        self.print_panels()?;

        let mut searches = 0;
        loop {
            write!(self.output, "{} ", PROMPT.bold())?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                break;
            }

            match parse_submission(&line) {
                Submission::Empty => continue,
                Submission::Quit => break,
                Submission::Help => self.print_panels()?,
                Submission::Query(query) => {
                    let text = self.submit(&query).await;
                    searches += 1;
                    writeln!(self.output, "\n{}", "📊 Search Results:".bold())?;
                    writeln!(self.output, "{}\n", render_rich(&text))?;
                }
            }
        }

        Ok(searches)
    }

    fn print_panels(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", about_panel())?;
        writeln!(self.output, "{}", usage_panel())
    }

    async fn submit(&self, query: &Query) -> String {
        let progress = self.busy_indicator();
        let text = search_internet(self.client, query.as_str()).await;
        progress.finish_and_clear();
        text
    }

    fn busy_indicator(&self) -> ProgressBar {
        if !self.spinner {
            return ProgressBar::hidden();
        }

        let progress = ProgressBar::new_spinner();
        progress.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        progress.set_message(BUSY_MESSAGE);
        progress.enable_steady_tick(Duration::from_millis(100));
        progress
    }
}
