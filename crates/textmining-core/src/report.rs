//! Folding per-page results into the final report
//!
//! Two report shapes are produced:
//! - `LineDump`: every matching line with provenance, preceded by a section
//!   header the first time the query's category yields content, and a
//!   fallback line when nothing matched.
//! - `OccurrenceSummary`: one fixed block per search with the running
//!   `term ( count )` tally.

use crate::evaluator::{PageResult, TermOccurrence};
use crate::query::Combinator;
use crate::sink::{HISTORY_FILE_NAME, LOG_FILE_NAME};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

pub const NO_RESULTS: &str = "Nenhum registro encontrado.";
pub const BANNER: &str = "********************************************";

/// Which report the engine produces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportShape {
    /// Raw line audit
    #[default]
    LineDump,
    /// Quantitative occurrence report labelled with the search counter
    OccurrenceSummary,
}

impl ReportShape {
    /// File name of the sink inside the caller's log directory
    pub fn sink_file_name(self) -> &'static str {
        match self {
            ReportShape::LineDump => LOG_FILE_NAME,
            ReportShape::OccurrenceSummary => HISTORY_FILE_NAME,
        }
    }
}

impl FromStr for ReportShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "line_dump" | "lines" => Ok(ReportShape::LineDump),
            "occurrence_summary" | "summary" => Ok(ReportShape::OccurrenceSummary),
            other => Err(format!(
                "Unknown report shape: {other}. Use 'line_dump' or 'occurrence_summary'"
            )),
        }
    }
}

impl fmt::Display for ReportShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportShape::LineDump => f.write_str("line_dump"),
            ReportShape::OccurrenceSummary => f.write_str("occurrence_summary"),
        }
    }
}

/// Section header printed before a category's first matching lines
pub fn section_header(combinator: Combinator) -> &'static str {
    match combinator {
        Combinator::Single => "Resultados (condição simples):",
        Combinator::Or => "Resultados (condição OU):",
        Combinator::And => "Resultados (condição E):",
    }
}

/// The finished report, owned by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchReport {
    pub shape: ReportShape,
    lines: Vec<String>,
}

impl SearchReport {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl IntoIterator for SearchReport {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.into_iter()
    }
}

/// Running term -> count mapping for the life of one search
///
/// Keeps first-seen order so the summary lists terms as they were typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccurrenceTally {
    entries: Vec<TermOccurrence>,
}

impl OccurrenceTally {
    pub fn add(&mut self, term: &str, count: usize) {
        match self.entries.iter_mut().find(|entry| entry.term == term) {
            Some(entry) => entry.count += count,
            None => self.entries.push(TermOccurrence {
                term: term.to_string(),
                count,
            }),
        }
    }

    /// Fold a page's tally in, but only when some term was seen on that page
    ///
    /// Zero entries of an accepted page are still recorded, so a term that
    /// never matches shows up as `( 0 )` once any other term matched.
    pub fn absorb_page(&mut self, page: &[TermOccurrence]) -> bool {
        if !page.iter().any(|entry| entry.count > 0) {
            return false;
        }
        for entry in page {
            self.add(&entry.term, entry.count);
        }
        true
    }

    pub fn all_positive(&self) -> bool {
        !self.entries.is_empty() && self.entries.iter().all(|entry| entry.count > 0)
    }

    /// `term ( count ) ` pairs, each followed by a single space
    pub fn pairs(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("{} ( {} ) ", entry.term, entry.count))
            .collect()
    }
}

/// Labels for the summary block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportContext {
    /// Search sequence number from the counter collaborator
    pub sequence: u64,
    /// File name of the searched document, without directories
    pub document_name: String,
    /// The condition exactly as typed
    pub condition: String,
}

pub struct ResultAggregator {
    shape: ReportShape,
    combinator: Combinator,
    lines: Vec<String>,
    headers_emitted: HashSet<Combinator>,
    tally: OccurrenceTally,
}

impl ResultAggregator {
    pub fn new(shape: ReportShape, combinator: Combinator) -> Self {
        Self {
            shape,
            combinator,
            lines: Vec::new(),
            headers_emitted: HashSet::new(),
            tally: OccurrenceTally::default(),
        }
    }

    pub fn fold_page(&mut self, result: PageResult) {
        match result {
            PageResult::Tally(page) => {
                self.tally.absorb_page(&page);
            }
            PageResult::Lines(matched) => {
                if matched.is_empty() {
                    return;
                }
                if self.headers_emitted.insert(self.combinator) {
                    self.lines.push(section_header(self.combinator).to_string());
                }
                self.lines.extend(matched.iter().map(ToString::to_string));
            }
        }
    }

    pub fn finish(self, context: &ReportContext) -> SearchReport {
        let lines = match self.shape {
            ReportShape::LineDump => {
                let mut lines = self.lines;
                if lines.is_empty() {
                    lines.push(NO_RESULTS.to_string());
                }
                lines
            }
            ReportShape::OccurrenceSummary => {
                let accepted = self.combinator != Combinator::And || self.tally.all_positive();
                let pairs = if accepted {
                    self.tally.pairs()
                } else {
                    String::new()
                };

                vec![
                    BANNER.to_string(),
                    format!("Número da consulta: {}", context.sequence),
                    format!("Nome do documento: {}", context.document_name),
                    format!("String de busca: {}", context.condition),
                    format!("Ocorrências: {pairs}"),
                    BANNER.to_string(),
                ]
            }
        };

        SearchReport {
            shape: self.shape,
            lines,
        }
    }
}
