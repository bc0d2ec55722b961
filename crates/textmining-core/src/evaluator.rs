//! Applying a query's combinator to one page
//!
//! Two families of strategies exist and both are kept:
//! - Tally strategies count occurrences per term over the full page. AND
//!   acceptance (every term seen) is decided once for the whole document
//!   when the report is built, not per page.
//! - Filter strategies collect matching lines with provenance. OR runs each
//!   term over the full page and never deduplicates; AND narrows the line
//!   set term by term.

use crate::matcher::{LineMatcher, MatchedLine, Page, PageLine};
use crate::query::{Combinator, Query};
use crate::report::ReportShape;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Evaluation strategy, selected from the report shape and the combinator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    SingleTally,
    OrTally,
    AndTally,
    SingleFilter,
    OrFilter,
    AndFilter,
}

impl Strategy {
    pub fn select(shape: ReportShape, combinator: Combinator) -> Self {
        match (shape, combinator) {
            (ReportShape::OccurrenceSummary, Combinator::Single) => Strategy::SingleTally,
            (ReportShape::OccurrenceSummary, Combinator::Or) => Strategy::OrTally,
            (ReportShape::OccurrenceSummary, Combinator::And) => Strategy::AndTally,
            (ReportShape::LineDump, Combinator::Single) => Strategy::SingleFilter,
            (ReportShape::LineDump, Combinator::Or) => Strategy::OrFilter,
            (ReportShape::LineDump, Combinator::And) => Strategy::AndFilter,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Occurrence count of one term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermOccurrence {
    pub term: String,
    pub count: usize,
}

/// Outcome of evaluating one page, folded into the aggregate then dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageResult {
    /// One entry per distinct term, in first-seen order
    Tally(Vec<TermOccurrence>),
    Lines(Vec<MatchedLine>),
}

impl PageResult {
    /// Whether the page produced anything worth reporting
    pub fn has_content(&self) -> bool {
        match self {
            PageResult::Tally(tally) => tally.iter().any(|entry| entry.count > 0),
            PageResult::Lines(lines) => !lines.is_empty(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ConditionEvaluator {
    strategy: Strategy,
    matcher: LineMatcher,
}

impl ConditionEvaluator {
    pub fn new(strategy: Strategy, matcher: LineMatcher) -> Self {
        Self { strategy, matcher }
    }

    pub fn evaluate(&self, query: &Query, page: &Page<'_>) -> PageResult {
        match self.strategy {
            Strategy::SingleTally | Strategy::OrTally | Strategy::AndTally => {
                PageResult::Tally(self.tally(query, page))
            }
            Strategy::SingleFilter | Strategy::OrFilter => {
                PageResult::Lines(self.collect_each(query, page))
            }
            Strategy::AndFilter => PageResult::Lines(self.narrow(query, page)),
        }
    }

    /// Count every term independently over the full page
    fn tally(&self, query: &Query, page: &Page<'_>) -> Vec<TermOccurrence> {
        let mut tally: Vec<TermOccurrence> = Vec::with_capacity(query.terms.len());

        for term in &query.terms {
            let count = self.matcher.count(&page.lines, term);
            match tally.iter_mut().find(|entry| entry.term == *term) {
                Some(entry) => entry.count += count,
                None => tally.push(TermOccurrence {
                    term: term.clone(),
                    count,
                }),
            }
        }

        tally
    }

    /// Match each term against all lines; a line hit by two terms is kept twice
    fn collect_each(&self, query: &Query, page: &Page<'_>) -> Vec<MatchedLine> {
        query
            .terms
            .iter()
            .flat_map(|term| self.matcher.matching(&page.lines, term))
            .map(|line| MatchedLine::new(page.page_number, line))
            .collect()
    }

    /// Keep only lines matching term 1, then filter those by term 2, and so on
    fn narrow(&self, query: &Query, page: &Page<'_>) -> Vec<MatchedLine> {
        if query.terms.is_empty() {
            return Vec::new();
        }

        let mut surviving: Vec<&PageLine<'_>> = page.lines.iter().collect();
        for term in &query.terms {
            surviving = self.matcher.matching(surviving, term);
            if surviving.is_empty() {
                break;
            }
        }

        surviving
            .into_iter()
            .map(|line| MatchedLine::new(page.page_number, line))
            .collect()
    }
}
