//! Condition-based text search over extracted document pages
//!
//! This crate parses a human-typed condition (`"cat"`, `"cat OR dog"`,
//! `"cat AND dog"`), scans each page's lines for the terms and folds the
//! results into an ordered, printable report.
//!
//! Two report shapes are available:
//! - `ReportShape::LineDump`: matching lines with `| Page: n | Line: m`
//!   provenance, written to `TextMiningLog.log`
//! - `ReportShape::OccurrenceSummary`: one `term ( count )` block per
//!   search, written to `TextMiningHistory.txt`
//!
//! Text extraction, the log sink and the search counter are collaborators
//! injected into [`SearchEngine`].

pub mod config;
pub mod counter;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod matcher;
pub mod normalize;
pub mod query;
pub mod report;
pub mod sink;
pub mod source;

pub use config::{SearchConfig, SearchOptions};
pub use counter::{FileSearchCounter, InMemoryCounter, SearchCounter};
pub use engine::SearchEngine;
pub use error::SearchError;
pub use evaluator::{ConditionEvaluator, PageResult, Strategy, TermOccurrence};
pub use matcher::{LineMatcher, MatchedLine, Page, PageLine};
pub use normalize::Normalizer;
pub use query::{Combinator, Query};
pub use report::{ReportShape, ResultAggregator, SearchReport, NO_RESULTS};
pub use sink::{FileSink, ReportSink};
pub use source::{InMemoryExtractor, PlainTextExtractor, TextExtractor};
