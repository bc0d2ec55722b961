//! Search facade
//!
//! Validates the call, walks the document page by page through the injected
//! [`TextExtractor`], writes the report to the sink in the log directory and
//! bumps the [`SearchCounter`].

use crate::config::{SearchConfig, SearchOptions};
use crate::counter::{FileSearchCounter, SearchCounter};
use crate::error::SearchError;
use crate::evaluator::{ConditionEvaluator, Strategy};
use crate::matcher::Page;
use crate::query::Query;
use crate::report::{ReportContext, ResultAggregator, SearchReport};
use crate::sink::{FileSink, ReportSink};
use crate::source::TextExtractor;
use std::path::Path;
use tracing::{debug, info};

pub struct SearchEngine {
    extractor: Box<dyn TextExtractor>,
    counter: Box<dyn SearchCounter>,
    options: SearchOptions,
}

impl SearchEngine {
    pub fn new(extractor: Box<dyn TextExtractor>, counter: Box<dyn SearchCounter>) -> Self {
        Self {
            extractor,
            counter,
            options: SearchOptions::default(),
        }
    }

    /// Engine with a file-backed counter at the configured location
    pub fn from_config(extractor: Box<dyn TextExtractor>, config: &SearchConfig) -> Self {
        Self::new(
            extractor,
            Box::new(FileSearchCounter::new(config.counter.path.clone())),
        )
        .with_options(config.options())
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    /// Run one search
    ///
    /// # Errors
    ///
    /// Checked in this order, before any page is read or sink opened:
    /// - `DocumentNotFound` if `document` is not an existing file
    /// - `LogPathNotFound` if `log_dir` is not an existing directory
    /// - `InvalidCondition` if `condition` holds no non-blank term
    ///
    /// Afterwards `ExtractionFailed`, `SinkWriteFailure` or `CounterFailure`
    /// abort the call; no partial report is returned. The sink is opened only
    /// once every page has been read, and the counter is persisted before any
    /// line is appended, so a failed call leaves no report lines in the log.
    pub fn search(
        &mut self,
        document: &Path,
        log_dir: &Path,
        condition: &str,
    ) -> Result<SearchReport, SearchError> {
        if !document.is_file() {
            return Err(SearchError::DocumentNotFound(document.to_path_buf()));
        }
        if !log_dir.is_dir() {
            return Err(SearchError::LogPathNotFound(log_dir.to_path_buf()));
        }
        let query = Query::parse(condition, &self.options.normalizer)?;

        let shape = self.options.shape;
        let strategy = Strategy::select(shape, query.combinator);
        let evaluator = ConditionEvaluator::new(strategy, self.options.matcher);
        let sequence = self.counter.read().saturating_add(1);

        info!(
            document = %document.display(),
            combinator = %query.combinator,
            %strategy,
            terms = query.terms.len(),
            "starting search"
        );

        let mut aggregator = ResultAggregator::new(shape, query.combinator);

        for (index, text) in self.extractor.pages(document)?.enumerate() {
            let text = text?;
            let page = Page::new(index + 1, &text, &self.options.normalizer);
            let result = evaluator.evaluate(&query, &page);
            debug!(
                page = page.page_number,
                lines = page.line_count(),
                hit = result.has_content(),
                "page evaluated"
            );
            aggregator.fold_page(result);
        }

        let context = ReportContext {
            sequence,
            document_name: document
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            condition: query.raw.clone(),
        };
        let report = aggregator.finish(&context);

        let mut sink = FileSink::open(log_dir, shape.sink_file_name())?;
        let persisted = self.counter.increment_and_persist()?;
        sink.append_lines(report.lines())?;
        sink.flush()?;
        info!(
            lines = report.len(),
            sequence = persisted,
            "search complete"
        );

        Ok(report)
    }
}
