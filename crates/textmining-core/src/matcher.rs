//! Line-level term matching
//!
//! A page is split on `\n` into lines numbered from 0. Each line is folded
//! once (see [`Normalizer`]) and every term test runs against the folded
//! copy, so the raw text handed back in a [`MatchedLine`] is untouched.

use crate::normalize::Normalizer;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Markers that identify a line which already carries provenance
pub const PAGE_MARKER: &str = "| Page:";
pub const LINE_MARKER: &str = "| Line:";

/// One extracted line of a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLine<'a> {
    /// 0-based index within the page
    pub line_number: usize,
    pub raw: &'a str,
    folded: String,
}

impl PageLine<'_> {
    pub fn folded(&self) -> &str {
        &self.folded
    }
}

/// The lines of one page, borrowed from the extracted page text
#[derive(Debug, Clone)]
pub struct Page<'a> {
    /// 1-based page number
    pub page_number: usize,
    pub lines: Vec<PageLine<'a>>,
}

impl<'a> Page<'a> {
    pub fn new(page_number: usize, text: &'a str, normalizer: &Normalizer) -> Self {
        let lines = text
            .split('\n')
            .enumerate()
            .map(|(line_number, raw)| PageLine {
                line_number,
                raw,
                folded: normalizer.fold(raw),
            })
            .collect();

        Self { page_number, lines }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// A line that contained a term, with page/line provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedLine {
    pub page_number: usize,
    pub line_number: usize,
    pub text: String,
    /// False when the raw line already carried `| Page:` or `| Line:`
    pub provenance_appended: bool,
}

impl MatchedLine {
    pub fn new(page_number: usize, line: &PageLine<'_>) -> Self {
        let provenance_appended =
            !(line.raw.contains(PAGE_MARKER) || line.raw.contains(LINE_MARKER));

        Self {
            page_number,
            line_number: line.line_number,
            text: line.raw.to_string(),
            provenance_appended,
        }
    }
}

impl fmt::Display for MatchedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.provenance_appended {
            write!(
                f,
                "{} | Page: {} | Line: {}",
                self.text, self.page_number, self.line_number
            )
        } else {
            f.write_str(&self.text)
        }
    }
}

/// Scans page lines for a single folded term
#[derive(Debug, Clone, Copy, Default)]
pub struct LineMatcher {
    /// Upper bound on window-shrink steps per line; defaults to the line length
    pub max_shrink_steps: Option<usize>,
}

impl LineMatcher {
    pub fn new(max_shrink_steps: Option<usize>) -> Self {
        Self { max_shrink_steps }
    }

    /// Total occurrence count of `term` over `lines` (counting mode)
    pub fn count<'p, 'a: 'p>(
        &self,
        lines: impl IntoIterator<Item = &'p PageLine<'a>>,
        term: &str,
    ) -> usize {
        lines
            .into_iter()
            .map(|line| self.count_in_line(line.folded(), term))
            .sum()
    }

    /// Lines that contain `term`, in input order (line-collection mode)
    pub fn matching<'p, 'a: 'p>(
        &self,
        lines: impl IntoIterator<Item = &'p PageLine<'a>>,
        term: &str,
    ) -> Vec<&'p PageLine<'a>> {
        lines
            .into_iter()
            .filter(|line| line.folded().contains(term))
            .collect()
    }

    /// Occurrences of `term` in one folded line, by window shrinking
    ///
    /// Starting from the whole line, while the first and last occurrence
    /// differ, count one hit and narrow the window to `[first, last)`, then
    /// look for the term again inside the narrowed window. A single
    /// occurrence counts as 1, none as 0. For self-overlapping or repeated
    /// terms this is lower than a naive substring count
    /// (`"cat cat cat"` counts 2).
    ///
    /// The loop also stops when the window stops shrinking (empty term) or
    /// after `max_shrink_steps` steps.
    pub fn count_in_line(&self, line: &str, term: &str) -> usize {
        let (Some(mut first), Some(mut last)) = (line.find(term), line.rfind(term)) else {
            return 0;
        };
        if first == last {
            return 1;
        }

        let bound = self.max_shrink_steps.unwrap_or(line.len()).max(1);
        let mut window = line;
        let mut count = 0;

        while first != last {
            if count >= bound {
                warn!(term, bound, "occurrence count reached its safety bound");
                break;
            }
            count += 1;

            let narrowed = &window[first..last];
            if narrowed.len() >= window.len() {
                break;
            }
            window = narrowed;

            match (window.find(term), window.rfind(term)) {
                (Some(f), Some(l)) => {
                    first = f;
                    last = l;
                }
                _ => break,
            }
        }

        count
    }
}
