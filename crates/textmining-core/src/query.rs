//! Condition string parsing
//!
//! A condition is either a single term, a list of terms joined by the
//! literal token `" OR "`, or a list joined by `" AND "`. The delimiter
//! keyword is matched case-sensitively and only in upper case. There is no
//! grammar beyond that: no parentheses, no nesting, no mixing.
//!
//! ```
//! use textmining_core::{Combinator, Normalizer, Query};
//!
//! let query = Query::parse("Cat AND  dog", &Normalizer::default()).unwrap();
//! assert_eq!(query.combinator, Combinator::And);
//! assert_eq!(query.terms, vec!["cat", "dog"]);
//! ```

use crate::error::SearchError;
use crate::normalize::Normalizer;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const AND_DELIMITER: &str = " AND ";
pub const OR_DELIMITER: &str = " OR ";

/// How the terms of a query are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Combinator {
    Single,
    And,
    Or,
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Combinator::Single => "SINGLE",
            Combinator::And => "AND",
            Combinator::Or => "OR",
        };
        f.write_str(name)
    }
}

/// A parsed condition, built once per search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// The condition exactly as typed
    pub raw: String,
    /// Folded terms in input order
    ///
    /// An AND list keeps empty segments (`"a AND "` yields `["a", ""]`);
    /// an OR list drops them.
    pub terms: Vec<String>,
    pub combinator: Combinator,
}

impl Query {
    /// Parse a raw condition string
    ///
    /// `" AND "` is looked for first, so a string containing both tokens is
    /// treated as an AND list whose segments may contain a literal `" OR "`.
    ///
    /// # Errors
    /// `SearchError::InvalidCondition` when no segment holds a non-blank term.
    pub fn parse(raw: &str, normalizer: &Normalizer) -> Result<Self, SearchError> {
        let (combinator, terms): (Combinator, Vec<String>) = if raw.contains(AND_DELIMITER) {
            (
                Combinator::And,
                raw.split(AND_DELIMITER)
                    .map(|segment| normalizer.fold_term(segment))
                    .collect(),
            )
        } else if raw.contains(OR_DELIMITER) {
            (
                Combinator::Or,
                raw.split(OR_DELIMITER)
                    .map(|segment| normalizer.fold_term(segment))
                    .filter(|term| !term.is_empty())
                    .collect(),
            )
        } else {
            let term = normalizer.fold_term(raw);
            let terms = if term.is_empty() { Vec::new() } else { vec![term] };
            (Combinator::Single, terms)
        };

        if terms.iter().all(|term| term.is_empty()) {
            return Err(SearchError::InvalidCondition(raw.to_string()));
        }

        Ok(Self {
            raw: raw.to_string(),
            terms,
            combinator,
        })
    }
}
