// crates/geostat-core/src/classify.rs

//! Record classification: positional term filters and subtype suffixes.

use crate::raw::StatRecord;
use crate::text::contains_ignore_case;
use serde::{Deserialize, Serialize};

/// Keyword → suffix rule, e.g. `сельская местность` → `_rural`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtypeRule {
    pub keyword: String,
    pub suffix: String,
}

impl SubtypeRule {
    pub fn new(keyword: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            suffix: suffix.into(),
        }
    }
}

/// Requires the category label at `index` to equal `equals` (both trimmed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermFilter {
    pub index: usize,
    pub equals: String,
}

impl TermFilter {
    pub fn new(index: usize, equals: impl Into<String>) -> Self {
        Self {
            index,
            equals: equals.into(),
        }
    }

    /// A record shorter than `index + 1` labels never matches.
    pub fn matches(&self, record: &StatRecord) -> bool {
        record.term(self.index) == Some(self.equals.trim())
    }
}

/// Where the classifier looks for its keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtypeScope {
    /// Every label in order, case-insensitive substring match.
    AnyTerm,
    /// Only the label at this index, exact match after trimming.
    Term(usize),
}

/// Ordered list of (predicate, suffix) pairs evaluated top-down.
#[derive(Debug, Clone)]
pub struct SubtypeClassifier<'a> {
    rules: &'a [SubtypeRule],
    scope: SubtypeScope,
}

impl<'a> SubtypeClassifier<'a> {
    pub fn new(rules: &'a [SubtypeRule], scope: SubtypeScope) -> Self {
        Self { rules, scope }
    }

    /// `false` when no rules are configured; every record then keeps an
    /// empty suffix.
    pub fn is_active(&self) -> bool {
        !self.rules.is_empty()
    }

    /// Suffix for the given labels, or `None` if no rule matches.
    ///
    /// For [`SubtypeScope::AnyTerm`] the outer loop runs over labels and the
    /// inner over rules, so an earlier label beats an earlier rule.
    pub fn classify(&self, terms: &[String]) -> Option<&'a str> {
        match self.scope {
            SubtypeScope::AnyTerm => terms.iter().find_map(|term| {
                self.rules
                    .iter()
                    .find(|r| contains_ignore_case(term, &r.keyword))
                    .map(|r| r.suffix.as_str())
            }),
            SubtypeScope::Term(index) => {
                let term = terms.get(index)?.trim();
                self.rules
                    .iter()
                    .find(|r| r.keyword.trim() == term)
                    .map(|r| r.suffix.as_str())
            }
        }
    }
}
