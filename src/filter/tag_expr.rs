// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt;
use std::str::FromStr;

use crate::Error;
use crate::filter::TagFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Term {
    Required(String),
    Excluded(String),
    OneOf(String),
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Required(tag) => write!(f, "+{tag}"),
            Term::Excluded(tag) => write!(f, "-{tag}"),
            Term::OneOf(tag) => f.write_str(tag),
        }
    }
}

/// A tag filter compiled from a comma-separated expression.
///
/// Each term is one of:
///
/// * `+tag`: the tag is required; every required tag must be present.
/// * `-tag`: the tag is excluded; no excluded tag may be present.
/// * `tag`: one of; when any such term exists, at least one of them must be present.
///
/// Whitespace around terms is trimmed and empty terms are skipped, so an empty expression
/// accepts everything.
///
/// # Examples
///
/// ```
/// use logpipe::filter::TagExpr;
/// use logpipe::filter::TagFilter;
///
/// let filter = TagExpr::parse("+required, -excluded");
/// assert!(!filter.reject(&["required".to_string()]));
/// assert!(filter.reject(&["required".to_string(), "excluded".to_string()]));
/// assert_eq!(filter.to_string(), "+required,-excluded");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagExpr {
    terms: Vec<Term>,
}

impl TagExpr {
    /// Compile an expression. Terms reduced to a bare `+` or `-` are skipped.
    pub fn parse(expr: &str) -> TagExpr {
        let terms = expr
            .split(',')
            .map(str::trim)
            .filter_map(|term| {
                if let Some(tag) = term.strip_prefix('+') {
                    non_empty(tag).map(Term::Required)
                } else if let Some(tag) = term.strip_prefix('-') {
                    non_empty(tag).map(Term::Excluded)
                } else {
                    non_empty(term).map(Term::OneOf)
                }
            })
            .collect();

        TagExpr { terms }
    }

    /// Whether this expression accepts every tag set.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

fn non_empty(tag: &str) -> Option<String> {
    let tag = tag.trim();
    (!tag.is_empty()).then(|| tag.to_string())
}

impl TagFilter for TagExpr {
    fn reject(&self, tags: &[String]) -> bool {
        let has = |tag: &str| tags.iter().any(|t| t == tag);

        let mut one_of_seen = false;
        let mut one_of_matched = false;
        for term in &self.terms {
            match term {
                Term::Required(tag) if !has(tag.as_str()) => return true,
                Term::Excluded(tag) if has(tag.as_str()) => return true,
                Term::OneOf(tag) => {
                    one_of_seen = true;
                    one_of_matched |= has(tag.as_str());
                }
                _ => {}
            }
        }

        one_of_seen && !one_of_matched
    }
}

impl fmt::Display for TagExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}

impl FromStr for TagExpr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TagExpr::parse(s))
    }
}

impl From<&str> for TagExpr {
    fn from(expr: &str) -> Self {
        TagExpr::parse(expr)
    }
}
