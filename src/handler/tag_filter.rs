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

use std::env;
use std::fmt;
use std::sync::Arc;

use crate::filter::TagExpr;
use crate::filter::TagFilter;
use crate::handler::Handler;
use crate::handler::Outcome;
use crate::kv::Attr;
use crate::kv::TAGS_KEY;
use crate::kv::collect_tags;
use crate::record::Level;
use crate::record::Record;

/// The environment variable read by [`TagFilterHandler::from_default_env`].
pub const DEFAULT_FILTER_ENV: &str = "LOGPIPE_TAGS";

/// A handler that drops records whose tags are rejected by a [`TagFilter`].
///
/// The tags of a record are the handler's default tags followed by the tags of every `tags`
/// attribute on the record. A record without tags is treated as having none. When the filter
/// rejects the tags, the handler halts the owning pipeline. Otherwise it hands the pipeline a
/// copy of the record whose `tags` attributes are collapsed into a single one holding the full
/// tag set, so later handlers observe the merged tags.
///
/// Default tags are bound through [`with_attrs`](Handler::with_attrs) with the reserved `tags`
/// key:
///
/// ```
/// use std::sync::Arc;
///
/// use logpipe::Handler;
/// use logpipe::handler::TagFilterHandler;
/// use logpipe::kv::tags;
///
/// let filter = Arc::new(TagFilterHandler::parse("+svc"));
/// let scoped = filter.with_attrs(&[tags(["svc"])]);
/// ```
#[derive(Debug, Clone)]
pub struct TagFilterHandler {
    filter: Arc<dyn TagFilter>,
    active: bool,
    default_tags: Vec<String>,
}

impl TagFilterHandler {
    /// Create an active handler over `filter` with no default tags.
    pub fn new(filter: impl TagFilter) -> Self {
        Self {
            filter: Arc::new(filter),
            active: true,
            default_tags: vec![],
        }
    }

    /// Create an active handler from a [`TagExpr`] expression.
    pub fn parse(expr: &str) -> Self {
        Self::new(TagExpr::parse(expr))
    }

    /// Create an active handler from the expression stored in the environment variable `name`.
    ///
    /// An unset or non-unicode variable yields a handler accepting every record.
    pub fn from_env(name: &str) -> Self {
        match env::var(name) {
            Ok(expr) => Self::parse(&expr),
            Err(_) => Self::new(TagExpr::default()),
        }
    }

    /// Create an active handler from [`DEFAULT_FILTER_ENV`].
    pub fn from_default_env() -> Self {
        Self::from_env(DEFAULT_FILTER_ENV)
    }

    /// Set whether the handler is enabled.
    ///
    /// An inactive handler is skipped by pipelines, which lets every record through.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Tags merged into every record before filtering.
    pub fn default_tags(&self) -> &[String] {
        &self.default_tags
    }

    fn record_tags(&self, record: &Record) -> Vec<String> {
        let mut tags = self.default_tags.clone();
        collect_tags(&mut tags, record.attrs_by_key(TAGS_KEY));
        tags
    }
}

impl Handler for TagFilterHandler {
    fn enabled(&self, _: Level) -> bool {
        self.active
    }

    fn handle(&self, record: &Record) -> Outcome {
        let tags = self.record_tags(record);
        if self.filter.reject(&tags) {
            return Outcome::Halt;
        }

        Outcome::Replace(record.with_tags(tags))
    }

    fn with_attrs(self: Arc<Self>, attrs: &[Attr]) -> Arc<dyn Handler> {
        let mut default_tags = self.default_tags.clone();
        if collect_tags(&mut default_tags, attrs) == 0 {
            return self;
        }

        Arc::new(TagFilterHandler {
            filter: Arc::clone(&self.filter),
            active: self.active,
            default_tags,
        })
    }

    fn with_group(self: Arc<Self>, _: &str) -> Arc<dyn Handler> {
        self
    }
}

impl fmt::Display for TagFilterHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{Enabled: {}, FilterText: \"{}\"}}",
            self.active, self.filter
        )
    }
}
