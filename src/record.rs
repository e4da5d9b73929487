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

//! Log record and level.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use jiff::Timestamp;

use crate::Error;
use crate::kv::Attr;
use crate::kv::TAGS_KEY;
use crate::kv::Value;

/// A structured log entry.
///
/// Records are values: handlers receive a shared reference and, when they need downstream
/// handlers to observe a change, they build a new record instead of mutating this one.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    time: Timestamp,
    level: Level,
    message: Cow<'static, str>,
    attrs: Vec<Attr>,
}

impl Record {
    /// The observed time.
    pub fn time(&self) -> Timestamp {
        self.time
    }

    /// The verbosity level of the message.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The message body.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The attributes, in insertion order.
    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    /// Iterate over the attributes with the given key.
    pub fn attrs_by_key<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Attr> + 'a {
        self.attrs.iter().filter(move |attr| attr.key() == key)
    }

    /// Return a new record whose `tags` attributes are replaced by a single trailing one.
    pub fn with_tags(&self, tags: Vec<String>) -> Record {
        let mut attrs = Vec::with_capacity(self.attrs.len() + 1);
        attrs.extend(self.attrs.iter().filter(|attr| !attr.is_tags()).cloned());
        attrs.push(Attr::new(TAGS_KEY, Value::List(tags)));

        Record {
            time: self.time,
            level: self.level,
            message: self.message.clone(),
            attrs,
        }
    }

    /// Create a builder initialized with the current record's values.
    pub fn to_builder(&self) -> RecordBuilder {
        RecordBuilder {
            record: self.clone(),
        }
    }

    /// Returns a new builder.
    pub fn builder() -> RecordBuilder {
        RecordBuilder::default()
    }
}

/// Builder for [`Record`].
#[derive(Debug)]
pub struct RecordBuilder {
    record: Record,
}

impl Default for RecordBuilder {
    fn default() -> Self {
        RecordBuilder {
            record: Record {
                time: Timestamp::now(),
                level: Level::Info,
                message: Cow::Borrowed(""),
                attrs: vec![],
            },
        }
    }
}

impl RecordBuilder {
    /// Set [`time`](Record::time).
    pub fn time(mut self, time: Timestamp) -> Self {
        self.record.time = time;
        self
    }

    /// Set [`level`](Record::level).
    pub fn level(mut self, level: Level) -> Self {
        self.record.level = level;
        self
    }

    /// Set [`message`](Record::message).
    pub fn message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.record.message = message.into();
        self
    }

    /// Append one attribute.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.record.attrs.push(Attr::new(key, value));
        self
    }

    /// Append attributes.
    pub fn attrs(mut self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        self.record.attrs.extend(attrs);
        self
    }

    /// Invoke the builder and return a `Record`.
    pub fn build(self) -> Record {
        self.record
    }
}

/// An enum representing the available verbosity levels.
///
/// Levels are ordered from the most severe to the most verbose, so `Level::Error < Level::Info`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Designates very serious errors.
    Error,
    /// Designates hazardous situations.
    Warn,
    /// Designates useful information.
    Info,
    /// Designates lower priority information.
    Debug,
    /// Designates very low priority, often extremely verbose, information.
    Trace,
}

impl Level {
    /// Return the string representation of the `Level`.
    ///
    /// This returns the same string as the `fmt::Display` implementation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        }
    }
}

impl fmt::Debug for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        for level in [
            Level::Error,
            Level::Warn,
            Level::Info,
            Level::Debug,
            Level::Trace,
        ] {
            if s.eq_ignore_ascii_case(level.as_str()) {
                return Ok(level);
            }
        }

        Err(Error::new("malformed level").with_context("input", s))
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warn,
            log::Level::Info => Level::Info,
            log::Level::Debug => Level::Debug,
            log::Level::Trace => Level::Trace,
        }
    }
}
