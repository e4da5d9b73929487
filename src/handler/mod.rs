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

//! Handlers processing log records.

use std::fmt;
use std::sync::Arc;

use crate::Error;
use crate::kv::Attr;
use crate::record::Level;
use crate::record::Record;

pub use self::capture::Capture;
pub use self::capture::Captured;
pub use self::pipeline::PipelineBuilder;
pub use self::pipeline::PipelineHandler;
pub use self::scope::Scope;
pub use self::stdio::Stderr;
pub use self::stdio::Stdout;
pub use self::tag_filter::DEFAULT_FILTER_ENV;
pub use self::tag_filter::TagFilterHandler;
pub use self::testing::Testing;

mod capture;
mod pipeline;
mod scope;
mod stdio;
mod tag_filter;
mod testing;

/// The result of [`Handler::handle`].
#[derive(Debug)]
pub enum Outcome {
    /// The record was fully processed; later handlers see it unchanged.
    Continue,
    /// Later handlers must see the attached record instead of the current one.
    Replace(Record),
    /// Stop the owning pipeline. This is not an error.
    Halt,
    /// The handler failed. The owning pipeline is interrupted.
    Fail(Error),
}

impl Outcome {
    /// Whether the outcome is [`Outcome::Fail`].
    pub fn is_fail(&self) -> bool {
        matches!(self, Outcome::Fail(_))
    }

    /// Collapse into a result: every outcome except [`Outcome::Fail`] is a success.
    pub fn into_result(self) -> Result<(), Error> {
        match self {
            Outcome::Continue | Outcome::Replace(_) | Outcome::Halt => Ok(()),
            Outcome::Fail(err) => Err(err),
        }
    }
}

impl From<Result<(), Error>> for Outcome {
    fn from(result: Result<(), Error>) -> Self {
        match result {
            Ok(()) => Outcome::Continue,
            Err(err) => Outcome::Fail(err),
        }
    }
}

/// A unit of a handler chain that can gate and process a [`Record`].
///
/// Handlers are values. [`with_attrs`](Handler::with_attrs) and
/// [`with_group`](Handler::with_group) derive new handlers and never mutate the receiver, so
/// one handler can be shared by many loggers across threads. Returning the receiver itself is
/// allowed when the derivation changes nothing.
pub trait Handler: fmt::Debug + Send + Sync + 'static {
    /// Whether this handler processes records at `level`.
    fn enabled(&self, level: Level) -> bool;

    /// Process a record.
    fn handle(&self, record: &Record) -> Outcome;

    /// Derive a handler that always attaches `attrs`.
    fn with_attrs(self: Arc<Self>, attrs: &[Attr]) -> Arc<dyn Handler>;

    /// Derive a handler that nests later attributes under the group `name`.
    fn with_group(self: Arc<Self>, name: &str) -> Arc<dyn Handler>;
}
