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

use std::borrow::Cow;
use std::sync::Arc;

use crate::Error;
use crate::handler::Handler;
use crate::kv::Attr;
use crate::record::Level;
use crate::record::Record;
use crate::trap::DefaultTrap;
use crate::trap::Trap;

/// A logger facade over a [`Handler`].
///
/// A logger builds records and hands them to its handler. [`with`](Logger::with) and
/// [`with_group`](Logger::with_group) derive scoped loggers that share nothing mutable with the
/// receiver, so they can be created freely per request or per thread.
///
/// # Examples
///
/// ```
/// use logpipe::Logger;
/// use logpipe::handler::Capture;
/// use logpipe::handler::PipelineHandler;
/// use logpipe::handler::TagFilterHandler;
/// use logpipe::kv::Attr;
/// use logpipe::kv::tags;
/// use logpipe::record::Level;
///
/// let sink = Capture::default();
/// let pipeline = PipelineHandler::builder()
///     .handler(TagFilterHandler::parse("+requiredTag,-excludedTag"))
///     .handler(sink.clone())
///     .build();
///
/// let logger = Logger::new(pipeline)
///     .with(&[tags(["anotherTag", "requiredTag"])])
///     .with(&[Attr::new("foo", "bar")]);
/// logger.log(Level::Info, "message 1", []);
/// assert_eq!(sink.records().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Logger {
    handler: Arc<dyn Handler>,
    trap: Arc<dyn Trap>,
}

impl Logger {
    /// Create a logger over `handler`, trapping errors with [`DefaultTrap`].
    pub fn new(handler: impl Handler) -> Self {
        Self::from_shared(Arc::new(handler))
    }

    /// Create a logger over a handler that may also be used elsewhere.
    pub fn from_shared(handler: Arc<dyn Handler>) -> Self {
        Self {
            handler,
            trap: Arc::new(DefaultTrap::default()),
        }
    }

    /// Set the trap receiving errors from [`Logger::log`].
    pub fn with_trap(mut self, trap: impl Trap) -> Self {
        self.trap = Arc::new(trap);
        self
    }

    /// The handler this logger writes to.
    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    /// Derive a logger whose handler always attaches `attrs`.
    pub fn with(&self, attrs: &[Attr]) -> Logger {
        if attrs.is_empty() {
            return self.clone();
        }

        Logger {
            handler: Arc::clone(&self.handler).with_attrs(attrs),
            trap: Arc::clone(&self.trap),
        }
    }

    /// Derive a logger nesting later attributes under the group `name`.
    pub fn with_group(&self, name: &str) -> Logger {
        Logger {
            handler: Arc::clone(&self.handler).with_group(name),
            trap: Arc::clone(&self.trap),
        }
    }

    /// Whether the handler processes records at `level`.
    pub fn enabled(&self, level: Level) -> bool {
        self.handler.enabled(level)
    }

    /// Hand a record to the handler, returning its error if any.
    ///
    /// Records at a level the handler is not enabled for are dropped.
    pub fn try_log_record(&self, record: &Record) -> Result<(), Error> {
        if !self.enabled(record.level()) {
            return Ok(());
        }
        self.handler.handle(record).into_result()
    }

    /// Build a record and hand it to the handler, returning its error if any.
    pub fn try_log(
        &self,
        level: Level,
        message: impl Into<Cow<'static, str>>,
        attrs: impl IntoIterator<Item = Attr>,
    ) -> Result<(), Error> {
        if !self.enabled(level) {
            return Ok(());
        }

        let record = Record::builder()
            .level(level)
            .message(message)
            .attrs(attrs)
            .build();
        self.handler.handle(&record).into_result()
    }

    /// Build a record and hand it to the handler; errors go to the trap.
    pub fn log(
        &self,
        level: Level,
        message: impl Into<Cow<'static, str>>,
        attrs: impl IntoIterator<Item = Attr>,
    ) {
        if let Err(err) = self.try_log(level, message, attrs) {
            self.trap.trap(&err);
        }
    }

    pub(crate) fn trap(&self, err: &Error) {
        self.trap.trap(err);
    }

    /// Install this logger as the global logger of the `log` crate.
    ///
    /// # Errors
    ///
    /// This function will fail if it is called more than once, or if another library has already
    /// initialized a global logger.
    pub fn try_apply(self, max_level: log::LevelFilter) -> Result<(), log::SetLoggerError> {
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);
        Ok(())
    }

    /// Install this logger as the global logger of the `log` crate.
    ///
    /// # Panics
    ///
    /// This function will panic if it is called more than once, or if another library has already
    /// initialized a global logger.
    pub fn apply(self, max_level: log::LevelFilter) {
        self.try_apply(max_level)
            .expect("Logger::apply should not be called after the global logger initialized");
    }
}
