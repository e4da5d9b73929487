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

use std::sync::Arc;

use crate::Error;
use crate::handler::Handler;
use crate::handler::Outcome;
use crate::kv::Attr;
use crate::record::Level;
use crate::record::Record;

/// A handler that threads a record through an ordered list of child handlers.
///
/// For each child, in order:
///
/// * a child whose [`enabled`](Handler::enabled) is false for the record's level is skipped;
/// * [`Outcome::Continue`] moves on with the current record;
/// * [`Outcome::Replace`] moves on with the attached record;
/// * [`Outcome::Halt`] stops the chain and reports success;
/// * [`Outcome::Fail`] stops the chain and reports a `pipeline interrupted` error wrapping the
///   child's error.
///
/// A pipeline therefore only ever returns [`Outcome::Continue`] or [`Outcome::Fail`].
///
/// # Examples
///
/// ```
/// use logpipe::handler::Capture;
/// use logpipe::handler::PipelineHandler;
/// use logpipe::handler::TagFilterHandler;
///
/// let sink = Capture::default();
/// let pipeline = PipelineHandler::builder()
///     .handler(TagFilterHandler::parse("+requiredTag,-excludedTag"))
///     .handler(sink.clone())
///     .build();
/// assert_eq!(pipeline.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PipelineHandler {
    handlers: Vec<Arc<dyn Handler>>,
}

impl PipelineHandler {
    /// Create a pipeline over `handlers`, visited in the given order.
    pub fn new(handlers: Vec<Arc<dyn Handler>>) -> Self {
        Self { handlers }
    }

    /// Returns a new builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// The child handlers, in dispatch order.
    pub fn handlers(&self) -> &[Arc<dyn Handler>] {
        &self.handlers
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Handler for PipelineHandler {
    fn enabled(&self, level: Level) -> bool {
        self.handlers.iter().any(|handler| handler.enabled(level))
    }

    fn handle(&self, record: &Record) -> Outcome {
        let mut replaced: Option<Record> = None;

        for handler in &self.handlers {
            let current = replaced.as_ref().unwrap_or(record);
            if !handler.enabled(current.level()) {
                continue;
            }

            match handler.handle(current) {
                Outcome::Continue => {}
                Outcome::Replace(record) => replaced = Some(record),
                Outcome::Halt => return Outcome::Continue,
                Outcome::Fail(err) => return Outcome::Fail(Error::pipeline_interrupted(err)),
            }
        }

        Outcome::Continue
    }

    fn with_attrs(self: Arc<Self>, attrs: &[Attr]) -> Arc<dyn Handler> {
        let handlers = self
            .handlers
            .iter()
            .map(|handler| Arc::clone(handler).with_attrs(attrs))
            .collect();

        Arc::new(PipelineHandler { handlers })
    }

    fn with_group(self: Arc<Self>, name: &str) -> Arc<dyn Handler> {
        if name.is_empty() {
            return self;
        }

        let handlers = self
            .handlers
            .iter()
            .map(|handler| Arc::clone(handler).with_group(name))
            .collect();

        Arc::new(PipelineHandler { handlers })
    }
}

/// Builder for [`PipelineHandler`].
#[must_use = "call `build` to construct the pipeline"]
#[derive(Debug, Default)]
pub struct PipelineBuilder {
    handlers: Vec<Arc<dyn Handler>>,
}

impl PipelineBuilder {
    /// Append a handler owned by the pipeline.
    pub fn handler(mut self, handler: impl Handler) -> Self {
        self.handlers.push(Arc::new(handler));
        self
    }

    /// Append a handler that may also be used elsewhere.
    pub fn shared(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Invoke the builder and return a `PipelineHandler`.
    pub fn build(self) -> PipelineHandler {
        PipelineHandler::new(self.handlers)
    }
}
