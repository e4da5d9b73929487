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
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use crate::handler::Handler;
use crate::handler::Outcome;
use crate::handler::Scope;
use crate::kv::Attr;
use crate::record::Level;
use crate::record::Record;

/// A handler that keeps every record it receives in memory.
///
/// Clones and derived handlers share the same storage, so a test can keep one `Capture`, hand a
/// clone to a pipeline, and inspect what reached the end of the chain. Records are stored exactly
/// as received; the bound scope is kept separately in [`Captured::scope`].
///
/// # Examples
///
/// ```
/// use logpipe::Handler;
/// use logpipe::handler::Capture;
/// use logpipe::record::Record;
///
/// let capture = Capture::default();
/// capture.handle(&Record::builder().message("hello").build());
/// assert_eq!(capture.records()[0].message(), "hello");
/// ```
#[derive(Debug, Clone)]
pub struct Capture {
    captured: Arc<Mutex<Vec<Captured>>>,
    scope: Scope,
    active: bool,
}

/// A record received by [`Capture`], with the scope of the handler that received it.
#[derive(Debug, Clone, PartialEq)]
pub struct Captured {
    pub record: Record,
    pub scope: Scope,
}

impl Default for Capture {
    fn default() -> Self {
        Self {
            captured: Arc::default(),
            scope: Scope::default(),
            active: true,
        }
    }
}

impl Capture {
    /// Set whether the handler is enabled.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// The records received so far, in order.
    pub fn records(&self) -> Vec<Record> {
        self.lock().iter().map(|c| c.record.clone()).collect()
    }

    /// The records received so far, with the scope they were received under.
    pub fn captured(&self) -> Vec<Captured> {
        self.lock().clone()
    }

    /// The scope bound to this handler.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Forget every received record.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Captured>> {
        self.captured.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn derive(&self, scope: Scope) -> Arc<dyn Handler> {
        Arc::new(Capture {
            captured: Arc::clone(&self.captured),
            scope,
            active: self.active,
        })
    }
}

impl Handler for Capture {
    fn enabled(&self, _: Level) -> bool {
        self.active
    }

    fn handle(&self, record: &Record) -> Outcome {
        self.lock().push(Captured {
            record: record.clone(),
            scope: self.scope.clone(),
        });
        Outcome::Continue
    }

    fn with_attrs(self: Arc<Self>, attrs: &[Attr]) -> Arc<dyn Handler> {
        self.derive(self.scope.with_attrs(attrs))
    }

    fn with_group(self: Arc<Self>, name: &str) -> Arc<dyn Handler> {
        self.derive(self.scope.with_group(name))
    }
}
