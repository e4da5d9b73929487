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
use crate::handler::Scope;
use crate::kv::Attr;
use crate::layout::Layout;
use crate::layout::TextLayout;
use crate::record::Level;
use crate::record::Record;

/// A handler that writes log records that can be captured by a test harness (like `cargo test`),
/// and thus the outputs are suppressed unless `--nocapture` or `--show-output` is specified.
///
/// # Examples
///
/// ```
/// use logpipe::handler::Testing;
///
/// let test_handler = Testing::default();
/// ```
#[derive(Debug, Clone)]
pub struct Testing {
    layout: Arc<dyn Layout>,
    scope: Scope,
}

impl Default for Testing {
    fn default() -> Self {
        Self {
            layout: Arc::new(TextLayout::default().no_color()),
            scope: Scope::default(),
        }
    }
}

impl Testing {
    /// Set the layout for the [`Testing`] handler.
    ///
    /// Default to [`TextLayout`] without colors.
    pub fn with_layout(mut self, layout: impl Layout) -> Self {
        self.layout = Arc::new(layout);
        self
    }

    fn render(&self, record: &Record) -> Result<String, Error> {
        let bytes = self.layout.format(record, &self.scope)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn write(&self, record: &Record) -> Result<(), Error> {
        eprintln!("{}", self.render(record)?);
        Ok(())
    }
}

impl Handler for Testing {
    fn enabled(&self, _: Level) -> bool {
        true
    }

    fn handle(&self, record: &Record) -> Outcome {
        self.write(record).into()
    }

    fn with_attrs(self: Arc<Self>, attrs: &[Attr]) -> Arc<dyn Handler> {
        Arc::new(Testing {
            layout: Arc::clone(&self.layout),
            scope: self.scope.with_attrs(attrs),
        })
    }

    fn with_group(self: Arc<Self>, name: &str) -> Arc<dyn Handler> {
        Arc::new(Testing {
            layout: Arc::clone(&self.layout),
            scope: self.scope.with_group(name),
        })
    }
}
