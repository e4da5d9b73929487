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

use std::io::Write;
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

macro_rules! stdio_handler {
    ($(#[$meta:meta])* $name:ident, $stream:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            layout: Arc<dyn Layout>,
            min_level: Level,
            scope: Scope,
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    layout: Arc::new(TextLayout::default()),
                    min_level: Level::Trace,
                    scope: Scope::default(),
                }
            }
        }

        impl $name {
            /// Set the layout. Default to [`TextLayout`].
            pub fn with_layout(mut self, layout: impl Layout) -> Self {
                self.layout = Arc::new(layout);
                self
            }

            /// Only handle records at least as severe as `level`. Default to [`Level::Trace`].
            pub fn min_level(mut self, level: Level) -> Self {
                self.min_level = level;
                self
            }

            // one line per record
            fn render(&self, record: &Record) -> Result<Vec<u8>, Error> {
                let mut bytes = self.layout.format(record, &self.scope)?;
                bytes.push(b'\n');
                Ok(bytes)
            }

            fn write(&self, record: &Record) -> Result<(), Error> {
                let bytes = self.render(record)?;
                $stream()
                    .lock()
                    .write_all(&bytes)
                    .map_err(Error::from_io_error)
            }
        }

        impl Handler for $name {
            fn enabled(&self, level: Level) -> bool {
                level <= self.min_level
            }

            fn handle(&self, record: &Record) -> Outcome {
                self.write(record).into()
            }

            fn with_attrs(self: Arc<Self>, attrs: &[Attr]) -> Arc<dyn Handler> {
                Arc::new(Self {
                    layout: Arc::clone(&self.layout),
                    min_level: self.min_level,
                    scope: self.scope.with_attrs(attrs),
                })
            }

            fn with_group(self: Arc<Self>, name: &str) -> Arc<dyn Handler> {
                Arc::new(Self {
                    layout: Arc::clone(&self.layout),
                    min_level: self.min_level,
                    scope: self.scope.with_group(name),
                })
            }
        }
    };
}

stdio_handler!(
    /// A handler that prints log records to stdout.
    ///
    /// # Examples
    ///
    /// ```
    /// use logpipe::handler::Stdout;
    /// use logpipe::record::Level;
    ///
    /// let stdout = Stdout::default().min_level(Level::Info);
    /// ```
    Stdout,
    std::io::stdout
);

stdio_handler!(
    /// A handler that prints log records to stderr.
    ///
    /// # Examples
    ///
    /// ```
    /// use logpipe::handler::Stderr;
    ///
    /// let stderr = Stderr::default();
    /// ```
    Stderr,
    std::io::stderr
);
