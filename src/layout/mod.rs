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

//! Layouts for formatting log records.

use std::fmt;

use crate::Error;
use crate::handler::Scope;
use crate::record::Record;

#[cfg(feature = "layout-json")]
pub use self::json::JsonLayout;
pub use self::text::TextLayout;

#[cfg(feature = "layout-json")]
mod json;
mod text;

/// A layout renders a record, together with the scope of the handler writing it, into bytes.
pub trait Layout: fmt::Debug + Send + Sync + 'static {
    /// Format a log record.
    fn format(&self, record: &Record, scope: &Scope) -> Result<Vec<u8>, Error>;
}
