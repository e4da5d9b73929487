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

use std::fmt::Write;

use jiff::tz::TimeZone;

use crate::Error;
use crate::handler::Scope;
use crate::layout::Layout;
use crate::record::Level;
use crate::record::Record;

/// A layout that formats log record as text.
///
/// Output format:
///
/// ```text
/// 2024-08-11T22:44:57.172105+08:00 ERROR payment failed order=42 tags=[svc,payments]
/// 2024-08-11T22:44:57.172219+08:00  WARN retrying http.attempt=2 tags=[svc]
/// 2024-08-11T22:44:57.172276+08:00  INFO started tags=[svc]
/// ```
///
/// By default, the system timezone is used. Log levels are colored when the `colored` feature
/// is enabled and [`TextLayout::no_color`] is not called.
///
/// # Examples
///
/// ```
/// use logpipe::layout::TextLayout;
///
/// let text_layout = TextLayout::default();
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextLayout {
    tz: Option<TimeZone>,
    #[cfg_attr(not(feature = "colored"), allow(dead_code))]
    no_color: bool,
}

impl TextLayout {
    /// Set the timezone for timestamps.
    ///
    /// # Examples
    ///
    /// ```
    /// use jiff::tz::TimeZone;
    /// use logpipe::layout::TextLayout;
    ///
    /// let text_layout = TextLayout::default().timezone(TimeZone::UTC);
    /// ```
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.tz = Some(tz);
        self
    }

    /// Disable colored output.
    pub fn no_color(mut self) -> Self {
        self.no_color = true;
        self
    }

    #[cfg(feature = "colored")]
    fn level(&self, level: Level) -> String {
        use colored::Color;
        use colored::Colorize;

        let text = format!("{level:>5}");
        if self.no_color {
            return text;
        }

        let color = match level {
            Level::Error => Color::Red,
            Level::Warn => Color::Yellow,
            Level::Info => Color::Green,
            Level::Debug => Color::Blue,
            Level::Trace => Color::Magenta,
        };
        text.color(color).to_string()
    }

    #[cfg(not(feature = "colored"))]
    fn level(&self, level: Level) -> String {
        format!("{level:>5}")
    }
}

impl Layout for TextLayout {
    fn format(&self, record: &Record, scope: &Scope) -> Result<Vec<u8>, Error> {
        let tz = self.tz.clone().unwrap_or_else(TimeZone::system);
        let time = record
            .time()
            .to_zoned(tz)
            .strftime("%Y-%m-%dT%H:%M:%S.%6f%:z");
        let level = self.level(record.level());
        let message = record.message();

        let mut text = String::new();
        write!(&mut text, "{time} {level} {message}").map_err(Error::from_fmt_error)?;
        for attr in scope.resolve(record) {
            write!(&mut text, " {attr}").map_err(Error::from_fmt_error)?;
        }
        Ok(text.into_bytes())
    }
}
