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

use jiff::tz::TimeZone;
use serde::Serialize;
use serde_json::Map;

use crate::Error;
use crate::handler::Scope;
use crate::kv::Value;
use crate::layout::Layout;
use crate::record::Record;

/// A JSON layout for formatting log records.
///
/// Output format:
///
/// ```json
/// {"timestamp":"2024-08-11T22:44:57.172051+08:00","level":"ERROR","message":"payment failed","attrs":{"order":42,"tags":["svc","payments"]}}
/// {"timestamp":"2024-08-11T22:44:57.172187+08:00","level":"WARN","message":"retrying","attrs":{"http.attempt":2,"tags":["svc"]}}
/// ```
///
/// When a key repeats, the last value wins.
///
/// # Examples
///
/// ```
/// use logpipe::layout::JsonLayout;
///
/// let json_layout = JsonLayout::default();
/// ```
#[derive(Default, Debug, Clone)]
pub struct JsonLayout {
    tz: Option<TimeZone>,
}

impl JsonLayout {
    /// Set the timezone for timestamps.
    ///
    /// # Examples
    ///
    /// ```
    /// use jiff::tz::TimeZone;
    /// use logpipe::layout::JsonLayout;
    ///
    /// let json_layout = JsonLayout::default().timezone(TimeZone::UTC);
    /// ```
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.tz = Some(tz);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
struct RecordLine<'a> {
    timestamp: String,
    level: &'a str,
    message: &'a str,
    attrs: Map<String, serde_json::Value>,
}

fn json_value(value: &Value) -> serde_json::Value {
    match value {
        Value::Str(s) => s.as_str().into(),
        Value::I64(n) => (*n).into(),
        Value::U64(n) => (*n).into(),
        Value::F64(n) => (*n).into(),
        Value::Bool(b) => (*b).into(),
        Value::List(list) => list.clone().into(),
    }
}

impl Layout for JsonLayout {
    fn format(&self, record: &Record, scope: &Scope) -> Result<Vec<u8>, Error> {
        let tz = self.tz.clone().unwrap_or_else(TimeZone::system);
        let timestamp = record
            .time()
            .to_zoned(tz)
            .strftime("%Y-%m-%dT%H:%M:%S.%6f%:z")
            .to_string();

        let attrs = scope
            .resolve(record)
            .into_iter()
            .map(|attr| (attr.key().to_string(), json_value(attr.value())))
            .collect();

        let record_line = RecordLine {
            timestamp,
            level: record.level().as_str(),
            message: record.message(),
            attrs,
        };

        serde_json::to_vec(&record_line)
            .map_err(|err| Error::new("failed to serialize record").with_source(err))
    }
}
