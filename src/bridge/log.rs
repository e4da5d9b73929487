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

use crate::Logger;
use crate::kv::Attr;
use crate::kv::TAGS_KEY;
use crate::kv::Value;
use crate::record::Record;

struct KeyValueVisitor<'a> {
    attrs: &'a mut Vec<Attr>,
}

impl<'kvs> log::kv::VisitSource<'kvs> for KeyValueVisitor<'_> {
    fn visit_pair(
        &mut self,
        key: log::kv::Key<'kvs>,
        value: log::kv::Value<'kvs>,
    ) -> Result<(), log::kv::Error> {
        self.attrs.push(Attr::new(key.as_str(), convert_value(key.as_str(), &value)));
        Ok(())
    }
}

// `log` key-values cannot carry lists without extra features, so a string under the tags key
// is read as a comma-separated list
fn convert_value(key: &str, value: &log::kv::Value) -> Value {
    if let Some(text) = value.to_borrowed_str() {
        if key == TAGS_KEY {
            let tags = text
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect();
            return Value::List(tags);
        }
        return Value::Str(text.to_string());
    }

    if let Some(b) = value.to_bool() {
        Value::Bool(b)
    } else if let Some(n) = value.to_i64() {
        Value::I64(n)
    } else if let Some(n) = value.to_u64() {
        Value::U64(n)
    } else if let Some(n) = value.to_f64() {
        Value::F64(n)
    } else {
        Value::Str(value.to_string())
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        Logger::enabled(self, metadata.level().into())
    }

    fn log(&self, record: &log::Record) {
        let mut attrs = Vec::new();
        let mut visitor = KeyValueVisitor { attrs: &mut attrs };
        if let Err(err) = record.key_values().visit(&mut visitor) {
            self.trap(&crate::Error::new("failed to visit key-values").with_source(err));
            return;
        }

        let record = Record::builder()
            .level(record.level().into())
            .message(record.args().to_string())
            .attrs(attrs)
            .build();

        if let Err(err) = self.try_log_record(&record) {
            self.trap(&err);
        }
    }

    fn flush(&self) {}
}
