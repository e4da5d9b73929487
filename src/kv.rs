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

//! Attributes attached to log records.

use std::fmt;

/// The reserved attribute key holding a record's tags.
///
/// The value under this key is expected to be a [`Value::List`]. Values of any other type are
/// ignored when tags are collected.
pub const TAGS_KEY: &str = "tags";

/// Build the reserved `tags` attribute.
///
/// # Examples
///
/// ```
/// use logpipe::kv::tags;
///
/// let attr = tags(["payments", "audit"]);
/// assert_eq!(attr.key(), "tags");
/// ```
pub fn tags<I, S>(tags: I) -> Attr
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Attr::new(TAGS_KEY, Value::List(tags.into_iter().map(Into::into).collect()))
}

/// The value of an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    I64(i64),
    U64(u64),
    F64(f64),
    Bool(bool),
    List(Vec<String>),
}

impl Value {
    /// Return the list of strings if this value is a [`Value::List`].
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    /// Return the string if this value is a [`Value::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::I64(n) => write!(f, "{n}"),
            Value::U64(n) => write!(f, "{n}"),
            Value::F64(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::List(list) => write!(f, "[{}]", list.join(",")),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::F64(value)
    }
}

macro_rules! impl_from_int {
    ($variant:ident, $target:ty, $($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

impl_from_int!(I64, i64, i8, i16, i32, i64);
impl_from_int!(U64, u64, u8, u16, u32, u64);

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Value::List(value)
    }
}

impl From<&[&str]> for Value {
    fn from(value: &[&str]) -> Self {
        Value::List(value.iter().map(|s| s.to_string()).collect())
    }
}

/// A key-value pair attached to a record or bound to a handler.
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    key: String,
    value: Value,
}

impl Attr {
    /// Create a new attribute.
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Whether this attribute uses the reserved [`TAGS_KEY`].
    pub fn is_tags(&self) -> bool {
        self.key == TAGS_KEY
    }

    /// Return a copy of this attribute whose key is qualified by the given groups.
    pub(crate) fn qualified(&self, groups: &[String]) -> Attr {
        if groups.is_empty() {
            return self.clone();
        }

        let mut key = groups.join(".");
        key.push('.');
        key.push_str(&self.key);
        Attr {
            key,
            value: self.value.clone(),
        }
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Append the tags of every `tags` attribute in `attrs` to `tags`.
///
/// Returns the number of tags appended. Attributes under other keys and `tags` attributes whose
/// value is not a list contribute nothing.
pub(crate) fn collect_tags<'a>(
    tags: &mut Vec<String>,
    attrs: impl IntoIterator<Item = &'a Attr>,
) -> usize {
    let mut added = 0;
    for attr in attrs {
        if !attr.is_tags() {
            continue;
        }

        // malformed tags are ignored
        let Some(list) = attr.value.as_list() else {
            continue;
        };

        added += list.len();
        tags.extend(list.iter().cloned());
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_tags_skips_other_keys_and_malformed_values() {
        let attrs = [
            Attr::new("foo", "bar"),
            tags(["a", "b"]),
            Attr::new(TAGS_KEY, "not-a-list"),
            Attr::new(TAGS_KEY, 42),
            tags(["a"]),
        ];

        let mut collected = vec!["default".to_string()];
        let added = collect_tags(&mut collected, &attrs);
        assert_eq!(added, 3);
        assert_eq!(collected, ["default", "a", "b", "a"]);
    }

    #[test]
    fn qualified_prefixes_groups() {
        let attr = Attr::new("user", "ann");
        let groups = vec!["http".to_string(), "req".to_string()];
        assert_eq!(attr.qualified(&groups).key(), "http.req.user");
        assert_eq!(attr.qualified(&[]).key(), "user");
    }

    #[test]
    fn display_values() {
        assert_eq!(tags(["a", "b"]).to_string(), "tags=[a,b]");
        assert_eq!(Attr::new("n", 7u8).to_string(), "n=7");
        assert_eq!(Attr::new("ok", true).to_string(), "ok=true");
    }
}
