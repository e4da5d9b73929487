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

use crate::kv::Attr;
use crate::record::Record;

/// The attributes and groups a leaf handler has been bound to.
///
/// Attributes bound through [`with_attrs`](Scope::with_attrs) are qualified by the groups open
/// at binding time; record attributes are qualified by every open group when
/// [`resolve`](Scope::resolve)d. Keys are qualified as `group.key`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    groups: Vec<String>,
    attrs: Vec<Attr>,
}

impl Scope {
    /// The open groups, outermost first.
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// The bound attributes, already qualified.
    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    pub fn with_attrs(&self, attrs: &[Attr]) -> Scope {
        let mut scope = self.clone();
        scope
            .attrs
            .extend(attrs.iter().map(|attr| attr.qualified(&self.groups)));
        scope
    }

    pub fn with_group(&self, name: &str) -> Scope {
        let mut scope = self.clone();
        if !name.is_empty() {
            scope.groups.push(name.to_string());
        }
        scope
    }

    /// All attributes to render for `record`: bound ones first, then the record's own.
    pub fn resolve(&self, record: &Record) -> Vec<Attr> {
        let mut attrs = Vec::with_capacity(self.attrs.len() + record.attrs().len());
        attrs.extend(self.attrs.iter().cloned());
        attrs.extend(record.attrs().iter().map(|attr| attr.qualified(&self.groups)));
        attrs
    }
}
