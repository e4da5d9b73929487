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

//! Tag filters deciding whether a set of tags is accepted.

use std::fmt;
use std::sync::Arc;

pub use self::tag_expr::TagExpr;

mod tag_expr;

/// A matcher that decides whether a record with the given tags should be dropped.
///
/// [`TagFilterHandler`](crate::handler::TagFilterHandler) treats the filter as a black box:
/// rejection must be a pure function of the tag set, and repeated tags must be tolerated.
/// The `Display` implementation renders the filter expression for diagnostics.
pub trait TagFilter: fmt::Display + fmt::Debug + Send + Sync + 'static {
    /// Whether a record carrying `tags` must be dropped.
    fn reject(&self, tags: &[String]) -> bool;
}

impl<T: TagFilter + ?Sized> TagFilter for Arc<T> {
    fn reject(&self, tags: &[String]) -> bool {
        (**self).reject(tags)
    }
}
