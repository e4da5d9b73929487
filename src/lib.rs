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

//! Logpipe threads structured log records through composable handler pipelines.
//!
//! # Overview
//!
//! A [`PipelineHandler`](handler::PipelineHandler) visits its child [`Handler`]s in order. Each
//! child reports an [`Outcome`](handler::Outcome): continue with the current record, continue
//! with a replacement record, halt the chain without error, or fail and interrupt the chain.
//!
//! A [`TagFilterHandler`](handler::TagFilterHandler) placed in front of the sinks drops records
//! whose tags are rejected by a [`TagFilter`](filter::TagFilter), and rewrites accepted records
//! so that later handlers observe the merged tag set.
//!
//! # Examples
//!
//! ```
//! use logpipe::Logger;
//! use logpipe::handler::PipelineHandler;
//! use logpipe::handler::Stderr;
//! use logpipe::handler::TagFilterHandler;
//! use logpipe::kv::tags;
//! use logpipe::record::Level;
//!
//! let pipeline = PipelineHandler::builder()
//!     .handler(TagFilterHandler::parse("+requiredTag,-excludedTag"))
//!     .handler(Stderr::default())
//!     .build();
//!
//! let logger = Logger::new(pipeline).with(&[tags(["requiredTag"])]);
//! logger.log(Level::Info, "written", []);
//! logger.log(Level::Info, "filtered", [tags(["excludedTag"])]);
//! ```
//!
//! The logger can also serve the `log` crate:
//!
//! ```
//! use logpipe::Logger;
//! use logpipe::handler::Stdout;
//!
//! Logger::new(Stdout::default()).apply(log::LevelFilter::Info);
//! log::info!(tags = "requiredTag"; "This is an info message.");
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod filter;
pub mod handler;
pub mod kv;
pub mod layout;
pub mod record;
pub mod trap;

mod bridge;

mod error;
pub use self::error::Error;

mod logger;
pub use self::logger::Logger;

pub use self::filter::TagFilter;
pub use self::handler::Handler;
pub use self::handler::Outcome;
pub use self::layout::Layout;
pub use self::record::Level;
pub use self::record::Record;
pub use self::trap::Trap;
