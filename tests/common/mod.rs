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

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;

use logpipe::Error;
use logpipe::Handler;
use logpipe::Level;
use logpipe::Outcome;
use logpipe::Record;
use logpipe::kv::Attr;

#[derive(Debug, Clone, PartialEq)]
pub enum Recording {
    Handle(Record),
    WithAttrs(Vec<Attr>),
    WithGroup(String),
}

#[derive(Debug, Clone)]
pub enum Behavior {
    Continue,
    Halt,
    Fail(&'static str),
    Replace(Record),
}

/// A handler recording every call it receives and answering `handle` with a fixed behavior.
///
/// `with_attrs` and `with_group` record the call and return the receiver, so derived pipelines
/// keep reporting to the same mock.
#[derive(Debug)]
pub struct MockHandler {
    active: bool,
    only_level: Option<Level>,
    behavior: Behavior,
    recordings: Mutex<Vec<Recording>>,
}

impl MockHandler {
    pub fn new(active: bool, behavior: Behavior) -> Arc<MockHandler> {
        Arc::new(MockHandler {
            active,
            only_level: None,
            behavior,
            recordings: Mutex::new(vec![]),
        })
    }

    /// A mock enabled for `level` and no other level.
    pub fn enabled_only_for(level: Level) -> Arc<MockHandler> {
        Arc::new(MockHandler {
            active: true,
            only_level: Some(level),
            behavior: Behavior::Continue,
            recordings: Mutex::new(vec![]),
        })
    }

    pub fn active() -> Arc<MockHandler> {
        Self::new(true, Behavior::Continue)
    }

    pub fn inactive() -> Arc<MockHandler> {
        Self::new(false, Behavior::Continue)
    }

    pub fn recordings(&self) -> Vec<Recording> {
        self.recordings.lock().unwrap().clone()
    }

    pub fn handled(&self) -> Vec<Record> {
        self.recordings()
            .into_iter()
            .filter_map(|recording| match recording {
                Recording::Handle(record) => Some(record),
                _ => None,
            })
            .collect()
    }
}

impl Handler for MockHandler {
    fn enabled(&self, level: Level) -> bool {
        self.active && self.only_level.is_none_or(|only| only == level)
    }

    fn handle(&self, record: &Record) -> Outcome {
        self.recordings
            .lock()
            .unwrap()
            .push(Recording::Handle(record.clone()));

        match &self.behavior {
            Behavior::Continue => Outcome::Continue,
            Behavior::Halt => Outcome::Halt,
            Behavior::Fail(message) => Outcome::Fail(Error::new(*message)),
            Behavior::Replace(record) => Outcome::Replace(record.clone()),
        }
    }

    fn with_attrs(self: Arc<Self>, attrs: &[Attr]) -> Arc<dyn Handler> {
        self.recordings
            .lock()
            .unwrap()
            .push(Recording::WithAttrs(attrs.to_vec()));
        self
    }

    fn with_group(self: Arc<Self>, name: &str) -> Arc<dyn Handler> {
        self.recordings
            .lock()
            .unwrap()
            .push(Recording::WithGroup(name.to_string()));
        self
    }
}

pub fn record_example() -> Record {
    Record::builder()
        .time(jiff::Timestamp::from_second(946_688_461).unwrap())
        .level(Level::Info)
        .message("a message")
        .build()
}
