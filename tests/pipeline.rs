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

use std::error::Error as _;
use std::sync::Arc;

use logpipe::Error;
use logpipe::Handler;
use logpipe::Level;
use logpipe::Outcome;
use logpipe::handler::PipelineHandler;
use logpipe::kv::Attr;

mod common;
use common::Behavior;
use common::MockHandler;
use common::Recording;
use common::record_example;

fn pipeline(handlers: &[&Arc<MockHandler>]) -> Arc<PipelineHandler> {
    let handlers = handlers
        .iter()
        .map(|handler| Arc::clone(*handler) as Arc<dyn Handler>)
        .collect();
    Arc::new(PipelineHandler::new(handlers))
}

fn interrupted_cause(outcome: Outcome) -> String {
    let err = match outcome {
        Outcome::Fail(err) => err,
        outcome => panic!("pipeline must be interrupted: {outcome:?}"),
    };
    assert_eq!(err.message(), "pipeline interrupted");
    let cause = err.source().expect("cause must be kept");
    cause
        .downcast_ref::<Error>()
        .expect("cause must be an Error")
        .message()
        .to_string()
}

#[test]
fn enabled_is_false_when_empty() {
    let pipeline = PipelineHandler::default();
    for level in [Level::Error, Level::Info, Level::Trace] {
        assert!(!pipeline.enabled(level));
    }
}

#[test]
fn enabled_is_false_when_all_handlers_are_disabled() {
    let pipeline = pipeline(&[&MockHandler::inactive(), &MockHandler::inactive()]);
    assert!(!pipeline.enabled(Level::Debug));
}

#[test]
fn enabled_is_true_when_at_least_one_handler_is_enabled() {
    let pipeline = pipeline(&[&MockHandler::inactive(), &MockHandler::active()]);
    assert!(pipeline.enabled(Level::Debug));
}

#[test]
fn empty_pipeline_handles_nothing() {
    let pipeline = PipelineHandler::default();
    assert!(matches!(pipeline.handle(&record_example()), Outcome::Continue));
}

#[test]
fn calls_every_handler_when_none_fails() {
    let first = MockHandler::active();
    let second = MockHandler::active();
    let pipeline = pipeline(&[&first, &second]);

    assert!(matches!(pipeline.handle(&record_example()), Outcome::Continue));
    assert_eq!(first.handled(), [record_example()]);
    assert_eq!(second.handled(), [record_example()]);
}

#[test]
fn skips_disabled_handlers() {
    let disabled = MockHandler::new(false, Behavior::Fail("never called"));
    let enabled = MockHandler::active();
    let pipeline = pipeline(&[&disabled, &enabled]);

    assert!(matches!(pipeline.handle(&record_example()), Outcome::Continue));
    assert!(disabled.recordings().is_empty());
    assert_eq!(enabled.handled().len(), 1);
}

#[test]
fn returns_error_when_last_handler_fails() {
    let first = MockHandler::active();
    let failing = MockHandler::new(true, Behavior::Fail("mock error"));
    let pipeline = pipeline(&[&first, &failing]);

    let cause = interrupted_cause(pipeline.handle(&record_example()));
    assert_eq!(cause, "mock error");
    assert_eq!(first.handled().len(), 1);
}

#[test]
fn skips_following_handlers_when_one_fails() {
    let failing = MockHandler::new(true, Behavior::Fail("mock error"));
    let second = MockHandler::active();
    let pipeline = pipeline(&[&failing, &second]);

    let cause = interrupted_cause(pipeline.handle(&record_example()));
    assert_eq!(cause, "mock error");
    assert!(second.handled().is_empty());
}

#[test]
fn skips_following_handlers_when_halted_without_error() {
    let halting = MockHandler::new(true, Behavior::Halt);
    let second = MockHandler::active();
    let pipeline = pipeline(&[&halting, &second]);

    assert!(matches!(pipeline.handle(&record_example()), Outcome::Continue));
    assert_eq!(halting.handled().len(), 1);
    assert!(second.handled().is_empty());
}

#[test]
fn following_handlers_receive_replaced_record() {
    let replacement = record_example()
        .to_builder()
        .message("replaced")
        .attr("foo", "bar")
        .build();
    let replacing = MockHandler::new(true, Behavior::Replace(replacement.clone()));
    let passthrough = MockHandler::active();
    let last = MockHandler::active();
    let pipeline = pipeline(&[&replacing, &passthrough, &last]);

    assert!(matches!(pipeline.handle(&record_example()), Outcome::Continue));
    assert_eq!(replacing.handled(), [record_example()]);
    assert_eq!(passthrough.handled(), [replacement.clone()]);
    assert_eq!(last.handled(), [replacement]);
}

#[test]
fn enabled_check_uses_replaced_record_level() {
    let replacement = record_example().to_builder().level(Level::Trace).build();
    let replacing = MockHandler::new(true, Behavior::Replace(replacement));
    let info_only = MockHandler::enabled_only_for(Level::Info);
    let last = MockHandler::active();
    let pipeline = pipeline(&[&replacing, &info_only, &last]);

    assert_eq!(record_example().level(), Level::Info);
    assert!(matches!(pipeline.handle(&record_example()), Outcome::Continue));
    assert!(info_only.handled().is_empty());
    assert_eq!(last.handled()[0].level(), Level::Trace);
}

#[test]
fn enabled_check_uses_original_level_until_replaced() {
    let info_only = MockHandler::enabled_only_for(Level::Info);
    let pipeline = pipeline(&[&MockHandler::active(), &info_only]);

    assert!(matches!(pipeline.handle(&record_example()), Outcome::Continue));
    assert_eq!(info_only.handled(), [record_example()]);
}

#[test]
fn nested_pipeline_halt_does_not_stop_outer_pipeline() {
    let halting = MockHandler::new(true, Behavior::Halt);
    let skipped = MockHandler::active();
    let after = MockHandler::active();

    let inner = pipeline(&[&halting, &skipped]);
    let outer = PipelineHandler::builder()
        .shared(inner)
        .shared(after.clone())
        .build();

    assert!(matches!(outer.handle(&record_example()), Outcome::Continue));
    assert!(skipped.handled().is_empty());
    assert_eq!(after.handled().len(), 1);
}

#[test]
fn with_attrs_fans_out_in_order_without_mutating_receiver() {
    let first = MockHandler::active();
    let second = MockHandler::active();
    let original = pipeline(&[&first, &second]);
    let attrs = [Attr::new("foo", "bar")];

    let derived = Arc::clone(&original).with_attrs(&attrs);
    assert!(!Arc::ptr_eq(&derived, &(Arc::clone(&original) as Arc<dyn Handler>)));
    assert_eq!(original.len(), 2);

    for mock in [&first, &second] {
        assert_eq!(mock.recordings(), [Recording::WithAttrs(attrs.to_vec())]);
    }

    // the original still dispatches to its own children
    assert!(matches!(original.handle(&record_example()), Outcome::Continue));
    assert_eq!(first.handled().len(), 1);
    assert_eq!(second.handled().len(), 1);
}

#[test]
fn with_group_fans_out_to_every_handler() {
    let first = MockHandler::active();
    let second = MockHandler::active();
    let original = pipeline(&[&first, &second]);

    let _derived = Arc::clone(&original).with_group("http");
    for mock in [&first, &second] {
        assert_eq!(mock.recordings(), [Recording::WithGroup("http".to_string())]);
    }
}

#[test]
fn with_empty_group_returns_receiver() {
    let first = MockHandler::active();
    let original = pipeline(&[&first]);

    let derived = Arc::clone(&original).with_group("");
    let receiver: Arc<dyn Handler> = original;
    assert!(Arc::ptr_eq(&derived, &receiver));
    assert!(first.recordings().is_empty());
}
