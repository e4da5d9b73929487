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

use std::sync::Arc;
use std::thread;

use logpipe::Handler;
use logpipe::Level;
use logpipe::Logger;
use logpipe::Outcome;
use logpipe::handler::Capture;
use logpipe::handler::PipelineHandler;
use logpipe::handler::TagFilterHandler;
use logpipe::kv::Attr;
use logpipe::kv::TAGS_KEY;
use logpipe::kv::tags;

mod common;
use common::Behavior;
use common::MockHandler;
use common::record_example;

fn tags_attr(record: &logpipe::Record) -> Vec<String> {
    let attrs = record.attrs_by_key(TAGS_KEY).collect::<Vec<_>>();
    assert_eq!(attrs.len(), 1, "tags must be collapsed: {record:?}");
    attrs[0].value().as_list().expect("tags must be a list").to_vec()
}

#[test]
fn continues_pipeline_when_filter_matches_record_tags() {
    let record = record_example().to_builder().attrs([tags(["A", "B"])]).build();
    let sink = MockHandler::active();
    let pipeline = PipelineHandler::builder()
        .handler(TagFilterHandler::parse("A"))
        .shared(sink.clone())
        .build();

    assert!(matches!(pipeline.handle(&record), Outcome::Continue));

    let handled = sink.handled();
    assert_eq!(handled.len(), 1);
    assert_eq!(handled[0].message(), record.message());
    assert_eq!(tags_attr(&handled[0]), ["A", "B"]);
}

#[test]
fn halts_pipeline_when_filter_rejects_record_tags() {
    let record = record_example().to_builder().attrs([tags(["B"])]).build();
    let sink = MockHandler::active();
    let pipeline = PipelineHandler::builder()
        .handler(TagFilterHandler::parse("+A"))
        .shared(sink.clone())
        .build();

    assert!(matches!(pipeline.handle(&record), Outcome::Continue));
    assert!(sink.handled().is_empty());
}

#[test]
fn failing_sink_interrupts_pipeline() {
    let failing = MockHandler::new(true, Behavior::Fail("disk full"));
    let sink = MockHandler::active();
    let pipeline = PipelineHandler::builder()
        .shared(failing)
        .shared(sink.clone())
        .build();

    let err = pipeline.handle(&record_example()).into_result().unwrap_err();
    assert_eq!(err.message(), "pipeline interrupted");
    assert!(err.to_string().contains("disk full"), "{err}");
    assert!(sink.handled().is_empty());
}

#[test]
fn default_tags_are_merged_before_record_tags() {
    let sink = Capture::default();
    let pipeline: Arc<dyn Handler> = Arc::new(
        PipelineHandler::builder()
            .handler(TagFilterHandler::parse("+svc"))
            .handler(sink.clone())
            .build(),
    );

    let scoped = pipeline.with_attrs(&[tags(["svc"])]);
    let record = record_example().to_builder().attrs([tags(["req"])]).build();
    assert!(matches!(scoped.handle(&record), Outcome::Continue));

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(tags_attr(&records[0]), ["svc", "req"]);
}

#[test]
fn inactive_filter_lets_every_record_through_unchanged() {
    let record = record_example().to_builder().attrs([tags(["B"])]).build();
    let sink = MockHandler::active();
    let pipeline = PipelineHandler::builder()
        .handler(TagFilterHandler::parse("+A").with_active(false))
        .shared(sink.clone())
        .build();

    assert!(matches!(pipeline.handle(&record), Outcome::Continue));
    assert_eq!(sink.handled(), [record]);
}

#[test]
fn duplicate_tags_are_kept() {
    let sink = Capture::default();
    let logger = Logger::new(
        PipelineHandler::builder()
            .handler(TagFilterHandler::parse("+a"))
            .handler(sink.clone())
            .build(),
    )
    .with(&[tags(["a"])]);

    logger.log(Level::Info, "dup", [tags(["a", "b"]), tags(["a"])]);
    assert_eq!(tags_attr(&sink.records()[0]), ["a", "a", "b", "a"]);
}

#[test]
fn logger_scopes_accumulate_default_tags() {
    let sink = Capture::default();
    let logger = Logger::new(
        PipelineHandler::builder()
            .handler(TagFilterHandler::parse("+requiredTag,-excludedTag"))
            .handler(sink.clone())
            .build(),
    )
    .with(&[tags(["anotherTag", "requiredTag"])])
    .with(&[Attr::new("foo", "bar")])
    .with(&[Attr::new("foo", "whatever")])
    .with(&[tags(["whateverTag"])]);

    logger.log(Level::Info, "message 1", []);
    logger.log(Level::Info, "message 2", [tags(["excludedTag"])]);

    let captured = sink.captured();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].record.message(), "message 1");
    assert_eq!(
        tags_attr(&captured[0].record),
        ["anotherTag", "requiredTag", "whateverTag"]
    );
    // the sink keeps its own bound attributes, duplicates included
    assert_eq!(
        captured[0]
            .scope
            .attrs()
            .iter()
            .filter(|attr| attr.key() == "foo")
            .count(),
        2
    );
}

#[test]
fn shared_pipeline_is_usable_from_many_threads() {
    let sink = Capture::default();
    let pipeline: Arc<dyn Handler> = Arc::new(
        PipelineHandler::builder()
            .handler(TagFilterHandler::parse("worker"))
            .handler(sink.clone())
            .build(),
    );

    let handles = (0..4)
        .map(|i| {
            let pipeline = Arc::clone(&pipeline);
            thread::spawn(move || {
                let scoped = pipeline.with_attrs(&[tags(["worker"]), Attr::new("id", i)]);
                let record = record_example();
                assert!(!scoped.handle(&record).is_fail());
            })
        })
        .collect::<Vec<_>>();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(sink.records().len(), 4);
    // the shared pipeline itself never gained default tags
    assert!(matches!(pipeline.handle(&record_example()), Outcome::Continue));
    assert_eq!(sink.records().len(), 4);
}
