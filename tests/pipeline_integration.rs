//! End-to-end runs through the pipeline with the bundled sinks

mod common;

use algovis_rs::config::{ChannelConfig, EngineConfig};
use algovis_rs::engine::{
    CancelSignal, CatalogEntry, Pacing, Pipeline, Runner, SharedSink, STABILITY,
};
use algovis_rs::search::{search_catalog, SearchEvent, SearchEventKind, SearchState};
use algovis_rs::sinks::{
    read_records, ChannelSink, ExportRecord, JsonLinesSink, RecordingSink, SinkMessage, TracingSink,
};
use algovis_rs::sorting::{default_catalog, SortOp, SortSink, SortingState};
use algovis_rs::{EngineError, SortingEngine};
use common::builders::StateBuilder;
use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_catalog_lists_nine_sorts_in_order() {
    let catalog = default_catalog().unwrap();
    assert_eq!(
        catalog.ids().collect::<Vec<_>>(),
        vec![
            "bubble-sort",
            "insertion-sort",
            "selection-sort",
            "merge-sort",
            "heap-sort",
            "shell-sort",
            "counting-sort",
            "quick-sort",
            "radix-sort",
        ]
    );

    let json = catalog.to_json().unwrap();
    let entries: Vec<CatalogEntry> = serde_json::from_str(&json).unwrap();
    assert_eq!(entries, catalog.entries());
    assert!(json.contains("\"displayName\""));
    assert!(entries.iter().all(|e| e.metadata.contains_key(STABILITY)));
}

#[tokio::test]
async fn test_engine_rejects_blank_and_unknown_ids() {
    let engine = SortingEngine::new(Vec::new()).unwrap();
    let input = SortingState::from_values([2, 1]);
    let cancel = CancelSignal::new();

    let err = engine.execute("", &input, &cancel).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidArgument { name: "id", .. }));

    let err = engine.execute("bogo-sort", &input, &cancel).await.unwrap_err();
    assert!(matches!(err, EngineError::UnknownAlgorithm(id) if id == "bogo-sort"));
}

#[tokio::test]
async fn test_channel_sink_feeds_render_thread() {
    let (sink, rx) = ChannelSink::<SortingState, SortOp>::from_config(&ChannelConfig {
        capacity: 4,
        send_timeout_ms: 5_000,
    })
    .unwrap();
    let consumer = std::thread::spawn(move || {
        let mut frames = Vec::new();
        for message in rx {
            let done = message.is_completed();
            frames.push(message);
            if done {
                break;
            }
        }
        frames
    });

    let engine = SortingEngine::new(vec![Arc::new(sink) as SortSink]).unwrap();
    let result = engine
        .execute("merge-sort", &StateBuilder::new().values(&[6, 5, 4, 3, 2, 1]).build(), &CancelSignal::new())
        .await
        .unwrap();
    drop(engine);

    let frames = consumer.join().unwrap();
    assert!(matches!(frames.first(), Some(SinkMessage::Initialized(state)) if state.values() == vec![6, 5, 4, 3, 2, 1]));
    assert!(matches!(frames.last(), Some(SinkMessage::Completed(state)) if *state == result));
    assert!(frames[1..frames.len() - 1]
        .iter()
        .all(|m| matches!(m, SinkMessage::Step(_))));
}

#[tokio::test]
async fn test_json_lines_export_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("steps.jsonl");

    let exporter = Arc::new(JsonLinesSink::create(&path).unwrap());
    let (recorder, recorder_sink) = common::recorder();
    let engine = SortingEngine::new(vec![exporter.clone() as SortSink, recorder_sink]).unwrap();

    engine
        .execute("quick-sort", &SortingState::from_values([4, 9, 2, 7, 2]), &CancelSignal::new())
        .await
        .unwrap();
    assert_eq!(exporter.records_written(), recorder.step_count() + 2);

    let records: Vec<ExportRecord<SortingState, SortOp>> =
        read_records(BufReader::new(File::open(&path).unwrap())).unwrap();
    let exported_kinds: Vec<_> = records
        .iter()
        .filter_map(ExportRecord::event)
        .map(|op| op.kind().as_str())
        .collect();

    assert_eq!(exported_kinds, recorder.event_kinds());
    assert!(matches!(records.first(), Some(ExportRecord::Initialize { .. })));
    assert_eq!(records.last().unwrap().state().values(), vec![2, 2, 4, 7, 9]);
}

#[tokio::test]
async fn test_pacing_does_not_change_results() {
    let config = EngineConfig::from_toml_str(
        r#"
        [pacing]
        step_delay_ms = 1
        yield_each_step = true
        "#,
    )
    .unwrap();
    let paced = SortingEngine::with_config(vec![Arc::new(TracingSink::default()) as SortSink], &config).unwrap();
    assert_eq!(
        paced.pipeline().runner().pacing(),
        Pacing {
            step_delay: Duration::from_millis(1),
            yield_each_step: true,
        }
    );
    let unpaced = SortingEngine::new(Vec::new()).unwrap();
    let cancel = CancelSignal::new();

    for id in ["shell-sort", "heap-sort"] {
        let a = paced.sort_values(id, [5, 1, 4, 2, 3], &cancel).await.unwrap();
        let b = unpaced.sort_values(id, [5, 1, 4, 2, 3], &cancel).await.unwrap();
        assert_eq!(a, b);
    }
}

#[tokio::test]
async fn test_cancel_from_another_task() {
    let (sink, rx) = ChannelSink::<SortingState, SortOp>::bounded(1, Duration::from_secs(30)).unwrap();
    let engine = SortingEngine::new(vec![Arc::new(sink) as SortSink]).unwrap();
    let cancel = CancelSignal::new();

    // Nobody drains the channel, so the run stalls until cancelled
    let trigger = cancel.clone();
    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.cancel();
    });

    let err = engine
        .execute("bubble-sort", &SortingState::from_values([3, 2, 1]), &cancel)
        .await
        .unwrap_err();
    canceller.await.unwrap();

    assert!(err.is_cancelled());
    assert!(rx.try_iter().all(|m| !m.is_completed()));
}

#[tokio::test]
async fn test_search_pipeline_over_strings() {
    let catalog = search_catalog::<String>().unwrap();
    let recorder = Arc::new(RecordingSink::<SearchState<String>, SearchEvent<String>>::new());
    let sink: SharedSink<SearchState<String>, SearchEvent<String>> = recorder.clone();
    let pipeline = Pipeline::from_catalog(Runner::new(vec![sink]), &catalog).unwrap();

    let items: Vec<String> = ["ant", "bee", "cat", "dog"].iter().map(|s| s.to_string()).collect();
    let state = SearchState::new(items, "dog".to_string());
    let result = pipeline
        .execute("linear-search", &state, &CancelSignal::new())
        .await
        .unwrap();

    let found = result.result().unwrap();
    assert_eq!(found.index, 3);
    assert_eq!(found.comparisons, 4);
    assert_eq!(
        recorder.steps().last().map(|s| s.event().kind),
        Some(SearchEventKind::Complete)
    );
}
