//! End-to-end playback tests driving the controller against recorded slots.

use std::sync::Arc;
use std::time::Duration;

use pipeviz::playback::recording::{RecordingSlots, SlotWrite};
use pipeviz::playback::slots::{DATA_PLACEHOLDER, IDLE_STATUS};
use pipeviz::playback::{PlaybackController, PlaybackSettings, RunOutcome};
use pipeviz::simulation::mock::MockBackend;
use pipeviz::simulation::{
    Actor, DataAfter, FileBackend, LogEntry, SimulationRequest, SimulationResult, Step,
};
use proptest::prelude::*;

use super::common::fixtures;

fn controller(result: SimulationResult) -> (PlaybackController, Arc<RecordingSlots>) {
    let slots = Arc::new(RecordingSlots::new());
    let controller = PlaybackController::new(
        Arc::new(MockBackend::new(result)),
        slots.clone(),
        PlaybackSettings::default(),
    );
    (controller, slots)
}

fn step_titles(writes: &[SlotWrite]) -> Vec<String> {
    writes
        .iter()
        .filter_map(|w| match w {
            SlotWrite::Step(record) => Some(record.title.clone()),
            _ => None,
        })
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_encrypted_exchange_plays_in_order() {
    let result = fixtures::encrypted_exchange();
    let expected: Vec<String> = result.steps.iter().map(|s| s.title.clone()).collect();
    let (controller, slots) = controller(result);

    let outcome = controller.run(SimulationRequest::default()).await.unwrap();
    assert_eq!(outcome, RunOutcome::Completed);

    let writes = slots.writes();
    assert_eq!(step_titles(&writes), expected);
    assert_eq!(slots.transfer_count(), 2);

    let state = slots.snapshot();
    assert_eq!(state.parent.status, "Write to Pipe");
    assert_eq!(state.parent.data, "Khoor");
    assert_eq!(state.child.status, "Child Prints Output");
    assert_eq!(state.child.data, "Hello");
    assert_eq!(state.logs.entries.len(), 8);
    assert!(state.run_enabled);
    assert!(state.error.is_none());
    assert!(state
        .summary
        .as_ref()
        .map(|s| s.success)
        .unwrap_or(false));
}

#[tokio::test(start_paused = true)]
async fn test_rejected_exchange_leaves_panels_idle() {
    let (controller, slots) = controller(fixtures::rejected_exchange());

    let outcome = controller.run(SimulationRequest::default()).await.unwrap();
    assert_eq!(outcome, RunOutcome::Completed);

    let state = slots.snapshot();
    assert_eq!(state.parent.status, IDLE_STATUS);
    assert_eq!(state.parent.data, DATA_PLACEHOLDER);
    assert_eq!(state.child.status, IDLE_STATUS);
    assert_eq!(state.steps.entries.len(), 4);
    assert_eq!(slots.transfer_count(), 0);
    assert_eq!(
        state.summary.map(|s| s.describe()),
        Some("Simulation failed: Authentication failed.".to_string())
    );
}

#[tokio::test(start_paused = true)]
async fn test_full_exchange_duration() {
    let (controller, _slots) = controller(fixtures::encrypted_exchange());

    let started = tokio::time::Instant::now();
    controller.run(SimulationRequest::default()).await.unwrap();
    let elapsed = started.elapsed();

    // Nine 600ms pauses and two 41-frame transfers at 20ms per frame
    let expected = Duration::from_millis(9 * 600 + 2 * 41 * 20);
    assert!(elapsed >= expected, "elapsed {elapsed:?}");
    assert!(elapsed < expected + Duration::from_millis(50), "elapsed {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn test_second_run_starts_from_idle() {
    let (controller, slots) = controller(fixtures::single_write());

    controller.run(SimulationRequest::default()).await.unwrap();
    slots.clear_journal();
    controller.run(SimulationRequest::default()).await.unwrap();

    let writes = slots.writes();
    let first_step = writes
        .iter()
        .position(|w| matches!(w, SlotWrite::Step(_)))
        .unwrap();
    assert!(writes[..first_step].contains(&SlotWrite::Data(
        pipeviz::simulation::Side::Parent,
        DATA_PLACEHOLDER.to_string()
    )));
    assert_eq!(slots.snapshot().steps.entries.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_mistyped_entries_do_not_abort_playback() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    std::io::Write::write_all(
        &mut file,
        br#"{
            "steps": [
                {"title": "Parent Prepares Message", "actor": "parent",
                 "dataAfter": {"messagePlain": "Hello"}},
                {"title": "Encrypt Message", "actor": "parent", "dataAfter": {"encrypted": 42}},
                {"title": "Write to Pipe", "actor": "parent", "dataAfter": [], "pipeData": "42"}
            ],
            "logs": [
                {"timestamp": 1700000000, "message": "level missing"},
                {"timestamp": "t1", "level": "INFO", "message": "done"}
            ]
        }"#,
    )
    .unwrap();

    let slots = Arc::new(RecordingSlots::new());
    let controller = PlaybackController::new(
        Arc::new(FileBackend::new(file.path())),
        slots.clone(),
        PlaybackSettings::default(),
    );

    let outcome = controller.run(SimulationRequest::default()).await.unwrap();
    assert_eq!(outcome, RunOutcome::Completed);

    assert_eq!(
        step_titles(&slots.writes()),
        ["Parent Prepares Message", "Encrypt Message", "Write to Pipe"]
    );
    assert_eq!(slots.transfer_count(), 1);

    let state = slots.snapshot();
    assert_eq!(state.parent.data, "42");
    assert!(state.error.is_none());
    let logs: Vec<String> = state.logs.entries.iter().map(|r| r.to_string()).collect();
    assert_eq!(logs, ["[1700000000] : level missing", "[t1] INFO: done"]);
}

fn data_after(encrypted: &Option<String>, plain: &Option<String>) -> DataAfter {
    DataAfter {
        encrypted: encrypted.clone(),
        message_plain: plain.clone(),
        ..DataAfter::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn steps_render_in_order_before_logs(
        titles in prop::collection::vec("[A-Za-z ]{1,12}", 0..8),
        pipes in prop::collection::vec(prop::option::of("[a-z]{0,4}"), 8),
        log_count in 0usize..5,
    ) {
        let steps: Vec<Step> = titles
            .iter()
            .zip(&pipes)
            .enumerate()
            .map(|(i, (title, pipe))| {
                let actor = if i % 2 == 0 { Actor::Parent } else { Actor::Child };
                let step = Step::new(title.clone(), actor);
                match pipe {
                    Some(payload) => step.with_pipe_data(payload.clone()),
                    None => step,
                }
            })
            .collect();
        let expected_transfers = steps
            .iter()
            .filter(|s| s.pipe_payload().is_some())
            .count();
        let logs = (0..log_count)
            .map(|i| LogEntry::new(i.to_string(), "INFO", format!("entry {i}")))
            .collect();

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .start_paused(true)
            .build()
            .unwrap();
        let (controller, slots) = controller(SimulationResult::new(steps, logs));
        let outcome = rt.block_on(controller.run(SimulationRequest::default())).unwrap();
        prop_assert_eq!(outcome, RunOutcome::Completed);

        let writes = slots.writes();
        prop_assert_eq!(step_titles(&writes), titles);
        prop_assert_eq!(slots.transfer_count(), expected_transfers);

        let last_step = writes.iter().rposition(|w| matches!(w, SlotWrite::Step(_)));
        let first_log = writes.iter().position(|w| matches!(w, SlotWrite::Log(_)));
        if let (Some(step), Some(log)) = (last_step, first_log) {
            prop_assert!(step < log);
        }
        let logged = writes.iter().filter(|w| matches!(w, SlotWrite::Log(_))).count();
        prop_assert_eq!(logged, log_count);
    }

    #[test]
    fn parent_data_keeps_last_non_empty_value(
        fields in prop::collection::vec(
            (prop::option::of("[a-z]{0,3}"), prop::option::of("[a-z]{0,3}")),
            1..6,
        ),
    ) {
        let steps: Vec<Step> = fields
            .iter()
            .map(|(enc, plain)| {
                Step::new("Parent", Actor::Parent).with_data(data_after(enc, plain))
            })
            .collect();

        let expected = fields.iter().fold(DATA_PLACEHOLDER.to_string(), |prior, (enc, plain)| {
            enc.as_deref()
                .filter(|v| !v.is_empty())
                .or(plain.as_deref().filter(|v| !v.is_empty()))
                .map(str::to_string)
                .unwrap_or(prior)
        });

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .start_paused(true)
            .build()
            .unwrap();
        let (controller, slots) = controller(SimulationResult::new(steps, Vec::new()));
        rt.block_on(controller.run(SimulationRequest::default())).unwrap();

        prop_assert_eq!(slots.snapshot().parent.data, expected);
    }
}
