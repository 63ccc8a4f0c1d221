use std::sync::Arc;
use std::sync::atomic::Ordering;

use assert_approx_eq::assert_approx_eq;
use kpp_component::audio::test_utils::test_signal;
use kpp_component::events::{ChangeList, ParamQueue};
use kpp_component::parameters::States;
use kpp_core::state;
use proptest::prelude::*;

use super::test_utils::{
    BYPASS_ID, FakeComponent, GAIN_ID, Recorder, SETUP, active_processor, run_block,
};
use super::{AudioBusBuffersMut, ProcessData, ProcessSetup, Processor};
use crate::arrangement::{BusDirection, SpeakerArrangement};
use crate::error::Error;

fn stereo(num_frames: usize) -> Vec<Vec<f32>> {
    let signal = test_signal(num_frames);
    let right = signal.iter().map(|x| -x * 0.5).collect();
    vec![signal, right]
}

fn silence(channels: usize, num_frames: usize) -> Vec<Vec<f32>> {
    vec![vec![0.0; num_frames]; channels]
}

fn bypass_changes(on: bool) -> ChangeList {
    ChangeList::default()
        .with_queue(ParamQueue::new(BYPASS_ID).with_point(0, if on { 1.0 } else { 0.0 }))
}

#[test]
fn process_while_inactive_fails() {
    let mut processor = Processor::new(FakeComponent::default());
    let mut output = silence(2, 4);
    assert_eq!(
        run_block(&mut processor, None, &stereo(4), &mut output, 4),
        Err(Error::NotActive)
    );
}

#[test]
fn activation_requires_setup() {
    let mut processor = Processor::new(FakeComponent::default());
    assert_eq!(processor.set_active(true), Err(Error::NotSetUp));
    assert!(!processor.is_active());
}

#[test]
fn activation_creates_engine_with_current_parameters() {
    let (processor, counters) = active_processor();
    assert!(processor.is_active());
    assert_eq!(counters.created.load(Ordering::SeqCst), 1);
    assert_eq!(counters.handled_parameters.load(Ordering::SeqCst), 1);
}

#[test]
fn setup_rejected_while_active() {
    let (mut processor, _) = active_processor();
    assert_eq!(processor.setup_processing(SETUP), Err(Error::Active));
    assert_eq!(
        processor.set_bus_arrangements(&[SpeakerArrangement::MONO], &[SpeakerArrangement::MONO]),
        Err(Error::Active)
    );
}

#[test]
fn reactivation_yields_fresh_engine() {
    let (mut processor, counters) = active_processor();
    let input = stereo(64);
    let mut first = silence(2, 64);
    run_block(&mut processor, None, &input, &mut first, 64).unwrap();

    processor.set_active(false).unwrap();
    processor.set_active(true).unwrap();
    let mut second = silence(2, 64);
    run_block(&mut processor, None, &input, &mut second, 64).unwrap();

    assert_eq!(counters.created.load(Ordering::SeqCst), 2);
    assert_eq!(first, second);
}

#[test]
fn repeated_activation_is_noop() {
    let (mut processor, counters) = active_processor();
    processor.set_active(true).unwrap();
    assert_eq!(counters.created.load(Ordering::SeqCst), 1);
    processor.set_active(false).unwrap();
    processor.set_active(false).unwrap();
    assert!(!processor.is_active());
}

#[test]
fn rejected_arrangement_keeps_previous() {
    let mut processor = Processor::new(FakeComponent::default());
    processor
        .set_bus_arrangements(&[SpeakerArrangement::MONO], &[SpeakerArrangement::MONO])
        .unwrap();
    assert_eq!(
        processor.set_bus_arrangements(&[SpeakerArrangement::MONO], &[SpeakerArrangement::STEREO]),
        Err(Error::UnsupportedArrangement)
    );
    assert_eq!(
        processor.set_bus_arrangements(&[SpeakerArrangement::EMPTY], &[SpeakerArrangement::EMPTY]),
        Err(Error::UnsupportedArrangement)
    );
    assert_eq!(
        processor.bus_arrangement(BusDirection::Output, 0),
        Some(SpeakerArrangement::MONO)
    );
    assert_eq!(processor.bus_arrangement(BusDirection::Input, 1), None);
}

#[test]
fn default_arrangement_is_stereo() {
    let processor = Processor::new(FakeComponent::default());
    assert_eq!(
        processor.bus_arrangement(BusDirection::Input, 0),
        Some(SpeakerArrangement::STEREO)
    );
}

#[test]
fn engine_processes_at_unity_gain_by_default() {
    let (mut processor, _) = active_processor();
    let input = vec![vec![1.0, 0.0], vec![0.5, 0.0]];
    let mut output = silence(2, 2);
    run_block(&mut processor, None, &input, &mut output, 2).unwrap();
    assert_approx_eq!(output[0][0], 1.0);
    assert_approx_eq!(output[0][1], 0.5);
    assert_approx_eq!(output[1][0], 0.5);
}

#[test]
fn automation_reaches_engine() {
    let (mut processor, counters) = active_processor();
    let changes = ChangeList::default()
        .with_queue(ParamQueue::new(GAIN_ID).with_point(0, 0.0).with_point(1, 0.25));
    let input = vec![vec![1.0], vec![1.0]];
    let mut output = silence(2, 1);
    run_block(&mut processor, Some(&changes), &input, &mut output, 1).unwrap();
    assert_approx_eq!(output[0][0], 0.5);
    assert_eq!(counters.handled_parameters.load(Ordering::SeqCst), 2);
}

#[test]
fn unchanged_automation_does_not_notify_engine() {
    let (mut processor, counters) = active_processor();
    let changes = ChangeList::default().with_queue(ParamQueue::new(GAIN_ID).with_point(0, 0.5));
    let mut output = silence(2, 4);
    run_block(&mut processor, Some(&changes), &stereo(4), &mut output, 4).unwrap();
    assert_eq!(counters.handled_parameters.load(Ordering::SeqCst), 1);
}

#[test]
fn zero_samples_touch_nothing() {
    let (mut processor, counters) = active_processor();
    let mut output = vec![vec![7.0; 4]; 2];
    run_block(&mut processor, None, &stereo(4), &mut output, 0).unwrap();
    assert_eq!(output, vec![vec![7.0; 4]; 2]);
    assert_eq!(counters.processed_blocks.load(Ordering::SeqCst), 0);
}

#[test]
fn no_inputs_touch_nothing_but_apply_automation() {
    let (mut processor, counters) = active_processor();
    let changes = ChangeList::default().with_queue(ParamQueue::new(GAIN_ID).with_point(3, 0.9));
    let mut left = vec![7.0; 4];
    let mut right = vec![7.0; 4];
    let mut channels: [&mut [f32]; 2] = [&mut left, &mut right];
    let mut outputs = [AudioBusBuffersMut {
        channels: &mut channels,
    }];
    processor
        .process(&mut ProcessData {
            parameter_changes: Some(&changes),
            inputs: &[],
            outputs: &mut outputs,
            num_samples: 4,
        })
        .unwrap();
    assert_eq!(left, vec![7.0; 4]);
    assert_eq!(right, vec![7.0; 4]);
    assert_approx_eq!(processor.parameters().get_numeric(GAIN_ID).unwrap(), 0.9);
    assert_eq!(counters.processed_blocks.load(Ordering::SeqCst), 0);
}

#[test]
fn missing_channels_skip_block() {
    let (mut processor, counters) = active_processor();
    let mut output = vec![vec![7.0; 4]];
    run_block(&mut processor, None, &stereo(4), &mut output, 4).unwrap();
    assert_eq!(output, vec![vec![7.0; 4]]);
    assert_eq!(counters.processed_blocks.load(Ordering::SeqCst), 0);
}

#[test]
fn oversized_block_rejected() {
    let component = FakeComponent::default();
    let mut processor = Processor::new(component);
    processor
        .setup_processing(ProcessSetup {
            max_samples_per_process_call: 4,
            ..SETUP
        })
        .unwrap();
    processor.set_active(true).unwrap();
    let mut output = silence(2, 8);
    assert_eq!(
        run_block(&mut processor, None, &stereo(8), &mut output, 8),
        Err(Error::BlockTooLarge(8))
    );
}

#[test]
fn bypass_copies_input() {
    let (mut processor, counters) = active_processor();
    let input = stereo(32);
    let mut output = silence(2, 32);
    run_block(&mut processor, Some(&bypass_changes(true)), &input, &mut output, 32).unwrap();
    assert_eq!(output, input);
    assert_eq!(counters.processed_blocks.load(Ordering::SeqCst), 0);
}

#[test]
fn bypass_leaves_engine_state_untouched() {
    let input = stereo(32);

    let (mut reference, _) = active_processor();
    let mut expected = silence(2, 32);
    run_block(&mut reference, None, &input, &mut expected, 32).unwrap();

    let (mut processor, _) = active_processor();
    let mut scratch = silence(2, 32);
    run_block(&mut processor, Some(&bypass_changes(true)), &stereo(32), &mut scratch, 32).unwrap();
    let mut actual = silence(2, 32);
    run_block(&mut processor, Some(&bypass_changes(false)), &input, &mut actual, 32).unwrap();

    assert_eq!(actual, expected);
}

#[test]
fn restored_state_survives_empty_block() {
    let (mut processor, _) = active_processor();
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&0.6f32.to_le_bytes());
    bytes.extend_from_slice(&0i32.to_le_bytes());
    processor.set_state(&bytes).unwrap();

    let mut output = vec![vec![7.0; 4]; 2];
    run_block(&mut processor, None, &stereo(4), &mut output, 0).unwrap();
    assert_eq!(output, vec![vec![7.0; 4]; 2]);
    assert_eq!(processor.get_state(), bytes);
}

#[test]
fn set_state_notifies_and_updates_engine() {
    let (mut processor, counters) = active_processor();
    let recorder = Arc::new(Recorder::default());
    let id = processor.attach_listener(recorder.clone());

    let mut bytes = Vec::new();
    bytes.extend_from_slice(&0.25f32.to_le_bytes());
    bytes.extend_from_slice(&1i32.to_le_bytes());
    processor.set_state(&bytes).unwrap();

    assert_eq!(recorder.take(), vec![(BYPASS_ID, 1.0), (GAIN_ID, 0.5)]);
    assert_eq!(counters.handled_parameters.load(Ordering::SeqCst), 2);
    assert_eq!(processor.parameters().get_switch(BYPASS_ID), Some(true));

    assert!(processor.detach_listener(id));
    processor.set_state(&bytes).unwrap();
    assert!(recorder.take().is_empty());
}

#[test]
fn truncated_state_rejected() {
    let (mut processor, _) = active_processor();
    let before = processor.get_state();
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&0.25f32.to_le_bytes());
    bytes.extend_from_slice(&[1, 0, 0]);
    assert_eq!(
        processor.set_state(&bytes),
        Err(Error::State(state::Error::Truncated))
    );
    assert_eq!(processor.get_state(), before);
}

#[test]
fn automation_notifies_listeners() {
    let (mut processor, _) = active_processor();
    let recorder = Arc::new(Recorder::default());
    processor.attach_listener(recorder.clone());
    let changes = ChangeList::default().with_queue(ParamQueue::new(GAIN_ID).with_point(0, 0.75));
    let mut output = silence(2, 4);
    run_block(&mut processor, Some(&changes), &stereo(4), &mut output, 4).unwrap();
    assert_eq!(recorder.take(), vec![(GAIN_ID, 1.5)]);
}

fn mono_processor() -> Processor<FakeComponent> {
    let mut processor = Processor::new(FakeComponent::default());
    processor
        .set_bus_arrangements(&[SpeakerArrangement::MONO], &[SpeakerArrangement::MONO])
        .unwrap();
    processor.setup_processing(SETUP).unwrap();
    processor.set_active(true).unwrap();
    processor
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Only the final point of a queue decides the value for the block.
    #[test]
    fn last_point_wins(
        values in prop::collection::vec(0.0f64..=1.0, 1..16),
    ) {
        let (mut full, _) = active_processor();
        let (mut last_only, _) = active_processor();

        let mut queue = ParamQueue::new(GAIN_ID);
        for (offset, value) in values.iter().enumerate() {
            queue = queue.with_point(offset, *value);
        }
        let last = ParamQueue::new(GAIN_ID).with_point(values.len() - 1, values[values.len() - 1]);

        let input = stereo(16);
        let mut a = silence(2, 16);
        let mut b = silence(2, 16);
        run_block(&mut full, Some(&ChangeList::default().with_queue(queue)), &input, &mut a, 16).unwrap();
        run_block(&mut last_only, Some(&ChangeList::default().with_queue(last)), &input, &mut b, 16).unwrap();

        prop_assert_eq!(full.parameters().snapshot(), last_only.parameters().snapshot());
        prop_assert_eq!(a, b);
    }

    /// A mono bus behaves like a stereo bus carrying the same signal twice.
    #[test]
    fn mono_matches_duplicated_stereo(
        samples in prop::collection::vec(-1.0f32..=1.0, 1..64),
        bypass in any::<bool>(),
    ) {
        let n = samples.len();
        let changes = bypass_changes(bypass);

        let mut mono = mono_processor();
        let mut mono_out = silence(1, n);
        run_block(&mut mono, Some(&changes), &[samples.clone()], &mut mono_out, n).unwrap();

        let (mut stereo_proc, _) = active_processor();
        let mut stereo_out = silence(2, n);
        run_block(
            &mut stereo_proc,
            Some(&changes),
            &[samples.clone(), samples],
            &mut stereo_out,
            n,
        )
        .unwrap();

        prop_assert_eq!(&mono_out[0], &stereo_out[0]);
        prop_assert_eq!(&stereo_out[0], &stereo_out[1]);
    }

    /// Bypassed output is exactly the input, for any block length.
    #[test]
    fn bypass_is_identity(
        left in prop::collection::vec(-1.0f32..=1.0, 0..64),
    ) {
        let n = left.len();
        let right: Vec<f32> = left.iter().rev().copied().collect();
        let input = vec![left, right];
        let (mut processor, _) = active_processor();
        let mut output = silence(2, n);
        run_block(&mut processor, Some(&bypass_changes(true)), &input, &mut output, n).unwrap();
        prop_assert_eq!(output, input);
    }
}
