use assert_approx_eq::assert_approx_eq;
use kpp_processor::{EditController, Processor};

use crate::{BASS, CABINET, Component, DRIVE, LEVEL, VOLUME};

#[test]
fn state_is_thirty_two_bytes() {
    let processor = Processor::new(Component::default());
    let mut expected = Vec::new();
    for v in [0.5f32, 0.5, 0.5, 0.5, 0.5, 1.0, 1.0] {
        expected.extend_from_slice(&v.to_le_bytes());
    }
    expected.extend_from_slice(&0i32.to_le_bytes());
    assert_eq!(processor.get_state(), expected);
}

#[test]
fn restore_reaches_controller() {
    let mut processor = Processor::new(Component::default());
    let mut bytes = Vec::new();
    for v in [0.9f32, 0.0, 0.5, 1.0, 0.25, 0.75, 0.0] {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes.extend_from_slice(&0i32.to_le_bytes());
    processor.set_state(&bytes).unwrap();

    let mut controller = EditController::new(&Component::default());
    controller.set_component_state(&processor.get_state()).unwrap();
    assert_eq!(controller.param_normalized(DRIVE), Some(0.9));
    assert_eq!(controller.param_normalized(VOLUME), Some(0.25));
    assert_eq!(controller.param_normalized(LEVEL), Some(0.75));
    assert_eq!(controller.param_normalized(CABINET), Some(0.0));
}

#[test]
fn tone_displays_decibels() {
    let controller = EditController::new(&Component::default());
    assert_approx_eq!(controller.normalized_to_display(BASS, 0.0).unwrap(), -10.0);
    assert_approx_eq!(controller.normalized_to_display(BASS, 0.5).unwrap(), 0.0);
    assert_approx_eq!(controller.display_to_normalized(BASS, 10.0).unwrap(), 1.0);
}

#[test]
fn profile_path_survives_controller_state() {
    let mut controller = EditController::new(&Component::default());
    assert_eq!(controller.profile_path(), "");
    controller.set_profile_path("/amps/plexi.tapf");

    let mut restored = EditController::new(&Component::default());
    restored.set_state(&controller.get_state()).unwrap();
    assert_eq!(restored.profile_path(), "/amps/plexi.tapf");
}
