//! Integration tests for route-audio.
//!
//! Everything here drives the full manager (worker thread included)
//! against the in-crate mock engine and platform, so no audio hardware is
//! required.

use std::sync::Arc;

use parking_lot::Mutex;
use route_audio::{
    codes::{audio_mode, focus_mode},
    AudioRouting, AudioRoutingManager, Device, DeviceKind, EngineCall, MockEngineHandle,
    MockPlatform, PlatformCall, RoutingObserver,
};

/// Observer that records every notification it receives.
#[derive(Default)]
struct RecordingObserver {
    device_changes: Mutex<Vec<(usize, Option<DeviceKind>)>>,
    focus_changes: Mutex<Vec<i32>>,
}

impl RoutingObserver for RecordingObserver {
    fn on_devices_changed(&self, available: &[Device], selected: Option<&Device>) {
        self.device_changes
            .lock()
            .push((available.len(), selected.map(|d| d.kind)));
    }

    fn on_focus_changed(&self, focus: i32) {
        self.focus_changes.lock().push(focus);
    }
}

fn headset_and_speaker() -> Vec<Device> {
    vec![
        Device::new(DeviceKind::WiredHeadset, "Wired headset"),
        Device::new(DeviceKind::Speakerphone, "Speakerphone"),
    ]
}

fn build_manager(engine: &MockEngineHandle) -> AudioRoutingManager {
    AudioRouting::builder()
        .engine_factory(engine.factory())
        .build()
        .expect("manager should build")
}

#[test]
fn test_repeated_start_constructs_one_session() {
    let engine = MockEngineHandle::new();
    let manager = build_manager(&engine);

    for _ in 0..5 {
        manager.start();
    }
    manager.flush();

    assert_eq!(engine.constructed(), 1);
    assert!(engine.is_started());
    assert!(engine.is_activated());
}

#[test]
fn test_configure_start_stop_scenario() {
    let engine = MockEngineHandle::new();
    engine.set_devices(headset_and_speaker());
    let manager = build_manager(&engine);

    manager.set_audio_mode(audio_mode::IN_COMMUNICATION);
    manager.start();
    manager.flush();

    assert!(engine
        .calls()
        .contains(&EngineCall::SetAudioMode(audio_mode::IN_COMMUNICATION)));
    assert!(manager.is_active());
    assert_eq!(
        manager.selected_device().map(|d| d.kind),
        Some(DeviceKind::WiredHeadset)
    );

    manager.stop();
    manager.flush();
    assert_eq!(manager.selected_device(), None);
    assert!(manager.available_devices().is_empty());
}

#[test]
fn test_select_output_picks_first_match_in_detection_order() {
    let engine = MockEngineHandle::new();
    engine.set_devices(vec![
        Device::new(DeviceKind::Speakerphone, "Speakerphone"),
        Device::new(DeviceKind::WiredHeadset, "Headset A"),
        Device::new(DeviceKind::WiredHeadset, "Headset B"),
    ]);
    let manager = build_manager(&engine);

    manager.start();
    manager.flush();

    manager.select_output(DeviceKind::WiredHeadset);
    manager.flush();

    let selected = manager.selected_device().expect("a device is selected");
    assert_eq!(selected.kind, DeviceKind::WiredHeadset);
    assert_eq!(selected.name, "Headset A");
}

#[test]
fn test_select_output_without_match_leaves_selection() {
    let engine = MockEngineHandle::new();
    engine.set_devices(headset_and_speaker());
    let manager = build_manager(&engine);

    manager.start();
    manager.flush();
    let before = manager.selected_device();

    manager.select_output(DeviceKind::BluetoothHeadset);
    manager.flush();

    assert_eq!(manager.selected_device(), before);
}

#[test]
fn test_select_output_without_session_is_noop() {
    let engine = MockEngineHandle::new();
    engine.set_devices(headset_and_speaker());
    let manager = build_manager(&engine);

    manager.select_output(DeviceKind::WiredHeadset);
    manager.flush();

    assert_eq!(manager.selected_device(), None);
    assert!(engine.calls().is_empty());
}

#[test]
fn test_device_changes_reach_observer_and_snapshot() {
    let engine = MockEngineHandle::new();
    let observer = Arc::new(RecordingObserver::default());
    let manager = AudioRouting::builder()
        .engine_factory(engine.factory())
        .observer(observer.clone())
        .build()
        .unwrap();

    manager.start();
    manager.flush();

    engine.set_devices(headset_and_speaker());
    assert_eq!(manager.available_devices().len(), 2);

    engine.set_devices(vec![Device::new(DeviceKind::Speakerphone, "Speakerphone")]);
    assert_eq!(manager.available_devices().len(), 1);
    assert_eq!(
        manager.selected_device().map(|d| d.kind),
        Some(DeviceKind::Speakerphone)
    );

    let changes = observer.device_changes.lock();
    // Initial report on start, then one per plug/unplug event.
    assert_eq!(changes.len(), 3);
    assert_eq!(changes[0], (0, None));
    assert_eq!(changes[1], (2, Some(DeviceKind::WiredHeadset)));
    assert_eq!(changes[2], (1, Some(DeviceKind::Speakerphone)));
}

#[test]
fn test_focus_changes_reach_observer() {
    let engine = MockEngineHandle::new();
    let observer = Arc::new(RecordingObserver::default());
    let manager = AudioRouting::builder()
        .engine_factory(engine.factory())
        .observer(observer.clone())
        .build()
        .unwrap();

    manager.start();
    manager.flush();

    engine.fire_focus_change(focus_mode::GAIN_TRANSIENT);
    assert_eq!(
        observer.focus_changes.lock().clone(),
        vec![focus_mode::GAIN_TRANSIENT]
    );
}

#[test]
fn test_live_config_change_is_applied_to_session() {
    let engine = MockEngineHandle::new();
    let manager = build_manager(&engine);

    manager.start();
    manager.flush();
    engine.clear_calls();

    manager.set_manage_audio_focus(false);
    manager.set_audio_attributes_usage_type(1);
    manager.flush();

    assert_eq!(
        engine.calls(),
        vec![
            EngineCall::SetManageAudioFocus(false),
            EngineCall::SetAudioAttributesUsageType(1),
        ]
    );
}

#[test]
fn test_config_change_while_idle_reaches_next_session() {
    let engine = MockEngineHandle::new();
    let manager = build_manager(&engine);

    manager.set_focus_mode(focus_mode::GAIN_TRANSIENT_EXCLUSIVE);
    manager.flush();
    assert!(engine.calls().is_empty()); // no session to apply to

    manager.start();
    manager.flush();
    assert!(engine.calls().contains(&EngineCall::SetFocusMode(
        focus_mode::GAIN_TRANSIENT_EXCLUSIVE
    )));
}

#[test]
fn test_platform_passthroughs_ignore_session_state() {
    let engine = MockEngineHandle::new();
    let platform = Arc::new(MockPlatform::new());
    let manager = AudioRouting::builder()
        .engine_factory(engine.factory())
        .platform(platform.clone())
        .build()
        .unwrap();

    // Before any session.
    manager.set_microphone_mute(true);
    manager.start();
    manager.flush();
    manager.enable_speakerphone(true);
    manager.stop();
    manager.flush();
    manager.set_microphone_mute(false);

    assert_eq!(
        platform.calls(),
        vec![
            PlatformCall::MicrophoneMute(true),
            PlatformCall::SpeakerphoneOn(true),
            PlatformCall::MicrophoneMute(false),
        ]
    );
}

#[test]
fn test_manager_is_reusable_across_sessions() {
    let engine = MockEngineHandle::new();
    engine.set_devices(headset_and_speaker());
    let manager = build_manager(&engine);

    manager.start();
    manager.flush();
    manager.stop();
    manager.flush();
    manager.start();
    manager.flush();

    assert_eq!(engine.constructed(), 2);
    assert!(manager.is_active());
    assert_eq!(
        manager.selected_device().map(|d| d.kind),
        Some(DeviceKind::WiredHeadset)
    );
}

#[test]
fn test_start_cancels_queued_stop() {
    let engine = MockEngineHandle::new();
    let manager = build_manager(&engine);

    // The exclusive start clears whatever is still queued ahead of it;
    // regardless of interleaving, the last caller's intent wins.
    manager.stop();
    manager.start();
    manager.flush();

    assert!(manager.is_active());
    assert_eq!(engine.constructed(), 1);
}
