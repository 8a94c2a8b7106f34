//! Scripted walkthrough of the routing manager against the mock engine.
//!
//! Run with: cargo run --example mock_routing

use route_audio::{
    codes::audio_mode, device_change_observer, AudioRouting, Device, DeviceKind, MockEngineHandle,
    MockPlatform, RouteAudioError,
};
use std::sync::Arc;

fn main() -> Result<(), RouteAudioError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    let engine = MockEngineHandle::new();
    let platform = Arc::new(MockPlatform::new());

    let manager = AudioRouting::builder()
        .engine_factory(engine.factory())
        .platform(platform.clone())
        .observer(device_change_observer(|available, selected| {
            println!(
                "devices changed: {} available, selected {}",
                available.len(),
                selected.map_or_else(|| "none".to_string(), ToString::to_string),
            );
        }))
        .build()?;

    manager.set_audio_mode(audio_mode::IN_COMMUNICATION);
    manager.start();
    manager.flush();

    // Built-in outputs are detected first.
    engine.set_devices(vec![
        Device::new(DeviceKind::Speakerphone, "Speakerphone"),
        Device::new(DeviceKind::Earpiece, "Earpiece"),
    ]);

    // A bluetooth headset connects and wins automatic selection.
    engine.set_devices(vec![
        Device::new(DeviceKind::Speakerphone, "Speakerphone"),
        Device::new(DeviceKind::Earpiece, "Earpiece"),
        Device::new(DeviceKind::BluetoothHeadset, "AirPods Pro"),
    ]);

    // The user forces the speakerphone anyway.
    manager.select_output(DeviceKind::Speakerphone);
    manager.flush();
    println!("after manual pick: {:?}", manager.selected_device());

    manager.set_microphone_mute(true);
    println!("platform calls: {:?}", platform.calls());

    manager.stop();
    manager.flush();
    println!("after stop: {:?}", manager.selected_device());

    Ok(())
}
