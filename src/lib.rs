//! # route-audio
//!
//! Audio output routing and device arbitration behind a serial command
//! queue.
//!
//! `route-audio` is the control layer between a calling application and a
//! platform's audio stack: it owns the lifecycle of a routing session
//! (device detection on, device detection off), tracks which output device
//! is active, applies focus/mode configuration to the live session, and
//! reports device changes to an observer. The platform pieces (the
//! device-routing engine and the audio subsystem) are capability traits
//! injected at construction, so the manager runs unchanged against real
//! backends or the in-crate mocks.
//!
//! ## Quick Start
//!
//! ```
//! use route_audio::{AudioRouting, Device, DeviceKind, MockEngineHandle};
//!
//! # fn main() -> Result<(), route_audio::RouteAudioError> {
//! let engine = MockEngineHandle::new();
//!
//! let manager = AudioRouting::builder()
//!     .engine_factory(engine.factory())
//!     .build()?;
//!
//! manager.start();
//! manager.flush();
//!
//! // A wired headset appears; it outranks the speakerphone.
//! engine.set_devices(vec![
//!     Device::new(DeviceKind::Speakerphone, "Speakerphone"),
//!     Device::new(DeviceKind::WiredHeadset, "Wired headset"),
//! ]);
//! assert_eq!(
//!     manager.selected_device().map(|d| d.kind),
//!     Some(DeviceKind::WiredHeadset),
//! );
//!
//! manager.stop();
//! manager.flush();
//! assert_eq!(manager.selected_device(), None);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The engine is not thread-safe, so the crate maintains a strict thread
//! boundary:
//!
//! - **Designated worker thread**: owns the engine; all session mutation
//!   (start, stop, select, config re-apply) runs here, consumed from a
//!   serial command queue.
//! - **Command queue**: FIFO with two extras lifted from the source
//!   platform's main-looper discipline: `start()`/`stop()` clear pending
//!   work and jump the queue, so racing callers resolve to the last one's
//!   intent.
//! - **Shared snapshot**: the worker mirrors detection state out for
//!   `selected_device()`/`available_devices()`, which never touch the
//!   queue.
//!
//! Routing operations are best-effort: calling against a missing session
//! or a missing device is a silent no-op (logged via `tracing`), never an
//! error.

#![warn(missing_docs)]

mod builder;
pub mod codes;
mod config;
mod device;
pub mod engine;
mod error;
mod event;
mod manager;
mod platform;
mod queue;

pub use builder::{AudioRouting, AudioRoutingBuilder};
pub use config::RoutingConfig;
pub use device::{Device, DeviceKind};
pub use engine::{
    DeviceChangeCallback, EngineCall, EngineFactory, EngineOptions, FocusChangeCallback,
    MockEngine, MockEngineHandle, RoutingEngine,
};
pub use error::{EngineError, RouteAudioError};
pub use event::{device_change_observer, NullObserver, RoutingObserver};
pub use manager::AudioRoutingManager;
pub use platform::{MockPlatform, NoopPlatform, PlatformAudio, PlatformCall};
