//! Routing engine capability and mock implementation.
//!
//! A [`RoutingEngine`] is the seam in front of the native device-routing
//! backend: it detects output devices, arbitrates which one is active, and
//! holds the focus/mode configuration while a session runs. The crate ships
//! [`MockEngine`] so the full manager can be exercised without platform
//! hardware.

mod mock;

pub use mock::{EngineCall, MockEngine, MockEngineHandle};

use std::sync::Arc;

use crate::{Device, DeviceKind, EngineError};

/// Callback invoked by the engine when the detected device set or the
/// active selection changes.
///
/// Fired from the designated routing context (or from whatever context the
/// backend reports on); the manager's own listener is cheap, but injected
/// observers run downstream of it and must not block.
pub type DeviceChangeCallback = Arc<dyn Fn(&[Device], Option<&Device>) + Send + Sync>;

/// Callback invoked with raw platform focus-change codes.
pub type FocusChangeCallback = Arc<dyn Fn(i32) + Send + Sync>;

/// Construction-time options handed to an [`EngineFactory`].
pub struct EngineOptions {
    /// Preferred device order for automatic selection, highest preference
    /// first.
    pub preferred_devices: Vec<DeviceKind>,

    /// Receiver for focus-change notifications while the session runs.
    pub focus_callback: FocusChangeCallback,
}

/// The native device-routing backend behind a session.
///
/// # Implementation Notes
///
/// - Engines are not assumed thread-safe: the manager creates, drives, and
///   drops them on a single designated thread, and they never cross it.
///   Implementations therefore do not need to be `Send`.
/// - Lifecycle is `start` → `activate` → (`select_device` | setters)* →
///   `stop`. After `stop` the engine is dropped; a new session gets a fresh
///   engine from the factory.
/// - Setter codes are platform-defined and arrive unvalidated.
pub trait RoutingEngine {
    /// Begins device detection, reporting changes through `listener`.
    ///
    /// Implementations should fire `listener` once with the initially
    /// detected devices before returning.
    fn start(&mut self, listener: DeviceChangeCallback) -> Result<(), EngineError>;

    /// Activates routing to the selected device and, if configured,
    /// requests audio focus.
    fn activate(&mut self) -> Result<(), EngineError>;

    /// Stops detection, releases routing, and abandons focus if held.
    fn stop(&mut self);

    /// Devices currently detected, in detection order.
    fn available_devices(&self) -> Vec<Device>;

    /// The currently selected device, if any.
    fn selected_device(&self) -> Option<Device>;

    /// Makes `device` the active output.
    fn select_device(&mut self, device: &Device) -> Result<(), EngineError>;

    /// Whether the engine requests focus on activate and abandons it on stop.
    fn set_manage_audio_focus(&mut self, manage: bool);

    /// Focus gain code to use while started.
    fn set_focus_mode(&mut self, mode: i32);

    /// Audio mode code to use while started.
    fn set_audio_mode(&mut self, mode: i32);

    /// Stream type code for focus requests on pre-O platforms.
    fn set_audio_stream_type(&mut self, stream_type: i32);

    /// Attribute usage code for focus requests on O and later.
    fn set_audio_attributes_usage_type(&mut self, usage: i32);

    /// Attribute content type code for focus requests on O and later.
    fn set_audio_attributes_content_type(&mut self, content: i32);

    /// Forces routing on devices where it is normally skipped.
    fn set_force_handle_audio_routing(&mut self, force: bool);
}

/// Factory that constructs a routing engine for each session.
///
/// The factory moves onto the designated worker thread and runs there for
/// every `start()`; the engines it returns never leave that thread.
pub type EngineFactory =
    Box<dyn FnMut(EngineOptions) -> Result<Box<dyn RoutingEngine>, EngineError> + Send>;
