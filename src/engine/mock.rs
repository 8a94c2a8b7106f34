//! Mock routing engine for testing without platform hardware.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::engine::{DeviceChangeCallback, EngineFactory, EngineOptions, FocusChangeCallback};
use crate::{Device, DeviceKind, EngineError, RoutingEngine};

/// A recorded call on a [`MockEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    /// `start` was called.
    Start,
    /// `activate` was called.
    Activate,
    /// `stop` was called.
    Stop,
    /// `select_device` was called with a device of this kind.
    SelectDevice(DeviceKind),
    /// `set_manage_audio_focus` was called.
    SetManageAudioFocus(bool),
    /// `set_focus_mode` was called.
    SetFocusMode(i32),
    /// `set_audio_mode` was called.
    SetAudioMode(i32),
    /// `set_audio_stream_type` was called.
    SetAudioStreamType(i32),
    /// `set_audio_attributes_usage_type` was called.
    SetAudioAttributesUsageType(i32),
    /// `set_audio_attributes_content_type` was called.
    SetAudioAttributesContentType(i32),
    /// `set_force_handle_audio_routing` was called.
    SetForceHandleAudioRouting(bool),
}

/// State shared between a handle and the engines it fabricates.
///
/// Devices persist across sessions (they model physically present
/// hardware); listener and lifecycle flags reset each time the factory
/// constructs an engine.
struct MockState {
    devices: Vec<Device>,
    selected: Option<Device>,
    preferred: Vec<DeviceKind>,
    listener: Option<DeviceChangeCallback>,
    focus_callback: Option<FocusChangeCallback>,
    started: bool,
    activated: bool,
    calls: Vec<EngineCall>,
    constructed: usize,
    fail_next_create: bool,
}

impl MockState {
    fn new() -> Self {
        Self {
            devices: Vec::new(),
            selected: None,
            preferred: Vec::new(),
            listener: None,
            focus_callback: None,
            started: false,
            activated: false,
            calls: Vec::new(),
            constructed: 0,
            fail_next_create: false,
        }
    }

    /// Re-evaluates the automatic selection after the device set changed.
    ///
    /// A still-present selection sticks (user choice wins); otherwise the
    /// first available device in preferred order is picked, falling back to
    /// detection order.
    fn recompute_selection(&mut self) {
        if !self.started {
            self.selected = None;
            return;
        }
        if let Some(selected) = &self.selected {
            if self.devices.contains(selected) {
                return;
            }
        }
        self.selected = self
            .preferred
            .iter()
            .find_map(|kind| self.devices.iter().find(|d| d.kind == *kind))
            .or_else(|| self.devices.first())
            .cloned();
    }

    /// Snapshot for firing the device-change listener outside the lock.
    fn notification(&self) -> Option<(DeviceChangeCallback, Vec<Device>, Option<Device>)> {
        let listener = self.listener.clone()?;
        Some((listener, self.devices.clone(), self.selected.clone()))
    }
}

/// Control handle for [`MockEngine`] instances.
///
/// The handle plays the role of the physical audio stack: it owns the set
/// of present devices, fabricates an engine per session through
/// [`factory()`](MockEngineHandle::factory), and records every call the
/// manager makes. Cloning the handle shares the same state.
///
/// # Example
///
/// ```
/// use route_audio::{Device, DeviceKind, MockEngineHandle};
///
/// let engine = MockEngineHandle::new();
///
/// // Simulate a wired headset being plugged in.
/// engine.set_devices(vec![Device::new(DeviceKind::WiredHeadset, "Wired headset")]);
/// assert_eq!(engine.constructed(), 0); // no session yet
/// ```
#[derive(Clone)]
pub struct MockEngineHandle {
    state: Arc<Mutex<MockState>>,
}

impl MockEngineHandle {
    /// Creates a handle with no devices present.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState::new())),
        }
    }

    /// Returns a factory that fabricates engines backed by this handle.
    pub fn factory(&self) -> EngineFactory {
        let state = Arc::clone(&self.state);
        Box::new(move |options: EngineOptions| {
            let mut s = state.lock();
            if s.fail_next_create {
                s.fail_next_create = false;
                return Err(EngineError::backend("mock engine creation failure"));
            }
            s.constructed += 1;
            s.preferred = options.preferred_devices;
            s.focus_callback = Some(options.focus_callback);
            s.listener = None;
            s.started = false;
            s.activated = false;
            drop(s);
            Ok(Box::new(MockEngine {
                state: Arc::clone(&state),
            }) as Box<dyn RoutingEngine>)
        })
    }

    /// Replaces the set of present devices, simulating plug/unplug events.
    ///
    /// If a session is running, the device-change listener fires with the
    /// new set and the recomputed selection.
    pub fn set_devices(&self, devices: Vec<Device>) {
        let fire = {
            let mut s = self.state.lock();
            s.devices = devices;
            s.recompute_selection();
            s.notification()
        };
        if let Some((listener, devices, selected)) = fire {
            listener(devices.as_slice(), selected.as_ref());
        }
    }

    /// Devices currently present.
    pub fn devices(&self) -> Vec<Device> {
        self.state.lock().devices.clone()
    }

    /// The engine's current selection.
    pub fn selected(&self) -> Option<Device> {
        self.state.lock().selected.clone()
    }

    /// All calls recorded so far, in order.
    pub fn calls(&self) -> Vec<EngineCall> {
        self.state.lock().calls.clone()
    }

    /// Clears the recorded calls.
    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    /// How many engines the factory has constructed.
    pub fn constructed(&self) -> usize {
        self.state.lock().constructed
    }

    /// Whether the current engine is started.
    pub fn is_started(&self) -> bool {
        self.state.lock().started
    }

    /// Whether the current engine is activated.
    pub fn is_activated(&self) -> bool {
        self.state.lock().activated
    }

    /// Makes the next factory invocation fail.
    pub fn fail_next_create(&self) {
        self.state.lock().fail_next_create = true;
    }

    /// Delivers a raw focus-change code to the session's focus callback.
    ///
    /// No-op if no engine has been constructed yet.
    pub fn fire_focus_change(&self, focus: i32) {
        let callback = self.state.lock().focus_callback.clone();
        if let Some(callback) = callback {
            callback(focus);
        }
    }
}

impl Default for MockEngineHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Scripted [`RoutingEngine`] built by [`MockEngineHandle::factory()`].
pub struct MockEngine {
    state: Arc<Mutex<MockState>>,
}

impl RoutingEngine for MockEngine {
    fn start(&mut self, listener: DeviceChangeCallback) -> Result<(), EngineError> {
        let (devices, selected) = {
            let mut s = self.state.lock();
            s.calls.push(EngineCall::Start);
            s.started = true;
            s.listener = Some(Arc::clone(&listener));
            s.recompute_selection();
            (s.devices.clone(), s.selected.clone())
        };
        // Initial detection report, like a real backend.
        listener(devices.as_slice(), selected.as_ref());
        Ok(())
    }

    fn activate(&mut self) -> Result<(), EngineError> {
        let mut s = self.state.lock();
        s.calls.push(EngineCall::Activate);
        if !s.started {
            return Err(EngineError::NotStarted);
        }
        s.activated = true;
        Ok(())
    }

    fn stop(&mut self) {
        let mut s = self.state.lock();
        s.calls.push(EngineCall::Stop);
        s.started = false;
        s.activated = false;
        s.listener = None;
        s.selected = None;
    }

    fn available_devices(&self) -> Vec<Device> {
        self.state.lock().devices.clone()
    }

    fn selected_device(&self) -> Option<Device> {
        self.state.lock().selected.clone()
    }

    fn select_device(&mut self, device: &Device) -> Result<(), EngineError> {
        let fire = {
            let mut s = self.state.lock();
            s.calls.push(EngineCall::SelectDevice(device.kind));
            if !s.started {
                return Err(EngineError::NotStarted);
            }
            if !s.devices.contains(device) {
                return Err(EngineError::DeviceGone {
                    name: device.name.clone(),
                });
            }
            s.selected = Some(device.clone());
            s.notification()
        };
        if let Some((listener, devices, selected)) = fire {
            listener(devices.as_slice(), selected.as_ref());
        }
        Ok(())
    }

    fn set_manage_audio_focus(&mut self, manage: bool) {
        self.state
            .lock()
            .calls
            .push(EngineCall::SetManageAudioFocus(manage));
    }

    fn set_focus_mode(&mut self, mode: i32) {
        self.state.lock().calls.push(EngineCall::SetFocusMode(mode));
    }

    fn set_audio_mode(&mut self, mode: i32) {
        self.state.lock().calls.push(EngineCall::SetAudioMode(mode));
    }

    fn set_audio_stream_type(&mut self, stream_type: i32) {
        self.state
            .lock()
            .calls
            .push(EngineCall::SetAudioStreamType(stream_type));
    }

    fn set_audio_attributes_usage_type(&mut self, usage: i32) {
        self.state
            .lock()
            .calls
            .push(EngineCall::SetAudioAttributesUsageType(usage));
    }

    fn set_audio_attributes_content_type(&mut self, content: i32) {
        self.state
            .lock()
            .calls
            .push(EngineCall::SetAudioAttributesContentType(content));
    }

    fn set_force_handle_audio_routing(&mut self, force: bool) {
        self.state
            .lock()
            .calls
            .push(EngineCall::SetForceHandleAudioRouting(force));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn test_devices() -> Vec<Device> {
        vec![
            Device::new(DeviceKind::Speakerphone, "Speakerphone"),
            Device::new(DeviceKind::Earpiece, "Earpiece"),
        ]
    }

    fn start_engine(handle: &MockEngineHandle) -> Box<dyn RoutingEngine> {
        let mut factory = handle.factory();
        let options = EngineOptions {
            preferred_devices: DeviceKind::default_priority(),
            focus_callback: Arc::new(|_| {}),
        };
        let mut engine = factory(options).unwrap();
        engine.start(Arc::new(|_, _| {})).unwrap();
        engine
    }

    #[test]
    fn test_factory_counts_constructions() {
        let handle = MockEngineHandle::new();
        let mut factory = handle.factory();

        for _ in 0..2 {
            let options = EngineOptions {
                preferred_devices: DeviceKind::default_priority(),
                focus_callback: Arc::new(|_| {}),
            };
            factory(options).unwrap();
        }

        assert_eq!(handle.constructed(), 2);
    }

    #[test]
    fn test_factory_failure_is_one_shot() {
        let handle = MockEngineHandle::new();
        handle.fail_next_create();
        let mut factory = handle.factory();

        let options = EngineOptions {
            preferred_devices: vec![],
            focus_callback: Arc::new(|_| {}),
        };
        assert!(factory(options).is_err());
        assert_eq!(handle.constructed(), 0);

        let options = EngineOptions {
            preferred_devices: vec![],
            focus_callback: Arc::new(|_| {}),
        };
        assert!(factory(options).is_ok());
        assert_eq!(handle.constructed(), 1);
    }

    #[test]
    fn test_start_fires_initial_device_report() {
        let handle = MockEngineHandle::new();
        handle.set_devices(test_devices());

        let reported = Arc::new(AtomicUsize::new(0));
        let reported_clone = Arc::clone(&reported);

        let mut factory = handle.factory();
        let options = EngineOptions {
            preferred_devices: DeviceKind::default_priority(),
            focus_callback: Arc::new(|_| {}),
        };
        let mut engine = factory(options).unwrap();
        engine
            .start(Arc::new(move |available, _| {
                reported_clone.store(available.len(), Ordering::SeqCst);
            }))
            .unwrap();

        assert_eq!(reported.load(Ordering::SeqCst), 2);
        assert!(handle.is_started());
    }

    #[test]
    fn test_selection_follows_preferred_order() {
        let handle = MockEngineHandle::new();
        handle.set_devices(test_devices());
        let engine = start_engine(&handle);

        // Speakerphone outranks earpiece in the default priority.
        assert_eq!(
            engine.selected_device().map(|d| d.kind),
            Some(DeviceKind::Speakerphone)
        );

        // A bluetooth headset appearing takes over.
        let mut devices = test_devices();
        devices.push(Device::new(DeviceKind::BluetoothHeadset, "AirPods"));
        handle.set_devices(devices);
        assert_eq!(
            engine.selected_device().map(|d| d.kind),
            Some(DeviceKind::BluetoothHeadset)
        );
    }

    #[test]
    fn test_manual_selection_sticks_while_present() {
        let handle = MockEngineHandle::new();
        let mut devices = test_devices();
        devices.push(Device::new(DeviceKind::BluetoothHeadset, "AirPods"));
        handle.set_devices(devices.clone());

        let mut engine = start_engine(&handle);
        engine.select_device(&devices[1]).unwrap();
        assert_eq!(
            engine.selected_device().map(|d| d.kind),
            Some(DeviceKind::Earpiece)
        );

        // Unrelated device change does not override a manual pick.
        devices.push(Device::new(DeviceKind::WiredHeadset, "Wired headset"));
        handle.set_devices(devices);
        assert_eq!(
            engine.selected_device().map(|d| d.kind),
            Some(DeviceKind::Earpiece)
        );
    }

    #[test]
    fn test_select_missing_device_errors() {
        let handle = MockEngineHandle::new();
        handle.set_devices(test_devices());
        let mut engine = start_engine(&handle);

        let gone = Device::new(DeviceKind::BluetoothHeadset, "Phantom");
        assert!(matches!(
            engine.select_device(&gone),
            Err(EngineError::DeviceGone { .. })
        ));
    }

    #[test]
    fn test_stop_clears_session_state() {
        let handle = MockEngineHandle::new();
        handle.set_devices(test_devices());
        let mut engine = start_engine(&handle);
        engine.activate().unwrap();

        engine.stop();
        assert!(!handle.is_started());
        assert!(!handle.is_activated());
        assert_eq!(engine.selected_device(), None);
        // Devices model hardware and survive the session.
        assert_eq!(engine.available_devices().len(), 2);
    }

    #[test]
    fn test_setter_calls_are_recorded() {
        let handle = MockEngineHandle::new();
        let mut engine = start_engine(&handle);
        handle.clear_calls();

        engine.set_audio_mode(3);
        engine.set_manage_audio_focus(false);

        assert_eq!(
            handle.calls(),
            vec![
                EngineCall::SetAudioMode(3),
                EngineCall::SetManageAudioFocus(false),
            ]
        );
    }

    #[test]
    fn test_fire_focus_change_reaches_callback() {
        let handle = MockEngineHandle::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = Arc::clone(&seen);

        let mut factory = handle.factory();
        let options = EngineOptions {
            preferred_devices: vec![],
            focus_callback: Arc::new(move |focus| {
                seen_clone.store(focus as usize, Ordering::SeqCst);
            }),
        };
        factory(options).unwrap();

        handle.fire_focus_change(2);
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }
}
