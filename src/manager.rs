//! The routing manager and its designated worker context.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread::JoinHandle;

use parking_lot::Mutex;

use crate::config::{ConfigUpdate, RoutingConfig};
use crate::engine::{DeviceChangeCallback, EngineFactory, EngineOptions, RoutingEngine};
use crate::event::RoutingObserver;
use crate::platform::PlatformAudio;
use crate::queue::{Command, CommandQueue};
use crate::{Device, DeviceKind};

/// Detection state mirrored out of the worker for lock-free-of-the-queue
/// reads. Written only from the worker; readers observe either the old or
/// the new state, never a partial one.
#[derive(Debug, Default)]
struct DeviceSnapshot {
    available: Vec<Device>,
    selected: Option<Device>,
    active: bool,
}

/// State shared between the manager handle and the worker.
pub(crate) struct SharedState {
    snapshot: Mutex<DeviceSnapshot>,
    config: Mutex<RoutingConfig>,
}

impl SharedState {
    pub(crate) fn new(config: RoutingConfig) -> Self {
        Self {
            snapshot: Mutex::new(DeviceSnapshot::default()),
            config: Mutex::new(config),
        }
    }
}

/// Single point of control for audio output routing.
///
/// The manager owns a routing session's lifecycle: `start()` brings up
/// device detection through the configured engine, `stop()` tears it down,
/// and in between the manager tracks the selected output, applies
/// configuration changes to the live session, and forwards device-change
/// notifications to the observer.
///
/// All session mutation is marshaled onto one designated worker thread (the
/// engine is not thread-safe); the mutating operations below only enqueue
/// work and return immediately. Queries read a snapshot maintained by the
/// worker. Operations on a missing session are silent no-ops.
///
/// Built via [`AudioRouting::builder()`](crate::AudioRouting::builder). The
/// manager is reusable: any number of start/stop cycles may follow each
/// other, each with a freshly constructed engine.
pub struct AudioRoutingManager {
    shared: Arc<SharedState>,
    queue: Arc<CommandQueue>,
    platform: Arc<dyn PlatformAudio>,
    worker: Option<JoinHandle<()>>,
}

impl AudioRoutingManager {
    pub(crate) fn new(
        shared: Arc<SharedState>,
        queue: Arc<CommandQueue>,
        platform: Arc<dyn PlatformAudio>,
        worker: JoinHandle<()>,
    ) -> Self {
        Self {
            shared,
            queue,
            platform,
            worker: Some(worker),
        }
    }

    /// Starts a routing session if none exists.
    ///
    /// Idempotent: a no-op while a session is active. The request clears
    /// any pending queued work (a queued `stop()` included) and jumps the
    /// queue, so the last caller's intent wins.
    pub fn start(&self) {
        self.queue.submit_exclusive(Command::Start);
    }

    /// Stops the routing session if one exists.
    ///
    /// Idempotent: a no-op without a session. Clears pending queued work
    /// before enqueueing, like [`start()`](Self::start).
    pub fn stop(&self) {
        self.queue.submit_exclusive(Command::Stop);
    }

    /// Selects the first available device of the given kind as the active
    /// output.
    ///
    /// Runs on the designated context; a no-op when no session is active or
    /// no device of that kind is present.
    pub fn select_output(&self, kind: DeviceKind) {
        self.queue.submit(Command::Select(kind));
    }

    /// Selects an output by its wire name (`"bluetooth"`, `"headset"`,
    /// `"speaker"`, `"earpiece"`).
    ///
    /// Unrecognized names are a silent no-op, like every other failure path
    /// here.
    pub fn select_output_by_name(&self, name: &str) {
        if let Some(kind) = DeviceKind::from_type_name(name) {
            self.select_output(kind);
        }
    }

    /// The currently selected device, or `None` without an active session.
    pub fn selected_device(&self) -> Option<Device> {
        self.shared.snapshot.lock().selected.clone()
    }

    /// Devices currently detected, in detection order. Empty without an
    /// active session.
    pub fn available_devices(&self) -> Vec<Device> {
        self.shared.snapshot.lock().available.clone()
    }

    /// Whether a routing session is currently active.
    pub fn is_active(&self) -> bool {
        self.shared.snapshot.lock().active
    }

    /// Mutes or unmutes the microphone. Direct platform passthrough,
    /// independent of session state.
    pub fn set_microphone_mute(&self, mute: bool) {
        self.platform.set_microphone_mute(mute);
    }

    /// Enables or disables the loudspeaker. Direct platform passthrough,
    /// independent of session state.
    pub fn enable_speakerphone(&self, enabled: bool) {
        self.platform.set_speakerphone_on(enabled);
    }

    /// Whether sessions request audio focus on start and abandon it on stop.
    pub fn set_manage_audio_focus(&self, manage: bool) {
        self.shared.config.lock().manage_audio_focus = manage;
        self.queue
            .submit(Command::Apply(ConfigUpdate::ManageAudioFocus(manage)));
    }

    /// Focus gain code to use while started. Not validated.
    pub fn set_focus_mode(&self, mode: i32) {
        self.shared.config.lock().focus_mode = mode;
        self.queue
            .submit(Command::Apply(ConfigUpdate::FocusMode(mode)));
    }

    /// Audio mode code to use while started. Not validated.
    pub fn set_audio_mode(&self, mode: i32) {
        self.shared.config.lock().audio_mode = mode;
        self.queue
            .submit(Command::Apply(ConfigUpdate::AudioMode(mode)));
    }

    /// Stream type code for focus requests on pre-O platforms. Not
    /// validated.
    pub fn set_audio_stream_type(&self, stream_type: i32) {
        self.shared.config.lock().audio_stream_type = stream_type;
        self.queue
            .submit(Command::Apply(ConfigUpdate::AudioStreamType(stream_type)));
    }

    /// Attribute usage code for focus requests on O and later. Not
    /// validated.
    pub fn set_audio_attributes_usage_type(&self, usage: i32) {
        self.shared.config.lock().audio_attributes_usage_type = usage;
        self.queue
            .submit(Command::Apply(ConfigUpdate::AudioAttributesUsageType(
                usage,
            )));
    }

    /// Attribute content type code for focus requests on O and later. Not
    /// validated.
    pub fn set_audio_attributes_content_type(&self, content: i32) {
        self.shared.config.lock().audio_attributes_content_type = content;
        self.queue
            .submit(Command::Apply(ConfigUpdate::AudioAttributesContentType(
                content,
            )));
    }

    /// Forces routing on devices where it is normally skipped.
    pub fn set_force_handle_audio_routing(&self, force: bool) {
        self.shared.config.lock().force_handle_audio_routing = force;
        self.queue
            .submit(Command::Apply(ConfigUpdate::ForceHandleAudioRouting(
                force,
            )));
    }

    /// Replaces the preferred device order used when the next session's
    /// engine is constructed. A live session keeps the order it started
    /// with.
    pub fn set_preferred_devices(&self, devices: Vec<DeviceKind>) {
        self.shared.config.lock().preferred_devices = devices;
    }

    /// Snapshot of the current configuration.
    pub fn config(&self) -> RoutingConfig {
        self.shared.config.lock().clone()
    }

    /// Blocks until all previously submitted commands have been processed
    /// or cancelled.
    ///
    /// Mostly a test and shutdown aid; the mutating operations themselves
    /// never block.
    pub fn flush(&self) {
        let (tx, rx) = mpsc::sync_channel(1);
        self.queue.submit(Command::Flush(tx));
        let _ = rx.recv();
    }
}

impl Drop for AudioRoutingManager {
    fn drop(&mut self) {
        self.queue.submit_exclusive(Command::Shutdown);
        self.queue.close();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// The designated routing context: owns the engine and consumes commands.
pub(crate) struct Worker {
    factory: EngineFactory,
    engine: Option<Box<dyn RoutingEngine>>,
    shared: Arc<SharedState>,
    observer: Arc<dyn RoutingObserver>,
    queue: Arc<CommandQueue>,
}

impl Worker {
    pub(crate) fn new(
        factory: EngineFactory,
        shared: Arc<SharedState>,
        observer: Arc<dyn RoutingObserver>,
        queue: Arc<CommandQueue>,
    ) -> Self {
        Self {
            factory,
            engine: None,
            shared,
            observer,
            queue,
        }
    }

    /// Runs the command loop until shutdown, then releases the session.
    pub(crate) fn run(mut self) {
        while let Some(command) = self.queue.pop() {
            match command {
                Command::Start => self.handle_start(),
                Command::Stop => self.handle_stop(),
                Command::Select(kind) => self.handle_select(kind),
                Command::Apply(update) => self.handle_apply(update),
                Command::Flush(done) => {
                    let _ = done.try_send(());
                }
                Command::Shutdown => break,
            }
        }
        self.handle_stop();
    }

    fn handle_start(&mut self) {
        if self.engine.is_some() {
            tracing::debug!("routing session already active, ignoring start");
            return;
        }

        let config = self.shared.config.lock().clone();
        let observer = Arc::clone(&self.observer);
        let options = EngineOptions {
            preferred_devices: config.preferred_devices.clone(),
            focus_callback: Arc::new(move |focus| observer.on_focus_changed(focus)),
        };

        let mut engine = match (self.factory)(options) {
            Ok(engine) => engine,
            Err(error) => {
                tracing::warn!(%error, "failed to create routing engine");
                return;
            }
        };

        engine.set_manage_audio_focus(config.manage_audio_focus);
        engine.set_focus_mode(config.focus_mode);
        engine.set_audio_mode(config.audio_mode);
        engine.set_audio_stream_type(config.audio_stream_type);
        engine.set_audio_attributes_usage_type(config.audio_attributes_usage_type);
        engine.set_audio_attributes_content_type(config.audio_attributes_content_type);
        engine.set_force_handle_audio_routing(config.force_handle_audio_routing);

        if let Err(error) = engine.start(self.device_change_listener()) {
            tracing::warn!(%error, "routing engine failed to start");
            return;
        }
        if let Err(error) = engine.activate() {
            tracing::warn!(%error, "routing engine failed to activate");
            engine.stop();
            return;
        }

        let available = engine.available_devices();
        let selected = engine.selected_device();
        {
            let mut snapshot = self.shared.snapshot.lock();
            snapshot.available = available;
            snapshot.selected = selected;
            snapshot.active = true;
        }
        self.engine = Some(engine);
        tracing::debug!("routing session started");
    }

    fn handle_stop(&mut self) {
        let Some(mut engine) = self.engine.take() else {
            return;
        };
        engine.stop();
        drop(engine);

        let mut snapshot = self.shared.snapshot.lock();
        snapshot.available = Vec::new();
        snapshot.selected = None;
        snapshot.active = false;
        drop(snapshot);
        tracing::debug!("routing session stopped");
    }

    fn handle_select(&mut self, kind: DeviceKind) {
        let Some(engine) = self.engine.as_mut() else {
            tracing::debug!(%kind, "no active session, ignoring output selection");
            return;
        };

        // First match in detection order.
        let devices = engine.available_devices();
        let Some(device) = devices.iter().find(|d| d.kind == kind) else {
            tracing::debug!(%kind, "requested output not among available devices");
            return;
        };

        if let Err(error) = engine.select_device(device) {
            tracing::warn!(%error, %kind, "failed to select output device");
            return;
        }

        let selected = engine.selected_device();
        let mut snapshot = self.shared.snapshot.lock();
        snapshot.selected = selected;
        snapshot.available = devices;
    }

    fn handle_apply(&mut self, update: ConfigUpdate) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        tracing::trace!(?update, "applying configuration to live session");
        match update {
            ConfigUpdate::ManageAudioFocus(manage) => engine.set_manage_audio_focus(manage),
            ConfigUpdate::FocusMode(mode) => engine.set_focus_mode(mode),
            ConfigUpdate::AudioMode(mode) => engine.set_audio_mode(mode),
            ConfigUpdate::AudioStreamType(stream_type) => {
                engine.set_audio_stream_type(stream_type);
            }
            ConfigUpdate::AudioAttributesUsageType(usage) => {
                engine.set_audio_attributes_usage_type(usage);
            }
            ConfigUpdate::AudioAttributesContentType(content) => {
                engine.set_audio_attributes_content_type(content);
            }
            ConfigUpdate::ForceHandleAudioRouting(force) => {
                engine.set_force_handle_audio_routing(force);
            }
        }
    }

    fn device_change_listener(&self) -> DeviceChangeCallback {
        let shared = Arc::clone(&self.shared);
        let observer = Arc::clone(&self.observer);
        Arc::new(move |available: &[Device], selected: Option<&Device>| {
            {
                let mut snapshot = shared.snapshot.lock();
                snapshot.available = available.to_vec();
                snapshot.selected = selected.cloned();
            }
            observer.on_devices_changed(available, selected);
        })
    }
}
