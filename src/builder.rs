//! Builder pattern for `AudioRouting`.

use std::sync::Arc;
use std::thread;

use crate::engine::{EngineFactory, EngineOptions, RoutingEngine};
use crate::event::{NullObserver, RoutingObserver};
use crate::manager::{AudioRoutingManager, SharedState, Worker};
use crate::platform::{NoopPlatform, PlatformAudio};
use crate::queue::CommandQueue;
use crate::{DeviceKind, EngineError, RouteAudioError, RoutingConfig};

/// Name of the designated worker thread.
const WORKER_THREAD_NAME: &str = "audio-routing";

/// Builder for configuring and creating an [`AudioRoutingManager`].
///
/// Use [`AudioRouting::builder()`] to create a new builder. The engine
/// factory is the only required piece; platform, observer, and
/// configuration all have defaults.
///
/// # Example
///
/// ```
/// use route_audio::{AudioRouting, MockEngineHandle};
///
/// # fn main() -> Result<(), route_audio::RouteAudioError> {
/// let engine = MockEngineHandle::new();
///
/// let manager = AudioRouting::builder()
///     .engine_factory(engine.factory())
///     .build()?;
///
/// manager.start();
/// # Ok(())
/// # }
/// ```
#[must_use]
pub struct AudioRoutingBuilder {
    engine_factory: Option<EngineFactory>,
    platform: Arc<dyn PlatformAudio>,
    observer: Arc<dyn RoutingObserver>,
    config: RoutingConfig,
}

impl Default for AudioRoutingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioRoutingBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            engine_factory: None,
            platform: Arc::new(NoopPlatform),
            observer: Arc::new(NullObserver),
            config: RoutingConfig::default(),
        }
    }

    /// Sets the factory that constructs a routing engine for each session.
    ///
    /// Required. The factory moves onto the designated worker thread and is
    /// invoked there on every `start()`.
    pub fn engine_factory<F>(mut self, factory: F) -> Self
    where
        F: FnMut(EngineOptions) -> Result<Box<dyn RoutingEngine>, EngineError> + Send + 'static,
    {
        self.engine_factory = Some(Box::new(factory));
        self
    }

    /// Sets the platform audio subsystem behind the microphone-mute and
    /// speakerphone passthroughs.
    ///
    /// Default: a no-op platform.
    pub fn platform(mut self, platform: Arc<dyn PlatformAudio>) -> Self {
        self.platform = platform;
        self
    }

    /// Sets the observer receiving device-change and focus-change events.
    ///
    /// Default: events are ignored.
    pub fn observer(mut self, observer: Arc<dyn RoutingObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Sets the initial routing configuration.
    ///
    /// Default: [`RoutingConfig::default()`].
    pub fn config(mut self, config: RoutingConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the preferred device order, highest preference first.
    ///
    /// Shorthand for mutating [`RoutingConfig::preferred_devices`].
    pub fn preferred_devices(mut self, devices: impl IntoIterator<Item = DeviceKind>) -> Self {
        self.config.preferred_devices = devices.into_iter().collect();
        self
    }

    /// Creates the manager and spawns its designated worker thread.
    ///
    /// The manager starts Idle; call
    /// [`start()`](AudioRoutingManager::start) to bring up a session.
    ///
    /// # Errors
    ///
    /// Returns an error if no engine factory was configured or the worker
    /// thread cannot be spawned.
    pub fn build(self) -> Result<AudioRoutingManager, RouteAudioError> {
        let factory = self
            .engine_factory
            .ok_or(RouteAudioError::NoEngineConfigured)?;

        let shared = Arc::new(SharedState::new(self.config));
        let queue = Arc::new(CommandQueue::new());

        let worker_shared = Arc::clone(&shared);
        let worker_queue = Arc::clone(&queue);
        let observer = self.observer;
        let handle = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || {
                // The worker (and the engines it creates) must never leave
                // this thread, so it is constructed here.
                Worker::new(factory, worker_shared, observer, worker_queue).run();
            })
            .map_err(RouteAudioError::WorkerSpawnFailed)?;

        Ok(AudioRoutingManager::new(shared, queue, self.platform, handle))
    }
}

/// Main entry point for route-audio.
///
/// Use [`AudioRouting::builder()`] to configure and create a routing
/// manager.
pub struct AudioRouting;

impl AudioRouting {
    /// Creates a new builder for configuring audio routing.
    pub fn builder() -> AudioRoutingBuilder {
        AudioRoutingBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MockEngineHandle;

    #[test]
    fn test_build_requires_engine_factory() {
        let result = AudioRouting::builder().build();
        assert!(matches!(result, Err(RouteAudioError::NoEngineConfigured)));
    }

    #[test]
    fn test_build_with_factory_starts_idle() {
        let engine = MockEngineHandle::new();
        let manager = AudioRouting::builder()
            .engine_factory(engine.factory())
            .build()
            .unwrap();

        assert!(!manager.is_active());
        assert_eq!(manager.selected_device(), None);
        assert!(manager.available_devices().is_empty());
    }

    #[test]
    fn test_preferred_devices_shorthand() {
        let builder = AudioRouting::builder()
            .preferred_devices([DeviceKind::Earpiece, DeviceKind::BluetoothHeadset]);

        assert_eq!(
            builder.config.preferred_devices,
            vec![DeviceKind::Earpiece, DeviceKind::BluetoothHeadset]
        );
    }

    #[test]
    fn test_builder_config_override() {
        let config = RoutingConfig {
            manage_audio_focus: false,
            ..Default::default()
        };
        let builder = AudioRouting::builder().config(config);
        assert!(!builder.config.manage_audio_focus);
    }
}
