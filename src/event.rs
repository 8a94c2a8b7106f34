//! Observer capability for routing events.
//!
//! Events are informational: the manager keeps running after any of them,
//! and the default implementations ignore everything. Both methods are
//! invoked from the designated routing context, so observers must not
//! block.

use std::sync::Arc;

use crate::Device;

/// Receiver for routing notifications, one method per event.
///
/// Inject an observer at construction via
/// [`AudioRoutingBuilder::observer()`](crate::AudioRoutingBuilder::observer).
///
/// # Example
///
/// ```
/// use route_audio::{Device, RoutingObserver};
///
/// struct LogObserver;
///
/// impl RoutingObserver for LogObserver {
///     fn on_devices_changed(&self, available: &[Device], selected: Option<&Device>) {
///         tracing::info!(count = available.len(), ?selected, "devices changed");
///     }
///
///     fn on_focus_changed(&self, focus: i32) {
///         tracing::info!(focus, "focus changed");
///     }
/// }
/// ```
pub trait RoutingObserver: Send + Sync {
    /// Called whenever the set of detected devices or the active selection
    /// changes.
    fn on_devices_changed(&self, available: &[Device], selected: Option<&Device>) {
        let _ = (available, selected);
    }

    /// Called with the raw platform focus-change code.
    ///
    /// Codes are platform-defined and delivered unvalidated, like the
    /// configuration codes.
    fn on_focus_changed(&self, focus: i32) {
        let _ = focus;
    }
}

/// Observer that ignores all events. The default when none is configured.
#[derive(Debug, Default)]
pub struct NullObserver;

impl RoutingObserver for NullObserver {}

/// Wraps a closure into an observer for device-change events.
///
/// Focus-change events are ignored; implement [`RoutingObserver`] directly
/// to receive both.
///
/// # Example
///
/// ```
/// use route_audio::device_change_observer;
///
/// let observer = device_change_observer(|available, selected| {
///     println!("{} devices, selected {:?}", available.len(), selected);
/// });
/// # let _ = observer;
/// ```
pub fn device_change_observer<F>(f: F) -> Arc<dyn RoutingObserver>
where
    F: Fn(&[Device], Option<&Device>) + Send + Sync + 'static,
{
    struct FnObserver<F>(F);

    impl<F> RoutingObserver for FnObserver<F>
    where
        F: Fn(&[Device], Option<&Device>) + Send + Sync,
    {
        fn on_devices_changed(&self, available: &[Device], selected: Option<&Device>) {
            (self.0)(available, selected);
        }
    }

    Arc::new(FnObserver(f))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DeviceKind;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_null_observer_ignores_events() {
        let observer = NullObserver;
        observer.on_devices_changed(&[], None);
        observer.on_focus_changed(-1);
    }

    #[test]
    fn test_device_change_observer_helper() {
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = Arc::clone(&seen);

        let observer = device_change_observer(move |available, _selected| {
            seen_clone.store(available.len(), Ordering::SeqCst);
        });

        let devices = vec![
            Device::new(DeviceKind::Speakerphone, "Speakerphone"),
            Device::new(DeviceKind::Earpiece, "Earpiece"),
        ];
        observer.on_devices_changed(&devices, Some(&devices[0]));

        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_observer_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn RoutingObserver>();
    }
}
