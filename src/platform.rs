//! Platform audio subsystem capability.
//!
//! Two controls live outside the routing session entirely: microphone mute
//! and the speakerphone toggle. They go straight to the platform audio
//! subsystem and work whether or not a session is active, so they are a
//! separate capability from [`RoutingEngine`](crate::RoutingEngine).

use parking_lot::Mutex;

/// Direct controls on the platform audio subsystem.
///
/// Implementations are called inline from whatever thread invokes the
/// manager, so they must be `Send + Sync` and cheap.
pub trait PlatformAudio: Send + Sync {
    /// Mutes or unmutes the microphone.
    fn set_microphone_mute(&self, mute: bool);

    /// Enables or disables the loudspeaker.
    fn set_speakerphone_on(&self, enabled: bool);
}

/// Platform that ignores all calls. The default when none is configured.
#[derive(Debug, Default)]
pub struct NoopPlatform;

impl PlatformAudio for NoopPlatform {
    fn set_microphone_mute(&self, _mute: bool) {}

    fn set_speakerphone_on(&self, _enabled: bool) {}
}

/// A recorded call on a [`MockPlatform`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformCall {
    /// `set_microphone_mute` was called.
    MicrophoneMute(bool),
    /// `set_speakerphone_on` was called.
    SpeakerphoneOn(bool),
}

/// Platform that records calls, for tests.
#[derive(Debug, Default)]
pub struct MockPlatform {
    calls: Mutex<Vec<PlatformCall>>,
}

impl MockPlatform {
    /// Creates a platform with an empty call log.
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls recorded so far, in order.
    pub fn calls(&self) -> Vec<PlatformCall> {
        self.calls.lock().clone()
    }
}

impl PlatformAudio for MockPlatform {
    fn set_microphone_mute(&self, mute: bool) {
        self.calls.lock().push(PlatformCall::MicrophoneMute(mute));
    }

    fn set_speakerphone_on(&self, enabled: bool) {
        self.calls.lock().push(PlatformCall::SpeakerphoneOn(enabled));
    }
}
