//! Configuration for routing sessions.

use crate::codes::{audio_mode, content_type, focus_mode, stream_type, usage_type};
use crate::DeviceKind;

/// Settings applied to a routing session.
///
/// A snapshot of this struct is taken when a session starts; setters on the
/// manager update the stored value and re-apply it to a live session through
/// the designated routing context.
///
/// The integer-valued settings carry platform-defined codes (see
/// [`codes`](crate::codes)) and are handed to the engine without validation;
/// callers own domain correctness.
///
/// # Example
///
/// ```
/// use route_audio::{codes::audio_mode, RoutingConfig};
///
/// let config = RoutingConfig {
///     manage_audio_focus: false,
///     audio_mode: audio_mode::NORMAL,
///     ..Default::default()
/// };
/// assert!(!config.manage_audio_focus);
/// ```
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    /// Whether the session requests audio focus on start and abandons it on
    /// stop.
    ///
    /// Default: `true`
    pub manage_audio_focus: bool,

    /// Focus gain code used while started.
    ///
    /// Default: [`focus_mode::GAIN`]
    pub focus_mode: i32,

    /// Audio mode code used while started.
    ///
    /// Default: [`audio_mode::IN_COMMUNICATION`]
    pub audio_mode: i32,

    /// Stream type code used when requesting focus on pre-O platforms.
    ///
    /// Default: [`stream_type::VOICE_CALL`]
    pub audio_stream_type: i32,

    /// Attribute usage code used when requesting focus on O and later.
    ///
    /// Default: [`usage_type::VOICE_COMMUNICATION`]
    pub audio_attributes_usage_type: i32,

    /// Attribute content type code used when requesting focus on O and later.
    ///
    /// Default: [`content_type::SPEECH`]
    pub audio_attributes_content_type: i32,

    /// Forces the engine to handle routing on devices where routing is
    /// normally skipped to avoid audio issues. Behavior is undefined when
    /// enabled on such devices.
    ///
    /// Default: `false`
    pub force_handle_audio_routing: bool,

    /// Preferred device order for automatic selection, highest preference
    /// first. The engine takes it at construction time, so changes apply to
    /// the next session.
    ///
    /// Default: [`DeviceKind::default_priority()`]
    pub preferred_devices: Vec<DeviceKind>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            manage_audio_focus: true,
            focus_mode: focus_mode::GAIN,
            audio_mode: audio_mode::IN_COMMUNICATION,
            audio_stream_type: stream_type::VOICE_CALL,
            audio_attributes_usage_type: usage_type::VOICE_COMMUNICATION,
            audio_attributes_content_type: content_type::SPEECH,
            force_handle_audio_routing: false,
            preferred_devices: DeviceKind::default_priority(),
        }
    }
}

/// A single mutated setting, in message-passing form.
///
/// Setters on the manager enqueue one of these so a live session is
/// re-configured on the designated routing context instead of from the
/// caller's thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigUpdate {
    ManageAudioFocus(bool),
    FocusMode(i32),
    AudioMode(i32),
    AudioStreamType(i32),
    AudioAttributesUsageType(i32),
    AudioAttributesContentType(i32),
    ForceHandleAudioRouting(bool),
}
