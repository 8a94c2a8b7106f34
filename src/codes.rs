//! Platform-defined audio code tables.
//!
//! Configuration values travel through the manager as raw platform codes and
//! are applied to the routing engine without validation; the tables here
//! exist so bridge callers can translate the stable string names they use on
//! the wire into codes. Unknown names log a warning and return `None`.

/// Audio mode codes (`audio_mode::IN_COMMUNICATION` etc.).
pub mod audio_mode {
    /// Normal mode, neither ringing nor in a call.
    pub const NORMAL: i32 = 0;
    /// Ringtone playing.
    pub const RINGTONE: i32 = 1;
    /// An established telephony call.
    pub const IN_CALL: i32 = 2;
    /// An established VoIP/communication session.
    pub const IN_COMMUNICATION: i32 = 3;
    /// Call screening in progress.
    pub const CALL_SCREENING: i32 = 4;

    /// Looks up an audio mode by wire name.
    pub fn from_name(name: &str) -> Option<i32> {
        match name {
            "normal" => Some(NORMAL),
            "ringtone" => Some(RINGTONE),
            "inCall" => Some(IN_CALL),
            "inCommunication" => Some(IN_COMMUNICATION),
            "callScreening" => Some(CALL_SCREENING),
            _ => {
                tracing::warn!(name, "unknown audio mode");
                None
            }
        }
    }
}

/// Audio focus gain codes.
pub mod focus_mode {
    /// Permanent focus gain.
    pub const GAIN: i32 = 1;
    /// Transient gain, e.g. for a notification.
    pub const GAIN_TRANSIENT: i32 = 2;
    /// Transient gain where previous holders may duck.
    pub const GAIN_TRANSIENT_MAY_DUCK: i32 = 3;
    /// Transient gain where previous holders must pause.
    pub const GAIN_TRANSIENT_EXCLUSIVE: i32 = 4;

    /// Looks up a focus mode by wire name.
    pub fn from_name(name: &str) -> Option<i32> {
        match name {
            "gain" => Some(GAIN),
            "gainTransient" => Some(GAIN_TRANSIENT),
            "gainTransientMayDuck" => Some(GAIN_TRANSIENT_MAY_DUCK),
            "gainTransientExclusive" => Some(GAIN_TRANSIENT_EXCLUSIVE),
            _ => {
                tracing::warn!(name, "unknown audio focus mode");
                None
            }
        }
    }
}

/// Audio stream type codes, used when requesting focus on pre-O platforms.
pub mod stream_type {
    /// Voice call stream.
    pub const VOICE_CALL: i32 = 0;
    /// System sounds.
    pub const SYSTEM: i32 = 1;
    /// Ringer stream.
    pub const RING: i32 = 2;
    /// Media playback.
    pub const MUSIC: i32 = 3;
    /// Alarms.
    pub const ALARM: i32 = 4;
    /// Notifications.
    pub const NOTIFICATION: i32 = 5;
    /// DTMF tones.
    pub const DTMF: i32 = 8;
    /// Accessibility prompts.
    pub const ACCESSIBILITY: i32 = 10;

    /// Looks up a stream type by wire name.
    pub fn from_name(name: &str) -> Option<i32> {
        match name {
            "voiceCall" => Some(VOICE_CALL),
            "system" => Some(SYSTEM),
            "ring" => Some(RING),
            "music" => Some(MUSIC),
            "alarm" => Some(ALARM),
            "notification" => Some(NOTIFICATION),
            "dtmf" => Some(DTMF),
            "accessibility" => Some(ACCESSIBILITY),
            _ => {
                tracing::warn!(name, "unknown audio stream type");
                None
            }
        }
    }
}

/// Audio attribute usage codes, used when requesting focus on O and later.
pub mod usage_type {
    /// Usage unknown.
    pub const UNKNOWN: i32 = 0;
    /// Media playback.
    pub const MEDIA: i32 = 1;
    /// Two-way voice communication.
    pub const VOICE_COMMUNICATION: i32 = 2;
    /// In-call signalling tones.
    pub const VOICE_COMMUNICATION_SIGNALLING: i32 = 3;
    /// Alarms.
    pub const ALARM: i32 = 4;
    /// Notifications.
    pub const NOTIFICATION: i32 = 5;
    /// Incoming-call ringtone.
    pub const NOTIFICATION_RINGTONE: i32 = 6;
    /// Notification of a transient event.
    pub const NOTIFICATION_EVENT: i32 = 10;
    /// Accessibility assistance.
    pub const ASSISTANCE_ACCESSIBILITY: i32 = 11;
    /// Navigation guidance.
    pub const ASSISTANCE_NAVIGATION_GUIDANCE: i32 = 12;
    /// UI sonification.
    pub const ASSISTANCE_SONIFICATION: i32 = 13;
    /// Game audio.
    pub const GAME: i32 = 14;
    /// Virtual assistant.
    pub const ASSISTANT: i32 = 16;

    /// Looks up a usage type by wire name.
    pub fn from_name(name: &str) -> Option<i32> {
        match name {
            "unknown" => Some(UNKNOWN),
            "media" => Some(MEDIA),
            "voiceCommunication" => Some(VOICE_COMMUNICATION),
            "voiceCommunicationSignalling" => Some(VOICE_COMMUNICATION_SIGNALLING),
            "alarm" => Some(ALARM),
            "notification" => Some(NOTIFICATION),
            "notificationRingtone" => Some(NOTIFICATION_RINGTONE),
            "notificationEvent" => Some(NOTIFICATION_EVENT),
            "assistanceAccessibility" => Some(ASSISTANCE_ACCESSIBILITY),
            "assistanceNavigationGuidance" => Some(ASSISTANCE_NAVIGATION_GUIDANCE),
            "assistanceSonification" => Some(ASSISTANCE_SONIFICATION),
            "game" => Some(GAME),
            "assistant" => Some(ASSISTANT),
            _ => {
                tracing::warn!(name, "unknown audio attributes usage type");
                None
            }
        }
    }
}

/// Audio attribute content type codes.
pub mod content_type {
    /// Content unknown.
    pub const UNKNOWN: i32 = 0;
    /// Speech.
    pub const SPEECH: i32 = 1;
    /// Music.
    pub const MUSIC: i32 = 2;
    /// Movie soundtrack.
    pub const MOVIE: i32 = 3;
    /// Sonification (UI sounds).
    pub const SONIFICATION: i32 = 4;

    /// Looks up a content type by wire name.
    pub fn from_name(name: &str) -> Option<i32> {
        match name {
            "unknown" => Some(UNKNOWN),
            "speech" => Some(SPEECH),
            "music" => Some(MUSIC),
            "movie" => Some(MOVIE),
            "sonification" => Some(SONIFICATION),
            _ => {
                tracing::warn!(name, "unknown audio attributes content type");
                None
            }
        }
    }
}
