//! Audio output device model.

use std::fmt;

/// Category of an audio output endpoint.
///
/// The routing engine detects physical devices and groups them into this
/// closed set of kinds. Selection requests address a kind rather than a
/// specific physical device; when several devices of a kind are present,
/// the first one in detection order wins.
///
/// # Example
///
/// ```
/// use route_audio::DeviceKind;
///
/// assert_eq!(DeviceKind::from_type_name("speaker"), Some(DeviceKind::Speakerphone));
/// assert_eq!(DeviceKind::BluetoothHeadset.type_name(), "bluetooth");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    /// A Bluetooth headset or earbuds.
    BluetoothHeadset,
    /// A wired headset plugged into the jack or USB port.
    WiredHeadset,
    /// The device's built-in loudspeaker.
    Speakerphone,
    /// The device's built-in earpiece.
    Earpiece,
}

impl DeviceKind {
    /// Returns the wire identifier used by bridge callers for this kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::BluetoothHeadset => "bluetooth",
            Self::WiredHeadset => "headset",
            Self::Speakerphone => "speaker",
            Self::Earpiece => "earpiece",
        }
    }

    /// Parses a wire identifier back into a kind.
    ///
    /// Returns `None` for unrecognized names.
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "bluetooth" => Some(Self::BluetoothHeadset),
            "headset" => Some(Self::WiredHeadset),
            "speaker" => Some(Self::Speakerphone),
            "earpiece" => Some(Self::Earpiece),
            _ => None,
        }
    }

    /// Default routing priority, highest preference first.
    pub fn default_priority() -> Vec<DeviceKind> {
        vec![
            Self::BluetoothHeadset,
            Self::WiredHeadset,
            Self::Speakerphone,
            Self::Earpiece,
        ]
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A named audio output endpoint of one [`DeviceKind`].
///
/// The name is informational (shown in device pickers); routing identity is
/// the kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    /// Which category this endpoint belongs to.
    pub kind: DeviceKind,
    /// Human-readable endpoint name as reported by the platform.
    pub name: String,
}

impl Device {
    /// Creates a device of the given kind.
    pub fn new(kind: DeviceKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}
