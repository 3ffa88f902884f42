//! Permission identifiers and status values.
//!
//! This crate holds the data contract shared by every permgate backend:
//! the closed set of permissions, the closed set of statuses a permission
//! can resolve to, and the notification settings returned alongside a
//! notifications check. It performs no I/O.

#![warn(missing_docs)]

mod notification;

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

pub use notification::{
    NotificationOption, NotificationSetting, NotificationSettings, NotificationsResult,
};

/// Types of permissions that can be checked or requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Permission {
    /// Access to device camera.
    Camera,
    /// Access to device microphone.
    Microphone,
    /// Access to device location while the app is in use.
    Location,
    /// Access to device location at all times.
    LocationAlways,
    /// Access to photo library.
    Photos,
    /// Access to contacts.
    Contacts,
    /// Access to calendar.
    Calendar,
    /// Access to reminders.
    Reminders,
    /// Access to nearby Bluetooth devices.
    Bluetooth,
    /// Access to motion and fitness data.
    Motion,
    /// Access to speech recognition.
    SpeechRecognition,
    /// Access to the media library.
    MediaLibrary,
}

impl Permission {
    /// Every permission known to this crate.
    pub const ALL: [Self; 12] = [
        Self::Camera,
        Self::Microphone,
        Self::Location,
        Self::LocationAlways,
        Self::Photos,
        Self::Contacts,
        Self::Calendar,
        Self::Reminders,
        Self::Bluetooth,
        Self::Motion,
        Self::SpeechRecognition,
        Self::MediaLibrary,
    ];

    /// Stable identifier for this permission.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Camera => "camera",
            Self::Microphone => "microphone",
            Self::Location => "location",
            Self::LocationAlways => "location_always",
            Self::Photos => "photos",
            Self::Contacts => "contacts",
            Self::Calendar => "calendar",
            Self::Reminders => "reminders",
            Self::Bluetooth => "bluetooth",
            Self::Motion => "motion",
            Self::SpeechRecognition => "speech_recognition",
            Self::MediaLibrary => "media_library",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// The status of a permission at the time it was evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PermissionStatus {
    /// Permission has been granted by the user.
    Granted,
    /// Permission has not been granted but can still be requested.
    Denied,
    /// Permission has been denied and cannot be requested again.
    ///
    /// Only a change in the system settings can lift this state.
    Blocked,
    /// The feature behind this permission is not available on this device.
    Unavailable,
    /// Permission has been granted with restrictions (e.g. selected photos only).
    Limited,
}

impl PermissionStatus {
    /// Whether the protected feature can be used, fully or partially.
    #[must_use]
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted | Self::Limited)
    }

    /// Whether a request may still show a prompt.
    #[must_use]
    pub const fn is_requestable(self) -> bool {
        matches!(self, Self::Denied)
    }

    /// Stable identifier for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
            Self::Blocked => "blocked",
            Self::Unavailable => "unavailable",
            Self::Limited => "limited",
        }
    }
}

impl std::fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Location accuracy granted to the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LocationAccuracy {
    /// Precise location.
    Full,
    /// Approximate location.
    Reduced,
}

/// Status of every distinct permission in a batch, keyed by permission.
pub type BatchResult = HashMap<Permission, PermissionStatus>;

/// Remove duplicates from `items`, keeping the first occurrence of each value
/// in its original position.
///
/// ```
/// use permgate_status::{Permission, dedup};
///
/// let unique = dedup([Permission::Camera, Permission::Microphone, Permission::Camera]);
/// assert_eq!(unique, vec![Permission::Camera, Permission::Microphone]);
/// ```
pub fn dedup<T, I>(items: I) -> Vec<T>
where
    T: Copy + Eq + Hash,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(*item)).collect()
}
