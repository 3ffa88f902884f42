//! Notification settings returned by notification checks.

use std::collections::BTreeMap;

use crate::PermissionStatus;

/// A notification feature the platform may report on or be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum NotificationOption {
    /// Banners and alerts.
    Alert,
    /// App icon badge.
    Badge,
    /// Notification sound.
    Sound,
    /// Display on the lock screen.
    Lockscreen,
    /// Display in the notification center.
    NotificationCenter,
    /// Display in CarPlay.
    CarPlay,
    /// Critical alerts that bypass do-not-disturb.
    CriticalAlert,
    /// Quiet delivery without an explicit prompt.
    Provisional,
    /// In-app notification settings button.
    ProvidesAppSettings,
}

/// Tri-state value of a single notification feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NotificationSetting {
    /// The feature is enabled.
    Enabled,
    /// The feature is disabled.
    Disabled,
    /// The platform has no such feature.
    NotSupported,
}

impl From<bool> for NotificationSetting {
    fn from(enabled: bool) -> Self {
        if enabled { Self::Enabled } else { Self::Disabled }
    }
}

/// Per-feature notification settings.
///
/// Empty when the platform only reports an aggregate notification status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NotificationSettings(BTreeMap<NotificationOption, NotificationSetting>);

impl NotificationSettings {
    /// Create empty settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value of a feature.
    #[must_use]
    pub fn with(mut self, option: NotificationOption, setting: NotificationSetting) -> Self {
        self.insert(option, setting);
        self
    }

    /// Set the value of a feature, returning the previous value.
    pub fn insert(
        &mut self,
        option: NotificationOption,
        setting: NotificationSetting,
    ) -> Option<NotificationSetting> {
        self.0.insert(option, setting)
    }

    /// Value of a feature, if the platform reported it.
    #[must_use]
    pub fn get(&self, option: NotificationOption) -> Option<NotificationSetting> {
        self.0.get(&option).copied()
    }

    /// Whether no feature was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of reported features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over reported features in option order.
    pub fn iter(&self) -> impl Iterator<Item = (NotificationOption, NotificationSetting)> + '_ {
        self.0.iter().map(|(option, setting)| (*option, *setting))
    }
}

impl FromIterator<(NotificationOption, NotificationSetting)> for NotificationSettings {
    fn from_iter<I: IntoIterator<Item = (NotificationOption, NotificationSetting)>>(
        iter: I,
    ) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Outcome of a notifications check or request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NotificationsResult {
    /// Status of notifications as a whole.
    pub status: PermissionStatus,
    /// Per-feature settings, empty on aggregate-only platforms.
    pub settings: NotificationSettings,
}

impl NotificationsResult {
    /// Create a result with per-feature settings.
    #[must_use]
    pub const fn new(status: PermissionStatus, settings: NotificationSettings) -> Self {
        Self { status, settings }
    }

    /// Create a result for a platform that only reports an aggregate status.
    #[must_use]
    pub fn aggregate(status: PermissionStatus) -> Self {
        Self::new(status, NotificationSettings::new())
    }
}
