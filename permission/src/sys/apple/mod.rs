//! Apple platform (iOS/macOS) permission implementation using swift-bridge.

use crate::{
    Capability, LocationAccuracy, NotificationOption, NotificationSetting, NotificationSettings,
    NotificationsResult, Permission, PermissionError, PermissionStatus, Result,
};

#[swift_bridge::bridge]
mod ffi {
    // Shared enums bridged between Rust and Swift
    enum PermissionType {
        Camera,
        Microphone,
        Location,
        LocationAlways,
        Photos,
        Contacts,
        Calendar,
        Reminders,
        Bluetooth,
        Motion,
        SpeechRecognition,
        MediaLibrary,
    }

    enum PermissionResult {
        NotDetermined,
        Restricted,
        Denied,
        Authorized,
        Limited,
        Unavailable,
    }

    enum NotificationFeature {
        Alert,
        Badge,
        Sound,
        Lockscreen,
        NotificationCenter,
        CarPlay,
        CriticalAlert,
        Provisional,
        ProvidesAppSettings,
    }

    enum FeatureSetting {
        Enabled,
        Disabled,
        NotSupported,
    }

    enum AccuracyResult {
        Full,
        Reduced,
        Unavailable,
    }

    extern "Swift" {
        fn open_settings() -> bool;
        fn check_permission(permission: PermissionType) -> PermissionResult;
        fn request_permission(permission: PermissionType) -> PermissionResult;
        fn check_notifications() -> PermissionResult;
        fn notification_setting(feature: NotificationFeature) -> FeatureSetting;
        fn request_notifications(
            alert: bool,
            badge: bool,
            sound: bool,
            critical_alert: bool,
            car_play: bool,
            provisional: bool,
            provides_app_settings: bool,
        ) -> PermissionResult;
        fn check_location_accuracy() -> AccuracyResult;
        fn request_location_accuracy(purpose_key: &str) -> AccuracyResult;
    }
}

const DEFAULT_NOTIFICATION_OPTIONS: [NotificationOption; 3] = [
    NotificationOption::Alert,
    NotificationOption::Badge,
    NotificationOption::Sound,
];

const REPORTED_FEATURES: [NotificationOption; 8] = [
    NotificationOption::Alert,
    NotificationOption::Badge,
    NotificationOption::Sound,
    NotificationOption::Lockscreen,
    NotificationOption::NotificationCenter,
    NotificationOption::CarPlay,
    NotificationOption::CriticalAlert,
    NotificationOption::ProvidesAppSettings,
];

/// Capability backed by the Apple frameworks.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformCapability;

impl Capability for PlatformCapability {
    async fn open_system_settings(&self) -> Result<()> {
        if ffi::open_settings() {
            Ok(())
        } else {
            log::error!("failed to open the settings app");
            Err(PermissionError::CapabilityFailure(
                "settings URL could not be opened".into(),
            ))
        }
    }

    async fn query(&self, permission: Permission) -> Result<PermissionStatus> {
        let result = ffi::check_permission(permission_to_ffi(permission));
        Ok(status_from_ffi(result))
    }

    async fn prompt(&self, permission: Permission) -> Result<PermissionStatus> {
        // The system answers without a dialog once the user has decided
        let result = ffi::request_permission(permission_to_ffi(permission));
        Ok(status_from_ffi(result))
    }

    async fn query_notifications(&self) -> Result<NotificationsResult> {
        let status = status_from_ffi(ffi::check_notifications());
        Ok(NotificationsResult::new(status, current_settings()))
    }

    async fn prompt_notifications(&self) -> Result<NotificationsResult> {
        self.prompt_notifications_with(&DEFAULT_NOTIFICATION_OPTIONS)
            .await
    }

    async fn prompt_notifications_with(
        &self,
        options: &[NotificationOption],
    ) -> Result<NotificationsResult> {
        let wants = |option| options.contains(&option);
        let result = ffi::request_notifications(
            wants(NotificationOption::Alert),
            wants(NotificationOption::Badge),
            wants(NotificationOption::Sound),
            wants(NotificationOption::CriticalAlert),
            wants(NotificationOption::CarPlay),
            wants(NotificationOption::Provisional),
            wants(NotificationOption::ProvidesAppSettings),
        );
        Ok(NotificationsResult::new(
            status_from_ffi(result),
            current_settings(),
        ))
    }

    async fn query_location_accuracy(&self) -> Result<LocationAccuracy> {
        accuracy_from_ffi(ffi::check_location_accuracy())
    }

    async fn prompt_location_accuracy(&self, purpose_key: &str) -> Result<LocationAccuracy> {
        accuracy_from_ffi(ffi::request_location_accuracy(purpose_key))
    }
}

fn current_settings() -> NotificationSettings {
    REPORTED_FEATURES
        .into_iter()
        .map(|option| {
            let setting = match ffi::notification_setting(feature_to_ffi(option)) {
                ffi::FeatureSetting::Enabled => NotificationSetting::Enabled,
                ffi::FeatureSetting::Disabled => NotificationSetting::Disabled,
                ffi::FeatureSetting::NotSupported => NotificationSetting::NotSupported,
            };
            (option, setting)
        })
        .collect()
}

const fn permission_to_ffi(permission: Permission) -> ffi::PermissionType {
    match permission {
        Permission::Camera => ffi::PermissionType::Camera,
        Permission::Microphone => ffi::PermissionType::Microphone,
        Permission::Location => ffi::PermissionType::Location,
        Permission::LocationAlways => ffi::PermissionType::LocationAlways,
        Permission::Photos => ffi::PermissionType::Photos,
        Permission::Contacts => ffi::PermissionType::Contacts,
        Permission::Calendar => ffi::PermissionType::Calendar,
        Permission::Reminders => ffi::PermissionType::Reminders,
        Permission::Bluetooth => ffi::PermissionType::Bluetooth,
        Permission::Motion => ffi::PermissionType::Motion,
        Permission::SpeechRecognition => ffi::PermissionType::SpeechRecognition,
        Permission::MediaLibrary => ffi::PermissionType::MediaLibrary,
    }
}

const fn feature_to_ffi(option: NotificationOption) -> ffi::NotificationFeature {
    match option {
        NotificationOption::Alert => ffi::NotificationFeature::Alert,
        NotificationOption::Badge => ffi::NotificationFeature::Badge,
        NotificationOption::Sound => ffi::NotificationFeature::Sound,
        NotificationOption::Lockscreen => ffi::NotificationFeature::Lockscreen,
        NotificationOption::NotificationCenter => ffi::NotificationFeature::NotificationCenter,
        NotificationOption::CarPlay => ffi::NotificationFeature::CarPlay,
        NotificationOption::CriticalAlert => ffi::NotificationFeature::CriticalAlert,
        NotificationOption::Provisional => ffi::NotificationFeature::Provisional,
        NotificationOption::ProvidesAppSettings => ffi::NotificationFeature::ProvidesAppSettings,
    }
}

/// A user who declined once can only change their mind in Settings, so
/// Apple's `denied` is reported as blocked and `notDetermined` as denied.
const fn status_from_ffi(result: ffi::PermissionResult) -> PermissionStatus {
    match result {
        ffi::PermissionResult::NotDetermined => PermissionStatus::Denied,
        ffi::PermissionResult::Restricted | ffi::PermissionResult::Denied => {
            PermissionStatus::Blocked
        }
        ffi::PermissionResult::Authorized => PermissionStatus::Granted,
        ffi::PermissionResult::Limited => PermissionStatus::Limited,
        ffi::PermissionResult::Unavailable => PermissionStatus::Unavailable,
    }
}

const fn accuracy_from_ffi(result: ffi::AccuracyResult) -> Result<LocationAccuracy> {
    match result {
        ffi::AccuracyResult::Full => Ok(LocationAccuracy::Full),
        ffi::AccuracyResult::Reduced => Ok(LocationAccuracy::Reduced),
        ffi::AccuracyResult::Unavailable => Err(PermissionError::PlatformUnsupported),
    }
}
