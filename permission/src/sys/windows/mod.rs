//! Windows permission implementation using WinRT.
//!
//! Device permissions are read through app capability access checks. The
//! toast notifier only reports an aggregate setting, and a disabled
//! notifier cannot be re-enabled from the app.

use windows::Foundation::Uri;
use windows::Security::Authorization::AppCapabilityAccess::{
    AppCapability, AppCapabilityAccessStatus,
};
use windows::System::Launcher;
use windows::UI::Notifications::{NotificationSetting as ToastSetting, ToastNotificationManager};
use windows::core::HSTRING;

use crate::{
    Capability, NotificationsResult, Permission, PermissionError, PermissionStatus, Result,
};

const SETTINGS_URI: &str = "ms-settings:privacy";

/// Capability backed by WinRT.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformCapability;

impl Capability for PlatformCapability {
    async fn open_system_settings(&self) -> Result<()> {
        let uri = Uri::CreateUri(&HSTRING::from(SETTINGS_URI)).map_err(failure("CreateUri"))?;
        let launched = Launcher::LaunchUriAsync(&uri)
            .and_then(|op| op.get())
            .map_err(failure("LaunchUriAsync"))?;

        if launched {
            Ok(())
        } else {
            Err(PermissionError::CapabilityFailure(
                "settings app refused to launch".into(),
            ))
        }
    }

    async fn query(&self, permission: Permission) -> Result<PermissionStatus> {
        let Some(capability) = app_capability(permission)? else {
            // Most permissions are implicit on Windows
            return Ok(PermissionStatus::Granted);
        };
        let status = capability.CheckAccess().map_err(failure("CheckAccess"))?;
        Ok(status_from_access(status))
    }

    async fn prompt(&self, permission: Permission) -> Result<PermissionStatus> {
        let Some(capability) = app_capability(permission)? else {
            return Ok(PermissionStatus::Granted);
        };
        // Returns immediately without a dialog once the user has decided
        let status = capability
            .RequestAccessAsync()
            .and_then(|op| op.get())
            .map_err(failure("RequestAccessAsync"))?;
        Ok(status_from_access(status))
    }

    async fn query_notifications(&self) -> Result<NotificationsResult> {
        let setting = ToastNotificationManager::CreateToastNotifier()
            .and_then(|notifier| notifier.Setting())
            .map_err(failure("toast notifier"))?;

        Ok(NotificationsResult::aggregate(status_from_toast(setting)))
    }

    fn supports(&self, permission: Permission) -> bool {
        !matches!(
            permission,
            Permission::LocationAlways
                | Permission::Reminders
                | Permission::Motion
                | Permission::SpeechRecognition
        )
    }
}

/// Name of the capability declared in the app manifest, if the permission
/// is gated on Windows at all.
const fn capability_name(permission: Permission) -> Option<&'static str> {
    match permission {
        Permission::Camera => Some("webcam"),
        Permission::Microphone => Some("microphone"),
        Permission::Location => Some("location"),
        Permission::Contacts => Some("contacts"),
        Permission::Calendar => Some("appointments"),
        Permission::Bluetooth => Some("bluetooth"),
        Permission::Photos => Some("picturesLibrary"),
        Permission::MediaLibrary => Some("musicLibrary"),
        _ => None,
    }
}

fn app_capability(permission: Permission) -> Result<Option<AppCapability>> {
    capability_name(permission)
        .map(|name| AppCapability::Create(&HSTRING::from(name)).map_err(failure("AppCapability")))
        .transpose()
}

const fn status_from_access(status: AppCapabilityAccessStatus) -> PermissionStatus {
    match status {
        AppCapabilityAccessStatus::Allowed => PermissionStatus::Granted,
        AppCapabilityAccessStatus::UserPromptRequired => PermissionStatus::Denied,
        AppCapabilityAccessStatus::NotDeclaredByApp => PermissionStatus::Unavailable,
        // Denied by the user, by the system or by policy
        _ => PermissionStatus::Blocked,
    }
}

/// A notifier disabled by the user, group policy or the manifest can only be
/// re-enabled outside the app.
const fn status_from_toast(setting: ToastSetting) -> PermissionStatus {
    match setting {
        ToastSetting::Enabled => PermissionStatus::Granted,
        _ => PermissionStatus::Blocked,
    }
}

fn failure(call: &'static str) -> impl Fn(windows::core::Error) -> PermissionError {
    move |e| {
        log::error!("{call} failed: {e}");
        PermissionError::CapabilityFailure(format!("{call}: {e}"))
    }
}
