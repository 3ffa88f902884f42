//! Linux permission implementation.
//!
//! On Linux, most permissions are handled at the system level via:
//! - File permissions (camera/microphone devices in /dev)
//! - Desktop portal systems (Flatpak/Snap sandboxing)
//! - User groups (e.g., 'video' group for camera access)
//!
//! Applications cannot prompt at runtime, so a request reports the same
//! status as a check. Notifications go through the freedesktop
//! notification server on the session bus.

use zbus::Connection;

use crate::{
    Capability, NotificationOption, NotificationSetting, NotificationSettings,
    NotificationsResult, Permission, PermissionError, PermissionStatus, Result,
};

const NOTIFICATIONS_BUS: &str = "org.freedesktop.Notifications";
const NOTIFICATIONS_PATH: &str = "/org/freedesktop/Notifications";
const NOTIFICATIONS_IFACE: &str = "org.freedesktop.Notifications";
const SERVICE_UNKNOWN: &str = "org.freedesktop.DBus.Error.ServiceUnknown";

/// Capability backed by the Linux desktop.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformCapability;

impl Capability for PlatformCapability {
    async fn open_system_settings(&self) -> Result<()> {
        // No desktop-independent settings surface
        Err(PermissionError::PlatformUnsupported)
    }

    async fn query(&self, _permission: Permission) -> Result<PermissionStatus> {
        // Applications typically have access unless sandboxed
        Ok(PermissionStatus::Granted)
    }

    async fn prompt(&self, permission: Permission) -> Result<PermissionStatus> {
        self.query(permission).await
    }

    async fn query_notifications(&self) -> Result<NotificationsResult> {
        let conn = Connection::session().await.map_err(|e| {
            log::error!("session bus unavailable: {e}");
            PermissionError::CapabilityFailure(format!("session bus: {e}"))
        })?;

        let reply = conn
            .call_method(
                Some(NOTIFICATIONS_BUS),
                NOTIFICATIONS_PATH,
                Some(NOTIFICATIONS_IFACE),
                "GetCapabilities",
                &(),
            )
            .await;

        notifications_from_reply(reply)
    }

    fn supports(&self, permission: Permission) -> bool {
        !matches!(
            permission,
            Permission::Motion
                | Permission::Reminders
                | Permission::SpeechRecognition
                | Permission::MediaLibrary
        )
    }
}

fn notifications_from_reply(reply: zbus::Result<zbus::Message>) -> Result<NotificationsResult> {
    let reply = match reply {
        Ok(reply) => reply,
        Err(zbus::Error::MethodError(name, _, _)) if name.as_str() == SERVICE_UNKNOWN => {
            log::warn!("no notification server on the session bus");
            return Ok(NotificationsResult::aggregate(PermissionStatus::Unavailable));
        }
        Err(e) => {
            log::error!("GetCapabilities failed: {e}");
            return Err(PermissionError::CapabilityFailure(format!(
                "GetCapabilities: {e}"
            )));
        }
    };

    let capabilities: Vec<String> = reply.body().deserialize().map_err(|e| {
        log::error!("malformed GetCapabilities reply: {e}");
        PermissionError::CapabilityFailure(format!("GetCapabilities reply: {e}"))
    })?;

    Ok(NotificationsResult::new(
        PermissionStatus::Granted,
        settings_from_capabilities(&capabilities),
    ))
}

fn settings_from_capabilities(capabilities: &[String]) -> NotificationSettings {
    let has = |name: &str| {
        if capabilities.iter().any(|c| c == name) {
            NotificationSetting::Enabled
        } else {
            NotificationSetting::NotSupported
        }
    };

    NotificationSettings::new()
        .with(NotificationOption::Alert, has("body"))
        .with(NotificationOption::Sound, has("sound"))
        .with(NotificationOption::NotificationCenter, has("persistence"))
}
