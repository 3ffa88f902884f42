use std::future::{self, Future};

use crate::{
    LocationAccuracy, NotificationOption, NotificationsResult, Permission, PermissionError,
    PermissionStatus, Result,
};

/// Access to the operating system's permission facilities.
///
/// Implementations map native statuses onto [`PermissionStatus`]. A native
/// call that fails returns [`PermissionError::CapabilityFailure`]; a
/// permission the platform does not know resolves to
/// [`PermissionStatus::Unavailable`] or is reported through
/// [`Capability::supports`].
pub trait Capability: Send + Sync {
    /// Open the system settings page for this app.
    ///
    /// # Errors
    /// Returns [`PermissionError::PlatformUnsupported`] if the platform has
    /// no settings surface.
    fn open_system_settings(&self) -> impl Future<Output = Result<()>> + Send;

    /// Read the current status of a permission without prompting.
    ///
    /// # Errors
    /// Returns [`PermissionError::CapabilityFailure`] if the native call fails.
    fn query(
        &self,
        permission: Permission,
    ) -> impl Future<Output = Result<PermissionStatus>> + Send;

    /// Prompt the user for a permission and return the resulting status.
    ///
    /// Platforms that cannot prompt again return the current status.
    ///
    /// # Errors
    /// Returns [`PermissionError::CapabilityFailure`] if the native call fails.
    fn prompt(
        &self,
        permission: Permission,
    ) -> impl Future<Output = Result<PermissionStatus>> + Send;

    /// Read the notification status and per-feature settings.
    ///
    /// # Errors
    /// Returns [`PermissionError::CapabilityFailure`] if the native call fails.
    fn query_notifications(&self) -> impl Future<Output = Result<NotificationsResult>> + Send;

    /// Prompt the user to allow notifications.
    ///
    /// Defaults to [`Capability::query_notifications`] for platforms where
    /// notifications cannot be enabled from the app.
    ///
    /// # Errors
    /// Returns [`PermissionError::CapabilityFailure`] if the native call fails.
    fn prompt_notifications(&self) -> impl Future<Output = Result<NotificationsResult>> + Send {
        self.query_notifications()
    }

    /// Prompt the user to allow the given notification features.
    ///
    /// Defaults to [`Capability::prompt_notifications`], ignoring `options`.
    ///
    /// # Errors
    /// Returns [`PermissionError::CapabilityFailure`] if the native call fails.
    fn prompt_notifications_with(
        &self,
        options: &[NotificationOption],
    ) -> impl Future<Output = Result<NotificationsResult>> + Send {
        let _ = options;
        self.prompt_notifications()
    }

    /// Read the location accuracy granted to the app.
    ///
    /// # Errors
    /// Returns [`PermissionError::PlatformUnsupported`] unless overridden.
    fn query_location_accuracy(&self) -> impl Future<Output = Result<LocationAccuracy>> + Send {
        future::ready(Err(PermissionError::PlatformUnsupported))
    }

    /// Ask for temporary full location accuracy.
    ///
    /// `purpose_key` names the usage description shown to the user.
    ///
    /// # Errors
    /// Returns [`PermissionError::PlatformUnsupported`] unless overridden.
    fn prompt_location_accuracy(
        &self,
        purpose_key: &str,
    ) -> impl Future<Output = Result<LocationAccuracy>> + Send {
        let _ = purpose_key;
        future::ready(Err(PermissionError::PlatformUnsupported))
    }

    /// Whether the platform knows this permission at all.
    fn supports(&self, permission: Permission) -> bool {
        let _ = permission;
        true
    }
}
