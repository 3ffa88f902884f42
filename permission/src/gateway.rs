use futures::future::try_join_all;
use permgate_status::dedup;

use crate::{
    BatchResult, Capability, LocationAccuracy, NotificationOption, NotificationsResult,
    Permission, PermissionStatus, Result,
};

/// Uniform permission operations over a platform [`Capability`].
///
/// Batch operations collapse duplicate permissions so that each distinct
/// permission is evaluated once. If any evaluation fails, the whole batch
/// fails and no partial result is returned.
#[derive(Debug, Clone, Default)]
pub struct Gateway<C> {
    capability: C,
}

impl<C: Capability> Gateway<C> {
    /// Create a gateway over the given capability.
    #[must_use]
    pub const fn new(capability: C) -> Self {
        Self { capability }
    }

    /// The capability this gateway delegates to.
    #[must_use]
    pub const fn capability(&self) -> &C {
        &self.capability
    }

    /// Consume the gateway, returning its capability.
    #[must_use]
    pub fn into_inner(self) -> C {
        self.capability
    }

    /// Open the system settings page for this app.
    ///
    /// # Errors
    /// Returns [`PermissionError::PlatformUnsupported`](crate::PermissionError::PlatformUnsupported)
    /// if the platform has no settings surface.
    pub async fn open_settings(&self) -> Result<()> {
        self.capability.open_system_settings().await
    }

    /// Check the current status of a permission without requesting it.
    ///
    /// Permissions the platform does not know resolve to
    /// [`PermissionStatus::Unavailable`].
    ///
    /// # Errors
    /// Returns [`PermissionError::CapabilityFailure`](crate::PermissionError::CapabilityFailure)
    /// if the platform call fails.
    pub async fn check(&self, permission: Permission) -> Result<PermissionStatus> {
        if !self.capability.supports(permission) {
            log::trace!("{permission} is not supported on this platform");
            return Ok(PermissionStatus::Unavailable);
        }
        let status = self.capability.query(permission).await?;
        log::trace!("checked {permission}: {status}");
        Ok(status)
    }

    /// Request a permission from the user.
    ///
    /// If the permission can no longer be prompted for, this returns the
    /// current status without showing a prompt.
    ///
    /// # Errors
    /// Returns [`PermissionError::CapabilityFailure`](crate::PermissionError::CapabilityFailure)
    /// if the platform call fails.
    pub async fn request(&self, permission: Permission) -> Result<PermissionStatus> {
        if !self.capability.supports(permission) {
            log::trace!("{permission} is not supported on this platform");
            return Ok(PermissionStatus::Unavailable);
        }
        let status = self.capability.prompt(permission).await?;
        log::trace!("requested {permission}: {status}");
        Ok(status)
    }

    /// Check the notification status and per-feature settings.
    ///
    /// # Errors
    /// Returns [`PermissionError::CapabilityFailure`](crate::PermissionError::CapabilityFailure)
    /// if the platform call fails.
    pub async fn check_notifications(&self) -> Result<NotificationsResult> {
        self.capability.query_notifications().await
    }

    /// Request permission to show notifications.
    ///
    /// On platforms where notifications cannot be enabled from the app this
    /// is the same as [`Gateway::check_notifications`].
    ///
    /// # Errors
    /// Returns [`PermissionError::CapabilityFailure`](crate::PermissionError::CapabilityFailure)
    /// if the platform call fails.
    pub async fn request_notifications(&self) -> Result<NotificationsResult> {
        self.capability.prompt_notifications().await
    }

    /// Request permission to show notifications with specific features.
    ///
    /// An empty `options` list behaves like [`Gateway::request_notifications`].
    ///
    /// # Errors
    /// Returns [`PermissionError::CapabilityFailure`](crate::PermissionError::CapabilityFailure)
    /// if the platform call fails.
    pub async fn request_notifications_with(
        &self,
        options: &[NotificationOption],
    ) -> Result<NotificationsResult> {
        let options = dedup(options.iter().copied());
        if options.is_empty() {
            return self.capability.prompt_notifications().await;
        }
        self.capability.prompt_notifications_with(&options).await
    }

    /// Check the location accuracy granted to the app.
    ///
    /// # Errors
    /// Returns [`PermissionError::PlatformUnsupported`](crate::PermissionError::PlatformUnsupported)
    /// on platforms without reduced accuracy.
    pub async fn check_location_accuracy(&self) -> Result<LocationAccuracy> {
        self.capability.query_location_accuracy().await
    }

    /// Request temporary full location accuracy.
    ///
    /// # Errors
    /// Returns [`PermissionError::PlatformUnsupported`](crate::PermissionError::PlatformUnsupported)
    /// on platforms without reduced accuracy.
    pub async fn request_location_accuracy(&self, purpose_key: &str) -> Result<LocationAccuracy> {
        self.capability.prompt_location_accuracy(purpose_key).await
    }

    /// Check several permissions at once.
    ///
    /// Distinct permissions are checked concurrently.
    ///
    /// # Errors
    /// Returns the first error raised by any check.
    pub async fn check_multiple<I>(&self, permissions: I) -> Result<BatchResult>
    where
        I: IntoIterator<Item = Permission>,
    {
        let permissions = dedup(permissions);
        log::debug!("checking {} permissions", permissions.len());

        let statuses = try_join_all(permissions.iter().map(|&permission| self.check(permission)))
            .await
            .inspect_err(|e| log::warn!("batch check aborted: {e}"))?;
        log::debug!("checked {} permissions", statuses.len());

        Ok(permissions.into_iter().zip(statuses).collect())
    }

    /// Request several permissions.
    ///
    /// Distinct permissions are requested one after another, in the order of
    /// their first occurrence. A prompt is fully resolved before the next
    /// one is shown, since platforms cannot display overlapping dialogs.
    ///
    /// # Errors
    /// Returns the first error raised by any request. Prompts answered before
    /// the failure keep their effect.
    pub async fn request_multiple<I>(&self, permissions: I) -> Result<BatchResult>
    where
        I: IntoIterator<Item = Permission>,
    {
        let permissions = dedup(permissions);
        log::debug!("requesting {} permissions", permissions.len());

        let mut result = BatchResult::with_capacity(permissions.len());
        for permission in permissions {
            let status = self
                .request(permission)
                .await
                .inspect_err(|e| log::warn!("batch request aborted at {permission}: {e}"))?;
            result.insert(permission, status);
        }
        log::debug!("requested {} permissions", result.len());
        Ok(result)
    }
}
