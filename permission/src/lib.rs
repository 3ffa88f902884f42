//! Cross-platform permission checks and requests.
//!
//! This crate provides a unified API for checking and requesting runtime
//! permissions across iOS, macOS, Android, Windows, and Linux platforms.
//!
//! A [`Gateway`] wraps a [`Capability`], the object that talks to the
//! operating system. [`platform`] builds a gateway over the backend compiled
//! for the current target; tests and embedders can pass their own capability
//! to [`Gateway::new`].
//!
//! ```ignore
//! use permgate_permission::Permission;
//!
//! let gateway = permgate_permission::platform();
//! let statuses = gateway
//!     .request_multiple([Permission::Camera, Permission::Microphone])
//!     .await?;
//! ```

#![warn(missing_docs)]

mod capability;
mod gateway;

/// Platform-specific implementations.
pub mod sys;

pub use capability::Capability;
pub use gateway::Gateway;
pub use permgate_status::{
    BatchResult, LocationAccuracy, NotificationOption, NotificationSetting, NotificationSettings,
    NotificationsResult, Permission, PermissionStatus,
};

/// Errors that can occur when checking or requesting permissions.
///
/// A negative outcome such as [`PermissionStatus::Denied`] or
/// [`PermissionStatus::Unavailable`] is a status, not an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PermissionError {
    /// The operation has no meaning on this platform.
    #[error("operation not supported on this platform")]
    PlatformUnsupported,
    /// The underlying platform call failed.
    #[error("platform call failed: {0}")]
    CapabilityFailure(String),
}

/// Result type for permission operations.
pub type Result<T, E = PermissionError> = std::result::Result<T, E>;

/// Create a gateway backed by the current platform.
#[cfg(not(target_os = "android"))]
#[must_use]
pub fn platform() -> Gateway<sys::PlatformCapability> {
    Gateway::new(sys::PlatformCapability::default())
}

/// Create a gateway backed by the Android platform.
///
/// Android permission APIs need an Activity, so the gateway is bound to the
/// one given here.
///
/// # Errors
/// Returns [`PermissionError::CapabilityFailure`] if the embedded helper
/// cannot be loaded.
#[cfg(target_os = "android")]
pub fn platform(
    env: &mut jni::JNIEnv<'_>,
    activity: &jni::objects::JObject<'_>,
) -> Result<Gateway<sys::PlatformCapability>> {
    sys::PlatformCapability::new(env, activity).map(Gateway::new)
}
