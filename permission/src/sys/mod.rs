//! Platform-specific permission implementations.

#[cfg(any(target_os = "ios", target_os = "macos"))]
mod apple;

#[cfg(target_os = "android")]
mod android;

#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "linux")]
mod linux;

// Re-export platform implementations
#[cfg(any(target_os = "ios", target_os = "macos"))]
pub use apple::PlatformCapability;

#[cfg(target_os = "android")]
pub use android::PlatformCapability;

#[cfg(target_os = "windows")]
pub use windows::PlatformCapability;

#[cfg(target_os = "linux")]
pub use linux::PlatformCapability;

#[cfg(not(any(
    target_os = "ios",
    target_os = "macos",
    target_os = "android",
    target_os = "windows",
    target_os = "linux"
)))]
pub use fallback::PlatformCapability;

// Fallback for unsupported platforms: nothing is available
#[cfg(not(any(
    target_os = "ios",
    target_os = "macos",
    target_os = "android",
    target_os = "windows",
    target_os = "linux"
)))]
mod fallback {
    use crate::{
        Capability, NotificationsResult, Permission, PermissionError, PermissionStatus, Result,
    };

    /// Capability for targets without a permission model.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct PlatformCapability;

    impl Capability for PlatformCapability {
        async fn open_system_settings(&self) -> Result<()> {
            Err(PermissionError::PlatformUnsupported)
        }

        async fn query(&self, _permission: Permission) -> Result<PermissionStatus> {
            Ok(PermissionStatus::Unavailable)
        }

        async fn prompt(&self, _permission: Permission) -> Result<PermissionStatus> {
            Ok(PermissionStatus::Unavailable)
        }

        async fn query_notifications(&self) -> Result<NotificationsResult> {
            Ok(NotificationsResult::aggregate(PermissionStatus::Unavailable))
        }

        fn supports(&self, _permission: Permission) -> bool {
            false
        }
    }
}
