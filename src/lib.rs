//! # Permgate
//!
//! One permission contract for every platform.
//!
//! Native permission models differ: some platforms query and prompt per
//! permission, some only report an aggregate notification setting, some can
//! never prompt again once the user declined. Permgate normalizes all of
//! them into a closed set of statuses and a small set of operations,
//! including batch checks and requests that evaluate each distinct
//! permission exactly once.
//!
//! ## Features
//!
//! - `status`: permission identifiers, statuses and notification settings.
//! - `permission`: the permission gateway and the platform backends.
//! - `serde`: `Serialize`/`Deserialize` for every data type.
//!
//! Use the `full` feature to enable everything.
//!
//! ## Example
//!
//! ```toml
//! [dependencies]
//! permgate = { version = "0.1", features = ["permission"] }
//! ```
//!
//! ```ignore
//! use permgate::permission::{self, Permission};
//!
//! async fn ask() -> permission::Result<()> {
//!     let gateway = permission::platform();
//!     let statuses = gateway
//!         .request_multiple([Permission::Camera, Permission::Microphone])
//!         .await?;
//!     for (permission, status) in statuses {
//!         println!("{permission}: {status}");
//!     }
//!     Ok(())
//! }
//! ```

#[cfg(feature = "status")]
pub use permgate_status as status;

#[cfg(feature = "permission")]
pub use permgate_permission as permission;
