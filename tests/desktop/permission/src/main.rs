//! Desktop test binary for permgate-permission.
//!
//! Run with: cargo run -p permgate-permission-test

use permgate_permission::{Permission, PermissionStatus};

#[tokio::main]
async fn main() {
    println!("=== Permgate Permission Test ===\n");

    let gateway = permgate_permission::platform();
    let wanted = [
        Permission::Camera,
        Permission::Microphone,
        Permission::Location,
        Permission::Camera,
    ];

    println!("Checking {} permissions...", wanted.len());
    let statuses = match gateway.check_multiple(wanted).await {
        Ok(statuses) => statuses,
        Err(e) => {
            println!("✗ Check failed: {e}");
            return;
        }
    };
    for (permission, status) in &statuses {
        println!("  {permission:<12} {status}");
    }

    let pending: Vec<_> = wanted
        .into_iter()
        .filter(|p| statuses.get(p) == Some(&PermissionStatus::Denied))
        .collect();
    if !pending.is_empty() {
        println!("\nRequesting {} permissions...", pending.len());
        match gateway.request_multiple(pending).await {
            Ok(results) => {
                for (permission, status) in &results {
                    println!("  {permission:<12} {status}");
                }
            }
            Err(e) => println!("✗ Request failed: {e}"),
        }
    }

    println!("\nChecking notifications...");
    match gateway.check_notifications().await {
        Ok(result) => {
            println!("  status: {}", result.status);
            for (option, setting) in result.settings.iter() {
                println!("  {option:?}: {setting:?}");
            }
        }
        Err(e) => println!("✗ Notification check failed: {e}"),
    }

    if statuses.values().any(|s| *s == PermissionStatus::Blocked) {
        println!("\nSome permissions are blocked, opening settings...");
        if let Err(e) = gateway.open_settings().await {
            println!("✗ Could not open settings: {e}");
        }
    }
}
