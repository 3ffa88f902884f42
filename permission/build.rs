//! Build script for permgate-permission.
//!
//! Handles platform-specific code generation:
//! - Apple: Swift bridge generation
//! - Android: Kotlin → DEX compilation
//!
//! Build scripts run on the host, so the target is read from
//! `CARGO_CFG_TARGET_OS` rather than `cfg!`.

use std::{env, path::PathBuf, process::Command};

fn main() {
    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap();

    // Apple platforms: generate Swift bridge
    if target_os == "ios" || target_os == "macos" {
        build_apple();
    }

    // Android: compile Kotlin to DEX
    if target_os == "android" {
        build_android();
    }
}

fn build_apple() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let bridges = vec!["src/sys/apple/mod.rs"];
    for bridge in &bridges {
        println!("cargo:rerun-if-changed={bridge}");
    }

    swift_bridge_build::parse_bridges(bridges)
        .write_all_concatenated(out_dir, env!("CARGO_PKG_NAME"));
}

fn build_android() {
    const KOTLIN_FILE_RELATIVE_PATH: &str = "src/sys/android/PermissionHelper.kt";

    println!("cargo:rerun-if-changed={KOTLIN_FILE_RELATIVE_PATH}");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let kotlin_file =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap()).join(KOTLIN_FILE_RELATIVE_PATH);

    let android_jar_path = android_build::android_jar(None).expect("Failed to find android.jar");

    // Compile .kt -> .class using kotlinc
    let classes_dir = out_dir.join("classes");
    std::fs::create_dir_all(&classes_dir).expect("Failed to create classes directory");

    let kotlinc_status = Command::new("kotlinc")
        .arg("-classpath")
        .arg(&android_jar_path)
        .arg("-d")
        .arg(&classes_dir)
        .arg(&kotlin_file)
        .status()
        .expect("Failed to run kotlinc - is Kotlin compiler installed?");

    assert!(kotlinc_status.success(), "kotlinc compilation failed");

    // PermissionHelper plus its nested request fragment
    let package_dir = classes_dir.join("permgate").join("permission");
    let class_files: Vec<PathBuf> = std::fs::read_dir(&package_dir)
        .expect("Failed to read compiled classes")
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "class"))
        .collect();

    let d8_jar_path = android_build::android_d8_jar(None).expect("Failed to find d8.jar");

    // Convert .class -> .dex using D8
    let mut d8 = android_build::JavaRun::new();
    d8.class_path(d8_jar_path)
        .main_class("com.android.tools.r8.D8")
        .arg("--classpath")
        .arg(android_jar_path)
        .arg("--output")
        .arg(&out_dir);
    for class_file in &class_files {
        d8.arg(class_file);
    }

    assert!(
        d8.run()
            .expect("failed to acquire exit status for java d8.jar invocation")
            .success(),
        "D8 dexing failed"
    );
}
