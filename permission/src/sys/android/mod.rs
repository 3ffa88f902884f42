//! Android permission implementation using JNI.
//!
//! Permission checks and prompts run in `PermissionHelper`, a Kotlin class
//! compiled to DEX at build time and loaded through the Activity's class
//! loader. Requests block the calling thread until the user answers, so the
//! gateway must not be driven from the UI thread.

use jni::objects::{GlobalRef, JClass, JObject, JValue};
use jni::sys::jint;
use jni::{JNIEnv, JavaVM};

use crate::{
    Capability, NotificationsResult, Permission, PermissionError, PermissionStatus, Result,
};

/// Embedded DEX bytecode containing PermissionHelper class.
/// Generated at build time by kotlinc + D8.
static DEX_BYTES: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/classes.dex"));

const HELPER_CLASS: &str = "permgate.permission.PermissionHelper";

const SIG_ACTIVITY: &str = "(Landroid/app/Activity;)I";
const SIG_ACTIVITY_INT: &str = "(Landroid/app/Activity;I)I";

/// Status constants (must match Kotlin). Anything else, including 0, is unavailable.
const STATUS_DENIED: jint = 1;
const STATUS_BLOCKED: jint = 2;
const STATUS_GRANTED: jint = 3;
const STATUS_LIMITED: jint = 4;

/// Permission codes (must match Kotlin).
const fn permission_to_jint(permission: Permission) -> jint {
    match permission {
        Permission::Camera => 0,
        Permission::Microphone => 1,
        Permission::Location => 2,
        Permission::LocationAlways => 3,
        Permission::Photos => 4,
        Permission::Contacts => 5,
        Permission::Calendar => 6,
        Permission::Reminders => 7,
        Permission::Bluetooth => 8,
        Permission::Motion => 9,
        Permission::SpeechRecognition => 10,
        Permission::MediaLibrary => 11,
    }
}

const fn status_from_jint(status: jint) -> PermissionStatus {
    match status {
        STATUS_GRANTED => PermissionStatus::Granted,
        STATUS_DENIED => PermissionStatus::Denied,
        STATUS_BLOCKED => PermissionStatus::Blocked,
        STATUS_LIMITED => PermissionStatus::Limited,
        _ => PermissionStatus::Unavailable,
    }
}

fn jni_failure(call: &str) -> impl Fn(jni::errors::Error) -> PermissionError + '_ {
    move |e| PermissionError::CapabilityFailure(format!("{call}: {e}"))
}

/// Capability bound to an Android Activity.
pub struct PlatformCapability {
    vm: JavaVM,
    activity: GlobalRef,
    helper: GlobalRef,
}

impl std::fmt::Debug for PlatformCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformCapability").finish_non_exhaustive()
    }
}

impl PlatformCapability {
    /// Load the embedded helper and bind to `activity`.
    ///
    /// # Errors
    /// Returns [`PermissionError::CapabilityFailure`] if the helper DEX
    /// cannot be written or loaded.
    pub fn new(env: &mut JNIEnv<'_>, activity: &JObject<'_>) -> Result<Self> {
        let vm = env.get_java_vm().map_err(jni_failure("get_java_vm"))?;
        let helper = load_helper(env, activity)?;
        let activity = env
            .new_global_ref(activity)
            .map_err(jni_failure("new_global_ref"))?;

        Ok(Self {
            vm,
            activity,
            helper,
        })
    }

    fn call_helper(&self, method: &str, argument: Option<jint>) -> Result<jint> {
        let mut env = self
            .vm
            .attach_current_thread()
            .map_err(jni_failure("attach_current_thread"))?;

        let class: &JClass<'_> = self.helper.as_obj().into();
        let activity = JValue::Object(self.activity.as_obj());
        let result = match argument {
            Some(value) => env.call_static_method(
                class,
                method,
                SIG_ACTIVITY_INT,
                &[activity, JValue::Int(value)],
            ),
            None => env.call_static_method(class, method, SIG_ACTIVITY, &[activity]),
        };

        result.and_then(|value| value.i()).map_err(|e| {
            log::error!("PermissionHelper.{method} failed: {e}");
            if env.exception_check().unwrap_or(false) {
                let _ = env.exception_clear();
            }
            PermissionError::CapabilityFailure(format!("{method}: {e}"))
        })
    }
}

impl Capability for PlatformCapability {
    async fn open_system_settings(&self) -> Result<()> {
        match self.call_helper("openSettings", None)? {
            0 => Err(PermissionError::CapabilityFailure(
                "no activity handles the settings intent".into(),
            )),
            _ => Ok(()),
        }
    }

    async fn query(&self, permission: Permission) -> Result<PermissionStatus> {
        self.call_helper("checkPermission", Some(permission_to_jint(permission)))
            .map(status_from_jint)
    }

    async fn prompt(&self, permission: Permission) -> Result<PermissionStatus> {
        self.call_helper("requestPermission", Some(permission_to_jint(permission)))
            .map(status_from_jint)
    }

    async fn query_notifications(&self) -> Result<NotificationsResult> {
        let status = self.call_helper("checkNotifications", None)?;
        Ok(NotificationsResult::aggregate(status_from_jint(status)))
    }

    async fn prompt_notifications(&self) -> Result<NotificationsResult> {
        let status = self.call_helper("requestNotifications", None)?;
        Ok(NotificationsResult::aggregate(status_from_jint(status)))
    }

    fn supports(&self, permission: Permission) -> bool {
        !matches!(
            permission,
            Permission::Reminders | Permission::SpeechRecognition
        )
    }
}

/// Write the embedded DEX to the cache directory and load the helper class.
fn load_helper(env: &mut JNIEnv<'_>, activity: &JObject<'_>) -> Result<GlobalRef> {
    let cache_dir = env
        .call_method(activity, "getCacheDir", "()Ljava/io/File;", &[])
        .and_then(|v| v.l())
        .map_err(jni_failure("getCacheDir"))?;

    let cache_path = env
        .call_method(&cache_dir, "getAbsolutePath", "()Ljava/lang/String;", &[])
        .and_then(|v| v.l())
        .map_err(jni_failure("getAbsolutePath"))?;

    let cache_path_str: String = env
        .get_string((&cache_path).into())
        .map_err(jni_failure("get_string"))?
        .into();
    let dex_path = format!("{cache_path_str}/permgate_permission.dex");

    std::fs::write(&dex_path, DEX_BYTES).map_err(|e| {
        log::error!("failed to write helper DEX to {dex_path}: {e}");
        PermissionError::CapabilityFailure(format!("write DEX: {e}"))
    })?;

    let dex_path_jstring = env
        .new_string(&dex_path)
        .map_err(jni_failure("new_string"))?;

    let parent_loader = env
        .call_method(activity, "getClassLoader", "()Ljava/lang/ClassLoader;", &[])
        .and_then(|v| v.l())
        .map_err(jni_failure("getClassLoader"))?;

    let class_loader = env
        .new_object(
            "dalvik/system/DexClassLoader",
            "(Ljava/lang/String;Ljava/lang/String;Ljava/lang/String;Ljava/lang/ClassLoader;)V",
            &[
                JValue::Object(&dex_path_jstring),
                JValue::Object(&cache_path),
                JValue::Object(&JObject::null()),
                JValue::Object(&parent_loader),
            ],
        )
        .map_err(jni_failure("new DexClassLoader"))?;

    let helper_class_name = env
        .new_string(HELPER_CLASS)
        .map_err(jni_failure("new_string"))?;

    let helper_class = env
        .call_method(
            &class_loader,
            "loadClass",
            "(Ljava/lang/String;)Ljava/lang/Class;",
            &[JValue::Object(&helper_class_name)],
        )
        .and_then(|v| v.l())
        .map_err(jni_failure("loadClass"))?;

    log::debug!("loaded {HELPER_CLASS} from {dex_path}");
    env.new_global_ref(helper_class)
        .map_err(jni_failure("new_global_ref"))
}
