use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use permgate_permission::{
    Capability, Gateway, LocationAccuracy, NotificationOption, NotificationSetting,
    NotificationSettings, NotificationsResult, Permission, PermissionError, PermissionStatus,
    Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    QueryStart(Permission),
    QueryEnd(Permission),
    PromptStart(Permission),
    PromptEnd(Permission),
    QueryNotifications,
    OpenSettings,
}

/// Capability stub that records every call and yields once inside each
/// permission evaluation so interleaving is observable.
#[derive(Debug, Default)]
struct Stub {
    statuses: HashMap<Permission, PermissionStatus>,
    after_prompt: HashMap<Permission, PermissionStatus>,
    failing: HashSet<Permission>,
    unsupported: HashSet<Permission>,
    has_settings: bool,
    calls: Mutex<Vec<Call>>,
}

impl Stub {
    fn new() -> Self {
        Self::default()
    }

    fn status(mut self, permission: Permission, status: PermissionStatus) -> Self {
        self.statuses.insert(permission, status);
        self
    }

    fn grants_on_prompt(mut self, permission: Permission) -> Self {
        self.after_prompt
            .insert(permission, PermissionStatus::Granted);
        self
    }

    fn failing(mut self, permission: Permission) -> Self {
        self.failing.insert(permission);
        self
    }

    fn unsupported(mut self, permission: Permission) -> Self {
        self.unsupported.insert(permission);
        self
    }

    fn with_settings_surface(mut self) -> Self {
        self.has_settings = true;
        self
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|call| matches(call)).count()
    }

    fn outcome(&self, permission: Permission) -> Result<PermissionStatus> {
        if self.failing.contains(&permission) {
            return Err(PermissionError::CapabilityFailure(format!(
                "{permission} lookup failed"
            )));
        }
        Ok(self
            .statuses
            .get(&permission)
            .copied()
            .unwrap_or(PermissionStatus::Denied))
    }
}

impl Capability for Stub {
    async fn open_system_settings(&self) -> Result<()> {
        self.record(Call::OpenSettings);
        if self.has_settings {
            Ok(())
        } else {
            Err(PermissionError::PlatformUnsupported)
        }
    }

    async fn query(&self, permission: Permission) -> Result<PermissionStatus> {
        self.record(Call::QueryStart(permission));
        tokio::task::yield_now().await;
        self.record(Call::QueryEnd(permission));
        self.outcome(permission)
    }

    async fn prompt(&self, permission: Permission) -> Result<PermissionStatus> {
        self.record(Call::PromptStart(permission));
        tokio::task::yield_now().await;
        self.record(Call::PromptEnd(permission));
        let status = self.outcome(permission)?;
        Ok(self.after_prompt.get(&permission).copied().unwrap_or(status))
    }

    async fn query_notifications(&self) -> Result<NotificationsResult> {
        self.record(Call::QueryNotifications);
        Ok(NotificationsResult::aggregate(PermissionStatus::Blocked))
    }

    fn supports(&self, permission: Permission) -> bool {
        !self.unsupported.contains(&permission)
    }
}

fn camera_and_microphone() -> Gateway<Stub> {
    Gateway::new(
        Stub::new()
            .status(Permission::Camera, PermissionStatus::Granted)
            .status(Permission::Microphone, PermissionStatus::Denied),
    )
}

#[tokio::test]
async fn check_multiple_collapses_duplicates() {
    let gateway = camera_and_microphone();

    let result = gateway
        .check_multiple([Permission::Camera, Permission::Camera, Permission::Microphone])
        .await
        .unwrap();

    assert_eq!(
        result,
        HashMap::from([
            (Permission::Camera, PermissionStatus::Granted),
            (Permission::Microphone, PermissionStatus::Denied),
        ])
    );
    let queries = gateway
        .capability()
        .count(|call| matches!(call, Call::QueryStart(_)));
    assert_eq!(queries, 2);
}

#[tokio::test]
async fn check_multiple_queries_concurrently() {
    let gateway = camera_and_microphone();

    gateway
        .check_multiple([Permission::Camera, Permission::Microphone])
        .await
        .unwrap();

    // Both queries are in flight before either finishes
    assert_eq!(
        gateway.capability().calls(),
        vec![
            Call::QueryStart(Permission::Camera),
            Call::QueryStart(Permission::Microphone),
            Call::QueryEnd(Permission::Camera),
            Call::QueryEnd(Permission::Microphone),
        ]
    );
}

#[tokio::test]
async fn request_multiple_collapses_duplicates() {
    let gateway = camera_and_microphone();

    let result = gateway
        .request_multiple([Permission::Camera, Permission::Camera, Permission::Microphone])
        .await
        .unwrap();

    assert_eq!(
        result,
        HashMap::from([
            (Permission::Camera, PermissionStatus::Granted),
            (Permission::Microphone, PermissionStatus::Denied),
        ])
    );
}

#[tokio::test]
async fn request_multiple_prompts_one_at_a_time_in_first_occurrence_order() {
    let gateway = camera_and_microphone();

    gateway
        .request_multiple([
            Permission::Microphone,
            Permission::Camera,
            Permission::Microphone,
            Permission::Location,
            Permission::Camera,
        ])
        .await
        .unwrap();

    assert_eq!(
        gateway.capability().calls(),
        vec![
            Call::PromptStart(Permission::Microphone),
            Call::PromptEnd(Permission::Microphone),
            Call::PromptStart(Permission::Camera),
            Call::PromptEnd(Permission::Camera),
            Call::PromptStart(Permission::Location),
            Call::PromptEnd(Permission::Location),
        ]
    );
}

#[tokio::test]
async fn batch_keys_match_distinct_input() {
    let input = [
        Permission::Photos,
        Permission::Contacts,
        Permission::Photos,
        Permission::Calendar,
        Permission::Contacts,
        Permission::Photos,
    ];
    let distinct: HashSet<_> = input.iter().copied().collect();
    let gateway = Gateway::new(Stub::new());

    let checked = gateway.check_multiple(input).await.unwrap();
    let requested = gateway.request_multiple(input).await.unwrap();

    assert_eq!(checked.keys().copied().collect::<HashSet<_>>(), distinct);
    assert_eq!(requested.keys().copied().collect::<HashSet<_>>(), distinct);
    assert_eq!(
        gateway
            .capability()
            .count(|call| matches!(call, Call::QueryStart(_))),
        distinct.len()
    );
    assert_eq!(
        gateway
            .capability()
            .count(|call| matches!(call, Call::PromptStart(_))),
        distinct.len()
    );
}

#[tokio::test]
async fn empty_batch_makes_no_calls() {
    let gateway = Gateway::new(Stub::new());

    assert!(gateway.check_multiple([]).await.unwrap().is_empty());
    assert!(gateway.request_multiple([]).await.unwrap().is_empty());
    assert!(gateway.capability().calls().is_empty());
}

#[tokio::test]
async fn check_multiple_fails_as_a_whole() {
    let gateway = Gateway::new(
        Stub::new()
            .status(Permission::Camera, PermissionStatus::Granted)
            .failing(Permission::Microphone),
    );

    let err = gateway
        .check_multiple([Permission::Camera, Permission::Microphone])
        .await
        .unwrap_err();

    assert_eq!(
        err,
        PermissionError::CapabilityFailure("microphone lookup failed".into())
    );
}

#[tokio::test]
async fn request_multiple_stops_at_first_failure() {
    let gateway = Gateway::new(
        Stub::new()
            .status(Permission::Camera, PermissionStatus::Granted)
            .failing(Permission::Microphone),
    );

    let result = gateway
        .request_multiple([
            Permission::Camera,
            Permission::Microphone,
            Permission::Location,
        ])
        .await;

    assert!(matches!(
        result,
        Err(PermissionError::CapabilityFailure(_))
    ));
    // The prompt already shown for the camera stays shown; location is never asked
    assert_eq!(
        gateway.capability().calls(),
        vec![
            Call::PromptStart(Permission::Camera),
            Call::PromptEnd(Permission::Camera),
            Call::PromptStart(Permission::Microphone),
            Call::PromptEnd(Permission::Microphone),
        ]
    );
}

#[tokio::test]
async fn check_never_prompts() {
    let gateway = camera_and_microphone();

    gateway.check(Permission::Camera).await.unwrap();
    gateway
        .check_multiple([Permission::Camera, Permission::Microphone])
        .await
        .unwrap();

    assert_eq!(
        gateway
            .capability()
            .count(|call| matches!(call, Call::PromptStart(_) | Call::PromptEnd(_))),
        0
    );
}

#[tokio::test]
async fn check_is_idempotent() {
    let gateway = camera_and_microphone();

    let first = gateway.check(Permission::Microphone).await.unwrap();
    let second = gateway.check(Permission::Microphone).await.unwrap();

    assert_eq!(first, PermissionStatus::Denied);
    assert_eq!(first, second);
}

#[tokio::test]
async fn request_can_grant_a_denied_permission() {
    let gateway = Gateway::new(
        Stub::new()
            .status(Permission::Microphone, PermissionStatus::Denied)
            .grants_on_prompt(Permission::Microphone),
    );

    assert_eq!(
        gateway.check(Permission::Microphone).await.unwrap(),
        PermissionStatus::Denied
    );
    assert_eq!(
        gateway.request(Permission::Microphone).await.unwrap(),
        PermissionStatus::Granted
    );
    assert_eq!(
        gateway
            .capability()
            .count(|call| matches!(call, Call::PromptStart(_))),
        1
    );
}

#[tokio::test]
async fn request_of_blocked_permission_returns_current_status() {
    let gateway = Gateway::new(Stub::new().status(Permission::Camera, PermissionStatus::Blocked));

    assert_eq!(
        gateway.request(Permission::Camera).await.unwrap(),
        PermissionStatus::Blocked
    );
}

#[tokio::test]
async fn unsupported_permissions_are_unavailable_without_calls() {
    let gateway = Gateway::new(
        Stub::new()
            .status(Permission::Camera, PermissionStatus::Granted)
            .unsupported(Permission::Motion),
    );

    assert_eq!(
        gateway.check(Permission::Motion).await.unwrap(),
        PermissionStatus::Unavailable
    );
    assert_eq!(
        gateway.request(Permission::Motion).await.unwrap(),
        PermissionStatus::Unavailable
    );
    assert!(gateway.capability().calls().is_empty());

    let result = gateway
        .check_multiple([Permission::Motion, Permission::Camera])
        .await
        .unwrap();
    assert_eq!(result[&Permission::Motion], PermissionStatus::Unavailable);
    assert_eq!(result[&Permission::Camera], PermissionStatus::Granted);
}

#[tokio::test]
async fn check_failure_is_surfaced() {
    let gateway = Gateway::new(Stub::new().failing(Permission::Camera));

    assert!(matches!(
        gateway.check(Permission::Camera).await,
        Err(PermissionError::CapabilityFailure(_))
    ));
}

#[tokio::test]
async fn request_notifications_without_request_path_matches_check() {
    let gateway = Gateway::new(Stub::new());

    let checked = gateway.check_notifications().await.unwrap();
    let requested = gateway.request_notifications().await.unwrap();

    assert_eq!(checked, requested);
    assert!(requested.settings.is_empty());
    assert_eq!(
        gateway.capability().calls(),
        vec![Call::QueryNotifications, Call::QueryNotifications]
    );
}

#[tokio::test]
async fn open_settings_is_delegated() {
    let unsupported = Gateway::new(Stub::new());
    assert_eq!(
        unsupported.open_settings().await,
        Err(PermissionError::PlatformUnsupported)
    );

    let supported = Gateway::new(Stub::new().with_settings_surface());
    assert_eq!(supported.open_settings().await, Ok(()));
    assert_eq!(supported.capability().calls(), vec![Call::OpenSettings]);
}

#[tokio::test]
async fn location_accuracy_is_unsupported_by_default() {
    let gateway = Gateway::new(Stub::new());

    assert_eq!(
        gateway.check_location_accuracy().await,
        Err(PermissionError::PlatformUnsupported)
    );
    assert_eq!(
        gateway.request_location_accuracy("Navigation").await,
        Err(PermissionError::PlatformUnsupported)
    );
}

/// Capability with per-feature notification prompts and reduced location
/// accuracy.
#[derive(Debug, Default)]
struct Promptable {
    requested_options: Mutex<Vec<NotificationOption>>,
    option_prompts: AtomicUsize,
}

impl Capability for Promptable {
    async fn open_system_settings(&self) -> Result<()> {
        Ok(())
    }

    async fn query(&self, _permission: Permission) -> Result<PermissionStatus> {
        Ok(PermissionStatus::Denied)
    }

    async fn prompt(&self, _permission: Permission) -> Result<PermissionStatus> {
        Ok(PermissionStatus::Granted)
    }

    async fn query_notifications(&self) -> Result<NotificationsResult> {
        Ok(NotificationsResult::aggregate(PermissionStatus::Denied))
    }

    async fn prompt_notifications(&self) -> Result<NotificationsResult> {
        Ok(NotificationsResult::aggregate(PermissionStatus::Granted))
    }

    async fn prompt_notifications_with(
        &self,
        options: &[NotificationOption],
    ) -> Result<NotificationsResult> {
        self.option_prompts.fetch_add(1, Ordering::SeqCst);
        self.requested_options
            .lock()
            .unwrap()
            .extend_from_slice(options);
        let settings: NotificationSettings = options
            .iter()
            .map(|&option| (option, NotificationSetting::Enabled))
            .collect();
        Ok(NotificationsResult::new(PermissionStatus::Granted, settings))
    }

    async fn query_location_accuracy(&self) -> Result<LocationAccuracy> {
        Ok(LocationAccuracy::Reduced)
    }

    async fn prompt_location_accuracy(&self, _purpose_key: &str) -> Result<LocationAccuracy> {
        Ok(LocationAccuracy::Full)
    }
}

#[tokio::test]
async fn request_notifications_with_collapses_duplicate_options() {
    let gateway = Gateway::new(Promptable::default());

    let result = gateway
        .request_notifications_with(&[
            NotificationOption::Sound,
            NotificationOption::Alert,
            NotificationOption::Sound,
        ])
        .await
        .unwrap();

    assert_eq!(result.status, PermissionStatus::Granted);
    assert_eq!(result.settings.len(), 2);
    assert_eq!(
        *gateway.capability().requested_options.lock().unwrap(),
        vec![NotificationOption::Sound, NotificationOption::Alert]
    );
}

#[tokio::test]
async fn request_notifications_with_no_options_uses_default_prompt() {
    let gateway = Gateway::new(Promptable::default());

    let result = gateway.request_notifications_with(&[]).await.unwrap();

    assert_eq!(result.status, PermissionStatus::Granted);
    assert!(result.settings.is_empty());
    assert_eq!(gateway.capability().option_prompts.load(Ordering::SeqCst), 0);
    assert!(gateway.capability().requested_options.lock().unwrap().is_empty());
}

#[tokio::test]
async fn request_notifications_uses_distinct_request_path() {
    let gateway = Gateway::new(Promptable::default());

    let checked = gateway.check_notifications().await.unwrap();
    let requested = gateway.request_notifications().await.unwrap();

    assert_eq!(checked.status, PermissionStatus::Denied);
    assert_eq!(requested.status, PermissionStatus::Granted);
}

#[tokio::test]
async fn location_accuracy_is_delegated() {
    let gateway = Gateway::new(Promptable::default());

    assert_eq!(
        gateway.check_location_accuracy().await,
        Ok(LocationAccuracy::Reduced)
    );
    assert_eq!(
        gateway.request_location_accuracy("Navigation").await,
        Ok(LocationAccuracy::Full)
    );
}
