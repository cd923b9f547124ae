//! Site header: navigation links gated by subscription, the reminder
//! notification panel and the profile menu.

use tracing::{debug, error};

use crate::{
    api::Api,
    host::Host,
    reminder::{load_reminders, Reminder},
    route::Route,
    session::AuthProvider,
    storage::KeyValueStore,
    user::Subscription,
};

pub const UPGRADE_REQUIRED: &str = "Vui lòng nâng cấp gói để sử dụng tính năng này!";
pub const NO_NOTIFICATIONS: &str = "Không có thông báo";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub route: Route,
    /// Requires a paid subscription to follow.
    pub gated: bool,
    /// Rendered as disabled. Styling only, the click handler still runs.
    pub disabled: bool,
}

const NAV_LINKS: &[(&str, Route, bool)] = &[
    ("Diễn Đàn", Route::Community, false),
    ("Đăng ký thông tin thai nhi", Route::CreateFetus, true),
    ("Dịch Vụ", Route::PackageList, false),
    ("Đặt Lịch", Route::Booking, true),
];

pub const PROFILE_LINKS: &[(&str, Route)] = &[
    ("Hồ sơ người dùng", Route::Profile),
    ("Hồ sơ sức khỏe", Route::ViewFetusHealth),
    ("Quản lý thông tin thai ", Route::ManagePregnancy),
    ("Quản lý thai kỳ", Route::ManagePreg),
];

pub const AUTH_LINKS: &[(&str, Route)] = &[("Đăng nhập", Route::Login), ("/Đăng Ký", Route::Register)];

/// Where a pointer-down landed, relative to the two header panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    NotificationPanel,
    ProfileMenu,
    Outside,
}

#[derive(Debug, Default)]
pub struct Header {
    subscription: Subscription,
    notifications_open: bool,
    profile_open: bool,
    reminders: Vec<Reminder>,
}

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads reminders and, with a session token, the subscription tier.
    /// A failed lookup is logged and keeps the current tier.
    pub async fn mount(&mut self, api: &dyn Api, auth: &dyn AuthProvider, store: &dyn KeyValueStore) {
        self.reminders = load_reminders(store);
        if auth.token().is_some() {
            match api.current_user().await {
                Ok(user) => self.set_subscription(user.subscription),
                Err(err) => error!(?err, "error fetching current user"),
            }
        }
    }

    fn set_subscription(&mut self, subscription: Subscription) {
        debug!(%subscription, "subscription updated");
        self.subscription = subscription;
    }

    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }

    /// The brand logo leads home.
    pub fn open_home(&self, host: &dyn Host) {
        host.navigate(Route::Home);
    }

    pub fn nav_links(&self) -> Vec<NavLink> {
        NAV_LINKS
            .iter()
            .map(|&(label, route, gated)| NavLink {
                label,
                route,
                gated,
                disabled: gated && self.subscription.is_free(),
            })
            .collect()
    }

    /// Follows a link that needs a paid subscription. The tier is looked up
    /// again on every click; a free tier gets a blocking alert instead of
    /// navigation. Returns whether navigation happened.
    pub async fn follow_gated(&mut self, route: Route, api: &dyn Api, host: &dyn Host) -> bool {
        let user = match api.current_user().await {
            Ok(user) => user,
            Err(err) => {
                error!(?err, "error fetching current user");
                return false;
            }
        };
        let allowed = !user.subscription.is_free();
        if allowed {
            host.navigate(route);
        } else {
            host.alert(UPGRADE_REQUIRED);
        }
        self.set_subscription(user.subscription);
        allowed
    }

    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    /// Count shown on the bell, absent when there is nothing to show.
    pub fn badge(&self) -> Option<usize> {
        Some(self.reminders.len()).filter(|it| *it > 0)
    }

    pub fn notification_items(&self) -> Vec<&str> {
        if self.reminders.is_empty() {
            vec![NO_NOTIFICATIONS]
        } else {
            self.reminders
                .iter()
                .map(|it| it.description.as_str())
                .collect()
        }
    }

    pub fn notifications_open(&self) -> bool {
        self.notifications_open
    }

    pub fn profile_open(&self) -> bool {
        self.profile_open
    }

    pub fn toggle_notifications(&mut self) {
        self.notifications_open = !self.notifications_open;
        self.profile_open = false;
    }

    /// The profile button only exists with a session.
    pub fn toggle_profile(&mut self, auth: &dyn AuthProvider) {
        if !auth.is_signed_in() {
            return;
        }
        self.profile_open = !self.profile_open;
        self.notifications_open = false;
    }

    /// Closes every panel whose bounds do not contain `target`.
    pub fn pointer_down(&mut self, target: PointerTarget) {
        if target != PointerTarget::ProfileMenu {
            self.profile_open = false;
        }
        if target != PointerTarget::NotificationPanel {
            self.notifications_open = false;
        }
    }

    /// Links of the account area: the profile menu with a session, login and
    /// registration otherwise.
    pub fn account_links(&self, auth: &dyn AuthProvider) -> &'static [(&'static str, Route)] {
        if auth.is_signed_in() {
            PROFILE_LINKS
        } else {
            AUTH_LINKS
        }
    }

    pub fn logout(&mut self, auth: &dyn AuthProvider, host: &dyn Host) {
        if let Err(err) = auth.logout() {
            error!(?err, "failed to clear session");
        }
        host.navigate(Route::Home);
        self.profile_open = false;
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use super::{Header, PointerTarget, AUTH_LINKS, NO_NOTIFICATIONS, PROFILE_LINKS, UPGRADE_REQUIRED};
    use crate::{
        route::Route,
        session::{AuthProvider, StoredSession},
        storage::{KeyValueStore, MemoryStore},
        testing::{FakeApi, HostEvent, RecordingHost},
    };

    fn signed_in() -> (Arc<MemoryStore>, StoredSession) {
        let store = Arc::new(MemoryStore::with_entries([
            ("token", "t0k3n"),
            ("user", r#"{"userId": "4"}"#),
            ("userId", "4"),
            ("reminders", r#"[{"id": 8, "description": "Khám thai"}]"#),
            ("reminder", "Uống sắt"),
        ]));
        let session = StoredSession::new(store.clone());
        (store, session)
    }

    #[tokio::test]
    async fn test_mount_reads_tier_and_reminders() {
        let (store, session) = signed_in();
        let api = FakeApi::new().with_subscription("Premium");
        let mut header = Header::new();
        assert!(header.nav_links().iter().filter(|it| it.disabled).count() == 2);

        header.mount(&api, &session, &*store).await;
        assert_eq!(header.subscription().as_str(), "Premium");
        assert!(header.nav_links().iter().all(|it| !it.disabled));
        assert_eq!(header.badge(), Some(2));
        assert_eq!(header.notification_items(), vec!["Khám thai", "Uống sắt"]);
    }

    #[tokio::test]
    async fn test_mount_failure_keeps_tier() {
        let (store, session) = signed_in();
        let api = FakeApi::new();
        api.fail_current_user();
        let mut header = Header::new();
        header.mount(&api, &session, &*store).await;
        assert!(header.subscription().is_free());
        let disabled: Vec<_> = header
            .nav_links()
            .into_iter()
            .filter(|it| it.disabled)
            .map(|it| it.route)
            .collect();
        assert_eq!(disabled, vec![Route::CreateFetus, Route::Booking]);
    }

    #[tokio::test]
    async fn test_mount_without_token_skips_lookup() {
        let store = MemoryStore::new();
        let session = StoredSession::new(Arc::new(MemoryStore::new()));
        let api = FakeApi::new().with_subscription("Premium");
        let mut header = Header::new();
        header.mount(&api, &session, &store).await;
        assert!(api.calls().is_empty());
        assert!(header.subscription().is_free());
        assert_eq!(header.badge(), None);
        assert_eq!(header.notification_items(), vec![NO_NOTIFICATIONS]);
    }

    #[tokio::test]
    async fn test_gated_links() {
        let api = FakeApi::new().with_subscription("Free");
        let host = RecordingHost::new();
        let mut header = Header::new();

        assert!(!header.follow_gated(Route::Booking, &api, &host).await);
        assert_eq!(host.events(), vec![HostEvent::Alert(UPGRADE_REQUIRED.to_owned())]);

        api.set_subscription("Premium");
        assert!(header.follow_gated(Route::Booking, &api, &host).await);
        assert_eq!(header.subscription().as_str(), "Premium");
        assert_eq!(host.events()[1], HostEvent::Navigate(Route::Booking));

        api.fail_current_user();
        assert!(!header.follow_gated(Route::CreateFetus, &api, &host).await);
        assert_eq!(host.events().len(), 2);
        assert_eq!(header.subscription().as_str(), "Premium");
        assert_eq!(api.calls(), vec!["current_user"; 3]);
    }

    #[test]
    fn test_panels_are_exclusive() {
        let (_, session) = signed_in();
        let mut header = Header::new();

        header.toggle_profile(&session);
        assert!(header.profile_open());
        header.toggle_notifications();
        assert!(header.notifications_open());
        assert!(!header.profile_open());
        header.toggle_profile(&session);
        assert!(header.profile_open());
        assert!(!header.notifications_open());
        header.toggle_profile(&session);
        assert!(!header.profile_open());
    }

    #[test]
    fn test_pointer_outside_closes() {
        let (_, session) = signed_in();
        let mut header = Header::new();

        header.toggle_notifications();
        header.pointer_down(PointerTarget::NotificationPanel);
        assert!(header.notifications_open());
        header.pointer_down(PointerTarget::Outside);
        assert!(!header.notifications_open());

        header.toggle_profile(&session);
        header.pointer_down(PointerTarget::ProfileMenu);
        assert!(header.profile_open());
        header.pointer_down(PointerTarget::NotificationPanel);
        assert!(!header.profile_open());
    }

    #[test]
    fn test_profile_needs_session() {
        let session = StoredSession::new(Arc::new(MemoryStore::new()));
        let mut header = Header::new();
        header.toggle_profile(&session);
        assert!(!header.profile_open());
        assert_eq!(header.account_links(&session), AUTH_LINKS);
    }

    #[test]
    fn test_logout() {
        let (store, session) = signed_in();
        let host = RecordingHost::new();
        let mut header = Header::new();
        assert_eq!(header.account_links(&session), PROFILE_LINKS);
        header.toggle_profile(&session);

        header.logout(&session, &host);
        assert!(!header.profile_open());
        assert!(!session.is_signed_in());
        assert_eq!(store.get("token").unwrap(), None);
        assert_eq!(host.events(), vec![HostEvent::Navigate(Route::Home)]);
        assert_eq!(header.account_links(&session), AUTH_LINKS);
    }

    #[test]
    fn test_logo_goes_home() {
        let host = RecordingHost::new();
        Header::new().open_home(&host);
        assert_eq!(host.events(), vec![HostEvent::Navigate(Route::Home)]);
    }
}
