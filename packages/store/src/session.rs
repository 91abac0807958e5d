//! # Session state and its persisted snapshot
//!
//! [`Session`] is the one piece of state shared between views: who is signed
//! in (or whether this is a guest), which tab is active and which profile is
//! being viewed. The UI holds it in a signal provided through the Dioxus
//! context.
//!
//! Across reloads only the login snapshot survives, through a
//! [`SessionStore`]. On startup the snapshot's `id` is used to fetch the full
//! user again; a failed fetch discards the snapshot.

use std::future::Future;

use api::{LoginUser, User};

use crate::profile;

/// The key the login snapshot is stored under.
pub const SNAPSHOT_KEY: &str = "user";

/// The persisted login snapshot: the `user` object of the login response.
pub type SessionSnapshot = LoginUser;

/// Top-level views reachable from the side panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tab {
    #[default]
    Home,
    Messages,
    Live,
    Leaderboard,
    Profile,
    Notifications,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::Home,
        Tab::Messages,
        Tab::Live,
        Tab::Leaderboard,
        Tab::Profile,
        Tab::Notifications,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Messages => "Messages",
            Tab::Live => "Live",
            Tab::Leaderboard => "Leaderboard",
            Tab::Profile => "Profile",
            Tab::Notifications => "Notifications",
        }
    }

    /// Tabs that need an account.
    pub fn requires_account(self) -> bool {
        matches!(self, Tab::Messages | Tab::Profile | Tab::Notifications)
    }
}

/// Root-held session state.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    pub guest: bool,
    pub tab: Tab,
    /// Another user's profile, when one is open.
    pub viewed_profile: Option<User>,
    pub show_login: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            user: None,
            guest: false,
            tab: Tab::Home,
            viewed_profile: None,
            show_login: true,
        }
    }
}

impl Session {
    pub fn is_guest(&self) -> bool {
        self.guest
    }

    /// Signed in with an account.
    pub fn is_member(&self) -> bool {
        self.user.is_some() && !self.guest
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }

    pub fn start(&mut self, user: User) {
        tracing::info!(username = %user.username, "session started");
        self.user = Some(user);
        self.guest = false;
        self.show_login = false;
    }

    pub fn start_guest(&mut self) {
        tracing::info!("guest session started");
        self.user = None;
        self.guest = true;
        self.show_login = false;
    }

    pub fn logout(&mut self) {
        *self = Session::default();
    }

    /// Switch tabs. Account-only tabs are refused for guests.
    pub fn select_tab(&mut self, tab: Tab) -> bool {
        if tab.requires_account() && !self.is_member() {
            return false;
        }
        if tab == Tab::Profile {
            self.viewed_profile = None;
        }
        self.tab = tab;
        true
    }

    /// Show `user`'s profile. The current user's own profile is shown as the
    /// editable own-profile view.
    pub fn open_profile(&mut self, user: User) {
        let own = self.user_id() == Some(user.id.as_str());
        self.viewed_profile = if own { None } else { Some(user) };
        self.tab = Tab::Profile;
    }

    /// A profile failed to load. The one on screen stays, else the user's own.
    /// Returns the single toast message to show for the failure.
    pub fn profile_open_failed(&mut self) -> &'static str {
        let kept = profile::after_failed_open(self.viewed_profile.take(), self.user.as_ref());
        self.viewed_profile = kept.filter(|u| Some(u.id.as_str()) != self.user_id());
        profile::LOAD_FAILED
    }

    /// The profile the profile tab shows: the viewed one, else the current
    /// user's.
    pub fn displayed_profile(&self) -> Option<&User> {
        self.viewed_profile.as_ref().or(self.user.as_ref())
    }

    pub fn is_own_profile(&self) -> bool {
        match (&self.viewed_profile, &self.user) {
            (None, Some(_)) => true,
            (Some(viewed), Some(me)) => viewed.id == me.id,
            _ => false,
        }
    }

    /// Replace the viewed profile with a fresher copy, or the session user if
    /// it is the user's own.
    pub fn refresh_profile(&mut self, user: User) {
        if self.user_id() == Some(user.id.as_str()) {
            self.user = Some(user);
        } else if self.viewed_profile.as_ref().map(|v| &v.id) == Some(&user.id) {
            self.viewed_profile = Some(user);
        }
    }

    /// The live chat panel is shown on every tab but messages.
    pub fn chat_visible(&self) -> bool {
        self.tab != Tab::Messages
    }
}

/// Persistence for the login snapshot.
///
/// Failures are swallowed: a store that cannot be read behaves as empty, and
/// the worst case is that the user has to log in again.
pub trait SessionStore {
    fn load(&self) -> impl Future<Output = Option<SessionSnapshot>>;
    fn save(&self, snapshot: &SessionSnapshot) -> impl Future<Output = ()>;
    fn clear(&self) -> impl Future<Output = ()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> User {
        User {
            id: id.into(),
            username: format!("{id}_name"),
            ..Default::default()
        }
    }

    #[test]
    fn test_guest_cannot_open_account_tabs() {
        let mut session = Session::default();
        session.start_guest();
        assert!(!session.select_tab(Tab::Messages));
        assert!(!session.select_tab(Tab::Profile));
        assert!(session.select_tab(Tab::Leaderboard));
        assert_eq!(session.tab, Tab::Leaderboard);
    }

    #[test]
    fn test_open_own_profile_clears_override() {
        let mut session = Session::default();
        session.start(user("u1"));
        session.open_profile(user("u2"));
        assert!(!session.is_own_profile());
        assert_eq!(session.displayed_profile().unwrap().id, "u2");

        session.open_profile(user("u1"));
        assert!(session.viewed_profile.is_none());
        assert!(session.is_own_profile());
        assert_eq!(session.displayed_profile().unwrap().id, "u1");
    }

    #[test]
    fn test_logout_resets_everything() {
        let mut session = Session::default();
        session.start(user("u1"));
        session.select_tab(Tab::Live);
        session.logout();
        assert_eq!(session, Session::default());
        assert!(session.show_login);
        assert_eq!(session.tab, Tab::Home);
    }

    #[test]
    fn test_chat_hidden_on_messages_only() {
        let mut session = Session::default();
        session.start(user("u1"));
        for tab in Tab::ALL {
            session.select_tab(tab);
            assert_eq!(session.chat_visible(), tab != Tab::Messages);
        }
    }

    #[test]
    fn test_failed_open_keeps_shown_profile() {
        let mut session = Session::default();
        session.start(user("u1"));
        session.open_profile(user("u2"));

        assert_eq!(session.profile_open_failed(), profile::LOAD_FAILED);
        assert_eq!(session.displayed_profile().unwrap().id, "u2");

        session.open_profile(user("u1"));
        session.profile_open_failed();
        assert!(session.viewed_profile.is_none());
        assert!(session.is_own_profile());
    }

    #[test]
    fn test_refresh_profile_targets_matching_user() {
        let mut session = Session::default();
        session.start(user("u1"));
        session.open_profile(user("u2"));

        let mut fresh = user("u2");
        fresh.followers.push(user("u1"));
        session.refresh_profile(fresh);
        assert!(session.viewed_profile.as_ref().unwrap().is_followed_by("u1"));

        // Unrelated users leave the session alone.
        session.refresh_profile(user("u3"));
        assert_eq!(session.viewed_profile.as_ref().unwrap().id, "u2");
    }
}
