//! Profile view state: sub-tabs, follow state and load failures.

use api::User;

pub const LOAD_FAILED: &str = "Failed to load profile!";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProfileTab {
    #[default]
    Posts,
    Followers,
    Following,
}

impl ProfileTab {
    pub const ALL: [ProfileTab; 3] = [ProfileTab::Posts, ProfileTab::Followers, ProfileTab::Following];

    pub fn label(self) -> &'static str {
        match self {
            ProfileTab::Posts => "Posts",
            ProfileTab::Followers => "Followers",
            ProfileTab::Following => "Following",
        }
    }
}

/// Follow state, derived from the viewed profile's followers each render.
pub fn is_following(profile: &User, current_user_id: Option<&str>) -> bool {
    current_user_id.is_some_and(|id| profile.is_followed_by(id))
}

/// The profile to keep showing after a failed open: the one already on
/// screen, else the current user's.
pub fn after_failed_open(previous: Option<User>, current: Option<&User>) -> Option<User> {
    previous.or_else(|| current.cloned())
}

/// The follower or following list for a sub-tab.
pub fn people(profile: &User, tab: ProfileTab) -> &[User] {
    match tab {
        ProfileTab::Followers => &profile.followers,
        ProfileTab::Following => &profile.following,
        ProfileTab::Posts => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> User {
        User {
            id: id.into(),
            username: id.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_follow_state_from_followers() {
        let mut bo = user("bo");
        assert!(!is_following(&bo, Some("ann")));
        bo.followers.push(user("ann"));
        assert!(is_following(&bo, Some("ann")));
        assert!(!is_following(&bo, None));
        assert_eq!(people(&bo, ProfileTab::Followers).len(), 1);
        assert!(people(&bo, ProfileTab::Following).is_empty());
    }

    #[test]
    fn test_failed_open_keeps_previous_then_self() {
        let me = user("ann");
        assert_eq!(after_failed_open(Some(user("bo")), Some(&me)).unwrap().id, "bo");
        assert_eq!(after_failed_open(None, Some(&me)).unwrap().id, "ann");
        assert!(after_failed_open(None, None).is_none());
    }
}
