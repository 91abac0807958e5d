//! User search over the list fetched once on mount.

use api::User;

pub const LOAD_FAILED: &str = "Failed to load users for search engine! Please refresh the page";

/// Users whose username or name contains `query`, ignoring case.
pub fn search_users<'a>(users: &'a [User], query: &str) -> Vec<&'a User> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    users
        .iter()
        .filter(|u| {
            u.username.to_lowercase().contains(&query) || u.name.to_lowercase().contains(&query)
        })
        .collect()
}
