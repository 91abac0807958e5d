//! Leaderboard ranking: top-5 slices with positional badges.

use api::{Post, RankedUser};

/// Entries shown per list.
pub const TOP_N: usize = 5;

pub const LOAD_FAILED: &str = "Failed to load leaderboards. Please try again later.";

/// What a list is ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Likes,
    Retruths,
    Followers,
    Contributions,
    Posts,
}

impl Metric {
    pub fn title(self) -> &'static str {
        match self {
            Metric::Likes => "Most Liked Posts",
            Metric::Retruths => "Most Retruthed Posts",
            Metric::Followers => "Most Followers",
            Metric::Contributions => "Most Contributions",
            Metric::Posts => "Most Posts",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Metric::Likes => "likes",
            Metric::Retruths => "retruths",
            Metric::Followers => "followers",
            Metric::Contributions => "contributions",
            Metric::Posts => "posts",
        }
    }

    /// Value of a post row. User metrics read as zero.
    pub fn post_value(self, post: &Post) -> usize {
        match self {
            Metric::Likes => post.likes.len(),
            Metric::Retruths => post.retruths.len(),
            _ => 0,
        }
    }

    /// Value of a user row. Post metrics read as zero.
    pub fn user_value(self, entry: &RankedUser) -> u64 {
        match self {
            Metric::Followers => entry.user.followers.len() as u64,
            Metric::Contributions => entry.post_count + entry.comment_count,
            Metric::Posts => entry.post_count,
            _ => 0,
        }
    }
}

/// Badge for a rank position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankBadge {
    pub label: String,
    /// `gold`, `silver` or `bronze` for the podium.
    pub tier: Option<&'static str>,
}

impl RankBadge {
    pub fn for_index(index: usize) -> Self {
        match index {
            0 => Self::podium("🥇", "gold"),
            1 => Self::podium("🥈", "silver"),
            2 => Self::podium("🥉", "bronze"),
            n => Self {
                label: format!("{}º", n + 1),
                tier: None,
            },
        }
    }

    fn podium(label: &str, tier: &'static str) -> Self {
        Self {
            label: label.to_string(),
            tier: Some(tier),
        }
    }
}

/// Top entries paired with their badge, in server order.
pub fn ranked<T>(items: &[T]) -> Vec<(RankBadge, &T)> {
    items
        .iter()
        .take(TOP_N)
        .enumerate()
        .map(|(i, item)| (RankBadge::for_index(i), item))
        .collect()
}

/// The five lists, each empty until loaded or when its fetch failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Leaderboards {
    pub most_liked: Vec<Post>,
    pub most_retruthed: Vec<Post>,
    pub most_followers: Vec<RankedUser>,
    pub most_contributions: Vec<RankedUser>,
    pub most_posts: Vec<RankedUser>,
    /// Number of lists whose fetch failed.
    pub failures: usize,
}

impl Leaderboards {
    /// Keep a fetched list, or count the failure and leave it empty.
    pub fn take<T, E: std::fmt::Display>(
        &mut self,
        metric: Metric,
        result: Result<Vec<T>, E>,
    ) -> Vec<T> {
        match result {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(list = metric.title(), "leaderboard fetch failed: {e}");
                self.failures += 1;
                Vec::new()
            }
        }
    }

    /// At most one toast, however many lists failed.
    pub fn failure_toast(&self) -> Option<&'static str> {
        (self.failures > 0).then_some(LOAD_FAILED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::User;

    fn post(id: &str, likes: usize) -> Post {
        Post {
            id: id.into(),
            likes: (0..likes)
                .map(|i| User {
                    id: format!("u{i}"),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_badges_follow_position() {
        let labels: Vec<_> = (0..5).map(|i| RankBadge::for_index(i).label).collect();
        assert_eq!(labels, ["🥇", "🥈", "🥉", "4º", "5º"]);
        assert_eq!(RankBadge::for_index(0).tier, Some("gold"));
        assert_eq!(RankBadge::for_index(2).tier, Some("bronze"));
        assert_eq!(RankBadge::for_index(3).tier, None);
    }

    #[test]
    fn test_ranked_slices_to_five_and_ignores_ties() {
        let posts: Vec<Post> = (0..8).map(|i| post(&format!("p{i}"), 3)).collect();
        let rows = ranked(&posts);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].1.id, "p0");
        assert_eq!(rows[4].0.label, "5º");
        assert!(rows
            .iter()
            .all(|(_, p)| Metric::Likes.post_value(p) == 3));
    }

    #[test]
    fn test_contributions_sum_posts_and_comments() {
        let entry = RankedUser {
            post_count: 4,
            comment_count: 7,
            ..Default::default()
        };
        assert_eq!(Metric::Contributions.user_value(&entry), 11);
        assert_eq!(Metric::Posts.user_value(&entry), 4);
        assert_eq!(Metric::Followers.user_value(&entry), 0);
    }

    #[test]
    fn test_any_failures_give_one_toast() {
        let mut boards = Leaderboards::default();
        assert_eq!(boards.failure_toast(), None);

        boards.most_liked = boards.take(Metric::Likes, Err::<Vec<Post>, _>("timeout"));
        boards.most_posts = boards.take(Metric::Posts, Err::<Vec<RankedUser>, _>("500"));
        boards.most_retruthed = boards.take(Metric::Retruths, Ok::<_, &str>(vec![post("p1", 0)]));
        assert!(boards.most_liked.is_empty());
        assert_eq!(boards.most_retruthed.len(), 1);
        assert_eq!(boards.failures, 2);
        assert_eq!(boards.failure_toast(), Some(LOAD_FAILED));
    }
}
