//! Feedback reports and activity notifications.

use serde::{Deserialize, Serialize};

/// Kind of feedback a user can send.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReportKind {
    #[default]
    #[serde(rename = "Bug Report")]
    BugReport,
    #[serde(rename = "Suggestion")]
    Suggestion,
}

impl ReportKind {
    pub const ALL: [ReportKind; 2] = [ReportKind::BugReport, ReportKind::Suggestion];

    pub fn label(self) -> &'static str {
        match self {
            ReportKind::BugReport => "Bug Report",
            ReportKind::Suggestion => "Suggestion",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.label() == label)
    }
}

/// A free-form feedback record. Write-only from the client's point of view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(rename = "type")]
    pub kind: ReportKind,
    pub message: String,
    pub name: String,
    pub username: String,
    pub email: String,
    pub created_at: String,
}

/// What another user did.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Like,
    Follow,
    Retruth,
    Comment,
    #[serde(other)]
    Unknown,
}

impl NotificationKind {
    /// Phrase shown after the actor's name.
    pub fn action_text(self) -> &'static str {
        match self {
            NotificationKind::Follow => "started following you",
            NotificationKind::Like => "liked your post",
            NotificationKind::Retruth => "retruth'd your post",
            NotificationKind::Comment => "commented on your post",
            NotificationKind::Unknown => "did something",
        }
    }
}

/// The actor of a notification.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NotificationActor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(rename = "imageURL", default)]
    pub image_url: String,
}

/// An activity notification for the current user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub from_user: NotificationActor,
    #[serde(default)]
    pub post_id: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serializes_type_label() {
        let report = Report {
            kind: ReportKind::Suggestion,
            message: "dark mode".into(),
            name: "Guest".into(),
            username: "guest".into(),
            email: "guest".into(),
            created_at: "2025-03-01T10:00:00.000Z".into(),
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["type"], "Suggestion");
        assert_eq!(value["createdAt"], "2025-03-01T10:00:00.000Z");
    }

    #[test]
    fn test_unknown_notification_kind_still_decodes() {
        let json = r#"{"type": "mention", "fromUser": {"name": "Bo", "username": "bo"}}"#;
        let n: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(n.kind, NotificationKind::Unknown);
        assert_eq!(n.kind.action_text(), "did something");
    }

    #[test]
    fn test_report_kind_labels() {
        assert_eq!(ReportKind::from_label("Bug Report"), Some(ReportKind::BugReport));
        assert_eq!(ReportKind::from_label("Praise"), None);
    }
}
