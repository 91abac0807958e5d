//! Feedback reports.

use api::{Report, ReportKind, User};
use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::ValidationError;

pub const SUBMITTED: &str = "Report submitted successfully!";

/// Build a report. Guests report as `Guest` / `guest` / `guest`.
pub fn build_report(
    kind: ReportKind,
    message: &str,
    author: Option<&User>,
    now: DateTime<Utc>,
) -> Result<Report, ValidationError> {
    let message = message.trim();
    if message.is_empty() {
        return Err(ValidationError::EmptyReport);
    }
    let (name, username, email) = match author {
        Some(u) => (u.name.clone(), u.username.clone(), u.email.clone()),
        None => ("Guest".into(), "guest".into(), "guest".into()),
    };
    Ok(Report {
        kind,
        message: message.to_string(),
        name,
        username,
        email,
        created_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
