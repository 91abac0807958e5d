//! Feedback reports and activity notifications.

use reqwest::Method;

use url::Url;

use super::ApiClient;
use crate::error::Result;
use crate::models::{Notification, Report};

impl ApiClient {
    pub async fn submit_report(&self, report: &Report) -> Result<()> {
        self.send_unit(Method::POST, self.url(&["api", "reports"])?, Some(report))
            .await
    }

    pub async fn notifications(&self, user_id: &str) -> Result<Vec<Notification>> {
        self.get(self.notifications_url(user_id)?).await
    }

    fn notifications_url(&self, user_id: &str) -> Result<Url> {
        let mut url = self.url(&["api", "notifications"])?;
        url.query_pairs_mut().append_pair("userId", user_id);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notifications_user_id_is_a_query_pair() {
        let client = ApiClient::new("https://backend.example");
        let url = client.notifications_url("u1").unwrap();
        assert_eq!(url.as_str(), "https://backend.example/api/notifications?userId=u1");

        let url = client.notifications_url("a&b=c d").unwrap();
        assert_eq!(url.query(), Some("userId=a%26b%3Dc+d"));
        let pairs: Vec<_> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, vec![("userId".to_string(), "a&b=c d".to_string())]);
    }
}
