use crate::domain::model::FormSubmission;
use crate::domain::ports::FormsStore;
use crate::utils::error::{LeadError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

/// Posts URL-encoded submissions to the site root, where the hosting platform
/// captures them by `form-name`.
#[derive(Debug, Clone)]
pub struct HttpFormsStore {
    client: Client,
    endpoint: String,
}

impl HttpFormsStore {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn encode(submission: &FormSubmission) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(submission.pairs())
            .finish()
    }
}

#[async_trait]
impl FormsStore for HttpFormsStore {
    async fn record(&self, submission: &FormSubmission) -> Result<()> {
        tracing::debug!("Posting form '{}' to {}", submission.form_name, self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Self::encode(submission))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LeadError::UpstreamError {
                service: "forms store".to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Lead;
    use httpmock::prelude::*;

    fn submission() -> FormSubmission {
        FormSubmission {
            form_name: "contact-form".to_string(),
            submitted_at: "3/14/2026, 9:26:53 AM".to_string(),
            lead: Lead {
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                phone_number: "5551234567".to_string(),
                email_address: "jane@example.com".to_string(),
                zip_code: "90210".to_string(),
                case_type: "Car Accident".to_string(),
                description: "Rear-ended at a light & hurt.".to_string(),
            },
        }
    }

    #[test]
    fn test_encode_escapes_values() {
        let encoded = HttpFormsStore::encode(&submission());

        assert!(encoded.starts_with("form-name=contact-form&submission-date=3%2F14%2F2026"));
        assert!(encoded.contains("emailAddress=jane%40example.com"));
        assert!(encoded.contains("caseType=Car+Accident"));
        assert!(encoded.contains("%26+hurt."));
    }

    #[tokio::test]
    async fn test_record_posts_urlencoded_body() {
        let server = MockServer::start();
        let form_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/")
                .x_www_form_urlencoded_tuple("form-name", "contact-form")
                .x_www_form_urlencoded_tuple("zipCode", "90210");
            then.status(200);
        });

        let store = HttpFormsStore::new(Client::new(), server.url("/"));
        store.record(&submission()).await.unwrap();

        form_mock.assert();
    }

    #[tokio::test]
    async fn test_record_rejects_non_success_status() {
        let server = MockServer::start();
        let form_mock = server.mock(|when, then| {
            when.method(POST).path("/");
            then.status(404).body("Not Found");
        });

        let store = HttpFormsStore::new(Client::new(), server.url("/"));
        let err = store.record(&submission()).await.unwrap_err();

        form_mock.assert();
        match err {
            LeadError::UpstreamError { status, body, .. } => {
                assert_eq!(status, 404);
                assert_eq!(body, "Not Found");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
