//! Submission of the action form to the staff backend.

use super::attachment;
use crate::errors::{AppError, AppResult};
use crate::models::action_target::ActionTarget;
use crate::models::draft::SubmissionDraft;
use crate::models::submission::{ActionResponse, SubmissionResult};
use async_trait::async_trait;
use reqwest::header::COOKIE;
use reqwest::multipart::Form;
use tracing::{info, warn};

#[async_trait]
pub trait ActionBackend: Send + Sync {
    /// Post `draft` to the endpoint of `target`.
    ///
    /// `Ok` carries whatever the backend decided; `Err` is a transport or
    /// response-format failure.
    async fn submit(
        &self,
        target: ActionTarget,
        draft: &SubmissionDraft,
    ) -> AppResult<SubmissionResult>;
}

pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    session_cookie: Option<String>,
}

impl HttpBackend {
    /// `base_url` should be like `http://localhost:5000` (no trailing slash).
    pub fn new(client: reqwest::Client, base_url: &str, session_cookie: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session_cookie,
        }
    }

    pub fn url_for(&self, target: ActionTarget) -> String {
        format!("{}{}", self.base_url, target.endpoint())
    }

    async fn build_form(&self, draft: &SubmissionDraft) -> Form {
        let mut form = Form::new();
        for (name, value) in draft.text_fields() {
            form = form.text(name, value);
        }

        if let Some(path) = &draft.photo {
            match attachment::load_part(path).await {
                Ok(part) => form = form.part("photo", part),
                Err(e) => warn!(path = %path.display(), error = %e, "photo not attached"),
            }
        }

        form
    }
}

#[async_trait]
impl ActionBackend for HttpBackend {
    async fn submit(
        &self,
        target: ActionTarget,
        draft: &SubmissionDraft,
    ) -> AppResult<SubmissionResult> {
        let url = self.url_for(target);
        let form = self.build_form(draft).await;

        info!(url = %url, action = target.kind_str(), "submitting action");
        let mut req = self.client.post(&url).multipart(form);
        if let Some(cookie) = &self.session_cookie {
            req = req.header(COOKIE, cookie.as_str());
        }

        let resp = req
            .send()
            .await
            .map_err(|e| AppError::TransportFailure(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| AppError::TransportFailure(e.to_string()))?;

        let parsed: ActionResponse = serde_json::from_str(&body).map_err(|e| {
            AppError::TransportFailure(format!(
                "unexpected response (HTTP {}): {}",
                status.as_u16(),
                e
            ))
        })?;

        let result = SubmissionResult::from(parsed);
        info!(success = result.is_success(), "submission answered");
        Ok(result)
    }
}
