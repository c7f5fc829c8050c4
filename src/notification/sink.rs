//! Outbound transport for step results.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use super::step_result::StepResult;
use crate::error::NotifyError;

/// Where a step result goes and who sends it.
///
/// Borrowed from the record on every call, so the record's current target,
/// user and credential are always the ones used.
#[derive(Debug, Clone, Copy)]
pub struct Endpoint<'a> {
    pub base_url: &'a str,
    pub user_id: &'a str,
    pub credential: &'a SecretString,
}

/// Destination for step results.
///
/// Implementations deliver exactly once per call; retries are the caller's
/// concern.
#[async_trait]
pub trait StatusSink: Send + Sync {
    /// Store a new step result and return the stored copy.
    async fn create_step_result(
        &self,
        endpoint: Endpoint<'_>,
        step: &StepResult,
    ) -> Result<StepResult, NotifyError>;

    /// Overwrite the step result with the given id.
    async fn update_step_result(
        &self,
        endpoint: Endpoint<'_>,
        step_result_id: i64,
        step: &StepResult,
    ) -> Result<StepResult, NotifyError>;
}

/// HTTP client for the step-result REST resource.
///
/// `POST {base}/stepResult` creates, `PUT {base}/stepResult/{id}` updates.
/// Requests carry basic auth built from the endpoint's user id and credential.
pub struct HttpStatusSink {
    timeout: Duration,
    client: reqwest::Client,
}

impl HttpStatusSink {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            client: reqwest::Client::new(),
        }
    }

    fn resource_url(base_url: &str, step_result_id: Option<i64>) -> String {
        let base = base_url.trim_end_matches('/');
        match step_result_id {
            Some(id) => format!("{base}/stepResult/{id}"),
            None => format!("{base}/stepResult"),
        }
    }

    /// Send the request and return the body of a successful response.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: Endpoint<'_>,
        step: &StepResult,
    ) -> Result<String, NotifyError> {
        let resp = request
            .basic_auth(endpoint.user_id, Some(endpoint.credential.expose_secret()))
            .timeout(self.timeout)
            .json(step)
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    NotifyError::InvalidUrl(e.to_string())
                } else {
                    NotifyError::Transport(e.to_string())
                }
            })?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl StatusSink for HttpStatusSink {
    async fn create_step_result(
        &self,
        endpoint: Endpoint<'_>,
        step: &StepResult,
    ) -> Result<StepResult, NotifyError> {
        let url = Self::resource_url(endpoint.base_url, None);
        tracing::debug!(url = %url, "Creating step result");
        let body = self.send(self.client.post(url), endpoint, step).await?;

        // Without the stored copy there is no step result id to update later.
        if body.trim().is_empty() {
            return Err(NotifyError::EmptyResponse);
        }
        Ok(serde_json::from_str(&body)?)
    }

    async fn update_step_result(
        &self,
        endpoint: Endpoint<'_>,
        step_result_id: i64,
        step: &StepResult,
    ) -> Result<StepResult, NotifyError> {
        let url = Self::resource_url(endpoint.base_url, Some(step_result_id));
        tracing::debug!(url = %url, step_result_id, "Updating step result");
        let body = self.send(self.client.put(url), endpoint, step).await?;

        // Some deployments answer updates with an empty body.
        if body.trim().is_empty() {
            return Ok(step.clone());
        }
        Ok(serde_json::from_str(&body)?)
    }
}
