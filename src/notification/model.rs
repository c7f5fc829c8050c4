//! The onboarding notification record.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use secrecy::SecretString;

use super::sink::{Endpoint, HttpStatusSink, StatusSink};
use super::step_result::{StepResult, step_codes};
use crate::config::NotifierConfig;
use crate::error::NotifyError;

/// Status of one onboarding step, reported to the step-result service.
///
/// Every field can be overwritten at any time and in any order. Sending a
/// notification reads the record but never changes it.
pub struct OnboardingNotification {
    target_url: String,
    user_id: String,
    credential: SecretString,
    sink: Arc<dyn StatusSink>,
    solution_id: Option<String>,
    revision_id: Option<String>,
    artifact_id: Option<String>,
    status_code: Option<String>,
    tracking_id: Option<String>,
    name: Option<String>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    step_code: Option<String>,
    result: Option<String>,
    step_result_id: Option<i64>,
}

impl std::fmt::Debug for OnboardingNotification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnboardingNotification")
            .field("target_url", &self.target_url)
            .field("user_id", &self.user_id)
            .field("tracking_id", &self.tracking_id)
            .field("name", &self.name)
            .field("status_code", &self.status_code)
            .field("step_result_id", &self.step_result_id)
            .finish_non_exhaustive()
    }
}

impl OnboardingNotification {
    /// Create a record that reports to the HTTP status service at `target_url`.
    pub fn new(
        target_url: impl Into<String>,
        user_id: impl Into<String>,
        credential: impl Into<String>,
    ) -> Self {
        let config = NotifierConfig {
            target_url: target_url.into(),
            user_id: user_id.into(),
            credential: SecretString::from(credential.into()),
            ..Default::default()
        };
        Self::from_config(&config)
    }

    pub fn from_config(config: &NotifierConfig) -> Self {
        Self::with_sink(
            config.target_url.clone(),
            config.user_id.clone(),
            config.credential.clone(),
            Arc::new(HttpStatusSink::new(config.request_timeout)),
        )
    }

    /// Create a record from the `ONBOARDING_NOTIFY_*` environment variables.
    pub fn from_env() -> crate::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create a record from settings resolved through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = NotifierConfig::from_lookup(lookup)?;
        Ok(Self::from_config(&config))
    }

    /// Create a record that reports through an arbitrary sink.
    pub fn with_sink(
        target_url: impl Into<String>,
        user_id: impl Into<String>,
        credential: SecretString,
        sink: Arc<dyn StatusSink>,
    ) -> Self {
        Self {
            target_url: target_url.into(),
            user_id: user_id.into(),
            credential,
            sink,
            solution_id: None,
            revision_id: None,
            artifact_id: None,
            status_code: None,
            tracking_id: None,
            name: None,
            start_date: None,
            end_date: None,
            step_code: None,
            result: None,
            step_result_id: None,
        }
    }

    /// Report a step transition. Delivery failures are logged, not returned.
    pub async fn notify_onboarding_status(
        &self,
        step_name: &str,
        status_code: &str,
        message: &str,
    ) {
        if let Err(e) = self
            .try_notify_onboarding_status(step_name, status_code, message)
            .await
        {
            tracing::warn!(
                step = step_name,
                status = status_code,
                tracking_id = self.tracking_id.as_deref().unwrap_or(""),
                "Failed to deliver onboarding status: {}",
                e
            );
        }
    }

    /// Report a step transition and return the stored step result.
    ///
    /// Updates the existing step result when a step result id is set, creates
    /// a new one otherwise. The caller decides whether to keep the returned id.
    pub async fn try_notify_onboarding_status(
        &self,
        step_name: &str,
        status_code: &str,
        message: &str,
    ) -> Result<StepResult, NotifyError> {
        let step = self.step_result(step_name, status_code, message);
        let endpoint = self.endpoint();
        let stored = match self.step_result_id {
            Some(id) => self.sink.update_step_result(endpoint, id, &step).await?,
            None => self.sink.create_step_result(endpoint, &step).await?,
        };
        tracing::info!(
            step = step_name,
            status = status_code,
            step_result_id = ?stored.step_result_id,
            "Onboarding status delivered"
        );
        Ok(stored)
    }

    /// Build the payload for a step transition from the current field values.
    pub fn step_result(&self, step_name: &str, status_code: &str, message: &str) -> StepResult {
        let mut step = StepResult {
            step_result_id: self.step_result_id,
            tracking_id: self.tracking_id.clone(),
            step_code: Some(
                self.step_code
                    .clone()
                    .unwrap_or_else(|| step_codes::ONBOARDING.to_string()),
            ),
            solution_id: self.solution_id.clone(),
            revision_id: self.revision_id.clone(),
            artifact_id: self.artifact_id.clone(),
            user_id: Some(self.user_id.clone()),
            name: Some(step_name.to_string()),
            status_code: Some(status_code.to_string()),
            result: Some(message.to_string()),
            start_date: self.start_date,
            end_date: self.end_date,
        };

        let now = Utc::now();
        if step.is_start() {
            step.start_date.get_or_insert(now);
        } else {
            step.end_date.get_or_insert(now);
        }
        step
    }

    fn endpoint(&self) -> Endpoint<'_> {
        Endpoint {
            base_url: &self.target_url,
            user_id: &self.user_id,
            credential: &self.credential,
        }
    }

    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    pub fn set_target_url(&mut self, target_url: impl Into<String>) {
        self.target_url = target_url.into();
    }

    pub fn credential(&self) -> &SecretString {
        &self.credential
    }

    pub fn set_credential(&mut self, credential: SecretString) {
        self.credential = credential;
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn set_user_id(&mut self, user_id: impl Into<String>) {
        self.user_id = user_id.into();
    }

    pub fn solution_id(&self) -> Option<&str> {
        self.solution_id.as_deref()
    }

    pub fn set_solution_id(&mut self, solution_id: impl Into<String>) {
        self.solution_id = Some(solution_id.into());
    }

    pub fn revision_id(&self) -> Option<&str> {
        self.revision_id.as_deref()
    }

    pub fn set_revision_id(&mut self, revision_id: impl Into<String>) {
        self.revision_id = Some(revision_id.into());
    }

    pub fn artifact_id(&self) -> Option<&str> {
        self.artifact_id.as_deref()
    }

    pub fn set_artifact_id(&mut self, artifact_id: impl Into<String>) {
        self.artifact_id = Some(artifact_id.into());
    }

    pub fn status_code(&self) -> Option<&str> {
        self.status_code.as_deref()
    }

    pub fn set_status_code(&mut self, status_code: impl Into<String>) {
        self.status_code = Some(status_code.into());
    }

    pub fn tracking_id(&self) -> Option<&str> {
        self.tracking_id.as_deref()
    }

    pub fn set_tracking_id(&mut self, tracking_id: impl Into<String>) {
        self.tracking_id = Some(tracking_id.into());
    }

    /// Step name, e.g. "CreateSolution".
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn start_date(&self) -> Option<DateTime<Utc>> {
        self.start_date
    }

    pub fn set_start_date(&mut self, start_date: DateTime<Utc>) {
        self.start_date = Some(start_date);
    }

    pub fn end_date(&self) -> Option<DateTime<Utc>> {
        self.end_date
    }

    pub fn set_end_date(&mut self, end_date: DateTime<Utc>) {
        self.end_date = Some(end_date);
    }

    pub fn step_code(&self) -> Option<&str> {
        self.step_code.as_deref()
    }

    pub fn set_step_code(&mut self, step_code: impl Into<String>) {
        self.step_code = Some(step_code.into());
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn set_result(&mut self, result: impl Into<String>) {
        self.result = Some(result.into());
    }

    pub fn step_result_id(&self) -> Option<i64> {
        self.step_result_id
    }

    pub fn set_step_result_id(&mut self, step_result_id: i64) {
        self.step_result_id = Some(step_result_id);
    }
}

/// Generate a fresh tracking id for a new onboarding request.
pub fn new_tracking_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
