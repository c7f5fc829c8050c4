//! Onboarding Notify: reports onboarding step status to a step-result service.

pub mod config;
pub mod error;
pub mod notification;

pub use config::NotifierConfig;
pub use error::{ConfigError, Error, NotifyError, Result};
pub use notification::{OnboardingNotification, StatusSink, StepResult};
