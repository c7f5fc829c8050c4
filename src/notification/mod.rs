//! Onboarding step notifications.
//!
//! An `OnboardingNotification` carries the status fields of one onboarding
//! step. Reporting a transition turns those fields into a `StepResult` and
//! hands it to a `StatusSink`, by default the HTTP step-result service.

pub mod model;
pub mod sink;
pub mod step_result;

pub use model::{OnboardingNotification, new_tracking_id};
pub use sink::{HttpStatusSink, StatusSink};
pub use step_result::{StepResult, status_codes, step_codes};
