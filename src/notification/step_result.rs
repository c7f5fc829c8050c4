//! Wire representation of a step result sent to the status service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Well-known status codes understood by the status service.
pub mod status_codes {
    /// Step has started.
    pub const STARTED: &str = "ST";
    /// Step finished successfully.
    pub const SUCCEEDED: &str = "SU";
    /// Step failed.
    pub const FAILED: &str = "FA";
}

/// Well-known step codes.
pub mod step_codes {
    /// Onboarding of a model.
    pub const ONBOARDING: &str = "OB";
    /// Validation of a model.
    pub const VALIDATION: &str = "VL";
}

/// One step result as stored by the status service.
///
/// Unset fields are omitted from the JSON body so the service can fill in
/// its own defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StepResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_result_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

impl StepResult {
    /// Whether the status code marks the beginning of a step.
    pub fn is_start(&self) -> bool {
        self.status_code.as_deref() == Some(status_codes::STARTED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case_and_skips_unset() {
        let step = StepResult {
            step_result_id: Some(7),
            tracking_id: Some("235".to_string()),
            name: Some("CreateSolution".to_string()),
            status_code: Some(status_codes::STARTED.to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["stepResultId"], 7);
        assert_eq!(json["trackingId"], "235");
        assert_eq!(json["name"], "CreateSolution");
        assert_eq!(json["statusCode"], "ST");
        assert!(json.get("solutionId").is_none());
        assert!(json.get("startDate").is_none());
    }

    #[test]
    fn parses_service_response() {
        let body = r#"{
            "stepResultId": 2452,
            "trackingId": "235",
            "stepCode": "OB",
            "name": "CreateSolution",
            "statusCode": "SU",
            "result": "Success",
            "startDate": "2018-03-01T10:00:00Z",
            "unknownField": true
        }"#;

        let step: StepResult = serde_json::from_str(body).unwrap();
        assert_eq!(step.step_result_id, Some(2452));
        assert_eq!(step.step_code.as_deref(), Some(step_codes::ONBOARDING));
        assert_eq!(step.result.as_deref(), Some("Success"));
        assert!(step.start_date.is_some());
        assert!(step.end_date.is_none());
        assert!(!step.is_start());
    }
}
