use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Provenance of a job lead.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "application_source", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationSource {
    Linkedin,
    CompanyWebsite,
    Referral,
    JobBoard,
    Email,
    SchoolForum,
    Other,
}

/// Stage in the application lifecycle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "application_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Applied,
    HrInterview,
    TechInterview,
    Offer,
    Rejected,
    Ghosted,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 6] = [
        ApplicationStatus::Applied,
        ApplicationStatus::HrInterview,
        ApplicationStatus::TechInterview,
        ApplicationStatus::Offer,
        ApplicationStatus::Rejected,
        ApplicationStatus::Ghosted,
    ];
}

/// Optional link bundle attached to an application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationLinks {
    pub job_posting_url: Option<String>,
    pub company_website_url: Option<String>,
    pub resume_url: Option<String>,
    pub cover_letter_url: Option<String>,
}

/// User-scheduled follow-up attached to an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextAction {
    /// ISO date, `YYYY-MM-DD`.
    pub date: String,
    pub note: Option<String>,
    #[serde(default)]
    pub done: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_name: String,
    pub role_title: String,
    pub location: Option<String>,
    pub source: ApplicationSource,
    pub status: ApplicationStatus,
    pub applied_date: Option<String>,
    pub salary: Option<i64>,
    pub currency: String,
    pub tags: Option<Json<Vec<String>>>,
    pub links: Option<Json<ApplicationLinks>>,
    pub notes: Option<String>,
    pub next_action: Option<Json<NextAction>>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_use_wire_spelling() {
        assert_eq!(
            serde_json::to_string(&ApplicationSource::CompanyWebsite).unwrap(),
            "\"COMPANY_WEBSITE\""
        );
        assert_eq!(
            serde_json::to_string(&ApplicationStatus::HrInterview).unwrap(),
            "\"HR_INTERVIEW\""
        );
        let s: ApplicationStatus = serde_json::from_str("\"GHOSTED\"").unwrap();
        assert_eq!(s, ApplicationStatus::Ghosted);
    }

    #[test]
    fn unknown_enum_value_is_rejected() {
        assert!(serde_json::from_str::<ApplicationStatus>("\"WISHLIST\"").is_err());
        assert!(serde_json::from_str::<ApplicationSource>("\"CARRIER_PIGEON\"").is_err());
    }

    #[test]
    fn next_action_done_defaults_false() {
        let na: NextAction = serde_json::from_str(r#"{"date": "2025-03-01"}"#).unwrap();
        assert!(!na.done);
        assert_eq!(na.date, "2025-03-01");
    }
}
