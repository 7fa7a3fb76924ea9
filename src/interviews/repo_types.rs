use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "interview_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterviewType {
    Hr,
    Technical,
    Managerial,
    Final,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "interview_mode", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterviewMode {
    Video,
    Onsite,
    Phone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "interview_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterviewStatus {
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

/// Interview record. `user_id` duplicates the owning application's owner so
/// per-user queries skip a join.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    pub id: Uuid,
    pub user_id: Uuid,
    pub application_id: Uuid,
    pub title: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: InterviewType,
    #[serde(with = "time::serde::rfc3339")]
    pub start_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub end_at: Option<OffsetDateTime>,
    pub timezone: Option<String>,
    pub mode: InterviewMode,
    pub location: Option<String>,
    pub meeting_url: Option<String>,
    pub status: InterviewStatus,
    pub notes: Option<String>,
    pub feedback: Option<String>,
    pub checklist_items: Option<Json<Vec<String>>>,
    pub questions_to_ask: Option<Json<Vec<String>>>,
    pub links: Option<Json<Vec<String>>>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_wire_spellings() {
        assert_eq!(
            serde_json::to_string(&InterviewStatus::NoShow).unwrap(),
            "\"NO_SHOW\""
        );
        assert_eq!(
            serde_json::to_string(&InterviewType::Technical).unwrap(),
            "\"TECHNICAL\""
        );
        assert_eq!(
            serde_json::to_string(&InterviewMode::Onsite).unwrap(),
            "\"ONSITE\""
        );
        assert!(serde_json::from_str::<InterviewStatus>("\"POSTPONED\"").is_err());
    }
}
