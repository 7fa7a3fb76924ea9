use serde::Deserialize;
use sqlx::types::Json;
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo::NewInterview;
use super::repo_types::{Interview, InterviewMode, InterviewStatus, InterviewType};
use crate::error::ApiError;
use crate::patch::Patch;
use crate::validate::{max_len, require_len};

/// `endAt >= startAt` whenever both are set; checked on create and re-checked
/// after every update.
pub fn check_temporal(
    start_at: OffsetDateTime,
    end_at: Option<OffsetDateTime>,
) -> Result<(), ApiError> {
    if let Some(end) = end_at {
        if end < start_at {
            return Err(ApiError::validation(
                "endAt",
                "End time must not be before start time",
            ));
        }
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInterviewRequest {
    pub application_id: Uuid,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: InterviewType,
    #[serde(with = "time::serde::rfc3339")]
    pub start_at: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub end_at: Option<OffsetDateTime>,
    pub timezone: Option<String>,
    pub mode: InterviewMode,
    pub location: Option<String>,
    pub meeting_url: Option<String>,
    pub notes: Option<String>,
    pub checklist_items: Option<Vec<String>>,
    pub questions_to_ask: Option<Vec<String>>,
    pub links: Option<Vec<String>>,
}

impl CreateInterviewRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_len("title", &self.title, 1, 200)?;
        if let Some(v) = &self.notes {
            max_len("notes", v, 5000)?;
        }
        check_temporal(self.start_at, self.end_at)
    }

    pub fn into_new(self, user_id: Uuid) -> NewInterview {
        NewInterview {
            user_id,
            application_id: self.application_id,
            title: self.title,
            kind: self.kind,
            start_at: self.start_at,
            end_at: self.end_at,
            timezone: self.timezone,
            mode: self.mode,
            location: self.location,
            meeting_url: self.meeting_url,
            notes: self.notes,
            checklist_items: self.checklist_items,
            questions_to_ask: self.questions_to_ask,
            links: self.links,
        }
    }
}

/// Partial update. `title`, `type`, `startAt`, `mode`, `status` are
/// non-nullable; everything else clears on explicit `null`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInterviewRequest {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<InterviewType>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub start_at: Option<OffsetDateTime>,
    #[serde(default)]
    pub end_at: Patch<RfcInstant>,
    #[serde(default)]
    pub timezone: Patch<String>,
    pub mode: Option<InterviewMode>,
    #[serde(default)]
    pub location: Patch<String>,
    #[serde(default)]
    pub meeting_url: Patch<String>,
    pub status: Option<InterviewStatus>,
    #[serde(default)]
    pub notes: Patch<String>,
    #[serde(default)]
    pub feedback: Patch<String>,
    #[serde(default)]
    pub checklist_items: Patch<Vec<String>>,
    #[serde(default)]
    pub questions_to_ask: Patch<Vec<String>>,
    #[serde(default)]
    pub links: Patch<Vec<String>>,
}

/// RFC 3339 instant usable inside `Patch`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RfcInstant(#[serde(with = "time::serde::rfc3339")] pub OffsetDateTime);

impl UpdateInterviewRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(v) = &self.title {
            require_len("title", v, 1, 200)?;
        }
        if let Some(v) = self.notes.value() {
            max_len("notes", v, 5000)?;
        }
        if let Some(v) = self.feedback.value() {
            max_len("feedback", v, 5000)?;
        }
        Ok(())
    }

    pub fn apply(self, interview: &mut Interview) {
        if let Some(v) = self.title {
            interview.title = v;
        }
        if let Some(v) = self.kind {
            interview.kind = v;
        }
        if let Some(v) = self.start_at {
            interview.start_at = v;
        }
        match self.end_at {
            Patch::Missing => {}
            Patch::Null => interview.end_at = None,
            Patch::Value(RfcInstant(v)) => interview.end_at = Some(v),
        }
        self.timezone.apply_to(&mut interview.timezone);
        if let Some(v) = self.mode {
            interview.mode = v;
        }
        self.location.apply_to(&mut interview.location);
        self.meeting_url.apply_to(&mut interview.meeting_url);
        if let Some(v) = self.status {
            interview.status = v;
        }
        self.notes.apply_to(&mut interview.notes);
        self.feedback.apply_to(&mut interview.feedback);
        match self.checklist_items {
            Patch::Missing => {}
            Patch::Null => interview.checklist_items = None,
            Patch::Value(v) => interview.checklist_items = Some(Json(v)),
        }
        match self.questions_to_ask {
            Patch::Missing => {}
            Patch::Null => interview.questions_to_ask = None,
            Patch::Value(v) => interview.questions_to_ask = Some(Json(v)),
        }
        match self.links {
            Patch::Missing => {}
            Patch::Null => interview.links = None,
            Patch::Value(v) => interview.links = Some(Json(v)),
        }
    }
}

/// Optional date-range and status filter for the interview list.
#[derive(Debug, Default, Deserialize)]
pub struct InterviewListParams {
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub from: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub to: Option<OffsetDateTime>,
    pub status: Option<InterviewStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn sample_interview() -> Interview {
        Interview {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            application_id: Uuid::new_v4(),
            title: "Tech screen".into(),
            kind: InterviewType::Technical,
            start_at: datetime!(2025-01-10 10:00 UTC),
            end_at: Some(datetime!(2025-01-10 11:00 UTC)),
            timezone: Some("Europe/Paris".into()),
            mode: InterviewMode::Video,
            location: None,
            meeting_url: Some("https://meet.example/abc".into()),
            status: InterviewStatus::Scheduled,
            notes: None,
            feedback: None,
            checklist_items: None,
            questions_to_ask: Some(Json(vec!["team size?".into()])),
            links: None,
            created_at: datetime!(2025-01-01 00:00 UTC),
            updated_at: datetime!(2025-01-01 00:00 UTC),
        }
    }

    #[test]
    fn temporal_rule() {
        let start = datetime!(2025-01-10 10:00 UTC);
        assert!(check_temporal(start, None).is_ok());
        assert!(check_temporal(start, Some(datetime!(2025-01-10 10:00 UTC))).is_ok());
        assert!(check_temporal(start, Some(datetime!(2025-01-10 11:00 UTC))).is_ok());
        assert!(check_temporal(start, Some(datetime!(2025-01-10 09:00 UTC))).is_err());
    }

    #[test]
    fn create_rejects_end_before_start() {
        let req: CreateInterviewRequest = serde_json::from_str(&format!(
            r#"{{"applicationId": "{}", "title": "HR call", "type": "HR",
                "startAt": "2025-01-10T10:00:00Z", "endAt": "2025-01-10T09:00:00Z",
                "mode": "VIDEO"}}"#,
            Uuid::new_v4()
        ))
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn patch_clears_end_at_with_null() {
        let mut interview = sample_interview();
        let body: UpdateInterviewRequest = serde_json::from_str(r#"{"endAt": null}"#).unwrap();
        body.apply(&mut interview);
        assert_eq!(interview.end_at, None);
    }

    #[test]
    fn patch_replaces_end_at_with_value() {
        let mut interview = sample_interview();
        let body: UpdateInterviewRequest =
            serde_json::from_str(r#"{"endAt": "2025-01-10T12:30:00Z"}"#).unwrap();
        body.apply(&mut interview);
        assert_eq!(interview.end_at, Some(datetime!(2025-01-10 12:30 UTC)));
    }

    #[test]
    fn patch_single_field_keeps_the_rest() {
        let mut interview = sample_interview();
        let body: UpdateInterviewRequest =
            serde_json::from_str(r#"{"status": "COMPLETED", "feedback": "went well"}"#).unwrap();
        body.validate().unwrap();
        body.apply(&mut interview);
        assert_eq!(interview.status, InterviewStatus::Completed);
        assert_eq!(interview.feedback.as_deref(), Some("went well"));
        assert_eq!(interview.title, "Tech screen");
        assert_eq!(interview.timezone.as_deref(), Some("Europe/Paris"));
    }

    #[test]
    fn update_after_apply_can_violate_temporal_rule() {
        // moving startAt past an existing endAt must be caught by the
        // service-level re-check
        let interview = sample_interview();
        let body: UpdateInterviewRequest =
            serde_json::from_str(r#"{"startAt": "2025-01-10T12:00:00Z"}"#).unwrap();
        let mut patched = interview.clone();
        body.apply(&mut patched);
        assert!(check_temporal(patched.start_at, patched.end_at).is_err());
    }

    #[test]
    fn interview_serializes_type_field() {
        let json = serde_json::to_value(sample_interview()).unwrap();
        assert_eq!(json["type"], "TECHNICAL");
        assert!(json.get("kind").is_none());
        assert!(json.get("applicationId").is_some());
        assert_eq!(json["startAt"], "2025-01-10T10:00:00Z");
    }
}
