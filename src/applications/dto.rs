use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

use super::repo::NewApplication;
use super::repo_types::{
    Application, ApplicationLinks, ApplicationSource, ApplicationStatus, NextAction,
};
use crate::error::ApiError;
use crate::patch::Patch;
use crate::validate::{max_items, max_len, non_negative, require_iso_date, require_len};

fn validate_next_action(na: &NextAction) -> Result<(), ApiError> {
    require_iso_date("nextAction.date", &na.date)?;
    if let Some(note) = &na.note {
        max_len("nextAction.note", note, 300)?;
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationRequest {
    pub company_name: String,
    pub role_title: String,
    pub location: Option<String>,
    pub source: ApplicationSource,
    pub status: Option<ApplicationStatus>,
    pub applied_date: Option<String>,
    pub salary: Option<i64>,
    pub currency: Option<String>,
    pub tags: Option<Vec<String>>,
    pub links: Option<ApplicationLinks>,
    pub notes: Option<String>,
    pub next_action: Option<NextAction>,
}

impl CreateApplicationRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_len("companyName", &self.company_name, 1, 120)?;
        require_len("roleTitle", &self.role_title, 1, 120)?;
        if let Some(v) = &self.location {
            max_len("location", v, 120)?;
        }
        if let Some(v) = &self.applied_date {
            require_iso_date("appliedDate", v)?;
        }
        if let Some(v) = self.salary {
            non_negative("salary", v)?;
        }
        if let Some(v) = &self.tags {
            max_items("tags", v, 10)?;
        }
        if let Some(v) = &self.notes {
            max_len("notes", v, 5000)?;
        }
        if let Some(na) = &self.next_action {
            validate_next_action(na)?;
        }
        Ok(())
    }

    /// Creation defaults: status APPLIED, currency EUR.
    pub fn into_new(self, user_id: Uuid) -> NewApplication {
        NewApplication {
            user_id,
            company_name: self.company_name,
            role_title: self.role_title,
            location: self.location,
            source: self.source,
            status: self.status.unwrap_or(ApplicationStatus::Applied),
            applied_date: self.applied_date,
            salary: self.salary,
            currency: self.currency.unwrap_or_else(|| "EUR".to_string()),
            tags: self.tags,
            links: self.links,
            notes: self.notes,
            next_action: self.next_action,
        }
    }
}

/// Partial update. Nullable fields (location, salary, tags, links, notes,
/// nextAction) use the tri-state wrapper; for the rest an explicit `null` is
/// treated as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationRequest {
    pub company_name: Option<String>,
    pub role_title: Option<String>,
    #[serde(default)]
    pub location: Patch<String>,
    pub source: Option<ApplicationSource>,
    pub status: Option<ApplicationStatus>,
    pub applied_date: Option<String>,
    #[serde(default)]
    pub salary: Patch<i64>,
    pub currency: Option<String>,
    #[serde(default)]
    pub tags: Patch<Vec<String>>,
    #[serde(default)]
    pub links: Patch<ApplicationLinks>,
    #[serde(default)]
    pub notes: Patch<String>,
    #[serde(default)]
    pub next_action: Patch<NextAction>,
}

impl UpdateApplicationRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(v) = &self.company_name {
            require_len("companyName", v, 1, 120)?;
        }
        if let Some(v) = &self.role_title {
            require_len("roleTitle", v, 1, 120)?;
        }
        if let Some(v) = self.location.value() {
            max_len("location", v, 120)?;
        }
        if let Some(v) = &self.applied_date {
            require_iso_date("appliedDate", v)?;
        }
        if let Some(v) = self.salary.value() {
            non_negative("salary", *v)?;
        }
        if let Some(v) = self.tags.value() {
            max_items("tags", v, 10)?;
        }
        if let Some(v) = self.notes.value() {
            max_len("notes", v, 5000)?;
        }
        if let Some(na) = self.next_action.value() {
            validate_next_action(na)?;
        }
        Ok(())
    }

    pub fn apply(self, app: &mut Application) {
        if let Some(v) = self.company_name {
            app.company_name = v;
        }
        if let Some(v) = self.role_title {
            app.role_title = v;
        }
        self.location.apply_to(&mut app.location);
        if let Some(v) = self.source {
            app.source = v;
        }
        if let Some(v) = self.status {
            app.status = v;
        }
        if let Some(v) = self.applied_date {
            app.applied_date = Some(v);
        }
        self.salary.apply_to(&mut app.salary);
        if let Some(v) = self.currency {
            app.currency = v;
        }
        match self.tags {
            Patch::Missing => {}
            Patch::Null => app.tags = None,
            Patch::Value(v) => app.tags = Some(Json(v)),
        }
        match self.links {
            Patch::Missing => {}
            Patch::Null => app.links = None,
            Patch::Value(v) => app.links = Some(Json(v)),
        }
        self.notes.apply_to(&mut app.notes);
        match self.next_action {
            Patch::Missing => {}
            Patch::Null => app.next_action = None,
            Patch::Value(v) => app.next_action = Some(Json(v)),
        }
    }
}

/// Per-status totals for the principal, used by the dashboard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total: i64,
    pub by_status: BTreeMap<ApplicationStatus, i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn minimal_create() -> CreateApplicationRequest {
        serde_json::from_str(
            r#"{"companyName": "Acme", "roleTitle": "SWE", "source": "LINKEDIN"}"#,
        )
        .unwrap()
    }

    fn sample_application() -> Application {
        let new = minimal_create().into_new(Uuid::new_v4());
        Application {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            company_name: new.company_name,
            role_title: new.role_title,
            location: Some("Paris".into()),
            source: new.source,
            status: new.status,
            applied_date: None,
            salary: Some(55_000),
            currency: new.currency,
            tags: Some(Json(vec!["remote".into()])),
            links: None,
            notes: Some("initial".into()),
            next_action: None,
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn creation_defaults_applied() {
        let new = minimal_create().into_new(Uuid::new_v4());
        assert_eq!(new.status, ApplicationStatus::Applied);
        assert_eq!(new.currency, "EUR");
    }

    #[test]
    fn explicit_status_and_currency_survive() {
        let req: CreateApplicationRequest = serde_json::from_str(
            r#"{"companyName": "Acme", "roleTitle": "SWE", "source": "REFERRAL",
                "status": "OFFER", "currency": "USD"}"#,
        )
        .unwrap();
        let new = req.into_new(Uuid::new_v4());
        assert_eq!(new.status, ApplicationStatus::Offer);
        assert_eq!(new.currency, "USD");
    }

    #[test]
    fn create_validation_bounds() {
        let mut req = minimal_create();
        req.company_name = "".into();
        assert!(req.validate().is_err());

        let mut req = minimal_create();
        req.salary = Some(-1);
        assert!(req.validate().is_err());

        let mut req = minimal_create();
        req.applied_date = Some("01/02/2025".into());
        assert!(req.validate().is_err());

        let mut req = minimal_create();
        req.tags = Some((0..11).map(|i| format!("t{i}")).collect());
        assert!(req.validate().is_err());

        assert!(minimal_create().validate().is_ok());
    }

    #[test]
    fn patch_single_field_leaves_the_rest() {
        let mut app = sample_application();
        let before_company = app.company_name.clone();
        let body: UpdateApplicationRequest =
            serde_json::from_str(r#"{"notes": "call Monday"}"#).unwrap();
        body.validate().unwrap();
        body.apply(&mut app);

        assert_eq!(app.notes.as_deref(), Some("call Monday"));
        assert_eq!(app.company_name, before_company);
        assert_eq!(app.location.as_deref(), Some("Paris"));
        assert_eq!(app.salary, Some(55_000));
    }

    #[test]
    fn patch_null_clears_only_nullable_fields() {
        let mut app = sample_application();
        let body: UpdateApplicationRequest = serde_json::from_str(
            r#"{"salary": null, "tags": null, "location": null}"#,
        )
        .unwrap();
        body.apply(&mut app);
        assert_eq!(app.salary, None);
        assert!(app.tags.is_none());
        assert!(app.location.is_none());
    }

    #[test]
    fn patch_null_on_non_nullable_field_is_ignored() {
        let mut app = sample_application();
        let body: UpdateApplicationRequest =
            serde_json::from_str(r#"{"companyName": null, "status": null}"#).unwrap();
        body.apply(&mut app);
        assert_eq!(app.company_name, "Acme");
        assert_eq!(app.status, ApplicationStatus::Applied);
    }

    #[test]
    fn patch_status_transition() {
        let mut app = sample_application();
        let body: UpdateApplicationRequest =
            serde_json::from_str(r#"{"status": "TECH_INTERVIEW"}"#).unwrap();
        body.apply(&mut app);
        assert_eq!(app.status, ApplicationStatus::TechInterview);
    }

    #[test]
    fn application_serializes_with_camel_case_wire_names() {
        let json = serde_json::to_value(sample_application()).unwrap();
        assert!(json.get("companyName").is_some());
        assert!(json.get("roleTitle").is_some());
        assert!(json.get("userId").is_some());
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["tags"], serde_json::json!(["remote"]));
    }
}
