use serde::{Deserialize, Deserializer};

/// Tri-state wrapper for PATCH bodies.
///
/// Plain `Option<T>` cannot tell a field the client omitted from one it set
/// to `null`, so nullable DTO fields use this instead. Combine with
/// `#[serde(default)]`: an omitted field stays `Missing`, an explicit JSON
/// `null` decodes to `Null`, anything else to `Value`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Patch<T> {
    #[default]
    Missing,
    Null,
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Patch::Missing)
    }

    /// Present value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Patch::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Write this patch into an `Option` slot: `Missing` keeps the current
    /// value, `Null` clears it, `Value` replaces it.
    pub fn apply_to(self, slot: &mut Option<T>) {
        match self {
            Patch::Missing => {}
            Patch::Null => *slot = None,
            Patch::Value(v) => *slot = Some(v),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default)]
        notes: Patch<String>,
        #[serde(default)]
        salary: Patch<i64>,
    }

    #[test]
    fn omitted_field_is_missing() {
        let body: Body = serde_json::from_str("{}").unwrap();
        assert!(body.notes.is_missing());
        assert!(body.salary.is_missing());
    }

    #[test]
    fn explicit_null_is_null() {
        let body: Body = serde_json::from_str(r#"{"notes": null}"#).unwrap();
        assert_eq!(body.notes, Patch::Null);
        assert_eq!(body.salary, Patch::Missing);
    }

    #[test]
    fn value_is_value() {
        let body: Body = serde_json::from_str(r#"{"notes": "hi", "salary": 50000}"#).unwrap();
        assert_eq!(body.notes, Patch::Value("hi".to_string()));
        assert_eq!(body.salary, Patch::Value(50000));
    }

    #[test]
    fn apply_to_covers_all_three_states() {
        let mut slot = Some("old".to_string());
        Patch::Missing.apply_to(&mut slot);
        assert_eq!(slot.as_deref(), Some("old"));

        Patch::Value("new".to_string()).apply_to(&mut slot);
        assert_eq!(slot.as_deref(), Some("new"));

        Patch::<String>::Null.apply_to(&mut slot);
        assert_eq!(slot, None);
    }
}
