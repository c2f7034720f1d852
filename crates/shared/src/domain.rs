use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// Canonical symptom token as reported by the backend, e.g. `chest_pain`.
///
/// State storage and equality always use the raw token; [`SymptomId::display_name`]
/// is a presentation-only transform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymptomId(pub String);

impl SymptomId {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Humanized form for the symptom panel: underscores become spaces and
    /// each word is capitalized (`chest_pain` -> `Chest Pain`).
    pub fn display_name(&self) -> String {
        self.0
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// One transcript entry. Immutable once created; transcript order is
/// insertion order, `sent_at` carries no ordering authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl Message {
    pub fn now(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanizes_symptom_tokens_for_display() {
        assert_eq!(SymptomId::new("chest_pain").display_name(), "Chest Pain");
        assert_eq!(SymptomId::new("fever").display_name(), "Fever");
        assert_eq!(
            SymptomId::new("shortness_of_breath").display_name(),
            "Shortness Of Breath"
        );
    }

    #[test]
    fn humanization_leaves_canonical_token_untouched() {
        let symptom = SymptomId::new("chest_pain");
        let _ = symptom.display_name();
        assert_eq!(symptom.as_str(), "chest_pain");
        assert_eq!(symptom, SymptomId::new("chest_pain"));
    }
}
