use serde::{Deserialize, Serialize};

use crate::domain::SymptomId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisclaimerResponse {
    pub disclaimer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Normal reply body from `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    pub symptoms: Vec<SymptomId>,
}

/// Business-error body from `POST /api/chat`: the backend understood the
/// request but reports a semantic failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatErrorBody {
    pub error: String,
}

/// `POST /api/chat` answers with one of two body shapes. A payload matching
/// neither decodes as an error at the client layer, never as an empty reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatOutcome {
    Error(ChatErrorBody),
    Reply(ChatReply),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_normal_reply_shape() {
        let body = r#"{"response":"Noted.","symptoms":["headache","fever"]}"#;
        match serde_json::from_str::<ChatOutcome>(body).expect("reply shape") {
            ChatOutcome::Reply(reply) => {
                assert_eq!(reply.response, "Noted.");
                assert_eq!(
                    reply.symptoms,
                    vec![SymptomId::new("headache"), SymptomId::new("fever")]
                );
            }
            ChatOutcome::Error(_) => panic!("decoded as business error"),
        }
    }

    #[test]
    fn decodes_business_error_shape() {
        let body = r#"{"error":"No message provided"}"#;
        match serde_json::from_str::<ChatOutcome>(body).expect("error shape") {
            ChatOutcome::Error(err) => assert_eq!(err.error, "No message provided"),
            ChatOutcome::Reply(_) => panic!("decoded as reply"),
        }
    }

    #[test]
    fn rejects_bodies_matching_neither_shape() {
        assert!(serde_json::from_str::<ChatOutcome>(r#"{"response":"half a reply"}"#).is_err());
        assert!(serde_json::from_str::<ChatOutcome>(r#"["not","an","object"]"#).is_err());
    }

    #[test]
    fn empty_symptom_list_is_a_valid_reply() {
        let body = r#"{"response":"Tell me more.","symptoms":[]}"#;
        match serde_json::from_str::<ChatOutcome>(body).expect("reply shape") {
            ChatOutcome::Reply(reply) => assert!(reply.symptoms.is_empty()),
            ChatOutcome::Error(_) => panic!("decoded as business error"),
        }
    }
}
