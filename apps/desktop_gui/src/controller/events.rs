//! Backend worker -> UI events and error modeling.

use shared::domain::SymptomId;

pub enum UiEvent {
    DisclaimerLoaded(String),
    /// Disclaimer fetch failed; the modal still shows and acknowledgement
    /// is not blocked, the body area just stays empty.
    DisclaimerUnavailable {
        reason: String,
    },
    ChatReply {
        response: String,
        symptoms: Vec<SymptomId>,
    },
    ChatBusinessError {
        detail: String,
    },
    ChatTransportFailure {
        reason: String,
    },
    ResetOk,
    ResetFailed {
        reason: String,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Chat,
    Reset,
    Disclaimer,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("transport")
            || message_lower.contains("dns")
            || message_lower.contains("unreachable")
        {
            UiErrorCategory::Transport
        } else if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_connection_failures_as_transport() {
        let err = UiError::from_message(
            UiErrorContext::Chat,
            "transport failure: error sending request: connection refused",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
        assert_eq!(err.context(), UiErrorContext::Chat);
    }

    #[test]
    fn classifies_malformed_payloads_as_validation() {
        let err = UiError::from_message(
            UiErrorContext::Disclaimer,
            "malformed response payload: expected value at line 1",
        );
        assert_eq!(err.category(), UiErrorCategory::Validation);
    }
}
