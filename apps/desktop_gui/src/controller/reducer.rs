//! Conversation view-state machine.
//!
//! `ConversationState` is an owned value mutated only through
//! [`ConversationState::apply`], which maps one intent to zero or more
//! [`Effect`]s for the shell to run. The reducer performs no I/O, so the
//! whole send/settle/reset lifecycle is testable without a rendering
//! surface or a backend.

use shared::domain::{Message, Role, SymptomId};

pub const WELCOME_MESSAGE: &str = "Hello! I'm a medical symptom checker chatbot.\n\nI can help identify possible conditions based on your symptoms, but please remember that I cannot replace a real doctor's diagnosis.\n\nCould you please describe the symptoms you're experiencing?\nFor example: \"I have a headache and fever\" or \"I'm experiencing chest pain\"";
pub const RESET_WELCOME_MESSAGE: &str =
    "Conversation reset. Let's start fresh!\n\nPlease describe the symptoms you're experiencing.";
pub const BUSINESS_ERROR_PREFIX: &str = "Sorry, an error occurred: ";
pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "Sorry, I encountered an error. Please try again.";
pub const RESET_FAILED_ALERT: &str = "Failed to reset conversation. Please try again.";

/// Whether a chat send is in flight. `Pending` disables the input path,
/// which is what limits sends to one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    Pending,
}

/// How an in-flight chat send came back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatSettle {
    Reply {
        response: String,
        symptoms: Vec<SymptomId>,
    },
    /// The backend understood the request but reports a semantic error.
    BusinessError { detail: String },
    /// Transport or decode failure; no usable body.
    TransportFailure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationIntent {
    /// Composer submit (Send button or Enter). Carries the raw composer
    /// text; trimming and the empty guard happen here.
    SubmitMessage(String),
    ChatSettled(ChatSettle),
    /// Reset button pressed; opens the confirmation prompt.
    RequestReset,
    ConfirmReset,
    CancelReset,
    ResetSucceeded,
    ResetFailed,
    AcknowledgeDisclaimer,
}

/// Side effects the reducer asks the shell to perform. Pure data, so
/// tests can assert on them directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue `POST /api/chat` with this message text.
    SendChatRequest(String),
    /// Issue `POST /api/reset`.
    SendResetRequest,
    ScrollTranscriptToBottom,
    FocusComposer,
    RaiseAlert(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationState {
    transcript: Vec<Message>,
    /// `None` until the first successful reply; `Some(vec![])` is the
    /// distinct loaded-and-empty state.
    symptoms: Option<Vec<SymptomId>>,
    interaction: InteractionState,
    disclaimer_acknowledged: bool,
    reset_prompt_open: bool,
    reset_in_flight: bool,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationState {
    pub fn new() -> Self {
        Self {
            transcript: vec![Message::now(Role::Assistant, WELCOME_MESSAGE)],
            symptoms: None,
            interaction: InteractionState::Idle,
            disclaimer_acknowledged: false,
            reset_prompt_open: false,
            reset_in_flight: false,
        }
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn symptoms(&self) -> Option<&[SymptomId]> {
        self.symptoms.as_deref()
    }

    pub fn interaction(&self) -> InteractionState {
        self.interaction
    }

    pub fn is_pending(&self) -> bool {
        self.interaction == InteractionState::Pending
    }

    pub fn disclaimer_acknowledged(&self) -> bool {
        self.disclaimer_acknowledged
    }

    pub fn reset_prompt_open(&self) -> bool {
        self.reset_prompt_open
    }

    /// The composer accepts input only after acknowledgement and while
    /// neither a chat send nor a reset is in flight. A send accepted
    /// mid-reset could settle into the freshly cleared transcript as an
    /// orphan Assistant message.
    pub fn can_submit(&self) -> bool {
        self.disclaimer_acknowledged && !self.is_pending() && !self.reset_in_flight
    }

    /// Reset is available once the disclaimer is acknowledged and neither
    /// a chat send nor a reset is in flight.
    pub fn can_request_reset(&self) -> bool {
        self.disclaimer_acknowledged && !self.is_pending() && !self.reset_in_flight
    }

    pub fn apply(&mut self, intent: ConversationIntent) -> Vec<Effect> {
        match intent {
            ConversationIntent::SubmitMessage(raw) => {
                if !self.can_submit() {
                    return Vec::new();
                }
                let text = raw.trim();
                if text.is_empty() {
                    return Vec::new();
                }
                self.transcript.push(Message::now(Role::User, text));
                self.interaction = InteractionState::Pending;
                vec![
                    Effect::ScrollTranscriptToBottom,
                    Effect::SendChatRequest(text.to_string()),
                ]
            }
            ConversationIntent::ChatSettled(settle) => {
                // Unconditional cleanup before any branching: every settle
                // path re-enables the input and returns focus.
                self.interaction = InteractionState::Idle;
                match settle {
                    ChatSettle::Reply { response, symptoms } => {
                        self.transcript.push(Message::now(Role::Assistant, response));
                        self.symptoms = Some(symptoms);
                    }
                    ChatSettle::BusinessError { detail } => {
                        self.transcript.push(Message::now(
                            Role::Assistant,
                            format!("{BUSINESS_ERROR_PREFIX}{detail}"),
                        ));
                    }
                    ChatSettle::TransportFailure => {
                        self.transcript
                            .push(Message::now(Role::Assistant, TRANSPORT_FAILURE_MESSAGE));
                    }
                }
                vec![Effect::ScrollTranscriptToBottom, Effect::FocusComposer]
            }
            ConversationIntent::RequestReset => {
                // Blocked while Pending: a settle landing in a freshly
                // cleared transcript would break the invariant that the
                // welcome-back message opens the new conversation.
                if !self.can_request_reset() {
                    return Vec::new();
                }
                self.reset_prompt_open = true;
                Vec::new()
            }
            ConversationIntent::ConfirmReset => {
                if !self.reset_prompt_open {
                    return Vec::new();
                }
                self.reset_prompt_open = false;
                self.reset_in_flight = true;
                vec![Effect::SendResetRequest]
            }
            ConversationIntent::CancelReset => {
                self.reset_prompt_open = false;
                Vec::new()
            }
            ConversationIntent::ResetSucceeded => {
                self.reset_in_flight = false;
                // Transcript and symptom set clear in the same step.
                self.transcript.clear();
                self.symptoms = None;
                self.transcript
                    .push(Message::now(Role::Assistant, RESET_WELCOME_MESSAGE));
                vec![Effect::ScrollTranscriptToBottom]
            }
            ConversationIntent::ResetFailed => {
                self.reset_in_flight = false;
                vec![Effect::RaiseAlert(RESET_FAILED_ALERT.to_string())]
            }
            ConversationIntent::AcknowledgeDisclaimer => {
                if self.disclaimer_acknowledged {
                    return Vec::new();
                }
                self.disclaimer_acknowledged = true;
                vec![Effect::FocusComposer]
            }
        }
    }
}
