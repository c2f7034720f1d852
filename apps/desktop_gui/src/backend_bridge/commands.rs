//! Backend commands queued from UI to backend worker.

pub enum BackendCommand {
    FetchDisclaimer,
    SendChat { message: String },
    ResetConversation,
}
