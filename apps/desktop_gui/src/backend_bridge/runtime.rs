//! Backend worker: owns the tokio runtime and the HTTP client, drains
//! UI commands, and emits settle events back to the egui thread.

use std::thread;

use client_core::TriageClient;
use crossbeam_channel::{Receiver, Sender};
use shared::protocol::ChatOutcome;
use tracing::{debug, error, warn};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn spawn_backend_thread(
    server_url: String,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let client = TriageClient::new(server_url);
            debug!(server_url = client.server_url(), "backend worker ready");

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::FetchDisclaimer => match client.fetch_disclaimer().await {
                        Ok(disclaimer) => {
                            let _ = ui_tx.try_send(UiEvent::DisclaimerLoaded(disclaimer));
                        }
                        Err(err) => {
                            warn!("failed to load disclaimer: {err}");
                            let _ = ui_tx.try_send(UiEvent::DisclaimerUnavailable {
                                reason: err.to_string(),
                            });
                        }
                    },
                    BackendCommand::SendChat { message } => {
                        let event = match client.send_chat(&message).await {
                            Ok(ChatOutcome::Reply(reply)) => UiEvent::ChatReply {
                                response: reply.response,
                                symptoms: reply.symptoms,
                            },
                            Ok(ChatOutcome::Error(body)) => UiEvent::ChatBusinessError {
                                detail: body.error,
                            },
                            Err(err) => {
                                warn!("chat request failed: {err}");
                                UiEvent::ChatTransportFailure {
                                    reason: err.to_string(),
                                }
                            }
                        };
                        let _ = ui_tx.try_send(event);
                    }
                    BackendCommand::ResetConversation => {
                        let event = match client.reset_conversation().await {
                            Ok(()) => UiEvent::ResetOk,
                            Err(err) => {
                                warn!("reset request failed: {err}");
                                UiEvent::ResetFailed {
                                    reason: err.to_string(),
                                }
                            }
                        };
                        let _ = ui_tx.try_send(event);
                    }
                }
            }
        });
    });
}
