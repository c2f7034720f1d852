//! egui application shell: renders the transcript, symptom panel, and
//! composer, and translates widget interactions into reducer intents.

use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use egui::RichText;
use tracing::warn;

use shared::domain::Role;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{
    ChatSettle, ConversationIntent, ConversationState, Effect, InteractionState,
};

const SYMPTOM_PANEL_WIDTH: f32 = 220.0;

pub struct SymptomCheckerApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    conversation: ConversationState,
    composer: String,
    disclaimer_text: String,
    disclaimer_load_failed: bool,
    status: String,
    alert: Option<String>,

    scroll_to_bottom: bool,
    focus_composer: bool,
}

impl SymptomCheckerApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            conversation: ConversationState::new(),
            composer: String::new(),
            disclaimer_text: String::new(),
            disclaimer_load_failed: false,
            status: String::new(),
            alert: None,
            scroll_to_bottom: false,
            focus_composer: false,
        };
        dispatch_backend_command(
            &app.cmd_tx,
            BackendCommand::FetchDisclaimer,
            &mut app.status,
        );
        app
    }

    fn apply_intent(&mut self, intent: ConversationIntent) {
        let effects = self.conversation.apply(intent);
        self.run_effects(effects);
    }

    fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SendChatRequest(message) => dispatch_backend_command(
                    &self.cmd_tx,
                    BackendCommand::SendChat { message },
                    &mut self.status,
                ),
                Effect::SendResetRequest => dispatch_backend_command(
                    &self.cmd_tx,
                    BackendCommand::ResetConversation,
                    &mut self.status,
                ),
                Effect::ScrollTranscriptToBottom => self.scroll_to_bottom = true,
                Effect::FocusComposer => self.focus_composer = true,
                Effect::RaiseAlert(text) => self.alert = Some(text),
            }
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::DisclaimerLoaded(text) => {
                    self.disclaimer_text = text;
                    self.disclaimer_load_failed = false;
                }
                UiEvent::DisclaimerUnavailable { reason } => {
                    // Acknowledgement stays available; the body just stays empty.
                    self.disclaimer_load_failed = true;
                    let err = UiError::from_message(UiErrorContext::Disclaimer, reason);
                    warn!("disclaimer unavailable: {}", err.message());
                }
                UiEvent::ChatReply { response, symptoms } => {
                    self.status.clear();
                    self.apply_intent(ConversationIntent::ChatSettled(ChatSettle::Reply {
                        response,
                        symptoms,
                    }));
                }
                UiEvent::ChatBusinessError { detail } => {
                    self.apply_intent(ConversationIntent::ChatSettled(
                        ChatSettle::BusinessError { detail },
                    ));
                }
                UiEvent::ChatTransportFailure { reason } => {
                    let err = UiError::from_message(UiErrorContext::Chat, reason);
                    warn!(
                        category = ?err.category(),
                        "chat settled with transport failure: {}",
                        err.message()
                    );
                    self.status = err.message().to_string();
                    self.apply_intent(ConversationIntent::ChatSettled(ChatSettle::TransportFailure));
                }
                UiEvent::ResetOk => {
                    self.status.clear();
                    self.apply_intent(ConversationIntent::ResetSucceeded);
                }
                UiEvent::ResetFailed { reason } => {
                    let err = UiError::from_message(UiErrorContext::Reset, reason);
                    warn!("reset failed: {}", err.message());
                    self.apply_intent(ConversationIntent::ResetFailed);
                }
                UiEvent::Error(err) => {
                    warn!(context = ?err.context(), "backend error: {}", err.message());
                    self.status = err.message().to_string();
                }
            }
        }
    }

    /// Mirrors the composer guard: whitespace-only input is silently
    /// ignored and left in the box.
    fn try_send_current_composer(&mut self) {
        if self.composer.trim().is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.composer);
        let effects = self
            .conversation
            .apply(ConversationIntent::SubmitMessage(text.clone()));
        if effects.is_empty() {
            // Rejected (pending or gated); keep what the user typed.
            self.composer = text;
        } else {
            self.run_effects(effects);
        }
    }

    fn header_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Medical Symptom Checker");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let reset = ui.add_enabled(
                        self.conversation.can_request_reset(),
                        egui::Button::new("Reset"),
                    );
                    if reset.clicked() {
                        self.apply_intent(ConversationIntent::RequestReset);
                    }
                });
            });
        });
    }

    fn symptom_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("symptoms")
            .default_width(SYMPTOM_PANEL_WIDTH)
            .show(ctx, |ui| {
                ui.heading("Detected Symptoms");
                ui.separator();
                match self.conversation.symptoms() {
                    Some(symptoms) if !symptoms.is_empty() => {
                        for symptom in symptoms {
                            ui.label(symptom.display_name());
                        }
                    }
                    _ => {
                        ui.label(RichText::new("No symptoms detected yet").weak().italics());
                    }
                }
            });
    }

    fn composer_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("composer").show(ctx, |ui| {
            let interactive = self.conversation.can_submit();
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                let send_label = match self.conversation.interaction() {
                    InteractionState::Pending => "Thinking...",
                    InteractionState::Idle => "Send",
                };
                let response = ui.add_enabled(
                    interactive,
                    egui::TextEdit::singleline(&mut self.composer)
                        .hint_text("Describe your symptoms...")
                        .desired_width(ui.available_width() - 90.0),
                );
                if self.focus_composer {
                    response.request_focus();
                    self.focus_composer = false;
                }
                let enter_pressed = response.lost_focus()
                    && ui.input(|input| input.key_pressed(egui::Key::Enter));
                let send_clicked = ui
                    .add_enabled(interactive, egui::Button::new(send_label))
                    .clicked();
                if interactive && (send_clicked || enter_pressed) {
                    self.try_send_current_composer();
                }
            });
            if !self.status.is_empty() {
                ui.label(RichText::new(&self.status).weak().small());
            }
            ui.add_space(4.0);
        });
    }

    fn transcript_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for message in self.conversation.transcript() {
                        let label = match message.role {
                            Role::User => "You",
                            Role::Assistant => "Medical Assistant",
                        };
                        let sent_at = message
                            .sent_at
                            .with_timezone(&chrono::Local)
                            .format("%H:%M");
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(label).strong().small());
                            ui.label(RichText::new(sent_at.to_string()).weak().small());
                        });
                        ui.label(&message.text);
                        ui.add_space(8.0);
                    }
                    if self.scroll_to_bottom {
                        ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
                        self.scroll_to_bottom = false;
                    }
                });
        });
    }

    fn disclaimer_modal(&mut self, ctx: &egui::Context) {
        if self.conversation.disclaimer_acknowledged() {
            return;
        }
        egui::Window::new("Medical Disclaimer")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_max_width(420.0);
                if !self.disclaimer_text.is_empty() {
                    ui.label(&self.disclaimer_text);
                } else if !self.disclaimer_load_failed {
                    ui.label(RichText::new("Loading disclaimer...").weak());
                }
                ui.add_space(8.0);
                if ui.button("I Understand").clicked() {
                    self.apply_intent(ConversationIntent::AcknowledgeDisclaimer);
                }
            });
    }

    fn reset_prompt(&mut self, ctx: &egui::Context) {
        if !self.conversation.reset_prompt_open() {
            return;
        }
        egui::Window::new("Reset conversation")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Are you sure you want to reset the conversation?");
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Yes, reset").clicked() {
                        self.apply_intent(ConversationIntent::ConfirmReset);
                    }
                    if ui.button("No").clicked() {
                        self.apply_intent(ConversationIntent::CancelReset);
                    }
                });
            });
    }

    fn alert_modal(&mut self, ctx: &egui::Context) {
        let Some(text) = self.alert.clone() else {
            return;
        };
        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(text);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    self.alert = None;
                }
            });
    }
}

impl eframe::App for SymptomCheckerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.header_panel(ctx);
        self.symptom_panel(ctx);
        self.composer_panel(ctx);
        self.transcript_panel(ctx);

        self.disclaimer_modal(ctx);
        self.reset_prompt(ctx);
        self.alert_modal(ctx);

        // Settle events arrive from the worker thread while egui sleeps;
        // poll for them at a coarse interval.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    fn app_with_event_feed() -> (SymptomCheckerApp, Sender<UiEvent>) {
        let (cmd_tx, _cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        (SymptomCheckerApp::new(cmd_tx, ui_rx), ui_tx)
    }

    #[test]
    fn failed_disclaimer_fetch_ends_the_loading_state_with_an_empty_body() {
        let (mut app, ui_tx) = app_with_event_feed();
        ui_tx
            .send(UiEvent::DisclaimerUnavailable {
                reason: "connection refused".to_string(),
            })
            .unwrap();
        app.process_ui_events();

        assert!(app.disclaimer_load_failed);
        assert!(app.disclaimer_text.is_empty());
    }

    #[test]
    fn late_disclaimer_load_clears_the_failed_state() {
        let (mut app, ui_tx) = app_with_event_feed();
        ui_tx
            .send(UiEvent::DisclaimerUnavailable {
                reason: "timed out".to_string(),
            })
            .unwrap();
        ui_tx
            .send(UiEvent::DisclaimerLoaded("For information only.".to_string()))
            .unwrap();
        app.process_ui_events();

        assert!(!app.disclaimer_load_failed);
        assert_eq!(app.disclaimer_text, "For information only.");
    }
}
