//! UI layer for the desktop client: app shell, panels, and modals.

pub mod app;

pub use app::SymptomCheckerApp;
