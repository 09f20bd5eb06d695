//! # Metadict TUI
//!
//! A terminal front-end for the Metadict dictionary and translation service.
//!
//! ## Features
//! - Bidirectional dictionary list with language and flag display
//! - Queries against any selection of dictionaries
//! - Grouped results, similar recommendations and external contents
//! - Re-query from a recommendation
//! - Initial query and dictionaries from a page URL or the command line
//! - Backend status dialog
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (query view-model)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod cli;
pub mod constants;
pub mod messages;
pub mod models;
pub mod network;
pub mod params;
pub mod routes;
pub mod settings;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState, QueryViewModel};
pub use messages::{NetworkCommand, NetworkResponse, RenderState, UiEffect, UiEvent};
pub use models::{Dictionary, Language, QueryResult};
pub use network::{MetadictClient, NetworkActor};
pub use params::QueryParameters;
pub use routes::View;
pub use settings::Settings;
