//! Message types for inter-layer communication in the actor-based architecture.
//!
//! This module defines all messages that flow between the UI, App, and Network layers.

pub mod core_events;
pub mod effects;
pub mod network;
pub mod render;
pub mod ui_events;

pub use core_events::{CoreEvent, ViewEvent};
pub use effects::UiEffect;
pub use network::{NetworkCommand, NetworkResponse, RequestKind};
pub use render::RenderState;
pub use ui_events::UiEvent;
