//! App layer - central state management and command processing
//!
//! The App actor receives UI events and network responses,
//! updates state, and emits network commands and render state.

pub mod actor;
pub mod commands;
pub mod effects;
pub mod observers;
pub mod state;
pub mod view_model;

pub use actor::AppActor;
pub use effects::{ChannelEffects, NoopEffects, UiEffects};
pub use state::AppState;
pub use view_model::{QueryViewModel, QueryState, ViewModelError, ViewState};
