//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent, ViewEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        mut state: AppState,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        state.vm.subscribe(Box::new(|event: &ViewEvent| {
            if let ViewEvent::Core(core) = event {
                tracing::info!(event = core.as_str(), "Core event");
            }
        }));

        AppActor {
            state,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        let init = self.state.vm.initialize();
        self.dispatch(Some(init));
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    let follow_up = self.state.handle_response(response);
                    self.dispatch(follow_up);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    /// Hand a command to the network layer; a closed channel becomes a
    /// persistent error instead of a panic
    fn dispatch(&mut self, command: Option<NetworkCommand>) {
        let Some(command) = command else {
            return;
        };
        if let Err(err) = self.network_tx.send(command) {
            tracing::error!("Network actor is gone");
            self.state.vm.dispatch_failed(&err.0, "Network layer unavailable");
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Views and panes
            UiEvent::SwitchView(view) => self.state.switch_view(view),
            UiEvent::NextPane => self.state.next_pane(),
            UiEvent::PrevPane => self.state.prev_pane(),

            // Input editing
            UiEvent::StartEditing => self.state.start_editing(),
            UiEvent::StopEditing => self.state.stop_editing(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),

            // Queries
            UiEvent::SubmitQuery => {
                let command = self.state.submit_query();
                self.dispatch(command);
            }
            UiEvent::ReloadDictionaries => {
                let command = self.state.reload_dictionaries();
                self.dispatch(Some(command));
            }
            UiEvent::Requery => {
                let command = self.state.requery_selected();
                self.dispatch(command);
            }

            // Lists
            UiEvent::NextDictionary => self.state.next_dictionary(),
            UiEvent::PrevDictionary => self.state.prev_dictionary(),
            UiEvent::ToggleDictionary => self.state.toggle_dictionary(),
            UiEvent::NextRecommendation => self.state.next_recommendation(),
            UiEvent::PrevRecommendation => self.state.prev_recommendation(),

            // Scrolling belongs to the UI loop
            UiEvent::ScrollUp | UiEvent::ScrollDown => {}

            // Dialogs
            UiEvent::OpenStatus => {
                let command = self.state.open_status();
                self.dispatch(Some(command));
            }
            UiEvent::CloseStatus => self.state.close_status(),
            UiEvent::CloseError => self.state.close_error(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}
