//! Query view-model - UI state and the request/response cycles against the
//! dictionary API
//!
//! Operations that need the backend return the [`NetworkCommand`] to dispatch;
//! completions come back through [`QueryViewModel::handle_response`]. Every
//! request carries an id and only the latest id per [`RequestKind`] is
//! accepted, so a superseded response can never overwrite newer state.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

use crate::app::effects::UiEffects;
use crate::app::observers::{Listener, Observers, SubscriptionId};
use crate::constants::{
    MSG_ILLEGAL_STRUCTURE, MSG_INTERNAL_ERROR, MSG_NO_DICTIONARIES, MSG_NO_QUERY,
    MSG_QUERY_FAILED, STATUS_OK,
};
use crate::messages::{CoreEvent, NetworkCommand, NetworkResponse, RequestKind, ViewEvent};
use crate::models::{parse_dictionary_list, Dictionary, QueryResult};
use crate::params::{reverse_key, QueryParameters};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewModelError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// Progress and error flags shown by the UI.
///
/// `error` implies `error_message` is set; raising an error always clears
/// both loading flags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    pub connected: bool,
    pub loading: bool,
    pub loading_status: bool,
    pub error: bool,
    pub temporal_error: bool,
    pub error_message: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryState {
    pub query_text: Option<String>,
    /// Ordered set of dictionary keys
    pub selected_dictionaries: Vec<String>,
    pub available_dictionaries: Vec<Dictionary>,
}

impl QueryState {
    fn is_available(&self, key: &str) -> bool {
        self.available_dictionaries.iter().any(|d| d.key() == key)
    }

    fn select(&mut self, key: String) -> bool {
        if self.selected_dictionaries.contains(&key) {
            return false;
        }
        self.selected_dictionaries.push(key);
        true
    }

    fn has_query_text(&self) -> bool {
        self.query_text.as_deref().is_some_and(|t| !t.is_empty())
    }
}

pub struct QueryViewModel {
    view: ViewState,
    query: QueryState,
    result: QueryResult,
    status: Option<Value>,
    status_loaded_at: Option<DateTime<Utc>>,
    status_dialog_open: bool,
    parameters: Option<QueryParameters>,
    next_request_id: u64,
    pending: HashMap<RequestKind, u64>,
    effects: Box<dyn UiEffects>,
    observers: Observers,
}

impl QueryViewModel {
    pub fn new(parameters: QueryParameters, effects: Box<dyn UiEffects>) -> Self {
        QueryViewModel {
            view: ViewState::default(),
            query: QueryState::default(),
            result: QueryResult::default(),
            status: None,
            status_loaded_at: None,
            status_dialog_open: false,
            parameters: Some(parameters),
            next_request_id: 1,
            pending: HashMap::new(),
            effects,
            observers: Observers::new(),
        }
    }

    // ========================
    // Read access
    // ========================

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn result(&self) -> &QueryResult {
        &self.result
    }

    pub fn status(&self) -> Option<&Value> {
        self.status.as_ref()
    }

    pub fn status_loaded_at(&self) -> Option<DateTime<Utc>> {
        self.status_loaded_at
    }

    pub fn is_status_dialog_open(&self) -> bool {
        self.status_dialog_open
    }

    /// Selected dictionary keys joined with commas
    pub fn selected_dictionaries_string(&self) -> String {
        self.query.selected_dictionaries.join(",")
    }

    pub fn is_pending(&self, kind: RequestKind) -> bool {
        self.pending.contains_key(&kind)
    }

    // ========================
    // Change notification
    // ========================

    pub fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        self.observers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn notify(&self, event: ViewEvent) {
        self.observers.notify(&event);
    }

    // ========================
    // Operations
    // ========================

    pub fn set_query_text(&mut self, text: Option<String>) {
        if self.query.query_text != text {
            self.query.query_text = text;
            self.notify(ViewEvent::QueryTextChanged);
        }
    }

    /// Start loading the dictionary list
    pub fn initialize(&mut self) -> NetworkCommand {
        self.view.loading = true;
        self.notify(ViewEvent::LoadingChanged);
        self.notify(ViewEvent::Core(CoreEvent::UpdatingCache));

        let id = self.issue(RequestKind::Dictionaries);
        tracing::info!(id, "Loading dictionaries");
        NetworkCommand::ListDictionaries { id }
    }

    /// Apply the initial query text and dictionary keys.
    ///
    /// Each key is selected if available; otherwise its reversed form is
    /// selected if that is available; otherwise it is dropped.
    pub fn reconcile_from_parameters(&mut self, query_text: Option<&str>, dictionary_param: Option<&str>) {
        if let Some(text) = query_text.filter(|t| !t.is_empty()) {
            self.set_query_text(Some(text.to_string()));
        }

        let Some(param) = dictionary_param.filter(|p| !p.is_empty()) else {
            return;
        };

        let mut changed = false;
        for requested in param.split(',') {
            if self.query.is_available(requested) {
                changed |= self.query.select(requested.to_string());
                continue;
            }
            let reversed = reverse_key(requested);
            if self.query.is_available(&reversed) {
                changed |= self.query.select(reversed);
            } else {
                tracing::debug!(key = requested, "Dropping unavailable dictionary");
            }
        }

        if changed {
            self.notify(ViewEvent::Core(CoreEvent::DictionarySelectionChange));
        }
    }

    pub fn toggle_dictionary_selection(&mut self, dictionary: Option<&Dictionary>) -> Result<(), ViewModelError> {
        let dictionary = dictionary.ok_or(ViewModelError::InvalidArgument("no dictionary given"))?;
        let key = dictionary.key();
        if key.is_empty() {
            return Err(ViewModelError::InvalidArgument("dictionary has no key"));
        }

        let selected = &mut self.query.selected_dictionaries;
        if let Some(pos) = selected.iter().position(|k| k == key) {
            selected.remove(pos);
        } else {
            selected.push(key.to_string());
        }
        tracing::debug!(selection = %self.selected_dictionaries_string(), "Dictionary selection changed");
        self.notify(ViewEvent::Core(CoreEvent::DictionarySelectionChange));
        Ok(())
    }

    /// Submit the current query. Returns `None` when a precondition fails;
    /// the user is told through a transient notification and nothing changes.
    pub fn submit_query(&mut self) -> Option<NetworkCommand> {
        if !self.query.has_query_text() {
            self.effects.notify_transient(MSG_NO_QUERY);
            return None;
        }
        if self.query.selected_dictionaries.is_empty() {
            self.effects.notify_transient(MSG_NO_DICTIONARIES);
            return None;
        }

        self.view.loading = true;
        self.effects.disable_input();
        self.notify(ViewEvent::LoadingChanged);

        let id = self.issue(RequestKind::Query);
        let query = self.query.query_text.clone().unwrap_or_default();
        tracing::info!(id, query = %query, dictionaries = %self.selected_dictionaries_string(), "Submitting query");
        Some(NetworkCommand::Query {
            id,
            query,
            dictionaries: self.query.selected_dictionaries.clone(),
        })
    }

    /// Replace the query text (e.g. from a recommendation) and submit again
    pub fn requery(&mut self, new_query_text: &str) -> Option<NetworkCommand> {
        self.set_query_text(Some(new_query_text.to_string()));
        self.effects.scroll_to_top();
        self.notify(ViewEvent::Core(CoreEvent::InvokeClickQuery));
        self.submit_query()
    }

    pub fn report_error(&mut self, message: impl Into<String>, temporal: bool) {
        let message = message.into();
        tracing::warn!(temporal, message = %message, "Reporting error");
        self.view.loading = false;
        self.view.loading_status = false;
        self.view.error = true;
        self.view.error_message = Some(message);
        self.view.temporal_error = temporal;
        self.notify(ViewEvent::LoadingChanged);
        self.notify(ViewEvent::ErrorChanged);
    }

    pub fn close_error(&mut self) {
        self.view.error = false;
        self.view.temporal_error = false;
        self.view.error_message = None;
        self.effects.enable_input();
        self.notify(ViewEvent::ErrorChanged);
    }

    pub fn reload_status(&mut self) -> NetworkCommand {
        self.view.loading_status = true;
        self.notify(ViewEvent::LoadingChanged);
        let id = self.issue(RequestKind::Status);
        tracing::info!(id, "Reloading status");
        NetworkCommand::GetStatus { id }
    }

    /// Show the status dialog and refresh its content
    pub fn open_status_dialog(&mut self) -> NetworkCommand {
        self.status_dialog_open = true;
        self.reload_status()
    }

    pub fn close_status_dialog(&mut self) {
        self.status_dialog_open = false;
    }

    /// A command could not be handed to the network layer
    pub fn dispatch_failed(&mut self, command: &NetworkCommand, message: &str) {
        if let Some(kind) = command.kind() {
            self.pending.remove(&kind);
        }
        self.report_error(message, false);
    }

    // ========================
    // Responses
    // ========================

    /// Apply a network response. May return a follow-up command (the
    /// automatic query after the dictionary list arrived).
    pub fn handle_response(&mut self, response: NetworkResponse) -> Option<NetworkCommand> {
        let kind = response.kind();
        let id = response.id();
        if self.pending.get(&kind) != Some(&id) {
            tracing::debug!(id, kind = kind.as_str(), "Ignoring stale response");
            return None;
        }
        self.pending.remove(&kind);

        match response {
            NetworkResponse::Success { body, time_ms, .. } => {
                tracing::info!(id, kind = kind.as_str(), time_ms, "Response received");
                match kind {
                    RequestKind::Dictionaries => return self.dictionaries_loaded(&body),
                    RequestKind::Query => self.query_answered(&body),
                    RequestKind::Status => self.status_loaded(body),
                }
            }
            NetworkResponse::Error {
                message, http_status, ..
            } => {
                if http_status == Some(429) {
                    self.notify(ViewEvent::Core(CoreEvent::TooManyRequests));
                }
                self.status_dialog_open = false;
                self.report_error(message, false);
            }
        }
        None
    }

    fn dictionaries_loaded(&mut self, body: &Value) -> Option<NetworkCommand> {
        self.view.loading = false;
        self.notify(ViewEvent::LoadingChanged);

        let Some(dictionaries) = parse_dictionary_list(body) else {
            self.report_error(MSG_INTERNAL_ERROR, false);
            return None;
        };

        tracing::info!(count = dictionaries.len(), "Dictionaries loaded");
        self.query.available_dictionaries = dictionaries;

        // Drop selections that disappeared with a reload
        let query = &mut self.query;
        let before = query.selected_dictionaries.len();
        let available = &query.available_dictionaries;
        query
            .selected_dictionaries
            .retain(|key| available.iter().any(|d| d.key() == key));
        if query.selected_dictionaries.len() != before {
            self.notify(ViewEvent::Core(CoreEvent::DictionarySelectionChange));
        }

        if let Some(params) = self.parameters.take() {
            self.reconcile_from_parameters(params.query_string.as_deref(), params.dictionaries.as_deref());
        }

        self.view.connected = true;
        self.notify(ViewEvent::ConnectionChanged);
        self.notify(ViewEvent::Core(CoreEvent::UpdateFinished));

        if self.query.has_query_text() && !self.query.selected_dictionaries.is_empty() {
            return self.submit_query();
        }
        None
    }

    /// Any answer unlocks the input; temporal errors must not block the
    /// next query
    fn query_answered(&mut self, body: &Value) {
        self.view.loading = false;
        self.effects.enable_input();
        self.notify(ViewEvent::LoadingChanged);

        let status = body.get("status").and_then(Value::as_str);
        if status != Some(STATUS_OK) {
            let mut message = format!("{}{}", MSG_QUERY_FAILED, status.unwrap_or("unknown"));
            if let Some(detail) = body.get("message").and_then(Value::as_str) {
                message.push_str(" - ");
                message.push_str(detail);
            }
            self.report_error(message, true);
            return;
        }

        match body.get("data").and_then(QueryResult::from_data) {
            Some(result) => {
                tracing::info!(
                    groups = result.entry_groups.len(),
                    recommendations = result.similar_recommendations.len(),
                    external = result.external_contents.len(),
                    "Query results stored"
                );
                self.result = result;
                self.notify(ViewEvent::ResultsChanged);
            }
            None => self.report_error(MSG_ILLEGAL_STRUCTURE, true),
        }
    }

    fn status_loaded(&mut self, body: Value) {
        self.status = Some(body);
        self.status_loaded_at = Some(Utc::now());
        self.view.loading_status = false;
        self.notify(ViewEvent::StatusChanged);
        self.notify(ViewEvent::LoadingChanged);
    }

    /// Allocate a request id and remember it as the pending one for `kind`
    fn issue(&mut self, kind: RequestKind) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        if let Some(previous) = self.pending.insert(kind, id) {
            tracing::debug!(previous, id, kind = kind.as_str(), "Superseding pending request");
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::UiEffect;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingEffects(Arc<Mutex<Vec<UiEffect>>>);

    impl RecordingEffects {
        fn taken(&self) -> Vec<UiEffect> {
            std::mem::take(&mut *self.0.lock().unwrap())
        }
    }

    impl UiEffects for RecordingEffects {
        fn disable_input(&mut self) {
            self.0.lock().unwrap().push(UiEffect::DisableInput);
        }
        fn enable_input(&mut self) {
            self.0.lock().unwrap().push(UiEffect::EnableInput);
        }
        fn notify_transient(&mut self, message: &str) {
            self.0.lock().unwrap().push(UiEffect::Notify(message.to_string()));
        }
        fn scroll_to_top(&mut self) {
            self.0.lock().unwrap().push(UiEffect::ScrollToTop);
        }
    }

    fn view_model(params: QueryParameters) -> (QueryViewModel, RecordingEffects) {
        let effects = RecordingEffects::default();
        (QueryViewModel::new(params, Box::new(effects.clone())), effects)
    }

    fn no_params() -> QueryParameters {
        QueryParameters::default()
    }

    fn success(id: u64, kind: RequestKind, body: Value) -> NetworkResponse {
        NetworkResponse::Success {
            id,
            kind,
            body,
            time_ms: 5,
        }
    }

    fn failure(id: u64, kind: RequestKind, message: &str, http_status: Option<u16>) -> NetworkResponse {
        NetworkResponse::Error {
            id,
            kind,
            message: message.to_string(),
            http_status,
            time_ms: 5,
        }
    }

    fn dictionary_list(keys: &[&str]) -> Value {
        let data: Vec<Value> = keys.iter().map(|k| json!({"queryStringWithDialect": k})).collect();
        json!({"status": "OK", "data": data})
    }

    fn query_payload(word: &str) -> Value {
        json!({
            "status": "OK",
            "data": {
                "groupedBilingualResults": [{"groupIdentifier": word}],
                "similarRecommendations": [{"generalForm": format!("{word}s")}],
                "externalContents": []
            }
        })
    }

    fn command_id(command: &NetworkCommand) -> u64 {
        match command {
            NetworkCommand::ListDictionaries { id }
            | NetworkCommand::Query { id, .. }
            | NetworkCommand::GetStatus { id } => *id,
            NetworkCommand::Shutdown => panic!("no id on shutdown"),
        }
    }

    /// View-model connected to the given dictionaries without parameters
    fn connected(keys: &[&str]) -> (QueryViewModel, RecordingEffects) {
        let (mut vm, effects) = view_model(no_params());
        let id = command_id(&vm.initialize());
        assert!(vm.handle_response(success(id, RequestKind::Dictionaries, dictionary_list(keys))).is_none());
        effects.taken();
        (vm, effects)
    }

    #[test]
    fn test_reconcile_selects_reversed_key() {
        let (mut vm, _) = connected(&["en-de"]);
        vm.reconcile_from_parameters(None, Some("de-en"));
        assert_eq!(vm.query().selected_dictionaries, vec!["en-de"]);
    }

    #[test]
    fn test_reconcile_drops_unmatched_key() {
        let (mut vm, _) = connected(&["en-de", "de-fr"]);
        vm.reconcile_from_parameters(None, Some("de-fr"));
        let before = vm.query().selected_dictionaries.clone();

        vm.reconcile_from_parameters(None, Some("en-ja"));
        assert_eq!(vm.query().selected_dictionaries, before);
        assert!(!vm.view().error);
    }

    #[test]
    fn test_reconcile_preserves_order_and_sets_text() {
        let (mut vm, _) = connected(&["en-de", "de-fr", "en-us-de"]);
        vm.reconcile_from_parameters(Some("haus"), Some("fr-de,xx-yy,en-de,de-us-en"));
        assert_eq!(vm.query().selected_dictionaries, vec!["de-fr", "en-de", "en-us-de"]);
        assert_eq!(vm.query().query_text.as_deref(), Some("haus"));

        vm.reconcile_from_parameters(Some(""), None);
        assert_eq!(vm.query().query_text.as_deref(), Some("haus"));
    }

    #[test]
    fn test_reconcile_does_not_duplicate() {
        let (mut vm, _) = connected(&["en-de"]);
        vm.reconcile_from_parameters(None, Some("en-de,de-en"));
        assert_eq!(vm.query().selected_dictionaries, vec!["en-de"]);
    }

    #[test]
    fn test_toggle_twice_restores_selection() {
        let (mut vm, _) = connected(&["en-de", "de-fr", "en-fr"]);
        vm.reconcile_from_parameters(None, Some("en-de,de-fr"));
        let original = vm.query().selected_dictionaries.clone();

        let dict = Dictionary::new("de-fr");
        vm.toggle_dictionary_selection(Some(&dict)).unwrap();
        assert_eq!(vm.query().selected_dictionaries, vec!["en-de"]);
        vm.toggle_dictionary_selection(Some(&dict)).unwrap();
        assert_eq!(vm.query().selected_dictionaries, original);

        let other = Dictionary::new("en-fr");
        vm.toggle_dictionary_selection(Some(&other)).unwrap();
        vm.toggle_dictionary_selection(Some(&other)).unwrap();
        assert_eq!(vm.query().selected_dictionaries, original);
    }

    #[test]
    fn test_toggle_rejects_missing_dictionary() {
        let (mut vm, _) = connected(&["en-de"]);
        assert_eq!(
            vm.toggle_dictionary_selection(None),
            Err(ViewModelError::InvalidArgument("no dictionary given"))
        );
        assert!(vm.toggle_dictionary_selection(Some(&Dictionary::new(""))).is_err());
        assert!(vm.query().selected_dictionaries.is_empty());
    }

    #[test]
    fn test_submit_without_text_changes_nothing() {
        let (mut vm, effects) = connected(&["en-de"]);
        vm.reconcile_from_parameters(None, Some("en-de"));
        let view_before = vm.view().clone();
        let query_before = vm.query().clone();

        assert!(vm.submit_query().is_none());
        assert_eq!(*vm.view(), view_before);
        assert_eq!(*vm.query(), query_before);
        assert!(!vm.is_pending(RequestKind::Query));
        assert_eq!(effects.taken(), vec![UiEffect::Notify(MSG_NO_QUERY.into())]);
    }

    #[test]
    fn test_submit_without_dictionaries_notifies() {
        let (mut vm, effects) = connected(&["en-de"]);
        vm.set_query_text(Some("hello".into()));
        assert!(vm.submit_query().is_none());
        assert!(!vm.view().loading);
        assert_eq!(effects.taken(), vec![UiEffect::Notify(MSG_NO_DICTIONARIES.into())]);
    }

    #[test]
    fn test_submit_and_store_results() {
        let (mut vm, effects) = connected(&["en-de"]);
        vm.reconcile_from_parameters(Some("hello"), Some("en-de"));

        let command = vm.submit_query().unwrap();
        assert_eq!(
            command,
            NetworkCommand::Query {
                id: command_id(&command),
                query: "hello".into(),
                dictionaries: vec!["en-de".into()],
            }
        );
        assert!(vm.view().loading);
        assert_eq!(effects.taken(), vec![UiEffect::DisableInput]);

        vm.handle_response(success(command_id(&command), RequestKind::Query, query_payload("hello")));
        assert!(!vm.view().loading);
        assert_eq!(vm.result().entry_groups[0]["groupIdentifier"], "hello");
        assert_eq!(effects.taken(), vec![UiEffect::EnableInput]);
    }

    #[test]
    fn test_failed_status_is_temporal_and_keeps_results() {
        let (mut vm, _) = connected(&["en-de"]);
        vm.reconcile_from_parameters(Some("hello"), Some("en-de"));
        let id = command_id(&vm.submit_query().unwrap());
        vm.handle_response(success(id, RequestKind::Query, query_payload("hello")));
        let stored = vm.result().clone();

        let id = command_id(&vm.submit_query().unwrap());
        vm.handle_response(success(
            id,
            RequestKind::Query,
            json!({"status": "FAILURE", "message": "engine down", "data": "garbage"}),
        ));

        assert!(vm.view().error);
        assert!(vm.view().temporal_error);
        assert!(!vm.view().loading);
        assert_eq!(
            vm.view().error_message.as_deref(),
            Some("The last query failed: FAILURE - engine down")
        );
        assert_eq!(*vm.result(), stored);
    }

    #[test]
    fn test_failed_status_without_message() {
        let (mut vm, effects) = connected(&["en-de"]);
        vm.reconcile_from_parameters(Some("hello"), Some("en-de"));
        let id = command_id(&vm.submit_query().unwrap());
        assert_eq!(effects.taken(), vec![UiEffect::DisableInput]);

        vm.handle_response(success(id, RequestKind::Query, json!({"status": "FAILURE"})));
        assert_eq!(vm.view().error_message.as_deref(), Some("The last query failed: FAILURE"));
        assert_eq!(effects.taken(), vec![UiEffect::EnableInput]);

        // A new query can be sent while the notice is still shown
        assert!(vm.view().temporal_error);
        assert!(vm.submit_query().is_some());
    }

    #[test]
    fn test_malformed_results_are_temporal_error() {
        let (mut vm, effects) = connected(&["en-de"]);
        vm.reconcile_from_parameters(Some("hello"), Some("en-de"));
        let id = command_id(&vm.submit_query().unwrap());
        effects.taken();

        vm.handle_response(success(
            id,
            RequestKind::Query,
            json!({"status": "OK", "data": {"groupedBilingualResults": {}, "similarRecommendations": [], "externalContents": []}}),
        ));
        assert!(vm.view().temporal_error);
        assert_eq!(vm.view().error_message.as_deref(), Some(MSG_ILLEGAL_STRUCTURE));
        assert!(vm.result().is_empty());
        // The notice does not lock the input
        assert_eq!(effects.taken(), vec![UiEffect::EnableInput]);
    }

    #[test]
    fn test_transport_failure_is_persistent() {
        let (mut vm, _) = connected(&["en-de"]);
        vm.reconcile_from_parameters(Some("hello"), Some("en-de"));
        let id = command_id(&vm.submit_query().unwrap());
        vm.handle_response(failure(id, RequestKind::Query, "Connection failed: refused", None));

        assert!(vm.view().error);
        assert!(!vm.view().temporal_error);
        assert_eq!(vm.view().error_message.as_deref(), Some("Connection failed: refused"));
    }

    #[test]
    fn test_initialize_auto_submits_once() {
        let params = QueryParameters {
            query_string: Some("hello".into()),
            dictionaries: Some("en-de".into()),
        };
        let (mut vm, _) = view_model(params);

        let init = vm.initialize();
        assert!(vm.view().loading);

        let body = json!({"status": "OK", "data": [{"queryStringWithDialect": "en-de", "bidirectional": true}]});
        let follow_up = vm.handle_response(success(command_id(&init), RequestKind::Dictionaries, body.clone()));

        assert!(vm.view().connected);
        assert_eq!(vm.query().selected_dictionaries, vec!["en-de"]);
        assert!(matches!(follow_up, Some(NetworkCommand::Query { ref query, .. }) if query == "hello"));
        assert!(vm.view().loading);

        // A duplicate delivery of the same response is stale and triggers nothing
        assert!(vm.handle_response(success(command_id(&init), RequestKind::Dictionaries, body)).is_none());
    }

    #[test]
    fn test_initialize_without_parameters_does_not_submit() {
        let (mut vm, _) = view_model(no_params());
        let id = command_id(&vm.initialize());
        assert!(vm.handle_response(success(id, RequestKind::Dictionaries, dictionary_list(&["en-de"]))).is_none());
        assert!(vm.view().connected);
        assert!(!vm.view().loading);
    }

    #[test]
    fn test_initialize_with_malformed_response() {
        let (mut vm, _) = view_model(no_params());
        let id = command_id(&vm.initialize());
        vm.handle_response(success(id, RequestKind::Dictionaries, json!({"status": "OK"})));

        assert!(!vm.view().connected);
        assert!(!vm.view().loading);
        assert!(vm.view().error);
        assert!(!vm.view().temporal_error);
        assert_eq!(vm.view().error_message.as_deref(), Some(MSG_INTERNAL_ERROR));
    }

    #[test]
    fn test_initialize_failure() {
        let (mut vm, _) = view_model(no_params());
        let id = command_id(&vm.initialize());
        vm.handle_response(failure(id, RequestKind::Dictionaries, "Request timed out", None));
        assert!(!vm.view().connected);
        assert_eq!(vm.view().error_message.as_deref(), Some("Request timed out"));
    }

    #[test]
    fn test_reload_prunes_vanished_selection() {
        let (mut vm, _) = connected(&["en-de", "de-fr"]);
        vm.reconcile_from_parameters(None, Some("en-de,de-fr"));
        let id = command_id(&vm.initialize());
        vm.handle_response(success(id, RequestKind::Dictionaries, dictionary_list(&["de-fr"])));
        assert_eq!(vm.query().selected_dictionaries, vec!["de-fr"]);
    }

    #[test]
    fn test_close_error_resets_flags() {
        let (mut vm, effects) = connected(&["en-de"]);
        vm.report_error("boom", true);
        assert!(vm.view().error);

        vm.close_error();
        assert!(!vm.view().error);
        assert!(!vm.view().temporal_error);
        assert_eq!(vm.view().error_message, None);
        assert_eq!(effects.taken(), vec![UiEffect::EnableInput]);
    }

    #[test]
    fn test_report_error_clears_loading() {
        let (mut vm, _) = connected(&["en-de"]);
        vm.reload_status();
        vm.reconcile_from_parameters(Some("x"), Some("en-de"));
        vm.submit_query();
        assert!(vm.view().loading && vm.view().loading_status);

        vm.report_error("nope", false);
        assert!(!vm.view().loading);
        assert!(!vm.view().loading_status);
        assert!(vm.view().error_message.is_some());
    }

    #[test]
    fn test_requery_scrolls_and_submits() {
        let (mut vm, effects) = connected(&["en-de"]);
        vm.reconcile_from_parameters(Some("house"), Some("en-de"));

        let command = vm.requery("houses").unwrap();
        assert!(matches!(command, NetworkCommand::Query { ref query, .. } if query == "houses"));
        assert_eq!(vm.query().query_text.as_deref(), Some("houses"));
        assert_eq!(effects.taken(), vec![UiEffect::ScrollToTop, UiEffect::DisableInput]);
    }

    #[test]
    fn test_newer_query_supersedes_older() {
        let (mut vm, _) = connected(&["en-de"]);
        vm.reconcile_from_parameters(Some("first"), Some("en-de"));
        let first = command_id(&vm.submit_query().unwrap());
        let second = command_id(&vm.requery("second").unwrap());

        vm.handle_response(success(second, RequestKind::Query, query_payload("second")));
        vm.handle_response(success(first, RequestKind::Query, query_payload("first")));
        assert_eq!(vm.result().entry_groups[0]["groupIdentifier"], "second");
    }

    #[test]
    fn test_status_reload() {
        let (mut vm, _) = connected(&["en-de"]);
        let command = vm.open_status_dialog();
        assert!(vm.is_status_dialog_open());
        assert!(vm.view().loading_status);

        vm.handle_response(success(command_id(&command), RequestKind::Status, json!({"engines": 3})));
        assert!(!vm.view().loading_status);
        assert_eq!(vm.status(), Some(&json!({"engines": 3})));
        assert!(vm.status_loaded_at().is_some());
    }

    #[test]
    fn test_status_failure_closes_dialog() {
        let (mut vm, _) = connected(&["en-de"]);
        let id = command_id(&vm.open_status_dialog());
        vm.handle_response(failure(id, RequestKind::Status, "HTTP 500", Some(500)));
        assert!(!vm.is_status_dialog_open());
        assert!(!vm.view().loading_status);
        assert!(vm.view().error);
    }

    #[test]
    fn test_dispatch_failure_becomes_error() {
        let (mut vm, _) = connected(&["en-de"]);
        vm.reconcile_from_parameters(Some("hello"), Some("en-de"));
        let command = vm.submit_query().unwrap();
        vm.dispatch_failed(&command, "network layer unavailable");

        assert!(!vm.is_pending(RequestKind::Query));
        assert!(!vm.view().loading);
        assert!(!vm.view().temporal_error);
        assert_eq!(vm.view().error_message.as_deref(), Some("network layer unavailable"));
    }

    #[test]
    fn test_listeners_see_core_events() {
        let (mut vm, _) = connected(&["en-de"]);
        let events = Arc::new(Mutex::new(Vec::new()));
        {
            let events = Arc::clone(&events);
            vm.subscribe(Box::new(move |e: &ViewEvent| events.lock().unwrap().push(e.clone())));
        }

        vm.toggle_dictionary_selection(Some(&Dictionary::new("en-de"))).unwrap();
        vm.set_query_text(Some("x".into()));
        let id = command_id(&vm.submit_query().unwrap());
        vm.handle_response(failure(id, RequestKind::Query, "HTTP 429", Some(429)));

        let events = events.lock().unwrap();
        assert_eq!(events[0], ViewEvent::Core(CoreEvent::DictionarySelectionChange));
        assert_eq!(events[1], ViewEvent::QueryTextChanged);
        assert!(events.contains(&ViewEvent::Core(CoreEvent::TooManyRequests)));
        assert_eq!(events.last(), Some(&ViewEvent::ErrorChanged));
    }
}
