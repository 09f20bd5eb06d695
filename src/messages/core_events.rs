//! Named application events, published to view-model listeners

/// Events of the core module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreEvent {
    /// The list of selected dictionaries has changed
    DictionarySelectionChange,
    /// A reload of the dictionary list has started
    UpdatingCache,
    /// The dictionary list reload has finished
    UpdateFinished,
    /// The user started a new query by picking a result entry
    InvokeClickQuery,
    /// The backend rejected a request because too many were sent
    TooManyRequests,
}

impl CoreEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoreEvent::DictionarySelectionChange => "DICTIONARY_SELECTION_CHANGE",
            CoreEvent::UpdatingCache => "UPDATING_CACHE",
            CoreEvent::UpdateFinished => "UPDATE_FINISHED",
            CoreEvent::InvokeClickQuery => "INVOKE_CLICK_QUERY",
            CoreEvent::TooManyRequests => "TOO_MANY_REQUESTS",
        }
    }
}

/// Change notifications emitted by the view-model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    LoadingChanged,
    ErrorChanged,
    ConnectionChanged,
    QueryTextChanged,
    ResultsChanged,
    StatusChanged,
    Core(CoreEvent),
}
