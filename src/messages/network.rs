//! Network messages - communication between App and Network layers

use serde_json::Value;

/// The three request/response cycles the view-model drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Dictionaries,
    Query,
    Status,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::Dictionaries => "dictionaries",
            RequestKind::Query => "query",
            RequestKind::Status => "status",
        }
    }
}

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkCommand {
    /// Fetch the list of bidirected dictionaries
    ListDictionaries { id: u64 },
    /// Run a query against the selected dictionaries
    Query {
        id: u64,
        query: String,
        dictionaries: Vec<String>,
    },
    /// Fetch the backend status object
    GetStatus { id: u64 },
    /// Shutdown the network actor
    Shutdown,
}

impl NetworkCommand {
    pub fn kind(&self) -> Option<RequestKind> {
        match self {
            NetworkCommand::ListDictionaries { .. } => Some(RequestKind::Dictionaries),
            NetworkCommand::Query { .. } => Some(RequestKind::Query),
            NetworkCommand::GetStatus { .. } => Some(RequestKind::Status),
            NetworkCommand::Shutdown => None,
        }
    }
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkResponse {
    /// Decoded JSON body of a successful call
    Success {
        id: u64,
        kind: RequestKind,
        body: Value,
        time_ms: u64,
    },
    /// Transport or HTTP failure
    Error {
        id: u64,
        kind: RequestKind,
        message: String,
        /// HTTP status when the server answered at all
        http_status: Option<u16>,
        time_ms: u64,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Success { id, .. } => *id,
            NetworkResponse::Error { id, .. } => *id,
        }
    }

    pub fn kind(&self) -> RequestKind {
        match self {
            NetworkResponse::Success { kind, .. } => *kind,
            NetworkResponse::Error { kind, .. } => *kind,
        }
    }
}
