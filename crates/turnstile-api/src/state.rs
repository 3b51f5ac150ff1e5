//! Shared application state for the HTTP layer.

use turnstile_graph::GraphClient;

/// State injected into every handler: the one process-wide graph client,
/// created at startup and released during teardown. Clone is cheap (inner
/// pool Arc), so axum clones it per request freely.
#[derive(Clone)]
pub struct AppState {
    pub graph: GraphClient,
}
