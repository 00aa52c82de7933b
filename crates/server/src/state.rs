//! Shared application state

use std::sync::Arc;

use crate::ai::InterpreterClient;
use crate::users::UserStore;

/// Per-process state handed to every handler. Generic over the search
/// backend so tests can swap in a stub index.
#[derive(Clone)]
pub struct AppState<B> {
    pub search: B,
    /// `None` when no interpreter key is configured; the pipeline then
    /// runs on fallback extraction alone.
    pub interpreter: Option<InterpreterClient>,
    pub users: Arc<dyn UserStore>,
}
