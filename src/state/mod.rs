pub mod app_settings;
pub mod brands;
pub mod messages;
pub mod network;
pub mod predictor;
pub mod validate;
pub mod view_state;
pub mod weekly;

use serde::{Deserialize, Serialize};

/// Per-view fetch status. A failed fetch keeps a user-facing message; the
/// underlying error only goes to the log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}
