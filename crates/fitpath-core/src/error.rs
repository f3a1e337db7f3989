//! Error types for the store and the day flow.

use crate::ai::AiError;
use crate::flow::View;

/// Errors from writing to the local store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage backend failed: {0:#}")]
    Backend(#[from] anyhow::Error),

    #[error("failed to encode {key}: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("stored {key} is unreadable; refusing to overwrite it: {source}")]
    Corrupt {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("no plan saved for today")]
    NoPlan,

    #[error("no plan item with id {0:?}")]
    UnknownItem(String),
}

/// Errors from driving the onboarding / dashboard / review flow.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("invalid view transition: {from} -> {to}")]
    InvalidTransition { from: View, to: View },

    #[error("not available in the {actual} view (requires {expected})")]
    WrongView { expected: View, actual: View },

    #[error("no profile saved; complete onboarding first")]
    NoProfile,

    #[error("no plan for today; generate one first")]
    NoPlan,

    #[error("feedback must not be empty")]
    EmptyFeedback,

    #[error("food description must not be empty")]
    EmptyFoodDescription,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Ai(#[from] AiError),
}
