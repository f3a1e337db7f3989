//! Domain logic for FitPath: calorie goals, the typed local store, the AI
//! collaborator with its fallback policy, and the day flow state machine.

pub mod ai;
pub mod calorie;
pub mod day;
pub mod error;
pub mod flow;
pub mod i18n;
pub mod nutrition;
pub mod store;

pub use error::{FlowError, StoreError};
