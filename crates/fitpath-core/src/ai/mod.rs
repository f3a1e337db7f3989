//! Generative-AI collaborator.
//!
//! The [`Collaborator`] trait is the raw, fallible contract: four
//! operations that may fail with [`AiError`]. [`Coach`] wraps any
//! collaborator and applies the fallback policy, so callers of plan,
//! briefing and review always get a usable value.
//!
//! ```text
//! DayFlow
//!     |
//!     v
//! Coach --fallbacks--> Arc<dyn Collaborator>
//!                          |
//!                          +-- GeminiClient (HTTP, generateContent)
//!                          +-- Offline      (no API key configured)
//! ```

pub mod coach;
pub mod collaborator;
pub mod gemini;
pub mod prompts;
pub mod schema;
pub mod types;

pub use coach::Coach;
pub use collaborator::{Collaborator, Offline};
pub use gemini::{GeminiClient, GeminiConfig};
pub use types::{AiError, NutritionEstimate, PlanDraft, ReviewResult};
