//! The `Collaborator` trait -- the seam between the day flow and the model.
//!
//! Implementations return raw results. An empty model reply for briefing,
//! review or food analysis is reported as [`AiError::EmptyResponse`]; an
//! empty plan reply is an empty list. Fallbacks live in [`super::Coach`].

use async_trait::async_trait;

use fitpath_db::models::{Language, PlanItem, UserProfile};

use super::types::{AiError, NutritionEstimate, PlanDraft, ReviewResult};

/// Generative backend for plans, briefings, reviews and food analysis.
///
/// # Object Safety
///
/// Object-safe, so it can be held as `Arc<dyn Collaborator>`.
#[async_trait]
pub trait Collaborator: Send + Sync {
    /// Human-readable name (e.g. "gemini").
    fn name(&self) -> &str;

    /// Draft today's schedule. `adjustment` is yesterday's suggested change.
    async fn generate_plan(
        &self,
        profile: &UserProfile,
        adjustment: Option<&str>,
        language: Language,
    ) -> Result<Vec<PlanDraft>, AiError>;

    /// Short motivational greeting for the morning.
    async fn generate_briefing(
        &self,
        profile: &UserProfile,
        plan: &[PlanItem],
        language: Language,
    ) -> Result<String, AiError>;

    /// Review the day's completion and feedback.
    async fn review_day(
        &self,
        profile: &UserProfile,
        plan: &[PlanItem],
        feedback: &str,
        language: Language,
    ) -> Result<ReviewResult, AiError>;

    /// Estimate nutrients for a free-text description of a meal.
    async fn analyze_food(
        &self,
        description: &str,
        language: Language,
    ) -> Result<NutritionEstimate, AiError>;
}

// Compile-time assertion: Collaborator must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn Collaborator) {}
};

/// Stand-in used when no API key is configured. Every call fails with
/// [`AiError::NotConfigured`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Offline;

#[async_trait]
impl Collaborator for Offline {
    fn name(&self) -> &str {
        "offline"
    }

    async fn generate_plan(
        &self,
        _profile: &UserProfile,
        _adjustment: Option<&str>,
        _language: Language,
    ) -> Result<Vec<PlanDraft>, AiError> {
        Err(AiError::NotConfigured)
    }

    async fn generate_briefing(
        &self,
        _profile: &UserProfile,
        _plan: &[PlanItem],
        _language: Language,
    ) -> Result<String, AiError> {
        Err(AiError::NotConfigured)
    }

    async fn review_day(
        &self,
        _profile: &UserProfile,
        _plan: &[PlanItem],
        _feedback: &str,
        _language: Language,
    ) -> Result<ReviewResult, AiError> {
        Err(AiError::NotConfigured)
    }

    async fn analyze_food(
        &self,
        _description: &str,
        _language: Language,
    ) -> Result<NutritionEstimate, AiError> {
        Err(AiError::NotConfigured)
    }
}
