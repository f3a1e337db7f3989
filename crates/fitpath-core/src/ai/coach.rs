//! Fallback policy over a [`Collaborator`].
//!
//! | operation      | empty reply            | failure                   |
//! |----------------|------------------------|---------------------------|
//! | plan           | empty plan             | one hydration item        |
//! | briefing       | "empty" greeting       | "error" greeting          |
//! | review         | "Good job today." pair | "Great effort today!" pair|
//! | analyze food   | error                  | error                     |

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use fitpath_db::models::{ActivityType, FoodItem, Language, PlanItem, UserProfile};

use super::collaborator::Collaborator;
use super::types::{AiError, ReviewResult};
use crate::day::Clock;
use crate::i18n;

/// Id of the single item returned when plan generation fails.
pub const FALLBACK_ITEM_ID: &str = "fallback-1";

/// Collaborator plus fallbacks and id assignment.
#[derive(Clone)]
pub struct Coach {
    collaborator: Arc<dyn Collaborator>,
    clock: Arc<dyn Clock>,
}

impl Coach {
    pub fn new(collaborator: Arc<dyn Collaborator>, clock: Arc<dyn Clock>) -> Self {
        Self {
            collaborator,
            clock,
        }
    }

    pub fn collaborator_name(&self) -> &str {
        self.collaborator.name()
    }

    /// Today's plan. Ids are `task-<epoch ms>-<index>`; on failure a single
    /// localised hydration item at wake-up time.
    pub async fn daily_plan(
        &self,
        profile: &UserProfile,
        adjustment: &str,
        language: Language,
    ) -> Vec<PlanItem> {
        let adjustment = Some(adjustment.trim()).filter(|a| !a.is_empty());
        match self
            .collaborator
            .generate_plan(profile, adjustment, language)
            .await
        {
            Ok(drafts) => {
                let stamp = self.clock.now_millis();
                debug!(items = drafts.len(), "plan generated");
                drafts
                    .into_iter()
                    .enumerate()
                    .map(|(index, draft)| draft.into_item(format!("task-{stamp}-{index}")))
                    .collect()
            }
            Err(e) => {
                warn!(
                    collaborator = self.collaborator.name(),
                    error = %e,
                    "plan generation failed; using fallback plan"
                );
                fallback_plan(profile, language)
            }
        }
    }

    /// Morning greeting, never empty.
    pub async fn briefing(
        &self,
        profile: &UserProfile,
        plan: &[PlanItem],
        language: Language,
    ) -> String {
        let strings = i18n::strings(language);
        match self
            .collaborator
            .generate_briefing(profile, plan, language)
            .await
        {
            Ok(text) if !text.trim().is_empty() => text.trim().to_owned(),
            Ok(_) | Err(AiError::EmptyResponse) => {
                debug!("empty briefing reply; using default greeting");
                strings.briefing_empty.to_owned()
            }
            Err(e) => {
                warn!(
                    collaborator = self.collaborator.name(),
                    error = %e,
                    "briefing failed; using fallback greeting"
                );
                strings.briefing_error.to_owned()
            }
        }
    }

    /// Evening review, never failing.
    pub async fn review(
        &self,
        profile: &UserProfile,
        plan: &[PlanItem],
        feedback: &str,
        language: Language,
    ) -> ReviewResult {
        let strings = i18n::strings(language);
        match self
            .collaborator
            .review_day(profile, plan, feedback, language)
            .await
        {
            Ok(review) => review,
            Err(AiError::EmptyResponse) => {
                debug!("empty review reply; using default review");
                ReviewResult::new(strings.review_empty.0, strings.review_empty.1)
            }
            Err(e) => {
                warn!(
                    collaborator = self.collaborator.name(),
                    error = %e,
                    "review failed; using fallback review"
                );
                ReviewResult::new(strings.review_error.0, strings.review_error.1)
            }
        }
    }

    /// Analyse a food description into a loggable entry. Failures propagate.
    pub async fn analyze_food(
        &self,
        description: &str,
        language: Language,
    ) -> Result<FoodItem, AiError> {
        let estimate = self
            .collaborator
            .analyze_food(description, language)
            .await?;
        Ok(estimate.into_food_item(Uuid::new_v4().to_string(), self.clock.now_millis()))
    }
}

/// The plan used when generation fails.
pub fn fallback_plan(profile: &UserProfile, language: Language) -> Vec<PlanItem> {
    let strings = i18n::strings(language);
    vec![PlanItem {
        id: FALLBACK_ITEM_ID.to_owned(),
        time: profile.wake_up_time.clone(),
        kind: ActivityType::Hydration,
        title: strings.fallback_title.to_owned(),
        description: strings.fallback_description.to_owned(),
        calories: Some(0),
        completed: false,
        is_highlight: Some(false),
    }]
}
