//! The onboarding / dashboard / review flow.
//!
//! [`DayFlow`] owns the in-session state (current view, cached profile and
//! plan, the morning briefing) and drives the store and the coach. The
//! initial view is derived from the store: no profile means onboarding,
//! otherwise the dashboard. Entering the dashboard with an empty plan
//! generates one, followed by the briefing.

mod view;

pub use view::View;

use tracing::{debug, info, warn};

use fitpath_db::models::{FoodItem, Language, PlanItem, StoredProfile, UserProfile};

use crate::ai::{Coach, ReviewResult};
use crate::error::{FlowError, StoreError};
use crate::nutrition::{Completion, DailyTotals, DaySummary};
use crate::store::LocalStore;

/// Session state machine over a [`LocalStore`] and a [`Coach`].
pub struct DayFlow {
    store: LocalStore,
    coach: Coach,
    view: View,
    language: Language,
    profile: Option<StoredProfile>,
    plan: Vec<PlanItem>,
    briefing: Option<String>,
    review: Option<ReviewResult>,
}

impl DayFlow {
    pub fn new(store: LocalStore, coach: Coach) -> Self {
        Self {
            store,
            coach,
            view: View::Onboarding,
            language: Language::default(),
            profile: None,
            plan: Vec::new(),
            briefing: None,
            review: None,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn view(&self) -> View {
        self.view
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn profile(&self) -> Option<&StoredProfile> {
        self.profile.as_ref()
    }

    pub fn plan(&self) -> &[PlanItem] {
        &self.plan
    }

    /// The briefing produced with the current plan, if generated this session.
    pub fn briefing(&self) -> Option<&str> {
        self.briefing.as_deref()
    }

    /// The last submitted review, until the next day starts.
    pub fn last_review(&self) -> Option<&ReviewResult> {
        self.review.as_ref()
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    pub fn coach(&self) -> &Coach {
        &self.coach
    }

    // -----------------------------------------------------------------------
    // Session start
    // -----------------------------------------------------------------------

    /// Restore language, profile and today's plan from the store and pick
    /// the initial view. Never generates.
    pub async fn start(&mut self) -> View {
        self.language = self.store.get_language().await;
        self.profile = self.store.get_profile().await;
        self.plan = self.store.get_plan().await.unwrap_or_default();
        self.briefing = None;
        self.review = None;
        self.view = if self.profile.is_some() {
            View::Dashboard
        } else {
            View::Onboarding
        };
        debug!(view = %self.view, plan_items = self.plan.len(), "session started");
        self.view
    }

    // -----------------------------------------------------------------------
    // Onboarding
    // -----------------------------------------------------------------------

    /// Save the profile (recomputing the calorie goal), enter the dashboard,
    /// and generate today's plan if there is none.
    pub async fn submit_profile(&mut self, profile: UserProfile) -> Result<StoredProfile, FlowError> {
        self.check_transition(View::Dashboard)?;

        let stored = self.store.save_profile(profile).await?;
        info!(name = %stored.profile.name, goal = stored.daily_calorie_goal, "profile submitted");

        self.profile = Some(stored.clone());
        self.view = View::Dashboard;
        self.ensure_plan().await?;
        Ok(stored)
    }

    /// Leave the dashboard to re-enter onboarding.
    pub fn edit_profile(&mut self) -> Result<(), FlowError> {
        self.check_transition(View::Onboarding)?;
        self.view = View::Onboarding;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Dashboard
    // -----------------------------------------------------------------------

    /// Generate today's plan and briefing when the plan is empty.
    ///
    /// Returns `true` when a generation ran. Taking `&mut self` keeps a
    /// second generation from starting while one is in flight.
    pub async fn ensure_plan(&mut self) -> Result<bool, FlowError> {
        self.require_view(View::Dashboard)?;
        let profile = self.profile.as_ref().ok_or(FlowError::NoProfile)?;
        if !self.plan.is_empty() {
            return Ok(false);
        }

        let adjustment = self.store.get_adjustment().await;
        info!(
            collaborator = self.coach.collaborator_name(),
            has_adjustment = !adjustment.is_empty(),
            "generating today's plan"
        );
        let plan = self
            .coach
            .daily_plan(&profile.profile, &adjustment, self.language)
            .await;
        if plan.is_empty() {
            warn!("collaborator returned an empty plan; nothing saved");
        } else {
            self.store.save_plan(&plan).await?;
        }

        let briefing = self
            .coach
            .briefing(&profile.profile, &plan, self.language)
            .await;

        self.plan = plan;
        self.briefing = Some(briefing);
        Ok(true)
    }

    /// Discard today's plan and generate a new one.
    pub async fn retry(&mut self) -> Result<(), FlowError> {
        self.require_view(View::Dashboard)?;
        self.store.clear_plan().await?;
        self.plan.clear();
        self.briefing = None;
        self.ensure_plan().await?;
        Ok(())
    }

    /// Flip completion of one plan item.
    pub async fn toggle_item(&mut self, id: &str) -> Result<PlanItem, FlowError> {
        self.require_view(View::Dashboard)?;
        let toggled = self.store.toggle_plan_item(id).await.map_err(|e| match e {
            StoreError::NoPlan => FlowError::NoPlan,
            other => FlowError::Store(other),
        })?;
        if let Some(item) = self.plan.iter_mut().find(|item| item.id == toggled.id) {
            item.completed = toggled.completed;
        }
        debug!(id = %toggled.id, completed = toggled.completed, "plan item toggled");
        Ok(toggled)
    }

    /// Analyse a meal description, append it to the log, return today's logs.
    pub async fn log_food(&mut self, description: &str) -> Result<Vec<FoodItem>, FlowError> {
        self.require_view(View::Dashboard)?;
        let description = description.trim();
        if description.is_empty() {
            return Err(FlowError::EmptyFoodDescription);
        }

        let item = self.coach.analyze_food(description, self.language).await?;
        info!(name = %item.name, calories = item.calories, "food logged");
        self.store.save_food_log(item).await?;
        Ok(self.store.today_food_logs().await)
    }

    pub async fn today_food(&self) -> Vec<FoodItem> {
        self.store.today_food_logs().await
    }

    pub async fn today_totals(&self) -> DailyTotals {
        DailyTotals::of(&self.today_food().await)
    }

    pub async fn day_summary(&self) -> DaySummary {
        let date = self.store.clock().today().date();
        DaySummary::new(date, &self.plan, &self.today_food().await)
    }

    // -----------------------------------------------------------------------
    // Review
    // -----------------------------------------------------------------------

    /// End the day and enter the evening check-in.
    pub fn begin_review(&mut self) -> Result<Completion, FlowError> {
        self.check_transition(View::Review)?;
        if self.plan.is_empty() {
            return Err(FlowError::NoPlan);
        }
        self.view = View::Review;
        Ok(Completion::of(&self.plan))
    }

    /// Review the day. The suggested adjustment is stored for the next plan.
    pub async fn submit_review(&mut self, feedback: &str) -> Result<ReviewResult, FlowError> {
        self.require_view(View::Review)?;
        let feedback = feedback.trim();
        if feedback.is_empty() {
            return Err(FlowError::EmptyFeedback);
        }
        let profile = self.profile.as_ref().ok_or(FlowError::NoProfile)?;

        let review = self
            .coach
            .review(&profile.profile, &self.plan, feedback, self.language)
            .await;
        if review.suggested_adjustment.trim().is_empty() {
            self.store.clear_adjustment().await?;
        } else {
            self.store.set_adjustment(&review.suggested_adjustment).await?;
        }

        self.review = Some(review.clone());
        Ok(review)
    }

    /// Start the next day: clear plan and briefing, keep profile and food
    /// history, return to the dashboard and generate a fresh plan.
    pub async fn next_day(&mut self) -> Result<(), FlowError> {
        self.check_transition(View::Dashboard)?;
        self.store.clear_plan().await?;
        self.plan.clear();
        self.briefing = None;
        self.review = None;
        self.view = View::Dashboard;
        info!("starting next day");
        self.ensure_plan().await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Settings
    // -----------------------------------------------------------------------

    /// Persist the language. Takes effect for subsequent AI requests.
    pub async fn set_language(&mut self, language: Language) -> Result<(), FlowError> {
        self.store.set_language(language).await?;
        self.language = language;
        Ok(())
    }

    /// Drop the pending adjustment so the next plan ignores yesterday.
    pub async fn clear_adjustment(&mut self) -> Result<(), FlowError> {
        self.store.clear_adjustment().await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn check_transition(&self, to: View) -> Result<(), FlowError> {
        if View::is_valid_transition(self.view, to) {
            Ok(())
        } else {
            Err(FlowError::InvalidTransition {
                from: self.view,
                to,
            })
        }
    }

    fn require_view(&self, expected: View) -> Result<(), FlowError> {
        if self.view == expected {
            Ok(())
        } else {
            Err(FlowError::WrongView {
                expected,
                actual: self.view,
            })
        }
    }
}
