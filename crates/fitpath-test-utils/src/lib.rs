//! Shared test utilities for fitpath integration tests.
//!
//! Provides:
//! - an in-memory SQLite database with migrations applied, one per test,
//! - a [`FixedClock`] pinned to a known morning,
//! - [`ScriptedCollaborator`], a collaborator with canned replies that
//!   records every call it receives,
//! - sample profiles and plan drafts.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sqlx::SqlitePool;

use fitpath_core::ai::{AiError, Coach, Collaborator, NutritionEstimate, PlanDraft, ReviewResult};
use fitpath_core::day::{Clock, FixedClock};
use fitpath_core::flow::DayFlow;
use fitpath_core::store::LocalStore;
use fitpath_db::backend::SqliteKv;
use fitpath_db::config::DbConfig;
use fitpath_db::models::{ActivityLevel, ActivityType, Gender, Language, PlanItem, UserProfile};
use fitpath_db::pool;

/// Monday morning, UTC+8.
pub const MORNING: &str = "2025-03-10T07:30:00+08:00";

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// Open a fresh in-memory SQLite database with migrations applied.
pub async fn memory_pool() -> SqlitePool {
    pool::open(&DbConfig::new(DbConfig::MEMORY_URL))
        .await
        .expect("in-memory database should open")
}

/// A clock pinned to [`MORNING`].
pub fn morning_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::at(MORNING).expect("MORNING is valid RFC 3339"))
}

/// A store over a fresh in-memory SQLite database.
pub async fn sqlite_store(clock: Arc<dyn Clock>) -> LocalStore {
    LocalStore::new(Arc::new(SqliteKv::new(memory_pool().await)), clock)
}

/// A flow over an in-memory SQLite store and the given collaborator.
pub async fn flow_with(
    collaborator: Arc<dyn Collaborator>,
    clock: Arc<FixedClock>,
) -> DayFlow {
    let store = sqlite_store(clock.clone()).await;
    DayFlow::new(store, Coach::new(collaborator, clock))
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// 80 kg / 175 cm / 30 y male, sedentary. Goal 1599 kcal.
pub fn sample_profile() -> UserProfile {
    UserProfile {
        name: "Alex".into(),
        age: 30,
        gender: Gender::Male,
        height: 175.0,
        current_weight: 80.0,
        target_weight: 72.0,
        profession: "Software engineer".into(),
        wake_up_time: "07:00".into(),
        sleep_time: "23:00".into(),
        dietary_preferences: Some("vegetarian".into()),
        activity_level: Some(ActivityLevel::Sedentary),
    }
}

/// A realistic four-item day.
pub fn sample_drafts() -> Vec<PlanDraft> {
    vec![
        draft("07:00", ActivityType::Hydration, "Water", None, false),
        draft("07:30", ActivityType::Meal, "Greek yogurt and berries", Some(320.0), true),
        draft("12:30", ActivityType::Exercise, "Lunchtime walk", Some(-150.0), true),
        draft("19:00", ActivityType::Meal, "Lentil curry", Some(550.0), false),
    ]
}

pub fn draft(
    time: &str,
    kind: ActivityType,
    title: &str,
    calories: Option<f64>,
    is_highlight: bool,
) -> PlanDraft {
    PlanDraft {
        time: time.into(),
        kind,
        title: title.into(),
        description: format!("{title} ({kind})"),
        calories,
        is_highlight,
    }
}

pub fn sample_estimate(name: &str, calories: f64) -> NutritionEstimate {
    NutritionEstimate {
        name: name.into(),
        calories,
        protein: 10.0,
        carbs: 20.0,
        fat: 5.0,
    }
}

// ---------------------------------------------------------------------------
// ScriptedCollaborator
// ---------------------------------------------------------------------------

/// What a scripted operation answers with.
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Value(T),
    /// The model replied with nothing.
    Empty,
    /// The request failed.
    Fail,
}

/// One recorded request.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Plan {
        adjustment: Option<String>,
        language: Language,
    },
    Briefing {
        highlights: Vec<String>,
    },
    Review {
        feedback: String,
        completed: usize,
    },
    Food {
        description: String,
    },
}

/// Collaborator with canned replies. Defaults to successful replies built
/// from [`sample_drafts`].
pub struct ScriptedCollaborator {
    plan: Reply<Vec<PlanDraft>>,
    briefing: Reply<String>,
    review: Reply<ReviewResult>,
    food: Reply<NutritionEstimate>,
    calls: Mutex<Vec<Call>>,
}

impl Default for ScriptedCollaborator {
    fn default() -> Self {
        Self {
            plan: Reply::Value(sample_drafts()),
            briefing: Reply::Value("Nail that lunchtime walk!".into()),
            review: Reply::Value(ReviewResult::new(
                "Solid, consistent day.",
                "Add a protein snack at 3pm",
            )),
            food: Reply::Value(sample_estimate("Boiled eggs", 155.0)),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedCollaborator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every operation fails.
    pub fn failing() -> Self {
        Self {
            plan: Reply::Fail,
            briefing: Reply::Fail,
            review: Reply::Fail,
            food: Reply::Fail,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every operation replies with nothing.
    pub fn empty() -> Self {
        Self {
            plan: Reply::Empty,
            briefing: Reply::Empty,
            review: Reply::Empty,
            food: Reply::Empty,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_plan(mut self, reply: Reply<Vec<PlanDraft>>) -> Self {
        self.plan = reply;
        self
    }

    pub fn with_briefing(mut self, reply: Reply<String>) -> Self {
        self.briefing = reply;
        self
    }

    pub fn with_review(mut self, reply: Reply<ReviewResult>) -> Self {
        self.review = reply;
        self
    }

    pub fn with_food(mut self, reply: Reply<NutritionEstimate>) -> Self {
        self.food = reply;
        self
    }

    /// Requests received so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("calls lock").push(call);
    }

    fn answer<T: Clone>(reply: &Reply<T>) -> Result<T, AiError> {
        match reply {
            Reply::Value(value) => Ok(value.clone()),
            Reply::Empty => Err(AiError::EmptyResponse),
            Reply::Fail => Err(AiError::Api {
                status: 503,
                message: "scripted failure".into(),
            }),
        }
    }
}

#[async_trait]
impl Collaborator for ScriptedCollaborator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate_plan(
        &self,
        _profile: &UserProfile,
        adjustment: Option<&str>,
        language: Language,
    ) -> Result<Vec<PlanDraft>, AiError> {
        self.record(Call::Plan {
            adjustment: adjustment.map(str::to_owned),
            language,
        });
        match &self.plan {
            Reply::Empty => Ok(Vec::new()),
            other => Self::answer(other),
        }
    }

    async fn generate_briefing(
        &self,
        _profile: &UserProfile,
        plan: &[PlanItem],
        _language: Language,
    ) -> Result<String, AiError> {
        self.record(Call::Briefing {
            highlights: plan
                .iter()
                .filter(|item| item.is_highlight())
                .map(|item| item.title.clone())
                .collect(),
        });
        Self::answer(&self.briefing)
    }

    async fn review_day(
        &self,
        _profile: &UserProfile,
        plan: &[PlanItem],
        feedback: &str,
        _language: Language,
    ) -> Result<ReviewResult, AiError> {
        self.record(Call::Review {
            feedback: feedback.to_owned(),
            completed: plan.iter().filter(|item| item.completed).count(),
        });
        Self::answer(&self.review)
    }

    async fn analyze_food(
        &self,
        description: &str,
        _language: Language,
    ) -> Result<NutritionEstimate, AiError> {
        self.record(Call::Food {
            description: description.to_owned(),
        });
        Self::answer(&self.food)
    }
}
