//! Typed local store over an injected [`KvBackend`].
//!
//! Reads never fail: missing, malformed, or unreadable entries come back as
//! `None` / empty / default and are logged at `warn`. Writes propagate
//! backend failures as [`StoreError`].

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use fitpath_db::backend::KvBackend;
use fitpath_db::models::{FoodItem, Language, PlanItem, StoredProfile, UserProfile};

use crate::calorie::{self, MIN_RECOMMENDED_CALORIES};
use crate::day::{Clock, DayKey};
use crate::error::StoreError;

/// Persisted key names.
pub mod keys {
    pub const PROFILE: &str = "fitpath_profile";
    pub const PLAN: &str = "fitpath_plan";
    pub const FOOD_LOGS: &str = "fitpath_food_logs";
    pub const ADJUSTMENT: &str = "fitpath_adjustment";
    pub const DATE: &str = "fitpath_date";
    pub const LANGUAGE: &str = "fitpath_language";
}

/// Profile, plan, food log and settings persistence.
#[derive(Clone)]
pub struct LocalStore {
    backend: Arc<dyn KvBackend>,
    clock: Arc<dyn Clock>,
}

impl LocalStore {
    pub fn new(backend: Arc<dyn KvBackend>, clock: Arc<dyn Clock>) -> Self {
        Self { backend, clock }
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    // -----------------------------------------------------------------------
    // Profile
    // -----------------------------------------------------------------------

    /// Compute the calorie goal, persist profile + goal, return the record.
    pub async fn save_profile(&self, profile: UserProfile) -> Result<StoredProfile, StoreError> {
        let goal = calorie::calculate_calorie_goal(&profile);
        if calorie::is_below_recommended(goal) {
            warn!(
                goal,
                minimum = MIN_RECOMMENDED_CALORIES,
                "computed calorie goal is below the recommended minimum"
            );
        }

        let stored = StoredProfile {
            profile,
            daily_calorie_goal: goal,
        };
        self.write_json(keys::PROFILE, &stored).await?;
        debug!(goal, "profile saved");
        Ok(stored)
    }

    pub async fn get_profile(&self) -> Option<StoredProfile> {
        self.read_json(keys::PROFILE).await
    }

    // -----------------------------------------------------------------------
    // Plan
    // -----------------------------------------------------------------------

    /// Persist today's plan and stamp it with today's day key.
    pub async fn save_plan(&self, items: &[PlanItem]) -> Result<(), StoreError> {
        self.write_json(keys::PLAN, &items).await?;
        let today = self.clock.today().to_string();
        self.backend.set(keys::DATE, &today).await?;
        debug!(items = items.len(), day = %today, "plan saved");
        Ok(())
    }

    /// Today's plan, or `None` when absent or stamped with another day.
    pub async fn get_plan(&self) -> Option<Vec<PlanItem>> {
        let today = self.clock.today();
        let stamped = self.read_raw(keys::DATE).await?;
        match stamped.parse::<DayKey>() {
            Ok(day) if day == today => {}
            Ok(day) => {
                debug!(stored = %day, today = %today, "stored plan expired");
                return None;
            }
            Err(_) => {
                warn!(value = %stamped, "unreadable plan date stamp; treating plan as expired");
                return None;
            }
        }
        self.read_json(keys::PLAN).await
    }

    /// Remove the stored plan. The date stamp is left in place.
    pub async fn clear_plan(&self) -> Result<(), StoreError> {
        self.backend.remove(keys::PLAN).await?;
        debug!("plan cleared");
        Ok(())
    }

    /// Flip `completed` on one of today's plan items and persist the plan.
    pub async fn toggle_plan_item(&self, id: &str) -> Result<PlanItem, StoreError> {
        let mut plan = self.get_plan().await.ok_or(StoreError::NoPlan)?;
        let item = plan
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| StoreError::UnknownItem(id.to_owned()))?;
        item.completed = !item.completed;
        let toggled = item.clone();

        self.save_plan(&plan).await?;
        Ok(toggled)
    }

    // -----------------------------------------------------------------------
    // Food log
    // -----------------------------------------------------------------------

    /// Append an entry and return the full log.
    ///
    /// Unlike reads, an existing log that cannot be decoded is an error and
    /// is left untouched, so history is never replaced.
    pub async fn save_food_log(&self, item: FoodItem) -> Result<Vec<FoodItem>, StoreError> {
        let mut logs: Vec<FoodItem> = match self.backend.get(keys::FOOD_LOGS).await? {
            None => Vec::new(),
            Some(raw) => serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
                key: keys::FOOD_LOGS,
                source,
            })?,
        };
        logs.push(item);
        self.write_json(keys::FOOD_LOGS, &logs).await?;
        debug!(entries = logs.len(), "food log appended");
        Ok(logs)
    }

    /// All entries, or only those inside `date`'s local-day bounds.
    pub async fn get_food_logs(&self, date: Option<NaiveDate>) -> Vec<FoodItem> {
        let logs: Vec<FoodItem> = self.read_json(keys::FOOD_LOGS).await.unwrap_or_default();
        match date {
            None => logs,
            Some(date) => {
                let bounds = self.clock.bounds_of(date);
                logs.into_iter()
                    .filter(|log| bounds.contains(log.timestamp))
                    .collect()
            }
        }
    }

    /// Entries logged today.
    pub async fn today_food_logs(&self) -> Vec<FoodItem> {
        self.get_food_logs(Some(self.clock.today().date())).await
    }

    // -----------------------------------------------------------------------
    // Settings
    // -----------------------------------------------------------------------

    pub async fn set_language(&self, language: Language) -> Result<(), StoreError> {
        self.backend.set(keys::LANGUAGE, language.code()).await?;
        Ok(())
    }

    /// The stored language, `en` when unset or unrecognised.
    pub async fn get_language(&self) -> Language {
        match self.read_raw(keys::LANGUAGE).await {
            None => Language::default(),
            Some(code) => code.parse().unwrap_or_else(|_| {
                warn!(value = %code, "unrecognised stored language; using default");
                Language::default()
            }),
        }
    }

    pub async fn set_adjustment(&self, adjustment: &str) -> Result<(), StoreError> {
        self.backend.set(keys::ADJUSTMENT, adjustment).await?;
        Ok(())
    }

    /// The pending plan adjustment, empty when unset.
    pub async fn get_adjustment(&self) -> String {
        self.read_raw(keys::ADJUSTMENT).await.unwrap_or_default()
    }

    pub async fn clear_adjustment(&self) -> Result<(), StoreError> {
        self.backend.remove(keys::ADJUSTMENT).await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    async fn read_raw(&self, key: &'static str) -> Option<String> {
        match self.backend.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key, backend = self.backend.name(), error = %e, "storage read failed; treating as absent");
                None
            }
        }
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &'static str) -> Option<T> {
        let raw = self.read_raw(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "malformed stored value; treating as absent");
                None
            }
        }
    }

    async fn write_json<T: Serialize + ?Sized>(
        &self,
        key: &'static str,
        value: &T,
    ) -> Result<(), StoreError> {
        let encoded =
            serde_json::to_string(value).map_err(|source| StoreError::Encode { key, source })?;
        self.backend.set(key, &encoded).await?;
        Ok(())
    }
}
