//! Daily intake totals, plan completion, and the day summary.

use chrono::NaiveDate;
use serde::Serialize;

use fitpath_db::models::{FoodItem, PlanItem};

/// Summed nutrients over a set of food log entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DailyTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl DailyTotals {
    pub fn of(logs: &[FoodItem]) -> Self {
        logs.iter().fold(Self::default(), |acc, item| Self {
            calories: acc.calories + item.calories,
            protein: acc.protein + item.protein,
            carbs: acc.carbs + item.carbs,
            fat: acc.fat + item.fat,
        })
    }

    /// Intake as a share of `goal`, capped at 100. A non-positive goal yields 0.
    pub fn progress_percent(&self, goal: i64) -> f64 {
        if goal <= 0 {
            return 0.0;
        }
        (self.calories / goal as f64 * 100.0).min(100.0)
    }
}

/// Completed versus total plan items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub completed: usize,
    pub total: usize,
    /// `round(completed / total * 100)`, 0 for an empty plan.
    pub rate: u32,
}

impl Completion {
    pub fn of(plan: &[PlanItem]) -> Self {
        let total = plan.len();
        let completed = plan.iter().filter(|item| item.completed).count();
        let rate = if total == 0 {
            0
        } else {
            (completed as f64 / total as f64 * 100.0).round() as u32
        };
        Self {
            completed,
            total,
            rate,
        }
    }
}

/// One day at a glance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub date: NaiveDate,
    pub total_calories_in: f64,
    /// Sum of the negative (burn) plan calories, as a positive number.
    pub planned_calories_out: i64,
    pub completion_rate: u32,
}

impl DaySummary {
    pub fn new(date: NaiveDate, plan: &[PlanItem], logs: &[FoodItem]) -> Self {
        let planned_calories_out = plan
            .iter()
            .filter_map(|item| item.calories)
            .filter(|c| *c < 0)
            .map(|c| -i64::from(c))
            .sum();
        Self {
            date,
            total_calories_in: DailyTotals::of(logs).calories,
            planned_calories_out,
            completion_rate: Completion::of(plan).rate,
        }
    }
}

/// Append a quick tag to free-text feedback: `"<prev> <tag>."`.
pub fn apply_tag(feedback: &str, tag: &str) -> String {
    if feedback.is_empty() {
        format!("{tag}.")
    } else {
        format!("{feedback} {tag}.")
    }
}
