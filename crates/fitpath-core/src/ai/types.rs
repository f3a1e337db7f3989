//! Values exchanged with the collaborator, and its error type.

use serde::{Deserialize, Serialize};

use fitpath_db::models::{ActivityType, FoodItem, PlanItem};

/// Errors from a collaborator call.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("AI collaborator is not configured (set GEMINI_API_KEY or ai.api_key)")]
    NotConfigured,

    #[error("AI request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("AI API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("AI returned an empty response")]
    EmptyResponse,

    #[error("AI returned an invalid response: {0}")]
    InvalidResponse(String),
}

impl AiError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }
}

/// A plan entry as produced by the collaborator, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDraft {
    pub time: String,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default)]
    pub is_highlight: bool,
}

impl PlanDraft {
    /// Turn the draft into a stored plan item, not yet completed.
    pub fn into_item(self, id: String) -> PlanItem {
        PlanItem {
            id,
            time: self.time,
            kind: self.kind,
            title: self.title,
            description: self.description,
            calories: self.calories.map(|c| c.round() as i32),
            completed: false,
            is_highlight: Some(self.is_highlight),
        }
    }
}

/// Evening review outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResult {
    pub feedback: String,
    pub suggested_adjustment: String,
}

impl ReviewResult {
    pub fn new(feedback: impl Into<String>, suggested_adjustment: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            suggested_adjustment: suggested_adjustment.into(),
        }
    }
}

/// Nutrition estimate for a free-text food description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionEstimate {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl NutritionEstimate {
    /// Stamp an id and timestamp to make a loggable entry.
    pub fn into_food_item(self, id: String, timestamp: i64) -> FoodItem {
        FoodItem {
            id,
            timestamp,
            name: self.name,
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_into_item_rounds_calories_and_resets_completion() {
        let draft = PlanDraft {
            time: "12:30".into(),
            kind: ActivityType::Exercise,
            title: "Brisk walk".into(),
            description: "20 minutes around the block".into(),
            calories: Some(-119.6),
            is_highlight: true,
        };
        let item = draft.into_item("task-1-3".into());
        assert_eq!(item.id, "task-1-3");
        assert_eq!(item.calories, Some(-120));
        assert!(!item.completed);
        assert!(item.is_highlight());
    }

    #[test]
    fn review_result_uses_camel_case() {
        let review: ReviewResult =
            serde_json::from_str(r#"{"feedback":"Nice","suggestedAdjustment":"Sleep earlier"}"#)
                .unwrap();
        assert_eq!(review, ReviewResult::new("Nice", "Sleep earlier"));
    }

    #[test]
    fn api_error_display() {
        let err = AiError::Api {
            status: 429,
            message: "quota exceeded".into(),
        };
        assert_eq!(err.to_string(), "AI API error (429): quota exceeded");
    }
}
