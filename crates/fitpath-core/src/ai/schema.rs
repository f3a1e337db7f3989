//! Response schemas sent with each request, and the parsers that turn
//! model text back into typed, validated values.

use serde::Deserialize;
use serde_json::{Value, json};

use fitpath_db::models::ActivityType;

use super::types::{AiError, NutritionEstimate, PlanDraft, ReviewResult};

/// Display name used when the model omits one.
pub const DEFAULT_FOOD_NAME: &str = "Food Item";

// ---------------------------------------------------------------------------
// Schemas
// ---------------------------------------------------------------------------

/// Schema for the daily plan: an array of plan item objects.
pub fn plan_schema() -> Value {
    let types: Vec<&str> = ActivityType::ALL.iter().map(|t| t.as_wire()).collect();
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "time": {
                    "type": "STRING",
                    "description": "Time of the activity in HH:MM format (24h)"
                },
                "type": {
                    "type": "STRING",
                    "enum": types,
                    "description": "Category of the activity"
                },
                "title": {
                    "type": "STRING",
                    "description": "Short title of the activity"
                },
                "description": {
                    "type": "STRING",
                    "description": "Detailed instruction. For meals, include ingredients. For exercise, include reps/sets."
                },
                "calories": {
                    "type": "NUMBER",
                    "description": "Estimated calories (positive for food, negative for exercise, 0 otherwise)"
                },
                "isHighlight": {
                    "type": "BOOLEAN",
                    "description": "True if this is a key meal or workout"
                }
            },
            "required": ["time", "type", "title", "description", "isHighlight"]
        }
    })
}

pub fn review_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "feedback": { "type": "STRING" },
            "suggestedAdjustment": { "type": "STRING" }
        },
        "required": ["feedback", "suggestedAdjustment"]
    })
}

pub fn food_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING" },
            "calories": { "type": "NUMBER" },
            "protein": { "type": "NUMBER" },
            "carbs": { "type": "NUMBER" },
            "fat": { "type": "NUMBER" }
        },
        "required": ["name", "calories", "protein", "carbs", "fat"]
    })
}

// ---------------------------------------------------------------------------
// Parsers
// ---------------------------------------------------------------------------

/// Parse a plan reply. An empty reply is an empty plan.
pub fn parse_plan(text: &str) -> Result<Vec<PlanDraft>, AiError> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Ok(Vec::new());
    }

    let drafts: Vec<PlanDraft> = serde_json::from_str(body)
        .map_err(|e| AiError::invalid(format!("plan is not a valid item array: {e}")))?;

    drafts
        .into_iter()
        .enumerate()
        .map(|(index, mut draft)| {
            draft.time = normalize_time(&draft.time).ok_or_else(|| {
                AiError::invalid(format!("item {index} has invalid time {:?}", draft.time))
            })?;
            if draft.title.trim().is_empty() {
                return Err(AiError::invalid(format!("item {index} has an empty title")));
            }
            if draft.calories.is_some_and(|c| !c.is_finite()) {
                return Err(AiError::invalid(format!("item {index} has non-finite calories")));
            }
            Ok(draft)
        })
        .collect()
}

/// Parse a review reply. An empty reply is [`AiError::EmptyResponse`].
pub fn parse_review(text: &str) -> Result<ReviewResult, AiError> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(AiError::EmptyResponse);
    }
    serde_json::from_str(body)
        .map_err(|e| AiError::invalid(format!("review is not a valid object: {e}")))
}

#[derive(Debug, Deserialize)]
struct RawEstimate {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    calories: Option<f64>,
    #[serde(default)]
    protein: Option<f64>,
    #[serde(default)]
    carbs: Option<f64>,
    #[serde(default)]
    fat: Option<f64>,
}

/// Parse a food analysis reply. Missing nutrients count as 0 and a missing
/// name becomes [`DEFAULT_FOOD_NAME`]; negative values are rejected.
pub fn parse_food(text: &str) -> Result<NutritionEstimate, AiError> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(AiError::EmptyResponse);
    }

    let raw: RawEstimate = serde_json::from_str(body)
        .map_err(|e| AiError::invalid(format!("food estimate is not a valid object: {e}")))?;

    let name = raw
        .name
        .map(|n| n.trim().to_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| DEFAULT_FOOD_NAME.to_owned());

    Ok(NutritionEstimate {
        name,
        calories: nutrient("calories", raw.calories)?,
        protein: nutrient("protein", raw.protein)?,
        carbs: nutrient("carbs", raw.carbs)?,
        fat: nutrient("fat", raw.fat)?,
    })
}

fn nutrient(field: &str, value: Option<f64>) -> Result<f64, AiError> {
    let value = value.unwrap_or(0.0);
    if !value.is_finite() || value < 0.0 {
        return Err(AiError::invalid(format!("{field} must be a non-negative number, got {value}")));
    }
    Ok(value)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Trim whitespace and a surrounding Markdown code fence, if any.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.strip_suffix("```").unwrap_or(rest);
    // Drop the info string (e.g. "json"), which may share a line with the body.
    let first_line = body.split('\n').next().unwrap_or_default();
    let info_len = first_line
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(first_line.len());
    body[info_len..].trim()
}

/// Normalize `H:MM` / `HH:MM` (24h) to `HH:MM`; `None` when out of range.
pub fn normalize_time(value: &str) -> Option<String> {
    let (hours, minutes) = value.trim().split_once(':')?;
    if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
        return None;
    }
    if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let h: u8 = hours.parse().ok()?;
    let m: u8 = minutes.parse().ok()?;
    (h < 24 && m < 60).then(|| format!("{h:02}:{m:02}"))
}
