use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Category of a scheduled plan entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActivityType {
    Meal,
    Exercise,
    Work,
    Rest,
    Hydration,
    Checkin,
}

impl ActivityType {
    /// Every variant, in schema order.
    pub const ALL: [ActivityType; 6] = [
        Self::Meal,
        Self::Exercise,
        Self::Work,
        Self::Rest,
        Self::Hydration,
        Self::Checkin,
    ];

    /// Wire name used in persisted plans and AI response schemas.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::Meal => "MEAL",
            Self::Exercise => "EXERCISE",
            Self::Work => "WORK",
            Self::Rest => "REST",
            Self::Hydration => "HYDRATION",
            Self::Checkin => "CHECKIN",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Meal => "meal",
            Self::Exercise => "exercise",
            Self::Work => "work",
            Self::Rest => "rest",
            Self::Hydration => "hydration",
            Self::Checkin => "checkin",
        };
        f.write_str(s)
    }
}

impl FromStr for ActivityType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "meal" => Ok(Self::Meal),
            "exercise" => Ok(Self::Exercise),
            "work" => Ok(Self::Work),
            "rest" => Ok(Self::Rest),
            "hydration" => Ok(Self::Hydration),
            "checkin" => Ok(Self::Checkin),
            _ => Err(ParseEnumError::new("activity type", s)),
        }
    }
}

// ---------------------------------------------------------------------------

/// Self-reported daily activity level, used to pick the TDEE multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    #[default]
    Sedentary,
    Light,
    Moderate,
    Active,
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Active => "active",
        };
        f.write_str(s)
    }
}

impl FromStr for ActivityLevel {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sedentary" => Ok(Self::Sedentary),
            "light" => Ok(Self::Light),
            "moderate" => Ok(Self::Moderate),
            "active" => Ok(Self::Active),
            _ => Err(ParseEnumError::new("activity level", s)),
        }
    }
}

// ---------------------------------------------------------------------------

/// Gender as entered at onboarding. Only `Male` changes the BMR constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        };
        f.write_str(s)
    }
}

impl FromStr for Gender {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            "other" => Ok(Self::Other),
            _ => Err(ParseEnumError::new("gender", s)),
        }
    }
}

// ---------------------------------------------------------------------------

/// Display and AI output language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    /// The stored language code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zh => "zh",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Self::En),
            "zh" | "chinese" | "zh-cn" => Ok(Self::Zh),
            _ => Err(ParseEnumError::new("language", s)),
        }
    }
}

/// Error returned when parsing an invalid enum string.
#[derive(Debug, Clone)]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {:?}", self.kind, self.value)
    }
}

impl std::error::Error for ParseEnumError {}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// The user profile collected at onboarding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    /// Height in centimetres.
    pub height: f64,
    /// Current weight in kilograms.
    pub current_weight: f64,
    /// Target weight in kilograms.
    pub target_weight: f64,
    pub profession: String,
    /// `HH:MM`, 24h.
    pub wake_up_time: String,
    /// `HH:MM`, 24h.
    pub sleep_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary_preferences: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
}

/// A profile as persisted: the onboarding fields plus the derived goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredProfile {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub daily_calorie_goal: i64,
}

/// One entry of a day's schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanItem {
    pub id: String,
    /// `HH:MM`, 24h.
    pub time: String,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    pub title: String,
    pub description: String,
    /// Positive for intake, negative for burn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<i32>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_highlight: Option<bool>,
}

impl PlanItem {
    pub fn is_highlight(&self) -> bool {
        self.is_highlight.unwrap_or(false)
    }
}

/// A logged food entry. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: String,
    /// Unix epoch milliseconds.
    pub timestamp: i64,
    pub name: String,
    pub calories: f64,
    /// Grams.
    pub protein: f64,
    /// Grams.
    pub carbs: f64,
    /// Grams.
    pub fat: f64,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
