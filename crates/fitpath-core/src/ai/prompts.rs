//! Prompt builders. Pure functions of their inputs.

use fitpath_db::models::{Language, PlanItem, UserProfile};

use crate::nutrition::Completion;

/// System instruction for plan generation.
pub fn plan_system_instruction(language: Language) -> String {
    format!(
        "You are an elite nutritionist and personal trainer. You create practical, \
         highly specific plans that fit into real people's work lives. {}",
        plan_language_instruction(language)
    )
}

fn plan_language_instruction(language: Language) -> &'static str {
    match language {
        Language::Zh => {
            "IMPORTANT: Output all 'title' and 'description' fields strictly in Simplified Chinese (简体中文)."
        }
        Language::En => "Output in English.",
    }
}

fn text_language_instruction(language: Language) -> &'static str {
    match language {
        Language::Zh => "Output strictly in Simplified Chinese (简体中文).",
        Language::En => "Output in English.",
    }
}

fn food_language_instruction(language: Language) -> &'static str {
    match language {
        Language::Zh => "Output 'name' in Simplified Chinese.",
        Language::En => "Output 'name' in English.",
    }
}

/// Prompt for today's schedule.
pub fn plan_prompt(profile: &UserProfile, adjustment: Option<&str>, language: Language) -> String {
    let adjustment_clause = adjustment
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(|a| {
            format!(
                "IMPORTANT ADJUSTMENT BASED ON YESTERDAY: {a}. \
                 Ensure this is strictly reflected in today's plan."
            )
        })
        .unwrap_or_default();
    let preferences = profile
        .dietary_preferences
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or("None");
    let activity = profile.activity_level.unwrap_or_default();

    format!(
        "Create a highly personalized daily weight loss schedule for a user.

User Profile:
- Name: {name}
- Profession: {profession} (CRITICAL: The schedule MUST be practical for this job. \
e.g., if they are a driver, no complex cooking for lunch. If office worker, include desk stretches.)
- Stats: {height}cm, {current}kg -> Goal: {target}kg, age {age}, activity level {activity}
- Schedule: Wakes up at {wake}, Sleeps at {sleep}
- Preferences: {preferences}

{adjustment_clause}

Requirements:
1. Plan from Wake Up ({wake}) to Sleep ({sleep}).
2. Suggest 3 main meals and 2 snacks (if appropriate) with specific healthy food ideas.
3. Include 2 hydration reminders.
4. Include specific workout/exercise slots. If the profession is sedentary, suggest active breaks. \
If active, suggest recovery or strength.
5. Output JSON only.
6. {language}",
        name = profile.name,
        profession = profile.profession,
        height = profile.height,
        current = profile.current_weight,
        target = profile.target_weight,
        age = profile.age,
        wake = profile.wake_up_time,
        sleep = profile.sleep_time,
        language = plan_language_instruction(language),
    )
}

/// Prompt for the morning greeting.
pub fn briefing_prompt(profile: &UserProfile, plan: &[PlanItem], language: Language) -> String {
    let highlights: Vec<&str> = plan
        .iter()
        .filter(|item| item.is_highlight())
        .map(|item| item.title.as_str())
        .collect();
    let highlights = serde_json::to_string(&highlights).unwrap_or_else(|_| "[]".to_owned());

    format!(
        "User: {name}, {profession}.
Today's Key Tasks: {highlights}.

Write a short, energetic morning greeting (max 40 words).
Highlight the single most important thing they need to nail today to reach their {target}kg goal.
Be encouraging but firm.
{language}",
        name = profile.name,
        profession = profile.profession,
        target = profile.target_weight,
        language = text_language_instruction(language),
    )
}

/// Prompt for the evening review.
pub fn review_prompt(
    profile: &UserProfile,
    plan: &[PlanItem],
    feedback: &str,
    language: Language,
) -> String {
    let completion = Completion::of(plan);

    format!(
        "Analyze today's weight loss progress.
User: {name} ({profession}).
Completed: {rate}% of planned tasks.
User Feedback: \"{feedback}\"

1. 'feedback': A brief, empathetic summary of how they did (2-3 sentences). \
Praise consistency or offer support for misses.
2. 'suggestedAdjustment': ONE specific, actionable change for tomorrow's plan based on today's \
performance and feedback. (e.g., \"Add a protein snack at 3pm,\" \"Reduce cardio intensity,\" \"Earlier dinner\").

{language}",
        name = profile.name,
        profession = profile.profession,
        rate = completion.rate,
        feedback = feedback.trim(),
        language = text_language_instruction(language),
    )
}

/// Prompt for a food nutrition estimate.
pub fn food_prompt(description: &str, language: Language) -> String {
    format!(
        "Analyze the food described here: \"{description}\".
Estimate the nutritional content.
Return a JSON object with:
- name: A short display name (e.g. \"Grilled Chicken Salad\")
- calories: number (kcal)
- protein: number (grams)
- carbs: number (grams)
- fat: number (grams)

{language}",
        description = description.trim(),
        language = food_language_instruction(language),
    )
}
