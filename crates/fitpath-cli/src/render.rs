//! Terminal output shared by the dashboard commands.

use chrono::{DateTime, Local};

use fitpath_core::calorie;
use fitpath_core::i18n::Strings;
use fitpath_core::nutrition::DailyTotals;
use fitpath_db::models::{FoodItem, PlanItem, StoredProfile};

/// Print the plan, one numbered row per item.
pub fn print_plan(strings: &Strings, plan: &[PlanItem]) {
    println!("{}", strings.today_schedule);
    if plan.is_empty() {
        println!("  {}", strings.no_plan);
        return;
    }
    for (index, item) in plan.iter().enumerate() {
        let check = if item.completed { "x" } else { " " };
        let calories = item
            .calories
            .map(|c| format!("{c:+} kcal"))
            .unwrap_or_default();
        let star = if item.is_highlight() {
            format!("  * {}", strings.priority)
        } else {
            String::new()
        };
        println!(
            "  {:>2}. [{}] {:<5} {:<10} {}{}",
            index + 1,
            check,
            item.time,
            item.kind.to_string(),
            item.title,
            star
        );
        if !item.description.is_empty() {
            println!("               {}", item.description);
        }
        if !calories.is_empty() {
            println!("               {calories}");
        }
    }
}

pub fn print_briefing(strings: &Strings, briefing: &str) {
    println!("{}", strings.morning_briefing);
    println!("  {briefing}");
}

/// Print the goal line, plus the low-goal notice when it applies.
pub fn print_goal(strings: &Strings, profile: &StoredProfile) {
    println!(
        "{}: {} kcal ({} -> {} kg)",
        strings.current_goal,
        profile.daily_calorie_goal,
        profile.profile.current_weight,
        profile.profile.target_weight
    );
    if calorie::is_below_recommended(profile.daily_calorie_goal) {
        println!("{}", strings.low_goal_notice);
    }
}

/// Print the day's intake against the goal.
pub fn print_intake(strings: &Strings, totals: &DailyTotals, goal: i64) {
    println!(
        "{}: {:.0} / {} kcal ({:.0}%)",
        strings.daily_intake,
        totals.calories,
        goal,
        totals.progress_percent(goal)
    );
    println!(
        "  {} {:.0}g  {} {:.0}g  {} {:.0}g",
        strings.protein, totals.protein, strings.carbs, totals.carbs, strings.fat, totals.fat
    );
}

/// Print food entries as a table.
pub fn print_food(strings: &Strings, logs: &[FoodItem]) {
    if logs.is_empty() {
        println!("{}", strings.no_food);
        return;
    }
    println!(
        "{:<17} {:<28} {:>8} {:>8} {:>8} {:>8}",
        "TIME", "NAME", strings.calories, strings.protein, strings.carbs, strings.fat
    );
    println!("{}", "-".repeat(82));
    for item in logs {
        println!(
            "{:<17} {:<28} {:>8.0} {:>8.1} {:>8.1} {:>8.1}",
            format_timestamp(item.timestamp),
            truncate(&item.name, 28),
            item.calories,
            item.protein,
            item.carbs,
            item.fat
        );
    }
}

/// Epoch milliseconds as local `YYYY-MM-DD HH:MM`.
pub fn format_timestamp(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("Rice", 28), "Rice");
        assert_eq!(truncate("番茄炒蛋盖饭", 5), "番茄...");
    }

    #[test]
    fn format_timestamp_is_minute_precision() {
        let formatted = format_timestamp(1_741_563_000_000);
        assert_eq!(formatted.len(), "2025-03-10 07:30".len());
    }
}
