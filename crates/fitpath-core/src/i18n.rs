//! English and Simplified Chinese strings.

use fitpath_db::models::Language;

/// Localised text for fallbacks, review tags and terminal labels.
#[derive(Debug)]
pub struct Strings {
    // Fallbacks
    pub fallback_title: &'static str,
    pub fallback_description: &'static str,
    pub briefing_empty: &'static str,
    pub briefing_error: &'static str,
    /// (feedback, suggested adjustment) for an empty review reply.
    pub review_empty: (&'static str, &'static str),
    /// (feedback, suggested adjustment) for a failed review.
    pub review_error: (&'static str, &'static str),

    /// Quick feedback tags offered at the evening check-in.
    pub tags: [&'static str; 6],

    // Labels
    pub today_schedule: &'static str,
    pub morning_briefing: &'static str,
    pub priority: &'static str,
    pub no_plan: &'static str,
    pub current_goal: &'static str,
    pub daily_intake: &'static str,
    pub goal: &'static str,
    pub calories: &'static str,
    pub protein: &'static str,
    pub carbs: &'static str,
    pub fat: &'static str,
    pub evening_checkin: &'static str,
    pub day_complete: &'static str,
    pub daily_summary: &'static str,
    pub plan_adjustment: &'static str,
    pub low_goal_notice: &'static str,
    pub no_food: &'static str,
    pub profile_updated: &'static str,
    tasks_completed: &'static str,
    welcome: &'static str,
    logged: &'static str,
}

impl Strings {
    /// "You completed 3 out of 5 tasks today (60%)."
    pub fn tasks_completed(&self, completed: usize, total: usize, percent: u32) -> String {
        self.tasks_completed
            .replace("{completed}", &completed.to_string())
            .replace("{total}", &total.to_string())
            .replace("{percent}", &percent.to_string())
    }

    pub fn welcome(&self, name: &str) -> String {
        self.welcome.replace("{name}", name)
    }

    /// Prefix for a freshly logged meal, e.g. "Logged Oatmeal".
    pub fn logged(&self, name: &str) -> String {
        self.logged.replace("{name}", name)
    }
}

pub static EN: Strings = Strings {
    fallback_title: "Morning Water",
    fallback_description: "Drink 500ml of water immediately after waking up.",
    briefing_empty: "Rise and shine! Consistency is key today.",
    briefing_error: "Good morning! Let's make today count.",
    review_empty: ("Good job today.", "Keep it up."),
    review_error: ("Great effort today!", "Maintain current intensity."),
    tags: [
        "Feeling Great",
        "Too Hungry",
        "Energetic",
        "Tired",
        "Workout was hard",
        "Ate too much",
    ],
    today_schedule: "Today's Schedule",
    morning_briefing: "Morning Briefing",
    priority: "Priority",
    no_plan: "No plan generated yet.",
    current_goal: "Current Goal",
    daily_intake: "Daily Intake",
    goal: "Goal",
    calories: "Calories",
    protein: "Protein",
    carbs: "Carbs",
    fat: "Fat",
    evening_checkin: "Evening Check-in",
    day_complete: "Day Complete!",
    daily_summary: "Daily Summary",
    plan_adjustment: "Plan Adjustment",
    low_goal_notice: "Note: this goal is below 1200 kcal/day. Consider checking your profile or consulting a professional.",
    no_food: "No food logged.",
    profile_updated: "Profile updated.",
    tasks_completed: "You completed {completed} out of {total} tasks today ({percent}%).",
    welcome: "Welcome, {name}.",
    logged: "Logged {name}",
};

pub static ZH: Strings = Strings {
    fallback_title: "晨间饮水",
    fallback_description: "起床后立即饮用 500ml 温水。",
    briefing_empty: "早安！坚持就是胜利。",
    briefing_error: "早安！让我们开始这充实的一天。",
    review_empty: ("今天做得不错。", "继续保持。"),
    review_error: ("今天很努力！", "保持当前强度。"),
    tags: ["感觉很棒", "太饿了", "精力充沛", "很累", "运动量太大", "吃太多了"],
    today_schedule: "今日计划",
    morning_briefing: "早间简报",
    priority: "重点",
    no_plan: "尚未生成计划。",
    current_goal: "当前目标",
    daily_intake: "今日摄入",
    goal: "目标",
    calories: "卡路里",
    protein: "蛋白质",
    carbs: "碳水",
    fat: "脂肪",
    evening_checkin: "晚间打卡",
    day_complete: "今日已结！",
    daily_summary: "每日总结",
    plan_adjustment: "计划调整建议",
    low_goal_notice: "提示：该目标低于每日 1200 千卡，请检查档案或咨询专业人士。",
    no_food: "暂无饮食记录。",
    profile_updated: "档案已更新。",
    tasks_completed: "您完成了 {total} 项任务中的 {completed} 项 ({percent}%)。",
    welcome: "欢迎，{name}。",
    logged: "已记录 {name}",
};

/// Strings for a language.
pub fn strings(language: Language) -> &'static Strings {
    match language {
        Language::En => &EN,
        Language::Zh => &ZH,
    }
}
