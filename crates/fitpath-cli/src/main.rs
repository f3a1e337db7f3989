mod config;
mod dashboard_cmds;
mod food_cmds;
mod profile_cmds;
mod render;
mod review_cmds;
mod session;
mod status_cmd;
#[cfg(test)]
mod test_util;

use clap::{Args, CommandFactory, Parser, Subcommand};

use fitpath_db::config::DbConfig;
use fitpath_db::models::{ActivityLevel, Gender, Language, UserProfile};
use fitpath_db::pool;

use config::{CliOverrides, FitpathConfig};
use session::Session;

#[derive(Parser)]
#[command(name = "fitpath", version, about = "Daily AI wellness planner: schedule, food log, evening review")]
struct Cli {
    /// Database URL (overrides FITPATH_DATABASE_URL env var)
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Gemini model (overrides FITPATH_MODEL env var)
    #[arg(long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a fitpath config file and create the database
    Init {
        /// SQLite connection URL (defaults to the platform data dir)
        #[arg(long)]
        db_url: Option<String>,
        /// Gemini API key to store in the config file
        #[arg(long)]
        api_key: Option<String>,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Create your profile and today's first plan
    Onboard(OnboardArgs),
    /// Show or edit your profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Show today's plan and intake, generating the plan if needed
    Today,
    /// Mark a plan item done (or not done again)
    Toggle {
        /// Item id, or its number in `fitpath today`
        item: String,
    },
    /// Throw away today's plan and generate a new one
    Retry {
        /// Also drop the adjustment suggested by the last review
        #[arg(long)]
        no_adjustment: bool,
    },
    /// Food log
    Food {
        #[command(subcommand)]
        command: FoodCommands,
    },
    /// Evening check-in: review the day and get tomorrow's adjustment
    Review {
        /// How the day went, in your own words
        feedback: Vec<String>,
        /// Quick tag, by number (1-6) or text; repeatable
        #[arg(long = "tag", short = 't')]
        tags: Vec<String>,
        /// Start the next day right after the review
        #[arg(long)]
        next_day: bool,
    },
    /// Close out today and generate a fresh plan
    NextDay,
    /// Show or set the language used for plans and messages
    Lang {
        /// en or zh
        language: Option<Language>,
    },
    /// Show configuration, storage and today's progress
    Status,
    /// Print a shell completion script
    Completions {
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct OnboardArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub age: u32,
    /// male, female or other
    #[arg(long)]
    pub gender: Gender,
    /// Height in cm
    #[arg(long)]
    pub height: f64,
    /// Current weight in kg
    #[arg(long)]
    pub weight: f64,
    /// Target weight in kg
    #[arg(long)]
    pub target_weight: f64,
    #[arg(long, default_value = "")]
    pub profession: String,
    /// Wake-up time, HH:MM
    #[arg(long, default_value = "07:00", value_parser = profile_cmds::parse_clock_time)]
    pub wake: String,
    /// Bedtime, HH:MM
    #[arg(long, default_value = "23:00", value_parser = profile_cmds::parse_clock_time)]
    pub sleep: String,
    /// Dietary preferences, e.g. "vegetarian, no nuts"
    #[arg(long)]
    pub diet: Option<String>,
    /// sedentary, light, moderate or active
    #[arg(long)]
    pub activity: Option<ActivityLevel>,
}

impl OnboardArgs {
    pub fn into_profile(self) -> UserProfile {
        UserProfile {
            name: self.name.trim().to_owned(),
            age: self.age,
            gender: self.gender,
            height: self.height,
            current_weight: self.weight,
            target_weight: self.target_weight,
            profession: self.profession.trim().to_owned(),
            wake_up_time: self.wake,
            sleep_time: self.sleep,
            dietary_preferences: self.diet.filter(|d| !d.trim().is_empty()),
            activity_level: self.activity,
        }
    }
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Print the saved profile and calorie goal
    Show,
    /// Change profile fields; the calorie goal is recomputed
    Edit(ProfileEditArgs),
}

#[derive(Args, Default)]
pub struct ProfileEditArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub age: Option<u32>,
    #[arg(long)]
    pub gender: Option<Gender>,
    #[arg(long)]
    pub height: Option<f64>,
    #[arg(long)]
    pub weight: Option<f64>,
    #[arg(long)]
    pub target_weight: Option<f64>,
    #[arg(long)]
    pub profession: Option<String>,
    #[arg(long, value_parser = profile_cmds::parse_clock_time)]
    pub wake: Option<String>,
    #[arg(long, value_parser = profile_cmds::parse_clock_time)]
    pub sleep: Option<String>,
    /// Pass an empty string to clear
    #[arg(long)]
    pub diet: Option<String>,
    #[arg(long)]
    pub activity: Option<ActivityLevel>,
}

impl ProfileEditArgs {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.gender.is_none()
            && self.height.is_none()
            && self.weight.is_none()
            && self.target_weight.is_none()
            && self.profession.is_none()
            && self.wake.is_none()
            && self.sleep.is_none()
            && self.diet.is_none()
            && self.activity.is_none()
    }

    pub fn apply(self, mut profile: UserProfile) -> UserProfile {
        if let Some(name) = self.name {
            profile.name = name.trim().to_owned();
        }
        if let Some(age) = self.age {
            profile.age = age;
        }
        if let Some(gender) = self.gender {
            profile.gender = gender;
        }
        if let Some(height) = self.height {
            profile.height = height;
        }
        if let Some(weight) = self.weight {
            profile.current_weight = weight;
        }
        if let Some(target) = self.target_weight {
            profile.target_weight = target;
        }
        if let Some(profession) = self.profession {
            profile.profession = profession.trim().to_owned();
        }
        if let Some(wake) = self.wake {
            profile.wake_up_time = wake;
        }
        if let Some(sleep) = self.sleep {
            profile.sleep_time = sleep;
        }
        if let Some(diet) = self.diet {
            profile.dietary_preferences = Some(diet).filter(|d| !d.trim().is_empty());
        }
        if let Some(activity) = self.activity {
            profile.activity_level = Some(activity);
        }
        profile
    }
}

#[derive(Subcommand)]
pub enum FoodCommands {
    /// Describe a meal; the AI estimates its nutrients
    Add {
        #[arg(required = true)]
        description: Vec<String>,
    },
    /// List logged food (today by default)
    List {
        /// Day to list, YYYY-MM-DD
        #[arg(long, conflicts_with = "all")]
        date: Option<String>,
        /// List every entry ever logged
        #[arg(long)]
        all: bool,
    },
}

/// Execute the `fitpath init` command: write config file, create database.
async fn cmd_init(
    db_url: Option<String>,
    api_key: Option<String>,
    model: Option<String>,
    force: bool,
) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let db_url = db_url.unwrap_or_else(DbConfig::default_url);
    let cfg = config::ConfigFile {
        database: config::DatabaseSection {
            url: Some(db_url.clone()),
        },
        ai: config::AiSection {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model,
            ..Default::default()
        },
    };
    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  database.url = {db_url}");
    match &cfg.ai.api_key {
        Some(key) => println!("  ai.api_key = {}...", key.chars().take(4).collect::<String>()),
        None => println!("  ai.api_key not set (AI features use offline fallbacks)"),
    }
    println!();

    let db_pool = pool::open(&DbConfig::new(db_url)).await?;
    let counts = pool::table_counts(&db_pool).await?;
    println!("Database ready. Tables:");
    for (table, count) in &counts {
        println!("  {table}: {count} rows");
    }
    db_pool.close().await;

    println!();
    println!("Next: run `fitpath onboard --help` to create your profile.");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let overrides = CliOverrides {
        database_url: cli.database_url,
        model: cli.model,
    };

    match cli.command {
        Commands::Init {
            db_url,
            api_key,
            force,
        } => {
            cmd_init(db_url.or(overrides.database_url), api_key, overrides.model, force).await?;
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "fitpath", &mut std::io::stdout());
        }
        Commands::Onboard(args) => {
            let resolved = FitpathConfig::resolve(&overrides)?;
            let mut session = Session::open(&resolved).await?;
            let result = profile_cmds::run_onboard(&mut session, args).await;
            session.close().await;
            result?;
        }
        Commands::Profile { command } => {
            let resolved = FitpathConfig::resolve(&overrides)?;
            let mut session = Session::open(&resolved).await?;
            let result = profile_cmds::run_profile_command(&mut session, command).await;
            session.close().await;
            result?;
        }
        Commands::Today => {
            let resolved = FitpathConfig::resolve(&overrides)?;
            let mut session = Session::open_onboarded(&resolved).await?;
            let result = dashboard_cmds::run_today(&mut session).await;
            session.close().await;
            result?;
        }
        Commands::Toggle { item } => {
            let resolved = FitpathConfig::resolve(&overrides)?;
            let mut session = Session::open_onboarded(&resolved).await?;
            let result = dashboard_cmds::run_toggle(&mut session, &item).await;
            session.close().await;
            result?;
        }
        Commands::Retry { no_adjustment } => {
            let resolved = FitpathConfig::resolve(&overrides)?;
            let mut session = Session::open_onboarded(&resolved).await?;
            let result = dashboard_cmds::run_retry(&mut session, no_adjustment).await;
            session.close().await;
            result?;
        }
        Commands::Food { command } => {
            let resolved = FitpathConfig::resolve(&overrides)?;
            let mut session = Session::open(&resolved).await?;
            let result = food_cmds::run_food_command(&mut session, command).await;
            session.close().await;
            result?;
        }
        Commands::Review {
            feedback,
            tags,
            next_day,
        } => {
            let resolved = FitpathConfig::resolve(&overrides)?;
            let mut session = Session::open_onboarded(&resolved).await?;
            let result = review_cmds::run_review(&mut session, &feedback, &tags, next_day).await;
            session.close().await;
            result?;
        }
        Commands::NextDay => {
            let resolved = FitpathConfig::resolve(&overrides)?;
            let mut session = Session::open_onboarded(&resolved).await?;
            let result = review_cmds::run_next_day(&mut session).await;
            session.close().await;
            result?;
        }
        Commands::Lang { language } => {
            let resolved = FitpathConfig::resolve(&overrides)?;
            let mut session = Session::open(&resolved).await?;
            let result: anyhow::Result<()> = match language {
                Some(language) => session.flow.set_language(language).await.map_err(Into::into),
                None => Ok(()),
            };
            println!("{}", session.flow.language());
            session.close().await;
            result?;
        }
        Commands::Status => {
            let resolved = FitpathConfig::resolve(&overrides)?;
            let session = Session::open(&resolved).await?;
            let result = status_cmd::run_status(&session, &resolved).await;
            session.close().await;
            result?;
        }
    }

    Ok(())
}
