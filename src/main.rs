use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use habitline::config::Config;
use habitline::stats::DateKey;
use habitline::store::HabitStore;

mod cli;

use cli::ViewContext;

#[derive(Parser)]
#[command(name = "habitline")]
#[command(about = "Habit tracker - daily check-ins, streaks and completion analytics")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.habitline/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Act as this user instead of settings.user
    #[arg(short, long, global = true)]
    user: Option<String>,

    /// Treat this day (YYYY-MM-DD) as today
    #[arg(long, global = true)]
    as_of: Option<String>,

    /// Print reports as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a commented config file with default settings
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Add a habit
    Add {
        /// Habit name, e.g. "Drink 2L water"
        name: String,

        /// Target weekdays, 0 = Sunday (e.g. "1,3,5"); defaults to every day
        #[arg(long, conflicts_with_all = ["weekdays", "weekends"])]
        days: Option<String>,

        /// Monday to Friday
        #[arg(long, conflicts_with = "weekends")]
        weekdays: bool,

        /// Saturday and Sunday
        #[arg(long)]
        weekends: bool,

        /// Start date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        start: Option<String>,
    },

    /// Rename or reschedule a habit
    Edit {
        /// Habit id or unique id prefix
        id: String,

        #[arg(long)]
        name: Option<String>,

        /// New target weekdays (e.g. "1,2,3,4,5" or "weekends")
        #[arg(long)]
        days: Option<String>,
    },

    /// Toggle a habit's check-in for today (or --date)
    Check {
        /// Habit id or unique id prefix
        id: String,

        /// Day to toggle (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },

    /// Archive a habit, or unarchive an archived one
    Archive {
        /// Habit id or unique id prefix
        id: String,
    },

    /// Delete a habit and all of its check-ins
    Delete {
        /// Habit id or unique id prefix
        id: String,

        /// Confirm deletion (cannot be undone)
        #[arg(long)]
        yes: bool,
    },

    /// List habits
    List {
        /// Include archived habits
        #[arg(long, conflicts_with = "archived")]
        all: bool,

        /// Only archived habits
        #[arg(long)]
        archived: bool,
    },

    /// Show habits scheduled today
    Today,

    /// Show streaks and today's progress for every habit
    Dashboard {
        /// Include archived habits
        #[arg(long, conflicts_with = "archived")]
        all: bool,

        /// Only archived habits
        #[arg(long)]
        archived: bool,
    },

    /// Show completion rates over the last week or month
    Analytics {
        /// "week" or "month" (defaults to settings.default_range)
        #[arg(long)]
        range: Option<String>,
    },

    /// Show a habit's calendar heatmap
    Heatmap {
        /// Habit id or unique id prefix
        id: String,
    },

    /// Keep the dashboard on screen, redrawing on every change
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.unwrap_or_else(Config::global_config_path);

    if let Some(Commands::Init { force }) = cli.command {
        return cli::init::init_command(&config_path, force).await;
    }

    let config = Config::load_from(&config_path)?;
    let as_of = cli
        .as_of
        .as_deref()
        .map(DateKey::parse)
        .transpose()
        .context("Invalid --as-of")?;
    let ctx = ViewContext::new(&config, cli.user, as_of, cli.json);

    let db_path = config.database_path();
    let store = HabitStore::open(&db_path)?;
    tracing::debug!(db = %db_path.display(), user = %ctx.user, "Opened habit store");

    match cli.command {
        Some(Commands::Add { name, days, weekdays, weekends, start }) => {
            let schedule = cli::habit::schedule_arg(days.as_deref(), weekdays, weekends)?;
            cli::habit::add_command(&store, &ctx, &name, schedule, start.as_deref()).await?;
        }
        Some(Commands::Edit { id, name, days }) => {
            cli::habit::edit_command(&store, &ctx, &id, name.as_deref(), days.as_deref()).await?;
        }
        Some(Commands::Check { id, date }) => {
            cli::check::check_command(&store, &ctx, &id, date.as_deref()).await?;
        }
        Some(Commands::Archive { id }) => {
            cli::habit::archive_command(&store, &ctx, &id).await?;
        }
        Some(Commands::Delete { id, yes }) => {
            cli::habit::delete_command(&store, &ctx, &id, yes).await?;
        }
        Some(Commands::List { all, archived }) => {
            cli::habit::list_command(&store, &ctx, cli::filter_arg(all, archived)).await?;
        }
        Some(Commands::Today) => {
            cli::report::today_command(&store, &ctx).await?;
        }
        Some(Commands::Dashboard { all, archived }) => {
            cli::report::dashboard_command(&store, &ctx, cli::filter_arg(all, archived)).await?;
        }
        Some(Commands::Analytics { range }) => {
            let range = cli::report::range_arg(range.as_deref(), config.settings.default_range)?;
            cli::report::analytics_command(&store, &ctx, range).await?;
        }
        Some(Commands::Heatmap { id }) => {
            cli::report::heatmap_command(&store, &ctx, &id, config.settings.heatmap_months).await?;
        }
        Some(Commands::Watch) => {
            cli::watch::watch_command(&store, &ctx, config.settings.feed_poll_ms).await?;
        }
        // Handled before the config is loaded
        Some(Commands::Init { .. }) => {}
        None => {
            // Default: the dashboard
            cli::report::dashboard_command(&store, &ctx, Default::default()).await?;
        }
    }

    Ok(())
}
