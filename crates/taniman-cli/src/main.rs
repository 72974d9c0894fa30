mod advisor;
mod cmd;
mod output;
mod render;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "taniman",
    about = "Gardening assistant — plan a garden, track harvests, get replanting advice",
    version,
    propagate_version = true
)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Override today's date (for reproducible countdowns)
    #[arg(long, global = true, env = "TANIMAN_TODAY")]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive gardening chat (default)
    Chat,

    /// Harvest countdown for one vegetable
    Estimate {
        /// Vegetable name
        vegetable: String,
        /// Planting date (YYYY-MM-DD)
        #[arg(long)]
        planted: NaiveDate,
    },

    /// Record a feedback survey entry
    Feedback {
        /// Overall rating: not_useful, somewhat_useful, useful, very_useful, excellent
        #[arg(long)]
        rating: String,
        /// What worked well
        #[arg(long, default_value = "")]
        worked: String,
        /// What should improve
        #[arg(long, default_value = "")]
        improve: String,
        /// Would you recommend Taniman: yes, maybe, no
        #[arg(long)]
        recommend: String,
        /// Contact email for follow-up
        #[arg(long)]
        contact: Option<String>,
        /// Garden location, if you want it attached
        #[arg(long)]
        location: Option<String>,
        /// Session mode: planning or planted
        #[arg(long)]
        mode: Option<String>,
        /// Language for the confirmation message: english or tagalog
        #[arg(long, default_value = "english")]
        language: taniman_core::types::Language,
        /// Feedback store file
        #[arg(long, env = "TANIMAN_FEEDBACK_STORE", default_value = "feedback.yaml")]
        store: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let today = cli
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let result = match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => cmd::chat::run(today),
        Commands::Estimate { vegetable, planted } => {
            cmd::estimate::run(&vegetable, planted, today, cli.json)
        }
        Commands::Feedback {
            rating,
            worked,
            improve,
            recommend,
            contact,
            location,
            mode,
            language,
            store,
        } => cmd::feedback::run(
            &store,
            language,
            &rating,
            &worked,
            &improve,
            &recommend,
            contact.as_deref(),
            location.as_deref(),
            mode.as_deref(),
        ),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
