//! CLI command definitions for the `fitc` binary.
//!
//! Uses clap derive macros for argument parsing. Each command maps onto one
//! view of the coaching client (sign-in, chat wizard, plan, profile).

pub mod auth;
pub mod chat;
pub mod navigate;
pub mod plan;
pub mod profile;

use std::time::Duration;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use fitcoach_types::plan::PlanTab;
use fitcoach_types::profile::{Gender, Metric};

/// Your personal fitness and nutrition coach.
#[derive(Parser)]
#[command(name = "fitc", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account.
    Register {
        /// Full name.
        #[arg(long)]
        name: Option<String>,

        /// Account email.
        #[arg(long)]
        email: Option<String>,
    },

    /// Sign in with email and password.
    Login {
        /// Account email.
        #[arg(long)]
        email: Option<String>,

        /// Password (prompted when omitted).
        #[arg(long, env = "FITCOACH_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Continue as a guest and start the plan wizard.
    Guest,

    /// Sign out and forget the stored credentials.
    Logout,

    /// Request a password reset email.
    #[command(name = "forgot-password")]
    ForgotPassword {
        /// Account email.
        email: Option<String>,
    },

    /// Show who is signed in.
    Whoami,

    /// Start the guided plan-generation chat.
    Chat,

    /// Show the generated nutrition and training plan.
    Plan {
        /// Tab to show (nutrition, training, weekly). Remembered for next time.
        #[arg(long)]
        tab: Option<PlanTab>,
    },

    /// Show the weekly nutrition plan.
    Weekly,

    /// Generate a new weekly nutrition plan.
    #[command(name = "generate-weekly")]
    GenerateWeekly,

    /// Swap a meal of a weekly plan for another recipe.
    #[command(name = "replace-meal")]
    ReplaceMeal {
        /// Weekly plan id.
        plan_id: i64,

        /// Id of the meal to replace.
        meal_id: i64,

        /// Id of the substitute recipe.
        recipe_id: String,
    },

    /// Show previously generated plans.
    History,

    /// Show the guest demo menu.
    Demo,

    /// Body profile and progress tracking.
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Show the profile.
    Show,

    /// Update profile fields. Omitted fields keep their current values.
    Set {
        /// Weight in kg.
        #[arg(long)]
        weight: Option<f64>,

        /// Height in cm.
        #[arg(long)]
        height: Option<f64>,

        /// Age in years.
        #[arg(long)]
        age: Option<u32>,

        /// MALE or FEMALE.
        #[arg(long)]
        gender: Option<Gender>,
    },

    /// Record today's value for a metric.
    Progress {
        /// The measured value.
        value: String,

        /// weight, calories or bodyFat.
        #[arg(long, default_value_t = Metric::Calories)]
        metric: Metric,
    },

    /// Chart the recorded progress.
    Chart {
        /// weight, calories or bodyFat.
        #[arg(long, default_value_t = Metric::Calories)]
        metric: Metric,
    },
}

/// Steady-ticking spinner shown while a backend request is in flight.
pub(crate) fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

pub(crate) fn print_success(message: &str) {
    println!();
    println!("  {} {}", style("✓").green().bold(), message);
    println!();
}

pub(crate) fn print_error(message: &str) {
    eprintln!();
    eprintln!("  {} {}", style("✗").red().bold(), message);
    eprintln!();
}

pub(crate) fn print_hint(message: &str, command: &str) {
    println!();
    println!(
        "  {} {} {}",
        style("i").blue().bold(),
        message,
        style(command).yellow()
    );
    println!();
}
