//! FitCoach command-line client.
//!
//! Binary name: `fitc`
//!
//! Parses CLI arguments, opens the local store and backend client, then
//! dispatches to the matching command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use fitcoach_infra::config::load_client_config;
use fitcoach_infra::filesystem::resolve_data_dir;
use fitcoach_observe::tracing_setup::{filter_for_verbosity, init_tracing, shutdown_tracing};

use cli::{Cli, Commands, ProfileCommand};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "fitc", &mut std::io::stdout());
        return Ok(());
    }

    let data_dir = resolve_data_dir();
    let config = load_client_config(&data_dir).await;

    init_tracing(filter_for_verbosity(cli.verbose, cli.quiet), config.enable_otel)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;
    tracing::debug!(data_dir = %data_dir.display(), api = %config.api_base_url, "Configuration loaded");

    let result = run(cli, AppState::init(data_dir, config).await?).await;
    if let Err(e) = &result {
        tracing::debug!("Command failed: {e:#}");
    }
    shutdown_tracing();

    if let Err(e) = result {
        cli::print_error(&e.to_string());
        std::process::exit(1);
    }
    Ok(())
}

async fn run(cli: Cli, state: AppState) -> anyhow::Result<()> {
    let json = cli.json;

    match cli.command {
        Commands::Register { name, email } => cli::auth::register(&state, name, email, json).await,
        Commands::Login { email, password } => {
            cli::auth::login(&state, email, password, json).await
        }
        Commands::Guest => {
            cli::auth::guest(&state, json).await?;
            if json {
                return Ok(());
            }
            cli::chat::loop_runner::run_chat_loop(&state).await
        }
        Commands::Logout => cli::auth::logout(&state, json).await,
        Commands::ForgotPassword { email } => {
            cli::auth::forgot_password(&state, email, json).await
        }
        Commands::Whoami => cli::auth::whoami(&state, json).await,
        Commands::Chat => cli::chat::loop_runner::run_chat_loop(&state).await,
        Commands::Plan { tab } => cli::plan::show_plan(&state, tab, json).await,
        Commands::Weekly => cli::plan::show_weekly(&state, json).await,
        Commands::GenerateWeekly => cli::plan::generate_weekly(&state, json).await,
        Commands::ReplaceMeal {
            plan_id,
            meal_id,
            recipe_id,
        } => cli::plan::replace_meal(&state, plan_id, meal_id, &recipe_id, json).await,
        Commands::History => cli::plan::show_history(&state, json).await,
        Commands::Demo => cli::plan::show_demo(&state, json).await,
        Commands::Profile { action } => match action {
            ProfileCommand::Show => cli::profile::show(&state, json).await,
            ProfileCommand::Set {
                weight,
                height,
                age,
                gender,
            } => cli::profile::set(&state, weight, height, age, gender, json).await,
            ProfileCommand::Progress { value, metric } => {
                cli::profile::add_progress(&state, &value, metric, json).await
            }
            ProfileCommand::Chart { metric } => cli::profile::chart(&state, metric, json).await,
        },
        Commands::Completions { .. } => unreachable!("handled in main"),
    }
}
