//! Account CLI commands: register, login, guest, logout, forgot-password, whoami.

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input, Password};

use fitcoach_types::auth::AuthUser;
use fitcoach_types::error::{ApiError, AuthError};

use crate::state::AppState;

use super::{print_hint, print_success, spinner};

const LOGIN_FAILED: &str = "❌ Входът не бе успешен. Моля, опитайте отново.";
const REGISTER_FAILED: &str = "Регистрацията не бе успешна. Моля, опитайте отново.";
const RESET_FAILED: &str = "❌ Възникна грешка при изпращане на заявката. Моля, опитайте отново.";
const GUEST_FAILED: &str = "⚠️ Възникна грешка при стартиране като гост.";

/// User-facing text for an auth failure, preferring the backend's own message.
pub(crate) fn auth_error_message(err: &AuthError, fallback: &str) -> String {
    match err {
        AuthError::Validation(msg) => msg.clone(),
        AuthError::Api(ApiError::Status { message, .. }) if !message.is_empty() => message.clone(),
        _ => fallback.to_string(),
    }
}

fn prompt_email(email: Option<String>) -> Result<String> {
    match email {
        Some(e) => Ok(e),
        None => Ok(Input::<String>::new().with_prompt("Имейл").interact_text()?),
    }
}

/// Create an account, then point the user at `fitc login`.
pub async fn register(
    state: &AppState,
    name: Option<String>,
    email: Option<String>,
    json: bool,
) -> Result<()> {
    let full_name = match name {
        Some(n) => n,
        None => Input::<String>::new()
            .with_prompt("Име и фамилия")
            .interact_text()?,
    };
    let email = prompt_email(email)?;
    let password = Password::new().with_prompt("Парола").interact()?;
    let confirm = Password::new().with_prompt("Повторете паролата").interact()?;

    let mut session = state.auth_session().await?;
    let spinner = spinner("Регистрация...");
    let result = session.register(&full_name, &email, &password, &confirm).await;
    spinner.finish_and_clear();

    match result {
        Ok(()) => {
            if json {
                println!("{}", serde_json::json!({ "registered": true, "email": email }));
                return Ok(());
            }
            print_success("Регистрацията беше успешна!");
            print_hint("Влезте в профила си с:", "fitc login");
            Ok(())
        }
        Err(e) => {
            tracing::debug!("Registration failed: {e}");
            anyhow::bail!(auth_error_message(&e, REGISTER_FAILED))
        }
    }
}

/// Sign in, then offer to start the plan wizard.
pub async fn login(
    state: &AppState,
    email: Option<String>,
    password: Option<String>,
    json: bool,
) -> Result<()> {
    let email = prompt_email(email)?;
    let password = match password {
        Some(p) => p,
        None => Password::new().with_prompt("Парола").interact()?,
    };

    let mut session = state.auth_session().await?;
    let spinner = spinner("Вход...");
    let result = session.login(&email, &password).await.map(summarize);
    spinner.finish_and_clear();

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            tracing::debug!("Login failed: {e}");
            anyhow::bail!(auth_error_message(&e, LOGIN_FAILED));
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    print_success("✅ Входът беше успешен!");

    let start_chat = Confirm::new()
        .with_prompt("Да започнем ли създаването на вашия план?")
        .default(true)
        .interact()?;
    if start_chat {
        super::chat::loop_runner::run_chat_loop(state).await?;
    }
    Ok(())
}

/// Sign in with a backend-issued guest identity.
pub async fn guest(state: &AppState, json: bool) -> Result<()> {
    let mut session = state.auth_session().await?;
    let spinner = spinner("Стартиране като гост...");
    let result = session.guest_login().await.map(summarize);
    spinner.finish_and_clear();

    match result {
        Ok(summary) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_success("Продължавате като гост.");
            }
            Ok(())
        }
        Err(e) => {
            tracing::debug!("Guest sign-in failed: {e}");
            anyhow::bail!(GUEST_FAILED)
        }
    }
}

pub async fn logout(state: &AppState, json: bool) -> Result<()> {
    let mut session = state.auth_session().await?;
    session.logout().await?;

    if json {
        println!("{}", serde_json::json!({ "signedIn": false }));
    } else {
        print_success("Излязохте от профила си.");
    }
    Ok(())
}

pub async fn forgot_password(state: &AppState, email: Option<String>, json: bool) -> Result<()> {
    let email = prompt_email(email)?;
    let session = state.auth_session().await?;

    let spinner = spinner("Изпращане...");
    let result = session.forgot_password(&email).await;
    spinner.finish_and_clear();

    match result {
        Ok(message) => {
            if json {
                println!("{}", serde_json::json!({ "sent": true, "message": message }));
            } else {
                print_success("✅ Ако има акаунт с този имейл, линк за възстановяване е изпратен.");
            }
            Ok(())
        }
        Err(e) => {
            tracing::debug!("Password reset request failed: {e}");
            anyhow::bail!(auth_error_message(&e, RESET_FAILED))
        }
    }
}

/// Show the signed-in user and the account details the backend reports.
pub async fn whoami(state: &AppState, json: bool) -> Result<()> {
    let session = state.auth_session().await?;

    let Some(user) = session.user() else {
        if json {
            println!("{}", serde_json::json!({ "signedIn": false }));
        } else {
            print_hint("Не сте влезли в профила си. Влезте с:", "fitc login");
        }
        return Ok(());
    };

    let full_name = match session.account().await {
        Ok(account) => account.full_name,
        Err(e) => {
            tracing::warn!("Could not load account details: {e}");
            None
        }
    };

    if json {
        let mut summary = summarize(user);
        summary["fullName"] = serde_json::json!(full_name);
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let display_name = full_name.clone().unwrap_or_else(|| {
        user.email
            .as_deref()
            .and_then(|e| e.split('@').next())
            .unwrap_or("Атлет")
            .to_string()
    });

    println!();
    println!("  Добре дошли, {}!", style(display_name).cyan().bold());
    println!();
    println!(
        "  {}  {}",
        style("Имейл:").bold(),
        user.email.as_deref().unwrap_or("-")
    );
    println!(
        "  {}  {}",
        style("Роли:").bold(),
        if user.roles.is_empty() {
            "-".to_string()
        } else {
            user.roles.join(", ")
        }
    );
    if user.is_guest() {
        println!("  {}", style("Гост профил: достъпен е само демо планът.").dim());
    }
    if let Some(id) = user.nutrition_plan_id {
        println!("  {}  {}", style("Хранителен план:").bold(), id);
    }
    if let Some(id) = user.training_plan_id {
        println!("  {}  {}", style("Тренировъчен план:").bold(), id);
    }
    println!(
        "  {}  {}",
        style("Данни:").bold(),
        style(state.data_dir.display()).dim()
    );
    println!();
    Ok(())
}

/// JSON view of a user without the access token.
fn summarize(user: &AuthUser) -> serde_json::Value {
    serde_json::json!({
        "signedIn": true,
        "id": user.id,
        "email": user.email,
        "roles": user.roles,
        "guest": user.is_guest(),
        "nutritionPlanId": user.nutrition_plan_id,
        "trainingPlanId": user.training_plan_id,
    })
}
