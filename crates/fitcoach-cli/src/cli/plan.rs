//! Plan CLI commands: plan, weekly, generate-weekly, replace-meal, history, demo.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use fitcoach_core::plan::training_week;
use fitcoach_types::error::PlanError;
use fitcoach_types::plan::{
    CalorieBand, DailyPlan, FullPlan, PlanHistory, PlanMeal, PlanTab, WeeklyNutritionPlan,
    day_label, meal_meta,
};

use crate::state::AppState;

use super::{print_hint, print_success, spinner};

const NO_ACTIVE_PLAN: &str = "Нямате активен план.";
const NOT_GENERATED: &str = "Планът още не е генериран – използвайте чатбота.";
const LOAD_FAILED: &str = "Грешка при зареждане на плана.";
const WEEKLY_LOAD_FAILED: &str = "Грешка при зареждането";
const REPLACE_FAILED: &str = "Грешка при замяната";
const HISTORY_SIGN_IN: &str = "Моля, влезте в профила си, за да видите историята на плановете.";
const HISTORY_FAILED: &str = "Неуспешно зареждане. Опитайте пак по‑късно.";

fn plan_error_message(err: &PlanError, fallback: &str) -> String {
    match err {
        PlanError::NotSignedIn => NO_ACTIVE_PLAN.to_string(),
        PlanError::NotGenerated => NOT_GENERATED.to_string(),
        PlanError::Api(api) => api.user_message().unwrap_or(fallback).to_string(),
        PlanError::Store(_) => fallback.to_string(),
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn header(cells: &[&str]) -> Vec<Cell> {
    cells.iter().map(|c| Cell::new(c).fg(Color::White)).collect()
}

fn kcal_cell(kcal: f64) -> Cell {
    let color = match CalorieBand::for_kcal(kcal) {
        CalorieBand::Low => Color::Green,
        CalorieBand::Moderate => Color::Yellow,
        CalorieBand::High => Color::Red,
    };
    Cell::new(format!("{kcal:.0}")).fg(color)
}

fn meal_type_label(meal: &PlanMeal) -> String {
    match meal_meta(&meal.meal_type) {
        Some(meta) => format!("{} {}", meta.emoji, meta.label),
        None => meal.meal_type.clone(),
    }
}

fn opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Show the full plan on the requested (or remembered) tab.
pub async fn show_plan(state: &AppState, tab: Option<PlanTab>, json: bool) -> Result<()> {
    let plans = state.plans();
    let tab = match tab {
        Some(tab) => {
            if let Err(e) = plans.set_active_tab(tab).await {
                tracing::warn!("Failed to remember plan tab: {e}");
            }
            tab
        }
        None => plans.active_tab().await,
    };

    if tab == PlanTab::Weekly {
        return show_weekly(state, json).await;
    }

    let session = state.auth_session().await?;
    let bar = spinner("Зареждане на плана...");
    let result = plans.load_full_plan(session.chat_user_id()).await;
    bar.finish_and_clear();

    let plan = match result {
        Ok(plan) => plan,
        Err(e) => {
            tracing::debug!("Full plan unavailable: {e}");
            if matches!(e, PlanError::NotGenerated) {
                print_hint("Започнете чатбота с:", "fitc chat");
            }
            anyhow::bail!(plan_error_message(&e, LOAD_FAILED));
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    match tab {
        PlanTab::Training => print_training(&plan),
        _ => print_nutrition(&plan),
    }
    println!(
        "  {}",
        style("Други изгледи: fitc plan --tab nutrition | training | weekly").dim()
    );
    println!();
    Ok(())
}

fn print_nutrition(plan: &FullPlan) {
    println!();
    println!(
        "  {} {}",
        style("🥗 Хранителен план").cyan().bold(),
        style(plan.goal_name.as_deref().unwrap_or("")).dim()
    );
    println!();
    println!(
        "  {}  {} kcal   {}  {} g   {}  {} g   {}  {} g",
        style("Калории:").bold(),
        opt(plan.target_calories.map(|v| format!("{v:.0}"))),
        style("Протеин:").bold(),
        opt(plan.protein.map(|v| format!("{v:.0}"))),
        style("Въглехидрати:").bold(),
        opt(plan.carbohydrates.map(|v| format!("{v:.0}"))),
        style("Мазнини:").bold(),
        opt(plan.fat.map(|v| format!("{v:.0}"))),
    );
    if let Some(date) = &plan.date_generated {
        println!("  {}  {}", style("Генериран:").bold(), style(date).dim());
    }
    println!();
    println!("{}", meals_table(&plan.meals));
    println!();
}

fn meals_table(meals: &[PlanMeal]) -> Table {
    let mut table = new_table();
    table.set_header(header(&["Хранене", "Час", "Рецепта", "Порция", "kcal", "П / В / М"]));

    for meal in meals {
        let time = meal_meta(&meal.meal_type).map(|m| m.time).unwrap_or("-");
        table.add_row(vec![
            Cell::new(meal_type_label(meal)).fg(Color::Cyan),
            Cell::new(time).fg(Color::DarkGrey),
            Cell::new(&meal.recipe.name),
            Cell::new(format!("{:.0} g", meal.portion_size)),
            kcal_cell(meal.calculated_calories),
            Cell::new(format!(
                "{:.0} / {:.0} / {:.0}",
                meal.calculated_protein, meal.calculated_carbs, meal.calculated_fat
            )),
        ]);
    }
    table
}

fn print_training(plan: &FullPlan) {
    println!();
    println!("  {}", style("🏋️ Тренировъчен план").cyan().bold());
    println!();
    println!(
        "  {}  {}   {}  {} мин",
        style("Дни седмично:").bold(),
        opt(plan.training_days_per_week),
        style("Продължителност:").bold(),
        opt(plan.training_duration_minutes),
    );
    println!();

    for session in training_week(&plan.training_sessions) {
        println!(
            "  {} {}",
            style(day_label(&session.day_of_week)).bold(),
            style(session.duration_minutes.map(|m| format!("({m} мин)")).unwrap_or_default()).dim()
        );

        let mut table = new_table();
        table.set_header(header(&["Упражнение", "Серии", "Повторения", "Минути", "Ниво"]));
        for exercise in &session.exercises {
            table.add_row(vec![
                Cell::new(&exercise.name).fg(Color::Cyan),
                Cell::new(opt(exercise.sets)),
                Cell::new(opt(exercise.reps)),
                Cell::new(opt(exercise.duration_minutes)),
                Cell::new(
                    exercise
                        .difficulty_level
                        .as_ref()
                        .map(|d| d.display().to_string())
                        .unwrap_or_else(|| "-".to_string()),
                )
                .fg(Color::DarkGrey),
            ]);
        }
        println!("{table}");
        println!();
    }
}

fn print_weekly(plan: &WeeklyNutritionPlan) {
    println!();
    println!(
        "  {} {}",
        style("📅 Седмичен хранителен план").cyan().bold(),
        style(plan.id.map(|id| format!("#{id}")).unwrap_or_default()).dim()
    );
    println!();

    if plan.daily_plans.is_empty() {
        println!("  {}", style("Няма дни в плана.").dim());
        println!();
        return;
    }

    for (day, daily) in &plan.daily_plans {
        print_day(day, daily);
    }
    println!(
        "  {}",
        style("Замяна на хранене: fitc replace-meal <план> <хранене> <рецепта>").dim()
    );
    println!();
}

fn print_day(day: &str, daily: &DailyPlan) {
    println!(
        "  {} {}",
        style(day_label(day)).bold(),
        style(format!("({:.0} kcal)", daily.target_calories)).dim()
    );

    let mut table = new_table();
    table.set_header(header(&["#", "Хранене", "Рецепта", "kcal", "Алтернативи"]));
    for meal in &daily.meals {
        table.add_row(vec![
            Cell::new(opt(meal.id)).fg(Color::DarkGrey),
            Cell::new(meal_type_label(meal)).fg(Color::Cyan),
            Cell::new(&meal.recipe.name),
            kcal_cell(meal.calculated_calories),
            Cell::new(if meal.has_alternatives { "да" } else { "" }),
        ]);
    }
    println!("{table}");
    println!();
}

fn output_weekly(plan: &WeeklyNutritionPlan, json: bool) -> Result<()> {
    if json {
        let days: serde_json::Map<String, serde_json::Value> = plan
            .daily_plans
            .iter()
            .map(|(day, daily)| Ok((day.clone(), serde_json::to_value(daily)?)))
            .collect::<Result<_, serde_json::Error>>()?;
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "id": plan.id, "dailyPlans": days }))?
        );
    } else {
        print_weekly(plan);
    }
    Ok(())
}

async fn member_id(state: &AppState) -> Result<i64> {
    let session = state.auth_session().await?;
    match session.chat_user_id() {
        Some(id) => Ok(id),
        None => {
            print_hint("Седмичният план е достъпен след вход:", "fitc login");
            anyhow::bail!(NO_ACTIVE_PLAN)
        }
    }
}

pub async fn show_weekly(state: &AppState, json: bool) -> Result<()> {
    let user_id = member_id(state).await?;

    let bar = spinner("Зареждане на седмичния план...");
    let result = state.plans().weekly(user_id).await;
    bar.finish_and_clear();

    let plan = result.map_err(|e| anyhow::anyhow!(plan_error_message(&e, WEEKLY_LOAD_FAILED)))?;
    output_weekly(&plan, json)
}

pub async fn generate_weekly(state: &AppState, json: bool) -> Result<()> {
    let user_id = member_id(state).await?;

    let bar = spinner("Генериране на седмичен план...");
    let result = state.plans().generate_weekly(user_id).await;
    bar.finish_and_clear();

    let plan = result.map_err(|e| anyhow::anyhow!(plan_error_message(&e, WEEKLY_LOAD_FAILED)))?;
    if !json {
        print_success("Седмичният план е генериран.");
    }
    output_weekly(&plan, json)
}

pub async fn replace_meal(
    state: &AppState,
    plan_id: i64,
    meal_id: i64,
    recipe_id: &str,
    json: bool,
) -> Result<()> {
    let bar = spinner("Замяна...");
    let result = state.plans().replace_meal(plan_id, meal_id, recipe_id).await;
    bar.finish_and_clear();

    let plan = result.map_err(|e| anyhow::anyhow!(plan_error_message(&e, REPLACE_FAILED)))?;
    if !json {
        print_success("Храненето е заменено.");
    }
    output_weekly(&plan, json)
}

pub async fn show_history(state: &AppState, json: bool) -> Result<()> {
    let session = state.auth_session().await?;

    let bar = spinner("Зареждане на историята...");
    let result = state.plans().history(session.chat_user_id()).await;
    bar.finish_and_clear();

    let history = match result {
        Ok(history) => history,
        Err(PlanError::NotSignedIn) => anyhow::bail!(HISTORY_SIGN_IN),
        Err(e) => {
            tracing::debug!("History request failed: {e}");
            anyhow::bail!(HISTORY_FAILED)
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&history)?);
        return Ok(());
    }
    print_history(&history);
    Ok(())
}

fn print_history(history: &PlanHistory) {
    if history.is_empty() {
        print_hint("Все още нямате генерирани планове. Започнете с:", "fitc chat");
        return;
    }

    println!();
    println!("  {}", style("🥗 Хранителни планове").cyan().bold());
    let mut nutrition = new_table();
    nutrition.set_header(header(&["#", "Дата", "Цел", "kcal", "Тегло", "Диета", "Активност"]));
    for record in &history.nutrition_plans {
        nutrition.add_row(vec![
            Cell::new(opt(record.id)).fg(Color::DarkGrey),
            Cell::new(opt(record.date_generated.as_deref())),
            Cell::new(opt(record.goal_name.as_deref())).fg(Color::Cyan),
            Cell::new(opt(record.target_calories.map(|v| format!("{v:.0}")))),
            Cell::new(opt(record.user_weight_snapshot)),
            Cell::new(opt(record.user_diet_type_snapshot_name.as_deref())),
            Cell::new(opt(record.user_activity_level_snapshot_name.as_deref())),
        ]);
    }
    println!("{nutrition}");
    println!();

    println!("  {}", style("🏋️ Тренировъчни планове").cyan().bold());
    let mut training = new_table();
    training.set_header(header(&["#", "Дата", "Дни", "Минути", "Тегло", "Активност"]));
    for record in &history.training_plans {
        training.add_row(vec![
            Cell::new(opt(record.id)).fg(Color::DarkGrey),
            Cell::new(opt(record.date_generated.as_deref())),
            Cell::new(opt(record.training_days_per_week)),
            Cell::new(opt(record.training_duration_minutes)),
            Cell::new(opt(record.user_weight_snapshot)),
            Cell::new(opt(record.user_activity_level_snapshot_name.as_deref())),
        ]);
    }
    println!("{training}");
    println!();
}

/// The guest demo menu produced by the wizard, or the built-in sample.
pub async fn show_demo(state: &AppState, json: bool) -> Result<()> {
    let view = state.plans().demo_plan().await;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "sample": view.is_sample,
                "plan": view.plan,
            }))?
        );
        return Ok(());
    }

    println!();
    println!(
        "  {} {}",
        style("🍽️ Демо меню").cyan().bold(),
        style(&view.plan.day).dim()
    );
    println!();

    let mut table = new_table();
    table.set_header(header(&["Хранене", "Описание"]));
    for meal in &view.plan.meals {
        table.add_row(vec![Cell::new(&meal.meal).fg(Color::Cyan), Cell::new(&meal.description)]);
    }
    println!("{table}");

    if view.is_sample {
        println!();
        println!("  {}", style("Примерно меню.").dim());
    }
    print_hint("За пълен персонализиран план се регистрирайте:", "fitc register");
    Ok(())
}
