//! Profile CLI commands: show, set, progress, chart.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use serde_json::json;

use fitcoach_core::profile::ChartLayout;
use fitcoach_types::error::ProfileError;
use fitcoach_types::profile::{Gender, Metric, ProfileUpdate, ProgressEntry, UserProfile};

use crate::state::AppState;

use super::{print_hint, print_success, spinner};

const LOAD_FAILED: &str = "Неуспешно зареждане на профила.";
const SAVE_FAILED: &str = "Неуспешен запис на профила.";
const SAVED: &str = "Профилът е успешно запазен!";
const ENTRY_ADDED: &str = "Нов запис добавен успешно!";

/// Width of the text bar chart, in characters.
const BAR_WIDTH: usize = 30;

fn profile_error_message(err: &ProfileError, fallback: &str) -> String {
    match err {
        ProfileError::InvalidEntry(message) => message.clone(),
        ProfileError::Api(api) => api.user_message().unwrap_or(fallback).to_string(),
        ProfileError::Store(_) => fallback.to_string(),
    }
}

fn value_or_dash<T: std::fmt::Display>(value: Option<T>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v}{unit}"),
        None => "-".to_string(),
    }
}

pub async fn show(state: &AppState, json: bool) -> Result<()> {
    let bar = spinner("Зареждане на профила...");
    let result = state.profile().overview().await;
    bar.finish_and_clear();

    let overview = match result {
        Ok(overview) => overview,
        Err(ProfileError::Api(fitcoach_types::error::ApiError::Unauthorized)) => {
            print_hint("Профилът е достъпен след вход:", "fitc login");
            anyhow::bail!(LOAD_FAILED)
        }
        Err(e) => {
            tracing::debug!("Profile load failed: {e}");
            anyhow::bail!(profile_error_message(&e, LOAD_FAILED))
        }
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "email": overview.email,
                "profile": overview.profile,
            }))?
        );
        return Ok(());
    }

    println!();
    println!("  {}", style("👤 Профил").cyan().bold());
    println!("  {}", style(&overview.email).dim());
    println!();
    println!("{}", profile_table(&overview.profile));
    println!();
    Ok(())
}

fn profile_table(profile: &UserProfile) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let rows = [
        ("Тегло", value_or_dash(profile.weight, " kg")),
        ("Ръст", value_or_dash(profile.height, " cm")),
        ("Възраст", value_or_dash(profile.age, "")),
        ("Пол", value_or_dash(profile.gender.map(|g| g.label()), "")),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label).fg(Color::Cyan), Cell::new(value)]);
    }
    table
}

pub async fn set(
    state: &AppState,
    weight: Option<f64>,
    height: Option<f64>,
    age: Option<u32>,
    gender: Option<Gender>,
    json: bool,
) -> Result<()> {
    let update = ProfileUpdate {
        weight,
        height,
        age,
        gender,
    };
    if update == ProfileUpdate::default() {
        anyhow::bail!("Нищо за промяна. Използвайте --weight, --height, --age или --gender.");
    }

    let bar = spinner("Запис...");
    let result = state.profile().update(update).await;
    bar.finish_and_clear();

    let profile = result.map_err(|e| {
        tracing::debug!("Profile save failed: {e}");
        anyhow::anyhow!(profile_error_message(&e, SAVE_FAILED))
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    print_success(SAVED);
    println!("{}", profile_table(&profile));
    println!();
    Ok(())
}

pub async fn add_progress(state: &AppState, value: &str, metric: Metric, json: bool) -> Result<()> {
    let mut tracker = state.progress().await;
    tracker.set_metric(metric);

    let entry = tracker
        .add(value)
        .await
        .map_err(|e| anyhow::anyhow!(profile_error_message(&e, SAVE_FAILED)))?
        .clone();

    if json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
        return Ok(());
    }

    print_success(ENTRY_ADDED);
    println!(
        "  {} {}  {}",
        style(&entry.date).dim(),
        metric.label(),
        style(value_or_dash(entry.value(metric), "")).bold()
    );
    println!();
    Ok(())
}

pub async fn chart(state: &AppState, metric: Metric, json: bool) -> Result<()> {
    let mut tracker = state.progress().await;
    tracker.set_metric(metric);
    let entries = tracker.entries().to_vec();
    let sample = tracker.is_sample();

    let Some(layout) = tracker.chart() else {
        if json {
            println!("{}", json!({ "metric": metric, "points": [] }));
        } else {
            print_hint("Няма записи за този показател. Добавете с:", "fitc profile progress <стойност>");
        }
        return Ok(());
    };

    if json {
        let mut value = chart_json(layout, &entries);
        value["sample"] = json!(sample);
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {}",
        style("📈 Прогрес").cyan().bold(),
        style(layout.metric.label()).dim()
    );
    println!();
    for line in bar_lines(layout) {
        println!("  {line}");
    }
    println!();
    println!(
        "  {} {}   {} {}",
        style("мин").dim(),
        layout.min,
        style("макс").dim(),
        layout.max
    );
    if sample {
        println!();
        println!("  {}", style("Примерни данни. Добавете свой запис с fitc profile progress <стойност>.").dim());
    }
    println!();
    Ok(())
}

fn chart_json(layout: &ChartLayout, entries: &[ProgressEntry]) -> serde_json::Value {
    json!({
        "metric": layout.metric,
        "min": layout.min,
        "max": layout.max,
        "path": layout.path,
        "points": layout
            .points
            .iter()
            .map(|p| json!({ "date": p.date, "value": p.value, "x": p.x, "y": p.y }))
            .collect::<Vec<_>>(),
        "entries": entries,
    })
}

/// One horizontal bar per point, scaled between the chart's min and max.
fn bar_lines(layout: &ChartLayout) -> Vec<String> {
    let range = layout.max - layout.min;
    let date_width = layout.points.iter().map(|p| p.date.chars().count()).max().unwrap_or(0);

    layout
        .points
        .iter()
        .map(|p| {
            let filled = if range == 0.0 {
                BAR_WIDTH
            } else {
                1 + (((p.value - layout.min) / range) * (BAR_WIDTH - 1) as f64).round() as usize
            };
            format!(
                "{:<date_width$}  {}{} {}",
                p.date,
                "█".repeat(filled),
                " ".repeat(BAR_WIDTH - filled),
                p.value
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitcoach_types::error::ApiError;

    fn layout(values: &[(&str, f64)]) -> ChartLayout {
        let entries: Vec<ProgressEntry> = values
            .iter()
            .map(|(date, v)| ProgressEntry::single(*date, Metric::Weight, *v))
            .collect();
        ChartLayout::compute(&entries, Metric::Weight).unwrap()
    }

    #[test]
    fn test_bar_lines_scale_between_min_and_max() {
        let lines = bar_lines(&layout(&[("01.06", 60.0), ("02.06", 70.0)]));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].matches('█').count(), 1);
        assert_eq!(lines[1].matches('█').count(), BAR_WIDTH);
        assert!(lines[1].ends_with(" 70"));
    }

    #[test]
    fn test_flat_series_fills_bars() {
        let lines = bar_lines(&layout(&[("01.06", 5.0), ("02.06", 5.0)]));
        assert!(lines.iter().all(|l| l.matches('█').count() == BAR_WIDTH));
    }

    #[test]
    fn test_chart_json_carries_points_and_path() {
        let layout = layout(&[("01.06", 60.0), ("02.06", 70.0)]);
        let value = chart_json(&layout, &[]);
        assert_eq!(value["metric"], "weight");
        assert_eq!(value["points"][1]["date"], "02.06");
        assert_eq!(value["path"], layout.path);
    }

    #[test]
    fn test_profile_error_messages() {
        let invalid = ProfileError::InvalidEntry("'abc' is not a number".to_string());
        assert_eq!(profile_error_message(&invalid, SAVE_FAILED), "'abc' is not a number");
        let api = ProfileError::Api(ApiError::Transport("refused".to_string()));
        assert_eq!(profile_error_message(&api, SAVE_FAILED), SAVE_FAILED);
    }

    #[test]
    fn test_profile_table_marks_missing_fields() {
        let profile = UserProfile {
            weight: Some(72.5),
            gender: Some(Gender::Female),
            ..Default::default()
        };
        let rendered = profile_table(&profile).to_string();
        assert!(rendered.contains("72.5 kg"));
        assert!(rendered.contains("Жена"));
        assert!(rendered.contains('-'));
    }
}
