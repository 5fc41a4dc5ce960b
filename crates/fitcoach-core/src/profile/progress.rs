//! Locally tracked progress entries and the mini chart drawn from them.
//!
//! Entries live only in the durable store (`progressEntries`); the backend
//! never sees them.

use chrono::{Local, NaiveDate};
use fitcoach_types::error::ProfileError;
use fitcoach_types::profile::{Metric, ProgressEntry};
use fitcoach_types::storage::StorageKey;
use tracing::warn;

use crate::storage::{KvStore, get_json, set_json};

pub const CHART_WIDTH: f64 = 320.0;
pub const CHART_HEIGHT: f64 = 120.0;
pub const CHART_PADDING: f64 = 24.0;

/// Entries shown until the user records their own.
pub fn sample_entries() -> Vec<ProgressEntry> {
    let entry = |date: &str, weight, calories, body_fat| ProgressEntry {
        date: date.to_string(),
        weight: Some(weight),
        calories: Some(calories),
        body_fat: Some(body_fat),
    };
    vec![
        entry("01.06", 68.0, 2500.0, 22.0),
        entry("05.06", 67.0, 2400.0, 21.5),
        entry("10.06", 66.4, 2350.0, 21.0),
        entry("15.06", 66.0, 2300.0, 20.8),
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub date: String,
    pub value: f64,
    pub x: f64,
    pub y: f64,
}

/// Chart geometry for one metric, in a `CHART_WIDTH` x `CHART_HEIGHT` box.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub metric: Metric,
    pub min: f64,
    pub max: f64,
    pub points: Vec<ChartPoint>,
    /// SVG path data: `M x,y L x,y ...`.
    pub path: String,
}

impl ChartLayout {
    /// Lay out the entries that carry `metric`. `None` when there are none.
    pub fn compute(entries: &[ProgressEntry], metric: Metric) -> Option<Self> {
        let values: Vec<(&str, f64)> = entries
            .iter()
            .filter_map(|e| e.value(metric).map(|v| (e.date.as_str(), v)))
            .collect();
        if values.is_empty() {
            return None;
        }

        let min = values.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
        let max = values.iter().map(|(_, v)| *v).fold(f64::NEG_INFINITY, f64::max);
        let range = if max - min == 0.0 { 1.0 } else { max - min };
        let steps = if values.len() > 1 { (values.len() - 1) as f64 } else { 1.0 };

        let points: Vec<ChartPoint> = values
            .iter()
            .enumerate()
            .map(|(i, (date, value))| ChartPoint {
                date: date.to_string(),
                value: *value,
                x: CHART_PADDING + i as f64 * (CHART_WIDTH - 2.0 * CHART_PADDING) / steps,
                y: CHART_PADDING + (max - value) * (CHART_HEIGHT - 2.0 * CHART_PADDING) / range,
            })
            .collect();

        let path = points
            .iter()
            .enumerate()
            .map(|(i, p)| format!("{}{},{}", if i == 0 { "M" } else { "L" }, p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");

        Some(Self {
            metric,
            min,
            max,
            points,
            path,
        })
    }
}

pub struct ProgressTracker<S: KvStore> {
    store: S,
    entries: Vec<ProgressEntry>,
    /// `entries` is the sample series, not user data.
    sample: bool,
    metric: Metric,
    chart: Option<((usize, Metric), Option<ChartLayout>)>,
}

impl<S: KvStore> ProgressTracker<S> {
    /// Load stored entries, falling back to the sample series.
    pub async fn load(store: S) -> Self {
        let stored = match get_json::<Vec<ProgressEntry>, _>(&store, StorageKey::ProgressEntries).await {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Ignoring unreadable progress entries: {e}");
                None
            }
        };
        let sample = stored.is_none();
        Self {
            store,
            entries: stored.unwrap_or_else(sample_entries),
            sample,
            metric: Metric::default(),
            chart: None,
        }
    }

    pub fn entries(&self) -> &[ProgressEntry] {
        &self.entries
    }

    pub fn is_sample(&self) -> bool {
        self.sample
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn set_metric(&mut self, metric: Metric) {
        self.metric = metric;
    }

    /// Record today's value for the selected metric.
    pub async fn add(&mut self, raw: &str) -> Result<&ProgressEntry, ProfileError> {
        self.add_on(raw, Local::now().date_naive()).await
    }

    /// Record a value dated `date`. The first real entry replaces the sample
    /// series. Nothing changes in memory unless the store accepted the write.
    pub async fn add_on(&mut self, raw: &str, date: NaiveDate) -> Result<&ProgressEntry, ProfileError> {
        let value: f64 = raw
            .trim()
            .parse()
            .ok()
            .filter(|v: &f64| v.is_finite())
            .ok_or_else(|| ProfileError::InvalidEntry(format!("'{}' is not a number", raw.trim())))?;

        let entry = ProgressEntry::single(date.format("%d.%m").to_string(), self.metric, value);
        let mut entries = if self.sample { Vec::new() } else { self.entries.clone() };
        entries.push(entry);
        set_json(&self.store, StorageKey::ProgressEntries, &entries).await?;

        self.entries = entries;
        self.sample = false;
        self.chart = None;
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Chart for the selected metric, recomputed only when entries or metric change.
    pub fn chart(&mut self) -> Option<&ChartLayout> {
        let key = (self.entries.len(), self.metric);
        let stale = self.chart.as_ref().is_none_or(|(cached, _)| *cached != key);
        if stale {
            self.chart = Some((key, ChartLayout::compute(&self.entries, self.metric)));
        }
        self.chart.as_ref().and_then(|(_, layout)| layout.as_ref())
    }
}
