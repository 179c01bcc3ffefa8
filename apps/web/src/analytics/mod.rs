//! Aggregates over the record table for the analytics view.

pub mod handlers;

use serde::Serialize;

use crate::errors::AppError;
use crate::models::record::{Record, RecordType};
use crate::state::AppState;
use crate::storage::run_blocking;
use crate::views::pages::{AnalyticsPage, Notice};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RecordCounts {
    pub campaigns: usize,
    pub pitches: usize,
    pub leads: usize,
}

impl RecordCounts {
    pub fn get(&self, record_type: RecordType) -> usize {
        match record_type {
            RecordType::Campaign => self.campaigns,
            RecordType::Pitch => self.pitches,
            RecordType::Lead => self.leads,
        }
    }
}

/// One bar of the type-frequency chart. `percent` is relative to the tallest bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartBar {
    pub label: RecordType,
    pub count: usize,
    pub percent: usize,
}

/// A record with its current ordinal position, which is its delete id.
#[derive(Debug, Clone, Serialize)]
pub struct IndexedRecord {
    pub id: usize,
    pub record: Record,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSummary {
    pub counts: RecordCounts,
    pub chart: Vec<ChartBar>,
    pub rows: Vec<IndexedRecord>,
}

pub fn count_by_type(records: &[Record]) -> RecordCounts {
    records
        .iter()
        .fold(RecordCounts::default(), |mut counts, record| {
            match record.record_type {
                RecordType::Campaign => counts.campaigns += 1,
                RecordType::Pitch => counts.pitches += 1,
                RecordType::Lead => counts.leads += 1,
            }
            counts
        })
}

/// Non-empty types ordered by descending count; ties keep campaign, pitch, lead order.
pub fn type_frequency(counts: &RecordCounts) -> Vec<ChartBar> {
    let max = RecordType::ALL
        .iter()
        .map(|t| counts.get(*t))
        .max()
        .unwrap_or(0);

    let mut bars: Vec<ChartBar> = RecordType::ALL
        .iter()
        .map(|t| (*t, counts.get(*t)))
        .filter(|(_, count)| *count > 0)
        .map(|(label, count)| ChartBar {
            label,
            count,
            percent: count * 100 / max.max(1),
        })
        .collect();
    bars.sort_by(|a, b| b.count.cmp(&a.count));
    bars
}

/// `None` for an empty table, which the view shows as "No data yet".
pub fn summarize(records: Vec<Record>) -> Option<AnalyticsSummary> {
    if records.is_empty() {
        return None;
    }

    let counts = count_by_type(&records);
    Some(AnalyticsSummary {
        counts,
        chart: type_frequency(&counts),
        rows: records
            .into_iter()
            .enumerate()
            .map(|(id, record)| IndexedRecord { id, record })
            .collect(),
    })
}

/// Loads the table and builds the analytics view.
pub async fn load_page(
    state: &AppState,
    username: String,
    notice: Option<Notice>,
) -> Result<AnalyticsPage, AppError> {
    let store = state.records.clone();
    let records = run_blocking(move || store.load_all()).await?;

    Ok(AnalyticsPage {
        username,
        summary: summarize(records),
        notice,
    })
}
