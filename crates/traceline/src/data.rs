//! Case-trace dataset: case studies and their year-grouped events
//!
//! The bundled dataset ships inside the binary; `--dataset <file>` swaps in
//! an external JSON file with the same shape.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use time::format_description;
use traceline_core::{CaseId, Timeline};

const BUNDLED_CASES: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/cases.json"));

/// Phase of a timeline event within the discovery-to-impact arc
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventPhase {
    /// The method itself: papers, models, releases
    Method,
    /// Uptake by other groups: replications, tooling, derived work
    Adoption,
    /// Real-world outcome: clinical, industrial, policy
    Impact,
}

impl EventPhase {
    pub fn label(self) -> &'static str {
        match self {
            EventPhase::Method => "METHOD",
            EventPhase::Adoption => "ADOPTION",
            EventPhase::Impact => "IMPACT",
        }
    }
}

/// A labelled headline figure attached to an event
#[derive(Debug, Clone, Deserialize)]
pub struct EventMetric {
    pub label: String,
    pub value: String,
}

/// One documented event on a case timeline
#[derive(Debug, Clone, Deserialize)]
pub struct CaseEvent {
    /// ISO date (yyyy-mm-dd)
    pub date: String,
    pub year: i32,
    pub phase: EventPhase,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub citations: u32,
    #[serde(default)]
    pub code_available: bool,
    #[serde(default)]
    pub metric: Option<EventMetric>,
}

impl CaseEvent {
    /// "Jul 2021" style display form; falls back to the raw ISO string when
    /// the date does not parse.
    pub fn display_date(&self) -> String {
        let parsed = format_description::parse("[year]-[month]-[day]")
            .ok()
            .and_then(|fmt| time::Date::parse(&self.date, &fmt).ok());
        let Some(date) = parsed else {
            return self.date.clone();
        };
        format_description::parse("[month repr:short] [year]")
            .ok()
            .and_then(|fmt| date.format(&fmt).ok())
            .unwrap_or_else(|| self.date.clone())
    }
}

/// Case-level headline metrics shown in the case panel
#[derive(Debug, Clone, Deserialize)]
pub struct HeadlineMetrics {
    /// 0..100
    pub impact_score: u8,
    /// 0..1
    pub code_availability: f32,
}

/// One case study: a titled, year-grouped trace of events
#[derive(Debug, Clone, Deserialize)]
pub struct CaseStudy {
    pub id: String,
    pub title: String,
    pub domain: String,
    pub summary: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub headline: HeadlineMetrics,
    pub events: Vec<CaseEvent>,
}

impl CaseStudy {
    /// Distinct event years, ascending. These are the groups the scroll
    /// controller addresses.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.events.iter().map(|e| e.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    pub fn events_for_year(&self, year: i32) -> Vec<&CaseEvent> {
        self.events.iter().filter(|e| e.year == year).collect()
    }

    pub fn timeline(&self) -> Timeline {
        Timeline::new(CaseId::new(&self.id), self.years())
    }

    /// First and last event year, if the case has any events.
    pub fn span(&self) -> Option<(i32, i32)> {
        let years = self.years();
        Some((*years.first()?, *years.last()?))
    }
}

/// The full dataset the viewer runs over
#[derive(Debug, Clone, Deserialize)]
pub struct Dataset {
    pub cases: Vec<CaseStudy>,
}

impl Dataset {
    pub fn bundled() -> Self {
        serde_json::from_str(BUNDLED_CASES).expect("bundled dataset JSON should parse")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .context(format!("Failed to read dataset: {}", path.display()))?;
        let dataset: Dataset = serde_json::from_str(&raw)
            .context(format!("Failed to parse dataset: {}", path.display()))?;
        Ok(dataset)
    }

    pub fn case_index(&self, id: &str) -> Option<usize> {
        self.cases.iter().position(|c| c.id == id)
    }
}
