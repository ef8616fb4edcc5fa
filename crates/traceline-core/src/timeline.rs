//! Case identity and year-group ordering

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a case trace
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(String);

impl CaseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CaseId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// The ordered year groups of one case. Years are unique and ascending;
/// construction enforces both so index math downstream can rely on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    case: CaseId,
    years: Vec<i32>,
}

impl Timeline {
    pub fn new(case: CaseId, mut years: Vec<i32>) -> Self {
        years.sort_unstable();
        years.dedup();
        Self { case, years }
    }

    pub fn empty(case: CaseId) -> Self {
        Self {
            case,
            years: Vec::new(),
        }
    }

    pub fn case(&self) -> &CaseId {
        &self.case
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn year_at(&self, index: usize) -> Option<i32> {
        self.years.get(index).copied()
    }

    /// Clamp an index into the addressable range (0 when empty).
    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.years.len().saturating_sub(1))
    }

    /// Resolve a year to a group index. Exact match wins; otherwise the
    /// nearest year by absolute distance, ties broken by the first
    /// occurrence in ascending order. Empty timelines resolve to 0.
    pub fn index_for_year(&self, year: i32) -> usize {
        let mut best = 0;
        for (i, &candidate) in self.years.iter().enumerate() {
            if candidate == year {
                return i;
            }
            if (candidate - year).abs() < (self.years[best] - year).abs() {
                best = i;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeline(years: &[i32]) -> Timeline {
        Timeline::new(CaseId::from("case"), years.to_vec())
    }

    #[test]
    fn test_years_sorted_and_deduped() {
        let t = Timeline::new(CaseId::from("case"), vec![2024, 2016, 2019, 2016]);
        assert_eq!(t.years(), &[2016, 2019, 2024]);
    }

    #[test]
    fn test_index_for_year_exact() {
        let t = timeline(&[2016, 2019, 2024]);
        assert_eq!(t.index_for_year(2019), 1);
        assert_eq!(t.index_for_year(2024), 2);
    }

    #[test]
    fn test_index_for_year_nearest() {
        // 2021 is 2 away from 2019 and 3 away from 2024
        let t = timeline(&[2016, 2019, 2024]);
        assert_eq!(t.index_for_year(2021), 1);
        assert_eq!(t.index_for_year(1990), 0);
        assert_eq!(t.index_for_year(2030), 2);
    }

    #[test]
    fn test_index_for_year_tie_prefers_first() {
        // 2020 is equidistant from 2018 and 2022
        let t = timeline(&[2018, 2022]);
        assert_eq!(t.index_for_year(2020), 0);
    }

    #[test]
    fn test_index_for_year_empty() {
        let t = timeline(&[]);
        assert_eq!(t.index_for_year(2020), 0);
    }

    #[test]
    fn test_clamp_index() {
        let t = timeline(&[2018, 2020, 2022]);
        assert_eq!(t.clamp_index(0), 0);
        assert_eq!(t.clamp_index(7), 2);
        assert_eq!(timeline(&[]).clamp_index(3), 0);
    }

    #[test]
    fn test_deserializes_from_dataset_json() {
        let t: Timeline =
            serde_json::from_str(r#"{"case":"alphafold","years":[2018,2020,2021]}"#)
                .expect("timeline should parse");
        assert_eq!(t.case().as_str(), "alphafold");
        assert_eq!(t.len(), 3);
    }
}
