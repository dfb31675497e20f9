//! Normalized keyword idea types.
//!
//! These are the stable shapes returned to HTTP callers, independent of the
//! provider's wire format. Every idea carries a `monthly_series` field, even
//! when the provider returned no time series, so downstream consumers always
//! see a uniform shape.

use serde::{Deserialize, Serialize};

/// The provider's categorical estimate of advertiser competition for a keyword.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CompetitionLevel {
    /// Low advertiser competition.
    Low,
    /// Medium advertiser competition.
    Medium,
    /// High advertiser competition.
    High,
    /// Competition level not reported or not recognized.
    #[default]
    Unspecified,
}

impl CompetitionLevel {
    /// Parses a provider competition value.
    ///
    /// Values outside the known enumeration map to [`Unspecified`] rather
    /// than failing, since the provider may introduce new categories.
    ///
    /// [`Unspecified`]: CompetitionLevel::Unspecified
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "LOW" => Self::Low,
            "MEDIUM" => Self::Medium,
            "HIGH" => Self::High,
            _ => Self::Unspecified,
        }
    }

    /// Returns the uppercase wire name for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Unspecified => "UNSPECIFIED",
        }
    }
}

/// One point of a keyword's monthly search-volume time series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyVolume {
    /// Month in `YYYY-MM` form. Lexicographic order matches chronological
    /// order, which is what the series ordering invariant relies on.
    pub month: String,
    /// Number of searches during that month.
    pub searches: u64,
}

impl MonthlyVolume {
    /// Creates a new data point from a calendar year and a 1-based month.
    pub fn new(year: i32, month: u32, searches: u64) -> Self {
        Self {
            month: format!("{year:04}-{month:02}"),
            searches,
        }
    }
}

/// A provider-suggested keyword with associated popularity metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordIdea {
    /// The keyword text.
    pub keyword: String,

    /// Average monthly search volume.
    pub avg_monthly_searches: u64,

    /// Categorical competition estimate.
    pub competition: CompetitionLevel,

    /// Numeric competition index (0-100), when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competition_index: Option<u32>,

    /// Low top-of-page bid in currency units, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_top_of_page_bid: Option<f64>,

    /// High top-of-page bid in currency units, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_top_of_page_bid: Option<f64>,

    /// Monthly search-volume time series, chronologically ordered.
    /// Empty when the provider reported no series.
    pub monthly_series: Vec<MonthlyVolume>,
}

impl KeywordIdea {
    /// Creates a new keyword idea with an empty time series.
    pub fn new(
        keyword: impl Into<String>,
        avg_monthly_searches: u64,
        competition: CompetitionLevel,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            avg_monthly_searches,
            competition,
            competition_index: None,
            low_top_of_page_bid: None,
            high_top_of_page_bid: None,
            monthly_series: Vec::new(),
        }
    }

    /// Builder method to set the monthly series.
    pub fn with_series(mut self, series: Vec<MonthlyVolume>) -> Self {
        self.monthly_series = series;
        self
    }

    /// Builder method to set the competition index.
    pub fn with_competition_index(mut self, index: u32) -> Self {
        self.competition_index = Some(index);
        self
    }

    /// Builder method to set the top-of-page bid range.
    pub fn with_bids(mut self, low: f64, high: f64) -> Self {
        self.low_top_of_page_bid = Some(low);
        self.high_top_of_page_bid = Some(high);
        self
    }

    /// Returns true if the series is in chronological order.
    pub fn series_is_ordered(&self) -> bool {
        self.monthly_series
            .windows(2)
            .all(|pair| pair[0].month <= pair[1].month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn competition_parse_known_values() {
        assert_eq!(CompetitionLevel::parse("LOW"), CompetitionLevel::Low);
        assert_eq!(CompetitionLevel::parse("medium"), CompetitionLevel::Medium);
        assert_eq!(CompetitionLevel::parse(" HIGH "), CompetitionLevel::High);
    }

    #[test]
    fn competition_parse_unknown_maps_to_unspecified() {
        assert_eq!(
            CompetitionLevel::parse("ULTRA"),
            CompetitionLevel::Unspecified
        );
        assert_eq!(CompetitionLevel::parse(""), CompetitionLevel::Unspecified);
    }

    #[test]
    fn competition_serde_uppercase() {
        let json = serde_json::to_string(&CompetitionLevel::High).unwrap();
        assert_eq!(json, "\"HIGH\"");
        let parsed: CompetitionLevel = serde_json::from_str("\"UNSPECIFIED\"").unwrap();
        assert_eq!(parsed, CompetitionLevel::Unspecified);
    }

    #[test]
    fn monthly_volume_formats_month() {
        let point = MonthlyVolume::new(2025, 3, 1200);
        assert_eq!(point.month, "2025-03");
        assert_eq!(point.searches, 1200);
    }

    #[test]
    fn idea_serializes_empty_series() {
        let idea = KeywordIdea::new("running shoes", 10000, CompetitionLevel::High);
        let json = serde_json::to_value(&idea).unwrap();

        assert_eq!(json["keyword"], "running shoes");
        assert_eq!(json["avg_monthly_searches"], 10000);
        assert_eq!(json["competition"], "HIGH");
        // The series must be present (empty array), never absent.
        assert!(json["monthly_series"].as_array().unwrap().is_empty());
        // Optional metrics are omitted when not reported.
        assert!(json.get("competition_index").is_none());
    }

    #[test]
    fn idea_builder_sets_metrics() {
        let idea = KeywordIdea::new("trail shoes", 500, CompetitionLevel::Low)
            .with_competition_index(12)
            .with_bids(0.45, 1.8)
            .with_series(vec![
                MonthlyVolume::new(2025, 1, 400),
                MonthlyVolume::new(2025, 2, 600),
            ]);

        assert_eq!(idea.competition_index, Some(12));
        assert_eq!(idea.low_top_of_page_bid, Some(0.45));
        assert_eq!(idea.high_top_of_page_bid, Some(1.8));
        assert!(idea.series_is_ordered());
    }

    #[test]
    fn series_order_check() {
        let ordered = KeywordIdea::new("a", 0, CompetitionLevel::Unspecified).with_series(vec![
            MonthlyVolume::new(2024, 11, 1),
            MonthlyVolume::new(2024, 12, 2),
            MonthlyVolume::new(2025, 1, 3),
        ]);
        assert!(ordered.series_is_ordered());

        let unordered = KeywordIdea::new("b", 0, CompetitionLevel::Unspecified).with_series(vec![
            MonthlyVolume::new(2025, 2, 1),
            MonthlyVolume::new(2025, 1, 2),
        ]);
        assert!(!unordered.series_is_ordered());
    }
}
