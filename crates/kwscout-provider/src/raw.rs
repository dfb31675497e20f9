//! Raw keyword-idea schema as returned by the provider.
//!
//! Explicit tagged structs for the `generateKeywordIdeas` response. The
//! REST transport encodes int64 fields as JSON strings, so numeric fields
//! go through a string-or-number deserializer.

use serde::{Deserialize, Deserializer};

/// One page (or an accumulated set) of keyword-idea results.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawIdeaResponse {
    /// Keyword ideas in provider (relevance) order.
    pub results: Vec<RawKeywordIdea>,
    /// Continuation token for the next page, when more results exist.
    pub next_page_token: Option<String>,
}

/// A single raw keyword idea.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawKeywordIdea {
    /// The keyword text.
    pub text: Option<String>,
    /// Popularity metrics; absent for some ideas.
    pub keyword_idea_metrics: Option<RawIdeaMetrics>,
}

/// Raw popularity metrics for a keyword idea.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawIdeaMetrics {
    /// Average monthly searches.
    #[serde(deserialize_with = "de_opt_i64")]
    pub avg_monthly_searches: Option<i64>,
    /// Competition level as a provider enumerant string.
    pub competition: Option<String>,
    /// Numeric competition index (0-100).
    #[serde(deserialize_with = "de_opt_i64")]
    pub competition_index: Option<i64>,
    /// Low top-of-page bid in micros (millionths of a currency unit).
    #[serde(deserialize_with = "de_opt_i64")]
    pub low_top_of_page_bid_micros: Option<i64>,
    /// High top-of-page bid in micros.
    #[serde(deserialize_with = "de_opt_i64")]
    pub high_top_of_page_bid_micros: Option<i64>,
    /// Monthly search-volume history; may be absent or unordered.
    pub monthly_search_volumes: Vec<RawMonthlyVolume>,
}

/// One raw monthly search-volume point.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawMonthlyVolume {
    /// Month name enumerant (e.g., "JANUARY").
    pub month: Option<String>,
    /// Calendar year.
    #[serde(deserialize_with = "de_opt_i64")]
    pub year: Option<i64>,
    /// Searches during that month.
    #[serde(deserialize_with = "de_opt_i64")]
    pub monthly_searches: Option<i64>,
}

/// Deserializes an optional int64 that may arrive as a JSON number or a
/// decimal string.
fn de_opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Int64 {
        Num(i64),
        Str(String),
    }

    match Option::<Int64>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Int64::Num(n)) => Ok(Some(n)),
        Some(Int64::Str(s)) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_response_with_string_int64() {
        let body = r#"{
            "results": [
                {
                    "text": "running shoes",
                    "keywordIdeaMetrics": {
                        "avgMonthlySearches": "10000",
                        "competition": "HIGH",
                        "competitionIndex": "87",
                        "lowTopOfPageBidMicros": "450000",
                        "highTopOfPageBidMicros": "1800000",
                        "monthlySearchVolumes": [
                            {"month": "JANUARY", "year": "2025", "monthlySearches": "9000"},
                            {"month": "FEBRUARY", "year": "2025", "monthlySearches": "11000"}
                        ]
                    }
                }
            ],
            "nextPageToken": "abc"
        }"#;

        let parsed: RawIdeaResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.results.len(), 1);
        assert_eq!(parsed.next_page_token.as_deref(), Some("abc"));

        let idea = &parsed.results[0];
        assert_eq!(idea.text.as_deref(), Some("running shoes"));

        let metrics = idea.keyword_idea_metrics.as_ref().unwrap();
        assert_eq!(metrics.avg_monthly_searches, Some(10000));
        assert_eq!(metrics.competition.as_deref(), Some("HIGH"));
        assert_eq!(metrics.competition_index, Some(87));
        assert_eq!(metrics.low_top_of_page_bid_micros, Some(450_000));
        assert_eq!(metrics.monthly_search_volumes.len(), 2);
        assert_eq!(metrics.monthly_search_volumes[0].monthly_searches, Some(9000));
    }

    #[test]
    fn parses_numeric_int64_too() {
        let body = r#"{"results": [{"text": "a", "keywordIdeaMetrics": {"avgMonthlySearches": 500}}]}"#;
        let parsed: RawIdeaResponse = serde_json::from_str(body).unwrap();
        let metrics = parsed.results[0].keyword_idea_metrics.as_ref().unwrap();
        assert_eq!(metrics.avg_monthly_searches, Some(500));
        assert!(metrics.monthly_search_volumes.is_empty());
    }

    #[test]
    fn tolerates_missing_metrics() {
        let body = r#"{"results": [{"text": "bare"}]}"#;
        let parsed: RawIdeaResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.results[0].keyword_idea_metrics.is_none());
        assert!(parsed.next_page_token.is_none());
    }

    #[test]
    fn empty_object_is_an_empty_response() {
        let parsed: RawIdeaResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.results.is_empty());
    }
}
