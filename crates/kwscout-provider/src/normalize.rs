//! Raw response to KeywordIdea conversion pipeline.
//!
//! Pure mapping, no I/O. Records missing a volume time series come out with
//! an empty series so downstream consumers always see a uniform shape, and
//! competition values outside the known enumeration map to `UNSPECIFIED`.

use kwscout_core::{CompetitionLevel, KeywordIdea, MonthlyVolume};

use crate::raw::{RawIdeaResponse, RawKeywordIdea, RawMonthlyVolume};

/// Converts a raw provider response into normalized keyword ideas.
///
/// Output order preserves the provider's (relevance-ranked) order; no
/// re-sorting across ideas. Records without keyword text carry no usable
/// information and are dropped.
pub fn normalize(raw: &RawIdeaResponse) -> Vec<KeywordIdea> {
    raw.results.iter().filter_map(normalize_idea).collect()
}

/// Converts a single raw record to a [`KeywordIdea`].
fn normalize_idea(raw: &RawKeywordIdea) -> Option<KeywordIdea> {
    let keyword = raw.text.as_deref().map(str::trim).filter(|t| !t.is_empty())?;

    let Some(metrics) = raw.keyword_idea_metrics.as_ref() else {
        return Some(KeywordIdea::new(
            keyword,
            0,
            CompetitionLevel::Unspecified,
        ));
    };

    let competition = metrics
        .competition
        .as_deref()
        .map(CompetitionLevel::parse)
        .unwrap_or_default();

    let mut idea = KeywordIdea::new(
        keyword,
        metrics.avg_monthly_searches.unwrap_or(0).max(0) as u64,
        competition,
    )
    .with_series(normalize_series(&metrics.monthly_search_volumes));

    if let Some(index) = metrics.competition_index {
        idea.competition_index = Some(index.clamp(0, 100) as u32);
    }
    idea.low_top_of_page_bid = metrics.low_top_of_page_bid_micros.map(micros_to_currency);
    idea.high_top_of_page_bid = metrics.high_top_of_page_bid_micros.map(micros_to_currency);

    Some(idea)
}

/// Builds a chronologically ordered series from raw monthly points.
///
/// Points whose month or year cannot be resolved are dropped; the rest are
/// sorted by calendar position regardless of provider ordering.
fn normalize_series(raw: &[RawMonthlyVolume]) -> Vec<MonthlyVolume> {
    let mut points: Vec<(i64, u32, u64)> = raw
        .iter()
        .filter_map(|point| {
            let year = point.year?;
            let month = month_number(point.month.as_deref()?)?;
            let searches = point.monthly_searches.unwrap_or(0).max(0) as u64;
            Some((year, month, searches))
        })
        .collect();

    points.sort_by_key(|&(year, month, _)| (year, month));
    points
        .into_iter()
        .map(|(year, month, searches)| MonthlyVolume::new(year as i32, month, searches))
        .collect()
}

/// Converts a bid in micros to currency units rounded to two decimals.
fn micros_to_currency(micros: i64) -> f64 {
    (micros as f64 / 1_000_000.0 * 100.0).round() / 100.0
}

/// Maps a provider month enumerant to its 1-based number.
fn month_number(name: &str) -> Option<u32> {
    let n = match name.trim().to_ascii_uppercase().as_str() {
        "JANUARY" => 1,
        "FEBRUARY" => 2,
        "MARCH" => 3,
        "APRIL" => 4,
        "MAY" => 5,
        "JUNE" => 6,
        "JULY" => 7,
        "AUGUST" => 8,
        "SEPTEMBER" => 9,
        "OCTOBER" => 10,
        "NOVEMBER" => 11,
        "DECEMBER" => 12,
        _ => return None,
    };
    Some(n)
}
