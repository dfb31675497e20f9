//! Language and location targeting constants.
//!
//! The API takes full resource names (`languageConstants/1000`,
//! `geoTargetConstants/2840`); callers send short codes like `en` or `US`.
//! Unrecognized codes fall back to English / United States rather than
//! failing the request.

const LANGUAGE_PREFIX: &str = "languageConstants/";
const GEO_PREFIX: &str = "geoTargetConstants/";

/// English language constant, the fallback.
const DEFAULT_LANGUAGE: &str = "languageConstants/1000";

/// United States geo target constant, the fallback.
const DEFAULT_GEO_TARGET: &str = "geoTargetConstants/2840";

/// Resolves a language filter to a `languageConstants/...` resource name.
///
/// Accepts a short ISO-ish code or a full resource name; `None` and
/// unknown codes resolve to English.
pub fn language_constant(code: Option<&str>) -> String {
    let Some(code) = code.map(str::trim).filter(|c| !c.is_empty()) else {
        return DEFAULT_LANGUAGE.to_string();
    };

    if code.starts_with(LANGUAGE_PREFIX) {
        return code.to_string();
    }

    let id = match code.to_ascii_lowercase().as_str() {
        "en" => 1000,
        "de" => 1001,
        "fr" => 1002,
        "es" => 1003,
        "it" => 1004,
        "ja" => 1005,
        "pt" => 1014,
        "zh" => 1017,
        "ru" => 1031,
        _ => return DEFAULT_LANGUAGE.to_string(),
    };
    format!("{LANGUAGE_PREFIX}{id}")
}

/// Resolves a location filter to a `geoTargetConstants/...` resource name.
///
/// Accepts a country code or a full resource name; `None` and unknown
/// codes resolve to the United States.
pub fn geo_target_constant(code: Option<&str>) -> String {
    let Some(code) = code.map(str::trim).filter(|c| !c.is_empty()) else {
        return DEFAULT_GEO_TARGET.to_string();
    };

    if code.starts_with(GEO_PREFIX) {
        return code.to_string();
    }

    let id = match code.to_ascii_uppercase().as_str() {
        "US" => 2840,
        "CA" => 2124,
        "GB" => 2826,
        "AU" => 2036,
        "DE" => 2276,
        "FR" => 2250,
        "ES" => 2724,
        _ => return DEFAULT_GEO_TARGET.to_string(),
    };
    format!("{GEO_PREFIX}{id}")
}
