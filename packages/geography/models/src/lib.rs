#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! U.S. state reference data and place-name normalization.
//!
//! The [`states::US_STATES`] list is the single source of truth for which
//! state names the service accepts and for the order of the per-state
//! choropleth series.

pub mod states;

/// Converts a place name to title case for display.
///
/// Every alphabetic character that follows a non-alphabetic character (or
/// starts the string) is upper-cased; all other alphabetic characters are
/// lower-cased. Separators such as spaces, hyphens and apostrophes are kept
/// as-is, so `"winston-salem"` becomes `"Winston-Salem"`.
#[must_use]
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_is_alpha = false;

    for c in name.chars() {
        if c.is_alphabetic() {
            if prev_is_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_alpha = true;
        } else {
            out.push(c);
            prev_is_alpha = false;
        }
    }

    out
}

/// Lower-cases and trims a place name for use as a lookup key.
#[must_use]
pub fn lookup_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_cases_multi_word_names() {
        assert_eq!(title_case("new york"), "New York");
        assert_eq!(title_case("SALT LAKE CITY"), "Salt Lake City");
        assert_eq!(title_case("austin"), "Austin");
    }

    #[test]
    fn title_case_restarts_after_separators() {
        assert_eq!(title_case("winston-salem"), "Winston-Salem");
        assert_eq!(title_case("o'fallon"), "O'Fallon");
        assert_eq!(title_case("st. louis"), "St. Louis");
    }

    #[test]
    fn title_case_empty() {
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn lookup_key_trims_and_lowercases() {
        assert_eq!(lookup_key("  New York "), "new york");
        assert_eq!(lookup_key("TEXAS"), "texas");
    }
}
