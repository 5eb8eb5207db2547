//! U.S. state name utilities.
//!
//! Provides the ordered reference list of the 50 U.S. states and
//! case-insensitive lookups against it.

/// Full names of the 50 U.S. states, in alphabetical order.
///
/// The order of this list is the order of the choropleth series.
pub const US_STATES: &[&str] = &[
    "Alabama",
    "Alaska",
    "Arizona",
    "Arkansas",
    "California",
    "Colorado",
    "Connecticut",
    "Delaware",
    "Florida",
    "Georgia",
    "Hawaii",
    "Idaho",
    "Illinois",
    "Indiana",
    "Iowa",
    "Kansas",
    "Kentucky",
    "Louisiana",
    "Maine",
    "Maryland",
    "Massachusetts",
    "Michigan",
    "Minnesota",
    "Mississippi",
    "Missouri",
    "Montana",
    "Nebraska",
    "Nevada",
    "New Hampshire",
    "New Jersey",
    "New Mexico",
    "New York",
    "North Carolina",
    "North Dakota",
    "Ohio",
    "Oklahoma",
    "Oregon",
    "Pennsylvania",
    "Rhode Island",
    "South Carolina",
    "South Dakota",
    "Tennessee",
    "Texas",
    "Utah",
    "Vermont",
    "Virginia",
    "Washington",
    "West Virginia",
    "Wisconsin",
    "Wyoming",
];

/// Returns the canonical spelling of a state name, matched
/// case-insensitively and ignoring surrounding whitespace.
///
/// Returns `None` for names that are not in [`US_STATES`]. Abbreviations
/// (e.g. `"TX"`) are not accepted.
#[must_use]
pub fn canonical_state_name(name: &str) -> Option<&'static str> {
    let name = name.trim();
    US_STATES
        .iter()
        .copied()
        .find(|state| state.eq_ignore_ascii_case(name))
}

/// Returns `true` if `name` is a recognized U.S. state name.
#[must_use]
pub fn is_us_state(name: &str) -> bool {
    canonical_state_name(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_count() {
        assert_eq!(US_STATES.len(), 50);
    }

    #[test]
    fn states_are_sorted_and_unique() {
        for window in US_STATES.windows(2) {
            assert!(
                window[0] < window[1],
                "out of order: {} >= {}",
                window[0],
                window[1]
            );
        }
    }

    #[test]
    fn case_insensitive_match() {
        assert_eq!(canonical_state_name("texas"), Some("Texas"));
        assert_eq!(canonical_state_name("NEW YORK"), Some("New York"));
        assert_eq!(canonical_state_name("  north dakota "), Some("North Dakota"));
    }

    #[test]
    fn rejects_unknown_names() {
        assert_eq!(canonical_state_name("Texass"), None);
        assert_eq!(canonical_state_name("TX"), None);
        assert_eq!(canonical_state_name("District of Columbia"), None);
        assert!(!is_us_state(""));
    }
}
