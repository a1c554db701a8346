//! US state abbreviation and name lookup.
//!
//! The feature layers disagree on how they spell a state: river gauges use the
//! postal abbreviation, rivers and dams use the full name.

/// `(abbreviation, full name)` for the 50 states and the District of Columbia.
pub const STATES: &[(&str, &str)] = &[
    ("AL", "Alabama"),
    ("AK", "Alaska"),
    ("AZ", "Arizona"),
    ("AR", "Arkansas"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DE", "Delaware"),
    ("DC", "District of Columbia"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("IA", "Iowa"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("ME", "Maine"),
    ("MD", "Maryland"),
    ("MA", "Massachusetts"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MS", "Mississippi"),
    ("MO", "Missouri"),
    ("MT", "Montana"),
    ("NE", "Nebraska"),
    ("NV", "Nevada"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NY", "New York"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VT", "Vermont"),
    ("VA", "Virginia"),
    ("WA", "Washington"),
    ("WV", "West Virginia"),
    ("WI", "Wisconsin"),
    ("WY", "Wyoming"),
];

/// Full state name for a postal abbreviation (case-insensitive).
pub fn name_for_abbreviation(abbreviation: &str) -> Option<&'static str> {
    STATES
        .iter()
        .find(|(abbr, _)| abbr.eq_ignore_ascii_case(abbreviation.trim()))
        .map(|(_, name)| *name)
}

/// Postal abbreviation for a full state name (case-insensitive).
pub fn abbreviation_for_name(name: &str) -> Option<&'static str> {
    STATES
        .iter()
        .find(|(_, full)| full.eq_ignore_ascii_case(name.trim()))
        .map(|(abbr, _)| *abbr)
}

/// Full name for an abbreviation, or the uppercased input when it is unknown.
pub fn resolve_full_name(abbreviation: &str) -> String {
    name_for_abbreviation(abbreviation)
        .map(str::to_string)
        .unwrap_or_else(|| abbreviation.trim().to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_size() {
        assert_eq!(STATES.len(), 51);
    }

    #[test]
    fn test_name_for_abbreviation() {
        assert_eq!(name_for_abbreviation("MI"), Some("Michigan"));
        assert_eq!(name_for_abbreviation("tx"), Some("Texas"));
        assert_eq!(name_for_abbreviation(" wv "), Some("West Virginia"));
        assert_eq!(name_for_abbreviation("ZZ"), None);
    }

    #[test]
    fn test_abbreviation_for_name() {
        assert_eq!(abbreviation_for_name("New York"), Some("NY"));
        assert_eq!(abbreviation_for_name("north dakota"), Some("ND"));
        assert_eq!(abbreviation_for_name("Atlantis"), None);
    }

    #[test]
    fn test_resolve_full_name_falls_back_to_input() {
        assert_eq!(resolve_full_name("va"), "Virginia");
        assert_eq!(resolve_full_name("pr"), "PR");
    }

    #[test]
    fn test_round_trip_every_entry() {
        for (abbr, name) in STATES {
            assert_eq!(abbreviation_for_name(name), Some(*abbr));
        }
    }
}
