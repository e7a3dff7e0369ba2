use once_cell::sync::Lazy;
use regex::Regex;

/// Street type abbreviations and their expansions, applied in this order.
pub const STREET_ABBREVIATIONS: &[(&str, &str)] = &[
    ("St", "Street"),
    ("St.", "Street"),
    ("Ave", "Avenue"),
    ("Rd", "Road"),
    ("Rd.", "Road"),
    ("Dr", "Drive"),
    ("Dr.", "Drive"),
    ("Pkwy", "Parkway"),
];

const POSTCODE_LENGTH: usize = 5;

static NON_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9]").unwrap());

/// Area code, trunk and line, separated by anything that is not a digit. An
/// extension may follow. The number has to end the string, but may start anywhere.
/// Only ASCII digits count, digits of other scripts are separators.
static PHONE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{3})[^0-9]*([0-9]{3})[^0-9]*([0-9]{4})[^0-9]*([0-9]*)$").unwrap());

/// Expands a trailing street type abbreviation, e.g. "North Lincoln Ave" becomes
/// "North Lincoln Avenue". Every rule is tried against the current name.
pub fn normalize_street(name: &str) -> String {
    let mut name = name.to_string();
    for (abbreviation, expansion) in STREET_ABBREVIATIONS {
        if let Some(stem) = name.strip_suffix(abbreviation) {
            name = format!("{stem}{expansion}");
        }
    }
    name
}

/// Keeps the first five digits, e.g. "60625-1234" becomes "60625". Shorter codes
/// are returned as they are, without padding.
pub fn normalize_postcode(value: &str) -> String {
    NON_DIGIT.replace_all(value, "")
        .chars()
        .take(POSTCODE_LENGTH)
        .collect()
}

/// Reduces a phone number to its ten digits, dropping country code and extension.
/// Returns `None` if no 3-3-4 digit pattern ends the value.
pub fn normalize_phone(value: &str) -> Option<String> {
    let captures = PHONE_NUMBER.captures(value)?;
    Some(format!("{}{}{}", &captures[1], &captures[2], &captures[3]))
}
