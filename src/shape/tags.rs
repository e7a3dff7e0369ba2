use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::data::{Element, RecordBuilder};

use super::normalize::{normalize_phone, normalize_postcode, normalize_street};
use super::ShapeOptions;

pub const ADDRESS_PREFIX: &str = "addr";
pub const STREET_KEY: &str = "addr:street";
pub const POSTCODE_KEY: &str = "addr:postcode";
pub const PHONE_KEY: &str = "phone";

/// Holds the original text of a phone tag that could not be normalized.
pub const RAW_PHONE_KEY: &str = "phone_raw";

/// Characters that make a tag key unusable as a document field name.
static PROBLEM_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[=\+/&<>;'"\?%#$@\,\. \t\r\n]"#).unwrap());

/// Returns the field of an `addr:<field>` key. Keys with more segments, such as
/// `addr:street:name`, are not address fields.
fn address_field(key: &str) -> Option<&str> {
    if !key.starts_with(ADDRESS_PREFIX) {
        return None;
    }
    let mut segments = key.split(':');
    segments.next()?;
    let field = segments.next()?;
    match segments.next() {
        Some(_) => None,
        None => Some(field),
    }
}

pub fn has_problem_chars(key: &str) -> bool {
    PROBLEM_CHARS.is_match(key)
}

/// Routes every tag of the element into the address, the phone field or a plain field.
pub fn classify_tags(element: &Element, options: &ShapeOptions, builder: &mut RecordBuilder) {
    for (key, value) in &element.tags {
        if options.skip_problem_keys && has_problem_chars(key) {
            debug!(id = element.id().unwrap_or_default(), key = key.as_str(); "Skipping tag with problematic key");
            continue;
        }

        if let Some(field) = address_field(key) {
            let value = match key.as_str() {
                STREET_KEY => normalize_street(value),
                POSTCODE_KEY => normalize_postcode(value),
                _ => value.clone(),
            };
            builder.insert_address(field.to_string(), value);
        } else if key == PHONE_KEY {
            match normalize_phone(value) {
                Some(phone) => builder.insert_field(PHONE_KEY.to_string(), phone),
                None => {
                    warn!(id = element.id().unwrap_or_default(), phone = value.as_str(); "Could not normalize phone number");
                    builder.insert_field(RAW_PHONE_KEY.to_string(), value.clone());
                },
            }
        } else {
            builder.insert_field(key.clone(), value.clone());
        }
    }
}
