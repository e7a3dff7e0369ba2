use crate::data::{Element, RecordBuilder};
use crate::errors::ShapeError;

/// Attributes describing who last edited the element and when. They go into `created`.
pub const CREATED: [&str; 5] = ["version", "changeset", "timestamp", "user", "uid"];

pub const LAT: &str = "lat";
pub const LON: &str = "lon";

/// Splits the element's attributes into `created`, `pos` and plain fields.
///
/// `pos` is only set when both coordinates are present. A lone `lat` or `lon`
/// is dropped, it never becomes a plain field.
pub fn partition_attributes(element: &Element, builder: &mut RecordBuilder) -> Result<(), ShapeError> {
    let mut lat: Option<f64> = None;
    let mut lon: Option<f64> = None;

    for (name, value) in &element.attributes {
        if CREATED.contains(&name.as_str()) {
            builder.insert_created(name.clone(), value.clone());
        } else if name == LAT {
            lat = Some(parse_coordinate(element, name, value)?);
        } else if name == LON {
            lon = Some(parse_coordinate(element, name, value)?);
        } else {
            builder.insert_field(name.clone(), value.clone());
        }
    }

    if let (Some(lat), Some(lon)) = (lat, lon) {
        builder.set_pos(lat, lon);
    }
    Ok(())
}

/// NaN and infinities parse as floats but have no JSON representation, so they
/// are rejected like any other non-numeric value.
fn parse_coordinate(element: &Element, name: &str, value: &str) -> Result<f64, ShapeError> {
    match value.trim().parse::<f64>() {
        Ok(coordinate) if coordinate.is_finite() => Ok(coordinate),
        _ => Err(ShapeError::InvalidPosition {
            id: element.id().map(str::to_string),
            attribute: name.to_string(),
            value: value.to_string(),
        }),
    }
}
