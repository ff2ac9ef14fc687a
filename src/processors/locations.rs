use crate::models::{LocationField, LocationParts};

/// Decompose a composite location name into its city/place/code triple.
///
/// Total over every input shape: a missing value yields an all-missing
/// triple, a numeric value is stringified into the city slot, and a string
/// with fewer than three hyphen-delimited parts keeps the whole (trimmed)
/// string as the city. Parts beyond the third are discarded.
pub fn extract_location(field: &LocationField) -> LocationParts {
    match field {
        LocationField::Missing => LocationParts::default(),
        LocationField::Number(value) => LocationParts::new(
            Some(value.to_string()),
            Some(String::new()),
            Some(String::new()),
        ),
        LocationField::Text(name) => {
            let parts: Vec<&str> = name.split('-').collect();
            if parts.len() >= 3 {
                LocationParts::new(
                    Some(parts[0].trim().to_string()),
                    Some(parts[1].trim().to_string()),
                    Some(parts[2].trim().to_string()),
                )
            } else {
                LocationParts::new(
                    Some(name.trim().to_string()),
                    Some(String::new()),
                    Some(String::new()),
                )
            }
        }
    }
}
