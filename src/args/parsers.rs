use crate::error::ValidationError;

/// Checks that a raw header entry has a `:` separator and a non-empty name.
///
/// The entry is returned unchanged; splitting happens when each request is
/// built.
pub(crate) fn parse_header(s: &str) -> Result<String, ValidationError> {
    match s.split_once(':') {
        Some((name, _)) if !name.trim().is_empty() => Ok(s.to_owned()),
        Some(_) | None => Err(ValidationError::InvalidHeaderFormat {
            value: s.to_owned(),
        }),
    }
}
