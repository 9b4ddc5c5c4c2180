//! API version checks.
//!
//! Platforms accept `major.minor` API versions from a per-platform minimum,
//! and `major.minor.patch` only from 1.20.5 onwards.

use regex::Regex;

use super::InvalidDescriptor;

/// First minor release that accepts three-segment API versions.
const PATCHED_SINCE_MINOR: u32 = 20;

/// First patch of [`PATCHED_SINCE_MINOR`] that accepts three-segment API versions.
const PATCHED_SINCE_PATCH: u32 = 5;

/// Validate an API version string against `pattern` and a minimum minor version.
///
/// The whole string must match `pattern`; the segment policy is applied after
/// that, so a version rejected by the pattern never reaches it.
pub fn validate_api_version(
    version: &str,
    pattern: &Regex,
    min_minor: u32,
) -> Result<(), InvalidDescriptor> {
    if !fully_matches(pattern, version) {
        return Err(InvalidDescriptor::new(format!(
            "Invalid api version: should match {}",
            pattern.as_str()
        )));
    }

    let segments = version
        .split('.')
        .map(str::parse::<u32>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| {
            InvalidDescriptor::new(format!(
                "Invalid api version: '{}' has a non-numeric segment",
                version
            ))
        })?;

    match segments.as_slice() {
        [_, minor] => {
            if *minor < min_minor {
                return Err(InvalidDescriptor::new(format!(
                    "Invalid api version: should be at least 1.{}",
                    min_minor
                )));
            }
        }
        [_, minor, patch] => {
            if *minor < PATCHED_SINCE_MINOR
                || (*minor == PATCHED_SINCE_MINOR && *patch < PATCHED_SINCE_PATCH)
            {
                return Err(InvalidDescriptor::new(format!(
                    "Invalid api version: Minor versions are not supported before 1.{}.{}",
                    PATCHED_SINCE_MINOR, PATCHED_SINCE_PATCH
                )));
            }
        }
        _ => {
            return Err(InvalidDescriptor::new(format!(
                "Invalid api version: {}",
                pattern.as_str()
            )));
        }
    }

    Ok(())
}

/// Whether `pattern` matches the entire input, anchored or not.
fn fully_matches(pattern: &Regex, input: &str) -> bool {
    pattern
        .find(input)
        .is_some_and(|m| m.start() == 0 && m.end() == input.len())
}
