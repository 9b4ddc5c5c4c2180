//! Reserved namespace checks for plugin entry points.

use super::InvalidDescriptor;

/// Fail if `qualified_name` lies within any of the `forbidden` prefixes.
///
/// An absent name passes; a missing main class is reported by the field
/// checks, not here.
pub fn check_namespace<S: AsRef<str>>(
    qualified_name: Option<&str>,
    label: &str,
    forbidden: &[S],
) -> Result<(), InvalidDescriptor> {
    let Some(name) = qualified_name else {
        return Ok(());
    };

    for prefix in forbidden {
        let prefix = prefix.as_ref();
        if name.starts_with(prefix) {
            return Err(InvalidDescriptor::new(format!(
                "{} may not be within the {} namespace",
                label, prefix
            )));
        }
    }

    Ok(())
}
