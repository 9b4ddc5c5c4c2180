//! User-friendly diagnostic messages.
//!
//! Every error should say what was rejected, where it came from, and what to
//! change.

use std::fmt;
use std::path::PathBuf;

use miette::{Diagnostic as MietteDiagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::core::platform::Platform;
use crate::validate::InvalidDescriptor;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when no manifest file is found.
    pub const NO_MANIFEST: &str =
        "help: Create a `plugin-yml.toml` with a [project] table and one platform table";

    /// Suggestion when Maven Central is used without a proxy.
    pub const CENTRAL_PROXY: &str =
        "help: Set `proxy = \"default\"` in the [libraries] table of plugin-yml.toml";
}

/// An error message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related location (file path)
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Describe a description rejected by its platform's rules.
    pub fn invalid_descriptor(platform: Platform, error: &InvalidDescriptor) -> Self {
        let mut diag = Diagnostic::error(format!(
            "invalid {} plugin description",
            platform.display_name()
        ))
        .with_context(error.message());

        let table = platform.key();
        let message = error.message();
        if message.contains("namespace") {
            diag = diag.with_suggestion(format!(
                "Move the class out of the reserved namespace, or check `main` in [{}]",
                table
            ));
        } else if message.contains("not set") || message.contains("not defined") {
            diag = diag.with_suggestion(format!(
                "Set the missing field in [{}] or its fallback in [project]",
                table
            ));
        } else if message.contains("cannot contain ':'") {
            diag = diag.with_suggestion("Drop the `plugin:` prefix from the command or alias");
        }
        diag
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a file location.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let severity_str = if color {
            "\x1b[1;31merror\x1b[0m"
        } else {
            "error"
        };

        output.push_str(&format!("{}: {}\n", severity_str, self.message));

        if let Some(ref path) = self.location {
            output.push_str(&format!("  --> {}\n", path.display()));
        }

        for ctx in &self.context {
            output.push_str(&format!("  = {}\n", ctx));
        }

        if !self.suggestions.is_empty() {
            output.push('\n');
            let help_prefix = if color {
                "\x1b[1;32mhelp\x1b[0m"
            } else {
                "help"
            };
            output.push_str(&format!("{}: consider:\n", help_prefix));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// A manifest URL that does not parse.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("invalid URL for {kind} `{name}`: {reason}")]
#[diagnostic(
    code(pluginyml::manifest::invalid_url),
    help("Repository and proxy URLs must be absolute, e.g. `https://repo.example.com/maven2`")
)]
pub struct InvalidUrlError {
    pub kind: &'static str,
    pub name: String,
    pub reason: String,
    #[source_code]
    pub src: Option<NamedSource<String>>,
    #[label("declared here")]
    pub span: Option<SourceSpan>,
}

/// A manifest that targets no platform.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("manifest `{path}` declares no platform")]
#[diagnostic(
    code(pluginyml::manifest::no_platform),
    help("Add a [bukkit], [bungee], [nukkit] or [paper] table")
)]
pub struct NoPlatformError {
    pub path: String,
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}

/// Byte span of `needle` in `source`, for pointing at manifest entries.
pub fn find_span(source: &str, needle: &str) -> Option<SourceSpan> {
    source
        .find(needle)
        .map(|offset| SourceSpan::from((offset, needle.len())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_formatting() {
        let diag = Diagnostic::error("invalid Bukkit plugin description")
            .with_context("Main may not be within the org.bukkit. namespace")
            .with_suggestion("Move the class out of the reserved namespace")
            .with_location("plugin-yml.toml");

        let output = diag.format(false);
        assert!(output.contains("error: invalid Bukkit plugin description"));
        assert!(output.contains("--> plugin-yml.toml"));
        assert!(output.contains("org.bukkit. namespace"));
        assert!(output.contains("help: consider:"));
        assert!(output.contains("1. Move the class"));
    }

    #[test]
    fn test_invalid_descriptor_suggestions() {
        let missing = InvalidDescriptor::new("Plugin API version is not set");
        let diag = Diagnostic::invalid_descriptor(Platform::Paper, &missing);
        assert_eq!(diag.message, "invalid Paper plugin description");
        assert!(diag.suggestions[0].contains("[paper]"));

        let colon = InvalidDescriptor::new("Command 'a:b' cannot contain ':'");
        let diag = Diagnostic::invalid_descriptor(Platform::Bukkit, &colon);
        assert!(diag.suggestions[0].contains("prefix"));

        let other = InvalidDescriptor::new("something else");
        assert!(Diagnostic::invalid_descriptor(Platform::Nukkit, &other)
            .suggestions
            .is_empty());
    }

    #[test]
    fn test_error_colored() {
        let output = Diagnostic::error("invalid Paper plugin description").format(true);
        assert!(output.starts_with("\x1b[1;31merror"));
        assert!(!Diagnostic::error("plain").format(false).contains('\x1b'));
    }

    #[test]
    fn test_find_span() {
        let source = "[libraries.repositories]\nfoo = \"nope\"\n";
        let span = find_span(source, "foo").unwrap();
        assert_eq!(span.offset(), 25);
        assert_eq!(span.len(), 3);
        assert!(find_span(source, "bar").is_none());
    }
}
