use colored::Colorize;

use matrix_provider::{Diagnostic, Severity};

pub(crate) fn format_diagnostic(diagnostic: &Diagnostic) -> String {
    let label = match diagnostic.severity {
        Severity::Error => "Error:".red().bold(),
        Severity::Warning => "Warning:".yellow().bold(),
    };

    let mut out = format!("{label} {}", diagnostic.summary.bold());
    if let Some(path) = &diagnostic.path {
        out.push_str(&format!("\n\n  with {path}"));
    }
    if !diagnostic.detail.is_empty() {
        out.push_str(&format!("\n\n{}", diagnostic.detail));
    }
    out
}

pub(crate) fn format_ready(homeserver: &str, user_id: &str) -> String {
    format!("{} {user_id} on {homeserver}", "Configured".green().bold())
}

#[cfg(test)]
mod tests {
    use super::*;
    use matrix_provider::{AttributePath, Diagnostics};

    #[test]
    fn renders_path_and_detail() {
        colored::control::set_override(false);

        let mut diagnostics = Diagnostics::new();
        diagnostics.add_attribute_error(
            AttributePath::root("default_user_id"),
            "Missing Default UserID",
            "Set the default_user_id value.",
        );
        diagnostics.add_warning("Heads up", "");

        let rendered: Vec<_> = diagnostics.iter().map(format_diagnostic).collect();
        assert_eq!(
            rendered[0],
            "Error: Missing Default UserID\n\n  with default_user_id\n\nSet the default_user_id value."
        );
        assert_eq!(rendered[1], "Warning: Heads up");
        assert_eq!(
            format_ready("https://matrix.org/", "@a:matrix.org"),
            "Configured @a:matrix.org on https://matrix.org/"
        );
    }
}
