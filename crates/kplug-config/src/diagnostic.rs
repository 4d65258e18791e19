// SPDX-FileCopyrightText: 2026 Kplug Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rendering of settings and plugin errors for humans.
//!
//! Errors carry miette diagnostic codes and help text (including "did you
//! mean" suggestions); these helpers turn them into a report for a terminal.

use kplug_core::KplugError;
use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme};

/// Render `error` with miette's graphical handler, without colors.
pub fn render_error(error: &KplugError) -> String {
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());
    let mut buf = String::new();
    let diagnostic: &dyn Diagnostic = error;
    if handler.render_report(&mut buf, diagnostic).is_err() {
        return format!("Error: {error}");
    }
    buf
}

/// Render a list of errors to stderr.
pub fn render_errors(errors: &[KplugError]) {
    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        let diagnostic: &dyn Diagnostic = error;
        if handler.render_report(&mut buf, diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendered_report_includes_code_and_help() {
        let err = KplugError::ConfigKey {
            key: "PLUGIN".into(),
            suggestion: Some("PLUGINS".into()),
        };
        let report = render_error(&err);
        assert!(report.contains("kplug::config::unknown_key"));
        assert!(report.contains("unknown settings key `PLUGIN`"));
        assert!(report.contains("did you mean `PLUGINS`?"));
    }

    #[test]
    fn render_errors_handles_a_batch() {
        let errors = vec![
            KplugError::ConfigKey {
                key: "PLUGIN".into(),
                suggestion: Some("PLUGINS".into()),
            },
            KplugError::ConfigNotFound {
                filename: "config.yaml".into(),
                searched: vec!["./config.yaml".into()],
            },
        ];
        render_errors(&errors);
        render_errors(&[]);
    }

    #[test]
    fn rendered_report_includes_source_chain() {
        let err = KplugError::PluginLoad {
            module: "missing_module".into(),
            source: Box::new(KplugError::ModuleNotFound {
                module: "missing_module".into(),
                known: vec!["plugins.helloworld".into()],
            }),
        };
        let report = render_error(&err);
        assert!(report.contains("missing_module"));
        assert!(report.contains("plugins.helloworld"));
    }
}
