use crate::application::dto::ReconcileResponse;
use crate::shared::error::ExitCode;
use owo_colors::OwoColorize;
use std::fmt::Write;

/// Renders the end-of-run summary printed to stderr.
///
/// Colors are applied only when `colored` is set, so the same text can be
/// asserted on in tests and written to non-terminals.
pub fn render_run_summary(response: &ReconcileResponse, colored: bool) -> String {
    let mut out = String::new();
    let exit_code = response.status.exit_code();

    let _ = writeln!(out);
    let _ = writeln!(out, "📊 Reconciliation summary");
    let _ = writeln!(out, "   Components written:     {}", response.bom.component_count());
    let _ = writeln!(out, "   Unsupported components: {}", response.unsupported.len());
    let _ = writeln!(out, "   Invalid components:     {}", response.invalid.len());
    let _ = writeln!(out, "   Duplicates dropped:     {}", response.duplicates.len());
    let _ = writeln!(out, "   Exclusion matches:      {}", response.excluded_matches);
    let _ = writeln!(out, "   Output:                 {}", response.output_path.display());
    if let Some(backup) = &response.backup_path {
        let _ = writeln!(out, "   Backup:                 {}", backup.display());
    }
    if let Some(unsupported) = &response.unsupported_output_path {
        let _ = writeln!(out, "   Unsupported output:     {}", unsupported.display());
    }

    for degradation in response.status.degradations() {
        let line = format!(
            "   ✗ {}: {}",
            degradation.source.display(),
            degradation.reason
        );
        let _ = writeln!(out, "{}", paint_error(&line, colored));
    }

    let verdict = format!("Result: {}", exit_code);
    let verdict = match exit_code {
        ExitCode::Success if colored => verdict.green().bold().to_string(),
        _ => paint_error(&verdict, colored),
    };
    let _ = writeln!(out, "{}", verdict);
    out
}

fn paint_error(text: &str, colored: bool) -> String {
    if colored {
        text.yellow().to_string()
    } else {
        text.to_string()
    }
}
