//! Report command: the full pipeline, written to files.

use fabpath_core::report::write_report;
use fabpath_core::{ReportOptions, ReportSummary};

use crate::cli::{GlobalOpts, ReportArgs};
use crate::config::Config;
use crate::error::CliError;
use crate::output;

use super::util::DataSource;

fn detail(s: &ReportSummary) -> String {
    let mut lines = vec![
        format!("Bindings:   {}", s.bindings),
        format!("Interfaces: {}", s.interfaces),
        format!("Bogus:      {}", s.bogus),
    ];
    for path in &s.written {
        lines.push(format!("Wrote:      {}", path.display()));
    }
    lines.join("\n")
}

pub async fn handle(
    source: &DataSource,
    args: &ReportArgs,
    global: &GlobalOpts,
    cfg: &Config,
) -> Result<(), CliError> {
    let analysis = source.analyze().await?;

    let opts = ReportOptions {
        mode: args.mode.into(),
        out_dir: args
            .out_dir
            .clone()
            .unwrap_or_else(|| cfg.defaults.out_dir.clone()),
        flat_file: args.flat_file.clone(),
        collated_file: args.collated_file.clone(),
        diagnostics_file: args.diagnostics_file.clone(),
    };
    tracing::debug!(mode = %opts.mode, out_dir = %opts.out_dir.display(), "writing report");

    let summary = write_report(&analysis.resolution, &opts)?;

    let out = output::render_single(&global.output, &summary, detail, |s| {
        s.written
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    });
    output::print_output(&out, global.quiet);
    Ok(())
}
