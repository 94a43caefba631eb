//! Dump command: save raw class queries for offline runs.

use fabpath_core::DumpSource;

use crate::cli::{DumpArgs, GlobalOpts};
use crate::error::CliError;

use super::util::DataSource;

pub async fn handle(
    source: &DataSource,
    args: &DumpArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let snapshot = source.snapshot().await?;
    let written = snapshot.save(&DumpSource::new(args.dir.clone()))?;

    if !global.quiet {
        for path in &written {
            eprintln!("✓ Wrote {}", path.display());
        }
    }
    Ok(())
}
