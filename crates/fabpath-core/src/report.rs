// ── Report writers ──
//
// Three file formats: a flat CSV with one row per resolved binding, a
// JSON collation keyed by leaf/interface, and a plain-text listing of
// bogus bindings. Diagnostics are written alongside the report and never
// turn a run into a failure.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::{debug, info, warn};

use crate::collate::{Collation, collate};
use crate::error::CoreError;
use crate::model::{BogusBinding, ResolvedBinding};
use crate::resolve::Resolution;

/// Header row of the flat report.
pub const FLAT_HEADER: [&str; 6] = ["epg", "VLAN", "mode", "node", "interface", "port-channel"];

/// Which representation(s) of the resolved bindings to write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReportMode {
    #[default]
    Flat,
    Collated,
    Both,
}

impl ReportMode {
    fn wants_flat(self) -> bool {
        matches!(self, Self::Flat | Self::Both)
    }

    fn wants_collated(self) -> bool {
        matches!(self, Self::Collated | Self::Both)
    }
}

/// Where and what to write.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub mode: ReportMode,
    pub out_dir: PathBuf,
    pub flat_file: String,
    pub collated_file: String,
    pub diagnostics_file: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            mode: ReportMode::default(),
            out_dir: PathBuf::from("."),
            flat_file: "static_paths.csv".into(),
            collated_file: "interfaces.json".into(),
            diagnostics_file: "bogus_paths.txt".into(),
        }
    }
}

/// What a report run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub bindings: usize,
    pub interfaces: usize,
    pub bogus: usize,
    pub written: Vec<PathBuf>,
}

/// Write the chosen representation(s), plus diagnostics when any
/// bogus bindings exist. A clean run removes an old diagnostics file.
pub fn write_report(
    resolution: &Resolution,
    opts: &ReportOptions,
) -> Result<ReportSummary, CoreError> {
    std::fs::create_dir_all(&opts.out_dir).map_err(|source| CoreError::Write {
        path: opts.out_dir.clone(),
        source,
    })?;

    let mut summary = ReportSummary {
        bindings: resolution.bindings.len(),
        bogus: resolution.bogus.len(),
        ..ReportSummary::default()
    };

    if opts.mode.wants_flat() {
        let path = opts.out_dir.join(&opts.flat_file);
        write_file(&path, |w| write_flat_csv(w, &resolution.bindings))?;
        summary.written.push(path);
    }

    let collation = collate(&resolution.bindings);
    summary.interfaces = collation.len();
    if opts.mode.wants_collated() {
        let path = opts.out_dir.join(&opts.collated_file);
        write_file(&path, |w| write_collation_json(w, &collation))?;
        summary.written.push(path);
    }

    let path = opts.out_dir.join(&opts.diagnostics_file);
    if resolution.bogus.is_empty() {
        // Drop any listing left by an earlier run.
        remove_stale(&path)?;
    } else {
        warn!(
            count = resolution.bogus.len(),
            path = %path.display(),
            "static paths reference unknown port selectors"
        );
        write_file(&path, |w| write_diagnostics(w, &resolution.bogus))?;
        summary.written.push(path);
    }

    info!(files = summary.written.len(), "report written");
    Ok(summary)
}

fn remove_stale(path: &Path) -> Result<(), CoreError> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed stale diagnostics file");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(CoreError::Write {
            path: path.to_owned(),
            source,
        }),
    }
}

fn write_file(
    path: &Path,
    body: impl FnOnce(&mut BufWriter<File>) -> io::Result<()>,
) -> Result<(), CoreError> {
    let to_err = |source: io::Error| CoreError::Write {
        path: path.to_owned(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(to_err)?);
    body(&mut writer).map_err(to_err)?;
    writer.flush().map_err(to_err)
}

/// One CSV row per binding under [`FLAT_HEADER`].
pub fn write_flat_csv(w: &mut impl Write, bindings: &[ResolvedBinding]) -> io::Result<()> {
    writeln!(w, "{}", FLAT_HEADER.join(","))?;
    for b in bindings {
        let mode = b.mode.to_string();
        let row = [
            b.epg.as_str(),
            b.vlan.as_str(),
            mode.as_str(),
            b.node.as_str(),
            b.interface.as_str(),
            b.port_channel_label(),
        ];
        let fields: Vec<_> = row.iter().map(|f| csv_field(f)).collect();
        writeln!(w, "{}", fields.join(","))?;
    }
    Ok(())
}

/// Pretty JSON object keyed `"<node>__<interface>"`.
pub fn write_collation_json(w: &mut impl Write, collation: &Collation) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *w, collation).map_err(io::Error::other)?;
    writeln!(w)
}

/// One `EPG: … Node(s): … port selector: …` line per bogus binding.
pub fn write_diagnostics(w: &mut impl Write, bogus: &[BogusBinding]) -> io::Result<()> {
    for entry in bogus {
        writeln!(w, "{entry}")?;
    }
    Ok(())
}

/// Quote a CSV field when it contains a separator, quote, or newline.
fn csv_field(value: &str) -> std::borrow::Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\"")).into()
    } else {
        value.into()
    }
}
