// ── Pipeline stages ──
//
// Snapshot (raw objects) → Inventory (typed records) → Analysis
// (selector index + resolution). Each stage is a plain value; nothing
// is shared between runs.

use std::path::PathBuf;

use fabpath_api::{ManagedObject, PATH_ATTACHMENT_CLASS, PORT_BLOCK_CLASS};
use tracing::info;

use crate::collate::{Collation, collate};
use crate::error::CoreError;
use crate::index::{IndexPolicy, SelectorIndex};
use crate::model::{PathBindingRecord, PortBlockRecord};
use crate::resolve::{Resolution, resolve_bindings};
use crate::source::{DumpSource, ObjectSource};

/// Raw class-query results.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub port_blocks: Vec<ManagedObject>,
    pub path_attachments: Vec<ManagedObject>,
}

impl Snapshot {
    /// Query both classes from a source, port blocks first.
    pub async fn fetch(source: &impl ObjectSource) -> Result<Self, CoreError> {
        let port_blocks = source.query_class(PORT_BLOCK_CLASS).await?;
        let path_attachments = source.query_class(PATH_ATTACHMENT_CLASS).await?;
        info!(
            port_blocks = port_blocks.len(),
            path_attachments = path_attachments.len(),
            "snapshot fetched"
        );
        Ok(Self {
            port_blocks,
            path_attachments,
        })
    }

    /// Save both classes for later replay through [`DumpSource`].
    pub fn save(&self, dump: &DumpSource) -> Result<Vec<PathBuf>, CoreError> {
        Ok(vec![
            dump.save(PORT_BLOCK_CLASS, &self.port_blocks)?,
            dump.save(PATH_ATTACHMENT_CLASS, &self.path_attachments)?,
        ])
    }

    /// Lift raw objects into typed records.
    pub fn to_inventory(&self) -> Result<Inventory, CoreError> {
        Ok(Inventory {
            port_blocks: self
                .port_blocks
                .iter()
                .map(PortBlockRecord::try_from)
                .collect::<Result<_, _>>()?,
            path_bindings: self
                .path_attachments
                .iter()
                .map(PathBindingRecord::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

/// Typed records for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    pub port_blocks: Vec<PortBlockRecord>,
    pub path_bindings: Vec<PathBindingRecord>,
}

impl Inventory {
    /// Build the selector index, then resolve every static path.
    pub fn analyze(&self, policy: &IndexPolicy) -> Result<Analysis, CoreError> {
        let index = SelectorIndex::build(&self.port_blocks, policy)?;
        let resolution = resolve_bindings(&self.path_bindings, &index)?;
        Ok(Analysis { index, resolution })
    }
}

/// Result of a pipeline run.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub index: SelectorIndex,
    pub resolution: Resolution,
}

impl Analysis {
    pub fn collation(&self) -> Collation {
        collate(&self.resolution.bindings)
    }
}
