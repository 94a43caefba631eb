//! Static path reporting for a fabric controller's object model.
//!
//! The crate turns two raw managed-object classes into a normalized
//! interface-to-VLAN report:
//!
//! - **[`SelectorIndex`]** — built from access port blocks; maps each
//!   port-selector name to its physical port range, keeping only selectors
//!   that back a port-channel or vPC.
//!
//! - **[`resolve_bindings`]** — classifies every static path attachment as
//!   a physical interface or a port-selector reference and expands the
//!   latter into one binding per physical port (port-channel) or one per
//!   leaf (vPC). References that miss the index become [`BogusBinding`]s.
//!
//! - **[`collate`]** / **[`report`]** — per-interface tagged/untagged VLAN
//!   summaries and the CSV, JSON, and diagnostics writers.
//!
//! - **[`Session`]** / **[`fetch_snapshot`]** — scoped controller session:
//!   log in, run both class queries, log out exactly once.
//!   [`DumpSource`] replays saved class queries without a controller.

pub mod collate;
pub mod config;
pub mod convert;
pub mod dn;
pub mod error;
pub mod index;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod resolve;
pub mod session;
pub mod source;

// ── Primary re-exports ──────────────────────────────────────────────
pub use collate::{Collation, collate};
pub use config::{ControllerConfig, TlsVerification};
pub use error::CoreError;
pub use index::{IndexPolicy, SelectorIndex};
pub use pipeline::{Analysis, Inventory, Snapshot};
pub use report::{ReportMode, ReportOptions, ReportSummary};
pub use resolve::{Resolution, resolve_bindings};
pub use session::{Session, fetch_snapshot};
pub use source::{DumpSource, ObjectSource};

pub use model::{
    BogusBinding, InterfaceVlanSummary, PathBindingRecord, PortBlockRecord, PortMode,
    PortSelector, ResolvedBinding, SelectorKind,
};
