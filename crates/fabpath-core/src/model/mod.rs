// ── Domain model ──
//
// Raw records as they come off the wire, the derived port-selector
// entity, and the resolved output shapes. Everything here lives for a
// single run.

pub mod binding;
pub mod records;
pub mod selector;
pub mod summary;

pub use binding::{BogusBinding, PortMode, ResolvedBinding};
pub use records::{PathBindingRecord, PortBlockRecord};
pub use selector::{PortSelector, SelectorKind};
pub use summary::InterfaceVlanSummary;
