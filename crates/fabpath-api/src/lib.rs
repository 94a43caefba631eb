// fabpath-api: Async Rust client for the fabric controller REST API.
//
// Covers the two collaborator surfaces the reporting pipeline needs:
// cookie-session authentication (`aaaLogin` / `aaaLogout`) and
// class-based managed-object queries (`/api/class/<class>.json`).

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod query;
pub mod transport;

pub use client::ApicClient;
pub use error::Error;
pub use models::{ImData, ManagedObject};
pub use query::{PATH_ATTACHMENT_CLASS, PORT_BLOCK_CLASS};
pub use transport::{TlsMode, TransportConfig};
