//! Application services: document parsing, remote state resolution and the
//! synchronization driver.

pub mod document_parser;
pub mod remote_resolver;
pub mod sync_driver;

pub use document_parser::{parse_document, split_sections, DocumentParser, Section};
pub use remote_resolver::{RemoteStateResolver, ResolverCache};
pub use sync_driver::SyncDriver;
