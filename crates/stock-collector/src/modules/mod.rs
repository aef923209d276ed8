//! 파이프라인 단계 모듈.

pub mod bulk_load;
pub mod connection;
pub mod fetch;
pub mod schema;
pub mod summary;

pub use bulk_load::{build_documents, fallback_document, load_documents, LoadOutcome};
pub use connection::{log_connection_guidance, resolve_connection, ConnectionMode, ResolvedConnection};
pub use fetch::{fetch_candles, FetchOutcome};
pub use schema::{ensure_index, SchemaStatus};
pub use summary::{log_preview, DataSummary};
