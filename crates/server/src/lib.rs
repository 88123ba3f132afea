//! docdrift server: HTTP REST API for sentence-level document comparison.
//!
//! Exposes the docdrift pipeline over HTTP:
//!
//! - **Comparison**: align a target document against a source, sentence by
//!   sentence, and classify each alignment
//! - **Discrepancy reports**: the unsupported or weakly supported claims of
//!   a comparison, with reviewer notes
//! - **Health & Metrics**: liveness/readiness probes and Prometheus metrics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! ## Public Endpoints (No Authentication)
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `GET /metrics` - Prometheus metrics
//!
//! ## Protected Endpoints (API Key Required)
//!
//! - `POST /api/v1/compare` - Compare two documents
//! - `POST /api/v1/discrepancies` - Compare and report discrepancies
//! - `GET /api/v1/pipeline/status` - Active pipeline settings
//!
//! Both POST endpoints take
//!
//! ```json
//! {
//!   "source": { "title": "...", "url": "...", "text": "..." },
//!   "target": { "title": "...", "url": "...", "sentences": ["...", "..."] },
//!   "include_embeddings": false
//! }
//! ```
//!
//! Errors are returned as `{"error": {"code": "...", "message": "..."}}`.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
