//! Searchable, exportable record tables.
//!
//! The three record types (vales, corralón, entregas) share one engine: a
//! static [`schema::RecordSchema`] describes each table's collection, columns
//! and filter fields, and the loader/filter/renderer/exporter are generic
//! over that descriptor. Adding a record type means adding a descriptor.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/dashboard/{slug}` | Yes | Filterable record table |
//! | GET | `/dashboard/{slug}/export` | Yes | Filtered rows as an .xlsx download |

pub mod export;
pub mod filter;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod schema;
pub mod services;

pub use services::RecordService;
