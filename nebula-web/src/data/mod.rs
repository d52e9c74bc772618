//! Data module - typed table and embedding placement
//!
//! Re-exports only.

mod embedding;
mod table;

pub use embedding::{place_embedding, rows_from_flat};
pub use table::{intern_categories, string_list_from_json, Column, DataTable};
