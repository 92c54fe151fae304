//! This module defines the strongly-typed element descriptors used when
//! per-row buffers arrive as raw bytes from a numeric engine.

pub mod row_data_type;

// Re-export the main type(s) for easier access.
pub use row_data_type::RowDataType;
