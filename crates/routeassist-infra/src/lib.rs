//! Infrastructure layer - adapters for the domain ports

pub mod csv_table;
pub mod form_link;
pub mod persistence;
pub mod source;
pub mod table_cache;
pub mod webhook_sink;
pub mod xlsx_table;

#[cfg(test)]
mod test_support;
