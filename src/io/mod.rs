//! Boundary I/O: the activity table in, the JSON artifact out.

pub mod json;
pub mod table;

pub use json::{from_json_str, read_dataset, to_json_string, write_dataset};
pub use table::{TableReader, parse_line};
