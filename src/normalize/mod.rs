//! Date normalization and row resolution.

pub mod date;
pub mod row;

pub use date::{Timestamp, normalize_date, normalize_date_in, parse_calendar_date};
pub use row::{RawRow, ResolvedRow, resolve_row, resolve_row_in};
