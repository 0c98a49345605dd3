//! Response normalization: body classification and series extraction.

pub mod classifier;
pub mod series;

pub use classifier::{advisory, classify, ensure_data, is_blank_payload, Classification};
pub use series::{check_compact_window, extract_series, parse_date, parse_positive_decimal};
