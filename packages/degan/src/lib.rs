pub mod units;

pub use units::{format_units, parse_units, DECIMALS};
