pub mod units;
pub mod values;

pub use units::normalize_unit;
pub use values::parse_decimal;
