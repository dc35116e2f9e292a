pub mod enums;
pub mod params;
pub mod payments;
