pub mod catalog;
pub mod diagnostics;
pub mod params;
