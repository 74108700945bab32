//! Task implementations
pub mod annunciate;
pub mod net;
pub mod report;
pub mod sensor_read;
