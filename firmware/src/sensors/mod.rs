//! Sensor drivers
pub mod aht10;
