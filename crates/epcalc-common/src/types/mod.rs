//! Core data types for EPCalc

pub mod bidding;
pub mod model;
pub mod result;
pub mod warning;
