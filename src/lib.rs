pub mod algorithm;
pub mod common;
pub mod config;
pub mod grid;
pub mod map;
pub mod scenario;
pub mod space;
pub mod stat;
