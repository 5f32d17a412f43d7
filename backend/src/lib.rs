pub mod bingx;
pub mod config;
pub mod error;
pub mod universe;
