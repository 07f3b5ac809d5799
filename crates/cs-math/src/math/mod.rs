//! Core math modules.

pub mod central;
pub mod fences;
pub mod moments;
pub mod quantile;
pub mod summary;
