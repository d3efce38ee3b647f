// src/lib.rs

//! jobwatch Library
//!
//! Detects changes in the job listings of career pages by fingerprinting
//! the spacing of a keyword inside a marked section of each page.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
