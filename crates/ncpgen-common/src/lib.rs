//! Common utilities for ncpgen.
//!
//! This crate provides the foundational pieces shared by the other ncpgen crates:
//!
//! - [`BinaryReader`] - Zero-copy reading of fixed-size records from byte slices
//! - [`artifact`] - Reading, writing and removing build artifacts with path-aware errors

mod error;
mod reader;

pub mod artifact;

pub use error::{Error, Result};
pub use reader::BinaryReader;
