//! Core domain model for verso.
//!
//! This crate defines the song record and catalog, the style dictionary
//! used as the reference point for classification, and the text pipeline
//! (normalization and word segmentation) that feeds the vector space.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod model;
pub mod style;
pub mod text;

pub use error::{Error, Result};
