//! Compa-Ratio Band Engine
//!
//! This crate resolves a salary band (P80/P100/P120) for every employee of a
//! compensation roster, either from an explicit positioning table or by
//! estimation from peer salaries, and classifies each salary against its
//! band with a compa-ratio.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
