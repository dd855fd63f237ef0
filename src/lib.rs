//! Cogmark - cognitive markers and progression risk
//!
//! Library core for deriving lexical markers from verbal-fluency
//! transcripts, projecting clinical attributes onto a fixed feature
//! schema, and running a trained progression classifier. The two
//! analysis branches (text and clinical) are independent; combining
//! them is presentation-layer work.

pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod models;
pub mod text;

pub use error::{Error, Result};
