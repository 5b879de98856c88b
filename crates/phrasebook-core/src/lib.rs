//! phrasebook-core: Snippet model, similarity scoring, and quiz sessions.
//!
//! This crate defines the data model, the edit-distance scorer, and the quiz
//! session protocol that the rest of phrasebook builds on, together with the
//! snippet store and the interactive recording workflow.

pub mod error;
pub mod input;
pub mod model;
pub mod recorder;
pub mod report;
pub mod scoring;
pub mod session;
pub mod statistics;
pub mod store;
pub mod traits;
