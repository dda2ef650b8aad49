//! Severance settlement engine for Mexican federal labor law.
//!
//! This crate computes the *finiquito* (ordinary end-of-employment
//! settlement) and the *liquidación* (finiquito plus severance indemnity)
//! of a terminated employee: proportional benefits, integrated daily wage,
//! ISR and IMSS withholding, and an audit trail of every step.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
