//! # SwimStats
//!
//! Core engine for tracking a competitive swimmer's race times and
//! evaluating them against age-grouped qualifying time standards.
//!
//! ## Features
//!
//! - **Time handling**: conversion between canonical millisecond integers
//!   and race-time display strings (`SS.hh` / `M:SS.hh`)
//! - **Age groups**: competition age per the Dec-31 rule and categorical
//!   age-group derivation with neighbor lookups
//! - **Personal bests**: fastest time per event/course, computed on demand
//! - **Standards comparison**: per-event classification against a
//!   qualifying-time table, with OPEN fallback and adjacent-age-group
//!   lookahead
//! - **Progression**: chronological time history with running-best flags
//! - **Batch ingestion**: validated multi-time recording with correct
//!   new-personal-best sequencing
//!
//! ## Architecture
//!
//! The crate is organized into three logical layers:
//!
//! - [`models`]: domain types: enumerations, the time codec, age math,
//!   entities and validated inputs
//! - [`db`]: the repository trait abstracting storage, plus an in-memory
//!   implementation for tests and local development
//! - [`services`]: business logic orchestrating repository reads around
//!   pure, synchronous computation
//!
//! Callers supply reference dates explicitly (e.g. "today" for current-age
//! computations); the crate never reads the system clock, which keeps every
//! age-dependent result reproducible in tests.

pub mod db;
pub mod models;
pub mod services;
