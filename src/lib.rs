//! Availability Computation Engine for salon staff
//!
//! This crate works out when employees are free: it resolves the weekly
//! schedule that applies on a date, removes recurring breaks and one-time
//! blocks (blocks always win over breaks), and matches employees who can
//! perform requested services against a booking window.
//!
//! All computation is read-only. Data comes through the
//! [`AvailabilityStore`](store::AvailabilityStore) trait; results are plain
//! structs that callers serialize as they see fit.

#![warn(missing_docs)]

pub mod availability;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
