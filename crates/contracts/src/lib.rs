//! Shared entity contracts for the business console
//!
//! View types, backend field mapping and the navigation table. No I/O.

pub mod domain;
pub mod shared;
pub mod system;
