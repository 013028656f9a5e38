//! Technician-to-visit matching, crew proposals, staffing requirement tracking,
//! and day-grid timeline layout for hangar maintenance planning.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
