// src/output/mod.rs
//! Output handling with clear separation of planning and execution.
//!
//! Planning is pure; execution (the only I/O) lives in the writer.

mod types;
mod writer;

pub use types::{DeliveryTarget, OutputPlan, OutputReport};
pub use writer::deliver;
