//! Integration tests for the processor module
//!
//! Tests the complete extraction pipeline using temporary results folders.

pub mod basic_processing;
