//! Config composition: default values and source precedence.

pub mod merge_policy;
pub mod service;
