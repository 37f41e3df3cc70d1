//! Result verification

pub mod correctness;
