//! Concurrency primitives shared by the fan-out runners.

pub mod collections;
pub mod concurrent;
