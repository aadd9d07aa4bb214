//! Sequential and concurrent fan-out runners for independent, sleep-then-possibly-fail units of work.

pub mod config;
pub mod runner;
pub mod work;

pub use config::*;
pub use runner::*;
pub use work::*;
