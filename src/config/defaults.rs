//! Default engine configuration values

use crate::core::types::value::{F32_EPSILON, F64_EPSILON};
use crate::engine::TICK_INTERVAL;
use crate::memory::MAX_CHUNK;

pub const DEFAULT_CHUNK_SIZE: usize = MAX_CHUNK;
/// 0 means uncapped scans
pub const DEFAULT_MAX_RESULTS: usize = 0;
pub const DEFAULT_WRITABLE_ONLY: bool = false;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = TICK_INTERVAL.as_millis() as u64;
pub const DEFAULT_F32_EPSILON: f64 = F32_EPSILON;
pub const DEFAULT_F64_EPSILON: f64 = F64_EPSILON;
pub const DEFAULT_LOG_LEVEL: &str = "info";
