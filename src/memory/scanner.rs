//! Typed value scanning over a process's committed memory
//!
//! Regions are streamed in bounded chunks and matched at every
//! width-aligned offset. The chunk ceiling is rounded down to a multiple
//! of the value width, so a value can never straddle two chunks of the
//! same region.

use crate::core::types::{Address, MemoryError, MemoryResult, NumericValue, TypeTag};
use crate::core::types::value::{F32_EPSILON, F64_EPSILON};
use crate::memory::regions::RegionWalker;
use crate::process::ProcessHandle;
use tracing::trace;

/// Upper bound on a single cross-process read
pub const MAX_CHUNK: usize = 1 << 20;

/// Options for a typed scan
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Stop after this many matches; 0 scans to the end
    pub max_results: usize,
    /// Skip regions whose protection does not permit writing
    pub writable_only: bool,
    /// Absolute-error tolerance for float32 targets
    pub f32_epsilon: f64,
    /// Absolute-error tolerance for float64 targets
    pub f64_epsilon: f64,
    /// Chunk ceiling; clamped to [width, MAX_CHUNK]
    pub chunk_size: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            max_results: 0,
            writable_only: false,
            f32_epsilon: F32_EPSILON,
            f64_epsilon: F64_EPSILON,
            chunk_size: MAX_CHUNK,
        }
    }
}

impl ScanOptions {
    /// The epsilon in force for `tag` under these options
    pub fn epsilon(&self, tag: TypeTag) -> f64 {
        match tag {
            TypeTag::F32 => self.f32_epsilon,
            TypeTag::F64 => self.f64_epsilon,
            _ => 0.0,
        }
    }
}

enum Matcher {
    /// Integer tags: exact bit equality against the encoded target
    Exact(Vec<u8>),
    /// float32: absolute error against the widened target
    ApproxF32 { target: f64, eps: f64 },
    /// float64: absolute error
    ApproxF64 { target: f64, eps: f64 },
}

impl Matcher {
    fn new(tag: TypeTag, target: NumericValue, options: &ScanOptions) -> Self {
        match tag {
            TypeTag::F32 => Matcher::ApproxF32 {
                target: target.as_f64(),
                eps: options.f32_epsilon,
            },
            TypeTag::F64 => Matcher::ApproxF64 {
                target: target.as_f64(),
                eps: options.f64_epsilon,
            },
            _ => Matcher::Exact(target.encode(tag)),
        }
    }

    fn matches(&self, window: &[u8]) -> bool {
        match self {
            Matcher::Exact(bytes) => window == &bytes[..],
            Matcher::ApproxF32 { target, eps } => {
                let v = f64::from(f32::from_le_bytes([
                    window[0], window[1], window[2], window[3],
                ]));
                (v - target).abs() <= *eps
            }
            Matcher::ApproxF64 { target, eps } => {
                let v = f64::from_le_bytes([
                    window[0], window[1], window[2], window[3], window[4], window[5], window[6],
                    window[7],
                ]);
                (v - target).abs() <= *eps
            }
        }
    }
}

/// Scans a process's address space for a typed value
pub struct Scanner<'a> {
    handle: &'a ProcessHandle,
}

impl<'a> Scanner<'a> {
    pub fn new(handle: &'a ProcessHandle) -> Self {
        Scanner { handle }
    }

    /// Walks all scannable regions and returns the addresses holding
    /// `target`, ascending. Chunk reads that fail are skipped; a target
    /// mutating or unmapping memory mid-scan never aborts the scan.
    pub fn scan(
        &self,
        tag: TypeTag,
        target: NumericValue,
        options: &ScanOptions,
    ) -> MemoryResult<Vec<Address>> {
        if !self.handle.is_open() {
            return Err(MemoryError::InvalidHandle);
        }

        let width = tag.width();
        let matcher = Matcher::new(tag, target, options);
        // Round the ceiling down to a width multiple so chunk boundaries
        // always land between values, never inside one.
        let max_chunk = (options.chunk_size.clamp(width, MAX_CHUNK) / width) * width;

        let mut matches = Vec::new();
        let mut buf = vec![0u8; max_chunk];

        for region in RegionWalker::new(self.handle) {
            if !region.is_scannable(options.writable_only) {
                continue;
            }

            let mut offset = region.base.as_usize();
            let end = region.end().as_usize();
            while offset < end {
                let chunk = (end - offset).min(max_chunk);
                let read = self.handle.read_memory_partial(offset, &mut buf[..chunk]);
                if read == 0 {
                    trace!(address = %Address::new(offset), chunk, "chunk read failed, skipping");
                    offset += chunk;
                    continue;
                }

                for (i, window) in buf[..read].chunks_exact(width).enumerate() {
                    if matcher.matches(window) {
                        matches.push(Address::new(offset + i * width));
                        if options.max_results > 0 && matches.len() >= options.max_results {
                            return Ok(matches);
                        }
                    }
                }

                offset += chunk;
            }
        }

        Ok(matches)
    }
}
