//! Cross-process writes with exact byte-count semantics and echo read-back

use crate::core::types::{Address, MemoryError, MemoryResult, NumericValue, TypeTag};
use crate::memory::reader::MemoryReader;
use crate::process::ProcessHandle;

/// Typed and raw writes against one process
pub struct MemoryWriter<'a> {
    handle: &'a ProcessHandle,
}

impl<'a> MemoryWriter<'a> {
    pub fn new(handle: &'a ProcessHandle) -> Self {
        MemoryWriter { handle }
    }

    /// Writes all of `data`; anything less is a `ShortWrite`
    pub fn write_exact(&self, address: Address, data: &[u8]) -> MemoryResult<()> {
        let got = self.handle.write_memory(address.as_usize(), data)?;
        if got != data.len() {
            return Err(MemoryError::ShortWrite { got });
        }
        Ok(())
    }

    /// Writes one value of `tag` at `address`
    pub fn write_value(
        &self,
        tag: TypeTag,
        address: Address,
        value: NumericValue,
    ) -> MemoryResult<()> {
        self.write_exact(address, &value.encode(tag))
    }

    /// Writes `value` and immediately reads the address back, returning
    /// what the target now holds. This is an echo confirmation, not a
    /// compare-and-swap: the target may race the re-read.
    pub fn write_then_read(
        &self,
        tag: TypeTag,
        address: Address,
        value: NumericValue,
    ) -> MemoryResult<NumericValue> {
        self.write_value(tag, address, value)?;
        MemoryReader::new(self.handle).read_value(tag, address)
    }
}
