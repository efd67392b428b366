//! Cross-process reads with exact byte-count semantics

use crate::core::types::{Address, MemoryError, MemoryResult, NumericValue, TypeTag};
use crate::process::ProcessHandle;

/// Typed and raw reads against one process
pub struct MemoryReader<'a> {
    handle: &'a ProcessHandle,
}

impl<'a> MemoryReader<'a> {
    pub fn new(handle: &'a ProcessHandle) -> Self {
        MemoryReader { handle }
    }

    /// Reads exactly `len` bytes; anything less is a `ShortRead`
    pub fn read_exact(&self, address: Address, len: usize) -> MemoryResult<Vec<u8>> {
        let mut buffer = vec![0u8; len];
        let got = self.handle.read_memory(address.as_usize(), &mut buffer)?;
        if got != len {
            return Err(MemoryError::ShortRead { got });
        }
        Ok(buffer)
    }

    /// Reads one value of `tag` at `address`
    pub fn read_value(&self, tag: TypeTag, address: Address) -> MemoryResult<NumericValue> {
        let buffer = self.read_exact(address, tag.width())?;
        NumericValue::decode(tag, &buffer)
            .ok_or_else(|| MemoryError::UnsupportedType(tag.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_exact_own_memory() {
        let handle = ProcessHandle::open(std::process::id()).unwrap();
        let reader = MemoryReader::new(&handle);

        let local: u32 = 0x89ABCDEF;
        let addr = Address::new(&local as *const u32 as usize);
        let bytes = reader.read_exact(addr, 4).unwrap();
        assert_eq!(bytes, local.to_le_bytes().to_vec());
    }

    #[test]
    fn test_read_value_all_tags() {
        let handle = ProcessHandle::open(std::process::id()).unwrap();
        let reader = MemoryReader::new(&handle);

        let slot: i64 = -1234567890123;
        let addr = Address::new(&slot as *const i64 as usize);
        assert_eq!(
            reader.read_value(TypeTag::I64, addr).unwrap(),
            NumericValue::Int(-1234567890123)
        );

        let slot: f32 = 3.14;
        let addr = Address::new(&slot as *const f32 as usize);
        assert_eq!(
            reader.read_value(TypeTag::F32, addr).unwrap(),
            NumericValue::Float(f64::from(3.14f32))
        );
    }

    #[test]
    fn test_read_unmapped_fails() {
        let handle = ProcessHandle::open(std::process::id()).unwrap();
        let reader = MemoryReader::new(&handle);
        // the null page is never mapped
        assert!(reader.read_exact(Address::new(0x10), 4).is_err());
    }

    #[test]
    fn test_read_on_closed_handle() {
        let mut handle = ProcessHandle::open(std::process::id()).unwrap();
        handle.close();
        let reader = MemoryReader::new(&handle);
        assert!(matches!(
            reader.read_value(TypeTag::U32, Address::new(0x1000)),
            Err(MemoryError::InvalidHandle)
        ));
    }
}
