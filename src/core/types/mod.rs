//! Fundamental types shared across the engine

pub mod address;
pub mod error;
pub mod process_info;
pub mod value;

pub use address::Address;
pub use error::{MemoryError, MemoryResult};
pub use process_info::{ProcessInfo, SelectedProcess};
pub use value::{parse_value, NumericValue, TypeTag, F32_EPSILON, F64_EPSILON};
