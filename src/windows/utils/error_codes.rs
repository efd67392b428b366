//! Windows error code handling

use std::fmt;
use winapi::um::errhandlingapi::GetLastError;

/// Common Windows error codes seen by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success,
    AccessDenied,
    InvalidHandle,
    InvalidParameter,
    PartialCopy,
    Other(u32),
}

impl From<u32> for ErrorCode {
    fn from(code: u32) -> Self {
        match code {
            0 => ErrorCode::Success,
            5 => ErrorCode::AccessDenied,
            6 => ErrorCode::InvalidHandle,
            87 => ErrorCode::InvalidParameter,
            299 => ErrorCode::PartialCopy,
            _ => ErrorCode::Other(code),
        }
    }
}

impl ErrorCode {
    /// Reads the calling thread's last error
    pub fn last_error() -> Self {
        ErrorCode::from(last_error_code())
    }

    /// Raw numeric code
    pub fn code(self) -> u32 {
        match self {
            ErrorCode::Success => 0,
            ErrorCode::AccessDenied => 5,
            ErrorCode::InvalidHandle => 6,
            ErrorCode::InvalidParameter => 87,
            ErrorCode::PartialCopy => 299,
            ErrorCode::Other(code) => code,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Success => write!(f, "success"),
            ErrorCode::AccessDenied => write!(f, "access denied"),
            ErrorCode::InvalidHandle => write!(f, "invalid handle"),
            ErrorCode::InvalidParameter => write!(f, "invalid parameter"),
            ErrorCode::PartialCopy => write!(f, "partial copy"),
            ErrorCode::Other(code) => write!(f, "error {code}"),
        }
    }
}

/// Raw `GetLastError` value
pub fn last_error_code() -> u32 {
    unsafe { GetLastError() }
}

/// Human-readable reason for a failed process open, used to build
/// `ProcessUnavailable` errors
pub fn open_failure_reason(code: ErrorCode) -> String {
    match code {
        ErrorCode::AccessDenied => "access denied".to_string(),
        ErrorCode::InvalidParameter => "no such process".to_string(),
        other => format!("os error {}", other.code()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_conversion() {
        assert_eq!(ErrorCode::from(0), ErrorCode::Success);
        assert_eq!(ErrorCode::from(5), ErrorCode::AccessDenied);
        assert_eq!(ErrorCode::from(299), ErrorCode::PartialCopy);
        assert_eq!(ErrorCode::from(999), ErrorCode::Other(999));
        assert_eq!(ErrorCode::Other(999).code(), 999);
        assert_eq!(ErrorCode::AccessDenied.code(), 5);
    }

    #[test]
    fn test_open_failure_reason() {
        assert_eq!(open_failure_reason(ErrorCode::AccessDenied), "access denied");
        assert_eq!(
            open_failure_reason(ErrorCode::InvalidParameter),
            "no such process"
        );
        assert_eq!(open_failure_reason(ErrorCode::Other(123)), "os error 123");
    }
}
