//! Error types for comauto-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting values or invoking COM members
#[derive(Debug, Error)]
pub enum Error {
    /// Column letters that are empty, contain a non-letter, or overflow
    #[error("Invalid column letters: {0}")]
    InvalidColumn(String),

    /// Cell address that does not parse
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Color string that is not `#RRGGBB`
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// OLE Automation date outside the representable range
    #[error("OLE Automation date {0} is out of range")]
    DateOutOfRange(f64),

    /// A late-bound call failed
    #[error("COM error accessing member '{member}'. HRESULT: 0x{hresult:08X}{}", detail_suffix(.message))]
    Com {
        member: String,
        hresult: u32,
        message: Option<String>,
    },

    /// A call succeeded but returned a value of an unexpected type
    #[error("Member '{member}' returned {actual}, expected {expected}")]
    TypeMismatch {
        member: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// A facility (type info, ROT, window handle) the caller relied on is missing
    #[error("Not available: {0}")]
    NotAvailable(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

fn detail_suffix(message: &Option<String>) -> String {
    match message {
        Some(m) => format!(" ({m})"),
        None => String::new(),
    }
}

impl Error {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Create a COM failure for `member` with the raw HRESULT bits
    pub fn com<S: Into<String>>(member: S, hresult: u32, message: Option<String>) -> Self {
        Error::Com {
            member: member.into(),
            hresult,
            message,
        }
    }

    /// The HRESULT carried by a COM failure, if any
    pub fn hresult(&self) -> Option<u32> {
        match self {
            Error::Com { hresult, .. } => Some(*hresult),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_com_error_message() {
        let err = Error::com("Range", 0x800A03EC, None);
        assert_eq!(
            err.to_string(),
            "COM error accessing member 'Range'. HRESULT: 0x800A03EC"
        );
        assert_eq!(err.hresult(), Some(0x800A03EC));
    }

    #[test]
    fn test_com_error_with_detail() {
        let err = Error::com("Item", 0x80020009, Some("Subscript out of range".into()));
        assert_eq!(
            err.to_string(),
            "COM error accessing member 'Item'. HRESULT: 0x80020009 (Subscript out of range)"
        );
    }

    #[test]
    fn test_non_com_error_has_no_hresult() {
        assert_eq!(Error::other("x").hresult(), None);
    }
}
