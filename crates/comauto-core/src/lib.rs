//! # comauto-core
//!
//! Portable building blocks for late-bound COM automation.
//!
//! This crate holds everything that does not need a live automation host:
//! - [`address`] - Excel column letters and `$A$1` style addresses
//! - [`convert`] - OLE_COLOR, COM booleans and OLE Automation dates
//! - [`Value`] - plain (non-object) automation values
//! - [`ReleaseTracker`] - caller-owned list of references pending release
//! - [`TypeMembers`] - member listings read from type information
//! - [`RangeStyle`] - font and shading options for Office ranges
//!
//! ## Example
//!
//! ```rust
//! use comauto_core::address::{column_letter_to_number, parse_absolute_address};
//! use comauto_core::convert::{to_ole_color, Rgb};
//!
//! assert_eq!(column_letter_to_number("AA").unwrap(), 27);
//!
//! let coord = parse_absolute_address("$C$12").unwrap();
//! assert_eq!((coord.row, coord.column), (12, 3));
//!
//! assert_eq!(to_ole_color(Rgb::RED), 0x0000FF);
//! ```

pub mod address;
pub mod convert;
pub mod error;
pub mod members;
pub mod style;
pub mod tracker;
pub mod value;

// Re-exports for convenience
pub use address::CellCoord;
pub use convert::Rgb;
pub use error::{Error, Result};
pub use members::{MemberKind, TypeMembers};
pub use style::RangeStyle;
pub use tracker::{Handle, ReleaseTracker};
pub use value::{FromValue, Value};

/// Locale used for type information lookups (en-US)
pub const LCID_EN_US: u32 = 1033;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u32 = 16_384;
