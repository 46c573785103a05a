//! Prelude module - common imports for comauto users
//!
//! ```rust
//! use comauto::prelude::*;
//! ```

pub use crate::{
    AutomationConfig,
    CellCoord,
    Error,
    FromValue,
    Locale,
    RangeStyle,
    Result,
    Rgb,
    Value,

    // Constants
    MAX_COLS,
    MAX_ROWS,
};

#[cfg(windows)]
pub use crate::{Apartment, Dispatch, FromVariant, Invoker, Variant};
