//! # comauto
//!
//! Late-bound COM automation for Excel and Word.
//!
//! Members are resolved by name through `IDispatch`, the way VBScript does
//! it, so no type library bindings are needed. Objects returned by calls are
//! kept by an [`Invoker`] until the caller releases them.
//!
//! ## Features
//!
//! - Property get/set and method calls by name
//! - Caller-owned release tracking
//! - Running Object Table enumeration and Excel instance discovery
//! - Type information introspection
//! - Excel helpers (workbooks, ranges, selection) and Word helpers (styling, tables)
//!
//! Everything that talks to COM is Windows-only. The portable pieces
//! (addresses, conversions, [`AutomationConfig`]) are available everywhere.
//!
//! ## Example
//!
//! ```rust,no_run
//! # #[cfg(windows)]
//! # fn main() -> comauto::Result<()> {
//! use comauto::prelude::*;
//!
//! let _com = Apartment::initialize_sta()?;
//! let app = Dispatch::create_application("Excel.Application", &AutomationConfig::default())?;
//!
//! let mut invoker = Invoker::new();
//! invoker.track(&app);
//! let books = invoker.get_object(&app, "Workbooks", &[])?;
//! let book = invoker.call_object(&books, "Add", &[])?;
//! let sheet = invoker.get_object(&book, "ActiveSheet", &[])?;
//! if let Some(cell) = comauto::excel::range(&mut invoker, &sheet, "B2") {
//!     comauto::excel::set_cell_background(&mut invoker, &cell, Rgb::YELLOW)?;
//! }
//!
//! invoker.call_method(&app, "Quit", &[])?;
//! invoker.release_all();
//! # Ok(())
//! # }
//! # #[cfg(not(windows))]
//! # fn main() {}
//! ```

pub mod config;
pub mod prelude;

#[cfg(windows)]
pub mod apartment;
#[cfg(windows)]
pub mod dispatch;
#[cfg(windows)]
pub mod excel;
#[cfg(windows)]
pub mod invoker;
#[cfg(windows)]
pub mod process;
#[cfg(windows)]
pub mod rot;
#[cfg(windows)]
pub mod typeinfo;
#[cfg(windows)]
pub mod variant;
#[cfg(windows)]
pub mod word;

pub use config::{AutomationConfig, Locale};

// Re-export portable types
pub use comauto_core::{
    address, convert, CellCoord, Error, FromValue, Handle, MemberKind, RangeStyle,
    ReleaseTracker, Result, Rgb, TypeMembers, Value, LCID_EN_US, MAX_COLS, MAX_ROWS,
};

#[cfg(windows)]
pub use apartment::Apartment;
#[cfg(windows)]
pub use dispatch::{Dispatch, InvokeKind};
#[cfg(windows)]
pub use excel::SelectedCell;
#[cfg(windows)]
pub use invoker::Invoker;
#[cfg(windows)]
pub use rot::RunningObject;
#[cfg(windows)]
pub use variant::{FromVariant, Variant};
