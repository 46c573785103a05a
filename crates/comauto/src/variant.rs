//! VARIANT marshalling
//!
//! [`Variant`] is the owned Rust side of an automation argument or result.
//! Raw `VARIANT`s only live for the duration of one `Invoke` call; they are
//! built here and cleared with `VariantClear` once converted.

#![cfg(windows)]

use std::fmt;
use std::mem::ManuallyDrop;
use std::ptr;

use chrono::NaiveDateTime;
use comauto_core::{Error, FromValue, Result, Value};
use windows::{
    core::{Interface, BSTR},
    Win32::{
        Foundation::{DISP_E_PARAMNOTFOUND, VARIANT_BOOL},
        System::{
            Com::IDispatch,
            Variant::{
                VariantClear, VARIANT, VT_BOOL, VT_BSTR, VT_CY, VT_DATE, VT_DISPATCH, VT_EMPTY,
                VT_ERROR, VT_I2, VT_I4, VT_INT, VT_NULL, VT_R4, VT_R8, VT_UI1, VT_UI2,
                VT_UNKNOWN,
            },
        },
    },
};

use crate::dispatch::Dispatch;

/// An automation argument or result
#[derive(Clone)]
pub enum Variant {
    /// Any non-object value
    Value(Value),
    /// An object reference
    Object(Dispatch),
}

impl Variant {
    /// The value COM uses for an omitted optional argument
    pub fn missing() -> Self {
        Variant::Value(Value::Error(DISP_E_PARAMNOTFOUND.0))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Variant::Value(v) => v.type_name(),
            Variant::Object(_) => "object",
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Variant::Value(v) if v.is_empty())
    }

    pub fn as_object(&self) -> Option<&Dispatch> {
        match self {
            Variant::Object(d) => Some(d),
            Variant::Value(_) => None,
        }
    }

    pub fn into_object(self) -> Option<Dispatch> {
        match self {
            Variant::Object(d) => Some(d),
            Variant::Value(_) => None,
        }
    }
}

impl fmt::Debug for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Variant::Object(d) => f.debug_tuple("Object").field(d).finish(),
        }
    }
}

impl From<Value> for Variant {
    fn from(v: Value) -> Self {
        Variant::Value(v)
    }
}

impl From<Dispatch> for Variant {
    fn from(d: Dispatch) -> Self {
        Variant::Object(d)
    }
}

impl From<&Dispatch> for Variant {
    fn from(d: &Dispatch) -> Self {
        Variant::Object(d.clone())
    }
}

macro_rules! variant_from_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Variant {
                fn from(v: $t) -> Self {
                    Variant::Value(Value::from(v))
                }
            }
        )*
    };
}

variant_from_value!(&str, String, f64, f32, i32, bool);

/// Fails for dates without an OLE Automation representation
impl TryFrom<NaiveDateTime> for Variant {
    type Error = Error;

    fn try_from(d: NaiveDateTime) -> Result<Self> {
        Value::try_from(d).map(Variant::Value)
    }
}

/// Typed extraction from a [`Variant`], returning `None` on a kind mismatch
pub trait FromVariant: Sized {
    /// Name used in diagnostics
    const EXPECTED: &'static str;

    fn from_variant(variant: &Variant) -> Option<Self>;
}

macro_rules! from_variant_via_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl FromVariant for $t {
                const EXPECTED: &'static str = <$t as FromValue>::EXPECTED;

                fn from_variant(variant: &Variant) -> Option<Self> {
                    match variant {
                        Variant::Value(v) => <$t as FromValue>::from_value(v),
                        Variant::Object(_) => None,
                    }
                }
            }
        )*
    };
}

from_variant_via_value!(bool, i32, f64, String, Value, NaiveDateTime);

impl FromVariant for Dispatch {
    const EXPECTED: &'static str = "object";

    fn from_variant(variant: &Variant) -> Option<Self> {
        variant.as_object().cloned()
    }
}

impl FromVariant for Variant {
    const EXPECTED: &'static str = "variant";

    fn from_variant(variant: &Variant) -> Option<Self> {
        Some(variant.clone())
    }
}

// -- Raw VARIANT construction --
// The VARIANT struct wraps inner unions in ManuallyDrop, so we use ptr::write
// to set fields without triggering the DerefMut lint.

fn raw_with_vt(vt: windows::Win32::System::Variant::VARENUM) -> VARIANT {
    unsafe {
        let mut v = VARIANT::default();
        let inner = &mut *v.Anonymous.Anonymous;
        ptr::write(&mut inner.vt, vt);
        v
    }
}

fn raw_bool(val: bool) -> VARIANT {
    unsafe {
        let mut v = raw_with_vt(VT_BOOL);
        let inner = &mut *v.Anonymous.Anonymous;
        ptr::write(
            &mut inner.Anonymous.boolVal,
            VARIANT_BOOL(comauto_core::convert::variant_bool(val)),
        );
        v
    }
}

fn raw_i32(val: i32) -> VARIANT {
    unsafe {
        let mut v = raw_with_vt(VT_I4);
        let inner = &mut *v.Anonymous.Anonymous;
        ptr::write(&mut inner.Anonymous.lVal, val);
        v
    }
}

fn raw_f64(val: f64) -> VARIANT {
    unsafe {
        let mut v = raw_with_vt(VT_R8);
        let inner = &mut *v.Anonymous.Anonymous;
        ptr::write(&mut inner.Anonymous.dblVal, val);
        v
    }
}

fn raw_date(val: f64) -> VARIANT {
    unsafe {
        let mut v = raw_with_vt(VT_DATE);
        let inner = &mut *v.Anonymous.Anonymous;
        ptr::write(&mut inner.Anonymous.date, val);
        v
    }
}

fn raw_error(scode: i32) -> VARIANT {
    unsafe {
        let mut v = raw_with_vt(VT_ERROR);
        let inner = &mut *v.Anonymous.Anonymous;
        ptr::write(&mut inner.Anonymous.scode, scode);
        v
    }
}

fn raw_str(val: &str) -> VARIANT {
    unsafe {
        let mut v = raw_with_vt(VT_BSTR);
        let inner = &mut *v.Anonymous.Anonymous;
        ptr::write(&mut inner.Anonymous.bstrVal, ManuallyDrop::new(BSTR::from(val)));
        v
    }
}

fn raw_dispatch(disp: &IDispatch) -> VARIANT {
    unsafe {
        let mut v = raw_with_vt(VT_DISPATCH);
        let inner = &mut *v.Anonymous.Anonymous;
        // The VARIANT owns one reference, dropped by VariantClear
        ptr::write(
            &mut inner.Anonymous.pdispVal,
            ManuallyDrop::new(Some(disp.clone())),
        );
        v
    }
}

/// Build a raw VARIANT that owns its contents. Pass it to [`clear`] when done.
pub(crate) fn to_raw(variant: &Variant) -> VARIANT {
    match variant {
        Variant::Value(Value::Empty) => VARIANT::default(),
        Variant::Value(Value::Null) => raw_with_vt(VT_NULL),
        Variant::Value(Value::Bool(b)) => raw_bool(*b),
        Variant::Value(Value::Int(n)) => raw_i32(*n),
        Variant::Value(Value::Double(n)) => raw_f64(*n),
        Variant::Value(Value::Text(s)) => raw_str(s),
        Variant::Value(Value::Date(d)) => raw_date(*d),
        Variant::Value(Value::Error(code)) => raw_error(*code),
        Variant::Object(d) => raw_dispatch(d.as_idispatch()),
    }
}

/// Copy a raw VARIANT into an owned [`Variant`]. Object references are
/// AddRef'd, strings copied; the raw VARIANT still needs [`clear`].
pub(crate) fn from_raw(v: &VARIANT, lcid: u32) -> Variant {
    unsafe {
        let vt = v.Anonymous.Anonymous.vt;
        let anon = &v.Anonymous.Anonymous.Anonymous;
        let value = if vt == VT_EMPTY {
            Value::Empty
        } else if vt == VT_NULL {
            Value::Null
        } else if vt == VT_BOOL {
            Value::Bool(anon.boolVal.0 != 0)
        } else if vt == VT_I4 || vt == VT_INT {
            Value::Int(anon.lVal)
        } else if vt == VT_I2 {
            Value::Int(anon.iVal as i32)
        } else if vt == VT_UI1 {
            Value::Int(anon.bVal as i32)
        } else if vt == VT_UI2 {
            Value::Int(anon.uiVal as i32)
        } else if vt == VT_R8 {
            Value::Double(anon.dblVal)
        } else if vt == VT_R4 {
            Value::Double(anon.fltVal as f64)
        } else if vt == VT_CY {
            // Currency is a fixed-point integer scaled by 10^4
            Value::Double(anon.cyVal.int64 as f64 / 10_000.0)
        } else if vt == VT_DATE {
            Value::Date(anon.date)
        } else if vt == VT_BSTR {
            let bstr: &BSTR = &anon.bstrVal;
            Value::Text(bstr.to_string())
        } else if vt == VT_ERROR {
            Value::Error(anon.scode)
        } else if vt == VT_DISPATCH {
            let opt_disp: &Option<IDispatch> = &anon.pdispVal;
            return match opt_disp {
                Some(disp) => Variant::Object(Dispatch::from_idispatch(disp.clone(), lcid)),
                None => Variant::Value(Value::Null),
            };
        } else if vt == VT_UNKNOWN {
            let unknown = anon.punkVal.as_ref().and_then(|u| u.cast::<IDispatch>().ok());
            return match unknown {
                Some(disp) => Variant::Object(Dispatch::from_idispatch(disp, lcid)),
                None => Variant::Value(Value::Null),
            };
        } else {
            log::debug!("unsupported VARIANT type {}, treating as empty", vt.0);
            Value::Empty
        };
        Variant::Value(value)
    }
}

/// Release whatever a raw VARIANT owns and reset it to VT_EMPTY
pub(crate) fn clear(v: &mut VARIANT) {
    unsafe {
        if let Err(e) = VariantClear(v) {
            log::debug!("VariantClear failed: {e}");
        }
    }
}
