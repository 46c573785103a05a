//! Safe wrapper around IDispatch for late-bound COM automation.
//!
//! Office's COM API is primarily accessed through IDispatch (like VBScript late-binding).
//! This module resolves member names to DISPIDs and performs the raw
//! property get/put and method calls.

#![cfg(windows)]

use std::fmt;
use std::ptr;

use comauto_core::{Error, Handle, Result};
use windows::{
    core::{Interface, GUID, HSTRING, IUnknown, PCWSTR},
    Win32::{
        Foundation::DISP_E_EXCEPTION,
        System::{
            Com::{
                CLSIDFromProgID, CoCreateInstance, IDispatch, CLSCTX_LOCAL_SERVER, DISPATCH_FLAGS,
                DISPATCH_METHOD, DISPATCH_PROPERTYGET, DISPATCH_PROPERTYPUT, DISPPARAMS,
                EXCEPINFO,
            },
            Ole::DISPID_PROPERTYPUT,
            Variant::VARIANT,
        },
    },
};

use crate::config::AutomationConfig;
use crate::variant::{self, Variant};

/// How a member is invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvokeKind {
    /// `obj.Name` or `obj.Name(index)`
    PropertyGet,
    /// `obj.Name = value` or `obj.Name(index) = value`
    PropertyPut,
    /// `obj.Name(args)`; also allowed to resolve to a parameterized property,
    /// the way VB late binding does
    Method,
}

impl InvokeKind {
    fn flags(self) -> DISPATCH_FLAGS {
        match self {
            InvokeKind::PropertyGet => DISPATCH_PROPERTYGET,
            InvokeKind::PropertyPut => DISPATCH_PROPERTYPUT,
            InvokeKind::Method => DISPATCH_FLAGS(DISPATCH_METHOD.0 | DISPATCH_PROPERTYGET.0),
        }
    }
}

/// A wrapper around an IDispatch COM object providing ergonomic access.
///
/// Cloning AddRefs the underlying object; dropping releases it.
#[derive(Clone)]
pub struct Dispatch {
    inner: IDispatch,
    lcid: u32,
}

impl Dispatch {
    /// Create a COM object from a ProgID string (e.g., "Excel.Application").
    pub fn create(prog_id: &str, config: &AutomationConfig) -> Result<Self> {
        unsafe {
            let hstr = HSTRING::from(prog_id);
            let clsid = CLSIDFromProgID(&hstr).map_err(|e| {
                Error::NotAvailable(format!("CLSIDFromProgID('{prog_id}') failed: {e}"))
            })?;
            let disp: IDispatch = CoCreateInstance(&clsid, None, CLSCTX_LOCAL_SERVER)
                .map_err(|e| {
                    Error::NotAvailable(format!("CoCreateInstance failed for '{prog_id}': {e}"))
                })?;
            log::info!("created {prog_id}");
            Ok(Self {
                inner: disp,
                lcid: config.locale.lcid(),
            })
        }
    }

    /// Create an Office application and apply the start-up properties from
    /// `config` (visibility, alerts, screen updating).
    pub fn create_application(prog_id: &str, config: &AutomationConfig) -> Result<Self> {
        let app = Self::create(prog_id, config)?;
        for (name, value) in config.startup_properties() {
            // Not every application exposes every switch
            if let Err(e) = app.put(name, &[Variant::from(value)]) {
                log::debug!("{prog_id}.{name} = {value} ignored: {e}");
            }
        }
        Ok(app)
    }

    /// Wrap an existing IDispatch pointer.
    pub fn from_idispatch(disp: IDispatch, lcid: u32) -> Self {
        Self { inner: disp, lcid }
    }

    /// The wrapped interface
    pub fn as_idispatch(&self) -> &IDispatch {
        &self.inner
    }

    /// Locale used for name lookup and invocation
    pub fn lcid(&self) -> u32 {
        self.lcid
    }

    /// Look up the DISPID for a member name.
    pub fn dispid(&self, name: &str) -> Result<i32> {
        unsafe {
            let wide: Vec<u16> = name.encode_utf16().chain(std::iter::once(0)).collect();
            let pcwstr = PCWSTR(wide.as_ptr());
            let names = [pcwstr];
            let mut dispid = 0i32;
            self.inner
                .GetIDsOfNames(&GUID::zeroed(), names.as_ptr(), 1, self.lcid, &mut dispid)
                .map_err(|e| Error::com(name, e.code().0 as u32, Some(e.message().to_string())))?;
            Ok(dispid)
        }
    }

    /// Whether `GetIDsOfNames` knows the member
    pub fn has_member(&self, name: &str) -> bool {
        self.dispid(name).is_ok()
    }

    /// Invoke a member. Arguments are in natural order (this function
    /// reverses them as required by DISPPARAMS). For puts the last argument
    /// is the new value.
    pub fn invoke(&self, kind: InvokeKind, name: &str, args: &[Variant]) -> Result<Variant> {
        let dispid = self.dispid(name)?;
        let is_put = kind == InvokeKind::PropertyPut;
        if is_put && args.is_empty() {
            return Err(Error::other(format!("setting '{name}' needs a value")));
        }

        let mut raw_args: Vec<VARIANT> = args.iter().rev().map(variant::to_raw).collect();
        let mut named_args = [DISPID_PROPERTYPUT];
        let params = DISPPARAMS {
            rgvarg: if raw_args.is_empty() {
                ptr::null_mut()
            } else {
                raw_args.as_mut_ptr()
            },
            rgdispidNamedArgs: if is_put {
                named_args.as_mut_ptr()
            } else {
                ptr::null_mut()
            },
            cArgs: raw_args.len() as u32,
            cNamedArgs: if is_put { 1 } else { 0 },
        };

        let mut result = VARIANT::default();
        let mut except = EXCEPINFO::default();
        let result_ptr: Option<*mut VARIANT> = if is_put {
            None
        } else {
            Some(&mut result as *mut VARIANT)
        };
        let outcome = unsafe {
            self.inner.Invoke(
                dispid,
                &GUID::zeroed(),
                self.lcid,
                kind.flags(),
                &params,
                result_ptr,
                Some(&mut except),
                None,
            )
        };

        for arg in raw_args.iter_mut() {
            variant::clear(arg);
        }
        outcome.map_err(|e| format_invoke_error(e, &except, name))?;

        let value = variant::from_raw(&result, self.lcid);
        variant::clear(&mut result);
        Ok(value)
    }

    /// Get a property value. Equivalent to VB's `obj.PropertyName` or
    /// `obj.PropertyName(index)`.
    pub fn get(&self, name: &str, args: &[Variant]) -> Result<Variant> {
        self.invoke(InvokeKind::PropertyGet, name, args)
    }

    /// Set a property value. Equivalent to VB's `obj.PropertyName = value`.
    pub fn put(&self, name: &str, args: &[Variant]) -> Result<()> {
        self.invoke(InvokeKind::PropertyPut, name, args).map(|_| ())
    }

    /// Invoke a method with arguments.
    pub fn call(&self, name: &str, args: &[Variant]) -> Result<Variant> {
        self.invoke(InvokeKind::Method, name, args)
    }

    /// Type name from the object's type information, if it has any
    pub fn type_name(&self) -> Option<String> {
        crate::typeinfo::type_name(self)
    }

    /// The `IUnknown` pointer, which COM guarantees is stable per object
    pub fn identity(&self) -> usize {
        match self.inner.cast::<IUnknown>() {
            Ok(unknown) => unknown.as_raw() as usize,
            Err(_) => self.inner.as_raw() as usize,
        }
    }

    /// Whether both handles refer to the same COM object
    pub fn same_object(&self, other: &Dispatch) -> bool {
        self.identity() == other.identity()
    }
}

impl Handle for Dispatch {
    fn identity(&self) -> usize {
        Dispatch::identity(self)
    }

    fn describe(&self) -> String {
        self.type_name().unwrap_or_else(|| "IDispatch".to_string())
    }
}

impl fmt::Debug for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatch")
            .field("ptr", &self.inner.as_raw())
            .field("lcid", &self.lcid)
            .finish()
    }
}

/// Translate an Invoke failure, including EXCEPINFO details if available.
fn format_invoke_error(err: windows::core::Error, except: &EXCEPINFO, member_name: &str) -> Error {
    let code = err.code().0 as u32;
    if code == DISP_E_EXCEPTION.0 as u32 {
        let desc = if !except.bstrDescription.is_empty() {
            except.bstrDescription.to_string()
        } else {
            String::from("(no description)")
        };
        let source = if !except.bstrSource.is_empty() {
            except.bstrSource.to_string()
        } else {
            String::from("(no source)")
        };
        // The server's own error code is more useful than DISP_E_EXCEPTION
        let hresult = if except.scode != 0 {
            except.scode as u32
        } else {
            code
        };
        Error::com(member_name, hresult, Some(format!("{desc}, source: {source}")))
    } else {
        Error::com(member_name, code, Some(err.message().to_string()))
    }
}
