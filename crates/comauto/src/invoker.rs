//! Late-bound get/set/call with release tracking
//!
//! [`Invoker`] is the front door for name-based member access. Every object
//! a call returns is added to its [`ReleaseTracker`]; nothing is released
//! until the owner asks for it.

#![cfg(windows)]

use comauto_core::{Error, ReleaseTracker, Result};

use crate::dispatch::Dispatch;
use crate::typeinfo;
use crate::variant::{FromVariant, Variant};

/// Invokes members by name and keeps the returned objects for later release
#[derive(Debug, Default)]
pub struct Invoker {
    tracker: ReleaseTracker<Dispatch>,
}

impl Invoker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track an object the caller obtained elsewhere (e.g. a created application)
    pub fn track(&mut self, obj: &Dispatch) -> bool {
        self.tracker.track(obj.clone())
    }

    fn track_result(&mut self, result: &Variant) {
        if let Variant::Object(obj) = result {
            self.tracker.track(obj.clone());
        }
    }

    /// Read a property. COM failures propagate; a result of another kind than
    /// `T` gives `Ok(None)`.
    pub fn get_property<T: FromVariant>(
        &mut self,
        obj: &Dispatch,
        name: &str,
        args: &[Variant],
    ) -> Result<Option<T>> {
        let result = obj.get(name, args)?;
        self.track_result(&result);
        Ok(T::from_variant(&result))
    }

    /// Read a property that must be an object, e.g. `Workbooks` or `Range("A1")`
    pub fn get_object(&mut self, obj: &Dispatch, name: &str, args: &[Variant]) -> Result<Dispatch> {
        let result = obj.get(name, args)?;
        self.track_result(&result);
        expect_object(result, name)
    }

    /// Read a property, suppressing every failure. Any error or kind
    /// mismatch gives `None`.
    pub fn try_get_property<T: FromVariant>(
        &mut self,
        obj: &Dispatch,
        name: &str,
        args: &[Variant],
    ) -> Option<T> {
        match self.get_property(obj, name, args) {
            Ok(value) => value,
            Err(e) => {
                log::debug!("suppressed: {e}");
                None
            }
        }
    }

    /// Write a property. The last argument is the value; any before it are
    /// indexes.
    pub fn set_property(&mut self, obj: &Dispatch, name: &str, args: &[Variant]) -> Result<()> {
        obj.put(name, args)
    }

    /// Call a method and return whatever it returns
    pub fn call_method(&mut self, obj: &Dispatch, name: &str, args: &[Variant]) -> Result<Variant> {
        let result = obj.call(name, args)?;
        self.track_result(&result);
        Ok(result)
    }

    /// Call a method and extract a `T`; a result of another kind gives `Ok(None)`
    pub fn call_method_as<T: FromVariant>(
        &mut self,
        obj: &Dispatch,
        name: &str,
        args: &[Variant],
    ) -> Result<Option<T>> {
        let result = self.call_method(obj, name, args)?;
        Ok(T::from_variant(&result))
    }

    /// Call a method that must return an object, e.g. `Documents.Add()`
    pub fn call_object(
        &mut self,
        obj: &Dispatch,
        name: &str,
        args: &[Variant],
    ) -> Result<Dispatch> {
        let result = self.call_method(obj, name, args)?;
        expect_object(result, name)
    }

    /// Whether the object resolves `name` through `GetIDsOfNames`
    pub fn property_exists(&self, obj: &Dispatch, name: &str) -> bool {
        obj.has_member(name)
    }

    /// Sorted `"<Kind>: <Name>"` lines for every member in the type information
    pub fn list_callable_members(&self, obj: &Dispatch) -> Vec<String> {
        typeinfo::list_members(obj).callable_lines()
    }

    pub fn tracker(&self) -> &ReleaseTracker<Dispatch> {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut ReleaseTracker<Dispatch> {
        &mut self.tracker
    }

    /// Release every tracked object
    pub fn release_all(&mut self) -> usize {
        self.tracker.release_all()
    }
}

fn expect_object(result: Variant, name: &str) -> Result<Dispatch> {
    let actual = result.type_name();
    result.into_object().ok_or_else(|| Error::TypeMismatch {
        member: name.to_string(),
        expected: <Dispatch as FromVariant>::EXPECTED,
        actual,
    })
}
