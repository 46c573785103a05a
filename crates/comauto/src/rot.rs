//! Running Object Table browsing

#![cfg(windows)]

use comauto_core::{Error, Result};
use windows::{
    core::Interface,
    Win32::{
        Foundation::S_OK,
        System::Com::{
            CoTaskMemFree, CreateBindCtx, GetRunningObjectTable, IDispatch, IMoniker,
            IRunningObjectTable,
        },
    },
};

use crate::config::Locale;
use crate::dispatch::Dispatch;

/// One bound entry of the Running Object Table
#[derive(Debug, Clone)]
pub struct RunningObject {
    /// Moniker display name, e.g. a workbook path or `!{CLSID}`
    pub display_name: String,
    /// Type name from type information, if the object is automatable
    pub type_name: Option<String>,
    /// The bound object
    pub object: Dispatch,
}

fn open_table() -> Option<IRunningObjectTable> {
    match unsafe { GetRunningObjectTable(0) } {
        Ok(rot) => Some(rot),
        Err(e) => {
            log::debug!("GetRunningObjectTable failed: {e}");
            None
        }
    }
}

/// Every moniker registered in the table; failures end the walk early
fn monikers(rot: &IRunningObjectTable) -> Vec<IMoniker> {
    let mut result = Vec::new();
    let enum_moniker = match unsafe { rot.EnumRunning() } {
        Ok(e) => e,
        Err(e) => {
            log::debug!("EnumRunning failed: {e}");
            return result;
        }
    };

    loop {
        let mut slot: [Option<IMoniker>; 1] = [None];
        let mut fetched = 0u32;
        let hr = unsafe { enum_moniker.Next(&mut slot, Some(&mut fetched)) };
        if hr != S_OK || fetched == 0 {
            break;
        }
        if let Some(moniker) = slot[0].take() {
            result.push(moniker);
        }
    }
    result
}

fn display_name(moniker: &IMoniker) -> Result<String> {
    unsafe {
        let ctx = CreateBindCtx(0).map_err(|e| Error::other(e.message().to_string()))?;
        let raw = moniker
            .GetDisplayName(&ctx, None::<&IMoniker>)
            .map_err(|e| Error::other(e.message().to_string()))?;
        let name = raw.to_string().unwrap_or_default();
        CoTaskMemFree(Some(raw.0 as *const _));
        Ok(name)
    }
}

fn bind(rot: &IRunningObjectTable, moniker: &IMoniker, lcid: u32) -> Option<Dispatch> {
    let unknown = match unsafe { rot.GetObject(moniker) } {
        Ok(unknown) => unknown,
        Err(e) => {
            log::debug!("ROT GetObject failed: {e}");
            return None;
        }
    };
    unknown
        .cast::<IDispatch>()
        .ok()
        .map(|disp| Dispatch::from_idispatch(disp, lcid))
}

/// Every entry in the Running Object Table that binds to an IDispatch
/// object. Entries without a display name or that fail to bind are skipped.
pub fn running_objects() -> Vec<RunningObject> {
    let Some(rot) = open_table() else {
        return Vec::new();
    };
    let lcid = Locale::default().lcid();

    monikers(&rot)
        .iter()
        .filter_map(|moniker| {
            let display_name = match display_name(moniker) {
                Ok(name) => name,
                Err(e) => {
                    log::debug!("skipping moniker: {e}");
                    return None;
                }
            };
            let Some(object) = bind(&rot, moniker, lcid) else {
                log::debug!("skipping unbindable entry {display_name}");
                return None;
            };
            let type_name = object.type_name();
            Some(RunningObject {
                display_name,
                type_name,
                object,
            })
        })
        .collect()
}

/// Running Excel instances, found through the workbooks they registered.
/// Each `Application` appears once no matter how many workbooks it has open.
pub fn excel_applications() -> Vec<Dispatch> {
    let mut result: Vec<Dispatch> = Vec::new();
    let Some(rot) = open_table() else {
        return result;
    };
    let lcid = Locale::default().lcid();

    for moniker in monikers(&rot) {
        let Some(obj) = bind(&rot, &moniker, lcid) else {
            continue;
        };
        if obj.type_name().as_deref() != Some("Workbook") {
            continue;
        }

        let app = match obj.get("Parent", &[]).map(|v| v.into_object()) {
            Ok(Some(app)) => app,
            Ok(None) => continue,
            Err(e) => {
                log::debug!("workbook without a Parent: {e}");
                continue;
            }
        };

        if !result.iter().any(|known| known.same_object(&app)) {
            result.push(app);
        }
    }

    log::debug!("found {} running Excel instance(s)", result.len());
    result
}
