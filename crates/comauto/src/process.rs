//! Mapping an Office application object to its Windows process

#![cfg(windows)]

use comauto_core::{Error, Result};
use windows::Win32::{Foundation::HWND, UI::WindowsAndMessaging::GetWindowThreadProcessId};

use crate::dispatch::Dispatch;
use crate::invoker::Invoker;

/// Process id of the Excel instance behind `app`, found through its main
/// window handle (`Application.Hwnd`).
pub fn excel_process_id(invoker: &mut Invoker, app: &Dispatch) -> Result<u32> {
    let hwnd: i32 = invoker.get_property(app, "Hwnd", &[])?.unwrap_or(0);
    if hwnd == 0 {
        return Err(Error::NotAvailable(
            "could not retrieve Excel window handle".into(),
        ));
    }

    let mut pid = 0u32;
    // Window handles are 32-bit values even in 64-bit processes
    unsafe {
        GetWindowThreadProcessId(HWND(hwnd as isize as *mut _), Some(&mut pid));
    }
    if pid == 0 {
        return Err(Error::NotAvailable(
            "could not retrieve Excel process ID".into(),
        ));
    }

    log::debug!("Excel hwnd 0x{:X} belongs to pid {pid}", hwnd as u32);
    Ok(pid)
}
