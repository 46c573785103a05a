//! COM apartment initialization for the calling thread

#![cfg(windows)]

use std::marker::PhantomData;

use comauto_core::{Error, Result};
use windows::Win32::System::Com::{
    CoInitializeEx, CoUninitialize, COINIT, COINIT_APARTMENTTHREADED, COINIT_MULTITHREADED,
};

/// RAII guard for COM initialization
///
/// `CoUninitialize` runs when the guard is dropped. The guard is neither
/// `Send` nor `Sync`: it belongs to the thread that created it.
pub struct Apartment(PhantomData<*const ()>);

impl Apartment {
    /// Single-threaded apartment, which Office automation requires
    pub fn initialize_sta() -> Result<Self> {
        Self::initialize(COINIT_APARTMENTTHREADED)
    }

    /// Multithreaded apartment
    pub fn initialize_mta() -> Result<Self> {
        Self::initialize(COINIT_MULTITHREADED)
    }

    fn initialize(coinit: COINIT) -> Result<Self> {
        // SAFETY: Drop uninitializes exactly once per successful call.
        let hr = unsafe { CoInitializeEx(None, coinit) };
        hr.ok()
            .map_err(|e| Error::NotAvailable(format!("CoInitializeEx failed: {e}")))?;
        log::debug!("COM initialized ({:?})", coinit);
        Ok(Self(PhantomData))
    }
}

impl Drop for Apartment {
    fn drop(&mut self) {
        // SAFETY: Instances are only created when COM was successfully initialized.
        unsafe { CoUninitialize() };
        log::debug!("COM uninitialized");
    }
}
