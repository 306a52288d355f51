use tracing::info;

use crate::error::LabelError;

/// Send a raw EPL job to the named printer through the Win32 spooler.
/// On other platforms this always fails with `LabelError::Printer`.
pub fn send_raw_to_printer(printer_name: &str, job: &[u8]) -> Result<(), LabelError> {
    if printer_name.trim().is_empty() {
        return Err(LabelError::Printer("no printer name given".into()));
    }
    if job.is_empty() {
        return Err(LabelError::Printer("refusing to send an empty job".into()));
    }
    info!(printer = printer_name, bytes = job.len(), "sending raw job");

    #[cfg(target_os = "windows")]
    {
        spooler::write_raw(printer_name, job)
    }

    #[cfg(not(target_os = "windows"))]
    {
        Err(LabelError::Printer(format!(
            "cannot reach {:?}: raw printing needs the Win32 spooler",
            printer_name
        )))
    }
}

#[cfg(target_os = "windows")]
mod spooler {
    use std::ffi::OsStr;
    use std::iter::once;
    use std::os::windows::ffi::OsStrExt;
    use std::ptr::null_mut;

    use winapi::ctypes::c_void;
    use winapi::shared::minwindef::DWORD;
    use winapi::um::winspool::{
        ClosePrinter, EndDocPrinter, EndPagePrinter, OpenPrinterW, StartDocPrinterW,
        StartPagePrinter, WritePrinter, DOC_INFO_1W,
    };

    use crate::error::LabelError;

    const DOC_NAME: &str = "Barcode label";

    fn wide(s: &str) -> Vec<u16> {
        OsStr::new(s).encode_wide().chain(once(0)).collect()
    }

    // Closes the spooler handle on every exit path.
    struct Handle(*mut c_void);

    impl Drop for Handle {
        fn drop(&mut self) {
            unsafe {
                ClosePrinter(self.0 as *mut _);
            }
        }
    }

    pub fn write_raw(printer_name: &str, job: &[u8]) -> Result<(), LabelError> {
        let mut name = wide(printer_name);
        let mut doc_name = wide(DOC_NAME);
        let mut datatype = wide("RAW");

        let mut raw: *mut c_void = null_mut();
        let opened =
            unsafe { OpenPrinterW(name.as_mut_ptr(), &mut raw as *mut _ as *mut _, null_mut()) };
        if opened == 0 {
            return Err(LabelError::Printer(format!("cannot open printer {:?}", printer_name)));
        }
        let handle = Handle(raw);

        let doc_info = DOC_INFO_1W {
            pDocName: doc_name.as_mut_ptr(),
            pOutputFile: null_mut(),
            pDatatype: datatype.as_mut_ptr(),
        };

        unsafe {
            if StartDocPrinterW(handle.0 as *mut _, 1, &doc_info as *const _ as *mut _) == 0 {
                return Err(LabelError::Printer("spooler rejected the document".into()));
            }
            if StartPagePrinter(handle.0 as *mut _) == 0 {
                EndDocPrinter(handle.0 as *mut _);
                return Err(LabelError::Printer("spooler rejected the page".into()));
            }

            let mut written: DWORD = 0;
            let ok = WritePrinter(
                handle.0 as *mut _,
                job.as_ptr() as *mut _,
                job.len() as DWORD,
                &mut written,
            );
            EndPagePrinter(handle.0 as *mut _);
            EndDocPrinter(handle.0 as *mut _);

            if ok == 0 || written as usize != job.len() {
                return Err(LabelError::Printer(format!(
                    "wrote {} of {} bytes",
                    written,
                    job.len()
                )));
            }
        }
        Ok(())
    }
}
