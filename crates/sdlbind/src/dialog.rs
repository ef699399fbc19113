//! Native file dialogs
//!
//! Dialogs are asynchronous: the call returns immediately and the callback
//! runs later, possibly on another thread. The filter strings are kept alive
//! inside the callback payload until then.

use crate::ffi::callbacks::{self, CallbackHandle};
use crate::ffi::marshal::{self, MarshalError};
use crate::sdl::Sdl;
use crate::sys::{SDL_DialogFileCallback, SDL_Window};
use crate::video::Window;
use std::ffi::{c_char, c_int, c_void, CString};
use std::ptr;

/// `SDL_DialogFileFilter`
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawDialogFileFilter {
    pub name: *const c_char,
    pub pattern: *const c_char,
}

/// A named filter; `pattern` is a `;`-separated list of extensions
/// (`"png;jpg"`) or `"*"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogFileFilter {
    pub name: String,
    pub pattern: String,
}

impl DialogFileFilter {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
        }
    }
}

/// Outcome delivered to a dialog callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResult {
    /// Chosen paths and the index of the filter in effect, if reported
    Selected { files: Vec<String>, filter: Option<usize> },
    Cancelled,
    /// The dialog could not be shown; carries the native error
    Failed(String),
}

impl DialogResult {
    fn from_native(sdl: &Sdl, files: Option<Vec<String>>, filter: i32) -> Self {
        match files {
            None => DialogResult::Failed(sdl.get_error()),
            Some(files) if files.is_empty() => DialogResult::Cancelled,
            Some(files) => DialogResult::Selected {
                files,
                filter: usize::try_from(filter).ok(),
            },
        }
    }
}

/// Native copies of the dialog arguments, alive until the callback runs
struct DialogArgs {
    _strings: Vec<CString>,
    filters: Vec<RawDialogFileFilter>,
    default_location: Option<CString>,
}

// The raw filters only point into `_strings`, which moves with them.
unsafe impl Send for DialogArgs {}

impl DialogArgs {
    fn new(filters: &[DialogFileFilter], default_location: Option<&str>) -> Result<Self, MarshalError> {
        let mut strings = Vec::with_capacity(filters.len() * 2);
        let mut raw = Vec::with_capacity(filters.len());
        for filter in filters {
            let name = marshal::to_c_string(&filter.name)?;
            let pattern = marshal::to_c_string(&filter.pattern)?;
            raw.push(RawDialogFileFilter {
                name: name.as_ptr(),
                pattern: pattern.as_ptr(),
            });
            strings.push(name);
            strings.push(pattern);
        }
        let default_location = default_location.map(marshal::to_c_string).transpose()?;
        Ok(Self {
            _strings: strings,
            filters: raw,
            default_location,
        })
    }

    fn filters_ptr(&self) -> *const RawDialogFileFilter {
        if self.filters.is_empty() {
            ptr::null()
        } else {
            self.filters.as_ptr()
        }
    }

    fn location_ptr(&self) -> *const c_char {
        self.default_location.as_ref().map_or(ptr::null(), |s| s.as_ptr())
    }
}

struct Armed {
    trampoline: SDL_DialogFileCallback,
    userdata: *mut c_void,
    filters: *const RawDialogFileFilter,
    nfilters: c_int,
    location: *const c_char,
}

/// Box the callback with its arguments and release it to native code
fn arm<F>(sdl: &Sdl, args: DialogArgs, callback: F) -> crate::Result<Armed>
where
    F: FnOnce(DialogResult) + Send + 'static,
{
    let nfilters = marshal::len_to_c_int(args.filters.len())?;
    let filters = args.filters_ptr();
    let location = args.location_ptr();
    let sdl = sdl.clone();
    let deliver = move |files: Option<Vec<String>>, filter: i32| {
        let _args = args;
        callback(DialogResult::from_native(&sdl, files, filter));
    };
    Ok(Armed {
        trampoline: trampoline_for(&deliver),
        userdata: CallbackHandle::new(Some(deliver)).into_raw(),
        filters,
        nfilters,
        location,
    })
}

fn trampoline_for<G>(_: &G) -> SDL_DialogFileCallback
where
    G: FnOnce(Option<Vec<String>>, i32) + Send + 'static,
{
    callbacks::dialog_file::<G>
}

fn window_ptr(window: Option<&Window>) -> *mut SDL_Window {
    window.map_or(ptr::null_mut(), |w| w.as_ptr())
}

impl Sdl {
    /// Show an open-file dialog
    ///
    /// Must be called from the main thread; `callback` may run on any thread.
    pub fn show_open_file_dialog<F>(
        &self,
        window: Option<&Window>,
        filters: &[DialogFileFilter],
        default_location: Option<&str>,
        allow_many: bool,
        callback: F,
    ) -> crate::Result<()>
    where
        F: FnOnce(DialogResult) + Send + 'static,
    {
        let armed = arm(self, DialogArgs::new(filters, default_location)?, callback)?;
        unsafe {
            (self.api().SDL_ShowOpenFileDialog)(
                Some(armed.trampoline),
                armed.userdata,
                window_ptr(window),
                armed.filters,
                armed.nfilters,
                armed.location,
                marshal::encode_bool(allow_many),
            )
        }
        Ok(())
    }

    pub fn show_save_file_dialog<F>(
        &self,
        window: Option<&Window>,
        filters: &[DialogFileFilter],
        default_location: Option<&str>,
        callback: F,
    ) -> crate::Result<()>
    where
        F: FnOnce(DialogResult) + Send + 'static,
    {
        let armed = arm(self, DialogArgs::new(filters, default_location)?, callback)?;
        unsafe {
            (self.api().SDL_ShowSaveFileDialog)(
                Some(armed.trampoline),
                armed.userdata,
                window_ptr(window),
                armed.filters,
                armed.nfilters,
                armed.location,
            )
        }
        Ok(())
    }

    pub fn show_open_folder_dialog<F>(
        &self,
        window: Option<&Window>,
        default_location: Option<&str>,
        allow_many: bool,
        callback: F,
    ) -> crate::Result<()>
    where
        F: FnOnce(DialogResult) + Send + 'static,
    {
        let armed = arm(self, DialogArgs::new(&[], default_location)?, callback)?;
        unsafe {
            (self.api().SDL_ShowOpenFolderDialog)(
                Some(armed.trampoline),
                armed.userdata,
                window_ptr(window),
                armed.location,
                marshal::encode_bool(allow_many),
            )
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;
    use std::mem::size_of;

    #[test]
    fn test_filter_layout() {
        assert_eq!(size_of::<RawDialogFileFilter>(), 2 * size_of::<*const c_char>());
    }

    #[test]
    fn test_args_keep_strings_alive() {
        let args = DialogArgs::new(
            &[DialogFileFilter::new("Images", "png;jpg"), DialogFileFilter::new("All", "*")],
            Some("/home"),
        )
        .unwrap();

        assert_eq!(args.filters.len(), 2);
        let second = args.filters[1];
        assert_eq!(unsafe { CStr::from_ptr(second.pattern) }.to_str().unwrap(), "*");
        assert_eq!(unsafe { CStr::from_ptr(args.location_ptr()) }.to_str().unwrap(), "/home");
    }

    #[test]
    fn test_no_filters_is_null() {
        let args = DialogArgs::new(&[], None).unwrap();
        assert!(args.filters_ptr().is_null());
        assert!(args.location_ptr().is_null());
    }

    #[test]
    fn test_interior_nul_rejected() {
        let err = DialogArgs::new(&[DialogFileFilter::new("bad\0name", "*")], None).err();
        assert!(matches!(err, Some(MarshalError::InteriorNul { .. })));
    }
}
