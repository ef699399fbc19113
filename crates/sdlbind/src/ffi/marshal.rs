//! Conversions between native memory and owned Rust values
//!
//! Every helper here follows one policy: a null input pointer (or a
//! non-positive count) converts to the empty value, never to an error.
//! Wrappers that must report a null return as a failure check for it before
//! calling into this module.
//!
//! # Ownership conventions
//!
//! - *Borrowed* buffers stay owned by the native library. They are copied
//!   and never freed.
//! - *Native-allocated* buffers are copied and then released exactly once
//!   through the supplied free function ([`take_native_array`],
//!   [`take_native_string`]).
//! - Strings passed into native calls are kept alive by a
//!   [`MarshalContext`] for the duration of the call.

use std::ffi::{c_char, c_int, c_void, CStr, CString};
use std::ptr;
use thiserror::Error;

/// Marshal error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarshalError {
    /// Invalid string (contains an interior NUL byte)
    #[error("Invalid string: interior NUL byte at offset {position} in {value:?}")]
    InteriorNul { value: String, position: usize },

    /// Buffer too long for the native `int` length parameter
    #[error("Length {len} exceeds the native int range")]
    LengthOutOfRange { len: usize },

    /// Value has no native representation (e.g. an event carrying borrowed strings)
    #[error("Cannot encode {0} for a native call")]
    Unencodable(String),
}

/// Native free function, `void SDL_free(void*)`
pub type FreeFn = unsafe extern "C" fn(*mut c_void);

/// Convert a Rust string into a `CString`
pub fn to_c_string(value: &str) -> Result<CString, MarshalError> {
    CString::new(value).map_err(|e| MarshalError::InteriorNul {
        value: value.to_string(),
        position: e.nul_position(),
    })
}

/// Convert a slice length into the native `int` count convention
pub fn len_to_c_int(len: usize) -> Result<c_int, MarshalError> {
    c_int::try_from(len).map_err(|_| MarshalError::LengthOutOfRange { len })
}

/// Encode a Rust `bool` as the native 1-byte boolean
#[inline]
pub fn encode_bool(value: bool) -> u8 {
    if value {
        1
    } else {
        0
    }
}

/// Decode a native 1-byte boolean; any non-zero byte is true
#[inline]
pub fn decode_bool(value: u8) -> bool {
    value != 0
}

/// Marshal context for the duration of one native call
///
/// Owns every `CString` produced while preparing arguments, so the pointers
/// handed to the native function stay valid until the context is dropped.
///
/// ```
/// use sdlbind::ffi::MarshalContext;
///
/// let mut ctx = MarshalContext::new();
/// let title = ctx.c_str("hello").unwrap();
/// let none = ctx.c_str_or_null(None).unwrap();
/// assert!(!title.is_null());
/// assert!(none.is_null());
/// ```
#[derive(Debug, Default)]
pub struct MarshalContext {
    /// Track allocated C strings for cleanup
    allocated_strings: Vec<CString>,
}

impl MarshalContext {
    /// Create a new marshal context
    pub fn new() -> Self {
        Self {
            allocated_strings: Vec::new(),
        }
    }

    /// Marshal a string argument; the pointer lives as long as `self`
    pub fn c_str(&mut self, value: &str) -> Result<*const c_char, MarshalError> {
        let c_string = to_c_string(value)?;
        let ptr = c_string.as_ptr();
        self.allocated_strings.push(c_string);
        Ok(ptr)
    }

    /// Marshal an optional string argument, `None` becoming a null pointer
    pub fn c_str_or_null(&mut self, value: Option<&str>) -> Result<*const c_char, MarshalError> {
        match value {
            Some(value) => self.c_str(value),
            None => Ok(ptr::null()),
        }
    }

    /// Number of strings kept alive by this context
    pub fn allocated_count(&self) -> usize {
        self.allocated_strings.len()
    }
}

/// Copy `count` values starting at `ptr`
///
/// # Safety
///
/// If `ptr` is non-null it must point to at least `count` initialised `T`.
pub unsafe fn copy_array<T: Copy>(ptr: *const T, count: c_int) -> Vec<T> {
    if ptr.is_null() || count <= 0 {
        return Vec::new();
    }
    std::slice::from_raw_parts(ptr, count as usize).to_vec()
}

/// Deep-copy an array of pointers, keeping null entries as `None`
///
/// # Safety
///
/// If `ptr` is non-null it must point to `count` pointers, each either null
/// or pointing to a valid `T`.
pub unsafe fn deep_copy_pointer_array<T: Copy>(ptr: *const *const T, count: c_int) -> Vec<Option<T>> {
    copy_array(ptr, count)
        .into_iter()
        .map(|entry| entry.as_ref().copied())
        .collect()
}

/// Copy a C string into an owned `String`
///
/// Null converts to the empty string; invalid UTF-8 is replaced lossily.
///
/// # Safety
///
/// If `ptr` is non-null it must point to a NUL-terminated string.
pub unsafe fn string_from_ptr(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    CStr::from_ptr(ptr).to_string_lossy().into_owned()
}

/// Like [`string_from_ptr`] but distinguishes null as `None`
///
/// # Safety
///
/// Same as [`string_from_ptr`].
pub unsafe fn opt_string_from_ptr(ptr: *const c_char) -> Option<String> {
    (!ptr.is_null()).then(|| string_from_ptr(ptr))
}

/// Copy a null-terminated array of C strings
///
/// # Safety
///
/// If `ptr` is non-null it must point to an array of string pointers ending
/// with a null entry.
pub unsafe fn strings_from_ptr_array(ptr: *const *const c_char) -> Vec<String> {
    let mut strings = Vec::new();
    if ptr.is_null() {
        return strings;
    }

    let mut cursor = ptr;
    while !(*cursor).is_null() {
        strings.push(string_from_ptr(*cursor));
        cursor = cursor.add(1);
    }
    strings
}

/// Copy a counted array of C strings; null entries become empty strings
///
/// # Safety
///
/// If `ptr` is non-null it must point to `count` string pointers.
pub unsafe fn strings_from_counted_ptr_array(ptr: *const *const c_char, count: c_int) -> Vec<String> {
    copy_array(ptr, count)
        .into_iter()
        .map(|entry| string_from_ptr(entry))
        .collect()
}

/// Copy a native-allocated array and release it
///
/// `free` runs exactly once when `ptr` is non-null, whatever `count` is.
///
/// # Safety
///
/// `ptr` must satisfy [`copy_array`] and must have been allocated by the
/// allocator `free` belongs to. It must not be used afterwards.
pub unsafe fn take_native_array<T: Copy>(ptr: *mut T, count: c_int, free: FreeFn) -> Vec<T> {
    let values = copy_array(ptr, count);
    release(ptr.cast(), free);
    values
}

/// Deep-copy a native-allocated pointer array and release the array itself
///
/// Only the outer array is freed; entries are assumed to live inside the
/// same allocation (the SDL convention for mode and format lists).
///
/// # Safety
///
/// Combination of [`deep_copy_pointer_array`] and [`take_native_array`].
pub unsafe fn take_native_pointer_array<T: Copy>(
    ptr: *mut *mut T,
    count: c_int,
    free: FreeFn,
) -> Vec<Option<T>> {
    let values = deep_copy_pointer_array(ptr as *const *const T, count);
    release(ptr.cast(), free);
    values
}

/// Convert each entry of a native-allocated pointer array, then release it
///
/// For arrays whose entries point back into the same allocation (strings
/// included), so `map` must finish with an entry before the free.
///
/// # Safety
///
/// Same as [`take_native_pointer_array`].
pub unsafe fn take_native_pointer_array_with<T, U>(
    ptr: *mut *mut T,
    count: c_int,
    free: FreeFn,
    mut map: impl FnMut(&T) -> U,
) -> Vec<Option<U>> {
    let values = copy_array(ptr as *const *const T, count)
        .into_iter()
        .map(|entry| entry.as_ref().map(&mut map))
        .collect();
    release(ptr.cast(), free);
    values
}

/// Copy a native-allocated buffer of `len` elements and release it
///
/// Takes a `usize` length so buffers past the `int` range are copied whole.
///
/// # Safety
///
/// If `ptr` is non-null it must point to `len` valid `T` allocated by the
/// allocator `free` belongs to.
pub unsafe fn take_native_buffer<T: Copy>(ptr: *mut T, len: usize, free: FreeFn) -> Vec<T> {
    if ptr.is_null() {
        return Vec::new();
    }
    let values = std::slice::from_raw_parts(ptr, len).to_vec();
    release(ptr.cast(), free);
    values
}

/// Copy a native-allocated string and release it
///
/// # Safety
///
/// `ptr` must be null or a NUL-terminated string allocated by the allocator
/// `free` belongs to.
pub unsafe fn take_native_string(ptr: *mut c_char, free: FreeFn) -> String {
    let value = string_from_ptr(ptr);
    release(ptr.cast(), free);
    value
}

unsafe fn release(ptr: *mut c_void, free: FreeFn) {
    if !ptr.is_null() {
        tracing::trace!(ptr = ?ptr, "releasing native buffer");
        free(ptr);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_copy_array_null_is_empty() {
        let values: Vec<u32> = unsafe { copy_array(ptr::null(), 0) };
        assert!(values.is_empty());

        let values: Vec<u32> = unsafe { copy_array(ptr::null(), 5) };
        assert!(values.is_empty());
    }

    #[test]
    fn test_copy_array_negative_count_is_empty() {
        let data = [1u32, 2, 3];
        let values = unsafe { copy_array(data.as_ptr(), -1) };
        assert!(values.is_empty());
    }

    #[test]
    fn test_copy_array_copies() {
        let data = [7i16, -3, 12];
        let values = unsafe { copy_array(data.as_ptr(), 3) };
        assert_eq!(values, vec![7, -3, 12]);
    }

    #[test]
    fn test_deep_copy_keeps_null_entries() {
        let a = 10u64;
        let b = 30u64;
        let entries: [*const u64; 3] = [&a, ptr::null(), &b];

        let values = unsafe { deep_copy_pointer_array(entries.as_ptr(), 3) };
        assert_eq!(values, vec![Some(10), None, Some(30)]);
    }

    #[test]
    fn test_string_from_null_is_empty() {
        assert_eq!(unsafe { string_from_ptr(ptr::null()) }, "");
        assert_eq!(unsafe { opt_string_from_ptr(ptr::null()) }, None);
    }

    #[test]
    fn test_string_from_invalid_utf8_is_lossy() {
        let bytes = b"ab\xffcd\0";
        let value = unsafe { string_from_ptr(bytes.as_ptr().cast()) };
        assert_eq!(value, "ab\u{fffd}cd");
    }

    #[test]
    fn test_strings_from_null_terminated_array() {
        let first = CString::new("x11").unwrap();
        let second = CString::new("wayland").unwrap();
        let array = [first.as_ptr(), second.as_ptr(), ptr::null()];

        let values = unsafe { strings_from_ptr_array(array.as_ptr()) };
        assert_eq!(values, vec!["x11".to_string(), "wayland".to_string()]);
        assert!(unsafe { strings_from_ptr_array(ptr::null()) }.is_empty());
    }

    #[test]
    fn test_strings_from_counted_array() {
        let only = CString::new("a.png").unwrap();
        let array = [only.as_ptr(), ptr::null()];

        let values = unsafe { strings_from_counted_ptr_array(array.as_ptr(), 2) };
        assert_eq!(values, vec!["a.png".to_string(), String::new()]);
    }

    static FREED: AtomicUsize = AtomicUsize::new(0);

    unsafe extern "C" fn counting_free(_ptr: *mut c_void) {
        FREED.fetch_add(1, Ordering::SeqCst);
    }

    #[test]
    fn test_take_native_array_frees_once() {
        let mut data = [4u32, 5, 6];
        let before = FREED.load(Ordering::SeqCst);

        let values = unsafe { take_native_array(data.as_mut_ptr(), 3, counting_free) };
        assert_eq!(values, vec![4, 5, 6]);

        // Non-null but empty still frees
        let empty = unsafe { take_native_array(data.as_mut_ptr(), 0, counting_free) };
        assert!(empty.is_empty());

        // Null never frees
        let none: Vec<u32> = unsafe { take_native_array(ptr::null_mut(), 3, counting_free) };
        assert!(none.is_empty());

        assert_eq!(FREED.load(Ordering::SeqCst) - before, 2);
    }

    static BUFFER_FREED: AtomicUsize = AtomicUsize::new(0);

    unsafe extern "C" fn buffer_free(_ptr: *mut c_void) {
        BUFFER_FREED.fetch_add(1, Ordering::SeqCst);
    }

    #[test]
    fn test_take_native_buffer_copies_full_length() {
        let mut data: Vec<u8> = (0..=255).cycle().take(70_000).collect();
        let values = unsafe { take_native_buffer(data.as_mut_ptr(), data.len(), buffer_free) };
        assert_eq!(values.len(), 70_000);
        assert_eq!(values, data);

        let none: Vec<u8> = unsafe { take_native_buffer(ptr::null_mut(), 10, buffer_free) };
        assert!(none.is_empty());
        assert_eq!(BUFFER_FREED.load(Ordering::SeqCst), 1);
    }

    static MAPPED_FREED: AtomicUsize = AtomicUsize::new(0);

    unsafe extern "C" fn mapped_free(_ptr: *mut c_void) {
        MAPPED_FREED.fetch_add(1, Ordering::SeqCst);
    }

    #[test]
    fn test_pointer_array_mapped_before_release() {
        let mut first = CString::new("en").unwrap().into_raw();
        let mut entries: [*mut *mut c_char; 2] = [&mut first, ptr::null_mut()];

        let values = unsafe {
            take_native_pointer_array_with(entries.as_mut_ptr(), 2, mapped_free, |entry| {
                assert_eq!(MAPPED_FREED.load(Ordering::SeqCst), 0);
                string_from_ptr(*entry)
            })
        };
        assert_eq!(values, vec![Some("en".to_string()), None]);
        assert_eq!(MAPPED_FREED.load(Ordering::SeqCst), 1);

        drop(unsafe { CString::from_raw(first) });
    }

    #[test]
    fn test_marshal_context_keeps_strings() {
        let mut ctx = MarshalContext::new();
        let ptr = ctx.c_str("window title").unwrap();
        assert_eq!(ctx.allocated_count(), 1);
        assert_eq!(unsafe { string_from_ptr(ptr) }, "window title");
    }

    #[test]
    fn test_interior_nul_rejected() {
        let mut ctx = MarshalContext::new();
        let err = ctx.c_str("bad\0name").unwrap_err();
        assert_eq!(
            err,
            MarshalError::InteriorNul {
                value: "bad\0name".to_string(),
                position: 3,
            }
        );
    }

    #[test]
    fn test_bool_encoding() {
        assert_eq!(encode_bool(true), 1);
        assert_eq!(encode_bool(false), 0);
        assert!(decode_bool(1));
        assert!(decode_bool(0xff));
        assert!(!decode_bool(0));
    }

    #[test]
    fn test_len_to_c_int() {
        assert_eq!(len_to_c_int(12).unwrap(), 12);
        assert!(len_to_c_int(usize::MAX).is_err());
    }
}
