//! Property sets
//!
//! A property set is a native id. [`Properties`] owns one it created and
//! destroys it on drop; [`PropertiesRef`] names a set owned elsewhere (the
//! global set, or the set attached to a window or camera).

use crate::error::Result;
use crate::ffi::callbacks::{self, CallbackHandle};
use crate::ffi::marshal::{self, MarshalContext};
use crate::sdl::Sdl;
use crate::sys::{SDL_CleanupPropertyCallback, SDL_EnumeratePropertiesCallback, SDL_PropertiesID};
use std::ffi::c_void;
use std::fmt;
use std::ops::Deref;
use std::ptr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    Invalid,
    Pointer,
    String,
    Number,
    Float,
    Boolean,
}

impl PropertyType {
    fn from_raw(value: i32) -> Self {
        match value {
            1 => Self::Pointer,
            2 => Self::String,
            3 => Self::Number,
            4 => Self::Float,
            5 => Self::Boolean,
            _ => Self::Invalid,
        }
    }
}

/// A property set this handle does not own
#[derive(Clone)]
pub struct PropertiesRef {
    sdl: Sdl,
    id: SDL_PropertiesID,
}

impl PropertiesRef {
    pub fn id(&self) -> SDL_PropertiesID {
        self.id
    }

    pub fn set_pointer(&self, name: &str, value: *mut c_void) -> Result<()> {
        let mut ctx = MarshalContext::new();
        let name = ctx.c_str(name)?;
        self.sdl.check(unsafe { (self.sdl.api().SDL_SetPointerProperty)(self.id, name, value) })
    }

    /// Store a pointer together with the code that releases it
    ///
    /// `cleanup` runs exactly once: when the property is replaced or cleared,
    /// when the set is destroyed, or immediately if storing fails.
    pub fn set_pointer_with_cleanup<F>(&self, name: &str, value: *mut c_void, cleanup: F) -> Result<()>
    where
        F: FnOnce(*mut c_void) + Send + 'static,
    {
        let mut ctx = MarshalContext::new();
        let name = ctx.c_str(name)?;
        let trampoline: SDL_CleanupPropertyCallback = callbacks::property_cleanup::<F>;
        let userdata = CallbackHandle::new(Some(cleanup)).into_raw();
        self.sdl.check(unsafe {
            (self.sdl.api().SDL_SetPointerPropertyWithCleanup)(self.id, name, value, Some(trampoline), userdata)
        })
    }

    pub fn set_string(&self, name: &str, value: Option<&str>) -> Result<()> {
        let mut ctx = MarshalContext::new();
        let name = ctx.c_str(name)?;
        let value = ctx.c_str_or_null(value)?;
        self.sdl.check(unsafe { (self.sdl.api().SDL_SetStringProperty)(self.id, name, value) })
    }

    pub fn set_number(&self, name: &str, value: i64) -> Result<()> {
        let mut ctx = MarshalContext::new();
        let name = ctx.c_str(name)?;
        self.sdl.check(unsafe { (self.sdl.api().SDL_SetNumberProperty)(self.id, name, value) })
    }

    pub fn set_float(&self, name: &str, value: f32) -> Result<()> {
        let mut ctx = MarshalContext::new();
        let name = ctx.c_str(name)?;
        self.sdl.check(unsafe { (self.sdl.api().SDL_SetFloatProperty)(self.id, name, value) })
    }

    pub fn set_boolean(&self, name: &str, value: bool) -> Result<()> {
        let mut ctx = MarshalContext::new();
        let name = ctx.c_str(name)?;
        self.sdl
            .check(unsafe { (self.sdl.api().SDL_SetBooleanProperty)(self.id, name, marshal::encode_bool(value)) })
    }

    pub fn has(&self, name: &str) -> Result<bool> {
        let mut ctx = MarshalContext::new();
        let name = ctx.c_str(name)?;
        Ok(marshal::decode_bool(unsafe { (self.sdl.api().SDL_HasProperty)(self.id, name) }))
    }

    pub fn property_type(&self, name: &str) -> Result<PropertyType> {
        let mut ctx = MarshalContext::new();
        let name = ctx.c_str(name)?;
        Ok(PropertyType::from_raw(unsafe { (self.sdl.api().SDL_GetPropertyType)(self.id, name) }))
    }

    /// Stored pointer, null when absent
    pub fn get_pointer(&self, name: &str) -> Result<*mut c_void> {
        let mut ctx = MarshalContext::new();
        let name = ctx.c_str(name)?;
        Ok(unsafe { (self.sdl.api().SDL_GetPointerProperty)(self.id, name, ptr::null_mut()) })
    }

    /// Copy of a string property, `None` when absent
    ///
    /// The native value is only stable while no other thread modifies the
    /// set; hold a [`PropertiesLock`] when sharing it.
    pub fn get_string(&self, name: &str) -> Result<Option<String>> {
        let mut ctx = MarshalContext::new();
        let name = ctx.c_str(name)?;
        Ok(unsafe { marshal::opt_string_from_ptr((self.sdl.api().SDL_GetStringProperty)(self.id, name, ptr::null())) })
    }

    pub fn get_number(&self, name: &str, default: i64) -> Result<i64> {
        let mut ctx = MarshalContext::new();
        let name = ctx.c_str(name)?;
        Ok(unsafe { (self.sdl.api().SDL_GetNumberProperty)(self.id, name, default) })
    }

    pub fn get_float(&self, name: &str, default: f32) -> Result<f32> {
        let mut ctx = MarshalContext::new();
        let name = ctx.c_str(name)?;
        Ok(unsafe { (self.sdl.api().SDL_GetFloatProperty)(self.id, name, default) })
    }

    pub fn get_boolean(&self, name: &str, default: bool) -> Result<bool> {
        let mut ctx = MarshalContext::new();
        let name = ctx.c_str(name)?;
        let value = unsafe { (self.sdl.api().SDL_GetBooleanProperty)(self.id, name, marshal::encode_bool(default)) };
        Ok(marshal::decode_bool(value))
    }

    pub fn clear(&self, name: &str) -> Result<()> {
        let mut ctx = MarshalContext::new();
        let name = ctx.c_str(name)?;
        self.sdl.check(unsafe { (self.sdl.api().SDL_ClearProperty)(self.id, name) })
    }

    /// Names of every property in the set
    pub fn names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        self.enumerate(|name| names.push(name.to_string()))?;
        Ok(names)
    }

    /// Visit each property name; runs synchronously on this thread
    pub fn enumerate<F>(&self, mut visit: F) -> Result<()>
    where
        F: FnMut(&str),
    {
        let trampoline: SDL_EnumeratePropertiesCallback = callbacks::enumerate_properties::<F>;
        let userdata = (&mut visit as *mut F).cast::<c_void>();
        self.sdl
            .check(unsafe { (self.sdl.api().SDL_EnumerateProperties)(self.id, Some(trampoline), userdata) })
    }

    /// Copy every property (except those with cleanup) into `dst`
    pub fn copy_to(&self, dst: &PropertiesRef) -> Result<()> {
        self.sdl.check(unsafe { (self.sdl.api().SDL_CopyProperties)(self.id, dst.id) })
    }

    /// Hold the set's lock until the guard drops
    pub fn lock(&self) -> Result<PropertiesLock<'_>> {
        self.sdl.check(unsafe { (self.sdl.api().SDL_LockProperties)(self.id) })?;
        Ok(PropertiesLock { props: self })
    }
}

impl fmt::Debug for PropertiesRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PropertiesRef").field(&self.id).finish()
    }
}

/// An owned property set
pub struct Properties {
    inner: PropertiesRef,
}

impl Deref for Properties {
    type Target = PropertiesRef;

    fn deref(&self) -> &PropertiesRef {
        &self.inner
    }
}

impl Drop for Properties {
    fn drop(&mut self) {
        unsafe { (self.inner.sdl.api().SDL_DestroyProperties)(self.inner.id) }
    }
}

impl fmt::Debug for Properties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Properties").field(&self.inner.id).finish()
    }
}

/// Lock on a property set
#[must_use = "the lock is released when the guard is dropped"]
pub struct PropertiesLock<'a> {
    props: &'a PropertiesRef,
}

impl Drop for PropertiesLock<'_> {
    fn drop(&mut self) {
        unsafe { (self.props.sdl.api().SDL_UnlockProperties)(self.props.id) }
    }
}

impl fmt::Debug for PropertiesLock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PropertiesLock").field(&self.props.id).finish()
    }
}

impl Sdl {
    pub fn global_properties(&self) -> Result<PropertiesRef> {
        let id = unsafe { (self.api().SDL_GetGlobalProperties)() };
        self.borrowed_properties(id)
    }

    pub fn create_properties(&self) -> Result<Properties> {
        match unsafe { (self.api().SDL_CreateProperties)() } {
            0 => Err(self.last_error()),
            id => Ok(Properties {
                inner: PropertiesRef { sdl: self.clone(), id },
            }),
        }
    }

    /// Wrap a set owned by another object; `0` is the failure id
    pub(crate) fn borrowed_properties(&self, id: SDL_PropertiesID) -> Result<PropertiesRef> {
        if id == 0 {
            return Err(self.last_error());
        }
        Ok(PropertiesRef { sdl: self.clone(), id })
    }
}
