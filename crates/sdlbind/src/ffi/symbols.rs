//! Symbol tables
//!
//! A symbol table is a plain struct of typed `unsafe extern "C"` function
//! pointers, one per exported symbol, declared with [`native_api!`]. Tables
//! are resolved eagerly: either every symbol is found and the table exists,
//! or construction fails with the first missing name.
//!
//! Where the pointers come from is abstracted by [`SymbolSource`]. A shared
//! library opened through `libloading` is one source; a [`StaticSymbols`]
//! map of function pointers (a statically linked build, or a test stub) is
//! another.

use crate::ffi::loader::LoadError;
use std::collections::HashMap;
use std::ffi::c_void;
use std::ptr::NonNull;

/// Something symbols can be looked up in
pub trait SymbolSource: Send + Sync {
    /// Name used in errors and logs
    fn name(&self) -> &str;

    /// Address of `symbol`, or `None` if it is not exported
    fn resolve(&self, symbol: &str) -> Option<NonNull<c_void>>;
}

/// A symbol source backed by an in-process table of function pointers
///
/// Addresses are stored as integers so the table is `Send + Sync`.
#[derive(Debug, Clone, Default)]
pub struct StaticSymbols {
    name: String,
    symbols: HashMap<String, usize>,
    fallback: Option<usize>,
}

impl StaticSymbols {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbols: HashMap::new(),
            fallback: None,
        }
    }

    /// Register `symbol` at `address`
    ///
    /// Null addresses are ignored, so the symbol stays unresolved.
    pub fn with(mut self, symbol: impl Into<String>, address: *const ()) -> Self {
        self.insert(symbol, address);
        self
    }

    pub fn insert(&mut self, symbol: impl Into<String>, address: *const ()) {
        if !address.is_null() {
            self.symbols.insert(symbol.into(), address as usize);
        }
    }

    /// Address handed out for every symbol not registered explicitly
    ///
    /// Lets a partial table stand in for a full library. Calling a symbol
    /// served by the fallback through a different signature than the
    /// fallback's own is undefined behaviour; only use it for symbols that
    /// are never invoked.
    pub fn with_fallback(mut self, address: *const ()) -> Self {
        self.fallback = (!address.is_null()).then_some(address as usize);
        self
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl SymbolSource for StaticSymbols {
    fn name(&self) -> &str {
        &self.name
    }

    fn resolve(&self, symbol: &str) -> Option<NonNull<c_void>> {
        let address = self.symbols.get(symbol).copied().or(self.fallback)?;
        NonNull::new(address as *mut c_void)
    }
}

/// Resolve `symbol` in `source` as a function pointer of type `F`
///
/// # Safety
///
/// `F` must be a function pointer type whose signature matches the native
/// definition of `symbol`.
pub unsafe fn resolve_fn<F: Copy>(source: &dyn SymbolSource, symbol: &str) -> Result<F, LoadError> {
    debug_assert_eq!(
        std::mem::size_of::<F>(),
        std::mem::size_of::<*mut c_void>(),
        "resolve_fn target must be a function pointer"
    );

    let address = source.resolve(symbol).ok_or_else(|| {
        tracing::error!(library = source.name(), symbol, "symbol not found");
        LoadError::SymbolNotFound {
            library: source.name().to_string(),
            symbol: symbol.to_string(),
        }
    })?;

    Ok(std::mem::transmute_copy::<*mut c_void, F>(&address.as_ptr()))
}

#[doc(hidden)]
pub fn log_resolved(source: &dyn SymbolSource, table: &str, count: usize) {
    tracing::debug!(library = source.name(), table, symbols = count, "symbol table resolved");
}

/// Declare a symbol table
///
/// ```
/// use std::ffi::{c_char, c_int};
///
/// sdlbind::native_api! {
///     /// libc subset
///     pub struct LibcApi {
///         fn strlen(*const c_char) -> usize;
///         fn abs(c_int) -> c_int;
///     }
///     variadic {
///         fn printf(*const c_char) -> c_int;
///     }
/// }
///
/// assert_eq!(LibcApi::SYMBOL_COUNT, 3);
/// ```
///
/// Each `fn` line becomes a field named after the symbol, typed
/// `unsafe extern "C" fn(..)`. Lines in the optional `variadic` block get a
/// trailing `...` in their signature.
#[macro_export]
macro_rules! native_api {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                fn $sym:ident ( $($arg:ty),* $(,)? ) $(-> $ret:ty)? ;
            )*
        }
        $(
            variadic {
                $(
                    $(#[$vmeta:meta])*
                    fn $vsym:ident ( $($varg:ty),* $(,)? ) $(-> $vret:ty)? ;
                )*
            }
        )?
    ) => {
        $(#[$meta])*
        #[allow(non_snake_case)]
        #[derive(Clone, Copy)]
        $vis struct $name {
            $(
                $(#[$fmeta])*
                pub $sym: unsafe extern "C" fn($($arg),*) $(-> $ret)?,
            )*
            $($(
                $(#[$vmeta])*
                pub $vsym: unsafe extern "C" fn($($varg,)* ...) $(-> $vret)?,
            )*)?
        }

        impl $name {
            /// Number of symbols in this table
            pub const SYMBOL_COUNT: usize =
                [$(stringify!($sym),)* $($(stringify!($vsym),)*)?].len();

            /// Resolve every symbol of the table from `source`
            pub fn resolve(
                source: &dyn $crate::ffi::SymbolSource,
            ) -> ::std::result::Result<Self, $crate::ffi::LoadError> {
                // Safety: each field's type is the declared C signature of
                // the symbol it is named after.
                let table = unsafe {
                    Self {
                        $(
                            $sym: $crate::ffi::symbols::resolve_fn(source, stringify!($sym))?,
                        )*
                        $($(
                            $vsym: $crate::ffi::symbols::resolve_fn(source, stringify!($vsym))?,
                        )*)?
                    }
                };
                $crate::ffi::symbols::log_resolved(source, stringify!($name), Self::SYMBOL_COUNT);
                Ok(table)
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("symbols", &Self::SYMBOL_COUNT)
                    .finish()
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::c_int;

    extern "C" fn double_it(x: c_int) -> c_int {
        x * 2
    }

    extern "C" fn negate(x: c_int) -> c_int {
        -x
    }

    crate::native_api! {
        struct TinyApi {
            fn double_it(c_int) -> c_int;
            fn negate(c_int) -> c_int;
        }
    }

    #[test]
    fn test_symbol_count() {
        assert_eq!(TinyApi::SYMBOL_COUNT, 2);
    }

    #[test]
    fn test_resolve_and_call() {
        let source = StaticSymbols::new("tiny")
            .with("double_it", double_it as *const ())
            .with("negate", negate as *const ());

        let api = TinyApi::resolve(&source).unwrap();
        unsafe {
            assert_eq!((api.double_it)(21), 42);
            assert_eq!((api.negate)(5), -5);
        }
    }

    #[test]
    fn test_missing_symbol_fails_whole_table() {
        let source = StaticSymbols::new("tiny").with("double_it", double_it as *const ());

        let err = TinyApi::resolve(&source).unwrap_err();
        assert_eq!(
            err,
            LoadError::SymbolNotFound {
                library: "tiny".to_string(),
                symbol: "negate".to_string(),
            }
        );
    }

    #[test]
    fn test_fallback_serves_unknown_symbols() {
        let source = StaticSymbols::new("tiny")
            .with("double_it", double_it as *const ())
            .with_fallback(negate as *const ());

        assert!(source.resolve("anything").is_some());
        let api = TinyApi::resolve(&source).unwrap();
        assert_eq!(unsafe { (api.negate)(3) }, -3);
    }

    #[test]
    fn test_null_address_ignored() {
        let source = StaticSymbols::new("tiny").with("double_it", std::ptr::null());
        assert!(source.is_empty());
        assert!(source.resolve("double_it").is_none());
    }
}
