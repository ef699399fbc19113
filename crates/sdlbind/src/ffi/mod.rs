//! Foreign Function Interface (FFI) infrastructure
//!
//! Everything that touches the native ABI directly lives here:
//! - Dynamic library loading (`loader`)
//! - Symbol tables resolved into typed function pointers (`symbols`)
//! - Conversions between native memory and owned Rust values (`marshal`)
//! - Trampolines that let native code call Rust closures (`callbacks`)
//!
//! # Safety
//!
//! FFI operations involve `unsafe` code and careful memory management.
//! The domain modules of this crate build safe wrappers on top of these
//! primitives.

pub mod callbacks;
pub mod loader;
pub mod marshal;
pub mod symbols;

pub use callbacks::CallbackHandle;
pub use loader::{LibraryLoader, LoadError, NativeLibrary};
pub use marshal::{MarshalContext, MarshalError};
pub use symbols::{StaticSymbols, SymbolSource};
