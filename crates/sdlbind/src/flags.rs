//! Bit-flag newtypes over native integer masks
//!
//! [`native_flags!`] declares a `#[repr(transparent)]` wrapper around the
//! native integer so values cross the ABI unchanged, with the set operations
//! the native headers express as macros.

/// Declare a bit-flag newtype
///
/// ```
/// sdlbind::native_flags! {
///     pub struct Access: u8 {
///         const READ = 0x1;
///         const WRITE = 0x2;
///     }
/// }
///
/// let rw = Access::READ | Access::WRITE;
/// assert!(rw.contains(Access::READ));
/// assert_eq!(rw & Access::WRITE, Access::WRITE);
/// assert_eq!(format!("{:?}", rw), "Access(READ | WRITE)");
/// ```
#[macro_export]
macro_rules! native_flags {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident: $bits:ty {
            $(
                $(#[$fmeta:meta])*
                const $flag:ident = $value:expr;
            )*
        }
    ) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name($bits);

        impl $name {
            $(
                $(#[$fmeta])*
                pub const $flag: Self = Self($value);
            )*

            const NAMED: &'static [(&'static str, $bits)] = &[$((stringify!($flag), $value)),*];

            pub const fn empty() -> Self {
                Self(0)
            }

            /// Wrap a raw native mask, unknown bits included
            pub const fn from_bits(bits: $bits) -> Self {
                Self(bits)
            }

            pub const fn bits(self) -> $bits {
                self.0
            }

            pub const fn is_empty(self) -> bool {
                self.0 == 0
            }

            /// Every bit of `other` is set in `self`
            pub const fn contains(self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }

            /// At least one bit of `other` is set in `self`
            pub const fn intersects(self, other: Self) -> bool {
                self.0 & other.0 != 0
            }

            pub fn insert(&mut self, other: Self) {
                self.0 |= other.0;
            }

            pub fn remove(&mut self, other: Self) {
                self.0 &= !other.0;
            }
        }

        impl ::std::ops::BitOr for $name {
            type Output = Self;

            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }

        impl ::std::ops::BitOrAssign for $name {
            fn bitor_assign(&mut self, rhs: Self) {
                self.0 |= rhs.0;
            }
        }

        impl ::std::ops::BitAnd for $name {
            type Output = Self;

            fn bitand(self, rhs: Self) -> Self {
                Self(self.0 & rhs.0)
            }
        }

        impl ::std::ops::BitAndAssign for $name {
            fn bitand_assign(&mut self, rhs: Self) {
                self.0 &= rhs.0;
            }
        }

        impl ::std::ops::Not for $name {
            type Output = Self;

            fn not(self) -> Self {
                Self(!self.0)
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                let mut remaining = self.0;
                let mut parts = Vec::new();
                for (name, value) in Self::NAMED {
                    // Zero-valued and composite names would shadow real bits
                    if *value != 0 && remaining & *value == *value && value.count_ones() == 1 {
                        parts.push((*name).to_string());
                        remaining &= !*value;
                    }
                }
                if remaining != 0 {
                    parts.push(format!("{:#x}", remaining));
                }
                if parts.is_empty() {
                    parts.push("empty".to_string());
                }
                write!(f, "{}({})", stringify!($name), parts.join(" | "))
            }
        }
    };
}
