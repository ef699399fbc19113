//! User locale preferences

use crate::error::Result;
use crate::ffi::marshal;
use crate::sdl::Sdl;
use std::ffi::{c_char, c_int};
use std::fmt;

/// `SDL_Locale`
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawLocale {
    pub language: *const c_char,
    pub country: *const c_char,
}

/// A preferred locale, e.g. `en_US` or just `fr`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    /// ISO-639 language code, such as "en"
    pub language: String,
    /// ISO-3166 country code, such as "US"
    pub country: Option<String>,
}

impl Locale {
    /// # Safety
    ///
    /// Both pointers must be null or valid NUL-terminated strings.
    unsafe fn from_raw(raw: &RawLocale) -> Self {
        Self {
            language: marshal::string_from_ptr(raw.language),
            country: marshal::opt_string_from_ptr(raw.country),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.country {
            Some(country) => write!(f, "{}_{}", self.language, country),
            None => f.write_str(&self.language),
        }
    }
}

impl Sdl {
    /// The user's preferred locales, most wanted first
    ///
    /// May be empty when the platform reports nothing. The list is a
    /// snapshot; watch for `LOCALE_CHANGED` events to refresh it.
    pub fn preferred_locales(&self) -> Result<Vec<Locale>> {
        let mut count: c_int = 0;
        let list = unsafe { (self.api().SDL_GetPreferredLocales)(&mut count) };
        // The strings live in the same allocation as the array.
        let locales = self.take_pointer_list_with(list, count, |raw| unsafe { Locale::from_raw(raw) })?;
        Ok(locales.into_iter().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn test_locale_from_raw() {
        let raw = RawLocale {
            language: c"de".as_ptr(),
            country: c"AT".as_ptr(),
        };
        let locale = unsafe { Locale::from_raw(&raw) };
        assert_eq!(locale.language, "de");
        assert_eq!(locale.country.as_deref(), Some("AT"));
        assert_eq!(locale.to_string(), "de_AT");
    }

    #[test]
    fn test_locale_without_country() {
        let raw = RawLocale {
            language: c"fr".as_ptr(),
            country: ptr::null(),
        };
        let locale = unsafe { Locale::from_raw(&raw) };
        assert_eq!(locale.country, None);
        assert_eq!(locale.to_string(), "fr");
    }
}
