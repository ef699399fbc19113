//! Property tests for the pure conversion layer

use proptest::prelude::*;
use sdlbind::ffi::marshal::{self, MarshalError};
use sdlbind::{InitFlags, Keycode, Version, WindowFlags};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Flag sets behave like their underlying bit patterns
    #[test]
    fn flags_follow_bit_algebra(a in any::<u32>(), b in any::<u32>()) {
        let (fa, fb) = (InitFlags::from_bits(a), InitFlags::from_bits(b));
        prop_assert_eq!((fa | fb).bits(), a | b);
        prop_assert_eq!((fa & fb).bits(), a & b);
        prop_assert!((fa | fb).contains(fa));
        prop_assert_eq!(fa.intersects(fb), a & b != 0);
    }

    #[test]
    fn flags_insert_then_remove(a in any::<u64>(), b in any::<u64>()) {
        let mut flags = WindowFlags::from_bits(a);
        flags.insert(WindowFlags::from_bits(b));
        prop_assert!(flags.contains(WindowFlags::from_bits(b)));
        flags.remove(WindowFlags::from_bits(b));
        prop_assert!(!flags.intersects(WindowFlags::from_bits(b)));
        prop_assert_eq!(flags.bits(), a & !b);
    }

    /// Strings without NUL survive the trip through native memory unchanged
    #[test]
    fn c_string_round_trip(value in "[^\u{0}]{0,64}") {
        let native = marshal::to_c_string(&value).unwrap();
        let back = unsafe { marshal::string_from_ptr(native.as_ptr()) };
        prop_assert_eq!(back, value);
    }

    /// Interior NULs are rejected and their position reported
    #[test]
    fn interior_nul_rejected(prefix in "[a-z]{0,16}", suffix in "[a-z]{0,16}") {
        let value = format!("{}\0{}", prefix, suffix);
        match marshal::to_c_string(&value) {
            Err(MarshalError::InteriorNul { position, .. }) => prop_assert_eq!(position, prefix.len()),
            other => prop_assert!(false, "expected InteriorNul, got {:?}", other),
        }
    }

    #[test]
    fn bool_decoding_is_nonzero(byte in any::<u8>()) {
        prop_assert_eq!(marshal::decode_bool(byte), byte != 0);
        prop_assert_eq!(marshal::encode_bool(marshal::decode_bool(byte)), u8::from(byte != 0));
    }

    #[test]
    fn version_unpacks_components(major in 0u32..1000, minor in 0u32..1000, patch in 0u32..1000) {
        let packed = (major * 1_000_000 + minor * 1_000 + patch) as i32;
        let version = Version::from_number(packed);
        prop_assert_eq!((version.major, version.minor, version.patch), (major, minor, patch));
    }

    /// Printable keycodes carry their character; nothing maps into the scancode range
    #[test]
    fn keycode_char_round_trip(c in any::<char>().prop_filter("non-nul", |c| *c != '\0')) {
        let key = Keycode::from_char(c);
        prop_assert!(!key.is_scancode());
        prop_assert_eq!(key.to_char(), Some(c));
    }

    #[test]
    fn length_conversion_bounds(len in any::<usize>()) {
        match marshal::len_to_c_int(len) {
            Ok(count) => prop_assert_eq!(count as usize, len),
            Err(MarshalError::LengthOutOfRange { len: reported }) => {
                prop_assert_eq!(reported, len);
                prop_assert!(len > i32::MAX as usize);
            }
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }
}
