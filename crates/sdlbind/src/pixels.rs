//! Pixel formats, colours, palettes and blend modes

use crate::error::Result;
use crate::ffi::marshal;
use crate::sdl::Sdl;
use crate::sys::SDL_Palette;
use std::ffi::c_int;
use std::fmt;
use std::ptr::{self, NonNull};

pub const ALPHA_OPAQUE: u8 = 255;
pub const ALPHA_TRANSPARENT: u8 = 0;

/// Packed `SDL_PixelFormat` value
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelFormat(pub u32);

/// Pack four bytes into a FourCC code, first byte lowest
pub const fn fourcc(a: u8, b: u8, c: u8, d: u8) -> u32 {
    (a as u32) | (b as u32) << 8 | (c as u32) << 16 | (d as u32) << 24
}

/// Build a non-FourCC format from its components
///
/// `order` is a bitmap, packed or array order depending on `pixel_type`.
pub const fn define_pixel_format(pixel_type: u32, order: u32, layout: u32, bits: u8, bytes: u8) -> PixelFormat {
    PixelFormat(1 << 28 | pixel_type << 24 | order << 20 | layout << 16 | (bits as u32) << 8 | bytes as u32)
}

pub mod pixel_type {
    pub const UNKNOWN: u32 = 0;
    pub const INDEX1: u32 = 1;
    pub const INDEX4: u32 = 2;
    pub const INDEX8: u32 = 3;
    pub const PACKED8: u32 = 4;
    pub const PACKED16: u32 = 5;
    pub const PACKED32: u32 = 6;
    pub const ARRAYU8: u32 = 7;
    pub const ARRAYU16: u32 = 8;
    pub const ARRAYU32: u32 = 9;
    pub const ARRAYF16: u32 = 10;
    pub const ARRAYF32: u32 = 11;
    pub const INDEX2: u32 = 12;
}

/// Packed component order, high bit to low bit
pub mod packed_order {
    pub const NONE: u32 = 0;
    pub const XRGB: u32 = 1;
    pub const RGBX: u32 = 2;
    pub const ARGB: u32 = 3;
    pub const RGBA: u32 = 4;
    pub const XBGR: u32 = 5;
    pub const BGRX: u32 = 6;
    pub const ABGR: u32 = 7;
    pub const BGRA: u32 = 8;
}

pub mod packed_layout {
    pub const NONE: u32 = 0;
    pub const L332: u32 = 1;
    pub const L4444: u32 = 2;
    pub const L1555: u32 = 3;
    pub const L5551: u32 = 4;
    pub const L565: u32 = 5;
    pub const L8888: u32 = 6;
    pub const L2101010: u32 = 7;
    pub const L1010102: u32 = 8;
}

macro_rules! pixel_formats {
    ($($name:ident = $value:expr,)*) => {
        impl PixelFormat {
            $(pub const $name: Self = Self($value);)*

            fn known_name(self) -> Option<&'static str> {
                match self.0 {
                    $($value => Some(stringify!($name)),)*
                    _ => None,
                }
            }
        }
    };
}

pixel_formats! {
    UNKNOWN = 0,
    INDEX1LSB = 0x1110_0100,
    INDEX1MSB = 0x1120_0100,
    INDEX2LSB = 0x1C10_0200,
    INDEX2MSB = 0x1C20_0200,
    INDEX4LSB = 0x1210_0400,
    INDEX4MSB = 0x1220_0400,
    INDEX8 = 0x1300_0801,
    RGB332 = 0x1411_0801,
    XRGB4444 = 0x1512_0C02,
    XBGR4444 = 0x1552_0C02,
    XRGB1555 = 0x1513_0F02,
    XBGR1555 = 0x1553_0F02,
    ARGB4444 = 0x1532_1002,
    RGBA4444 = 0x1542_1002,
    ABGR4444 = 0x1572_1002,
    BGRA4444 = 0x1582_1002,
    ARGB1555 = 0x1533_1002,
    RGBA5551 = 0x1544_1002,
    ABGR1555 = 0x1573_1002,
    BGRA5551 = 0x1584_1002,
    RGB565 = 0x1515_1002,
    BGR565 = 0x1555_1002,
    RGB24 = 0x1710_1803,
    BGR24 = 0x1740_1803,
    XRGB8888 = 0x1616_1804,
    RGBX8888 = 0x1626_1804,
    XBGR8888 = 0x1656_1804,
    BGRX8888 = 0x1666_1804,
    ARGB8888 = 0x1636_2004,
    RGBA8888 = 0x1646_2004,
    ABGR8888 = 0x1676_2004,
    BGRA8888 = 0x1686_2004,
    XRGB2101010 = 0x1617_2004,
    XBGR2101010 = 0x1657_2004,
    ARGB2101010 = 0x1637_2004,
    ABGR2101010 = 0x1677_2004,
    RGB48 = 0x1810_3006,
    BGR48 = 0x1840_3006,
    RGBA64 = 0x1820_4008,
    ARGB64 = 0x1830_4008,
    BGRA64 = 0x1850_4008,
    ABGR64 = 0x1860_4008,
    RGB48_FLOAT = 0x1A10_3006,
    BGR48_FLOAT = 0x1A40_3006,
    RGBA64_FLOAT = 0x1A20_4008,
    ARGB64_FLOAT = 0x1A30_4008,
    BGRA64_FLOAT = 0x1A50_4008,
    ABGR64_FLOAT = 0x1A60_4008,
    RGB96_FLOAT = 0x1B10_600C,
    BGR96_FLOAT = 0x1B40_600C,
    RGBA128_FLOAT = 0x1B20_8010,
    ARGB128_FLOAT = 0x1B30_8010,
    BGRA128_FLOAT = 0x1B50_8010,
    ABGR128_FLOAT = 0x1B60_8010,
    YV12 = 0x3231_5659,
    IYUV = 0x5655_5949,
    YUY2 = 0x3259_5559,
    UYVY = 0x5956_5955,
    YVYU = 0x5559_5659,
    NV12 = 0x3231_564E,
    NV21 = 0x3132_564E,
    P010 = 0x3031_3050,
    EXTERNAL_OES = 0x2053_454F,
}

impl PixelFormat {
    /// Byte-order aliases: `RGBA32` is bytes R, G, B, A in memory
    #[cfg(target_endian = "little")]
    pub const RGBA32: Self = Self::ABGR8888;
    #[cfg(target_endian = "little")]
    pub const ARGB32: Self = Self::BGRA8888;
    #[cfg(target_endian = "little")]
    pub const BGRA32: Self = Self::ARGB8888;
    #[cfg(target_endian = "little")]
    pub const ABGR32: Self = Self::RGBA8888;
    #[cfg(target_endian = "big")]
    pub const RGBA32: Self = Self::RGBA8888;
    #[cfg(target_endian = "big")]
    pub const ARGB32: Self = Self::ARGB8888;
    #[cfg(target_endian = "big")]
    pub const BGRA32: Self = Self::BGRA8888;
    #[cfg(target_endian = "big")]
    pub const ABGR32: Self = Self::ABGR8888;

    pub const fn from_fourcc(a: u8, b: u8, c: u8, d: u8) -> Self {
        Self(fourcc(a, b, c, d))
    }

    pub const fn is_fourcc(self) -> bool {
        self.0 != 0 && (self.0 >> 28) & 0x0F != 1
    }

    pub const fn pixel_type(self) -> u32 {
        (self.0 >> 24) & 0x0F
    }

    pub const fn order(self) -> u32 {
        (self.0 >> 20) & 0x0F
    }

    pub const fn layout(self) -> u32 {
        (self.0 >> 16) & 0x0F
    }

    pub const fn bits_per_pixel(self) -> u8 {
        if self.is_fourcc() {
            0
        } else {
            ((self.0 >> 8) & 0xFF) as u8
        }
    }

    /// Bytes per pixel; FourCC formats report the luma plane size
    pub const fn bytes_per_pixel(self) -> u8 {
        if self.is_fourcc() {
            match self.0 {
                0x3259_5559 | 0x5956_5955 | 0x5559_5659 | 0x3031_3050 => 2,
                _ => 1,
            }
        } else {
            (self.0 & 0xFF) as u8
        }
    }

    pub const fn is_indexed(self) -> bool {
        !self.is_fourcc()
            && matches!(
                self.pixel_type(),
                pixel_type::INDEX1 | pixel_type::INDEX2 | pixel_type::INDEX4 | pixel_type::INDEX8
            )
    }

    pub const fn has_alpha(self) -> bool {
        let packed = matches!(
            self.pixel_type(),
            pixel_type::PACKED8 | pixel_type::PACKED16 | pixel_type::PACKED32
        );
        !self.is_fourcc()
            && packed
            && matches!(
                self.order(),
                packed_order::ARGB | packed_order::RGBA | packed_order::ABGR | packed_order::BGRA
            )
    }
}

impl fmt::Debug for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.known_name() {
            Some(name) => write!(f, "PixelFormat::{}", name),
            None => write!(f, "PixelFormat({:#010x})", self.0),
        }
    }
}

/// Packed `SDL_Colorspace` value
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colorspace(pub u32);

impl Colorspace {
    pub const UNKNOWN: Self = Self(0);
    pub const SRGB: Self = Self(0x1200_05A0);
    pub const SRGB_LINEAR: Self = Self(0x1200_0500);
    pub const HDR10: Self = Self(0x1200_2600);
    pub const JPEG: Self = Self(0x2200_04C6);
    pub const BT601_LIMITED: Self = Self(0x2110_18C6);
    pub const BT601_FULL: Self = Self(0x2210_18C6);
    pub const BT709_LIMITED: Self = Self(0x2110_0421);
    pub const BT709_FULL: Self = Self(0x2210_0421);
    pub const BT2020_LIMITED: Self = Self(0x2110_2609);
    pub const BT2020_FULL: Self = Self(0x2210_2609);
    pub const RGB_DEFAULT: Self = Self::SRGB;
    pub const YUV_DEFAULT: Self = Self::BT601_LIMITED;
}

/// `SDL_BlendMode` value
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlendMode(pub u32);

impl BlendMode {
    pub const NONE: Self = Self(0x0000_0000);
    pub const BLEND: Self = Self(0x0000_0001);
    pub const ADD: Self = Self(0x0000_0002);
    pub const MOD: Self = Self(0x0000_0004);
    pub const MUL: Self = Self(0x0000_0008);
    pub const BLEND_PREMULTIPLIED: Self = Self(0x0000_0010);
    pub const ADD_PREMULTIPLIED: Self = Self(0x0000_0020);
    pub const INVALID: Self = Self(0x7FFF_FFFF);
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, ALPHA_OPAQUE)
    }
}

/// Colour with float components, normally `0.0..=1.0`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl From<Color> for FColor {
    fn from(c: Color) -> Self {
        Self {
            r: f32::from(c.r) / 255.0,
            g: f32::from(c.g) / 255.0,
            b: f32::from(c.b) / 255.0,
            a: f32::from(c.a) / 255.0,
        }
    }
}

/// `SDL_PixelFormatDetails`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelFormatDetails {
    pub format: PixelFormat,
    pub bits_per_pixel: u8,
    pub bytes_per_pixel: u8,
    pub padding: [u8; 2],
    pub rmask: u32,
    pub gmask: u32,
    pub bmask: u32,
    pub amask: u32,
    pub rbits: u8,
    pub gbits: u8,
    pub bbits: u8,
    pub abits: u8,
    pub rshift: u8,
    pub gshift: u8,
    pub bshift: u8,
    pub ashift: u8,
}

/// Channel masks of a format, as returned by [`Sdl::masks_for_pixel_format`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelMasks {
    pub bpp: i32,
    pub rmask: u32,
    pub gmask: u32,
    pub bmask: u32,
    pub amask: u32,
}

/// Owned colour palette
pub struct Palette {
    sdl: Sdl,
    raw: NonNull<SDL_Palette>,
}

impl Palette {
    pub fn len(&self) -> usize {
        usize::try_from(unsafe { self.raw.as_ref().ncolors }).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the current entries
    pub fn colors(&self) -> Vec<Color> {
        let raw = unsafe { self.raw.as_ref() };
        unsafe { marshal::copy_array(raw.colors, raw.ncolors) }
    }

    /// Overwrite entries starting at `first`
    pub fn set_colors(&mut self, colors: &[Color], first: usize) -> Result<()> {
        let count = marshal::len_to_c_int(colors.len())?;
        let first = marshal::len_to_c_int(first)?;
        self.sdl
            .check(unsafe { (self.sdl.api().SDL_SetPaletteColors)(self.raw.as_ptr(), colors.as_ptr(), first, count) })
    }

    pub fn as_ptr(&self) -> *mut SDL_Palette {
        self.raw.as_ptr()
    }
}

impl Drop for Palette {
    fn drop(&mut self) {
        unsafe { (self.sdl.api().SDL_DestroyPalette)(self.raw.as_ptr()) }
    }
}

impl fmt::Debug for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Palette").field("len", &self.len()).finish()
    }
}

fn palette_ptr(palette: Option<&Palette>) -> *const SDL_Palette {
    palette.map_or(ptr::null(), |p| p.raw.as_ptr().cast_const())
}

impl Sdl {
    /// Human-readable format name, `SDL_PIXELFORMAT_UNKNOWN` if unrecognised
    pub fn pixel_format_name(&self, format: PixelFormat) -> String {
        unsafe { marshal::string_from_ptr((self.api().SDL_GetPixelFormatName)(format.0)) }
    }

    /// Copy of the library's cached details for `format`
    pub fn pixel_format_details(&self, format: PixelFormat) -> Result<PixelFormatDetails> {
        let details = self.check_const_ptr(unsafe { (self.api().SDL_GetPixelFormatDetails)(format.0) })?;
        Ok(unsafe { *details })
    }

    pub fn masks_for_pixel_format(&self, format: PixelFormat) -> Result<PixelMasks> {
        let mut m = PixelMasks::default();
        let mut bpp: c_int = 0;
        self.check(unsafe {
            (self.api().SDL_GetMasksForPixelFormat)(format.0, &mut bpp, &mut m.rmask, &mut m.gmask, &mut m.bmask, &mut m.amask)
        })?;
        m.bpp = bpp;
        Ok(m)
    }

    /// Format matching the masks, [`PixelFormat::UNKNOWN`] if none does
    pub fn pixel_format_for_masks(&self, masks: &PixelMasks) -> PixelFormat {
        PixelFormat(unsafe {
            (self.api().SDL_GetPixelFormatForMasks)(masks.bpp, masks.rmask, masks.gmask, masks.bmask, masks.amask)
        })
    }

    pub fn map_rgb(&self, details: &PixelFormatDetails, palette: Option<&Palette>, r: u8, g: u8, b: u8) -> u32 {
        unsafe { (self.api().SDL_MapRGB)(details, palette_ptr(palette), r, g, b) }
    }

    pub fn map_rgba(&self, details: &PixelFormatDetails, palette: Option<&Palette>, color: Color) -> u32 {
        unsafe { (self.api().SDL_MapRGBA)(details, palette_ptr(palette), color.r, color.g, color.b, color.a) }
    }

    /// Decode a pixel value into its components
    pub fn get_rgba(&self, pixel: u32, details: &PixelFormatDetails, palette: Option<&Palette>) -> Color {
        let mut c = Color::default();
        unsafe { (self.api().SDL_GetRGBA)(pixel, details, palette_ptr(palette), &mut c.r, &mut c.g, &mut c.b, &mut c.a) };
        c
    }

    /// New palette with `ncolors` white entries
    pub fn create_palette(&self, ncolors: usize) -> Result<Palette> {
        let count = marshal::len_to_c_int(ncolors)?;
        let raw = self.check_ptr(unsafe { (self.api().SDL_CreatePalette)(count) })?;
        Ok(Palette { sdl: self.clone(), raw })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::mem::{offset_of, size_of};

    #[test]
    fn test_define_matches_constants() {
        let rgba8888 = define_pixel_format(pixel_type::PACKED32, packed_order::RGBA, packed_layout::L8888, 32, 4);
        assert_eq!(rgba8888, PixelFormat::RGBA8888);

        let rgb565 = define_pixel_format(pixel_type::PACKED16, packed_order::XRGB, packed_layout::L565, 16, 2);
        assert_eq!(rgb565, PixelFormat::RGB565);
    }

    #[test]
    fn test_fourcc_constants() {
        assert_eq!(PixelFormat::from_fourcc(b'Y', b'V', b'1', b'2'), PixelFormat::YV12);
        assert_eq!(PixelFormat::from_fourcc(b'N', b'V', b'1', b'2'), PixelFormat::NV12);
        assert!(PixelFormat::NV12.is_fourcc());
        assert!(!PixelFormat::RGBA8888.is_fourcc());
    }

    #[rstest]
    #[case(PixelFormat::ARGB8888, 32, 4, true)]
    #[case(PixelFormat::XRGB8888, 24, 4, false)]
    #[case(PixelFormat::RGB24, 24, 3, false)]
    #[case(PixelFormat::RGBA5551, 16, 2, true)]
    #[case(PixelFormat::YUY2, 0, 2, false)]
    fn test_format_accessors(#[case] format: PixelFormat, #[case] bits: u8, #[case] bytes: u8, #[case] alpha: bool) {
        assert_eq!(format.bits_per_pixel(), bits);
        assert_eq!(format.bytes_per_pixel(), bytes);
        assert_eq!(format.has_alpha(), alpha);
    }

    #[test]
    fn test_indexed() {
        assert!(PixelFormat::INDEX8.is_indexed());
        assert!(PixelFormat::INDEX2MSB.is_indexed());
        assert!(!PixelFormat::RGB332.is_indexed());
    }

    #[test]
    fn test_debug_names() {
        assert_eq!(format!("{:?}", PixelFormat::RGBA32), format!("{:?}", PixelFormat::ABGR8888));
        assert_eq!(format!("{:?}", PixelFormat(0x1234)), "PixelFormat(0x00001234)");
    }

    #[test]
    fn test_details_layout() {
        assert_eq!(size_of::<PixelFormatDetails>(), 32);
        assert_eq!(offset_of!(PixelFormatDetails, rmask), 8);
        assert_eq!(offset_of!(PixelFormatDetails, rbits), 24);
        assert_eq!(offset_of!(PixelFormatDetails, ashift), 31);
        assert_eq!(size_of::<Color>(), 4);
        assert_eq!(size_of::<FColor>(), 16);
    }

    #[test]
    fn test_fcolor_from_color() {
        let c: FColor = Color::rgba(255, 0, 51, 0).into();
        assert_eq!(c, FColor { r: 1.0, g: 0.0, b: 0.2, a: 0.0 });
    }
}
