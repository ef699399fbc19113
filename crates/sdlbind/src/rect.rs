//! Points and rectangles
//!
//! The structs are `#[repr(C)]` and passed to native calls by pointer. The
//! small geometric helpers are computed in Rust; the set operations forward
//! to the library.

use crate::error::Result;
use crate::ffi::marshal;
use crate::sdl::Sdl;
use std::ptr;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FPoint {
    pub x: f32,
    pub y: f32,
}

/// Integer rectangle, origin at the top left
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl FPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Half-open containment: the right and bottom edges are outside
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }

    /// No area
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    pub fn to_frect(&self) -> FRect {
        FRect {
            x: self.x as f32,
            y: self.y as f32,
            w: self.w as f32,
            h: self.h as f32,
        }
    }
}

impl FRect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Closed containment, matching the native float variant
    pub fn contains_point(&self, p: FPoint) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }

    pub fn is_empty(&self) -> bool {
        self.w < 0.0 || self.h < 0.0
    }

    /// Every component within `epsilon`
    pub fn approx_eq(&self, other: &FRect, epsilon: f32) -> bool {
        (self.x - other.x).abs() <= epsilon
            && (self.y - other.y).abs() <= epsilon
            && (self.w - other.w).abs() <= epsilon
            && (self.h - other.h).abs() <= epsilon
    }
}

impl From<Rect> for FRect {
    fn from(rect: Rect) -> Self {
        rect.to_frect()
    }
}

/// Optional by-reference argument, `None` as null
pub(crate) fn opt_ptr<T>(value: Option<&T>) -> *const T {
    value.map_or(ptr::null(), |v| v as *const T)
}

impl Sdl {
    pub fn has_rect_intersection(&self, a: &Rect, b: &Rect) -> bool {
        marshal::decode_bool(unsafe { (self.api().SDL_HasRectIntersection)(a, b) })
    }

    /// Overlap of two rectangles, `None` when disjoint
    pub fn rect_intersection(&self, a: &Rect, b: &Rect) -> Option<Rect> {
        let mut out = Rect::default();
        marshal::decode_bool(unsafe { (self.api().SDL_GetRectIntersection)(a, b, &mut out) }).then_some(out)
    }

    pub fn rect_union(&self, a: &Rect, b: &Rect) -> Result<Rect> {
        let mut out = Rect::default();
        self.check(unsafe { (self.api().SDL_GetRectUnion)(a, b, &mut out) })?;
        Ok(out)
    }

    /// Smallest rectangle enclosing `points`, optionally clipped
    ///
    /// `None` when no point lies inside the clip.
    pub fn rect_enclosing_points(&self, points: &[Point], clip: Option<&Rect>) -> Result<Option<Rect>> {
        let count = marshal::len_to_c_int(points.len())?;
        let mut out = Rect::default();
        let found = unsafe { (self.api().SDL_GetRectEnclosingPoints)(points.as_ptr(), count, opt_ptr(clip), &mut out) };
        Ok(marshal::decode_bool(found).then_some(out))
    }

    /// Clip the segment `a..b` to `rect`; `None` when it misses entirely
    pub fn rect_line_intersection(&self, rect: &Rect, a: Point, b: Point) -> Option<(Point, Point)> {
        let (mut x1, mut y1, mut x2, mut y2) = (a.x, a.y, b.x, b.y);
        let hit = unsafe { (self.api().SDL_GetRectAndLineIntersection)(rect, &mut x1, &mut y1, &mut x2, &mut y2) };
        marshal::decode_bool(hit).then_some((Point::new(x1, y1), Point::new(x2, y2)))
    }

    pub fn has_rect_intersection_float(&self, a: &FRect, b: &FRect) -> bool {
        marshal::decode_bool(unsafe { (self.api().SDL_HasRectIntersectionFloat)(a, b) })
    }

    pub fn rect_intersection_float(&self, a: &FRect, b: &FRect) -> Option<FRect> {
        let mut out = FRect::default();
        marshal::decode_bool(unsafe { (self.api().SDL_GetRectIntersectionFloat)(a, b, &mut out) }).then_some(out)
    }

    pub fn rect_union_float(&self, a: &FRect, b: &FRect) -> Result<FRect> {
        let mut out = FRect::default();
        self.check(unsafe { (self.api().SDL_GetRectUnionFloat)(a, b, &mut out) })?;
        Ok(out)
    }
}
