//! Geometric primitives in PDF user space.
//!
//! PDF user space has its origin at the lower-left corner of the page with y
//! growing upwards. Rectangles are stored by their lower-left and upper-right
//! corners, which is also how they are written to a file.

use crate::error::{Error, Result};
use crate::object::Object;
use crate::writer::ToObject;

/// A rectangle in PDF user space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// X coordinate of the lower-left corner
    pub llx: f64,
    /// Y coordinate of the lower-left corner
    pub lly: f64,
    /// X coordinate of the upper-right corner
    pub urx: f64,
    /// Y coordinate of the upper-right corner
    pub ury: f64,
}

impl Rect {
    /// Create a new rectangle from its lower-left corner and dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_scribe::geometry::Rect;
    ///
    /// let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
    /// assert_eq!(rect.urx, 110.0);
    /// assert_eq!(rect.ury, 70.0);
    /// ```
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            llx: x,
            lly: y,
            urx: x + width,
            ury: y + height,
        }
    }

    /// Create a rectangle from two corner points.
    ///
    /// The corners may be given in any order; the result is normalized so
    /// that the lower-left corner holds the smaller coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_scribe::geometry::Rect;
    ///
    /// let rect = Rect::from_points(110.0, 70.0, 10.0, 20.0);
    /// assert_eq!(rect.llx, 10.0);
    /// assert_eq!(rect.lly, 20.0);
    /// assert_eq!(rect.width(), 100.0);
    /// assert_eq!(rect.height(), 50.0);
    /// ```
    pub fn from_points(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            llx: x0.min(x1),
            lly: y0.min(y1),
            urx: x0.max(x1),
            ury: y0.max(y1),
        }
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f64 {
        self.urx - self.llx
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f64 {
        self.ury - self.lly
    }
}

/// Rectangles are written as `[ llx lly urx ury ]`.
impl ToObject for Rect {
    fn to_object(&self) -> Result<Object> {
        let corners = [self.llx, self.lly, self.urx, self.ury];
        if corners.iter().any(|c| !c.is_finite()) {
            return Err(Error::UnsupportedType(format!("rectangle {:?}", corners)));
        }
        Ok(Object::Array(vec![
            Object::Number(self.llx),
            Object::Number(self.lly),
            Object::Number(self.urx),
            Object::Number(self.ury),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::{resolve, ObjectSerializer};

    #[test]
    fn test_rect_creation() {
        let r = Rect::new(5.0, 10.0, 100.0, 50.0);
        assert_eq!(r.llx, 5.0);
        assert_eq!(r.lly, 10.0);
        assert_eq!(r.width(), 100.0);
        assert_eq!(r.height(), 50.0);
    }

    #[test]
    fn test_rect_from_points_normalizes() {
        let r = Rect::from_points(10.0, 70.0, 110.0, 20.0);
        assert_eq!(r, Rect::new(10.0, 20.0, 100.0, 50.0));
    }

    #[test]
    fn test_rect_to_object() {
        let s = ObjectSerializer::new();
        let r = Rect::new(0.0, 0.0, 612.0, 792.0);
        assert_eq!(s.serialize_to_string(&r.to_object().unwrap()), "[ 0 0 612 792 ]");
    }

    #[test]
    fn test_non_finite_rect_is_unsupported() {
        let r = Rect::new(0.0, 0.0, f64::INFINITY, 10.0);
        assert!(matches!(r.to_object(), Err(Error::UnsupportedType(_))));
        assert!(matches!(resolve(Rect::from_points(f64::NAN, 0.0, 1.0, 1.0)), Err(Error::UnsupportedType(_))));
    }

    #[test]
    fn test_rect_through_resolver() {
        let s = ObjectSerializer::new();
        let obj = resolve(Rect::new(1.5, -2.0, 3.0, 4.0)).unwrap();
        assert_eq!(s.serialize_to_string(&obj), "[ 1.5 -2 4.5 2 ]");
    }
}
