/*

    Axis Aligned Bounding Boxes.

    - BBox: local-space bounds of a scene node (3D)
    - ScreenBounds: screen-space bounds of a projected BBox (2D)

    @author: bartu
    @date: 9 Nov, 2025
*/


use crate::prelude::*;

use crate::interval::{Interval};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub xmin: Float,
    pub xmax: Float,
    pub ymin: Float,
    pub ymax: Float,
    pub zmin: Float,
    pub zmax: Float,

    pub width: Float,
    pub height: Float,
    pub depth: Float,
}

impl BBox {
    pub fn new_from(xint: &Interval, yint: &Interval, zint: &Interval) -> Self {

        debug_assert!(xint.validate() && yint.validate() && zint.validate(), "Invalid interval, found max < min");
        Self {
            xmin: xint.min,
            xmax: xint.max,
            ymin: yint.min,
            ymax: yint.max,
            zmin: zint.min,
            zmax: zint.max,
            width: xint.size(),
            height: yint.size(),
            depth: zint.size(),
        }
    }

    /// Box of given extents centered at the local origin
    pub fn centered(width: Float, height: Float, depth: Float) -> Self {
        Self::new_from(
            &Interval::centered(0.0, width),
            &Interval::centered(0.0, height),
            &Interval::centered(0.0, depth),
        )
    }

    pub fn corners(&self) -> [Vector3; 8] {
        [
            Vector3::new(self.xmin, self.ymin, self.zmin),
            Vector3::new(self.xmax, self.ymin, self.zmin),
            Vector3::new(self.xmin, self.ymax, self.zmin),
            Vector3::new(self.xmax, self.ymax, self.zmin),
            Vector3::new(self.xmin, self.ymin, self.zmax),
            Vector3::new(self.xmax, self.ymin, self.zmax),
            Vector3::new(self.xmin, self.ymax, self.zmax),
            Vector3::new(self.xmax, self.ymax, self.zmax),
        ]
    }
}

pub trait BBoxable {
    /// Bounds in the node's own coordinate frame, before any transform
    fn get_bbox(&self) -> BBox;
}

// ====================================================================================================
// Screen Bounds
// ====================================================================================================

/// 2D bounds in absolute screen coordinates (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenBounds {
    pub xint: Interval,
    pub yint: Interval,
}

impl ScreenBounds {
    /// None when given no points
    pub fn from_points(points: impl IntoIterator<Item = Vector2>) -> Option<Self> {
        let (mut xint, mut yint) = (Interval::EMPTY, Interval::EMPTY);
        for p in points {
            xint.expand(p.x);
            yint.expand(p.y);
        }
        if !xint.validate() {
            return None;
        }
        Some(Self { xint, yint })
    }

    pub fn min_x(&self) -> Float { self.xint.min }
    pub fn min_y(&self) -> Float { self.yint.min }
    pub fn width(&self) -> Float { self.xint.size() }
    pub fn height(&self) -> Float { self.yint.size() }
}
