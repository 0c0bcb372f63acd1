/*

    Screen-space overlay of scene node bounds.

    ScreenBoundsTracker turns every tracked node into a 2D
    rectangle in window-local pixels. OverlaySurface holds
    what is currently drawn on top of the 3D viewport and is
    always replaced as a whole, never patched.

    @date: Nov, 2025
    @author: bartu
*/

use crate::prelude::*;
use crate::projector::ScreenProjector;
use crate::shapes::HeapAllocatedShape;
use crate::window::Window;

/// Title bar height assumed when converting window-relative
/// coordinates to content coordinates. Real decorations vary per platform.
pub const DEFAULT_DECORATION_OFFSET: Int = 20;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    pub const LIGHT_BLUE: Self = Self::rgb(173, 216, 230);
    pub const DARK_GRAY: Self = Self::rgb(169, 169, 169);
    pub const LIGHT_GRAY: Self = Self::rgb(211, 211, 211);
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    pub fn to_vector3(&self) -> Vector3 {
        Vector3::new(self.r as Float, self.g as Float, self.b as Float)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Given as "R G B" in [0, 255], same as BackgroundColor
        let v = deser_vec3::<D, Vector3, Float>(deserializer)?;
        let channel = |x: Float| x.clamp(0.0, 255.0).round() as u8;
        Ok(Color::rgb(channel(v.x), channel(v.y), channel(v.z)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayRectangle {
    pub x: Int,
    pub y: Int,
    pub width: Int,
    pub height: Int,
    pub fill: Color,
    pub stroke: Color,
    /// Never intercepts pointer input when true
    pub mouse_transparent: bool,
}

impl OverlayRectangle {
    pub fn contains(&self, x: Int, y: Int) -> bool {
        x >= self.x && x <= self.x.saturating_add(self.width) && y >= self.y && y <= self.y.saturating_add(self.height)
    }
}

/// The fixed interactive control drawn after the bounds rectangles
#[derive(Debug, Clone, Deserialize, SmartDefault, PartialEq)]
#[serde(default)]
pub struct ControlWidget {
    #[default = "click me"]
    #[serde(rename = "Text")]
    pub text: String,

    #[serde(rename = "Position", deserialize_with = "deser_pair")]
    pub position: [Int; 2],

    #[default([64, 24])]
    #[serde(rename = "Size", deserialize_with = "deser_pair")]
    pub size: [Int; 2],
}

impl ControlWidget {
    pub fn rectangle(&self) -> OverlayRectangle {
        OverlayRectangle {
            x: self.position[0],
            y: self.position[1],
            width: self.size[0],
            height: self.size[1],
            fill: Color::LIGHT_GRAY,
            stroke: Color::BLACK,
            mouse_transparent: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayItem {
    Bounds(OverlayRectangle),
    Control(ControlWidget),
}

impl OverlayItem {
    pub fn rectangle(&self) -> OverlayRectangle {
        match self {
            OverlayItem::Bounds(rect) => *rect,
            OverlayItem::Control(widget) => widget.rectangle(),
        }
    }
}

// =======================================================================================================
// Tracker
// =======================================================================================================

#[derive(Debug, Clone, SmartDefault)]
pub struct ScreenBoundsTracker {
    #[default(DEFAULT_DECORATION_OFFSET)]
    pub decoration_offset: Int,

    #[default(Color::LIGHT_BLUE)]
    pub stroke: Color,
}

impl ScreenBoundsTracker {
    pub fn new(decoration_offset: Int, stroke: Color) -> Self {
        Self { decoration_offset, stroke }
    }

    /// One rectangle per node, in node order. A node entirely behind
    /// the camera gets an empty rectangle at the window corner.
    pub fn compute_overlay(&self, nodes: &[HeapAllocatedShape], projector: &ScreenProjector, window: &Window) -> Vec<OverlayRectangle> {
        nodes
            .iter()
            .map(|node| {
                let bounds = node.bounds_in_local();
                let rect = match node.local_to_screen(&bounds, projector) {
                    Some(screen) => self.window_rectangle(screen.min_x(), screen.min_y(), screen.width(), screen.height(), window),
                    None => {
                        debug!("'{}' is behind the camera", node.label());
                        self.window_rectangle(window.position.x, window.position.y, 0.0, 0.0, window)
                    }
                };
                debug!("'{}' -> {:?}", node.label(), rect);
                rect
            })
            .collect()
    }

    /// Snap absolute screen bounds to a window-local rectangle
    pub fn window_rectangle(&self, min_x: Float, min_y: Float, width: Float, height: Float, window: &Window) -> OverlayRectangle {
        OverlayRectangle {
            x: round_to_int(min_x - window.position.x),
            y: round_to_int(min_y - window.position.y).saturating_sub(self.decoration_offset),
            width: round_to_int(width),
            height: round_to_int(height),
            fill: Color::TRANSPARENT,
            stroke: self.stroke,
            mouse_transparent: true,
        }
    }
}

// =======================================================================================================
// Surface
// =======================================================================================================

#[derive(Debug, Clone, Default)]
pub struct OverlaySurface {
    items: Vec<OverlayItem>,
    trailing_control: Option<ControlWidget>,
    // Applied on top of the tracker stroke when set
    stroke_override: Option<Color>,
}

impl OverlaySurface {
    pub fn new(trailing_control: Option<ControlWidget>, stroke_override: Option<Color>) -> Self {
        Self {
            items: Vec::new(),
            trailing_control,
            stroke_override,
        }
    }

    /// Drop everything currently shown and show `rects` (plus the control, if any)
    pub fn replace(&mut self, rects: Vec<OverlayRectangle>) {
        self.items.clear();
        for mut rect in rects {
            if let Some(stroke) = self.stroke_override {
                rect.stroke = stroke;
            }
            self.items.push(OverlayItem::Bounds(rect));
        }
        if let Some(control) = &self.trailing_control {
            self.items.push(OverlayItem::Control(control.clone()));
        }
    }

    pub fn items(&self) -> &[OverlayItem] {
        &self.items
    }

    pub fn bounds(&self) -> Vec<OverlayRectangle> {
        self.items
            .iter()
            .filter_map(|item| match item {
                OverlayItem::Bounds(rect) => Some(*rect),
                OverlayItem::Control(_) => None,
            })
            .collect()
    }

    /// Topmost item that accepts pointer input at (x, y)
    pub fn pick(&self, x: Int, y: Int) -> Option<&OverlayItem> {
        self.items
            .iter()
            .rev()
            .find(|item| {
                let rect = item.rectangle();
                !rect.mouse_transparent && rect.contains(x, y)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::shapes::{BoxShape, Cylinder, ShapeList};
    use std::sync::Arc;

    fn demo_nodes() -> ShapeList {
        vec![
            Arc::new(BoxShape::new("Box1", 100.0, 100.0, 100.0, Vector3::new(0.0, -100.0, 0.0))),
            Arc::new(BoxShape::new("Box2", 150.0, 20.0, 50.0, Vector3::new(0.0, 100.0, 0.0))),
            Arc::new(Cylinder::new("Cylinder", 10.0, 200.0, Vector3::ZERO)),
        ]
    }

    #[test]
    fn test_window_rectangle_rounding_and_offset() {
        let tracker = ScreenBoundsTracker::default();
        let window = Window::new("test", Vector2::ZERO, [600, 800], 0.0);
        let rect = tracker.window_rectangle(10.4, 20.6, 5.5, 0.0, &window);
        assert_eq!(rect.x, 10);
        assert_eq!(rect.y, 21 - 20);
        assert_eq!(rect.width, 6);
        assert_eq!(rect.height, 0);
        assert!(rect.fill.is_transparent());
        assert_eq!(rect.stroke, Color::LIGHT_BLUE);
        assert!(rect.mouse_transparent);
    }

    #[test]
    fn test_window_origin_subtracted() {
        let tracker = ScreenBoundsTracker::new(20, Color::DARK_GRAY);
        let window = Window::new("test", Vector2::new(200.0, 50.0), [600, 800], 0.0);
        let rect = tracker.window_rectangle(210.0, 80.0, 1.0, 1.0, &window);
        assert_eq!((rect.x, rect.y), (10, 10));
    }

    #[test]
    fn test_offset_independent_of_position() {
        let tracker = ScreenBoundsTracker::default();
        let window = Window::new("test", Vector2::ZERO, [600, 800], 0.0);
        for y in [-300.0, 0.0, 17.0, 999.0] {
            let rect = tracker.window_rectangle(0.0, y, 1.0, 1.0, &window);
            assert_eq!(rect.y, round_to_int(y) - 20);
        }
    }

    #[test]
    fn test_window_rectangle_saturates() {
        let tracker = ScreenBoundsTracker::default();
        let window = Window::default();
        let rect = tracker.window_rectangle(Float::NEG_INFINITY, Float::NEG_INFINITY, Float::INFINITY, Float::INFINITY, &window);
        assert_eq!((rect.x, rect.y), (Int::MIN, Int::MIN));
        assert_eq!((rect.width, rect.height), (Int::MAX, Int::MAX));
        assert!(rect.contains(-1, -1));
        assert!(!rect.contains(0, 0));
    }

    #[test]
    fn test_node_behind_camera_keeps_its_slot() {
        let tracker = ScreenBoundsTracker::default();
        let window = Window::default();
        let mut cam = Camera::default();
        // Past Box1 and the cylinder (z in [-50, 50]), Box2 too
        cam.set_depth(200.0);
        let projector = ScreenProjector::new(Matrix4::IDENTITY, &cam, window.viewport());

        let rects = tracker.compute_overlay(&demo_nodes(), &projector, &window);
        assert_eq!(rects.len(), 3);
        for rect in &rects {
            assert_eq!((rect.x, rect.y, rect.width, rect.height), (0, -20, 0, 0));
        }
    }

    #[test]
    fn test_compute_overlay_cardinality_and_determinism() {
        let tracker = ScreenBoundsTracker::default();
        let window = Window::default();
        let cam = Camera::default();
        let projector = ScreenProjector::new(Matrix4::IDENTITY, &cam, window.viewport());
        let nodes = demo_nodes();

        let first = tracker.compute_overlay(&nodes, &projector, &window);
        let second = tracker.compute_overlay(&nodes, &projector, &window);
        assert_eq!(first.len(), nodes.len());
        assert_eq!(first, second);

        // Order follows node order: Box1 sits above Box2
        assert!(first[0].y < first[1].y);
    }

    #[test]
    fn test_decoration_offset_matches_title_bar() {
        // With the offset equal to the real title bar the rectangles land in
        // content coordinates: the origin projects to the viewport center.
        let tracker = ScreenBoundsTracker::default();
        let window = Window::new("test", Vector2::new(40.0, 60.0), [600, 800], 20.0);
        let cam = Camera::default();
        let projector = ScreenProjector::new(Matrix4::IDENTITY, &cam, window.viewport());
        let nodes: ShapeList = vec![Arc::new(BoxShape::new("dot", 0.0, 0.0, 0.0, Vector3::ZERO))];

        let rects = tracker.compute_overlay(&nodes, &projector, &window);
        assert_eq!((rects[0].x, rects[0].y), (300, 400));
        assert_eq!((rects[0].width, rects[0].height), (0, 0));
    }

    #[test]
    fn test_empty_node_list() {
        let tracker = ScreenBoundsTracker::default();
        let window = Window::default();
        let cam = Camera::default();
        let projector = ScreenProjector::new(Matrix4::IDENTITY, &cam, window.viewport());
        assert!(tracker.compute_overlay(&[], &projector, &window).is_empty());
    }

    #[test]
    fn test_surface_replace_discards_stale_items() {
        let tracker = ScreenBoundsTracker::default();
        let window = Window::new("test", Vector2::ZERO, [600, 800], 0.0);
        let mut surface = OverlaySurface::new(Some(ControlWidget::default()), Some(Color::DARK_GRAY));

        let a = tracker.window_rectangle(1.0, 30.0, 2.0, 2.0, &window);
        surface.replace(vec![a, a, a]);
        assert_eq!(surface.items().len(), 4);

        surface.replace(vec![a]);
        assert_eq!(surface.items().len(), 2);
        assert_eq!(surface.bounds().len(), 1);
        assert_eq!(surface.bounds()[0].stroke, Color::DARK_GRAY);
        assert!(matches!(surface.items().last(), Some(OverlayItem::Control(_))));
    }

    #[test]
    fn test_pick_ignores_mouse_transparent() {
        let tracker = ScreenBoundsTracker::default();
        let window = Window::new("test", Vector2::ZERO, [600, 800], 0.0);
        let mut surface = OverlaySurface::new(Some(ControlWidget::default()), None);
        // Bounds rectangle covering the control
        surface.replace(vec![tracker.window_rectangle(0.0, 20.0, 500.0, 500.0, &window)]);

        match surface.pick(5, 5) {
            Some(OverlayItem::Control(widget)) => assert_eq!(widget.text, "click me"),
            other => panic!("expected control, got {:?}", other),
        }
        assert!(surface.pick(300, 300).is_none());
    }
}
