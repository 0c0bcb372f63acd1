/*

    Map local-space bounds to absolute screen bounds.

    A ScreenProjector is a snapshot of everything between a node and
    the screen: the scene root transform, the camera and the viewport.
    It is rebuilt for every refresh so it never outlives the
    transforms it was taken from.

    @date: Nov, 2025
    @author: bartu
*/

use crate::prelude::*;
use crate::bbox::{BBox, ScreenBounds};
use crate::camera::Camera;
use crate::window::Viewport;

#[derive(Debug, Clone, Copy)]
pub struct ScreenProjector<'a> {
    root: Matrix4,
    camera: &'a Camera,
    viewport: Viewport,
}

impl<'a> ScreenProjector<'a> {
    pub fn new(root: Matrix4, camera: &'a Camera, viewport: Viewport) -> Self {
        Self { root, camera, viewport }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Project the 8 corners of `bounds` and take the 2D extents of
    /// those in front of the camera. None if no corner is visible.
    pub fn project_bbox(&self, local_to_parent: &Matrix4, bounds: &BBox) -> Option<ScreenBounds> {
        let to_world = self.root * *local_to_parent;
        let corners = bounds.corners().into_iter().filter_map(|c| {
            let world = transform_point(&to_world, &c);
            self.camera
                .project(&world, self.viewport.size)
                .map(|p| self.viewport.to_screen(p))
        });
        ScreenBounds::from_points(corners)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::{AxisRotation, SceneOrientation};

    fn viewport() -> Viewport {
        Viewport { origin: Vector2::new(100.0, 120.0), size: Vector2::new(600.0, 800.0) }
    }

    #[test]
    fn test_origin_maps_to_viewport_center() {
        let cam = Camera::default();
        let projector = ScreenProjector::new(Matrix4::IDENTITY, &cam, viewport());
        let sb = projector.project_bbox(&Matrix4::IDENTITY, &BBox::centered(0.0, 0.0, 0.0)).unwrap();
        assert!(approx_eq(sb.min_x(), 400.0) && approx_eq(sb.min_y(), 520.0));
        assert_eq!(sb.width(), 0.0);
    }

    #[test]
    fn test_centered_box_is_symmetric() {
        let cam = Camera::default();
        let projector = ScreenProjector::new(Matrix4::IDENTITY, &cam, viewport());
        let sb = projector.project_bbox(&Matrix4::IDENTITY, &BBox::centered(100.0, 100.0, 100.0)).unwrap();
        let center_x = sb.min_x() + sb.width() * 0.5;
        let center_y = sb.min_y() + sb.height() * 0.5;
        assert!((center_x - 400.0).abs() < 1e-9);
        assert!((center_y - 520.0).abs() < 1e-9);
        // Front face at z = -50 dominates: 100 * f / 450
        let f = cam.focal_length(800.0);
        assert!((sb.width() - 100.0 * f / 450.0).abs() < 1e-9);
    }

    #[test]
    fn test_translated_node_moves_up() {
        let cam = Camera::default();
        let projector = ScreenProjector::new(Matrix4::IDENTITY, &cam, viewport());
        let up = Matrix4::from_translation(Vector3::new(0.0, -100.0, 0.0));
        let sb = projector.project_bbox(&up, &BBox::centered(10.0, 10.0, 10.0)).unwrap();
        assert!(sb.min_y() + sb.height() < 520.0);
    }

    #[test]
    fn test_root_rotation_changes_bounds() {
        let cam = Camera::default();
        let bounds = BBox::centered(150.0, 20.0, 50.0);

        let still = ScreenProjector::new(Matrix4::IDENTITY, &cam, viewport())
            .project_bbox(&Matrix4::IDENTITY, &bounds).unwrap();

        let mut orientation = SceneOrientation::default();
        orientation.append(AxisRotation::new(Vector3::Y, 90.0));
        let turned = ScreenProjector::new(orientation.to_mat4(), &cam, viewport())
            .project_bbox(&Matrix4::IDENTITY, &bounds).unwrap();

        // Long side now points at the camera
        assert!(turned.width() < still.width());
    }

    #[test]
    fn test_corners_behind_camera_are_skipped() {
        let bounds = BBox::centered(100.0, 100.0, 100.0);
        let mut cam = Camera::default();

        // Eye inside the box depth range, only the far face is visible
        cam.set_depth(-40.0);
        let partial = ScreenProjector::new(Matrix4::IDENTITY, &cam, viewport())
            .project_bbox(&Matrix4::IDENTITY, &bounds)
            .unwrap();
        let f = cam.focal_length(800.0);
        assert!((partial.width() - 100.0 * f / 90.0).abs() < 1e-9);

        // Dollied past the box
        cam.set_depth(200.0);
        let past = ScreenProjector::new(Matrix4::IDENTITY, &cam, viewport())
            .project_bbox(&Matrix4::IDENTITY, &bounds);
        assert!(past.is_none());
    }
}
