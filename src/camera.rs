/*

    Declare Camera: clip planes, position, field of view
    and the projection of scene points into viewport pixels.

    Conventions follow the host scene graph:
    x grows to the right, y grows downwards and the camera
    looks along +z from its position (no camera rotation,
    the scene root is rotated instead).

    @date: Oct, 2025
    @author: bartu
*/


use crate::prelude::*;

#[derive(Debug, Deserialize, Clone)]
#[derive(SmartDefault)]
#[serde(default)]
pub struct Camera {
    #[default = 0.1]
    #[serde(rename = "NearClip", deserialize_with = "deser_float")]
    pub near_clip: Float,

    #[default = 10000.0]
    #[serde(rename = "FarClip", deserialize_with = "deser_float")]
    pub far_clip: Float,

    #[default(Vector3::new(0.0, 0.0, -500.0))]
    #[serde(rename = "Position", deserialize_with = "deser_vec3")]
    position: Vector3,

    // Vertical field of view in degrees
    #[default = 30.0]
    #[serde(rename = "FovY", deserialize_with = "deser_float")]
    fovy: Float,

    #[default = true]
    #[serde(rename = "Perspective", deserialize_with = "deser_bool")]
    pub perspective: bool,
}

impl Camera {
    pub fn new(position: Vector3, fovy: Float, near_clip: Float, far_clip: Float, perspective: bool) -> Self {
        let camera = Camera {
            near_clip,
            far_clip,
            position,
            fovy,
            perspective,
        };
        debug_assert!(camera.validate().is_ok(), "{:?}", camera.validate());
        camera
    }

    /// Check clip planes and field of view, JSON input skips `new`
    pub fn validate(&self) -> Result<(), String> {
        if !(self.near_clip > 0.0 && self.near_clip.is_finite()) {
            return Err(format!("NearClip must be a positive number, found {}", self.near_clip));
        }
        if !(self.far_clip > self.near_clip) {
            return Err(format!("FarClip ({}) must be greater than NearClip ({})", self.far_clip, self.near_clip));
        }
        if self.perspective && !(self.fovy > 0.0 && self.fovy < 180.0) {
            return Err(format!("FovY must be in (0, 180) degrees, found {}", self.fovy));
        }
        Ok(())
    }

    /// Translation along the viewing axis (z)
    pub fn depth(&self) -> Float {
        self.position.z
    }

    pub fn set_depth(&mut self, z: Float) {
        self.position.z = z;
    }

    /// Dolly forward (positive) or backward (negative)
    pub fn translate_depth(&mut self, delta: Float) {
        self.position.z += delta;
        debug!("Camera depth translated by {} to {}", delta, self.position.z);
    }

    /// Distance from eye to the projection plane in pixels, so that
    /// fovy covers exactly the viewport height.
    pub fn focal_length(&self, viewport_height: Float) -> Float {
        let half_fovy = (self.fovy * 0.5).to_radians();
        (viewport_height * 0.5) / half_fovy.tan()
    }

    /// Project a point given in world coordinates to viewport-local pixels.
    /// None for points in front of the near plane (or behind the eye),
    /// those have no image on screen.
    pub fn project(&self, world: &Vector3, viewport_size: Vector2) -> Option<Vector2> {
        let c = *world - self.position;
        let center = viewport_size * 0.5;
        if !self.perspective {
            return Some(center + Vector2::new(c.x, c.y));
        }

        if !(c.z >= self.near_clip && c.z > 0.0) {
            return None;
        }
        let f = self.focal_length(viewport_size.y);
        Some(center + Vector2::new(c.x, c.y) * (f / c.z))
    }
}
