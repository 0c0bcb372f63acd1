/*

    Declare scene nodes: Box, Cylinder

    A scene node is anything that can report its local bounds
    and map them onto the screen. The overlay tracker only talks
    to the SceneNode trait, never to concrete shapes.

    @date: Oct, 2025
    @author: bartu
*/

use std::fmt::Debug;

use crate::bbox::{BBox, BBoxable, ScreenBounds};
use crate::projector::ScreenProjector;
use crate::prelude::*;

use std::sync::Arc;

pub type HeapAllocatedShape = Arc<dyn SceneNode>;
pub type ShapeList = Vec<HeapAllocatedShape>;


// =======================================================================================================
// SceneNode Trait
// =======================================================================================================
pub trait SceneNode : Debug + Send + Sync + BBoxable {
    fn label(&self) -> &str;

    /// Node transform relative to the scene root
    fn local_to_parent(&self) -> Matrix4;

    fn bounds_in_local(&self) -> BBox {
        self.get_bbox()
    }

    /// None when the node is entirely behind the camera
    fn local_to_screen(&self, bounds: &BBox, projector: &ScreenProjector) -> Option<ScreenBounds> {
        projector.project_bbox(&self.local_to_parent(), bounds)
    }
}


// Raw shape data deserialized from .JSON file, in scene order
#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "_type")]
pub enum ShapeJSON {
    #[serde(rename = "Box")]
    BoxShape(BoxShape),
    Cylinder(Cylinder),
}

impl ShapeJSON {
    pub fn into_node(self) -> HeapAllocatedShape {
        match self {
            ShapeJSON::BoxShape(b) => Arc::new(b),
            ShapeJSON::Cylinder(c) => Arc::new(c),
        }
    }
}

// =======================================================================================================
// Box (impl SceneNode + BBoxable)
// =======================================================================================================
#[derive(Debug, Deserialize, Clone, SmartDefault)]
#[serde(default)]
pub struct BoxShape {
    #[serde(rename = "_label")]
    pub label: String,

    #[default(Vector3::new(100.0, 100.0, 100.0))]
    #[serde(rename = "Size", deserialize_with = "deser_vec3")]
    pub size: Vector3,

    #[serde(rename = "Translate", deserialize_with = "deser_vec3")]
    pub translate: Vector3,
}

impl BoxShape {
    pub fn new(label: &str, width: Float, height: Float, depth: Float, translate: Vector3) -> Self {
        Self {
            label: label.to_string(),
            size: Vector3::new(width, height, depth),
            translate,
        }
    }
}

impl SceneNode for BoxShape {
    fn label(&self) -> &str {
        &self.label
    }

    fn local_to_parent(&self) -> Matrix4 {
        Matrix4::from_translation(self.translate)
    }
}

impl BBoxable for BoxShape {
    fn get_bbox(&self) -> BBox {
        BBox::centered(self.size.x, self.size.y, self.size.z)
    }
}

// =======================================================================================================
// Cylinder (impl SceneNode + BBoxable)
// =======================================================================================================

// Axis of the cylinder is the local y axis
#[derive(Debug, Deserialize, Clone, SmartDefault)]
#[serde(default)]
pub struct Cylinder {
    #[serde(rename = "_label")]
    pub label: String,

    #[default = 1.0]
    #[serde(rename = "Radius", deserialize_with = "deser_float")]
    pub radius: Float,

    #[default = 2.0]
    #[serde(rename = "Height", deserialize_with = "deser_float")]
    pub height: Float,

    #[serde(rename = "Translate", deserialize_with = "deser_vec3")]
    pub translate: Vector3,
}

impl Cylinder {
    pub fn new(label: &str, radius: Float, height: Float, translate: Vector3) -> Self {
        Self {
            label: label.to_string(),
            radius,
            height,
            translate,
        }
    }
}

impl SceneNode for Cylinder {
    fn label(&self) -> &str {
        &self.label
    }

    fn local_to_parent(&self) -> Matrix4 {
        Matrix4::from_translation(self.translate)
    }
}

impl BBoxable for Cylinder {
    fn get_bbox(&self) -> BBox {
        let diameter = self.radius * 2.0;
        BBox::centered(diameter, self.height, diameter)
    }
}
