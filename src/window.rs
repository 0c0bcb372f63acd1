/*

    Declare Window (the host's top level frame) and the
    Viewport derived from it.

    Window position is the screen position of the outer frame,
    i.e. including decorations. The 3D content starts
    `decoration_height` pixels below that.

    @date: Nov, 2025
    @author: bartu
*/

use crate::prelude::*;

#[derive(Debug, Deserialize, Clone, SmartDefault)]
#[serde(default)]
pub struct Window {
    #[default = "2D and 3D"]
    #[serde(rename = "Title")]
    pub title: String,

    #[default(Vector2::new(100.0, 100.0))]
    #[serde(rename = "Position", deserialize_with = "deser_vec2")]
    pub position: Vector2,

    #[default([600, 800])]
    #[serde(rename = "Size", deserialize_with = "deser_pair")]
    pub size: [usize; 2],

    // Actual title bar height of the host platform
    #[default = 20.0]
    #[serde(rename = "DecorationHeight", deserialize_with = "deser_float")]
    pub decoration_height: Float,
}

impl Window {
    pub fn new(title: &str, position: Vector2, size: [usize; 2], decoration_height: Float) -> Self {
        Window {
            title: title.to_string(),
            position,
            size,
            decoration_height,
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            origin: self.position + Vector2::new(0.0, self.decoration_height),
            size: Vector2::new(self.size[0] as Float, self.size[1] as Float),
        }
    }
}

/// Screen area the scene is projected into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Screen-absolute top left corner
    pub origin: Vector2,
    pub size: Vector2,
}

impl Viewport {
    pub fn to_screen(&self, local: Vector2) -> Vector2 {
        self.origin + local
    }
}
