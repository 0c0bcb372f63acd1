/*

    Rotation state of the scene root.

    Every drag sample appends a rotation about an axis through
    the origin. Two modes are supported:

    - Composed: a single running quaternion updated in place.
      Memory stays constant over a session.
    - History: every appended rotation is kept as an entry in an
      ordered list, the root transform is the product of all of
      them (first entry outermost). Grows by two entries per drag
      sample, kept for parity with list-of-transforms scene graphs.

    @date: Nov, 2025
    @author: bartu
*/

use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub enum RotationMode {
    #[default]
    Composed,
    History,
}

/// Axis the vertical drag component rotates about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub enum PitchAxis {
    X,
    #[default]
    Z,
}

impl PitchAxis {
    pub fn as_vector(&self) -> Vector3 {
        match self {
            PitchAxis::X => Vector3::X,
            PitchAxis::Z => Vector3::Z,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRotation {
    pub axis: Vector3,
    pub angle_deg: Float,
}

impl AxisRotation {
    pub fn new(axis: Vector3, angle_deg: Float) -> Self {
        debug_assert!(axis.is_normalized());
        Self { axis, angle_deg }
    }

    pub fn to_quat(&self) -> Quaternion {
        Quaternion::from_axis_angle(self.axis, self.angle_deg.to_radians())
    }
}

#[derive(Debug, Clone)]
pub struct SceneOrientation {
    mode: RotationMode,
    composed: Quaternion,
    history: Vec<AxisRotation>,
    applied: usize,
}

impl SceneOrientation {
    pub fn new(mode: RotationMode) -> Self {
        Self {
            mode,
            composed: Quaternion::IDENTITY,
            history: Vec::new(),
            applied: 0,
        }
    }

    /// Append a rotation after all previously applied ones
    pub fn append(&mut self, rotation: AxisRotation) {
        self.applied += 1;
        match self.mode {
            RotationMode::Composed => {
                // Post-multiply: the new rotation acts in the already rotated frame
                self.composed = (self.composed * rotation.to_quat()).normalize();
            }
            RotationMode::History => {
                self.history.push(rotation);
            }
        }
    }

    /// Number of rotations appended since creation
    pub fn applied_count(&self) -> usize {
        self.applied
    }

    /// Recorded entries, empty unless in History mode
    pub fn history(&self) -> &[AxisRotation] {
        &self.history
    }

    pub fn rotation(&self) -> Quaternion {
        match self.mode {
            RotationMode::Composed => self.composed,
            RotationMode::History => self
                .history
                .iter()
                .fold(Quaternion::IDENTITY, |acc, r| acc * r.to_quat()),
        }
    }

    pub fn to_mat4(&self) -> Matrix4 {
        Matrix4::from_quat(self.rotation())
    }
}

impl Default for SceneOrientation {
    fn default() -> Self {
        Self::new(RotationMode::default())
    }
}
