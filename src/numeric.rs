/*

    Declare numeric types used throughout this repo.

    WARNING: If you like to use f32 instead of f64
    during computations, you need to change all of these
    together:
    pub type Float = f32;
    pub type Vector3 = Vec3; (and Vector2, Matrix4, Quaternion)

    Screen-space results are integers (see Int) since overlay
    rectangles are snapped to whole pixels.

    @date: 2 Oct, 2025
    @author: Bartu
*/

use bevy_math::{DMat4, DQuat, DVec2, DVec3, DVec4};
pub type Int = i32;
pub type Float = f64; // WARNING: If you want to change it to f32, don't forget to update vector types
pub type Vector2 = DVec2;
pub type Vector3 = DVec3;
pub type Vector4 = DVec4;
pub type Matrix4 = DMat4;
pub type Quaternion = DQuat;

pub fn approx_zero(x: Float) -> bool {
    x.abs() < 1e-8
}

pub fn approx_eq(a: Float, b: Float) -> bool {
    approx_zero(a - b)
}

pub fn transform_point(mat: &Matrix4, v: &Vector3) -> Vector3 {
    let v4 = Vector4::new(v.x, v.y, v.z, 1.0);
    let r = *mat * v4;
    Vector3::new(r.x, r.y, r.z)
}

/// Round half away from zero and snap to a pixel coordinate.
/// 10.5 -> 11, -10.5 -> -11
pub fn round_to_int(x: Float) -> Int {
    x.round() as Int
}
