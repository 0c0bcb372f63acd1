/*

    Mouse drag handling: rotate the scene or dolly the camera.

    DragRotationController is a two state machine (Idle, Dragging).
    The drag origin only exists while Dragging so a stale origin
    can never be read. The Shift modifier is tracked separately by
    key events and only read by the drag handler.

    Each drag sample is measured against the previous sample, so
    deltas are incremental.

    @date: Nov, 2025
    @author: bartu
*/

use crate::prelude::*;
use crate::camera::Camera;
use crate::orientation::{AxisRotation, PitchAxis, SceneOrientation};

// Only Shift matters, every other key name maps to Other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Key {
    Shift,
    Other,
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        if name.eq_ignore_ascii_case("shift") { Key::Shift } else { Key::Other }
    }
}

// Scene coordinates as supplied by the host
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "_type", rename_all_fields = "PascalCase")]
pub enum InputEvent {
    MousePressed {
        #[serde(deserialize_with = "deser_float")]
        x: Float,
        #[serde(deserialize_with = "deser_float")]
        y: Float,
    },
    MouseDragged {
        #[serde(deserialize_with = "deser_float")]
        x: Float,
        #[serde(deserialize_with = "deser_float")]
        y: Float,
    },
    MouseReleased {
        #[serde(deserialize_with = "deser_float")]
        x: Float,
        #[serde(deserialize_with = "deser_float")]
        y: Float,
    },
    KeyPressed { key: Key },
    KeyReleased { key: Key },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging { origin: Vector2 },
}

/// What a single event did to the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    Ignored,
    Started,
    Ended,
    /// Camera moved along its viewing axis by `delta`
    Dollied { delta: Float },
    /// Scene rotated by `yaw` degrees about y then `pitch` degrees about the pitch axis
    Rotated { yaw: Float, pitch: Float },
}

impl DragOutcome {
    /// Drag samples always require the overlay to be rebuilt
    pub fn needs_refresh(&self) -> bool {
        matches!(self, DragOutcome::Dollied { .. } | DragOutcome::Rotated { .. })
    }
}

#[derive(Debug, Clone)]
pub struct DragRotationController {
    state: DragState,
    shift_held: bool,
    pitch_axis: PitchAxis,
}

impl DragRotationController {
    pub fn new(pitch_axis: PitchAxis) -> Self {
        Self {
            state: DragState::Idle,
            shift_held: false,
            pitch_axis,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_shift_held(&self) -> bool {
        self.shift_held
    }

    pub fn handle(&mut self, event: &InputEvent, camera: &mut Camera, orientation: &mut SceneOrientation) -> DragOutcome {
        match *event {
            InputEvent::MousePressed { x, y } => self.press(Vector2::new(x, y)),
            InputEvent::MouseDragged { x, y } => self.drag(Vector2::new(x, y), camera, orientation),
            InputEvent::MouseReleased { .. } => self.release(),
            InputEvent::KeyPressed { key: Key::Shift } => {
                self.shift_held = true;
                DragOutcome::Ignored
            }
            InputEvent::KeyReleased { key: Key::Shift } => {
                self.shift_held = false;
                DragOutcome::Ignored
            }
            InputEvent::KeyPressed { .. } | InputEvent::KeyReleased { .. } => DragOutcome::Ignored,
        }
    }

    /// Any press (re)starts a gesture at the pointer
    pub fn press(&mut self, pointer: Vector2) -> DragOutcome {
        self.state = DragState::Dragging { origin: pointer };
        DragOutcome::Started
    }

    pub fn release(&mut self) -> DragOutcome {
        match self.state {
            DragState::Dragging { .. } => {
                self.state = DragState::Idle;
                DragOutcome::Ended
            }
            DragState::Idle => DragOutcome::Ignored,
        }
    }

    pub fn drag(&mut self, pointer: Vector2, camera: &mut Camera, orientation: &mut SceneOrientation) -> DragOutcome {
        let origin = match self.state {
            DragState::Dragging { origin } => origin,
            DragState::Idle => {
                // Sample without a press, start here with a zero offset
                warn!("Drag sample at {:?} without a press, starting gesture there", pointer);
                pointer
            }
        };

        let offset = pointer - origin;
        let outcome = if self.shift_held {
            // Both axes fold into a single dolly amount
            let delta = (offset.x + offset.y) / 2.0;
            camera.translate_depth(delta);
            DragOutcome::Dollied { delta }
        } else {
            orientation.append(AxisRotation::new(Vector3::Y, offset.x));
            orientation.append(AxisRotation::new(self.pitch_axis.as_vector(), offset.y));
            DragOutcome::Rotated { yaw: offset.x, pitch: offset.y }
        };

        self.state = DragState::Dragging { origin: origin + offset };
        debug!("Drag sample {:?}: {:?}", pointer, outcome);
        outcome
    }
}

impl Default for DragRotationController {
    fn default() -> Self {
        Self::new(PitchAxis::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::RotationMode;

    fn setup() -> (DragRotationController, Camera, SceneOrientation) {
        (
            DragRotationController::default(),
            Camera::default(),
            SceneOrientation::new(RotationMode::History),
        )
    }

    #[test]
    fn test_press_records_origin() {
        let (mut ctrl, mut cam, mut ori) = setup();
        assert_eq!(ctrl.state(), DragState::Idle);
        let out = ctrl.handle(&InputEvent::MousePressed { x: 5.0, y: 6.0 }, &mut cam, &mut ori);
        assert_eq!(out, DragOutcome::Started);
        assert!(!out.needs_refresh());
        assert_eq!(ctrl.state(), DragState::Dragging { origin: Vector2::new(5.0, 6.0) });
        assert_eq!(ori.applied_count(), 0);
        assert_eq!(cam.depth(), -500.0);
    }

    #[test]
    fn test_shift_drag_dollies_by_half_sum() {
        let (mut ctrl, mut cam, mut ori) = setup();
        ctrl.handle(&InputEvent::KeyPressed { key: Key::Shift }, &mut cam, &mut ori);
        ctrl.handle(&InputEvent::MousePressed { x: 0.0, y: 0.0 }, &mut cam, &mut ori);
        let out = ctrl.handle(&InputEvent::MouseDragged { x: 10.0, y: 20.0 }, &mut cam, &mut ori);
        assert_eq!(out, DragOutcome::Dollied { delta: 15.0 });
        assert_eq!(cam.depth(), -485.0);
        assert!(ori.history().is_empty());
    }

    #[test]
    fn test_shift_drag_from_minus_500() {
        let (mut ctrl, mut cam, mut ori) = setup();
        ctrl.handle(&InputEvent::KeyPressed { key: Key::Shift }, &mut cam, &mut ori);
        ctrl.handle(&InputEvent::MousePressed { x: 200.0, y: 300.0 }, &mut cam, &mut ori);
        ctrl.handle(&InputEvent::MouseDragged { x: 300.0, y: 280.0 }, &mut cam, &mut ori);
        assert_eq!(cam.depth(), -460.0);
    }

    #[test]
    fn test_rotation_appends_two_entries_per_sample() {
        let (mut ctrl, mut cam, mut ori) = setup();
        ctrl.handle(&InputEvent::MousePressed { x: 0.0, y: 0.0 }, &mut cam, &mut ori);
        ctrl.handle(&InputEvent::MouseDragged { x: 3.0, y: 4.0 }, &mut cam, &mut ori);
        ctrl.handle(&InputEvent::MouseDragged { x: 10.0, y: 2.0 }, &mut cam, &mut ori);

        let expected = [
            AxisRotation::new(Vector3::Y, 3.0),
            AxisRotation::new(Vector3::Z, 4.0),
            AxisRotation::new(Vector3::Y, 7.0),
            AxisRotation::new(Vector3::Z, -2.0),
        ];
        assert_eq!(ori.history(), &expected);
        assert_eq!(cam.depth(), -500.0);
    }

    #[test]
    fn test_rotation_30_0() {
        let (mut ctrl, mut cam, mut ori) = setup();
        ctrl.handle(&InputEvent::MousePressed { x: 100.0, y: 100.0 }, &mut cam, &mut ori);
        let out = ctrl.handle(&InputEvent::MouseDragged { x: 130.0, y: 100.0 }, &mut cam, &mut ori);
        assert_eq!(out, DragOutcome::Rotated { yaw: 30.0, pitch: 0.0 });
        assert!(out.needs_refresh());
        assert_eq!(ori.history(), &[
            AxisRotation::new(Vector3::Y, 30.0),
            AxisRotation::new(Vector3::Z, 0.0),
        ]);
    }

    #[test]
    fn test_zero_length_drag_still_refreshes() {
        let (mut ctrl, mut cam, mut ori) = setup();
        ctrl.handle(&InputEvent::MousePressed { x: 1.0, y: 1.0 }, &mut cam, &mut ori);
        let out = ctrl.handle(&InputEvent::MouseDragged { x: 1.0, y: 1.0 }, &mut cam, &mut ori);
        assert!(out.needs_refresh());
        assert_eq!(ori.applied_count(), 2);
    }

    #[test]
    fn test_shift_release_switches_back_to_rotation() {
        let (mut ctrl, mut cam, mut ori) = setup();
        ctrl.handle(&InputEvent::KeyPressed { key: Key::Shift }, &mut cam, &mut ori);
        assert!(ctrl.is_shift_held());
        ctrl.handle(&InputEvent::MousePressed { x: 0.0, y: 0.0 }, &mut cam, &mut ori);
        ctrl.handle(&InputEvent::MouseDragged { x: 2.0, y: 2.0 }, &mut cam, &mut ori);
        ctrl.handle(&InputEvent::KeyReleased { key: Key::Shift }, &mut cam, &mut ori);
        ctrl.handle(&InputEvent::MouseDragged { x: 4.0, y: 2.0 }, &mut cam, &mut ori);

        assert_eq!(cam.depth(), -498.0);
        // Origin kept advancing during the dolly, so the yaw is only 2
        assert_eq!(ori.history()[0], AxisRotation::new(Vector3::Y, 2.0));
    }

    #[test]
    fn test_release_and_other_keys() {
        let (mut ctrl, mut cam, mut ori) = setup();
        assert_eq!(ctrl.release(), DragOutcome::Ignored);
        ctrl.handle(&InputEvent::MousePressed { x: 0.0, y: 0.0 }, &mut cam, &mut ori);
        let out = ctrl.handle(&InputEvent::MouseReleased { x: 0.0, y: 0.0 }, &mut cam, &mut ori);
        assert_eq!(out, DragOutcome::Ended);
        assert_eq!(ctrl.state(), DragState::Idle);

        let out = ctrl.handle(&InputEvent::KeyPressed { key: Key::Other }, &mut cam, &mut ori);
        assert_eq!(out, DragOutcome::Ignored);
        assert!(!ctrl.is_shift_held());
    }

    #[test]
    fn test_drag_without_press_has_zero_offset() {
        let (mut ctrl, mut cam, mut ori) = setup();
        let out = ctrl.handle(&InputEvent::MouseDragged { x: 50.0, y: 60.0 }, &mut cam, &mut ori);
        assert_eq!(out, DragOutcome::Rotated { yaw: 0.0, pitch: 0.0 });
        assert_eq!(ctrl.state(), DragState::Dragging { origin: Vector2::new(50.0, 60.0) });
    }

    #[test]
    fn test_events_from_json() {
        let json = r#"[
            {"_type": "KeyPressed", "Key": "Shift"},
            {"_type": "KeyPressed", "Key": "Control"},
            {"_type": "MousePressed", "X": "10", "Y": 20},
            {"_type": "MouseDragged", "X": 12.5, "Y": 20}
        ]"#;
        let events: Vec<InputEvent> = serde_json::from_str(json).unwrap();
        assert_eq!(events[0], InputEvent::KeyPressed { key: Key::Shift });
        assert_eq!(events[1], InputEvent::KeyPressed { key: Key::Other });
        assert_eq!(events[2], InputEvent::MousePressed { x: 10.0, y: 20.0 });
        assert_eq!(events[3], InputEvent::MouseDragged { x: 12.5, y: 20.0 });

        let lower: Result<InputEvent, _> = serde_json::from_str(r#"{"_type": "MousePressed", "x": 1, "y": 2}"#);
        assert!(lower.is_err());
    }
}
