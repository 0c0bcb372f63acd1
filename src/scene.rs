/*

    Declare Scene consisting of the window, camera, tracked
    nodes and the overlay drawn on top of them.

    RootScene mirrors the JSON file. Scene is the runtime
    state built from it: events go in through dispatch( ),
    the overlay is rebuilt after every drag sample.

    Everything runs on the caller's thread, each event is
    fully applied (transform update + overlay rebuild) before
    dispatch( ) returns.

    @date: 2 Oct, 2025
    @author: Bartu
*/

use crate::camera::Camera;
use crate::controller::{DragOutcome, DragRotationController, InputEvent};
use crate::json_structs::SingleOrVec;
use crate::orientation::{PitchAxis, RotationMode, SceneOrientation};
use crate::overlay::{Color, ControlWidget, OverlayRectangle, OverlaySurface, ScreenBoundsTracker, DEFAULT_DECORATION_OFFSET};
use crate::projector::ScreenProjector;
use crate::shapes::{HeapAllocatedShape, ShapeJSON, ShapeList};
use crate::window::Window;
use crate::prelude::*;


#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct RootScene {
    pub window: Window,
    pub camera: Camera,
    pub overlay: OverlayConfig,
    pub rotation: RotationConfig,
    pub objects: SingleOrVec<ShapeJSON>,
    pub events: SingleOrVec<InputEvent>,
}

#[derive(Debug, Deserialize, Clone, SmartDefault)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct OverlayConfig {
    #[default(DEFAULT_DECORATION_OFFSET)]
    #[serde(deserialize_with = "deser_int")]
    pub decoration_offset: Int,

    #[default(Color::LIGHT_BLUE)]
    pub stroke: Color,

    // Recolors every bounds rectangle when the surface is refreshed
    #[default(Some(Color::DARK_GRAY))]
    pub refresh_stroke: Option<Color>,

    #[default(Some(ControlWidget::default()))]
    pub control: Option<ControlWidget>,

    #[default(Vector3::new(255.0, 255.0, 255.0))]
    #[serde(deserialize_with = "deser_vec3")]
    pub background_color: Vector3,

    #[default = "overlay.png"]
    pub image_name: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct RotationConfig {
    pub mode: RotationMode,
    pub pitch_axis: PitchAxis,
}

#[derive(Debug)]
pub struct Scene {
    pub window: Window,
    pub camera: Camera,
    pub orientation: SceneOrientation,
    nodes: ShapeList,
    tracker: ScreenBoundsTracker,
    surface: OverlaySurface,
    controller: DragRotationController,
    refresh_count: usize,
}

impl Scene {
    pub fn new(window: Window, camera: Camera, nodes: ShapeList, tracker: ScreenBoundsTracker, surface: OverlaySurface, rotation: &RotationConfig) -> Self {
        let mut scene = Scene {
            window,
            camera,
            orientation: SceneOrientation::new(rotation.mode),
            nodes,
            tracker,
            surface,
            controller: DragRotationController::new(rotation.pitch_axis),
            refresh_count: 0,
        };
        // The overlay is shown before any input arrives
        scene.refresh_overlay();
        scene
    }

    /// Build the runtime scene, keeping the object order of the file
    pub fn from_root(root: &RootScene) -> Self {
        let nodes: ShapeList = root.objects.all().into_iter().map(ShapeJSON::into_node).collect();
        info!(">> There are {} nodes in the scene.", nodes.len());
        if let Err(e) = root.camera.validate() {
            warn!("Camera is invalid, overlay may be empty: {}", e);
        }

        let tracker = ScreenBoundsTracker::new(root.overlay.decoration_offset, root.overlay.stroke);
        let surface = OverlaySurface::new(root.overlay.control.clone(), root.overlay.refresh_stroke);
        Self::new(root.window.clone(), root.camera.clone(), nodes, tracker, surface, &root.rotation)
    }

    pub fn nodes(&self) -> &[HeapAllocatedShape] {
        &self.nodes
    }

    /// Remove the first node with the given label. The next refresh
    /// only sees the remaining nodes.
    pub fn remove_node(&mut self, label: &str) -> Option<HeapAllocatedShape> {
        let idx = self.nodes.iter().position(|n| n.label() == label)?;
        Some(self.nodes.remove(idx))
    }

    pub fn controller(&self) -> &DragRotationController {
        &self.controller
    }

    pub fn projector(&self) -> ScreenProjector<'_> {
        ScreenProjector::new(self.orientation.to_mat4(), &self.camera, self.window.viewport())
    }

    /// Bounds of the live nodes under the current transforms, without touching the surface
    pub fn compute_overlay(&self) -> Vec<OverlayRectangle> {
        self.tracker.compute_overlay(&self.nodes, &self.projector(), &self.window)
    }

    pub fn refresh_overlay(&mut self) {
        let rects = self.compute_overlay();
        debug_assert_eq!(rects.len(), self.nodes.len());
        self.surface.replace(rects);
        self.refresh_count += 1;
        debug!("Overlay refreshed ({} items)", self.surface.items().len());
    }

    pub fn overlay(&self) -> &OverlaySurface {
        &self.surface
    }

    pub fn refresh_count(&self) -> usize {
        self.refresh_count
    }

    pub fn dispatch(&mut self, event: &InputEvent) -> DragOutcome {
        let outcome = self.controller.handle(event, &mut self.camera, &mut self.orientation);
        if outcome.needs_refresh() {
            self.refresh_overlay();
        }
        outcome
    }

    pub fn replay(&mut self, events: &[InputEvent]) {
        for event in events {
            self.dispatch(event);
        }
        info!("Replayed {} events, {} rotations applied, camera depth {}", events.len(), self.orientation.applied_count(), self.camera.depth());
    }
}
