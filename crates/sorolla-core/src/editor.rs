//! The crop editor: crop overlay and transform engine wired together.
//!
//! Gestures go to the [`CropOverlay`]; the events it reports are applied to
//! the [`TransformEngine`]. Both animate independently and in parallel, and
//! the editor keeps the host's frame callback registered exactly while either
//! of them is running.

use crate::animation::FrameScheduler;
use crate::config::{ConfigError, EditorConfig};
use crate::export::{CropPlan, ExportError};
use crate::geometry::{Axis, Insets, Point, Rect, Size, Vector};
use crate::overlay::{CropOverlay, DragState, OverlayEvent};
use crate::transform::{AffineMatrix, ImageTransform, TransformEngine};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which editing panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    None,
    /// Crop and transform gestures are live.
    Transform,
    /// Color settings; the crop overlay ignores pointers.
    Settings,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderState {
    /// The crop rect to draw, mid-animation if one is running.
    pub crop_rect: Rect,
    /// Where the untransformed image is laid out.
    pub image_rect: Rect,
    /// The image transform to draw, mid-animation if one is running.
    pub transform: ImageTransform,
    /// `transform` flattened around the view center.
    pub matrix: AffineMatrix,
}

/// Crop editor over a host-provided frame scheduler.
pub struct CropEditor<S: FrameScheduler> {
    mode: Mode,
    overlay: CropOverlay,
    engine: TransformEngine,
    scheduler: S,
}

impl<S: FrameScheduler> CropEditor<S> {
    pub fn new(config: EditorConfig, scheduler: S) -> Result<Self, ConfigError> {
        if let Err(e) = config.validate() {
            warn!("rejecting editor config: {e}");
            return Err(e);
        }
        Ok(Self {
            mode: Mode::None,
            overlay: CropOverlay::new(&config),
            engine: TransformEngine::new(&config),
            scheduler,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch panels.
    ///
    /// A gesture still in progress when leaving [`Mode::Transform`] is
    /// finished first, so the crop and the image settle together.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode == mode {
            return;
        }
        if self.mode == Mode::Transform && self.overlay.drag_state() != DragState::Idle {
            debug!("finishing drag before leaving transform mode");
            self.on_drag_end();
        }
        debug!("mode {:?} -> {mode:?}", self.mode);
        self.mode = mode;
    }

    pub fn overlay(&self) -> &CropOverlay {
        &self.overlay
    }

    pub fn engine(&self) -> &TransformEngine {
        &self.engine
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Lay out a freshly loaded image.
    ///
    /// The working rect is `view_bounds` less `padding`; the image is
    /// aspect-fitted into it and the crop starts out covering the image.
    /// Returns `false`, leaving the editor unconfigured, for degenerate sizes.
    pub fn layout_image(&mut self, view_bounds: Rect, padding: Insets, image_size: Size) -> bool {
        let working = view_bounds.inset(padding);
        if !working.is_valid() || !image_size.is_positive() {
            warn!("cannot lay out {image_size:?} in {working:?}");
            self.clear();
            return false;
        }

        let image_rect = Rect::aspect_fit(image_size, &working);
        self.overlay.set_bounds(working, image_rect);
        self.engine.set_frame(working, image_size);
        self.sync_frames();
        true
    }

    /// Forget the current image.
    pub fn clear(&mut self) {
        self.overlay.clear();
        self.engine.clear();
        self.sync_frames();
    }

    /// Begin a pointer gesture. Returns whether the editor claims it.
    pub fn on_drag_start(&mut self, point: Point) -> bool {
        if self.mode != Mode::Transform {
            return false;
        }
        self.engine.cancel_animation();
        if let Some(extent) = self.engine.image_extent() {
            self.overlay.set_drag_limit(extent);
        }
        let claimed = self.overlay.on_drag_start(point);
        self.sync_frames();
        claimed
    }

    pub fn on_drag_move(&mut self, delta: Vector) {
        if let Some(event) = self.overlay.on_drag_move(delta) {
            self.apply(event);
        }
    }

    pub fn on_drag_end(&mut self) {
        if let Some(event) = self.overlay.on_drag_end() {
            self.apply(event);
        }
        self.sync_frames();
    }

    /// Turn crop and image a quarter counter-clockwise.
    pub fn rotate_90_ccw(&mut self) -> bool {
        let Some(turn) = self.overlay.rotate_90_ccw() else {
            return false;
        };
        self.engine.rotate_90_ccw(turn.scale, turn.from_rect, turn.to_rect);
        self.sync_frames();
        true
    }

    /// Mirror the image across `axis` through the center of the crop.
    pub fn mirror(&mut self, axis: Axis) -> bool {
        let Some(crop) = self.overlay.crop_rect() else {
            return false;
        };
        let mirrored = self.engine.mirror(axis, crop);
        self.sync_frames();
        mirrored
    }

    /// Undo every transform and return the crop to the image bounds, animated.
    pub fn cancel_transform(&mut self) -> bool {
        if !self.overlay.reset_overlay() {
            return false;
        }
        self.engine.reset(true);
        self.sync_frames();
        true
    }

    /// Whether the host should keep delivering frames.
    pub fn needs_frame(&self) -> bool {
        self.overlay.is_animating() || self.engine.is_animating()
    }

    /// Advance both animations to `now` and report what to draw.
    pub fn tick(&mut self, now: Duration) -> Option<RenderState> {
        self.overlay.tick(now);
        self.engine.tick(now);
        self.sync_frames();
        self.render_state()
    }

    /// What to draw right now, or `None` before an image is laid out.
    pub fn render_state(&self) -> Option<RenderState> {
        let crop_rect = self.overlay.displayed_rect()?;
        let view = self.engine.view_frame()?;
        let image_size = self.engine.image_size()?;
        let transform = self.engine.displayed();
        Some(RenderState {
            crop_rect,
            image_rect: Rect::aspect_fit(image_size, &view),
            transform,
            matrix: transform.to_matrix(view.center()),
        })
    }

    /// Plan the export of the committed crop.
    pub fn export_plan(&self) -> Result<CropPlan, ExportError> {
        let (Some(view), Some(image_size), Some(crop)) = (
            self.engine.view_frame(),
            self.engine.image_size(),
            self.overlay.crop_rect(),
        ) else {
            return Err(ExportError::EmptyRegion);
        };
        CropPlan::new(&self.engine.transform(), &view, image_size, &crop)
    }

    fn apply(&mut self, event: OverlayEvent) {
        if self.mode != Mode::Transform {
            debug!("dropping {event:?} outside transform mode");
            return;
        }
        match event {
            OverlayEvent::Scale(scale) => {
                self.engine.refit(scale.scale, scale.anchor, scale.from_rect, scale.to_rect);
            }
            OverlayEvent::Move(delta) => {
                self.engine.move_by(delta);
            }
            OverlayEvent::MoveFinished(rect) => {
                self.engine.move_within_bounds(rect);
            }
        }
    }

    fn sync_frames(&mut self) {
        if self.needs_frame() {
            self.scheduler.request_frames();
        } else {
            self.scheduler.cancel_frames();
        }
    }
}

impl<S: FrameScheduler> Drop for CropEditor<S> {
    fn drop(&mut self) {
        self.scheduler.cancel_frames();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::ManualScheduler;
    use crate::geometry::Anchor;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Scheduler whose counters outlive the editor.
    #[derive(Clone, Default)]
    struct SharedScheduler(Rc<RefCell<ManualScheduler>>);

    impl FrameScheduler for SharedScheduler {
        fn request_frames(&mut self) {
            self.0.borrow_mut().request_frames();
        }

        fn cancel_frames(&mut self) {
            self.0.borrow_mut().cancel_frames();
        }
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    /// 300x300 working rect, 600x300 image laid out at (0, 75)-(300, 225).
    fn editor() -> CropEditor<ManualScheduler> {
        let mut editor = CropEditor::new(EditorConfig::default(), ManualScheduler::new()).unwrap();
        assert!(editor.layout_image(
            Rect::new(0.0, 0.0, 320.0, 320.0),
            Insets::uniform(10.0),
            Size::new(600.0, 300.0),
        ));
        editor.set_mode(Mode::Transform);
        editor
    }

    fn run_to_end(editor: &mut CropEditor<ManualScheduler>) {
        editor.tick(ms(0));
        editor.tick(ms(10_000));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EditorConfig {
            min_crop_edge: 0.0,
            ..EditorConfig::default()
        };
        assert!(CropEditor::new(config, ManualScheduler::new()).is_err());
    }

    #[test]
    fn test_layout_image() {
        let editor = editor();
        let working = Rect::new(10.0, 10.0, 310.0, 310.0);
        let image_rect = Rect::new(10.0, 85.0, 310.0, 235.0);
        assert_eq!(editor.overlay().working_rect(), Some(working));
        assert_eq!(editor.overlay().crop_rect(), Some(image_rect));
        assert_eq!(editor.engine().content_clipping_rect(), Some(image_rect));

        let state = editor.render_state().unwrap();
        assert_eq!(state.image_rect, image_rect);
        assert!(state.transform.is_identity());
        assert!(!editor.needs_frame());
    }

    #[test]
    fn test_degenerate_layout_leaves_editor_unconfigured() {
        let mut editor = editor();
        assert!(!editor.layout_image(
            Rect::new(0.0, 0.0, 320.0, 320.0),
            Insets::uniform(10.0),
            Size::new(0.0, 300.0),
        ));
        assert!(editor.render_state().is_none());
        assert!(!editor.rotate_90_ccw());
        assert!(!editor.mirror(Axis::Horizontal));
        assert!(!editor.cancel_transform());
        assert!(editor.tick(ms(0)).is_none());
    }

    #[test]
    fn test_drags_ignored_outside_transform_mode() {
        let mut editor = editor();
        editor.set_mode(Mode::Settings);
        assert!(!editor.on_drag_start(Point::new(160.0, 160.0)));
        editor.set_mode(Mode::None);
        assert!(!editor.on_drag_start(Point::new(160.0, 160.0)));
    }

    #[test]
    fn test_anchor_drag_refits_image() {
        let mut editor = editor();
        // Drag the right edge in by 100.
        assert!(editor.on_drag_start(Point::new(310.0, 160.0)));
        editor.on_drag_move(Vector::new(-100.0, 0.0));
        assert_eq!(
            editor.overlay().crop_rect(),
            Some(Rect::new(10.0, 85.0, 210.0, 235.0))
        );
        editor.on_drag_end();

        assert!(editor.needs_frame());
        assert!(editor.scheduler().is_active());

        // Crop refits to the full working width, image zooms by 1.5 about the left edge.
        let crop = editor.overlay().crop_rect().unwrap();
        assert_eq!(crop.left, 10.0);
        assert_eq!(crop.right, 310.0);
        let transform = editor.engine().transform();
        assert!((transform.scale.dx - 1.5).abs() < 1e-9);
        assert_eq!(transform.scale.dx, transform.scale.dy);

        run_to_end(&mut editor);
        assert!(!editor.needs_frame());
        assert!(!editor.scheduler().is_active());
        assert_eq!(editor.scheduler().requests(), 1);
        assert_eq!(editor.scheduler().cancellations(), 1);
        assert_eq!(editor.render_state().unwrap().transform, transform);
    }

    #[test]
    fn test_anchor_drag_stays_on_letterboxed_image() {
        let mut editor = editor();
        let image_rect = Rect::new(10.0, 85.0, 310.0, 235.0);
        assert!(editor.on_drag_start(Point::new(160.0, 85.0)));
        editor.on_drag_move(Vector::new(0.0, -60.0));
        assert_eq!(editor.overlay().crop_rect(), Some(image_rect));
        editor.on_drag_end();

        let plan = editor.export_plan().unwrap();
        assert_eq!((plan.region.width, plan.region.height), (600, 300));
    }

    #[test]
    fn test_drag_limit_follows_zoomed_image() {
        let mut editor = editor();
        editor.on_drag_start(Point::new(310.0, 160.0));
        editor.on_drag_move(Vector::new(-100.0, 0.0));
        editor.on_drag_end();
        run_to_end(&mut editor);

        // Zoomed 1.5x: the image now reaches above its laid-out top edge.
        let crop = editor.overlay().crop_rect().unwrap();
        let extent = editor.engine().image_extent().unwrap();
        assert!((crop.top - 47.5).abs() < 1e-9);
        assert!((extent.top - crop.top).abs() < 1e-9);

        assert!(editor.on_drag_start(crop.anchor_point(Anchor::Top)));
        editor.on_drag_move(Vector::new(0.0, 50.0));
        editor.on_drag_move(Vector::new(0.0, -100.0));
        let dragged = editor.overlay().crop_rect().unwrap();
        assert!((dragged.top - extent.top).abs() < 1e-9);
    }

    #[test]
    fn test_leaving_transform_mode_finishes_drag() {
        let mut editor = editor();
        assert!(editor.on_drag_start(Point::new(310.0, 160.0)));
        editor.on_drag_move(Vector::new(-100.0, 0.0));
        editor.set_mode(Mode::Settings);

        assert_eq!(editor.overlay().drag_state(), DragState::Idle);
        let crop = editor.overlay().crop_rect().unwrap();
        assert!((crop.width() - 300.0).abs() < 1e-9);
        assert!((crop.top - 47.5).abs() < 1e-9);
        let scale = editor.engine().transform().scale;
        assert!((scale.dx - 1.5).abs() < 1e-9);

        // The exported region has the crop's aspect ratio.
        let plan = editor.export_plan().unwrap();
        assert_eq!((plan.region.width, plan.region.height), (400, 300));

        editor.on_drag_move(Vector::new(-50.0, 0.0));
        editor.on_drag_end();
        assert_eq!(editor.overlay().crop_rect(), Some(crop));
    }

    #[test]
    fn test_move_drag_pans_and_settles() {
        let mut editor = editor();
        assert!(editor.on_drag_start(Point::new(160.0, 160.0)));
        editor.on_drag_move(Vector::new(30.0, 0.0));
        assert!(!editor.needs_frame());
        let extent = editor.engine().image_extent().unwrap();
        assert_eq!(extent.left, 40.0);

        editor.on_drag_end();
        assert!(editor.needs_frame());
        let extent = editor.engine().image_extent().unwrap();
        assert_eq!(extent.left, 10.0);
    }

    #[test]
    fn test_drag_start_cancels_running_animations() {
        let mut editor = editor();
        editor.rotate_90_ccw();
        assert!(editor.needs_frame());

        editor.on_drag_start(Point::new(0.0, 0.0));
        assert!(!editor.needs_frame());
        assert!(!editor.scheduler().is_active());
    }

    #[test]
    fn test_rotate_updates_crop_and_image_together() {
        let mut editor = editor();
        assert!(editor.rotate_90_ccw());
        let crop = editor.overlay().crop_rect().unwrap();
        // 300x150 turned upright and fitted: 150x300 at the same zoom.
        assert_eq!(crop, Rect::new(85.0, 10.0, 235.0, 310.0));
        let transform = editor.engine().transform();
        assert_eq!(transform.rotation_degrees, -90.0);
        assert_eq!(transform.scale, Vector::new(1.0, 1.0));
        assert_eq!(editor.engine().content_clipping_rect(), Some(crop));
    }

    #[test]
    fn test_mirror_works_in_every_mode() {
        let mut editor = editor();
        editor.set_mode(Mode::Settings);
        assert!(editor.mirror(Axis::Vertical));
        assert_eq!(editor.engine().transform().scale, Vector::new(1.0, -1.0));
        assert!(!editor.needs_frame());
    }

    #[test]
    fn test_cancel_transform() {
        let mut editor = editor();
        let original = editor.overlay().original_rect();
        editor.on_drag_start(Point::new(10.0, 85.0));
        assert_eq!(
            editor.overlay().drag_state(),
            DragState::Anchor(Anchor::TopLeft)
        );
        editor.on_drag_move(Vector::new(40.0, 20.0));
        editor.on_drag_end();
        editor.mirror(Axis::Horizontal);
        run_to_end(&mut editor);

        assert!(editor.cancel_transform());
        assert!(editor.needs_frame());
        run_to_end(&mut editor);

        let state = editor.render_state().unwrap();
        assert!(state.transform.is_identity());
        assert_eq!(Some(state.crop_rect), original);
    }

    #[test]
    fn test_export_plan_tracks_crop() {
        let mut editor = editor();
        let full = editor.export_plan().unwrap();
        assert_eq!((full.region.width, full.region.height), (600, 300));

        editor.on_drag_start(Point::new(310.0, 160.0));
        editor.on_drag_move(Vector::new(-150.0, 0.0));
        editor.on_drag_end();
        let half = editor.export_plan().unwrap();
        assert_eq!(half.region.x, 0);
        assert_eq!((half.region.width, half.region.height), (300, 300));
    }

    #[test]
    fn test_drop_cancels_frames() {
        let shared = SharedScheduler::default();
        let mut editor = CropEditor::new(EditorConfig::default(), shared.clone()).unwrap();
        editor.layout_image(
            Rect::new(0.0, 0.0, 300.0, 300.0),
            Insets::default(),
            Size::new(100.0, 100.0),
        );
        editor.rotate_90_ccw();
        assert!(shared.0.borrow().is_active());

        drop(editor);
        assert!(!shared.0.borrow().is_active());
    }
}
