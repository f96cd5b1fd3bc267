//! Board stage: painting and pointer-to-gesture mapping
//!
//! Everything here is presentation glue around `dragboard-core`. egui's
//! click/drag disambiguation already arbitrates tap vs drag, so each pointer
//! interaction reaches the board as exactly one of the two.

use eframe::egui;
use kurbo::{Point, Vec2};
use uuid::Uuid;

use dragboard_core::board::Board;
use dragboard_core::config::TransformConfig;
use dragboard_core::constraint::ContainerBounds;
use dragboard_core::geometry;
use dragboard_core::gesture::ResizeAxis;
use dragboard_core::pose::Pose;

use crate::config::EditorConfig;

const BODY_FILL: egui::Color32 = egui::Color32::from_rgb(74, 144, 226);
const SELECTED_OUTLINE: egui::Color32 = egui::Color32::from_rgb(255, 215, 0);

/// The six control handles around a selected widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Handle {
    Delete,
    Copy,
    ResizeWidth,
    ResizeHeight,
    ResizeDiagonal,
    Rotate,
}

impl Handle {
    fn glyph(self) -> &'static str {
        match self {
            Handle::Delete => "✕",
            Handle::Copy => "⧉",
            Handle::ResizeWidth => "↔",
            Handle::ResizeHeight => "↕",
            Handle::ResizeDiagonal => "⤡",
            Handle::Rotate => "↻",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum GestureKind {
    Drag,
    Resize(ResizeAxis),
    Rotate,
}

#[derive(Debug, Clone, Copy)]
struct ActiveGesture {
    id: Uuid,
    kind: GestureKind,
}

/// What the pointer is over, in priority order
enum HitTarget {
    Handle(Uuid, Handle),
    Body(Uuid),
    Background,
}

pub struct BoardApp {
    board: Board,
    config: EditorConfig,
    active: Option<ActiveGesture>,
    /// Cumulative pointer translation since gesture start
    accumulated: Vec2,
}

impl BoardApp {
    pub fn new(config: EditorConfig) -> Self {
        let container = ContainerBounds::new(config.container_width, config.container_height);
        let mut board = Board::new(container, config.transform);
        board.spawn(Pose::default());
        Self {
            board,
            config,
            active: None,
            accumulated: Vec2::ZERO,
        }
    }

    /// Handle positions in board coordinates for a selected widget
    fn handle_positions(pose: &Pose, config: &TransformConfig) -> [(Handle, Point); 6] {
        let frame_w = pose.width + 2.0 * config.handle_offset;
        let frame_h = pose.height + 2.0 * config.handle_offset;
        let center = pose.center();
        let place = |local: Vec2| center + geometry::rotate_vec(local, pose.rotation);
        [
            (Handle::Delete, place(Vec2::new(-frame_w / 2.0, -frame_h / 2.0))),
            (Handle::Copy, place(Vec2::new(frame_w / 2.0, -frame_h / 2.0))),
            (Handle::Rotate, place(Vec2::new(-frame_w / 2.0, frame_h / 2.0))),
            (
                Handle::ResizeDiagonal,
                place(Vec2::new(frame_w / 2.0, frame_h / 2.0)),
            ),
            (Handle::ResizeWidth, place(Vec2::new(frame_w / 2.0, 0.0))),
            (Handle::ResizeHeight, place(Vec2::new(0.0, frame_h / 2.0))),
        ]
    }

    /// Whether a board-space point lies inside the widget's rotated body
    fn hits_body(pose: &Pose, point: Point) -> bool {
        let local = geometry::local_delta(point - pose.center(), pose.rotation);
        local.x.abs() <= pose.width / 2.0 && local.y.abs() <= pose.height / 2.0
    }

    /// Classify a pointer position: selected widget's handles win, then
    /// widget bodies front to back, then the background
    fn hit_test(&self, point: Point) -> HitTarget {
        let radius = self.config.transform.handle_size / 2.0;
        if let Some(selected) = self.board.selected() {
            if let Some(widget) = self.board.widgets().iter().find(|w| w.id == selected) {
                let pose = widget.pose();
                for (handle, pos) in Self::handle_positions(&pose, &self.config.transform) {
                    if (point - pos).hypot() <= radius {
                        return HitTarget::Handle(selected, handle);
                    }
                }
            }
        }
        for widget in self.board.widgets().iter().rev() {
            if Self::hits_body(&widget.pose(), point) {
                return HitTarget::Body(widget.id);
            }
        }
        HitTarget::Background
    }

    fn on_tap(&mut self, point: Point) {
        match self.hit_test(point) {
            HitTarget::Handle(id, Handle::Delete) => self.board.request_delete(id),
            HitTarget::Handle(id, Handle::Copy) => self.board.request_copy(id),
            HitTarget::Handle(..) => {}
            HitTarget::Body(id) => self.board.tap_widget(id),
            HitTarget::Background => self.board.tap_background(),
        }
    }

    fn on_drag_start(&mut self, point: Point) {
        self.accumulated = Vec2::ZERO;
        let started = match self.hit_test(point) {
            HitTarget::Handle(id, Handle::ResizeWidth) => self
                .board
                .begin_resize(id, ResizeAxis::Width)
                .then_some(ActiveGesture {
                    id,
                    kind: GestureKind::Resize(ResizeAxis::Width),
                }),
            HitTarget::Handle(id, Handle::ResizeHeight) => self
                .board
                .begin_resize(id, ResizeAxis::Height)
                .then_some(ActiveGesture {
                    id,
                    kind: GestureKind::Resize(ResizeAxis::Height),
                }),
            HitTarget::Handle(id, Handle::ResizeDiagonal) => self
                .board
                .begin_resize(id, ResizeAxis::Diagonal)
                .then_some(ActiveGesture {
                    id,
                    kind: GestureKind::Resize(ResizeAxis::Diagonal),
                }),
            HitTarget::Handle(id, Handle::Rotate) => {
                self.board.begin_rotate(id).then_some(ActiveGesture {
                    id,
                    kind: GestureKind::Rotate,
                })
            }
            HitTarget::Handle(_, Handle::Delete | Handle::Copy) => None,
            HitTarget::Body(id) => self.board.begin_drag(id).then_some(ActiveGesture {
                id,
                kind: GestureKind::Drag,
            }),
            HitTarget::Background => None,
        };
        self.active = started;
    }

    fn on_drag_update(&mut self, delta: Vec2) {
        self.accumulated += delta;
        let Some(active) = self.active else { return };
        match active.kind {
            GestureKind::Drag => self.board.update_drag(active.id, self.accumulated),
            GestureKind::Resize(_) => {
                let _ = self.board.update_resize(active.id, self.accumulated);
            }
            GestureKind::Rotate => self.board.update_rotate(active.id, self.accumulated),
        }
    }

    fn on_drag_end(&mut self) {
        if let Some(active) = self.active.take() {
            self.board.finish_gesture(active.id);
        }
    }

    fn paint(&self, painter: &egui::Painter, origin: egui::Pos2) {
        let to_screen =
            |p: Point| egui::pos2(origin.x + p.x as f32, origin.y + p.y as f32);

        // Container border
        let container = self.board.container();
        let frame = [
            to_screen(Point::new(0.0, 0.0)),
            to_screen(Point::new(container.width, 0.0)),
            to_screen(Point::new(container.width, container.height)),
            to_screen(Point::new(0.0, container.height)),
        ];
        painter.add(egui::Shape::closed_line(
            frame.to_vec(),
            egui::Stroke::new(1.0, egui::Color32::GRAY),
        ));

        for widget in self.board.widgets() {
            let pose = widget.pose();
            let corners: Vec<egui::Pos2> =
                pose.screen_corners().iter().map(|&p| to_screen(p)).collect();

            painter.add(egui::Shape::convex_polygon(
                corners.clone(),
                BODY_FILL,
                egui::Stroke::NONE,
            ));

            if self.board.is_selected(widget.id) {
                let mut outline = corners.clone();
                outline.push(corners[0]);
                painter.extend(egui::Shape::dashed_line(
                    &outline,
                    egui::Stroke::new(2.0, SELECTED_OUTLINE),
                    6.0,
                    4.0,
                ));

                let radius = (self.config.transform.handle_size / 2.0) as f32;
                for (handle, pos) in Self::handle_positions(&pose, &self.config.transform) {
                    let center = to_screen(pos);
                    painter.circle_filled(center, radius, egui::Color32::WHITE);
                    painter.text(
                        center,
                        egui::Align2::CENTER_CENTER,
                        handle.glyph(),
                        egui::FontId::proportional(14.0),
                        egui::Color32::DARK_GRAY,
                    );
                }
            }
        }
    }
}

impl eframe::App for BoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.board.pump_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Add widget").clicked() {
                    self.board.spawn(Pose::default());
                }
                ui.label(format!(
                    "{} widget(s), selected: {}",
                    self.board.widgets().len(),
                    self.board
                        .selected()
                        .map(|id| id.to_string())
                        .unwrap_or_else(|| "none".into()),
                ));
            });
            ui.separator();

            let container = self.board.container();
            let size = egui::vec2(container.width as f32, container.height as f32);
            let (response, painter) =
                ui.allocate_painter(size, egui::Sense::click_and_drag());
            let origin = response.rect.min;

            let to_board = |pos: egui::Pos2| {
                Point::new((pos.x - origin.x) as f64, (pos.y - origin.y) as f64)
            };

            if response.drag_started() {
                if let Some(pos) = response.interact_pointer_pos() {
                    self.on_drag_start(to_board(pos));
                }
            }
            if response.dragged() {
                let delta = response.drag_delta();
                self.on_drag_update(Vec2::new(delta.x as f64, delta.y as f64));
            }
            if response.drag_stopped() {
                self.on_drag_end();
            }
            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    self.on_tap(to_board(pos));
                }
            }

            self.paint(&painter, origin);
        });

        if self.active.is_some() {
            ctx.request_repaint();
        }
    }
}
