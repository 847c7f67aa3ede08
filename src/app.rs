use crate::model::Tool;
use crate::save;
use crate::session::DrawingSession;
use crate::settings::PaintSettings;
use crate::surface::Rgba;
use crate::transform::TriangleTransform;
use eframe::egui::{
    self, Color32, PointerButton, Pos2, Rect, Sense, Stroke, TextureHandle, TextureOptions,
};

const MAX_STROKE_WIDTH: u32 = 64;

pub struct PaintApp {
    session: DrawingSession,
    tex: Option<TextureHandle>,
    tex_revision: u64,
    color: Rgba,
    zoom: f32,
    last_pointer: Option<(i32, i32)>,
    transform_x: f32,
    transform_y: f32,
    status: Option<String>,
}

impl PaintApp {
    pub fn new(settings: &PaintSettings) -> Self {
        let mut session = DrawingSession::new(settings.canvas_width, settings.canvas_height)
            .with_cap_fraction(settings.fill_cap_fraction);
        let color = settings.stroke_color();
        session.set_color(color);
        session.set_stroke_width(settings.stroke_width);
        Self {
            session,
            tex: None,
            tex_revision: 0,
            color,
            zoom: 1.0,
            last_pointer: None,
            transform_x: 0.0,
            transform_y: 0.0,
            status: None,
        }
    }

    fn palette() -> [Rgba; 5] {
        [
            Rgba::opaque(0, 0, 0),
            Rgba::opaque(231, 76, 60),
            Rgba::opaque(46, 204, 113),
            Rgba::opaque(52, 152, 219),
            Rgba::opaque(241, 196, 15),
        ]
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    /// Re-upload the canvas texture when the committed surface changed or a
    /// preview shape is in flight.
    fn refresh_texture(&mut self, ctx: &egui::Context) {
        let needs_upload = self.tex.is_none()
            || self.tex_revision != self.session.revision()
            || self.session.has_active_geometry();
        if !needs_upload {
            return;
        }

        let composed = self.session.compose_preview();
        let size = [composed.width() as usize, composed.height() as usize];
        let image = egui::ColorImage::from_rgba_unmultiplied(size, composed.as_bytes());
        match &mut self.tex {
            Some(tex) => tex.set(image, TextureOptions::NEAREST),
            None => self.tex = Some(ctx.load_texture("canvas", image, TextureOptions::NEAREST)),
        }
        self.tex_revision = self.session.revision();
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Tool");
            let mut tool = self.session.tool();
            let before = tool;
            ui.selectable_value(&mut tool, Tool::Freehand, "Free");
            ui.selectable_value(&mut tool, Tool::Line, "Line");
            ui.selectable_value(&mut tool, Tool::SnapLine, "Snap Line");
            ui.selectable_value(&mut tool, Tool::Circle, "Circle");
            ui.selectable_value(&mut tool, Tool::Ellipse, "Ellipse");
            ui.selectable_value(&mut tool, Tool::Triangle, "Triangle");
            ui.selectable_value(&mut tool, Tool::Square, "Square");
            ui.selectable_value(&mut tool, Tool::Rect, "Rect");
            ui.selectable_value(&mut tool, Tool::Polygon, "Polygon");
            ui.selectable_value(&mut tool, Tool::Fill, "Fill");
            if tool != before {
                self.session.set_tool(tool);
            }
        });

        ui.horizontal(|ui| {
            ui.label("Color");
            for color in Self::palette() {
                let selected = self.color == color;
                let fill = Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a);
                let mut button =
                    egui::Button::new("  ").fill(fill).stroke(Stroke::new(1.0, Color32::BLACK));
                if selected {
                    button = button.stroke(Stroke::new(2.0, Color32::WHITE));
                }
                if ui.add(button).clicked() {
                    self.color = color;
                }
            }
            let mut rgba = [self.color.r, self.color.g, self.color.b, self.color.a];
            if ui.color_edit_button_srgba_unmultiplied(&mut rgba).changed() {
                self.color = Rgba::rgba(rgba[0], rgba[1], rgba[2], rgba[3]);
            }
            self.session.set_color(self.color);

            ui.separator();
            let width = self.session.style().width;
            ui.label(format!("Width {width}"));
            if ui.button("−").clicked() {
                self.session.set_stroke_width(width.saturating_sub(1).max(1));
            }
            if ui.button("+").clicked() {
                self.session.set_stroke_width((width + 1).min(MAX_STROKE_WIDTH));
            }

            ui.separator();
            if ui
                .add_enabled(self.session.can_undo(), egui::Button::new("Undo"))
                .clicked()
            {
                self.session.undo();
            }
            if ui
                .add_enabled(self.session.can_redo(), egui::Button::new("Redo"))
                .clicked()
            {
                self.session.redo();
            }
            if ui.button("Clear").clicked() {
                self.session.clear();
            }
            if ui.button("Save").clicked() {
                match save::export_timestamped(self.session.surface()) {
                    Ok(path) => self.set_status(format!("Saved {}", path.display())),
                    Err(err) => {
                        tracing::error!(?err, "canvas export failed");
                        self.set_status(format!("Save failed: {err}"));
                    }
                }
            }
        });

        if self.session.tool() == Tool::Triangle {
            self.transform_panel(ui);
        }

        if let Some(status) = &self.status {
            ui.label(status.clone());
        }
    }

    fn transform_panel(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("X");
            ui.add(egui::DragValue::new(&mut self.transform_x).speed(1.0));
            ui.label("Y");
            ui.add(egui::DragValue::new(&mut self.transform_y).speed(1.0));

            let x = self.transform_x;
            let y = self.transform_y;
            let mut requested = None;
            if ui.button("Translate").clicked() {
                requested = Some(TriangleTransform::Translate { dx: x, dy: y });
            }
            if ui.button("Scale").clicked() {
                // Empty inputs fall back the way the original tool did: a
                // zero X means factor 1, a zero Y mirrors X.
                let sx = if x == 0.0 { 1.0 } else { x };
                let sy = if y == 0.0 { sx } else { y };
                requested = Some(TriangleTransform::Scale { sx, sy });
            }
            if ui.button("Rotate").clicked() {
                requested = Some(TriangleTransform::Rotate { degrees: x });
            }
            if ui.button("Flip H").clicked() {
                requested = Some(TriangleTransform::FlipHorizontal);
            }
            if ui.button("Flip V").clicked() {
                requested = Some(TriangleTransform::FlipVertical);
            }
            if ui.button("Shear").clicked() {
                requested = Some(TriangleTransform::Shear { sx: x, sy: y });
            }

            if let Some(transform) = requested {
                match self.session.transform_triangle(transform) {
                    Ok(()) => self.status = None,
                    Err(err) => self.set_status(err.to_string()),
                }
            }
        });
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let surface = self.session.surface();
        let img_size = egui::vec2(surface.width() as f32, surface.height() as f32);
        let display = img_size * self.zoom;
        let (response, painter) = ui.allocate_painter(display, Sense::click_and_drag());

        let zoom = self.zoom;
        let rect_min = response.rect.min;
        let to_img = |pos: Pos2| -> (i32, i32) {
            let p = (pos - rect_min) / zoom;
            (p.x.floor() as i32, p.y.floor() as i32)
        };

        painter.rect_filled(response.rect, 0.0, Color32::WHITE);
        if let Some(tex) = &self.tex {
            painter.image(
                tex.id(),
                response.rect,
                Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0)),
                Color32::WHITE,
            );
        }

        if let Some(pos) = response.interact_pointer_pos() {
            self.last_pointer = Some(to_img(pos));
        }

        if response.drag_started_by(PointerButton::Primary) {
            if let Some(point) = self.last_pointer {
                self.session.pointer_down(point);
            }
        }
        if response.dragged_by(PointerButton::Primary) {
            if let Some(point) = self.last_pointer {
                self.session.pointer_move(point);
            }
        }
        if response.drag_stopped_by(PointerButton::Primary) {
            if let Some(point) = self.last_pointer.take() {
                self.session.pointer_up(point);
            }
        }

        if response.double_clicked() {
            if self.session.finish_polygon() {
                self.set_status("Polygon closed");
            }
        } else if response.clicked() {
            if let Some(point) = self.last_pointer {
                match self.session.tool() {
                    Tool::Polygon => self.session.add_polygon_vertex(point),
                    Tool::Fill => self.fill_at(point),
                    _ => {}
                }
            }
        }
    }

    fn fill_at(&mut self, point: (i32, i32)) {
        // The fill engine treats an out-of-bounds seed as a caller error, so
        // clicks outside the canvas are dropped here.
        if !self.session.surface().contains(point.0, point.1) {
            return;
        }
        match self.session.fill(point.0 as u32, point.1 as u32) {
            Ok(report) if report.saturated => {
                self.set_status(format!(
                    "Fill stopped at the safety cap ({} pixels)",
                    report.pixels_filled
                ));
            }
            Ok(report) if report.pixels_filled == 0 => {
                self.set_status("Region already has that color");
            }
            Ok(_) => self.status = None,
            Err(err) => self.set_status(err.to_string()),
        }
    }
}

impl eframe::App for PaintApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let pressed_undo = ctx.input(|i| i.key_pressed(egui::Key::Z) && i.modifiers.ctrl);
        let pressed_redo = ctx.input(|i| {
            (i.key_pressed(egui::Key::Y) && i.modifiers.ctrl)
                || (i.key_pressed(egui::Key::Z) && i.modifiers.ctrl && i.modifiers.shift)
        });
        if pressed_undo {
            self.session.undo();
        }
        if pressed_redo {
            self.session.redo();
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.toolbar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.add(egui::Slider::new(&mut self.zoom, 0.25..=4.0).text("Zoom"));
            });
            egui::ScrollArea::both().show(ui, |ui| {
                self.refresh_texture(ui.ctx());
                self.canvas(ui);
            });
        });
    }
}
