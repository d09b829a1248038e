use crate::libdeck::dataset::{ClassObj, ColorPair, Question};
use crate::libdeck::deck::Session;
use crate::libdeck::stack::{depth_transform, visible_window, StackCard};
use crate::libdeck::swipe::{SwipeController, SwipeEvent};
use eframe::egui;
use eframe::egui::emath::TSTransform;
use eframe::egui::{
    Align, Area, Button, Color32, CornerRadius, FontId, Frame, Id, Layout, Order, Pos2, Rect,
    RichText, Sense, Stroke, StrokeKind, Ui, UiBuilder, Vec2,
};
use log::debug;

const SCREEN_FILL: &str = "#F2F5FC";
const CARD_BORDER: &str = "#E5E7EB";
const PROMPT_COLOR: &str = "#333333";
const ANSWER_COLOR: &str = "#555555";

struct GuiState {
    session: Session,
    class: ClassObj,
    colors: ColorPair,
    // Owned by the current top card; dropped with it once the card leaves.
    swipe: Option<SwipeController>,
}

impl GuiState {
    fn new(session: Session, class: ClassObj, colors: ColorPair) -> Self {
        Self {
            session,
            class,
            colors,
            swipe: None,
        }
    }

    fn draw_back_card(&self, ui: &mut Ui, card: &StackCard, center: Pos2, card_size: Vec2) {
        let t = depth_transform(card.depth);
        let rect = Rect::from_center_size(
            center + Vec2::new(0.0, t.translate_y),
            card_size * t.scale,
        );
        ui.painter().rect(
            rect,
            CornerRadius::same(20),
            Color32::WHITE.gamma_multiply(t.opacity),
            Stroke::new(1.5, hex_color(CARD_BORDER).gamma_multiply(t.opacity)),
            StrokeKind::Inside,
        );

        let Some(question) = self.session.card(card.index) else {
            return;
        };
        let galley = ui.painter().layout(
            question.prompt.clone(),
            FontId::proportional(20.0),
            hex_color(PROMPT_COLOR).gamma_multiply(t.opacity),
            rect.width() - 48.0,
        );
        let text_pos = Pos2::new(rect.center().x - galley.size().x / 2.0, rect.top() + 24.0);
        ui.painter().galley(text_pos, galley, Color32::PLACEHOLDER);

        // Cards deeper in the stack render without fetching imagery.
        if card.loads_image {
            if let Some(image_id) = self.session.image_id(card.index) {
                let image_rect = Rect::from_center_size(
                    rect.center() + Vec2::new(0.0, rect.height() * 0.08),
                    Vec2::new(rect.width() - 48.0, rect.height() * 0.5),
                );
                egui::Image::from_uri(picsum_url(image_id))
                    .corner_radius(CornerRadius::same(12))
                    .tint(Color32::WHITE.gamma_multiply(t.opacity))
                    .paint_at(ui, image_rect);
            }
        }
    }

    fn draw_top_card(
        &mut self,
        ctx: &egui::Context,
        card: &StackCard,
        center: Pos2,
        card_size: Vec2,
        viewport_width: f32,
        dt: f32,
    ) {
        let mut swipe = self
            .swipe
            .take()
            .unwrap_or_else(|| SwipeController::new(viewport_width));
        swipe.set_viewport_width(viewport_width);
        let transform = swipe.transform();

        let question = self.session.card(card.index).cloned();
        let image_id = self.session.image_id(card.index);
        let revealed = self.session.current_revealed();
        let primary = hex_color(&self.colors.primary);
        let mut toggle_reveal = false;

        let area = Area::new(Id::new(("card", card.index)))
            .order(Order::Middle)
            .fixed_pos(center - card_size / 2.0)
            .show(ctx, |ui| {
                ui.set_opacity(transform.opacity);
                let (rect, response) = ui.allocate_exact_size(card_size, Sense::drag());
                ui.painter().rect(
                    rect,
                    CornerRadius::same(20),
                    Color32::WHITE,
                    Stroke::new(1.5, hex_color(CARD_BORDER)),
                    StrokeKind::Inside,
                );

                if response.dragged() {
                    let delta = response.drag_delta();
                    swipe.drag_by(delta.x, delta.y);
                }
                if response.drag_stopped() {
                    swipe.release();
                }

                if let Some(question) = &question {
                    let mut content = ui.new_child(
                        UiBuilder::new()
                            .max_rect(rect.shrink(24.0))
                            .layout(Layout::top_down(Align::Center)),
                    );
                    toggle_reveal = card_body(
                        &mut content,
                        question,
                        image_id,
                        revealed,
                        primary,
                        transform.rotation_deg,
                    );
                }
            });

        // Translation and scale ride on the layer transform; egui layers
        // cannot rotate, so the tilt lands on the card imagery instead.
        let tst = TSTransform::new(
            Vec2::new(transform.translate_x, transform.translate_y)
                + center.to_vec2() * (1.0 - transform.scale),
            transform.scale,
        );
        ctx.set_transform_layer(area.response.layer_id, tst);

        if toggle_reveal {
            self.session.toggle_reveal();
        }

        match swipe.tick(dt) {
            SwipeEvent::CardConsumed => {
                // The consumed card's gesture state dies with it; the next
                // top card starts from rest.
                self.session.advance();
                self.swipe = None;
                ctx.request_repaint();
            }
            SwipeEvent::None => {
                if swipe.is_animating() {
                    ctx.request_repaint();
                }
                self.swipe = Some(swipe);
            }
        }
    }

    fn draw_reset_affordance(&mut self, ui: &mut Ui, center: Pos2) {
        let primary = hex_color(&self.colors.primary);
        let button = Button::new(
            RichText::new("START AGAIN")
                .color(Color32::WHITE)
                .size(14.0)
                .strong(),
        )
        .fill(primary)
        .corner_radius(CornerRadius::same(10))
        .min_size(Vec2::new(160.0, 44.0));
        if ui
            .put(Rect::from_center_size(center, Vec2::new(180.0, 48.0)), button)
            .clicked()
        {
            debug!("[Gui] Session reset requested");
            self.session.reset();
        }
    }
}

impl eframe::App for GuiState {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dt = ctx.input(|i| i.stable_dt).min(0.1);
        let primary = hex_color(&self.colors.primary);

        egui::TopBottomPanel::top("header")
            .frame(Frame::new().fill(primary).inner_margin(12))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new(format!(
                            "{}: {}",
                            self.class.subname, self.class.class_name
                        ))
                        .color(Color32::WHITE)
                        .size(18.0)
                        .strong(),
                    );
                });
            });

        egui::CentralPanel::default()
            .frame(Frame::new().fill(hex_color(SCREEN_FILL)))
            .show(ctx, |ui| {
                let viewport_width = ui.available_width();
                let center = ui.max_rect().center();
                let card_size = Vec2::new(
                    viewport_width * 0.9,
                    (ui.available_height() * 0.72).min(520.0),
                );

                let window = visible_window(self.session.cursor(), self.session.len());
                if window.is_empty() {
                    self.swipe = None;
                    self.draw_reset_affordance(ui, center);
                    return;
                }

                // Deepest card first, so the paint order matches the depths.
                for card in window.iter().skip(1).rev() {
                    self.draw_back_card(ui, card, center, card_size);
                }
                self.draw_top_card(ctx, &window[0], center, card_size, viewport_width, dt);
            });
    }
}

/// Question section, answer-or-image content, and the reveal button.
/// Returns true when the reveal button was clicked this frame.
fn card_body(
    ui: &mut Ui,
    question: &Question,
    image_id: Option<u32>,
    revealed: bool,
    primary: Color32,
    rotation_deg: f32,
) -> bool {
    ui.add_space(8.0);
    ui.label(
        RichText::new(&question.prompt)
            .size(22.0)
            .strong()
            .color(hex_color(PROMPT_COLOR)),
    );
    ui.add_space(12.0);
    ui.separator();
    ui.add_space(12.0);

    let content_height = (ui.available_height() - 72.0).max(60.0);
    if revealed {
        ui.allocate_ui(Vec2::new(ui.available_width(), content_height), |ui| {
            ui.centered_and_justified(|ui| {
                ui.label(
                    RichText::new(&question.answer)
                        .size(16.0)
                        .color(hex_color(ANSWER_COLOR)),
                );
            });
        });
    } else if let Some(image_id) = image_id {
        ui.add(
            egui::Image::from_uri(picsum_url(image_id))
                .corner_radius(CornerRadius::same(12))
                .rotate(rotation_deg.to_radians(), Vec2::splat(0.5))
                .fit_to_exact_size(Vec2::new(ui.available_width(), content_height)),
        );
    } else {
        ui.add_space(content_height);
    }

    ui.add_space(12.0);
    let label = if revealed { "HIDE ANSWER" } else { "REVEAL ANSWER" };
    ui.add(
        Button::new(RichText::new(label).color(Color32::WHITE).size(14.0))
            .fill(primary)
            .corner_radius(CornerRadius::same(10))
            .min_size(Vec2::new(150.0, 40.0)),
    )
    .clicked()
}

fn picsum_url(image_id: u32) -> String {
    format!("https://picsum.photos/id/{}/400/300", image_id)
}

fn hex_color(hex: &str) -> Color32 {
    Color32::from_hex(hex).unwrap_or(Color32::from_rgb(0x90, 0x6D, 0x88))
}

pub fn init_gui(session: Session, class: ClassObj, colors: ColorPair) -> Result<(), eframe::Error> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 760.0])
            .with_min_inner_size([320.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "swipedeck",
        native_options,
        Box::new(|cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(GuiState::new(session, class, colors)))
        }),
    )
}
