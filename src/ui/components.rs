//! Shared UI components used across panels.

use eframe::egui::{self, Color32, CornerRadius, Margin, Response, RichText, Sense, StrokeKind, Ui};
use egui_phosphor::regular::{CARET_LEFT, CARET_RIGHT};

use crate::api::types::PageMeta;
use crate::pagination::{self, PageItem};

/// Status colors shared across panels.
pub mod colors {
    use eframe::egui::Color32;

    pub const SUCCESS: Color32 = Color32::from_rgb(46, 160, 67);
    pub const ERROR: Color32 = Color32::from_rgb(220, 50, 50);
    pub const WARNING: Color32 = Color32::from_rgb(210, 153, 34);
    pub const NEUTRAL: Color32 = Color32::from_rgb(110, 118, 129);
    pub const ACCENT: Color32 = Color32::from_rgb(68, 114, 196);
}

/// Standard text button.
pub fn styled_button(ui: &mut Ui, text: &str) -> Response {
    ui.button(RichText::new(text).size(14.0))
}

/// Text button with a leading Phosphor icon.
pub fn styled_button_with_icon(ui: &mut Ui, icon: &str, text: &str) -> Response {
    ui.button(RichText::new(format!("{icon} {text}")).size(14.0))
}

/// Filled accent button for the primary action of a view. An empty icon
/// renders the label alone.
pub fn primary_button_with_icon(ui: &mut Ui, icon: &str, text: &str) -> Response {
    let label = if icon.is_empty() {
        text.to_string()
    } else {
        format!("{icon} {text}")
    };
    ui.add(
        egui::Button::new(RichText::new(label).size(14.0).color(Color32::WHITE))
            .fill(colors::ACCENT),
    )
}

/// Compact icon button for table rows, with a tooltip.
pub fn action_button(ui: &mut Ui, icon: &str, tooltip: &str) -> Response {
    ui.add(egui::Button::new(RichText::new(icon).size(14.0)).small())
        .on_hover_text(tooltip)
}

/// Compact icon button tinted for destructive row actions.
pub fn danger_action_button(ui: &mut Ui, icon: &str, tooltip: &str) -> Response {
    ui.add(
        egui::Button::new(RichText::new(icon).size(14.0).color(colors::ERROR)).small(),
    )
    .on_hover_text(tooltip)
}

/// Back button used at the top of every panel.
pub fn back_button(ui: &mut Ui) -> bool {
    ui.button(RichText::new(format!("{} Back", egui_phosphor::regular::ARROW_LEFT)).size(14.0))
        .clicked()
}

/// Panel title with a back button on the same row. Returns true when the
/// back button was clicked.
pub fn panel_header(ui: &mut Ui, title: &str) -> bool {
    let mut back = false;
    ui.horizontal(|ui| {
        back = back_button(ui);
        ui.add_space(10.0);
        ui.heading(title);
    });
    ui.separator();
    back
}

/// Numbered pager rendered from the windowed page list. Returns the page the
/// user asked for. Hidden entirely when there is only one page.
pub fn pagination_bar(ui: &mut Ui, meta: &PageMeta) -> Option<u32> {
    let items = pagination::window(meta.current_page, meta.last_page);
    if items.is_empty() {
        return None;
    }

    let mut requested = None;
    ui.horizontal(|ui| {
        if ui
            .add_enabled(meta.current_page > 1, egui::Button::new(CARET_LEFT))
            .on_hover_text("Previous page")
            .clicked()
        {
            requested = Some(meta.current_page - 1);
        }

        for item in items {
            match item {
                PageItem::Page(page) => {
                    let selected = page == meta.current_page;
                    if ui.selectable_label(selected, page.to_string()).clicked() && !selected {
                        requested = Some(page);
                    }
                }
                PageItem::Ellipsis => {
                    ui.weak("…");
                }
            }
        }

        if ui
            .add_enabled(
                meta.current_page < meta.last_page,
                egui::Button::new(CARET_RIGHT),
            )
            .on_hover_text("Next page")
            .clicked()
        {
            requested = Some(meta.current_page + 1);
        }

        ui.add_space(8.0);
        ui.weak(format!("{} records", meta.total));
    });
    requested
}

/// Spinner row shown while a list is refreshing.
pub fn loading_row(ui: &mut Ui, message: &str) {
    ui.horizontal(|ui| {
        ui.spinner();
        ui.label(message);
    });
}

/// Centered placeholder for an empty list.
pub fn empty_state(ui: &mut Ui, message: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(30.0);
        ui.label(RichText::new(message).size(15.0).weak());
        ui.add_space(30.0);
    });
}

/// Large clickable card used on the dashboard for navigation.
pub fn dashboard_card(ui: &mut Ui, icon: &str, title: &str, description: &str) -> Response {
    let desired_size = egui::vec2(220.0, 120.0);
    let (rect, response) = ui.allocate_exact_size(desired_size, Sense::click());

    if ui.is_rect_visible(rect) {
        let visuals = ui.style().interact(&response);
        let fill = if response.hovered() {
            ui.style().visuals.widgets.hovered.bg_fill
        } else {
            ui.style().visuals.extreme_bg_color
        };

        ui.painter().rect(
            rect,
            CornerRadius::same(8),
            fill,
            visuals.bg_stroke,
            StrokeKind::Inside,
        );

        let icon_pos = rect.center_top() + egui::vec2(0.0, 34.0);
        ui.painter().text(
            icon_pos,
            egui::Align2::CENTER_CENTER,
            icon,
            egui::FontId::proportional(28.0),
            colors::ACCENT,
        );

        let title_pos = rect.center_top() + egui::vec2(0.0, 68.0);
        ui.painter().text(
            title_pos,
            egui::Align2::CENTER_CENTER,
            title,
            egui::FontId::proportional(16.0),
            visuals.text_color(),
        );

        let desc_pos = rect.center_top() + egui::vec2(0.0, 92.0);
        ui.painter().text(
            desc_pos,
            egui::Align2::CENTER_CENTER,
            description,
            egui::FontId::proportional(11.0),
            ui.style().visuals.weak_text_color(),
        );
    }

    response
}

/// Small framed card showing one headline number on the dashboard.
pub fn stat_card(ui: &mut Ui, icon: &str, label: &str, value: &str, color: Color32) {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.set_min_width(150.0);
            ui.horizontal(|ui| {
                ui.label(RichText::new(icon).size(24.0).color(color));
                ui.vertical(|ui| {
                    ui.label(RichText::new(value).size(22.0).strong());
                    ui.label(RichText::new(label).size(12.0).weak());
                });
            });
        });
}
