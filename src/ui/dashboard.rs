//! Menu page with navigation tiles, service status and activity log.

use eframe::egui::{self, Color32, CornerRadius, Margin, RichText, ScrollArea, Ui};

use super::app::{App, LogLevel, Page, ServerStatus};
use super::components::{colors, nav_tile};

const TILES_PER_ROW: usize = 4;

/// Show the menu.
///
/// Returns `Some(page)` if navigation is requested.
pub fn show(app: &mut App, ui: &mut Ui) -> Option<Page> {
    let mut next_page = None;

    ui.vertical_centered(|ui| {
        ui.add_space(30.0);
        ui.label(RichText::new("Employee Records").size(32.0).strong());
        ui.add_space(5.0);
        ui.label(RichText::new("Create, find, update and analyse employee records").size(14.0).weak());
        ui.add_space(30.0);
    });

    let spacing = 24.0;
    let available = ui.available_width();
    let tile_width = ((available - spacing * (TILES_PER_ROW as f32 - 1.0)) / TILES_PER_ROW as f32).clamp(130.0, 200.0);
    let tile_size = egui::vec2(tile_width, tile_width * 0.7);
    let row_width = tile_width * TILES_PER_ROW as f32 + spacing * (TILES_PER_ROW as f32 - 1.0);
    let start_offset = ((available - row_width) / 2.0).max(0.0);

    for row in Page::OPERATIONS.chunks(TILES_PER_ROW) {
        ui.horizontal(|ui| {
            ui.add_space(start_offset);
            for (idx, page) in row.iter().enumerate() {
                if idx > 0 {
                    ui.add_space(spacing);
                }
                if nav_tile(ui, page.icon(), page.name(), tile_size).clicked() {
                    next_page = Some(*page);
                }
            }
        });
        ui.add_space(spacing);
    }

    ui.add_space(10.0);

    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .outer_margin(Margin::symmetric(10, 0))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.label(RichText::new("Service").strong());
            ui.add_space(8.0);
            match &app.server_status {
                ServerStatus::Unknown => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Connecting...");
                    });
                }
                ServerStatus::Online(collections) => {
                    ui.colored_label(colors::SUCCESS, format!("Connected to {}", app.api.base_url()));
                    ui.label(RichText::new(format!("Collections: {}", collections.join(", "))).weak());
                }
                ServerStatus::Offline(reason) => {
                    ui.colored_label(colors::ERROR, format!("Cannot reach {}", app.api.base_url()));
                    ui.label(RichText::new(reason).weak());
                }
            }
        });

    ui.add_space(20.0);

    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .outer_margin(Margin::symmetric(10, 0))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.label(RichText::new("Recent Activity").strong());
            ui.add_space(10.0);

            ScrollArea::vertical().max_height(180.0).show(ui, |ui| {
                if app.log_messages.is_empty() {
                    ui.label(RichText::new("No recent activity").weak());
                    return;
                }
                for entry in app.log_messages.iter().rev().take(15) {
                    let color = match entry.level {
                        LogLevel::Info => Color32::GRAY,
                        LogLevel::Success => colors::SUCCESS,
                        LogLevel::Error => colors::ERROR,
                    };

                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(entry.timestamp.format("%H:%M:%S").to_string())
                                .small()
                                .color(Color32::DARK_GRAY),
                        );
                        ui.label(RichText::new(&entry.message).color(color));
                    });
                }
            });
        });

    next_page
}
