use chrono::{DateTime, Local, TimeZone};
use eframe::egui;
use std::fmt::Display;

use crate::model::document::GameDesignDocument;
use crate::ui::app::{CanvasApp, Confirm};

const CARD_WIDTH: f32 = 280.0;

enum CardAction {
    Open(GameDesignDocument),
    Delete { id: String, title: String },
}

pub fn draw_gallery_panel(ctx: &egui::Context, app: &mut CanvasApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading("Galeria");
        if let Some(err) = &app.state.error {
            ui.colored_label(egui::Color32::LIGHT_RED, err.as_str());
        }
        ui.separator();

        if app.state.gallery.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(100.0);
                ui.heading("Nenhum projeto salvo");
                ui.label("Crie um novo roteiro e clique em \"Salvar na Galeria\".");
            });
            return;
        }

        let mut action = None;
        egui::ScrollArea::vertical()
            .id_salt("gallery_scroll")
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for game in &app.state.gallery {
                        if let Some(a) = card(ui, game) {
                            action = Some(a);
                        }
                    }
                });
            });

        match action {
            Some(CardAction::Open(doc)) => app.state.load_from_gallery(doc),
            Some(CardAction::Delete { id, title }) => {
                app.confirm = Some(Confirm::Delete { id, title });
            }
            None => {}
        }
    });
}

fn card(ui: &mut egui::Ui, game: &GameDesignDocument) -> Option<CardAction> {
    let mut action = None;

    ui.group(|ui| {
        ui.set_width(CARD_WIDTH);
        ui.vertical(|ui| {
            ui.label(egui::RichText::new(game.display_title()).heading().strong());
            ui.label(format!("Nível: {}", game.education_context.area));
            ui.label(format!("Matéria: {}", game.education_context.discipline));
            ui.separator();
            ui.horizontal(|ui| {
                ui.small(format!(
                    "Editado em: {}",
                    format_saved_date(game.last_saved_or_zero())
                ));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("🗑").on_hover_text("Excluir").clicked() {
                        if let Some(id) = &game.id {
                            action = Some(CardAction::Delete {
                                id: id.clone(),
                                title: game.display_title().to_string(),
                            });
                        }
                    }
                    if ui.button("Abrir Projeto →").clicked() {
                        action = Some(CardAction::Open(game.clone()));
                    }
                });
            });
        });
    });

    action
}

/// dd/mm/yyyy in local time.
pub fn format_saved_date(ms: i64) -> String {
    format_date_in(ms, &Local)
}

fn format_date_in<Tz>(ms: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    DateTime::from_timestamp_millis(ms)
        .map(|utc| utc.with_timezone(tz).format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn formats_day_month_year() {
        let ms = 1_718_452_800_000; // 2024-06-15T12:00:00Z
        assert_eq!(format_date_in(ms, &Utc), "15/06/2024");
    }

    #[test]
    fn uses_the_given_offset() {
        let ms = 1_718_413_200_000; // 2024-06-15T01:00:00Z
        let brasilia = FixedOffset::west_opt(3 * 3600).unwrap();
        assert_eq!(format_date_in(ms, &brasilia), "14/06/2024");
    }

    #[test]
    fn out_of_range_is_blank() {
        assert_eq!(format_saved_date(i64::MAX), "");
    }
}
