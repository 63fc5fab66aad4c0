use eframe::egui;
use std::path::Path;

use crate::model::generation_params::{EDUCATION_LEVELS, TERMS};
use crate::ui::app::CanvasApp;

/// Advisory only; larger files are still sent.
const PDF_SIZE_HINT_BYTES: u64 = 10 * 1024 * 1024;

pub fn draw_form_panel(ctx: &egui::Context, app: &mut CanvasApp) {
    egui::SidePanel::left("form")
        .resizable(true)
        .default_width(320.0)
        .min_width(260.0)
        .show(ctx, |ui| {
            ui.heading("Novo roteiro");
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                draw_fields(ui, app);
                ui.separator();
                draw_attachment(ui, app);
                ui.separator();
                draw_submit(ui, app);
            });
        });
}

fn draw_fields(ui: &mut egui::Ui, app: &mut CanvasApp) {
    let form = &mut app.form;
    let enabled = !app.state.is_generating();

    ui.add_enabled_ui(enabled, |ui| {
        ui.label("Nível de Ensino");
        egui::ComboBox::from_id_salt("education_level")
            .selected_text(form.education_level.as_str())
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for level in EDUCATION_LEVELS {
                    ui.selectable_value(&mut form.education_level, level.to_string(), level);
                }
            });

        ui.label("Matéria / Disciplina");
        ui.add(
            egui::TextEdit::singleline(&mut form.subject)
                .hint_text("Ex: Matemática")
                .desired_width(f32::INFINITY),
        );

        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label("Ano Escolar");
                ui.add(
                    egui::TextEdit::singleline(&mut form.grade)
                        .hint_text("Ex: 5º Ano")
                        .desired_width(120.0),
                );
            });
            ui.vertical(|ui| {
                ui.label("Bimestre");
                egui::ComboBox::from_id_salt("term")
                    .selected_text(form.term.as_str())
                    .show_ui(ui, |ui| {
                        for term in TERMS {
                            ui.selectable_value(&mut form.term, term.to_string(), term);
                        }
                    });
            });
        });

        ui.label("Descreva o jogo");
        ui.add(
            egui::TextEdit::multiline(&mut form.prompt)
                .hint_text("Tema, estilo, ideias de fases…")
                .desired_rows(5)
                .desired_width(f32::INFINITY),
        );
    });
}

fn draw_attachment(ui: &mut egui::Ui, app: &mut CanvasApp) {
    ui.label("Material de referência (PDF, opcional)");

    let enabled = !app.state.is_generating();
    let mut remove = false;

    match app.form.pdf_file.as_deref() {
        Some(path) => {
            ui.horizontal(|ui| {
                ui.label(format!("📄 {}", file_label(path)));
                if ui.add_enabled(enabled, egui::Button::new("❌").small()).clicked() {
                    remove = true;
                }
            });
            if is_over_size_hint(path) {
                ui.colored_label(
                    egui::Color32::YELLOW,
                    "Arquivo acima de 10MB; a geração pode falhar.",
                );
            }
        }
        None => {
            if ui
                .add_enabled(enabled, egui::Button::new("Selecionar PDF"))
                .clicked()
            {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("PDF", &["pdf"])
                    .pick_file()
                {
                    app.form.pdf_file = Some(path);
                }
            }
            ui.small("Máximo recomendado: 10MB");
        }
    }

    if remove {
        app.form.pdf_file = None;
    }
}

fn draw_submit(ui: &mut egui::Ui, app: &mut CanvasApp) {
    let generating = app.state.is_generating();
    let ready = app.form.is_complete();

    ui.horizontal(|ui| {
        let button = egui::Button::new(if generating {
            "Gerando…"
        } else {
            "✨ Gerar Canvas"
        });
        if ui.add_enabled(ready && !generating, button).clicked() {
            app.start_generation();
        }
        if generating {
            ui.spinner();
        }
    });

    if !ready && !generating {
        ui.small("Preencha matéria, ano e descrição.");
    }

    if let Some(err) = &app.state.error {
        ui.add_space(6.0);
        ui.colored_label(egui::Color32::LIGHT_RED, err.as_str());
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn is_over_size_hint(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|m| m.len() > PDF_SIZE_HINT_BYTES)
        .unwrap_or(false)
}
