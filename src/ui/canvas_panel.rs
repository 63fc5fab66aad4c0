use eframe::egui;

use crate::export::doc_export::{export_file_name, write_doc};
use crate::model::document::{Character, GameDesignDocument, Level};
use crate::ui::app::{CanvasApp, Confirm};

enum CanvasAction {
    Save,
    ExportDoc,
    Clear,
}

pub fn draw_canvas_panel(ctx: &egui::Context, app: &mut CanvasApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let Some(doc) = app.state.document.as_ref() else {
            draw_empty_state(ui, app.state.is_generating());
            return;
        };

        let mut action = None;
        ui.horizontal(|ui| {
            if ui.button("💾 Salvar na Galeria").clicked() {
                action = Some(CanvasAction::Save);
            }
            if ui.button("📄 Baixar DOC").clicked() {
                action = Some(CanvasAction::ExportDoc);
            }
            if ui.button("🗋 Novo canvas").clicked() {
                action = Some(CanvasAction::Clear);
            }
        });

        if let Some(notice) = &app.state.notice {
            ui.colored_label(egui::Color32::LIGHT_GREEN, notice.as_str());
        }
        ui.separator();

        let edited = egui::ScrollArea::vertical()
            .id_salt("canvas_scroll")
            .show(ui, |ui| edit_document(ui, doc))
            .inner;

        if let Some(next) = edited {
            app.state.replace_document(next);
        }

        match action {
            Some(CanvasAction::Save) => app.confirm = Some(Confirm::SaveToGallery),
            Some(CanvasAction::ExportDoc) => export_doc(app),
            Some(CanvasAction::Clear) => app.state.clear(),
            None => {}
        }
    });
}

fn draw_empty_state(ui: &mut egui::Ui, generating: bool) {
    ui.vertical_centered(|ui| {
        ui.add_space(120.0);
        if generating {
            ui.spinner();
            ui.label("Criando o canvas… isso pode levar alguns segundos.");
        } else {
            ui.heading("Nenhum canvas ainda");
            ui.label("Preencha o formulário e clique em \"Gerar Canvas\".");
        }
    });
}

fn export_doc(app: &mut CanvasApp) {
    let Some(doc) = app.state.document.as_ref() else {
        return;
    };

    let Some(path) = rfd::FileDialog::new()
        .add_filter("Word", &["doc"])
        .set_file_name(export_file_name(doc, "doc"))
        .save_file()
    else {
        return;
    };

    match write_doc(doc, &path) {
        Ok(()) => app.state.notice = Some(format!("Documento salvo em {}", path.display())),
        Err(e) => {
            tracing::error!(error = %e, "DOC export failed");
            app.state.error = Some("Erro ao gerar o documento.".into());
        }
    }
}

/* =========================
   Editor
   ========================= */

/// Edits a copy; returns it only if something changed.
pub fn edit_document(ui: &mut egui::Ui, doc: &GameDesignDocument) -> Option<GameDesignDocument> {
    let mut next = doc.clone();
    let mut changed = false;

    changed |= line(ui, "Título", &mut next.title);
    ui.add_space(8.0);

    section(ui, "1. Relação com o Currículo", |ui| {
        let ctx = &mut next.education_context;
        changed |= line(ui, "Área", &mut ctx.area);
        changed |= line(ui, "Ano/Bimestre", &mut ctx.grade_level);
        changed |= line(ui, "Disciplina", &mut ctx.discipline);
        changed |= line(ui, "Tema", &mut ctx.theme);
        changed |= text(ui, "Habilidades BNCC", &mut ctx.bncc_skills);
        changed |= text(ui, "Ref. Bibliográfica", &mut ctx.bibliography);
    });

    section(ui, "2. Estilo do Jogo", |ui| {
        changed |= line(ui, "Gênero", &mut next.genre);
        changed |= line(ui, "Plataforma", &mut next.platform);
        changed |= line(ui, "Público Alvo", &mut next.target_audience);
        changed |= text(ui, "Requisitos Técnicos", &mut next.technical_requirements);
    });

    section(ui, "3. Narrativa do Jogo", |ui| {
        changed |= text(ui, "Sinopse", &mut next.synopsis);
        ui.add_space(6.0);
        ui.strong("Personagens");
        changed |= edit_characters(ui, &mut next.characters);
        ui.add_space(6.0);
        ui.strong("Fases");
        changed |= edit_levels(ui, &mut next.levels);
    });

    section(ui, "4. Fluxo do Jogo", |ui| {
        changed |= text(ui, "Fluxo", &mut next.game_flow);
    });

    section(ui, "5. Chefes e Inimigos", |ui| {
        changed |= text(ui, "Inimigos e Obstáculos", &mut next.enemies_and_obstacles);
    });

    section(ui, "Mecânicas", |ui| {
        changed |= editable_list(ui, &mut next.gameplay_mechanics, "➕ Adicionar mecânica");
    });

    section(ui, "Conteúdo Programático", |ui| {
        let content = &mut next.programmatic_content;
        changed |= text(ui, "Introdução", &mut content.intro);
        changed |= text(ui, "Condição de Vitória", &mut content.victory_condition);
        changed |= text(ui, "Condição de Derrota", &mut content.defeat_condition);
    });

    changed.then_some(next)
}

fn section(ui: &mut egui::Ui, title: &str, body: impl FnOnce(&mut egui::Ui)) {
    egui::CollapsingHeader::new(egui::RichText::new(title).strong())
        .default_open(true)
        .show(ui, body);
    ui.add_space(4.0);
}

fn line(ui: &mut egui::Ui, label: &str, value: &mut String) -> bool {
    ui.label(label);
    ui.add(egui::TextEdit::singleline(value).desired_width(f32::INFINITY))
        .changed()
}

fn text(ui: &mut egui::Ui, label: &str, value: &mut String) -> bool {
    ui.label(label);
    ui.add(
        egui::TextEdit::multiline(value)
            .desired_rows(3)
            .desired_width(f32::INFINITY),
    )
    .changed()
}

fn edit_characters(ui: &mut egui::Ui, characters: &mut Vec<Character>) -> bool {
    let mut changed = false;
    let mut remove = None;

    for (i, c) in characters.iter_mut().enumerate() {
        ui.push_id(("character", i), |ui| {
            ui.group(|ui| {
                ui.horizontal(|ui| {
                    ui.label(format!("Personagem {}", i + 1));
                    if ui.small_button("❌").clicked() {
                        remove = Some(i);
                    }
                });
                changed |= line(ui, "Nome", &mut c.name);
                changed |= line(ui, "Papel", &mut c.role);
                changed |= text(ui, "Descrição", &mut c.description);
            });
        });
    }

    if let Some(i) = remove {
        characters.remove(i);
        changed = true;
    }
    if ui.button("➕ Adicionar personagem").clicked() {
        characters.push(Character::default());
        changed = true;
    }

    changed
}

fn edit_levels(ui: &mut egui::Ui, levels: &mut Vec<Level>) -> bool {
    let mut changed = false;
    let mut remove = None;

    for (i, level) in levels.iter_mut().enumerate() {
        ui.push_id(("level", i), |ui| {
            ui.group(|ui| {
                ui.horizontal(|ui| {
                    ui.label(format!("Fase {}", i + 1));
                    if ui.small_button("❌").clicked() {
                        remove = Some(i);
                    }
                });
                changed |= line(ui, "Nome", &mut level.name);
                changed |= text(ui, "Objetivo", &mut level.objective);
                changed |= line(ui, "Ambiente", &mut level.environment);
            });
        });
    }

    if let Some(i) = remove {
        levels.remove(i);
        changed = true;
    }
    if ui.button("➕ Adicionar fase").clicked() {
        levels.push(Level::default());
        changed = true;
    }

    changed
}

fn editable_list(ui: &mut egui::Ui, items: &mut Vec<String>, add_label: &str) -> bool {
    let mut changed = false;
    let mut remove = None;

    for (i, item) in items.iter_mut().enumerate() {
        ui.push_id(("item", i), |ui| {
            ui.horizontal(|ui| {
                ui.label("•");
                let width = ui.available_width() - 30.0;
                changed |= ui
                    .add(egui::TextEdit::singleline(item).desired_width(width))
                    .changed();
                if ui.small_button("❌").clicked() {
                    remove = Some(i);
                }
            });
        });
    }

    if let Some(i) = remove {
        items.remove(i);
        changed = true;
    }
    if ui.button(add_label).clicked() {
        items.push(String::new());
        changed = true;
    }

    changed
}
