use eframe::egui;
use std::sync::mpsc;

use crate::engine::engine::Engine;
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::model::generation_params::GenerationParams;
use crate::store::gallery::GalleryStore;
use crate::ui::canvas_panel::draw_canvas_panel;
use crate::ui::form_panel::draw_form_panel;
use crate::ui::gallery_panel::draw_gallery_panel;
use crate::ui::settings::AppSettings;
use crate::ui::settings_window::draw_settings_window;
use crate::ui::state::{AppState, View};

/* =========================
   Confirmations
   ========================= */

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirm {
    SaveToGallery,
    Delete { id: String, title: String },
}

/* =========================
   App
   ========================= */

pub struct CanvasApp {
    pub state: AppState,
    pub form: GenerationParams,

    /// As stored on disk; env overrides are applied when handed to the engine.
    pub settings: AppSettings,
    pub show_settings: bool,
    pub connection_status: Option<Result<String, String>>,

    pub confirm: Option<Confirm>,

    cmd_tx: mpsc::Sender<EngineCommand>,
    resp_rx: mpsc::Receiver<EngineResponse>,
}

impl CanvasApp {
    pub fn new(ctx: egui::Context, settings: AppSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();

        let engine_settings = effective_settings(&settings);
        std::thread::spawn(move || {
            let mut engine = Engine::new(
                cmd_rx,
                resp_tx,
                engine_settings,
                GalleryStore::open_default(),
                Box::new(move || ctx.request_repaint()),
            );
            engine.run();
        });

        Self {
            state: AppState::default(),
            form: GenerationParams::default(),
            settings,
            show_settings: false,
            connection_status: None,
            confirm: None,
            cmd_tx,
            resp_rx,
        }
    }

    pub fn send_command(&self, cmd: EngineCommand) {
        if self.cmd_tx.send(cmd).is_err() {
            tracing::error!("engine thread is gone");
        }
    }

    pub fn start_generation(&mut self) {
        if self.state.is_generating() {
            return;
        }
        self.state.begin_generation();
        self.send_command(EngineCommand::Generate(self.form.clone()));
    }

    pub fn open_gallery(&mut self) {
        self.state.show_gallery();
        self.send_command(EngineCommand::LoadGallery);
    }

    pub fn apply_settings(&mut self) {
        crate::ui::settings_io::save_settings(&self.settings);
        self.send_command(EngineCommand::UpdateSettings(effective_settings(
            &self.settings,
        )));
    }

    fn handle_response(&mut self, resp: EngineResponse) {
        match resp {
            EngineResponse::Generated(result) => self.state.finish_generation(result),

            EngineResponse::Saved(Some(saved)) => {
                self.state.mark_saved(&saved);
                self.state.notice = Some("✅ Projeto salvo na Galeria com sucesso!".into());
            }
            EngineResponse::Saved(None) => {
                self.state.error = Some("❌ Erro ao salvar o projeto. Tente novamente.".into());
            }

            EngineResponse::Gallery(games) => self.state.gallery = games,

            EngineResponse::Deleted { ok: false, .. } => {
                self.state.error = Some("❌ Erro ao excluir o projeto.".into());
            }
            EngineResponse::Deleted { id, ok: true } => self.state.forget_deleted(&id),

            EngineResponse::ConnectionStatus(status) => self.connection_status = Some(status),
        }
    }

    fn draw_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Canvas de Gamificação");
                ui.separator();

                if ui
                    .selectable_label(self.state.view == View::Home, "Criar")
                    .clicked()
                {
                    self.state.view = View::Home;
                }
                if ui
                    .selectable_label(self.state.view == View::Gallery, "Galeria")
                    .clicked()
                {
                    self.open_gallery();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("⚙ Configurações").clicked() {
                        self.show_settings = true;
                    }
                });
            });
        });
    }

    fn draw_confirm(&mut self, ctx: &egui::Context) {
        let Some(confirm) = self.confirm.clone() else {
            return;
        };

        let question = match &confirm {
            Confirm::SaveToGallery => "Deseja realmente salvar este projeto na Galeria?".to_string(),
            Confirm::Delete { title, .. } => {
                format!("Tem certeza que deseja excluir \"{title}\"?")
            }
        };

        let mut answer = None;
        egui::Window::new("Confirmar")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(question);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Sim").clicked() {
                        answer = Some(true);
                    }
                    if ui.button("Cancelar").clicked() {
                        answer = Some(false);
                    }
                });
            });

        match answer {
            Some(true) => {
                self.confirm = None;
                match confirm {
                    Confirm::SaveToGallery => {
                        if let Some(doc) = self.state.document.clone() {
                            self.send_command(EngineCommand::SaveToGallery(doc));
                        }
                    }
                    Confirm::Delete { id, .. } => {
                        self.send_command(EngineCommand::DeleteFromGallery(id));
                    }
                }
            }
            Some(false) => self.confirm = None,
            None => {}
        }
    }
}

fn effective_settings(settings: &AppSettings) -> AppSettings {
    settings
        .clone()
        .with_env_overrides(|var| std::env::var(var).ok())
}

/* =========================
   egui App
   ========================= */

impl eframe::App for CanvasApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        ctx.set_pixels_per_point(self.settings.ui_scale);

        while let Ok(resp) = self.resp_rx.try_recv() {
            self.handle_response(resp);
        }

        self.draw_top_bar(ctx);

        match self.state.view {
            View::Home => {
                draw_form_panel(ctx, self);
                draw_canvas_panel(ctx, self);
            }
            View::Gallery => draw_gallery_panel(ctx, self),
        }

        self.draw_confirm(ctx);
        draw_settings_window(ctx, self);
    }
}
