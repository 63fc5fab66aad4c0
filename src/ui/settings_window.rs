use eframe::egui;

use crate::engine::protocol::EngineCommand;
use crate::ui::app::CanvasApp;
use crate::ui::settings::API_KEY_VARS;

pub fn draw_settings_window(ctx: &egui::Context, app: &mut CanvasApp) {
    if !app.show_settings {
        return;
    }

    let mut open = true;
    let mut save = false;
    let mut test = false;

    egui::Window::new("Configurações")
        .open(&mut open)
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui| {
            let s = &mut app.settings;

            egui::Grid::new("settings_grid")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Chave da API");
                    let key = s.api_key.get_or_insert_with(String::new);
                    ui.add(egui::TextEdit::singleline(key).password(true));
                    ui.end_row();

                    ui.label("Modelo");
                    ui.text_edit_singleline(&mut s.model);
                    ui.end_row();

                    ui.label("Endereço da API");
                    ui.text_edit_singleline(&mut s.api_base_url);
                    ui.end_row();

                    ui.label("Tempo limite");
                    ui.horizontal(|ui| {
                        let mut limited = s.request_timeout_secs.is_some();
                        if ui.checkbox(&mut limited, "").changed() {
                            s.request_timeout_secs = limited.then_some(120);
                        }
                        if let Some(secs) = s.request_timeout_secs.as_mut() {
                            ui.add(egui::DragValue::new(secs).range(10..=600).suffix(" s"));
                        } else {
                            ui.label("sem limite");
                        }
                    });
                    ui.end_row();

                    ui.label("Escala da interface");
                    ui.add(egui::Slider::new(&mut s.ui_scale, 0.75..=2.0));
                    ui.end_row();
                });

            if API_KEY_VARS.iter().any(|v| std::env::var(v).is_ok()) {
                ui.small(format!(
                    "Uma chave definida em {} tem prioridade.",
                    API_KEY_VARS.join(" / ")
                ));
            }

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Salvar").clicked() {
                    save = true;
                }
                if ui.button("Testar conexão").clicked() {
                    test = true;
                }
            });

            match &app.connection_status {
                Some(Ok(msg)) => {
                    ui.colored_label(egui::Color32::LIGHT_GREEN, msg.as_str());
                }
                Some(Err(msg)) => {
                    ui.colored_label(egui::Color32::LIGHT_RED, msg.as_str());
                }
                None => {}
            }
        });

    if save || test {
        app.apply_settings();
    }
    if test {
        app.connection_status = None;
        app.send_command(EngineCommand::TestConnection);
    }
    if !open {
        app.show_settings = false;
    }
}
