use std::sync::mpsc::{Receiver, Sender};

use crate::engine::generator::generate_canvas;
use crate::engine::llm_client::{ContentGenerator, GeminiClient};
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::error::CanvasError;
use crate::model::document::{now_millis, GameDesignDocument};
use crate::model::generation_params::GenerationParams;
use crate::store::gallery::GalleryStore;
use crate::ui::settings::AppSettings;

/// Called after every response so the UI can wake up and drain the channel.
pub type Waker = Box<dyn Fn() + Send>;

/// Background worker. Handles one command at a time, in order, so at most
/// one generation is ever in flight.
pub struct Engine {
    rx: Receiver<EngineCommand>,
    tx: Sender<EngineResponse>,
    settings: AppSettings,
    store: GalleryStore,
    client: Option<Box<dyn ContentGenerator + Send>>,
    wake: Waker,
}

impl Engine {
    pub fn new(
        rx: Receiver<EngineCommand>,
        tx: Sender<EngineResponse>,
        settings: AppSettings,
        store: GalleryStore,
        wake: Waker,
    ) -> Self {
        let mut engine = Self {
            rx,
            tx,
            settings,
            store,
            client: None,
            wake,
        };
        tracing::info!(gallery = %engine.store.path().display(), "engine ready");
        engine.rebuild_client();
        engine
    }

    /// Swaps in a different model backend.
    #[cfg(test)]
    pub fn with_generator(mut self, generator: Box<dyn ContentGenerator + Send>) -> Self {
        self.client = Some(generator);
        self
    }

    pub fn run(&mut self) {
        while let Ok(cmd) = self.rx.recv() {
            self.handle(cmd);
        }
        tracing::debug!("engine channel closed, stopping");
    }

    fn handle(&mut self, cmd: EngineCommand) {
        match cmd {
            EngineCommand::Generate(params) => {
                let result = self.generate(&params).map_err(|e| {
                    tracing::error!(error = %e, "generation failed");
                    e.user_message().to_string()
                });
                self.send(EngineResponse::Generated(result));
            }

            EngineCommand::SaveToGallery(doc) => {
                let saved = self.store.upsert(doc);
                self.send(EngineResponse::Saved(saved));
            }

            EngineCommand::LoadGallery => {
                self.send(EngineResponse::Gallery(self.store.list()));
            }

            EngineCommand::DeleteFromGallery(id) => {
                let ok = self.store.delete(&id);
                self.send(EngineResponse::Deleted { id, ok });
                self.send(EngineResponse::Gallery(self.store.list()));
            }

            EngineCommand::UpdateSettings(settings) => {
                self.settings = settings;
                self.rebuild_client();
            }

            EngineCommand::TestConnection => {
                let status = GeminiClient::from_settings(&self.settings)
                    .and_then(|client| client.test_connection())
                    .map_err(|e| {
                        tracing::warn!(error = %e, "connection test failed");
                        format!("Falha na conexão: {e}")
                    });
                self.send(EngineResponse::ConnectionStatus(status));
            }
        }
    }

    fn generate(&self, params: &GenerationParams) -> Result<GameDesignDocument, CanvasError> {
        let client = self
            .client
            .as_deref()
            .ok_or_else(|| CanvasError::Generation("HTTP client unavailable".into()))?;

        tracing::info!(
            subject = %params.subject,
            grade = %params.grade,
            with_pdf = params.pdf_file.is_some(),
            "generating canvas"
        );

        let doc = generate_canvas(client, params)?.with_new_identity(now_millis());
        tracing::info!(id = ?doc.id, title = %doc.title, "canvas generated");
        Ok(doc)
    }

    fn rebuild_client(&mut self) {
        self.client = match GeminiClient::from_settings(&self.settings) {
            Ok(client) => Some(Box::new(client)),
            Err(e) => {
                tracing::error!(error = %e, "could not build HTTP client");
                None
            }
        };
    }

    fn send(&self, response: EngineResponse) {
        // The UI may already be gone on shutdown.
        if self.tx.send(response).is_ok() {
            (self.wake)();
        }
    }
}
