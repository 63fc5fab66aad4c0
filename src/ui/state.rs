use crate::model::document::GameDesignDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    Gallery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationStatus {
    #[default]
    Idle,
    Generating,
    Success,
    Error,
}

/// Top-level application state.
///
/// The one place the current canvas lives. Panels get it by reference and
/// hand back whole replacement values.
#[derive(Debug, Default)]
pub struct AppState {
    pub view: View,
    pub status: GenerationStatus,
    pub document: Option<GameDesignDocument>,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub gallery: Vec<GameDesignDocument>,
}

impl AppState {
    pub fn is_generating(&self) -> bool {
        self.status == GenerationStatus::Generating
    }

    /// The current document stays visible until a result replaces it.
    pub fn begin_generation(&mut self) {
        self.status = GenerationStatus::Generating;
        self.error = None;
        self.notice = None;
    }

    pub fn finish_generation(&mut self, result: Result<GameDesignDocument, String>) {
        match result {
            Ok(doc) => {
                self.document = Some(doc);
                self.status = GenerationStatus::Success;
            }
            Err(message) => {
                self.error = Some(message);
                self.status = GenerationStatus::Error;
            }
        }
    }

    pub fn replace_document(&mut self, doc: GameDesignDocument) {
        self.document = Some(doc);
    }

    /// Messages from the editor do not carry over to the gallery.
    pub fn show_gallery(&mut self) {
        self.view = View::Gallery;
        self.error = None;
        self.notice = None;
    }

    /// The open canvas loses its gallery identity when its entry is deleted,
    /// so saving it again creates a new entry.
    pub fn forget_deleted(&mut self, id: &str) {
        if let Some(doc) = self.document.as_mut() {
            if doc.id.as_deref() == Some(id) {
                doc.id = None;
                doc.last_saved = None;
            }
        }
    }

    pub fn load_from_gallery(&mut self, doc: GameDesignDocument) {
        self.document = Some(doc);
        self.view = View::Home;
        self.status = GenerationStatus::Success;
        self.error = None;
    }

    /// Keeps the editor's copy in step with what was stored, so later saves
    /// hit the same gallery entry.
    pub fn mark_saved(&mut self, saved: &GameDesignDocument) {
        if let Some(doc) = self.document.as_mut() {
            if doc.id == saved.id {
                doc.last_saved = saved.last_saved;
            }
        }
    }

    pub fn clear(&mut self) {
        self.document = None;
        self.status = GenerationStatus::Idle;
        self.error = None;
        self.notice = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::document::sample_document;

    #[test]
    fn failed_generation_keeps_previous_document() {
        let mut state = AppState::default();
        state.finish_generation(Ok(sample_document("Antigo")));

        state.begin_generation();
        assert!(state.is_generating());
        assert_eq!(state.document.as_ref().unwrap().title, "Antigo");

        state.finish_generation(Err("Falha".into()));

        assert_eq!(state.status, GenerationStatus::Error);
        assert_eq!(state.error.as_deref(), Some("Falha"));
        assert_eq!(state.document.as_ref().unwrap().title, "Antigo");
    }

    #[test]
    fn successful_generation_replaces_document() {
        let mut state = AppState::default();
        state.finish_generation(Ok(sample_document("Antigo")));
        state.begin_generation();
        state.finish_generation(Ok(sample_document("Novo")));

        assert_eq!(state.status, GenerationStatus::Success);
        assert_eq!(state.document.unwrap().title, "Novo");
    }

    #[test]
    fn loading_from_gallery_switches_home() {
        let mut state = AppState {
            view: View::Gallery,
            error: Some("x".into()),
            ..Default::default()
        };
        state.load_from_gallery(sample_document("Salvo"));

        assert_eq!(state.view, View::Home);
        assert_eq!(state.status, GenerationStatus::Success);
        assert!(state.error.is_none());
    }

    #[test]
    fn mark_saved_only_touches_matching_id() {
        let mut state = AppState::default();
        let mut doc = sample_document("A").with_new_identity(1);
        state.replace_document(doc.clone());

        doc.last_saved = Some(99);
        state.mark_saved(&doc);
        assert_eq!(state.document.as_ref().unwrap().last_saved, Some(99));

        let other = sample_document("B").with_new_identity(500);
        state.mark_saved(&other);
        assert_eq!(state.document.as_ref().unwrap().last_saved, Some(99));
    }

    #[test]
    fn gallery_starts_without_stale_messages() {
        let mut state = AppState::default();
        state.begin_generation();
        state.finish_generation(Err("Falha ao criar o roteiro.".into()));

        state.show_gallery();

        assert_eq!(state.view, View::Gallery);
        assert!(state.error.is_none());
        assert!(state.notice.is_none());
    }

    #[test]
    fn deleting_the_open_canvas_drops_its_identity() {
        let mut state = AppState::default();
        let doc = sample_document("Aberto").with_new_identity(7);
        let id = doc.id.clone().unwrap();
        state.replace_document(doc);

        state.forget_deleted("outro");
        assert_eq!(state.document.as_ref().unwrap().id.as_deref(), Some(id.as_str()));

        state.forget_deleted(&id);
        let doc = state.document.as_ref().unwrap();
        assert!(doc.id.is_none());
        assert!(doc.last_saved.is_none());
        assert_eq!(doc.title, "Aberto");
    }

    #[test]
    fn clear_drops_document() {
        let mut state = AppState::default();
        state.finish_generation(Ok(sample_document("A")));
        state.clear();

        assert!(state.document.is_none());
        assert_eq!(state.status, GenerationStatus::Idle);
    }
}
