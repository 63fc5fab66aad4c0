use crate::model::document::GameDesignDocument;
use crate::model::generation_params::GenerationParams;
use crate::ui::settings::AppSettings;

pub enum EngineCommand {
    Generate(GenerationParams),
    SaveToGallery(GameDesignDocument),
    LoadGallery,
    DeleteFromGallery(String),
    UpdateSettings(AppSettings),
    TestConnection,
}

#[derive(Debug)]
pub enum EngineResponse {
    /// Generated document with identity assigned, or a user-facing message.
    Generated(Result<GameDesignDocument, String>),

    /// The stored document, or `None` if the write failed.
    Saved(Option<GameDesignDocument>),

    /// Whole gallery listing, newest first.
    Gallery(Vec<GameDesignDocument>),

    /// Delete outcome; a fresh `Gallery` listing follows.
    Deleted { id: String, ok: bool },

    ConnectionStatus(Result<String, String>),
}
