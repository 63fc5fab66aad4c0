use thiserror::Error;

/// Failures of a single generation request.
///
/// None of these are retried; the engine logs them and hands one message
/// back to the UI so the user can resubmit.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// The reference attachment could not be read.
    #[error("could not read attachment {path}: {source}")]
    Encoding {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The model call failed or came back without text.
    #[error("generation failed: {0}")]
    Generation(String),

    /// The model answered with something that is not JSON.
    #[error("response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Required fields are absent or null; holds their dotted paths.
    #[error("response is missing required fields: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    /// A field is present but has the wrong type.
    #[error("response has a mistyped field: {reason}")]
    Mismatch { reason: String },
}

impl CanvasError {
    /// Message shown to the user, in the application's language.
    pub fn user_message(&self) -> &'static str {
        match self {
            CanvasError::Encoding { .. } => {
                "Não foi possível ler o PDF selecionado. Verifique o arquivo e tente novamente."
            }
            CanvasError::Generation(_) => {
                "Falha ao criar o roteiro. Verifique se o PDF não é muito grande ou tente novamente."
            }
            CanvasError::Parse(_)
            | CanvasError::Schema { .. }
            | CanvasError::Mismatch { .. } => {
                "A resposta do modelo veio incompleta. Tente gerar novamente."
            }
        }
    }
}
