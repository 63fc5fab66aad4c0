use std::path::PathBuf;

pub const EDUCATION_LEVELS: [&str; 4] = [
    "Educação Infantil",
    "Ensino Fundamental I",
    "Ensino Fundamental II",
    "Ensino Médio",
];

pub const TERMS: [&str; 4] = ["1º Bimestre", "2º Bimestre", "3º Bimestre", "4º Bimestre"];

/// Everything the form collects for one generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationParams {
    pub prompt: String,
    pub education_level: String,
    pub subject: String,
    pub grade: String,
    pub term: String,
    /// Optional PDF used as reference material.
    pub pdf_file: Option<PathBuf>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            education_level: EDUCATION_LEVELS[1].into(),
            subject: String::new(),
            grade: String::new(),
            term: TERMS[0].into(),
            pdf_file: None,
        }
    }
}

impl GenerationParams {
    /// The form refuses to submit until these are filled.
    pub fn is_complete(&self) -> bool {
        [&self.subject, &self.grade, &self.prompt]
            .iter()
            .all(|s| !s.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_form_is_incomplete() {
        assert!(!GenerationParams::default().is_complete());
    }

    #[test]
    fn whitespace_only_fields_do_not_count() {
        let params = GenerationParams {
            subject: "História".into(),
            grade: "   ".into(),
            prompt: "Jogo sobre o Brasil colonial".into(),
            ..Default::default()
        };
        assert!(!params.is_complete());

        let params = GenerationParams {
            grade: "7º Ano".into(),
            ..params
        };
        assert!(params.is_complete());
    }
}
