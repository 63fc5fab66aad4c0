use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::error::CanvasError;
use crate::model::generation_params::GenerationParams;

pub const PDF_MIME_TYPE: &str = "application/pdf";

/// One part of a multi-modal generation request.
///
/// Serializes to the Gemini `Part` shape: `{"text": ..}` or
/// `{"inlineData": {"mimeType": .., "data": ..}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RequestPart {
    Text(String),
    InlineData(InlineData),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    /// Base64 payload.
    pub data: String,
}

/// Reads the reference attachment from disk.
pub fn read_attachment(path: &Path) -> Result<Vec<u8>, CanvasError> {
    fs::read(path).map_err(|source| CanvasError::Encoding {
        path: path.display().to_string(),
        source,
    })
}

/// Builds the ordered request parts.
/// Formats only: no I/O, no networking, no size checks.
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn build(params: &GenerationParams, attachment: Option<&[u8]>) -> Vec<RequestPart> {
        let mut parts = Vec::with_capacity(2);
        let mut prompt = String::new();

        push_role_and_task(&mut prompt);
        push_user_parameters(&mut prompt, params);

        if let Some(bytes) = attachment {
            push_attachment_note(&mut prompt);
            parts.push(RequestPart::InlineData(InlineData {
                mime_type: PDF_MIME_TYPE.to_string(),
                data: STANDARD.encode(bytes),
            }));
        }

        push_format_instructions(&mut prompt, params);

        parts.push(RequestPart::Text(prompt));
        parts
    }
}

fn push_role_and_task(prompt: &mut String) {
    prompt.push_str("Atue como um Especialista em Gamificação Educacional e Construct 3.\n\n");
    prompt.push_str("Tarefa: Preencher um \"Canvas de Gamificação\" completo.\n");
    prompt.push_str("Engine: Construct 3.\n\n");
}

fn push_user_parameters(prompt: &mut String, params: &GenerationParams) {
    prompt.push_str("INFORMAÇÕES FORNECIDAS PELO USUÁRIO:\n");
    prompt.push_str(&format!("- Nível de Ensino: {}\n", params.education_level));
    prompt.push_str(&format!("- Matéria/Disciplina: {}\n", params.subject));
    prompt.push_str(&format!("- Ano Escolar: {}\n", params.grade));
    prompt.push_str(&format!("- Bimestre: {}\n", params.term));
    prompt.push_str(&format!("- Detalhes Adicionais: \"{}\"\n", params.prompt));
}

fn push_attachment_note(prompt: &mut String) {
    prompt.push_str(
        "\nAnalise o arquivo PDF anexo como material de referência base para o conteúdo do jogo, tema e perguntas.\n",
    );
}

fn push_format_instructions(prompt: &mut String, params: &GenerationParams) {
    prompt.push_str("\nPreencha TODAS as seções do Canvas JSON:\n");
    prompt.push_str("1. Relação com Currículo:\n");
    prompt.push_str(
        "   - No campo 'gradeLevel', combine o Ano e o Bimestre (Ex: \"5º Ano - 2º Bimestre\").\n",
    );
    prompt.push_str(&format!(
        "   - Preencha 'discipline' com '{}'.\n",
        params.subject
    ));
    prompt.push_str(&format!(
        "   - Preencha 'area' com '{}'.\n",
        params.education_level
    ));
    prompt.push_str("2. Estilo do Jogo\n");
    prompt.push_str("3. Narrativa\n");
    prompt.push_str("4. Fluxo do Jogo\n");
    prompt.push_str("5. Chefes e Inimigos\n");
    prompt.push_str("- Mecânicas\n");
    prompt.push_str("- Conteúdo Programático (Intro, Vitória, Derrota)\n\n");
    prompt.push_str("Responda EXATAMENTE no formato JSON solicitado.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn params() -> GenerationParams {
        GenerationParams {
            prompt: "Jogo de plataforma com frações".into(),
            education_level: "Ensino Fundamental I".into(),
            subject: "Matemática".into(),
            grade: "5º Ano".into(),
            term: "2º Bimestre".into(),
            pdf_file: None,
        }
    }

    fn text_of(parts: &[RequestPart]) -> &str {
        parts
            .iter()
            .find_map(|p| match p {
                RequestPart::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .expect("text part")
    }

    #[test]
    fn without_attachment_emits_one_text_part() {
        let p = params();
        let parts = PromptBuilder::build(&p, None);

        assert_eq!(parts.len(), 1);
        let text = text_of(&parts);
        for input in [&p.prompt, &p.education_level, &p.subject, &p.grade, &p.term] {
            assert!(text.contains(input.as_str()), "missing {input}");
        }
        assert!(!text.contains("PDF anexo"));
    }

    #[test]
    fn format_instructions_map_fields() {
        let parts = PromptBuilder::build(&params(), None);
        let text = text_of(&parts);

        assert!(text.contains("Preencha 'discipline' com 'Matemática'"));
        assert!(text.contains("Preencha 'area' com 'Ensino Fundamental I'"));
        assert!(text.contains("'gradeLevel', combine o Ano e o Bimestre"));
    }

    #[test]
    fn attachment_is_always_pdf() {
        // The file name never reaches the builder, only the bytes do.
        let p = GenerationParams {
            pdf_file: Some(PathBuf::from("notes.txt")),
            ..params()
        };
        let parts = PromptBuilder::build(&p, Some(b"%PDF-1.4 fake"));

        assert_eq!(parts.len(), 2);
        match &parts[0] {
            RequestPart::InlineData(data) => {
                assert_eq!(data.mime_type, "application/pdf");
                assert_eq!(data.data, STANDARD.encode(b"%PDF-1.4 fake"));
            }
            other => panic!("expected inline data first, got {other:?}"),
        }
        assert!(matches!(parts[1], RequestPart::Text(_)));
        assert!(text_of(&parts).contains("Analise o arquivo PDF anexo"));
    }

    #[test]
    fn empty_attachment_is_passed_through() {
        let parts = PromptBuilder::build(&params(), Some(&[]));

        assert_eq!(parts.len(), 2);
        assert!(matches!(&parts[0], RequestPart::InlineData(d) if d.data.is_empty()));
    }

    #[test]
    fn parts_serialize_to_gemini_shape() {
        let parts = PromptBuilder::build(&params(), Some(b"abc"));
        let value = serde_json::to_value(&parts).unwrap();

        assert_eq!(value[0]["inlineData"]["mimeType"], "application/pdf");
        assert_eq!(value[0]["inlineData"]["data"], "YWJj");
        assert!(value[1]["text"].is_string());
    }

    #[test]
    fn unreadable_attachment_is_an_encoding_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_attachment(&dir.path().join("missing.pdf")).unwrap_err();

        assert!(matches!(err, CanvasError::Encoding { .. }), "{err:?}");
    }

    #[test]
    fn reads_attachment_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ref.pdf");
        std::fs::write(&path, b"%PDF").unwrap();

        assert_eq!(read_attachment(&path).unwrap(), b"%PDF");
    }
}
