use crate::engine::llm_client::ContentGenerator;
use crate::engine::prompt_builder::{read_attachment, PromptBuilder, RequestPart};
use crate::error::CanvasError;
use crate::model::document::GameDesignDocument;
use crate::model::generation_params::GenerationParams;
use crate::model::llm_decode::decode_canvas;

/// Attachment read, request build, model call, decode.
///
/// Atomic from the caller's side: either a whole document or an error.
/// The returned document has no identity yet.
pub fn generate_canvas(
    generator: &dyn ContentGenerator,
    params: &GenerationParams,
) -> Result<GameDesignDocument, CanvasError> {
    let attachment = params
        .pdf_file
        .as_deref()
        .map(read_attachment)
        .transpose()?;

    let parts = PromptBuilder::build(params, attachment.as_deref());
    let (text_parts, binary_parts) = part_summary(&parts);
    tracing::debug!(
        text_parts,
        binary_parts,
        attachment_bytes = attachment.as_ref().map_or(0, Vec::len),
        "built generation request"
    );

    let raw = generator.generate(&parts)?;
    tracing::debug!(response_len = raw.len(), "model responded");

    decode_canvas(&raw)
}

/// Counts text vs binary parts; used for logging and tests.
pub fn part_summary(parts: &[RequestPart]) -> (usize, usize) {
    parts.iter().fold((0, 0), |(text, binary), part| match part {
        RequestPart::Text(_) => (text + 1, binary),
        RequestPart::InlineData(_) => (text, binary + 1),
    })
}
