use crate::engine::schema::{canvas_schema, missing_required};
use crate::error::CanvasError;
use crate::model::document::GameDesignDocument;
use serde_json::Value;

/// Decode raw model output into a typed canvas.
///
/// Syntax errors are `Parse`, missing required fields are `Schema` and
/// wrongly typed fields are `Mismatch`. Optional arrays and strings that are
/// omitted or null come back empty. Identity fields are dropped so a fresh one can
/// be assigned.
pub fn decode_canvas(raw: &str) -> Result<GameDesignDocument, CanvasError> {
    let value: Value = serde_json::from_str(raw.trim())?;

    let missing = missing_required(canvas_schema(), &value);
    if !missing.is_empty() {
        return Err(CanvasError::Schema { missing });
    }

    let mut doc: GameDesignDocument =
        serde_json::from_value(value).map_err(|e| CanvasError::Mismatch {
            reason: e.to_string(),
        })?;

    doc.id = None;
    doc.last_saved = None;

    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTEXT: &str = r#"{"area":"Ensino Médio","gradeLevel":"1º Ano - 3º Bimestre","discipline":"Química","theme":"Tabela periódica","bnccSkills":"EM13CNT307"}"#;

    fn without_arrays() -> String {
        format!(
            r#"{{"title":"T","educationContext":{CONTEXT},"genre":"G","gameFlow":"F","enemiesAndObstacles":"E","programmaticContent":{{"intro":"I","victoryCondition":"V","defeatCondition":"D"}}}}"#
        )
    }

    #[test]
    fn omitted_arrays_default_to_empty() {
        let doc = decode_canvas(&without_arrays()).unwrap();

        assert_eq!(doc.title, "T");
        assert!(doc.characters.is_empty());
        assert!(doc.levels.is_empty());
        assert!(doc.gameplay_mechanics.is_empty());
        assert_eq!(doc.education_context.bibliography, "");
        assert_eq!(doc.programmatic_content.defeat_condition, "D");
    }

    #[test]
    fn not_json_is_a_parse_error() {
        let err = decode_canvas("not json").unwrap_err();
        assert!(matches!(err, CanvasError::Parse(_)), "{err:?}");
    }

    #[test]
    fn missing_programmatic_content_is_rejected() {
        let raw = format!(
            r#"{{"title":"T","educationContext":{CONTEXT},"genre":"G","gameFlow":"F","enemiesAndObstacles":"E"}}"#
        );

        match decode_canvas(&raw).unwrap_err() {
            CanvasError::Schema { missing } => assert_eq!(missing, ["programmaticContent"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn wrong_type_is_rejected() {
        let raw = without_arrays().replace(r#""title":"T""#, r#""title":3"#);

        assert!(matches!(
            decode_canvas(&raw).unwrap_err(),
            CanvasError::Mismatch { .. }
        ));
    }

    #[test]
    fn null_optional_fields_read_as_empty() {
        let raw = without_arrays()
            .replacen(
                '{',
                r#"{"characters":null,"levels":null,"gameplayMechanics":null,"synopsis":null,"platform":null,"#,
                1,
            )
            .replace(
                r#""bnccSkills":"EM13CNT307""#,
                r#""bnccSkills":"EM13CNT307","bibliography":null"#,
            );
        let doc = decode_canvas(&raw).unwrap();

        assert!(doc.characters.is_empty());
        assert!(doc.levels.is_empty());
        assert!(doc.gameplay_mechanics.is_empty());
        assert_eq!(doc.synopsis, "");
        assert_eq!(doc.platform, "");
        assert_eq!(doc.education_context.bibliography, "");
    }

    #[test]
    fn null_character_fields_read_as_empty() {
        let raw = without_arrays().replacen(
            '{',
            r#"{"characters":[{"name":"Ana","role":null,"description":null}],"#,
            1,
        );
        let doc = decode_canvas(&raw).unwrap();

        assert_eq!(doc.characters[0].name, "Ana");
        assert_eq!(doc.characters[0].role, "");
    }

    #[test]
    fn null_required_field_is_still_missing() {
        let raw = without_arrays().replace(r#""genre":"G""#, r#""genre":null"#);

        match decode_canvas(&raw).unwrap_err() {
            CanvasError::Schema { missing } => assert_eq!(missing, ["genre"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn model_supplied_identity_is_ignored() {
        let raw = without_arrays().replacen('{', r#"{"id":"abc","lastSaved":42,"#, 1);
        let doc = decode_canvas(&raw).unwrap();

        assert_eq!(doc.id, None);
        assert_eq!(doc.last_saved, None);
    }

    #[test]
    fn full_response_keeps_array_order() {
        let raw = without_arrays().replacen(
            '{',
            r#"{"gameplayMechanics":["Coletar","Combinar","Reagir"],"characters":[{"name":"Ana","role":"Cientista"}],"#,
            1,
        );
        let doc = decode_canvas(&raw).unwrap();

        assert_eq!(doc.gameplay_mechanics, ["Coletar", "Combinar", "Reagir"]);
        assert_eq!(doc.characters[0].name, "Ana");
        assert_eq!(doc.characters[0].description, "");
    }
}
