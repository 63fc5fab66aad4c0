use serde_json::{json, Value};
use std::sync::OnceLock;

/// Response schema declared on every generation call.
///
/// Uses the Gemini `responseSchema` dialect (upper-case type names). The same
/// value drives [`missing_required`], so the request contract and the
/// response check cannot drift apart.
pub fn canvas_schema() -> &'static Value {
    static SCHEMA: OnceLock<Value> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        json!({
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING", "description": "O título do jogo." },

                "educationContext": {
                    "type": "OBJECT",
                    "properties": {
                        "area": { "type": "STRING", "description": "Área de conhecimento." },
                        "gradeLevel": { "type": "STRING", "description": "Ano e Bimestre." },
                        "discipline": { "type": "STRING", "description": "Disciplina." },
                        "theme": { "type": "STRING", "description": "Tema central." },
                        "bnccSkills": { "type": "STRING", "description": "Habilidades BNCC." },
                        "bibliography": { "type": "STRING", "description": "Referências." }
                    },
                    "required": ["area", "gradeLevel", "discipline", "theme", "bnccSkills"]
                },

                "genre": { "type": "STRING", "description": "Gênero." },
                "targetAudience": { "type": "STRING", "description": "Público alvo." },
                "platform": { "type": "STRING", "description": "Plataforma (Construct 3)." },
                "technicalRequirements": {
                    "type": "STRING",
                    "description": "Requisitos técnicos Construct 3."
                },

                "synopsis": { "type": "STRING", "description": "Sinopse do jogo." },
                "characters": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "name": { "type": "STRING" },
                            "role": { "type": "STRING" },
                            "description": { "type": "STRING" }
                        }
                    }
                },
                "levels": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "name": { "type": "STRING" },
                            "objective": { "type": "STRING" },
                            "environment": { "type": "STRING" }
                        }
                    }
                },

                "gameFlow": {
                    "type": "STRING",
                    "description": "Descrição do fluxo do jogo (telas, navegação)."
                },
                "enemiesAndObstacles": {
                    "type": "STRING",
                    "description": "Descrição dos chefes, inimigos e obstáculos."
                },

                "gameplayMechanics": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "Lista de mecânicas e tarefas."
                },

                "programmaticContent": {
                    "type": "OBJECT",
                    "properties": {
                        "intro": { "type": "STRING", "description": "Texto de introdução do jogo." },
                        "victoryCondition": {
                            "type": "STRING",
                            "description": "Mensagem ou condição de vitória."
                        },
                        "defeatCondition": {
                            "type": "STRING",
                            "description": "Mensagem ou condição de derrota."
                        }
                    },
                    "required": ["intro", "victoryCondition", "defeatCondition"]
                }
            },
            "required": [
                "title",
                "educationContext",
                "genre",
                "gameFlow",
                "enemiesAndObstacles",
                "programmaticContent"
            ]
        })
    })
}

/// Dotted paths of every `required` property absent from `value`.
///
/// Only walks nested objects; array items carry no required fields in the
/// canvas schema. A `null` counts as absent.
pub fn missing_required(schema: &Value, value: &Value) -> Vec<String> {
    let mut missing = Vec::new();
    walk(schema, value, "", &mut missing);
    missing
}

fn walk(schema: &Value, value: &Value, prefix: &str, missing: &mut Vec<String>) {
    let Some(object) = value.as_object() else {
        missing.push(if prefix.is_empty() {
            "<root>".to_string()
        } else {
            prefix.to_string()
        });
        return;
    };

    let required = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect::<Vec<_>>())
        .unwrap_or_default();

    for name in required {
        let path = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}.{name}")
        };

        match object.get(name) {
            None | Some(Value::Null) => missing.push(path),
            Some(child) => {
                let child_schema = &schema["properties"][name];
                if child_schema.get("type").and_then(Value::as_str) == Some("OBJECT") {
                    walk(child_schema, child, &path, missing);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_required_set() {
        let required: Vec<&str> = canvas_schema()["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();

        assert_eq!(
            required,
            [
                "title",
                "educationContext",
                "genre",
                "gameFlow",
                "enemiesAndObstacles",
                "programmaticContent"
            ]
        );
    }

    #[test]
    fn bibliography_is_the_only_optional_context_field() {
        let context = &canvas_schema()["properties"]["educationContext"];
        let required = context["required"].as_array().unwrap();
        let properties = context["properties"].as_object().unwrap();

        assert_eq!(required.len(), 5);
        assert_eq!(properties.len(), 6);
        assert!(!required.contains(&json!("bibliography")));
    }

    #[test]
    fn arrays_are_declared_as_arrays() {
        let props = &canvas_schema()["properties"];
        for name in ["characters", "levels", "gameplayMechanics"] {
            assert_eq!(props[name]["type"], "ARRAY", "{name}");
        }
    }

    #[test]
    fn reports_nested_paths() {
        let value = json!({
            "title": "T",
            "educationContext": { "area": "A", "gradeLevel": "G", "discipline": "D" },
            "genre": "G",
            "gameFlow": "F",
            "enemiesAndObstacles": null,
            "programmaticContent": { "intro": "I" }
        });

        let missing = missing_required(canvas_schema(), &value);

        assert_eq!(
            missing,
            [
                "educationContext.theme",
                "educationContext.bnccSkills",
                "enemiesAndObstacles",
                "programmaticContent.victoryCondition",
                "programmaticContent.defeatCondition",
            ]
        );
    }

    #[test]
    fn non_object_nested_value_is_reported() {
        let value = json!({
            "title": "T",
            "educationContext": "nope",
            "genre": "G",
            "gameFlow": "F",
            "enemiesAndObstacles": "E",
            "programmaticContent": { "intro": "I", "victoryCondition": "V", "defeatCondition": "D" }
        });

        assert_eq!(missing_required(canvas_schema(), &value), ["educationContext"]);
    }

    #[test]
    fn non_object_root_is_reported() {
        assert_eq!(missing_required(canvas_schema(), &json!([1, 2])), ["<root>"]);
    }
}
