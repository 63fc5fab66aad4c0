use serde::{Deserialize, Deserializer, Serialize};

/// Optional fields: an explicit `null` reads the same as an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/* =========================
   Canvas sections
   ========================= */

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub objective: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub environment: String,
}

/// Section 1: how the game relates to the curriculum.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationContext {
    pub area: String,
    /// Grade and term combined, e.g. "5º Ano - 2º Bimestre".
    pub grade_level: String,
    pub discipline: String,
    pub theme: String,
    /// Opaque curricular-standard codes and descriptions.
    pub bncc_skills: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bibliography: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgrammaticContent {
    pub intro: String,
    pub victory_condition: String,
    pub defeat_condition: String,
}

/* =========================
   Game Design Document
   ========================= */

/// One generated canvas.
///
/// The serialized form is both the model's response shape and the gallery
/// file layout, so field names stay camelCase on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDesignDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_saved: Option<i64>,

    pub title: String,

    pub education_context: EducationContext,

    pub genre: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub target_audience: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub platform: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub technical_requirements: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub synopsis: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub characters: Vec<Character>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub levels: Vec<Level>,

    pub game_flow: String,
    pub enemies_and_obstacles: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub gameplay_mechanics: Vec<String>,

    pub programmatic_content: ProgrammaticContent,
}

impl GameDesignDocument {
    /// Gives a freshly generated document its identity.
    pub fn with_new_identity(self, now_ms: i64) -> Self {
        Self {
            id: Some(uuid::Uuid::new_v4().to_string()),
            last_saved: Some(now_ms),
            ..self
        }
    }

    /// Sort key for the gallery; unsaved documents sort as oldest.
    pub fn last_saved_or_zero(&self) -> i64 {
        self.last_saved.unwrap_or(0)
    }

    pub fn display_title(&self) -> &str {
        let title = self.title.trim();
        if title.is_empty() {
            "Sem título"
        } else {
            title
        }
    }
}

/// Current time as epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
pub(crate) fn sample_document(title: &str) -> GameDesignDocument {
    GameDesignDocument {
        id: None,
        last_saved: None,
        title: title.to_string(),
        education_context: EducationContext {
            area: "Ensino Fundamental I".into(),
            grade_level: "5º Ano - 2º Bimestre".into(),
            discipline: "Matemática".into(),
            theme: "Frações".into(),
            bncc_skills: "EF05MA03".into(),
            bibliography: String::new(),
        },
        genre: "Plataforma".into(),
        target_audience: "Alunos de 10 anos".into(),
        platform: "Construct 3".into(),
        technical_requirements: "Navegador moderno".into(),
        synopsis: "Um robô precisa dividir pizzas.".into(),
        characters: vec![Character {
            name: "Robi".into(),
            role: "Protagonista".into(),
            description: "Robô cozinheiro".into(),
        }],
        levels: vec![Level {
            name: "Cozinha".into(),
            objective: "Cortar em metades".into(),
            environment: "Restaurante".into(),
        }],
        game_flow: "Menu -> Fase 1 -> Fim".into(),
        enemies_and_obstacles: "Ratos famintos".into(),
        gameplay_mechanics: vec!["Pular".into(), "Cortar".into()],
        programmatic_content: ProgrammaticContent {
            intro: "Bem-vindo!".into(),
            victory_condition: "Todas as pizzas divididas".into(),
            defeat_condition: "Tempo esgotado".into(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_keys() {
        let doc = sample_document("Pizza");
        let value = serde_json::to_value(&doc).unwrap();

        assert!(value.get("educationContext").is_some());
        assert!(value["educationContext"].get("bnccSkills").is_some());
        assert!(value["programmaticContent"].get("victoryCondition").is_some());
        assert!(value.get("gameplayMechanics").is_some());
        // Unset identity stays off the wire.
        assert!(value.get("id").is_none());
        assert!(value.get("lastSaved").is_none());
    }

    #[test]
    fn stored_layout_reads_back_identically() {
        let doc = sample_document("Pizza").with_new_identity(1_700_000_000_000);
        let json = serde_json::to_string(&vec![doc.clone()]).unwrap();
        let back: Vec<GameDesignDocument> = serde_json::from_str(&json).unwrap();

        assert_eq!(back, vec![doc]);
    }

    #[test]
    fn new_identity_is_unique() {
        let a = sample_document("A").with_new_identity(1);
        let b = sample_document("A").with_new_identity(1);

        assert!(a.id.is_some());
        assert_ne!(a.id, b.id);
        assert_eq!(a.last_saved, Some(1));
    }

    #[test]
    fn blank_title_has_placeholder() {
        assert_eq!(sample_document("  ").display_title(), "Sem título");
        assert_eq!(sample_document("Pizza").display_title(), "Pizza");
    }
}
