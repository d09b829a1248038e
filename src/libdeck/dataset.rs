//! The static dataset collaborator: classes of question/answer pairs plus
//! the subject color palette, read from a JSON document. The palette is
//! configuration handed to the renderer, not logic of its own.

use log::debug;
use rand::rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("cannot read dataset file")]
    Read(#[from] io::Error),
    #[error("malformed dataset JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One flashcard. The id is stable for the lifetime of the class and keys
/// per-card state such as reveal flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: usize,
    pub prompt: String,
    pub answer: String,
}

#[derive(Debug, Clone)]
pub struct ClassObj {
    pub id: String,
    pub subject: String,
    pub class_name: String,
    pub subname: String,
    pub questions: Vec<Question>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ColorPair {
    pub primary: String,
    pub secondary: String,
}

#[derive(Debug, Clone)]
pub struct Palette {
    subjects: HashMap<String, ColorPair>,
}

impl Palette {
    /// Accent colors for a subject, falling back to the science pair for
    /// subjects the palette does not know.
    pub fn colors(&self, subject: &str) -> ColorPair {
        self.subjects
            .get(subject)
            .or_else(|| self.subjects.get("science"))
            .cloned()
            .unwrap_or(ColorPair {
                primary: "#906D88".into(),
                secondary: "#EEDAA6".into(),
            })
    }
}

impl Default for Palette {
    fn default() -> Palette {
        let mut subjects = HashMap::new();
        subjects.insert(
            "science".into(),
            ColorPair {
                primary: "#906D88".into(),
                secondary: "#EEDAA6".into(),
            },
        );
        subjects.insert(
            "physics".into(),
            ColorPair {
                primary: "#005EB8".into(),
                secondary: "#BBDEFB".into(),
            },
        );
        subjects.insert(
            "chemistry".into(),
            ColorPair {
                primary: "#2C7D4E".into(),
                secondary: "#A8DADC".into(),
            },
        );
        Palette { subjects }
    }
}

#[derive(Serialize, Deserialize, Debug)]
struct DatasetJson {
    #[serde(default)]
    palette: HashMap<String, ColorPair>,
    classes: Vec<ClassJson>,
}

#[derive(Serialize, Deserialize, Debug)]
struct ClassJson {
    id: String,
    subject: String,
    class_name: String,
    subname: String,
    questions: Vec<QuestionJson>,
}

#[derive(Serialize, Deserialize, Debug)]
struct QuestionJson {
    q: String,
    a: String,
}

#[derive(Debug, Clone)]
pub struct Dataset {
    palette: Palette,
    classes: Vec<ClassObj>,
}

impl Dataset {
    pub fn from_json(json: &str) -> Result<Dataset, DatasetError> {
        let raw: DatasetJson = serde_json::from_str(json)?;
        let mut palette = Palette::default();
        palette.subjects.extend(raw.palette);
        let classes = raw
            .classes
            .into_iter()
            .map(|class| ClassObj {
                id: class.id,
                subject: class.subject,
                class_name: class.class_name,
                subname: class.subname,
                questions: class
                    .questions
                    .into_iter()
                    .enumerate()
                    .map(|(id, q)| Question {
                        id,
                        prompt: q.q,
                        answer: q.a,
                    })
                    .collect(),
            })
            .collect();
        Ok(Dataset { palette, classes })
    }

    pub fn load_from_path(path: &Path) -> Result<Dataset, DatasetError> {
        debug!("[Setup] Reading dataset from {:?}", path);
        let json = std::fs::read_to_string(path)?;
        Dataset::from_json(&json)
    }

    /// The dataset shipped with the app.
    pub fn builtin() -> Dataset {
        Dataset::from_json(include_str!("../../data/classes.json"))
            .expect("built-in dataset is valid JSON")
    }

    pub fn classes(&self) -> &[ClassObj] {
        &self.classes
    }

    pub fn class_by_id(&self, id: &str) -> Option<&ClassObj> {
        self.classes.iter().find(|c| c.id == id)
    }

    pub fn random_class(&self) -> Option<&ClassObj> {
        self.classes.choose(&mut rng())
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"{
        "palette": { "botany": { "primary": "#112233", "secondary": "#445566" } },
        "classes": [
            {
                "id": "bot-1",
                "subject": "botany",
                "class_name": "Leaves",
                "subname": "BOT",
                "questions": [
                    { "q": "What is photosynthesis?", "a": "Light to sugar." },
                    { "q": "What is chlorophyll?", "a": "The green pigment." }
                ]
            },
            {
                "id": "bot-2",
                "subject": "botany",
                "class_name": "Roots",
                "subname": "BOT",
                "questions": []
            }
        ]
    }"##;

    #[test]
    fn parses_classes_and_assigns_question_ids() {
        let dataset = Dataset::from_json(SAMPLE).unwrap();
        let class = dataset.class_by_id("bot-1").unwrap();
        assert_eq!(class.class_name, "Leaves");
        assert_eq!(class.questions.len(), 2);
        assert_eq!(class.questions[0].id, 0);
        assert_eq!(class.questions[1].id, 1);
        assert_eq!(class.questions[1].answer, "The green pigment.");
    }

    #[test]
    fn empty_question_lists_are_allowed() {
        let dataset = Dataset::from_json(SAMPLE).unwrap();
        assert!(dataset.class_by_id("bot-2").unwrap().questions.is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            Dataset::from_json("{ not json"),
            Err(DatasetError::Parse(_))
        ));
        assert!(matches!(
            Dataset::from_json(r#"{ "classes": [{ "id": "x" }] }"#),
            Err(DatasetError::Parse(_))
        ));
    }

    #[test]
    fn palette_merges_over_the_defaults() {
        let dataset = Dataset::from_json(SAMPLE).unwrap();
        assert_eq!(dataset.palette().colors("botany").primary, "#112233");
        assert_eq!(dataset.palette().colors("physics").primary, "#005EB8");
        // Unknown subjects fall back to the science pair.
        assert_eq!(dataset.palette().colors("history").primary, "#906D88");
    }

    #[test]
    fn builtin_dataset_parses_and_is_non_empty() {
        let dataset = Dataset::builtin();
        assert!(!dataset.classes().is_empty());
        assert!(dataset.classes().iter().any(|c| !c.questions.is_empty()));
    }
}
