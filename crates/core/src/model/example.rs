use serde::{Deserialize, Serialize};

/// An example sentence and its translation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "ExampleRepr")]
pub struct Example {
    pub en: String,
    pub ru: String,
}

impl Example {
    #[must_use]
    pub fn new(en: impl Into<String>, ru: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ru: ru.into(),
        }
    }
}

// Older word lists stored examples as bare English strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum ExampleRepr {
    Legacy(String),
    Pair {
        #[serde(default)]
        en: String,
        #[serde(default)]
        ru: String,
    },
}

impl From<ExampleRepr> for Example {
    fn from(repr: ExampleRepr) -> Self {
        match repr {
            ExampleRepr::Legacy(en) => Self {
                en,
                ru: String::new(),
            },
            ExampleRepr::Pair { en, ru } => Self { en, ru },
        }
    }
}
