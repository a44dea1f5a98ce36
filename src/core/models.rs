use std::collections::BTreeMap;

use serde::{
    Deserialize,
    Serialize,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub senid: u32,
    pub content: String,
}

/// One poem as stored in a per-language file.
///
/// Translated files may omit `title` and `author`. An absent key stays absent
/// on save and a present one is always written, even when empty. Keys this
/// type does not know about are carried through `extra` so a save never
/// drops them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poem {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<Vec<String>>,
    #[serde(rename = "sentence", default)]
    pub sentences: Vec<Sentence>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Poem {
    pub fn new(id: impl Into<String>, title: impl Into<String>, author: impl Into<String>) -> Self {
        Poem {
            id: id.into(),
            title: Some(title.into()),
            author: Some(author.into()),
            tag: None,
            sentences: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub fn author(&self) -> &str {
        self.author.as_deref().unwrap_or_default()
    }

    pub fn sentence(&self, senid: u32) -> Option<&Sentence> {
        self.sentences.iter().find(|s| s.senid == senid)
    }

    pub fn sentence_mut(&mut self, senid: u32) -> Option<&mut Sentence> {
        self.sentences.iter_mut().find(|s| s.senid == senid)
    }

    pub fn max_senid(&self) -> Option<u32> {
        self.sentences.iter().map(|s| s.senid).max()
    }

    pub fn field(&self, field: PoemField) -> &str {
        match field {
            PoemField::Id => &self.id,
            PoemField::Title => self.title(),
            PoemField::Author => self.author(),
        }
    }

    pub fn set_field(&mut self, field: PoemField, value: String) {
        match field {
            PoemField::Id => self.id = value,
            PoemField::Title => self.title = Some(value),
            PoemField::Author => self.author = Some(value),
        }
    }
}

/// The scalar poem fields the editor can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoemField {
    Id,
    Title,
    Author,
}

impl PoemField {
    pub const ALL: [PoemField; 3] = [PoemField::Id, PoemField::Title, PoemField::Author];

    pub fn label(&self) -> &'static str {
        match self {
            PoemField::Id => "id",
            PoemField::Title => "title",
            PoemField::Author => "author",
        }
    }
}

/// A poem in the combined multilingual source: every sentence maps a
/// language name to its text. Sentences live under `sentence-multilang`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedPoem {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<Vec<String>>,
    #[serde(rename = "sentence-multilang", alias = "sentence")]
    pub sentences: Vec<BTreeMap<String, String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translated_poem_without_title_loads() {
        let json = r#"{"id":"p1","sentence":[{"senid":0,"content":"Moonlight before my bed,"}]}"#;
        let poem: Poem = serde_json::from_str(json).unwrap();
        assert_eq!(poem.title, None);
        assert_eq!(poem.author(), "");
        assert_eq!(poem.sentence(0).map(|s| s.content.as_str()), Some("Moonlight before my bed,"));

        let written = serde_json::to_value(&poem).unwrap();
        assert!(written.get("title").is_none());
    }

    #[test]
    fn test_empty_title_keeps_its_key() {
        let json = r#"{"id":"p1","title":"","author":"李白","sentence":[]}"#;
        let mut poem: Poem = serde_json::from_str(json).unwrap();
        assert_eq!(poem.title.as_deref(), Some(""));

        poem.set_field(PoemField::Author, String::new());
        let written = serde_json::to_value(&poem).unwrap();
        assert_eq!(written["title"], "");
        assert_eq!(written["author"], "");
    }

    #[test]
    fn test_combined_poem_reads_multilang_sentences() {
        let json = r#"{"id":"p1","title":"静夜思","author":"李白","tag":["唐诗"],
            "sentence-multilang":[{"chinese":"床前明月光，","english":"Moonlight before my bed,"}]}"#;
        let poem: CombinedPoem = serde_json::from_str(json).unwrap();
        assert_eq!(poem.sentences.len(), 1);
        assert_eq!(poem.sentences[0]["english"], "Moonlight before my bed,");

        let written = serde_json::to_value(&poem).unwrap();
        assert!(written.get("sentence-multilang").is_some());

        let without_sentences = r#"{"id":"p1","title":"静夜思","author":"李白"}"#;
        assert!(serde_json::from_str::<CombinedPoem>(without_sentences).is_err());
    }

    #[test]
    fn test_unknown_keys_survive_round_trip() {
        let json = r#"{"id":"p1","title":"静夜思","author":"李白","dynasty":"唐","sentence":[]}"#;
        let poem: Poem = serde_json::from_str(json).unwrap();
        assert_eq!(poem.extra.get("dynasty"), Some(&serde_json::json!("唐")));

        let written = serde_json::to_value(&poem).unwrap();
        assert_eq!(written["dynasty"], "唐");
        assert!(written.get("tag").is_none());
        assert!(written.get("sentence").is_some());
    }

    #[test]
    fn test_field_accessors() {
        let mut poem = Poem::new("p1", "Title", "Author");
        poem.set_field(PoemField::Title, "New".to_string());
        assert_eq!(poem.field(PoemField::Title), "New");
        assert_eq!(poem.field(PoemField::Id), "p1");
        assert_eq!(poem.max_senid(), None);
    }
}
