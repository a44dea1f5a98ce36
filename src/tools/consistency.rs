use std::{
    collections::{
        BTreeSet,
        HashSet,
    },
    fmt,
};

use crate::core::PoemStore;

/// A cross-language gap. Reported only; nothing is repaired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyIssue {
    MissingPoem { language: String, poem_id: String },
    DuplicatePoem { language: String, poem_id: String },
    MissingSentences { language: String, poem_id: String, senids: Vec<u32> },
}

impl fmt::Display for ConsistencyIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsistencyIssue::MissingPoem { language, poem_id } => {
                write!(f, "[{}] poem {} is missing", language, poem_id)
            }
            ConsistencyIssue::DuplicatePoem { language, poem_id } => {
                write!(f, "[{}] poem {} appears more than once", language, poem_id)
            }
            ConsistencyIssue::MissingSentences { language, poem_id, senids } => {
                write!(f, "[{}] poem {} lacks senids {:?}", language, poem_id, senids)
            }
        }
    }
}

pub fn check_store(store: &PoemStore) -> Vec<ConsistencyIssue> {
    let languages = store.loaded_languages();
    let mut issues = Vec::new();

    let mut seen = HashSet::new();
    let all_ids: Vec<&str> = languages
        .iter()
        .filter_map(|lang| store.poems(lang))
        .flat_map(|poems| poems.iter().map(|p| p.id.as_str()))
        .filter(|id| seen.insert(*id))
        .collect();

    for language in &languages {
        let poems = store.poems(language).unwrap_or_default();
        let mut ids = HashSet::new();
        for poem in poems {
            if !ids.insert(poem.id.as_str()) {
                issues.push(ConsistencyIssue::DuplicatePoem {
                    language: language.to_string(),
                    poem_id: poem.id.clone(),
                });
            }
        }
    }

    for poem_id in all_ids {
        let senids: BTreeSet<u32> = languages
            .iter()
            .filter_map(|lang| store.poem(lang, poem_id))
            .flat_map(|poem| poem.sentences.iter().map(|s| s.senid))
            .collect();

        for language in &languages {
            match store.poem(language, poem_id) {
                None => issues.push(ConsistencyIssue::MissingPoem {
                    language: language.to_string(),
                    poem_id: poem_id.to_string(),
                }),
                Some(poem) => {
                    let missing: Vec<u32> =
                        senids.iter().copied().filter(|senid| poem.sentence(*senid).is_none()).collect();
                    if !missing.is_empty() {
                        issues.push(ConsistencyIssue::MissingSentences {
                            language: language.to_string(),
                            poem_id: poem_id.to_string(),
                            senids: missing,
                        });
                    }
                }
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        core::{
            config::language_file_path,
            Poem,
            Sentence,
        },
        persistence::write_json_file,
    };

    fn poem(id: &str, senids: &[u32]) -> Poem {
        let mut poem = Poem::new(id, "", "");
        poem.sentences =
            senids.iter().map(|senid| Sentence { senid: *senid, content: "x".to_string() }).collect();
        poem
    }

    #[test]
    fn test_reports_gaps_without_changing_anything() {
        let dir = tempfile::tempdir().unwrap();
        let languages: Vec<String> = vec!["chinese".to_string(), "english".to_string()];

        write_json_file(
            &language_file_path(dir.path(), "poem", "chinese"),
            &vec![poem("p1", &[0, 1]), poem("p2", &[0]), poem("p2", &[0])],
        )
        .unwrap();
        write_json_file(&language_file_path(dir.path(), "poem", "english"), &vec![poem("p1", &[0])])
            .unwrap();

        let store = PoemStore::open(dir.path(), "poem", &languages, &languages).unwrap();
        let issues = check_store(&store);

        assert_eq!(
            issues,
            vec![
                ConsistencyIssue::DuplicatePoem { language: "chinese".into(), poem_id: "p2".into() },
                ConsistencyIssue::MissingSentences {
                    language: "english".into(),
                    poem_id: "p1".into(),
                    senids: vec![1],
                },
                ConsistencyIssue::MissingPoem { language: "english".into(), poem_id: "p2".into() },
            ]
        );
        assert_eq!(store.poems("english").unwrap().len(), 1);
    }
}
