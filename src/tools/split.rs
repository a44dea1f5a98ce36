use std::path::{
    Path,
    PathBuf,
};

use crate::{
    core::{
        config::language_file_path,
        CombinedPoem,
        Poem,
        PoemkitError,
        Sentence,
    },
    persistence::{
        read_json_file,
        write_json_file,
    },
};

#[derive(Debug, Default)]
pub struct SplitSummary {
    pub poems: usize,
    pub files: Vec<PathBuf>,
    /// Sentences left out because a language had no text for them.
    pub skipped_sentences: usize,
}

/// Reduces combined poems to one language. The sentence index becomes the
/// senid, so every language shares the same ids.
pub fn split_language(combined: &[CombinedPoem], language: &str) -> (Vec<Poem>, usize) {
    let mut skipped = 0;

    let poems = combined
        .iter()
        .map(|source| {
            let mut poem = Poem::new(&source.id, &source.title, &source.author);
            poem.tag = source.tag.clone();

            for (index, texts) in source.sentences.iter().enumerate() {
                match texts.get(language) {
                    Some(content) => poem.sentences.push(Sentence {
                        senid: index as u32,
                        content: content.clone(),
                    }),
                    None => {
                        tracing::warn!(
                            "[{}] Poem {} sentence {} has no text, skipping",
                            language,
                            source.id,
                            index
                        );
                        skipped += 1;
                    }
                }
            }

            poem
        })
        .collect();

    (poems, skipped)
}

/// Reads the combined file and writes `<output_dir>/<basename>_<language>.json`
/// for every language.
pub fn split_file(
    input: &Path,
    output_dir: &Path,
    basename: &str,
    languages: &[String],
) -> Result<SplitSummary, PoemkitError> {
    let combined: Vec<CombinedPoem> = read_json_file(input)?;
    tracing::info!("Read {} poems from {}", combined.len(), input.display());

    let mut summary = SplitSummary { poems: combined.len(), ..SplitSummary::default() };

    for language in languages {
        let (poems, skipped) = split_language(&combined, language);
        let path = language_file_path(output_dir, basename, language);
        write_json_file(&path, &poems)?;
        tracing::info!("[{}] Wrote {} poems to {}", language, poems.len(), path.display());

        summary.skipped_sentences += skipped;
        summary.files.push(path);
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_combined() -> Vec<CombinedPoem> {
        let line = |pairs: &[(&str, &str)]| -> BTreeMap<String, String> {
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
        };

        vec![
            CombinedPoem {
                id: "927908c0".to_string(),
                title: "静夜思".to_string(),
                author: "李白".to_string(),
                tag: Some(vec!["唐诗".to_string()]),
                sentences: vec![
                    line(&[("chinese", "床前明月光，"), ("english", "Moonlight before my bed,")]),
                    line(&[("chinese", "疑是地上霜。"), ("english", "Could it be frost on the ground?")]),
                ],
            },
            CombinedPoem {
                id: "a11c".to_string(),
                title: "春晓".to_string(),
                author: "孟浩然".to_string(),
                tag: None,
                sentences: vec![
                    line(&[("chinese", "春眠不觉晓，"), ("english", "Spring sleep, unaware of dawn,")]),
                    line(&[("chinese", "处处闻啼鸟。")]),
                ],
            },
        ]
    }

    #[test]
    fn test_split_language_uses_index_as_senid() {
        let (english, skipped) = split_language(&sample_combined(), "english");

        assert_eq!(skipped, 1);
        assert_eq!(english[0].tag, Some(vec!["唐诗".to_string()]));
        assert_eq!(english[0].title(), "静夜思");
        assert_eq!(
            english[1].sentences,
            vec![Sentence { senid: 0, content: "Spring sleep, unaware of dawn,".to_string() }]
        );
    }

    #[test]
    fn test_split_file_writes_one_file_per_language() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("combined.json");
        write_json_file(&input, &sample_combined()).unwrap();

        let languages = vec!["chinese".to_string(), "english".to_string(), "german".to_string()];
        let summary = split_file(&input, dir.path(), "poem", &languages).unwrap();

        assert_eq!(summary.poems, 2);
        assert_eq!(summary.files.len(), 3);
        // one missing english line, four missing german lines
        assert_eq!(summary.skipped_sentences, 5);

        let chinese: Vec<Poem> = read_json_file(&dir.path().join("poem_chinese.json")).unwrap();
        assert_eq!(chinese[1].sentences[1].content, "处处闻啼鸟。");
    }

    #[test]
    fn test_split_reads_sentence_multilang_records() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("poem_alllang.json");
        std::fs::write(
            &input,
            r#"[{"id":"p1","title":"静夜思","author":"李白","tag":["唐诗"],
                "sentence-multilang":[
                    {"chinese":"床前明月光，","english":"Moonlight before my bed,"},
                    {"chinese":"疑是地上霜。","english":"Could it be frost on the ground?"}
                ]}]"#,
        )
        .unwrap();

        let languages = vec!["chinese".to_string(), "english".to_string()];
        let summary = split_file(&input, dir.path(), "poem", &languages).unwrap();
        assert_eq!(summary.skipped_sentences, 0);

        let english: Vec<Poem> = read_json_file(&dir.path().join("poem_english.json")).unwrap();
        assert_eq!(
            english[0].sentences,
            vec![
                Sentence { senid: 0, content: "Moonlight before my bed,".to_string() },
                Sentence { senid: 1, content: "Could it be frost on the ground?".to_string() },
            ]
        );
    }

    #[test]
    fn test_record_without_sentences_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("poem_alllang.json");
        std::fs::write(&input, r#"[{"id":"p1","title":"静夜思","author":"李白"}]"#).unwrap();

        let languages = vec!["chinese".to_string()];
        assert!(split_file(&input, dir.path(), "poem", &languages).is_err());
    }

    #[test]
    fn test_malformed_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("combined.json");
        std::fs::write(&input, r#"{"not": "an array"}"#).unwrap();

        let languages = vec!["chinese".to_string()];
        assert!(split_file(&input, dir.path(), "poem", &languages).is_err());
        assert!(!dir.path().join("poem_chinese.json").exists());
    }
}
