use std::{
    collections::{
        BTreeMap,
        BTreeSet,
        HashSet,
    },
    path::Path,
};

use crate::{
    core::{
        CombinedPoem,
        Poem,
        PoemStore,
        PoemkitError,
    },
    persistence::write_json_file,
};

/// Joins per-language collections back into combined poems, matching by
/// poem id and senid. The first collection decides poem order and metadata;
/// poems it lacks follow in order of first appearance.
pub fn merge_collections(collections: &[(&str, &[Poem])]) -> Vec<CombinedPoem> {
    let mut seen = HashSet::new();
    let ids: Vec<&str> = collections
        .iter()
        .flat_map(|(_, poems)| poems.iter().map(|p| p.id.as_str()))
        .filter(|id| seen.insert(*id))
        .collect();

    ids.into_iter()
        .filter_map(|id| {
            let found: Vec<(&str, &Poem)> = collections
                .iter()
                .filter_map(|(lang, poems)| poems.iter().find(|p| p.id == id).map(|p| (*lang, p)))
                .collect();

            let (_, first) = found.first()?;

            let senids: BTreeSet<u32> =
                found.iter().flat_map(|(_, p)| p.sentences.iter().map(|s| s.senid)).collect();

            let sentences = senids
                .into_iter()
                .map(|senid| {
                    found
                        .iter()
                        .filter_map(|(lang, poem)| {
                            poem.sentence(senid).map(|s| (lang.to_string(), s.content.clone()))
                        })
                        .collect::<BTreeMap<String, String>>()
                })
                .collect();

            Some(CombinedPoem {
                id: first.id.clone(),
                title: first.title().to_string(),
                author: first.author().to_string(),
                tag: first.tag.clone(),
                sentences,
            })
        })
        .collect()
}

/// Merges every loaded language, canonical language first.
pub fn merge_store(store: &PoemStore) -> Vec<CombinedPoem> {
    let canonical = store.canonical_language();
    let mut order = vec![canonical];
    order.extend(store.loaded_languages().into_iter().filter(|lang| *lang != canonical));

    let collections: Vec<(&str, &[Poem])> = order
        .into_iter()
        .filter_map(|lang| store.poems(lang).map(|poems| (lang, poems)))
        .collect();

    merge_collections(&collections)
}

pub fn merge_to_file(store: &PoemStore, output: &Path) -> Result<usize, PoemkitError> {
    let combined = merge_store(store);
    write_json_file(output, &combined)?;
    tracing::info!("Wrote {} merged poems to {}", combined.len(), output.display());
    Ok(combined.len())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        core::Sentence,
        persistence::write_json_file,
        tools::split::split_file,
    };

    fn languages() -> Vec<String> {
        ["chinese", "english", "japanese"].iter().map(|s| s.to_string()).collect()
    }

    fn combined() -> Vec<CombinedPoem> {
        let line = |pairs: &[(&str, &str)]| -> BTreeMap<String, String> {
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
        };

        vec![
            CombinedPoem {
                id: "p1".to_string(),
                title: "登鹳雀楼".to_string(),
                author: "王之涣".to_string(),
                tag: Some(vec!["五言绝句".to_string()]),
                sentences: vec![
                    line(&[
                        ("chinese", "白日依山尽，"),
                        ("english", "The white sun sets behind the mountains,"),
                        ("japanese", "白日山に依りて尽き"),
                    ]),
                    line(&[("chinese", "黄河入海流。"), ("japanese", "黄河海に入りて流る")]),
                ],
            },
            CombinedPoem {
                id: "p2".to_string(),
                title: "江雪".to_string(),
                author: "柳宗元".to_string(),
                tag: None,
                sentences: vec![line(&[("chinese", "千山鸟飞绝，"), ("english", "A thousand peaks, no bird in flight,")])],
            },
        ]
    }

    #[test]
    fn test_split_then_merge_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("combined.json");
        write_json_file(&input, &combined()).unwrap();
        split_file(&input, dir.path(), "poem", &languages()).unwrap();

        let store = PoemStore::open(dir.path(), "poem", &languages(), &languages()).unwrap();
        assert_eq!(merge_store(&store), combined());

        let output = dir.path().join("merged.json");
        assert_eq!(merge_to_file(&store, &output).unwrap(), 2);
        let written: Vec<CombinedPoem> = crate::persistence::read_json_file(&output).unwrap();
        assert_eq!(written, combined());
    }

    #[test]
    fn test_poems_missing_from_first_collection_are_appended() {
        let mut only_english = Poem::new("p9", "Extra", "");
        only_english.sentences.push(Sentence { senid: 3, content: "late line".to_string() });
        let chinese = vec![Poem::new("p1", "标题", "作者")];
        let english = vec![Poem::new("p1", "Title", "Author"), only_english];

        let merged = merge_collections(&[("chinese", chinese.as_slice()), ("english", english.as_slice())]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].title, "标题");
        assert_eq!(merged[1].id, "p9");
        assert_eq!(merged[1].sentences[0].get("english").map(String::as_str), Some("late line"));
    }
}
