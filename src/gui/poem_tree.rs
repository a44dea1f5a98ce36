use std::collections::BTreeSet;

use eframe::egui;
use egui_ltreeview::{
    TreeView,
    TreeViewBuilder,
    TreeViewState,
};

use crate::core::{
    PoemField,
    PoemStore,
};

const PREVIEW_CHARS: usize = 24;

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum TreeNodeId {
    Poem(String),
    Field { poem_id: String, field: PoemField },
    SentenceList(String),
    Sentence { poem_id: String, senid: u32 },
    Senid { poem_id: String, senid: u32 },
    ContentGroup { poem_id: String, senid: u32 },
    Content { poem_id: String, senid: u32, language: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditTarget {
    /// Fans out to every loaded language.
    Field { poem_id: String, field: PoemField },
    /// One language only.
    Content { poem_id: String, senid: u32, language: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteTarget {
    Poem(String),
    Sentence { poem_id: String, senid: u32 },
}

/// Which toolbar actions the selected node allows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeActions {
    pub edit: Option<EditTarget>,
    pub delete: Option<DeleteTarget>,
    pub add_sentence: Option<String>,
}

impl TreeNodeId {
    pub fn poem_id(&self) -> &str {
        match self {
            TreeNodeId::Poem(poem_id) | TreeNodeId::SentenceList(poem_id) => poem_id,
            TreeNodeId::Field { poem_id, .. }
            | TreeNodeId::Sentence { poem_id, .. }
            | TreeNodeId::Senid { poem_id, .. }
            | TreeNodeId::ContentGroup { poem_id, .. }
            | TreeNodeId::Content { poem_id, .. } => poem_id,
        }
    }

    pub fn actions(&self) -> NodeActions {
        match self {
            TreeNodeId::Poem(poem_id) => NodeActions {
                delete: Some(DeleteTarget::Poem(poem_id.clone())),
                ..NodeActions::default()
            },
            TreeNodeId::Field { poem_id, field } => NodeActions {
                edit: Some(EditTarget::Field { poem_id: poem_id.clone(), field: *field }),
                ..NodeActions::default()
            },
            TreeNodeId::SentenceList(poem_id) => NodeActions {
                add_sentence: Some(poem_id.clone()),
                ..NodeActions::default()
            },
            TreeNodeId::Sentence { poem_id, senid } => NodeActions {
                delete: Some(DeleteTarget::Sentence { poem_id: poem_id.clone(), senid: *senid }),
                ..NodeActions::default()
            },
            TreeNodeId::Content { poem_id, senid, language } => NodeActions {
                edit: Some(EditTarget::Content {
                    poem_id: poem_id.clone(),
                    senid: *senid,
                    language: language.clone(),
                }),
                ..NodeActions::default()
            },
            TreeNodeId::Senid { .. } | TreeNodeId::ContentGroup { .. } => NodeActions::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SentenceNode {
    pub senid: u32,
    /// One entry per loaded language; `None` where that language lacks the sentence.
    pub contents: Vec<(String, Option<String>)>,
}

#[derive(Debug, Clone)]
pub struct PoemNode {
    pub id: String,
    pub title: String,
    pub author: String,
    pub sentences: Vec<SentenceNode>,
}

impl PoemNode {
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.title.to_lowercase().contains(&query)
            || self.author.to_lowercase().contains(&query)
            || self.id.to_lowercase().contains(&query)
    }
}

/// Snapshot of the store for display, rebuilt after every mutation.
#[derive(Debug, Clone, Default)]
pub struct PoemTree {
    pub poems: Vec<PoemNode>,
}

impl PoemTree {
    pub fn build(store: &PoemStore) -> Self {
        let languages = store.loaded_languages();

        let poems = store
            .canonical_poems()
            .iter()
            .map(|poem| {
                let senids: BTreeSet<u32> = languages
                    .iter()
                    .filter_map(|lang| store.poem(lang, &poem.id))
                    .flat_map(|p| p.sentences.iter().map(|s| s.senid))
                    .collect();

                let sentences = senids
                    .into_iter()
                    .map(|senid| SentenceNode {
                        senid,
                        contents: languages
                            .iter()
                            .map(|lang| {
                                let content = store
                                    .poem(lang, &poem.id)
                                    .and_then(|p| p.sentence(senid))
                                    .map(|s| s.content.clone());
                                (lang.to_string(), content)
                            })
                            .collect(),
                    })
                    .collect();

                PoemNode {
                    id: poem.id.clone(),
                    title: poem.title().to_string(),
                    author: poem.author().to_string(),
                    sentences,
                }
            })
            .collect();

        Self { poems }
    }

    pub fn find(&self, poem_id: &str) -> Option<&PoemNode> {
        self.poems.iter().find(|p| p.id == poem_id)
    }

    pub fn show(&self, ui: &mut egui::Ui, state: &mut TreeViewState<TreeNodeId>, filter: &str) {
        let tree_id = ui.make_persistent_id("poem_tree");

        TreeView::new(tree_id).allow_multi_selection(false).show_state(ui, state, |builder| {
            for poem in self.poems.iter().filter(|p| p.matches(filter)) {
                Self::build_poem(builder, poem);
            }
        });
    }

    fn build_poem(builder: &mut TreeViewBuilder<TreeNodeId>, poem: &PoemNode) {
        let label = if poem.author.is_empty() {
            poem.title.clone()
        } else {
            format!("{} ({})", poem.title, poem.author)
        };
        builder.dir(TreeNodeId::Poem(poem.id.clone()), label);

        for field in PoemField::ALL {
            let value = match field {
                PoemField::Id => &poem.id,
                PoemField::Title => &poem.title,
                PoemField::Author => &poem.author,
            };
            builder.leaf(
                TreeNodeId::Field { poem_id: poem.id.clone(), field },
                format!("{}: {}", field.label(), value),
            );
        }

        builder.dir(
            TreeNodeId::SentenceList(poem.id.clone()),
            format!("sentences ({})", poem.sentences.len()),
        );
        for sentence in &poem.sentences {
            Self::build_sentence(builder, &poem.id, sentence);
        }
        builder.close_dir();

        builder.close_dir();
    }

    fn build_sentence(builder: &mut TreeViewBuilder<TreeNodeId>, poem_id: &str, sentence: &SentenceNode) {
        let senid = sentence.senid;
        let preview = sentence
            .contents
            .iter()
            .find_map(|(_, content)| content.as_deref())
            .map(preview)
            .unwrap_or_default();

        builder.dir(
            TreeNodeId::Sentence { poem_id: poem_id.to_string(), senid },
            format!("{}: {}", senid, preview),
        );
        builder.leaf(
            TreeNodeId::Senid { poem_id: poem_id.to_string(), senid },
            format!("senid: {}", senid),
        );

        builder.dir(TreeNodeId::ContentGroup { poem_id: poem_id.to_string(), senid }, "content");
        for (language, content) in &sentence.contents {
            let text = content.as_deref().unwrap_or("(missing)");
            builder.leaf(
                TreeNodeId::Content {
                    poem_id: poem_id.to_string(),
                    senid,
                    language: language.clone(),
                },
                format!("{}: {}", language, text),
            );
        }
        builder.close_dir();

        builder.close_dir();
    }
}

fn preview(content: &str) -> String {
    if content.chars().count() > PREVIEW_CHARS {
        let head: String = content.chars().take(PREVIEW_CHARS).collect();
        format!("{}…", head)
    } else {
        content.to_string()
    }
}
