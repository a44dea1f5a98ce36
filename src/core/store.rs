use std::{
    collections::HashMap,
    fmt,
    path::{
        Path,
        PathBuf,
    },
};

use super::{
    config::{
        language_file_path,
        ToolConfig,
    },
    models::{
        Poem,
        PoemField,
        Sentence,
    },
    PoemkitError,
};
use crate::persistence::{
    read_json_file,
    write_json_file,
};

/// What a fan-out mutation did to one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageOutcome {
    Applied,
    /// The language is loaded but has no matching poem or sentence.
    Missing,
    /// The target already exists in this language (adding a poem).
    AlreadyPresent,
    NotLoaded,
    /// Changed in memory, but writing the file failed.
    SaveFailed(String),
}

impl fmt::Display for LanguageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageOutcome::Applied => write!(f, "applied"),
            LanguageOutcome::Missing => write!(f, "target not found"),
            LanguageOutcome::AlreadyPresent => write!(f, "already present"),
            LanguageOutcome::NotLoaded => write!(f, "language not loaded"),
            LanguageOutcome::SaveFailed(e) => write!(f, "save failed: {}", e),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MutationReport {
    pub description: String,
    pub outcomes: Vec<(String, LanguageOutcome)>,
}

impl MutationReport {
    fn new(description: impl Into<String>) -> Self {
        Self { description: description.into(), outcomes: Vec::new() }
    }

    pub fn outcome(&self, language: &str) -> Option<&LanguageOutcome> {
        self.outcomes.iter().find(|(lang, _)| lang == language).map(|(_, outcome)| outcome)
    }

    /// True when at least one language was changed in memory.
    pub fn any_applied(&self) -> bool {
        self.outcomes.iter().any(|(_, outcome)| {
            matches!(outcome, LanguageOutcome::Applied | LanguageOutcome::SaveFailed(_))
        })
    }

    pub fn applied_languages(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| *outcome == LanguageOutcome::Applied)
            .map(|(lang, _)| lang.as_str())
            .collect()
    }

    /// One-line result for a status bar, e.g. `Delete poem p1: 5 of 6 languages updated`.
    pub fn summary(&self) -> String {
        format!(
            "{}: {} of {} languages updated",
            self.description,
            self.applied_languages().len(),
            self.outcomes.len()
        )
    }

    pub fn warnings(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| *outcome != LanguageOutcome::Applied)
            .map(|(lang, outcome)| format!("{}: {} ({})", self.description, lang, outcome))
            .collect()
    }
}

/// In-memory copy of every per-language file, keyed by language name.
///
/// Mutations fan out over the configured languages in order and write each
/// changed language back to disk straight away.
#[derive(Debug)]
pub struct PoemStore {
    data_dir: PathBuf,
    basename: String,
    languages: Vec<String>,
    canonical_priority: Vec<String>,
    collections: HashMap<String, Vec<Poem>>,
    load_errors: Vec<(String, String)>,
    canonical: String,
}

impl PoemStore {
    pub fn load(config: &ToolConfig) -> Result<Self, PoemkitError> {
        Self::open(
            &config.data_dir,
            &config.basename,
            &config.languages,
            &config.canonical_priority,
        )
    }

    pub fn open(
        data_dir: &Path,
        basename: &str,
        languages: &[String],
        canonical_priority: &[String],
    ) -> Result<Self, PoemkitError> {
        let mut collections = HashMap::new();
        let mut load_errors = Vec::new();

        for language in languages {
            let path = language_file_path(data_dir, basename, language);
            if !path.exists() {
                tracing::warn!("[{}] File not found: {}", language, path.display());
                load_errors.push((language.clone(), format!("file not found: {}", path.display())));
                continue;
            }

            match read_json_file::<Vec<Poem>>(&path) {
                Ok(poems) => {
                    tracing::info!("[{}] Loaded {} poems from {}", language, poems.len(), path.display());
                    collections.insert(language.clone(), poems);
                }
                Err(e) => {
                    tracing::error!("[{}] {}", language, e);
                    load_errors.push((language.clone(), e.to_string()));
                }
            }
        }

        let canonical = canonical_priority
            .iter()
            .chain(languages.iter())
            .find(|lang| collections.contains_key(*lang))
            .cloned()
            .ok_or_else(|| PoemkitError::NoLanguageLoaded(data_dir.to_path_buf()))?;

        tracing::info!("Using {} as the navigation language", canonical);

        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            basename: basename.to_string(),
            languages: languages.to_vec(),
            canonical_priority: canonical_priority.to_vec(),
            collections,
            load_errors,
            canonical,
        })
    }

    pub fn reload(&mut self) -> Result<(), PoemkitError> {
        *self = Self::open(&self.data_dir, &self.basename, &self.languages, &self.canonical_priority)?;
        Ok(())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn canonical_language(&self) -> &str {
        &self.canonical
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Loaded languages in configured order.
    pub fn loaded_languages(&self) -> Vec<&str> {
        self.languages
            .iter()
            .filter(|lang| self.collections.contains_key(*lang))
            .map(String::as_str)
            .collect()
    }

    pub fn is_loaded(&self, language: &str) -> bool {
        self.collections.contains_key(language)
    }

    pub fn load_errors(&self) -> &[(String, String)] {
        &self.load_errors
    }

    pub fn poems(&self, language: &str) -> Option<&[Poem]> {
        self.collections.get(language).map(Vec::as_slice)
    }

    pub fn canonical_poems(&self) -> &[Poem] {
        self.poems(&self.canonical).unwrap_or_default()
    }

    pub fn poem(&self, language: &str, poem_id: &str) -> Option<&Poem> {
        self.poems(language)?.iter().find(|p| p.id == poem_id)
    }

    pub fn language_path(&self, language: &str) -> PathBuf {
        language_file_path(&self.data_dir, &self.basename, language)
    }

    pub fn save_language(&self, language: &str) -> Result<(), PoemkitError> {
        let poems = self
            .collections
            .get(language)
            .ok_or_else(|| PoemkitError::Custom(format!("{} is not loaded", language)))?;
        let path = self.language_path(language);
        write_json_file(&path, poems)?;
        tracing::info!("[{}] Saved {} poems to {}", language, poems.len(), path.display());
        Ok(())
    }

    /// Sets `id`, `title` or `author` of a poem in every loaded language.
    pub fn edit_poem_field(
        &mut self,
        poem_id: &str,
        field: PoemField,
        value: &str,
    ) -> Result<MutationReport, PoemkitError> {
        if field == PoemField::Id {
            self.validate_new_id(value, Some(poem_id))?;
        } else if value.trim().is_empty() {
            return Err(PoemkitError::InvalidEdit(format!("{} cannot be empty", field.label())));
        }

        let value = match field {
            PoemField::Id => value.trim().to_string(),
            _ => value.to_string(),
        };
        let description = format!("Edit {} of poem {}", field.label(), poem_id);
        Ok(self.fan_out(description, |poems| {
            match poems.iter_mut().find(|p| p.id == poem_id) {
                Some(poem) => {
                    poem.set_field(field, value.clone());
                    LanguageOutcome::Applied
                }
                None => LanguageOutcome::Missing,
            }
        }))
    }

    /// Replaces one sentence's text in a single language.
    pub fn edit_sentence_content(
        &mut self,
        language: &str,
        poem_id: &str,
        senid: u32,
        content: &str,
    ) -> Result<MutationReport, PoemkitError> {
        if content.trim().is_empty() {
            return Err(PoemkitError::InvalidEdit("sentence content cannot be empty".to_string()));
        }

        let mut report =
            MutationReport::new(format!("Edit sentence {} of poem {}", senid, poem_id));

        let outcome = match self.collections.get_mut(language) {
            None => LanguageOutcome::NotLoaded,
            Some(poems) => {
                match poems.iter_mut().find(|p| p.id == poem_id).and_then(|p| p.sentence_mut(senid)) {
                    Some(sentence) => {
                        sentence.content = content.to_string();
                        self.persist(language)
                    }
                    None => LanguageOutcome::Missing,
                }
            }
        };

        log_outcome(&report.description, language, &outcome);
        report.outcomes.push((language.to_string(), outcome));
        Ok(report)
    }

    /// Removes the first poem with `poem_id` from every loaded language.
    pub fn delete_poem(&mut self, poem_id: &str) -> MutationReport {
        self.fan_out(format!("Delete poem {}", poem_id), |poems| {
            match poems.iter().position(|p| p.id == poem_id) {
                Some(index) => {
                    poems.remove(index);
                    LanguageOutcome::Applied
                }
                None => LanguageOutcome::Missing,
            }
        })
    }

    pub fn delete_sentence(&mut self, poem_id: &str, senid: u32) -> MutationReport {
        self.fan_out(format!("Delete sentence {} of poem {}", senid, poem_id), |poems| {
            let Some(poem) = poems.iter_mut().find(|p| p.id == poem_id) else {
                return LanguageOutcome::Missing;
            };
            match poem.sentences.iter().position(|s| s.senid == senid) {
                Some(index) => {
                    poem.sentences.remove(index);
                    LanguageOutcome::Applied
                }
                None => LanguageOutcome::Missing,
            }
        })
    }

    /// Appends an empty sentence with the next free senid to every loaded
    /// language that has the poem. Returns the new senid.
    pub fn add_sentence(&mut self, poem_id: &str) -> (u32, MutationReport) {
        let senid = self
            .collections
            .values()
            .filter_map(|poems| poems.iter().find(|p| p.id == poem_id))
            .filter_map(Poem::max_senid)
            .max()
            .map_or(0, |max| max + 1);

        let report = self.fan_out(format!("Add sentence {} to poem {}", senid, poem_id), |poems| {
            match poems.iter_mut().find(|p| p.id == poem_id) {
                Some(poem) => {
                    poem.sentences.push(Sentence { senid, content: String::new() });
                    LanguageOutcome::Applied
                }
                None => LanguageOutcome::Missing,
            }
        });

        (senid, report)
    }

    pub fn add_poem(
        &mut self,
        poem_id: &str,
        title: &str,
        author: &str,
    ) -> Result<MutationReport, PoemkitError> {
        self.validate_new_id(poem_id, None)?;

        let poem = Poem::new(poem_id.trim(), title, author);
        Ok(self.fan_out(format!("Add poem {}", poem.id), |poems| {
            if poems.iter().any(|p| p.id == poem.id) {
                LanguageOutcome::AlreadyPresent
            } else {
                poems.push(poem.clone());
                LanguageOutcome::Applied
            }
        }))
    }

    fn validate_new_id(&self, new_id: &str, current: Option<&str>) -> Result<(), PoemkitError> {
        let new_id = new_id.trim();
        if new_id.is_empty() {
            return Err(PoemkitError::InvalidEdit("poem id cannot be empty".to_string()));
        }
        if Some(new_id) != current && self.canonical_poems().iter().any(|p| p.id == new_id) {
            return Err(PoemkitError::InvalidEdit(format!("poem id {} already exists", new_id)));
        }
        Ok(())
    }

    fn fan_out<F>(&mut self, description: String, mut apply: F) -> MutationReport
    where
        F: FnMut(&mut Vec<Poem>) -> LanguageOutcome,
    {
        let mut report = MutationReport::new(description);
        let languages = self.languages.clone();

        for language in languages {
            let outcome = match self.collections.get_mut(&language) {
                None => LanguageOutcome::NotLoaded,
                Some(poems) => match apply(poems) {
                    LanguageOutcome::Applied => self.persist(&language),
                    other => other,
                },
            };

            log_outcome(&report.description, &language, &outcome);
            report.outcomes.push((language, outcome));
        }

        report
    }

    fn persist(&self, language: &str) -> LanguageOutcome {
        match self.save_language(language) {
            Ok(()) => LanguageOutcome::Applied,
            Err(e) => LanguageOutcome::SaveFailed(e.to_string()),
        }
    }
}

fn log_outcome(description: &str, language: &str, outcome: &LanguageOutcome) {
    match outcome {
        LanguageOutcome::Applied => tracing::debug!("{}: {} updated", description, language),
        LanguageOutcome::SaveFailed(e) => {
            tracing::error!("{}: {} changed but not saved: {}", description, language, e)
        }
        other => tracing::warn!("{}: {} skipped ({})", description, language, other),
    }
}
