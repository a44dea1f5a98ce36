pub mod config;
pub mod errors;
pub mod models;
pub mod store;

pub use config::{
    ImageSettings,
    ToolConfig,
};
pub use errors::PoemkitError;
pub use models::{
    CombinedPoem,
    Poem,
    PoemField,
    Sentence,
};
pub use store::{
    LanguageOutcome,
    MutationReport,
    PoemStore,
};
