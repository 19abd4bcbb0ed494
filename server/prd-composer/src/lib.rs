//! PRD Composer: fills a fixed-shape PRD from an issue and its analysis, and
//! renders it to markdown. No ranking logic lives here.

pub mod classify;
pub mod compose;
pub mod composer;
pub mod error;
mod render;
pub mod suggestions;
pub mod types;

#[cfg(test)]
mod test_support;

pub use compose::compose_template;
pub use composer::{AgentAssistedComposer, Composer, TemplateComposer};
pub use error::ComposeError;
pub use types::{ComposerMode, FileModification, IssueType, PrdDocument, Priority, UseCase};
