//! Tool implementations for Draftsmith.
//!
//! Each tool serves one action label from the loop's closed action set:
//! - `research` — derive a search query, run it against the search backend
//! - `summarize` — condense the transcript (the summary replaces it)
//! - `essay_writer` — draft the essay from the accumulated context
//!
//! [`Toolbox`] is the dispatch table: total over `Action`, so `done` and
//! unrecognized labels are explicit no-ops rather than missing branches.

pub mod essay;
pub mod research;
pub mod summarize;
pub mod toolbox;

pub use essay::EssayTool;
pub use research::ResearchTool;
pub use summarize::SummarizeTool;
pub use toolbox::Toolbox;

#[cfg(test)]
mod testing;
