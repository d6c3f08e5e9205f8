//! Command handlers for the Quanta CLI.

pub mod ask;
pub mod search;

pub use ask::AskCommand;
pub use search::SearchCommand;
