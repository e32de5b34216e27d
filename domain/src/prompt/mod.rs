//! Prompt domain
//!
//! Templates for generating prompts at each stage of the self-play flow.

mod template;

pub use template::PromptTemplate;
