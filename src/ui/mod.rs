//! Terminal presentation: input prompts and result rendering.

pub mod prompt;
pub mod render;

pub use prompt::{non_blank_target, prompt_category, prompt_target};
pub use render::{render_categories, render_results, render_results_json, render_tools};
