mod app;
mod update_prompt;

pub use app::*;
pub use update_prompt::*;
