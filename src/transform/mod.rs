pub mod canvas;
pub mod prompts;
