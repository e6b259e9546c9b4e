//! Output formatting for answers and saved prompts

pub mod console;
