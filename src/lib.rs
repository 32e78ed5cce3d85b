pub mod error;
pub mod ollama;
pub mod prompt;
pub mod review;
pub mod source;
pub mod spinner;
