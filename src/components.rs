pub mod file_input;
pub mod media_preview;
pub mod submit;
pub mod upload;
