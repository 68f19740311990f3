// tilmarks shared type definitions
// Each submodule defines types used across the application.

pub mod bookmark;
pub mod draft;
pub mod errors;
pub mod settings;
pub mod status;
pub mod summary;
pub mod url_type;
