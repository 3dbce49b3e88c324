pub mod directory;
pub mod history;
pub mod profile;
pub mod settings;
pub mod sos;
