pub mod contact;
pub mod content;
pub mod data;
pub mod defaults;
pub mod editor;
pub mod language;
pub mod media;
pub mod settings;
