pub mod builtin;
pub mod catalog;
pub mod extract;
pub mod measure;
pub mod profile;
pub mod source;
