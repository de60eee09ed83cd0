//! ps-i18n - message key extraction and translation for PowerSchool plugins
//!
//! Templates mark translatable text inline as `[msg:KEY]text[/msg]`. The
//! `create-keys` command moves that text into a per-locale key file and
//! rewrites the template to `~[text:KEY]` references; `translate` turns the
//! key files into one file per target language.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands and output)
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction engine, property files and translation

pub mod cli;
pub mod config;
pub mod core;
