//! Core engine: key extraction, key files and translation.
//!
//! ## Key extraction
//!
//! - `scanner`: finds `[msg:KEY]text[/msg]` spans
//! - `duplicates`: detects repeated keys and re-indexes them
//! - `consolidate`: merges keys that carry identical text
//! - `materialize`: rewrites spans to `~[text:KEY]` references
//! - `pipeline`: runs the steps above on one document in memory
//!
//! ## Files
//!
//! - `properties`: line-preserving `key=value` files
//! - `keyfile`: writes the per-locale key file with its header
//! - `backup`: copies files aside before they are rewritten
//! - `plugin`: reads the plugin manifest
//! - `languages`: the target language list
//!
//! ## Translation
//!
//! - `translate`: translation capability, fallback and per-file translator
//! - `progress`: per-file progress rows
//! - `locale`: compound `<region>_<language>` codes

pub mod backup;
pub mod confirm;
pub mod consolidate;
pub mod duplicates;
pub mod keyfile;
pub mod languages;
pub mod locale;
pub mod materialize;
pub mod pipeline;
pub mod plugin;
pub mod progress;
pub mod properties;
pub mod scanner;
pub mod translate;

pub use confirm::{Confirmer, PresetConfirmer, StdinConfirmer};
pub use locale::Locale;
pub use pipeline::{PreparedKeys, prepare_keys};
pub use progress::{FileProgress, ProgressStatus, ProgressTracker};
pub use scanner::{Extraction, MessageMap, scan};
