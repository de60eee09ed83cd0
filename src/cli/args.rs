//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `create-keys`: extract `[msg:KEY]` spans into a locale key file
//! - `translate`: machine-translate key files into target languages
//! - `init`: write the default configuration and languages file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "ps-i18n",
    author,
    version,
    about = "Extract message keys from templates and translate them",
    long_about = None
)]
pub struct Arguments {
    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Common arguments shared by the file-rewriting commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Message keys directory (overrides config file)
    #[arg(long)]
    pub message_keys_dir: Option<PathBuf>,

    /// Bypass the "yes" prompt for confirmation
    #[arg(short = 'Y', long)]
    pub yes: bool,
}

#[derive(Debug, Args)]
pub struct CreateKeysCommand {
    /// Source files or glob patterns to extract keys from
    #[arg(value_name = "SOURCE", required = true, num_args = 1..)]
    pub sources: Vec<String>,

    /// Locale of the extracted text, e.g. US_en
    #[arg(value_name = "LOCALE")]
    pub locale: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct TranslateCommand {
    /// Locale of the key files to translate (overrides config file)
    #[arg(value_name = "SOURCE_LOCALE")]
    pub source_locale: Option<String>,

    /// Target language codes or names (default: every entry of the languages file)
    #[arg(long = "to", value_name = "LANG")]
    pub targets: Vec<String>,

    /// Translate only the first entry of each file, without delays
    #[arg(
        long,
        env = "PS_I18N_TEST_MODE",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub test_mode: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create message keys from a source HTML file
    CreateKeys(CreateKeysCommand),
    /// Translate message key files into the target languages
    Translate(TranslateCommand),
    /// Initialize the configuration and languages file
    Init,
}
