use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use glance_core::response::AnalysisMode;
use glance_core::VERSION;

use crate::config::SecurityTier;

/// Glance - explain or fact-check selected text, with the API key encrypted at rest
#[derive(Parser)]
#[command(name = "glance")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the secret store file
    #[arg(short, long, global = true, env = "GLANCE_STORE")]
    pub store: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log level when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn", value_name = "LEVEL")]
    pub log_level: String,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// How the stored key is unlocked
    #[arg(long, value_enum, default_value_t = SecurityTier::Passphrase)]
    pub tier: SecurityTier,

    /// Chat model to record in the config
    #[arg(long)]
    pub model: Option<String>,

    /// Overwrite an existing config
    #[arg(long)]
    pub force: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `key set` command
#[derive(Args)]
pub struct KeySetArgs {
    /// API key value (otherwise prompted, or read from piped stdin)
    #[arg(long)]
    pub value: Option<String>,
}

/// Arguments for the `key show` command
#[derive(Args)]
pub struct KeyShowArgs {
    /// Print the full key instead of a masked form
    #[arg(long)]
    pub reveal: bool,
}

/// Arguments for the `key clear` command
#[derive(Args)]
pub struct KeyClearArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `key info` command
#[derive(Args)]
pub struct KeyInfoArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum KeySubcommand {
    /// Encrypt and store an API key
    Set(KeySetArgs),

    /// Decrypt and print the stored key
    Show(KeyShowArgs),

    /// Verify the stored key decrypts
    Check,

    /// Re-encrypt the stored key under a new passphrase
    Rotate,

    /// Delete the stored key
    Clear(KeyClearArgs),

    /// Show when the key was stored and rotated
    Info(KeyInfoArgs),
}

/// Arguments for the `parse` command
#[derive(Args)]
pub struct ParseArgs {
    /// File holding the model output (reads stdin when omitted)
    #[arg(value_name = "FILE")]
    pub file: Option<String>,

    /// Interpret the result as an explanation or a fact-check
    #[arg(long)]
    pub mode: Option<AnalysisMode>,

    /// Input is a full chat-completion response body
    #[arg(long)]
    pub completion: bool,

    /// HTTP status the completion body arrived with
    #[arg(long, requires = "completion", value_name = "CODE")]
    pub status: Option<u16>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `prompt` command
#[derive(Args)]
pub struct PromptArgs {
    /// Analysis to request
    #[arg(value_name = "MODE")]
    pub mode: AnalysisMode,

    /// Selected text (reads stdin when omitted)
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Chat model (defaults to the configured model)
    #[arg(long)]
    pub model: Option<String>,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a config file and choose how the key is unlocked
    Init(InitArgs),

    /// Manage the encrypted API key
    #[command(subcommand)]
    Key(KeySubcommand),

    /// Normalize raw model output into a JSON object
    Parse(ParseArgs),

    /// Build the chat-completion request for a selection
    Prompt(PromptArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
