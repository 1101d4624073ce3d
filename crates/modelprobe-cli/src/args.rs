use clap::{Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "modelprobe")]
#[command(about = "Check which chat models of an OpenAI-compatible API answer", long_about = None)]
pub struct Args {
    /// API base URL
    #[arg(
        long,
        env = "MODELPROBE_BASE_URL",
        default_value = "https://api.openai.com"
    )]
    pub base_url: String,

    /// API key (Authorization: Bearer)
    #[arg(long, env = "MODELPROBE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Probes in flight at once
    #[arg(long, env = "MODELPROBE_WORKERS", default_value_t = 2)]
    pub workers: usize,

    /// Deadline for a single probe
    #[arg(long, env = "MODELPROBE_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Timeout for listing models
    #[arg(long, env = "MODELPROBE_CATALOG_TIMEOUT_SECS", default_value_t = 30)]
    pub catalog_timeout_secs: u64,

    /// Pause between two dispatches (0 disables pacing)
    #[arg(long, env = "MODELPROBE_INTERVAL_MS", default_value_t = 0)]
    pub interval_ms: u64,

    /// URL layout of the API
    #[arg(
        long,
        env = "MODELPROBE_PATH_CONVENTION",
        value_enum,
        default_value_t = PathStyle::Standard
    )]
    pub path_convention: PathStyle,

    /// Probe these models instead of fetching the catalog
    #[arg(long, env = "MODELPROBE_MODELS", value_delimiter = ',')]
    pub models: Option<Vec<String>>,

    /// Only probe models containing this substring (repeatable)
    #[arg(long)]
    pub include: Vec<String>,

    /// Skip models containing this substring (repeatable)
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Probe each model once even if the catalog lists it twice
    #[arg(long)]
    pub dedupe: bool,

    /// User message sent to every model
    #[arg(long, default_value = "hi")]
    pub prompt: String,

    /// Token cap of each probe
    #[arg(long, default_value_t = 1)]
    pub max_tokens: u32,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Disable ANSI colors (also disabled when NO_COLOR is set)
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PathStyle {
    /// /v1/models, /v1/chat/completions
    Standard,
    /// /api/models, /api/chat/completions
    AlternateGateway,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per model, then a summary
    Text,
    /// A single JSON document after the run
    Json,
}

