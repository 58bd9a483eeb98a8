use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Chat relay service for an OpenAI-compatible completion API", long_about = None)]
pub struct Args {
    // --- Listener Args ---
    /// Interface the HTTP server binds to.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port the HTTP server listens on.
    #[arg(long, env = "PORT", default_value = "3000")]
    pub port: u16,

    // --- Completion API Args ---
    /// API key for the completion provider. Chat requests fail with a configuration error when unset.
    #[arg(long, env = "OPENROUTER_API_KEY")]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible completion API (the `/chat/completions` route is appended).
    #[arg(long, env = "CHAT_BASE_URL", default_value = "https://openrouter.ai/api/v1")]
    pub chat_base_url: String,

    /// Model identifier sent with every completion request.
    #[arg(long, env = "AI_MODEL", default_value = "openai/gpt-3.5-turbo")]
    pub model: String,

    /// Value of the HTTP-Referer header sent to the provider.
    #[arg(long, env = "SITE_URL", default_value = "http://localhost:3000")]
    pub site_url: String,

    /// Value of the X-Title header sent to the provider.
    #[arg(long, env = "SITE_TITLE", default_value = "Professional AI Chatbot")]
    pub site_title: String,

    /// Optional path to a text file replacing the built-in system prompt.
    #[arg(long, env = "SYSTEM_PROMPT_PATH")]
    pub system_prompt_path: Option<String>,

    // --- General App Args ---
    /// Runtime mode. `production` hides upstream error details from clients.
    #[arg(long, env = "APP_ENV", default_value = "development")]
    pub environment: String,

    /// Directory holding the static client bundle (must contain index.html).
    #[arg(long, env = "STATIC_DIR", default_value = "public")]
    pub static_dir: String,

    /// Optional path to the TLS certificate file (PEM format). Requires --tls-key-path.
    #[arg(long, env = "TLS_CERT_PATH")]
    pub tls_cert_path: Option<String>,

    /// Optional path to the TLS private key file (PEM format). Requires --tls-cert-path.
    #[arg(long, env = "TLS_KEY_PATH")]
    pub tls_key_path: Option<String>,

    #[arg(long, env = "ENABLE_TLS", default_value = "false")]
    pub enable_tls: bool,
}

impl Args {
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Terminal chat client for the relay service", long_about = None)]
pub struct ClientArgs {
    /// Base URL of the relay service.
    #[arg(long, env = "RELAY_URL", default_value = "http://127.0.0.1:3000")]
    pub relay_url: String,

    // --- History Store Args ---
    /// Local history store type (file, memory, redis)
    #[arg(long, env = "HISTORY_TYPE", default_value = "file")]
    pub history_type: String,

    /// Directory used by the file history store.
    #[arg(long, env = "HISTORY_PATH", default_value = ".relay-chat")]
    pub history_path: String,

    /// Redis endpoint used by the redis history store (e.g., redis://127.0.0.1:6379)
    #[arg(long, env = "HISTORY_HOST", default_value = "redis://127.0.0.1:6379")]
    pub history_host: String,

    /// Prefix for Redis history keys.
    #[arg(long, env = "HISTORY_REDIS_PREFIX", default_value = "relay-chat:")]
    pub history_redis_prefix: String,
}
