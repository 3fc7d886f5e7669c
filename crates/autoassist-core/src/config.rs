use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use config::builder::DefaultState;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

const ENV_PREFIX: &str = "AUTOASSIST";

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub nlp: NlpConfig,
    #[serde(default)]
    pub annotator: AnnotatorConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from file with environment overrides.
    ///
    /// A missing file is not an error; the defaults and the environment still apply.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = Self::with_defaults(Config::builder())?
            .add_source(File::from(path.as_ref()).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    fn with_defaults(
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        builder
            .set_default("annotator.url", default_annotator_url())?
            .set_default("annotator.timeout_ms", default_annotator_timeout_ms() as i64)?
            .set_default("annotator.annotators", default_annotators())?
            .set_default("server.host", default_host())?
            .set_default("server.port", i64::from(default_port()))?
            .set_default("telemetry.log_level", default_log_level())?
            .set_default("telemetry.json_logs", false)
    }
}

/// Settings for the analysis core itself
#[derive(Debug, Clone, Deserialize, Default)]
pub struct NlpConfig {
    /// Optional YAML file replacing the built-in response templates
    #[serde(default)]
    pub templates_path: Option<String>,
    /// Fixed seed for response template selection
    #[serde(default)]
    pub template_seed: Option<u64>,
}

impl NlpConfig {
    pub fn with_templates_path(mut self, path: String) -> Self {
        self.templates_path = Some(path);
        self
    }

    pub fn with_template_seed(mut self, seed: u64) -> Self {
        self.template_seed = Some(seed);
        self
    }
}

/// Linguistic annotation server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AnnotatorConfig {
    #[serde(default = "default_annotator_url")]
    pub url: String,
    #[serde(default = "default_annotator_timeout_ms")]
    pub timeout_ms: u64,
    /// Comma-separated annotator list sent with every request
    #[serde(default = "default_annotators")]
    pub annotators: String,
}

impl AnnotatorConfig {
    pub fn new(url: String) -> Self {
        Self {
            url,
            timeout_ms: default_annotator_timeout_ms(),
            annotators: default_annotators(),
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self::new(default_annotator_url())
    }
}

fn default_annotator_url() -> String {
    "http://localhost:9000".to_string()
}

fn default_annotator_timeout_ms() -> u64 {
    30_000
}

fn default_annotators() -> String {
    "tokenize,ssplit,pos,lemma,ner,parse,sentiment".to_string()
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    pub fn new() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }

    pub fn with_host(mut self, host: String) -> Self {
        self.host = host;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
