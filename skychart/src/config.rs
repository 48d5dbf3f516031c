use serde::Deserialize;
use skytypes::prelude::MainStarSet;
use std::{env, fs, path::Path, path::PathBuf, time::Duration};
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.api-ninjas.com/v1/stars";
pub const DEFAULT_CONSTELLATION: &str = "orion";
pub const DEFAULT_API_KEY_ENV_VAR: &str = "API_NINJAS_KEY";
pub const DEFAULT_ENV_FILE: &str = ".env";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}'", .0.display())]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse config file")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid catalog base URL")]
    BaseUrl(#[from] url::ParseError),

    #[error("Invalid timeout '{0}'")]
    Timeout(String, #[source] humantime::DurationError),

    #[error("The {0} environment variable contained a non-UTF-8-compatible string")]
    ApiKeyNonUtf8(String),

    #[error("Failed to read env file '{}'", .0.display())]
    EnvFile(PathBuf, #[source] dotenv::Error),
}

impl ConfigError {
    /// Process exit code for any configuration failure
    pub const EXIT_CODE: u8 = 2;
}

/// On-disk (toml) representation, every field optional
#[derive(Clone, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ConfigFile {
    pub api_key: Option<String>,
    pub api_key_env: Option<String>,
    pub env_file: Option<PathBuf>,
    pub base_url: Option<String>,
    pub constellation: Option<String>,
    /// Human readable duration, e.g. "30s"
    pub timeout: Option<String>,
    pub main_stars: Option<Vec<String>>,
    pub title: Option<String>,
}

impl ConfigFile {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Fields set in `other` take precedence
    pub fn merge(self, other: ConfigFile) -> Self {
        Self {
            api_key: other.api_key.or(self.api_key),
            api_key_env: other.api_key_env.or(self.api_key_env),
            env_file: other.env_file.or(self.env_file),
            base_url: other.base_url.or(self.base_url),
            constellation: other.constellation.or(self.constellation),
            timeout: other.timeout.or(self.timeout),
            main_stars: other.main_stars.or(self.main_stars),
            title: other.title.or(self.title),
        }
    }
}

/// Everything the fetch-and-render pipeline needs, resolved up front
#[derive(Clone, PartialEq, Debug)]
pub struct ChartConfig {
    /// Sent as the `X-Api-Key` header. An empty key is sent as-is and left
    /// for the catalog service to reject.
    pub api_key: String,
    pub base_url: Url,
    pub constellation: String,
    /// `None` blocks until the server responds
    pub timeout: Option<Duration>,
    pub main_stars: MainStarSet,
    pub title: String,
}

impl ChartConfig {
    /// Optional config file, overlaid with `overrides`, then resolved
    pub fn load<P: AsRef<Path>>(
        config: Option<P>,
        overrides: ConfigFile,
    ) -> Result<Self, ConfigError> {
        let file = match config {
            Some(p) => ConfigFile::load(p)?,
            None => ConfigFile::default(),
        };
        Self::resolve(file.merge(overrides))
    }

    pub fn new(api_key: &str) -> Self {
        // The default base URL is a constant and always valid
        let base_url = Url::parse(DEFAULT_BASE_URL).expect("Invalid default base URL");
        Self {
            api_key: api_key.to_owned(),
            base_url,
            constellation: DEFAULT_CONSTELLATION.to_owned(),
            timeout: None,
            main_stars: MainStarSet::default(),
            title: default_title(DEFAULT_CONSTELLATION),
        }
    }

    /// Resolve a config file layer against the process environment.
    ///
    /// The API key is taken from, in order: the file's `api-key`, the
    /// `api-key-env` environment variable, then that same variable in the
    /// local env file.
    pub fn resolve(cfg: ConfigFile) -> Result<Self, ConfigError> {
        let key_var = cfg
            .api_key_env
            .unwrap_or_else(|| DEFAULT_API_KEY_ENV_VAR.to_owned());
        let env_file = cfg
            .env_file
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ENV_FILE));

        let api_key = match cfg.api_key {
            Some(k) => k,
            None => api_key_from_env(&key_var, &env_file)?.unwrap_or_else(|| {
                warn!(
                    var = key_var.as_str(),
                    "No API key found, the catalog will likely reject the request"
                );
                String::new()
            }),
        };

        let base_url = Url::parse(cfg.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;

        let timeout = cfg
            .timeout
            .map(|t| humantime::parse_duration(&t).map_err(|e| ConfigError::Timeout(t, e)))
            .transpose()?;

        let constellation = cfg
            .constellation
            .unwrap_or_else(|| DEFAULT_CONSTELLATION.to_owned());

        let main_stars = cfg
            .main_stars
            .map(MainStarSet::new)
            .unwrap_or_default();

        let title = cfg.title.unwrap_or_else(|| default_title(&constellation));

        Ok(Self {
            api_key,
            base_url,
            constellation,
            timeout,
            main_stars,
            title,
        })
    }
}

fn default_title(constellation: &str) -> String {
    let mut chars = constellation.chars();
    let name: String = match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    format!("Constellation: {name}")
}

fn api_key_from_env(var: &str, env_file: &Path) -> Result<Option<String>, ConfigError> {
    match env::var(var) {
        Ok(val) => return Ok(Some(val)),
        Err(env::VarError::NotUnicode(_)) => {
            return Err(ConfigError::ApiKeyNonUtf8(var.to_owned()))
        }
        Err(env::VarError::NotPresent) => (),
    }

    if !env_file.exists() {
        debug!(path = %env_file.display(), "No env file");
        return Ok(None);
    }

    let entries = dotenv::from_path_iter(env_file)
        .map_err(|e| ConfigError::EnvFile(env_file.to_path_buf(), e))?;

    // Later definitions win, unparseable lines are skipped
    let mut key = None;
    for entry in entries {
        match entry {
            Ok((k, v)) if k == var => key = Some(v),
            Ok(_) => (),
            Err(e) => warn!(path = %env_file.display(), err = %e, "Skipping env file entry"),
        }
    }
    Ok(key)
}
