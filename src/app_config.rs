//! Application configuration loading for CLI defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

/// Fallback catalog base URL when neither flag nor config provides one.
pub const DEFAULT_CATALOG_URL: &str = "http://localhost:8000";

/// File configuration for bookshelf defaults.
#[derive(Debug, Clone, Default)]
pub struct FileConfig {
    /// Catalog API base URL.
    pub catalog_base_url: Option<String>,
    /// Open Library covers base URL (mirrors, tests).
    pub open_library_base_url: Option<String>,
    /// Google Books API base URL (mirrors, tests).
    pub google_books_base_url: Option<String>,
    /// Default records per page (same range as CLI).
    pub page_size: Option<u32>,
    /// Default concurrent cover lookups (same range as CLI).
    pub concurrency: Option<u8>,
    /// Optional provider client connect timeout in seconds.
    pub provider_connect_timeout_secs: Option<u64>,
    /// Optional provider client read timeout in seconds.
    pub provider_read_timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Validates config values against runtime and CLI constraints.
    pub fn validate(&self) -> Result<()> {
        if let Some(page_size) = self.page_size
            && !(1..=100).contains(&page_size)
        {
            bail!("Invalid config value for `page_size`: {page_size}. Expected range: 1..=100");
        }

        if let Some(concurrency) = self.concurrency
            && !(1..=32).contains(&concurrency)
        {
            bail!("Invalid config value for `concurrency`: {concurrency}. Expected range: 1..=32");
        }

        validate_base_url("catalog_base_url", self.catalog_base_url.as_deref())?;
        validate_base_url("open_library_base_url", self.open_library_base_url.as_deref())?;
        validate_base_url("google_books_base_url", self.google_books_base_url.as_deref())?;
        validate_timeout_secs(
            "provider_connect_timeout_secs",
            self.provider_connect_timeout_secs,
        )?;
        validate_timeout_secs("provider_read_timeout_secs", self.provider_read_timeout_secs)?;

        Ok(())
    }
}

fn validate_base_url(field: &str, value: Option<&str>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    url::Url::parse(value)
        .map(|_| ())
        .map_err(|error| anyhow::anyhow!("Invalid config value for `{field}`: {error}"))
}

fn validate_timeout_secs(field: &str, value: Option<u64>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !(1..=3600).contains(&value) {
        bail!("Invalid config value for `{field}`: {value}. Expected range: 1..=3600");
    }
    Ok(())
}

/// Loaded config metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
    /// Indicates whether configuration was loaded from disk.
    pub loaded_from_file: bool,
}

/// Resolves the default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/bookshelf/config.toml`
/// 2. `$HOME/.config/bookshelf/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("bookshelf")
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("bookshelf")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from the default path if present.
pub fn load_default_file_config() -> Result<LoadedConfig> {
    let path = resolve_default_config_path();
    let Some(path_ref) = path.as_deref() else {
        return Ok(LoadedConfig {
            path,
            config: None,
            loaded_from_file: false,
        });
    };

    if !path_ref.exists() {
        return Ok(LoadedConfig {
            path,
            config: None,
            loaded_from_file: false,
        });
    }

    let config = load_file_config(path_ref)?;
    Ok(LoadedConfig {
        path,
        config: Some(config),
        loaded_from_file: true,
    })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!(
                "Invalid config syntax on line {}: expected key = value",
                line_index + 1
            );
        };

        let key = raw_key.trim();
        let value = raw_value.trim();

        match key {
            "catalog_base_url" => {
                let parsed = parse_string_literal(value).with_context(|| {
                    format!("Invalid `catalog_base_url` value on line {}", line_index + 1)
                })?;
                cfg.catalog_base_url = Some(parsed);
            }
            "open_library_base_url" => {
                let parsed = parse_string_literal(value).with_context(|| {
                    format!(
                        "Invalid `open_library_base_url` value on line {}",
                        line_index + 1
                    )
                })?;
                cfg.open_library_base_url = Some(parsed);
            }
            "google_books_base_url" => {
                let parsed = parse_string_literal(value).with_context(|| {
                    format!(
                        "Invalid `google_books_base_url` value on line {}",
                        line_index + 1
                    )
                })?;
                cfg.google_books_base_url = Some(parsed);
            }
            "page_size" => {
                let parsed = parse_integer_u64(value).with_context(|| {
                    format!("Invalid `page_size` value on line {}", line_index + 1)
                })?;
                let n = u32::try_from(parsed)
                    .map_err(|_| anyhow::anyhow!("page_size out of range for u32"))?;
                cfg.page_size = Some(n);
            }
            "concurrency" => {
                let parsed = parse_integer_u8(value).with_context(|| {
                    format!("Invalid `concurrency` value on line {}", line_index + 1)
                })?;
                cfg.concurrency = Some(parsed);
            }
            "provider_connect_timeout_secs" => {
                let parsed = parse_integer_u64(value).with_context(|| {
                    format!(
                        "Invalid `provider_connect_timeout_secs` value on line {}",
                        line_index + 1
                    )
                })?;
                cfg.provider_connect_timeout_secs = Some(parsed);
            }
            "provider_read_timeout_secs" => {
                let parsed = parse_integer_u64(value).with_context(|| {
                    format!(
                        "Invalid `provider_read_timeout_secs` value on line {}",
                        line_index + 1
                    )
                })?;
                cfg.provider_read_timeout_secs = Some(parsed);
            }
            unknown => {
                bail!(
                    "Unknown configuration key: '{}' on line {}",
                    unknown,
                    line_index + 1
                );
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

fn parse_integer_u8(raw_value: &str) -> Result<u8> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    let value = token.parse::<u16>()?;
    u8::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range for u8"))
}

fn parse_integer_u64(raw_value: &str) -> Result<u64> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    let value = token.parse::<i128>()?;
    if value < 0 {
        bail!("Expected non-negative integer");
    }
    u64::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range for u64"))
}
