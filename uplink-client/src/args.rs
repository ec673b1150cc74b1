//! Command-line argument parsing

use std::path::PathBuf;

use clap::Parser;

/// Get default session config help text for current platform
fn default_config_help() -> String {
    #[cfg(target_os = "linux")]
    return "Session config file (default: ~/.config/uplink/session.json)".to_string();

    #[cfg(target_os = "macos")]
    return "Session config file (default: ~/Library/Application Support/uplink/session.json)"
        .to_string();

    #[cfg(target_os = "windows")]
    return "Session config file (default: %APPDATA%\\uplink\\session.json)".to_string();

    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    return "Session config file (overrides platform default)".to_string();
}

/// Parse a `KEY=VALUE` pair
fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Upload files to an HTTP endpoint as multipart form posts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Destination URL (overrides the config file)
    pub url: String,

    /// Files to upload
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Session config file (overrides platform default)
    #[arg(short, long, help = default_config_help())]
    pub config: Option<PathBuf>,

    /// Maximum number of files in the session
    #[arg(short = 'n', long)]
    pub max_files: Option<usize>,

    /// Maximum file size in megabytes (0 = unlimited)
    #[arg(short = 's', long)]
    pub max_file_size: Option<f64>,

    /// Multipart field name for the file part
    #[arg(short, long)]
    pub field: Option<String>,

    /// Extra form field sent before the file part (repeatable)
    #[arg(long = "form-field", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub form_fields: Vec<(String, String)>,

    /// Request header (repeatable, overrides config headers)
    #[arg(short = 'H', long = "header", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub headers: Vec<(String, String)>,

    /// Enable debug logging
    #[arg(long, default_value = "false")]
    pub debug: bool,
}
