use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Catalog
    pub catalog_path: String,

    // Term display
    pub full_term_projection: bool,

    // Server
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Catalog
            catalog_path: std::env::var("CATALOG_PATH")
                .unwrap_or_else(|_| "data/catalog.json".to_string()),

            // Term display (names-only unless switched on)
            full_term_projection: match std::env::var("FULL_TERM_PROJECTION") {
                Ok(value) => parse_flag(&value)
                    .context(format!("FULL_TERM_PROJECTION has invalid value '{}'", value))?,
                Err(_) => false,
            },

            // Server
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        })
    }
}

/// Parse a boolean switch. Accepts true/false, 1/0, yes/no, on/off in any case.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
