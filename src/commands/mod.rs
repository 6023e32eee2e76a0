pub mod config;
pub mod parse;
pub mod plan;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;
use unisync_core::NormalizedEvent;
use unisync_core::config::UnisyncConfig;
use unisync_core::filter;
use unisync_core::institution::Institution;

/// Read a file, or stdin when `path` is "-".
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        debug!("Read {} bytes from stdin", buffer.len());
        return Ok(buffer);
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    debug!("Read {} bytes from {}", content.len(), path.display());
    Ok(content)
}

/// Config file values with command-line overrides applied.
pub struct Settings {
    pub config: UnisyncConfig,
    pub institution: Institution,
}

impl Settings {
    pub fn load(institution: Option<&str>, timezone: Option<&str>) -> Result<Self> {
        let mut config = UnisyncConfig::load().context("Failed to load config")?;

        if let Some(id) = institution {
            config.institution = Some(id.to_string());
        }
        if let Some(tz) = timezone {
            config.timezone = tz.to_string();
        }

        let institution = config.institution();
        debug!(
            "Institution {}, timezone {}, cut-off {:?}",
            institution, config.timezone, config.exclude_from
        );
        Ok(Settings {
            config,
            institution,
        })
    }

    /// Parse a timetable page and apply the configured cut-off.
    pub fn parse_timetable(&self, html: &str) -> Vec<NormalizedEvent> {
        let events = self.institution.parse(html);
        match self.config.exclude_from {
            Some(cutoff) => filter::exclude_from(events, cutoff),
            None => events,
        }
    }
}
