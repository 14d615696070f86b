use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub saver: SaverConfig,
}

/// Server-wide switches consulted by metadata savers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaverConfig {
    /// Persist downloaded metadata next to the media. Manual edits are
    /// saved regardless of this switch.
    #[serde(default)]
    pub save_local_metadata: bool,
}

/// Loads the config from `path` (or `config/default` if present), then
/// applies `MOVIEXML_*` environment overrides, e.g.
/// `MOVIEXML_SAVER__SAVE_LOCAL_METADATA=true`.
pub fn load(path: Option<&str>) -> anyhow::Result<AppConfig> {
    let mut settings = config::Config::builder();
    if let Some(p) = path {
        settings = settings.add_source(config::File::with_name(p));
    } else {
        settings = settings.add_source(config::File::with_name("config/default").required(false));
    }
    settings = settings.add_source(
        config::Environment::with_prefix("MOVIEXML")
            .separator("__")
            .try_parsing(true),
    );
    let cfg = settings.build()?;
    Ok(cfg.try_deserialize()?)
}
