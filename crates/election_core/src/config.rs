use std::{fs, path::Path, time::Duration};

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;

use crate::{
    assets::{AssetResolver, DEFAULT_ASSET_ROOT, DEFAULT_PORTRAIT_FILE},
    transport::{HostEndpoint, FALLBACK_RESOURCE_NAME},
    visibility::HIDE_TRANSITION_DELAY,
};

pub const SETTINGS_FILE: &str = "election.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub resource_name: String,
    /// Full base URL that replaces `https://<resource_name>/`.
    pub host_endpoint: Option<String>,
    pub asset_root: String,
    pub default_portrait: String,
    pub hide_delay_ms: u64,
    pub standalone_show_delay_ms: u64,
    pub cancel_hide_on_show: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            resource_name: FALLBACK_RESOURCE_NAME.into(),
            host_endpoint: None,
            asset_root: DEFAULT_ASSET_ROOT.into(),
            default_portrait: format!("{DEFAULT_ASSET_ROOT}{DEFAULT_PORTRAIT_FILE}"),
            hide_delay_ms: HIDE_TRANSITION_DELAY.as_millis() as u64,
            standalone_show_delay_ms: 50,
            cancel_hide_on_show: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    resource_name: Option<String>,
    host_endpoint: Option<String>,
    asset_root: Option<String>,
    default_portrait: Option<String>,
    hide_delay_ms: Option<u64>,
    standalone_show_delay_ms: Option<u64>,
    cancel_hide_on_show: Option<bool>,
}

impl Settings {
    pub fn assets(&self) -> AssetResolver {
        AssetResolver::new(self.asset_root.clone(), self.default_portrait.clone())
    }

    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.hide_delay_ms)
    }

    pub fn standalone_show_delay(&self) -> Duration {
        Duration::from_millis(self.standalone_show_delay_ms)
    }

    pub fn endpoint(&self) -> anyhow::Result<HostEndpoint> {
        match &self.host_endpoint {
            Some(base) => HostEndpoint::from_base(base)
                .with_context(|| format!("invalid host endpoint override '{base}'")),
            None => HostEndpoint::for_resource(&self.resource_name).with_context(|| {
                format!("invalid resource name '{}'", self.resource_name)
            }),
        }
    }

    fn apply_file(&mut self, file_cfg: FileSettings) {
        if let Some(v) = file_cfg.resource_name {
            self.resource_name = v;
        }
        if let Some(v) = file_cfg.host_endpoint {
            self.host_endpoint = Some(v);
        }
        if let Some(v) = file_cfg.asset_root {
            self.asset_root = v;
        }
        if let Some(v) = file_cfg.default_portrait {
            self.default_portrait = v;
        }
        if let Some(v) = file_cfg.hide_delay_ms {
            self.hide_delay_ms = v;
        }
        if let Some(v) = file_cfg.standalone_show_delay_ms {
            self.standalone_show_delay_ms = v;
        }
        if let Some(v) = file_cfg.cancel_hide_on_show {
            self.cancel_hide_on_show = v;
        }
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        let env = |name: &str| env(name).filter(|v| !v.trim().is_empty());

        if let Some(v) = env("ELECTION_RESOURCE_NAME") {
            self.resource_name = v;
        }
        if let Some(v) = env("APP__RESOURCE_NAME") {
            self.resource_name = v;
        }
        if let Some(v) = env("APP__HOST_ENDPOINT") {
            self.host_endpoint = Some(v);
        }
        if let Some(v) = env("APP__ASSET_ROOT") {
            self.asset_root = v;
        }
        if let Some(v) = env("APP__DEFAULT_PORTRAIT") {
            self.default_portrait = v;
        }
        if let Some(v) = env("APP__HIDE_DELAY_MS") {
            if let Ok(parsed) = v.parse::<u64>() {
                self.hide_delay_ms = parsed;
            }
        }
        if let Some(v) = env("APP__STANDALONE_SHOW_DELAY_MS") {
            if let Ok(parsed) = v.parse::<u64>() {
                self.standalone_show_delay_ms = parsed;
            }
        }
        if let Some(v) = env("APP__CANCEL_HIDE_ON_SHOW") {
            match v.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => self.cancel_hide_on_show = true,
                "0" | "false" | "no" => self.cancel_hide_on_show = false,
                _ => {}
            }
        }
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

/// Defaults, then the TOML file at `path` if readable, then environment overrides.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => settings.apply_file(file_cfg),
            Err(err) => warn!("ignoring malformed settings file '{}': {err}", path.display()),
        }
    }

    settings.apply_env(env);
    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
