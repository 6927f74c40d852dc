use anyhow::Context;
use chrono_tz::Tz;
use config::{Config, ConfigError, Environment, File};
use reqwest::Url;
use serde::Deserialize;

use crate::{dashboard::DashboardConfig, list::SortKey};

const PLACEHOLDER_PATH: &str = "static/img/bg.webp";

#[derive(Deserialize, Debug)]
pub struct ApiSettings {
    pub base_url: String,
    /// Raw `Cookie` header of a signed-in browser session.
    pub session_cookie: Option<String>,
    pub placeholder_image: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct DisplaySettings {
    /// Zone times are shown in until the user picks the bot's zone.
    pub timezone: String,
    pub order: String,
}

#[derive(Deserialize, Debug)]
pub struct AppSettings {
    pub api: ApiSettings,
    pub display: DisplaySettings,
}

impl AppSettings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("api.base_url", "https://reminder-bot.com")?
            .set_default("display.timezone", "UTC")?
            .set_default("display.order", "time")?
            .add_source(File::with_name("appsettings").required(false))
            .add_source(File::with_name("appsettings.local").required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn base_url(&self) -> anyhow::Result<Url> {
        Url::parse(&self.api.base_url)
            .with_context(|| format!("api.base_url '{}' is not a URL", self.api.base_url))
    }

    pub fn display_timezone(&self) -> anyhow::Result<Tz> {
        self.display
            .timezone
            .parse()
            .map_err(|err| anyhow::anyhow!("display.timezone: {err}"))
    }

    pub fn order(&self) -> anyhow::Result<SortKey> {
        self.display.order.parse().map_err(anyhow::Error::msg)
    }

    pub fn dashboard_config(&self) -> anyhow::Result<DashboardConfig> {
        let dashboard_url = self.base_url()?;
        let placeholder_image = match &self.api.placeholder_image {
            Some(image) => image.clone(),
            None => dashboard_url.join(PLACEHOLDER_PATH)?.to_string(),
        };

        Ok(DashboardConfig {
            dashboard_url,
            placeholder_image,
            browser_timezone: self.display_timezone()?,
            order: self.order()?,
        })
    }
}
