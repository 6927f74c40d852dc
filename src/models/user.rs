use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: String,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub patreon: bool,
}

impl UserInfo {
    /// The zone the bot has stored for this user, if it names a known zone.
    pub fn bot_timezone(&self) -> Option<Tz> {
        self.timezone.as_deref()?.parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUser {
    pub timezone: String,
}

impl UpdateUser {
    pub fn with_timezone(tz: Tz) -> Self {
        Self {
            timezone: tz.name().to_string(),
        }
    }
}
