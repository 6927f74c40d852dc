mod http;
mod response;

pub use http::HttpDashboardApi;
pub use response::{BOT_NOT_IN_GUILD, decode, decode_ack, error_message};

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    ChannelInfo, ExportBody, ExportKind, GuildId, GuildInfo, ReminderRecord, ReminderTemplate,
    ReminderToggle, RoleInfo, TemplateId, UpdateUser, UserInfo,
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Remote(String),
    #[error("Bot not in guild")]
    BotNotInGuild,
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Where a set of reminders lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReminderScope {
    Guild(GuildId),
    /// Reminders sent to the user's direct messages.
    Personal,
}

impl ReminderScope {
    pub fn guild(self) -> Option<GuildId> {
        match self {
            ReminderScope::Guild(guild) => Some(guild),
            ReminderScope::Personal => None,
        }
    }
}

/// The dashboard REST API. Write calls return `None` when the backend only acknowledges
/// the request instead of echoing the stored record.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn user(&self) -> ApiResult<UserInfo>;
    async fn update_user(&self, update: &UpdateUser) -> ApiResult<()>;
    async fn guilds(&self) -> ApiResult<Vec<GuildInfo>>;

    async fn channels(&self, guild: GuildId) -> ApiResult<Vec<ChannelInfo>>;
    async fn roles(&self, guild: GuildId) -> ApiResult<Vec<RoleInfo>>;

    async fn reminders(&self, scope: ReminderScope) -> ApiResult<Vec<ReminderRecord>>;
    async fn create_reminder(
        &self,
        scope: ReminderScope,
        reminder: &ReminderRecord,
    ) -> ApiResult<Option<ReminderRecord>>;
    async fn update_reminder(
        &self,
        scope: ReminderScope,
        reminder: &ReminderRecord,
    ) -> ApiResult<Option<ReminderRecord>>;
    async fn toggle_reminder(
        &self,
        guild: GuildId,
        toggle: &ReminderToggle,
    ) -> ApiResult<Option<ReminderRecord>>;
    async fn delete_reminder(&self, scope: ReminderScope, uid: &str) -> ApiResult<()>;

    async fn templates(&self, guild: GuildId) -> ApiResult<Vec<ReminderTemplate>>;
    async fn create_template(&self, guild: GuildId, template: &ReminderTemplate) -> ApiResult<()>;
    async fn delete_template(&self, guild: GuildId, id: TemplateId) -> ApiResult<()>;

    async fn export(&self, guild: GuildId, kind: ExportKind) -> ApiResult<ExportBody>;
    async fn import(&self, guild: GuildId, kind: ExportKind, body: &ExportBody) -> ApiResult<()>;
}
