use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono_tz::Tz;
use reqwest::Url;

use crate::{
    api::{ApiError, ApiResult, DashboardApi, ReminderScope},
    list::SortKey,
    models::{
        ChannelInfo, ExportBody, ExportKind, GuildId, GuildInfo, ReminderRecord,
        ReminderTemplate, ReminderToggle, RoleInfo, Snowflake, TemplateId, UpdateUser, UserInfo,
    },
};

use super::{Dashboard, DashboardConfig};

pub const GUILD: GuildId = Snowflake::new(100);
pub const BOTLESS_GUILD: GuildId = Snowflake::new(200);
pub const CHANNEL: Snowflake = Snowflake::new(1);
pub const PLACEHOLDER: &str = "https://dash.example/static/img/bg.webp";

/// In-memory backend. Writes land in the stored collections so reads see them.
pub struct MockDashboardApi {
    pub echo_writes: bool,
    pub user: Mutex<UserInfo>,
    pub guild_reminders: Mutex<Vec<ReminderRecord>>,
    pub personal_reminders: Mutex<Vec<ReminderRecord>>,
    pub templates: Mutex<Vec<ReminderTemplate>>,
    pub imported: Mutex<Vec<(ExportKind, ExportBody)>>,
    pub toggles: Mutex<Vec<ReminderToggle>>,
    /// Fails the next call with this message.
    pub fail_next: Mutex<Option<String>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap()
}

impl MockDashboardApi {
    pub fn new() -> Self {
        Self {
            echo_writes: false,
            user: Mutex::new(UserInfo {
                name: "tester".to_string(),
                timezone: Some("Asia/Tokyo".to_string()),
                patreon: false,
            }),
            guild_reminders: Mutex::new(Vec::new()),
            personal_reminders: Mutex::new(Vec::new()),
            templates: Mutex::new(Vec::new()),
            imported: Mutex::new(Vec::new()),
            toggles: Mutex::new(Vec::new()),
            fail_next: Mutex::new(None),
        }
    }

    pub fn echoing() -> Self {
        Self {
            echo_writes: true,
            ..Self::new()
        }
    }

    pub fn with_reminders(self, reminders: Vec<ReminderRecord>) -> Self {
        *lock(&self.guild_reminders) = reminders;
        self
    }

    pub fn fail_next_call(&self, message: &str) {
        *lock(&self.fail_next) = Some(message.to_string());
    }

    fn check(&self) -> ApiResult<()> {
        match lock(&self.fail_next).take() {
            Some(message) => Err(ApiError::Remote(message)),
            None => Ok(()),
        }
    }

    fn store(&self, scope: ReminderScope) -> MutexGuard<'_, Vec<ReminderRecord>> {
        match scope {
            ReminderScope::Guild(_) => lock(&self.guild_reminders),
            ReminderScope::Personal => lock(&self.personal_reminders),
        }
    }

    fn ack(&self, record: ReminderRecord) -> Option<ReminderRecord> {
        self.echo_writes.then_some(record)
    }
}

#[async_trait]
impl DashboardApi for MockDashboardApi {
    async fn user(&self) -> ApiResult<UserInfo> {
        self.check()?;
        Ok(lock(&self.user).clone())
    }

    async fn update_user(&self, update: &UpdateUser) -> ApiResult<()> {
        self.check()?;
        lock(&self.user).timezone = Some(update.timezone.clone());
        Ok(())
    }

    async fn guilds(&self) -> ApiResult<Vec<GuildInfo>> {
        self.check()?;
        Ok(vec![
            GuildInfo {
                id: GUILD,
                name: "Test guild".to_string(),
            },
            GuildInfo {
                id: BOTLESS_GUILD,
                name: "Botless guild".to_string(),
            },
        ])
    }

    async fn channels(&self, guild: GuildId) -> ApiResult<Vec<ChannelInfo>> {
        self.check()?;
        if guild == BOTLESS_GUILD {
            return Err(ApiError::BotNotInGuild);
        }

        Ok(vec![ChannelInfo {
            id: CHANNEL,
            name: "general".to_string(),
            webhook_avatar: Some("https://cdn.example/avatar.png".to_string()),
            webhook_name: Some("Reminder Bot".to_string()),
        }])
    }

    async fn roles(&self, _guild: GuildId) -> ApiResult<Vec<RoleInfo>> {
        self.check()?;
        Ok(vec![RoleInfo {
            id: Snowflake::new(7),
            name: "@everyone".to_string(),
        }])
    }

    async fn reminders(&self, scope: ReminderScope) -> ApiResult<Vec<ReminderRecord>> {
        self.check()?;
        Ok(self.store(scope).clone())
    }

    async fn create_reminder(
        &self,
        scope: ReminderScope,
        reminder: &ReminderRecord,
    ) -> ApiResult<Option<ReminderRecord>> {
        self.check()?;
        let mut store = self.store(scope);
        let stored = ReminderRecord {
            uid: format!("uid-{}", store.len() + 1),
            ..reminder.clone()
        };
        store.push(stored.clone());

        Ok(self.ack(stored))
    }

    async fn update_reminder(
        &self,
        scope: ReminderScope,
        reminder: &ReminderRecord,
    ) -> ApiResult<Option<ReminderRecord>> {
        self.check()?;
        let mut store = self.store(scope);
        match store.iter_mut().find(|stored| stored.uid == reminder.uid) {
            Some(stored) => *stored = reminder.clone(),
            None => return Err(ApiError::Remote("Could not modify reminder".to_string())),
        }

        Ok(self.ack(reminder.clone()))
    }

    async fn toggle_reminder(
        &self,
        _guild: GuildId,
        toggle: &ReminderToggle,
    ) -> ApiResult<Option<ReminderRecord>> {
        self.check()?;
        lock(&self.toggles).push(toggle.clone());
        Ok(None)
    }

    async fn delete_reminder(&self, scope: ReminderScope, uid: &str) -> ApiResult<()> {
        self.check()?;
        self.store(scope).retain(|stored| stored.uid != uid);
        Ok(())
    }

    async fn templates(&self, _guild: GuildId) -> ApiResult<Vec<ReminderTemplate>> {
        self.check()?;
        Ok(lock(&self.templates).clone())
    }

    async fn create_template(&self, _guild: GuildId, template: &ReminderTemplate) -> ApiResult<()> {
        self.check()?;
        let mut templates = lock(&self.templates);
        let id = templates.len() as TemplateId + 1;
        templates.push(ReminderTemplate {
            id: Some(id),
            body: template.body.clone(),
        });
        Ok(())
    }

    async fn delete_template(&self, _guild: GuildId, id: TemplateId) -> ApiResult<()> {
        self.check()?;
        lock(&self.templates).retain(|template| template.id != Some(id));
        Ok(())
    }

    async fn export(&self, _guild: GuildId, kind: ExportKind) -> ApiResult<ExportBody> {
        self.check()?;
        Ok(ExportBody {
            body: format!("\"{kind}\"\n"),
        })
    }

    async fn import(&self, _guild: GuildId, kind: ExportKind, body: &ExportBody) -> ApiResult<()> {
        self.check()?;
        lock(&self.imported).push((kind, body.clone()));
        Ok(())
    }
}

pub fn config() -> DashboardConfig {
    DashboardConfig {
        dashboard_url: Url::parse("https://dash.example/dashboard").unwrap(),
        placeholder_image: PLACEHOLDER.to_string(),
        browser_timezone: Tz::UTC,
        order: SortKey::Time,
    }
}

pub fn dashboard(api: &Arc<MockDashboardApi>) -> Dashboard {
    Dashboard::new(api.clone(), config())
}

pub fn stored_reminder(uid: &str, time: &str, content: &str) -> ReminderRecord {
    ReminderRecord {
        uid: uid.to_string(),
        channel: Some(CHANNEL),
        utc_time: chrono::NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M:%S").ok(),
        enabled: Some(true),
        content: content.to_string(),
        ..Default::default()
    }
}
