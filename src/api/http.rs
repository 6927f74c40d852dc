use async_trait::async_trait;
use reqwest::{
    Client, Method, RequestBuilder,
    header::{ACCEPT, COOKIE},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::models::{
    ChannelInfo, DeleteReminder, DeleteTemplate, ExportBody, ExportKind, GuildId, GuildInfo,
    ReminderRecord, ReminderTemplate, ReminderToggle, RoleInfo, TemplateId, UpdateUser, UserInfo,
};

use super::{ApiError, ApiResult, DashboardApi, ReminderScope, response};

/// [`DashboardApi`] over HTTP, authenticated with the browser session cookie.
pub struct HttpDashboardApi {
    base_url: String,
    session_cookie: Option<String>,
    http: Client,
}

impl HttpDashboardApi {
    pub fn new(base_url: &str, session_cookie: Option<&str>) -> ApiResult<Self> {
        let http = Client::builder().build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session_cookie: session_cookie
                .filter(|cookie| !cookie.is_empty())
                .map(str::to_string),
            http,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/dashboard/api/{}", self.base_url, path);
        log::debug!("{method} {url}");

        let builder = self
            .http
            .request(method, url)
            .header(ACCEPT, "application/json");

        match &self.session_cookie {
            Some(cookie) => builder.header(COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> ApiResult<(reqwest::StatusCode, Value)> {
        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok((status, Value::Null));
        }

        match serde_json::from_slice(&bytes) {
            Ok(body) => Ok((status, body)),
            Err(_) if !status.is_success() => Err(ApiError::Remote(status.to_string())),
            Err(err) => Err(err.into()),
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let (status, body) = self.send(builder).await?;
        response::decode(status, body)
    }

    async fn submit<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<Option<T>> {
        let (status, body) = self.send(builder).await?;
        response::decode_ack(status, body)
    }

    async fn acknowledge(&self, builder: RequestBuilder) -> ApiResult<()> {
        self.submit::<Value>(builder).await.map(|_| ())
    }
}

fn reminders_path(scope: ReminderScope) -> String {
    match scope {
        ReminderScope::Guild(guild) => format!("guild/{guild}/reminders"),
        ReminderScope::Personal => "user/reminders".to_string(),
    }
}

fn export_path(guild: GuildId, kind: ExportKind) -> String {
    format!("guild/{guild}/export/{kind}")
}

#[async_trait]
impl DashboardApi for HttpDashboardApi {
    async fn user(&self) -> ApiResult<UserInfo> {
        self.fetch(self.request(Method::GET, "user")).await
    }

    async fn update_user(&self, update: &UpdateUser) -> ApiResult<()> {
        self.acknowledge(self.request(Method::PATCH, "user").json(update))
            .await
    }

    async fn guilds(&self) -> ApiResult<Vec<GuildInfo>> {
        self.fetch(self.request(Method::GET, "user/guilds")).await
    }

    async fn channels(&self, guild: GuildId) -> ApiResult<Vec<ChannelInfo>> {
        self.fetch(self.request(Method::GET, &format!("guild/{guild}/channels")))
            .await
    }

    async fn roles(&self, guild: GuildId) -> ApiResult<Vec<RoleInfo>> {
        self.fetch(self.request(Method::GET, &format!("guild/{guild}/roles")))
            .await
    }

    async fn reminders(&self, scope: ReminderScope) -> ApiResult<Vec<ReminderRecord>> {
        self.fetch(self.request(Method::GET, &reminders_path(scope)))
            .await
    }

    async fn create_reminder(
        &self,
        scope: ReminderScope,
        reminder: &ReminderRecord,
    ) -> ApiResult<Option<ReminderRecord>> {
        self.submit(self.request(Method::POST, &reminders_path(scope)).json(reminder))
            .await
    }

    async fn update_reminder(
        &self,
        scope: ReminderScope,
        reminder: &ReminderRecord,
    ) -> ApiResult<Option<ReminderRecord>> {
        // Personal reminders are replaced wholesale.
        let method = match scope {
            ReminderScope::Guild(_) => Method::PATCH,
            ReminderScope::Personal => Method::PUT,
        };

        self.submit(self.request(method, &reminders_path(scope)).json(reminder))
            .await
    }

    async fn toggle_reminder(
        &self,
        guild: GuildId,
        toggle: &ReminderToggle,
    ) -> ApiResult<Option<ReminderRecord>> {
        let path = reminders_path(ReminderScope::Guild(guild));

        self.submit(self.request(Method::PATCH, &path).json(toggle))
            .await
    }

    async fn delete_reminder(&self, scope: ReminderScope, uid: &str) -> ApiResult<()> {
        let body = DeleteReminder {
            uid: uid.to_string(),
        };

        self.acknowledge(self.request(Method::DELETE, &reminders_path(scope)).json(&body))
            .await
    }

    async fn templates(&self, guild: GuildId) -> ApiResult<Vec<ReminderTemplate>> {
        self.fetch(self.request(Method::GET, &format!("guild/{guild}/templates")))
            .await
    }

    async fn create_template(&self, guild: GuildId, template: &ReminderTemplate) -> ApiResult<()> {
        let path = format!("guild/{guild}/templates");

        self.acknowledge(self.request(Method::POST, &path).json(template))
            .await
    }

    async fn delete_template(&self, guild: GuildId, id: TemplateId) -> ApiResult<()> {
        let path = format!("guild/{guild}/templates");

        self.acknowledge(
            self.request(Method::DELETE, &path)
                .json(&DeleteTemplate { id }),
        )
        .await
    }

    async fn export(&self, guild: GuildId, kind: ExportKind) -> ApiResult<ExportBody> {
        self.fetch(self.request(Method::GET, &export_path(guild, kind)))
            .await
    }

    async fn import(&self, guild: GuildId, kind: ExportKind, body: &ExportBody) -> ApiResult<()> {
        self.acknowledge(self.request(Method::PUT, &export_path(guild, kind)).json(body))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Snowflake;

    #[test]
    fn paths_follow_scope() {
        let guild = Snowflake::new(812345678901234567);

        assert_eq!(
            reminders_path(ReminderScope::Guild(guild)),
            "guild/812345678901234567/reminders"
        );
        assert_eq!(reminders_path(ReminderScope::Personal), "user/reminders");
        assert_eq!(
            export_path(guild, ExportKind::ReminderTemplates),
            "guild/812345678901234567/export/reminder_templates"
        );
    }

    #[test]
    fn trailing_slash_and_blank_cookie_are_dropped() {
        let api = HttpDashboardApi::new("https://dash.example/", Some("")).unwrap();

        assert_eq!(api.base_url, "https://dash.example");
        assert_eq!(api.session_cookie, None);
    }
}
