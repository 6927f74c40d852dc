//! Session controller tying the API, the forms and the reminder list together.

mod session;
#[cfg(test)]
mod test_utils;

pub use session::GuildSession;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use reqwest::Url;
use thiserror::Error;
use tokio::sync::broadcast;

use crate::{
    api::{ApiError, DashboardApi, ReminderScope},
    codec::{self, CodecContext, LoadMode, SerializeMode, ValidationError},
    events::{DashboardEvent, EventBus},
    form::{ReminderForm, ToggleAction},
    list::SortKey,
    models::{
        ChannelId, ExportBody, ExportKind, GuildId, GuildInfo, ReminderRecord, ReminderTemplate,
        ReminderToggle, TemplateId, UpdateUser, UserInfo,
    },
    timezone::{self, Clocks, TimezoneSelection},
    ui::{ActionControl, ErrorBanner},
};

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("No guild selected")]
    NoGuildSelected,
    #[error("Unknown reminder '{0}'")]
    UnknownReminder(String),
    #[error("Unknown template {0}")]
    UnknownTemplate(TemplateId),
    #[error("Unknown channel {0}")]
    UnknownChannel(ChannelId),
    #[error("Unknown guild {0}")]
    UnknownGuild(GuildId),
    #[error("Another request is still running")]
    Busy,
}

pub type DashboardResult<T> = Result<T, DashboardError>;

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Address the dashboard is served from. Images hosted there are placeholders.
    pub dashboard_url: Url,
    pub placeholder_image: String,
    pub browser_timezone: Tz,
    pub order: SortKey,
}

pub struct Dashboard {
    api: Arc<dyn DashboardApi>,
    config: DashboardConfig,
    events: EventBus,
    banner: ErrorBanner,
    submit: ActionControl,

    user: Option<UserInfo>,
    guilds: Vec<GuildInfo>,
    session: Option<GuildSession>,
    creator: ReminderForm,
    timezone: TimezoneSelection,
    order: SortKey,
}

impl Dashboard {
    pub fn new(api: Arc<dyn DashboardApi>, config: DashboardConfig) -> Self {
        let creator = ReminderForm::new(&config.placeholder_image);
        let timezone = TimezoneSelection::new(config.browser_timezone);
        let order = config.order;

        Self {
            api,
            config,
            events: EventBus::new(),
            banner: ErrorBanner::new(),
            submit: ActionControl::new(),
            user: None,
            guilds: Vec::new(),
            session: None,
            creator,
            timezone,
            order,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.events.subscribe()
    }

    pub fn banner(&self) -> &ErrorBanner {
        &self.banner
    }

    pub fn submit_control(&self) -> &ActionControl {
        &self.submit
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    pub fn guilds(&self) -> &[GuildInfo] {
        &self.guilds
    }

    pub fn session(&self) -> Option<&GuildSession> {
        self.session.as_ref()
    }

    /// The reminder creator form.
    pub fn creator(&self) -> &ReminderForm {
        &self.creator
    }

    pub fn creator_mut(&mut self) -> &mut ReminderForm {
        &mut self.creator
    }

    /// Form of a listed reminder, for editing in place.
    pub fn reminder_mut(&mut self, uid: &str) -> DashboardResult<&mut ReminderForm> {
        self.session
            .as_mut()
            .ok_or(DashboardError::NoGuildSelected)?
            .reminders
            .find_by_uid_mut(uid)
            .map(|row| &mut row.form)
            .ok_or_else(|| DashboardError::UnknownReminder(uid.to_string()))
    }

    /// Points the creator at one of the session's channels.
    pub fn select_channel(&mut self, channel: ChannelId) -> DashboardResult<()> {
        let Some(session) = self.session.as_ref() else {
            return self.fail(DashboardError::NoGuildSelected);
        };

        match session.channel(channel).cloned() {
            Some(info) => {
                self.creator.select_channel(&info);
                Ok(())
            }
            None => self.fail(DashboardError::UnknownChannel(channel)),
        }
    }

    pub fn timezone(&self) -> &TimezoneSelection {
        &self.timezone
    }

    pub fn clocks(&self, now: DateTime<Utc>) -> Clocks {
        self.timezone.clocks(now)
    }

    fn fail<T>(&self, err: impl Into<DashboardError>) -> DashboardResult<T> {
        let err = err.into();
        self.banner.show(err.to_string());
        Err(err)
    }

    fn scope(&self) -> DashboardResult<ReminderScope> {
        match &self.session {
            Some(session) => Ok(session.scope),
            None => self.fail(DashboardError::NoGuildSelected),
        }
    }

    fn guild(&self) -> DashboardResult<GuildId> {
        match self.session.as_ref().and_then(|session| session.scope.guild()) {
            Some(guild) => Ok(guild),
            None => self.fail(DashboardError::NoGuildSelected),
        }
    }

    fn codec_context(&self) -> CodecContext<'_> {
        CodecContext {
            dashboard_url: &self.config.dashboard_url,
            timezone: self.timezone.selected(),
        }
    }

    fn load_form(&self, record: &ReminderRecord) -> ReminderForm {
        let mut form = ReminderForm::new(&self.config.placeholder_image);
        codec::deserialize(record, &mut form, LoadMode::Load, self.timezone.selected());
        form
    }

    pub async fn load_user(&mut self) -> DashboardResult<&UserInfo> {
        let user = match self.api.user().await {
            Ok(user) => user,
            Err(err) => return self.fail(err),
        };

        match (user.bot_timezone(), user.timezone.as_deref()) {
            (Some(tz), _) => self.timezone.set_bot(tz),
            (None, Some(stored)) => log::warn!("Ignoring unknown stored timezone {stored}"),
            (None, None) => {}
        }
        log::info!("Signed in as {}", user.name);

        Ok(self.user.insert(user))
    }

    pub async fn load_guilds(&mut self) -> DashboardResult<&[GuildInfo]> {
        match self.api.guilds().await {
            Ok(guilds) => {
                log::info!("Loaded {} guilds", guilds.len());
                self.guilds = guilds;
                Ok(&self.guilds)
            }
            Err(err) => self.fail(err),
        }
    }

    /// Opens a fresh session for `guild` and loads everything shown for it.
    pub async fn switch_guild(&mut self, guild: GuildId) -> DashboardResult<()> {
        if !self.guilds.iter().any(|info| info.id == guild) {
            return self.fail(DashboardError::UnknownGuild(guild));
        }

        self.session = Some(GuildSession::new(ReminderScope::Guild(guild), self.order));
        self.events.publish(DashboardEvent::GuildSwitched(guild));

        match self.api.channels(guild).await {
            Ok(channels) => {
                if let Some(session) = self.session.as_mut() {
                    session.channels = channels;
                }
                self.events.publish(DashboardEvent::ChannelsLoaded(guild));
            }
            Err(ApiError::BotNotInGuild) => {
                log::info!("Bot is not a member of guild {guild}");
                self.session = None;
                self.events.publish(DashboardEvent::GuildUnavailable(guild));
                return Err(ApiError::BotNotInGuild.into());
            }
            Err(err) => return self.fail(err),
        }

        match self.api.roles(guild).await {
            Ok(roles) => {
                if let Some(session) = self.session.as_mut() {
                    session.roles = roles;
                }
                self.events.publish(DashboardEvent::RolesLoaded(guild));
            }
            Err(err) => return self.fail(err),
        }

        self.refresh_templates().await?;
        self.refresh_reminders().await
    }

    /// Switches to the user's direct message reminders.
    pub async fn load_personal_reminders(&mut self) -> DashboardResult<()> {
        self.session = Some(GuildSession::new(ReminderScope::Personal, self.order));
        self.refresh_reminders().await
    }

    pub async fn refresh_reminders(&mut self) -> DashboardResult<()> {
        let scope = self.scope()?;

        let records = match self.api.reminders(scope).await {
            Ok(records) => records,
            Err(err) => return self.fail(err),
        };
        let forms: Vec<ReminderForm> = records
            .iter()
            .map(|record| self.load_form(record))
            .collect();

        if let Some(session) = self.session.as_mut() {
            session.replace_reminders(forms);
            log::info!("Loaded {} reminders", session.reminders.len());
        }
        self.events.publish(DashboardEvent::RemindersLoaded(scope));

        Ok(())
    }

    async fn run_submit<T>(
        &self,
        request: impl Future<Output = Result<T, ApiError>>,
    ) -> DashboardResult<T> {
        if !self.submit.begin() {
            return Err(DashboardError::Busy);
        }

        let result = request.await;
        self.submit.finish(result.is_ok());

        result.or_else(|err| self.fail(err))
    }

    /// Sends the creator form as a new reminder and clears it on success.
    pub async fn create_reminder(&mut self) -> DashboardResult<()> {
        let scope = self.scope()?;
        let serialized =
            codec::serialize(&self.creator, SerializeMode::Create, &self.codec_context());
        let record = match serialized {
            Ok(record) => record,
            Err(err) => return self.fail(err),
        };

        let created = self
            .run_submit(self.api.create_reminder(scope, &record))
            .await?;
        self.creator = ReminderForm::new(&self.config.placeholder_image);

        match created {
            Some(stored) => {
                let form = self.load_form(&stored);
                if let Some(session) = self.session.as_mut() {
                    session.insert_reminder(form);
                }
                Ok(())
            }
            None => self.refresh_reminders().await,
        }
    }

    pub async fn save_reminder(&mut self, uid: &str) -> DashboardResult<()> {
        let scope = self.scope()?;
        let record = {
            let form = self.find_reminder(uid)?;
            match codec::serialize(form, SerializeMode::Edit, &self.codec_context()) {
                Ok(record) => record,
                Err(err) => return self.fail(err),
            }
        };

        let stored = self
            .run_submit(self.api.update_reminder(scope, &record))
            .await?;

        if let Some(stored) = stored {
            let tz = self.timezone.selected();
            let form = self.reminder_mut(uid)?;
            codec::deserialize(&stored, form, LoadMode::Load, tz);
        }
        if let Some(session) = self.session.as_mut() {
            session.resort_reminders();
        }
        log::info!("Saved reminder {uid}");

        Ok(())
    }

    pub async fn toggle_reminder(&mut self, uid: &str) -> DashboardResult<bool> {
        let scope = self.scope()?;
        let enabled = !self.find_reminder(uid)?.enabled;

        let result = match scope {
            ReminderScope::Guild(guild) => {
                let toggle = ReminderToggle {
                    uid: uid.to_string(),
                    enabled,
                };
                self.api.toggle_reminder(guild, &toggle).await
            }
            ReminderScope::Personal => {
                let mut form = self.find_reminder(uid)?.clone();
                form.enabled = enabled;
                match codec::serialize(&form, SerializeMode::Edit, &self.codec_context()) {
                    Ok(record) => self.api.update_reminder(scope, &record).await,
                    Err(err) => return self.fail(err),
                }
            }
        };
        if let Err(err) = result {
            return self.fail(err);
        }

        let form = self.reminder_mut(uid)?;
        form.enabled = enabled;
        form.toggle_action = ToggleAction::for_enabled(enabled);

        Ok(enabled)
    }

    pub async fn delete_reminder(&mut self, uid: &str) -> DashboardResult<()> {
        let scope = self.scope()?;
        self.find_reminder(uid)?;

        if let Err(err) = self.api.delete_reminder(scope, uid).await {
            return self.fail(err);
        }

        if let Some(session) = self.session.as_mut() {
            session.remove_reminder(uid);
        }
        log::info!("Deleted reminder {uid}");

        Ok(())
    }

    fn find_reminder(&self, uid: &str) -> DashboardResult<&ReminderForm> {
        let row = self
            .session
            .as_ref()
            .and_then(|session| session.reminders.find_by_uid(uid));

        match row {
            Some(row) => Ok(&row.form),
            None => self.fail(DashboardError::UnknownReminder(uid.to_string())),
        }
    }

    pub async fn refresh_templates(&mut self) -> DashboardResult<()> {
        let guild = self.guild()?;

        match self.api.templates(guild).await {
            Ok(templates) => {
                log::debug!("Loaded {} templates", templates.len());
                if let Some(session) = self.session.as_mut() {
                    session.templates = templates;
                }
                self.events.publish(DashboardEvent::TemplatesLoaded(guild));
                Ok(())
            }
            Err(err) => self.fail(err),
        }
    }

    /// Saves the creator form's payload as a template.
    pub async fn create_template(&mut self) -> DashboardResult<()> {
        let guild = self.guild()?;
        let serialized =
            codec::serialize(&self.creator, SerializeMode::Template, &self.codec_context());
        let body = match serialized {
            Ok(body) => body,
            Err(err) => return self.fail(err),
        };
        let template = ReminderTemplate { id: None, body };

        self.run_submit(self.api.create_template(guild, &template))
            .await?;

        self.refresh_templates().await
    }

    /// Fills the creator form from a template, keeping its schedule.
    pub fn load_template(&mut self, id: TemplateId) -> DashboardResult<()> {
        let template = self
            .session
            .as_ref()
            .and_then(|session| session.template(id))
            .cloned();

        match template {
            Some(template) => {
                codec::deserialize(
                    &template.body,
                    &mut self.creator,
                    LoadMode::Template,
                    self.timezone.selected(),
                );
                Ok(())
            }
            None => self.fail(DashboardError::UnknownTemplate(id)),
        }
    }

    pub async fn delete_template(&mut self, id: TemplateId) -> DashboardResult<()> {
        let guild = self.guild()?;

        if let Err(err) = self.api.delete_template(guild, id).await {
            return self.fail(err);
        }

        if let Some(session) = self.session.as_mut() {
            session.templates.retain(|template| template.id != Some(id));
        }

        Ok(())
    }

    /// Downloads the CSV of `kind` for the current guild.
    pub async fn export(&self, kind: ExportKind) -> DashboardResult<String> {
        let guild = self.guild()?;

        match self.api.export(guild, kind).await {
            Ok(export) => Ok(export.body),
            Err(err) => self.fail(err),
        }
    }

    pub async fn import(&mut self, kind: ExportKind, csv: &[u8]) -> DashboardResult<()> {
        let guild = self.guild()?;

        if let Err(err) = self.api.import(guild, kind, &ExportBody::encode(csv)).await {
            return self.fail(err);
        }
        log::info!("Imported {kind} into guild {guild}");

        match kind {
            ExportKind::Reminders => self.refresh_reminders().await,
            ExportKind::ReminderTemplates => self.refresh_templates().await,
            ExportKind::Todos => Ok(()),
        }
    }

    pub fn set_order(&mut self, order: SortKey) {
        self.order = order;
        if let Some(session) = self.session.as_mut() {
            session.set_order(order);
        }
    }

    pub fn expand_all(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.reminders.expand_all();
        }
    }

    pub fn collapse_all(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.reminders.collapse_all();
        }
    }

    pub fn use_bot_timezone(&mut self) {
        let previous = self.timezone.selected();
        self.timezone.use_bot();
        self.timezone_changed(previous);
    }

    pub fn use_browser_timezone(&mut self) {
        let previous = self.timezone.selected();
        self.timezone.use_browser();
        self.timezone_changed(previous);
    }

    /// Stores the browser's zone as the user's zone with the bot.
    pub async fn update_bot_timezone(&mut self) -> DashboardResult<()> {
        let browser = self.timezone.browser();

        if let Err(err) = self.api.update_user(&UpdateUser::with_timezone(browser)).await {
            return self.fail(err);
        }

        let previous = self.timezone.selected();
        self.timezone.set_bot(browser);
        self.timezone.use_browser();
        if let Some(user) = self.user.as_mut() {
            user.timezone = Some(browser.name().to_string());
        }
        self.timezone_changed(previous);

        Ok(())
    }

    /// Re-expresses every displayed local time in the newly selected zone.
    fn timezone_changed(&mut self, previous: Tz) {
        let selected = self.timezone.selected();
        if previous == selected {
            return;
        }

        let reproject = |text: &mut String| {
            if let Some(utc) = timezone::local_to_utc(text, previous) {
                *text = timezone::utc_to_local(utc, selected);
            }
        };

        let forms = self
            .session
            .iter_mut()
            .flat_map(|session| session.reminders.forms_mut())
            .chain(std::iter::once(&mut self.creator));
        for form in forms {
            reproject(&mut form.time);
            reproject(&mut form.expires);
        }

        self.events.publish(DashboardEvent::TimezoneChanged(selected));
    }

    /// Closes the current guild session.
    pub fn leave(&mut self) {
        if self.session.take().is_some() {
            log::debug!("Left session");
        }
    }
}
