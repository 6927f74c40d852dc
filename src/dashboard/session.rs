use crate::{
    api::ReminderScope,
    form::ReminderForm,
    list::{ReminderList, SortKey},
    models::{ChannelId, ChannelInfo, ReminderTemplate, RoleInfo, TemplateId},
};

/// Everything loaded for the guild currently open. Replaced as a whole when the user
/// switches guilds; each collection is replaced as a whole when it is fetched again.
#[derive(Debug, Clone)]
pub struct GuildSession {
    pub scope: ReminderScope,
    pub channels: Vec<ChannelInfo>,
    pub roles: Vec<RoleInfo>,
    pub templates: Vec<ReminderTemplate>,
    pub reminders: ReminderList,
}

impl GuildSession {
    pub fn new(scope: ReminderScope, order: SortKey) -> Self {
        Self {
            scope,
            channels: Vec::new(),
            roles: Vec::new(),
            templates: Vec::new(),
            reminders: ReminderList::new(order),
        }
    }

    pub fn channel(&self, id: ChannelId) -> Option<&ChannelInfo> {
        self.channels.iter().find(|channel| channel.id == id)
    }

    pub fn template(&self, id: TemplateId) -> Option<&ReminderTemplate> {
        self.templates
            .iter()
            .find(|template| template.id == Some(id))
    }

    pub fn replace_reminders(&mut self, forms: Vec<ReminderForm>) {
        self.reminders.replace(forms, &self.channels);
    }

    pub fn insert_reminder(&mut self, form: ReminderForm) {
        self.reminders.insert(form, &self.channels);
    }

    pub fn remove_reminder(&mut self, uid: &str) -> bool {
        self.reminders.remove_by_uid(uid, &self.channels).is_some()
    }

    /// Re-applies the current order after a row's sort key changed.
    pub fn resort_reminders(&mut self) {
        self.reminders.resort(&self.channels);
    }

    pub fn set_order(&mut self, order: SortKey) {
        self.reminders.sort_by(order, &self.channels);
    }
}
