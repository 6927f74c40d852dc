mod bindings;
mod fields;

pub(crate) use bindings::{FLAG_BINDINGS, IMAGE_BINDINGS, TEXT_BINDINGS};
pub use fields::{EmbedFieldList, EmbedFieldRow};

use crate::{
    color::Rgb,
    interval::IntervalFields,
    models::{ChannelId, ChannelInfo, DEFAULT_REMINDER_NAME},
};

/// A file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentFile {
    pub name: String,
    pub data: Vec<u8>,
}

/// What the enable toggle of a stored reminder does when pressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToggleAction {
    #[default]
    Enable,
    Disable,
}

impl ToggleAction {
    pub fn for_enabled(enabled: bool) -> Self {
        if enabled {
            ToggleAction::Disable
        } else {
            ToggleAction::Enable
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ToggleAction::Enable => "Enable",
            ToggleAction::Disable => "Disable",
        }
    }
}

/// Editable state of one reminder, template or the reminder creator.
///
/// Image slots hold whatever the preview currently shows, which is the dashboard's own
/// placeholder image until the user sets a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderForm {
    /// Identity of the stored reminder this form is bound to. Empty for new reminders.
    pub uid: String,
    pub name: String,
    pub channel: Option<ChannelId>,

    pub time: String,
    pub expires: String,
    pub interval: IntervalFields,
    pub enabled: bool,
    pub toggle_action: ToggleAction,

    pub content: String,
    pub username: String,
    pub avatar: String,
    pub tts: bool,
    pub pin: bool,
    pub restartable: bool,

    pub embed_title: String,
    pub embed_description: String,
    pub embed_author: String,
    pub embed_author_url: String,
    pub embed_footer: String,
    pub embed_footer_url: String,
    pub embed_image_url: String,
    pub embed_thumbnail_url: String,
    pub border_color: Rgb,
    pub embed_fields: EmbedFieldList,

    pub attachment: Option<AttachmentFile>,
}

impl Default for ReminderForm {
    fn default() -> Self {
        Self::new("")
    }
}

impl ReminderForm {
    pub fn new(placeholder_src: &str) -> Self {
        Self {
            uid: String::new(),
            name: DEFAULT_REMINDER_NAME.to_string(),
            channel: None,
            time: String::new(),
            expires: String::new(),
            interval: IntervalFields::default(),
            enabled: true,
            toggle_action: ToggleAction::Disable,
            content: String::new(),
            username: String::new(),
            avatar: placeholder_src.to_string(),
            tts: false,
            pin: false,
            restartable: false,
            embed_title: String::new(),
            embed_description: String::new(),
            embed_author: String::new(),
            embed_author_url: placeholder_src.to_string(),
            embed_footer: String::new(),
            embed_footer_url: placeholder_src.to_string(),
            embed_image_url: placeholder_src.to_string(),
            embed_thumbnail_url: placeholder_src.to_string(),
            border_color: Rgb::default(),
            embed_fields: EmbedFieldList::new(),
            attachment: None,
        }
    }

    /// Switches the target channel and previews the channel's webhook identity.
    pub fn select_channel(&mut self, channel: &ChannelInfo) {
        self.channel = Some(channel.id);
        self.avatar = channel.webhook_avatar.clone().unwrap_or_default();
        self.username = channel.webhook_name.clone().unwrap_or_default();
    }

    pub fn attach(&mut self, name: impl Into<String>, data: Vec<u8>) {
        self.attachment = Some(AttachmentFile {
            name: name.into(),
            data,
        });
    }

    pub fn file_label(&self) -> Option<&str> {
        self.attachment.as_ref().map(|file| file.name.as_str())
    }

    pub fn toggle_label(&self) -> &'static str {
        self.toggle_action.label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Snowflake;

    #[test]
    fn blank_form_shows_placeholder_images() {
        let form = ReminderForm::new("https://dash.example/static/img/bg.webp");

        assert_eq!(form.avatar, "https://dash.example/static/img/bg.webp");
        assert_eq!(form.embed_thumbnail_url, form.avatar);
        assert_eq!(form.name, DEFAULT_REMINDER_NAME);
        assert_eq!(form.embed_fields.len(), 1);
    }

    #[test]
    fn selecting_channel_previews_webhook_identity() {
        let mut form = ReminderForm::default();
        let with_webhook = ChannelInfo {
            id: Snowflake::new(1),
            name: "general".to_string(),
            webhook_avatar: Some("https://cdn.example/avatars/1/a.webp".to_string()),
            webhook_name: Some("Reminder Bot".to_string()),
        };
        let without_webhook = ChannelInfo {
            id: Snowflake::new(2),
            name: "random".to_string(),
            webhook_avatar: None,
            webhook_name: None,
        };

        form.select_channel(&with_webhook);
        assert_eq!(form.channel, Some(Snowflake::new(1)));
        assert_eq!(form.username, "Reminder Bot");
        assert_eq!(form.avatar, "https://cdn.example/avatars/1/a.webp");

        form.select_channel(&without_webhook);
        assert_eq!(form.channel, Some(Snowflake::new(2)));
        assert_eq!(form.username, "");
        assert_eq!(form.avatar, "");
    }

    #[test]
    fn toggle_offers_the_opposite_state() {
        assert_eq!(ToggleAction::for_enabled(true).label(), "Disable");
        assert_eq!(ToggleAction::for_enabled(false).label(), "Enable");
    }
}
