use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::interval::Interval;

use super::{flag, snowflake::ChannelId};

pub const DEFAULT_REMINDER_NAME: &str = "Reminder";

fn default_name() -> String {
    DEFAULT_REMINDER_NAME.to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub title: String,
    pub value: String,
    #[serde(default, deserialize_with = "flag::deserialize")]
    pub inline: bool,
}

impl EmbedField {
    pub fn is_blank(&self) -> bool {
        self.title.len() + self.value.len() == 0
    }
}

/// A reminder as it travels between the dashboard and the API.
///
/// Scheduling fields are `None` for templates and serialize as explicit `null`s; the
/// scheduler reads a `null` interval component as "does not recur in this unit".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderRecord {
    #[serde(default)]
    pub uid: String,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub channel: Option<ChannelId>,

    #[serde(default)]
    pub utc_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub expires: Option<NaiveDateTime>,
    #[serde(default)]
    pub interval_seconds: Option<u64>,
    #[serde(default)]
    pub interval_days: Option<u64>,
    #[serde(default)]
    pub interval_months: Option<u64>,
    #[serde(default, deserialize_with = "flag::option::deserialize")]
    pub enabled: Option<bool>,

    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default, deserialize_with = "flag::deserialize")]
    pub tts: bool,
    #[serde(default, deserialize_with = "flag::deserialize")]
    pub pin: bool,
    #[serde(default, deserialize_with = "flag::deserialize")]
    pub restartable: bool,

    #[serde(default)]
    pub embed_title: String,
    #[serde(default)]
    pub embed_description: String,
    #[serde(default)]
    pub embed_author: String,
    #[serde(default)]
    pub embed_author_url: Option<String>,
    #[serde(default)]
    pub embed_footer: String,
    #[serde(default)]
    pub embed_footer_url: Option<String>,
    #[serde(default)]
    pub embed_image_url: Option<String>,
    #[serde(default)]
    pub embed_thumbnail_url: Option<String>,
    #[serde(default)]
    pub embed_color: u32,
    #[serde(default)]
    pub embed_fields: Vec<EmbedField>,

    /// Base64 of the file contents.
    #[serde(default)]
    pub attachment: Option<String>,
    #[serde(default)]
    pub attachment_name: Option<String>,
}

impl Default for ReminderRecord {
    fn default() -> Self {
        Self {
            uid: String::new(),
            name: default_name(),
            channel: None,
            utc_time: None,
            expires: None,
            interval_seconds: None,
            interval_days: None,
            interval_months: None,
            enabled: None,
            content: String::new(),
            username: None,
            avatar: None,
            tts: false,
            pin: false,
            restartable: false,
            embed_title: String::new(),
            embed_description: String::new(),
            embed_author: String::new(),
            embed_author_url: None,
            embed_footer: String::new(),
            embed_footer_url: None,
            embed_image_url: None,
            embed_thumbnail_url: None,
            embed_color: 0,
            embed_fields: Vec::new(),
            attachment: None,
            attachment_name: None,
        }
    }
}

impl ReminderRecord {
    pub fn interval(&self) -> Interval {
        Interval {
            months: self.interval_months,
            days: self.interval_days,
            seconds: self.interval_seconds,
        }
    }

    pub fn set_interval(&mut self, interval: Interval) {
        self.interval_months = interval.months;
        self.interval_days = interval.days;
        self.interval_seconds = interval.seconds;
    }

    /// Whether posting this reminder would produce a visible message.
    pub fn has_content(&self) -> bool {
        let embed_text = [
            &self.embed_title,
            &self.embed_description,
            &self.embed_author,
            &self.embed_footer,
        ];
        let embed_urls = [
            &self.embed_author_url,
            &self.embed_footer_url,
            &self.embed_image_url,
            &self.embed_thumbnail_url,
        ];

        self.attachment.is_some()
            || !self.content.is_empty()
            || embed_text.iter().any(|text| !text.is_empty())
            || embed_urls
                .iter()
                .any(|url| url.as_deref().is_some_and(|url| !url.is_empty()))
            || self.embed_fields.iter().any(|field| !field.is_blank())
    }
}

/// Body of the enable/disable `PATCH`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderToggle {
    pub uid: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteReminder {
    pub uid: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Snowflake;
    use serde_json::json;

    #[test]
    fn absent_interval_components_serialize_as_null() {
        let record = ReminderRecord {
            interval_seconds: Some(3600),
            ..Default::default()
        };

        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["interval_seconds"], json!(3600));
        assert_eq!(value["interval_days"], json!(null));
        assert_eq!(value["interval_months"], json!(null));
        assert!(value.as_object().unwrap().contains_key("interval_days"));
    }

    #[test]
    fn backend_rows_decode() {
        let record: ReminderRecord = serde_json::from_value(json!({
            "uid": "abc",
            "channel": "812345678901234567",
            "utc_time": "2025-06-01T10:30:00",
            "enabled": 1,
            "tts": 0,
            "pin": 1,
            "restartable": 0,
            "content": "hello",
            "embed_color": 16711680,
            "embed_fields": [{"title": "a", "value": "b", "inline": true}],
            "some_future_column": "ignored"
        }))
        .unwrap();

        assert_eq!(record.uid, "abc");
        assert_eq!(record.name, DEFAULT_REMINDER_NAME);
        assert_eq!(record.channel, Some(Snowflake::new(812345678901234567)));
        assert_eq!(record.enabled, Some(true));
        assert!(record.pin);
        assert!(!record.tts);
        assert_eq!(record.embed_fields.len(), 1);
        assert!(record.embed_fields[0].inline);
        assert_eq!(
            record.utc_time.unwrap().to_string(),
            "2025-06-01 10:30:00"
        );
    }

    #[test]
    fn content_check_covers_every_content_field() {
        assert!(!ReminderRecord::default().has_content());

        let with_url = ReminderRecord {
            embed_image_url: Some("https://example.com/a.png".to_string()),
            ..Default::default()
        };
        assert!(with_url.has_content());

        let with_field = ReminderRecord {
            embed_fields: vec![EmbedField {
                title: "t".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(with_field.has_content());

        let identity_only = ReminderRecord {
            username: Some("bot".to_string()),
            avatar: Some("https://example.com/a.png".to_string()),
            ..Default::default()
        };
        assert!(!identity_only.has_content());
    }
}
