//! Conversion between a [`ReminderForm`] and the [`ReminderRecord`] sent over the wire.


use std::fmt;

use base64::{Engine, engine::general_purpose::STANDARD as B64};
use chrono_tz::Tz;
use reqwest::Url;
use thiserror::Error;

use crate::{
    color::Rgb,
    form::{FLAG_BINDINGS, IMAGE_BINDINGS, ReminderForm, TEXT_BINDINGS, ToggleAction},
    interval::IntervalFields,
    models::ReminderRecord,
    timezone,
};

/// Uploads at or above this size are refused before they reach the API.
pub const MAX_ATTACHMENT_SIZE: usize = 8 * 1024 * 1024;

const DEFAULT_ATTACHMENT_NAME: &str = "attachment";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerializeMode {
    Create,
    Edit,
    Template,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    Load,
    Template,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    InvalidTime,
    FileTooLarge,
    EmptyContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind) -> Self {
        Self { kind }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            ValidationErrorKind::InvalidTime => "Time could not be processed.",
            ValidationErrorKind::FileTooLarge => "File too large.",
            ValidationErrorKind::EmptyContent => {
                "Message must have some content (text, attachment or embed)."
            }
        };

        f.write_str(message)
    }
}

/// What the codec needs to know about its surroundings.
#[derive(Debug, Clone, Copy)]
pub struct CodecContext<'a> {
    pub dashboard_url: &'a Url,
    pub timezone: Tz,
}

/// Returns `url` unless it is blank, relative, or served by the dashboard itself (which
/// is where placeholder images come from).
pub fn has_source(url: &str, dashboard_url: &Url) -> Option<String> {
    let url = url.trim();
    let parsed = Url::parse(url).ok()?;

    let same_origin = parsed.host_str() == dashboard_url.host_str()
        && parsed.port_or_known_default() == dashboard_url.port_or_known_default();

    (!same_origin).then(|| url.to_string())
}

fn parse_time(input: &str, tz: Tz) -> Result<chrono::NaiveDateTime, ValidationError> {
    timezone::local_to_utc(input, tz)
        .ok_or_else(|| ValidationError::new(ValidationErrorKind::InvalidTime))
}

/// Reads the form into a record ready to send.
pub fn serialize(
    form: &ReminderForm,
    mode: SerializeMode,
    ctx: &CodecContext<'_>,
) -> Result<ReminderRecord, ValidationError> {
    let mut record = ReminderRecord {
        name: form.name.clone(),
        channel: form.channel,
        content: form.content.clone(),
        username: (!form.username.is_empty()).then(|| form.username.clone()),
        avatar: has_source(&form.avatar, ctx.dashboard_url),
        tts: form.tts,
        pin: form.pin,
        restartable: form.restartable,
        embed_title: form.embed_title.clone(),
        embed_description: form.embed_description.clone(),
        embed_author: form.embed_author.clone(),
        embed_author_url: has_source(&form.embed_author_url, ctx.dashboard_url),
        embed_footer: form.embed_footer.clone(),
        embed_footer_url: has_source(&form.embed_footer_url, ctx.dashboard_url),
        embed_image_url: has_source(&form.embed_image_url, ctx.dashboard_url),
        embed_thumbnail_url: has_source(&form.embed_thumbnail_url, ctx.dashboard_url),
        embed_color: form.border_color.to_int(),
        embed_fields: form.embed_fields.fields(),
        ..Default::default()
    };

    match mode {
        SerializeMode::Template => {}
        SerializeMode::Create | SerializeMode::Edit => {
            record.utc_time = Some(parse_time(&form.time, ctx.timezone)?);
            record.expires = if form.expires.trim().is_empty() {
                None
            } else {
                Some(parse_time(&form.expires, ctx.timezone)?)
            };
            record.set_interval(form.interval.normalized().to_interval());

            if mode == SerializeMode::Edit {
                record.uid = form.uid.clone();
                record.enabled = Some(form.enabled);
            } else {
                record.enabled = Some(true);
            }
        }
    }

    if let Some(file) = &form.attachment {
        if file.data.len() >= MAX_ATTACHMENT_SIZE {
            return Err(ValidationError::new(ValidationErrorKind::FileTooLarge));
        }

        record.attachment = Some(B64.encode(&file.data));
        record.attachment_name = Some(file.name.clone());
    }

    if mode != SerializeMode::Template && !record.has_content() {
        return Err(ValidationError::new(ValidationErrorKind::EmptyContent));
    }

    Ok(record)
}

/// Writes a stored record into the form. Properties missing from the record leave the
/// form's current value in place.
pub fn deserialize(record: &ReminderRecord, form: &mut ReminderForm, mode: LoadMode, tz: Tz) {
    for binding in TEXT_BINDINGS.iter().chain(IMAGE_BINDINGS) {
        binding.apply(record, form);
    }
    for binding in FLAG_BINDINGS {
        binding.apply(record, form);
    }

    form.embed_fields.reset();
    for field in &record.embed_fields {
        form.embed_fields.insert_before_trailing(field);
    }

    let interval = record.interval();
    if !interval.is_empty() {
        form.interval = IntervalFields::from_interval(&interval);
    }

    form.border_color = Rgb::from_int(record.embed_color);

    if let Some(channel) = record.channel {
        form.channel = Some(channel);
    }

    if let Some(encoded) = &record.attachment {
        match B64.decode(encoded) {
            Ok(data) => {
                let name = record
                    .attachment_name
                    .clone()
                    .unwrap_or_else(|| DEFAULT_ATTACHMENT_NAME.to_string());
                form.attach(name, data);
            }
            Err(err) => log::warn!("Skipping malformed attachment on '{}': {err}", record.uid),
        }
    }

    if !record.uid.is_empty() {
        form.uid = record.uid.clone();
    }

    if mode == LoadMode::Template {
        return;
    }

    let enabled = record.enabled.unwrap_or(false);
    form.enabled = enabled;
    form.toggle_action = ToggleAction::for_enabled(enabled);

    if let Some(utc_time) = record.utc_time {
        form.time = timezone::utc_to_local(utc_time, tz);
    }
    if let Some(expires) = record.expires {
        form.expires = timezone::utc_to_local(expires, tz);
    }
}
