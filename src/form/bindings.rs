//! Which record property lands in which form slot.

use crate::models::ReminderRecord;

use super::ReminderForm;

pub(crate) struct TextBinding {
    pub name: &'static str,
    pub read: fn(&ReminderRecord) -> Option<&str>,
    pub slot: fn(&mut ReminderForm) -> &mut String,
}

pub(crate) struct FlagBinding {
    pub name: &'static str,
    pub read: fn(&ReminderRecord) -> bool,
    pub slot: fn(&mut ReminderForm) -> &mut bool,
}

impl TextBinding {
    /// Copies the record's value into the form. An absent value keeps what the form holds.
    pub fn apply(&self, record: &ReminderRecord, form: &mut ReminderForm) {
        if let Some(value) = (self.read)(record) {
            log::trace!("Loading {} into form", self.name);
            *(self.slot)(form) = value.to_string();
        }
    }
}

impl FlagBinding {
    pub fn apply(&self, record: &ReminderRecord, form: &mut ReminderForm) {
        log::trace!("Loading {} into form", self.name);
        *(self.slot)(form) = (self.read)(record);
    }
}

pub(crate) const TEXT_BINDINGS: &[TextBinding] = &[
    TextBinding {
        name: "name",
        read: |r| Some(r.name.as_str()),
        slot: |f| &mut f.name,
    },
    TextBinding {
        name: "content",
        read: |r| Some(r.content.as_str()),
        slot: |f| &mut f.content,
    },
    TextBinding {
        name: "username",
        read: |r| r.username.as_deref(),
        slot: |f| &mut f.username,
    },
    TextBinding {
        name: "embed_title",
        read: |r| Some(r.embed_title.as_str()),
        slot: |f| &mut f.embed_title,
    },
    TextBinding {
        name: "embed_description",
        read: |r| Some(r.embed_description.as_str()),
        slot: |f| &mut f.embed_description,
    },
    TextBinding {
        name: "embed_author",
        read: |r| Some(r.embed_author.as_str()),
        slot: |f| &mut f.embed_author,
    },
    TextBinding {
        name: "embed_footer",
        read: |r| Some(r.embed_footer.as_str()),
        slot: |f| &mut f.embed_footer,
    },
];

pub(crate) const IMAGE_BINDINGS: &[TextBinding] = &[
    TextBinding {
        name: "avatar",
        read: |r| r.avatar.as_deref(),
        slot: |f| &mut f.avatar,
    },
    TextBinding {
        name: "embed_author_url",
        read: |r| r.embed_author_url.as_deref(),
        slot: |f| &mut f.embed_author_url,
    },
    TextBinding {
        name: "embed_footer_url",
        read: |r| r.embed_footer_url.as_deref(),
        slot: |f| &mut f.embed_footer_url,
    },
    TextBinding {
        name: "embed_image_url",
        read: |r| r.embed_image_url.as_deref(),
        slot: |f| &mut f.embed_image_url,
    },
    TextBinding {
        name: "embed_thumbnail_url",
        read: |r| r.embed_thumbnail_url.as_deref(),
        slot: |f| &mut f.embed_thumbnail_url,
    },
];

pub(crate) const FLAG_BINDINGS: &[FlagBinding] = &[
    FlagBinding {
        name: "tts",
        read: |r| r.tts,
        slot: |f| &mut f.tts,
    },
    FlagBinding {
        name: "pin",
        read: |r| r.pin,
        slot: |f| &mut f.pin,
    },
    FlagBinding {
        name: "restartable",
        read: |r| r.restartable,
        slot: |f| &mut f.restartable,
    },
];
