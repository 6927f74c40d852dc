use std::{cmp::Ordering, fmt, str::FromStr};

use crate::{
    form::ReminderForm,
    models::{ChannelId, ChannelInfo},
    timezone,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    Channel,
    #[default]
    Time,
    Name,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "channel" => Ok(SortKey::Channel),
            "time" => Ok(SortKey::Time),
            "name" => Ok(SortKey::Name),
            other => Err(format!("unknown sort order '{other}'")),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortKey::Channel => "channel",
            SortKey::Time => "time",
            SortKey::Name => "name",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderRow {
    pub form: ReminderForm,
    pub collapsed: bool,
}

impl ReminderRow {
    pub fn new(form: ReminderForm) -> Self {
        Self {
            form,
            collapsed: true,
        }
    }

    pub fn uid(&self) -> &str {
        &self.form.uid
    }
}

/// Heading placed above a run of reminders in the same channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSeparator {
    pub channel: ChannelId,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEntry {
    Reminder(ReminderRow),
    Separator(ChannelSeparator),
}

/// Reminders of the current view, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderList {
    entries: Vec<ListEntry>,
    order: SortKey,
}

/// Present keys first, missing ones after, in their original order.
fn cmp_present<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn channel_label(channel: ChannelId, channels: &[ChannelInfo]) -> String {
    channels
        .iter()
        .find(|info| info.id == channel)
        .map(|info| info.name.clone())
        .unwrap_or_else(|| channel.to_string())
}

impl ReminderList {
    pub fn new(order: SortKey) -> Self {
        Self {
            entries: Vec::new(),
            order,
        }
    }

    pub fn order(&self) -> SortKey {
        self.order
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    pub fn rows(&self) -> impl Iterator<Item = &ReminderRow> {
        self.entries.iter().filter_map(|entry| match entry {
            ListEntry::Reminder(row) => Some(row),
            ListEntry::Separator(_) => None,
        })
    }

    fn rows_mut(&mut self) -> impl Iterator<Item = &mut ReminderRow> {
        self.entries.iter_mut().filter_map(|entry| match entry {
            ListEntry::Reminder(row) => Some(row),
            ListEntry::Separator(_) => None,
        })
    }

    pub fn forms_mut(&mut self) -> impl Iterator<Item = &mut ReminderForm> {
        self.rows_mut().map(|row| &mut row.form)
    }

    pub fn len(&self) -> usize {
        self.rows().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replaces every row and sorts with the current key.
    pub fn replace(&mut self, forms: Vec<ReminderForm>, channels: &[ChannelInfo]) {
        self.entries = forms
            .into_iter()
            .map(|form| ListEntry::Reminder(ReminderRow::new(form)))
            .collect();
        self.resort(channels);
    }

    pub fn insert(&mut self, form: ReminderForm, channels: &[ChannelInfo]) {
        self.entries.push(ListEntry::Reminder(ReminderRow::new(form)));
        self.resort(channels);
    }

    pub fn resort(&mut self, channels: &[ChannelInfo]) {
        self.sort_by(self.order, channels);
    }

    pub fn sort_by(&mut self, key: SortKey, channels: &[ChannelInfo]) {
        self.order = key;

        let mut rows: Vec<ReminderRow> = std::mem::take(&mut self.entries)
            .into_iter()
            .filter_map(|entry| match entry {
                ListEntry::Reminder(row) => Some(row),
                ListEntry::Separator(_) => None,
            })
            .collect();

        match key {
            SortKey::Channel => rows.sort_by(|a, b| cmp_present(a.form.channel, b.form.channel)),
            SortKey::Time => rows.sort_by_cached_key(|row| {
                let time = timezone::parse_local(&row.form.time);
                (time.is_none(), time)
            }),
            SortKey::Name => rows.sort_by(|a, b| a.form.name.cmp(&b.form.name)),
        }

        let mut current_channel = None;
        for row in rows {
            if key == SortKey::Channel {
                if let Some(channel) = row.form.channel.filter(|c| current_channel != Some(*c)) {
                    current_channel = Some(channel);
                    self.entries.push(ListEntry::Separator(ChannelSeparator {
                        channel,
                        label: channel_label(channel, channels),
                    }));
                }
            }
            self.entries.push(ListEntry::Reminder(row));
        }
    }

    pub fn expand_all(&mut self) {
        self.rows_mut().for_each(|row| row.collapsed = false);
    }

    pub fn collapse_all(&mut self) {
        self.rows_mut().for_each(|row| row.collapsed = true);
    }

    pub fn find_by_uid(&self, uid: &str) -> Option<&ReminderRow> {
        self.rows().find(|row| row.uid() == uid)
    }

    pub fn find_by_uid_mut(&mut self, uid: &str) -> Option<&mut ReminderRow> {
        self.rows_mut().find(|row| row.uid() == uid)
    }

    /// Removes the row and drops a separator left without reminders.
    pub fn remove_by_uid(&mut self, uid: &str, channels: &[ChannelInfo]) -> Option<ReminderRow> {
        let position = self.entries.iter().position(
            |entry| matches!(entry, ListEntry::Reminder(row) if row.uid() == uid),
        )?;

        let removed = match self.entries.remove(position) {
            ListEntry::Reminder(row) => Some(row),
            ListEntry::Separator(_) => None,
        };
        self.resort(channels);

        removed
    }
}
