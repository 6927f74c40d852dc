use serde::{Deserialize, Serialize};

use super::reminder::ReminderRecord;

pub type TemplateId = u32;

/// A saved reminder payload without a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TemplateId>,
    #[serde(flatten)]
    pub body: ReminderRecord,
}

impl ReminderTemplate {
    pub fn name(&self) -> &str {
        &self.body.name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTemplate {
    pub id: TemplateId,
}
