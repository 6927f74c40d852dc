pub mod export;
pub mod flag;
pub mod guild;
pub mod reminder;
pub mod snowflake;
pub mod template;
pub mod user;

pub use export::{ExportBody, ExportKind};
pub use guild::{ChannelInfo, GuildInfo, RoleInfo};
pub use reminder::{
    DEFAULT_REMINDER_NAME, DeleteReminder, EmbedField, ReminderRecord, ReminderToggle,
};
pub use snowflake::{ChannelId, GuildId, RoleId, Snowflake};
pub use template::{DeleteTemplate, ReminderTemplate, TemplateId};
pub use user::{UpdateUser, UserInfo};
