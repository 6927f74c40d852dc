use std::{fmt, str::FromStr};

use base64::{Engine, engine::general_purpose::STANDARD as B64};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportKind {
    Reminders,
    Todos,
    ReminderTemplates,
}

impl ExportKind {
    pub fn path_segment(self) -> &'static str {
        match self {
            ExportKind::Reminders => "reminders",
            ExportKind::Todos => "todos",
            ExportKind::ReminderTemplates => "reminder_templates",
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

impl FromStr for ExportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reminders" => Ok(ExportKind::Reminders),
            "todos" => Ok(ExportKind::Todos),
            "reminder_templates" => Ok(ExportKind::ReminderTemplates),
            other => Err(format!("unknown export kind '{other}'")),
        }
    }
}

/// CSV payload of an export. Downloads carry plain text, uploads carry base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportBody {
    pub body: String,
}

impl ExportBody {
    pub fn encode(csv: &[u8]) -> Self {
        Self {
            body: B64.encode(csv),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_path_segments() {
        for kind in [
            ExportKind::Reminders,
            ExportKind::Todos,
            ExportKind::ReminderTemplates,
        ] {
            assert_eq!(kind.path_segment().parse::<ExportKind>(), Ok(kind));
        }
        assert!("macros".parse::<ExportKind>().is_err());
    }

    #[test]
    fn upload_body_is_base64() {
        let body = ExportBody::encode(b"\"a\",\"b\"\n");

        assert_eq!(body.body, "ImEiLCJiIgo=");
    }
}
