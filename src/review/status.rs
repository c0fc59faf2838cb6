use serde_json::Value;
use tracing::error;

use crate::error::BotError;

/// Review states the homework API is known to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(Self::Approved),
            "reviewing" => Some(Self::Reviewing),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }

    pub fn verdict(&self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl std::fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

fn string_field<'a>(record: &'a Value, name: &'static str) -> Result<&'a str, BotError> {
    match record.get(name) {
        None | Some(Value::Null) => {
            error!("Homework record has no `{}` field: {}", name, record);
            Err(BotError::MissingField(name))
        }
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => {
            error!("Homework field `{}` is not a string: {}", name, other);
            Err(BotError::SchemaViolation(format!(
                "`{}` must be a string, got {}",
                name, other
            )))
        }
    }
}

/// Turn a single homework record into the message sent to the chat.
pub fn parse_status(record: &Value) -> Result<String, BotError> {
    let code = string_field(record, "status")?;
    let homework_name = string_field(record, "homework_name")?;

    let status = HomeworkStatus::from_code(code).ok_or_else(|| {
        error!("Homework `{}` has unknown status `{}`", homework_name, code);
        BotError::UnknownStatus(code.to_string())
    })?;

    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        homework_name,
        status.verdict()
    ))
}
