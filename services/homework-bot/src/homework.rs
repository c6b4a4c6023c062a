//! Response validation and status translation

use std::collections::HashMap;

use serde_json::Value;

use crate::HomeworkBotError;

/// Map from review status code to the sentence shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerdictTable {
    verdicts: HashMap<String, String>,
}

impl Default for VerdictTable {
    fn default() -> Self {
        Self::new([
            ("approved", "Работа проверена: ревьюеру всё понравилось. Ура!"),
            ("reviewing", "Работа взята на проверку ревьюером."),
            ("rejected", "Работа проверена: у ревьюера есть замечания."),
        ])
    }
}

impl VerdictTable {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            verdicts: entries
                .into_iter()
                .map(|(status, verdict)| (status.into(), verdict.into()))
                .collect(),
        }
    }

    pub fn verdict(&self, status: &str) -> Option<&str> {
        self.verdicts.get(status).map(String::as_str)
    }
}

/// Validate the shape of an API response and return its most recent homework.
///
/// Checks run in a fixed order: the response must be an object, both
/// `current_date` and `homeworks` must be present, `homeworks` must be an
/// array, and the array must not be empty.
pub fn check_response(response: &Value) -> crate::Result<&Value> {
    let object = response.as_object().ok_or_else(|| {
        HomeworkBotError::UnexpectedType(format!(
            "response is {}, expected an object",
            type_name(response)
        ))
    })?;

    for key in ["current_date", "homeworks"] {
        if !object.contains_key(key) {
            return Err(HomeworkBotError::MissingKey(key.to_string()));
        }
    }

    let homeworks = object["homeworks"].as_array().ok_or_else(|| {
        HomeworkBotError::UnexpectedType(format!(
            "homeworks is {}, expected an array",
            type_name(&object["homeworks"])
        ))
    })?;

    homeworks.first().ok_or(HomeworkBotError::EmptyHomeworks)
}

/// Build the notification text for a homework record
pub fn parse_status(homework: &Value, verdicts: &VerdictTable) -> crate::Result<String> {
    let record = homework.as_object().ok_or_else(|| {
        HomeworkBotError::UnexpectedType(format!(
            "homework is {}, expected an object",
            type_name(homework)
        ))
    })?;

    let name = record
        .get("homework_name")
        .ok_or_else(|| HomeworkBotError::MissingKey("homework_name".to_string()))?;
    let name = name.as_str().ok_or_else(|| {
        HomeworkBotError::UnexpectedType(format!(
            "homework_name is {}, expected a string",
            type_name(name)
        ))
    })?;

    let status = record
        .get("status")
        .ok_or_else(|| HomeworkBotError::MissingKey("status".to_string()))?;
    let verdict = status
        .as_str()
        .and_then(|status| verdicts.verdict(status))
        .ok_or_else(|| HomeworkBotError::UndocumentedStatus(display_status(status)))?;

    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        name, verdict
    ))
}

fn display_status(status: &Value) -> String {
    match status {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
