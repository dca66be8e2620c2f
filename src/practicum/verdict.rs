use serde_json::Value;

use super::error::HomeworkError;
use super::types::{Homework, HomeworkStatus};

/// Build the chat message for one homework record.
pub fn format_verdict(record: &Value) -> Result<String, HomeworkError> {
    let homework = Homework::from_value(record)?;
    format_homework(&homework)
}

pub fn format_homework(homework: &Homework) -> Result<String, HomeworkError> {
    let name = homework.name()?;
    let status: HomeworkStatus = homework.raw_status()?.parse()?;
    Ok(format!(
        "Изменился статус проверки работы \"{name}\". {}",
        status.verdict()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn approved_contains_name_and_verdict() {
        let msg = format_verdict(&json!({"homework_name": "hw_bot.zip", "status": "approved"}))
            .unwrap();
        assert!(msg.contains("hw_bot.zip"));
        assert!(msg.contains("Работа проверена: ревьюеру всё понравилось. Ура!"));
        assert_eq!(
            msg,
            "Изменился статус проверки работы \"hw_bot.zip\". \
             Работа проверена: ревьюеру всё понравилось. Ура!"
        );
    }

    #[test]
    fn reviewing_and_rejected_verdicts() {
        let reviewing =
            format_verdict(&json!({"homework_name": "a", "status": "reviewing"})).unwrap();
        assert!(reviewing.ends_with("Работа взята на проверку ревьюером."));

        let rejected =
            format_verdict(&json!({"homework_name": "a", "status": "rejected"})).unwrap();
        assert!(rejected.ends_with("Работа проверена: у ревьюера есть замечания."));
    }

    #[test]
    fn unknown_status_fails() {
        let err = format_verdict(&json!({"homework_name": "a", "status": "lost"})).unwrap_err();
        assert!(matches!(err, HomeworkError::UnknownStatus(s) if s == "lost"));
    }

    #[test]
    fn missing_name_fails() {
        let err = format_verdict(&json!({"status": "approved"})).unwrap_err();
        assert!(matches!(err, HomeworkError::MissingField("homework_name")));
    }

    #[test]
    fn positional_array_record_is_not_formatted() {
        let err = format_verdict(&json!(["hw.zip", "approved"])).unwrap_err();
        assert!(matches!(err, HomeworkError::NotAnObject { .. }));
    }

    #[test]
    fn missing_status_fails() {
        let err = format_verdict(&json!({"homework_name": "a"})).unwrap_err();
        assert!(matches!(err, HomeworkError::MissingField("status")));
    }
}
