use serde_json::Value;
use tracing::error;

use crate::error::BotError;

/// Validate the API payload and return its homework list, newest first.
/// An empty list is a valid answer meaning nothing changed.
pub fn check_response(payload: &Value) -> Result<&[Value], BotError> {
    let Some(object) = payload.as_object() else {
        error!("Review API payload is not an object: {}", payload);
        return Err(BotError::SchemaViolation(
            "payload is not a JSON object".to_string(),
        ));
    };

    match object.get("homeworks") {
        None => {
            error!("Review API payload has no `homeworks` key");
            Err(BotError::SchemaViolation(
                "`homeworks` key is missing".to_string(),
            ))
        }
        Some(Value::Array(homeworks)) => Ok(homeworks.as_slice()),
        Some(other) => {
            error!("`homeworks` is not a list: {}", other);
            Err(BotError::SchemaViolation(
                "`homeworks` is not a list".to_string(),
            ))
        }
    }
}

/// Server time of the response, used as the cursor for the next request.
pub fn current_date(payload: &Value) -> Option<i64> {
    payload.get("current_date").and_then(Value::as_i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_returns_homeworks() {
        let payload = json!({
            "homeworks": [
                {"homework_name": "hw2", "status": "reviewing"},
                {"homework_name": "hw1", "status": "approved"}
            ],
            "current_date": 1000
        });
        let homeworks = check_response(&payload).unwrap();
        assert_eq!(homeworks.len(), 2);
        assert_eq!(homeworks[0]["homework_name"], "hw2");
    }

    #[test]
    fn test_empty_list_is_ok() {
        let payload = json!({"homeworks": [], "current_date": 1000});
        assert!(check_response(&payload).unwrap().is_empty());
    }

    #[test]
    fn test_non_object_payload() {
        let payload = json!([{"homeworks": []}]);
        assert!(matches!(
            check_response(&payload),
            Err(BotError::SchemaViolation(_))
        ));
    }

    #[test]
    fn test_missing_homeworks() {
        let payload = json!({"current_date": 1000});
        assert!(matches!(
            check_response(&payload),
            Err(BotError::SchemaViolation(_))
        ));
    }

    #[test]
    fn test_homeworks_not_a_list() {
        let payload = json!({"homeworks": {"homework_name": "hw1"}});
        assert!(matches!(
            check_response(&payload),
            Err(BotError::SchemaViolation(_))
        ));
    }

    #[test]
    fn test_current_date() {
        assert_eq!(current_date(&json!({"current_date": 1700000000})), Some(1700000000));
        assert_eq!(current_date(&json!({"current_date": "soon"})), None);
        assert_eq!(current_date(&json!({"homeworks": []})), None);
    }
}
