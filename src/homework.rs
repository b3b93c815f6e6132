//! Validation of the status API response and mapping of review statuses to
//! notification text.

use serde_json::Value;

use crate::error::{RecordError, SchemaError};

/// Review outcome reported by the status API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Approved,
    Reviewing,
    Rejected,
}

impl Verdict {
    pub const ALL: [Verdict; 3] = [Verdict::Approved, Verdict::Reviewing, Verdict::Rejected];

    /// Look up a status code. Codes are matched exactly.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|verdict| verdict.code() == code)
    }

    pub fn code(&self) -> &'static str {
        match self {
            Verdict::Approved => "approved",
            Verdict::Reviewing => "reviewing",
            Verdict::Rejected => "rejected",
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Verdict::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Verdict::Reviewing => "Работа взята на проверку ревьюером.",
            Verdict::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// The most recent homework entry, after its status passed the verdict table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRecord {
    pub name: String,
    pub verdict: Verdict,
}

impl StatusRecord {
    pub fn message(&self) -> String {
        format!(
            "Changed review status of \"{}\". {}",
            self.name,
            self.verdict.text()
        )
    }
}

/// Check that `response` is an object holding a `homeworks` list and return
/// that list. Entries themselves are not inspected.
pub fn check_response(response: &Value) -> Result<&[Value], SchemaError> {
    let object = response.as_object().ok_or(SchemaError::NotAnObject)?;
    let homeworks = object
        .get("homeworks")
        .ok_or(SchemaError::MissingHomeworks)?;
    homeworks
        .as_array()
        .map(Vec::as_slice)
        .ok_or(SchemaError::HomeworksNotAList)
}

/// Server-reported timestamp to use as the next `from_date`, if any.
pub fn current_date(response: &Value) -> Option<i64> {
    response.get("current_date").and_then(Value::as_i64)
}

fn string_field<'a>(record: &'a Value, key: &'static str) -> Result<&'a str, RecordError> {
    record
        .get(key)
        .ok_or(RecordError::MissingKey(key))?
        .as_str()
        .ok_or(RecordError::InvalidField(key))
}

pub fn parse_record(record: &Value) -> Result<StatusRecord, RecordError> {
    let name = string_field(record, "homework_name")?;
    let status = string_field(record, "status")?;
    let verdict =
        Verdict::from_code(status).ok_or_else(|| RecordError::UnknownStatus(status.to_string()))?;

    Ok(StatusRecord {
        name: name.to_string(),
        verdict,
    })
}

/// Notification text for a single homework record.
pub fn parse_status(record: &Value) -> Result<String, RecordError> {
    parse_record(record).map(|r| r.message())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_approved_message_is_exact() {
        let record = json!({"homework_name": "X", "status": "approved"});
        assert_eq!(
            parse_status(&record).unwrap(),
            "Changed review status of \"X\". Работа проверена: ревьюеру всё понравилось. Ура!"
        );
    }

    #[test]
    fn test_reviewing_and_rejected_messages() {
        let reviewing = json!({"homework_name": "hw_bot.zip", "status": "reviewing"});
        assert_eq!(
            parse_status(&reviewing).unwrap(),
            "Changed review status of \"hw_bot.zip\". Работа взята на проверку ревьюером."
        );
        let rejected = json!({"homework_name": "hw_bot.zip", "status": "rejected"});
        assert!(parse_status(&rejected)
            .unwrap()
            .ends_with("Работа проверена: у ревьюера есть замечания."));
    }

    #[test]
    fn test_verdict_table_covers_exactly_three_codes() {
        let codes: Vec<&str> = Verdict::ALL.iter().map(Verdict::code).collect();
        assert_eq!(codes, vec!["approved", "reviewing", "rejected"]);
        for verdict in Verdict::ALL {
            assert_eq!(Verdict::from_code(verdict.code()), Some(verdict));
        }
        for code in ["unknown", "Approved", "", "approved ", "reviewed"] {
            assert_eq!(Verdict::from_code(code), None, "{code:?} must be rejected");
        }
    }

    #[test]
    fn test_unknown_status_is_error() {
        let record = json!({"homework_name": "X", "status": "unknown"});
        match parse_status(&record) {
            Err(RecordError::UnknownStatus(code)) => assert_eq!(code, "unknown"),
            other => panic!("expected unknown status, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_keys() {
        let no_name = json!({"status": "approved"});
        assert!(matches!(
            parse_status(&no_name),
            Err(RecordError::MissingKey("homework_name"))
        ));

        let no_status = json!({"homework_name": "X"});
        assert!(matches!(
            parse_status(&no_status),
            Err(RecordError::MissingKey("status"))
        ));

        assert!(matches!(
            parse_status(&json!("not a record")),
            Err(RecordError::MissingKey("homework_name"))
        ));
    }

    #[test]
    fn test_non_string_field_is_invalid() {
        let record = json!({"homework_name": 7, "status": "approved"});
        assert!(matches!(
            parse_status(&record),
            Err(RecordError::InvalidField("homework_name"))
        ));
    }

    #[test]
    fn test_check_response_shapes() {
        assert!(matches!(
            check_response(&json!([])),
            Err(SchemaError::NotAnObject)
        ));
        assert!(matches!(
            check_response(&json!({"current_date": 1})),
            Err(SchemaError::MissingHomeworks)
        ));
        assert!(matches!(
            check_response(&json!({"homeworks": {"a": 1}})),
            Err(SchemaError::HomeworksNotAList)
        ));
    }

    #[test]
    fn test_check_response_returns_list() {
        let response = json!({
            "homeworks": [
                {"homework_name": "new", "status": "approved"},
                {"homework_name": "old", "status": "rejected"}
            ],
            "current_date": 1_700_000_000
        });
        let homeworks = check_response(&response).unwrap();
        assert_eq!(homeworks.len(), 2);
        assert_eq!(homeworks[0]["homework_name"], "new");

        let empty = json!({"homeworks": [], "current_date": 5});
        assert!(check_response(&empty).unwrap().is_empty());
    }

    #[test]
    fn test_current_date() {
        assert_eq!(current_date(&json!({"current_date": 1234})), Some(1234));
        assert_eq!(current_date(&json!({"homeworks": []})), None);
        assert_eq!(current_date(&json!({"current_date": "soon"})), None);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SchemaError::NotAnObject.to_string(),
            "malformed response: not an object"
        );
        assert_eq!(
            SchemaError::MissingHomeworks.to_string(),
            "missing homeworks key"
        );
        assert_eq!(
            SchemaError::HomeworksNotAList.to_string(),
            "homeworks is not a list"
        );
    }
}
