//! Response-body classification against the upstream errcode convention.

use serde_json::Value;

/// Codes meaning the attached credential was rejected and a refresh may
/// recover: 40001 (invalid credential) and 42001 (access_token expired).
const STALE_CREDENTIAL_CODES: [i64; 2] = [40001, 42001];

/// What a response body means for the current attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// No error signal; the body decodes as the caller's payload.
    Ok,
    /// The credential was rejected; one refresh-and-retry cycle may recover.
    StaleCredential { code: i32, message: String },
    /// Any other upstream failure; retrying cannot help.
    Failed { code: i32, message: String },
}

/// Classifies a raw body.
///
/// The upstream reports errors inside an otherwise 200-OK JSON object as
/// `errcode`/`errmsg`. Bodies without the literal `errcode` marker (media
/// bytes, plain payloads) pass through untouched, as do marker-bearing
/// bodies that fail to parse as JSON. The marker check is textual: a body
/// embedding "errcode" inside an unrelated string is still inspected here,
/// matching the upstream client convention (see DESIGN.md).
pub(crate) fn classify(body: &str) -> Outcome {
    if !body.contains("errcode") {
        return Outcome::Ok;
    }
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return Outcome::Ok;
    };
    let Some(code) = value.get("errcode").and_then(Value::as_i64) else {
        return Outcome::Ok;
    };
    if code == 0 {
        return Outcome::Ok;
    }

    let message = value
        .get("errmsg")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .unwrap_or("Unknown")
        .to_string();

    if STALE_CREDENTIAL_CODES.contains(&code) {
        Outcome::StaleCredential {
            code: code as i32,
            message,
        }
    } else {
        Outcome::Failed {
            code: i32::try_from(code).unwrap_or(i32::MAX),
            message,
        }
    }
}
