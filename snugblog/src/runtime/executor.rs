use std::borrow::Cow;

use redis::{Script, aio::ConnectionLike};
use serde::Serialize;
use serde_json::Value;

use crate::errors::SocialError;

/// Runs `script` with `command` serialized as its only argument and returns
/// the decoded reply. Replies carrying an `error` code become [`SocialError`]s.
pub async fn run_script<C, P>(conn: &mut C, script: &Script, command: &P) -> Result<Value, SocialError>
where
    C: ConnectionLike + Send,
    P: Serialize,
{
    let payload = serde_json::to_string(command)
        .map_err(|err| SocialError::other(format!("failed to serialize command: {err}")))?;

    let mut invocation = script.prepare_invoke();
    invocation.arg(payload);
    let raw: String = invocation.invoke_async(conn).await?;

    let value: Value = serde_json::from_str(&raw)
        .map_err(|err| SocialError::other(format!("failed to parse lua response: {err}")))?;

    match reply_error(&value) {
        Some(err) => Err(err),
        None => Ok(value),
    }
}

fn reply_error(value: &Value) -> Option<SocialError> {
    let error = value.get("error")?;
    let Some(code) = error.as_str() else {
        return Some(SocialError::other("lua_error"));
    };
    let text = |field: &str| -> String {
        match value.get(field) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    };
    let err = match code {
        "entity_not_found" => SocialError::NotFound {
            entity: Cow::Owned(text("entity")),
            id: text("entity_id"),
        },
        "unique_constraint_violation" => SocialError::UniqueConstraintViolation {
            field: text("field"),
            existing_entity_id: text("existing_entity_id"),
        },
        other => SocialError::other(other.to_string()),
    };
    Some(err)
}

/// Reads the numeric `id` from an insert reply.
pub fn reply_id(value: &Value) -> Result<u64, SocialError> {
    value
        .get("id")
        .and_then(Value::as_u64)
        .ok_or_else(|| SocialError::other("insert reply did not carry an id"))
}

/// Reads the `active` flag from a toggle reply.
pub fn reply_active(value: &Value) -> Result<bool, SocialError> {
    value
        .get("active")
        .and_then(Value::as_bool)
        .ok_or_else(|| SocialError::other("toggle reply did not carry a state"))
}
