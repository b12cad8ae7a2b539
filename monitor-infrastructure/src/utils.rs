use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::Value;

/// Guild names travel base64-encoded in request parameters.
pub fn encode_guild_name(name: &str) -> String {
    STANDARD.encode(name.as_bytes())
}

/// The server's `err` status code, 0 on success.
pub fn response_code(payload: &Value) -> Option<i64> {
    payload.get("err").and_then(Value::as_i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn guild_name_is_base64_of_utf8() {
        assert_eq!(encode_guild_name("Owls"), "T3dscw==");
    }

    #[test]
    fn response_code_requires_integer_err() {
        assert_eq!(response_code(&json!({ "err": 0 })), Some(0));
        assert_eq!(response_code(&json!({ "err": 31 })), Some(31));
        assert_eq!(response_code(&json!({ "err": "0" })), None);
        assert_eq!(response_code(&json!({})), None);
    }
}
