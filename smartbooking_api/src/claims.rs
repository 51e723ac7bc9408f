//! Identity claims carried in the login token.
//!
//! The token issuer uses long URN-style claim names for the display name and
//! role. All knowledge of those names is kept in this module.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Error;

const NAME_CLAIM: &str = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/name";
const ROLE_CLAIM: &str = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role";
const DEFAULT_ROLE: &str = "user";

/// Display identity of the signed-in user.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Lowercased role, `user` when the token carries none.
    pub role: String,
}

/// Decodes the payload segment of a JWT into an [`Identity`].
///
/// The signature is not checked; the backend verifies the token on every
/// request and the result is only used for display.
pub fn decode_identity_claims(token: &str) -> Result<Identity, Error> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| Error::InvalidToken("missing payload segment".to_string()))?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| Error::InvalidToken(format!("payload is not base64url: {}", e)))?;
    let claims: Map<String, Value> = serde_json::from_slice(&bytes)
        .map_err(|e| Error::InvalidToken(format!("payload is not a JSON object: {}", e)))?;

    let name = claim_str(&claims, NAME_CLAIM);
    let mut parts = name.split_whitespace();
    let first_name = parts.next().unwrap_or_default().to_string();
    let last_name = parts.next().unwrap_or_default().to_string();
    let role = match claim_str(&claims, ROLE_CLAIM) {
        r if r.is_empty() => DEFAULT_ROLE.to_string(),
        r => r.to_lowercase(),
    };

    Ok(Identity {
        id: claim_str(&claims, "sub"),
        first_name,
        last_name,
        email: claim_str(&claims, "email"),
        role,
        name,
    })
}

fn claim_str(claims: &Map<String, Value>, key: &str) -> String {
    match claims.get(key) {
        Some(Value::String(s)) => s.clone(),
        // Multi-role tokens carry an array; the first entry wins.
        Some(Value::Array(values)) => values
            .iter()
            .find_map(|v| v.as_str())
            .unwrap_or_default()
            .to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_for(claims: Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{}.{}.signature", header, payload)
    }

    #[test]
    fn decodes_urn_claims() {
        let token = token_for(serde_json::json!({
            "sub": "42",
            "email": "jane.doe@smartbooking.com",
            NAME_CLAIM: "Jane Doe",
            ROLE_CLAIM: "Admin",
        }));
        let identity = decode_identity_claims(&token).unwrap();
        assert_eq!(identity.id, "42");
        assert_eq!(identity.name, "Jane Doe");
        assert_eq!(identity.first_name, "Jane");
        assert_eq!(identity.last_name, "Doe");
        assert_eq!(identity.email, "jane.doe@smartbooking.com");
        assert_eq!(identity.role, "admin");
    }

    #[test]
    fn missing_claims_use_defaults() {
        let token = token_for(serde_json::json!({ "sub": "7" }));
        let identity = decode_identity_claims(&token).unwrap();
        assert_eq!(identity.id, "7");
        assert_eq!(identity.name, "");
        assert_eq!(identity.role, "user");
    }

    #[test]
    fn role_array_takes_first() {
        let token = token_for(serde_json::json!({ ROLE_CLAIM: ["Manager", "User"] }));
        assert_eq!(decode_identity_claims(&token).unwrap().role, "manager");
    }

    #[test]
    fn rejects_garbage() {
        assert!(decode_identity_claims("not-a-token").is_err());
        assert!(decode_identity_claims("a.!!!.c").is_err());
        let not_object = format!("a.{}.c", URL_SAFE_NO_PAD.encode("[1,2]"));
        assert!(decode_identity_claims(&not_object).is_err());
    }
}
