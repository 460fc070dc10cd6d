// JWT verification for privileged endpoints.
// Tokens are issued elsewhere; this service only verifies them.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;

/// Claims this service cares about, validated field-by-field.
///
/// # Fields
/// * `iss` - issuer; must be one of the configured trusted issuers
/// * `exp` - expiry time (seconds since epoch); must be in the future
/// * `roles` - role names; authorization checks happen against this list
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub iss: String,
    pub exp: usize,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Verifies bearer tokens against the configured secret and issuer set.
///
/// Signature (HS256), expiry, and issuer are all checked by
/// [`TokenVerifier::verify`]; role checks are left to the caller since
/// they depend on the endpoint.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&config.trusted_issuers);

        Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }

    /// Verifies and decodes a token, returning its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.decoding_key, &self.validation).map(|data| data.claims)
    }
}

/// Signs a token for the given claims. The service never issues tokens in
/// production; this exists for tests and local tooling.
pub fn sign_token(claims: &Claims, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    const TEST_SECRET: &str = "test-secret-key-for-unit-tests";

    fn test_config() -> AuthConfig {
        AuthConfig {
            secret: TEST_SECRET.to_string(),
            trusted_issuers: vec!["trusted.issuer".to_string(), "other.issuer".to_string()],
            admin_role: "admin".to_string(),
        }
    }

    fn claims_with_issuer(iss: &str) -> Claims {
        Claims {
            iss: iss.to_string(),
            exp: (Utc::now() + Duration::hours(8)).timestamp() as usize,
            roles: vec!["admin".to_string()],
        }
    }

    #[test]
    fn sign_and_verify_roundtrip() {
        let verifier = TokenVerifier::new(&test_config());
        let token = sign_token(&claims_with_issuer("trusted.issuer"), TEST_SECRET).unwrap();

        let claims = verifier.verify(&token).expect("valid token");
        assert_eq!(claims.iss, "trusted.issuer");
        assert_eq!(claims.roles, vec!["admin".to_string()]);
    }

    #[test]
    fn any_trusted_issuer_is_accepted() {
        let verifier = TokenVerifier::new(&test_config());
        let token = sign_token(&claims_with_issuer("other.issuer"), TEST_SECRET).unwrap();

        assert!(verifier.verify(&token).is_ok());
    }

    #[test]
    fn untrusted_issuer_fails() {
        let verifier = TokenVerifier::new(&test_config());
        let token = sign_token(&claims_with_issuer("evil.issuer"), TEST_SECRET).unwrap();

        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn expired_token_fails() {
        let verifier = TokenVerifier::new(&test_config());
        let mut claims = claims_with_issuer("trusted.issuer");
        claims.exp = (Utc::now() - Duration::hours(2)).timestamp() as usize;
        let token = sign_token(&claims, TEST_SECRET).unwrap();

        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn wrong_secret_fails() {
        let verifier = TokenVerifier::new(&test_config());
        let token = sign_token(&claims_with_issuer("trusted.issuer"), "wrong-secret").unwrap();

        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn garbage_token_fails() {
        let verifier = TokenVerifier::new(&test_config());
        assert!(verifier.verify("invalid.token.string").is_err());
    }

    #[test]
    fn missing_roles_claim_defaults_to_empty() {
        let verifier = TokenVerifier::new(&test_config());
        let raw = serde_json::json!({
            "iss": "trusted.issuer",
            "exp": (Utc::now() + Duration::hours(1)).timestamp(),
        });
        let token = encode(
            &Header::default(),
            &raw,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        let claims = verifier.verify(&token).expect("valid token");
        assert!(claims.roles.is_empty());
    }
}
