use secrecy::SecretString;
use serde::Deserialize;

/// Secret used to verify bearer tokens issued by the identity provider.
#[derive(Debug, Deserialize)]
pub struct JwtSettings {
    pub secret: SecretString,
}

impl JwtSettings {
    pub fn new(secret: String) -> Self {
        Self {
            secret: SecretString::new(secret.into_boxed_str()),
        }
    }
}
