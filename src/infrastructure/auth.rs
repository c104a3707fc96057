use crate::domain::auth::{AuthService, Claims, TokenError, TokenType};
use crate::domain::clock::Clock;
use crate::domain::principal::PrincipalKind;
use anyhow::Result;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::fs;
use std::sync::Arc;
use uuid::Uuid;

/// JWT Authentication Service using ES256 algorithm
pub struct JwtAuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
    clock: Arc<dyn Clock>,
}

impl JwtAuthService {
    /// Create a new JWT service by loading keys from files
    pub fn new(
        private_key_path: &str,
        public_key_path: &str,
        access_token_expiry: i64,
        refresh_token_expiry: i64,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let private_key_pem = fs::read(private_key_path)
            .map_err(|e| anyhow::anyhow!("Failed to read private key file: {}", e))?;

        let public_key_pem = fs::read(public_key_path)
            .map_err(|e| anyhow::anyhow!("Failed to read public key file: {}", e))?;

        Self::new_from_keys(
            &private_key_pem,
            &public_key_pem,
            access_token_expiry,
            refresh_token_expiry,
            clock,
        )
    }

    /// Create a new JWT service from key content
    pub fn new_from_keys(
        private_key_pem: &[u8],
        public_key_pem: &[u8],
        access_token_expiry: i64,
        refresh_token_expiry: i64,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let encoding_key = EncodingKey::from_ec_pem(private_key_pem)
            .map_err(|e| anyhow::anyhow!("Failed to parse private key: {}", e))?;

        let decoding_key = DecodingKey::from_ec_pem(public_key_pem)
            .map_err(|e| anyhow::anyhow!("Failed to parse public key: {}", e))?;

        Ok(Self {
            encoding_key,
            decoding_key,
            access_token_expiry,
            refresh_token_expiry,
            clock,
        })
    }

    fn expiry_for(&self, token_type: TokenType) -> i64 {
        match token_type {
            TokenType::Access => self.access_token_expiry,
            TokenType::Refresh => self.refresh_token_expiry,
        }
    }
}

impl AuthService for JwtAuthService {
    fn generate_token(
        &self,
        principal_id: Uuid,
        kind: PrincipalKind,
        token_type: TokenType,
    ) -> Result<String> {
        let claims = Claims::new(
            principal_id,
            kind,
            token_type,
            self.clock.now(),
            self.expiry_for(token_type),
        );
        let header = Header::new(Algorithm::ES256);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| anyhow::anyhow!("Failed to generate {:?} token: {}", token_type, e))
    }

    fn validate_token(&self, token: &str, expected: TokenType) -> Result<Claims, TokenError> {
        // Expiry is checked below against the injected clock.
        let mut validation = Validation::new(Algorithm::ES256);
        validation.validate_exp = false;
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!("Token rejected: {}", e);
            TokenError::Invalid
        })?;
        let claims = token_data.claims;

        if claims.token_type != expected {
            return Err(TokenError::Invalid);
        }

        if self.clock.now().unix_timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    fn access_token_expiry(&self) -> i64 {
        self.access_token_expiry
    }

    fn refresh_token_expiry(&self) -> i64 {
        self.refresh_token_expiry
    }
}
