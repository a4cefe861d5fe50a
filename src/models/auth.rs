//! JWT-backed authenticated user extracted from the identity cookie.
//!
//! The auth service issues the token at sign-in; this application only
//! decodes it. Token internals beyond the claim shape are not our concern.

use std::future::{Ready, ready};

use actix_identity::Identity;
use actix_web::dev::Payload;
use actix_web::error::{ErrorInternalServerError, ErrorUnauthorized};
use actix_web::{FromRequest, HttpRequest, web};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::models::config::ServerConfig;

/// Claims carried by the sign-in token.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AuthenticatedUser {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
    pub exp: usize,
}

impl AuthenticatedUser {
    /// Encodes the claims into a signed token. Used by tests and tooling;
    /// production tokens come from the auth service.
    pub fn to_jwt(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let identity = Identity::from_request(req, payload).into_inner();
        let config = req.app_data::<web::Data<ServerConfig>>().cloned();

        let user = (|| {
            let identity = identity.map_err(|_| ErrorUnauthorized("not signed in"))?;
            let token = identity
                .id()
                .map_err(|_| ErrorUnauthorized("not signed in"))?;
            let config = config.ok_or_else(|| ErrorInternalServerError("missing config"))?;

            decode::<AuthenticatedUser>(
                &token,
                &DecodingKey::from_secret(config.secret.as_bytes()),
                &Validation::default(),
            )
            .map(|data| data.claims)
            .map_err(|e| {
                log::debug!("Failed to decode identity token: {e}");
                ErrorUnauthorized("invalid token")
            })
        })();

        ready(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::Algorithm;

    #[test]
    fn jwt_round_trip_preserves_claims() {
        let user = AuthenticatedUser {
            sub: "1".to_string(),
            email: "alice@example.com".to_string(),
            name: "Alice".to_string(),
            roles: vec!["givehub".to_string()],
            exp: usize::MAX,
        };

        let token = user.to_jwt("secret").expect("encode failed");
        let decoded = decode::<AuthenticatedUser>(
            &token,
            &DecodingKey::from_secret(b"secret"),
            &Validation::new(Algorithm::HS256),
        )
        .expect("decode failed");

        assert_eq!(decoded.claims, user);
    }
}
