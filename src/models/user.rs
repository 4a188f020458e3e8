use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Authenticated user as returned by the auth service
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Identity {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// An identity together with the access token it was resolved from.
///
/// Every backend call made on behalf of a user carries the token, and every
/// row written for them is stamped with `identity.id`.
#[derive(Debug, Clone)]
pub struct Session {
    pub identity: Identity,
    pub access_token: String,
}

impl Session {
    pub fn new(identity: Identity, access_token: impl Into<String>) -> Self {
        Self {
            identity,
            access_token: access_token.into(),
        }
    }

    pub fn user_id(&self) -> Uuid {
        self.identity.id
    }
}
