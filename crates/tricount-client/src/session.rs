//! Explicit session state for one client instance.
//!
//! A `Session` is immutable after construction: `authenticate` consumes the
//! unauthenticated value and returns a new one carrying `SessionAuth`, so a
//! bearer token can never be observed without its account identifier and no
//! shared header state is mutated in place.

use uuid::Uuid;

use crate::error::TricountError;
use crate::provision::KeyMaterial;

#[derive(Debug, Clone)]
pub struct SessionAuth {
    pub token: String,
    pub user_id: String,
}

#[derive(Debug, Clone)]
pub struct Session {
    key_material: KeyMaterial,
    auth: Option<SessionAuth>,
}

impl Session {
    /// Provisions a fresh unauthenticated session with new key material.
    pub fn provision() -> Result<Self, TricountError> {
        Ok(Self::from_key_material(KeyMaterial::generate()?))
    }

    #[must_use]
    pub fn from_key_material(key_material: KeyMaterial) -> Self {
        Self {
            key_material,
            auth: None,
        }
    }

    #[must_use]
    pub(crate) fn with_auth(self, auth: SessionAuth) -> Self {
        Self {
            key_material: self.key_material,
            auth: Some(auth),
        }
    }

    #[must_use]
    pub fn installation_id(&self) -> Uuid {
        self.key_material.installation_id()
    }

    #[must_use]
    pub fn public_key_pem(&self) -> &str {
        self.key_material.public_key_pem()
    }

    #[must_use]
    pub fn auth(&self) -> Option<&SessionAuth> {
        self.auth.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }
}
