//! Per-instance key material for the upstream registration handshake.

use rsa::pkcs1::{EncodeRsaPublicKey, LineEnding};
use rsa::{RsaPrivateKey, RsaPublicKey};
use uuid::Uuid;

use crate::error::TricountError;

const RSA_BITS: usize = 2048;

#[derive(Debug, Clone)]
pub struct KeyMaterial {
    installation_id: Uuid,
    public_key_pem: String,
    private_key: RsaPrivateKey,
}

impl KeyMaterial {
    /// Generates a fresh installation identity: a random installation id and
    /// an RSA-2048 keypair whose public half is exported as PKCS#1 PEM. The
    /// private key never leaves memory; the upstream service only needs the
    /// public half at registration time.
    pub fn generate() -> Result<Self, TricountError> {
        let mut rng = rand::thread_rng();
        let private_key = RsaPrivateKey::new(&mut rng, RSA_BITS)
            .map_err(|error| TricountError::Provision(error.to_string()))?;
        let public_key_pem = RsaPublicKey::from(&private_key)
            .to_pkcs1_pem(LineEnding::LF)
            .map_err(|error| TricountError::Provision(error.to_string()))?;
        Ok(Self {
            installation_id: Uuid::new_v4(),
            public_key_pem,
            private_key,
        })
    }

    #[must_use]
    pub fn installation_id(&self) -> Uuid {
        self.installation_id
    }

    #[must_use]
    pub fn public_key_pem(&self) -> &str {
        &self.public_key_pem
    }

    #[must_use]
    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private_key
    }
}
