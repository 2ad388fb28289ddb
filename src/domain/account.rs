// ============================================================================
// Account Identity
// ============================================================================

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Length in bytes of an account identity
pub const ACCOUNT_ID_LEN: usize = 20;

/// Opaque 20-byte account identity, rendered as lowercase hex
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AccountId([u8; ACCOUNT_ID_LEN]);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountIdError {
    #[error("account id is not valid hex: {0}")]
    InvalidHex(String),

    #[error("account id must be {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

impl AccountId {
    pub const fn from_bytes(bytes: [u8; ACCOUNT_ID_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ACCOUNT_ID_LEN] {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self)
    }
}

impl FromStr for AccountId {
    type Err = AccountIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = hex::decode(s).map_err(|e| AccountIdError::InvalidHex(e.to_string()))?;
        let bytes: [u8; ACCOUNT_ID_LEN] =
            raw.as_slice()
                .try_into()
                .map_err(|_| AccountIdError::InvalidLength {
                    expected: ACCOUNT_ID_LEN,
                    actual: raw.len(),
                })?;
        Ok(Self(bytes))
    }
}
