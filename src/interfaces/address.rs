// ============================================================================
// Address Derivation Interface
// ============================================================================

use crate::domain::AccountId;
use sha2::{Digest, Sha256};

/// Deterministic seed-to-identity mapping
pub trait AddressDerivation: Send + Sync {
    fn derive(&self, seed: &[u8]) -> AccountId;
}

/// Truncated SHA-256: the first 20 bytes of the digest
pub struct Sha256AddressDerivation;

impl AddressDerivation for Sha256AddressDerivation {
    fn derive(&self, seed: &[u8]) -> AccountId {
        let digest = Sha256::new().chain_update(seed).finalize();
        let mut bytes = [0u8; crate::domain::ACCOUNT_ID_LEN];
        bytes.copy_from_slice(&digest[..crate::domain::ACCOUNT_ID_LEN]);
        AccountId::from_bytes(bytes)
    }
}

/// Settlement address of an exchange owned by `owner`
pub fn settlement_address(
    derivation: &dyn AddressDerivation,
    owner: &AccountId,
    salt: &str,
) -> AccountId {
    let seed = format!("{}{}", owner, salt);
    derivation.derive(seed.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ACCOUNT_ID_LEN;

    #[test]
    fn test_sha256_known_vector() {
        // sha256("abc") = ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad
        let id = Sha256AddressDerivation.derive(b"abc");
        assert_eq!(id.to_string(), "ba7816bf8f01cfea414140de5dae2223b00361a3");
    }

    #[test]
    fn test_settlement_address_is_deterministic() {
        let owner = AccountId::from_bytes([3; ACCOUNT_ID_LEN]);
        let a = settlement_address(&Sha256AddressDerivation, &owner, "dex");
        let b = settlement_address(&Sha256AddressDerivation, &owner, "dex");
        let c = settlement_address(&Sha256AddressDerivation, &owner, "dex-v2");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, owner);
    }
}
