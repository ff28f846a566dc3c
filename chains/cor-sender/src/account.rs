use crate::error::SendError;
use crate::intent::TransferIntent;
use core_logic::{SecretKey, WalletError};
use ethers::prelude::*;
use std::fmt;

/// Signing key plus the address derived from it.
pub struct Account {
    wallet: LocalWallet,
}

impl Account {
    pub fn from_secret(key: &SecretKey) -> Result<Self, WalletError> {
        let wallet = key
            .expose()
            .parse::<LocalWallet>()
            .map_err(|e| WalletError::KeyRejected {
                reason: e.to_string(),
            })?;
        Ok(Self { wallet })
    }

    pub fn address(&self) -> Address {
        self.wallet.address()
    }

    /// RLP-encoded signed transaction, ready for `eth_sendRawTransaction`.
    pub async fn sign(&self, intent: &TransferIntent) -> Result<Bytes, SendError> {
        let tx = intent.to_typed();
        let signature = self
            .wallet
            .sign_transaction(&tx)
            .await
            .map_err(|e| SendError::Signing(e.to_string()))?;
        Ok(tx.rlp_signed(&signature))
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address())
            .field("private_key", &"***REDACTED***")
            .finish()
    }
}
