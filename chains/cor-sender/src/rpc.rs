use crate::error::RpcError;
use crate::intent::TransferIntent;
use anyhow::Result;
use async_trait::async_trait;
use ethers::prelude::*;
use reqwest::Client;
use std::time::Duration;

/// The chain operations the sender loop depends on.
///
/// Every call is awaited to completion before the next one is issued.
#[async_trait]
pub trait ChainRpc: Send + Sync {
    fn endpoint(&self) -> &str;

    async fn is_connected(&self) -> bool;

    async fn chain_id(&self) -> Result<u64, RpcError>;

    async fn block_number(&self) -> Result<u64, RpcError>;

    async fn balance(&self, address: Address) -> Result<U256, RpcError>;

    async fn gas_price(&self) -> Result<U256, RpcError>;

    /// Confirmed + pending transaction count, i.e. the next usable nonce.
    async fn transaction_count(&self, address: Address) -> Result<u64, RpcError>;

    async fn estimate_gas(&self, intent: &TransferIntent) -> Result<u64, RpcError>;

    async fn send_raw_transaction(&self, raw: Bytes) -> Result<H256, RpcError>;
}

/// [`ChainRpc`] over a plain HTTP JSON-RPC endpoint.
#[derive(Debug, Clone)]
pub struct EthersRpc {
    endpoint: String,
    provider: Provider<Http>,
}

impl EthersRpc {
    pub fn new(rpc_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        let provider = Provider::new(Http::new_with_client(
            reqwest::Url::parse(rpc_url)?,
            client,
        ));

        Ok(Self {
            endpoint: rpc_url.to_string(),
            provider,
        })
    }
}

#[async_trait]
impl ChainRpc for EthersRpc {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn is_connected(&self) -> bool {
        self.provider.client_version().await.is_ok()
    }

    async fn chain_id(&self) -> Result<u64, RpcError> {
        let id = self
            .provider
            .get_chainid()
            .await
            .map_err(|e| RpcError::new("eth_chainId", e))?;
        narrow("eth_chainId", id)
    }

    async fn block_number(&self) -> Result<u64, RpcError> {
        self.provider
            .get_block_number()
            .await
            .map(|n| n.as_u64())
            .map_err(|e| RpcError::new("eth_blockNumber", e))
    }

    async fn balance(&self, address: Address) -> Result<U256, RpcError> {
        self.provider
            .get_balance(address, None)
            .await
            .map_err(|e| RpcError::new("eth_getBalance", e))
    }

    async fn gas_price(&self) -> Result<U256, RpcError> {
        self.provider
            .get_gas_price()
            .await
            .map_err(|e| RpcError::new("eth_gasPrice", e))
    }

    async fn transaction_count(&self, address: Address) -> Result<u64, RpcError> {
        let count = self
            .provider
            .get_transaction_count(address, Some(BlockNumber::Pending.into()))
            .await
            .map_err(|e| RpcError::new("eth_getTransactionCount", e))?;
        narrow("eth_getTransactionCount", count)
    }

    async fn estimate_gas(&self, intent: &TransferIntent) -> Result<u64, RpcError> {
        let gas = self
            .provider
            .estimate_gas(&intent.to_typed(), None)
            .await
            .map_err(|e| RpcError::new("eth_estimateGas", e))?;
        narrow("eth_estimateGas", gas)
    }

    async fn send_raw_transaction(&self, raw: Bytes) -> Result<H256, RpcError> {
        let pending = self
            .provider
            .send_raw_transaction(raw)
            .await
            .map_err(|e| RpcError::new("eth_sendRawTransaction", e))?;
        Ok(pending.tx_hash())
    }
}

fn narrow(method: &'static str, value: U256) -> Result<u64, RpcError> {
    if value > U256::from(u64::MAX) {
        return Err(RpcError::new(method, format!("value {} does not fit in u64", value)));
    }
    Ok(value.as_u64())
}
