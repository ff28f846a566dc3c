use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, TransactionRequest, U256};

/// One native transfer, fixed before signing.
///
/// Built fresh for every attempt. Signing only reads it, so the signed bytes
/// always match what was checked against the balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferIntent {
    pub from: Address,
    pub nonce: u64,
    pub to: Address,
    pub value: U256,
    pub gas_limit: u64,
    pub gas_price: U256,
    pub chain_id: u64,
}

impl TransferIntent {
    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    /// Legacy (EIP-155) request, the shape both `eth_estimateGas` and the signer take.
    pub fn to_typed(&self) -> TypedTransaction {
        TransactionRequest::new()
            .from(self.from)
            .to(self.to)
            .value(self.value)
            .gas(self.gas_limit)
            .gas_price(self.gas_price)
            .nonce(self.nonce)
            .chain_id(self.chain_id)
            .into()
    }
}

/// `amount + gas_price * gas_limit`
pub fn required_cost(amount: U256, gas_price: U256, gas_limit: u64) -> U256 {
    amount.saturating_add(gas_price.saturating_mul(U256::from(gas_limit)))
}
