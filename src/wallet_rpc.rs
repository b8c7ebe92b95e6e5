//! Wallet RPC client.
//!
//! Typed async methods for the wallet daemon's JSON-RPC interface.
//! Covers balance, addresses, transfers, payments, and key queries.

use crate::client::{RpcClient, RpcConfig};
use crate::error::RpcError;
use crate::request::{self, RpcRequest, TransferMethod, TransferOptions};
use serde::Deserialize;
use serde_json::Value;

// =============================================================================
// Response Types
// =============================================================================

/// Balance info from `getbalance`, in atomic units.
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceInfo {
    pub balance: u64,
    pub unlocked_balance: u64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Result of `transfer`.
#[derive(Debug, Clone, Deserialize)]
pub struct TransferResult {
    #[serde(default)]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub tx_key: Option<String>,
    #[serde(default)]
    pub tx_blob: Option<String>,
    #[serde(default)]
    pub fee: u64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Result of the split-transfer family (`transfer_split`, sweeps).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransferSplitResult {
    #[serde(default)]
    pub tx_hash_list: Vec<String>,
    #[serde(default)]
    pub tx_key_list: Vec<String>,
    #[serde(default)]
    pub tx_blob_list: Vec<String>,
    #[serde(default)]
    pub amount_list: Vec<u64>,
    #[serde(default)]
    pub fee_list: Vec<u64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Payment entry from `get_payments` / `get_bulk_payments`.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentEntry {
    #[serde(default)]
    pub payment_id: String,
    #[serde(default)]
    pub tx_hash: String,
    #[serde(default)]
    pub amount: u64,
    #[serde(default)]
    pub block_height: u64,
    #[serde(default)]
    pub unlock_time: u64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Incoming transfer (spendable output) from `incoming_transfers`.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingTransfer {
    pub amount: u64,
    #[serde(default)]
    pub spent: bool,
    #[serde(default)]
    pub global_index: u64,
    #[serde(default)]
    pub tx_hash: String,
    #[serde(default)]
    pub tx_size: u64,
}

/// Result of `make_integrated_address`.
#[derive(Debug, Clone, Deserialize)]
pub struct IntegratedAddressResult {
    pub integrated_address: String,
    #[serde(default)]
    pub payment_id: String,
}

/// Result of `split_integrated_address`.
#[derive(Debug, Clone, Deserialize)]
pub struct SplitIntegratedAddressResult {
    pub standard_address: String,
    pub payment_id: String,
}

#[derive(Deserialize)]
struct AddressResult {
    address: String,
}

#[derive(Deserialize)]
struct HeightResult {
    height: u64,
}

#[derive(Deserialize)]
struct QueryKeyResult {
    key: String,
}

// =============================================================================
// WalletRpc
// =============================================================================

/// Async RPC client for the wallet daemon.
pub struct WalletRpc {
    client: RpcClient,
}

impl WalletRpc {
    /// Create a wallet RPC client for the given host and port.
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            client: RpcClient::new(host, port),
        }
    }

    /// Create with full configuration.
    pub fn with_config(config: RpcConfig) -> Self {
        Self {
            client: RpcClient::with_config(config),
        }
    }

    /// Get the underlying RPC client.
    pub fn client(&self) -> &RpcClient {
        &self.client
    }

    // =========================================================================
    // Balance & Address
    // =========================================================================

    /// Get the wallet's total and unlocked balance.
    pub async fn balance(&self) -> Result<BalanceInfo, RpcError> {
        let val = self.client.send(&RpcRequest::new("getbalance", None)).await?;
        Ok(serde_json::from_value(val)?)
    }

    /// Get the wallet's primary address.
    pub async fn address(&self) -> Result<String, RpcError> {
        let val = self.client.send(&RpcRequest::new("getaddress", None)).await?;
        let result: AddressResult = serde_json::from_value(val)?;
        Ok(result.address)
    }

    /// Get the wallet's current blockchain height.
    pub async fn height(&self) -> Result<u64, RpcError> {
        let val = self.client.send(&RpcRequest::new("getheight", None)).await?;
        let result: HeightResult = serde_json::from_value(val)?;
        Ok(result.height)
    }

    // =========================================================================
    // Transfers
    // =========================================================================

    /// Send a transfer to one or more destinations.
    ///
    /// Amounts in `options` are in whole coins; conversion to atomic units
    /// happens during request construction.
    pub async fn transfer(&self, options: TransferOptions) -> Result<TransferResult, RpcError> {
        let req = request::transfer(TransferMethod::Transfer, &options);
        let val = self.client.send(&req).await?;
        Ok(serde_json::from_value(val)?)
    }

    /// Send a transfer that the daemon may split into several transactions.
    pub async fn transfer_split(
        &self,
        options: TransferOptions,
    ) -> Result<TransferSplitResult, RpcError> {
        let req = request::transfer(TransferMethod::TransferSplit, &options);
        let val = self.client.send(&req).await?;
        Ok(serde_json::from_value(val)?)
    }

    /// Sweep unmixable (dust) outputs back to the wallet.
    pub async fn sweep_dust(&self) -> Result<TransferSplitResult, RpcError> {
        let val = self.client.send(&RpcRequest::new("sweep_dust", None)).await?;
        Ok(serde_json::from_value(val)?)
    }

    /// Sweep the entire unlocked balance to an address.
    pub async fn sweep_all(&self, address: &str) -> Result<TransferSplitResult, RpcError> {
        let val = self
            .client
            .send(&RpcRequest::new(
                "sweep_all",
                Some(serde_json::json!({ "address": address })),
            ))
            .await?;
        Ok(serde_json::from_value(val)?)
    }

    // =========================================================================
    // Payments
    // =========================================================================

    /// Get payments received with the given payment id.
    pub async fn get_payments(&self, payment_id: &str) -> Result<Vec<PaymentEntry>, RpcError> {
        let val = self
            .client
            .send(&RpcRequest::new(
                "get_payments",
                Some(serde_json::json!({ "payment_id": payment_id })),
            ))
            .await?;
        let payments = val
            .get("payments")
            .cloned()
            .unwrap_or(Value::Array(Vec::new()));
        Ok(serde_json::from_value(payments)?)
    }

    /// Get payments for several payment ids above a minimum block height.
    pub async fn get_bulk_payments(
        &self,
        payment_ids: &[&str],
        min_block_height: u64,
    ) -> Result<Vec<PaymentEntry>, RpcError> {
        let val = self
            .client
            .send(&RpcRequest::new(
                "get_bulk_payments",
                Some(serde_json::json!({
                    "payment_ids": payment_ids,
                    "min_block_height": min_block_height,
                })),
            ))
            .await?;
        let payments = val
            .get("payments")
            .cloned()
            .unwrap_or(Value::Array(Vec::new()));
        Ok(serde_json::from_value(payments)?)
    }

    /// Get incoming transfers (outputs).
    ///
    /// `transfer_type` is one of `"all"`, `"available"`, `"unavailable"`.
    pub async fn incoming_transfers(
        &self,
        transfer_type: &str,
    ) -> Result<Vec<IncomingTransfer>, RpcError> {
        let val = self
            .client
            .send(&RpcRequest::new(
                "incoming_transfers",
                Some(serde_json::json!({ "transfer_type": transfer_type })),
            ))
            .await?;
        let transfers = val
            .get("transfers")
            .cloned()
            .unwrap_or(Value::Array(Vec::new()));
        Ok(serde_json::from_value(transfers)?)
    }

    // =========================================================================
    // Keys & Integrated Addresses
    // =========================================================================

    /// Query a wallet key.
    ///
    /// `key_type` is one of `"mnemonic"`, `"view_key"`, `"spend_key"`.
    pub async fn query_key(&self, key_type: &str) -> Result<String, RpcError> {
        let val = self
            .client
            .send(&RpcRequest::new(
                "query_key",
                Some(serde_json::json!({ "key_type": key_type })),
            ))
            .await?;
        let result: QueryKeyResult = serde_json::from_value(val)?;
        Ok(result.key)
    }

    /// Create an integrated address from the wallet address and a payment
    /// id. With no payment id the daemon picks a random one.
    pub async fn make_integrated_address(
        &self,
        payment_id: Option<&str>,
    ) -> Result<IntegratedAddressResult, RpcError> {
        let val = self
            .client
            .send(&RpcRequest::new(
                "make_integrated_address",
                Some(serde_json::json!({ "payment_id": payment_id.unwrap_or("") })),
            ))
            .await?;
        Ok(serde_json::from_value(val)?)
    }

    /// Split an integrated address into its standard address and payment id.
    pub async fn split_integrated_address(
        &self,
        integrated_address: &str,
    ) -> Result<SplitIntegratedAddressResult, RpcError> {
        let val = self
            .client
            .send(&RpcRequest::new(
                "split_integrated_address",
                Some(serde_json::json!({ "integrated_address": integrated_address })),
            ))
            .await?;
        Ok(serde_json::from_value(val)?)
    }

    // =========================================================================
    // Wallet Management
    // =========================================================================

    /// Save the wallet to disk.
    pub async fn store(&self) -> Result<(), RpcError> {
        self.client.send(&RpcRequest::new("store", None)).await?;
        Ok(())
    }

    /// Create a new wallet file.
    pub async fn create_wallet(
        &self,
        filename: &str,
        password: &str,
        language: &str,
    ) -> Result<(), RpcError> {
        self.client
            .send(&RpcRequest::new(
                "create_wallet",
                Some(serde_json::json!({
                    "filename": filename,
                    "password": password,
                    "language": language,
                })),
            ))
            .await?;
        Ok(())
    }

    /// Open a wallet file.
    pub async fn open_wallet(&self, filename: &str, password: &str) -> Result<(), RpcError> {
        self.client
            .send(&RpcRequest::new(
                "open_wallet",
                Some(serde_json::json!({
                    "filename": filename,
                    "password": password,
                })),
            ))
            .await?;
        Ok(())
    }

    /// Stop the wallet daemon.
    pub async fn stop_wallet(&self) -> Result<(), RpcError> {
        self.client.send(&RpcRequest::new("stop_wallet", None)).await?;
        Ok(())
    }
}
