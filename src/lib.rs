//! Salvium wallet RPC client library.
//!
//! Async HTTP client for the wallet daemon's JSON-RPC interface. High-level
//! calls ("transfer funds", "get balance") become JSON-RPC requests POSTed
//! to `/json_rpc`, and every reply — result, daemon-reported error,
//! transport failure, malformed payload — resolves to one `Result` shape,
//! so callers discriminate success from failure in a single place.
//!
//! # Example
//!
//! ```ignore
//! use salvium_wallet_rpc::WalletRpc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let wallet = WalletRpc::new("127.0.0.1", 19083);
//!     let info = wallet.balance().await.unwrap();
//!     println!("Balance: {}", info.balance);
//! }
//! ```

pub mod amount;
pub mod client;
pub mod error;
pub mod request;
pub mod wallet_rpc;

pub use client::{RpcClient, RpcConfig};
pub use error::RpcError;
pub use request::{Destination, Destinations, TransferMethod, TransferOptions};
pub use wallet_rpc::WalletRpc;

/// Default wallet RPC ports per network.
pub mod ports {
    pub const WALLET_MAINNET: u16 = 19083;
    pub const WALLET_TESTNET: u16 = 29083;
    pub const WALLET_STAGENET: u16 = 39083;
}
