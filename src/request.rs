//! JSON-RPC request construction.
//!
//! Pure translation of a method name plus an options struct into a request
//! envelope. No I/O happens here and nothing here fails: degenerate input
//! (an empty destination list, fully defaulted options) still builds a
//! well-formed request, and any rejection is left to the daemon.

use crate::amount;
use serde::Serialize;
use serde_json::{json, Value};

/// Protocol version sent with every request.
pub const JSONRPC_VERSION: &str = "2.0";

/// Fixed request id. The client never multiplexes requests on a single
/// connection, so responses are matched by the transport, not by id.
pub const REQUEST_ID: &str = "0";

/// Default ring ambiguity set size for transfers.
pub const DEFAULT_MIXIN: u64 = 4;

/// Transfer priority levels.
pub mod priority {
    pub const DEFAULT: u32 = 0;
    pub const UNIMPORTANT: u32 = 1;
    pub const NORMAL: u32 = 2;
    pub const ELEVATED: u32 = 3;
}

/// JSON-RPC 2.0 request envelope.
///
/// `params` is omitted from the wire entirely (not sent as null) for
/// zero-argument methods.
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: &'static str,
    pub method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl<'a> RpcRequest<'a> {
    /// Build an envelope for `method`.
    pub fn new(method: &'a str, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id: REQUEST_ID,
            method,
            params,
        }
    }
}

/// Destination for a transfer, amount in whole coins.
#[derive(Debug, Clone, PartialEq)]
pub struct Destination {
    pub address: String,
    pub amount: f64,
}

impl Destination {
    pub fn new(address: impl Into<String>, amount: f64) -> Self {
        Self {
            address: address.into(),
            amount,
        }
    }
}

/// One destination or several. Either form normalizes to a sequence
/// before amounts are converted.
#[derive(Debug, Clone)]
pub enum Destinations {
    One(Destination),
    Many(Vec<Destination>),
}

impl Destinations {
    fn as_slice(&self) -> &[Destination] {
        match self {
            Destinations::One(dest) => std::slice::from_ref(dest),
            Destinations::Many(dests) => dests,
        }
    }
}

impl Default for Destinations {
    fn default() -> Self {
        Destinations::Many(Vec::new())
    }
}

impl From<Destination> for Destinations {
    fn from(dest: Destination) -> Self {
        Destinations::One(dest)
    }
}

impl From<Vec<Destination>> for Destinations {
    fn from(dests: Vec<Destination>) -> Self {
        Destinations::Many(dests)
    }
}

/// Options for the transfer-family methods.
///
/// `None` means "use the default listed on the field"; an explicit `0` or
/// `false` is sent as-is, never replaced by the default.
#[derive(Debug, Clone, Default)]
pub struct TransferOptions {
    pub destinations: Destinations,
    /// Ring ambiguity set size. Default 4.
    pub mixin: Option<u64>,
    /// Blocks before the sent outputs unlock. Default 0.
    pub unlock_time: Option<u64>,
    /// Payment id tag; sent as JSON null when unset, never omitted.
    pub payment_id: Option<String>,
    /// Build the transaction without relaying it. Default false.
    pub do_not_relay: Option<bool>,
    /// Fee priority, see [`priority`]. Default 0.
    pub priority: Option<u32>,
    /// Return the raw transaction hex. Default false.
    pub get_tx_hex: Option<bool>,
    /// Return the transaction key. Default false.
    pub get_tx_key: Option<bool>,
    /// Split-transfer strategy toggle; only emitted for `transfer_split`.
    /// Default false.
    pub new_algorithm: Option<bool>,
}

impl TransferOptions {
    /// Options with the given destination(s) and everything else defaulted.
    pub fn new(destinations: impl Into<Destinations>) -> Self {
        Self {
            destinations: destinations.into(),
            ..Default::default()
        }
    }
}

/// The two transfer-family RPC methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMethod {
    Transfer,
    TransferSplit,
}

impl TransferMethod {
    pub fn method_name(self) -> &'static str {
        match self {
            TransferMethod::Transfer => "transfer",
            TransferMethod::TransferSplit => "transfer_split",
        }
    }
}

/// Wire-format destination, amount already in atomic units.
#[derive(Debug, Serialize)]
struct AtomicDestination<'a> {
    address: &'a str,
    amount: u64,
}

/// Build a transfer-family request.
///
/// Destinations are normalized to a sequence and each amount crosses into
/// atomic units here, exactly once; everything downstream only ever sees
/// atomic integers.
pub fn transfer(method: TransferMethod, options: &TransferOptions) -> RpcRequest<'static> {
    let destinations: Vec<AtomicDestination<'_>> = options
        .destinations
        .as_slice()
        .iter()
        .map(|dest| AtomicDestination {
            address: &dest.address,
            amount: amount::to_atomic(dest.amount),
        })
        .collect();

    let mut params = json!({
        "destinations": destinations,
        "mixin": options.mixin.unwrap_or(DEFAULT_MIXIN),
        "unlock_time": options.unlock_time.unwrap_or(0),
        "payment_id": options.payment_id.as_deref(),
        "do_not_relay": options.do_not_relay.unwrap_or(false),
        "priority": options.priority.unwrap_or(priority::DEFAULT),
        "get_tx_hex": options.get_tx_hex.unwrap_or(false),
        "get_tx_key": options.get_tx_key.unwrap_or(false),
    });
    if method == TransferMethod::TransferSplit {
        params["new_algorithm"] = json!(options.new_algorithm.unwrap_or(false));
    }

    RpcRequest::new(method.method_name(), Some(params))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dest(amount: f64) -> Destination {
        Destination::new("SaLv1234...", amount)
    }

    #[test]
    fn test_envelope_constants() {
        let req = RpcRequest::new("getheight", None);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["jsonrpc"], "2.0");
        assert_eq!(json["id"], "0");
        assert_eq!(json["method"], "getheight");
    }

    #[test]
    fn test_params_absent_when_none() {
        let req = RpcRequest::new("store", None);
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("params").is_none());
    }

    #[test]
    fn test_transfer_defaults() {
        let req = transfer(TransferMethod::Transfer, &TransferOptions::new(dest(1.0)));
        let params = req.params.unwrap();
        assert_eq!(params["mixin"], 4);
        assert_eq!(params["unlock_time"], 0);
        assert!(params["payment_id"].is_null());
        assert_eq!(params["do_not_relay"], false);
        assert_eq!(params["priority"], 0);
        assert_eq!(params["get_tx_hex"], false);
        assert_eq!(params["get_tx_key"], false);
    }

    #[test]
    fn test_explicit_zero_not_overwritten() {
        let options = TransferOptions {
            mixin: Some(0),
            unlock_time: Some(0),
            ..TransferOptions::new(dest(1.0))
        };
        let req = transfer(TransferMethod::Transfer, &options);
        let params = req.params.unwrap();
        assert_eq!(params["mixin"], 0);
        assert_eq!(params["unlock_time"], 0);
    }

    #[test]
    fn test_single_destination_wrapped() {
        let req = transfer(TransferMethod::Transfer, &TransferOptions::new(dest(2.0)));
        let params = req.params.unwrap();
        let dests = params["destinations"].as_array().unwrap();
        assert_eq!(dests.len(), 1);
        assert_eq!(dests[0]["address"], "SaLv1234...");
    }

    #[test]
    fn test_destination_order_preserved() {
        let many = vec![
            Destination::new("SaLvA...", 1.0),
            Destination::new("SaLvB...", 2.0),
            Destination::new("SaLvC...", 3.0),
        ];
        let req = transfer(TransferMethod::Transfer, &TransferOptions::new(many));
        let params = req.params.unwrap();
        let dests = params["destinations"].as_array().unwrap();
        assert_eq!(dests[0]["address"], "SaLvA...");
        assert_eq!(dests[1]["address"], "SaLvB...");
        assert_eq!(dests[2]["address"], "SaLvC...");
    }

    #[test]
    fn test_amount_converted_to_atomic_once() {
        let req = transfer(TransferMethod::Transfer, &TransferOptions::new(dest(1.5)));
        let params = req.params.unwrap();
        assert_eq!(params["destinations"][0]["amount"], 150_000_000u64);
    }

    #[test]
    fn test_new_algorithm_only_on_split() {
        let plain = transfer(
            TransferMethod::Transfer,
            &TransferOptions {
                new_algorithm: Some(true),
                ..TransferOptions::new(dest(1.0))
            },
        );
        assert!(plain.params.unwrap().get("new_algorithm").is_none());

        let split = transfer(TransferMethod::TransferSplit, &TransferOptions::new(dest(1.0)));
        assert_eq!(split.params.unwrap()["new_algorithm"], false);

        let split_new = transfer(
            TransferMethod::TransferSplit,
            &TransferOptions {
                new_algorithm: Some(true),
                ..TransferOptions::new(dest(1.0))
            },
        );
        assert_eq!(split_new.params.unwrap()["new_algorithm"], true);
    }

    #[test]
    fn test_payment_id_passed_through() {
        let options = TransferOptions {
            payment_id: Some("deadbeef".to_string()),
            ..TransferOptions::new(dest(1.0))
        };
        let req = transfer(TransferMethod::Transfer, &options);
        assert_eq!(req.params.unwrap()["payment_id"], "deadbeef");
    }

    #[test]
    fn test_empty_destinations_still_builds() {
        let req = transfer(TransferMethod::Transfer, &TransferOptions::default());
        let params = req.params.unwrap();
        assert_eq!(params["destinations"].as_array().unwrap().len(), 0);
        assert_eq!(params["mixin"], 4);
    }
}
