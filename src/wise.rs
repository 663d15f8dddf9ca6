//! Wise API client.
//!
//! A stateless wrapper around the Wise transfers API that maps remote
//! transfer records into this system's transaction shape. Nothing persists
//! the results yet; callers receive them and decide what to do.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::Error;

/// Default production API URL.
const WISE_PRODUCTION_URL: &str = "https://api.wise.com";

/// The page size requested from the transfers endpoint.
const TRANSFER_PAGE_LIMIT: u32 = 100;

/// A transfer record from the Wise API, mapped into the local transaction
/// shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WiseTransaction {
    /// The remote transfer ID.
    pub id: i64,
    /// The transfer amount in its source currency.
    pub amount: Money,
    /// The transfer reference, or "Transfer" when the remote field is
    /// absent or empty.
    pub description: String,
    /// The remote creation timestamp, string-encoded.
    pub date: String,
    /// The inferred direction of the transfer.
    #[serde(rename = "type")]
    pub kind: TransferKind,
}

/// An amount of money in a specific currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Money {
    /// The unsigned amount.
    pub value: f64,
    /// An ISO-4217-like currency code.
    pub currency: String,
}

/// The direction inferred from a transfer's status.
///
/// `Income` is never produced by the current mapping: the transfer status
/// alone cannot distinguish direction, so only completed transfers are
/// classified (as expenses) and everything else is left pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferKind {
    /// Money received.
    Income,
    /// Money spent.
    Expense,
    /// The transfer has not completed; direction unknown.
    Pending,
}

/// A raw transfer as returned by `GET /v3/profiles/{id}/transfers`.
#[derive(Debug, Clone, Deserialize)]
struct Transfer {
    id: i64,
    #[serde(rename = "sourceAmount")]
    source_amount: SourceAmount,
    #[serde(default)]
    reference: Option<String>,
    created: String,
    status: String,
}

#[derive(Debug, Clone, Deserialize)]
struct SourceAmount {
    #[serde(deserialize_with = "deserialize_amount")]
    value: f64,
    currency: String,
}

/// Deserialize an amount that the API may send as a number or a string.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let value: JsonValue = Deserialize::deserialize(deserializer)?;
    match value {
        JsonValue::Number(number) => number
            .as_f64()
            .ok_or_else(|| D::Error::custom("amount out of range for f64")),
        JsonValue::String(text) => text
            .parse::<f64>()
            .map_err(|error| D::Error::custom(format!("invalid amount: {error}"))),
        _ => Err(D::Error::custom("expected number or string for amount")),
    }
}

/// Wise API client.
#[derive(Debug, Clone)]
pub struct WiseClient {
    client: reqwest::Client,
    api_token: String,
    base_url: String,
}

impl WiseClient {
    /// Create a client for the production Wise API using a bearer token.
    pub fn new(api_token: &str) -> Self {
        Self::with_base_url(api_token, WISE_PRODUCTION_URL)
    }

    /// Create a client with a custom base URL, e.g. a mock server in tests
    /// or the Wise sandbox.
    pub fn with_base_url(api_token: &str, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_token: api_token.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch a page of up to 100 transfers for a profile and date range,
    /// mapped into [WiseTransaction]s.
    ///
    /// # Errors
    /// Any network failure or non-success status is logged and returned as
    /// [Error::UpstreamFailure]; the original status code is not
    /// propagated. No retries are attempted.
    pub async fn get_transactions(
        &self,
        profile_id: &str,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Vec<WiseTransaction>, Error> {
        let url = format!("{}/v3/profiles/{}/transfers", self.base_url, profile_id);

        let mut request = self
            .client
            .get(&url)
            .bearer_auth(&self.api_token)
            .query(&[("limit", TRANSFER_PAGE_LIMIT.to_string())]);
        if let Some(from) = from {
            request = request.query(&[("from", from)]);
        }
        if let Some(to) = to {
            request = request.query(&[("to", to)]);
        }

        let response = request
            .send()
            .await
            .map_err(|error| upstream_error("fetching Wise transfers", error))?;
        let response = check_status("fetching Wise transfers", response)?;

        let transfers: Vec<Transfer> = response
            .json()
            .await
            .map_err(|error| upstream_error("parsing Wise transfers", error))?;

        Ok(transfers.into_iter().map(map_transfer).collect())
    }

    /// List the profiles available to the API token.
    ///
    /// Returns the provider's raw JSON shape unchanged.
    pub async fn get_profiles(&self) -> Result<Vec<JsonValue>, Error> {
        let url = format!("{}/v1/profiles", self.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|error| upstream_error("fetching Wise profiles", error))?;
        let response = check_status("fetching Wise profiles", response)?;

        response
            .json()
            .await
            .map_err(|error| upstream_error("parsing Wise profiles", error))
    }
}

/// Map a raw transfer to the local transaction shape.
fn map_transfer(transfer: Transfer) -> WiseTransaction {
    let description = transfer
        .reference
        .filter(|reference| !reference.is_empty())
        .unwrap_or_else(|| "Transfer".to_string());

    let kind = if transfer.status == "completed" {
        TransferKind::Expense
    } else {
        TransferKind::Pending
    };

    WiseTransaction {
        id: transfer.id,
        amount: Money {
            value: transfer.source_amount.value,
            currency: transfer.source_amount.currency,
        },
        description,
        date: transfer.created,
        kind,
    }
}

fn upstream_error(context: &str, error: reqwest::Error) -> Error {
    tracing::error!("error {context}: {error}");
    Error::UpstreamFailure("Wise".to_string())
}

fn check_status(context: &str, response: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        tracing::error!("error {context}: HTTP {status}");
        Err(Error::UpstreamFailure("Wise".to_string()))
    }
}

#[cfg(test)]
mod transfer_mapping_tests {
    use super::{SourceAmount, Transfer, TransferKind, map_transfer};

    fn transfer(reference: Option<&str>, status: &str) -> Transfer {
        Transfer {
            id: 42,
            source_amount: SourceAmount {
                value: 12.34,
                currency: "EUR".to_string(),
            },
            reference: reference.map(str::to_string),
            created: "2024-01-15T09:30:00Z".to_string(),
            status: status.to_string(),
        }
    }

    #[test]
    fn maps_amount_date_and_reference() {
        let mapped = map_transfer(transfer(Some("Rent January"), "completed"));

        assert_eq!(mapped.id, 42);
        assert_eq!(mapped.amount.value, 12.34);
        assert_eq!(mapped.amount.currency, "EUR");
        assert_eq!(mapped.description, "Rent January");
        assert_eq!(mapped.date, "2024-01-15T09:30:00Z");
    }

    #[test]
    fn description_falls_back_to_transfer_literal() {
        assert_eq!(map_transfer(transfer(None, "completed")).description, "Transfer");
        assert_eq!(map_transfer(transfer(Some(""), "completed")).description, "Transfer");
    }

    #[test]
    fn completed_transfers_are_classified_as_expense() {
        assert_eq!(
            map_transfer(transfer(None, "completed")).kind,
            TransferKind::Expense
        );
    }

    #[test]
    fn other_statuses_are_left_pending() {
        for status in ["processing", "funds_converted", "cancelled", "incoming_payment_waiting"] {
            assert_eq!(
                map_transfer(transfer(None, status)).kind,
                TransferKind::Pending,
                "status {status} should map to pending"
            );
        }
    }

    #[test]
    fn amount_deserializes_from_string_or_number() {
        let from_string: Transfer = serde_json::from_str(
            r#"{"id": 1, "sourceAmount": {"value": "10.50", "currency": "USD"},
            "created": "2024-01-01", "status": "completed"}"#,
        )
        .unwrap();
        assert_eq!(from_string.source_amount.value, 10.5);

        let from_number: Transfer = serde_json::from_str(
            r#"{"id": 1, "sourceAmount": {"value": 10.5, "currency": "USD"},
            "created": "2024-01-01", "status": "completed"}"#,
        )
        .unwrap();
        assert_eq!(from_number.source_amount.value, 10.5);
    }
}
