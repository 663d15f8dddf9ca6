//! Gmail API client for finding invoice emails.
//!
//! A stateless wrapper around the Gmail REST API that searches an inbox
//! for emails that look like invoices, receipts, or bills and extracts a
//! dollar amount from their subject lines where possible.

use std::sync::OnceLock;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Default production API URL.
const GMAIL_PRODUCTION_URL: &str = "https://gmail.googleapis.com/gmail/v1";

/// The fixed search query used to find invoice-like emails.
const INVOICE_SEARCH_QUERY: &str =
    "subject:(invoice OR receipt OR bill) OR body:(invoice OR receipt OR bill)";

/// An email matched by the invoice search, with the amount extracted from
/// its subject line where one was found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailInvoice {
    /// The Gmail message ID.
    pub id: String,
    /// The subject line, or the empty string when the header is absent.
    pub subject: String,
    /// The From header, or the empty string when absent.
    pub sender: String,
    /// The Date header, or the empty string when absent.
    pub date: String,
    /// Gmail's short preview of the message body.
    pub snippet: String,
    /// The first dollar amount found in the subject line, if any.
    pub amount: Option<f64>,
    /// An ISO-4217-like currency code; always "USD" for now.
    pub currency: String,
}

/// The response shape of `GET /users/me/messages`.
#[derive(Debug, Deserialize)]
struct MessageListResponse {
    #[serde(default)]
    messages: Vec<MessageRef>,
}

#[derive(Debug, Deserialize)]
struct MessageRef {
    id: String,
}

/// The response shape of `GET /users/me/messages/{id}`.
#[derive(Debug, Deserialize)]
struct Message {
    id: String,
    #[serde(default)]
    snippet: String,
    payload: Option<MessagePayload>,
}

#[derive(Debug, Deserialize)]
struct MessagePayload {
    #[serde(default)]
    headers: Vec<MessageHeader>,
    body: Option<MessageBody>,
    #[serde(default)]
    parts: Vec<MessagePart>,
}

#[derive(Debug, Deserialize)]
struct MessageHeader {
    name: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    data: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessagePart {
    #[serde(rename = "mimeType")]
    mime_type: Option<String>,
    body: Option<MessageBody>,
}

/// Gmail API client.
#[derive(Debug, Clone)]
pub struct GmailClient {
    client: reqwest::Client,
    access_token: String,
    base_url: String,
}

impl GmailClient {
    /// Create a client for the production Gmail API using an OAuth access
    /// token.
    pub fn new(access_token: &str) -> Self {
        Self::with_base_url(access_token, GMAIL_PRODUCTION_URL)
    }

    /// Create a client with a custom base URL, e.g. a mock server in tests.
    pub fn with_base_url(access_token: &str, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_token: access_token.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Search the inbox for invoice-like emails and return up to
    /// `max_results` of them, newest first as Gmail orders them.
    ///
    /// Each match costs one extra request to fetch the message's headers
    /// and snippet.
    ///
    /// # Errors
    /// Any network failure or non-success status is logged and returned as
    /// [Error::UpstreamFailure]; the original status code is not
    /// propagated.
    pub async fn get_invoices(&self, max_results: u32) -> Result<Vec<EmailInvoice>, Error> {
        let url = format!("{}/users/me/messages", self.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[
                ("q", INVOICE_SEARCH_QUERY),
                ("maxResults", &max_results.to_string()),
            ])
            .send()
            .await
            .map_err(|error| upstream_error("searching Gmail messages", error))?;
        let response = check_status("searching Gmail messages", response)?;

        let message_list: MessageListResponse = response
            .json()
            .await
            .map_err(|error| upstream_error("parsing Gmail message list", error))?;

        let mut invoices = Vec::with_capacity(message_list.messages.len());
        for message_ref in message_list.messages {
            let message = self.get_message(&message_ref.id).await?;
            invoices.push(map_message(message));
        }

        Ok(invoices)
    }

    /// Fetch the decoded plain-text body of a message.
    ///
    /// Failures are logged and swallowed: the caller gets an empty string
    /// rather than an error, since a missing body should not abort a
    /// multi-message import.
    pub async fn get_message_content(&self, message_id: &str) -> String {
        match self.get_message(message_id).await {
            Ok(message) => extract_body(&message),
            Err(_) => String::new(),
        }
    }

    async fn get_message(&self, message_id: &str) -> Result<Message, Error> {
        let url = format!("{}/users/me/messages/{}", self.base_url, message_id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|error| upstream_error("fetching Gmail message", error))?;
        let response = check_status("fetching Gmail message", response)?;

        response
            .json()
            .await
            .map_err(|error| upstream_error("parsing Gmail message", error))
    }
}

/// Map a raw Gmail message to an [EmailInvoice].
fn map_message(message: Message) -> EmailInvoice {
    let subject = find_header(&message, "Subject");
    let amount = extract_amount(&subject);

    EmailInvoice {
        sender: find_header(&message, "From"),
        date: find_header(&message, "Date"),
        id: message.id,
        snippet: message.snippet,
        subject,
        amount,
        currency: "USD".to_string(),
    }
}

fn find_header(message: &Message, name: &str) -> String {
    message
        .payload
        .as_ref()
        .and_then(|payload| {
            payload
                .headers
                .iter()
                .find(|header| header.name == name)
                .map(|header| header.value.clone())
        })
        .unwrap_or_default()
}

/// Extract the first dollar amount from a subject line.
///
/// Matches an optional dollar sign followed by digits and an optional
/// two-digit decimal part, e.g. "$45.67" or "120". The pattern is applied
/// left to right, so a bare number such as an invoice ID matches before a
/// dollar amount appearing later in the subject.
fn extract_amount(subject: &str) -> Option<f64> {
    static AMOUNT_PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = AMOUNT_PATTERN
        .get_or_init(|| Regex::new(r"\$?(\d+(?:\.\d{2})?)").expect("invalid amount pattern"));

    pattern
        .captures(subject)
        .and_then(|captures| captures.get(1))
        .and_then(|amount| amount.as_str().parse().ok())
}

/// Extract the plain-text body of a message, preferring the top-level body
/// and falling back to the first `text/plain` part of a multipart message
/// that carries body data.
fn extract_body(message: &Message) -> String {
    let Some(payload) = &message.payload else {
        return String::new();
    };

    if let Some(data) = payload.body.as_ref().and_then(|body| body.data.as_ref()) {
        return decode_body(data);
    }

    // A text/plain part without body data does not count; keep scanning.
    payload
        .parts
        .iter()
        .filter(|part| part.mime_type.as_deref() == Some("text/plain"))
        .find_map(|part| part.body.as_ref().and_then(|body| body.data.as_ref()))
        .map(|data| decode_body(data))
        .unwrap_or_default()
}

/// Decode Gmail's base64url-encoded body data, tolerating both padded and
/// unpadded input. Undecodable data is logged and becomes an empty string.
fn decode_body(data: &str) -> String {
    match URL_SAFE_NO_PAD.decode(data.trim_end_matches('=')) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(error) => {
            tracing::warn!("could not decode Gmail message body: {error}");
            String::new()
        }
    }
}

fn upstream_error(context: &str, error: reqwest::Error) -> Error {
    tracing::error!("error {context}: {error}");
    Error::UpstreamFailure("Gmail".to_string())
}

fn check_status(context: &str, response: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        tracing::error!("error {context}: HTTP {status}");
        Err(Error::UpstreamFailure("Gmail".to_string()))
    }
}
