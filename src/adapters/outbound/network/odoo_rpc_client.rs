use crate::shared::error::BomError;
use crate::shared::Result;
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

/// `search_read` access to Odoo models
///
/// [`OdooRpcClient`] is the wire implementation; the catalog only needs this.
pub trait SearchRead {
    /// Returns the rows of `model` matching `domain` as a JSON array
    fn search_read_rows(&self, model: &str, domain: Value, fields: &[&str]) -> Result<Value>;

    /// Runs `search_read` on `model` and decodes each row into `T`
    fn search_read<T: DeserializeOwned>(
        &self,
        model: &str,
        domain: Value,
        fields: &[&str],
    ) -> Result<Vec<T>> {
        let rows = self.search_read_rows(model, domain, fields)?;
        serde_json::from_value(rows)
            .with_context(|| format!("Unexpected search_read result for model '{}'", model))
    }
}

impl<S: SearchRead + ?Sized> SearchRead for &S {
    fn search_read_rows(&self, model: &str, domain: Value, fields: &[&str]) -> Result<Value> {
        (**self).search_read_rows(model, domain, fields)
    }
}

/// Base delay between retries; attempt `n` waits `n` times this
const RETRY_BACKOFF_MS: u64 = 250;

/// Connection parameters for one Odoo database
#[derive(Clone)]
pub struct OdooConnection {
    pub url: String,
    pub db: String,
    pub username: String,
    pub api_key: String,
    /// Locale sent in every read context (names come back translated)
    pub lang: String,
    pub timeout: Duration,
    /// Attempts per call, including the first one
    pub max_retries: u32,
}

impl fmt::Debug for OdooConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OdooConnection")
            .field("url", &self.url)
            .field("db", &self.db)
            .field("username", &self.username)
            .field("api_key", &"<redacted>")
            .field("lang", &self.lang)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

/// Odoo sends `false` for unset scalar and many2one fields
#[derive(Deserialize)]
#[serde(untagged)]
enum Falsy<T> {
    Set(T),
    Unset(#[allow(dead_code)] bool),
}

/// Deserializes an Odoo field where `false` (or a missing key) means "no value"
pub(super) fn falsy<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<Falsy<T>>::deserialize(deserializer)? {
        Some(Falsy::Set(value)) => Some(value),
        _ => None,
    })
}

#[derive(Debug, Deserialize)]
struct RpcEnvelope {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcFault>,
}

#[derive(Debug, Deserialize)]
struct RpcFault {
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Option<RpcFaultData>,
}

#[derive(Debug, Deserialize)]
struct RpcFaultData {
    #[serde(default)]
    name: String,
    #[serde(default)]
    message: String,
}

impl RpcFault {
    fn describe(&self) -> String {
        match &self.data {
            Some(data) if !data.message.is_empty() => {
                format!("{}: {} ({})", self.message, data.message, data.name)
            }
            _ => self.message.clone(),
        }
    }
}

/// OdooRpcClient - blocking client for Odoo's JSON-RPC endpoint
///
/// Authenticates once on construction; every later call reuses the uid.
/// Transport failures are retried with a linear back-off, server-side
/// faults are not.
pub struct OdooRpcClient {
    client: reqwest::blocking::Client,
    endpoint: String,
    db: String,
    uid: i64,
    api_key: String,
    lang: String,
    max_retries: u32,
    next_id: AtomicU64,
}

impl OdooRpcClient {
    /// Connects and authenticates
    ///
    /// # Errors
    /// - [`BomError::ConfigError`] for a URL that is not http(s)
    /// - [`BomError::AuthenticationFailure`] when Odoo rejects the credentials
    /// - Transport errors once the retries are exhausted
    pub fn connect(connection: &OdooConnection) -> Result<Self> {
        let base_url = connection.url.trim_end_matches('/');
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(BomError::ConfigError {
                message: format!("Odoo URL must start with http:// or https://, got '{}'", connection.url),
            }
            .into());
        }

        let user_agent = format!("odoo-bom/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::blocking::Client::builder()
            .timeout(connection.timeout)
            .user_agent(user_agent)
            .build()?;

        let mut rpc = Self {
            client,
            endpoint: format!("{}/jsonrpc", base_url),
            db: connection.db.clone(),
            uid: 0,
            api_key: connection.api_key.clone(),
            lang: connection.lang.clone(),
            max_retries: connection.max_retries.max(1),
            next_id: AtomicU64::new(1),
        };

        let result = rpc
            .call(
                "common",
                "authenticate",
                json!([connection.db, connection.username, connection.api_key, {}]),
            )
            .with_context(|| format!("Failed to connect to Odoo at {}", base_url))?;

        rpc.uid = parse_uid(&result).ok_or_else(|| BomError::AuthenticationFailure {
            url: base_url.to_string(),
            db: connection.db.clone(),
            username: connection.username.clone(),
        })?;

        Ok(rpc)
    }

    /// The authenticated user id
    pub fn uid(&self) -> i64 {
        self.uid
    }

    fn call(&self, service: &str, method: &str, args: Value) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = build_call(id, service, method, args);
        let envelope = self.post_with_retry(&body)?;
        into_result(envelope, &format!("{}.{}", service, method))
    }

    fn post_with_retry(&self, body: &Value) -> Result<RpcEnvelope> {
        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            match self.post(body) {
                Ok(envelope) => return Ok(envelope),
                Err(e) => {
                    last_error = Some(e);
                    if attempt < self.max_retries {
                        thread::sleep(Duration::from_millis(RETRY_BACKOFF_MS * attempt as u64));
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("No request attempted")))
    }

    fn post(&self, body: &Value) -> Result<RpcEnvelope> {
        let response = self.client.post(&self.endpoint).json(body).send()?;

        if !response.status().is_success() {
            anyhow::bail!("Odoo returned HTTP status {}", response.status());
        }

        Ok(response.json()?)
    }
}

impl SearchRead for OdooRpcClient {
    fn search_read_rows(&self, model: &str, domain: Value, fields: &[&str]) -> Result<Value> {
        self.call(
            "object",
            "execute_kw",
            json!([
                self.db,
                self.uid,
                self.api_key,
                model,
                "search_read",
                [domain],
                { "fields": fields, "context": { "lang": self.lang } }
            ]),
        )
    }
}

fn build_call(id: u64, service: &str, method: &str, args: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "method": "call",
        "params": { "service": service, "method": method, "args": args },
        "id": id,
    })
}

fn into_result(envelope: RpcEnvelope, method: &str) -> Result<Value> {
    if let Some(fault) = envelope.error {
        return Err(BomError::RpcError {
            method: method.to_string(),
            details: fault.describe(),
        }
        .into());
    }
    Ok(envelope.result.unwrap_or(Value::Null))
}

/// `authenticate` answers with the uid, or `false` on rejected credentials
fn parse_uid(result: &Value) -> Option<i64> {
    result.as_i64().filter(|uid| *uid > 0)
}
