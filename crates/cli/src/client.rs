use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use moodlog_core::{EntryRecord, UserRecord, WeeklySummary};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub user: UserRecord,
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Analysis {
    pub sentiment: moodlog_core::Sentiment,
    pub summary: String,
    pub suggestion: String,
}

/// Fields for `PUT /entries`; unset fields are left out of the body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EntryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: UserRecord,
}

#[derive(Deserialize)]
struct EntryEnvelope {
    entry: EntryRecord,
}

#[derive(Deserialize)]
struct EntriesEnvelope {
    entries: Vec<EntryRecord>,
}

#[derive(Deserialize)]
struct DeleteAllResponse {
    #[serde(default)]
    deleted: u64,
}

#[derive(Debug, Clone)]
pub struct JournalClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl JournalClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(6))
            .timeout(Duration::from_secs(20))
            .build()
            .context("failed building http client")?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let request = self
            .request(Method::POST, "/auth?action=register")
            .json(&json!({ "email": email, "password": password }));
        decode(request.send().await?).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let request = self
            .request(Method::POST, "/auth?action=login")
            .json(&json!({ "email": email, "password": password }));
        decode(request.send().await?).await
    }

    pub async fn me(&self) -> Result<UserRecord> {
        let request = self.authed(Method::GET, "/auth?action=me")?;
        let envelope: UserEnvelope = decode(request.send().await?).await?;
        Ok(envelope.user)
    }

    pub async fn list_entries(&self) -> Result<Vec<EntryRecord>> {
        let request = self.authed(Method::GET, "/entries")?;
        let envelope: EntriesEnvelope = decode(request.send().await?).await?;
        Ok(envelope.entries)
    }

    pub async fn create_entry(&self, analysis: &Analysis, content: &str) -> Result<EntryRecord> {
        let request = self.authed(Method::POST, "/entries")?.json(&json!({
            "content": content,
            "sentiment": analysis.sentiment,
            "summary": analysis.summary,
            "suggestion": analysis.suggestion,
        }));
        let envelope: EntryEnvelope = decode(request.send().await?).await?;
        Ok(envelope.entry)
    }

    pub async fn update_entry(&self, id: i64, update: &EntryUpdate) -> Result<EntryRecord> {
        let request = self
            .authed(Method::PUT, &format!("/entries?id={id}"))?
            .json(update);
        let envelope: EntryEnvelope = decode(request.send().await?).await?;
        Ok(envelope.entry)
    }

    pub async fn delete_entry(&self, id: i64) -> Result<()> {
        let request = self.authed(Method::DELETE, &format!("/entries?id={id}"))?;
        let _: Value = decode(request.send().await?).await?;
        Ok(())
    }

    pub async fn delete_all_entries(&self) -> Result<u64> {
        let request = self.authed(Method::DELETE, "/entries?all=true")?;
        let response: DeleteAllResponse = decode(request.send().await?).await?;
        Ok(response.deleted)
    }

    pub async fn weekly(&self) -> Result<WeeklySummary> {
        let request = self.authed(Method::GET, "/weekly")?;
        decode(request.send().await?).await
    }

    pub async fn analyze(&self, text: &str) -> Result<Analysis> {
        let request = self
            .authed(Method::POST, "/analyze")?
            .json(&json!({ "text": text }));
        decode(request.send().await?).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| anyhow!("not signed in"))?;
        Ok(self.request(method, path).bearer_auth(token))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await.context("failed reading response body")?;
    if !status.is_success() {
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|value| value.get("error").and_then(Value::as_str).map(str::to_string))
            .unwrap_or(body);
        bail!("{} ({})", message, status.as_u16());
    }
    serde_json::from_str(&body).with_context(|| format!("unexpected response body: {body}"))
}
