//! Webhook report sink.
//!
//! Posts report documents as embed payloads to a configured webhook URL.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Serialize;

use crate::error::Result;
use crate::report::{ReportDocument, ReportSink};

#[derive(Serialize)]
struct WebhookPayload<'a> {
    username: &'a str,
    embeds: [Embed<'a>; 1],
}

#[derive(Serialize)]
struct Embed<'a> {
    title: &'a str,
    color: u32,
    fields: Vec<EmbedField<'a>>,
    timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    footer: Option<EmbedFooter<'a>>,
}

#[derive(Serialize)]
struct EmbedField<'a> {
    name: &'a str,
    value: &'a str,
    inline: bool,
}

#[derive(Serialize)]
struct EmbedFooter<'a> {
    text: &'a str,
}

/// Report sink posting embed payloads over HTTP.
pub struct WebhookSink {
    http: HttpClient,
    url: String,
    username: String,
}

impl WebhookSink {
    #[must_use]
    pub fn new(url: String, username: String) -> Self {
        Self {
            http: HttpClient::new(),
            url,
            username,
        }
    }
}

#[async_trait]
impl ReportSink for WebhookSink {
    async fn post(&self, document: &ReportDocument) -> Result<()> {
        let payload = WebhookPayload {
            username: &self.username,
            embeds: [Embed {
                title: &document.title,
                color: document.color,
                fields: document
                    .fields
                    .iter()
                    .map(|field| EmbedField {
                        name: &field.name,
                        value: &field.value,
                        inline: false,
                    })
                    .collect(),
                timestamp: document.timestamp.to_rfc3339(),
                footer: document.footer.as_deref().map(|text| EmbedFooter { text }),
            }],
        };

        self.http
            .post(&self.url)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
