// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session-based client for the GLPI REST API.

use std::time::Duration;

use async_trait::async_trait;
use kbminer_config::model::GlpiConfig;
use kbminer_core::{CreatedArticle, KbError, KnowledgeBase, SessionToken};
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::{debug, info, warn};

use crate::types::{CreateRequest, CreatedResponse, InitSessionResponse, KnowbaseItemInput};

const APP_TOKEN_HEADER: &str = "app-token";
const SESSION_TOKEN_HEADER: &str = "session-token";

/// Attribution appended to every generated article body.
pub fn attribution_footer(source_ticket_id: i64) -> String {
    format!(
        "<br><hr><p style='font-size: small; color: gray;'><i>Article generated automatically by AI from ticket #{source_ticket_id}.</i></p>"
    )
}

/// GLPI REST API client.
///
/// Holds no session state itself; the token returned by
/// [`init_session`](KnowledgeBase::init_session) is passed back on each call.
#[derive(Debug, Clone)]
pub struct GlpiClient {
    client: reqwest::Client,
    /// Unset until configured; login then fails like a rejected token.
    base_url: Option<String>,
    app_token: Option<String>,
    user_token: Option<String>,
}

impl GlpiClient {
    /// Build a client from the `[glpi]` section.
    ///
    /// A missing base URL is reported by [`init_session`](KnowledgeBase::init_session),
    /// so a pass with nothing new never needs one.
    pub fn new(config: &GlpiConfig) -> Result<Self, KbError> {
        let base_url = config
            .url
            .as_deref()
            .map(|u| u.trim_end_matches('/').to_string());

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| KbError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            app_token: config.app_token.clone(),
            user_token: config.user_token.clone(),
        })
    }

    fn endpoint(&self, name: &str) -> Option<String> {
        self.base_url.as_ref().map(|base| format!("{base}/{name}"))
    }

    fn session_endpoint(&self, name: &str) -> Result<String, KbError> {
        self.endpoint(name).ok_or_else(|| KbError::KnowledgeBase {
            message: "glpi.url is not set".into(),
            source: None,
        })
    }

    fn app_headers(&self) -> Result<HeaderMap, KbError> {
        let mut headers = HeaderMap::new();
        if let Some(app_token) = &self.app_token {
            headers.insert(APP_TOKEN_HEADER, header_value(app_token)?);
        }
        Ok(headers)
    }

    fn session_headers(&self, session: &SessionToken) -> Result<HeaderMap, KbError> {
        let mut headers = self.app_headers()?;
        headers.insert(SESSION_TOKEN_HEADER, header_value(session.expose())?);
        Ok(headers)
    }

    /// Remove configured credentials and token-shaped strings from `text`.
    fn scrub(&self, text: &str, session: Option<&SessionToken>) -> String {
        let secrets: Vec<&str> = [
            self.app_token.as_deref(),
            self.user_token.as_deref(),
            session.map(SessionToken::expose),
        ]
        .into_iter()
        .flatten()
        .collect();
        kbminer_security::redact(text, &secrets)
    }
}

fn header_value(value: &str) -> Result<HeaderValue, KbError> {
    HeaderValue::from_str(value)
        .map_err(|e| KbError::Config(format!("token is not a valid header value: {e}")))
}

#[async_trait]
impl KnowledgeBase for GlpiClient {
    fn name(&self) -> &str {
        "glpi"
    }

    async fn init_session(&self) -> Result<SessionToken, KbError> {
        let url = self.endpoint("initSession").ok_or_else(|| KbError::Auth {
            message: "glpi.url is not set, cannot open a helpdesk session".into(),
            source: None,
        })?;
        let mut headers = self.app_headers()?;
        if let Some(user_token) = &self.user_token {
            headers.insert(AUTHORIZATION, header_value(&format!("user_token {user_token}"))?);
        }

        let response = self
            .client
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| KbError::Auth {
                message: format!("initSession request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status != StatusCode::OK {
            return Err(KbError::Auth {
                message: format!("initSession returned {status}: {}", self.scrub(&body, None)),
                source: None,
            });
        }

        let parsed: InitSessionResponse =
            serde_json::from_str(&body).map_err(|e| KbError::Auth {
                message: format!("initSession reply has no session_token: {e}"),
                source: Some(Box::new(e)),
            })?;

        let token = SessionToken::new(parsed.session_token);
        info!(token = %token, "helpdesk session opened");
        Ok(token)
    }

    async fn create_article(
        &self,
        session: &SessionToken,
        title: &str,
        content: &str,
        source_ticket_id: i64,
    ) -> Result<CreatedArticle, KbError> {
        let answer = format!("{content}{}", attribution_footer(source_ticket_id));
        let body = CreateRequest {
            input: KnowbaseItemInput::draft(title, answer),
        };

        let response = self
            .client
            .post(self.session_endpoint("KnowbaseItem")?)
            .headers(self.session_headers(session)?)
            .json(&body)
            .send()
            .await
            .map_err(|e| KbError::KnowledgeBase {
                message: format!("KnowbaseItem request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if status != StatusCode::CREATED {
            return Err(KbError::KnowledgeBase {
                message: format!(
                    "KnowbaseItem returned {status}: {}",
                    self.scrub(&text, Some(session))
                ),
                source: None,
            });
        }

        // The article exists once GLPI answers 201, even if the body is odd.
        let id = match serde_json::from_str::<CreatedResponse>(&text) {
            Ok(created) => created.id,
            Err(e) => {
                warn!(error = %e, source_ticket_id, "201 reply without a readable id");
                0
            }
        };
        debug!(article_id = id, source_ticket_id, "knowledge-base article created");
        Ok(CreatedArticle { id })
    }

    async fn kill_session(&self, session: &SessionToken) -> Result<(), KbError> {
        let response = self
            .client
            .get(self.session_endpoint("killSession")?)
            .headers(self.session_headers(session)?)
            .send()
            .await
            .map_err(|e| KbError::KnowledgeBase {
                message: format!("killSession request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(KbError::KnowledgeBase {
                message: format!("killSession returned {status}"),
                source: None,
            });
        }
        debug!("helpdesk session closed");
        Ok(())
    }
}
