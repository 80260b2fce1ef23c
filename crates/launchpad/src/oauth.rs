//! OAuth 1.0 (PLAINTEXT) support
//!
//! Launchpad only speaks the PLAINTEXT signature method. Obtaining access
//! credentials is a three-step, out-of-band handshake:
//!
//! 1. [`Authorizer::request_token`] asks for a request token.
//! 2. The user opens [`Authorizer::authorize_url`] and grants access.
//! 3. [`Authorizer::access_token`] exchanges the request token for
//!    [`Credentials`].

use crate::{Credentials, Error, Result};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(30);

/// Unauthorized request token handed out by `+request-token`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestToken {
    pub token: String,
    pub secret: String,
}

/// Drives the request-token / authorize / access-token handshake
pub struct Authorizer {
    client: Client,
    web_root: String,
    consumer_key: String,
}

impl Authorizer {
    pub fn new(web_root: impl Into<String>, consumer_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(HANDSHAKE_TIMEOUT).build()?;
        Ok(Self {
            client,
            web_root: web_root.into().trim_end_matches('/').to_string(),
            consumer_key: consumer_key.into(),
        })
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    /// Step 1: obtain an unauthorized request token
    pub async fn request_token(&self) -> Result<RequestToken> {
        let url = format!("{}/+request-token", self.web_root);
        debug!(url = %url, consumer = %self.consumer_key, "Requesting OAuth request token");

        let form = [
            ("oauth_consumer_key", self.consumer_key.as_str()),
            ("oauth_signature_method", "PLAINTEXT"),
            ("oauth_signature", "&"),
        ];
        let body = self.post_form(&url, &form).await?;
        let (token, secret) = parse_token_response(&body)?;

        Ok(RequestToken { token, secret })
    }

    /// Step 2: page where the user grants access to the request token
    pub fn authorize_url(&self, request: &RequestToken) -> String {
        format!(
            "{}/+authorize-token?oauth_token={}",
            self.web_root,
            urlencoding::encode(&request.token)
        )
    }

    /// Step 3: exchange an authorized request token for access credentials
    ///
    /// Returns [`Error::Unauthorized`] while the user has not yet granted
    /// access in the browser.
    pub async fn access_token(&self, request: &RequestToken) -> Result<Credentials> {
        let url = format!("{}/+access-token", self.web_root);
        debug!(url = %url, "Exchanging OAuth request token");

        let signature = format!("&{}", request.secret);
        let form = [
            ("oauth_token", request.token.as_str()),
            ("oauth_consumer_key", self.consumer_key.as_str()),
            ("oauth_signature_method", "PLAINTEXT"),
            ("oauth_signature", signature.as_str()),
        ];
        let body = self.post_form(&url, &form).await?;
        let (token, secret) = parse_token_response(&body)?;

        Ok(Credentials::new(self.consumer_key.clone(), token, secret))
    }

    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<String> {
        let response = self.client.post(url).form(form).send().await?;

        match response.status() {
            StatusCode::OK => Ok(response.text().await?),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                let body = response.text().await.unwrap_or_default();
                Err(Error::Unauthorized(body))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(Error::Api {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}

/// Parse `oauth_token=...&oauth_token_secret=...`
fn parse_token_response(body: &str) -> Result<(String, String)> {
    let mut token = None;
    let mut secret = None;

    for pair in body.trim().split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        let value = urlencoding::decode(value)
            .map_err(|e| Error::Credentials(format!("bad token response: {}", e)))?
            .into_owned();
        match key {
            "oauth_token" => token = Some(value),
            "oauth_token_secret" => secret = Some(value),
            _ => {}
        }
    }

    match (token, secret) {
        (Some(token), Some(secret)) => Ok((token, secret)),
        _ => Err(Error::Credentials(format!(
            "token response is missing oauth_token or oauth_token_secret: {}",
            body
        ))),
    }
}

/// `Authorization` header value for a signed PLAINTEXT request
pub(crate) fn authorization_header(credentials: &Credentials, realm: &str) -> String {
    let signature = format!(
        "{}&{}",
        urlencoding::encode(&credentials.consumer_secret),
        urlencoding::encode(&credentials.access_secret)
    );
    let timestamp = chrono::Utc::now().timestamp();

    format!(
        "OAuth realm=\"{}\", oauth_consumer_key=\"{}\", oauth_token=\"{}\", \
         oauth_signature_method=\"PLAINTEXT\", oauth_signature=\"{}\", \
         oauth_timestamp=\"{}\", oauth_nonce=\"{}\", oauth_version=\"1.0\"",
        realm,
        urlencoding::encode(&credentials.consumer_key),
        urlencoding::encode(&credentials.access_token),
        urlencoding::encode(&signature),
        timestamp,
        nonce(),
    )
}

/// Random per-request nonce
fn nonce() -> String {
    Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_response() {
        let (token, secret) =
            parse_token_response("oauth_token=abc&oauth_token_secret=s%2Fecret").unwrap();
        assert_eq!(token, "abc");
        assert_eq!(secret, "s/ecret");
    }

    #[test]
    fn test_parse_token_response_incomplete() {
        assert!(parse_token_response("oauth_token=abc").is_err());
        assert!(parse_token_response("").is_err());
    }

    #[test]
    fn test_authorize_url() {
        let authorizer = Authorizer::new("https://launchpad.net/", "ubuntu-bug-triage").unwrap();
        let request = RequestToken {
            token: "tok en".to_string(),
            secret: "s".to_string(),
        };
        assert_eq!(
            authorizer.authorize_url(&request),
            "https://launchpad.net/+authorize-token?oauth_token=tok%20en"
        );
    }

    #[test]
    fn test_authorization_header_plaintext_signature() {
        let creds = Credentials::new("ubuntu-bug-triage", "tok", "sec");
        let header = authorization_header(&creds, "https://api.launchpad.net/");

        assert!(header.starts_with("OAuth realm=\"https://api.launchpad.net/\""));
        assert!(header.contains("oauth_consumer_key=\"ubuntu-bug-triage\""));
        assert!(header.contains("oauth_token=\"tok\""));
        assert!(header.contains("oauth_signature_method=\"PLAINTEXT\""));
        // "&sec" percent-encoded
        assert!(header.contains("oauth_signature=\"%26sec\""));
    }

    #[test]
    fn test_nonce_is_unique() {
        assert_ne!(nonce(), nonce());
    }

    #[test]
    fn test_nonce_is_random_hex() {
        let n = nonce();
        assert_eq!(n.len(), 32);
        assert!(n.chars().all(|c| c.is_ascii_hexdigit()));
        // Version nibble of a v4 UUID
        assert_eq!(&n[12..13], "4");
    }
}
