use std::io::{Read, Write};
use std::net::TcpListener;

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::error::Error;

const AUTH_URL: &str = "https://myanimelist.net/v1/oauth2/authorize";
const TOKEN_URL: &str = "https://myanimelist.net/v1/oauth2/token";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    #[allow(dead_code)]
    token_type: Option<String>,
}

/// The credential backing an [`Authenticator`].
#[derive(Debug, Clone)]
enum Credential {
    /// Pre-issued token supplied by the caller. Cannot be refreshed.
    Static { access_token: String },

    /// Client credential pair with a refresh token that can mint new
    /// access tokens. The access token may be absent until the first
    /// refresh; the refresh token is always present.
    Refreshable {
        client_id: String,
        client_secret: Option<String>,
        refresh_token: String,
        access_token: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    },
}

/// Holds the OAuth bearer token used for every API request.
///
/// Refresh is caller-triggered only: nothing here watches the expiry or
/// retries a 401. Detect an invalid-auth response, call [`refresh`], and
/// re-issue the query.
///
/// [`refresh`]: Authenticator::refresh
pub struct Authenticator {
    credential: Credential,
    http: Client,
    token_url: String,
}

impl Authenticator {
    /// Create an authenticator around a pre-issued OAuth token.
    pub fn with_token(access_token: impl Into<String>) -> Self {
        Self {
            credential: Credential::Static {
                access_token: access_token.into(),
            },
            http: Client::new(),
            token_url: TOKEN_URL.to_string(),
        }
    }

    /// Create a refreshable authenticator from a client credential pair and
    /// a previously obtained refresh token. No access token is held until
    /// [`refresh`](Authenticator::refresh) is called.
    pub fn refreshable(
        client_id: impl Into<String>,
        client_secret: Option<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            credential: Credential::Refreshable {
                client_id: client_id.into(),
                client_secret,
                refresh_token: refresh_token.into(),
                access_token: None,
                expires_at: None,
            },
            http: Client::new(),
            token_url: TOKEN_URL.to_string(),
        }
    }

    /// Run the full OAuth2 authorization-code flow with plain PKCE.
    ///
    /// 1. Generate a PKCE verifier (MAL requires the `plain` method).
    /// 2. Open the browser to the MAL consent page.
    /// 3. Listen on `localhost:{port}` for the redirect with `?code=...`.
    /// 4. Exchange the code for tokens.
    ///
    /// Returns an authenticator holding the issued tokens, refreshable from
    /// then on.
    pub async fn authorize(
        client_id: impl Into<String>,
        client_secret: Option<String>,
        port: u16,
    ) -> Result<Self, Error> {
        let client_id = client_id.into();
        let verifier = generate_verifier();
        let redirect_uri = format!("http://localhost:{port}");

        // MAL uses plain PKCE: challenge == verifier.
        let auth_url = format!(
            "{AUTH_URL}?response_type=code\
             &client_id={client_id}\
             &code_challenge={verifier}\
             &code_challenge_method=plain\
             &redirect_uri={redirect_uri}"
        );

        tracing::info!("Opening MAL authorization URL in browser");
        open::that(&auth_url)
            .map_err(|e| Error::InvalidAuth(format!("failed to open browser: {e}")))?;

        let code = listen_for_redirect(port)?;

        let http = Client::new();
        let mut form: Vec<(&str, &str)> = vec![
            ("client_id", client_id.as_str()),
            ("grant_type", "authorization_code"),
            ("code", code.as_str()),
            ("code_verifier", verifier.as_str()),
            ("redirect_uri", redirect_uri.as_str()),
        ];
        if let Some(secret) = client_secret.as_deref() {
            form.push(("client_secret", secret));
        }

        let resp = http
            .post(TOKEN_URL)
            .form(&form)
            .send()
            .await
            .map_err(|e| Error::InvalidAuth(format!("token endpoint unreachable: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::InvalidAuth(format!(
                "token exchange failed (status {status}): {body}"
            )));
        }

        let token: TokenResponse = resp
            .json()
            .await
            .map_err(|e| Error::InvalidAuth(format!("malformed token response: {e}")))?;

        let refresh_token = token
            .refresh_token
            .ok_or_else(|| Error::InvalidAuth("token response carried no refresh token".into()))?;

        Ok(Self {
            credential: Credential::Refreshable {
                client_id,
                client_secret,
                refresh_token,
                access_token: Some(token.access_token),
                expires_at: expiry_from(token.expires_in),
            },
            http,
            token_url: TOKEN_URL.to_string(),
        })
    }

    /// Override the token endpoint. Used by tests to point refreshes at a
    /// mock server.
    pub fn token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// The bearer token to use for the next request.
    ///
    /// Fails with [`Error::InvalidAuth`] for a refreshable credential that
    /// has not been refreshed yet.
    pub fn current_token(&self) -> Result<&str, Error> {
        match &self.credential {
            Credential::Static { access_token } => Ok(access_token),
            Credential::Refreshable { access_token, .. } => access_token
                .as_deref()
                .ok_or_else(|| Error::InvalidAuth("no access token issued yet; call refresh".into())),
        }
    }

    /// When the current access token expires, if known.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        match &self.credential {
            Credential::Static { .. } => None,
            Credential::Refreshable { expires_at, .. } => *expires_at,
        }
    }

    pub fn is_refreshable(&self) -> bool {
        matches!(self.credential, Credential::Refreshable { .. })
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// A no-op for a static credential. On failure the previously held
    /// access token remains usable; nothing is cleared.
    pub async fn refresh(&mut self) -> Result<(), Error> {
        let Credential::Refreshable {
            client_id,
            client_secret,
            refresh_token,
            ..
        } = &self.credential
        else {
            return Ok(());
        };

        let mut form: Vec<(&str, &str)> = vec![
            ("client_id", client_id.as_str()),
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token.as_str()),
        ];
        if let Some(secret) = client_secret.as_deref() {
            form.push(("client_secret", secret));
        }

        let resp = self
            .http
            .post(self.token_url.as_str())
            .form(&form)
            .send()
            .await
            .map_err(|e| Error::AuthRefreshFailed(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status, "token refresh rejected");
            return Err(Error::AuthRefreshFailed(format!(
                "token endpoint returned status {status}: {body}"
            )));
        }

        let token: TokenResponse = resp
            .json()
            .await
            .map_err(|e| Error::AuthRefreshFailed(format!("malformed token response: {e}")))?;

        if let Credential::Refreshable {
            refresh_token,
            access_token,
            expires_at,
            ..
        } = &mut self.credential
        {
            *access_token = Some(token.access_token);
            *expires_at = expiry_from(token.expires_in);
            // MAL rotates refresh tokens; keep the newest one.
            if let Some(rotated) = token.refresh_token {
                *refresh_token = rotated;
            }
        }

        tracing::info!("access token refreshed");
        Ok(())
    }
}

fn expiry_from(expires_in: Option<i64>) -> Option<DateTime<Utc>> {
    expires_in.map(|secs| Utc::now() + Duration::seconds(secs))
}

// ── Internals ───────────────────────────────────────────────────

/// Generate a random 128-character URL-safe PKCE verifier.
fn generate_verifier() -> String {
    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};

    // Generate enough randomness from multiple hashers.
    let mut out = String::with_capacity(128);
    const CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~";
    while out.len() < 128 {
        let s = RandomState::new();
        let mut h = s.build_hasher();
        h.write_usize(out.len());
        let val = h.finish();
        for byte in val.to_le_bytes() {
            if out.len() < 128 {
                out.push(CHARS[(byte as usize) % CHARS.len()] as char);
            }
        }
    }
    out
}

/// Spawn a one-shot TCP listener, wait for the OAuth redirect, extract the
/// `code` query parameter, and return it.
fn listen_for_redirect(port: u16) -> Result<String, Error> {
    let listener = TcpListener::bind(("127.0.0.1", port))
        .map_err(|e| Error::InvalidAuth(format!("failed to bind localhost:{port}: {e}")))?;

    tracing::info!(port, "Waiting for MAL OAuth redirect...");

    let (mut stream, _) = listener
        .accept()
        .map_err(|e| Error::InvalidAuth(format!("failed to accept connection: {e}")))?;

    let mut buf = [0u8; 4096];
    let n = stream
        .read(&mut buf)
        .map_err(|e| Error::InvalidAuth(format!("failed to read from stream: {e}")))?;
    let request = String::from_utf8_lossy(&buf[..n]);

    // Extract the path from the HTTP request line: "GET /?code=... HTTP/1.1"
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .ok_or_else(|| Error::InvalidAuth("malformed HTTP request from redirect".into()))?;

    let full_url = format!("http://localhost{path}");
    let parsed = Url::parse(&full_url)
        .map_err(|e| Error::InvalidAuth(format!("failed to parse redirect URL: {e}")))?;

    let code = parsed
        .query_pairs()
        .find(|(k, _)| k == "code")
        .map(|(_, v)| v.to_string())
        .ok_or_else(|| Error::InvalidAuth("no 'code' parameter in redirect".into()))?;

    let response = "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\n\r\n\
                    <html><body><h2>Authorization successful!</h2>\
                    <p>You can close this tab.</p></body></html>";
    let _ = stream.write_all(response.as_bytes());

    Ok(code)
}
