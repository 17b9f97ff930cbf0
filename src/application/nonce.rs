//! Per-form anti-forgery tokens.
//!
//! A token binds a surface and a post id to an expiry instant with an
//! HMAC-SHA256 tag. Each editing surface uses its own audience so a token
//! minted for the editor panel does not verify for quick edit.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

const DEFAULT_TTL_SECONDS: i64 = 12 * 60 * 60;

/// The admin surface a token was minted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonceSurface {
    EditorPanel,
    QuickEdit,
    Settings,
}

impl NonceSurface {
    pub fn as_str(self) -> &'static str {
        match self {
            NonceSurface::EditorPanel => "editor-panel",
            NonceSurface::QuickEdit => "quick-edit",
            NonceSurface::Settings => "settings",
        }
    }
}

#[derive(Clone)]
pub struct NonceService {
    secret: Vec<u8>,
    ttl: Duration,
}

impl NonceService {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
            ttl: Duration::seconds(DEFAULT_TTL_SECONDS),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Mint a token for a surface. Post-bound surfaces carry the post id;
    /// the settings form passes `None`.
    pub fn issue(&self, surface: NonceSurface, post_id: Option<Uuid>) -> String {
        let expires = (OffsetDateTime::now_utc() + self.ttl).unix_timestamp();
        let payload = Self::payload(surface, post_id, expires);
        let tag = self.sign(&payload);
        format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(&payload),
            URL_SAFE_NO_PAD.encode(tag)
        )
    }

    /// Verify a submitted token against the expected surface and post.
    ///
    /// Failures are indistinguishable on purpose; the save path treats any
    /// `false` as "drop the request silently".
    pub fn verify(&self, surface: NonceSurface, post_id: Option<Uuid>, token: &str) -> bool {
        let Some((payload_part, tag_part)) = token.split_once('.') else {
            return false;
        };
        let Ok(payload) = URL_SAFE_NO_PAD.decode(payload_part) else {
            return false;
        };
        let Ok(tag) = URL_SAFE_NO_PAD.decode(tag_part) else {
            return false;
        };

        let expected_tag = self.sign(&payload);
        if expected_tag.ct_eq(tag.as_slice()).unwrap_u8() != 1 {
            return false;
        }

        let Ok(payload) = String::from_utf8(payload) else {
            return false;
        };
        let mut parts = payload.splitn(3, ':');
        let (Some(aud), Some(subject), Some(expires)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return false;
        };

        if aud != surface.as_str() || subject != Self::subject(post_id) {
            return false;
        }

        let Ok(expires) = expires.parse::<i64>() else {
            return false;
        };
        OffsetDateTime::now_utc().unix_timestamp() <= expires
    }

    fn payload(surface: NonceSurface, post_id: Option<Uuid>, expires: i64) -> Vec<u8> {
        format!(
            "{}:{}:{}",
            surface.as_str(),
            Self::subject(post_id),
            expires
        )
        .into_bytes()
    }

    fn subject(post_id: Option<Uuid>) -> String {
        match post_id {
            Some(id) => id.to_string(),
            None => "-".to_string(),
        }
    }

    fn sign(&self, payload: &[u8]) -> Vec<u8> {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("hmac accepts any key length");
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}
