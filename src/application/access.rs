//! Editor identity and permissions for the admin surfaces.
//!
//! When editor tokens are configured, requests must present one and the
//! resolved principal carries only the scopes granted to that token. With
//! no tokens configured the admin listener falls back to an implicit local
//! admin holding every scope, mirroring the trust model of a single-author
//! deployment.

use serde::Deserialize;
use subtle::ConstantTimeEq;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorScope {
    EditPosts,
    ManageSettings,
}

impl EditorScope {
    pub fn as_str(self) -> &'static str {
        match self {
            EditorScope::EditPosts => "edit_posts",
            EditorScope::ManageSettings => "manage_settings",
        }
    }
}

#[derive(Debug, Clone)]
pub struct EditorPrincipal {
    pub name: String,
    pub scopes: Vec<EditorScope>,
}

impl EditorPrincipal {
    pub fn can(&self, scope: EditorScope) -> bool {
        self.scopes.contains(&scope)
    }
}

/// One configured editor credential.
#[derive(Debug, Clone)]
pub struct EditorToken {
    pub token: String,
    pub name: String,
    pub scopes: Vec<EditorScope>,
}

#[derive(Clone)]
pub struct AccessService {
    tokens: Vec<EditorToken>,
}

impl AccessService {
    pub fn new(tokens: Vec<EditorToken>) -> Self {
        Self { tokens }
    }

    /// Resolve the principal for a request. `presented` is the raw token
    /// from the request, if any.
    pub fn authenticate(&self, presented: Option<&str>) -> Option<EditorPrincipal> {
        if self.tokens.is_empty() {
            return Some(EditorPrincipal {
                name: "admin".to_string(),
                scopes: vec![EditorScope::EditPosts, EditorScope::ManageSettings],
            });
        }

        let presented = presented?.as_bytes();
        self.tokens
            .iter()
            .find(|candidate| candidate.token.as_bytes().ct_eq(presented).unwrap_u8() == 1)
            .map(|matched| EditorPrincipal {
                name: matched.name.clone(),
                scopes: matched.scopes.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> AccessService {
        AccessService::new(vec![EditorToken {
            token: "tok-editor".to_string(),
            name: "giulia".to_string(),
            scopes: vec![EditorScope::EditPosts],
        }])
    }

    #[test]
    fn no_tokens_means_implicit_local_admin() {
        let access = AccessService::new(Vec::new());
        let principal = access.authenticate(None).expect("implicit admin");
        assert!(principal.can(EditorScope::EditPosts));
        assert!(principal.can(EditorScope::ManageSettings));
    }

    #[test]
    fn configured_tokens_limit_scopes() {
        let access = configured();
        let principal = access.authenticate(Some("tok-editor")).expect("principal");
        assert_eq!(principal.name, "giulia");
        assert!(principal.can(EditorScope::EditPosts));
        assert!(!principal.can(EditorScope::ManageSettings));
    }

    #[test]
    fn wrong_or_missing_token_yields_no_principal() {
        let access = configured();
        assert!(access.authenticate(Some("tok-editor ")).is_none());
        assert!(access.authenticate(Some("other")).is_none());
        assert!(access.authenticate(None).is_none());
    }
}
