//! Session identity and token persistence helpers.
//!
//! # Design
//! - The session is plain data in the store; login, restore and logout are
//!   actions that populate or clear it.
//! - Cookie handling is string-only here so it can be tested without a DOM.

use lectern_api_models::{InstructorInfoRow, UserInfoRow};

/// Name of the cookie mirroring the session token.
pub const TOKEN_COOKIE: &str = "token";

/// Cookie assignment that removes the token cookie.
pub const EXPIRED_COOKIE: &str = "token=; expires=Thu, 01 Jan 1970 00:00:00 GMT; path=/";

/// Identity of a user as the server reports it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserInfo {
    /// User id.
    pub user_id: i64,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Whether the user may author courses.
    pub is_instructor: bool,
    /// Teaching flag, only known for course instructor listings.
    pub is_teaching: Option<bool>,
}

impl UserInfo {
    /// "First Last".
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl From<UserInfoRow> for UserInfo {
    fn from(row: UserInfoRow) -> Self {
        Self {
            user_id: row.user_id,
            first_name: row.first_name,
            last_name: row.last_name,
            is_instructor: row.is_instructor == 1,
            is_teaching: None,
        }
    }
}

impl From<InstructorInfoRow> for UserInfo {
    fn from(row: InstructorInfoRow) -> Self {
        Self {
            user_id: row.user_id,
            first_name: row.first_name,
            last_name: row.last_name,
            is_instructor: true,
            is_teaching: Some(row.is_teaching == 1),
        }
    }
}

/// Authenticated session, empty when logged out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Session token.
    pub token: Option<String>,
    /// User behind the token.
    pub user: Option<UserInfo>,
}

impl SessionState {
    /// Whether a validated session is present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    /// Token and user id, when both are known.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, i64)> {
        Some((self.token.as_deref()?, self.user.as_ref()?.user_id))
    }

    /// Whether the current user is an instructor.
    #[must_use]
    pub fn is_instructor(&self) -> bool {
        self.user.as_ref().is_some_and(|user| user.is_instructor)
    }

    /// Install a validated session.
    pub fn install(&mut self, token: String, user: UserInfo) {
        self.token = Some(token);
        self.user = Some(user);
    }

    /// Drop the session.
    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }
}

/// Extract the session token from a `document.cookie` string.
#[must_use]
pub fn token_from_cookie(cookie: &str) -> Option<String> {
    cookie
        .split(';')
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| name.trim() == TOKEN_COOKIE)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
        .map(|value| {
            urlencoding::decode(value).map_or_else(|_| value.to_string(), |v| v.into_owned())
        })
}

/// Cookie assignment storing `token` for the whole site.
#[must_use]
pub fn session_cookie(token: &str) -> String {
    format!("{TOKEN_COOKIE}={}; path=/", urlencoding::encode(token))
}

/// Pick the token to restore: local storage first, then the cookie.
#[must_use]
pub fn pick_stored_token(local: Option<String>, cookie: Option<String>) -> Option<String> {
    local
        .filter(|token| !token.trim().is_empty())
        .or_else(|| cookie.filter(|token| !token.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserInfo {
        UserInfo::from(UserInfoRow {
            user_id: 12,
            first_name: "Sam".into(),
            last_name: "Lee".into(),
            is_instructor: 1,
        })
    }

    #[test]
    fn cookie_token_is_found_among_others() {
        assert_eq!(
            token_from_cookie("theme=dark; token=abc123; lang=en").as_deref(),
            Some("abc123")
        );
        assert_eq!(token_from_cookie("token=xyz").as_deref(), Some("xyz"));
        assert_eq!(token_from_cookie("theme=dark"), None);
        assert_eq!(token_from_cookie("token=; theme=dark"), None);
        assert_eq!(token_from_cookie("mytoken=nope"), None);
        assert_eq!(token_from_cookie(""), None);
    }

    #[test]
    fn cookie_values_round_trip_encoding() {
        let cookie = session_cookie("a b;c");
        assert_eq!(cookie, "token=a%20b%3Bc; path=/");
        let pair = cookie.split("; ").next().unwrap_or_default();
        assert_eq!(token_from_cookie(pair).as_deref(), Some("a b;c"));
    }

    #[test]
    fn local_storage_wins_over_cookie() {
        assert_eq!(
            pick_stored_token(Some("local".into()), Some("cookie".into())).as_deref(),
            Some("local")
        );
        assert_eq!(
            pick_stored_token(Some("  ".into()), Some("cookie".into())).as_deref(),
            Some("cookie")
        );
        assert_eq!(pick_stored_token(None, None), None);
    }

    #[test]
    fn session_lifecycle() {
        let mut session = SessionState::default();
        assert!(!session.is_authenticated());
        assert_eq!(session.credentials(), None);

        session.install("tok".into(), user());
        assert!(session.is_authenticated());
        assert!(session.is_instructor());
        assert_eq!(session.credentials(), Some(("tok", 12)));

        session.clear();
        assert_eq!(session, SessionState::default());
    }

    #[test]
    fn instructor_rows_carry_teaching_flag() {
        let info = UserInfo::from(InstructorInfoRow {
            user_id: 3,
            first_name: "Ada".into(),
            last_name: "L".into(),
            is_teaching: 0,
        });
        assert!(info.is_instructor);
        assert_eq!(info.is_teaching, Some(false));
        assert_eq!(info.display_name(), "Ada L");
    }
}
