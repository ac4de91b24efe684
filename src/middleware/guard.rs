// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Navigation guard for the browser pages.

use crate::middleware::auth::Session;

pub const LOGIN_PATH: &str = "/login";
/// Landing page after login.
pub const HOME_PATH: &str = "/";

/// Pages that need a signed-in user.
pub const PROTECTED_PAGES: [&str; 9] = [
    "/",
    "/map",
    "/data",
    "/collection",
    "/sweeping",
    "/furniture",
    "/database",
    "/settings",
    "/profile",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
    RedirectHome,
}

impl GuardDecision {
    /// Target of the redirect, if any.
    pub fn location(&self) -> Option<&'static str> {
        match self {
            GuardDecision::Allow => None,
            GuardDecision::RedirectToLogin => Some(LOGIN_PATH),
            GuardDecision::RedirectHome => Some(HOME_PATH),
        }
    }
}

pub fn is_protected(path: &str) -> bool {
    let path = match path.trim_end_matches('/') {
        "" => "/",
        p => p,
    };
    PROTECTED_PAGES.contains(&path)
}

/// Decide what a navigation to `path` does for this session.
pub fn decide(path: &str, session: &Session) -> GuardDecision {
    let signed_in = session.is_authenticated();

    if path.trim_end_matches('/') == LOGIN_PATH {
        return if signed_in {
            GuardDecision::RedirectHome
        } else {
            GuardDecision::Allow
        };
    }

    if is_protected(path) && !signed_in {
        GuardDecision::RedirectToLogin
    } else {
        GuardDecision::Allow
    }
}
