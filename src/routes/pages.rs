// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Browser page shell behind the navigation guard.

use crate::middleware::auth::Session;
use crate::middleware::guard::{self, LOGIN_PATH, PROTECTED_PAGES};
use crate::middleware::security::PAGE_CSP;
use crate::AppState;
use axum::{
    http::{header, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use std::sync::Arc;

const SHELL: &str = r#"<!doctype html>
<html lang="fr">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>Geoportail SONAGED</title>
    <link rel="stylesheet" href="/assets/index.css" />
  </head>
  <body>
    <div id="root"></div>
    <script type="module" src="/assets/index.js"></script>
  </body>
</html>
"#;

/// Every guarded page is served with and without a trailing slash.
pub fn routes() -> Router<Arc<AppState>> {
    PROTECTED_PAGES
        .iter()
        .copied()
        .chain([LOGIN_PATH])
        .fold(Router::new(), |router, path| {
            let router = router.route(path, get(page));
            if path == "/" {
                router
            } else {
                router.route(&format!("{path}/"), get(page))
            }
        })
}

/// Serve the shell, or redirect per the navigation guard.
async fn page(session: Session, uri: Uri) -> Response {
    let decision = guard::decide(uri.path(), &session);
    match decision.location() {
        Some(target) => {
            tracing::debug!(path = uri.path(), target, "Page redirect");
            Redirect::to(target).into_response()
        }
        None => ([(header::CONTENT_SECURITY_POLICY, PAGE_CSP)], Html(SHELL)).into_response(),
    }
}
