//! Router-level tests for the auth crate
//! Drives `/login`, `/logout` and `/me` through the real router.

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, Response, StatusCode, header};
    use platform::password::{ClearTextPassword, HashedPassword};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::{AuthConfig, SessionManager};
    use crate::domain::clock::ManualClock;
    use crate::domain::entity::credential::CredentialRecord;
    use crate::infra::memory::{InMemorySessionRepository, StaticCredentialRepository};
    use crate::presentation::{AuthAppState, auth_router};

    const USERNAME: &str = "memorialtransportation";
    const PASSWORD: &str = "correct horse battery staple";
    const TTL_SECS: u64 = 60;

    struct Harness {
        router: Router,
        sessions: Arc<SessionManager<InMemorySessionRepository>>,
        clock: Arc<ManualClock>,
    }

    fn harness(config: AuthConfig) -> Harness {
        let hash = HashedPassword::generate(&ClearTextPassword::new(PASSWORD.to_string()), 1_000)
            .unwrap();
        let credentials = StaticCredentialRepository::single(CredentialRecord::new(USERNAME, hash));

        let clock = Arc::new(ManualClock::new(1_700_000_000_000));
        let sessions = Arc::new(SessionManager::with_clock(
            InMemorySessionRepository::new(),
            config.session_ttl,
            clock.clone(),
        ));

        let state = AuthAppState::new(credentials, sessions.clone(), config);
        Harness {
            router: auth_router(state),
            sessions,
            clock,
        }
    }

    fn test_config() -> AuthConfig {
        AuthConfig {
            session_ttl: Duration::from_secs(TTL_SECS),
            ..AuthConfig::development()
        }
    }

    fn login_request(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap()
    }

    fn credentials_body(username: &str, password: &str) -> String {
        json!({ "username": username, "password": password }).to_string()
    }

    fn with_cookie(method: &str, uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn json_body(res: Response<Body>) -> Value {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn set_cookie(res: &Response<Body>) -> Option<String> {
        res.headers()
            .get(header::SET_COOKIE)
            .map(|v| v.to_str().unwrap().to_string())
    }

    /// `mt_session=<token>` from a Set-Cookie header
    fn cookie_pair(set_cookie: &str) -> String {
        set_cookie.split(';').next().unwrap().trim().to_string()
    }

    async fn sign_in(h: &Harness) -> String {
        let res = h
            .router
            .clone()
            .oneshot(login_request(credentials_body(USERNAME, PASSWORD)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        cookie_pair(&set_cookie(&res).unwrap())
    }

    #[tokio::test]
    async fn test_login_me_logout_flow() {
        let h = harness(test_config());

        let res = h
            .router
            .clone()
            .oneshot(login_request(credentials_body(USERNAME, PASSWORD)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let header_value = set_cookie(&res).unwrap();
        assert!(header_value.starts_with("mt_session="));
        assert!(header_value.contains("HttpOnly"));
        assert!(header_value.contains("SameSite=Lax"));
        assert!(header_value.contains("Path=/"));
        assert!(header_value.contains(&format!("Max-Age={TTL_SECS}")));
        assert!(!header_value.contains("Secure"));

        let token = cookie_pair(&header_value)["mt_session=".len()..].to_string();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));

        assert_eq!(
            json_body(res).await,
            json!({"ok": true, "user": {"username": USERNAME}})
        );

        let cookie = format!("mt_session={token}");
        let res = h
            .router
            .clone()
            .oneshot(with_cookie("GET", "/me", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            json_body(res).await,
            json!({"ok": true, "user": {"username": USERNAME}})
        );

        let res = h
            .router
            .clone()
            .oneshot(with_cookie("POST", "/logout", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let cleared = set_cookie(&res).unwrap();
        assert!(cleared.starts_with("mt_session=;"));
        assert!(cleared.contains("Max-Age=0"));
        assert_eq!(json_body(res).await, json!({"ok": true}));

        let res = h
            .router
            .clone()
            .oneshot(with_cookie("GET", "/me", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            json_body(res).await,
            json!({"ok": false, "error": "UNAUTHORIZED"})
        );
    }

    #[tokio::test]
    async fn test_wrong_password_rejected() {
        let h = harness(test_config());

        let res = h
            .router
            .clone()
            .oneshot(login_request(credentials_body(USERNAME, "wrong")))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(set_cookie(&res).is_none());
        assert_eq!(
            json_body(res).await,
            json!({"ok": false, "error": "INVALID_CREDENTIALS"})
        );
        assert_eq!(h.sessions.session_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_user_indistinguishable_from_wrong_password() {
        let h = harness(test_config());

        let res = h
            .router
            .clone()
            .oneshot(login_request(credentials_body("someone-else", PASSWORD)))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(set_cookie(&res).is_none());
        assert_eq!(
            json_body(res).await,
            json!({"ok": false, "error": "INVALID_CREDENTIALS"})
        );
    }

    #[tokio::test]
    async fn test_invalid_input() {
        let h = harness(test_config());

        for body in [
            r#"{"username":"memorialtransportation","password":42}"#,
            r#"{"username":7,"password":"x"}"#,
            r#"{"username":"memorialtransportation"}"#,
            "",
            "not json",
        ] {
            let res = h
                .router
                .clone()
                .oneshot(login_request(body))
                .await
                .unwrap();
            assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{body}");
            assert!(set_cookie(&res).is_none());
            assert_eq!(
                json_body(res).await,
                json!({"ok": false, "error": "INVALID_INPUT"})
            );
        }
    }

    #[tokio::test]
    async fn test_login_requires_json_content_type() {
        let h = harness(test_config());

        for content_type in [
            Some("text/plain"),
            Some("application/x-www-form-urlencoded"),
            None,
        ] {
            let mut builder = Request::builder().method("POST").uri("/login");
            if let Some(content_type) = content_type {
                builder = builder.header(header::CONTENT_TYPE, content_type);
            }
            let req = builder
                .body(Body::from(credentials_body(USERNAME, PASSWORD)))
                .unwrap();

            let res = h.router.clone().oneshot(req).await.unwrap();
            assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{content_type:?}");
            assert!(set_cookie(&res).is_none());
            assert_eq!(
                json_body(res).await,
                json!({"ok": false, "error": "INVALID_INPUT"})
            );
        }
        assert_eq!(h.sessions.session_count().await.unwrap(), 0);

        let res = h
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/login")
                    .header(header::CONTENT_TYPE, "application/json; charset=utf-8")
                    .body(Body::from(credentials_body(USERNAME, PASSWORD)))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_me_without_or_with_forged_cookie() {
        let h = harness(test_config());

        for cookie in [None, Some("mt_session=deadbeef"), Some("other=1")] {
            let res = h
                .router
                .clone()
                .oneshot(with_cookie("GET", "/me", cookie))
                .await
                .unwrap();
            assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(
                json_body(res).await,
                json!({"ok": false, "error": "UNAUTHORIZED"})
            );
        }
    }

    #[tokio::test]
    async fn test_session_expires_after_ttl() {
        let h = harness(test_config());
        let cookie = sign_in(&h).await;

        h.clock.advance_ms((TTL_SECS * 1000) as i64);
        let res = h
            .router
            .clone()
            .oneshot(with_cookie("GET", "/me", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        h.clock.advance_ms(1);
        let res = h
            .router
            .clone()
            .oneshot(with_cookie("GET", "/me", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(h.sessions.session_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_logout_without_session_still_clears_cookie() {
        let h = harness(test_config());

        for cookie in [None, Some("mt_session=unknown")] {
            let res = h
                .router
                .clone()
                .oneshot(with_cookie("POST", "/logout", cookie))
                .await
                .unwrap();
            assert_eq!(res.status(), StatusCode::OK);
            assert!(set_cookie(&res).unwrap().contains("Max-Age=0"));
            assert_eq!(json_body(res).await, json!({"ok": true}));
        }
    }

    #[tokio::test]
    async fn test_logout_only_revokes_own_session() {
        let h = harness(test_config());
        let first = sign_in(&h).await;
        let second = sign_in(&h).await;
        assert_ne!(first, second);

        let res = h
            .router
            .clone()
            .oneshot(with_cookie("POST", "/logout", Some(&first)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = h
            .router
            .clone()
            .oneshot(with_cookie("GET", "/me", Some(&second)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_secure_cookie_in_production_mode() {
        let h = harness(AuthConfig {
            session_ttl: Duration::from_secs(TTL_SECS),
            ..AuthConfig::default()
        });

        let res = h
            .router
            .clone()
            .oneshot(login_request(credentials_body(USERNAME, PASSWORD)))
            .await
            .unwrap();
        assert!(set_cookie(&res).unwrap().contains("Secure"));
    }

    #[tokio::test]
    async fn test_cookie_among_others() {
        let h = harness(test_config());
        let cookie = sign_in(&h).await;

        let header = format!("theme=dark; {cookie}; lang=ja");
        let res = h
            .router
            .clone()
            .oneshot(with_cookie("GET", "/me", Some(&header)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }
}
