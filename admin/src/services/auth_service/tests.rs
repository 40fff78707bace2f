#[cfg(test)]
mod tests {
    use crate::api::ApiClient;
    use crate::config::AppConfig;
    use crate::error::AppError;
    use crate::services::auth_service::AuthService;
    use crate::session::SessionStore;
    use std::sync::Arc;
    use uuid::Uuid;

    fn offline_service() -> (AuthService, Arc<SessionStore>) {
        let config = AppConfig {
            api_base_url: "http://127.0.0.1:9".to_string(),
            state_dir: std::env::temp_dir().join(format!("hostel-admin-test-{}", Uuid::new_v4())),
            request_timeout_secs: 1,
            poll_interval_secs: 30,
        };
        let session = Arc::new(SessionStore::load(config.session_path()).unwrap());
        let api = ApiClient::new(&config, session.clone()).unwrap();
        (AuthService::new(api, session.clone()), session)
    }

    #[tokio::test]
    async fn login_rejects_malformed_email_before_sending() {
        let (service, session) = offline_service();
        match service.login("not-an-email", "secret").await {
            Err(AppError::Validation(errors)) => assert!(errors.contains_key("email")),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(!session.is_authenticated().await);
    }

    #[tokio::test]
    async fn login_rejects_empty_password_before_sending() {
        let (service, _) = offline_service();
        match service.login("admin@example.com", "").await {
            Err(AppError::Validation(errors)) => assert!(errors.contains_key("password")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn logout_clears_the_stored_session() {
        let (service, session) = offline_service();
        session.store_login("token".to_string()).await.unwrap();
        assert!(session.is_authenticated().await);

        service.logout().await.unwrap();
        assert!(!session.is_authenticated().await);
    }
}
