//! Submission client against a stub external API.

mod common;

use axum::http::StatusCode;
use secrecy::SecretString;
use tokio::time::timeout;

use common::{TEST_TIMEOUT, dead_base_url, start_stub_api};
use foodiet::config::SubmissionConfig;
use foodiet::error::{SubmissionError, SubmissionErrorKind};
use foodiet::profile::{HealthTarget, Measurements, Sex, UserProfile};
use foodiet::submission::{ProfileClient, SubmitResponse};

fn jane() -> UserProfile {
    UserProfile {
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        age: "29".to_string(),
        sex: Some(Sex::Female),
        location: "Austin, TX".to_string(),
        target: HealthTarget::Sporty,
        ..Default::default()
    }
}

fn client_for(base_url: &str) -> ProfileClient {
    ProfileClient::new(SubmissionConfig::new(
        base_url,
        SecretString::from("a55Z4Sk8".to_string()),
    ))
}

#[tokio::test]
async fn valid_profile_returns_profile_id() {
    timeout(TEST_TIMEOUT, async {
        let (base, stub) = start_stub_api(StatusCode::OK, r#"{"id": "abc123"}"#).await;
        let client = client_for(&base);

        let created = client
            .create_profile(&jane(), &Measurements::default())
            .await
            .unwrap();
        assert_eq!(created.profile_id.as_deref(), Some("abc123"));

        let response = serde_json::to_value(SubmitResponse::from(Ok(created))).unwrap();
        assert_eq!(response["success"], true);
        assert_eq!(response["profileId"], "abc123");

        let received = stub.received().await;
        assert_eq!(received.len(), 1);
        assert_eq!(
            received[0],
            serde_json::json!({
                "key": "a55Z4Sk8",
                "name": "Jane",
                "lastname": "Doe",
                "picture": "[picture]",
                "location": "Austin, TX",
                "age": 29,
                "gender": "F",
                "height": 178,
                "weight": 72
            })
        );
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn success_without_id_has_no_profile_id() {
    timeout(TEST_TIMEOUT, async {
        let (base, _stub) = start_stub_api(StatusCode::CREATED, r#"{"ok": true}"#).await;
        let created = client_for(&base)
            .create_profile(&jane(), &Measurements::default())
            .await
            .unwrap();
        assert_eq!(created.profile_id, None);
        assert_eq!(created.data["ok"], true);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn invalid_profiles_never_reach_the_api() {
    timeout(TEST_TIMEOUT, async {
        let (base, stub) = start_stub_api(StatusCode::OK, r#"{"id": "x"}"#).await;
        let client = client_for(&base);

        let missing = UserProfile {
            location: String::new(),
            ..jane()
        };
        let err = client
            .create_profile(&missing, &Measurements::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing required profile fields");

        let bad_age = UserProfile {
            age: "abc".to_string(),
            ..jane()
        };
        let err = client
            .create_profile(&bad_age, &Measurements::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid age provided");
        assert_eq!(
            err.details(),
            "Age must be a valid number between 1 and 150, got: abc"
        );

        assert!(stub.received().await.is_empty());
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn non_success_status_is_api_error_with_body() {
    timeout(TEST_TIMEOUT, async {
        let (base, stub) =
            start_stub_api(StatusCode::UNAUTHORIZED, "Incorrect credentials").await;
        let err = client_for(&base)
            .create_profile(&jane(), &Measurements::default())
            .await
            .unwrap_err();

        match &err {
            SubmissionError::Api { status, body, .. } => {
                assert_eq!(*status, 401);
                assert_eq!(body, "Incorrect credentials");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
        assert_eq!(err.kind(), SubmissionErrorKind::Api);
        assert_eq!(err.to_string(), "Failed to create profile");
        assert!(err.details().contains("401"));
        assert!(err.details().contains("Incorrect credentials"));
        assert_eq!(stub.received().await.len(), 1);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn non_json_success_body_is_unknown_error() {
    timeout(TEST_TIMEOUT, async {
        let (base, _stub) = start_stub_api(StatusCode::OK, "").await;
        let err = client_for(&base)
            .create_profile(&jane(), &Measurements::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), SubmissionErrorKind::Unknown);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn unreachable_host_is_network_error() {
    timeout(TEST_TIMEOUT, async {
        let base = dead_base_url().await;
        let err = client_for(&base)
            .create_profile(&jane(), &Measurements::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), SubmissionErrorKind::Network);
        assert_eq!(err.to_string(), "Network connection error");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn proxy_toggle_routes_through_proxy_base_url() {
    timeout(TEST_TIMEOUT, async {
        let (direct, direct_stub) = start_stub_api(StatusCode::OK, r#"{"id": "direct"}"#).await;
        let (proxy, proxy_stub) = start_stub_api(StatusCode::OK, r#"{"id": "proxied"}"#).await;

        let mut config = SubmissionConfig::new(&direct, SecretString::from("k".to_string()));
        config.proxy_base_url = proxy;
        config.use_proxy = true;

        let created = ProfileClient::new(config)
            .create_profile(&jane(), &Measurements::default())
            .await
            .unwrap();
        assert_eq!(created.profile_id.as_deref(), Some("proxied"));
        assert_eq!(proxy_stub.received().await.len(), 1);
        assert!(direct_stub.received().await.is_empty());
    })
    .await
    .expect("test timed out");
}
