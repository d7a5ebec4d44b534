mod auth_support;

use buildinglink::auth::AuthError;
use buildinglink::config::Credentials;
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use auth_support::{
    auth_with, callback_form, mount_login_pages, mount_refresh, token_body, PASSWORD, USERNAME,
};

fn login_credentials() -> Credentials {
    Credentials::login(USERNAME, PASSWORD)
}

#[tokio::test]
async fn web_login_takes_token_from_callback_form() {
    let server = MockServer::start().await;
    mount_login_pages(
        &server,
        ResponseTemplate::new(200).set_body_string(callback_form(&[
            ("access_token", "at-web"),
            ("id_token", "jwt-1"),
            ("state", "s-1"),
        ])),
    )
    .await;

    let auth = auth_with(login_credentials(), &server);
    let token = auth.login().await.expect("web login");

    assert_eq!(token, "at-web");
    assert_eq!(auth.access_token().as_deref(), Some("at-web"));
    assert!(auth.is_token_valid());
}

#[tokio::test]
async fn callback_form_is_relayed_to_oidc_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/signin-oidc"))
        .and(body_string_contains("code=auth-code-1"))
        .and(body_string_contains("state=s-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .named("oidc callback relay")
        .mount(&server)
        .await;
    mount_login_pages(
        &server,
        ResponseTemplate::new(200)
            .set_body_string(callback_form(&[("code", "auth-code-1"), ("state", "s-1")])),
    )
    .await;

    let auth = auth_with(login_credentials(), &server);

    // Without an access_token field the code stands in for it.
    assert_eq!(auth.get_access_token().await.unwrap(), "auth-code-1");
}

#[tokio::test]
async fn redirected_credential_post_is_followed() {
    let server = MockServer::start().await;
    mount_login_pages(
        &server,
        ResponseTemplate::new(302).insert_header("location", "/connect/authorize/callback?x=1"),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/connect/authorize/callback"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(callback_form(&[("id_token", "jwt-after-redirect")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let auth = auth_with(login_credentials(), &server);
    assert_eq!(auth.login().await.unwrap(), "jwt-after-redirect");
}

#[tokio::test]
async fn redirect_without_location_is_login_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/signin-oidc"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .named("no callback relay")
        .mount(&server)
        .await;
    mount_login_pages(&server, ResponseTemplate::new(302)).await;

    let auth = auth_with(login_credentials(), &server);
    match auth.login().await.unwrap_err() {
        AuthError::LoginFlow(message) => assert!(message.contains("redirect without Location")),
        other => panic!("expected login flow error, got {other:?}"),
    }
}

#[tokio::test]
async fn rejected_credentials_are_invalid_credentials() {
    let server = MockServer::start().await;
    mount_login_pages(
        &server,
        ResponseTemplate::new(200)
            .set_body_string("<div class=\"validation\">Invalid username or password</div>"),
    )
    .await;

    let auth = auth_with(login_credentials(), &server);
    assert!(matches!(
        auth.get_access_token().await,
        Err(AuthError::InvalidCredentials)
    ));
    assert_eq!(auth.access_token(), None);
}

#[tokio::test]
async fn answer_without_hidden_fields_is_login_error() {
    let server = MockServer::start().await;
    mount_login_pages(
        &server,
        ResponseTemplate::new(200).set_body_string("<p>Welcome back</p>"),
    )
    .await;

    let auth = auth_with(login_credentials(), &server);
    match auth.login().await.unwrap_err() {
        AuthError::LoginFlow(message) => assert!(message.contains("no callback form data")),
        other => panic!("expected login flow error, got {other:?}"),
    }
}

#[tokio::test]
async fn login_page_without_redirect_is_login_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>down for maintenance</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let auth = auth_with(login_credentials(), &server);
    match auth.login().await.unwrap_err() {
        AuthError::LoginFlow(message) => assert!(message.contains("auth redirect URL")),
        other => panic!("expected login flow error, got {other:?}"),
    }
}

#[tokio::test]
async fn token_grant_on_session_completes_login() {
    let server = MockServer::start().await;
    mount_login_pages(
        &server,
        ResponseTemplate::new(200).set_body_string(callback_form(&[("state", "s-1")])),
    )
    .await;
    mount_refresh(
        &server,
        "rt-1",
        ResponseTemplate::new(200).set_body_json(token_body("at-grant", Some("rt-2"), 600)),
        1,
    )
    .await;

    let auth = auth_with(login_credentials().with_refresh_token("rt-1"), &server);
    assert_eq!(auth.login().await.unwrap(), "at-grant");
    assert_eq!(auth.refresh_token().as_deref(), Some("rt-2"));
}

#[tokio::test]
async fn failed_session_grant_is_login_error() {
    let server = MockServer::start().await;
    mount_login_pages(
        &server,
        ResponseTemplate::new(200).set_body_string(callback_form(&[("state", "s-1")])),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/connect/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string("unsupported_grant_type"))
        .expect(1)
        .mount(&server)
        .await;

    let auth = auth_with(login_credentials(), &server);
    match auth.login().await.unwrap_err() {
        AuthError::LoginFlow(message) => {
            assert!(message.contains("could not extract access token"))
        }
        other => panic!("expected login flow error, got {other:?}"),
    }
}
