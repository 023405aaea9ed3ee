#![allow(dead_code)]

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use todoforge::auth::SESSION_COOKIE;
use todoforge::{routes, Config, Credentials, Store};

pub const TEST_SECRET: &str = "integration-test-secret";

/// Shared state for one test: a fresh in-memory database per call.
#[derive(Clone)]
pub struct TestState {
    pub store: web::Data<Store>,
    pub credentials: web::Data<Credentials>,
    pub config: web::Data<Config>,
}

pub async fn test_state() -> TestState {
    test_state_with(&[]).await
}

/// Like [`test_state`], with extra configuration variables layered on top.
pub async fn test_state_with(overrides: &[(&str, &str)]) -> TestState {
    let config = Config::from_lookup(|key| {
        if let Some((_, value)) = overrides.iter().find(|(k, _)| *k == key) {
            return Some(value.to_string());
        }
        match key {
            "DATABASE_URL" => Some("sqlite::memory:".to_string()),
            "SECRET_KEY" => Some(TEST_SECRET.to_string()),
            _ => None,
        }
    })
    .expect("test config");
    let store = Store::connect(&config.database_url)
        .await
        .expect("Failed to open test DB");

    TestState {
        store: web::Data::new(store),
        credentials: web::Data::new(Credentials::new(&config.secret_key)),
        config: web::Data::new(config),
    }
}

pub async fn init_app(
    state: TestState,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(state.store)
            .app_data(state.credentials)
            .app_data(state.config)
            .configure(routes::config),
    )
    .await
}

/// What a test cares about in a response.
pub struct Reply {
    pub status: StatusCode,
    pub location: Option<String>,
    pub session: Option<Cookie<'static>>,
    pub body: String,
}

pub async fn send(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    req: Request,
) -> Reply {
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let location = resp
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let session = resp
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(|cookie| cookie.into_owned());
    let body = test::read_body(resp).await;

    Reply {
        status,
        location,
        session,
        body: String::from_utf8_lossy(&body).into_owned(),
    }
}

pub async fn register(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    email: &str,
    password: &str,
) -> Reply {
    let req = test::TestRequest::post()
        .uri("/register")
        .set_form([("email", email), ("password", password)])
        .to_request();
    send(app, req).await
}

pub async fn login(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    email: &str,
    password: &str,
) -> Reply {
    let req = test::TestRequest::post()
        .uri("/login")
        .set_form([("email", email), ("password", password)])
        .to_request();
    send(app, req).await
}

/// Registers and logs in, returning the session cookie.
pub async fn sign_up(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    email: &str,
    password: &str,
) -> Cookie<'static> {
    let registered = register(app, email, password).await;
    assert_eq!(
        registered.status,
        StatusCode::SEE_OTHER,
        "Registration failed. Body: {}",
        registered.body
    );

    let logged_in = login(app, email, password).await;
    logged_in.session.unwrap_or_else(|| {
        panic!(
            "Login did not set a session cookie. Status: {}. Body: {}",
            logged_in.status, logged_in.body
        )
    })
}
