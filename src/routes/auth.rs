use crate::{
    auth::{
        hash_password, normalize_email, session::removal_cookie, session::session_cookie,
        verify_password, Credentials, LoginForm, MaybeUser, RegisterForm,
    },
    config::Config,
    error::AppError,
    routes::{html, see_other},
    store::Store,
    views,
};
use actix_web::{get, http::header, post, web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Sends visitors to their list, or to the login page when anonymous.
#[get("/")]
pub async fn index(user: MaybeUser) -> HttpResponse {
    match user.0 {
        Some(_) => see_other("/todos"),
        None => see_other("/login"),
    }
}

#[get("/register")]
pub async fn register_page() -> HttpResponse {
    html(views::render_register(None))
}

/// Register a new user
///
/// On success redirects to `/login?registered=true`. A taken email or invalid
/// input re-renders the form with a message.
#[post("/register")]
pub async fn register(
    store: web::Data<Store>,
    form: web::Form<RegisterForm>,
) -> Result<HttpResponse, AppError> {
    let RegisterForm { email, password } = form.into_inner();
    let form = RegisterForm {
        email: normalize_email(&email),
        password,
    };

    if let Err(e) = form.validate() {
        log::debug!("rejected registration form: {}", e);
        return Ok(html(views::render_register(Some(
            "Please enter a valid email address and a password",
        ))));
    }

    let RegisterForm { email, password } = form;
    let password_hash = web::block(move || hash_password(&password)).await??;

    match store.create_user(&email, &password_hash).await {
        Ok(_) => Ok(see_other("/login?registered=true")),
        Err(AppError::Conflict(msg)) => Ok(html(views::render_register(Some(msg.as_str())))),
        Err(e) => Err(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginPageQuery {
    pub registered: Option<String>,
}

#[get("/login")]
pub async fn login_page(query: web::Query<LoginPageQuery>) -> HttpResponse {
    let registered = query.registered.as_deref() == Some("true");
    html(views::render_login(None, registered))
}

/// Login user
///
/// Checks the credentials, then sets the session cookie and redirects to `/todos`.
#[post("/login")]
pub async fn login(
    store: web::Data<Store>,
    credentials: web::Data<Credentials>,
    config: web::Data<Config>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    let LoginForm { email, password } = form.into_inner();
    let form = LoginForm {
        email: normalize_email(&email),
        password,
    };
    if form.validate().is_err() {
        return Ok(html(views::render_login(Some(INVALID_CREDENTIALS), false)));
    }

    let user = match store.find_user_by_email(&form.email).await? {
        Some(user) => user,
        None => {
            log::debug!("login attempt for unknown email");
            return Ok(html(views::render_login(Some(INVALID_CREDENTIALS), false)));
        }
    };

    let password = form.password;
    let password_hash = user.password_hash.clone();
    let password_ok = web::block(move || verify_password(&password, &password_hash)).await?;
    if !password_ok {
        log::info!("failed login for user {}", user.id);
        return Ok(html(views::render_login(Some(INVALID_CREDENTIALS), false)));
    }

    let token = credentials.issue_token(user.id, Some(config.token_ttl()))?;
    log::info!("user {} logged in", user.id);

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/todos"))
        .cookie(session_cookie(token, config.cookie_secure))
        .finish())
}

/// Clears the session cookie and returns to `/`.
#[get("/logout")]
pub async fn logout(config: web::Data<Config>) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .cookie(removal_cookie(config.cookie_secure))
        .finish()
}
