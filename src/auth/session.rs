//! Resolves the session cookie of a request to a user.
//!
//! Handlers ask for one of two extractors:
//!
//! * [`MaybeUser`] for page loads, which redirect anonymous visitors themselves.
//! * [`AuthenticatedUser`] for mutating routes, which reject anonymous callers with 401.
//!
//! Resolution runs on every request: the token is validated, then the user id it
//! carries is looked up in the store. A missing cookie, a bad token and a user that
//! no longer exists all resolve to "no user".

use actix_web::cookie::{time, Cookie, SameSite};
use actix_web::dev::Payload;
use actix_web::{web, Error as ActixError, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;

use super::token::Credentials;
use crate::error::AppError;
use crate::models::User;
use crate::store::Store;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "access_token";

/// Builds the HTTP-only cookie that carries a freshly issued token.
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .finish()
}

/// A cookie that makes the browser drop the session.
pub fn removal_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::ZERO)
        .finish()
}

/// Looks up the user behind `token`. Invalid tokens are not an error.
pub async fn resolve_user(
    store: &Store,
    credentials: &Credentials,
    token: Option<&str>,
) -> Result<Option<User>, AppError> {
    let user_id = match token.and_then(|t| credentials.validate_token(t)) {
        Some(id) => id,
        None => return Ok(None),
    };

    let user = store.find_user_by_id(user_id).await?;
    if user.is_none() {
        log::debug!("session token names unknown user {}", user_id);
    }
    Ok(user)
}

/// The user behind the request, if any.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

impl FromRequest for MaybeUser {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let store = req.app_data::<web::Data<Store>>().cloned();
        let credentials = req.app_data::<web::Data<Credentials>>().cloned();
        let token = req.cookie(SESSION_COOKIE).map(|c| c.value().to_string());

        Box::pin(async move {
            let (store, credentials) = match (store, credentials) {
                (Some(store), Some(credentials)) => (store, credentials),
                _ => {
                    return Err(AppError::InternalServerError(
                        "Store or credentials not registered as app data".into(),
                    )
                    .into())
                }
            };

            let user = resolve_user(&store, &credentials, token.as_deref()).await?;
            Ok(MaybeUser(user))
        })
    }
}

/// A request that must come from a logged-in user.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let maybe_user = MaybeUser::from_request(req, payload);

        Box::pin(async move {
            match maybe_user.await? {
                MaybeUser(Some(user)) => Ok(AuthenticatedUser(user)),
                MaybeUser(None) => Err(AppError::Unauthorized("Not authenticated".into()).into()),
            }
        })
    }
}
