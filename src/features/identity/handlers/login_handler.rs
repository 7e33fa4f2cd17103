use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use minijinja::context;
use serde::Deserialize;
use validator::Validate;

use crate::core::error::Result;
use crate::features::identity::routes::IdentityState;
use crate::shared::constants::{HOME_PATH, SESSION_COOKIE};

#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Login form
pub async fn login_page(State(state): State<IdentityState>) -> Result<Html<String>> {
    Ok(Html(state.templates.render("login.html", context! {})?))
}

/// Exchange the submitted credential pair for a session cookie.
///
/// A rejected pair is logged and the form is rendered again; no message is
/// shown to the viewer.
pub async fn login_submit(
    State(state): State<IdentityState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    if form.validate().is_err() {
        tracing::warn!("Rejected malformed login submission");
        return Ok(Html(state.templates.render("login.html", context! {})?).into_response());
    }

    match state.sessions.sign_in(&form.email, &form.password).await? {
        Some(session) => {
            let cookie = Cookie::build((SESSION_COOKIE, session.id_token))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .build();

            Ok((jar.add(cookie), Redirect::to(HOME_PATH)).into_response())
        }
        None => Ok(Html(state.templates.render("login.html", context! {})?).into_response()),
    }
}
