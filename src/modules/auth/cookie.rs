//! Building the refresh-token cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use linkvault_config::CookieConfig;

fn base(config: &CookieConfig, value: String) -> Cookie<'static> {
    Cookie::build((config.name.clone(), value))
        .http_only(true)
        .secure(config.secure)
        .path(config.path.clone())
        .same_site(SameSite::Strict)
        .build()
}

/// `HttpOnly; SameSite=Strict` cookie carrying `token`, living as long as
/// the refresh token itself.
pub fn refresh_cookie(config: &CookieConfig, token: String) -> Cookie<'static> {
    let mut cookie = base(config, token);
    cookie.set_max_age(time::Duration::seconds(config.max_age));
    cookie
}

/// An empty cookie with the same attributes and `Max-Age=0`.
pub fn removal_cookie(config: &CookieConfig) -> Cookie<'static> {
    let mut cookie = base(config, String::new());
    cookie.set_max_age(time::Duration::ZERO);
    cookie
}

/// The refresh token sent by the client, if any. An empty value counts as absent.
pub fn read_refresh_token(jar: &CookieJar, config: &CookieConfig) -> Option<String> {
    jar.get(&config.name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}
