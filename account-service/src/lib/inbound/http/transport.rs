use auth::TokenPair;
use auth::TokenTtl;
use axum::extract::Request;
use axum::http::header;
use axum::http::HeaderName;
use axum::http::HeaderValue;
use axum::response::Response;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::cookie::SameSite;

/// Request/response slot carrying the access token.
pub const ACCESS_TOKEN: &str = "accesstoken";
/// Request/response slot carrying the refresh token.
pub const REFRESH_TOKEN: &str = "refreshtoken";

/// Read a token string for a purpose-named slot.
///
/// A header takes precedence over a cookie of the same name; both
/// transports are accepted, the guard does not care which one carried
/// the credential.
pub fn read_token(req: &Request, name: &str) -> Option<String> {
    if let Some(value) = req.headers().get(name) {
        return value.to_str().ok().map(str::to_string);
    }

    CookieJar::from_headers(req.headers())
        .get(name)
        .map(|cookie| cookie.value().to_string())
}

/// Write a token into the response under its slot name, as a header and
/// as an HttpOnly cookie whose max-age matches the token's lifetime.
pub fn attach_token(
    response: &mut Response,
    name: &'static str,
    token: &str,
    max_age: chrono::Duration,
) {
    if let Ok(value) = HeaderValue::from_str(token) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(name), value);
    }

    let cookie = Cookie::build((name, token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(max_age.num_seconds()))
        .build();

    if let Ok(value) = HeaderValue::from_str(&cookie.to_string()) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
}

/// Attach a freshly minted pair to the response.
pub fn attach_pair(response: &mut Response, pair: &TokenPair, ttl: TokenTtl) {
    attach_token(response, ACCESS_TOKEN, &pair.access, ttl.access);
    attach_token(response, REFRESH_TOKEN, &pair.refresh, ttl.refresh);
}

/// Write removal cookies for both slots (logout).
pub fn clear_tokens(response: &mut Response) {
    for name in [ACCESS_TOKEN, REFRESH_TOKEN] {
        let cookie = Cookie::build((name, ""))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::ZERO)
            .build();

        if let Ok(value) = HeaderValue::from_str(&cookie.to_string()) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
}
