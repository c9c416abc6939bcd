//! Client-side routes and the two auth guards in front of them.

use crate::auth::Session;

pub const LOGIN: &str = "/login";
pub const REGISTER: &str = "/register";
pub const FEED: &str = "/";

/// Upper bound on redirects followed by [`navigate`]. The table below never
/// needs more than two hops.
const MAX_REDIRECTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Feed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(&'static str),
}

/// Only reachable with a session, otherwise sends the user to the login page.
pub fn protected(session: &Session, route: Route) -> Navigation {
    if session.is_authenticated() {
        Navigation::Render(route)
    } else {
        Navigation::Redirect(LOGIN)
    }
}

/// Only reachable without a session, otherwise sends the user to the feed.
pub fn public(session: &Session, route: Route) -> Navigation {
    if session.is_authenticated() {
        Navigation::Redirect(FEED)
    } else {
        Navigation::Render(route)
    }
}

pub fn resolve(path: &str, session: &Session) -> Navigation {
    match path {
        LOGIN => public(session, Route::Login),
        REGISTER => public(session, Route::Register),
        FEED => protected(session, Route::Feed),
        _ => Navigation::Redirect(FEED),
    }
}

/// Follow redirects from `path` until a route renders.
pub fn navigate(path: &str, session: &Session) -> Route {
    let mut path = path;
    for _ in 0..MAX_REDIRECTS {
        match resolve(path, session) {
            Navigation::Render(route) => return route,
            Navigation::Redirect(next) => path = next,
        }
    }
    // every redirect chain ends on the login page or the feed
    if session.is_authenticated() {
        Route::Feed
    } else {
        Route::Login
    }
}
