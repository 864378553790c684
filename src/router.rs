use std::sync::LazyLock;

use axum::{
    extract::{Request, State},
    http::Method,
    response::Response,
    routing::get,
    Router,
};
use regex::Regex;

use crate::errors::WikiError;
use crate::form;
use crate::handlers;
use crate::types::{AppState, Title};

static VALID_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^/(edit|save|view|index)/([a-zA-Z0-9]+)$").expect("route pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    View,
    Edit,
    Save,
    Index,
}

/// A request path that matched the page pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub action: Action,
    pub title: Title,
}

impl Route {
    /// Match `/<action>/<title>`; `None` for anything else
    pub fn parse(path: &str) -> Option<Self> {
        let caps = VALID_PATH.captures(path)?;
        let action = match &caps[1] {
            "view" => Action::View,
            "edit" => Action::Edit,
            "save" => Action::Save,
            "index" => Action::Index,
            _ => return None,
        };
        let title = Title::parse(&caps[2]).ok()?;
        Some(Self { action, title })
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::handle_root))
        .fallback(dispatch)
        .with_state(state)
}

/// Route every non-root request by its path, then check the method
pub async fn dispatch(State(state): State<AppState>, request: Request) -> Result<Response, WikiError> {
    let path = request.uri().path().to_string();
    let Some(route) = Route::parse(&path) else {
        log::warn!("Path not found: '{}'", path);
        return Err(WikiError::NotFound);
    };

    let method = request.method().clone();
    log::info!("{} {:?} '{}'", method, route.action, route.title);
    let reads = method == Method::GET || method == Method::HEAD;

    match route.action {
        Action::View if reads => handlers::view(&state, route.title),
        Action::Edit if reads => handlers::edit(&state, route.title),
        Action::Index if reads => handlers::index(&state),
        Action::Save if method == Method::POST => {
            let body = form::field_value(request, &state, "body").await;
            handlers::save(&state, route.title, body)
        }
        _ => {
            log::warn!("{} not allowed on '{}'", method, path);
            Err(WikiError::MethodNotAllowed)
        }
    }
}
