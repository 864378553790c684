use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};

use crate::errors::WikiError;
use crate::types::{AppState, Page, Title};

/// Handle root path requests
pub async fn handle_root(State(state): State<AppState>) -> Result<Response, WikiError> {
    index(&state)
}

/// List every stored page
pub fn index(state: &AppState) -> Result<Response, WikiError> {
    let titles = state.pages.list()?;
    let page = state.templates.render_index(&titles)?;
    log::info!("Serving index with {} pages", titles.len());
    Ok(Html(page).into_response())
}

/// Show a page, or send the reader to its edit form when it does not exist yet
pub fn view(state: &AppState, title: Title) -> Result<Response, WikiError> {
    match state.pages.load(&title) {
        Ok(page) => {
            let html = state.templates.render("view", &page)?;
            log::info!("Serving page '{}'", title);
            Ok(Html(html).into_response())
        }
        Err(WikiError::NotFound) => {
            log::info!("Page '{}' missing, redirecting to edit", title);
            Ok(redirect(&format!("/edit/{}", title)))
        }
        Err(e) => Err(e),
    }
}

pub fn edit(state: &AppState, title: Title) -> Result<Response, WikiError> {
    let page = match state.pages.load(&title) {
        Ok(page) => page,
        Err(WikiError::NotFound) => {
            log::debug!("Editing new page '{}'", title);
            Page::empty(title)
        }
        Err(e) => return Err(e),
    };
    let html = state.templates.render("edit", &page)?;
    Ok(Html(html).into_response())
}

pub fn save(state: &AppState, title: Title, body: Vec<u8>) -> Result<Response, WikiError> {
    let page = Page::new(title, body);
    state.pages.save(&page)?;
    Ok(redirect(&format!("/view/{}", page.title)))
}

/// 302 Found to `location`
fn redirect(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
