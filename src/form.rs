//! Reading a single field out of a save request.
//!
//! Urlencoded and multipart bodies are both accepted, with the query string
//! as a fallback. Values stay raw bytes; nothing is decoded as UTF-8.

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
    http::header,
};
use log::{debug, warn};

use crate::types::AppState;

/// Value of `name` from the request body, else the query string, else empty
pub async fn field_value(request: Request, state: &AppState, name: &str) -> Vec<u8> {
    let query_value = request
        .uri()
        .query()
        .and_then(|query| urlencoded_value(query.as_bytes(), name));

    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();

    let body_value = if content_type.starts_with("multipart/form-data") {
        multipart_value(request, state, name).await
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        match Bytes::from_request(request, state).await {
            Ok(raw) => urlencoded_value(&raw, name),
            Err(rejection) => {
                warn!("Failed to read form body: {}", rejection.body_text());
                None
            }
        }
    } else {
        debug!("No form body (content type '{}')", content_type);
        None
    };

    body_value.or(query_value).unwrap_or_default()
}

async fn multipart_value(request: Request, state: &AppState, name: &str) -> Option<Vec<u8>> {
    let mut multipart = match Multipart::from_request(request, state).await {
        Ok(multipart) => multipart,
        Err(rejection) => {
            warn!("Failed to read multipart body: {}", rejection.body_text());
            return None;
        }
    };

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some(name) => {
                return match field.bytes().await {
                    Ok(bytes) => Some(bytes.to_vec()),
                    Err(e) => {
                        warn!("Failed to read multipart field '{}': {}", name, e);
                        None
                    }
                };
            }
            Ok(Some(_)) => continue,
            Ok(None) => return None,
            Err(e) => {
                warn!("Malformed multipart body: {}", e);
                return None;
            }
        }
    }
}

/// First value for `name` in an `a=1&b=2` string, percent-decoded to bytes
pub fn urlencoded_value(raw: &[u8], name: &str) -> Option<Vec<u8>> {
    raw.split(|&b| b == b'&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (key, value) = match pair.iter().position(|&b| b == b'=') {
                Some(eq) => (&pair[..eq], &pair[eq + 1..]),
                None => (pair, &pair[pair.len()..]),
            };
            (decode_component(key) == name.as_bytes()).then(|| decode_component(value))
        })
}

fn decode_component(raw: &[u8]) -> Vec<u8> {
    let spaced: Vec<u8> = raw.iter().map(|&b| if b == b'+' { b' ' } else { b }).collect();
    urlencoding::decode_binary(&spaced).into_owned()
}
