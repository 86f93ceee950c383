//! Form body extractor
//!
//! Accepts `multipart/form-data` and `application/x-www-form-urlencoded`
//! bodies. Text fields are decoded into the target request type; a
//! non-empty `cover` file part is kept aside as raw bytes.

use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use storial_service::dto::CoverUpload;
use tracing::debug;

use crate::response::ApiError;

/// Name of the multipart part carrying a cover image
pub const COVER_FIELD: &str = "cover";

/// Decoded form fields plus the optional cover file
#[derive(Debug)]
pub struct FormData<T> {
    pub fields: T,
    pub cover: Option<CoverUpload>,
}

#[async_trait]
impl<S, T> FromRequest<S> for FormData<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("multipart/form-data"));

        let (values, cover) = if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::invalid_body(e.body_text()))?;
            read_multipart(multipart).await?
        } else {
            let Form(values) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| ApiError::invalid_body(e.body_text()))?;
            (values, None)
        };

        let fields = decode_fields(values)?;
        Ok(Self { fields, cover })
    }
}

async fn read_multipart(
    mut multipart: Multipart,
) -> Result<(HashMap<String, String>, Option<CoverUpload>), ApiError> {
    let mut values = HashMap::new();
    let mut cover = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::invalid_body(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == COVER_FIELD {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::invalid_body(e.body_text()))?;
            if !file_name.is_empty() && !bytes.is_empty() {
                debug!(file_name = %file_name, size = bytes.len(), "Cover part received");
                cover = Some(CoverUpload {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            continue;
        }

        let text = field
            .text()
            .await
            .map_err(|e| ApiError::invalid_body(e.body_text()))?;
        values.insert(name, text);
    }

    Ok((values, cover))
}

/// Decode string fields into `T`; empty values count as absent
fn decode_fields<T: DeserializeOwned>(values: HashMap<String, String>) -> Result<T, ApiError> {
    let object: Map<String, Value> = values
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (key, Value::String(value)))
        .collect();

    serde_json::from_value(Value::Object(object)).map_err(|e| ApiError::invalid_body(e.to_string()))
}
