//! Dataset export: fetches a rendered file from the export endpoint and hands
//! it to the browser as a download.

use contracts::shared::download::{
    download_path, resolve_content_type, resolve_filename, DownloadError, DownloadRequest,
    FileType,
};
use contracts::shared::parameters::execution_values;
use contracts::shared::query::Query;
use gloo_net::http::Request;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::shared::api_utils::api_url;
use crate::system::auth::ApiCredentials;

/// File received from the export endpoint
pub struct DownloadedFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Requests the export of `query` with its applied parameter values
pub async fn fetch_export(
    query: &Query,
    file_type: FileType,
    credentials: &ApiCredentials,
) -> Result<DownloadedFile, DownloadError> {
    let url = api_url(&download_path(query.id, file_type, credentials.api_key()));
    let body = DownloadRequest {
        parameters: execution_values(query.parameters()),
    };

    let response = credentials
        .apply(Request::post(&url))
        .json(&body)
        .map_err(|e| DownloadError::Transport(e.to_string()))?
        .send()
        .await
        .map_err(|e| DownloadError::Transport(e.to_string()))?;

    if !response.ok() {
        let body = response.binary().await.unwrap_or_default();
        return Err(DownloadError::from_response(
            response.status(),
            &response.status_text(),
            &body,
        ));
    }

    let headers = response.headers();
    let disposition = headers.get("content-disposition");
    let content_type = headers.get("content-type");
    let bytes = response
        .binary()
        .await
        .map_err(|e| DownloadError::Transport(e.to_string()))?;

    Ok(DownloadedFile {
        filename: resolve_filename(disposition.as_deref(), &query.download_basename(), file_type),
        content_type: resolve_content_type(content_type.as_deref(), file_type),
        bytes,
    })
}

/// Fetch and save in one step
pub async fn download_query_result(
    query: &Query,
    file_type: FileType,
    credentials: &ApiCredentials,
) -> Result<String, DownloadError> {
    let file = fetch_export(query, file_type, credentials).await?;
    save_file(&file).map_err(DownloadError::Browser)?;
    Ok(file.filename)
}

/// Инициирует скачивание файла через браузер
pub fn save_file(file: &DownloadedFile) -> Result<(), String> {
    let blob = create_blob(&file.bytes, &file.content_type)?;
    download_blob(&blob, &file.filename)
}

fn create_blob(bytes: &[u8], content_type: &str) -> Result<Blob, String> {
    let array = js_sys::Array::new();
    array.push(&js_sys::Uint8Array::from(bytes));

    let properties = BlobPropertyBag::new();
    properties.set_type(content_type);

    Blob::new_with_u8_array_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;
    let body = document.body().ok_or("No body element")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(&url);
    anchor.set_download(filename);

    // Добавляем в DOM, кликаем и удаляем
    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;

    Ok(())
}
