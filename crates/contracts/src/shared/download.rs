//! Dataset export: endpoint paths, file naming and error classification
//!
//! The export itself is rendered by the backend; the client posts the applied
//! parameter values and saves whatever bytes come back.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Export format offered by the download menus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Csv,
    Tsv,
    Xlsx,
    Pdf,
}

impl FileType {
    /// Formats currently offered in the menus
    pub const OFFERED: [FileType; 2] = [FileType::Csv, FileType::Pdf];

    pub fn extension(&self) -> &'static str {
        match self {
            FileType::Csv => "csv",
            FileType::Tsv => "tsv",
            FileType::Xlsx => "xlsx",
            FileType::Pdf => "pdf",
        }
    }

    /// Used when the response carries no `Content-Type`
    pub fn default_content_type(&self) -> &'static str {
        match self {
            FileType::Csv => "text/csv",
            FileType::Tsv => "text/tab-separated-values",
            FileType::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            FileType::Pdf => "application/pdf",
        }
    }

    pub fn menu_label(&self) -> &'static str {
        match self {
            FileType::Csv => "Download as CSV File",
            FileType::Tsv => "Download as TSV File",
            FileType::Xlsx => "Download as Excel File",
            FileType::Pdf => "Download as PDF File",
        }
    }
}

/// Body of `POST /api/queries/{id}/download.{ext}`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DownloadRequest {
    pub parameters: Map<String, Value>,
}

/// Structured error body the export endpoint may answer with
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DownloadError {
    /// Non-2xx response; `message` decoded from a JSON body when there was one
    #[error("{}", .message.as_deref().unwrap_or(.status_text.as_str()))]
    Server {
        status: u16,
        status_text: String,
        message: Option<String>,
    },
    #[error("{0}")]
    Transport(String),
    /// Saving the file in the browser failed
    #[error("{0}")]
    Browser(String),
}

impl DownloadError {
    /// Classifies a failed response from its status and raw body
    pub fn from_response(status: u16, status_text: &str, body: &[u8]) -> Self {
        DownloadError::Server {
            status,
            status_text: status_text.to_string(),
            message: decode_error_message(body),
        }
    }

    /// Text shown to the user
    pub fn user_message(&self) -> String {
        let detail = self.to_string();
        if detail.trim().is_empty() {
            "Download failed: Unknown error".to_string()
        } else {
            format!("Download failed: {}", detail)
        }
    }
}

/// Guard allowing one export at a time per download control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SingleFlight {
    running: bool,
}

impl SingleFlight {
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Claims the slot. `false` means an export is already running and the
    /// request must not be sent.
    pub fn try_begin(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    /// Releases the slot whatever the outcome. Returns the text to show for a
    /// failed export.
    pub fn finish<T>(&mut self, outcome: &Result<T, DownloadError>) -> Option<String> {
        self.running = false;
        outcome.as_ref().err().map(DownloadError::user_message)
    }
}

/// `message` of a JSON error body; `None` for binary or unstructured payloads
pub fn decode_error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()?
        .message
        .filter(|m| !m.trim().is_empty())
}

/// Relative endpoint path; the api key travels as a query parameter
pub fn download_path(query_id: i64, file_type: FileType, api_key: Option<&str>) -> String {
    let path = format!(
        "/api/queries/{}/download.{}",
        query_id,
        file_type.extension()
    );
    match api_key.filter(|k| !k.is_empty()) {
        Some(key) => format!("{}?api_key={}", path, urlencoding::encode(key)),
        None => path,
    }
}

/// File name from a `Content-Disposition` header.
///
/// Prefers the plain `filename=` parameter (quotes stripped), then the
/// extended `filename*=charset''value` form. The result is percent-decoded.
pub fn filename_from_disposition(header: &str) -> Option<String> {
    let mut plain = None;
    let mut extended = None;

    for part in split_params(header) {
        let Some((key, value)) = part.split_once('=') else {
            continue;
        };
        let value = value.trim();
        match key.trim().to_ascii_lowercase().as_str() {
            "filename" => plain = Some(unquote(value)),
            "filename*" => {
                extended = value
                    .split_once("''")
                    .map(|(_, encoded)| encoded.trim_matches('"').to_string())
            }
            _ => {}
        }
    }

    let raw = plain.filter(|v| !v.is_empty()).or(extended)?;
    if raw.is_empty() {
        return None;
    }
    Some(
        urlencoding::decode(&raw)
            .map(|decoded| decoded.into_owned())
            .unwrap_or(raw),
    )
}

/// Splits header parameters on `;` outside quoted strings
fn split_params(header: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    let mut escaped = false;

    for (i, c) in header.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if quoted => escaped = true,
            '"' => quoted = !quoted,
            ';' if !quoted => {
                parts.push(&header[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&header[start..]);
    parts
}

fn unquote(value: &str) -> String {
    match value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        Some(inner) => inner.replace("\\\"", "\"").replace("\\\\", "\\"),
        None => value.trim_matches('"').to_string(),
    }
}

/// Name of the saved file: header name when present, else `{basename}.{ext}`
pub fn resolve_filename(disposition: Option<&str>, basename: &str, file_type: FileType) -> String {
    disposition
        .and_then(filename_from_disposition)
        .unwrap_or_else(|| format!("{}.{}", basename, file_type.extension()))
}

/// Content type of the saved blob
pub fn resolve_content_type(header: Option<&str>, file_type: FileType) -> String {
    header
        .filter(|h| !h.trim().is_empty())
        .unwrap_or(file_type.default_content_type())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_flight_rejects_second_start() {
        let mut flight = SingleFlight::default();
        assert!(flight.try_begin());
        assert!(flight.is_running());
        assert!(!flight.try_begin());

        let done: Result<String, DownloadError> = Ok("report.csv".into());
        assert_eq!(flight.finish(&done), None);
        assert!(!flight.is_running());
        assert!(flight.try_begin());
    }

    #[test]
    fn test_single_flight_released_on_failure() {
        let mut flight = SingleFlight::default();
        assert!(flight.try_begin());
        let failed: Result<String, DownloadError> =
            Err(DownloadError::from_response(500, "Internal Server Error", b""));
        assert_eq!(
            flight.finish(&failed).as_deref(),
            Some("Download failed: Internal Server Error")
        );
        assert!(!flight.is_running());
        assert!(flight.try_begin());
    }

    #[test]
    fn test_download_path() {
        assert_eq!(
            download_path(12, FileType::Csv, None),
            "/api/queries/12/download.csv"
        );
        assert_eq!(
            download_path(12, FileType::Pdf, Some("k y")),
            "/api/queries/12/download.pdf?api_key=k%20y"
        );
        assert_eq!(
            download_path(12, FileType::Pdf, Some("")),
            "/api/queries/12/download.pdf"
        );
    }

    #[test]
    fn test_filename_plain_and_quoted() {
        assert_eq!(
            filename_from_disposition("attachment; filename=\"report.csv\"").as_deref(),
            Some("report.csv")
        );
        assert_eq!(
            filename_from_disposition("attachment; filename=depots%20list.pdf").as_deref(),
            Some("depots list.pdf")
        );
    }

    #[test]
    fn test_filename_with_separator_inside_quotes() {
        assert_eq!(
            filename_from_disposition("attachment; filename=\"a;b.csv\"").as_deref(),
            Some("a;b.csv")
        );
        assert_eq!(
            filename_from_disposition("attachment; filename=\"q\\\";x.csv\"; size=10").as_deref(),
            Some("q\";x.csv")
        );
    }

    #[test]
    fn test_filename_extended_form() {
        assert_eq!(
            filename_from_disposition("attachment; filename*=UTF-8''%D0%BE%D1%82%D1%87%D0%B5%D1%82.csv")
                .as_deref(),
            Some("отчет.csv")
        );
        assert_eq!(
            filename_from_disposition("attachment; filename=\"\"; filename*=UTF-8''a.csv").as_deref(),
            Some("a.csv")
        );
        assert_eq!(filename_from_disposition("attachment"), None);
    }

    #[test]
    fn test_resolve_filename_default() {
        assert_eq!(resolve_filename(None, "query_4", FileType::Pdf), "query_4.pdf");
        assert_eq!(
            resolve_filename(Some("inline"), "Depot revenue", FileType::Csv),
            "Depot revenue.csv"
        );
    }

    #[test]
    fn test_resolve_content_type() {
        assert_eq!(resolve_content_type(None, FileType::Pdf), "application/pdf");
        assert_eq!(resolve_content_type(Some(""), FileType::Tsv), "text/tab-separated-values");
        assert_eq!(
            resolve_content_type(Some("text/csv; charset=utf-8"), FileType::Csv),
            "text/csv; charset=utf-8"
        );
    }

    #[test]
    fn test_error_classification() {
        let structured = DownloadError::from_response(400, "Bad Request", br#"{"message":"Query is too large"}"#);
        assert_eq!(structured.user_message(), "Download failed: Query is too large");

        let binary = DownloadError::from_response(500, "Internal Server Error", &[0x25, 0x50, 0xff]);
        assert_eq!(binary.user_message(), "Download failed: Internal Server Error");

        let silent = DownloadError::from_response(502, "", b"");
        assert_eq!(silent.user_message(), "Download failed: Unknown error");

        let transport = DownloadError::Transport("NetworkError".into());
        assert_eq!(transport.user_message(), "Download failed: NetworkError");
    }
}
