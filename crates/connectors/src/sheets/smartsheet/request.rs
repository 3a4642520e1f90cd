use model::sheet::format::ExportFormat;
use serde::Deserialize;
use std::path::Path;

/// How a download in a given format is requested: the `Accept` header and
/// any extra query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub accept: &'static str,
    pub query: Vec<(&'static str, String)>,
}

pub fn export_request(format: &ExportFormat) -> ExportRequest {
    match format {
        ExportFormat::Csv => ExportRequest {
            accept: "text/csv",
            query: Vec::new(),
        },
        ExportFormat::Excel => ExportRequest {
            accept: "application/vnd.ms-excel",
            query: Vec::new(),
        },
        ExportFormat::Pdf(paper_size) => ExportRequest {
            accept: "application/pdf",
            query: vec![("paperSize", paper_size.name().to_string())],
        },
    }
}

/// Extracts a bare file name from a `Content-Disposition` header value.
///
/// Directory components are stripped so a hostile header cannot point the
/// download outside the output directory.
pub fn filename_from_disposition(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim().trim_matches('"'))
        .and_then(|name| Path::new(name).file_name())
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiErrorBody {
    #[serde(default)]
    error_code: Option<i64>,
    message: String,
}

/// Turns an error response body into a readable message, falling back to
/// the raw body when it is not the service's JSON error shape.
pub fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(ApiErrorBody {
            error_code: Some(code),
            message,
        }) => format!("{message} (error code {code})"),
        Ok(ApiErrorBody { message, .. }) => message,
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}
