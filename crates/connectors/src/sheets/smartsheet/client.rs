use crate::{
    retry::{RetryDisposition, RetryPolicy},
    sheets::{
        client::{SheetClient, SheetSessionFactory},
        error::SheetError,
        smartsheet::{
            DEFAULT_API_BASE,
            request::{api_error_message, export_request, filename_from_disposition},
        },
    },
};
use async_trait::async_trait;
use model::{
    core::identifiers::SheetId,
    sheet::{download::DownloadResult, format::ExportFormat, page::SheetPage},
};
use reqwest::{
    RequestBuilder, Response, StatusCode,
    header::{ACCEPT, CONTENT_DISPOSITION},
};
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// Opens [`SmartsheetClient`] sessions sharing one HTTP connection pool.
#[derive(Clone)]
pub struct SmartsheetSessions {
    http: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl SmartsheetSessions {
    pub fn new(base_url: Option<&str>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url
                .unwrap_or(DEFAULT_API_BASE)
                .trim_end_matches('/')
                .to_string(),
            retry: RetryPolicy::for_remote_api(),
        }
    }

}

impl SheetSessionFactory for SmartsheetSessions {
    fn open(&self, token: &str) -> Result<Box<dyn SheetClient>, SheetError> {
        if token.trim().is_empty() {
            return Err(SheetError::InvalidToken("token is empty".to_string()));
        }

        Ok(Box::new(SmartsheetClient {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token: token.to_string(),
            retry: self.retry.clone(),
        }))
    }
}

pub struct SmartsheetClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    retry: RetryPolicy,
}

impl SmartsheetClient {
    fn sheet_url(&self, sheet_id: &SheetId) -> String {
        format!("{}/sheets/{}", self.base_url, sheet_id)
    }

    /// Sends the request built by `build`, retrying server errors, rate
    /// limiting and connection failures. Other non-2xx responses are handed
    /// back to the caller untouched.
    async fn send<F>(&self, build: F) -> Result<Response, SheetError>
    where
        F: Fn() -> RequestBuilder,
    {
        let build = &build;
        let token = self.token.as_str();

        self.retry
            .run(
                || async move {
                    let response = build().bearer_auth(token).send().await?;
                    let status = response.status();

                    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
                        let body = response.text().await.unwrap_or_default();
                        return Err(SheetError::Transient {
                            status: status.as_u16(),
                            message: api_error_message(&body),
                        });
                    }

                    Ok(response)
                },
                |err: &SheetError| {
                    if err.is_transient() {
                        RetryDisposition::Retry
                    } else {
                        RetryDisposition::Stop
                    }
                },
            )
            .await
            .map_err(|err| err.into_inner())
    }
}

#[async_trait]
impl SheetClient for SmartsheetClient {
    async fn get_sheet_as(
        &self,
        sheet_id: &SheetId,
        format: &ExportFormat,
        output_dir: &Path,
    ) -> Result<DownloadResult, SheetError> {
        let url = self.sheet_url(sheet_id);
        let request = export_request(format);
        debug!(%url, accept = request.accept, "Requesting sheet download");

        let response = match self
            .send(|| {
                self.http
                    .get(&url)
                    .header(ACCEPT, request.accept)
                    .query(&request.query)
            })
            .await
        {
            Ok(response) => response,
            Err(SheetError::Transient { status, message }) => {
                warn!("Download of sheet {} kept failing: HTTP {}", sheet_id, status);
                return Ok(DownloadResult::failure(
                    output_dir,
                    format!("HTTP {status}: {message}"),
                ));
            }
            Err(err) => return Err(err),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = api_error_message(&body);
            warn!("Download of sheet {} rejected: HTTP {}: {}", sheet_id, status, message);
            return Ok(DownloadResult::failure(
                output_dir,
                format!("HTTP {}: {}", status.as_u16(), message),
            ));
        }

        let filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(filename_from_disposition)
            .unwrap_or_else(|| format!("{}.download.{}", sheet_id, format.extension()));

        // The body lands in a sibling temp file; an interrupted transfer drops
        // it and never touches a file already named `filename`.
        let part = tempfile::Builder::new()
            .prefix(&format!("{filename}."))
            .suffix(".part")
            .tempfile_in(output_dir)?;
        let mut file = tokio::fs::File::from_std(part.reopen()?);
        let mut response = response;
        let mut written: u64 = 0;
        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => {
                    file.write_all(&chunk).await?;
                    written += chunk.len() as u64;
                }
                Ok(None) => break,
                Err(err) => {
                    warn!(
                        "Download of sheet {} interrupted after {} bytes: {}",
                        sheet_id, written, err
                    );
                    return Ok(DownloadResult::failure(
                        output_dir,
                        format!("transfer interrupted after {written} bytes: {err}"),
                    ));
                }
            }
        }
        file.flush().await?;
        drop(file);

        let path = part
            .into_temp_path()
            .keep()
            .map_err(|err| SheetError::Io(err.error))?;
        let stored = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or(filename.clone());

        info!(
            "Downloaded sheet {} as {} ({} bytes, served as {}) to {}",
            sheet_id,
            format.format(),
            written,
            filename,
            path.display()
        );

        Ok(DownloadResult::success(output_dir, stored))
    }

    async fn get_sheet(
        &self,
        sheet_id: &SheetId,
        page_size: usize,
    ) -> Result<SheetPage, SheetError> {
        let url = self.sheet_url(sheet_id);
        let page_size = page_size.to_string();
        debug!(%url, %page_size, "Requesting sheet rows");

        let response = self
            .send(|| {
                self.http
                    .get(&url)
                    .header(ACCEPT, "application/json")
                    .query(&[("pageSize", page_size.as_str()), ("page", "1")])
            })
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SheetError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let page: SheetPage = serde_json::from_str(&body)?;
        debug!("Sheet {} returned {} rows", sheet_id, page.rows.len());
        Ok(page)
    }
}
