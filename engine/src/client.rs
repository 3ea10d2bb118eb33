use std::{
    borrow::Cow,
    future::Future,
    path::{Path, PathBuf},
    pin::Pin,
    time::Duration,
};

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use log::{debug, info};
use reqwest::Client;

use crate::{
    batch::WorkItem,
    error::GenerationError,
    request::{AspectRatio, GenerateResponse, RequestSpec},
};

pub const DEFAULT_ENDPOINT: &str = "http://51.178.253.51:2023";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Anything that can turn one work item into one outcome.
///
/// Implementations must not fail: every fault ends up inside the returned
/// [`Outcome`].
pub trait ImageGenerator {
    fn generate<'a>(
        &'a self,
        item: &'a WorkItem,
        output_dir: &'a Path,
        aspect: AspectRatio,
    ) -> Pin<Box<dyn Future<Output = Outcome> + Send + 'a>>;

    fn name(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedImage {
    pub path: PathBuf,
    pub bytes: usize,
}

/// Terminal record of one attempt
#[must_use]
#[derive(Debug)]
pub struct Outcome {
    /// the name the work item asked for
    pub filename: String,
    pub result: Result<SavedImage, GenerationError>,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// The written path for a success, the requested name otherwise
    pub fn filename(&self) -> Cow<'_, str> {
        match &self.result {
            Ok(saved) => saved.path.to_string_lossy(),
            Err(_) => Cow::Borrowed(&self.filename),
        }
    }

    pub fn message(&self) -> String {
        match &self.result {
            Ok(saved) => format!("Image saved to {}", saved.path.display()),
            Err(err) => err.to_string(),
        }
    }

    pub fn size_kb(&self) -> Option<usize> {
        self.result.as_ref().ok().map(|saved| saved.bytes / 1024)
    }
}

#[derive(Debug, Clone)]
pub struct GenerationClient {
    endpoint: String,
    timeout: Duration,
    client: Client,
}

impl Default for GenerationClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl GenerationClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: DEFAULT_TIMEOUT,
            client: Client::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self) -> String {
        format!("{}/generate-image", self.endpoint.trim_end_matches('/'))
    }

    /// Sends one request and parses the envelope. The HTTP status is only
    /// used for diagnostics, the service reports failures in the body.
    pub async fn request(&self, spec: &RequestSpec) -> Result<GenerateResponse, GenerationError> {
        let request = self
            .client
            .post(self.url())
            .timeout(self.timeout)
            .json(spec);
        debug!("request: {request:#?}");

        let resp = request
            .send()
            .await
            .map_err(|e| GenerationError::from_transport(e, self.timeout))?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| GenerationError::from_transport(e, self.timeout))?;
        debug!("response status {status}, {} bytes", text.len());

        serde_json::from_str(&text)
            .map_err(|source| GenerationError::MalformedResponse { status, source })
    }

    /// Generates a single image and writes it to `output_dir/filename`,
    /// replacing whatever was there.
    pub async fn generate_image(
        &self,
        prompt: &str,
        filename: &str,
        output_dir: &Path,
        aspect: AspectRatio,
    ) -> Result<SavedImage, GenerationError> {
        let response = self
            .request(&RequestSpec::photoreal(prompt, aspect))
            .await?;
        let b64 = response.interpret()?;
        let bytes = BASE64.decode(b64.as_bytes())?;

        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|source| GenerationError::Io {
                path: output_dir.to_path_buf(),
                source,
            })?;
        let path = output_dir.join(filename);
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|source| GenerationError::Io {
                path: path.clone(),
                source,
            })?;

        Ok(SavedImage {
            path,
            bytes: bytes.len(),
        })
    }
}

impl ImageGenerator for GenerationClient {
    fn generate<'a>(
        &'a self,
        item: &'a WorkItem,
        output_dir: &'a Path,
        aspect: AspectRatio,
    ) -> Pin<Box<dyn Future<Output = Outcome> + Send + 'a>> {
        Box::pin(async move {
            info!("Generating: {}", item.filename);
            debug!("Prompt: {}...", item.prompt.chars().take(80).collect::<String>());
            let result = self
                .generate_image(&item.prompt, &item.filename, output_dir, aspect)
                .await;
            Outcome {
                filename: item.filename.clone(),
                result,
            }
        })
    }

    fn name(&self) -> &str {
        &self.endpoint
    }
}
