use std::future::Future;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use rusttype::Font;
use tokio::sync::OnceCell;

use super::error::{AssetError, RenderError};
use super::profile::{profile, Award};

/// Logical key of the typeface used for every text field.
pub const FONT_KEY: &str = "fonts/Poppins-Bold.ttf";

/// Byte-fetch capability keyed by logical asset name.
///
/// The engine is agnostic to where bytes come from; the host wires in a
/// local directory, an HTTP origin, or a test double.
pub trait AssetSource: Send + Sync + 'static {
    fn fetch(&self, key: &str) -> impl Future<Output = Result<Vec<u8>, AssetError>> + Send;
}

/// Reads assets from a directory on the local filesystem.
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetSource for DirSource {
    async fn fetch(&self, key: &str) -> Result<Vec<u8>, AssetError> {
        tokio::fs::read(self.root.join(key))
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => AssetError::NotFound,
                _ => AssetError::Transport(e.to_string()),
            })
    }
}

/// Fetches assets from an HTTP origin, e.g. the CDN hosting the artwork.
pub struct HttpSource {
    base: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

impl AssetSource for HttpSource {
    async fn fetch(&self, key: &str) -> Result<Vec<u8>, AssetError> {
        let url = format!("{}/{}", self.base, key);
        let res = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AssetError::Transport(e.to_string()))?;
        if res.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AssetError::NotFound);
        }
        if !res.status().is_success() {
            return Err(AssetError::Transport(format!(
                "{} returned {}",
                url,
                res.status()
            )));
        }
        let bytes = res
            .bytes()
            .await
            .map_err(|e| AssetError::Transport(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// The source the service runs with, selected by configuration.
pub enum StandardSource {
    Dir(DirSource),
    Http(HttpSource),
}

impl AssetSource for StandardSource {
    async fn fetch(&self, key: &str) -> Result<Vec<u8>, AssetError> {
        match self {
            StandardSource::Dir(s) => s.fetch(key).await,
            StandardSource::Http(s) => s.fetch(key).await,
        }
    }
}

/// An embeddable typeface program plus its glyph-metrics capability.
///
/// Loaded once, shared read-only for the process lifetime.
#[derive(Debug)]
pub struct FontAsset {
    bytes: Vec<u8>,
    font: Font<'static>,
}

impl FontAsset {
    pub fn parse(bytes: Vec<u8>) -> Result<Self, AssetError> {
        let font = Font::try_from_vec(bytes.clone())
            .ok_or_else(|| AssetError::Malformed("not a usable TrueType program".to_string()))?;
        Ok(Self { bytes, font })
    }

    /// The raw font program, for embedding into the document.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn font(&self) -> &Font<'static> {
        &self.font
    }
}

/// One award's background artwork plus its natural pixel dimensions.
///
/// Only the image header is probed here; the full decode happens at
/// composition time and failures there are composition faults, not cache
/// faults.
#[derive(Debug)]
pub struct TemplateAsset {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
}

impl TemplateAsset {
    pub fn parse(bytes: Vec<u8>) -> Result<Self, AssetError> {
        let (width, height) = image::io::Reader::new(Cursor::new(&bytes))
            .with_guessed_format()
            .map_err(|e| AssetError::Malformed(e.to_string()))?
            .into_dimensions()
            .map_err(|e| AssetError::Malformed(e.to_string()))?;
        Ok(Self {
            bytes,
            width,
            height,
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Fill-once cache over the font and the per-award templates.
///
/// Each key is a `OnceCell` slot: the first caller performs the load while
/// concurrent callers wait on it, and a completed load is shared without
/// locking from then on. Failed loads are not cached — the slot stays empty
/// and a later call retries.
pub struct AssetCache<S> {
    source: S,
    timeout: Duration,
    font: OnceCell<Arc<FontAsset>>,
    templates: [OnceCell<Arc<TemplateAsset>>; Award::ALL.len()],
}

impl<S: AssetSource> AssetCache<S> {
    pub fn new(source: S, timeout: Duration) -> Self {
        Self {
            source,
            timeout,
            font: OnceCell::new(),
            templates: [OnceCell::new(), OnceCell::new(), OnceCell::new()],
        }
    }

    pub async fn font(&self) -> Result<Arc<FontAsset>, RenderError> {
        self.font
            .get_or_try_init(|| async {
                let bytes = self.fetch(FONT_KEY).await?;
                Ok(Arc::new(FontAsset::parse(bytes)?))
            })
            .await
            .cloned()
            .map_err(|cause| RenderError::unavailable(FONT_KEY, cause))
    }

    pub async fn template(&self, award: Award) -> Result<Arc<TemplateAsset>, RenderError> {
        let key = profile(award).template_key;
        self.templates[award.index()]
            .get_or_try_init(|| async {
                let bytes = self.fetch(key).await?;
                Ok(Arc::new(TemplateAsset::parse(bytes)?))
            })
            .await
            .cloned()
            .map_err(|cause| RenderError::unavailable(key, cause))
    }

    async fn fetch(&self, key: &str) -> Result<Vec<u8>, AssetError> {
        match tokio::time::timeout(self.timeout, self.source.fetch(key)).await {
            Ok(result) => result,
            Err(_) => Err(AssetError::TimedOut(self.timeout)),
        }
    }
}
