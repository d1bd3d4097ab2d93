//! Decoded bitmaps and the sources that load them.
//!
//! Stylesheets reference images as `url(...)`; widgets never fetch anything
//! themselves. An [`ImageSource`] turns an [`ImageUrl`] into a decoded
//! [`Image`], so tests can substitute an in-memory source and applications can
//! opt into network fetches with the `http` feature.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use image::RgbaImage;

use crate::css::color::Color;
use crate::geometry::Size;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from fetching or decoding an image.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode error: {0}")]
    Decode(#[from] image::ImageError),
    #[error("unsupported url scheme: {0}")]
    UnsupportedScheme(String),
    #[cfg(feature = "http")]
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

// ---------------------------------------------------------------------------
// Image
// ---------------------------------------------------------------------------

/// A decoded RGBA bitmap.
///
/// Cloning is cheap: pixel data is shared between style records that refer to
/// the same url.
#[derive(Clone)]
pub struct Image {
    pixels: Rc<RgbaImage>,
}

impl Image {
    /// Wrap an already decoded buffer.
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self { pixels: Rc::new(pixels) }
    }

    /// A `width` x `height` image filled with one color.
    pub fn solid(width: u32, height: u32, color: Color) -> Self {
        let px = image::Rgba([color.r, color.g, color.b, color.a]);
        Self::from_rgba(RgbaImage::from_pixel(width, height, px))
    }

    /// Decode an encoded image (png, jpeg, bmp, gif).
    pub fn decode(bytes: &[u8]) -> Result<Self, ImageError> {
        let decoded = image::load_from_memory(bytes)?;
        Ok(Self::from_rgba(decoded.to_rgba8()))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Dimensions in surface units.
    pub fn size(&self) -> Size {
        Size::new(self.width() as i32, self.height() as i32)
    }

    /// The color at `(x, y)`, or `None` outside the bitmap.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.pixels.get_pixel_checked(x, y).map(|p| Color::rgba(p[0], p[1], p[2], p[3]))
    }

    /// Nearest-neighbour sample for a destination of `dest` size.
    ///
    /// `(dx, dy)` is the position inside the destination rectangle.
    pub fn sample(&self, dx: i32, dy: i32, dest: Size) -> Option<Color> {
        if dest.width <= 0 || dest.height <= 0 || dx < 0 || dy < 0 {
            return None;
        }
        let sx = (dx as i64 * self.width() as i64 / dest.width as i64) as u32;
        let sy = (dy as i64 * self.height() as i64 / dest.height as i64) as u32;
        self.pixel(sx, sy)
    }

    /// The underlying buffer.
    pub fn as_rgba(&self) -> &RgbaImage {
        &self.pixels
    }
}

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.pixels, &other.pixels) || *self.pixels == *other.pixels
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// ImageUrl
// ---------------------------------------------------------------------------

/// The target of a `url(...)` reference: an absolute url or a filesystem path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImageUrl {
    Url(url::Url),
    Path(PathBuf),
}

impl ImageUrl {
    /// Interpret `text` as a url when it has a scheme, otherwise as a path.
    ///
    /// Single-letter schemes are treated as Windows drive letters.
    pub fn parse(text: &str) -> Self {
        match url::Url::parse(text) {
            Ok(url) if url.scheme().len() > 1 => ImageUrl::Url(url),
            _ => ImageUrl::Path(PathBuf::from(text)),
        }
    }

    /// The scheme, `file` for plain paths.
    pub fn scheme(&self) -> &str {
        match self {
            ImageUrl::Url(url) => url.scheme(),
            ImageUrl::Path(_) => "file",
        }
    }
}

impl fmt::Display for ImageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageUrl::Url(url) => write!(f, "{url}"),
            ImageUrl::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

// ---------------------------------------------------------------------------
// ImageSource
// ---------------------------------------------------------------------------

/// Fetches and decodes images referenced by stylesheets and image boxes.
pub trait ImageSource {
    fn load(&self, url: &ImageUrl) -> Result<Image, ImageError>;
}

/// Loads `file://` urls and plain paths from the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct FileImageSource {
    base: Option<PathBuf>,
}

impl FileImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `base`.
    pub fn with_base(mut self, base: impl Into<PathBuf>) -> Self {
        self.base = Some(base.into());
        self
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl ImageSource for FileImageSource {
    fn load(&self, url: &ImageUrl) -> Result<Image, ImageError> {
        let path = match url {
            ImageUrl::Path(path) => self.resolve(path),
            ImageUrl::Url(u) if u.scheme() == "file" => u
                .to_file_path()
                .map_err(|()| ImageError::UnsupportedScheme(u.to_string()))?,
            ImageUrl::Url(u) => return Err(ImageError::UnsupportedScheme(u.scheme().to_owned())),
        };
        tracing::debug!(target: "trellis::image", path = %path.display(), "loading image");
        let bytes = std::fs::read(&path)?;
        Image::decode(&bytes)
    }
}

/// Serves pre-registered images by their url text.
#[derive(Debug, Clone, Default)]
pub struct MemoryImageSource {
    images: HashMap<String, Image>,
}

impl MemoryImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `image` under `url`.
    pub fn with_image(mut self, url: impl Into<String>, image: Image) -> Self {
        self.images.insert(url.into(), image);
        self
    }

    pub fn insert(&mut self, url: impl Into<String>, image: Image) {
        self.images.insert(url.into(), image);
    }
}

impl ImageSource for MemoryImageSource {
    fn load(&self, url: &ImageUrl) -> Result<Image, ImageError> {
        self.images.get(&url.to_string()).cloned().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, format!("no image registered for {url}")).into()
        })
    }
}

/// Loads `http(s)://` urls with a blocking client; everything else goes to
/// the filesystem.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Default)]
pub struct HttpImageSource {
    client: reqwest::blocking::Client,
    files: FileImageSource,
}

#[cfg(feature = "http")]
impl HttpImageSource {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(feature = "http")]
impl ImageSource for HttpImageSource {
    fn load(&self, url: &ImageUrl) -> Result<Image, ImageError> {
        match url {
            ImageUrl::Url(u) if matches!(u.scheme(), "http" | "https") => {
                tracing::debug!(target: "trellis::image", %u, "fetching image");
                let bytes = self.client.get(u.clone()).send()?.error_for_status()?.bytes()?;
                Image::decode(&bytes)
            }
            other => self.files.load(other),
        }
    }
}

/// The source used when no other is configured.
#[cfg(feature = "http")]
pub fn default_source() -> Box<dyn ImageSource> {
    Box::new(HttpImageSource::new())
}

/// The source used when no other is configured.
#[cfg(not(feature = "http"))]
pub fn default_source() -> Box<dyn ImageSource> {
    Box::new(FileImageSource::new())
}

// ===========================================================================
// Tests
// ===========================================================================
