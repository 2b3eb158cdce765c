// SPDX-License-Identifier: MIT

//! Admission check: decide whether a candidate URL references a loadable
//! image before it enters the gallery.

use std::fmt;

use anyhow::{Context, Result, bail};
use eframe::egui;

use crate::logic::fetch::ImageFetcher;

/// Largest thumbnail edge kept for gallery tiles.
const THUMBNAIL_MAX: u32 = 256;

/// User-facing admission error taxonomy. Exactly one of these is shown under
/// the form at a time; a newer submission outcome supersedes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdmissionError {
    /// Submitted URL was blank after trimming; rejected before any I/O.
    EmptyUrl,
    /// URL was provided but the loadability check failed.
    InvalidImage,
}

impl fmt::Display for AdmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdmissionError::EmptyUrl => write!(f, "Please enter an image URL."),
            AdmissionError::InvalidImage => write!(f, "The URL is not a loadable image."),
        }
    }
}

/// Fetch `url` and decode it as an image.
///
/// Success means the resource is a loadable image: it was retrieved
/// without transport error, with a success status, and its bytes decode as a
/// supported raster format. Returns the decoded pixels downscaled for the
/// gallery tile, so the thumbnail costs no second fetch.
pub async fn validate_image(fetcher: &dyn ImageFetcher, url: &str) -> Result<egui::ColorImage> {
    let body = fetcher.fetch(url).await?;
    if !body.is_success() {
        bail!("HTTP status {} for {url}", body.status);
    }

    let decoded = image::load_from_memory(&body.bytes)
        .with_context(|| format!("Response from {url} is not a decodable image"))?;

    let thumb = decoded.thumbnail(THUMBNAIL_MAX, THUMBNAIL_MAX).to_rgba8();
    let size = [thumb.width() as usize, thumb.height() as usize];
    let pixels = thumb.into_raw();
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, &pixels))
}

#[cfg(test)]
mod tests {
    use anyhow::{Result, anyhow};
    use async_trait::async_trait;

    use super::{AdmissionError, validate_image};
    use crate::logic::fetch::{FetchedBody, ImageFetcher};

    struct StubFetcher {
        status: u16,
        bytes: Vec<u8>,
        fault: bool,
    }

    #[async_trait]
    impl ImageFetcher for StubFetcher {
        async fn fetch(&self, _url: &str) -> Result<FetchedBody> {
            if self.fault {
                return Err(anyhow!("connection refused"));
            }
            Ok(FetchedBody {
                status: self.status,
                bytes: self.bytes.clone(),
            })
        }
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png)
            .expect("png encoded");
        out.into_inner()
    }

    #[tokio::test]
    async fn accepts_a_decodable_image_and_returns_a_bounded_thumbnail() {
        let fetcher = StubFetcher {
            status: 200,
            bytes: png_bytes(400, 300),
            fault: false,
        };

        let thumb = validate_image(&fetcher, "https://example.com/ok.png")
            .await
            .expect("image admitted");

        assert!(thumb.size[0] <= 256 && thumb.size[1] <= 256);
    }

    #[tokio::test]
    async fn rejects_bytes_that_do_not_decode() {
        let fetcher = StubFetcher {
            status: 200,
            bytes: b"definitely not an image".to_vec(),
            fault: false,
        };

        let result = validate_image(&fetcher, "https://example.com/broken").await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn rejects_non_success_status_without_decoding() {
        let fetcher = StubFetcher {
            status: 404,
            bytes: png_bytes(4, 4),
            fault: false,
        };

        let result = validate_image(&fetcher, "https://example.com/missing.png").await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn rejects_transport_faults() {
        let fetcher = StubFetcher {
            status: 200,
            bytes: Vec::new(),
            fault: true,
        };

        let result = validate_image(&fetcher, "https://example.com/unreachable").await;

        assert!(result.is_err());
    }

    #[test]
    fn error_messages_are_user_facing_strings() {
        assert_eq!(
            AdmissionError::EmptyUrl.to_string(),
            "Please enter an image URL."
        );
        assert_eq!(
            AdmissionError::InvalidImage.to_string(),
            "The URL is not a loadable image."
        );
    }
}
