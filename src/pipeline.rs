//! The whole run: fetch, decode, choose a policy, transform, write.
//!
//! Every failure is returned as a [ResizeError]; deciding the exit status is left to the caller.
//! Either all steps succeed and exactly one file is written, or no file is written at all.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, info_span};

use crate::config::ResizeConfig;
use crate::decode::decode;
use crate::error::ResizeError;
use crate::fetch::Fetch;
use crate::format::{encode_options, SourceFormat};
use crate::output::{output_filename, write_new_file};
use crate::policy::ResizePolicy;
use crate::transform::{transform, TransformOptions};

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResizeSummary {
    pub path: PathBuf,
    pub format: SourceFormat,
    pub source_width: u32,
    pub source_height: u32,
    pub width: u32,
    pub height: u32,
    pub policy: ResizePolicy,
    pub bytes: usize,
}

pub fn run(config: &ResizeConfig, fetcher: &impl Fetch) -> Result<ResizeSummary, ResizeError> {
    let url = config.parsed_url()?;
    let _span = info_span!("resize_once", url = %url).entered();

    info!("fetching image");
    let input = fetcher.fetch(&url)?;

    let (header, image) = decode(&input)?;
    // the source bytes are not needed past this point
    drop(input);
    info!(
        format = header.format.description(),
        width = header.width,
        height = header.height,
        frames = image.frames.len().max(1),
        "decoded image"
    );
    if let Some(duration) = header.duration {
        info!("duration: {:.2} s", duration.as_secs_f64());
    }

    let (width, height, policy) =
        ResizePolicy::choose(config.width, config.height, config.stretch, &header);
    let output_type = header.format.output_type();
    let options = TransformOptions {
        format: header.format,
        width,
        height,
        policy,
        normalize_orientation: true,
        encode_options: encode_options(&output_type),
    };
    let policy_name: &'static str = policy.into();
    info!(width, height, policy = policy_name, output_type = %output_type, "transforming image");
    let transformed = transform(image, &options)?;

    let path = config
        .output_dir
        .join(output_filename(&url, header.format));
    write_new_file(&path, &transformed.bytes)?;
    info!(path = %path.display(), bytes = transformed.bytes.len(), "image written");

    Ok(ResizeSummary {
        path,
        format: header.format,
        source_width: header.width,
        source_height: header.height,
        width: transformed.width,
        height: transformed.height,
        policy,
        bytes: transformed.bytes.len(),
    })
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, io::Cursor};

    use image::{DynamicImage, ImageFormat, RgbImage};
    use url::Url;

    use super::*;
    use crate::error::{ErrorKind, ResizeError};
    use crate::ro_err;

    /// Serves the same bytes for every URL and counts the requests
    struct FakeFetcher {
        bytes: Vec<u8>,
        calls: Cell<u32>,
    }

    impl FakeFetcher {
        fn png(width: u32, height: u32) -> Self {
            let pixels = DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
                image::Rgb([(x % 256) as u8, (y % 256) as u8, 90])
            }));
            let mut bytes = Cursor::new(Vec::new());
            pixels.write_to(&mut bytes, ImageFormat::Png).unwrap();
            Self {
                bytes: bytes.into_inner(),
                calls: Cell::new(0),
            }
        }
    }

    impl Fetch for FakeFetcher {
        fn fetch(&self, _url: &Url) -> Result<Vec<u8>, ResizeError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.bytes.clone())
        }
    }

    struct DownFetcher;

    impl Fetch for DownFetcher {
        fn fetch(&self, url: &Url) -> Result<Vec<u8>, ResizeError> {
            Err(ro_err!(ErrorKind::Network, "GET {url} => connection refused"))
        }
    }

    fn config(dir: &std::path::Path, width: u32, height: u32, stretch: bool) -> ResizeConfig {
        ResizeConfig {
            url: "http://images.test/photos/flower.png".to_owned(),
            width,
            height,
            stretch,
            output_dir: dir.to_path_buf(),
            timeout_secs: None,
        }
    }

    fn dimensions(path: &std::path::Path) -> (u32, u32) {
        let img = image::open(path).unwrap();
        (img.width(), img.height())
    }

    #[test]
    fn fit_is_the_default() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = FakeFetcher::png(400, 200);
        let summary = run(&config(dir.path(), 250, 250, false), &fetcher).unwrap();

        assert_eq!(fetcher.calls.get(), 1);
        assert_eq!(summary.path, dir.path().join("flower.png"));
        assert_eq!(summary.policy, ResizePolicy::Fit);
        assert_eq!((summary.width, summary.height), (250, 125));
        assert_eq!(dimensions(&summary.path), (250, 125));
        assert_eq!(
            std::fs::metadata(&summary.path).unwrap().len() as usize,
            summary.bytes
        );
        // exactly one file
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn stretch_hits_the_exact_box() {
        let dir = tempfile::tempdir().unwrap();
        let summary = run(&config(dir.path(), 250, 250, true), &FakeFetcher::png(400, 200)).unwrap();
        assert_eq!(summary.policy, ResizePolicy::Stretch);
        assert_eq!(dimensions(&summary.path), (250, 250));
    }

    #[test]
    fn same_size_passes_through() {
        let dir = tempfile::tempdir().unwrap();
        let summary = run(&config(dir.path(), 120, 80, true), &FakeFetcher::png(120, 80)).unwrap();
        assert_eq!(summary.policy, ResizePolicy::NoResize);
        assert_eq!(dimensions(&summary.path), (120, 80));
    }

    #[test]
    fn animated_gif_keeps_every_frame() {
        use image::codecs::gif::{GifDecoder, GifEncoder};
        use image::{AnimationDecoder, Delay, Frame, Rgba, RgbaImage};

        let mut bytes = Vec::new();
        {
            let mut encoder = GifEncoder::new(&mut bytes);
            for color in [0u8, 120, 240] {
                let frame = Frame::from_parts(
                    RgbaImage::from_pixel(40, 20, Rgba([color, 0, 255 - color, 255])),
                    0,
                    0,
                    Delay::from_numer_denom_ms(100, 1),
                );
                encoder.encode_frame(frame).unwrap();
            }
        }
        let fetcher = FakeFetcher {
            bytes,
            calls: Cell::new(0),
        };
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path(), 20, 20, false);
        cfg.url = "http://images.test/dancing.gif".to_owned();

        let summary = run(&cfg, &fetcher).unwrap();
        assert_eq!(summary.format, SourceFormat::Gif);
        assert_eq!((summary.width, summary.height), (20, 10));

        let output = std::fs::read(&summary.path).unwrap();
        let frames = GifDecoder::new(Cursor::new(output))
            .unwrap()
            .into_frames()
            .collect_frames()
            .unwrap();
        assert_eq!(frames.len(), 3);
        for frame in &frames {
            assert_eq!(frame.buffer().dimensions(), (20, 10));
        }
    }

    #[test]
    fn existing_output_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("flower.png");
        std::fs::write(&existing, b"do not touch").unwrap();

        let err = run(&config(dir.path(), 250, 250, false), &FakeFetcher::png(400, 200)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::FileExists);
        assert_eq!(std::fs::read(&existing).unwrap(), b"do not touch");
    }

    #[test]
    fn network_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&config(dir.path(), 250, 250, false), &DownFetcher).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Network);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn undecodable_body_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = FakeFetcher {
            bytes: b"<html>404</html>".to_vec(),
            calls: Cell::new(0),
        };
        let err = run(&config(dir.path(), 250, 250, false), &fetcher).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DecodeInit);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn invalid_url_is_rejected_before_fetching() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = FakeFetcher::png(10, 10);
        let mut cfg = config(dir.path(), 250, 250, false);
        cfg.url = "::not a url::".to_owned();
        assert_eq!(run(&cfg, &fetcher).unwrap_err().kind, ErrorKind::Config);
        assert_eq!(fetcher.calls.get(), 0);
    }
}
