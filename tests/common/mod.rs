//! Shared helpers for integration tests: image fixtures, config files and
//! polling for asynchronous results.

#![allow(dead_code)]

use std::fs;
use std::future::Future;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Duration;

use image::{GenericImageView, ImageFormat, RgbImage};

/// Encode a gradient image of the given size.
pub fn encode_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 200])
    });
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).expect("failed to encode fixture image");
    buf.into_inner()
}

/// Write a gradient image to `path`, encoded by its extension.
pub fn write_image(path: &Path, width: u32, height: u32) {
    let format = ImageFormat::from_path(path).expect("fixture path needs an image extension");
    fs::write(path, encode_image(width, height, format)).expect("failed to write fixture image");
}

/// Decoded dimensions of the image at `path`.
pub fn dimensions(path: &Path) -> (u32, u32) {
    image::open(path).expect("failed to open image").dimensions()
}

/// Write a config file into `dir` and return its path.
pub fn write_config(dir: &Path, yaml: &str) -> PathBuf {
    let path = dir.join("config.yaml");
    fs::write(&path, yaml).expect("failed to write config");
    path
}

/// Poll `check` until it returns true or `timeout` elapses.
pub async fn wait_until<F>(timeout: Duration, mut check: F) -> bool
where
    F: FnMut() -> bool,
{
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    check()
}

/// Run `fut` with a generous timeout so a hung test fails instead of stalling.
pub async fn with_timeout<T>(fut: impl Future<Output = T>) -> T {
    tokio::time::timeout(Duration::from_secs(30), fut)
        .await
        .expect("test timed out")
}
