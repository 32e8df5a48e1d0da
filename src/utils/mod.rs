use std::env;
use std::ffi::CStr;
use std::io::Write;
use std::path::PathBuf;
use std::{mem, ptr};

use anyhow::{anyhow, ensure, Context};
use tracing_subscriber::EnvFilter;

pub mod spawning;

const SCREENSHOT_NAME_FORMAT: &CStr = c"stackwm-%Y-%m-%dT%H:%M:%SZ.ppm";

/// Installs the global tracing subscriber.
///
/// Filter directives come from `RUST_LOG`, defaulting to debug output for stackwm only. Fails if
/// a subscriber is already installed.
pub fn init_logging() -> anyhow::Result<()> {
    let directives = env::var("RUST_LOG").unwrap_or_else(|_| "stackwm=debug".to_owned());
    let env_filter = EnvFilter::builder().parse_lossy(directives);
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(env_filter)
        .try_init()
        .map_err(|err| anyhow!("error initializing logging: {err}"))
}

/// File name for a screenshot taken at `time` (seconds since the epoch), in UTC.
pub fn screenshot_name(time: libc::time_t) -> anyhow::Result<String> {
    let mut buf = [0u8; 64];

    // SAFETY: tm is plain data filled in by gmtime_r; strftime writes at most buf.len() bytes.
    let len = unsafe {
        let mut tm: libc::tm = mem::zeroed();
        ensure!(
            !libc::gmtime_r(&time, &mut tm).is_null(),
            "error converting time {time}"
        );
        libc::strftime(
            buf.as_mut_ptr().cast(),
            buf.len(),
            SCREENSHOT_NAME_FORMAT.as_ptr(),
            &tm,
        )
    };
    ensure!(len > 0, "error formatting screenshot name");

    let name = std::str::from_utf8(&buf[..len]).context("screenshot name is not UTF-8")?;
    Ok(name.to_owned())
}

/// Path of a new screenshot in the working directory.
pub fn make_screenshot_path() -> anyhow::Result<PathBuf> {
    // SAFETY: time() accepts a null pointer.
    let now = unsafe { libc::time(ptr::null_mut()) };
    screenshot_name(now).map(PathBuf::from)
}

/// Encodes RGBA pixels, stored bottom row first, as a binary PPM.
///
/// Alpha is dropped and rows are written top to bottom.
pub fn write_ppm_rgba8(
    mut w: impl Write,
    width: u32,
    height: u32,
    rgba: &[u8],
) -> anyhow::Result<()> {
    let stride = width as usize * 4;
    ensure!(
        rgba.len() == stride * height as usize,
        "expected {} bytes of pixels, got {}",
        stride * height as usize,
        rgba.len()
    );

    write!(w, "P6\n{width} {height}\n255\n")?;

    if stride > 0 {
        let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
        for row in rgba.chunks_exact(stride).rev() {
            for px in row.chunks_exact(4) {
                rgb.extend_from_slice(&px[..3]);
            }
        }
        w.write_all(&rgb)?;
    }

    w.flush()?;
    Ok(())
}
