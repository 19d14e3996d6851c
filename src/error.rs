// A tiny error type so we don't rely on anyhow/thiserror.
// Every variant states *where* things went wrong. The scratch core itself
// never raises these: resource failures fall back to a visual default, so
// errors only exist at the demo's window/decoding boundary.
use std::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    WindowInit(String),   // Creating the window failed
    WindowUpdate(String), // Updating the window buffer failed
    ImageDecode(String),  // Decoding a foreground image from disk failed
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WindowInit(s) => write!(f, "Window init error: {s}"),
            Error::WindowUpdate(s) => write!(f, "Window update error: {s}"),
            Error::ImageDecode(s) => write!(f, "Image decode error: {s}"),
        }
    }
}

impl std::error::Error for Error {}
