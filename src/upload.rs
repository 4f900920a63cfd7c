use std::fmt;
use thiserror::Error;

pub mod preview;
pub mod reader;
pub mod session;

#[cfg(test)]
pub(crate) mod fixture;

/// Anything the widget can hold as its selected file.
pub trait FileSource {
    fn name(&self) -> String;
    fn mime_type(&self) -> String;
    fn size(&self) -> f64;
}

impl FileSource for web_sys::File {
    fn name(&self) -> String {
        web_sys::File::name(self)
    }

    fn mime_type(&self) -> String {
        web_sys::Blob::type_(self)
    }

    fn size(&self) -> f64 {
        web_sys::Blob::size(self)
    }
}

struct AcceptedType {
    mime: &'static str,
    extensions: &'static [&'static str],
}

const IMAGE_TYPES: &[AcceptedType] = &[
    AcceptedType { mime: "image/jpeg", extensions: &["jpeg", "jpg"] },
    AcceptedType { mime: "image/png", extensions: &["png"] },
];

const VIDEO_TYPES: &[AcceptedType] = &[AcceptedType { mime: "video/mp4", extensions: &["mp4"] }];

/// Which kind of media a widget takes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MediaKind {
    #[default]
    Image,
    Video,
}

impl MediaKind {
    fn accepted(self) -> &'static [AcceptedType] {
        match self {
            MediaKind::Image => IMAGE_TYPES,
            MediaKind::Video => VIDEO_TYPES,
        }
    }

    /// Value for the `accept` attribute of a file input.
    pub fn accept_attribute(self) -> String {
        let types = self.accepted();
        types
            .iter()
            .map(|t| t.mime.to_string())
            .chain(
                types
                    .iter()
                    .flat_map(|t| t.extensions.iter().map(|ext| format!(".{}", ext))),
            )
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn noun(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    /// Returns the MIME type a file will be previewed as, or `None` if the
    /// file is not one this kind takes.
    ///
    /// A reported MIME type decides on its own. Only when the browser reports
    /// none is the extension consulted.
    pub fn resolve_mime(self, name: &str, mime: &str) -> Option<&'static str> {
        let mime = mime.trim();
        if !mime.is_empty() {
            return self
                .accepted()
                .iter()
                .find(|t| t.mime.eq_ignore_ascii_case(mime))
                .map(|t| t.mime);
        }

        let (_, ext) = name.rsplit_once('.')?;
        self.accepted()
            .iter()
            .find(|t| t.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .map(|t| t.mime)
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// Why a drop or browse selection was turned away.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("no file supplied")]
    NoFile,

    #[error("{count} files supplied, only one can be uploaded")]
    TooManyFiles { count: usize },

    #[error("'{name}' ({mime}) is not an accepted {kind} type")]
    UnsupportedType {
        name: String,
        mime: String,
        kind: MediaKind,
    },

    #[error("field is view-only")]
    ViewOnly,
}

/// Failure to turn a selected file into a preview.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("file read failed: {0}")]
    Read(String),
}

/// A single file that passed the accept policy.
#[derive(Debug, Clone, PartialEq)]
pub struct Accepted<F> {
    pub file: F,
    pub mime: &'static str,
}

/// Applies the single-file policy and the type filter for `kind`.
pub fn accept_single<F: FileSource>(kind: MediaKind, mut files: Vec<F>) -> Result<Accepted<F>, Rejection> {
    match files.len() {
        0 => return Err(Rejection::NoFile),
        1 => {}
        count => return Err(Rejection::TooManyFiles { count }),
    }

    let file = files.remove(0);
    let reported = file.mime_type();
    match kind.resolve_mime(&file.name(), &reported) {
        Some(mime) => Ok(Accepted { file, mime }),
        None => Err(Rejection::UnsupportedType {
            name: file.name(),
            mime: reported,
            kind,
        }),
    }
}
