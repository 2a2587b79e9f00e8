//! Upload policy: the queries sent to the policy provider and the
//! checks hosts can run against the limits it reports.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reply callback for a max-file-size query.
pub type SizeLimitReply = Box<dyn FnOnce(Option<u64>)>;

/// Reply callback for an allowed-mime-types query.
pub type MimeTypesReply = Box<dyn FnOnce(Option<Vec<String>>)>;

/// An outbound query to the policy provider.
///
/// Each query carries the callback the provider must eventually invoke.
/// The provider may answer synchronously or after any delay.
pub enum PolicyQuery {
    /// Ask for the max file size, in bytes.
    MaxFileSizeLimit { reply: SizeLimitReply },
    /// Ask for the list of accepted mime types.
    AllowedMimeTypes { reply: MimeTypesReply },
}

impl PolicyQuery {
    /// Name of the event as seen by the upload service.
    #[must_use]
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::MaxFileSizeLimit { .. } => "mfuGetMaxFileSizeLimit",
            Self::AllowedMimeTypes { .. } => "mfuGetAllowedMimeTypes",
        }
    }

    /// Hand the query to `provider`.
    pub fn dispatch(self, provider: &dyn PolicyProvider) {
        match self {
            Self::MaxFileSizeLimit { reply } => provider.max_file_size_limit(reply),
            Self::AllowedMimeTypes { reply } => provider.allowed_mime_types(reply),
        }
    }
}

impl fmt::Debug for PolicyQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyQuery")
            .field("event", &self.event_name())
            .finish_non_exhaustive()
    }
}

/// The upload service answering policy queries.
pub trait PolicyProvider {
    /// Answer a `mfuGetMaxFileSizeLimit` query.
    fn max_file_size_limit(&self, reply: SizeLimitReply);

    /// Answer a `mfuGetAllowedMimeTypes` query.
    fn allowed_mime_types(&self, reply: MimeTypesReply);
}

/// Read access to the properties a policy check needs.
pub trait FileMeta {
    /// File name.
    fn name(&self) -> String;
    /// Size in bytes.
    fn size(&self) -> u64;
    /// Mime type, if known.
    fn mime_type(&self) -> Option<String>;
}

/// A file rejected by the current policy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyViolation {
    /// The file exceeds the max file size.
    #[error("{name} is {size} bytes, over the {limit} byte limit")]
    TooLarge { name: String, size: u64, limit: u64 },

    /// The file's mime type is not in the allowed list.
    #[error("{name} has type {}, which is not allowed", .mime.as_deref().unwrap_or("unknown"))]
    MimeNotAllowed { name: String, mime: Option<String> },
}

/// The latest policy values delivered by the provider.
///
/// `None` means the provider did not restrict that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicySnapshot {
    /// Max file size in bytes.
    pub max_file_size: Option<u64>,
    /// Accepted mime types (`image/png`, `image/*`, ...).
    pub allowed_mime_types: Option<Vec<String>>,
}

impl PolicySnapshot {
    /// Check one file against the policy.
    ///
    /// An absent or empty mime list accepts every type, mirroring the
    /// file input, which drops its `accept` filter in that case.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyViolation::TooLarge`] when the file is over the
    /// size limit, or [`PolicyViolation::MimeNotAllowed`] when a mime
    /// list is set and no entry matches the file's type.
    pub fn check(&self, file: &impl FileMeta) -> Result<(), PolicyViolation> {
        if let Some(limit) = self.max_file_size {
            let size = file.size();
            if size > limit {
                return Err(PolicyViolation::TooLarge {
                    name: file.name(),
                    size,
                    limit,
                });
            }
        }

        if let Some(allowed) = self.allowed_mime_types.as_deref().filter(|a| !a.is_empty()) {
            let mime = file.mime_type();
            let matched = mime
                .as_deref()
                .is_some_and(|m| allowed.iter().any(|pattern| mime_matches(pattern, m)));
            if !matched {
                return Err(PolicyViolation::MimeNotAllowed {
                    name: file.name(),
                    mime,
                });
            }
        }

        Ok(())
    }

    /// Split `files` into those passing [`check`](Self::check) and the
    /// rejected ones with their violation.
    #[must_use]
    pub fn partition<F: FileMeta>(&self, files: Vec<F>) -> (Vec<F>, Vec<(F, PolicyViolation)>) {
        let mut accepted = Vec::new();
        let mut rejected = Vec::new();
        for file in files {
            match self.check(&file) {
                Ok(()) => accepted.push(file),
                Err(violation) => rejected.push((file, violation)),
            }
        }
        (accepted, rejected)
    }
}

/// Whether `mime` matches an `accept`-style `pattern`.
///
/// Comparison is case-insensitive and ignores parameters after `;`.
/// `type/*` matches any subtype and `*/*` matches everything.
#[must_use]
pub fn mime_matches(pattern: &str, mime: &str) -> bool {
    let pattern = essence(pattern);
    let mime = essence(mime);
    if pattern == "*/*" {
        return true;
    }
    match (pattern.split_once('/'), mime.split_once('/')) {
        (Some((p_type, "*")), Some((m_type, _))) => p_type.eq_ignore_ascii_case(m_type),
        (Some(_), Some(_)) => pattern.eq_ignore_ascii_case(mime),
        _ => false,
    }
}

fn essence(mime: &str) -> &str {
    mime.split_once(';').map_or(mime, |(essence, _)| essence).trim()
}
