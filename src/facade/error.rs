use crate::facade::fingerprint::Fingerprint;
use crate::model::NameId;

/// Errors raised while opening or reading the preprocessed graph.
///
/// Construction-time errors here are fatal: per spec.md §7,
/// `DataUnavailable`/`CorruptData` stop the process rather than
/// degrade a single request.
#[derive(Debug)]
pub enum FacadeError {
    DataUnavailable(String),
    FingerprintMismatch {
        expected: Fingerprint,
        found: Fingerprint,
    },
    ChecksumMismatch {
        facade: u32,
        request: u32,
    },
    CorruptData(String),
    NameOutOfRange(NameId),
}

impl std::fmt::Display for FacadeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FacadeError::DataUnavailable(msg) => write!(f, "missing or unreadable data file: {msg}"),
            FacadeError::FingerprintMismatch { expected, found } => write!(
                f,
                "fingerprint mismatch: expected {expected:?}, found {found:?}"
            ),
            FacadeError::ChecksumMismatch { facade, request } => write!(
                f,
                "checksum mismatch: facade checksum {facade} does not match request checksum {request}"
            ),
            FacadeError::CorruptData(msg) => write!(f, "corrupt preprocessing artefact: {msg}"),
            FacadeError::NameOutOfRange(id) => write!(f, "name id {id} out of range"),
        }
    }
}

impl std::error::Error for FacadeError {}

crate::impl_err!(FacadeError, Facade);
