use thiserror::Error;

/// Errors returned by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Input slice is empty.
    #[error("empty input")]
    EmptyInput,

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Two sketches cannot be compared (different k-mer size, molecule type, hash seed,
    /// or a sketch that is not scaled).
    #[error("incompatible sketches {left} and {right}: {reason}")]
    IncompatibleSketches {
        /// Name of the first sketch.
        left: String,
        /// Name of the second sketch.
        right: String,
        /// Which parameter differs.
        reason: String,
    },

    /// A containment comparison failed during clustering.
    #[error("comparing {candidate} against founder {founder}: {source}")]
    Containment {
        /// Origin of the founder.
        founder: String,
        /// Origin of the candidate item.
        candidate: String,
        /// Underlying sketch error.
        #[source]
        source: Box<Error>,
    },

    /// A source yielded no sketch matching the selection.
    #[error("no sketch with ksize {ksize} and moltype {moltype} in {origin}")]
    NoMatchingSketch {
        /// Source path.
        origin: String,
        /// Requested k-mer size.
        ksize: u32,
        /// Requested molecule type.
        moltype: String,
    },

    /// A CSV input lacks a required column.
    #[error("missing column {column} in {path}")]
    MissingColumn {
        /// Column name.
        column: &'static str,
        /// File that was read.
        path: String,
    },

    /// I/O failure, with the path involved.
    #[error("{path}: {source}")]
    Io {
        /// File or directory.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Malformed signature JSON.
    #[error("{path}: {source}")]
    Json {
        /// File that was parsed.
        path: String,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// CSV read or write failure.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    pub(crate) fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
