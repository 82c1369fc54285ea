use std::io;
use std::path::PathBuf;

/// Errors raised while discovering routes or generating the routing module
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    /// The generated import would reference a file outside the project root
    #[error(
        "Route file \"{}\" is outside the project root \"{}\". Move your routes directory inside the project root.",
        file.display(),
        root.display()
    )]
    OutsideRoot { file: PathBuf, root: PathBuf },

    /// The file lives under a different filesystem root (e.g. another drive) than the project
    #[error(
        "Route file \"{}\" is on a different drive than the project root \"{}\". Move your routes directory to the same drive as the project.",
        file.display(),
        root.display()
    )]
    CrossRoot { file: PathBuf, root: PathBuf },

    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RouterError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = RouterError> = std::result::Result<T, E>;
