/// All errors that can occur in kaldiprep.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0} environment variable is not set. Cannot proceed.")]
    MissingSetting(&'static str),

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("catalogue contains no records")]
    EmptyCatalogue,

    #[error("catalogue error: {0}")]
    Catalogue(#[from] csv::Error),

    #[error("download error: {0}")]
    Download(String),

    #[cfg(feature = "download")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_missing_setting() {
        let e = Error::MissingSetting("ALVEO_API_KEY");
        assert_eq!(
            e.to_string(),
            "ALVEO_API_KEY environment variable is not set. Cannot proceed."
        );
    }

    #[test]
    fn test_error_display_invalid_option() {
        let e = Error::InvalidOption("train fraction 1.5".into());
        assert_eq!(e.to_string(), "invalid option: train fraction 1.5");
    }

    #[test]
    fn test_error_display_empty_catalogue() {
        assert_eq!(Error::EmptyCatalogue.to_string(), "catalogue contains no records");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let e: Error = io_err.into();
        assert!(matches!(e, Error::Io(_)));
        assert!(e.to_string().contains("read-only"));
    }

    #[test]
    fn test_error_debug_impl() {
        let e = Error::Download("404 Not Found".into());
        let debug = format!("{:?}", e);
        assert!(debug.contains("Download"));
    }
}
