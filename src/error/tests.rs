//! Tests for error types.

#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("invalid root");
        assert_eq!(err.to_string(), "configuration error: invalid root");
    }

    #[test]
    fn test_watcher_error_conversion() {
        let watch_err = WatcherError::WatchFailed {
            path: "/tmp/test".to_string(),
            reason: "permission denied".to_string(),
        };
        let err: Error = watch_err.into();
        assert!(matches!(err, Error::Watcher(_)));
    }

    #[test]
    fn test_watcher_error_channel_closed() {
        let err = WatcherError::ChannelClosed;
        assert_eq!(err.to_string(), "event channel closed");
    }

    #[test]
    fn test_formatter_error_launch() {
        let err = FormatterError::Launch {
            tool: "eslint".to_string(),
            reason: "No such file or directory".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to launch 'eslint': No such file or directory"
        );
    }

    #[test]
    fn test_formatter_error_non_zero_exit() {
        let err = FormatterError::NonZeroExit {
            tool: "phpfmt".to_string(),
            path: "/src/index.php".to_string(),
            status: "exit status: 2".to_string(),
        };
        let err: Error = err.into();
        assert!(matches!(err, Error::Formatter(_)));
        assert!(err.to_string().contains("exit status: 2"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        fn returns_err() -> Result<i32> {
            Err(Error::config("test error"))
        }

        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }

    #[test]
    fn test_error_internal() {
        let err = Error::internal("test internal error");
        assert_eq!(err.to_string(), "internal error: test internal error");
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn inner() -> Result<i32> {
            Err(Error::config("inner error"))
        }

        fn outer() -> Result<i32> {
            let _ = inner()?;
            Ok(0)
        }

        let result = outer();
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "configuration error: inner error"
        );
    }
}
