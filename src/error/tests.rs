//! Tests for error types.

#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("chunk_overlap must be smaller than chunk_lines");
        assert_eq!(
            err.to_string(),
            "configuration error: chunk_overlap must be smaller than chunk_lines"
        );
    }

    #[test]
    fn test_store_error_conversion() {
        let store_err = StoreError::Api {
            status: 500,
            detail: "index unavailable".to_string(),
        };
        let err: Error = store_err.into();
        assert!(matches!(err, Error::Store(_)));
    }

    #[test]
    fn test_store_error_batch_display() {
        let err = StoreError::Batch {
            offset: 128,
            status: 413,
            detail: "payload too large".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "batch upsert failed at offset 128 (status 413): payload too large"
        );
    }

    #[test]
    fn test_embed_error_conversion() {
        let embed_err = EmbedError::Malformed("missing 'embedding' field".to_string());
        let err: Error = embed_err.into();
        assert!(matches!(err, Error::Embedding(_)));
        assert_eq!(
            err.to_string(),
            "embedding error: malformed embedding response: missing 'embedding' field"
        );
    }

    #[test]
    fn test_embed_error_backend_display() {
        let err = EmbedError::Backend {
            status: 404,
            detail: "model not found".to_string(),
        };
        assert_eq!(err.to_string(), "backend returned status 404: model not found");
    }

    #[test]
    fn test_watch_error_conversion() {
        let watch_err = WatchError::WatchFailed {
            path: "/tmp/project".to_string(),
            reason: "permission denied".to_string(),
        };
        let err: Error = watch_err.into();
        assert!(matches!(err, Error::Watch(_)));
        assert_eq!(
            err.to_string(),
            "watch error: failed to watch path '/tmp/project': permission denied"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_internal() {
        let err = Error::internal("worker exited unexpectedly");
        assert_eq!(err.to_string(), "internal error: worker exited unexpectedly");
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
