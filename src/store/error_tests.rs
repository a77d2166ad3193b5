//! Unit tests for store error types

#[cfg(test)]
mod tests {
    use crate::store::error::StoreError;
    use std::error::Error;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_poisoned_error_display() {
        let error = StoreError::Poisoned("writer panicked".to_string());
        assert_eq!(error.to_string(), "Store lock poisoned: writer panicked");
    }

    #[test]
    fn test_error_debug() {
        let error = StoreError::Poisoned("test error".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Poisoned"));
        assert!(debug.contains("test error"));
    }

    #[test]
    fn test_error_source() {
        let error = StoreError::Poisoned("x".to_string());
        assert!(error.source().is_none());
    }

    #[test]
    fn test_from_poison_error() {
        let lock = Arc::new(Mutex::new(0));
        let cloned = Arc::clone(&lock);
        let _ = std::thread::spawn(move || {
            let _guard = cloned.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        let err = lock.lock().map(|_| ()).map_err(StoreError::from).unwrap_err();
        assert!(matches!(err, StoreError::Poisoned(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StoreError>();
    }
}
