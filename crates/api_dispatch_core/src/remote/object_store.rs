use serde::{Deserialize, Serialize};

use crate::failure::{Failure, RemoteError};

pub const NO_SUCH_KEY: &str = "NoSuchKey";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutObjectReceipt {
    pub e_tag: Option<String>,
    pub version_id: Option<String>,
}

pub trait ObjectService {
    fn put_object(&self, bucket: &str, key: &str, body: &[u8])
        -> Result<PutObjectReceipt, RemoteError>;

    /// Blocks until the store reports the object as present.
    fn wait_until_exists(&self, bucket: &str, key: &str) -> Result<(), RemoteError>;

    fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, RemoteError>;
}

pub fn put_object(
    service: &impl ObjectService,
    key: &str,
    bucket: &str,
    body: &[u8],
    wait: bool,
) -> Result<PutObjectReceipt, Failure> {
    tracing::info!(key, bucket, "putting object");
    let receipt = service.put_object(bucket, key, body)?;

    if wait {
        service.wait_until_exists(bucket, key)?;
    }

    Ok(receipt)
}

pub fn get_object(
    service: &impl ObjectService,
    key: &str,
    bucket: &str,
) -> Result<Vec<u8>, Failure> {
    tracing::info!(key, bucket, "getting object");
    service.get_object(bucket, key).map_err(|error| {
        if error.code == NO_SUCH_KEY {
            Failure::not_found(format!("Key {key} not found in bucket {bucket}"))
        } else {
            Failure::from(error)
        }
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use super::*;
    use crate::failure::StatusCode;

    #[derive(Default)]
    struct InMemoryObjects {
        objects: Mutex<BTreeMap<(String, String), Vec<u8>>>,
        waits: Mutex<Vec<String>>,
    }

    impl ObjectService for InMemoryObjects {
        fn put_object(
            &self,
            bucket: &str,
            key: &str,
            body: &[u8],
        ) -> Result<PutObjectReceipt, RemoteError> {
            self.objects
                .lock()
                .expect("poisoned mutex")
                .insert((bucket.to_string(), key.to_string()), body.to_vec());
            Ok(PutObjectReceipt {
                e_tag: Some(format!("\"{}\"", body.len())),
                version_id: None,
            })
        }

        fn wait_until_exists(&self, _bucket: &str, key: &str) -> Result<(), RemoteError> {
            self.waits.lock().expect("poisoned mutex").push(key.to_string());
            Ok(())
        }

        fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, RemoteError> {
            if bucket == "forbidden" {
                return Err(RemoteError::new("AccessDenied", "Access Denied"));
            }
            self.objects
                .lock()
                .expect("poisoned mutex")
                .get(&(bucket.to_string(), key.to_string()))
                .cloned()
                .ok_or_else(|| RemoteError::new(NO_SUCH_KEY, "The specified key does not exist."))
        }
    }

    #[test]
    fn put_then_get_returns_identical_bytes() {
        let store = InMemoryObjects::default();
        let body = [0u8, 159, 146, 150, b'\n', 255];

        put_object(&store, "reports/a.bin", "bucket", &body, false).expect("put should succeed");
        let fetched = get_object(&store, "reports/a.bin", "bucket").expect("get should succeed");

        assert_eq!(fetched, body.to_vec());
        assert!(store.waits.lock().expect("poisoned mutex").is_empty());
    }

    #[test]
    fn put_with_wait_blocks_on_existence() {
        let store = InMemoryObjects::default();

        put_object(&store, "k", "bucket", b"v", true).expect("put should succeed");

        assert_eq!(*store.waits.lock().expect("poisoned mutex"), vec!["k".to_string()]);
    }

    #[test]
    fn missing_key_is_not_found() {
        let store = InMemoryObjects::default();

        let error = get_object(&store, "nope", "bucket").expect_err("missing key should fail");

        assert_eq!(error.status(), StatusCode::NOT_FOUND);
        assert_eq!(error.to_string(), "Key nope not found in bucket bucket");
    }

    #[test]
    fn other_remote_errors_propagate_unchanged() {
        let store = InMemoryObjects::default();

        let error = get_object(&store, "k", "forbidden").expect_err("access denied should fail");

        assert_eq!(error, Failure::Fault("AccessDenied: Access Denied".to_string()));
    }
}
