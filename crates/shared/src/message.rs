use serde::{Deserialize, Serialize};

/// Messages the page posts to the service worker. The wire format is an
/// object with a `type` tag so the worker can tell requests apart without
/// sniffing the payload shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WorkerRequest {
    /// Ask a waiting worker to call `skipWaiting()` and take over now
    #[serde(rename = "SKIP_WAITING")]
    SkipWaiting,
}

#[cfg(test)]
mod test {
    use super::WorkerRequest;

    #[test]
    fn skip_waiting_serializes_with_type_tag() {
        let json = serde_json::to_string(&WorkerRequest::SkipWaiting).unwrap();
        assert_eq!(json, r#"{"type":"SKIP_WAITING"}"#);
    }

    #[test]
    fn skip_waiting_deserializes_from_type_tag() {
        let request: WorkerRequest = serde_json::from_str(r#"{"type":"SKIP_WAITING"}"#).unwrap();
        assert_eq!(request, WorkerRequest::SkipWaiting);
    }

    #[test]
    fn unknown_type_tag_is_rejected() {
        assert!(serde_json::from_str::<WorkerRequest>(r#"{"type":"CLEAR_CACHE"}"#).is_err());
    }
}
