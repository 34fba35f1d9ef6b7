use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::Error;
use crate::page::Page;

/// Error payload the API attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PageBody<T> {
    data: Vec<T>,
    #[serde(default)]
    paging: Paging,
}

#[derive(Debug, Default, Deserialize)]
struct Paging {
    previous: Option<String>,
    next: Option<String>,
}

/// Single entities wrapped in a `data` envelope (forum topic detail).
#[derive(Debug, Deserialize)]
struct DataBody<T> {
    data: T,
}

/// Map a status code onto the error taxonomy. 2xx passes through.
///
/// Pure and side-effect-free; retry and refresh policy belong to the caller.
pub(crate) fn check_status(status: u16, body: &[u8]) -> Result<(), Error> {
    if (200..300).contains(&status) {
        return Ok(());
    }
    let message = extract_message(body);
    Err(match status {
        400 => Error::InvalidParameters(message),
        401 => Error::InvalidAuth(message),
        403 => Error::Forbidden(message),
        _ => Error::FailedRequest {
            status: Some(status),
            message,
        },
    })
}

/// Decode a single-entity response body.
pub(crate) fn decode_entity<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T, Error> {
    check_status(status, body)?;
    serde_json::from_slice(body).map_err(|e| malformed(status, e))
}

/// Decode a single entity wrapped in a `data` envelope.
pub(crate) fn decode_data_entity<T: DeserializeOwned>(
    status: u16,
    body: &[u8],
) -> Result<T, Error> {
    check_status(status, body)?;
    let wrapper: DataBody<T> = serde_json::from_slice(body).map_err(|e| malformed(status, e))?;
    Ok(wrapper.data)
}

/// Decode a listing response body into a [`Page`].
pub(crate) fn decode_page<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<Page<T>, Error> {
    check_status(status, body)?;
    let page: PageBody<T> = serde_json::from_slice(body).map_err(|e| malformed(status, e))?;
    Ok(Page::new(page.data, page.paging.previous, page.paging.next))
}

fn malformed(status: u16, e: serde_json::Error) -> Error {
    Error::FailedRequest {
        status: Some(status),
        message: format!("malformed response body: {e}"),
    }
}

/// Pull a human-readable message out of an error body, falling back to the
/// raw text.
fn extract_message(body: &[u8]) -> String {
    if let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) {
        if let Some(message) = parsed.message.or(parsed.error) {
            if !message.is_empty() {
                return message;
            }
        }
    }
    String::from_utf8_lossy(body).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Thing {
        id: u64,
        title: String,
    }

    #[test]
    fn test_200_decodes_entity() {
        let thing: Thing = decode_entity(200, br#"{"id":42,"title":"X"}"#).unwrap();
        assert_eq!(
            thing,
            Thing {
                id: 42,
                title: "X".into()
            }
        );
    }

    #[test]
    fn test_200_listing_decodes_page_with_cursors() {
        let body = br#"{
            "data": [{"id":1,"title":"a"},{"id":2,"title":"b"}],
            "paging": {
                "previous": "https://api.example/v2/anime?offset=0",
                "next": "https://api.example/v2/anime?offset=2"
            }
        }"#;
        let page: Page<Thing> = decode_page(200, body).unwrap();
        assert_eq!(page.items().len(), 2);
        assert_eq!(page.previous().unwrap(), "https://api.example/v2/anime?offset=0");
        assert_eq!(page.next().unwrap(), "https://api.example/v2/anime?offset=2");
    }

    #[test]
    fn test_200_listing_without_paging_block() {
        let page: Page<Thing> = decode_page(200, br#"{"data":[]}"#).unwrap();
        assert!(page.items().is_empty());
        assert!(page.next().is_none());
        assert!(page.previous().is_none());
    }

    #[test]
    fn test_400_maps_to_invalid_parameters() {
        let err = decode_entity::<Thing>(400, br#"{"message":"invalid q","error":"bad_request"}"#)
            .unwrap_err();
        match err {
            Error::InvalidParameters(message) => assert_eq!(message, "invalid q"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_401_maps_to_invalid_auth() {
        let err = decode_entity::<Thing>(401, br#"{"error":"invalid_token"}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidAuth(m) if m == "invalid_token"));
    }

    #[test]
    fn test_403_maps_to_forbidden() {
        let err = decode_entity::<Thing>(403, b"").unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
    }

    #[test]
    fn test_other_status_maps_to_failed_request() {
        let err = decode_entity::<Thing>(500, b"internal error").unwrap_err();
        match err {
            Error::FailedRequest { status, message } => {
                assert_eq!(status, Some(500));
                assert_eq!(message, "internal error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_2xx_body_is_failed_request() {
        let err = decode_entity::<Thing>(200, b"<html>not json</html>").unwrap_err();
        assert!(matches!(err, Error::FailedRequest { status: Some(200), .. }));
    }

    #[test]
    fn test_data_envelope_unwrapped() {
        let thing: Thing =
            decode_data_entity(200, br#"{"data":{"id":7,"title":"t"},"paging":{}}"#).unwrap();
        assert_eq!(thing.id, 7);
    }
}
