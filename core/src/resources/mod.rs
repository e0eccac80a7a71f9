//! Per-resource operations. Each is a thin call into the shared engine.

mod address;
mod parcel;

use crate::error::{ApiError, Result};

/// `/{collection}/{object_id}`, with `object_id` escaped as a single path
/// segment so `/`, `?` or `#` inside it cannot change the target.
pub(crate) fn object_path(collection: &str, object_id: &str) -> Result<String> {
    if object_id.is_empty() {
        return Err(ApiError::EmptyObjectId);
    }

    let root = "http://localhost/";
    let mut url = url::Url::parse(root).map_err(|source| ApiError::InvalidUrl {
        url: root.to_string(),
        source,
    })?;
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().push(collection).push(object_id);
    }
    Ok(url.path().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_id_is_unchanged() {
        assert_eq!(
            object_path("addresses", "d799c2679e644279b59fe661ac8fa488").unwrap(),
            "/addresses/d799c2679e644279b59fe661ac8fa488"
        );
    }

    #[test]
    fn reserved_characters_stay_in_one_segment() {
        assert_eq!(
            object_path("parcels", "a/b?c#d").unwrap(),
            "/parcels/a%2Fb%3Fc%23d"
        );
    }

    #[test]
    fn empty_id_is_rejected() {
        assert!(matches!(object_path("addresses", ""), Err(ApiError::EmptyObjectId)));
    }
}
