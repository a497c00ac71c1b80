use bytes::Bytes;
use std::borrow::Cow;
use std::str;

/// An owned header name.
///
/// The stored casing is whatever the backing store retained (normalized
/// inserts are lower-case, host-materialized entries keep the handle's
/// casing); all comparisons are ASCII-case-insensitive regardless.
#[derive(Debug, Clone, Eq)]
pub struct HeaderName {
    pub(crate) bytes: Bytes,
}

impl HeaderName {
    /// The name is trusted to be a valid token; entries crossing the engine
    /// boundary go through [`normalize_name`](crate::header::normalize_name).
    #[inline]
    pub fn new(name: &str) -> Self {
        Self {
            bytes: Bytes::copy_from_slice(name.as_bytes()),
        }
    }

    #[inline]
    pub(crate) fn from_cow(name: Cow<'_, str>) -> Self {
        match name {
            Cow::Borrowed(s) => Self::new(s),
            Cow::Owned(s) => Self {
                bytes: Bytes::from(s),
            },
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        // SAFETY: always constructed from str
        unsafe { str::from_utf8_unchecked(&self.bytes) }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The lower-case rendering used at the presentation boundary.
    #[inline]
    pub fn to_lowercase(&self) -> String {
        self.as_str().to_ascii_lowercase()
    }

    #[inline]
    pub(crate) fn is_set_cookie(&self) -> bool {
        self.bytes.eq_ignore_ascii_case(b"set-cookie")
    }
}

impl PartialEq<HeaderName> for HeaderName {
    #[inline]
    fn eq(&self, other: &HeaderName) -> bool {
        self.bytes.eq_ignore_ascii_case(&other.bytes)
    }
}

impl<'a> PartialEq<&'a str> for HeaderName {
    #[inline]
    fn eq(&self, other: &&'a str) -> bool {
        self.bytes.eq_ignore_ascii_case(other.as_bytes())
    }
}

impl<'a> PartialEq<&'a [u8]> for HeaderName {
    #[inline]
    fn eq(&self, other: &&'a [u8]) -> bool {
        self.bytes.eq_ignore_ascii_case(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_eq() {
        let name = HeaderName::new("Content-Type");

        assert_eq!(name, name.clone());
        assert_eq!(name, HeaderName::new("content-type"));
        assert_eq!(name, "cOnTeNt-TyPe");
        assert_eq!(name, b"CONTENT-TYPE".as_ref());
        assert_eq!(name.as_str(), "Content-Type");
        assert_eq!(name.to_lowercase(), "content-type");
    }

    #[test]
    fn test_set_cookie() {
        assert!(HeaderName::new("Set-Cookie").is_set_cookie());
        assert!(HeaderName::new("set-cookie").is_set_cookie());
        assert!(!HeaderName::new("set-cookie2").is_set_cookie());
        assert!(!HeaderName::new("cookie").is_set_cookie());
    }
}
