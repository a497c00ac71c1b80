use bytes::Bytes;
use std::borrow::Cow;
use std::str;

/// An owned header value; already-decoded text with surrounding whitespace
/// stripped and no interior `CR`, `LF` or `NUL`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HeaderValue {
    pub(crate) value: Bytes,
}

impl HeaderValue {
    /// The value is trusted to be canonical; entries crossing the engine
    /// boundary go through [`normalize_value`](crate::header::normalize_value).
    #[inline]
    pub fn new(value: &str) -> Self {
        Self {
            value: Bytes::copy_from_slice(value.as_bytes()),
        }
    }

    #[inline]
    pub(crate) fn from_cow(value: Cow<'_, str>) -> Self {
        match value {
            Cow::Borrowed(s) => Self::new(s),
            Cow::Owned(s) => Self {
                value: Bytes::from(s),
            },
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.value
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        // SAFETY: always constructed from str
        unsafe { str::from_utf8_unchecked(&self.value) }
    }
}

impl<'a> PartialEq<&'a str> for HeaderValue {
    #[inline]
    fn eq(&self, other: &&'a str) -> bool {
        self.value == other.as_bytes()
    }
}
