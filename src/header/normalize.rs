use crate::errors::HeadersError;
use std::borrow::Cow;
use std::cmp::Ordering;

macro_rules! byte_map {
    ($($flag:expr,)*) => ([
        $($flag != 0,)*
    ])
}

// HTTP token characters: letters, digits and ! # $ % & ' * + - . ^ _ ` | ~
#[rustfmt::skip]
static TOKEN_CHARS: [bool; 128] = byte_map![
    0, 0, 0, 0, 0, 0, 0, 0, //   0
    0, 0, 0, 0, 0, 0, 0, 0, //   8
    0, 0, 0, 0, 0, 0, 0, 0, //  16
    0, 0, 0, 0, 0, 0, 0, 0, //  24
    0, 1, 0, 1, 1, 1, 1, 1, //  32
    0, 0, 1, 1, 0, 1, 1, 0, //  40
    1, 1, 1, 1, 1, 1, 1, 1, //  48
    1, 1, 0, 0, 0, 0, 0, 0, //  56
    0, 1, 1, 1, 1, 1, 1, 1, //  64
    1, 1, 1, 1, 1, 1, 1, 1, //  72
    1, 1, 1, 1, 1, 1, 1, 1, //  80
    1, 1, 1, 0, 0, 0, 1, 1, //  88
    1, 1, 1, 1, 1, 1, 1, 1, //  96
    1, 1, 1, 1, 1, 1, 1, 1, // 104
    1, 1, 1, 1, 1, 1, 1, 1, // 112
    1, 1, 1, 0, 1, 0, 1, 0, // 120
];

/// The canonical form of a header name or value, plus whether it differs
/// from the literal input. `text` borrows the input unless canonicalization
/// had to rewrite it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Normalized<'b> {
    pub text: Cow<'b, str>,
    pub changed: bool,
}

impl Normalized<'_> {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Validates and canonicalizes a header name: rejects empty names and any
/// byte outside the token set, lower-cases ASCII letters.
///
/// Allocates only when lower-casing changed the input.
pub fn normalize_name(input: &str) -> Result<Normalized<'_>, HeadersError> {
    if input.is_empty() {
        return Err(HeadersError::EmptyHeaderName);
    }

    let bytes = input.as_bytes();
    let mut owned: Option<Vec<u8>> = None;
    for (i, &b) in bytes.iter().enumerate() {
        if b >= 128 || !TOKEN_CHARS[b as usize] {
            return Err(HeadersError::InvalidHeaderName(input.into()));
        }
        if b.is_ascii_uppercase() {
            owned.get_or_insert_with(|| bytes.to_vec())[i] = b.to_ascii_lowercase();
        }
    }

    Ok(match owned {
        Some(lowered) => Normalized {
            // SAFETY: the input is checked ASCII and lower-casing keeps it ASCII
            text: Cow::Owned(unsafe { String::from_utf8_unchecked(lowered) }),
            changed: true,
        },
        None => Normalized {
            text: Cow::Borrowed(input),
            changed: false,
        },
    })
}

/// Validates and canonicalizes a header value: strips leading and trailing
/// `SP`, `HT`, `CR`, `LF`, then rejects interior `CR`, `LF` and `NUL`.
///
/// Operates on the already-decoded text; never allocates, the canonical
/// form is a sub-slice of the input.
pub fn normalize_value(input: &str) -> Result<Normalized<'_>, HeadersError> {
    let trimmed = input.trim_matches(|c| matches!(c, ' ' | '\t' | '\r' | '\n'));

    if trimmed
        .bytes()
        .any(|b| matches!(b, b'\r' | b'\n' | b'\0'))
    {
        return Err(HeadersError::InvalidHeaderValue(input.into()));
    }

    Ok(Normalized {
        changed: trimmed.len() != input.len(),
        text: Cow::Borrowed(trimmed),
    })
}

/// ASCII-case-insensitive byte ordering; the one comparator behind the sort
/// index, name equality and the forbidden tables.
pub(crate) fn cmp_ignore_ascii_case(a: &[u8], b: &[u8]) -> Ordering {
    let mut ia = a.iter();
    let mut ib = b.iter();
    loop {
        match (ia.next(), ib.next()) {
            (Some(ca), Some(cb)) => {
                match ca.to_ascii_lowercase().cmp(&cb.to_ascii_lowercase()) {
                    Ordering::Equal => continue,
                    other => return other,
                }
            }
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
        }
    }
}
