//! Parsing utilities shared by the tree and barcode text formats

/// Implement [`std::str::FromStr`] using parser. Type must have `parse` method implemented.
macro_rules! impl_from_str_via_parser {
    ($t: ident) => {
        impl std::str::FromStr for $t {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match $t::parse($crate::parsing::Parser::new(s)) {
                    Some((p, result)) if p.input.is_empty() => Ok(result),
                    Some(_) => Err("Parse error: leftover input"),
                    None => Err("Parse error: parser failed"),
                }
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $t {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.to_string())
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $t {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                use std::str::FromStr;

                $t::from_str(&String::deserialize(deserializer)?).map_err(serde::de::Error::custom)
            }
        }
    };
}
pub(crate) use impl_from_str_via_parser;

/// Unwrap an option or return `None` from the enclosing parser
macro_rules! try_option {
    ($e:expr) => {
        match $e {
            Some(v) => v,
            None => return None,
        }
    };
}
pub(crate) use try_option;

/// Run a parser with surrounding whitespace skipped
macro_rules! lexeme {
    ($p:expr, $f:expr) => {{
        match $f($p.trim_whitespace()) {
            Some((p, val)) => Some((p.trim_whitespace(), val)),
            None => None,
        }
    }};
}
pub(crate) use lexeme;

/// `const`-capable parser over a string slice. Labels and barcodes are ascii, so every
/// consumed prefix ends on a char boundary.
#[must_use]
#[derive(Debug, Clone, Copy)]
pub struct Parser<'s> {
    /// Remaining unparsed input
    pub input: &'s str,
}

impl<'s> Parser<'s> {
    /// Create new parser marking the beginning of the input
    pub const fn new(input: &'s str) -> Parser<'s> {
        Parser { input }
    }

    const fn rest(bytes: &'s [u8]) -> Parser<'s> {
        match core::str::from_utf8(bytes) {
            Ok(input) => Parser { input },
            Err(_) => unreachable!(),
        }
    }

    /// Remove whitespace from the beginning of the input
    pub const fn trim_whitespace(self) -> Parser<'s> {
        let mut bytes = self.input.as_bytes();
        while let [b' ' | b'\t' | b'\n' | b'\r', rest @ ..] = bytes {
            bytes = rest;
        }
        Parser::rest(bytes)
    }

    /// Consume `expected` if the input starts with it
    pub const fn parse_ascii_char(self, expected: char) -> Option<Parser<'s>> {
        match self.input.as_bytes() {
            [b, rest @ ..] if b.is_ascii() && *b as char == expected => Some(Parser::rest(rest)),
            _ => None,
        }
    }

    /// Parse a non-empty run of decimal digits. Fails on `u32` overflow.
    pub const fn parse_u32(self) -> Option<(Parser<'s>, u32)> {
        let mut bytes = self.input.as_bytes();
        if !matches!(bytes, [b'0'..=b'9', ..]) {
            return None;
        }

        let mut acc: u32 = 0;
        while let [digit @ b'0'..=b'9', rest @ ..] = bytes {
            acc = try_option!(acc.checked_mul(10));
            acc = try_option!(acc.checked_add((*digit - b'0') as u32));
            bytes = rest;
        }
        Some((Parser::rest(bytes), acc))
    }
}
