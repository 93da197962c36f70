//! Error types for the pubkey extension codec.

use thiserror::Error;

/// Errors raised while decoding a `<pubkey/>` payload.
///
/// A well-formed payload that lacks one of its required children is not an
/// error; the decoder reports that as `Ok(None)`.
#[derive(Debug, Error)]
pub enum PubkeyError {
    /// The `<key>` text is not valid base64
    #[error("Invalid base64 key data: {0}")]
    Decode(#[from] base64::DecodeError),

    /// The XML event stream was malformed
    #[error("XML parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Malformed XML input, either from the tokenizer or from the event stream shape.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The XML tokenizer rejected the input
    #[error("{0}")]
    Xml(#[from] minidom::Error),

    /// Events ran out before the closing `</pubkey>` tag
    #[error("Event stream ended before </pubkey>")]
    UnexpectedEof,

    /// The element handed to the decoder is not a pubkey payload
    #[error("Expected <pubkey xmlns='urn:xmpp:pubkey:2'/>, found <{name} xmlns='{ns}'/>")]
    UnexpectedElement {
        /// Local name of the element found
        name: String,
        /// Namespace of the element found
        ns: String,
    },
}

impl ParseError {
    /// Create an unexpected-element error.
    pub fn unexpected_element(name: impl Into<String>, ns: impl Into<String>) -> Self {
        Self::UnexpectedElement {
            name: name.into(),
            ns: ns.into(),
        }
    }
}

impl From<minidom::Error> for PubkeyError {
    fn from(err: minidom::Error) -> Self {
        Self::Parse(ParseError::Xml(err))
    }
}
