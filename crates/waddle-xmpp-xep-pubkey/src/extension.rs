//! The `<pubkey/>` value type and its encoder.

use std::fmt;
use std::sync::OnceLock;

use minidom::Element;

use crate::encoding::{decode_key, encode_key};
use crate::{PubkeyError, ELEMENT_PUBKEY, NS_PUBKEY};

/// Public key (and optional fingerprint) attached to a subscription request.
///
/// The key text is memoized on first encode. When the value was built from
/// base64 text, that exact text is what gets written back out.
#[derive(Debug, Clone)]
pub struct KeyExtension {
    key: Vec<u8>,
    fingerprint: Option<String>,
    encoded: OnceLock<String>,
}

impl KeyExtension {
    /// Create an extension from raw key bytes.
    pub fn new(key: impl Into<Vec<u8>>, fingerprint: Option<String>) -> Self {
        Self::with_encoding(key.into(), fingerprint, None)
    }

    /// Create an extension from base64 key text.
    ///
    /// The text is kept verbatim for encoding, even if it is not the canonical
    /// encoding of the decoded bytes.
    pub fn from_encoded(
        encoded: impl Into<String>,
        fingerprint: Option<String>,
    ) -> Result<Self, PubkeyError> {
        let encoded = encoded.into();
        let key = decode_key(&encoded)?;
        Ok(Self::with_encoding(key, fingerprint, Some(encoded)))
    }

    /// `encoded`, when given, must decode to `key`. An empty fingerprint is
    /// stored as no fingerprint.
    fn with_encoding(key: Vec<u8>, fingerprint: Option<String>, encoded: Option<String>) -> Self {
        let cell = OnceLock::new();
        if let Some(text) = encoded {
            let _ = cell.set(text);
        }
        Self {
            key,
            fingerprint: fingerprint.filter(|f| !f.is_empty()),
            encoded: cell,
        }
    }

    /// Raw key bytes.
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Key fingerprint, if one was supplied.
    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }

    /// Base64 text of the key, computed once and reused afterwards.
    pub fn encoded_key(&self) -> &str {
        self.encoded.get_or_init(|| encode_key(&self.key))
    }

    /// Serialize to the wire form.
    ///
    /// The fingerprint is written as-is; callers must keep it free of XML
    /// markup characters.
    pub fn to_xml(&self) -> String {
        let encoded = self.encoded_key();
        let mut buf = String::with_capacity(64 + encoded.len());
        buf.push('<');
        buf.push_str(ELEMENT_PUBKEY);
        buf.push_str(" xmlns=\"");
        buf.push_str(NS_PUBKEY);
        buf.push_str("\"><key>");
        buf.push_str(encoded);
        buf.push_str("</key>");

        if let Some(ref fingerprint) = self.fingerprint {
            buf.push_str("<print>");
            buf.push_str(fingerprint);
            buf.push_str("</print>");
        }

        buf.push_str("</");
        buf.push_str(ELEMENT_PUBKEY);
        buf.push('>');
        buf
    }

    /// Build the payload element for attaching to a stanza.
    pub fn to_element(&self) -> Element {
        let mut pubkey = Element::builder(ELEMENT_PUBKEY, NS_PUBKEY).build();

        pubkey.append_child(
            Element::builder("key", NS_PUBKEY)
                .append(self.encoded_key().to_string())
                .build(),
        );

        if let Some(ref fingerprint) = self.fingerprint {
            pubkey.append_child(
                Element::builder("print", NS_PUBKEY)
                    .append(fingerprint.clone())
                    .build(),
            );
        }

        pubkey
    }
}

impl PartialEq for KeyExtension {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.fingerprint == other.fingerprint
    }
}

impl Eq for KeyExtension {}

impl fmt::Display for KeyExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_xml())
    }
}

impl From<&KeyExtension> for Element {
    fn from(ext: &KeyExtension) -> Self {
        ext.to_element()
    }
}

impl From<KeyExtension> for Element {
    fn from(ext: KeyExtension) -> Self {
        ext.to_element()
    }
}
