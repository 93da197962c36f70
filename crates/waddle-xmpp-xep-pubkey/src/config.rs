//! Decoder configuration.

use serde::Deserialize;

/// Options for decoding incoming `<pubkey/>` payloads.
///
/// Deserializable so a host can embed it in its own configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Only yield a value when both `<key>` and `<print>` carry text.
    ///
    /// When `false`, a key without a fingerprint decodes to an extension with
    /// no fingerprint instead of being treated as absent.
    pub require_fingerprint: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            require_fingerprint: true,
        }
    }
}
