//! Public Key Subscription Payload (`urn:xmpp:pubkey:2`)
//!
//! Carries a contact's public key, and optionally its fingerprint, inside a
//! presence subscription request so the recipient can verify the key out of
//! band before approving.
//!
//! ## XML Format
//!
//! ```xml
//! <presence type='subscribe' to='bob@example.com'>
//!   <pubkey xmlns='urn:xmpp:pubkey:2'>
//!     <key>QUI=</key>
//!     <print>ab12</print>
//!   </pubkey>
//! </presence>
//! ```
//!
//! `<key>` holds the base64 key material. `<print>` is optional on output,
//! but incoming payloads without it are treated as absent unless
//! [`DecoderConfig::require_fingerprint`] is turned off.

pub mod config;
pub mod decoder;
pub mod encoding;
pub mod error;
pub mod extension;

use minidom::Element;
use xmpp_parsers::jid::Jid;
use xmpp_parsers::presence::{Presence, Type as PresenceType};

pub use config::DecoderConfig;
pub use decoder::{
    decode, decode_with, element_events, parse_pubkey_element, parse_pubkey_element_with,
    parse_pubkey_str, PubkeyDecoder, XmlEvent,
};
pub use error::{ParseError, PubkeyError};
pub use extension::KeyExtension;

/// Local name of the payload element.
pub const ELEMENT_PUBKEY: &str = "pubkey";

/// Namespace of the payload element.
pub const NS_PUBKEY: &str = "urn:xmpp:pubkey:2";

/// Check if an element is a pubkey payload.
pub fn is_pubkey_element(element: &Element) -> bool {
    element.name() == ELEMENT_PUBKEY && element.ns() == NS_PUBKEY
}

/// Check if a Presence carries a pubkey payload.
pub fn presence_has_pubkey(presence: &Presence) -> bool {
    presence.payloads.iter().any(is_pubkey_element)
}

/// Decode the first pubkey payload of a Presence.
///
/// Returns `Ok(None)` if there is no payload or it is incomplete.
pub fn parse_pubkey_from_presence(
    presence: &Presence,
) -> Result<Option<KeyExtension>, PubkeyError> {
    match presence.payloads.iter().find(|p| is_pubkey_element(p)) {
        Some(element) => parse_pubkey_element(element),
        None => Ok(None),
    }
}

/// Build a `type='subscribe'` presence carrying our public key.
pub fn build_subscribe_presence(to: Jid, ext: &KeyExtension) -> Presence {
    let mut presence = Presence::new(PresenceType::Subscribe);
    presence.to = Some(to);
    presence.payloads.push(ext.to_element());
    presence
}
