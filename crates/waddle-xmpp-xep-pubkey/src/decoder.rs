//! Event-driven decoder for `<pubkey/>` payloads.
//!
//! The decoder consumes the events found *inside* a `<pubkey>` element (the
//! opening tag has already been consumed by whoever dispatched it here) up to
//! and including the closing `</pubkey>`. Only the local names `key` and
//! `print` are recognized; everything else is skipped. Names are not checked
//! against namespace or depth.

use minidom::{Element, Node};
use tracing::{debug, trace};

use crate::config::DecoderConfig;
use crate::error::ParseError;
use crate::extension::KeyExtension;
use crate::{is_pubkey_element, PubkeyError, ELEMENT_PUBKEY};

/// A pull-parser event, reduced to what the decoder needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlEvent {
    /// Opening tag, by local name
    Start(String),
    /// Closing tag, by local name
    End(String),
    /// Character data
    Text(String),
}

impl XmlEvent {
    /// Opening tag event.
    pub fn start(name: impl Into<String>) -> Self {
        Self::Start(name.into())
    }

    /// Closing tag event.
    pub fn end(name: impl Into<String>) -> Self {
        Self::End(name.into())
    }

    /// Character data event.
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    InKey,
    InPrint,
    Done,
}

/// Incremental decoder state machine.
///
/// `key` and `print` are tracked as independent flags, so closing one of them
/// while nested inside the other returns to the enclosing element. Text goes
/// to `key` whenever that flag is set.
///
/// Feed events with [`push`](Self::push) until it reports completion, then
/// call [`finish`](Self::finish).
#[derive(Debug)]
pub struct PubkeyDecoder {
    config: DecoderConfig,
    in_key: bool,
    in_print: bool,
    done: bool,
    key_text: Option<String>,
    print_text: Option<String>,
}

impl Default for PubkeyDecoder {
    fn default() -> Self {
        Self::new(DecoderConfig::default())
    }
}

impl PubkeyDecoder {
    /// Create a decoder with the given configuration.
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            config,
            in_key: false,
            in_print: false,
            done: false,
            key_text: None,
            print_text: None,
        }
    }

    /// Whether the closing `</pubkey>` has been seen.
    pub fn is_done(&self) -> bool {
        self.done
    }

    fn state(&self) -> State {
        if self.done {
            State::Done
        } else if self.in_key {
            State::InKey
        } else if self.in_print {
            State::InPrint
        } else {
            State::Idle
        }
    }

    /// Feed one event. Returns `true` once the payload is complete; events
    /// pushed after that are ignored.
    pub fn push(&mut self, event: XmlEvent) -> bool {
        let prev = self.state();
        match (prev, event) {
            (State::Done, _) => {}
            (_, XmlEvent::Start(name)) if name == "key" => self.in_key = true,
            (_, XmlEvent::Start(name)) if name == "print" => self.in_print = true,
            (_, XmlEvent::End(name)) if name == "key" => self.in_key = false,
            (_, XmlEvent::End(name)) if name == "print" => self.in_print = false,
            (_, XmlEvent::End(name)) if name == ELEMENT_PUBKEY => self.done = true,
            (State::InKey, XmlEvent::Text(text)) => append(&mut self.key_text, &text),
            (State::InPrint, XmlEvent::Text(text)) => append(&mut self.print_text, &text),
            _ => {}
        }

        let next = self.state();
        if next != prev {
            trace!(from = ?prev, to = ?next, "pubkey decoder transition");
        }
        self.done
    }

    /// Produce the decoded extension.
    ///
    /// Returns `Ok(None)` when a required child carried no text.
    pub fn finish(self) -> Result<Option<KeyExtension>, PubkeyError> {
        if !self.is_done() {
            return Err(ParseError::UnexpectedEof.into());
        }

        match (self.key_text, self.print_text) {
            (Some(key), Some(print)) => {
                let ext = KeyExtension::from_encoded(key, Some(print))?;
                debug!(key_len = ext.key().len(), "Parsed pubkey extension");
                Ok(Some(ext))
            }
            (Some(key), None) if !self.config.require_fingerprint => {
                let ext = KeyExtension::from_encoded(key, None)?;
                debug!(key_len = ext.key().len(), "Parsed pubkey extension without fingerprint");
                Ok(Some(ext))
            }
            (key, print) => {
                debug!(
                    has_key = key.is_some(),
                    has_print = print.is_some(),
                    "Incomplete pubkey extension, ignoring"
                );
                Ok(None)
            }
        }
    }
}

fn append(slot: &mut Option<String>, text: &str) {
    slot.get_or_insert_with(String::new).push_str(text);
}

/// Decode a payload from an event stream using the default configuration.
///
/// Tokenizer errors in the stream are returned unchanged.
pub fn decode<I>(events: I) -> Result<Option<KeyExtension>, PubkeyError>
where
    I: IntoIterator<Item = Result<XmlEvent, ParseError>>,
{
    decode_with(DecoderConfig::default(), events)
}

/// Decode a payload from an event stream.
pub fn decode_with<I>(config: DecoderConfig, events: I) -> Result<Option<KeyExtension>, PubkeyError>
where
    I: IntoIterator<Item = Result<XmlEvent, ParseError>>,
{
    let mut decoder = PubkeyDecoder::new(config);
    for event in events {
        if decoder.push(event?) {
            break;
        }
    }
    decoder.finish()
}

/// Events for the interior of `element`, followed by its closing tag.
pub fn element_events(element: &Element) -> Vec<XmlEvent> {
    let mut events = Vec::new();
    push_children(element, &mut events);
    events.push(XmlEvent::end(element.name()));
    events
}

fn push_children(element: &Element, events: &mut Vec<XmlEvent>) {
    for node in element.nodes() {
        match node {
            Node::Element(child) => {
                events.push(XmlEvent::start(child.name()));
                push_children(child, events);
                events.push(XmlEvent::end(child.name()));
            }
            Node::Text(text) => events.push(XmlEvent::text(text.as_str())),
        }
    }
}

/// Decode a parsed `<pubkey/>` element.
pub fn parse_pubkey_element(element: &Element) -> Result<Option<KeyExtension>, PubkeyError> {
    parse_pubkey_element_with(DecoderConfig::default(), element)
}

/// Decode a parsed `<pubkey/>` element with the given configuration.
pub fn parse_pubkey_element_with(
    config: DecoderConfig,
    element: &Element,
) -> Result<Option<KeyExtension>, PubkeyError> {
    if !is_pubkey_element(element) {
        return Err(ParseError::unexpected_element(element.name(), element.ns()).into());
    }
    decode_with(config, element_events(element).into_iter().map(Ok))
}

/// Parse and decode a `<pubkey/>` payload from XML text.
///
/// Whitespace around the element is ignored.
pub fn parse_pubkey_str(xml: &str) -> Result<Option<KeyExtension>, PubkeyError> {
    let element: Element = xml.trim().parse()?;
    parse_pubkey_element(&element)
}
