//! SOAP 1.1 envelope model.
//!
//! Encoding writes the envelope wrapper directly and embeds the payload as
//! serialized by `quick-xml`. Decoding parses the document into an element
//! tree, locates the body, and only then binds the body content to the
//! caller's payload type.

use std::fmt;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::{NsReader, Writer};
use serde::Serialize;
use serde::de::DeserializeOwned;
use xmltree::{Element, EmitterConfig, XMLNode};

use crate::error::{Error, Result};
use crate::skip_none::SkipNone;

/// Namespace of the SOAP 1.1 envelope elements.
pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// XML Schema instance namespace, declared on every outgoing envelope.
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

const ENVELOPE: &str = "Envelope";
const HEADER: &str = "Header";
const BODY: &str = "Body";
const FAULT: &str = "Fault";

/// A complete SOAP envelope around a payload of type `T`.
#[derive(Clone, Debug, PartialEq)]
pub struct Envelope<T> {
    /// Optional header, carried as opaque XML.
    pub header: Option<Header>,

    /// The body, holding either a fault or the payload.
    pub body: Body<T>,
}

/// SOAP header blocks, kept as raw elements.
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    /// Child elements of the `Header` element, in document order.
    pub blocks: Vec<Element>,
}

/// The SOAP body.
///
/// A fault takes precedence over any content: when a response body contains
/// a `Fault` element it decodes as [`Body::Fault`] whatever its siblings are.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Body<T> {
    /// The remote party signalled a failure.
    Fault(Fault),

    /// The request or response payload.
    Content(T),
}

impl<T> Body<T> {
    /// Converts the body into its payload, or the fault it carries.
    ///
    /// # Errors
    ///
    /// Returns the fault if the body holds one.
    pub fn into_result(self) -> std::result::Result<T, Fault> {
        match self {
            Self::Fault(fault) => Err(fault),
            Self::Content(content) => Ok(content),
        }
    }
}

/// A SOAP 1.1 fault.
///
/// Empty fields are omitted from the wire form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename = "Fault")]
pub struct Fault {
    /// Protocol-defined classification (`faultcode`).
    #[serde(rename = "faultcode", skip_serializing_if = "String::is_empty")]
    pub code: String,

    /// Human-readable description (`faultstring`).
    #[serde(rename = "faultstring", skip_serializing_if = "String::is_empty")]
    pub message: String,

    /// The party that caused the fault (`faultactor`).
    #[serde(rename = "faultactor", skip_serializing_if = "is_blank")]
    pub actor: Option<String>,

    /// Free-form diagnostic text (`detail`).
    #[serde(rename = "detail", skip_serializing_if = "is_blank")]
    pub detail: Option<String>,
}

#[allow(clippy::ref_option)]
fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}

impl Fault {
    /// Creates a fault with a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            actor: None,
            detail: None,
        }
    }

    fn from_element(element: &Element) -> Result<Self> {
        let text = |name: &str| {
            element
                .get_child(name)
                .and_then(Element::get_text)
                .map(|text| text.trim().to_string())
                .unwrap_or_default()
        };

        let detail = match element.get_child("detail") {
            Some(detail) => Some(inner_xml(detail)?),
            None => None,
        };

        Ok(Self {
            code: text("faultcode"),
            message: text("faultstring"),
            actor: Some(text("faultactor")).filter(|actor| !actor.is_empty()),
            detail: detail.filter(|detail| !detail.is_empty()),
        })
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fault {}", self.code)?;

        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }

        if let Some(actor) = &self.actor {
            write!(f, " (actor: {actor})")?;
        }

        Ok(())
    }
}

impl std::error::Error for Fault {}

impl<T> Envelope<T> {
    /// Creates an envelope without a header.
    pub const fn new(body: Body<T>) -> Self {
        Self { header: None, body }
    }

    /// Creates an envelope with a header.
    pub const fn with_header(header: Header, body: Body<T>) -> Self {
        Self {
            header: Some(header),
            body,
        }
    }

    /// Creates a header-less envelope around a payload.
    pub const fn content(content: T) -> Self {
        Self::new(Body::Content(content))
    }

    /// Creates a header-less envelope carrying a fault.
    pub const fn fault(fault: Fault) -> Self {
        Self::new(Body::Fault(fault))
    }
}

impl<T: Serialize> Envelope<T> {
    /// Encodes the envelope into an XML document.
    ///
    /// The payload's root element is named after its type (or its serde
    /// rename).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] if the payload or a header block cannot be
    /// serialized.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new(Vec::new());

        let root =
            BytesStart::new(ENVELOPE).with_attributes([("xmlns", SOAP_ENV_NS), ("xmlns:xsi", XSI_NS)]);
        write_event(&mut writer, Event::Start(root), Error::Encoding)?;

        if let Some(header) = &self.header {
            write_event(&mut writer, Event::Start(BytesStart::new(HEADER)), Error::Encoding)?;
            for block in &header.blocks {
                write_element(block, writer.get_mut(), Error::Encoding)?;
            }
            write_event(&mut writer, Event::End(BytesEnd::new(HEADER)), Error::Encoding)?;
        }

        // `None` fields are left out rather than written as empty elements.
        let payload = match &self.body {
            Body::Fault(fault) => quick_xml::se::to_string(&SkipNone(fault)),
            Body::Content(content) => quick_xml::se::to_string(&SkipNone(content)),
        }
        .map_err(|e| Error::Encoding(e.to_string()))?;

        write_event(&mut writer, Event::Start(BytesStart::new(BODY)), Error::Encoding)?;
        writer.get_mut().extend_from_slice(payload.as_bytes());
        write_event(&mut writer, Event::End(BytesEnd::new(BODY)), Error::Encoding)?;

        write_event(&mut writer, Event::End(BytesEnd::new(ENVELOPE)), Error::Encoding)?;

        Ok(writer.into_inner())
    }
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Decodes an XML document into an envelope whose content is `T`.
    ///
    /// `Envelope`, `Header`, `Body` and `Fault` are matched in the SOAP 1.1
    /// envelope namespace or without any namespace.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decoding`] if the document is not well-formed, is not
    /// a SOAP envelope, or its content does not match `T`.
    pub fn decode(document: &[u8]) -> Result<Self> {
        let root = Element::parse(document).map_err(|e| Error::Decoding(e.to_string()))?;

        if !is_envelope_element(&root, ENVELOPE) {
            return Err(Error::Decoding(format!(
                "expected `{ENVELOPE}` root element, found `{}`",
                root.name
            )));
        }

        let header = child_elements(&root)
            .find(|element| is_envelope_element(element, HEADER))
            .map(|header| Header {
                blocks: child_elements(header).cloned().collect(),
            });

        let mut bodies = child_elements(&root).filter(|element| is_envelope_element(element, BODY));
        let body = bodies
            .next()
            .ok_or_else(|| Error::Decoding(format!("envelope has no `{BODY}` element")))?;
        if bodies.next().is_some() {
            return Err(Error::Decoding(format!(
                "envelope has more than one `{BODY}` element"
            )));
        }

        Ok(Self {
            header,
            body: decode_body(body, document)?,
        })
    }
}

fn decode_body<T: DeserializeOwned>(body: &Element, document: &[u8]) -> Result<Body<T>> {
    if let Some(fault) = child_elements(body).find(|element| is_envelope_element(element, FAULT)) {
        return Ok(Body::Fault(Fault::from_element(fault)?));
    }

    let content = if child_elements(body).next().is_some() {
        decode_payload(document)?
    } else {
        // An empty body still has to satisfy `T`.
        quick_xml::de::from_str(&format!("<{BODY}/>")).map_err(|e| Error::Decoding(e.to_string()))?
    };

    Ok(Body::Content(content))
}

/// Binds the first element inside `Body` to `T`.
///
/// Text is first bound with its surrounding whitespace intact. Padded text
/// does not parse as a number or boolean, so a payload that fails that way is
/// bound again with trimmed text.
fn decode_payload<T: DeserializeOwned>(document: &[u8]) -> Result<T> {
    let preserved = payload(document, true)?;
    if let Ok(content) = quick_xml::de::from_reader(preserved.as_slice()) {
        return Ok(content);
    }

    let trimmed = payload(document, false)?;
    quick_xml::de::from_reader(trimmed.as_slice()).map_err(|e| Error::Decoding(e.to_string()))
}

/// Copies the first element inside `Body` out of `document`.
///
/// Namespace declarations made on `Envelope` and `Body` are repeated on the
/// copied element. With `keep_whitespace`, the leading and trailing
/// whitespace of leaf text is written as character references, which the
/// payload deserializer does not trim.
fn payload(document: &[u8], keep_whitespace: bool) -> Result<Vec<u8>> {
    let mut reader = NsReader::from_reader(document);
    let mut writer = Writer::new(Vec::new());

    let mut scope = Vec::new();
    let mut depth = 0_usize;
    let mut in_body = false;
    let mut open = 0_usize;
    let mut after_start = false;
    let mut leaf_text: Option<BytesText<'_>> = None;

    loop {
        let (namespace, event) = reader
            .read_resolved_event()
            .map_err(|e| Error::Decoding(e.to_string()))?;

        match event {
            Event::Start(start) if open > 0 => {
                flush_text(&mut writer, leaf_text.take())?;
                write_event(&mut writer, Event::Start(start), Error::Decoding)?;
                open += 1;
                after_start = true;
                depth += 1;
                continue;
            }
            Event::Start(start) if in_body && depth == 2 => {
                let start = with_scope(start, &scope);
                write_event(&mut writer, Event::Start(start), Error::Decoding)?;
                open = 1;
                after_start = true;
                depth += 1;
                continue;
            }
            Event::Empty(start) if open > 0 => {
                flush_text(&mut writer, leaf_text.take())?;
                write_event(&mut writer, Event::Empty(start), Error::Decoding)?;
            }
            Event::Empty(start) if in_body && depth == 2 => {
                let start = with_scope(start, &scope);
                write_event(&mut writer, Event::Empty(start), Error::Decoding)?;
                return Ok(writer.into_inner());
            }
            Event::Start(start) => {
                let is_body = depth == 1
                    && start.local_name().as_ref() == BODY.as_bytes()
                    && is_envelope_namespace(&namespace);
                if depth == 0 || is_body {
                    collect_declarations(&start, &mut scope)?;
                }
                in_body |= is_body;
                depth += 1;
            }
            Event::End(end) if open > 0 => {
                if let Some(text) = leaf_text.take() {
                    if keep_whitespace {
                        write_leaf_text(writer.get_mut(), &text);
                    } else {
                        write_event(&mut writer, Event::Text(text), Error::Decoding)?;
                    }
                }
                write_event(&mut writer, Event::End(end), Error::Decoding)?;
                open -= 1;
                depth -= 1;
                if open == 0 {
                    return Ok(writer.into_inner());
                }
            }
            Event::End(_) => {
                if in_body && depth == 2 {
                    return Err(Error::Decoding(format!("`{BODY}` has no content element")));
                }
                depth = depth.saturating_sub(1);
            }
            Event::Text(text) if open > 0 => {
                if after_start {
                    leaf_text = Some(text);
                } else {
                    write_event(&mut writer, Event::Text(text), Error::Decoding)?;
                }
            }
            Event::CData(data) if open > 0 => {
                flush_text(&mut writer, leaf_text.take())?;
                write_event(&mut writer, Event::CData(data), Error::Decoding)?;
            }
            Event::Eof => {
                return Err(Error::Decoding("document ended inside the payload".to_string()));
            }
            // Comments, processing instructions and text outside the payload.
            _ => continue,
        }

        after_start = false;
    }
}

fn is_envelope_namespace(namespace: &ResolveResult<'_>) -> bool {
    match namespace {
        ResolveResult::Unbound => true,
        ResolveResult::Bound(Namespace(namespace)) => {
            namespace.is_empty() || *namespace == SOAP_ENV_NS.as_bytes()
        }
        ResolveResult::Unknown(_) => false,
    }
}

fn collect_declarations(start: &BytesStart<'_>, scope: &mut Vec<(Vec<u8>, Vec<u8>)>) -> Result<()> {
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| Error::Decoding(e.to_string()))?;
        let key = attribute.key.as_ref();

        if key == b"xmlns" || key.starts_with(b"xmlns:") {
            scope.retain(|(declared, _)| declared.as_slice() != key);
            scope.push((key.to_vec(), attribute.value.into_owned()));
        }
    }

    Ok(())
}

fn with_scope<'a>(mut start: BytesStart<'a>, scope: &[(Vec<u8>, Vec<u8>)]) -> BytesStart<'a> {
    for (key, value) in scope {
        let redeclared = start
            .attributes()
            .flatten()
            .any(|attribute| attribute.key.as_ref() == key.as_slice());

        if !redeclared {
            start.push_attribute((key.as_slice(), value.as_slice()));
        }
    }

    start
}

fn flush_text(writer: &mut Writer<Vec<u8>>, text: Option<BytesText<'_>>) -> Result<()> {
    match text {
        Some(text) => write_event(writer, Event::Text(text), Error::Decoding),
        None => Ok(()),
    }
}

/// Writes escaped text, turning edge whitespace into character references.
fn write_leaf_text(buffer: &mut Vec<u8>, text: &[u8]) {
    let is_space = |byte: &u8| matches!(*byte, b' ' | b'\t' | b'\r' | b'\n');
    let start = text.iter().position(|byte| !is_space(byte)).unwrap_or(text.len());
    let end = text.iter().rposition(|byte| !is_space(byte)).map_or(start, |last| last + 1);

    for byte in &text[..start] {
        buffer.extend_from_slice(format!("&#x{byte:X};").as_bytes());
    }
    buffer.extend_from_slice(&text[start..end]);
    for byte in &text[end..] {
        buffer.extend_from_slice(format!("&#x{byte:X};").as_bytes());
    }
}

fn is_envelope_element(element: &Element, name: &str) -> bool {
    element.name == name
        && element
            .namespace
            .as_deref()
            .is_none_or(|namespace| namespace.is_empty() || namespace == SOAP_ENV_NS)
}

fn child_elements(element: &Element) -> impl Iterator<Item = &Element> {
    element.children.iter().filter_map(|node| match node {
        XMLNode::Element(child) => Some(child),
        _ => None,
    })
}

/// Child elements rendered as XML, or the text content if there are none.
fn inner_xml(element: &Element) -> Result<String> {
    let mut children = child_elements(element).peekable();

    if children.peek().is_none() {
        return Ok(element
            .get_text()
            .map(|text| text.trim().to_string())
            .unwrap_or_default());
    }

    let mut buffer = Vec::new();
    for child in children {
        write_element(child, &mut buffer, Error::Decoding)?;
    }

    String::from_utf8(buffer).map_err(|e| Error::Decoding(e.to_string()))
}

fn write_element(element: &Element, buffer: &mut Vec<u8>, error: fn(String) -> Error) -> Result<()> {
    let config = EmitterConfig::new().write_document_declaration(false);

    element
        .write_with_config(buffer, config)
        .map_err(|e| error(e.to_string()))
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>, error: fn(String) -> Error) -> Result<()> {
    writer.write_event(event).map_err(|e| error(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct GetStatus {
        #[serde(rename = "ID")]
        id: u32,
        #[serde(rename = "Label")]
        label: String,
    }

    #[derive(Debug, Default, PartialEq, Deserialize)]
    struct StatusResponse {
        #[serde(rename = "State")]
        state: String,
    }

    #[derive(Serialize)]
    struct Ping {}

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Order {
        #[serde(rename = "@kind")]
        kind: String,
        #[serde(rename = "Item", default)]
        items: Vec<String>,
        #[serde(rename = "Note")]
        note: Option<String>,
        #[serde(rename = "Pad")]
        pad: String,
        #[serde(rename = "Count")]
        count: u32,
    }

    fn text() -> impl Strategy<Value = String> {
        "[ a-zA-Z0-9&<>\"']{0,12}"
    }

    fn order() -> impl Strategy<Value = Order> {
        (
            "[a-z0-9]{0,8}",
            prop::collection::vec(text(), 0..4),
            prop::option::of(text()),
            text(),
            any::<u32>(),
        )
            .prop_map(|(kind, items, note, pad, count)| Order {
                kind,
                items,
                note,
                pad,
                count,
            })
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Ack {
        #[serde(rename = "Note")]
        note: Option<String>,
    }

    fn decode<T: DeserializeOwned>(document: &str) -> Result<Envelope<T>> {
        Envelope::decode(document.as_bytes())
    }

    #[test]
    fn test_encode_writes_namespaces_and_payload() {
        let envelope = Envelope::content(GetStatus {
            id: 42,
            label: "a < b".to_string(),
        });

        let encoded = String::from_utf8(envelope.encode().unwrap()).unwrap();

        assert_eq!(
            encoded,
            "<Envelope xmlns=\"http://schemas.xmlsoap.org/soap/envelope/\" \
             xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">\
             <Body><GetStatus><ID>42</ID><Label>a &lt; b</Label></GetStatus></Body>\
             </Envelope>"
        );
    }

    #[test]
    fn test_encoded_content_decodes_back() {
        let request = GetStatus {
            id: 7,
            label: "Tom & Jerry".to_string(),
        };

        let encoded = Envelope::content(request).encode().unwrap();
        let decoded = Envelope::<GetStatus>::decode(&encoded).unwrap();

        assert_eq!(decoded.header, None);
        assert_eq!(
            decoded.body,
            Body::Content(GetStatus {
                id: 7,
                label: "Tom & Jerry".to_string(),
            })
        );
    }

    #[test]
    fn test_missing_note_and_padded_text_decode_back() {
        let order = Order {
            kind: "x".to_string(),
            items: vec!["a".to_string(), "b".to_string()],
            note: None,
            pad: "  sp  ".to_string(),
            count: 3,
        };

        let encoded = Envelope::content(order.clone()).encode().unwrap();
        let decoded = Envelope::<Order>::decode(&encoded).unwrap();

        assert!(!String::from_utf8(encoded).unwrap().contains("<Note"));
        assert_eq!(decoded.body, Body::Content(order));
    }

    #[test]
    fn test_whitespace_only_text_is_kept() {
        let decoded: Envelope<Ack> =
            decode("<Envelope><Body><Ack><Note> \t </Note></Ack></Body></Envelope>").unwrap();

        assert_eq!(
            decoded.body,
            Body::Content(Ack {
                note: Some(" \t ".to_string())
            })
        );
    }

    #[test]
    fn test_padded_number_falls_back_to_trimmed_text() {
        let decoded: Envelope<GetStatus> = decode(
            "<Envelope><Body><GetStatus><ID> 42 </ID><Label> x </Label></GetStatus></Body></Envelope>",
        )
        .unwrap();

        assert_eq!(
            decoded.body,
            Body::Content(GetStatus {
                id: 42,
                label: "x".to_string(),
            })
        );
    }

    proptest! {
        #[test]
        fn test_encoded_content_always_decodes_back(order in order()) {
            let encoded = Envelope::content(order.clone()).encode().unwrap();
            let decoded = Envelope::<Order>::decode(&encoded).unwrap();

            prop_assert_eq!(decoded.body, Body::Content(order));
        }
    }

    #[test]
    fn test_blank_fault_fields_are_omitted() {
        let mut fault = Fault::new("Client", "bad input");
        fault.actor = Some(String::new());
        fault.detail = Some(String::new());

        let encoded = String::from_utf8(Envelope::<()>::fault(fault).encode().unwrap()).unwrap();

        assert!(encoded.contains("<faultstring>bad input</faultstring></Fault>"));
        assert!(!encoded.contains("faultactor"));
        assert!(!encoded.contains("detail"));
    }

    #[test]
    fn test_encoded_fault_omits_empty_fields() {
        let envelope = Envelope::<()>::fault(Fault::new("Server.Error", ""));

        let encoded = String::from_utf8(envelope.encode().unwrap()).unwrap();

        assert!(encoded.contains("<Body><Fault><faultcode>Server.Error</faultcode></Fault></Body>"));
        assert!(!encoded.contains("faultstring"));
        assert!(!encoded.contains("faultactor"));
        assert!(!encoded.contains("detail"));
    }

    #[test]
    fn test_encoded_fault_decodes_back() {
        let fault = Fault {
            code: "Client".to_string(),
            message: "bad input".to_string(),
            actor: Some("urn:gateway".to_string()),
            detail: Some("field ID is required".to_string()),
        };

        let encoded = Envelope::<()>::fault(fault.clone()).encode().unwrap();
        let decoded = Envelope::<StatusResponse>::decode(&encoded).unwrap();

        assert_eq!(decoded.body, Body::Fault(fault));
    }

    #[test]
    fn test_primitive_payload_cannot_be_encoded() {
        let result = Envelope::content(42_u32).encode();

        assert!(matches!(result, Err(Error::Encoding(_))));
    }

    #[test]
    fn test_header_blocks_are_written() {
        let mut token = Element::new("Token");
        token.children.push(XMLNode::Text("abc".to_string()));

        let envelope = Envelope::with_header(
            Header {
                blocks: vec![token],
            },
            Body::Content(Ping {}),
        );

        let encoded = String::from_utf8(envelope.encode().unwrap()).unwrap();

        assert!(encoded.contains("<Header><Token>abc</Token></Header><Body>"));
    }

    #[test]
    fn test_decode_unqualified_envelope() {
        let decoded: Envelope<StatusResponse> = decode(
            "<Envelope><Body><StatusResponse><State>OK</State></StatusResponse></Body></Envelope>",
        )
        .unwrap();

        assert_eq!(
            decoded.body,
            Body::Content(StatusResponse {
                state: "OK".to_string()
            })
        );
    }

    #[test]
    fn test_decode_prefixed_envelope() {
        let decoded: Envelope<StatusResponse> = decode(
            r#"<?xml version="1.0" encoding="utf-8"?>
            <soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
              <soap:Header><Session>s-1</Session></soap:Header>
              <soap:Body>
                <StatusResponse><State>READY</State></StatusResponse>
              </soap:Body>
            </soap:Envelope>"#,
        )
        .unwrap();

        let header = decoded.header.unwrap();
        assert_eq!(header.blocks.len(), 1);
        assert_eq!(header.blocks[0].name, "Session");
        assert_eq!(
            decoded.body,
            Body::Content(StatusResponse {
                state: "READY".to_string()
            })
        );
    }

    #[test]
    fn test_fault_takes_precedence_over_content() {
        let decoded: Envelope<StatusResponse> = decode(
            "<Envelope><Body>\
             <StatusResponse><State>OK</State></StatusResponse>\
             <Fault><faultcode>Server</faultcode><faultstring>late failure</faultstring></Fault>\
             </Body></Envelope>",
        )
        .unwrap();

        assert_eq!(decoded.body, Body::Fault(Fault::new("Server", "late failure")));
    }

    #[test]
    fn test_fault_with_empty_code_is_still_a_fault() {
        let decoded: Envelope<StatusResponse> = decode(
            "<Envelope><Body><Fault><faultcode></faultcode><faultstring>boom</faultstring></Fault></Body></Envelope>",
        )
        .unwrap();

        assert_eq!(decoded.body, Body::Fault(Fault::new("", "boom")));
    }

    #[test]
    fn test_fault_detail_keeps_nested_elements() {
        let decoded: Envelope<StatusResponse> = decode(
            "<Envelope><Body><Fault>\
             <faultcode>Client</faultcode>\
             <detail><Reason>missing ID</Reason></detail>\
             </Fault></Body></Envelope>",
        )
        .unwrap();

        let Body::Fault(fault) = decoded.body else {
            panic!("expected a fault");
        };
        assert_eq!(fault.code, "Client");
        assert_eq!(fault.actor, None);
        let detail = fault.detail.unwrap();
        assert!(detail.contains("<Reason>missing ID</Reason>"));
    }

    #[test]
    fn test_empty_body_decodes_into_optional_fields() {
        let decoded: Envelope<Ack> = decode("<Envelope><Body/></Envelope>").unwrap();

        assert_eq!(decoded.body, Body::Content(Ack { note: None }));
    }

    #[test]
    fn test_empty_body_fails_for_required_fields() {
        let result: Result<Envelope<StatusResponse>> = decode("<Envelope><Body></Body></Envelope>");

        assert!(matches!(result, Err(Error::Decoding(_))));
    }

    #[test]
    fn test_truncated_document_fails() {
        let result: Result<Envelope<StatusResponse>> = decode(
            "<Envelope><Body><StatusResponse><State>OK</State></StatusResponse></Body></Envel",
        );

        assert!(matches!(result, Err(Error::Decoding(_))));
    }

    #[test]
    fn test_foreign_root_is_rejected() {
        let result: Result<Envelope<StatusResponse>> = decode(
            r#"<Envelope xmlns="urn:not-soap"><Body><StatusResponse><State>OK</State></StatusResponse></Body></Envelope>"#,
        );

        assert!(matches!(result, Err(Error::Decoding(_))));
    }

    #[test]
    fn test_missing_body_is_rejected() {
        let result: Result<Envelope<StatusResponse>> = decode("<Envelope><Header/></Envelope>");

        assert!(matches!(result, Err(Error::Decoding(message)) if message.contains("no `Body`")));
    }

    #[test]
    fn test_duplicate_body_is_rejected() {
        let result: Result<Envelope<Ack>> = decode("<Envelope><Body/><Body/></Envelope>");

        assert!(matches!(result, Err(Error::Decoding(_))));
    }

    #[test]
    fn test_shape_mismatch_fails() {
        let result: Result<Envelope<StatusResponse>> =
            decode("<Envelope><Body><Other><Value>1</Value></Other></Body></Envelope>");

        assert!(matches!(result, Err(Error::Decoding(_))));
    }

    #[test]
    fn test_fault_display_leads_with_code() {
        let mut fault = Fault::new("Server.Error", "boom");
        fault.actor = Some("urn:backend".to_string());

        assert_eq!(fault.to_string(), "fault Server.Error: boom (actor: urn:backend)");
    }

    #[test]
    fn test_body_into_result() {
        let content: Body<u32> = Body::Content(1);
        let fault: Body<u32> = Body::Fault(Fault::new("Server", "down"));

        assert_eq!(content.into_result(), Ok(1));
        assert_eq!(fault.into_result(), Err(Fault::new("Server", "down")));
    }
}
