//! Streaming reader for library data documents.
//!
//! ## Document Structure
//!
//! ```xml
//! <LSLLibraryData>
//!   <LibraryFunction Name="llSin" ReturnType="Float" Subsets="lsl">
//!     <Parameter Name="theta" Type="Float"/>
//!     <DocumentationString>Returns the sine of theta in radians.</DocumentationString>
//!   </LibraryFunction>
//!   <EventHandler Name="touch_start" Subsets="lsl,ossl">
//!     <Parameter Name="num_detected" Type="Integer"/>
//!     <Property Name="Category" Value="touch"/>
//!   </EventHandler>
//!   <LibraryConstant Name="PI" Type="Float" Value="3.14159" Subsets="lsl"/>
//! </LSLLibraryData>
//! ```
//!
//! The reader is a lazy, single-pass iterator over the three record shapes.
//! It performs purely structural parsing: no subset filtering, no uniqueness
//! decisions. Unrecognized top-level elements are skipped. Every structural
//! failure carries the 1-based source line of the offending element.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::base::{Parameter, ValueType};

use super::error::CatalogError;
use super::signature::{ConstantSignature, EventSignature, FunctionSignature, LibrarySignature};
use super::tags::TagSet;

/// One record pulled from a library data document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedRecord {
    /// 1-based source line of the record's element.
    pub line: u32,
    pub signature: LibrarySignature,
}

/// Lazy iterator over the records of a library data document.
///
/// Single-pass; restart by constructing a fresh reader over the input.
pub struct DocumentReader<'a> {
    input: &'a [u8],
    reader: Reader<&'a [u8]>,
    buf: Vec<u8>,
    done: bool,
}

impl<'a> DocumentReader<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        let mut reader = Reader::from_reader(input);
        reader.config_mut().trim_text(true);
        Self {
            input,
            reader,
            buf: Vec::new(),
            done: false,
        }
    }

    /// 1-based line of the reader's current position.
    fn current_line(&self) -> u32 {
        let pos = (self.reader.buffer_position() as usize).min(self.input.len());
        self.input[..pos].iter().filter(|b| **b == b'\n').count() as u32 + 1
    }

    fn xml_error(&self, err: quick_xml::Error) -> CatalogError {
        CatalogError::document(self.current_line(), format!("XML parse error: {err}"))
    }

    /// Consume events until the end tag named `name` closes.
    fn skip_to_end(&mut self, name: &[u8]) -> Result<(), CatalogError> {
        let mut sink = Vec::new();
        self.reader
            .read_to_end_into(QName(name), &mut sink)
            .map_err(|e| self.xml_error(e))?;
        Ok(())
    }

    /// Read the text content of the element just opened and consume its end tag.
    fn read_element_text(&mut self, element: &str) -> Result<String, CatalogError> {
        let mut out = String::new();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match self
                .reader
                .read_event_into(&mut buf)
                .map_err(|e| self.xml_error(e))?
            {
                Event::Text(text) => {
                    let text = text.unescape().map_err(|e| self.xml_error(e))?;
                    out.push_str(&text);
                }
                Event::CData(cdata) => {
                    out.push_str(&String::from_utf8_lossy(&cdata.into_inner()));
                }
                Event::End(_) => break,
                Event::Eof => {
                    return Err(CatalogError::document(
                        self.current_line(),
                        format!("unexpected end of document inside '{element}'"),
                    ));
                }
                _ => {}
            }
        }
        Ok(out)
    }

    // ------------------------------------------------------------------------
    // RECORD PARSERS
    // ------------------------------------------------------------------------

    fn read_function(
        &mut self,
        start: &BytesStart<'_>,
        line: u32,
        is_empty: bool,
    ) -> Result<LibrarySignature, CatalogError> {
        let mut name: Option<SmolStr> = None;
        let mut subsets: Option<TagSet> = None;
        let mut return_type: Option<ValueType> = None;

        for attr in start.attributes() {
            let attr =
                attr.map_err(|e| CatalogError::document(line, format!("bad attribute: {e}")))?;
            let value = attr
                .unescape_value()
                .map_err(|e| CatalogError::document(line, format!("bad attribute value: {e}")))?;
            match attr.key.as_ref() {
                b"Name" => name = Some(SmolStr::new(value.trim())),
                b"Subsets" => subsets = Some(TagSet::parse(&value)),
                b"ReturnType" => {
                    return_type = Some(value.parse().map_err(|e| {
                        CatalogError::document(
                            line,
                            format!("LibraryFunction: ReturnType attribute invalid: {e}"),
                        )
                    })?);
                }
                other => {
                    return Err(unknown_attribute(line, "LibraryFunction", other));
                }
            }
        }

        let name = required_name(line, "LibraryFunction", name)?;
        let subsets = required_subsets(line, "LibraryFunction", &name, subsets)?;
        let return_type = return_type.ok_or_else(|| {
            CatalogError::document(
                line,
                format!("LibraryFunction '{name}': ReturnType attribute missing"),
            )
        })?;

        let mut signature =
            FunctionSignature::new(return_type, name, Vec::new()).with_subsets(subsets);
        if !is_empty {
            self.read_function_children(&mut signature)?;
        }
        Ok(LibrarySignature::Function(signature))
    }

    fn read_function_children(
        &mut self,
        signature: &mut FunctionSignature,
    ) -> Result<(), CatalogError> {
        let mut seen_names: FxHashSet<SmolStr> = FxHashSet::default();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let event = self
                .reader
                .read_event_into(&mut buf)
                .map_err(|e| self.xml_error(e))?;
            let (child, child_empty) = match event {
                Event::Start(e) => (e.to_owned(), false),
                Event::Empty(e) => (e.to_owned(), true),
                Event::End(_) => return Ok(()),
                Event::Eof => {
                    return Err(CatalogError::document(
                        self.current_line(),
                        format!(
                            "unexpected end of document inside LibraryFunction '{}'",
                            signature.name
                        ),
                    ));
                }
                _ => continue,
            };
            let line = self.current_line();
            match child.name().as_ref() {
                b"Parameter" => {
                    let param = parse_parameter(&child, line, "LibraryFunction", true)?;
                    if signature.has_variadic_parameter() {
                        return Err(CatalogError::document(
                            line,
                            format!(
                                "LibraryFunction '{}': no parameters may follow the variadic parameter",
                                signature.name
                            ),
                        ));
                    }
                    if param.ty.is_void() && !param.variadic {
                        return Err(CatalogError::document(
                            line,
                            format!(
                                "LibraryFunction '{}': parameter '{}' cannot be Void unless it is variadic",
                                signature.name, param.name
                            ),
                        ));
                    }
                    if !seen_names.insert(param.name.clone()) {
                        return Err(CatalogError::document(
                            line,
                            format!(
                                "LibraryFunction '{}': parameter name '{}' already used",
                                signature.name, param.name
                            ),
                        ));
                    }
                    signature.params.push(param);
                    if !child_empty {
                        self.skip_to_end(b"Parameter")?;
                    }
                }
                b"DocumentationString" => {
                    if !child_empty {
                        signature.docs = self.read_element_text("DocumentationString")?;
                    }
                }
                other => {
                    return Err(unknown_element(line, "LibraryFunction", &signature.name, other));
                }
            }
        }
    }

    fn read_event(
        &mut self,
        start: &BytesStart<'_>,
        line: u32,
        is_empty: bool,
    ) -> Result<LibrarySignature, CatalogError> {
        let mut name: Option<SmolStr> = None;
        let mut subsets: Option<TagSet> = None;

        for attr in start.attributes() {
            let attr =
                attr.map_err(|e| CatalogError::document(line, format!("bad attribute: {e}")))?;
            let value = attr
                .unescape_value()
                .map_err(|e| CatalogError::document(line, format!("bad attribute value: {e}")))?;
            match attr.key.as_ref() {
                b"Name" => name = Some(SmolStr::new(value.trim())),
                b"Subsets" => subsets = Some(TagSet::parse(&value)),
                other => return Err(unknown_attribute(line, "EventHandler", other)),
            }
        }

        let name = required_name(line, "EventHandler", name)?;
        let subsets = required_subsets(line, "EventHandler", &name, subsets)?;

        let mut signature = EventSignature::new(name, Vec::new()).with_subsets(subsets);
        if !is_empty {
            self.read_event_children(&mut signature)?;
        }
        Ok(LibrarySignature::Event(signature))
    }

    fn read_event_children(&mut self, signature: &mut EventSignature) -> Result<(), CatalogError> {
        let mut seen_names: FxHashSet<SmolStr> = FxHashSet::default();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let event = self
                .reader
                .read_event_into(&mut buf)
                .map_err(|e| self.xml_error(e))?;
            let (child, child_empty) = match event {
                Event::Start(e) => (e.to_owned(), false),
                Event::Empty(e) => (e.to_owned(), true),
                Event::End(_) => return Ok(()),
                Event::Eof => {
                    return Err(CatalogError::document(
                        self.current_line(),
                        format!(
                            "unexpected end of document inside EventHandler '{}'",
                            signature.name
                        ),
                    ));
                }
                _ => continue,
            };
            let line = self.current_line();
            match child.name().as_ref() {
                b"Parameter" => {
                    let param = parse_parameter(&child, line, "EventHandler", false)?;
                    if param.ty.is_void() {
                        return Err(CatalogError::document(
                            line,
                            format!(
                                "EventHandler '{}': parameter '{}' cannot be Void",
                                signature.name, param.name
                            ),
                        ));
                    }
                    if !seen_names.insert(param.name.clone()) {
                        return Err(CatalogError::document(
                            line,
                            format!(
                                "EventHandler '{}': parameter name '{}' already used",
                                signature.name, param.name
                            ),
                        ));
                    }
                    signature.params.push(param);
                    if !child_empty {
                        self.skip_to_end(b"Parameter")?;
                    }
                }
                b"Property" => {
                    let (key, value) = parse_property(&child, line, &signature.name)?;
                    if signature.properties.insert(key.clone(), value).is_some() {
                        return Err(CatalogError::document(
                            line,
                            format!(
                                "EventHandler '{}': property name '{key}' already used",
                                signature.name
                            ),
                        ));
                    }
                    if !child_empty {
                        self.skip_to_end(b"Property")?;
                    }
                }
                b"DocumentationString" => {
                    if !child_empty {
                        signature.docs = self.read_element_text("DocumentationString")?;
                    }
                }
                other => {
                    return Err(unknown_element(line, "EventHandler", &signature.name, other));
                }
            }
        }
    }

    fn read_constant(
        &mut self,
        start: &BytesStart<'_>,
        line: u32,
        is_empty: bool,
    ) -> Result<LibrarySignature, CatalogError> {
        let mut name: Option<SmolStr> = None;
        let mut subsets: Option<TagSet> = None;
        let mut ty: Option<ValueType> = None;
        let mut value: Option<String> = None;

        for attr in start.attributes() {
            let attr =
                attr.map_err(|e| CatalogError::document(line, format!("bad attribute: {e}")))?;
            let attr_value = attr
                .unescape_value()
                .map_err(|e| CatalogError::document(line, format!("bad attribute value: {e}")))?;
            match attr.key.as_ref() {
                b"Name" => name = Some(SmolStr::new(attr_value.trim())),
                b"Subsets" => subsets = Some(TagSet::parse(&attr_value)),
                b"Type" => {
                    ty = Some(attr_value.parse().map_err(|e| {
                        CatalogError::document(
                            line,
                            format!("LibraryConstant: Type attribute invalid: {e}"),
                        )
                    })?);
                }
                b"Value" => value = Some(attr_value.into_owned()),
                other => return Err(unknown_attribute(line, "LibraryConstant", other)),
            }
        }

        let name = required_name(line, "LibraryConstant", name)?;
        let subsets = required_subsets(line, "LibraryConstant", &name, subsets)?;
        let ty = ty.ok_or_else(|| {
            CatalogError::document(
                line,
                format!("LibraryConstant '{name}': Type attribute missing"),
            )
        })?;
        if ty.is_void() {
            return Err(CatalogError::document(
                line,
                format!("LibraryConstant '{name}': Type attribute cannot be Void"),
            ));
        }

        let mut signature = ConstantSignature::new(ty, name).with_subsets(subsets);
        signature.value = value;
        if !is_empty {
            self.read_constant_children(&mut signature)?;
        }
        Ok(LibrarySignature::Constant(signature))
    }

    fn read_constant_children(
        &mut self,
        signature: &mut ConstantSignature,
    ) -> Result<(), CatalogError> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let event = self
                .reader
                .read_event_into(&mut buf)
                .map_err(|e| self.xml_error(e))?;
            let (child, child_empty) = match event {
                Event::Start(e) => (e.to_owned(), false),
                Event::Empty(e) => (e.to_owned(), true),
                Event::End(_) => return Ok(()),
                Event::Eof => {
                    return Err(CatalogError::document(
                        self.current_line(),
                        format!(
                            "unexpected end of document inside LibraryConstant '{}'",
                            signature.name
                        ),
                    ));
                }
                _ => continue,
            };
            let line = self.current_line();
            match child.name().as_ref() {
                b"DocumentationString" => {
                    if !child_empty {
                        signature.docs = self.read_element_text("DocumentationString")?;
                    }
                }
                other => {
                    return Err(unknown_element(line, "LibraryConstant", &signature.name, other));
                }
            }
        }
    }
}

impl Iterator for DocumentReader<'_> {
    type Item = Result<ParsedRecord, CatalogError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            self.buf.clear();
            let event = match self.reader.read_event_into(&mut self.buf) {
                Ok(event) => event,
                Err(err) => {
                    self.done = true;
                    return Some(Err(self.xml_error(err)));
                }
            };
            let (start, is_empty) = match event {
                Event::Start(e) => (e.to_owned(), false),
                Event::Empty(e) => (e.to_owned(), true),
                Event::Eof => {
                    self.done = true;
                    return None;
                }
                _ => continue,
            };
            let line = self.current_line();
            let result = match start.name().as_ref() {
                b"LibraryFunction" => self.read_function(&start, line, is_empty),
                b"EventHandler" => self.read_event(&start, line, is_empty),
                b"LibraryConstant" => self.read_constant(&start, line, is_empty),
                // Root element, subset descriptions and other foreign
                // containers carry no record of their own.
                _ => continue,
            };
            if result.is_err() {
                self.done = true;
            }
            return Some(result.map(|signature| ParsedRecord { line, signature }));
        }
    }
}

// ----------------------------------------------------------------------------
// SHARED ATTRIBUTE HELPERS
// ----------------------------------------------------------------------------

fn parse_parameter(
    start: &BytesStart<'_>,
    line: u32,
    owner: &str,
    allow_variadic: bool,
) -> Result<Parameter, CatalogError> {
    let mut name: Option<SmolStr> = None;
    let mut ty: Option<ValueType> = None;
    let mut variadic = false;

    for attr in start.attributes() {
        let attr = attr.map_err(|e| CatalogError::document(line, format!("bad attribute: {e}")))?;
        let value = attr
            .unescape_value()
            .map_err(|e| CatalogError::document(line, format!("bad attribute value: {e}")))?;
        match attr.key.as_ref() {
            b"Name" => name = Some(SmolStr::new(value.trim())),
            b"Type" => {
                ty = Some(value.parse().map_err(|e| {
                    CatalogError::document(line, format!("{owner}: parameter Type invalid: {e}"))
                })?);
            }
            b"Variadic" if allow_variadic => {
                variadic = match value.to_ascii_lowercase().as_str() {
                    "true" => true,
                    "false" => false,
                    other => {
                        return Err(CatalogError::document(
                            line,
                            format!(
                                "{owner}: Variadic attribute must equal True or False \
                                 (case insensitive), found '{other}'"
                            ),
                        ));
                    }
                };
            }
            other => return Err(unknown_attribute(line, "Parameter", other)),
        }
    }

    let name = match name {
        Some(name) if !name.is_empty() => name,
        _ => {
            return Err(CatalogError::document(
                line,
                format!("{owner}: parameter Name attribute missing or empty"),
            ));
        }
    };
    let ty = ty.ok_or_else(|| {
        CatalogError::document(
            line,
            format!("{owner}: parameter '{name}' has no Type attribute"),
        )
    })?;

    Ok(Parameter { name, ty, variadic })
}

fn parse_property(
    start: &BytesStart<'_>,
    line: u32,
    owner: &SmolStr,
) -> Result<(SmolStr, String), CatalogError> {
    let mut name: Option<SmolStr> = None;
    let mut value: Option<String> = None;

    for attr in start.attributes() {
        let attr = attr.map_err(|e| CatalogError::document(line, format!("bad attribute: {e}")))?;
        let attr_value = attr
            .unescape_value()
            .map_err(|e| CatalogError::document(line, format!("bad attribute value: {e}")))?;
        match attr.key.as_ref() {
            b"Name" => name = Some(SmolStr::new(attr_value.trim())),
            b"Value" => value = Some(attr_value.into_owned()),
            other => return Err(unknown_attribute(line, "Property", other)),
        }
    }

    match (name, value) {
        (Some(name), Some(value)) if !name.is_empty() => Ok((name, value)),
        _ => Err(CatalogError::document(
            line,
            format!("EventHandler '{owner}': Property requires non-empty Name and Value attributes"),
        )),
    }
}

fn required_name(
    line: u32,
    element: &str,
    name: Option<SmolStr>,
) -> Result<SmolStr, CatalogError> {
    match name {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(CatalogError::document(
            line,
            format!("{element}: Name attribute missing or empty"),
        )),
    }
}

fn required_subsets(
    line: u32,
    element: &str,
    name: &SmolStr,
    subsets: Option<TagSet>,
) -> Result<TagSet, CatalogError> {
    subsets.ok_or_else(|| {
        CatalogError::document(line, format!("{element} '{name}': Subsets attribute missing"))
    })
}

fn unknown_attribute(line: u32, element: &str, attribute: &[u8]) -> CatalogError {
    CatalogError::document(
        line,
        format!(
            "{element}: unknown attribute '{}'",
            String::from_utf8_lossy(attribute)
        ),
    )
}

fn unknown_element(line: u32, element: &str, name: &SmolStr, child: &[u8]) -> CatalogError {
    CatalogError::document(
        line,
        format!(
            "{element} '{name}': unknown element '{}'",
            String::from_utf8_lossy(child)
        ),
    )
}
