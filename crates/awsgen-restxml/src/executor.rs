//! Executes a [`CompiledBody`] against a request value.
//!
//! Each run builds a fresh element tree (attributes can be set on a node after
//! its children, as with a DOM) and then writes it with `quick-xml`. Nothing
//! is carried over between runs.

use std::io::{self, Write};

use awsgen_model::{ShapeId, Value};
use bytes::Bytes;
use indexmap::IndexMap;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::trace;

use crate::error::SerializeError;
use crate::plan::{BodyPlan, CompiledBody, InputRef, XmlOp};

/// Runs a compiled body.
#[derive(Debug, Clone, Copy)]
pub struct Executor<'p> {
    body: &'p CompiledBody,
    xml_declaration: bool,
}

impl<'p> Executor<'p> {
    /// Create an executor writing an XML declaration.
    #[must_use]
    pub fn new(body: &'p CompiledBody) -> Self {
        Self {
            body,
            xml_declaration: true,
        }
    }

    /// Choose whether documents start with an XML declaration.
    #[must_use]
    pub fn with_xml_declaration(mut self, enabled: bool) -> Self {
        self.xml_declaration = enabled;
        self
    }

    /// Serialize `input` (the operation's input structure) into a body.
    pub fn run(&self, input: Option<&Value>) -> Result<Bytes, SerializeError> {
        let empty = IndexMap::new();
        let fields = match input {
            None => &empty,
            Some(value) => value
                .as_structure()
                .ok_or_else(|| SerializeError::TypeMismatch {
                    name: self.body.operation.clone(),
                    expected: "structure",
                    found: value.kind_name(),
                })?,
        };

        match &self.body.plan {
            BodyPlan::Empty => Ok(Bytes::new()),
            BodyPlan::Raw { field } => raw_value(field, fields.get(field)),
            BodyPlan::Document { root, payload } => {
                let fields = match payload {
                    None => fields,
                    Some(field) => match fields.get(field) {
                        None => return Ok(Bytes::new()),
                        Some(value) => value
                            .as_structure()
                            .ok_or_else(|| mismatch(field, "structure", value))?,
                    },
                };
                let mut document = Document::default();
                self.run_routine(root, &mut document, fields)?;
                if document.children.is_empty() {
                    return Ok(Bytes::new());
                }
                Ok(Bytes::from(document.to_xml(self.xml_declaration)?))
            }
        }
    }

    fn run_routine(
        &self,
        shape: &ShapeId,
        target: &mut dyn Target,
        fields: &IndexMap<String, Value>,
    ) -> Result<(), SerializeError> {
        let routine = self
            .body
            .routine(shape)
            .ok_or_else(|| SerializeError::MissingRoutine(shape.clone()))?;
        trace!(shape = %shape, "running routine");
        let scope = Scope {
            fields,
            present: None,
            item: None,
        };
        self.run_ops(&routine.ops, target, scope)
    }

    fn run_ops(
        &self,
        ops: &[XmlOp],
        target: &mut dyn Target,
        scope: Scope<'_>,
    ) -> Result<(), SerializeError> {
        for op in ops {
            self.run_op(op, target, scope)?;
        }
        Ok(())
    }

    fn run_op(
        &self,
        op: &XmlOp,
        target: &mut dyn Target,
        scope: Scope<'_>,
    ) -> Result<(), SerializeError> {
        match op {
            XmlOp::IfPresent { field, body } => {
                if let Some(value) = scope.fields.get(field) {
                    let bound = Scope {
                        present: Some(value),
                        ..scope
                    };
                    self.run_ops(body, target, bound)?;
                }
            }
            XmlOp::Element { tag, input } => {
                let text = text_value(tag, scope.require(input, tag)?)?;
                target.append(Element::with_text(tag, text));
            }
            XmlOp::Attribute { name, input } => {
                let text = text_value(name, scope.require(input, name)?)?;
                target.set_attribute(name, text)?;
            }
            XmlOp::Boolean { tag, input } => match scope.require(input, tag)? {
                Value::Boolean(b) => {
                    let text = if *b { "true" } else { "false" };
                    target.append(Element::with_text(tag, text.to_owned()));
                }
                other => return Err(mismatch(tag, "boolean", other)),
            },
            XmlOp::Structure {
                tag,
                namespace,
                shape,
                input,
            } => {
                let value = scope.require(input, tag)?;
                let fields = value
                    .as_structure()
                    .ok_or_else(|| mismatch(tag, "structure", value))?;
                let mut child = Element::new(tag);
                if let Some(ns) = namespace {
                    child.set_attribute(&ns.name, ns.uri.clone())?;
                }
                self.run_routine(shape, &mut child, fields)?;
                target.append(child);
            }
            XmlOp::ForEach {
                wrapper,
                input,
                body,
            } => {
                let items: &[Value] = match scope.resolve(input) {
                    None => &[],
                    Some(Value::List(items)) => items,
                    Some(other) => {
                        let name = wrapper.as_deref().unwrap_or("list");
                        return Err(mismatch(name, "list", other));
                    }
                };
                match wrapper {
                    Some(tag) => {
                        let mut list = Element::new(tag);
                        for item in items {
                            self.run_ops(body, &mut list, scope.with_item(item))?;
                        }
                        target.append(list);
                    }
                    None => {
                        for item in items {
                            self.run_ops(body, target, scope.with_item(item))?;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Values visible to the ops of one routine.
#[derive(Debug, Clone, Copy)]
struct Scope<'v> {
    fields: &'v IndexMap<String, Value>,
    present: Option<&'v Value>,
    item: Option<&'v Value>,
}

impl<'v> Scope<'v> {
    fn resolve(&self, input: &InputRef) -> Option<&'v Value> {
        match input {
            InputRef::Field(name) => self.fields.get(name),
            InputRef::Present => self.present,
            InputRef::Item => self.item,
        }
    }

    fn require(&self, input: &InputRef, name: &str) -> Result<&'v Value, SerializeError> {
        self.resolve(input)
            .ok_or_else(|| SerializeError::MissingValue(name.to_owned()))
    }

    fn with_item(self, item: &'v Value) -> Self {
        Self {
            item: Some(item),
            ..self
        }
    }
}

fn mismatch(name: &str, expected: &'static str, found: &Value) -> SerializeError {
    SerializeError::TypeMismatch {
        name: name.to_owned(),
        expected,
        found: found.kind_name(),
    }
}

fn text_value(name: &str, value: &Value) -> Result<String, SerializeError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Blob(b) => std::str::from_utf8(b)
            .map(str::to_owned)
            .map_err(|_| SerializeError::InvalidUtf8(name.to_owned())),
        other => Err(mismatch(name, "string", other)),
    }
}

fn raw_value(field: &str, value: Option<&Value>) -> Result<Bytes, SerializeError> {
    match value {
        None => Ok(Bytes::new()),
        Some(Value::Blob(b)) => Ok(b.clone()),
        Some(Value::String(s)) => Ok(Bytes::from(s.clone())),
        Some(other) => Err(mismatch(field, "blob", other)),
    }
}

// ---------------------------------------------------------------------------
// In-memory element tree
// ---------------------------------------------------------------------------

/// A node that can receive child elements and attributes.
trait Target {
    fn append(&mut self, element: Element);
    fn set_attribute(&mut self, name: &str, value: String) -> Result<(), SerializeError>;
}

#[derive(Debug)]
enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    fn with_text(name: &str, text: String) -> Self {
        let mut element = Self::new(name);
        if !text.is_empty() {
            element.children.push(Node::Text(text));
        }
        element
    }

    fn write<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (name, value) in &self.attributes {
            start.push_attribute((name.as_str(), value.as_str()));
        }

        if self.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        for child in &self.children {
            match child {
                Node::Element(element) => element.write(writer)?,
                Node::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
            }
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        Ok(())
    }
}

impl Target for Element {
    fn append(&mut self, element: Element) {
        self.children.push(Node::Element(element));
    }

    fn set_attribute(&mut self, name: &str, value: String) -> Result<(), SerializeError> {
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name.to_owned(), value)),
        }
        Ok(())
    }
}

/// The document node: holds top-level elements only.
#[derive(Debug, Default)]
struct Document {
    children: Vec<Element>,
}

impl Document {
    fn to_xml(&self, declaration: bool) -> io::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(512);
        let mut writer = Writer::new(&mut buf);

        if declaration {
            writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
            writer.get_mut().write_all(b"\n")?;
        }
        for element in &self.children {
            element.write(&mut writer)?;
        }

        Ok(buf)
    }
}

impl Target for Document {
    fn append(&mut self, element: Element) {
        self.children.push(element);
    }

    fn set_attribute(&mut self, name: &str, _value: String) -> Result<(), SerializeError> {
        Err(SerializeError::AttributeOnDocument(name.to_owned()))
    }
}
