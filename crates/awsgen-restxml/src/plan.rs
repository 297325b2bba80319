//! The compiled form of a REST-XML request body.
//!
//! Emitters produce [`XmlOp`]s. The ops of one structure shape form a
//! [`Routine`], compiled once and shared by every place the structure occurs
//! (the document root and any nested member). A [`CompiledBody`] bundles the
//! body decision with the routines it needs.

use std::collections::BTreeMap;

use awsgen_model::ShapeId;
use serde::Serialize;

/// Where an op reads its input value from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputRef {
    /// Direct field access on the structure being serialized.
    Field(String),
    /// The value bound by the enclosing [`XmlOp::IfPresent`].
    Present,
    /// The current item of the enclosing [`XmlOp::ForEach`].
    Item,
}

/// A namespace declaration attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamespaceAttr {
    /// Attribute name (`xmlns` or `xmlns:prefix`).
    pub name: String,
    /// Namespace URI.
    pub uri: String,
}

/// One step of a compiled routine. Ops write into the current output node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum XmlOp {
    /// Run `body` only if `field` is present, binding it as [`InputRef::Present`].
    IfPresent {
        /// Field of the current structure.
        field: String,
        /// Ops run with the field bound.
        body: Vec<XmlOp>,
    },
    /// Append `<tag>text</tag>`.
    Element {
        /// Element name.
        tag: String,
        /// Text source.
        input: InputRef,
    },
    /// Set `name="text"` on the current node.
    Attribute {
        /// Attribute name.
        name: String,
        /// Text source.
        input: InputRef,
    },
    /// Append `<tag>true</tag>` or `<tag>false</tag>`.
    Boolean {
        /// Element name.
        tag: String,
        /// Boolean source.
        input: InputRef,
    },
    /// Append `<tag>` and run the routine of `shape` inside it.
    Structure {
        /// Element name.
        tag: String,
        /// Namespace declared on the new element.
        #[serde(skip_serializing_if = "Option::is_none")]
        namespace: Option<NamespaceAttr>,
        /// Structure whose routine fills the element.
        shape: ShapeId,
        /// Structure value source.
        input: InputRef,
    },
    /// Run `body` once per list item, binding it as [`InputRef::Item`].
    ///
    /// With a `wrapper` the items are written inside one `<wrapper>` element
    /// (written even for an empty list); without one they land in the current
    /// node.
    ForEach {
        /// Container element name, `None` for flattened lists.
        #[serde(skip_serializing_if = "Option::is_none")]
        wrapper: Option<String>,
        /// List value source; an absent list has no items.
        input: InputRef,
        /// Ops run per item.
        body: Vec<XmlOp>,
    },
}

impl XmlOp {
    /// Whether running this op may set an attribute on the current node.
    #[must_use]
    pub fn sets_attribute(&self) -> bool {
        match self {
            Self::Attribute { .. } => true,
            Self::IfPresent { body, .. } | Self::ForEach { wrapper: None, body, .. } => {
                body.iter().any(Self::sets_attribute)
            }
            Self::Element { .. }
            | Self::Boolean { .. }
            | Self::Structure { .. }
            | Self::ForEach {
                wrapper: Some(_), ..
            } => false,
        }
    }

    fn collect_shapes<'a>(&'a self, out: &mut Vec<&'a ShapeId>) {
        match self {
            Self::Structure { shape, .. } => out.push(shape),
            Self::IfPresent { body, .. } | Self::ForEach { body, .. } => {
                for op in body {
                    op.collect_shapes(out);
                }
            }
            Self::Element { .. } | Self::Attribute { .. } | Self::Boolean { .. } => {}
        }
    }
}

/// The compiled members of one structure shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Routine {
    /// Structure shape this routine serializes.
    pub shape: ShapeId,
    /// Ops in member declaration order.
    pub ops: Vec<XmlOp>,
}

impl Routine {
    /// Structure shapes whose routines this routine invokes.
    #[must_use]
    pub fn referenced_shapes(&self) -> Vec<&ShapeId> {
        let mut shapes = Vec::new();
        for op in &self.ops {
            op.collect_shapes(&mut shapes);
        }
        shapes
    }

    /// Whether running this routine may set an attribute on its output node.
    #[must_use]
    pub fn sets_attribute(&self) -> bool {
        self.ops.iter().any(XmlOp::sets_attribute)
    }
}

/// How the body of an operation is produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BodyPlan {
    /// Always the empty string.
    Empty,
    /// The raw value of a payload field, empty when absent.
    Raw {
        /// Payload field of the input structure.
        field: String,
    },
    /// An XML document whose root content is the routine of `root`.
    Document {
        /// Structure serialized at the document root.
        root: ShapeId,
        /// Payload field holding the root value; `None` means the operation
        /// input itself. An absent payload value yields an empty body.
        #[serde(skip_serializing_if = "Option::is_none")]
        payload: Option<String>,
    },
}

/// The compiled body logic of one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledBody {
    /// Operation name.
    pub operation: String,
    /// Body decision.
    pub plan: BodyPlan,
    /// Routines reachable from the plan, by structure shape.
    pub routines: BTreeMap<ShapeId, Routine>,
}

impl CompiledBody {
    /// A body that is always empty.
    #[must_use]
    pub fn empty(operation: &str) -> Self {
        Self {
            operation: operation.to_owned(),
            plan: BodyPlan::Empty,
            routines: BTreeMap::new(),
        }
    }

    /// Whether executing the body builds an XML document.
    #[must_use]
    pub fn needs_document(&self) -> bool {
        matches!(self.plan, BodyPlan::Document { .. })
    }

    /// The routine compiled for `shape`.
    #[must_use]
    pub fn routine(&self, shape: &ShapeId) -> Option<&Routine> {
        self.routines.get(shape)
    }
}
