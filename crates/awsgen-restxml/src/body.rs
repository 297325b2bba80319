//! Body entry point: choose between an empty, raw or XML body.

use std::collections::BTreeMap;

use awsgen_model::{Member, Operation, Shape, ShapeGraph, ShapeId, ShapeKind};
use tracing::debug;

use crate::emit::compile_members;
use crate::error::CompileError;
use crate::plan::{BodyPlan, CompiledBody, Routine};

/// Compile the body logic of `operation`.
///
/// - Without a payload member the input structure's own members form the
///   document root content.
/// - A streaming payload, or a string/blob payload, is sent raw.
/// - Any other payload must be a structure; its members form the document
///   root content, with no element named after the payload field.
///
/// A document whose root routine writes nothing compiles to [`BodyPlan::Empty`].
pub fn compile_body(
    graph: &ShapeGraph,
    operation: &Operation,
) -> Result<CompiledBody, CompileError> {
    let Some(input_id) = &operation.input else {
        debug!(operation = %operation.name, "operation has no input, body is empty");
        return Ok(CompiledBody::empty(&operation.name));
    };

    let input = graph.shape(input_id)?;
    let ShapeKind::Structure(structure) = &input.kind else {
        return Err(CompileError::NotAStructure {
            shape: input.name.clone(),
            kind: input.kind.type_name(),
        });
    };

    let body = match structure.payload_member() {
        None => compile_document(graph, operation, input_id, None)?,
        Some(member) => compile_payload(graph, operation, input, member)?,
    };

    debug!(
        operation = %operation.name,
        plan = ?body.plan,
        routines = body.routines.len(),
        "compiled request body"
    );
    Ok(body)
}

fn compile_payload(
    graph: &ShapeGraph,
    operation: &Operation,
    input: &Shape,
    member: &Member,
) -> Result<CompiledBody, CompileError> {
    let field = member.label().to_owned();
    if graph.is_streaming(member)? {
        return Ok(raw_body(operation, field));
    }

    let target = graph.shape(&member.shape)?;
    match &target.kind {
        ShapeKind::Structure(_) => compile_document(graph, operation, &target.name, Some(field)),
        ShapeKind::String | ShapeKind::Blob => Ok(raw_body(operation, field)),
        other => Err(CompileError::UnsupportedPayload {
            shape: input.name.clone(),
            member: field,
            kind: other.type_name(),
        }),
    }
}

fn raw_body(operation: &Operation, field: String) -> CompiledBody {
    CompiledBody {
        operation: operation.name.clone(),
        plan: BodyPlan::Raw { field },
        routines: BTreeMap::new(),
    }
}

fn compile_document(
    graph: &ShapeGraph,
    operation: &Operation,
    root: &ShapeId,
    payload: Option<String>,
) -> Result<CompiledBody, CompileError> {
    let routines = compile_routines(graph, root)?;
    let Some(root_routine) = routines.get(root) else {
        return Ok(CompiledBody::empty(&operation.name));
    };

    if root_routine.ops.is_empty() {
        return Ok(CompiledBody::empty(&operation.name));
    }
    if root_routine.sets_attribute() {
        return Err(CompileError::AttributeOnDocument {
            shape: root.clone(),
        });
    }

    Ok(CompiledBody {
        operation: operation.name.clone(),
        plan: BodyPlan::Document {
            root: root.clone(),
            payload,
        },
        routines,
    })
}

/// Compile the routine of `root` and of every structure reachable from it.
///
/// Each structure is compiled once, however many members refer to it.
pub fn compile_routines(
    graph: &ShapeGraph,
    root: &ShapeId,
) -> Result<BTreeMap<ShapeId, Routine>, CompileError> {
    let mut routines = BTreeMap::new();
    let mut pending = vec![root.clone()];

    while let Some(id) = pending.pop() {
        if routines.contains_key(&id) {
            continue;
        }
        let routine = compile_members(graph, &id)?;
        pending.extend(
            routine
                .referenced_shapes()
                .into_iter()
                .filter(|shape| !routines.contains_key(*shape))
                .cloned(),
        );
        routines.insert(id, routine);
    }

    Ok(routines)
}
