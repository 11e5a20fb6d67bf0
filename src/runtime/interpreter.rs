//! Execute-phase driver. Directives run strictly in source order, once
//! each; an execute-phase error skips the offending directive and the run
//! continues. Dispatch is a closed match over the four directive variants.

use crate::diagnostics::{ExecError, error_codes};
use crate::syntax::directive::{AccessDirective, Directive, NodeId};
use crate::syntax::position::Position;

use super::registry::Registry;

/// Signal returned by a node that refuses to be the target of ACCESS.
struct Inaccessible;

/// Executes every directive once, in source order, collecting one error
/// per failing directive.
pub fn run_program(nodes: &[Directive], registry: &mut Registry) -> Vec<ExecError> {
    let mut errors = Vec::new();
    for (id, node) in nodes.iter().enumerate() {
        if let Err(err) = execute(id, node, nodes, registry) {
            errors.push(err);
        }
    }
    errors
}

fn execute(
    id: NodeId,
    node: &Directive,
    nodes: &[Directive],
    registry: &mut Registry,
) -> Result<(), ExecError> {
    match node {
        Directive::Scope(scope) => {
            register_entity(&scope.name, &scope.path, id, scope.position, registry)
        }
        Directive::Declare(decl) => {
            register_entity(&decl.name, &decl.path, id, decl.position, registry)
        }
        // the alias acted at scan time; nothing happens here
        Directive::Using(_) => Ok(()),
        Directive::Access(access) => execute_access(access, nodes, registry),
    }
}

fn register_entity(
    name: &str,
    path: &str,
    id: NodeId,
    position: Position,
    registry: &mut Registry,
) -> Result<(), ExecError> {
    if !registry.register(name, path.to_string(), id, position)? {
        return Err(ExecError::new(
            &error_codes::DUPLICATE_DECLARATION,
            format!(
                "declaration \"{}\" is not unique and conflicts with \"{}\"",
                name, path
            ),
            position,
        ));
    }
    Ok(())
}

fn execute_access(
    access: &AccessDirective,
    nodes: &[Directive],
    registry: &mut Registry,
) -> Result<(), ExecError> {
    let direct = first_match(&access.direct_candidates, registry);
    let aliased = first_match(&access.aliased_candidates, registry);

    let (path, node) = match (direct, aliased) {
        (Some((direct_path, _)), Some((aliased_path, _))) => {
            return Err(ExecError::new(
                &error_codes::AMBIGUOUS_NAME,
                format!(
                    "declaration \"{}\" is ambiguous by USING, could be \"{}\" or \"{}\"",
                    access.name, direct_path, aliased_path
                ),
                access.position,
            ));
        }
        (Some(entity), None) | (None, Some(entity)) => entity,
        (None, None) => {
            return Err(ExecError::new(
                &error_codes::UNRESOLVED_NAME,
                format!("declaration \"{}\" does not exist", access.name),
                access.position,
            ));
        }
    };

    match respond_to_access(&nodes[node], access, registry) {
        Ok(()) => Ok(()),
        Err(Inaccessible) => Err(ExecError::new(
            &error_codes::INACCESSIBLE_ENTITY,
            format!("attempt to access inaccessible item \"{}\"", path),
            access.position,
        )),
    }
}

/// Innermost-to-outermost scan over a candidate list; the first registered
/// candidate wins.
fn first_match(candidates: &[String], registry: &Registry) -> Option<(String, NodeId)> {
    candidates.iter().rev().find_map(|candidate| {
        registry
            .lookup(candidate)
            .map(|entity| (entity.path.clone(), entity.node))
    })
}

/// The access response of the resolved target node. Only declarations
/// accept an access; the observable effect is one line in the registry
/// log, recording the accesser's line and the target's qualified path.
fn respond_to_access(
    target: &Directive,
    accesser: &AccessDirective,
    registry: &mut Registry,
) -> Result<(), Inaccessible> {
    match target {
        Directive::Declare(decl) => {
            registry.log(format!(
                "LINE {} ACCESS {}",
                accesser.position.line, decl.path
            ));
            Ok(())
        }
        // scopes are addressable but not accessible; USING and ACCESS
        // never reach the registry at all
        Directive::Scope(_) | Directive::Using(_) | Directive::Access(_) => Err(Inaccessible),
    }
}
