//! Compile-time validation: only the start node is checked.

use std::sync::Arc;

use reagent::graph::NameNode;
use reagent::{CompilationError, StateGraph, START};

use crate::common::{visit, TraceState};

/// **Scenario**: compile without a start node fails with MissingStart.
#[test]
fn compile_fails_without_start() {
    let mut graph = StateGraph::<TraceState>::new();
    graph.add_fn_node("a", visit("a"));
    assert!(matches!(graph.compile(), Err(CompilationError::MissingStart)));
}

/// **Scenario**: a start id that was never registered fails with StartNodeNotFound.
#[test]
fn compile_fails_when_start_not_registered() {
    let mut graph = StateGraph::<TraceState>::new();
    graph.add_fn_node("a", visit("a")).set_start("ghost");
    match graph.compile() {
        Err(CompilationError::StartNodeNotFound(id)) => assert_eq!(id, "ghost"),
        Err(e) => panic!("unexpected error: {e}"),
        Ok(_) => panic!("expected StartNodeNotFound"),
    }
}

/// **Scenario**: edges to unknown nodes are not checked at compile time.
#[test]
fn compile_ignores_dangling_edges() {
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_fn_node("a", visit("a"))
        .add_edge(START, "a")
        .add_edge("a", "nowhere");
    let compiled = graph.compile().unwrap();
    assert_eq!(compiled.start(), "a");
}

/// **Scenario**: the default iteration cap is 50 and can be overridden.
#[test]
fn iteration_cap_default_and_override() {
    let mut graph = StateGraph::<TraceState>::new();
    graph.add_node("a", Arc::new(NameNode::new("a"))).set_start("a");
    assert_eq!(graph.compile().unwrap().max_iterations(), 50);

    let mut graph = StateGraph::<TraceState>::new().with_max_iterations(7);
    graph.add_node("a", Arc::new(NameNode::new("a"))).set_start("a");
    assert_eq!(graph.compile().unwrap().max_iterations(), 7);
}
