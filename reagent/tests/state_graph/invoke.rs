//! Invoke semantics: edge order, routing, stop reasons, iteration cap, error propagation.

use std::collections::HashMap;
use std::sync::Arc;

use reagent::graph::{FieldBasedUpdater, SharedState};
use reagent::{AgentError, StateGraph, StopReason, END, START};
use serde_json::json;

use crate::common::{fail, visit, TraceState, TraceUpdate};

fn routes(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// **Scenario**: a linear chain a -> b -> c stops at c with no outgoing edge.
#[tokio::test]
async fn linear_chain_runs_in_order() {
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_fn_node("a", visit("a"))
        .add_fn_node("b", visit("b"))
        .add_fn_node("c", visit("c"))
        .add_edge(START, "a")
        .add_edge("a", "b")
        .add_edge("b", "c");
    let run = graph.compile().unwrap().invoke(TraceState::default()).await.unwrap();

    assert_eq!(run.state.visited, vec!["a", "b", "c"]);
    assert_eq!(run.state.count, 3);
    assert_eq!(run.steps, 3);
    assert_eq!(run.stop, StopReason::NoOutgoingEdge);
}

/// **Scenario**: only the first edge added for a node is followed.
#[tokio::test]
async fn first_edge_wins() {
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_fn_node("a", visit("a"))
        .add_fn_node("b", visit("b"))
        .add_fn_node("c", visit("c"))
        .set_start("a")
        .add_edge("a", "b")
        .add_edge("a", "c");
    let state = graph
        .compile()
        .unwrap()
        .invoke_state(TraceState::default())
        .await
        .unwrap();

    assert_eq!(state.visited, vec!["a", "b"]);
}

/// **Scenario**: a terminal node halts the run even when it has an outgoing edge.
#[tokio::test]
async fn terminal_node_halts() {
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_fn_node("a", visit("a"))
        .add_fn_node("b", visit("b"))
        .set_start("a")
        .add_edge("a", "b")
        .add_terminal("a");
    let run = graph.compile().unwrap().invoke(TraceState::default()).await.unwrap();

    assert_eq!(run.state.visited, vec!["a"]);
    assert_eq!(run.stop, StopReason::Terminal);
}

/// **Scenario**: an edge to END stops the run.
#[tokio::test]
async fn edge_to_end_stops() {
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_fn_node("a", visit("a"))
        .set_start("a")
        .add_edge("a", END);
    let run = graph.compile().unwrap().invoke(TraceState::default()).await.unwrap();

    assert_eq!(run.steps, 1);
    assert_eq!(run.stop, StopReason::End);
}

/// **Scenario**: a conditional edge routes on post-merge state until the counter reaches 3.
#[tokio::test]
async fn conditional_edge_loops_until_done() {
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_fn_node("work", visit("work"))
        .set_start("work")
        .add_conditional_edges(
            "work",
            Arc::new(|s: &TraceState| {
                if s.count < 3 {
                    "again".to_string()
                } else {
                    "done".to_string()
                }
            }),
            routes(&[("again", "work"), ("done", END)]),
        );
    let run = graph.compile().unwrap().invoke(TraceState::default()).await.unwrap();

    assert_eq!(run.state.count, 3);
    assert_eq!(run.steps, 3);
    assert_eq!(run.stop, StopReason::End);
}

/// **Scenario**: a router key missing from the route table fails with Routing and halts.
#[tokio::test]
async fn unmapped_route_key_is_routing_error() {
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_fn_node("a", visit("a"))
        .add_fn_node("b", visit("b"))
        .set_start("a")
        .add_conditional_edges(
            "a",
            Arc::new(|_: &TraceState| "sideways".to_string()),
            routes(&[("forward", "b")]),
        );
    let err = graph
        .compile()
        .unwrap()
        .invoke(TraceState::default())
        .await
        .unwrap_err();

    match err {
        AgentError::Routing { from, key } => {
            assert_eq!(from, "a");
            assert_eq!(key, "sideways");
        }
        other => panic!("expected Routing, got {other:?}"),
    }
}

/// **Scenario**: a cycle with no terminal stops exactly at the cap with the accumulated state.
#[tokio::test]
async fn cycle_stops_at_iteration_cap() {
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_fn_node("ping", visit("ping"))
        .add_fn_node("pong", visit("pong"))
        .set_start("ping")
        .add_edge("ping", "pong")
        .add_edge("pong", "ping");
    let run = graph.compile().unwrap().invoke(TraceState::default()).await.unwrap();

    assert_eq!(run.stop, StopReason::IterationCap);
    assert_eq!(run.steps, 50);
    assert_eq!(run.state.count, 50);
    assert_eq!(run.state.visited.last().map(String::as_str), Some("pong"));
}

/// **Scenario**: a lowered cap is honored.
#[tokio::test]
async fn custom_cap_is_honored() {
    let mut graph = StateGraph::<TraceState>::new().with_max_iterations(5);
    graph
        .add_fn_node("loop", visit("loop"))
        .set_start("loop")
        .add_edge("loop", "loop");
    let run = graph.compile().unwrap().invoke(TraceState::default()).await.unwrap();

    assert_eq!(run.steps, 5);
    assert_eq!(run.stop, StopReason::IterationCap);
}

/// **Scenario**: a node error aborts the run unchanged.
#[tokio::test]
async fn node_error_propagates() {
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_fn_node("a", visit("a"))
        .add_fn_node("bad", fail)
        .set_start("a")
        .add_edge("a", "bad");
    let err = graph
        .compile()
        .unwrap()
        .invoke(TraceState::default())
        .await
        .unwrap_err();

    assert!(matches!(err, AgentError::ExecutionFailed(ref m) if m == "always fails"));
}

/// **Scenario**: an edge that reaches an unregistered node fails with NodeNotFound.
#[tokio::test]
async fn dangling_edge_is_node_not_found_at_runtime() {
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_fn_node("a", visit("a"))
        .set_start("a")
        .add_edge("a", "ghost");
    let err = graph
        .compile()
        .unwrap()
        .invoke(TraceState::default())
        .await
        .unwrap_err();

    assert!(matches!(err, AgentError::NodeNotFound(ref id) if id == "ghost"));
}

/// **Scenario**: a per-node updater overrides merge for that node only.
#[tokio::test]
async fn per_node_updater_overrides_merge() {
    let ignore_count = Arc::new(FieldBasedUpdater::<TraceState, _>::new(
        |s: &mut TraceState, u: TraceUpdate| s.visited.extend(u.visit),
    ));
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_fn_node("a", visit("a"))
        .add_node_with_updater(
            "b",
            Arc::new(reagent::graph::FnNode::new("b", visit("b"))),
            ignore_count,
        )
        .set_start("a")
        .add_edge("a", "b");
    let state = graph
        .compile()
        .unwrap()
        .invoke_state(TraceState::default())
        .await
        .unwrap();

    assert_eq!(state.visited, vec!["a", "b"]);
    assert_eq!(state.count, 1);
}

/// **Scenario**: the untyped SharedState merges by key overwrite.
#[tokio::test]
async fn shared_state_merges_keys() {
    let mut graph = StateGraph::<SharedState>::new();
    graph
        .add_fn_node("first", |_: &SharedState| {
            Ok([("a".to_string(), json!(1)), ("b".to_string(), json!(1))]
                .into_iter()
                .collect())
        })
        .add_fn_node("second", |_: &SharedState| {
            Ok([("b".to_string(), json!(2))].into_iter().collect())
        })
        .set_start("first")
        .add_edge("first", "second");
    let state = graph
        .compile()
        .unwrap()
        .invoke_state(SharedState::new())
        .await
        .unwrap();

    assert_eq!(state["a"], json!(1));
    assert_eq!(state["b"], json!(2));
}
