//! Scene graph of visual nodes
//!
//! The scene graph is the render-side container: each node is a named box
//! with a pose. Game objects keep the [`NodeId`] of the node that draws them
//! and detach it when they are destroyed.

pub mod scene_graph;

pub use scene_graph::{NodeId, SceneGraph, VisualNode};
