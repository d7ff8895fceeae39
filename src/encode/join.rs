use serde::Serialize;
use std::collections::HashSet;

use super::Frame;

/// Keyed difference between two consecutive frames.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Transition {
    /// Keys new in the next frame, in its draw order.
    pub enter: Vec<String>,
    /// Keys present in both frames; these animate in place.
    pub update: Vec<String>,
    /// Keys that disappear, in the previous frame's order.
    pub exit: Vec<String>,
}

impl Transition {
    pub fn is_empty(&self) -> bool {
        self.enter.is_empty() && self.update.is_empty() && self.exit.is_empty()
    }
}

/// Match points by key. With no previous frame every point enters.
pub fn join(previous: Option<&Frame>, next: &Frame) -> Transition {
    let prev_keys: HashSet<&str> = previous
        .map(|f| f.points.iter().map(|p| p.key.as_str()).collect())
        .unwrap_or_default();
    let next_keys: HashSet<&str> = next.points.iter().map(|p| p.key.as_str()).collect();

    let mut t = Transition::default();
    for p in &next.points {
        if prev_keys.contains(p.key.as_str()) {
            t.update.push(p.key.clone());
        } else {
            t.enter.push(p.key.clone());
        }
    }
    if let Some(prev) = previous {
        t.exit = prev
            .points
            .iter()
            .filter(|p| !next_keys.contains(p.key.as_str()))
            .map(|p| p.key.clone())
            .collect();
    }
    t
}
