use tracing::trace;

use crate::graph::{Flags, Graph};

fn mark_reachable(graph: &mut Graph) {
    let start = graph.start();
    let mut stack = vec![start];
    graph.node_mut(start).flags.insert(Flags::VISITED);

    while let Some(node) = stack.pop() {
        let next: Vec<_> = graph.node(node).edges().iter().map(|e| e.to).collect();

        for to in next {
            let flags = &mut graph.node_mut(to).flags;

            if !flags.contains(Flags::VISITED) {
                flags.insert(Flags::VISITED);
                stack.push(to);
            }
        }
    }
}

fn mark_active(graph: &mut Graph) {
    let mut preds = vec![vec![]; graph.len()];
    let mut stack = vec![];

    for (i, node) in graph.nodes().iter().enumerate() {
        if !node.flags().contains(Flags::VISITED) {
            continue;
        }

        for e in node.edges() {
            preds[e.to].push(i);
        }

        if node.is_final() {
            stack.push(i);
        }
    }

    for &node in &stack {
        graph.node_mut(node).flags.insert(Flags::ACTIVE);
    }

    while let Some(node) = stack.pop() {
        for &pred in &preds[node] {
            let flags = &mut graph.node_mut(pred).flags;

            if !flags.contains(Flags::ACTIVE) {
                flags.insert(Flags::ACTIVE);
                stack.push(pred);
            }
        }
    }
}

/// Remove every node that is unreachable from the start or cannot reach a
/// final node, renumbering the rest consecutively
///
/// Start and final markers follow their nodes.  If no final node is
/// reachable at all, the start node is kept alone with no edges.
pub fn prune(graph: &mut Graph) {
    if graph.is_empty() {
        return;
    }

    let before = graph.len();
    mark_reachable(graph);
    mark_active(graph);

    let start = graph.start();
    if graph.node(start).flags().contains(Flags::ACTIVE) {
        graph.retain(|_, n| n.flags().contains(Flags::ACTIVE));
    } else {
        graph.retain(|i, _| i == start);
        graph.node_mut(0).edges.clear();
    }

    graph.clear_transient();
    trace!(before, after = graph.len(), "Pruned inactive nodes");
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn drops_dead_and_unreachable() {
        let mut g = Graph::with_start();
        let live = g.push();
        let dead = g.push();
        let orphan = g.push();
        g.connect(0, dead, Some('b'));
        g.connect(0, live, Some('a'));
        g.connect(dead, dead, Some('a'));
        g.connect(orphan, live, Some('a'));
        g.mark_final(live);
        g.mark_final(orphan);

        prune(&mut g);

        assert_eq!(g.len(), 2);
        assert_eq!(g.start(), 0);
        assert_eq!(g.finals().collect::<Vec<_>>(), [1]);
        assert_eq!(g.edge_count(), 1);
        assert!(g.accepts("a"));
        assert!(g.nodes().iter().all(|n| {
            !n.flags().contains(Flags::VISITED) && !n.flags().contains(Flags::ACTIVE)
        }));
    }

    #[test]
    fn moved_start_is_renumbered() {
        let mut g = Graph::new();
        let orphan = g.push();
        let start = g.push();
        let fin = g.push();
        g.connect(orphan, start, Some('a'));
        g.connect(start, fin, Some('a'));
        g.set_start(start);
        g.mark_final(fin);

        prune(&mut g);

        assert_eq!(g.len(), 2);
        assert_eq!(g.start(), 0);
        assert!(g.node(0).is_start());
        assert!(g.is_final(1));
    }

    #[test]
    fn empty_language_keeps_start() {
        let mut g = Graph::with_start();
        let sink = g.push();
        g.connect(0, sink, Some('a'));
        g.connect(0, 0, Some('b'));

        prune(&mut g);

        assert_eq!(g.len(), 1);
        assert_eq!(g.edge_count(), 0);
        assert!(g.node(0).is_start());
        assert!(!g.accepts(""));
    }
}
