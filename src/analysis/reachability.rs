//! Call reachability analyzer
//!
//! Builds a directed call graph for one top-level type and computes the set
//! of methods transitively reachable from an entry method. Edges come from
//! two resolution forms:
//!
//! - bare or `this.` calls, resolved by simple name against the declaring
//!   class's method table, falling back to the top-level type's table (a
//!   sketch inner class calls applet helpers unqualified);
//! - calls through a named receiver whose declared type (parameter, local,
//!   own field, top-level field) is a class declared in the same unit.
//!
//! Methods may call each other mutually; the closure visits each node at
//! most once, so cycles and diamonds terminate.

use crate::model::{classes_in, ClassDecl, MethodId, Qualifier};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use std::collections::{HashMap, HashSet};

/// Static call graph of one top-level class and its nested types.
pub struct CallGraph {
    graph: DiGraph<MethodId, ()>,
    nodes: HashMap<MethodId, NodeIndex>,
}

impl CallGraph {
    pub fn build(top: &ClassDecl) -> Self {
        let classes = classes_in(top);

        let mut graph = DiGraph::new();
        let mut nodes = HashMap::new();
        for class in &classes {
            for method in &class.methods {
                nodes.insert(method.id, graph.add_node(method.id));
            }
        }

        let by_name: HashMap<&str, &ClassDecl> =
            classes.iter().map(|c| (c.name.as_str(), *c)).collect();

        for class in &classes {
            for method in &class.methods {
                for call in &method.calls {
                    let targets: Vec<MethodId> = match &call.qualifier {
                        Qualifier::Implicit | Qualifier::This => {
                            let own: Vec<MethodId> =
                                class.methods_named(&call.name).map(|m| m.id).collect();
                            if own.is_empty() && !std::ptr::eq(*class, top) {
                                top.methods_named(&call.name).map(|m| m.id).collect()
                            } else {
                                own
                            }
                        }
                        Qualifier::Super => Vec::new(),
                        Qualifier::Named(_) => {
                            let Some(base) = call.qualifier_base() else {
                                continue;
                            };
                            let declared = method
                                .type_of(base)
                                .or_else(|| class.field_type(base))
                                .or_else(|| top.field_type(base));
                            match declared.and_then(|ty| by_name.get(ty)) {
                                Some(target) => {
                                    target.methods_named(&call.name).map(|m| m.id).collect()
                                }
                                None => Vec::new(),
                            }
                        }
                    };
                    for target in targets {
                        if let (Some(&from), Some(&to)) =
                            (nodes.get(&method.id), nodes.get(&target))
                        {
                            graph.add_edge(from, to, ());
                        }
                    }
                }
            }
        }

        Self { graph, nodes }
    }

    /// The closure of methods reachable from `entry`, entry included.
    pub fn reachable_from(&self, entry: MethodId) -> HashSet<MethodId> {
        let mut reachable = HashSet::new();
        reachable.insert(entry);

        let Some(&start) = self.nodes.get(&entry) else {
            return reachable;
        };
        let mut dfs = Dfs::new(&self.graph, start);
        while let Some(idx) = dfs.next(&self.graph) {
            reachable.insert(self.graph[idx]);
        }
        reachable
    }
}
