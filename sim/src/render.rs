//! Graphviz rendering of a finished run.
//!
//! Transactions are labelled with their conflict id; later alternatives of a
//! contested id get a `ds` suffix and a red label. Confirmed transactions are
//! outlined green. Each validator's chain is drawn in blue, one node per
//! entry, linked to the previous entry and to the accepted tip. Edges point
//! from child to parent, drawn backwards.

use std::fmt::Write;

use tangle_consensus::ValidatorSet;
use tangle_ledger::{ConflictIndex, Transaction, TransactionGraph};

pub fn render_dot(graph: &TransactionGraph, validators: &ValidatorSet) -> String {
    let index = ConflictIndex::build(graph);
    let mut out = String::from("digraph G {\n");

    for tx in graph.iter() {
        let double_spend = index.is_double_spend(tx.conflict_id(), tx.id());
        let mut attrs = vec![format!("label=\"{}\"", label(tx, double_spend))];
        if tx.is_confirmed() {
            attrs.push("color=green".to_string());
        }
        if index.is_contested(tx.conflict_id()) {
            attrs.push("fontcolor=red".to_string());
        }
        let _ = writeln!(out, "  tx{} [{}];", tx.id(), attrs.join(", "));
        for parent in tx.parents() {
            let _ = writeln!(out, "  tx{} -> tx{} [dir=back];", parent, tx.id());
        }
    }

    for validator in validators.iter() {
        let v = validator.index();
        let entries = validator.chain().entries();
        for (i, entry) in entries.iter().enumerate() {
            let _ = writeln!(
                out,
                "  v{v}_{i} [label=\"V{v}={}\", color=blue];",
                entry.sequence
            );
            if let Some(prev) = entry.previous {
                let _ = writeln!(out, "  v{v}_{} -> v{v}_{i} [dir=back];", prev.index());
            }
            let edge_color = match graph.get(entry.transaction) {
                Some(tx) if index.is_double_spend(tx.conflict_id(), tx.id()) => "red",
                _ => "blue",
            };
            let _ = writeln!(
                out,
                "  tx{} -> v{v}_{i} [dir=back, color={edge_color}];",
                entry.transaction
            );
        }
    }

    out.push_str("}\n");
    out
}

fn label(tx: &Transaction, double_spend: bool) -> String {
    if double_spend {
        format!("{}ds", tx.conflict_id())
    } else {
        tx.conflict_id().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tangle_consensus::evaluate_quorum;
    use tangle_types::{ConflictId, TxId};

    #[test]
    fn renders_transactions_chains_and_double_spends() {
        let mut graph = TransactionGraph::default();
        let a = graph
            .create_transaction(TxId::GENESIS, TxId::SECOND_ROOT)
            .unwrap();
        let ds = graph
            .create_conflicting_transaction(ConflictId::of(a), TxId::SECOND_ROOT, TxId::GENESIS)
            .unwrap();
        let mut validators = ValidatorSet::new(graph.params()).unwrap();
        validators.run_all(&graph, &graph.tips());
        evaluate_quorum(&mut graph);

        let dot = render_dot(&graph, &validators);
        assert!(dot.starts_with("digraph G {"));
        assert!(dot.trim_end().ends_with('}'));
        assert!(dot.contains(&format!("tx{ds} [label=\"2ds\"")));
        assert!(dot.contains("tx0 -> tx1 [dir=back];"));
        assert!(dot.contains("v0_0 [label=\"V0=1\", color=blue];"));
        assert!(dot.contains("v0_0 -> v0_1 [dir=back];"));
        assert!(dot.contains(&format!("tx{ds} -> v0_1 [dir=back, color=red];")));
        assert!(dot.contains("tx2 [label=\"2\", color=green, fontcolor=red];"));
    }
}
