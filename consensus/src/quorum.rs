//! Quorum evaluation — turns per-validator votes into global confirmation.

use tangle_ledger::{Transaction, TransactionGraph};
use tangle_types::{ProtocolParams, TxId};

/// Summary of one evaluation sweep.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuorumReport {
    /// Transactions that crossed the quorum during this sweep.
    pub newly_confirmed: Vec<TxId>,
    /// Confirmed transactions after the sweep, including earlier ones.
    pub confirmed: usize,
    pub total: usize,
}

/// Whether `tx` currently holds enough votes.
pub fn has_quorum(tx: &Transaction, params: &ProtocolParams) -> bool {
    tx.vote_count() >= params.quorum()
}

/// Confirm every transaction whose vote count reaches the quorum.
///
/// Confirmation is never undone: a transaction confirmed in an earlier sweep
/// stays confirmed even if the resolver has since revoked supporting votes.
pub fn evaluate_quorum(graph: &mut TransactionGraph) -> QuorumReport {
    let params = *graph.params();
    let reached: Vec<TxId> = graph
        .iter()
        .filter(|tx| !tx.is_confirmed() && has_quorum(tx, &params))
        .map(Transaction::id)
        .collect();

    let mut report = QuorumReport {
        total: graph.len(),
        ..QuorumReport::default()
    };
    for id in reached {
        if graph.set_confirmed(id) {
            report.newly_confirmed.push(id);
        }
    }
    report.confirmed = graph.iter().filter(|tx| tx.is_confirmed()).count();

    tracing::info!(
        newly_confirmed = report.newly_confirmed.len(),
        confirmed = report.confirmed,
        total = report.total,
        quorum = params.quorum(),
        "quorum evaluated"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(graph: &TransactionGraph, tx: TxId, validators: &[usize]) {
        for &v in validators {
            graph.get(tx).unwrap().mark_valid(v);
        }
    }

    #[test]
    fn quorum_of_three_confirms() {
        let mut graph = TransactionGraph::default();
        let a = graph
            .create_transaction(TxId::GENESIS, TxId::SECOND_ROOT)
            .unwrap();
        vote(&graph, a, &[0, 1, 2]);
        vote(&graph, TxId::GENESIS, &[0, 1]);

        let report = evaluate_quorum(&mut graph);
        assert_eq!(report.newly_confirmed, vec![a]);
        assert_eq!(report.confirmed, 1);
        assert_eq!(report.total, 3);
        assert!(!graph.get(TxId::GENESIS).unwrap().is_confirmed());
    }

    #[test]
    fn confirmation_survives_revoked_votes() {
        let mut graph = TransactionGraph::default();
        let a = graph
            .create_transaction(TxId::GENESIS, TxId::SECOND_ROOT)
            .unwrap();
        vote(&graph, a, &[0, 1, 2, 3]);
        evaluate_quorum(&mut graph);

        for v in 0..4 {
            graph.get(a).unwrap().revoke(v);
        }
        let report = evaluate_quorum(&mut graph);
        assert!(report.newly_confirmed.is_empty());
        assert_eq!(report.confirmed, 1);
        assert!(graph.get(a).unwrap().is_confirmed());
    }

    #[test]
    fn larger_tolerance_raises_quorum() {
        let mut graph = TransactionGraph::new(ProtocolParams::new(2));
        vote(&graph, TxId::GENESIS, &[0, 1, 2, 3]);
        evaluate_quorum(&mut graph);
        assert!(!graph.get(TxId::GENESIS).unwrap().is_confirmed());

        vote(&graph, TxId::GENESIS, &[4]);
        evaluate_quorum(&mut graph);
        assert!(graph.get(TxId::GENESIS).unwrap().is_confirmed());
    }
}
