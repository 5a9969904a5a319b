//! JSON run report.

use serde::Serialize;
use std::path::Path;

use tangle_consensus::ChainEntry;
use tangle_ledger::ConflictIndex;
use tangle_types::{ConflictId, ProtocolParams, TxId};

use crate::error::SimError;
use crate::scenario::{Run, Scenario};

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub scenario: Scenario,
    pub seed: u64,
    pub params: ProtocolParams,
    pub validators: usize,
    pub quorum: usize,
    pub confirmed: usize,
    pub total: usize,
    pub transactions: Vec<TransactionReport>,
    pub chains: Vec<ChainReport>,
}

#[derive(Debug, Serialize)]
pub struct TransactionReport {
    pub id: TxId,
    pub parents: Vec<TxId>,
    pub conflict_id: ConflictId,
    pub double_spend: bool,
    pub valid_by: Vec<bool>,
    pub confirmed: bool,
}

#[derive(Debug, Serialize)]
pub struct ChainReport {
    pub validator: usize,
    pub entries: Vec<ChainEntry>,
}

impl RunReport {
    pub fn from_run(run: &Run) -> Self {
        let params = *run.graph.params();
        let index = ConflictIndex::build(&run.graph);
        let transactions = run
            .graph
            .iter()
            .map(|tx| TransactionReport {
                id: tx.id(),
                parents: tx.parents().collect(),
                conflict_id: tx.conflict_id(),
                double_spend: index.is_double_spend(tx.conflict_id(), tx.id()),
                valid_by: tx.valid_by(),
                confirmed: tx.is_confirmed(),
            })
            .collect();
        let chains = run
            .validators
            .iter()
            .map(|v| ChainReport {
                validator: v.index(),
                entries: v.chain().entries().to_vec(),
            })
            .collect();

        Self {
            scenario: run.scenario,
            seed: run.seed,
            params,
            validators: params.validators(),
            quorum: params.quorum(),
            confirmed: run.quorum.confirmed,
            total: run.quorum.total,
            transactions,
            chains,
        }
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write(&self, path: &Path) -> Result<(), SimError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::scenario;

    #[test]
    fn report_reflects_the_run() {
        let run = scenario::run(&SimConfig::default()).unwrap();
        let report = RunReport::from_run(&run);

        assert_eq!(report.validators, 4);
        assert_eq!(report.quorum, 3);
        assert_eq!(report.transactions.len(), run.graph.len());
        assert_eq!(report.chains.len(), 4);
        assert!(report.transactions[0].parents.is_empty());
        assert_eq!(report.transactions[1].parents, vec![TxId::GENESIS]);

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["scenario"], "basic");
        assert_eq!(json["params"]["byzantine_fault_tolerance"], 1);
        assert_eq!(json["transactions"][2]["valid_by"], serde_json::json!([true, true, true, true]));
    }

    #[test]
    fn writes_report_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("report.json");
        let run = scenario::run(&SimConfig::default()).unwrap();
        RunReport::from_run(&run).write(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"chains\""));
    }
}
