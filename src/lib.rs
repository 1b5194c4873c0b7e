//! # Parta-FL: Non-IID Partitioning and Per-Class Validation for Federated Learning
//!
//! Parta (from *partition*) is the data-plane core of a federated-learning
//! simulation harness for poisoning / label-flip research: it decides which
//! simulated participant owns which sample, and measures a trained model's
//! behavior class by class so targeted attacks cannot hide inside an
//! overall accuracy number.
//!
//! ## Partitioning Policies
//!
//! - [`sample_dirichlet()`] - Dirichlet-distributed class skew (seeded, non-IID)
//! - [`assign_by_bias()`] - Label-to-group correlation with optional server pool
//! - [`split_uniform()`] - Equal shuffled split (IID baseline)
//!
//! ## High-Level API
//!
//! Use [`Partitioner`] for seeded, reproducible partitioning and
//! [`PerClassValidator`] for capped per-class loss/accuracy breakdowns.

#![deny(missing_docs)]

pub mod attack;
pub mod data;
pub mod error;
pub mod math;
pub mod partition;
pub mod validation;

// Re-exports
pub use attack::{flip_targeted, flipped_label, select_adversaries, split_by_target};
pub use data::{EvalSet, LabelSource};
pub use error::PartaError;
pub use partition::{assign_by_bias, sample_dirichlet, split_uniform};
pub use partition::{PartitionMap, PartitionPolicy, Partitioner, ServerPool};
pub use validation::{Classifier, PerClassReport, PerClassValidator, ValidationMetric, ValidationReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Python bindings via PyO3
#[cfg(feature = "python")]
mod python {
    use std::collections::HashMap;

    use pyo3::prelude::*;

    use crate::{PartaError, PartitionPolicy, Partitioner, ServerPool};

    fn parse_policy(policy: &str, param: f64, server: Option<(usize, usize, f64)>) -> PyResult<PartitionPolicy> {
        match policy {
            "dirichlet" => Ok(PartitionPolicy::Dirichlet { alpha: param }),
            "bias" => Ok(PartitionPolicy::Bias {
                bias: param,
                server: server.map(|(size, favored_class, favored_fraction)| {
                    ServerPool::new(size, favored_class, favored_fraction)
                }),
            }),
            "uniform" => Ok(PartitionPolicy::Uniform),
            _ => Err(PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                "Unknown policy '{}'. Use 'dirichlet', 'bias', or 'uniform'",
                policy
            ))),
        }
    }

    fn parta_err(e: PartaError) -> PyErr {
        PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("{}", e))
    }

    #[pyclass(name = "Partitioner")]
    struct PyPartitioner {
        inner: Partitioner,
    }

    #[pymethods]
    impl PyPartitioner {
        #[new]
        #[pyo3(signature = (policy, participants, param, seed, server=None))]
        fn new(
            policy: String,
            participants: usize,
            param: f64,
            seed: u64,
            server: Option<(usize, usize, f64)>,
        ) -> PyResult<Self> {
            let policy = parse_policy(&policy, param, server)?;
            Ok(Self {
                inner: Partitioner::new(policy, participants, seed),
            })
        }

        fn partition(
            &self,
            labels: Vec<usize>,
        ) -> PyResult<(HashMap<usize, Vec<usize>>, Vec<usize>, Vec<usize>)> {
            let map = self.inner.partition(&labels).map_err(parta_err)?;
            let participants = map
                .participants()
                .map(|(id, indices)| (id, indices.to_vec()))
                .collect();
            Ok((participants, map.server().to_vec(), map.unassigned().to_vec()))
        }
    }

    #[pymodule]
    fn _core(_py: Python, m: &PyModule) -> PyResult<()> {
        m.add_class::<PyPartitioner>()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
