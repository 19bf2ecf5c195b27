//! Property-based tests for data handling and evaluation.

use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

use standard_ml::data::{DataSet, DataSetRow, MaxNormalizer, Normalizer};
use standard_ml::eval::{ClassificationMetrics, ClassifierEvaluator, Evaluator};

fn data_set(values: &[(f64, f64)]) -> DataSet {
    let mut set = DataSet::new(1, 1);
    for &(x, y) in values {
        set.add_row(DataSetRow::new(vec![x], vec![y])).unwrap();
    }
    set
}

proptest! {
    /// Split parts always cover every row exactly once.
    #[test]
    fn split_sizes_sum_to_len(n in 0usize..200, ratio in 0.05f64..0.95, seed in any::<u64>()) {
        let values: Vec<(f64, f64)> = (0..n).map(|i| (i as f64, 0.0)).collect();
        let set = data_set(&values);
        let parts = set.split(&[ratio, 1.0 - ratio], &mut StdRng::seed_from_u64(seed)).unwrap();
        prop_assert_eq!(parts.len(), 2);
        prop_assert_eq!(parts[0].len() + parts[1].len(), n);
        prop_assert_eq!(parts[0].len(), ((ratio * n as f64).round() as usize).min(n));
    }

    /// After max normalization the fitting set lies within [-1, 1].
    #[test]
    fn max_normalized_values_in_unit_range(
        values in prop::collection::vec((-1e6f64..1e6, -1e6f64..1e6), 1..50)
    ) {
        let mut set = data_set(&values);
        let norm = MaxNormalizer::fit(&set);
        norm.normalize(&mut set);
        for row in set.rows() {
            prop_assert!(row.input[0].abs() <= 1.0 + 1e-12);
            prop_assert!(row.desired_output[0].abs() <= 1.0 + 1e-12);
        }
    }

    /// Every class's TP + TN + FP + FN equals the number of evaluated rows.
    #[test]
    fn confusion_counts_partition_rows(
        pairs in prop::collection::vec((0usize..4, 0usize..4), 0..100)
    ) {
        let mut eval = ClassifierEvaluator::multi_class(["a", "b", "c", "d"]);
        for &(actual, predicted) in &pairs {
            let mut desired = vec![0.0; 4];
            desired[actual] = 1.0;
            let mut output = vec![0.1; 4];
            output[predicted] = 0.9;
            eval.process_result(&output, &desired);
        }
        let cm = eval.result();
        prop_assert_eq!(cm.total(), pairs.len());
        for m in ClassificationMetrics::from_matrix(cm) {
            prop_assert_eq!(m.total(), pairs.len());
            prop_assert!((0.0..=1.0).contains(&m.precision()));
            prop_assert!((0.0..=1.0).contains(&m.recall()));
        }
    }
}
