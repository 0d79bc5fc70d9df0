//! Depth-bounded regression trees fit to boosting residuals.
//!
//! Splits are chosen by sum-of-squared-error reduction over midpoints of
//! consecutive distinct feature values. `min_child_weight` bounds the
//! minimum number of samples either side of a split may hold, preventing
//! overfitting on tiny partitions.

/// A node of a fitted regression tree.
#[derive(Debug, Clone)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// A single weakly-fit regression tree.
#[derive(Debug, Clone)]
pub struct RegressionTree {
    root: Node,
}

impl RegressionTree {
    /// Fit a tree to `targets` over the sampled rows and columns.
    ///
    /// `rows` is the full feature matrix; `row_indices` and `columns` select
    /// the subsample this tree trains on. Split gains are accumulated into
    /// `gains`, one slot per feature column, for importance reporting.
    pub fn fit(
        rows: &[Vec<f64>],
        targets: &[f64],
        row_indices: &[usize],
        columns: &[usize],
        max_depth: usize,
        min_child_weight: usize,
        gains: &mut [f64],
    ) -> Self {
        let root = build_node(
            rows,
            targets,
            row_indices,
            columns,
            max_depth,
            min_child_weight,
            gains,
        );
        Self { root }
    }

    /// Predict the tree output for a single feature vector.
    pub fn predict_row(&self, row: &[f64]) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let v = row.get(*feature).copied().unwrap_or(0.0);
                    node = if v <= *threshold { left } else { right };
                }
            }
        }
    }
}

/// The best split found for one node, if any.
struct BestSplit {
    feature: usize,
    threshold: f64,
    gain: f64,
    left: Vec<usize>,
    right: Vec<usize>,
}

fn build_node(
    rows: &[Vec<f64>],
    targets: &[f64],
    samples: &[usize],
    columns: &[usize],
    depth: usize,
    min_child_weight: usize,
    gains: &mut [f64],
) -> Node {
    let mean = node_mean(targets, samples);
    if depth == 0 || samples.len() < 2 * min_child_weight {
        return Node::Leaf { value: mean };
    }

    match find_best_split(rows, targets, samples, columns, min_child_weight) {
        Some(split) => {
            gains[split.feature] += split.gain;
            let left = build_node(
                rows,
                targets,
                &split.left,
                columns,
                depth - 1,
                min_child_weight,
                gains,
            );
            let right = build_node(
                rows,
                targets,
                &split.right,
                columns,
                depth - 1,
                min_child_weight,
                gains,
            );
            Node::Split {
                feature: split.feature,
                threshold: split.threshold,
                left: Box::new(left),
                right: Box::new(right),
            }
        }
        None => Node::Leaf { value: mean },
    }
}

fn node_mean(targets: &[f64], samples: &[usize]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(|&i| targets[i]).sum::<f64>() / samples.len() as f64
}

/// Search every candidate column for the SSE-reducing split with the
/// largest gain. Candidate thresholds are midpoints between consecutive
/// distinct feature values in the node's sample.
fn find_best_split(
    rows: &[Vec<f64>],
    targets: &[f64],
    samples: &[usize],
    columns: &[usize],
    min_child_weight: usize,
) -> Option<BestSplit> {
    let n = samples.len();
    let total_sum: f64 = samples.iter().map(|&i| targets[i]).sum();
    let total_sq: f64 = samples.iter().map(|&i| targets[i] * targets[i]).sum();
    let parent_sse = total_sq - total_sum * total_sum / n as f64;

    let mut best: Option<(usize, f64, f64)> = None; // (feature, threshold, gain)

    for &feature in columns {
        let mut ordered: Vec<usize> = samples.to_vec();
        ordered.sort_by(|&a, &b| {
            rows[a][feature]
                .partial_cmp(&rows[b][feature])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        for k in 1..n {
            let prev = rows[ordered[k - 1]][feature];
            let curr = rows[ordered[k]][feature];
            let t = targets[ordered[k - 1]];
            left_sum += t;
            left_sq += t * t;

            if prev >= curr {
                continue; // no boundary between equal values
            }
            if k < min_child_weight || n - k < min_child_weight {
                continue;
            }

            let right_sum = total_sum - left_sum;
            let right_sq = total_sq - left_sq;
            let sse_left = left_sq - left_sum * left_sum / k as f64;
            let sse_right = right_sq - right_sum * right_sum / (n - k) as f64;
            let gain = parent_sse - sse_left - sse_right;

            if gain > 1e-12 && best.map_or(true, |(_, _, g)| gain > g) {
                best = Some((feature, (prev + curr) / 2.0, gain));
            }
        }
    }

    best.map(|(feature, threshold, gain)| {
        let (left, right): (Vec<usize>, Vec<usize>) = samples
            .iter()
            .partition(|&&i| rows[i][feature] <= threshold);
        BestSplit {
            feature,
            threshold,
            gain,
            left,
            right,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn step_data() -> (Vec<Vec<f64>>, Vec<f64>) {
        // Feature 0 separates targets perfectly at 5.0.
        let rows: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64, 1.0]).collect();
        let targets: Vec<f64> = (0..10).map(|i| if i < 5 { 10.0 } else { 20.0 }).collect();
        (rows, targets)
    }

    #[test]
    fn tree_learns_a_step_function() {
        let (rows, targets) = step_data();
        let samples: Vec<usize> = (0..10).collect();
        let mut gains = vec![0.0; 2];
        let tree = RegressionTree::fit(&rows, &targets, &samples, &[0, 1], 3, 1, &mut gains);

        assert_relative_eq!(tree.predict_row(&[2.0, 1.0]), 10.0, epsilon = 1e-9);
        assert_relative_eq!(tree.predict_row(&[8.0, 1.0]), 20.0, epsilon = 1e-9);
    }

    #[test]
    fn gains_accrue_to_the_splitting_feature() {
        let (rows, targets) = step_data();
        let samples: Vec<usize> = (0..10).collect();
        let mut gains = vec![0.0; 2];
        RegressionTree::fit(&rows, &targets, &samples, &[0, 1], 3, 1, &mut gains);

        assert!(gains[0] > 0.0);
        assert_relative_eq!(gains[1], 0.0); // constant column never splits
    }

    #[test]
    fn constant_targets_yield_a_single_leaf() {
        let rows: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64]).collect();
        let targets = vec![7.0; 10];
        let samples: Vec<usize> = (0..10).collect();
        let mut gains = vec![0.0; 1];
        let tree = RegressionTree::fit(&rows, &targets, &samples, &[0], 3, 1, &mut gains);

        assert_relative_eq!(tree.predict_row(&[0.0]), 7.0);
        assert_relative_eq!(tree.predict_row(&[9.0]), 7.0);
        assert_relative_eq!(gains[0], 0.0);
    }

    #[test]
    fn min_child_weight_blocks_small_partitions() {
        let (rows, targets) = step_data();
        let samples: Vec<usize> = (0..10).collect();
        let mut gains = vec![0.0; 2];
        // A leaf floor larger than half the node makes every split illegal.
        let tree = RegressionTree::fit(&rows, &targets, &samples, &[0, 1], 3, 6, &mut gains);

        let mean = targets.iter().sum::<f64>() / targets.len() as f64;
        assert_relative_eq!(tree.predict_row(&[0.0, 1.0]), mean, epsilon = 1e-9);
        assert_relative_eq!(tree.predict_row(&[9.0, 1.0]), mean, epsilon = 1e-9);
    }

    #[test]
    fn depth_one_produces_a_stump() {
        // Two splits would be needed for a perfect fit; depth 1 allows one.
        let rows: Vec<Vec<f64>> = (0..12).map(|i| vec![i as f64]).collect();
        let targets: Vec<f64> = (0..12)
            .map(|i| match i {
                0..=3 => 0.0,
                4..=7 => 10.0,
                _ => 20.0,
            })
            .collect();
        let samples: Vec<usize> = (0..12).collect();
        let mut gains = vec![0.0; 1];
        let tree = RegressionTree::fit(&rows, &targets, &samples, &[0], 1, 1, &mut gains);

        // A stump has exactly two distinct outputs.
        let mut outputs: Vec<f64> = (0..12)
            .map(|i| tree.predict_row(&[i as f64]))
            .collect();
        outputs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        outputs.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
        assert_eq!(outputs.len(), 2);
    }
}
