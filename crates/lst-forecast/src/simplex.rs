//! Derivative-free minimization via the Nelder-Mead simplex method.
//!
//! The CSS objective for a low-order ARMA model is smooth but its gradient
//! is awkward to derive through the residual recursion, so a simplex search
//! over the three parameters is both adequate and robust here.

/// Minimize `f` starting from `start`, with an initial simplex spanned by
/// `steps` (one step per dimension). Returns the best point found.
///
/// Standard coefficients: reflection 1, expansion 2, contraction 0.5,
/// shrink 0.5. Iteration is deterministic.
pub fn nelder_mead<F>(f: F, start: &[f64], steps: &[f64], max_iter: usize, tol: f64) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let n = start.len();
    debug_assert_eq!(steps.len(), n);

    // Initial simplex: the start point plus one vertex offset per dimension.
    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(n + 1);
    simplex.push(start.to_vec());
    for i in 0..n {
        let mut vertex = start.to_vec();
        vertex[i] += steps[i];
        simplex.push(vertex);
    }
    let mut scores: Vec<f64> = simplex.iter().map(|v| f(v)).collect();

    for _ in 0..max_iter {
        // Order vertices best to worst.
        let mut order: Vec<usize> = (0..=n).collect();
        order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));
        let best = order[0];
        let worst = order[n];
        let second_worst = order[n - 1];

        if (scores[worst] - scores[best]).abs() <= tol {
            break;
        }

        // Centroid of all vertices except the worst.
        let mut centroid = vec![0.0; n];
        for (i, vertex) in simplex.iter().enumerate() {
            if i == worst {
                continue;
            }
            for d in 0..n {
                centroid[d] += vertex[d];
            }
        }
        for c in centroid.iter_mut() {
            *c /= n as f64;
        }

        let point_along = |coef: f64| -> Vec<f64> {
            (0..n)
                .map(|d| centroid[d] + coef * (centroid[d] - simplex[worst][d]))
                .collect()
        };

        // Reflect.
        let reflected = point_along(1.0);
        let reflected_score = f(&reflected);

        if reflected_score < scores[best] {
            // Expand.
            let expanded = point_along(2.0);
            let expanded_score = f(&expanded);
            if expanded_score < reflected_score {
                simplex[worst] = expanded;
                scores[worst] = expanded_score;
            } else {
                simplex[worst] = reflected;
                scores[worst] = reflected_score;
            }
            continue;
        }

        if reflected_score < scores[second_worst] {
            simplex[worst] = reflected;
            scores[worst] = reflected_score;
            continue;
        }

        // Contract toward the centroid.
        let contracted = point_along(-0.5);
        let contracted_score = f(&contracted);
        if contracted_score < scores[worst] {
            simplex[worst] = contracted;
            scores[worst] = contracted_score;
            continue;
        }

        // Shrink everything toward the best vertex.
        let best_vertex = simplex[best].clone();
        for (i, vertex) in simplex.iter_mut().enumerate() {
            if i == best {
                continue;
            }
            for d in 0..n {
                vertex[d] = best_vertex[d] + 0.5 * (vertex[d] - best_vertex[d]);
            }
            scores[i] = f(vertex);
        }
    }

    let best = (0..=n)
        .min_by(|&a, &b| scores[a].total_cmp(&scores[b]))
        .unwrap_or(0);
    simplex.swap_remove(best)
}
