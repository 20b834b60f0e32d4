//! Random building blocks shared by the topology builders.

use std::collections::BTreeSet;

use amdbench_core::Edge;
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::index;

/// An unweighted directed arc `(source, target)`.
pub type Arc = (usize, usize);

/// Number of ordered pairs without self-loops on `v` vertices.
///
/// Saturates at `usize::MAX`; [`super::GeneratorConfig::validate`] rejects
/// vertex counts where that would happen.
pub fn possible_arcs(v: usize) -> usize {
    v.saturating_mul(v.saturating_sub(1))
}

/// `⌊density · V·(V−1)⌋`.
pub fn arcs_for_density(v: usize, density: f64) -> usize {
    let total = possible_arcs(v);
    ((density * total as f64).floor() as usize).min(total)
}

/// Maps an index in `0..V·(V−1)` to the ordered pair it stands for,
/// skipping the diagonal.
fn arc_at(v: usize, idx: usize) -> Arc {
    let source = idx / (v - 1);
    let r = idx % (v - 1);
    let target = if r >= source { r + 1 } else { r };
    (source, target)
}

/// Draws `m` distinct arcs without self-loops, sorted by `(source, target)`.
///
/// `m` is capped at `V·(V−1)`.
pub fn gnm(rng: &mut StdRng, v: usize, m: usize) -> Vec<Arc> {
    let total = possible_arcs(v);
    let m = m.min(total);
    if m == 0 {
        return Vec::new();
    }
    let mut arcs: Vec<Arc> = index::sample(rng, total, m)
        .into_iter()
        .map(|idx| arc_at(v, idx))
        .collect();
    arcs.sort_unstable();
    arcs
}

/// Extends `base` with distinct random arcs until it holds `m` arcs (or
/// every possible arc). Result is sorted.
///
/// Arcs are drawn one at a time and duplicates redrawn, so the cost follows
/// the number of arcs added rather than `V·(V−1)`. When more than half of
/// the absent arcs are needed, the absent arcs are listed and sampled
/// directly instead.
pub fn fill_to(rng: &mut StdRng, v: usize, base: Vec<Arc>, m: usize) -> Vec<Arc> {
    let total = possible_arcs(v);
    let mut present: BTreeSet<Arc> = base.into_iter().collect();
    let wanted = m.min(total);
    let missing = wanted.saturating_sub(present.len());
    if missing == 0 {
        return present.into_iter().collect();
    }

    let absent = total.saturating_sub(present.len());
    if missing.saturating_mul(2) > absent {
        let candidates: Vec<Arc> = (0..total)
            .map(|idx| arc_at(v, idx))
            .filter(|arc| !present.contains(arc))
            .collect();
        for i in index::sample(rng, candidates.len(), missing.min(candidates.len())) {
            present.insert(candidates[i]);
        }
    } else {
        while present.len() < wanted {
            present.insert(arc_at(v, rng.gen_range(0..total)));
        }
    }
    present.into_iter().collect()
}

/// Decodes a uniformly random Prüfer sequence into the `V−1` undirected
/// edges of a labeled tree.
pub fn prufer_tree(rng: &mut StdRng, v: usize) -> Vec<Arc> {
    match v {
        0 | 1 => return Vec::new(),
        2 => return vec![(0, 1)],
        _ => {}
    }

    let sequence: Vec<usize> = (0..v - 2).map(|_| rng.gen_range(0..v)).collect();
    let mut degree = vec![1usize; v];
    for &x in &sequence {
        degree[x] += 1;
    }
    let mut leaves: BTreeSet<usize> = (0..v).filter(|&x| degree[x] == 1).collect();

    let mut edges = Vec::with_capacity(v - 1);
    for &x in &sequence {
        let Some(leaf) = leaves.pop_first() else {
            break;
        };
        edges.push((leaf, x));
        degree[x] -= 1;
        if degree[x] == 1 {
            leaves.insert(x);
        }
    }
    if let (Some(a), Some(b)) = (leaves.pop_first(), leaves.pop_first()) {
        edges.push((a, b));
    }
    edges
}

/// Attaches a uniform weight in `1..=max_weight` to each arc, in order.
pub fn assign_weights(rng: &mut StdRng, arcs: &[Arc], max_weight: u32) -> Vec<Edge> {
    let max_weight = max_weight.max(1);
    arcs.iter()
        .map(|&(source, target)| Edge::new(source, target, rng.gen_range(1..=max_weight)))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;

    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn arc_index_mapping_covers_every_pair_once() {
        let v = 6;
        let arcs: HashSet<Arc> = (0..possible_arcs(v)).map(|i| arc_at(v, i)).collect();
        assert_eq!(arcs.len(), 30);
        assert!(arcs.iter().all(|&(s, t)| s != t && s < v && t < v));
    }

    #[test]
    fn gnm_is_sorted_unique_and_loop_free() {
        let arcs = gnm(&mut rng(), 10, 40);
        assert_eq!(arcs.len(), 40);
        assert!(arcs.windows(2).all(|w| w[0] < w[1]));
        assert!(arcs.iter().all(|&(s, t)| s != t));
    }

    #[test]
    fn gnm_caps_at_complete_graph() {
        assert_eq!(gnm(&mut rng(), 4, 1000).len(), 12);
        assert!(gnm(&mut rng(), 1, 5).is_empty());
    }

    #[test]
    fn density_floor() {
        assert_eq!(arcs_for_density(20, 0.2), 76);
        assert_eq!(arcs_for_density(5, 1.0), 20);
        assert_eq!(arcs_for_density(1, 0.5), 0);
    }

    #[test]
    fn fill_to_keeps_base_and_reaches_target() {
        let base = vec![(0, 1), (1, 2), (2, 0)];
        let arcs = fill_to(&mut rng(), 5, base.clone(), 8);
        assert_eq!(arcs.len(), 8);
        assert!(base.iter().all(|a| arcs.contains(a)));
    }

    #[test]
    fn fill_to_can_complete_the_graph() {
        let arcs = fill_to(&mut rng(), 4, vec![(0, 1)], 100);
        assert_eq!(arcs.len(), 12);
        assert!(arcs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn fill_to_on_large_sparse_graph_only_adds_what_is_needed() {
        let v = 20_000;
        let cycle: Vec<Arc> = (0..v).map(|i| (i, (i + 1) % v)).collect();
        let arcs = fill_to(&mut rng(), v, cycle, 2 * v);
        assert_eq!(arcs.len(), 2 * v);
        assert!(arcs.iter().all(|&(s, t)| s != t && s < v && t < v));
        assert!(arcs.contains(&(v - 1, 0)));
    }

    #[test]
    fn prufer_tree_spans_all_vertices() {
        for v in [1, 2, 3, 10, 57] {
            let edges = prufer_tree(&mut rng(), v);
            assert_eq!(edges.len(), v.saturating_sub(1), "v={v}");
            let mut seen = vec![false; v];
            for &(a, b) in &edges {
                seen[a] = true;
                seen[b] = true;
            }
            if v > 1 {
                assert!(seen.iter().all(|&s| s), "v={v}");
            }
        }
    }

    #[test]
    fn weights_within_bounds() {
        let edges = assign_weights(&mut rng(), &[(0, 1), (1, 0), (0, 2)], 2);
        assert!(edges.iter().all(|e| e.weight == 1 || e.weight == 2));
        assert_eq!(edges[2].source, 0);
        assert_eq!(edges[2].target, 2);
    }
}
