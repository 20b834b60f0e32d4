//! Topology builders. Each returns unweighted arcs over `0..v`; weights are
//! attached afterwards.

use amdbench_core::{Edge, Graph};
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::{SliceRandom, index};

use super::sampling::{Arc, arcs_for_density, fill_to, gnm, possible_arcs, prufer_tree};

/// Strongly connected digraph with `m` arcs.
///
/// Rejection-samples up to `attempts` G(n, m) graphs. If none is strongly
/// connected, or `m < v` makes that impossible, builds a Hamiltonian cycle
/// over a random permutation and tops it up with random arcs, so the result
/// has `max(m, v)` arcs.
pub fn connected(rng: &mut StdRng, v: usize, m: usize, attempts: u32) -> Vec<Arc> {
    if v <= 1 {
        return Vec::new();
    }
    if m >= v {
        for attempt in 1..=attempts {
            let arcs = gnm(rng, v, m);
            if is_strongly_connected(v, &arcs) {
                tracing::trace!(attempt, "connected sample accepted");
                return arcs;
            }
        }
    }
    tracing::debug!(
        vertices = v,
        arcs = m,
        attempts,
        "rejection sampling exhausted; using Hamiltonian cycle"
    );

    let mut order: Vec<usize> = (0..v).collect();
    order.shuffle(rng);
    let cycle = (0..v).map(|i| (order[i], order[(i + 1) % v])).collect();
    fill_to(rng, v, cycle, m)
}

/// Near-equal groups of vertices, each internally strongly connected, with
/// no arc between groups.
///
/// Uses `clamp(⌊v/5⌋, 2, 5)` groups; the first `v mod k` groups get one
/// extra vertex.
pub fn disconnected(rng: &mut StdRng, v: usize, density: f64, attempts: u32) -> Vec<Arc> {
    let mut arcs = Vec::new();
    let mut offset = 0;
    for size in group_sizes(v) {
        if size >= 2 {
            let m = arcs_for_density(size, density);
            arcs.extend(
                connected(rng, size, m, attempts)
                    .into_iter()
                    .map(|(s, t)| (s + offset, t + offset)),
            );
        }
        offset += size;
    }
    arcs
}

/// Sizes of the groups [`disconnected`] splits `v` vertices into.
pub fn group_sizes(v: usize) -> Vec<usize> {
    let k = (v / 5).clamp(2, 5);
    let rest = v % k;
    (0..k).map(|i| v / k + usize::from(i < rest)).collect()
}

/// `i → (i+1) mod v` for every vertex. A single vertex gets a self-loop.
pub fn cyclic(v: usize) -> Vec<Arc> {
    (0..v).map(|i| (i, (i + 1) % v)).collect()
}

/// G(n, m) with `m = ⌊0.9·V·(V−1)⌋`.
pub fn dense(rng: &mut StdRng, v: usize) -> Vec<Arc> {
    let total = possible_arcs(v);
    let m = total / 10 * 9 + total % 10 * 9 / 10;
    gnm(rng, v, m)
}

/// Uniform random labeled tree, each edge oriented by a fair coin. Sorted.
pub fn sparse(rng: &mut StdRng, v: usize) -> Vec<Arc> {
    let mut arcs: Vec<Arc> = prufer_tree(rng, v)
        .into_iter()
        .map(|(a, b)| if rng.gen_bool(0.5) { (a, b) } else { (b, a) })
        .collect();
    arcs.sort_unstable();
    arcs
}

/// G(n, m) with `m = ⌊density·V·(V−1)⌋`, then every arc touching `⌈v/10⌉`
/// randomly chosen vertices is removed.
pub fn isolated(rng: &mut StdRng, v: usize, density: f64) -> Vec<Arc> {
    let arcs = gnm(rng, v, arcs_for_density(v, density));
    let mut stripped = vec![false; v];
    for x in index::sample(rng, v, v.div_ceil(10).min(v)) {
        stripped[x] = true;
    }
    arcs.into_iter()
        .filter(|&(s, t)| !stripped[s] && !stripped[t])
        .collect()
}

fn is_strongly_connected(v: usize, arcs: &[Arc]) -> bool {
    let edges = arcs.iter().map(|&(s, t)| Edge::new(s, t, 1)).collect();
    Graph::new(v, edges).is_ok_and(|g| g.is_strongly_connected())
}
