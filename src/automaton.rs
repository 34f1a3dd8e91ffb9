//////////////////////////////////////////////////////////////////////
// word automata for Coxeter groups
//
// the traversal only needs a start state and, for each state, the
// enabled (generator, successor) pairs. ShortlexAutomaton provides
// the automaton whose paths from the start state are exactly the
// shortlex-least words of the group, built from the minimal
// (elementary) roots of the Coxeter matrix.

use std::collections::hash_map::Entry::{Occupied, Vacant};
use std::collections::HashMap;
use std::fmt;

use crate::coxeter::{CoxeterMatrix, RANK};
use crate::errors::*;
use crate::{Matrix3d, Vec3d};

const ROOT_TOL: f64 = 1e-9;

// sanity caps, far beyond anything a rank-3 group needs
const MAX_ROOTS: usize = 4096;
const MAX_STATES: usize = 1 << 16;

// generator symbols are mirror indices 0, 1, 2
pub type Generator = usize;

pub trait WordAutomaton {

    type State: Copy + fmt::Debug;

    fn start(&self) -> Self::State;

    // enabled transitions from state, in generator order
    fn transitions(&self, state: Self::State) -> Vec<(Generator, Self::State)>;

}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct StateId(pub usize);

//////////////////////////////////////////////////////////////////////
// minimal roots in the simple root basis along with the action of
// each generator on them
//
// table[k][s] is the index of s(roots[k]) if that is again a minimal
// root, None otherwise

#[derive(Debug)]
struct MinimalRoots {
    roots: Vec<Vec3d>,
    table: Vec<[Option<usize>; RANK]>,
}

fn simple_root(i: usize) -> Vec3d {
    let mut v = Vec3d::zeros();
    v[i] = 1.0;
    v
}

fn find_or_insert(roots: &mut Vec<Vec3d>, root: Vec3d) -> Result<usize> {

    if let Some(idx) = roots.iter().position(|r| (r - root).amax() < ROOT_TOL) {
        return Ok(idx);
    }

    if roots.len() >= MAX_ROOTS {
        bail!(ErrorKind::Configuration(
            format!("more than {} minimal roots", MAX_ROOTS)));
    }

    roots.push(root);

    Ok(roots.len() - 1)

}

impl MinimalRoots {

    fn new(cox_mat: &CoxeterMatrix) -> Result<Self> {

        let gram = Matrix3d::from_fn(|i, j| cox_mat.inner_product(i, j));

        let mut roots: Vec<Vec3d> = (0..RANK).map(simple_root).collect();
        let mut table = Vec::new();

        // roots grows while we scan it
        let mut k = 0;

        while k < roots.len() {

            let beta = roots[k];

            // b[s] = B(alpha_s, beta)
            let b = gram * beta;

            let mut row = [None; RANK];

            for s in 0..RANK {

                row[s] = if b[s].abs() < ROOT_TOL {

                    // s fixes beta
                    Some(k)

                } else if b[s] <= -1.0 + ROOT_TOL {

                    // s(beta) dominates alpha_s, not minimal
                    None

                } else {

                    let image = beta - 2.0 * b[s] * simple_root(s);

                    if image.iter().any(|&c| c < -ROOT_TOL) {
                        // s(alpha_s) = -alpha_s
                        None
                    } else {
                        Some(find_or_insert(&mut roots, image)?)
                    }

                };

            }

            table.push(row);
            k += 1;

        }

        Ok(MinimalRoots { roots, table })

    }

}

//////////////////////////////////////////////////////////////////////
// each state is the set of minimal roots that forbid the next letter;
// reading s from state D is rejected if alpha_s is in D, otherwise
// it leads to
//
//   {alpha_s} + s(D) + { s(alpha_t) : t < s }
//
// intersected with the minimal roots. the last term rules out words
// that could be rewritten to start with a smaller generator.

#[derive(Debug)]
pub struct ShortlexAutomaton {
    root_count: usize,
    states: Vec<Vec<usize>>,
    transitions: Vec<[Option<StateId>; RANK]>,
}

impl ShortlexAutomaton {

    pub fn new(cox_mat: &CoxeterMatrix) -> Result<Self> {

        let minimal = MinimalRoots::new(cox_mat)?;

        let mut states: Vec<Vec<usize>> = vec![vec![]];
        let mut lookup: HashMap<Vec<usize>, usize> = HashMap::new();
        lookup.insert(vec![], 0);

        let mut transitions = Vec::new();

        let mut idx = 0;

        while idx < states.len() {

            let mut row = [None; RANK];

            for s in 0..RANK {

                // simple roots are the first RANK minimal roots
                if states[idx].contains(&s) {
                    continue;
                }

                let mut next = vec![s];

                next.extend(states[idx].iter().filter_map(|&r| minimal.table[r][s]));
                next.extend((0..s).filter_map(|t| minimal.table[t][s]));

                next.sort_unstable();
                next.dedup();

                let target = match lookup.entry(next) {

                    Occupied(o) => *o.get(),

                    Vacant(v) => {

                        let new_idx = states.len();

                        if new_idx >= MAX_STATES {
                            bail!(ErrorKind::Configuration(
                                format!("automaton for {} exceeds {} states",
                                        cox_mat, MAX_STATES)));
                        }

                        states.push(v.key().clone());
                        v.insert(new_idx);

                        new_idx

                    }

                };

                row[s] = Some(StateId(target));

            }

            transitions.push(row);
            idx += 1;

        }

        debug!("automaton for {}: {} minimal roots, {} states",
               cox_mat, minimal.roots.len(), states.len());

        Ok(ShortlexAutomaton {
            root_count: minimal.roots.len(),
            states,
            transitions,
        })

    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn root_count(&self) -> usize {
        self.root_count
    }

    pub fn next(&self, state: StateId, symbol: Generator) -> Option<StateId> {
        self.transitions.get(state.0).and_then(|row| row.get(symbol).copied().flatten())
    }

    // every state accepts, so a word is accepted iff its path exists
    pub fn accepts(&self, word: &[Generator]) -> bool {

        let mut state = self.start();

        for &symbol in word {
            match self.next(state, symbol) {
                Some(s) => state = s,
                None => return false,
            }
        }

        true

    }

    // number of accepted words of each length 0..=depth
    pub fn count_words(&self, depth: usize) -> Vec<usize> {

        let mut counts = Vec::with_capacity(depth + 1);
        let mut paths = vec![0usize; self.states.len()];

        paths[0] = 1;

        for _ in 0..=depth {

            counts.push(paths.iter().sum());

            let mut next_paths = vec![0usize; self.states.len()];

            for (idx, &n) in paths.iter().enumerate() {
                if n == 0 {
                    continue;
                }
                for target in self.transitions[idx].iter().flatten() {
                    next_paths[target.0] += n;
                }
            }

            paths = next_paths;

        }

        counts

    }

}

impl WordAutomaton for ShortlexAutomaton {

    type State = StateId;

    fn start(&self) -> StateId {
        StateId(0)
    }

    fn transitions(&self, state: StateId) -> Vec<(Generator, StateId)> {
        self.transitions[state.0]
            .iter()
            .enumerate()
            .filter_map(|(symbol, target)| target.map(|t| (symbol, t)))
            .collect()
    }

}

//////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {

    use super::*;

    fn automaton(p: u32, q: u32, r: u32) -> ShortlexAutomaton {
        ShortlexAutomaton::new(&CoxeterMatrix::from_symbol(p, q, r).unwrap()).unwrap()
    }

    #[test]
    fn test_finite_group_orders() {

        for &((p, q, r), order) in &[((2, 2, 2), 8),
                                     ((2, 3, 3), 24),
                                     ((2, 3, 4), 48),
                                     ((2, 3, 5), 120)] {

            let a = automaton(p, q, r);
            let counts = a.count_words(40);

            assert_eq!(counts.iter().sum::<usize>(), order, "({}, {}, {})", p, q, r);
            assert_eq!(*counts.last().unwrap(), 0);

        }

    }

    #[test]
    fn test_affine_a2_growth() {

        let a = automaton(3, 3, 3);

        // Poincare series (1 + t + t^2) / (1 - t)^2
        assert_eq!(a.count_words(6), vec![1, 3, 6, 9, 12, 15, 18]);
        assert_eq!(a.root_count(), 6);

    }

    #[test]
    fn test_shortlex_words() {

        // s0 and s1 commute: only 01 survives
        let a = automaton(2, 3, 3);
        assert!(a.accepts(&[0, 1]));
        assert!(!a.accepts(&[1, 0]));
        assert!(!a.accepts(&[0, 0]));

        // braid relation 010 = 101 keeps the smaller word
        let a = automaton(3, 3, 3);
        assert!(a.accepts(&[0, 1, 0]));
        assert!(!a.accepts(&[1, 0, 1]));
        assert!(a.accepts(&[]));

    }

    #[test]
    fn test_transitions_from_start() {

        let a = automaton(2, 4, 4);
        let from_start: Vec<Generator> = a.transitions(a.start())
            .into_iter()
            .map(|(symbol, _)| symbol)
            .collect();

        assert_eq!(from_start, vec![0, 1, 2]);

        // no generator twice in a row
        for (symbol, target) in a.transitions(a.start()) {
            assert!(a.next(target, symbol).is_none());
        }

    }

}
