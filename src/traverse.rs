//////////////////////////////////////////////////////////////////////
// breadth-first walk of a word automaton, carrying a polygon along
//
// each dequeued record is yielded as-is; if it is shallower than the
// depth cutoff, one child is queued per enabled transition, with the
// polygon pushed through that generator's reflection.

use std::collections::VecDeque;

use crate::automaton::{Generator, WordAutomaton};
use crate::reflect::Reflection;
use crate::Vec3d;

#[derive(Debug, Clone)]
pub struct TraversalRecord<S> {
    pub state: S,
    pub word: Vec<Generator>,
    pub steps: usize,
    pub shape: Vec<Vec3d>,
}

pub struct OrbitTraversal<'a, A: WordAutomaton> {
    automaton: &'a A,
    reflections: &'a [Reflection; 3],
    depth: usize,
    queue: VecDeque<TraversalRecord<A::State>>,
}

pub fn traverse<'a, A: WordAutomaton>(automaton: &'a A,
                                      reflections: &'a [Reflection; 3],
                                      depth: usize,
                                      seed: Vec<Vec3d>) -> OrbitTraversal<'a, A> {

    let mut queue = VecDeque::new();

    queue.push_back(TraversalRecord {
        state: automaton.start(),
        word: Vec::new(),
        steps: 0,
        shape: seed,
    });

    OrbitTraversal { automaton, reflections, depth, queue }

}

impl<'a, A: WordAutomaton> Iterator for OrbitTraversal<'a, A> {

    type Item = TraversalRecord<A::State>;

    fn next(&mut self) -> Option<Self::Item> {

        let record = self.queue.pop_front()?;

        if record.steps < self.depth {

            for (symbol, target) in self.automaton.transitions(record.state) {

                let reflection = &self.reflections[symbol];

                let mut word = record.word.clone();
                word.push(symbol);

                self.queue.push_back(TraversalRecord {
                    state: target,
                    word,
                    steps: record.steps + 1,
                    shape: record.shape.iter().map(|p| reflection.apply(p)).collect(),
                });

            }

        }

        Some(record)

    }

}

//////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {

    use super::*;
    use crate::automaton::ShortlexAutomaton;
    use crate::coxeter::CoxeterMatrix;
    use crate::{mirrors, reflect};
    use approx::assert_abs_diff_eq;

    // unrestricted automaton: every generator from every state
    struct FreeAutomaton;

    impl WordAutomaton for FreeAutomaton {

        type State = u8;

        fn start(&self) -> u8 {
            0
        }

        fn transitions(&self, _state: u8) -> Vec<(Generator, u8)> {
            vec![(0, 0), (1, 0), (2, 0)]
        }

    }

    fn setup(sym: (u32, u32, u32), d: [f64; 3]) -> (ShortlexAutomaton, [Reflection; 3], Vec3d) {

        let cm = CoxeterMatrix::from_symbol(sym.0, sym.1, sym.2).unwrap();
        let m = mirrors::solve(&cm).unwrap();

        (ShortlexAutomaton::new(&cm).unwrap(),
         reflect::build(&m, &d),
         reflect::solve_initial_point(&m, &d).unwrap())

    }

    #[test]
    fn test_depth_zero_yields_seed() {

        let (a, refls, v) = setup((3, 3, 3), [1.0, 1.0, 1.0]);
        let seed = vec![v, refls[0].apply(&v)];

        let records: Vec<_> = traverse(&a, &refls, 0, seed.clone()).collect();

        assert_eq!(records.len(), 1);
        assert!(records[0].word.is_empty());
        assert_eq!(records[0].steps, 0);
        assert_eq!(records[0].shape, seed);

    }

    #[test]
    fn test_free_automaton_counts() {

        let (_, refls, v) = setup((3, 3, 3), [1.0, 1.0, 1.0]);

        let records: Vec<_> = traverse(&FreeAutomaton, &refls, 3, vec![v]).collect();

        assert_eq!(records.len(), 1 + 3 + 9 + 27);

    }

    #[test]
    fn test_bfs_order_and_bound() {

        let (a, refls, v) = setup((2, 4, 4), [1.0, 1.0, 1.0]);
        let depth = 7;

        let records: Vec<_> = traverse(&a, &refls, depth, vec![v]).collect();

        let expected: usize = a.count_words(depth).iter().sum();
        assert_eq!(records.len(), expected);

        for pair in records.windows(2) {
            assert!(pair[0].steps <= pair[1].steps);
        }

        for r in &records {
            assert!(r.steps <= depth);
            assert_eq!(r.word.len(), r.steps);
            assert!(a.accepts(&r.word));
        }

    }

    #[test]
    fn test_shape_follows_word() {

        let (a, refls, v) = setup((2, 3, 6), [1.2, 1.0, 0.8]);

        for r in traverse(&a, &refls, 5, vec![v]) {

            let expected = r.word.iter().fold(v, |p, &s| refls[s].apply(&p));
            assert_abs_diff_eq!(r.shape[0], expected, epsilon = 1e-9);

        }

    }

}
