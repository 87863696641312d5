use crate::bag::{BagType, Table, INFEASIBLE};
use crate::bag_tree::{BagTree, InvalidDecomposition};
use crate::coloring::Coloring;
use crate::transitions::{forget, introduce_edge, introduce_vertex, join};
use log::{debug, info};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::mem;

#[derive(Debug, PartialEq, Eq)]
pub enum SolveError {
    Invalid(InvalidDecomposition),
    Infeasible,
}

impl Display for SolveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::Invalid(e) => write!(f, "invalid decomposition: {}", e),
            SolveError::Infeasible => {
                write!(f, "no dominating set within representable range")
            }
        }
    }
}

impl From<InvalidDecomposition> for SolveError {
    fn from(e: InvalidDecomposition) -> Self {
        SolveError::Invalid(e)
    }
}

pub struct SolverBuilder {
    validate: bool,
    discard_consumed_tables: bool,
}

impl SolverBuilder {
    pub fn new() -> Self {
        Self {
            validate: true,
            discard_consumed_tables: false,
        }
    }

    impl_setter!(self, validate, bool);
    impl_setter!(self, discard_consumed_tables, bool);

    pub fn build(self) -> Solver {
        Solver {
            validate: self.validate,
            discard_consumed_tables: self.discard_consumed_tables,
        }
    }
}

pub struct Solver {
    validate: bool,
    discard_consumed_tables: bool,
}

impl Solver {
    pub fn solve(&self, tree: &mut BagTree) -> Result<usize, SolveError> {
        tree.build_child_pointers();
        if self.validate {
            tree.validate()?;
        }
        let root = tree.root().ok_or(InvalidDecomposition::NoRoot)?;

        let max_bag = tree
            .bags
            .iter()
            .map(|b| b.vertices.len())
            .max()
            .unwrap_or(0);
        info!("evaluating {} bags, max bag size {}", tree.len(), max_bag);

        for id in tree.postorder() {
            let mut bag = mem::take(&mut tree.bags[id]);
            debug!("{}", bag);
            match bag.bag_type {
                BagType::Leaf => {}
                BagType::IntroduceVertex => {
                    let child = bag.child1.expect("introduce bag without child");
                    introduce_vertex(&mut bag, &tree.bags[child], &tree.interner);
                }
                BagType::Forget => {
                    let child = bag.child1.expect("forget bag without child");
                    forget(&mut bag, &tree.bags[child], &mut tree.interner);
                }
                BagType::Join => {
                    let child1 = bag.child1.expect("join bag without first child");
                    let child2 = bag.child2.expect("join bag without second child");
                    join(
                        &mut bag,
                        &tree.bags[child1],
                        &tree.bags[child2],
                        &tree.interner,
                    );
                }
            }
            // edges activate strictly one after another
            for i in 0..bag.introduce_edges.len() {
                let edge = bag.introduce_edges[i];
                introduce_edge(&mut bag, edge, &mut tree.interner);
            }
            if self.discard_consumed_tables {
                for child in bag.child1.iter().chain(bag.child2.iter()) {
                    tree.bags[*child].table = Table::default();
                    tree.bags[*child].consistent_triples = Vec::new();
                }
            }
            tree.bags[id] = bag;
        }

        // the root is itself a forget bag over the empty vertex set, so its
        // single entry now holds the answer
        let answer = tree.bags[root].table[&Coloring::empty()];
        if answer == INFEASIBLE {
            return Err(SolveError::Infeasible);
        }
        info!("minimum dominating set size {}", answer);
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use crate::bag::BagType;
    use crate::bag_tree::BagTree;
    use crate::solver::SolverBuilder;
    use rand::prelude::*;

    // path-shaped nice decomposition over vertices 1..=n: introduce them all,
    // attach each edge at the bag introducing its larger endpoint, then forget
    // them one by one
    fn chain_tree(n: usize, edges: &[(usize, usize)]) -> BagTree {
        assert!(n >= 1);
        let mut tree = BagTree::new();
        let mut parent = tree.add_bag(BagType::Forget, None, vec![], vec![]);
        for i in (2..=n).rev() {
            let vertices: Vec<usize> = (i..=n).collect();
            parent = tree.add_bag(BagType::Forget, Some(parent), vertices, vec![]);
        }
        for k in (1..=n).rev() {
            let vertices: Vec<usize> = (1..=k).collect();
            let introduced: Vec<(usize, usize)> = edges
                .iter()
                .copied()
                .filter(|(u, v)| *u.max(v) == k)
                .collect();
            parent = tree.add_bag(BagType::IntroduceVertex, Some(parent), vertices, introduced);
        }
        tree.add_bag(BagType::Leaf, Some(parent), vec![], vec![]);
        tree
    }

    fn solve_chain(n: usize, edges: &[(usize, usize)]) -> usize {
        let mut tree = chain_tree(n, edges);
        SolverBuilder::new().build().solve(&mut tree).unwrap()
    }

    fn brute_force(n: usize, edges: &[(usize, usize)]) -> usize {
        let mut best = n;
        for mask in 0u32..(1 << n) {
            let in_set = |v: usize| mask & (1 << (v - 1)) != 0;
            let dominating = (1..=n).all(|v| {
                in_set(v)
                    || edges
                        .iter()
                        .any(|&(a, b)| (a == v && in_set(b)) || (b == v && in_set(a)))
            });
            if dominating {
                best = best.min(mask.count_ones() as usize);
            }
        }
        best
    }

    #[test]
    fn single_vertex() {
        assert_eq!(solve_chain(1, &[]), 1);
    }

    #[test]
    fn single_edge() {
        assert_eq!(solve_chain(2, &[(1, 2)]), 1);
    }

    #[test]
    fn path_of_three() {
        assert_eq!(solve_chain(3, &[(1, 2), (2, 3)]), 1);
    }

    #[test]
    fn path_of_four() {
        assert_eq!(solve_chain(4, &[(1, 2), (2, 3), (3, 4)]), 2);
    }

    #[test]
    fn isolated_vertices_all_count() {
        assert_eq!(solve_chain(3, &[]), 3);
        assert_eq!(solve_chain(4, &[(1, 2)]), 3);
    }

    #[test]
    fn cycle_of_four_through_a_join() {
        // two branches around the join bag {1, 3}, each covering half the
        // cycle 1-2-3-4-1
        let mut tree = BagTree::new();
        tree.add_bag(BagType::Forget, None, vec![], vec![]);
        tree.add_bag(BagType::Forget, Some(0), vec![3], vec![]);
        tree.add_bag(BagType::Join, Some(1), vec![1, 3], vec![]);

        tree.add_bag(BagType::Forget, Some(2), vec![1, 3], vec![]);
        tree.add_bag(
            BagType::IntroduceVertex,
            Some(3),
            vec![1, 2, 3],
            vec![(1, 2), (2, 3)],
        );
        tree.add_bag(BagType::IntroduceVertex, Some(4), vec![1, 3], vec![]);
        tree.add_bag(BagType::IntroduceVertex, Some(5), vec![1], vec![]);
        tree.add_bag(BagType::Leaf, Some(6), vec![], vec![]);

        tree.add_bag(BagType::Forget, Some(2), vec![1, 3], vec![]);
        tree.add_bag(
            BagType::IntroduceVertex,
            Some(8),
            vec![1, 3, 4],
            vec![(3, 4), (1, 4)],
        );
        tree.add_bag(BagType::IntroduceVertex, Some(9), vec![1, 3], vec![]);
        tree.add_bag(BagType::IntroduceVertex, Some(10), vec![1], vec![]);
        tree.add_bag(BagType::Leaf, Some(11), vec![], vec![]);

        let answer = SolverBuilder::new().build().solve(&mut tree).unwrap();
        assert_eq!(answer, 2);
    }

    #[test]
    fn star_with_five_leaves_through_a_join() {
        // centre 0 with leaves 1..=5, split 1-2 / 3-4-5 across the join
        let mut tree = BagTree::new();
        tree.add_bag(BagType::Forget, None, vec![], vec![]);
        tree.add_bag(BagType::Join, Some(0), vec![0], vec![]);

        tree.add_bag(BagType::Forget, Some(1), vec![0], vec![]);
        tree.add_bag(BagType::IntroduceVertex, Some(2), vec![0, 2], vec![(0, 2)]);
        tree.add_bag(BagType::Forget, Some(3), vec![0], vec![]);
        tree.add_bag(BagType::IntroduceVertex, Some(4), vec![0, 1], vec![(0, 1)]);
        tree.add_bag(BagType::IntroduceVertex, Some(5), vec![0], vec![]);
        tree.add_bag(BagType::Leaf, Some(6), vec![], vec![]);

        tree.add_bag(BagType::Forget, Some(1), vec![0], vec![]);
        tree.add_bag(BagType::IntroduceVertex, Some(8), vec![0, 5], vec![(0, 5)]);
        tree.add_bag(BagType::Forget, Some(9), vec![0], vec![]);
        tree.add_bag(BagType::IntroduceVertex, Some(10), vec![0, 4], vec![(0, 4)]);
        tree.add_bag(BagType::Forget, Some(11), vec![0], vec![]);
        tree.add_bag(BagType::IntroduceVertex, Some(12), vec![0, 3], vec![(0, 3)]);
        tree.add_bag(BagType::IntroduceVertex, Some(13), vec![0], vec![]);
        tree.add_bag(BagType::Leaf, Some(14), vec![], vec![]);

        let answer = SolverBuilder::new().build().solve(&mut tree).unwrap();
        assert_eq!(answer, 1);
    }

    #[test]
    fn discarding_consumed_tables_keeps_the_answer() {
        let edges = [(1, 2), (2, 3), (3, 4)];
        let mut tree = chain_tree(4, &edges);
        let answer = SolverBuilder::new()
            .discard_consumed_tables(true)
            .build()
            .solve(&mut tree)
            .unwrap();
        assert_eq!(answer, 2);
        // every non-root table was released
        let root = tree.root().unwrap();
        for bag in &tree.bags {
            if bag.id != root {
                assert!(bag.table.is_empty());
            }
        }
    }

    #[test]
    fn validation_can_be_skipped_for_trusted_input() {
        let mut tree = chain_tree(3, &[(1, 2), (2, 3)]);
        let answer = SolverBuilder::new()
            .validate(false)
            .build()
            .solve(&mut tree)
            .unwrap();
        assert_eq!(answer, 1);
    }

    #[test]
    fn matches_brute_force_on_random_graphs() {
        let mut rng = StdRng::seed_from_u64(1729);
        for _ in 0..60 {
            let n = rng.gen_range(1..=7);
            let mut edges = Vec::new();
            for u in 1..=n {
                for v in (u + 1)..=n {
                    if rng.gen_bool(0.35) {
                        edges.push((u, v));
                    }
                }
            }
            let expected = brute_force(n, &edges);
            let actual = solve_chain(n, &edges);
            assert_eq!(actual, expected, "n = {}, edges = {:?}", n, edges);
        }
    }
}
