use crate::atom::{Atom, AtomInterner, Color, COLORS};
use crate::coloring::Coloring;
use fxhash::FxHashMap;
use std::fmt;
use std::fmt::{Display, Formatter};

// no partial dominating assignment exists; absorbing in all value arithmetic
pub const INFEASIBLE: usize = usize::MAX;

pub type Table = FxHashMap<Coloring, usize>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BagType {
    Leaf,
    IntroduceVertex,
    Forget,
    Join,
}

impl Default for BagType {
    fn default() -> Self {
        BagType::Leaf
    }
}

impl Display for BagType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            BagType::Leaf => write!(f, "l"),
            BagType::IntroduceVertex => write!(f, "i"),
            BagType::Forget => write!(f, "f"),
            BagType::Join => write!(f, "j"),
        }
    }
}

// per-vertex combinations (f, f1, f2) under which two child tables of a join
// bag combine: a black vertex is black on both sides, a white vertex still
// requires domination on exactly one side, a grey vertex is grey on both
const CONSISTENT_COLORS: [(Color, Color, Color); 4] = [
    (Color::Black, Color::Black, Color::Black),
    (Color::White, Color::White, Color::Grey),
    (Color::White, Color::Grey, Color::White),
    (Color::Grey, Color::Grey, Color::Grey),
];

#[derive(Debug, Default)]
pub struct Bag {
    pub id: usize,
    pub bag_type: BagType,
    pub parent: Option<usize>,
    pub vertices: Vec<usize>,
    pub introduce_edges: Vec<(usize, usize)>,
    pub child1: Option<usize>,
    pub child2: Option<usize>,
    pub table: Table,
    pub consistent_triples: Vec<(Coloring, Coloring, Coloring)>,
}

impl Bag {
    pub fn new(
        id: usize,
        bag_type: BagType,
        parent: Option<usize>,
        mut vertices: Vec<usize>,
        introduce_edges: Vec<(usize, usize)>,
        interner: &mut AtomInterner,
    ) -> Self {
        vertices.sort_unstable();
        vertices.dedup();

        let mut table =
            Table::with_capacity_and_hasher(3usize.pow(vertices.len() as u32), Default::default());
        let mut current = Vec::with_capacity(vertices.len());
        fill_colorings(&vertices, interner, &mut current, &mut table);
        if bag_type == BagType::Leaf {
            // a leaf is an already solved empty sub-problem
            table.insert(Coloring::empty(), 0);
        }

        let mut consistent_triples = Vec::new();
        if bag_type == BagType::Join {
            consistent_triples.reserve(4usize.pow(vertices.len() as u32));
            let mut current = (
                Vec::with_capacity(vertices.len()),
                Vec::with_capacity(vertices.len()),
                Vec::with_capacity(vertices.len()),
            );
            fill_triples(&vertices, interner, &mut current, &mut consistent_triples);
        }

        Self {
            id,
            bag_type,
            parent,
            vertices,
            introduce_edges,
            child1: None,
            child2: None,
            table,
            consistent_triples,
        }
    }
}

impl Display for Bag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bag {}", self.bag_type, self.id)?;
        match self.parent {
            None => write!(f, " (root)")?,
            Some(parent) => write!(f, ", parent {}", parent)?,
        }
        let vertices: Vec<_> = self.vertices.iter().map(|v| v.to_string()).collect();
        write!(f, ", vertices {{{}}}", vertices.join(","))?;
        if !self.introduce_edges.is_empty() {
            let edges: Vec<_> = self
                .introduce_edges
                .iter()
                .map(|(u, v)| format!("({},{})", u, v))
                .collect();
            write!(f, ", introduces [{}]", edges.join(","))?;
        }
        Ok(())
    }
}

fn fill_colorings(
    vertices: &[usize],
    interner: &mut AtomInterner,
    current: &mut Vec<Atom>,
    table: &mut Table,
) {
    if current.len() == vertices.len() {
        // vertices are sorted, so the built atom list is already canonical
        table.insert(Coloring::from_sorted(current.clone()), INFEASIBLE);
        return;
    }
    let vertex = vertices[current.len()];
    for &color in COLORS.iter() {
        current.push(interner.intern(vertex, color));
        fill_colorings(vertices, interner, current, table);
        current.pop();
    }
}

fn fill_triples(
    vertices: &[usize],
    interner: &mut AtomInterner,
    current: &mut (Vec<Atom>, Vec<Atom>, Vec<Atom>),
    triples: &mut Vec<(Coloring, Coloring, Coloring)>,
) {
    if current.0.len() == vertices.len() {
        triples.push((
            Coloring::from_sorted(current.0.clone()),
            Coloring::from_sorted(current.1.clone()),
            Coloring::from_sorted(current.2.clone()),
        ));
        return;
    }
    let vertex = vertices[current.0.len()];
    for &(c, c1, c2) in CONSISTENT_COLORS.iter() {
        current.0.push(interner.intern(vertex, c));
        current.1.push(interner.intern(vertex, c1));
        current.2.push(interner.intern(vertex, c2));
        fill_triples(vertices, interner, current, triples);
        current.0.pop();
        current.1.pop();
        current.2.pop();
    }
}
