use fnv::FnvHashMap;
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    // not in the partial set, still has to be dominated
    White,
    // in the partial set
    Black,
    // not in the partial set, domination not (or no longer) required
    Grey,
}

pub const COLORS: [Color; 3] = [Color::White, Color::Black, Color::Grey];

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Color::White => write!(f, "w"),
            Color::Black => write!(f, "b"),
            Color::Grey => write!(f, "g"),
        }
    }
}

// equal (vertex, color) pairs intern to the same id, so comparing atoms is
// comparing ids
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom(u32);

#[derive(Default)]
pub struct AtomInterner {
    ids: FnvHashMap<(usize, Color), Atom>,
    pairs: Vec<(usize, Color)>,
}

impl AtomInterner {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn intern(&mut self, vertex: usize, color: Color) -> Atom {
        let pairs = &mut self.pairs;
        *self.ids.entry((vertex, color)).or_insert_with(|| {
            let atom = Atom(pairs.len() as u32);
            pairs.push((vertex, color));
            atom
        })
    }

    pub fn vertex(&self, atom: Atom) -> usize {
        self.pairs[atom.0 as usize].0
    }

    pub fn color(&self, atom: Atom) -> Color {
        self.pairs[atom.0 as usize].1
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }
}
