use crate::atom::{Atom, AtomInterner, Color};

// atoms are kept sorted by vertex id, so the derived Eq/Hash treat two
// colorings of the same vertex set as equal regardless of construction order
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Coloring {
    atoms: Vec<Atom>,
}

impl Coloring {
    pub fn new(mut atoms: Vec<Atom>, interner: &AtomInterner) -> Self {
        atoms.sort_unstable_by_key(|a| interner.vertex(*a));
        Self { atoms }
    }

    // atoms must already be sorted by vertex id
    pub(crate) fn from_sorted(atoms: Vec<Atom>) -> Self {
        Self { atoms }
    }

    pub fn empty() -> Self {
        Self { atoms: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn atoms(&self) -> &[Atom] {
        self.atoms.as_slice()
    }

    fn position(&self, vertex: usize, interner: &AtomInterner) -> Result<usize, usize> {
        self.atoms
            .binary_search_by_key(&vertex, |a| interner.vertex(*a))
    }

    pub fn color_of(&self, vertex: usize, interner: &AtomInterner) -> Option<Color> {
        self.position(vertex, interner)
            .ok()
            .map(|idx| interner.color(self.atoms[idx]))
    }

    pub fn contains(&self, atom: Atom, interner: &AtomInterner) -> bool {
        self.position(interner.vertex(atom), interner)
            .map(|idx| self.atoms[idx] == atom)
            .unwrap_or(false)
    }

    pub fn count_color(&self, color: Color, interner: &AtomInterner) -> usize {
        self.atoms
            .iter()
            .filter(|a| interner.color(**a) == color)
            .count()
    }

    pub fn without_vertex(&self, vertex: usize, interner: &AtomInterner) -> Self {
        let idx = self
            .position(vertex, interner)
            .expect("vertex not present in coloring");
        let mut atoms = Vec::with_capacity(self.atoms.len() - 1);
        atoms.extend_from_slice(&self.atoms[..idx]);
        atoms.extend_from_slice(&self.atoms[idx + 1..]);
        Self { atoms }
    }

    pub fn with_atom(&self, atom: Atom, interner: &AtomInterner) -> Self {
        let idx = match self.position(interner.vertex(atom), interner) {
            Ok(_) => panic!("vertex already present in coloring"),
            Err(idx) => idx,
        };
        let mut atoms = Vec::with_capacity(self.atoms.len() + 1);
        atoms.extend_from_slice(&self.atoms[..idx]);
        atoms.push(atom);
        atoms.extend_from_slice(&self.atoms[idx..]);
        Self { atoms }
    }

    // both atoms must name the same vertex, so the sort order is unaffected
    pub fn recolored(&self, from: Atom, to: Atom) -> Self {
        let atoms = self
            .atoms
            .iter()
            .map(|a| if *a == from { to } else { *a })
            .collect();
        Self { atoms }
    }
}
