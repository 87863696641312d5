use crate::atom::{AtomInterner, Color};
use crate::bag::{Bag, INFEASIBLE};
use crate::bag_tree::sole_extra_vertex;

// the introduced vertex has no edges yet, so a white entry stays infeasible
// until an edge rewrite dominates it
pub fn introduce_vertex(bag: &mut Bag, child: &Bag, interner: &AtomInterner) {
    let v = sole_extra_vertex(&bag.vertices, &child.vertices)
        .expect("introduce bag must add exactly one vertex");
    let table = &mut bag.table;
    for (coloring, value) in table.iter_mut() {
        match coloring.color_of(v, interner).unwrap() {
            Color::White => *value = INFEASIBLE,
            color => {
                let child_value = child.table[&coloring.without_vertex(v, interner)];
                *value = if color == Color::Black && child_value != INFEASIBLE {
                    child_value + 1
                } else {
                    child_value
                };
            }
        }
    }
}

// the forgotten vertex is committed as either in the set or dominated; if it
// never gained domination its white entry still holds the sentinel
pub fn forget(bag: &mut Bag, child: &Bag, interner: &mut AtomInterner) {
    let w = sole_extra_vertex(&child.vertices, &bag.vertices)
        .expect("forget bag must drop exactly one vertex");
    let in_set = interner.intern(w, Color::Black);
    let dominated = interner.intern(w, Color::White);
    for (coloring, value) in bag.table.iter_mut() {
        let black_value = child.table[&coloring.with_atom(in_set, interner)];
        let white_value = child.table[&coloring.with_atom(dominated, interner)];
        *value = black_value.min(white_value);
    }
}

// black vertices are counted by both children and credited back once
pub fn join(bag: &mut Bag, child1: &Bag, child2: &Bag, interner: &AtomInterner) {
    for (f, f1, f2) in &bag.consistent_triples {
        let v1 = child1.table[f1];
        let v2 = child2.table[f2];
        let candidate = if v1 == INFEASIBLE || v2 == INFEASIBLE {
            INFEASIBLE
        } else {
            v1 + v2 - f.count_color(Color::Black, interner)
        };
        let entry = bag.table.get_mut(f).unwrap();
        if candidate < *entry {
            *entry = candidate;
        }
    }
}

// An entry whose white endpoint is dominated through this edge inherits the
// value of the entry with that endpoint grey. Grey rows are never targets of
// the same edge, so collecting all updates before writing them observes
// exactly the pre-rewrite table.
pub fn introduce_edge(bag: &mut Bag, edge: (usize, usize), interner: &mut AtomInterner) {
    let (u, v) = edge;
    let u_black = interner.intern(u, Color::Black);
    let u_white = interner.intern(u, Color::White);
    let u_grey = interner.intern(u, Color::Grey);
    let v_black = interner.intern(v, Color::Black);
    let v_white = interner.intern(v, Color::White);
    let v_grey = interner.intern(v, Color::Grey);

    let mut updates = Vec::new();
    for coloring in bag.table.keys() {
        if coloring.contains(u_black, interner) && coloring.contains(v_white, interner) {
            let dominated = coloring.recolored(v_white, v_grey);
            updates.push((coloring.clone(), bag.table[&dominated]));
        } else if coloring.contains(u_white, interner) && coloring.contains(v_black, interner) {
            let dominated = coloring.recolored(u_white, u_grey);
            updates.push((coloring.clone(), bag.table[&dominated]));
        }
    }
    for (coloring, value) in updates {
        bag.table.insert(coloring, value);
    }
}
