use bitvec::prelude::*;
use std::fmt;
use std::fmt::{Debug, Formatter};
use std::ops::Index;

#[derive(Clone, Default)]
pub struct BitSet {
    cardinality: usize,
    bit_vec: BitVec,
}

impl Debug for BitSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let values: Vec<_> = (0..self.bit_vec.len())
            .filter(|i| self.bit_vec[*i])
            .map(|i| i.to_string())
            .collect();
        write!(
            f,
            "BitSet {{ cardinality: {}, bits: [{}] }}",
            self.cardinality,
            values.join(", ")
        )
    }
}

impl BitSet {
    #[inline]
    pub fn new(size: usize) -> Self {
        Self {
            cardinality: 0,
            bit_vec: bitvec![0; size],
        }
    }

    #[inline]
    pub fn set_bit(&mut self, idx: usize) -> bool {
        if *self.bit_vec.get(idx).unwrap() {
            true
        } else {
            self.bit_vec.set(idx, true);
            self.cardinality += 1;
            false
        }
    }

    #[inline]
    pub fn cardinality(&self) -> usize {
        self.cardinality
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bit_vec.len()
    }

    #[inline]
    pub fn full(&self) -> bool {
        self.cardinality == self.bit_vec.len()
    }

    #[inline]
    pub fn first_unset(&self) -> Option<usize> {
        (0..self.bit_vec.len()).find(|i| !self.bit_vec[*i])
    }
}

impl Index<usize> for BitSet {
    type Output = bool;

    fn index(&self, index: usize) -> &Self::Output {
        &self.bit_vec[index]
    }
}
