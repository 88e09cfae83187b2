//! Row shapes: the named slots a joined row carries

use std::fmt;

use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(u32);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shape#{}", self.0)
    }
}

/// Interns slot lists so rows of the same combination share one shape.
/// Scoped to a single join context.
#[derive(Debug, Default)]
pub struct ShapeRegistry {
    shapes: Vec<Vec<String>>,
    by_slots: FxHashMap<Vec<String>, ShapeId>,
}

impl ShapeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern<S: AsRef<str>>(&mut self, slots: &[S]) -> ShapeId {
        let slots: Vec<String> = slots.iter().map(|s| s.as_ref().to_string()).collect();
        if let Some(id) = self.by_slots.get(&slots) {
            return *id;
        }
        let id = ShapeId(self.shapes.len() as u32);
        self.shapes.push(slots.clone());
        self.by_slots.insert(slots, id);
        id
    }

    pub fn slots(&self, shape: ShapeId) -> Option<&[String]> {
        self.shapes.get(shape.0 as usize).map(Vec::as_slice)
    }

    pub fn slot_index(&self, shape: ShapeId, slot: &str) -> Option<usize> {
        self.slots(shape)?.iter().position(|s| s == slot)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
