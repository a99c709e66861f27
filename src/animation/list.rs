//! Value lists (`box-shadow: a, b`) and their lazy interpolated view.
//!
//! Blending two lists does not allocate a new list. It returns an
//! [`InterpolatedList`] that blends element `i` when it is read. Missing
//! elements on the shorter side are treated as the element type's neutral
//! value (`Default`).

use std::sync::Arc;

use super::interpolate::Blend;

/// A list of style values, either concrete or a lazy blend of two lists.
#[derive(Debug, Clone)]
pub enum ValueList<T> {
    Values(Arc<[T]>),
    Interpolated(Arc<InterpolatedList<T>>),
}

/// Two lists and a blend factor, evaluated per element on access.
#[derive(Debug, Clone)]
pub struct InterpolatedList<T> {
    pub from: ValueList<T>,
    pub to: ValueList<T>,
    pub t: f32,
}

impl<T> ValueList<T> {
    /// A concrete list.
    pub fn new(values: Vec<T>) -> Self {
        Self::Values(values.into())
    }

    /// A lazy blend between two lists.
    pub fn interpolated(from: ValueList<T>, to: ValueList<T>, t: f32) -> Self {
        Self::Interpolated(Arc::new(InterpolatedList { from, to, t }))
    }

    /// Number of elements; an interpolated view is as long as its longer side.
    pub fn len(&self) -> usize {
        match self {
            Self::Values(values) => values.len(),
            Self::Interpolated(list) => list.from.len().max(list.to.len()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether reading elements triggers blending.
    pub fn is_lazy(&self) -> bool {
        matches!(self, Self::Interpolated(_))
    }
}

impl<T: Blend + Clone + Default> ValueList<T> {
    /// Element `index`, blending on demand for interpolated lists.
    pub fn get(&self, index: usize) -> Option<T> {
        match self {
            Self::Values(values) => values.get(index).cloned(),
            Self::Interpolated(list) => {
                if index >= self.len() {
                    return None;
                }
                let from = list.from.get(index).unwrap_or_default();
                let to = list.to.get(index).unwrap_or_default();
                Some(from.blend(&to, list.t))
            }
        }
    }

    /// Materialize every element.
    pub fn to_vec(&self) -> Vec<T> {
        (0..self.len()).filter_map(|i| self.get(i)).collect()
    }
}

impl<T: Blend + Clone + Default + PartialEq> PartialEq for ValueList<T> {
    fn eq(&self, other: &Self) -> bool {
        if let (Self::Values(a), Self::Values(b)) = (self, other) {
            return a == b;
        }
        self.len() == other.len() && (0..self.len()).all(|i| self.get(i) == other.get(i))
    }
}
