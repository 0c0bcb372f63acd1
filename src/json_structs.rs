/*

    Declare data structs needed to parse JSON.

    - SingleOrVec: a field given either as one object or
      as an array of objects

    @date: 13 Oct, 2025
    @author: Bartu
*/

use serde::{Deserialize};

// To handle JSON file having a single <object>
// or an array of <object>s
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum SingleOrVec<T> {
    Empty,
    Single(T),
    Multiple(Vec<T>),
}

impl<T: Clone> SingleOrVec<T>  {
    pub fn all(&self) -> Vec<T> {
        match &self {
            SingleOrVec::Empty => vec![],
            SingleOrVec::Single(t) => vec![t.clone()],
            SingleOrVec::Multiple(vec) => vec.clone(),
        }
    }
}

impl<T> SingleOrVec<T> {
    pub fn len(&self) -> usize {
        match self {
            SingleOrVec::Empty => 0,
            SingleOrVec::Single(_) => 1,
            SingleOrVec::Multiple(vec) => vec.len(),
        }
    }
}

impl<T> Default for SingleOrVec<T> {
    fn default() -> Self {
        SingleOrVec::Empty
    }
}
