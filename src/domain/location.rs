//! Categorical encoding for the `location` column.
//!
//! Codes are assigned in order of first appearance while the dataset is parsed,
//! so they are dense (`0..n`) and deterministic for a fixed file. Once loading
//! finishes the table is only read.

use std::collections::HashMap;

use serde::Serialize;

/// Code used for locations that were never seen during training.
pub const FALLBACK_CODE: usize = 0;

/// How a requested location was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationMatch {
    /// Found in the training data.
    Known,
    /// Unseen location, priced with the fallback code.
    Fallback,
}

/// Ordered, injective mapping from location name to dense integer code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocationTable {
    names: Vec<String>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl LocationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the code for `name`, assigning the next free code on first sight.
    ///
    /// Names are trimmed; case is preserved.
    pub(crate) fn intern(&mut self, name: &str) -> usize {
        let name = name.trim();
        if let Some(&code) = self.index.get(name) {
            return code;
        }
        let code = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), code);
        code
    }

    pub fn code(&self, name: &str) -> Option<usize> {
        self.index.get(name.trim()).copied()
    }

    /// Like [`LocationTable::code`], but unknown names resolve to [`FALLBACK_CODE`]
    /// and are reported as [`LocationMatch::Fallback`].
    pub fn resolve(&self, name: &str) -> (usize, LocationMatch) {
        match self.code(name) {
            Some(code) => (code, LocationMatch::Known),
            None => (FALLBACK_CODE, LocationMatch::Fallback),
        }
    }

    pub fn name(&self, code: usize) -> Option<&str> {
        self.names.get(code).map(String::as_str)
    }

    /// Location names in code order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for LocationTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut table = LocationTable::new();
        for name in iter {
            table.intern(name.as_ref());
        }
        table
    }
}
