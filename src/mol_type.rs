//! Molecule types and the name lookup used by `Type` directives and
//! embedded sequence blocks.

use serde_derive::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Classification of the sequence a feature belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MolType {
    /// No (or an unknown) type was declared
    #[default]
    Undefined,
    Dna,
    Rna,
    Protein,
}

impl MolType {
    /// The canonical name, as used in `##Type` and `##DNA` / `##end-DNA`
    /// lines.
    pub fn name(&self) -> &'static str {
        match *self {
            MolType::Undefined => "Undefined",
            MolType::Dna => "DNA",
            MolType::Rna => "RNA",
            MolType::Protein => "Protein",
        }
    }
}

impl MolType {
    /// Looks up one of the canonical names `DNA`, `RNA` or `Protein`.
    #[inline]
    pub(crate) fn from_canonical_name(name: &[u8]) -> Option<MolType> {
        match name {
            b"DNA" => Some(MolType::Dna),
            b"RNA" => Some(MolType::Rna),
            b"Protein" => Some(MolType::Protein),
            _ => None,
        }
    }
}

impl fmt::Display for MolType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lookup table from type names to [`MolType`].
///
/// The default table knows `DNA`, `RNA` and `Protein`. More names
/// can be registered with [`insert`](MolTypeTable::insert). Unknown names
/// map to `MolType::Undefined`.
///
/// ```
/// use gff_io::{MolType, MolTypeTable};
///
/// let mut table = MolTypeTable::default();
/// assert_eq!(table.get(b"RNA"), MolType::Rna);
/// assert_eq!(table.get(b"mRNA"), MolType::Undefined);
/// table.insert("mRNA", MolType::Rna);
/// assert_eq!(table.get(b"mRNA"), MolType::Rna);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MolTypeTable {
    names: HashMap<Vec<u8>, MolType>,
}

impl MolTypeTable {
    /// Creates a table without any names.
    pub fn empty() -> Self {
        MolTypeTable {
            names: HashMap::new(),
        }
    }

    /// Registers `name`, replacing a previous mapping.
    pub fn insert<N: Into<Vec<u8>>>(&mut self, name: N, mol_type: MolType) -> &mut Self {
        self.names.insert(name.into(), mol_type);
        self
    }

    #[inline]
    pub fn get(&self, name: &[u8]) -> MolType {
        self.names.get(name).copied().unwrap_or_default()
    }
}

impl Default for MolTypeTable {
    fn default() -> Self {
        let mut table = MolTypeTable::empty();
        for t in [MolType::Dna, MolType::Rna, MolType::Protein] {
            table.insert(t.name(), t);
        }
        table
    }
}
