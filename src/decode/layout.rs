//! decode::layout
//!
//! Fixed positional paths into configuration trees.
//!
//! Every value the decoder reads sits at a fixed offset. These constants are
//! a compatibility contract with existing data: changing one breaks
//! decoding of every configuration written in that layout.

use crate::core::model::EntityKind;

/// A path of child indices.
pub type Path = &'static [usize];

/// Blob holding the key of the real configuration blob.
pub const ROOT_KEY: &str = "root";

/// Configuration blob key inside the root blob.
pub const ROOT_CONFIGURATION_KEY: Path = &[1];

/// Configuration-level properties, in the configuration tree.
pub mod configuration {
    use super::Path;

    pub const NAME: Path = &[3, 1, 1, 1, 1, 2];
    pub const SYNONYM: Path = &[3, 1, 1, 1, 1, 3];
    pub const COMMENT: Path = &[3, 1, 1, 1, 1, 4];
    pub const SUPPLIER: Path = &[3, 1, 1, 14];
    pub const VERSION: Path = &[3, 1, 1, 15];
    pub const LOCKING_MODE: Path = &[3, 1, 1, 17];
    pub const COMPATIBILITY_MODE: Path = &[3, 1, 1, 26];
}

/// Offsets inside an identity record.
pub mod identity {
    use super::Path;

    /// Own id of nested records (requisites, tabular sections, ...).
    pub const ID: Path = &[1, 2];
    pub const NAME: Path = &[2];
    pub const SYNONYM: Path = &[3];

    /// Inside the synonym record: presence flag, then the text.
    pub const SYNONYM_PRESENT: Path = &[0];
    pub const SYNONYM_TEXT: Path = &[2];
}

/// Counted lists: object id lists, requisite lists, recalculation lists.
pub mod list {
    use super::Path;

    pub const COUNT: Path = &[1];
    pub const FIRST_ITEM: usize = 2;
}

/// Trailing structural sections of an object tree.
pub mod sections {
    use super::Path;

    pub const COUNT: Path = &[2];
    pub const FIRST_SECTION: usize = 3;
    /// Leading identifier of a section.
    pub const ID: Path = &[0];
}

/// Items of a requisite list.
pub mod requisite {
    use super::Path;

    pub const IDENTITY: Path = &[0, 1, 1, 1];
    pub const TYPES: Path = &[0, 1, 1, 2];
    pub const SHORT_IDENTITY: Path = &[0, 1];
    pub const SHORT_TYPES: Path = &[0, 2];
}

/// Items of a tabular section list.
pub mod tabular_section {
    use super::Path;

    pub const IDENTITY: Path = &[0, 1, 5, 1];
    pub const REQUISITES: Path = &[2];
}

/// Field type lists.
pub mod type_list {
    use super::Path;

    pub const MARKER: Path = &[0];
    pub const COUNT: Path = &[1];
    pub const FIRST_COUNTED: usize = 2;
    pub const FIRST_PATTERN: usize = 1;
}

/// Recalculation object trees.
pub const RECALCULATION_IDENTITY: Path = &[1, 7, 1];

/// Type list of a constant, in its object tree.
pub const CONSTANT_TYPES: Path = &[1, 1, 1, 2];

/// Graph (column) list of a document journal, in its object tree.
pub const DOCUMENT_JOURNAL_GRAPHS: Path = &[4];

/// Where one entity kind lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindLayout {
    /// Object id list, in the configuration tree.
    pub object_list: Path,
    /// Identity record, in the object's own tree.
    pub identity: Path,
}

/// Layout of one entity kind.
pub const fn kind_layout(kind: EntityKind) -> KindLayout {
    match kind {
        EntityKind::ExchangePlan => at(&[3, 1, 19], &[1, 12]),
        EntityKind::Constant => at(&[4, 1, 1, 3], &[1, 1, 1, 1]),
        EntityKind::Catalog => at(&[4, 1, 1, 16], &[1, 9, 1]),
        EntityKind::Document => at(&[4, 1, 1, 4], &[1, 9, 1]),
        EntityKind::DocumentJournal => at(&[4, 1, 1, 10], &[1, 3, 1]),
        EntityKind::Enum => at(&[4, 1, 1, 17], &[1, 5, 1]),
        EntityKind::ChartOfCharacteristicTypes => at(&[4, 1, 1, 12], &[1, 13, 1]),
        EntityKind::ChartOfAccounts => at(&[5, 1, 3], &[1, 15, 1]),
        EntityKind::AccumulationRegister => at(&[4, 1, 1, 13], &[1, 13, 1]),
        EntityKind::AccountingRegister => at(&[5, 1, 4], &[1, 15, 1]),
        EntityKind::CalculationRegister => at(&[6, 1, 4], &[1, 15, 1]),
        EntityKind::BusinessProcess => at(&[7, 1, 4], &[1, 1]),
        EntityKind::Task => at(&[7, 1, 3], &[1, 1]),
    }
}

const fn at(object_list: Path, identity: Path) -> KindLayout {
    KindLayout {
        object_list,
        identity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn object_lists_do_not_collide() {
        let lists: HashSet<Path> = EntityKind::ALL
            .iter()
            .map(|k| kind_layout(*k).object_list)
            .collect();
        assert_eq!(lists.len(), EntityKind::ALL.len());
    }

    #[test]
    fn shared_identity_offsets() {
        assert_eq!(
            kind_layout(EntityKind::Catalog).identity,
            kind_layout(EntityKind::Document).identity
        );
        assert_eq!(
            kind_layout(EntityKind::BusinessProcess).identity,
            kind_layout(EntityKind::Task).identity
        );
    }
}
