//! decode::sections
//!
//! Structural sections of an object tree.
//!
//! # Dispatch
//!
//! After its header, an object tree holds a count (at [`sections::COUNT`])
//! followed by that many sections. Nothing but the identifier in the first
//! element of a section says what it holds, and the same role uses
//! different identifiers in different entity kinds. Each kind therefore has
//! its own [`RoleTable`]. Unknown identifiers are skipped so that sections
//! added by newer platform versions do not break decoding.
//!
//! # Lists
//!
//! Role sections, requisite lists and recalculation lists share one shape:
//! a count at [`list::COUNT`] followed by the items.
//!
//! [`sections::COUNT`]: crate::decode::layout::sections::COUNT
//! [`list::COUNT`]: crate::decode::layout::list::COUNT

use super::identity::{decode_identity, object_id};
use super::layout::{list, requisite, sections, tabular_section};
use super::types::decode_type_list;
use super::DecodeError;
use crate::core::model::{EntityKind, Requisite, TabularSection};
use crate::core::types::ObjectId;
use crate::tree::Cursor;

/// What a structural section holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Requisites,
    TabularSections,
    Dimensions,
    Resources,
    AccountingFlags,
    ExtDimensionAccountingFlags,
    Recalculations,
    AddressingAttributes,
}

/// Section identifier to role, for one entity kind.
pub type RoleTable = &'static [(&'static str, Role)];

const EXCHANGE_PLAN: RoleTable = &[
    ("1a1b4fea-e093-470d-94ff-1d2f16cda2ab", Role::Requisites),
    ("52293f4b-f98c-43ea-a80f-41047ae7ab58", Role::TabularSections),
];

const CATALOG: RoleTable = &[
    ("cf4abea7-37b2-11d4-940f-008048da11f9", Role::Requisites),
    ("932159f9-95b2-4e76-a8dd-8849fe5c5ded", Role::TabularSections),
];

const DOCUMENT: RoleTable = &[
    ("45e46cbc-3e24-4165-8b7b-cc98a6f80211", Role::Requisites),
    ("21c53e09-8950-4b5e-a6a0-1054f1bbc274", Role::TabularSections),
];

const CHART_OF_CHARACTERISTIC_TYPES: RoleTable = &[
    ("31182525-9346-4595-81f8-6f91a72ebe06", Role::Requisites),
    ("54e36536-7863-42fd-bea3-c5edd3122fdc", Role::TabularSections),
];

const CHART_OF_ACCOUNTS: RoleTable = &[
    ("6e65cbf5-daa8-4d8d-bef8-59723f4e5777", Role::Requisites),
    ("4c7fec95-d1bd-4508-8a01-f1db090d9af8", Role::TabularSections),
    ("78bd1243-c4df-46c3-8138-e147465cb9a4", Role::AccountingFlags),
    ("c70ca527-5042-4cad-a315-dcb4007e32a3", Role::ExtDimensionAccountingFlags),
];

const ACCUMULATION_REGISTER: RoleTable = &[
    ("b64d9a42-1642-11d6-a3c7-0050bae0a776", Role::Requisites),
    ("b64d9a43-1642-11d6-a3c7-0050bae0a776", Role::Dimensions),
    ("b64d9a41-1642-11d6-a3c7-0050bae0a776", Role::Resources),
];

const ACCOUNTING_REGISTER: RoleTable = &[
    ("9d28ee33-9c7e-4a1b-8f13-50aa9b36607b", Role::Requisites),
    ("35b63b9d-0adf-4625-a047-10ae874c19a3", Role::Dimensions),
    ("63405499-7491-4ce3-ac72-43433cbe4112", Role::Resources),
];

const CALCULATION_REGISTER: RoleTable = &[
    ("1b304502-2216-440b-960f-60decd04bb5d", Role::Requisites),
    ("b12fc850-8210-43c8-ae05-89567e698fbb", Role::Dimensions),
    ("702b33ad-843e-41aa-8064-112cd38cc92c", Role::Resources),
    ("274bf899-db0e-4df6-8ab5-67bf6371ec0b", Role::Recalculations),
];

const BUSINESS_PROCESS: RoleTable = &[
    ("87c988de-ecbf-413b-87b0-b9516df05e28", Role::Requisites),
    ("a3fe6537-d787-40f7-8a06-419d2f0c1cfd", Role::TabularSections),
];

const TASK: RoleTable = &[
    ("8ddfb495-c5fc-46b9-bdc5-bcf58341bff0", Role::Requisites),
    ("ee865d4b-a458-48a0-b38f-5a26898feeb0", Role::TabularSections),
    ("e97c0570-251c-4566-b0f1-10686820f143", Role::AddressingAttributes),
];

/// Role table of an entity kind.
///
/// Constants, enums and document journals have no dispatched sections and
/// get an empty table.
pub fn role_table(kind: EntityKind) -> RoleTable {
    match kind {
        EntityKind::ExchangePlan => EXCHANGE_PLAN,
        EntityKind::Catalog => CATALOG,
        EntityKind::Document => DOCUMENT,
        EntityKind::ChartOfCharacteristicTypes => CHART_OF_CHARACTERISTIC_TYPES,
        EntityKind::ChartOfAccounts => CHART_OF_ACCOUNTS,
        EntityKind::AccumulationRegister => ACCUMULATION_REGISTER,
        EntityKind::AccountingRegister => ACCOUNTING_REGISTER,
        EntityKind::CalculationRegister => CALCULATION_REGISTER,
        EntityKind::BusinessProcess => BUSINESS_PROCESS,
        EntityKind::Task => TASK,
        EntityKind::Constant | EntityKind::Enum | EntityKind::DocumentJournal => &[],
    }
}

/// Look up the role of a section identifier.
pub fn lookup(table: RoleTable, id: &str) -> Option<Role> {
    table
        .iter()
        .find(|(section_id, _)| *section_id == id)
        .map(|(_, role)| *role)
}

/// Where a requisite's identity and types sit inside a list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequisitePath {
    /// Ordinary requisites: `0.1.1.1` and `0.1.1.2`.
    Long,
    /// Document journal graphs: `0.1` and `0.2`.
    Short,
}

impl RequisitePath {
    fn identity(self) -> &'static [usize] {
        match self {
            RequisitePath::Long => requisite::IDENTITY,
            RequisitePath::Short => requisite::SHORT_IDENTITY,
        }
    }

    fn types(self) -> &'static [usize] {
        match self {
            RequisitePath::Long => requisite::TYPES,
            RequisitePath::Short => requisite::SHORT_TYPES,
        }
    }
}

/// Everything the dispatcher found in one object tree.
///
/// Roles absent from the tree stay empty. Recalculations are only keys at
/// this point; resolving them needs further fetches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    pub requisites: Vec<Requisite>,
    pub tabular_sections: Vec<TabularSection>,
    pub dimensions: Vec<Requisite>,
    pub resources: Vec<Requisite>,
    pub accounting_flags: Vec<Requisite>,
    pub ext_dimension_accounting_flags: Vec<Requisite>,
    pub recalculation_keys: Vec<ObjectId>,
    pub addressing_attributes: Vec<Requisite>,
}

/// Classify and decode the trailing sections of an object tree.
pub fn dispatch_sections(root: &Cursor<'_>, table: RoleTable) -> Result<Sections, DecodeError> {
    let count = root.at(sections::COUNT)?.as_count()?;
    let mut found = Sections::default();

    for index in sections::FIRST_SECTION..sections::FIRST_SECTION + count {
        let section = root.at(&[index])?;
        let section_id = section.at(sections::ID)?.as_str()?;

        let Some(role) = lookup(table, section_id) else {
            tracing::trace!(section = section_id, path = %section.path(), "skipping unknown section");
            continue;
        };

        match role {
            Role::Requisites => found.requisites = decode_requisites(&section, RequisitePath::Long)?,
            Role::TabularSections => found.tabular_sections = decode_tabular_sections(&section)?,
            Role::Dimensions => found.dimensions = decode_requisites(&section, RequisitePath::Long)?,
            Role::Resources => found.resources = decode_requisites(&section, RequisitePath::Long)?,
            Role::AccountingFlags => {
                found.accounting_flags = decode_requisites(&section, RequisitePath::Long)?
            }
            Role::ExtDimensionAccountingFlags => {
                found.ext_dimension_accounting_flags =
                    decode_requisites(&section, RequisitePath::Long)?
            }
            Role::Recalculations => found.recalculation_keys = recalculation_keys(&section)?,
            Role::AddressingAttributes => {
                found.addressing_attributes = decode_requisites(&section, RequisitePath::Long)?
            }
        }
    }

    Ok(found)
}

/// Items of a counted list.
pub fn list_items<'a>(node: &Cursor<'a>) -> Result<Vec<Cursor<'a>>, DecodeError> {
    let count = node.at(list::COUNT)?.as_count()?;
    (list::FIRST_ITEM..list::FIRST_ITEM + count)
        .map(|i| node.at(&[i]).map_err(DecodeError::from))
        .collect()
}

/// Decode a requisite list.
pub fn decode_requisites(
    node: &Cursor<'_>,
    path: RequisitePath,
) -> Result<Vec<Requisite>, DecodeError> {
    list_items(node)?
        .iter()
        .map(|item| decode_requisite(item, path))
        .collect()
}

fn decode_requisite(item: &Cursor<'_>, path: RequisitePath) -> Result<Requisite, DecodeError> {
    let identity = decode_identity(&item.at(path.identity())?)?;
    let types_node = item.at(path.types())?;
    let types = decode_type_list(&types_node)?;
    if types.is_empty() {
        return Err(DecodeError::structure(
            types_node.path(),
            format!("requisite {} has no types", identity.name),
        ));
    }
    Ok(Requisite { identity, types })
}

/// Decode a tabular section list.
pub fn decode_tabular_sections(node: &Cursor<'_>) -> Result<Vec<TabularSection>, DecodeError> {
    list_items(node)?
        .iter()
        .map(|item| {
            let identity = decode_identity(&item.at(tabular_section::IDENTITY)?)?;
            let requisites = decode_requisites(
                &item.at(tabular_section::REQUISITES)?,
                RequisitePath::Long,
            )?;
            Ok(TabularSection {
                identity,
                requisites,
            })
        })
        .collect()
}

/// Secondary blob keys of a recalculation list.
pub fn recalculation_keys(node: &Cursor<'_>) -> Result<Vec<ObjectId>, DecodeError> {
    list_items(node)?.iter().map(object_id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::TypeDescriptor;
    use crate::decode::ErrorKind;
    use crate::tree::Node;
    use std::collections::HashSet;

    const CATALOG_REQUISITES: &str = "cf4abea7-37b2-11d4-940f-008048da11f9";
    const CATALOG_TABLES: &str = "932159f9-95b2-4e76-a8dd-8849fe5c5ded";

    fn record(id: &str, name: &str) -> String {
        format!(r#"{{0,{{0,0,{id}}},"{name}",{{0}}}}"#)
    }

    fn requisite(id: &str, name: &str, types: &str) -> String {
        let rec = record(id, name);
        format!("{{{{0,{{0,{{0,{rec},{types}}}}}}}}}")
    }

    fn short_requisite(id: &str, name: &str, types: &str) -> String {
        let rec = record(id, name);
        format!("{{{{0,{rec},{types}}}}}")
    }

    fn section(id: &str, items: &[String]) -> String {
        let mut parts = vec![id.to_string(), items.len().to_string()];
        parts.extend(items.iter().cloned());
        format!("{{{}}}", parts.join(","))
    }

    fn tabular(id: &str, name: &str, requisites: &[String]) -> String {
        let rec = record(id, name);
        let list = section("tabular-requisites", requisites);
        format!("{{{{0,{{0,0,0,0,0,{{0,{rec}}}}}}},0,{list}}}")
    }

    fn object(sections: &[String]) -> String {
        let mut parts = vec!["1".to_string(), "{header}".to_string(), sections.len().to_string()];
        parts.extend(sections.iter().cloned());
        format!("{{{}}}", parts.join(","))
    }

    #[test]
    fn fixtures_resolve_at_layout_paths() {
        let tree = Node::parse(&requisite("r", "Code", r#"{"Pattern",{"B"}}"#)).unwrap();
        assert!(tree.cursor().at(requisite::IDENTITY).is_ok());
        assert!(tree.cursor().at(requisite::TYPES).is_ok());

        let tree = Node::parse(&tabular("t", "Goods", &[])).unwrap();
        assert!(tree.cursor().at(tabular_section::IDENTITY).is_ok());
        assert!(tree.cursor().at(tabular_section::REQUISITES).is_ok());
    }

    #[test]
    fn role_tables_have_unique_identifiers() {
        for kind in EntityKind::ALL {
            let table = role_table(kind);
            let ids: HashSet<&str> = table.iter().map(|(id, _)| *id).collect();
            assert_eq!(ids.len(), table.len(), "{}", kind);
        }
    }

    #[test]
    fn role_tables_are_per_kind() {
        assert_eq!(lookup(role_table(EntityKind::Catalog), CATALOG_REQUISITES), Some(Role::Requisites));
        assert_eq!(lookup(role_table(EntityKind::Document), CATALOG_REQUISITES), None);
        assert_eq!(
            lookup(
                role_table(EntityKind::CalculationRegister),
                "274bf899-db0e-4df6-8ab5-67bf6371ec0b"
            ),
            Some(Role::Recalculations)
        );
        assert_eq!(
            lookup(
                role_table(EntityKind::Task),
                "e97c0570-251c-4566-b0f1-10686820f143"
            ),
            Some(Role::AddressingAttributes)
        );
        assert!(role_table(EntityKind::Enum).is_empty());
    }

    #[test]
    fn role_sets_match_kinds() {
        let roles = |kind| -> HashSet<Role> {
            role_table(kind).iter().map(|(_, role)| *role).collect()
        };
        assert_eq!(
            roles(EntityKind::ChartOfAccounts),
            HashSet::from([
                Role::Requisites,
                Role::TabularSections,
                Role::AccountingFlags,
                Role::ExtDimensionAccountingFlags
            ])
        );
        assert_eq!(
            roles(EntityKind::AccumulationRegister),
            HashSet::from([Role::Requisites, Role::Dimensions, Role::Resources])
        );
    }

    #[test]
    fn decodes_long_requisites() {
        let text = section(
            "s",
            &[
                requisite("r1", "Code", r#"{"Pattern",{"S",9,0}}"#),
                requisite("r2", "Price", r#"{0,1,{"N",15,2,0}}"#),
            ],
        );
        let tree = Node::parse(&text).unwrap();
        let reqs = decode_requisites(&tree.cursor(), RequisitePath::Long).unwrap();
        assert_eq!(reqs.len(), 2);
        assert_eq!(reqs[0].identity.id.as_str(), "r1");
        assert_eq!(reqs[1].identity.name, "Price");
        assert_eq!(
            reqs[0].types,
            vec![TypeDescriptor::String {
                max_length: 9,
                fixed_length: true
            }]
        );
    }

    #[test]
    fn decodes_short_requisites() {
        let text = section("s", &[short_requisite("g1", "Sum", r#"{"Pattern",{"B"}}"#)]);
        let tree = Node::parse(&text).unwrap();
        let reqs = decode_requisites(&tree.cursor(), RequisitePath::Short).unwrap();
        assert_eq!(reqs[0].identity.id.as_str(), "g1");
        assert_eq!(reqs[0].types, vec![TypeDescriptor::Boolean]);

        let err = decode_requisites(&tree.cursor(), RequisitePath::Long).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StructureMismatch);
    }

    #[test]
    fn requisite_without_types_fails() {
        let text = section("s", &[requisite("r1", "Code", r#"{"Pattern"}"#)]);
        let tree = Node::parse(&text).unwrap();
        let err = decode_requisites(&tree.cursor(), RequisitePath::Long).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StructureMismatch);
    }

    #[test]
    fn decodes_tabular_sections_recursively() {
        let text = section(
            "s",
            &[tabular(
                "t1",
                "Goods",
                &[requisite("tr1", "Qty", r#"{"Pattern",{"N",10,3,0}}"#)],
            )],
        );
        let tree = Node::parse(&text).unwrap();
        let tables = decode_tabular_sections(&tree.cursor()).unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].identity.id.as_str(), "t1");
        assert_eq!(tables[0].identity.name, "Goods");
        assert_eq!(tables[0].requisites.len(), 1);
        assert_eq!(tables[0].requisites[0].identity.id.as_str(), "tr1");
    }

    #[test]
    fn dispatch_fills_roles_and_skips_unknown() {
        let text = object(&[
            section("00000000-0000-0000-0000-000000000000", &[]),
            section(
                CATALOG_REQUISITES,
                &[requisite("r1", "Code", r#"{"Pattern",{"B"}}"#)],
            ),
            section(CATALOG_TABLES, &[tabular("t1", "Goods", &[])]),
        ]);
        let tree = Node::parse(&text).unwrap();
        let found = dispatch_sections(&tree.cursor(), role_table(EntityKind::Catalog)).unwrap();
        assert_eq!(found.requisites.len(), 1);
        assert_eq!(found.tabular_sections.len(), 1);
        assert!(found.dimensions.is_empty());
        assert!(found.recalculation_keys.is_empty());
    }

    #[test]
    fn dispatch_with_zero_sections() {
        let tree = Node::parse(&object(&[])).unwrap();
        let found = dispatch_sections(&tree.cursor(), role_table(EntityKind::Catalog)).unwrap();
        assert_eq!(found, Sections::default());
    }

    #[test]
    fn dispatch_fails_when_count_exceeds_sections() {
        let tree = Node::parse("{1,{header},2,{x,0}}").unwrap();
        let err = dispatch_sections(&tree.cursor(), role_table(EntityKind::Catalog)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StructureMismatch);
        assert!(err.to_string().contains("at 4"));
    }

    #[test]
    fn section_id_must_be_scalar() {
        let tree = Node::parse("{1,{header},1,{{nested},0}}").unwrap();
        let err = dispatch_sections(&tree.cursor(), role_table(EntityKind::Catalog)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert!(err.to_string().contains("at 3.0"));
    }

    #[test]
    fn recalculation_keys_are_scalars() {
        let tree = Node::parse("{id,2,rc-1,rc-2}").unwrap();
        let keys = recalculation_keys(&tree.cursor()).unwrap();
        let keys: Vec<&str> = keys.iter().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["rc-1", "rc-2"]);
    }

    #[test]
    fn recalculation_key_must_be_scalar() {
        let tree = Node::parse("{id,1,{rc-1}}").unwrap();
        let err = recalculation_keys(&tree.cursor()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }
}
