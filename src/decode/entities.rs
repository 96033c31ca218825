//! decode::entities
//!
//! Per-kind object decoders.
//!
//! Each kind reads its identity at the offset given by its [`KindLayout`]
//! and then, depending on the kind, either dispatches the trailing
//! sections through its role table or reads a fixed sub-structure.
//! Decoding an object tree is synchronous; only recalculations of
//! calculation registers need further fetches, so those come back as
//! keys in [`Pending`] and are attached once resolved.
//!
//! [`KindLayout`]: crate::decode::layout::KindLayout

use super::identity::decode_identity_with_id;
use super::layout::{self, kind_layout};
use super::sections::{decode_requisites, dispatch_sections, role_table, RequisitePath, Sections};
use super::types::decode_type_list;
use super::DecodeError;
use crate::core::model::{
    AccountingRegister, AccumulationRegister, BusinessProcess, CalculationRegister, Catalog,
    ChartOfAccounts, ChartOfCharacteristicTypes, Constant, Document, DocumentJournal, Enumeration,
    ExchangePlan, Identity, MetadataObject, Recalculation, Task,
};
use crate::core::types::ObjectId;
use crate::tree::Cursor;

/// A decoded object still waiting for secondary blobs.
#[derive(Debug, Clone, PartialEq)]
pub struct Pending<T> {
    pub object: T,
    pub recalculation_keys: Vec<ObjectId>,
}

impl<T> Pending<T> {
    fn ready(object: T) -> Self {
        Self {
            object,
            recalculation_keys: Vec::new(),
        }
    }
}

/// Decoding of one entity kind from its object tree.
pub trait DecodeEntity: MetadataObject + Sized + Send {
    /// Decode the object tree of the object listed as `id`.
    fn decode(tree: &Cursor<'_>, id: ObjectId) -> Result<Pending<Self>, DecodeError>;

    /// Attach resolved recalculations. Only calculation registers have any.
    fn attach_recalculations(&mut self, _recalculations: Vec<Recalculation>) {}
}

fn identity_of<T: MetadataObject>(tree: &Cursor<'_>, id: ObjectId) -> Result<Identity, DecodeError> {
    decode_identity_with_id(&tree.at(kind_layout(T::KIND).identity)?, id)
}

fn sections_of<T: MetadataObject>(tree: &Cursor<'_>) -> Result<Sections, DecodeError> {
    dispatch_sections(tree, role_table(T::KIND))
}

impl DecodeEntity for ExchangePlan {
    fn decode(tree: &Cursor<'_>, id: ObjectId) -> Result<Pending<Self>, DecodeError> {
        let identity = identity_of::<Self>(tree, id)?;
        let s = sections_of::<Self>(tree)?;
        Ok(Pending::ready(ExchangePlan {
            identity,
            requisites: s.requisites,
            tabular_sections: s.tabular_sections,
        }))
    }
}

impl DecodeEntity for Constant {
    fn decode(tree: &Cursor<'_>, id: ObjectId) -> Result<Pending<Self>, DecodeError> {
        let identity = identity_of::<Self>(tree, id)?;
        let types = decode_type_list(&tree.at(layout::CONSTANT_TYPES)?)?;
        Ok(Pending::ready(Constant { identity, types }))
    }
}

impl DecodeEntity for Catalog {
    fn decode(tree: &Cursor<'_>, id: ObjectId) -> Result<Pending<Self>, DecodeError> {
        let identity = identity_of::<Self>(tree, id)?;
        let s = sections_of::<Self>(tree)?;
        Ok(Pending::ready(Catalog {
            identity,
            requisites: s.requisites,
            tabular_sections: s.tabular_sections,
        }))
    }
}

impl DecodeEntity for Document {
    fn decode(tree: &Cursor<'_>, id: ObjectId) -> Result<Pending<Self>, DecodeError> {
        let identity = identity_of::<Self>(tree, id)?;
        let s = sections_of::<Self>(tree)?;
        Ok(Pending::ready(Document {
            identity,
            requisites: s.requisites,
            tabular_sections: s.tabular_sections,
        }))
    }
}

impl DecodeEntity for DocumentJournal {
    fn decode(tree: &Cursor<'_>, id: ObjectId) -> Result<Pending<Self>, DecodeError> {
        let identity = identity_of::<Self>(tree, id)?;
        let graphs = decode_requisites(
            &tree.at(layout::DOCUMENT_JOURNAL_GRAPHS)?,
            RequisitePath::Short,
        )?;
        Ok(Pending::ready(DocumentJournal { identity, graphs }))
    }
}

impl DecodeEntity for Enumeration {
    fn decode(tree: &Cursor<'_>, id: ObjectId) -> Result<Pending<Self>, DecodeError> {
        let identity = identity_of::<Self>(tree, id)?;
        Ok(Pending::ready(Enumeration { identity }))
    }
}

impl DecodeEntity for ChartOfCharacteristicTypes {
    fn decode(tree: &Cursor<'_>, id: ObjectId) -> Result<Pending<Self>, DecodeError> {
        let identity = identity_of::<Self>(tree, id)?;
        let s = sections_of::<Self>(tree)?;
        Ok(Pending::ready(ChartOfCharacteristicTypes {
            identity,
            requisites: s.requisites,
            tabular_sections: s.tabular_sections,
        }))
    }
}

impl DecodeEntity for ChartOfAccounts {
    fn decode(tree: &Cursor<'_>, id: ObjectId) -> Result<Pending<Self>, DecodeError> {
        let identity = identity_of::<Self>(tree, id)?;
        let s = sections_of::<Self>(tree)?;
        Ok(Pending::ready(ChartOfAccounts {
            identity,
            requisites: s.requisites,
            tabular_sections: s.tabular_sections,
            accounting_flags: s.accounting_flags,
            ext_dimension_accounting_flags: s.ext_dimension_accounting_flags,
        }))
    }
}

impl DecodeEntity for AccumulationRegister {
    fn decode(tree: &Cursor<'_>, id: ObjectId) -> Result<Pending<Self>, DecodeError> {
        let identity = identity_of::<Self>(tree, id)?;
        let s = sections_of::<Self>(tree)?;
        Ok(Pending::ready(AccumulationRegister {
            identity,
            requisites: s.requisites,
            dimensions: s.dimensions,
            resources: s.resources,
        }))
    }
}

impl DecodeEntity for AccountingRegister {
    fn decode(tree: &Cursor<'_>, id: ObjectId) -> Result<Pending<Self>, DecodeError> {
        let identity = identity_of::<Self>(tree, id)?;
        let s = sections_of::<Self>(tree)?;
        Ok(Pending::ready(AccountingRegister {
            identity,
            requisites: s.requisites,
            dimensions: s.dimensions,
            resources: s.resources,
        }))
    }
}

impl DecodeEntity for CalculationRegister {
    fn decode(tree: &Cursor<'_>, id: ObjectId) -> Result<Pending<Self>, DecodeError> {
        let identity = identity_of::<Self>(tree, id)?;
        let s = sections_of::<Self>(tree)?;
        Ok(Pending {
            object: CalculationRegister {
                identity,
                requisites: s.requisites,
                dimensions: s.dimensions,
                resources: s.resources,
                recalculations: Vec::new(),
            },
            recalculation_keys: s.recalculation_keys,
        })
    }

    fn attach_recalculations(&mut self, recalculations: Vec<Recalculation>) {
        self.recalculations = recalculations;
    }
}

impl DecodeEntity for BusinessProcess {
    fn decode(tree: &Cursor<'_>, id: ObjectId) -> Result<Pending<Self>, DecodeError> {
        let identity = identity_of::<Self>(tree, id)?;
        let s = sections_of::<Self>(tree)?;
        Ok(Pending::ready(BusinessProcess {
            identity,
            requisites: s.requisites,
            tabular_sections: s.tabular_sections,
        }))
    }
}

impl DecodeEntity for Task {
    fn decode(tree: &Cursor<'_>, id: ObjectId) -> Result<Pending<Self>, DecodeError> {
        let identity = identity_of::<Self>(tree, id)?;
        let s = sections_of::<Self>(tree)?;
        Ok(Pending::ready(Task {
            identity,
            requisites: s.requisites,
            tabular_sections: s.tabular_sections,
            addressing_attributes: s.addressing_attributes,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::TypeDescriptor;
    use crate::decode::ErrorKind;
    use crate::tree::Node;

    fn id(s: &str) -> ObjectId {
        ObjectId::new(s).unwrap()
    }

    #[test]
    fn enum_reads_identity_only() {
        let tree = Node::parse(r#"{0,{0,0,0,0,0,{0,{0,{},"Colors",{1,"en","Palette"}}}}}"#).unwrap();
        let pending = Enumeration::decode(&tree.cursor(), id("e-1")).unwrap();
        assert_eq!(pending.object.identity.id.as_str(), "e-1");
        assert_eq!(pending.object.identity.name, "Colors");
        assert_eq!(pending.object.identity.synonym.as_deref(), Some("Palette"));
        assert!(pending.recalculation_keys.is_empty());
    }

    #[test]
    fn constant_reads_type_list() {
        let tree =
            Node::parse(r#"{0,{0,{0,{0,{0,{},"Rate",{0}},{"Pattern",{"N",10,2,1}}}}}}"#).unwrap();
        let pending = Constant::decode(&tree.cursor(), id("c-1")).unwrap();
        assert_eq!(pending.object.identity.name, "Rate");
        assert_eq!(
            pending.object.types,
            vec![TypeDescriptor::Numeric {
                length: 10,
                precision: 2,
                non_negative: false
            }]
        );
    }

    #[test]
    fn document_journal_reads_graphs_by_short_path() {
        let tree = Node::parse(concat!(
            r#"{0,{0,0,0,{0,{0,{},"Journal",{0}}}},0,0,"#,
            r#"{graphs,1,{{0,{0,{0,0,g-1},"Amount",{0}},{"Pattern",{"N",15,2,0}}}}}}"#
        ))
        .unwrap();
        let pending = DocumentJournal::decode(&tree.cursor(), id("j-1")).unwrap();
        assert_eq!(pending.object.identity.name, "Journal");
        assert_eq!(pending.object.graphs.len(), 1);
        assert_eq!(pending.object.graphs[0].identity.id.as_str(), "g-1");
        assert_eq!(pending.object.graphs[0].identity.name, "Amount");
    }

    #[test]
    fn calculation_register_returns_recalculation_keys() {
        let tree = Node::parse(concat!(
            r#"{0,{0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,{0,{0,{},"Payroll",{0}}}},1,"#,
            r#"{274bf899-db0e-4df6-8ab5-67bf6371ec0b,2,rc-1,rc-2}}"#
        ))
        .unwrap();
        let pending = CalculationRegister::decode(&tree.cursor(), id("cr-1")).unwrap();
        assert_eq!(pending.object.identity.name, "Payroll");
        assert!(pending.object.recalculations.is_empty());
        let keys: Vec<&str> = pending.recalculation_keys.iter().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["rc-1", "rc-2"]);

        let mut register = pending.object;
        register.attach_recalculations(vec![Recalculation {
            identity: Identity::new(id("rc-1"), "Bonus", None),
        }]);
        assert_eq!(register.recalculations.len(), 1);
    }

    #[test]
    fn catalog_without_identity_fails_with_path() {
        let tree = Node::parse("{0,{0},0}").unwrap();
        let err = Catalog::decode(&tree.cursor(), id("cat-1")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StructureMismatch);
        assert!(err.to_string().contains("1.9"));
    }
}
