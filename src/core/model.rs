//! core::model
//!
//! Decoded configuration metadata.
//!
//! # Shape
//!
//! A [`ConfigurationModel`] owns one ordered list per entity kind. Every
//! entity embeds an [`Identity`] and adds the collections its kind carries
//! (requisites, tabular sections, register dimensions, ...). Field types
//! are [`TypeDescriptor`] unions. References between entities stay opaque
//! identifiers and are never resolved.
//!
//! The model is built once per decode and never mutated afterwards.
//!
//! # Example
//!
//! ```
//! use cfgmeta::core::model::{EntityKind, TypeDescriptor};
//!
//! assert_eq!(EntityKind::ALL.len(), 13);
//! assert_eq!(EntityKind::ChartOfAccounts.to_string(), "ChartOfAccounts");
//!
//! let ty = TypeDescriptor::String { max_length: 25, fixed_length: false };
//! assert_eq!(ty.to_string(), "String(25)");
//! ```

use serde::Serialize;

use super::types::ObjectId;

/// The 13 metadata entity kinds, in decode order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntityKind {
    ExchangePlan,
    Constant,
    Catalog,
    Document,
    DocumentJournal,
    Enum,
    ChartOfCharacteristicTypes,
    ChartOfAccounts,
    AccumulationRegister,
    AccountingRegister,
    CalculationRegister,
    BusinessProcess,
    Task,
}

impl EntityKind {
    /// All kinds in the order a configuration is decoded.
    pub const ALL: [EntityKind; 13] = [
        EntityKind::ExchangePlan,
        EntityKind::Constant,
        EntityKind::Catalog,
        EntityKind::Document,
        EntityKind::DocumentJournal,
        EntityKind::Enum,
        EntityKind::ChartOfCharacteristicTypes,
        EntityKind::ChartOfAccounts,
        EntityKind::AccumulationRegister,
        EntityKind::AccountingRegister,
        EntityKind::CalculationRegister,
        EntityKind::BusinessProcess,
        EntityKind::Task,
    ];

    /// Stable kind name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::ExchangePlan => "ExchangePlan",
            EntityKind::Constant => "Constant",
            EntityKind::Catalog => "Catalog",
            EntityKind::Document => "Document",
            EntityKind::DocumentJournal => "DocumentJournal",
            EntityKind::Enum => "Enum",
            EntityKind::ChartOfCharacteristicTypes => "ChartOfCharacteristicTypes",
            EntityKind::ChartOfAccounts => "ChartOfAccounts",
            EntityKind::AccumulationRegister => "AccumulationRegister",
            EntityKind::AccountingRegister => "AccountingRegister",
            EntityKind::CalculationRegister => "CalculationRegister",
            EntityKind::BusinessProcess => "BusinessProcess",
            EntityKind::Task => "Task",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identity shared by every metadata object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub id: ObjectId,
    /// Identifier-safe name.
    pub name: String,
    /// Display label; `None` unless the source marks one as present.
    pub synonym: Option<String>,
    /// Ordinal position, used only by some kinds. Always 0 when decoded.
    pub ordinal: u32,
    /// Query-language alias. Left unset by decoding; filled by consumers
    /// that bind the model to a query layer.
    pub query_alias: Option<String>,
}

impl Identity {
    pub fn new(id: ObjectId, name: impl Into<String>, synonym: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            synonym,
            ordinal: 0,
            query_alias: None,
        }
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.query_alias {
            Some(alias) if !alias.is_empty() => write!(f, "{} ({})", self.name, alias),
            _ => write!(f, "{}", self.name),
        }
    }
}

/// Granularity of a date-time field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DateTimeKind {
    Date,
    Time,
    DateTime,
}

/// Type of a field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum TypeDescriptor {
    Boolean,
    /// `max_length` 0 means unbounded.
    String { max_length: u32, fixed_length: bool },
    Numeric {
        length: u32,
        precision: u32,
        non_negative: bool,
    },
    DateTime { kind: DateTimeKind },
    /// Reference to another metadata object kind, by raw identifier.
    Reference { target: ObjectId },
}

impl std::fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeDescriptor::Boolean => write!(f, "Boolean"),
            TypeDescriptor::String {
                max_length: 0,
                fixed_length: _,
            } => write!(f, "String"),
            TypeDescriptor::String {
                max_length,
                fixed_length,
            } => {
                write!(f, "String({})", max_length)?;
                if *fixed_length {
                    write!(f, " fixed")?;
                }
                Ok(())
            }
            TypeDescriptor::Numeric {
                length,
                precision,
                non_negative,
            } => {
                write!(f, "Number({}, {})", length, precision)?;
                if *non_negative {
                    write!(f, " non-negative")?;
                }
                Ok(())
            }
            TypeDescriptor::DateTime { kind } => write!(f, "{:?}", kind),
            TypeDescriptor::Reference { target } => write!(f, "Ref({})", target),
        }
    }
}

/// Field descriptor.
///
/// `types` is non-empty; more than one entry means the field accepts a
/// union of types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Requisite {
    #[serde(flatten)]
    pub identity: Identity,
    pub types: Vec<TypeDescriptor>,
}

/// Child table owned by an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabularSection {
    #[serde(flatten)]
    pub identity: Identity,
    pub requisites: Vec<Requisite>,
}

/// Recalculation attached to a calculation register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recalculation {
    #[serde(flatten)]
    pub identity: Identity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExchangePlan {
    #[serde(flatten)]
    pub identity: Identity,
    pub requisites: Vec<Requisite>,
    pub tabular_sections: Vec<TabularSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Constant {
    #[serde(flatten)]
    pub identity: Identity,
    pub types: Vec<TypeDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    #[serde(flatten)]
    pub identity: Identity,
    pub requisites: Vec<Requisite>,
    pub tabular_sections: Vec<TabularSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    #[serde(flatten)]
    pub identity: Identity,
    pub requisites: Vec<Requisite>,
    pub tabular_sections: Vec<TabularSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentJournal {
    #[serde(flatten)]
    pub identity: Identity,
    pub graphs: Vec<Requisite>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enumeration {
    #[serde(flatten)]
    pub identity: Identity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartOfCharacteristicTypes {
    #[serde(flatten)]
    pub identity: Identity,
    pub requisites: Vec<Requisite>,
    pub tabular_sections: Vec<TabularSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartOfAccounts {
    #[serde(flatten)]
    pub identity: Identity,
    pub requisites: Vec<Requisite>,
    pub tabular_sections: Vec<TabularSection>,
    pub accounting_flags: Vec<Requisite>,
    pub ext_dimension_accounting_flags: Vec<Requisite>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccumulationRegister {
    #[serde(flatten)]
    pub identity: Identity,
    pub requisites: Vec<Requisite>,
    pub dimensions: Vec<Requisite>,
    pub resources: Vec<Requisite>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountingRegister {
    #[serde(flatten)]
    pub identity: Identity,
    pub requisites: Vec<Requisite>,
    pub dimensions: Vec<Requisite>,
    pub resources: Vec<Requisite>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalculationRegister {
    #[serde(flatten)]
    pub identity: Identity,
    pub requisites: Vec<Requisite>,
    pub dimensions: Vec<Requisite>,
    pub resources: Vec<Requisite>,
    pub recalculations: Vec<Recalculation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusinessProcess {
    #[serde(flatten)]
    pub identity: Identity,
    pub requisites: Vec<Requisite>,
    pub tabular_sections: Vec<TabularSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    #[serde(flatten)]
    pub identity: Identity,
    pub requisites: Vec<Requisite>,
    pub tabular_sections: Vec<TabularSection>,
    pub addressing_attributes: Vec<Requisite>,
}

/// Common access to the 13 entity structs.
pub trait MetadataObject {
    const KIND: EntityKind;

    fn identity(&self) -> &Identity;

    fn id(&self) -> &ObjectId {
        &self.identity().id
    }

    fn name(&self) -> &str {
        &self.identity().name
    }
}

macro_rules! metadata_object {
    ($($ty:ident => $kind:ident),* $(,)?) => {
        $(
            impl MetadataObject for $ty {
                const KIND: EntityKind = EntityKind::$kind;

                fn identity(&self) -> &Identity {
                    &self.identity
                }
            }
        )*

        /// Borrowed reference to any decoded entity.
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum MetadataItem<'a> {
            $($kind(&'a $ty),)*
        }

        impl MetadataItem<'_> {
            pub fn kind(&self) -> EntityKind {
                match self {
                    $(MetadataItem::$kind(_) => EntityKind::$kind,)*
                }
            }

            pub fn identity(&self) -> &Identity {
                match self {
                    $(MetadataItem::$kind(obj) => &obj.identity,)*
                }
            }
        }
    };
}

metadata_object! {
    ExchangePlan => ExchangePlan,
    Constant => Constant,
    Catalog => Catalog,
    Document => Document,
    DocumentJournal => DocumentJournal,
    Enumeration => Enum,
    ChartOfCharacteristicTypes => ChartOfCharacteristicTypes,
    ChartOfAccounts => ChartOfAccounts,
    AccumulationRegister => AccumulationRegister,
    AccountingRegister => AccountingRegister,
    CalculationRegister => CalculationRegister,
    BusinessProcess => BusinessProcess,
    Task => Task,
}

/// Data lock control mode of a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DataLockingControlMode {
    #[default]
    Automatic,
    Managed,
    AutomaticAndManaged,
}

impl DataLockingControlMode {
    /// Map the stored integer code.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(DataLockingControlMode::Automatic),
            1 => Some(DataLockingControlMode::Managed),
            2 => Some(DataLockingControlMode::AutomaticAndManaged),
            _ => None,
        }
    }
}

/// A fully decoded configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigurationModel {
    pub name: String,
    pub synonym: Option<String>,
    pub comment: String,
    pub supplier: String,
    pub version: String,
    pub data_locking_mode: DataLockingControlMode,
    pub compatibility_mode: String,
    pub exchange_plans: Vec<ExchangePlan>,
    pub constants: Vec<Constant>,
    pub catalogs: Vec<Catalog>,
    pub documents: Vec<Document>,
    pub document_journals: Vec<DocumentJournal>,
    pub enums: Vec<Enumeration>,
    pub charts_of_characteristic_types: Vec<ChartOfCharacteristicTypes>,
    pub charts_of_accounts: Vec<ChartOfAccounts>,
    pub accumulation_registers: Vec<AccumulationRegister>,
    pub accounting_registers: Vec<AccountingRegister>,
    pub calculation_registers: Vec<CalculationRegister>,
    pub business_processes: Vec<BusinessProcess>,
    pub tasks: Vec<Task>,
}

impl ConfigurationModel {
    /// Every decoded object, grouped by kind in decode order.
    pub fn objects(&self) -> impl Iterator<Item = MetadataItem<'_>> {
        let m = self;
        std::iter::empty()
            .chain(m.exchange_plans.iter().map(MetadataItem::ExchangePlan))
            .chain(m.constants.iter().map(MetadataItem::Constant))
            .chain(m.catalogs.iter().map(MetadataItem::Catalog))
            .chain(m.documents.iter().map(MetadataItem::Document))
            .chain(m.document_journals.iter().map(MetadataItem::DocumentJournal))
            .chain(m.enums.iter().map(MetadataItem::Enum))
            .chain(
                m.charts_of_characteristic_types
                    .iter()
                    .map(MetadataItem::ChartOfCharacteristicTypes),
            )
            .chain(m.charts_of_accounts.iter().map(MetadataItem::ChartOfAccounts))
            .chain(
                m.accumulation_registers
                    .iter()
                    .map(MetadataItem::AccumulationRegister),
            )
            .chain(m.accounting_registers.iter().map(MetadataItem::AccountingRegister))
            .chain(
                m.calculation_registers
                    .iter()
                    .map(MetadataItem::CalculationRegister),
            )
            .chain(m.business_processes.iter().map(MetadataItem::BusinessProcess))
            .chain(m.tasks.iter().map(MetadataItem::Task))
    }

    /// Total number of decoded objects.
    pub fn object_count(&self) -> usize {
        self.objects().count()
    }

    /// Number of decoded objects of one kind.
    pub fn count_of(&self, kind: EntityKind) -> usize {
        self.objects().filter(|o| o.kind() == kind).count()
    }

    /// Find an object by exact name (first match in decode order).
    pub fn find(&self, name: &str) -> Option<MetadataItem<'_>> {
        self.objects().find(|o| o.identity().name == name)
    }
}
