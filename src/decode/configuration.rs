//! decode::configuration
//!
//! Whole-configuration decoding.
//!
//! # Sequence
//!
//! 1. Fetch the `root` blob and read the key of the configuration blob.
//! 2. Fetch the configuration tree and read its properties.
//! 3. For each entity kind in [`EntityKind::ALL`] order, read the kind's
//!    object id list and decode every listed object.
//!
//! Any failure aborts the decode. Cancellation is observed before every
//! fetch and at the start of each kind.
//!
//! # Fan-out
//!
//! With [`DecodeOptions::concurrency`] above 1, objects of one kind are
//! fetched through a bounded buffered stream. Results are joined in list
//! order, so the model is identical to a sequential decode. Kinds are
//! still decoded one after another.

use futures::stream::{self, StreamExt, TryStreamExt};

use super::entities::{DecodeEntity, Pending};
use super::identity::{decode_synonym, object_id};
use super::layout::{self, configuration as props, kind_layout};
use super::reader::Reader;
use super::recalc::resolve_recalculations;
use super::sections::list_items;
use super::{CancellationToken, DecodeError};
use crate::core::model::{ConfigurationModel, DataLockingControlMode};
use crate::core::types::ObjectId;
use crate::store::BlobStore;
use crate::tree::Cursor;

/// Tuning for [`decode_configuration_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum in-flight object fetches within one kind. 1 is sequential.
    pub concurrency: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self { concurrency: 1 }
    }
}

/// Decode the full configuration model with strictly sequential fetches.
pub async fn decode_configuration(
    store: &dyn BlobStore,
    cancel: &CancellationToken,
) -> Result<ConfigurationModel, DecodeError> {
    decode_configuration_with(store, cancel, DecodeOptions::default()).await
}

/// Decode the full configuration model.
pub async fn decode_configuration_with(
    store: &dyn BlobStore,
    cancel: &CancellationToken,
    options: DecodeOptions,
) -> Result<ConfigurationModel, DecodeError> {
    let reader = Reader::new(store, cancel);
    let concurrency = options.concurrency.max(1);

    let root = reader
        .fetch_tree(layout::ROOT_KEY)
        .await
        .map_err(|e| e.in_blob(layout::ROOT_KEY))?;
    let key = root
        .cursor()
        .at(layout::ROOT_CONFIGURATION_KEY)
        .map_err(DecodeError::from)
        .and_then(|node| object_id(&node))
        .map_err(|e| e.in_blob(layout::ROOT_KEY))?;

    tracing::info!(store = store.name(), key = %key, "decoding configuration");

    let conf = reader
        .fetch_tree(key.as_str())
        .await
        .map_err(|e| e.in_blob(key.as_str()))?;
    let conf = conf.cursor();

    let mut model = ConfigurationModel::default();
    decode_properties(&conf, &mut model).map_err(|e| e.in_blob(key.as_str()))?;

    model.exchange_plans = decode_kind(&reader, &conf, concurrency).await?;
    model.constants = decode_kind(&reader, &conf, concurrency).await?;
    model.catalogs = decode_kind(&reader, &conf, concurrency).await?;
    model.documents = decode_kind(&reader, &conf, concurrency).await?;
    model.document_journals = decode_kind(&reader, &conf, concurrency).await?;
    model.enums = decode_kind(&reader, &conf, concurrency).await?;
    model.charts_of_characteristic_types = decode_kind(&reader, &conf, concurrency).await?;
    model.charts_of_accounts = decode_kind(&reader, &conf, concurrency).await?;
    model.accumulation_registers = decode_kind(&reader, &conf, concurrency).await?;
    model.accounting_registers = decode_kind(&reader, &conf, concurrency).await?;
    model.calculation_registers = decode_kind(&reader, &conf, concurrency).await?;
    model.business_processes = decode_kind(&reader, &conf, concurrency).await?;
    model.tasks = decode_kind(&reader, &conf, concurrency).await?;

    tracing::info!(
        name = %model.name,
        objects = model.object_count(),
        "configuration decoded"
    );
    Ok(model)
}

fn decode_properties(conf: &Cursor<'_>, model: &mut ConfigurationModel) -> Result<(), DecodeError> {
    let text = |path: &[usize]| -> Result<String, DecodeError> {
        Ok(conf.at(path)?.as_str()?.to_string())
    };

    model.name = text(props::NAME)?;
    model.synonym = decode_synonym(&conf.at(props::SYNONYM)?)?;
    model.comment = text(props::COMMENT)?;
    model.supplier = text(props::SUPPLIER)?;
    model.version = text(props::VERSION)?;
    model.compatibility_mode = text(props::COMPATIBILITY_MODE)?;

    let locking = conf.at(props::LOCKING_MODE)?;
    let code = locking.as_int()?;
    model.data_locking_mode = DataLockingControlMode::from_code(code).ok_or_else(|| {
        DecodeError::UnknownFormat(format!(
            "unknown data locking mode {} at {}",
            code,
            locking.path()
        ))
    })?;
    Ok(())
}

async fn decode_kind<T: DecodeEntity>(
    reader: &Reader<'_>,
    conf: &Cursor<'_>,
    concurrency: usize,
) -> Result<Vec<T>, DecodeError> {
    reader.cancel_token().check()?;

    let ids = list_items(&conf.at(kind_layout(T::KIND).object_list)?)?
        .iter()
        .map(object_id)
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(kind = %T::KIND, listed = ids.len(), "decoding kind");

    let objects: Vec<T> = if concurrency == 1 {
        let mut objects = Vec::with_capacity(ids.len());
        for id in ids {
            objects.push(decode_object(reader, id).await?);
        }
        objects
    } else {
        stream::iter(ids)
            .map(|id| decode_object(reader, id))
            .buffered(concurrency)
            .try_collect()
            .await?
    };

    tracing::info!(kind = %T::KIND, count = objects.len(), "decoded kind");
    Ok(objects)
}

async fn decode_object<T: DecodeEntity>(reader: &Reader<'_>, id: ObjectId) -> Result<T, DecodeError> {
    let listed = id.to_string();
    fetch_and_decode(reader, id)
        .await
        .map_err(|e| e.in_object(T::KIND, listed))
}

async fn fetch_and_decode<T: DecodeEntity>(
    reader: &Reader<'_>,
    id: ObjectId,
) -> Result<T, DecodeError> {
    let tree = reader.fetch_tree(id.as_str()).await?;
    let Pending {
        mut object,
        recalculation_keys,
    } = T::decode(&tree.cursor(), id)?;

    if !recalculation_keys.is_empty() {
        let recalculations = resolve_recalculations(reader, &recalculation_keys).await?;
        object.attach_recalculations(recalculations);
    }

    tracing::debug!(kind = %T::KIND, id = %object.id(), name = object.name(), "decoded object");
    Ok(object)
}
