use crate::errors::ApiError;
use crate::services::query::{CreateIntent, Selector, UpdateIntent};
use crate::state::record::Record;
use crate::state::store::SharedStore;

/// Create a record, or hand back the existing one with the same name.
pub fn create(store: &SharedStore, intent: CreateIntent) -> Result<Record, ApiError> {
    let (record, created) = store.create(&intent.name, &intent.value)?;

    if created {
        tracing::info!("Created record id={} name={}", record.id, record.name);
    } else {
        tracing::debug!("Record name={} already exists (id={})", record.name, record.id);
    }

    Ok(record)
}

/// Every record for `Selector::All`, otherwise a single-element list.
pub fn read(store: &SharedStore, selector: Selector) -> Result<Vec<Record>, ApiError> {
    let found = match &selector {
        Selector::All => return Ok(store.all()),
        Selector::Id(id) => store.find_by_id(*id),
        Selector::Name(name) => store.find_by_name(name),
    };

    found
        .map(|record| vec![record])
        .ok_or_else(|| not_found(&selector))
}

pub fn update(store: &SharedStore, intent: UpdateIntent) -> Result<Record, ApiError> {
    let record = store
        .update(&intent.name, &intent.value)?
        .ok_or_else(|| ApiError::NotFound(format!("name={}", intent.name)))?;

    tracing::info!("Updated record id={} name={}", record.id, record.name);
    Ok(record)
}

pub fn delete(store: &SharedStore, selector: Selector) -> Result<(), ApiError> {
    let removed = match &selector {
        Selector::All => {
            store.delete_all()?;
            return Ok(());
        }
        Selector::Id(id) => store.delete_by_id(*id)?,
        Selector::Name(name) => store.delete_by_name(name)?,
    };

    if !removed {
        return Err(not_found(&selector));
    }

    tracing::info!("Deleted record {:?}", selector);
    Ok(())
}

fn not_found(selector: &Selector) -> ApiError {
    match selector {
        Selector::All => ApiError::NotFound("all".into()),
        Selector::Id(id) => ApiError::NotFound(format!("id={id}")),
        Selector::Name(name) => ApiError::NotFound(format!("name={name}")),
    }
}
