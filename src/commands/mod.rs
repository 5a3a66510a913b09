pub mod add;
pub mod advance;
pub mod args;
pub mod config;
pub mod delete;
pub mod edit;
pub mod import;
pub mod list;
pub mod reset;
pub mod summary;
pub mod toggle;

use anyhow::{Result, bail};
use plandash_core::store::{DashboardStore, FileSlot};
use plandash_core::upsert::Keyed;

pub type Store = DashboardStore<FileSlot>;

/// Ids shown by `list` are shortened, so accept any unambiguous prefix.
pub fn resolve_id<T: Keyed>(records: &[T], query: &str, kind: &str) -> Result<String> {
    if let Some(record) = records.iter().find(|r| r.id() == query) {
        return Ok(record.id().to_string());
    }

    let matches: Vec<&T> = records.iter().filter(|r| r.id().starts_with(query)).collect();

    match matches.as_slice() {
        [record] => Ok(record.id().to_string()),
        [] => bail!("No {} with id '{}'", kind, query),
        _ => bail!(
            "Id '{}' matches {} {}s. Use more characters.",
            query,
            matches.len(),
            kind
        ),
    }
}
