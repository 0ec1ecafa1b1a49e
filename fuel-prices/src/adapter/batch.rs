//! Batch mapping with an explicit failure policy.

use serde_json::Value;
use tracing::warn;

use super::error::{BatchAborted, MalformedResponse};

/// What to do when one record of a batch is malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchPolicy {
    /// Log the record and carry on with the rest
    #[default]
    SkipInvalid,
    /// Fail the whole batch
    AbortOnInvalid,
}

/// Result of mapping a batch.
#[derive(Debug, Clone)]
pub struct Batch<T> {
    /// Successfully mapped records, in input order
    pub items: Vec<T>,
    /// Skipped records, by input index
    pub skipped: Vec<(usize, MalformedResponse)>,
}

/// Map every record with `parse`, honouring `policy`.
pub fn map_batch<T, F>(
    records: &[Value],
    policy: BatchPolicy,
    mut parse: F,
) -> Result<Batch<T>, BatchAborted>
where
    F: FnMut(&Value) -> Result<T, MalformedResponse>,
{
    let total = records.len();
    let mut items = Vec::with_capacity(total);
    let mut skipped = Vec::new();

    for (index, record) in records.iter().enumerate() {
        match parse(record) {
            Ok(item) => items.push(item),
            Err(source) => match policy {
                BatchPolicy::SkipInvalid => {
                    warn!(index, total, error = %source, "skipping malformed record");
                    skipped.push((index, source));
                }
                BatchPolicy::AbortOnInvalid => {
                    return Err(BatchAborted {
                        index,
                        total,
                        source,
                    });
                }
            },
        }
    }

    Ok(Batch { items, skipped })
}
