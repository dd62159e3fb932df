//! Join of the price document against the detail document.
//!
//! The detail document is indexed once by `id`; the `hotels` list of the price
//! document is then walked in order. Price records without a matching detail are
//! skipped. A matched detail record that lacks a required field aborts the join.
//! Field values are copied through as they are; only `image_details.count` has to
//! be an integer, since the image URL is computed from it.

use crate::domain::model::{
    id_label, CombinedRecord, DetailRecord, ImageDetails, JoinReport, JoinResult, PriceRecord,
    TrustYou, TrustYouScore,
};
use crate::utils::error::{JoinError, Result};
use serde_json::{Number, Value};
use std::collections::HashMap;

const PRICE_DOCUMENT: &str = "price document";
const DETAIL_DOCUMENT: &str = "detail document";

/// Hashable view of a scalar JSON id. `"7"` and `7` are different keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum IdKey<'a> {
    Text(&'a str),
    Number(&'a Number),
    Bool(bool),
    Null,
}

impl<'a> IdKey<'a> {
    fn from_value(id: &'a Value, record: &str) -> Result<Self> {
        match id {
            Value::String(text) => Ok(IdKey::Text(text)),
            Value::Number(number) => Ok(IdKey::Number(number)),
            Value::Bool(flag) => Ok(IdKey::Bool(*flag)),
            Value::Null => Ok(IdKey::Null),
            Value::Array(_) | Value::Object(_) => Err(invalid(record, "id", "a scalar value")),
        }
    }
}

/// Detail records keyed by id. Later duplicates replace earlier ones.
#[derive(Debug)]
pub struct DetailIndex<'a> {
    entries: &'a [Value],
    by_id: HashMap<IdKey<'a>, usize>,
    duplicate_ids: Vec<String>,
}

impl<'a> DetailIndex<'a> {
    /// Detail record for `id`, or `None` when absent. Fails only for ids that
    /// cannot be keys (arrays and objects).
    pub fn get(&self, id: &Value) -> Result<Option<&'a Value>> {
        let entries = self.entries;
        let key = IdKey::from_value(id, &id_label(id))?;
        Ok(self.by_id.get(&key).map(|&position| &entries[position]))
    }

    /// Number of records the index was built from, duplicates included.
    pub fn records(&self) -> usize {
        self.entries.len()
    }

    pub fn duplicate_ids(&self) -> &[String] {
        &self.duplicate_ids
    }
}

pub fn build_index(details: &Value) -> Result<DetailIndex<'_>> {
    let entries = details.as_array().ok_or_else(|| {
        invalid(DETAIL_DOCUMENT, "<root>", "an array of hotel details")
    })?;

    let mut by_id = HashMap::with_capacity(entries.len());
    let mut duplicate_ids = Vec::new();

    for (position, entry) in entries.iter().enumerate() {
        let label = format!("details[{}]", position);
        let id = field(entry, &label, "id")?;
        if by_id.insert(IdKey::from_value(id, &label)?, position).is_some() {
            let id = id_label(id);
            tracing::warn!("Duplicate hotel detail id '{}', keeping the last one", id);
            duplicate_ids.push(id);
        }
    }

    tracing::debug!(
        "Indexed {} hotel details ({} distinct ids)",
        entries.len(),
        by_id.len()
    );

    Ok(DetailIndex {
        entries,
        by_id,
        duplicate_ids,
    })
}

/// Joins `prices` (`{"hotels": [...]}`) with `details` (`[...]`) on `id`.
pub fn combine(prices: &Value, details: &Value) -> Result<Vec<CombinedRecord>> {
    combine_with_report(prices, details).map(|result| result.records)
}

pub fn combine_with_report(prices: &Value, details: &Value) -> Result<JoinResult> {
    let hotels = field(prices, PRICE_DOCUMENT, "hotels")?
        .as_array()
        .ok_or_else(|| invalid(PRICE_DOCUMENT, "hotels", "an array"))?;

    let index = build_index(details)?;

    let mut records = Vec::new();
    let mut unmatched_ids = Vec::new();

    for (position, hotel) in hotels.iter().enumerate() {
        let id = field(hotel, &format!("hotels[{}]", position), "id")?;
        let label = id_label(id);

        let Some(detail) = index.get(id)? else {
            tracing::debug!("No details for hotel '{}', skipping", label);
            unmatched_ids.push(label);
            continue;
        };

        let price = PriceRecord {
            id: id.clone(),
            price: field(hotel, &label, "price")?.clone(),
        };
        records.push(CombinedRecord::join(price, parse_detail(detail, id)?));
    }

    tracing::info!(
        "Joined {} of {} priced hotels ({} skipped without details)",
        records.len(),
        hotels.len(),
        unmatched_ids.len()
    );

    let report = JoinReport {
        price_records: hotels.len(),
        detail_records: index.records(),
        matched: records.len(),
        unmatched_ids,
        duplicate_detail_ids: index.duplicate_ids().to_vec(),
    };

    Ok(JoinResult { records, report })
}

/// Extracts the detail record for `id`.
pub fn parse_detail(detail: &Value, id: &Value) -> Result<DetailRecord> {
    let label = id_label(id);
    Ok(DetailRecord {
        id: id.clone(),
        name: field(detail, &label, "name")?.clone(),
        rating: field(detail, &label, "rating")?.clone(),
        image_details: ImageDetails {
            prefix: field(detail, &label, "image_details.prefix")?.clone(),
            count: integer_field(detail, &label, "image_details.count")?,
            suffix: field(detail, &label, "image_details.suffix")?.clone(),
        },
        trustyou: TrustYou {
            score: TrustYouScore {
                kaligo_overall: field(detail, &label, "trustyou.score.kaligo_overall")?.clone(),
            },
        },
    })
}

fn field<'v>(value: &'v Value, record: &str, path: &str) -> Result<&'v Value> {
    path.split('.').try_fold(value, |current, key| {
        current.get(key).ok_or_else(|| JoinError::MissingField {
            record: record.to_string(),
            field: path.to_string(),
        })
    })
}

fn integer_field(value: &Value, record: &str, path: &str) -> Result<i64> {
    field(value, record, path)?
        .as_i64()
        .ok_or_else(|| invalid(record, path, "an integer"))
}

fn invalid(record: &str, path: &str, expected: &'static str) -> JoinError {
    JoinError::InvalidField {
        record: record.to_string(),
        field: path.to_string(),
        expected,
    }
}
