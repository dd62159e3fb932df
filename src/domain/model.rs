use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of the `hotels` list in the price document.
///
/// Values are carried through untouched; only their presence is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub id: Value,
    pub price: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageDetails {
    pub prefix: Value,
    pub count: i64,
    pub suffix: Value,
}

impl ImageDetails {
    /// `count` is the number of images; the URL points at the last one.
    pub fn image_url(&self) -> String {
        format!(
            "{}{}{}",
            display_fragment(&self.prefix),
            i128::from(self.count) - 1,
            display_fragment(&self.suffix)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustYouScore {
    pub kaligo_overall: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustYou {
    pub score: TrustYouScore,
}

/// One entry of the detail document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub id: Value,
    pub name: Value,
    pub rating: Value,
    pub image_details: ImageDetails,
    pub trustyou: TrustYou,
}

/// Output row. Field order is the serialized order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedRecord {
    pub id: Value,
    pub price: Value,
    pub name: Value,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    #[serde(rename = "StarRating")]
    pub star_rating: Value,
    #[serde(rename = "GuestRating")]
    pub guest_rating: Value,
}

impl CombinedRecord {
    pub fn join(price: PriceRecord, detail: DetailRecord) -> Self {
        Self {
            id: price.id,
            price: price.price,
            image_url: detail.image_details.image_url(),
            name: detail.name,
            star_rating: detail.rating,
            guest_rating: detail.trustyou.score.kaligo_overall,
        }
    }
}

/// Text of a scalar as it appears inside the image URL.
fn display_fragment(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Null => "None".to_string(),
        other => other.to_string(),
    }
}

/// Record label used in logs, reports and errors: strings bare, anything else as JSON.
pub fn id_label(id: &Value) -> String {
    match id {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Both input documents as parsed JSON, before any field extraction.
#[derive(Debug, Clone)]
pub struct SourceDocuments {
    pub prices: Value,
    pub details: Value,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinReport {
    pub price_records: usize,
    pub detail_records: usize,
    pub matched: usize,
    pub unmatched_ids: Vec<String>,
    pub duplicate_detail_ids: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct JoinResult {
    pub records: Vec<CombinedRecord>,
    pub report: JoinReport,
}
