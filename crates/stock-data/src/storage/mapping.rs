//! 일봉 인덱스 필드 매핑.

use serde_json::{json, Map, Value};

/// 기본 인덱스 이름.
pub const DEFAULT_INDEX_NAME: &str = "finnhub_stocks";

/// 필드 이름과 Elasticsearch 타입.
pub const FIELD_TYPES: [(&str, &str); 15] = [
    ("@timestamp", "date"),
    ("symbol", "keyword"),
    ("open", "float"),
    ("high", "float"),
    ("low", "float"),
    ("close", "float"),
    ("volume", "long"),
    ("price_change", "float"),
    ("volume_change", "float"),
    ("hour", "keyword"),
    ("month", "integer"),
    ("season", "keyword"),
    ("sentiment", "keyword"),
    ("price_per_volume", "float"),
    ("trip_date", "keyword"),
];

/// 인덱스 생성 요청 본문 (`{"mappings": {"properties": {...}}}`).
pub fn index_mapping() -> Value {
    let properties: Map<String, Value> = FIELD_TYPES
        .iter()
        .map(|(field, ty)| (field.to_string(), json!({ "type": ty })))
        .collect();

    json!({ "mappings": { "properties": properties } })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_declares_every_field() {
        let mapping = index_mapping();
        let properties = mapping["mappings"]["properties"].as_object().unwrap();

        assert_eq!(properties.len(), 15);
        assert_eq!(properties["@timestamp"]["type"], "date");
        assert_eq!(properties["symbol"]["type"], "keyword");
        assert_eq!(properties["volume"]["type"], "long");
        assert_eq!(properties["month"]["type"], "integer");
        assert_eq!(properties["price_per_volume"]["type"], "float");
    }

    #[test]
    fn test_mapping_matches_document_fields() {
        use chrono::{TimeZone, Utc};
        use stock_core::{transform, CandleRow, IndexDocument};

        let ts = Utc.timestamp_opt(1_714_521_600, 0).unwrap();
        let mut rows = transform::transform(vec![
            CandleRow::new("AAPL", ts, 1.0, 2.0, 0.5, 1.5, 10),
            CandleRow::new("AAPL", ts + chrono::Duration::days(1), 1.0, 2.0, 0.5, 1.5, 20),
        ]);
        let doc = IndexDocument::try_from(&rows.remove(1)).unwrap();
        let json = serde_json::to_value(doc).unwrap();

        let mapping = index_mapping();
        let properties = mapping["mappings"]["properties"].as_object().unwrap();
        for key in json.as_object().unwrap().keys() {
            assert!(properties.contains_key(key), "unmapped field: {}", key);
        }
        assert_eq!(json.as_object().unwrap().len(), properties.len());
    }
}
