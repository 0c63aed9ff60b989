use serde::{Deserialize, Serialize};

/// One transaction from the explorer `account/txlist` endpoint.
///
/// Every field is optional: the explorer omits `to` for contract creations
/// and individual deployments vary in which extras they return. Numeric
/// fields arrive as decimal strings but some mirrors send bare numbers, so
/// they go through the string-or-number visitor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiTransaction {
    pub hash: Option<String>,
    #[serde(rename = "from")]
    pub sender: Option<String>,
    pub to: Option<String>,
    #[serde(deserialize_with = "de_opt_string_any", default)]
    pub value: Option<String>,
    #[serde(
        rename = "isError",
        deserialize_with = "de_opt_string_any",
        default
    )]
    pub is_error: Option<String>,
    #[serde(
        rename = "gasUsed",
        deserialize_with = "de_opt_string_any",
        default
    )]
    pub gas_used: Option<String>,
    #[serde(rename = "methodId")]
    pub method_id: Option<String>,
    #[serde(
        rename = "timeStamp",
        deserialize_with = "de_opt_string_any",
        default
    )]
    pub time_stamp: Option<String>,
    #[serde(
        rename = "blockNumber",
        deserialize_with = "de_opt_string_any",
        default
    )]
    pub block_number: Option<String>,
    #[serde(rename = "functionName")]
    pub function_name: Option<String>,
}

/// Parse an optional numeric-string field, coercing anything malformed to 0.
///
/// This is the sanitize-to-zero policy: absent fields, empty strings, and
/// garbage all become 0.0 instead of an error.
pub fn num_or_zero(field: Option<&str>) -> f64 {
    field
        .and_then(|s| s.trim().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Deserialize a field that can be either a string or a number into Option<String>.
fn de_opt_string_any<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de;

    struct StringOrNumber;

    impl<'de> de::Visitor<'de> for StringOrNumber {
        type Value = Option<String>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a string or number")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }
    }

    deserializer.deserialize_any(StringOrNumber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_txlist_record() {
        let json = r#"{
            "blockNumber": "17000000",
            "timeStamp": "1700000000",
            "hash": "0xdeadbeef",
            "from": "0xaaa",
            "to": "0xbbb",
            "value": "1000000000000000000",
            "isError": "0",
            "gasUsed": "21000",
            "methodId": "0x",
            "functionName": ""
        }"#;
        let tx: ApiTransaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.to.as_deref(), Some("0xbbb"));
        assert_eq!(tx.value.as_deref(), Some("1000000000000000000"));
        assert_eq!(tx.is_error.as_deref(), Some("0"));
        assert_eq!(tx.method_id.as_deref(), Some("0x"));
    }

    #[test]
    fn test_parse_numeric_fields_as_numbers() {
        // Some mirrors return bare numbers instead of strings.
        let json = r#"{"to":"0xbbb","value":12345,"isError":0,"gasUsed":21000}"#;
        let tx: ApiTransaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.value.as_deref(), Some("12345"));
        assert_eq!(tx.gas_used.as_deref(), Some("21000"));
        assert!(tx.hash.is_none());
    }

    #[test]
    fn test_serialize_round_trip_keeps_wire_names() {
        let tx: ApiTransaction =
            serde_json::from_str(r#"{"to":"0xbbb","value":"7","isError":"1","gasUsed":"5"}"#)
                .unwrap();
        let out = serde_json::to_string(&tx).unwrap();
        assert!(out.contains("\"isError\""));
        assert!(out.contains("\"gasUsed\""));
        let back: ApiTransaction = serde_json::from_str(&out).unwrap();
        assert_eq!(back.is_error.as_deref(), Some("1"));
    }

    #[test]
    fn test_num_or_zero_coerces_malformed() {
        assert_eq!(num_or_zero(Some("21000")), 21000.0);
        assert_eq!(num_or_zero(Some(" 42 ")), 42.0);
        assert_eq!(num_or_zero(Some("not-a-number")), 0.0);
        assert_eq!(num_or_zero(Some("")), 0.0);
        assert_eq!(num_or_zero(None), 0.0);
    }

    #[test]
    fn test_num_or_zero_handles_wei_magnitudes() {
        // 10^21 wei overflows u64 but is fine as f64.
        assert!(num_or_zero(Some("1000000000000000000000")) > 0.0);
    }
}
