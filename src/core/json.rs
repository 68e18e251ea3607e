use crate::core::errors::Result;
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Deserializer};

/*-------------------------------------------------------------------------------------------------
  Parse JSON
-------------------------------------------------------------------------------------------------*/

pub fn parse(json: &str) -> Result<RangeDocument> {
    let document: RangeDocument = serde_json::from_str(json)?;
    debug!("IP ranges decoded: {:?}", document);
    Ok(document)
}

/*-------------------------------------------------------------------------------------------------
  JSON Data Structures
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Range Document
--------------------------------------------------------------------------------------*/

/// The published IP Ranges document: a snapshot of address ranges identified by its sync
/// token.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct RangeDocument {
    /// Address range records, in the order they were published.
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<RangeRecord>,

    /// Identifier for this snapshot of the document.
    #[serde(rename = "syncToken", default, deserialize_with = "null_as_default")]
    pub sync_token: i64,

    #[serde(
        rename = "creationDate",
        default,
        deserialize_with = "crate::core::datetime::deserialize"
    )]
    pub creation_date: Option<DateTime<Utc>>,
}

/*--------------------------------------------------------------------------------------
  Range Record
--------------------------------------------------------------------------------------*/

/// One published address range. Missing or `null` fields decode to their empty values; such a
/// record is excluded by filtering or reported as unparseable, never rejected here.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct RangeRecord {
    /// Bare network address (no prefix length); only used to classify the address family.
    #[serde(default, deserialize_with = "null_as_default")]
    pub network: String,

    /// CIDR-notation range emitted when the record passes filtering.
    #[serde(default, deserialize_with = "null_as_default")]
    pub cidr: String,

    #[serde(rename = "direction", default, deserialize_with = "null_as_default")]
    pub directions: Vec<String>,

    #[serde(rename = "product", default, deserialize_with = "null_as_default")]
    pub products: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub mask_len: u32,

    #[serde(default, deserialize_with = "null_as_default")]
    pub mask: String,

    #[serde(rename = "region", default, deserialize_with = "null_as_default")]
    pub regions: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub perimeter: String,
}

/*-------------------------------------------------------------------------------------------------
  Helper Functions
-------------------------------------------------------------------------------------------------*/

// `null` decodes like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::errors::Error;
    use crate::core::filter::Filter;
    use crate::core::ip_ranges::flatten;
    use chrono::TimeZone;

    /*----------------------------------------------------------------------------------
      Test Helper Functions
    ----------------------------------------------------------------------------------*/

    pub(crate) fn test_record(
        network: &str,
        cidr: &str,
        directions: &[&str],
        products: &[&str],
    ) -> RangeRecord {
        RangeRecord {
            network: network.to_string(),
            cidr: cidr.to_string(),
            directions: directions.iter().map(|d| d.to_string()).collect(),
            products: products.iter().map(|p| p.to_string()).collect(),
            ..RangeRecord::default()
        }
    }

    /*----------------------------------------------------------------------------------
      RangeDocument
    ----------------------------------------------------------------------------------*/

    #[test]
    fn test_parse_range_document() {
        let json = r#"{
          "creationDate": "2024-05-16T01:41:25",
          "syncToken": 1715823685,
          "items": [
            {
              "network": "13.52.5.0",
              "mask_len": 24,
              "cidr": "13.52.5.0/24",
              "mask": "255.255.255.0",
              "region": ["us-west-1"],
              "product": ["jira", "confluence"],
              "direction": ["ingress", "egress"],
              "perimeter": "global"
            }
          ]
        }"#;

        let document = parse(json).unwrap();

        let expected = RangeDocument {
            items: vec![RangeRecord {
                network: "13.52.5.0".to_string(),
                cidr: "13.52.5.0/24".to_string(),
                directions: vec!["ingress".to_string(), "egress".to_string()],
                products: vec!["jira".to_string(), "confluence".to_string()],
                mask_len: 24,
                mask: "255.255.255.0".to_string(),
                regions: vec!["us-west-1".to_string()],
                perimeter: "global".to_string(),
            }],
            sync_token: 1715823685,
            creation_date: Some(Utc.with_ymd_and_hms(2024, 5, 16, 1, 41, 25).unwrap()),
        };

        assert_eq!(document, expected);
    }

    #[test]
    fn test_parse_optional_fields() {
        let json = r#"{
          "syncToken": 42,
          "items": [
            {
              "network": "2620:5c:0::",
              "cidr": "2620:5c:0::/48",
              "product": ["confluence"],
              "direction": ["ingress"],
              "unknown_field": true
            }
          ]
        }"#;

        let document = parse(json).unwrap();

        assert_eq!(document.sync_token, 42);
        assert_eq!(document.creation_date, None);
        assert_eq!(
            document.items,
            vec![test_record(
                "2620:5c:0::",
                "2620:5c:0::/48",
                &["ingress"],
                &["confluence"]
            )]
        );
    }

    #[test]
    fn test_parse_empty_document() {
        let document = parse("{}").unwrap();
        assert!(document.items.is_empty());
        assert_eq!(document.sync_token, 0);
    }

    #[test]
    fn test_parse_unparseable_creation_date() {
        let document = parse(r#"{"syncToken": 7, "creationDate": "soon", "items": []}"#).unwrap();
        assert_eq!(document.sync_token, 7);
        assert!(document.creation_date.is_none());
    }

    #[test]
    fn test_parse_malformed_document() {
        for json in [
            "<html>Service Unavailable</html>",
            r#"{"syncToken": "not-a-number", "items": []}"#,
            r#"{"syncToken": 1, "items": {}}"#,
        ] {
            let result = parse(json);
            assert!(matches!(result, Err(Error::Decode(_))), "{json}");
        }
    }

    /*----------------------------------------------------------------------------------
      Missing and Null Fields
    ----------------------------------------------------------------------------------*/

    #[test]
    fn test_parse_missing_record_fields() {
        let json = r#"{
          "syncToken": 1,
          "items": [
            {"network": "10.0.0.0"},
            {"cidr": "10.1.0.0/16", "product": ["jira"], "direction": ["ingress"]}
          ]
        }"#;

        let document = parse(json).unwrap();

        assert_eq!(
            document.items,
            vec![
                test_record("10.0.0.0", "", &[], &[]),
                test_record("", "10.1.0.0/16", &["ingress"], &["jira"]),
            ]
        );

        // No direction or product: filtered out. No network: unclassified.
        let cidr_blocks = flatten(&document.items, &Filter::default());
        assert!(cidr_blocks.ipv4.is_empty());
        assert!(cidr_blocks.ipv6.is_empty());
        assert_eq!(cidr_blocks.all.iter().collect::<Vec<_>>(), vec!["10.1.0.0/16"]);
    }

    #[test]
    fn test_parse_null_fields() {
        let document = parse(r#"{"syncToken": null, "items": null}"#).unwrap();
        assert_eq!(document, RangeDocument::default());

        let json = r#"{
          "syncToken": 3,
          "items": [
            {
              "network": null,
              "mask_len": null,
              "cidr": null,
              "mask": null,
              "region": null,
              "product": null,
              "direction": null,
              "perimeter": null
            },
            {
              "network": "13.52.5.0",
              "cidr": "13.52.5.0/24",
              "product": ["jira"],
              "direction": ["ingress"],
              "region": null
            }
          ]
        }"#;

        let document = parse(json).unwrap();

        assert_eq!(document.sync_token, 3);
        assert_eq!(
            document.items,
            vec![
                RangeRecord::default(),
                test_record("13.52.5.0", "13.52.5.0/24", &["ingress"], &["jira"]),
            ]
        );

        let cidr_blocks = flatten(&document.items, &Filter::default());
        assert_eq!(cidr_blocks.all.iter().collect::<Vec<_>>(), vec!["13.52.5.0/24"]);
        assert_eq!(cidr_blocks.ipv4, cidr_blocks.all);
    }
}
