//! Lenient (de)serializers for the shapes the document store hands back.
//!
//! Arrays may come back with `null` holes, as index-keyed objects, or not
//! at all once emptied. Task owners are either a number or `""`.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum ListOrMap<T> {
    List(Vec<Option<T>>),
    Map(BTreeMap<String, Option<T>>),
}

/// Deserialize a possibly sparse array into a dense `Vec`
pub fn sparse_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let raw = Option::<ListOrMap<T>>::deserialize(deserializer)?;
    Ok(match raw {
        None => Vec::new(),
        Some(ListOrMap::List(items)) => items.into_iter().flatten().collect(),
        Some(ListOrMap::Map(entries)) => {
            let mut entries: Vec<(String, Option<T>)> = entries.into_iter().collect();
            entries.sort_by_key(|(key, _)| key.parse::<u64>().unwrap_or(u64::MAX));
            entries.into_iter().filter_map(|(_, value)| value).collect()
        }
    })
}

/// Task owner: a user id, or `""` when nobody owns the task
pub mod owner {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(id) => serializer.serialize_u32(*id),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Id(u32),
            Text(String),
        }

        Ok(match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Id(id)) => Some(id),
            Some(Raw::Text(text)) => text.trim().parse().ok(),
            None => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Deserialize, Serialize)]
    struct Holder {
        #[serde(default, deserialize_with = "super::sparse_list")]
        ids: Vec<u32>,
        #[serde(default, with = "super::owner")]
        user: Option<u32>,
    }

    #[test]
    fn test_sparse_list_shapes() {
        let holder: Holder = serde_json::from_value(json!({ "ids": [null, 2, null, 4] })).unwrap();
        assert_eq!(holder.ids, vec![2, 4]);

        let holder: Holder = serde_json::from_value(json!({ "ids": { "10": 11, "2": 3, "0": 1 } })).unwrap();
        assert_eq!(holder.ids, vec![1, 3, 11]);

        let holder: Holder = serde_json::from_value(json!({})).unwrap();
        assert!(holder.ids.is_empty());

        let holder: Holder = serde_json::from_value(json!({ "ids": null })).unwrap();
        assert!(holder.ids.is_empty());
    }

    #[test]
    fn test_owner_round_trip() {
        let holder: Holder = serde_json::from_value(json!({ "user": "" })).unwrap();
        assert_eq!(holder.user, None);
        assert_eq!(serde_json::to_value(&holder).unwrap()["user"], json!(""));

        let holder: Holder = serde_json::from_value(json!({ "user": 3 })).unwrap();
        assert_eq!(holder.user, Some(3));
        assert_eq!(serde_json::to_value(&holder).unwrap()["user"], json!(3));

        let holder: Holder = serde_json::from_value(json!({ "user": "7" })).unwrap();
        assert_eq!(holder.user, Some(7));
    }
}
