use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Languages are display metadata only; one that does not parse is dropped
fn lenient_language<'de, D>(deserializer: D) -> Result<Option<Language>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// A language (optionally with dialect) as reported by the backend
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    #[serde(default, deserialize_with = "null_as_default")]
    pub identifier: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(default)]
    pub dialect_identifier: Option<String>,
    #[serde(default)]
    pub dialect_display_name: Option<String>,
}

/// Flag marker for entries without a usable language
pub const UNKNOWN_FLAG: &str = "??";

impl Language {
    /// `"English (American)"`, or just the display name without a dialect
    pub fn display_string(language: Option<&Language>) -> String {
        match language {
            None => String::new(),
            Some(lang) => match &lang.dialect_display_name {
                Some(dialect) => format!("{} ({})", lang.display_name, dialect),
                None => lang.display_name.clone(),
            },
        }
    }

    /// Two-letter flag code. English maps to `us` for the US dialect and to
    /// `gb` otherwise.
    pub fn flag_code(language: Option<&Language>) -> String {
        let Some(lang) = language.filter(|l| !l.identifier.is_empty()) else {
            return UNKNOWN_FLAG.to_string();
        };
        let identifier: String = lang.identifier.chars().take(2).collect::<String>().to_lowercase();
        if identifier != "en" {
            return identifier;
        }
        let dialect: Option<String> = lang
            .dialect_identifier
            .as_deref()
            .map(|d| d.chars().take(2).collect::<String>().to_lowercase());
        match dialect.as_deref() {
            Some("us") => "us".to_string(),
            _ => "gb".to_string(),
        }
    }
}

/// A selectable dictionary, identified by `query_string_with_dialect`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dictionary {
    pub query_string_with_dialect: String,
    #[serde(default, deserialize_with = "lenient_language")]
    pub input_language: Option<Language>,
    #[serde(default, deserialize_with = "lenient_language")]
    pub output_language: Option<Language>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bidirectional: bool,
}

impl Dictionary {
    pub fn new(key: impl Into<String>) -> Self {
        Dictionary {
            query_string_with_dialect: key.into(),
            input_language: None,
            output_language: None,
            bidirectional: false,
        }
    }

    pub fn key(&self) -> &str {
        &self.query_string_with_dialect
    }
}

/// Results of the last successful query.
///
/// The records are kept exactly as the backend sent them; only the fact
/// that each field is a sequence is checked.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryResult {
    pub entry_groups: Vec<Value>,
    pub similar_recommendations: Vec<Value>,
    pub external_contents: Vec<Value>,
}

impl QueryResult {
    /// Extract the three result sequences from a query payload's `data` field.
    /// Returns `None` if any of them is missing or not an array.
    pub fn from_data(data: &Value) -> Option<Self> {
        let sequence = |field: &str| data.get(field).and_then(Value::as_array).cloned();

        Some(QueryResult {
            entry_groups: sequence("groupedBilingualResults")?,
            similar_recommendations: sequence("similarRecommendations")?,
            external_contents: sequence("externalContents")?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entry_groups.is_empty()
            && self.similar_recommendations.is_empty()
            && self.external_contents.is_empty()
    }
}

/// The `additionalRepresentation` of an opaque dictionary object, or empty
pub fn additional_representation(record: &Value) -> &str {
    record
        .get("additionalRepresentation")
        .and_then(Value::as_str)
        .unwrap_or("")
}

/// The `generalForm` (headword) of an opaque dictionary object
pub fn general_form(record: &Value) -> Option<&str> {
    record
        .get("generalForm")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Parse the body of a dictionary-list response.
///
/// The payload must carry a `status` and a `data` array whose elements are
/// dictionaries with a key. Display fields that are null or of an
/// unexpected shape fall back to their defaults.
pub fn parse_dictionary_list(body: &Value) -> Option<Vec<Dictionary>> {
    body.get("status")?;
    let data = body.get("data")?.as_array()?;
    data.iter()
        .map(|entry| {
            serde_json::from_value::<Dictionary>(entry.clone())
                .ok()
                .filter(|d| !d.key().is_empty())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dictionary_from_camel_case() {
        let dict: Dictionary = serde_json::from_value(json!({
            "queryStringWithDialect": "en-us-de",
            "inputLanguage": {"identifier": "en", "displayName": "English", "dialectIdentifier": "us", "dialectDisplayName": "American"},
            "bidirectional": true
        }))
        .unwrap();
        assert_eq!(dict.key(), "en-us-de");
        assert_eq!(dict.input_language.unwrap().dialect_display_name.as_deref(), Some("American"));
        assert!(dict.output_language.is_none());
    }

    fn language(identifier: &str, dialect: Option<&str>) -> Language {
        Language {
            identifier: identifier.to_string(),
            display_name: "English".to_string(),
            dialect_identifier: dialect.map(String::from),
            dialect_display_name: dialect.map(|_| "American".to_string()),
        }
    }

    #[test]
    fn test_language_display_string() {
        assert_eq!(Language::display_string(None), "");
        assert_eq!(Language::display_string(Some(&language("en", None))), "English");
        assert_eq!(Language::display_string(Some(&language("en", Some("us")))), "English (American)");
    }

    #[test]
    fn test_flag_codes() {
        assert_eq!(Language::flag_code(None), UNKNOWN_FLAG);
        assert_eq!(Language::flag_code(Some(&language("en", None))), "gb");
        assert_eq!(Language::flag_code(Some(&language("en", Some("us")))), "us");
        assert_eq!(Language::flag_code(Some(&language("german", None))), "ge");
        assert_eq!(Language::flag_code(Some(&language("", None))), UNKNOWN_FLAG);
    }

    #[test]
    fn test_record_helpers() {
        let record = json!({"generalForm": "Haus", "additionalRepresentation": "das"});
        assert_eq!(general_form(&record), Some("Haus"));
        assert_eq!(additional_representation(&record), "das");
        assert_eq!(additional_representation(&json!({})), "");
        assert_eq!(general_form(&json!({"generalForm": ""})), None);
    }

    #[test]
    fn test_parse_dictionary_list_requires_status_and_data() {
        assert!(parse_dictionary_list(&json!({"data": []})).is_none());
        assert!(parse_dictionary_list(&json!({"status": "OK"})).is_none());
        assert!(parse_dictionary_list(&json!({"status": "OK", "data": {}})).is_none());
        assert_eq!(parse_dictionary_list(&json!({"status": "OK", "data": []})), Some(vec![]));
    }

    #[test]
    fn test_parse_dictionary_list_rejects_entries_without_key() {
        let body = json!({"status": "OK", "data": [{"queryStringWithDialect": "en-de"}, {"bidirectional": true}]});
        assert!(parse_dictionary_list(&body).is_none());
        let body = json!({"status": "OK", "data": [{"queryStringWithDialect": ""}]});
        assert!(parse_dictionary_list(&body).is_none());
    }

    #[test]
    fn test_parse_dictionary_list_tolerates_null_display_fields() {
        let body = json!({"status": "OK", "data": [
            {
                "queryStringWithDialect": "en-de",
                "inputLanguage": {"identifier": "en", "displayName": null},
                "bidirectional": null
            },
            {"queryStringWithDialect": "de-fr", "inputLanguage": "german", "outputLanguage": null}
        ]});
        let dictionaries = parse_dictionary_list(&body).unwrap();
        assert_eq!(dictionaries.len(), 2);

        let input = dictionaries[0].input_language.as_ref().unwrap();
        assert_eq!(input.identifier, "en");
        assert_eq!(input.display_name, "");
        assert!(!dictionaries[0].bidirectional);

        assert_eq!(dictionaries[1].key(), "de-fr");
        assert!(dictionaries[1].input_language.is_none());
        assert!(dictionaries[1].output_language.is_none());
    }

    #[test]
    fn test_query_result_from_data() {
        let data = json!({
            "groupedBilingualResults": [{"groupIdentifier": "g"}],
            "similarRecommendations": [],
            "externalContents": [{"title": "t"}]
        });
        let result = QueryResult::from_data(&data).unwrap();
        assert_eq!(result.entry_groups.len(), 1);
        assert_eq!(result.external_contents[0]["title"], "t");

        let broken = json!({"groupedBilingualResults": [], "similarRecommendations": "nope", "externalContents": []});
        assert!(QueryResult::from_data(&broken).is_none());
    }
}
