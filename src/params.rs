//! Initial query parameters, read from a page URL or the command line

use reqwest::Url;

use crate::constants::{PARAM_DICTIONARIES, PARAM_QUERY_STRING};

/// Parameters consumed once the dictionary list is known
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryParameters {
    pub query_string: Option<String>,
    /// Comma-separated dictionary keys, e.g. `en-de,de-fr`
    pub dictionaries: Option<String>,
}

impl QueryParameters {
    /// Read `queryString` and `dictionaries` from the query part of a URL,
    /// or from the query inside a `#/route?...` fragment for hash routing.
    /// `+` decodes to a space as in form encoding. The fragment wins.
    pub fn from_url(url: &str) -> anyhow::Result<Self> {
        let url = Url::parse(url)?;
        let mut params = QueryParameters::default();
        params.read_pairs(&url);

        if let Some((_, fragment_query)) = url.fragment().and_then(|f| f.split_once('?')) {
            let mut fragment_url = url.clone();
            fragment_url.set_fragment(None);
            fragment_url.set_query(Some(fragment_query));
            params.read_pairs(&fragment_url);
        }
        Ok(params)
    }

    fn read_pairs(&mut self, url: &Url) {
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                PARAM_QUERY_STRING => self.query_string = Some(value.into_owned()),
                PARAM_DICTIONARIES => self.dictionaries = Some(value.into_owned()),
                _ => {}
            }
        }
    }

    /// Values given explicitly take precedence over the ones already present
    pub fn with_overrides(mut self, query: Option<String>, dictionaries: Option<String>) -> Self {
        if query.is_some() {
            self.query_string = query;
        }
        if dictionaries.is_some() {
            self.dictionaries = dictionaries;
        }
        self
    }
}

/// Reverse the hyphen-separated segments of a dictionary key (`de-en` -> `en-de`)
pub fn reverse_key(key: &str) -> String {
    key.split('-').rev().collect::<Vec<_>>().join("-")
}
