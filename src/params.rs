//! Request parameters shared by every endpoint: the pagination window and
//! the `_expand`/`_filter` relation-name lists.

use url::Url;

/// Builder for the query parameters of one API call.
///
/// Every request also carries the API's baseline parameters (`_expand`,
/// `_shorturis`, `_verbosity=1`); expansion and filter lists are
/// comma-joined, and the commas are sent unescaped because that is what the
/// server expects.
#[derive(Clone, Default)]
pub struct ApiParams {
    /// Relation names to expand in the same response envelope.
    pub expand: Vec<String>,
    /// Field names to restrict the primary payload to.
    pub filter: Vec<String>,
    /// 1-based offset of the first item for collection endpoints.
    pub start: Option<i64>,
    /// Number of items requested for collection endpoints.
    pub count: Option<i64>,
}

impl ApiParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests expansion of a relation name (e.g. "AlbumImages").
    pub fn with_expand(mut self, relation: &str) -> Self {
        self.expand.push(relation.to_string());
        self
    }

    pub fn with_expands(mut self, relations: &[String]) -> Self {
        self.expand.extend_from_slice(relations);
        self
    }

    /// Restricts the primary payload to the named fields.
    pub fn with_filter(mut self, field: &str) -> Self {
        self.filter.push(field.to_string());
        self
    }

    pub fn with_filters(mut self, fields: &[String]) -> Self {
        self.filter.extend_from_slice(fields);
        self
    }

    /// Sets the pagination window for collection endpoints.
    pub fn with_pagination(mut self, start: i64, count: i64) -> Self {
        self.start = Some(start);
        self.count = Some(count);
        self
    }

    /// Appends this call's parameters to the given URL, returning the
    /// modified URL.
    pub(crate) fn add_to_url(&self, url: &Url, pretty: bool) -> Url {
        let mut url = url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("_expand", &self.expand.join(","));
            pairs.append_pair("_shorturis", "");
            pairs.append_pair("_verbosity", "1");
            if pretty {
                pairs.append_pair("_pretty", "");
            }
            if !self.filter.is_empty() {
                pairs.append_pair("_filter", &self.filter.join(","));
            }
            if let Some(start) = self.start {
                pairs.append_pair("start", &start.to_string());
            }
            if let Some(count) = self.count {
                pairs.append_pair("count", &count.to_string());
            }
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://api.smugmug.com/api/v2/album/kQ3t8P").unwrap()
    }

    #[test]
    fn default_params_carry_the_baseline() {
        let url = ApiParams::default().add_to_url(&base(), false);
        assert_eq!(
            url.query(),
            Some("_expand=&_shorturis=&_verbosity=1")
        );
    }

    #[test]
    fn pretty_adds_the_pretty_flag() {
        let url = ApiParams::default().add_to_url(&base(), true);
        assert_eq!(
            url.query(),
            Some("_expand=&_shorturis=&_verbosity=1&_pretty=")
        );
    }

    #[test]
    fn expansions_are_comma_joined() {
        let url = ApiParams::new()
            .with_expand("AlbumImages")
            .with_expand("Node")
            .add_to_url(&base(), false);
        // url escapes the comma; the client unescapes it before sending.
        assert_eq!(
            url.query(),
            Some("_expand=AlbumImages%2CNode&_shorturis=&_verbosity=1")
        );
    }

    #[test]
    fn pagination_and_filters_round_out_the_query() {
        let url = ApiParams::new()
            .with_filter("Name")
            .with_filters(&["Title".to_string()])
            .with_pagination(3, 22)
            .add_to_url(&base(), false);
        assert_eq!(
            url.query(),
            Some("_expand=&_shorturis=&_verbosity=1&_filter=Name%2CTitle&start=3&count=22")
        );
    }
}
