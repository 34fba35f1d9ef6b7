/// Set of entity attribute names to request from the API.
///
/// Field names are deduplicated and kept in insertion order, which makes the
/// encoded parameter deterministic. An empty set means "let the API apply its
/// default projection" and encodes to the empty string, in which case the
/// request builder omits the `fields` parameter entirely.
///
/// Field name spelling is not validated client-side; unknown names are passed
/// through and rejected, if at all, by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields(Vec<String>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field name, ignoring duplicates.
    pub fn add(&mut self, field: impl Into<String>) -> &mut Self {
        let field = field.into();
        if !self.0.contains(&field) {
            self.0.push(field);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Encode the set into the API's comma-separated projection syntax.
    pub fn encode(&self) -> String {
        self.0.join(",")
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Fields {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for field in iter {
            fields.add(field);
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_joins_in_insertion_order() {
        let fields: Fields = ["id", "title", "mean"].into_iter().collect();
        assert_eq!(fields.encode(), "id,title,mean");
    }

    #[test]
    fn test_encode_empty_is_empty_string() {
        assert_eq!(Fields::new().encode(), "");
        assert!(Fields::new().is_empty());
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let fields: Fields = ["id", "title", "id", "title"].into_iter().collect();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.encode(), "id,title");
    }

    #[test]
    fn test_add_chains() {
        let mut fields = Fields::new();
        fields.add("id").add("synopsis");
        assert_eq!(fields.encode(), "id,synopsis");
    }
}
