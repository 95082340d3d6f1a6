#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    fields: Vec<(String, String)>,
}

impl Section {
    #[must_use]
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            fields: Vec::with_capacity(16),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in the order their keys first appeared.
    #[must_use]
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    // The last assignment to a key wins but keeps the key's original position. The scan is
    // linear per insert, which is fine for sections of a few dozen keys.
    pub(crate) fn insert(&mut self, key: String, value: String) {
        if let Some(slot) = self.fields.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.fields.push((key, value));
        }
    }
}
