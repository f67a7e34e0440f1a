use indexmap::IndexMap;

/// Anything a [`Store`] can hold.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// In-memory collection keyed by id, listed in insertion order.
///
/// Owned by exactly one resource actor, which is the single writer.
#[derive(Debug, Clone)]
pub struct Store<R> {
    records: IndexMap<String, R>,
}

impl<R> Default for Store<R> {
    fn default() -> Self {
        Self {
            records: IndexMap::new(),
        }
    }
}

impl<R: Keyed + Clone> Store<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from seed records. Later duplicates of an id are dropped.
    pub fn seeded(records: impl IntoIterator<Item = R>) -> Self {
        let mut store = Self::new();
        for record in records {
            if let Err(rejected) = store.insert(record) {
                tracing::warn!(id = %rejected.key(), "Skipping seed record with duplicate id");
            }
        }
        store
    }

    pub fn get(&self, id: &str) -> Option<&R> {
        self.records.get(id)
    }

    /// Appends a record. Hands the record back if its id is already taken.
    pub fn insert(&mut self, record: R) -> Result<(), R> {
        if self.records.contains_key(record.key()) {
            return Err(record);
        }
        self.records.insert(record.key().to_string(), record);
        Ok(())
    }

    /// Overwrites the record stored under `record`'s id, keeping its position.
    /// Returns the previous record, or `None` (and stores nothing) if absent.
    pub fn replace(&mut self, record: R) -> Option<R> {
        let slot = self.records.get_mut(record.key())?;
        Some(std::mem::replace(slot, record))
    }

    pub fn remove(&mut self, id: &str) -> Option<R> {
        self.records.shift_remove(id)
    }

    pub fn list_all(&self) -> Vec<R> {
        self.records.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: String,
        value: u32,
    }

    impl Keyed for Item {
        fn key(&self) -> &str {
            &self.id
        }
    }

    fn item(id: &str, value: u32) -> Item {
        Item {
            id: id.to_string(),
            value,
        }
    }

    #[test]
    fn test_basic_operations() {
        let mut store = Store::new();
        store.insert(item("a", 1)).unwrap();
        store.insert(item("b", 2)).unwrap();

        assert_eq!(store.get("a"), Some(&item("a", 1)));
        assert_eq!(store.len(), 2);

        // Duplicate ids are rejected
        let rejected = store.insert(item("a", 9)).unwrap_err();
        assert_eq!(rejected.value, 9);
        assert_eq!(store.get("a").unwrap().value, 1);

        assert_eq!(store.replace(item("a", 3)), Some(item("a", 1)));
        assert_eq!(store.replace(item("zzz", 3)), None);
        assert!(store.get("zzz").is_none());

        assert_eq!(store.remove("a"), Some(item("a", 3)));
        assert_eq!(store.remove("a"), None);
        assert_eq!(store.list_all(), vec![item("b", 2)]);
    }

    #[test]
    fn test_listing_keeps_insertion_order() {
        let mut store = Store::seeded(vec![item("c", 1), item("a", 2), item("b", 3), item("a", 4)]);
        assert_eq!(store.len(), 3);

        store.replace(item("a", 5));
        store.remove("c");
        store.insert(item("d", 6)).unwrap();

        let ids: Vec<String> = store.list_all().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["a", "b", "d"]);
    }
}
