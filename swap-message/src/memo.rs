/// Single-entry cache that recomputes only when its key changes.
#[derive(Debug, Clone)]
pub struct Memo<K, V> {
    entry: Option<(K, V)>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self { entry: None }
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    pub fn get(&self, key: &K) -> Option<&V> {
        match &self.entry {
            Some((k, v)) if k == key => Some(v),
            _ => None,
        }
    }

    pub fn set(&mut self, key: K, value: V) -> &V {
        &self.entry.insert((key, value)).1
    }

    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce(&K) -> V) -> &V {
        if self.get(&key).is_none() {
            self.entry = None;
        }
        &self
            .entry
            .get_or_insert_with(|| {
                let value = compute(&key);
                (key, value)
            })
            .1
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}
