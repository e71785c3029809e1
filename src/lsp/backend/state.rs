use super::*;

// Open documents by URI, holding the client's full text including
// unsaved edits.
#[derive(Default)]
pub(super) struct Documents {
    inner: RwLock<HashMap<Url, String>>,
}

impl Documents {
    pub(super) async fn insert(&self, uri: Url, text: String) {
        self.inner.write().await.insert(uri, text);
    }

    pub(super) async fn remove(&self, uri: &Url) {
        self.inner.write().await.remove(uri);
    }

    pub(super) async fn get(&self, uri: &Url) -> Option<String> {
        self.inner.read().await.get(uri).cloned()
    }
}
