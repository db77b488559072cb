//! Gallery: artwork records, the HTTP client and the local ordered list

pub mod client;
pub mod url;

pub use client::GalleryClient;

use serde::{Deserialize, Serialize};

/// A stored image as described by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: i64,
    pub filename: String,
    pub width: u32,
    pub height: u32,
    pub created_at: String,
    #[serde(default)]
    pub url: String,
}

/// Local copy of the store's list, most recently saved first
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    items: Vec<Artwork>,
    /// A list request is in flight
    pub loading: bool,
    /// A save request is in flight
    pub saving: bool,
}

impl Gallery {
    pub fn items(&self) -> &[Artwork] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Artwork> {
        self.items.iter().find(|a| a.id == id)
    }

    pub fn replace(&mut self, items: Vec<Artwork>) {
        self.items = items;
    }

    pub fn prepend(&mut self, art: Artwork) {
        self.items.insert(0, art);
    }

    /// Drop every record with `id`, keeping the rest in order
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|a| a.id != id);
        self.items.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn art(id: i64) -> Artwork {
        Artwork {
            id,
            filename: format!("art_{id}.png"),
            width: 16,
            height: 16,
            created_at: "2024-01-01T00:00:00".into(),
            url: format!("/api/art/{id}"),
        }
    }

    #[test]
    fn remove_preserves_order() {
        let mut g = Gallery::default();
        g.replace(vec![art(4), art(3), art(2), art(1)]);
        assert!(g.remove(3));
        let ids: Vec<_> = g.items().iter().map(|a| a.id).collect();
        assert_eq!(ids, [4, 2, 1]);
        assert!(!g.remove(3));
    }

    #[test]
    fn prepend_puts_newest_first() {
        let mut g = Gallery::default();
        g.prepend(art(1));
        g.prepend(art(2));
        assert_eq!(g.items()[0].id, 2);
    }

    #[test]
    fn artwork_without_url_deserializes() {
        let a: Artwork = serde_json::from_str(
            r#"{"id":1,"filename":"a.png","width":4,"height":4,"created_at":"t"}"#,
        )
        .unwrap();
        assert!(a.url.is_empty());
    }
}
