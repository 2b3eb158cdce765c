// SPDX-License-Identifier: MIT

//! Gallery domain model: the ordered list of admitted image entries.

/// Opaque handle identifying one admitted entry.
///
/// Handles are issued at append time and never reused, so removing one of
/// two otherwise identical entries only affects that instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntryId(u64);

/// One admitted image reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageEntry {
    pub id: EntryId,
    /// User-supplied caption; may be empty.
    pub display_name: String,
    /// URL the image was admitted from. Non-empty; passed the loadability
    /// check at admission time. No claim about continued validity.
    pub source_url: String,
}

/// Ordered gallery state. Insertion order is display order and export order.
///
/// Mutated only through [`append`](GalleryState::append) and
/// [`remove`](GalleryState::remove); exports read a point-in-time
/// [`snapshot`](GalleryState::snapshot) and never see later mutation.
#[derive(Default)]
pub struct GalleryState {
    entries: Vec<ImageEntry>,
    next_id: u64,
}

impl GalleryState {
    /// Add an already validated entry to the end and return its handle.
    pub fn append(&mut self, display_name: String, source_url: String) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        self.entries.push(ImageEntry {
            id,
            display_name,
            source_url,
        });
        id
    }

    /// Remove the entry with the given handle. No-op when absent.
    pub fn remove(&mut self, id: EntryId) {
        self.entries.retain(|entry| entry.id != id);
    }

    /// Current entries in insertion order.
    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    /// Point-in-time copy of the entry list for export.
    pub fn snapshot(&self) -> Vec<ImageEntry> {
        self.entries.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::GalleryState;

    #[test]
    fn append_grows_list_and_preserves_order() {
        let mut gallery = GalleryState::default();
        gallery.append("first".into(), "https://example.com/1.png".into());
        gallery.append("second".into(), "https://example.com/2.png".into());

        assert_eq!(gallery.len(), 2);
        assert_eq!(gallery.entries()[0].display_name, "first");
        assert_eq!(gallery.entries()[1].display_name, "second");
    }

    #[test]
    fn append_issues_distinct_handles() {
        let mut gallery = GalleryState::default();
        let a = gallery.append("a".into(), "https://example.com/a.png".into());
        let b = gallery.append("a".into(), "https://example.com/a.png".into());

        assert_ne!(a, b);
    }

    // Removing one of two identical entries must leave the other in place.
    #[test]
    fn remove_is_per_instance_for_duplicates() {
        let mut gallery = GalleryState::default();
        let first = gallery.append("dup".into(), "https://example.com/dup.png".into());
        gallery.append("dup".into(), "https://example.com/dup.png".into());

        gallery.remove(first);

        assert_eq!(gallery.len(), 1);
        assert_eq!(gallery.entries()[0].display_name, "dup");
    }

    #[test]
    fn remove_of_absent_handle_is_a_noop() {
        let mut gallery = GalleryState::default();
        let id = gallery.append("only".into(), "https://example.com/x.png".into());
        gallery.remove(id);

        gallery.remove(id);

        assert!(gallery.is_empty());
    }

    // An in-flight export must operate on the snapshot it took.
    #[test]
    fn snapshot_is_unaffected_by_later_mutation() {
        let mut gallery = GalleryState::default();
        let id = gallery.append("kept".into(), "https://example.com/kept.png".into());

        let snapshot = gallery.snapshot();
        gallery.remove(id);
        gallery.append("new".into(), "https://example.com/new.png".into());

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].display_name, "kept");
    }
}
