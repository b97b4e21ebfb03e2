//! Input-file registry and identifiers.

use std::collections::HashMap;

use crate::core::host::ScrollPosition;
use crate::core::stream::StreamFlags;

/// Name that stands for standard input.
pub const STDIN_NAME: &str = "-";

/// Placeholder name for an entry that has no data behind it.
pub const EMPTY_FILE_NAME: &str = "@/\\examine/\\empty/\\file/\\@";

/// Stable identifier for an input file known to one [`IFileRegistry`].
///
/// Semantics:
/// - IDs are unique within a registry.
/// - IDs are never reused for the lifetime of the registry, so a stale ID simply stops
///   resolving once its entry is gone.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct IFileId(u64);

impl IFileId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
struct IFileEntry {
    filename: String,
    key: String,
    position: Option<ScrollPosition>,
    opened: bool,
    flags: StreamFlags,
    /// 1-based position in the list; 0 once unlinked.
    index: usize,
    holds: usize,
}

impl IFileEntry {
    fn is_linked(&self) -> bool {
        self.index > 0
    }
}

/// Ordered, de-duplicated list of input files.
///
/// Deleting an entry unlinks it from the order at once. A held entry stays readable as a
/// tombstone until its last hold is released.
#[derive(Debug, Default)]
pub struct IFileRegistry {
    entries: Vec<Option<IFileEntry>>,
    order: Vec<IFileId>,
    by_key: HashMap<String, IFileId>,
}

impl IFileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `name`, registering it directly after `after` (or at the end) when unknown.
    pub fn resolve_or_create(&mut self, name: &str, after: Option<IFileId>) -> IFileId {
        let key = resolve_name(name);
        if let Some(&id) = self.by_key.get(&key) {
            return id;
        }

        let id = IFileId(self.entries.len() as u64);
        let slot = match after.and_then(|after| self.index_of(after)) {
            Some(index) => index,
            None => self.order.len(),
        };
        self.entries.push(Some(IFileEntry {
            filename: name.to_string(),
            key: key.clone(),
            position: None,
            opened: false,
            flags: StreamFlags::empty(),
            index: 0,
            holds: 0,
        }));
        self.order.insert(slot, id);
        self.by_key.insert(key, id);
        self.renumber_from(slot);
        tracing::trace!(id = id.raw(), name, index = slot + 1, "registered input file");
        id
    }

    pub fn find(&self, name: &str) -> Option<IFileId> {
        self.by_key.get(&resolve_name(name)).copied()
    }

    /// Remove `id` from the list. Returns `false` when it was not listed.
    pub fn delete(&mut self, id: IFileId) -> bool {
        let Some(entry) = self.entry(id) else {
            return false;
        };
        if !entry.is_linked() {
            return false;
        }
        let slot = entry.index - 1;
        let key = entry.key.clone();
        let holds = entry.holds;

        self.order.remove(slot);
        self.by_key.remove(&key);
        self.renumber_from(slot);
        if let Some(entry) = self.entry_mut(id) {
            entry.index = 0;
        }
        if holds == 0 {
            self.free(id);
        }
        tracing::debug!(id = id.raw(), holds, "deleted input file");
        true
    }

    pub fn hold(&mut self, id: IFileId) {
        if let Some(entry) = self.entry_mut(id) {
            entry.holds += 1;
        }
    }

    pub fn release(&mut self, id: IFileId) {
        let Some(entry) = self.entry_mut(id) else {
            return;
        };
        entry.holds = entry.holds.saturating_sub(1);
        if entry.holds == 0 && !entry.is_linked() {
            self.free(id);
        }
    }

    pub fn hold_count(&self, id: IFileId) -> usize {
        self.entry(id).map_or(0, |entry| entry.holds)
    }

    /// Entry after `id`, or the first entry when `id` is `None`.
    pub fn next(&self, id: Option<IFileId>) -> Option<IFileId> {
        match id {
            None => self.order.first().copied(),
            Some(id) => {
                let index = self.index_of(id)?;
                self.order.get(index).copied()
            }
        }
    }

    /// Entry before `id`, or the last entry when `id` is `None`.
    pub fn prev(&self, id: Option<IFileId>) -> Option<IFileId> {
        match id {
            None => self.order.last().copied(),
            Some(id) => {
                let index = self.index_of(id)?;
                index
                    .checked_sub(2)
                    .and_then(|slot| self.order.get(slot))
                    .copied()
            }
        }
    }

    /// 1-based list position, `None` for unknown or deleted entries.
    pub fn index_of(&self, id: IFileId) -> Option<usize> {
        self.entry(id)
            .filter(|entry| entry.is_linked())
            .map(|entry| entry.index)
    }

    pub fn filename(&self, id: IFileId) -> Option<&str> {
        self.entry(id).map(|entry| entry.filename.as_str())
    }

    pub fn position(&self, id: IFileId) -> Option<ScrollPosition> {
        self.entry(id).and_then(|entry| entry.position)
    }

    pub fn store_position(&mut self, id: IFileId, position: ScrollPosition) {
        if let Some(entry) = self.entry_mut(id) {
            entry.position = Some(position);
        }
    }

    pub fn is_opened(&self, id: IFileId) -> bool {
        self.entry(id).is_some_and(|entry| entry.opened)
    }

    pub fn set_opened(&mut self, id: IFileId) {
        if let Some(entry) = self.entry_mut(id) {
            entry.opened = true;
        }
    }

    /// Stream flags recorded when the entry was last opened.
    pub fn flags(&self, id: IFileId) -> StreamFlags {
        self.entry(id).map_or(StreamFlags::empty(), |entry| entry.flags)
    }

    pub fn set_flags(&mut self, id: IFileId, flags: StreamFlags) {
        if let Some(entry) = self.entry_mut(id) {
            entry.flags = flags;
        }
    }

    /// Whether `id` still has a slot, listed or tombstoned.
    pub fn contains(&self, id: IFileId) -> bool {
        self.entry(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Listed entries in order.
    pub fn iter(&self) -> impl Iterator<Item = IFileId> + '_ {
        self.order.iter().copied()
    }

    fn renumber_from(&mut self, slot: usize) {
        for position in slot..self.order.len() {
            let id = self.order[position];
            if let Some(entry) = self.entry_mut(id) {
                entry.index = position + 1;
            }
        }
    }

    fn free(&mut self, id: IFileId) {
        if let Some(slot) = self.slot_mut(id) {
            *slot = None;
        }
    }

    fn entry(&self, id: IFileId) -> Option<&IFileEntry> {
        let idx: usize = id.raw().try_into().ok()?;
        self.entries.get(idx).and_then(|entry| entry.as_ref())
    }

    fn entry_mut(&mut self, id: IFileId) -> Option<&mut IFileEntry> {
        self.slot_mut(id).and_then(|entry| entry.as_mut())
    }

    fn slot_mut(&mut self, id: IFileId) -> Option<&mut Option<IFileEntry>> {
        let idx: usize = id.raw().try_into().ok()?;
        self.entries.get_mut(idx)
    }
}

/// Key under which `name` is registered.
///
/// Standard input and the empty placeholder are their own keys; a file that exists is keyed by
/// its canonical path so that different spellings share one entry.
pub fn resolve_name(name: &str) -> String {
    if name == STDIN_NAME || name == EMPTY_FILE_NAME {
        return name.to_string();
    }
    match std::fs::canonicalize(name) {
        Ok(path) => path.to_string_lossy().into_owned(),
        Err(_) => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{IFileRegistry, STDIN_NAME};
    use crate::core::host::ScrollPosition;

    fn names(registry: &IFileRegistry) -> Vec<String> {
        registry
            .iter()
            .map(|id| registry.filename(id).unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn lookup_is_idempotent() {
        let mut registry = IFileRegistry::new();
        let first = registry.resolve_or_create("missing-a", None);
        let again = registry.resolve_or_create("missing-a", None);
        assert_eq!(first, again);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.find("missing-a"), Some(first));
    }

    #[test]
    fn different_spellings_of_one_path_share_an_entry() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "a").expect("file should be written");
        let dotted = dir.path().join(".").join("a.txt");

        let mut registry = IFileRegistry::new();
        let plain = registry.resolve_or_create(&path.display().to_string(), None);
        let other = registry.resolve_or_create(&dotted.display().to_string(), None);
        assert_eq!(plain, other);
    }

    #[test]
    fn new_entries_go_after_the_anchor_and_renumber() {
        let mut registry = IFileRegistry::new();
        let a = registry.resolve_or_create("a", None);
        let c = registry.resolve_or_create("c", None);
        let b = registry.resolve_or_create("b", Some(a));

        assert_eq!(names(&registry), vec!["a", "b", "c"]);
        assert_eq!(registry.index_of(a), Some(1));
        assert_eq!(registry.index_of(b), Some(2));
        assert_eq!(registry.index_of(c), Some(3));
    }

    #[test]
    fn traversal_from_none_starts_at_the_ends() {
        let mut registry = IFileRegistry::new();
        let a = registry.resolve_or_create("a", None);
        let b = registry.resolve_or_create("b", None);

        assert_eq!(registry.next(None), Some(a));
        assert_eq!(registry.next(Some(a)), Some(b));
        assert_eq!(registry.next(Some(b)), None);
        assert_eq!(registry.prev(None), Some(b));
        assert_eq!(registry.prev(Some(b)), Some(a));
        assert_eq!(registry.prev(Some(a)), None);
    }

    #[test]
    fn deleting_unheld_entry_frees_it() {
        let mut registry = IFileRegistry::new();
        let a = registry.resolve_or_create("a", None);
        let b = registry.resolve_or_create("b", None);

        assert!(registry.delete(a));
        assert!(!registry.contains(a));
        assert_eq!(registry.index_of(b), Some(1));
        assert!(!registry.delete(a));
    }

    #[test]
    fn held_entry_survives_delete_until_released() {
        let mut registry = IFileRegistry::new();
        let a = registry.resolve_or_create("a", None);
        registry.store_position(a, ScrollPosition { offset: 10, line: 1 });
        registry.hold(a);

        assert!(registry.delete(a));
        assert!(registry.contains(a));
        assert_eq!(registry.index_of(a), None);
        assert_eq!(registry.next(Some(a)), None);
        assert_eq!(registry.filename(a), Some("a"));
        assert!(registry.find("a").is_none());

        registry.release(a);
        assert!(!registry.contains(a));
    }

    #[test]
    fn re_registering_deleted_name_gets_a_fresh_id() {
        let mut registry = IFileRegistry::new();
        let old = registry.resolve_or_create(STDIN_NAME, None);
        registry.delete(old);
        let new = registry.resolve_or_create(STDIN_NAME, None);
        assert_ne!(old, new);
        assert!(!registry.is_opened(new));
    }
}
