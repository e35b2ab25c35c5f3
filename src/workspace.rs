/// The entry collection, its frames and the selection as one owned aggregate
use log::{debug, info, warn};

use crate::Result;
use crate::entry::{Entry, EntryId, Frame, FrameHandle, FrameState};
use crate::error::DockError;
use crate::notify::Notification;
use crate::selection::{Direction, Selection};
use crate::storage::Snapshot;
use crate::title::{derive_title, parse_address};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Visible,
    Enabled,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Load(String),
    Remove(Vec<EntryId>),
    RemoveSelected,
    RemoveAt(usize),
    Reorder { index: usize, direction: Direction },
    SetFlag { index: usize, flag: Flag, value: bool },
    ToggleFlag { index: usize, flag: Flag },
    FrameLoadFailed { id: EntryId, handle: FrameHandle },
    Select { index: usize, multi: bool },
    Navigate { direction: Direction, extend: bool },
    SelectAll,
}

/// Work for the driver, in the order it must be applied
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    CreateFrame {
        id: EntryId,
        handle: FrameHandle,
        address: String,
        visible: bool,
    },
    DestroyFrame(EntryId),
    ShowFrame { id: EntryId, visible: bool },
    /// Clear the active marker on every frame, then set it on this one
    Activate(Option<EntryId>),
    Persist,
    Notify(Notification),
}

/// Queues frame, persistence and notification work as [`Effect`]s;
/// a frame is only promoted to active when no entry is active.
#[derive(Debug, Clone)]
pub struct Workspace {
    entries: Vec<Entry>,
    selection: Selection,
    next_id: EntryId,
    next_frame: u64,
    effects: Vec<Effect>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    pub fn new() -> Self {
        Workspace {
            entries: Vec::new(),
            selection: Selection::new(),
            next_id: 1,
            next_frame: 1,
            effects: Vec::new(),
        }
    }

    /// Rebuild from a saved snapshot and queue frames for every enabled entry
    pub fn restore(snapshot: Snapshot) -> Self {
        let next_id = snapshot.safe_next_id();
        let mut workspace = Workspace {
            entries: snapshot.entries.into_iter().map(Entry::from_record).collect(),
            next_id,
            ..Self::new()
        };

        for index in 0..workspace.entries.len() {
            if workspace.entries[index].enabled {
                workspace.create_frame(index);
            }
        }

        info!("Restored {} apps", workspace.entries.len());
        workspace
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.entries.iter().map(Entry::record).collect(),
            self.next_id,
        )
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn next_id(&self) -> EntryId {
        self.next_id
    }

    pub fn active(&self) -> Option<&Entry> {
        self.entries.iter().find(|e| e.is_active())
    }

    pub fn active_id(&self) -> Option<EntryId> {
        self.active().map(|e| e.id)
    }

    pub fn frame_state(&self, id: EntryId) -> Option<FrameState> {
        self.entry(id).map(Entry::frame_state)
    }

    /// Drain effects queued by the typed methods
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Apply one action and return the effects it produced
    pub fn update(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Load(address) => {
                if let Err(e) = self.add(&address) {
                    self.reject(&e);
                }
            }
            Action::Remove(ids) => self.remove(&ids),
            Action::RemoveSelected => self.remove_selected(),
            Action::RemoveAt(index) => self.remove_at(index),
            Action::Reorder { index, direction } => self.reorder(index, direction),
            Action::SetFlag { index, flag, value } => self.set_flag(index, flag, value),
            Action::ToggleFlag { index, flag } => self.toggle_flag(index, flag),
            Action::FrameLoadFailed { id, handle } => self.frame_load_failed(id, handle),
            Action::Select { index, multi } => self.select(index, multi),
            Action::Navigate { direction, extend } => self.navigate(direction, extend),
            Action::SelectAll => self.select_all(),
        }
        self.take_effects()
    }

    fn reject(&mut self, err: &DockError) {
        debug!("Rejected: {}", err);
        if let Some(notification) = Notification::for_error(err) {
            self.effects.push(Effect::Notify(notification));
        }
    }

    /// Append a new entry for `address` and create its frame
    pub fn add(&mut self, address: &str) -> Result<EntryId> {
        let address = address.trim();
        if address.is_empty() {
            return Err(DockError::InvalidAddress(String::new()));
        }
        parse_address(address)?;
        if self.entries.iter().any(|e| e.address == address) {
            return Err(DockError::DuplicateAddress(address.to_string()));
        }

        let id = self.next_id;
        self.next_id += 1;

        let entry = Entry::new(id, address.to_string(), derive_title(address));
        let title = entry.title.clone();
        info!("Loaded app {} ({})", title, address);

        self.entries.push(entry);
        self.create_frame(self.entries.len() - 1);
        self.effects.push(Effect::Persist);
        self.effects
            .push(Effect::Notify(Notification::success(format!("Loaded: {}", title))));

        Ok(id)
    }

    /// Remove every entry whose id is in `ids`, destroying frames first
    pub fn remove(&mut self, ids: &[EntryId]) {
        let removed: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| ids.contains(&e.id))
            .map(|(index, _)| index)
            .collect();

        if removed.is_empty() {
            debug!("Nothing to remove for {:?}", ids);
            return;
        }

        for &index in &removed {
            self.destroy_frame(index);
        }

        let titles: Vec<String> = removed
            .iter()
            .map(|&index| self.entries[index].title.clone())
            .collect();

        self.entries.retain(|e| !ids.contains(&e.id));
        self.selection.remap_removed(&removed);

        info!("Removed {} apps", titles.len());
        self.effects.push(Effect::Persist);
        self.effects
            .push(Effect::Notify(Notification::deleted(&titles)));
    }

    pub fn remove_selected(&mut self) {
        if self.selection.is_empty() {
            self.effects.push(Effect::Notify(Notification::warning(
                "Please select app(s) to delete",
            )));
            return;
        }

        let ids: Vec<EntryId> = self
            .selection
            .indices()
            .iter()
            .filter_map(|&index| self.entries.get(index))
            .map(|e| e.id)
            .collect();
        self.remove(&ids);
    }

    pub fn remove_at(&mut self, index: usize) {
        if let Some(id) = self.entries.get(index).map(|e| e.id) {
            self.remove(&[id]);
        }
    }

    /// Swap the entry at `index` with its neighbour, if that stays in bounds
    pub fn reorder(&mut self, index: usize, direction: Direction) {
        let Some(other) = index.checked_add_signed(direction.step()) else {
            return;
        };
        if index >= self.entries.len() || other >= self.entries.len() {
            return;
        }

        self.entries.swap(index, other);
        self.selection.remap_swapped(index, other);
        self.effects.push(Effect::Persist);
    }

    pub fn set_flag(&mut self, index: usize, flag: Flag, value: bool) {
        let Some(entry) = self.entries.get_mut(index) else {
            debug!("No app at position {}", index);
            return;
        };

        let current = match flag {
            Flag::Visible => &mut entry.visible,
            Flag::Enabled => &mut entry.enabled,
        };
        if *current == value {
            return;
        }
        *current = value;

        match (flag, value) {
            (Flag::Enabled, true) => self.on_enabled(index),
            (Flag::Enabled, false) => self.on_disabled(index),
            (Flag::Visible, true) => self.on_shown(index),
            (Flag::Visible, false) => self.on_hidden(index),
        }
        self.effects.push(Effect::Persist);
    }

    pub fn toggle_flag(&mut self, index: usize, flag: Flag) {
        let Some(entry) = self.entries.get(index) else {
            return;
        };
        let value = match flag {
            Flag::Visible => !entry.visible,
            Flag::Enabled => !entry.enabled,
        };
        self.set_flag(index, flag, value);
    }

    /// A frame reported a load error; stale reports are ignored
    pub fn frame_load_failed(&mut self, id: EntryId, handle: FrameHandle) {
        let Some(index) = self.position(id) else {
            debug!("Load failure for removed app {}", id);
            return;
        };
        if self.entries[index].frame.map(|f| f.handle) != Some(handle) {
            debug!("Load failure for replaced frame {:?} of app {}", handle, id);
            return;
        }

        let title = self.entries[index].title.clone();
        warn!("{}", DockError::FrameLoadFailed(id));

        self.set_flag(index, Flag::Enabled, false);
        self.effects.push(Effect::Notify(Notification::error(format!(
            "Failed to load: {}",
            title
        ))));
    }

    fn on_enabled(&mut self, index: usize) {
        if !self.entries[index].has_frame() {
            self.create_frame(index);
        } else {
            self.promote_if_idle(index);
        }
    }

    fn on_disabled(&mut self, index: usize) {
        let was_active = self.entries[index].is_active();
        let id = self.entries[index].id;
        self.destroy_frame(index);
        if was_active {
            self.promote_next(id);
        }
    }

    fn on_shown(&mut self, index: usize) {
        let entry = &self.entries[index];
        if !entry.enabled {
            return;
        }
        if entry.has_frame() {
            self.effects.push(Effect::ShowFrame {
                id: entry.id,
                visible: true,
            });
            self.promote_if_idle(index);
        } else {
            self.create_frame(index);
        }
    }

    fn on_hidden(&mut self, index: usize) {
        let entry = &self.entries[index];
        if !entry.has_frame() {
            return;
        }
        let (id, was_active) = (entry.id, entry.is_active());
        self.effects.push(Effect::ShowFrame { id, visible: false });
        if was_active {
            self.promote_next(id);
        }
    }

    fn create_frame(&mut self, index: usize) {
        let handle = FrameHandle(self.next_frame);
        self.next_frame += 1;

        let entry = &mut self.entries[index];
        entry.frame = Some(Frame::new(handle));
        debug!("Creating frame {:?} for {}", handle, entry.address);

        self.effects.push(Effect::CreateFrame {
            id: entry.id,
            handle,
            address: entry.address.clone(),
            visible: entry.visible,
        });
        self.promote_if_idle(index);
    }

    fn destroy_frame(&mut self, index: usize) {
        let entry = &mut self.entries[index];
        if entry.frame.take().is_some() {
            debug!("Destroying frame for {}", entry.address);
            self.effects.push(Effect::DestroyFrame(entry.id));
        }
    }

    fn promote_if_idle(&mut self, index: usize) {
        if self.active().is_none() && self.entries[index].can_be_active() {
            self.activate(index);
        }
    }

    /// Hand active status to the first eligible entry other than `excluded`
    fn promote_next(&mut self, excluded: EntryId) {
        let next = self
            .entries
            .iter()
            .position(|e| e.id != excluded && e.can_be_active());
        match next {
            Some(index) => {
                self.activate(index);
            }
            None => self.clear_active(),
        }
    }

    /// Make the entry at `index` the single active frame, if it is eligible
    fn activate(&mut self, index: usize) -> bool {
        let entry = &self.entries[index];
        if !entry.can_be_active() {
            return false;
        }
        if entry.is_active() {
            return true;
        }

        let id = entry.id;
        for frame in self.entries.iter_mut().filter_map(|e| e.frame.as_mut()) {
            frame.active = false;
        }
        if let Some(frame) = self.entries[index].frame.as_mut() {
            frame.active = true;
        }

        debug!("Active app is now {}", id);
        self.effects.push(Effect::Activate(Some(id)));
        true
    }

    fn clear_active(&mut self) {
        for frame in self.entries.iter_mut().filter_map(|e| e.frame.as_mut()) {
            frame.active = false;
        }
        debug!("No active app");
        self.effects.push(Effect::Activate(None));
    }

    /// Click on a row; the last selected entry becomes active when eligible
    pub fn select(&mut self, index: usize, multi: bool) {
        if index >= self.entries.len() {
            return;
        }
        self.selection.toggle(index, multi);
        if let Some(last) = self.selection.last() {
            self.activate(last);
        }
    }

    /// Keyboard navigation; `extend` grows a range from the lowest selected row
    pub fn navigate(&mut self, direction: Direction, extend: bool) {
        let Some(anchor) = self.selection.next_anchor(self.entries.len(), direction) else {
            return;
        };
        match self.selection.min() {
            Some(start) if extend => self.selection.select_range(start, anchor),
            _ => self.select(anchor, false),
        }
    }

    pub fn select_all(&mut self) {
        self.selection.select_all(self.entries.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryRecord;
    use crate::notify::Level;

    fn create_test_workspace(addresses: &[&str]) -> Workspace {
        let mut workspace = Workspace::new();
        for address in addresses {
            workspace.add(address).unwrap();
        }
        workspace.take_effects();
        workspace
    }

    fn abc() -> Workspace {
        create_test_workspace(&["https://a.test/a", "https://b.test/b", "https://c.test/c"])
    }

    fn notifications(effects: &[Effect]) -> Vec<&Notification> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Notify(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    fn active_count(workspace: &Workspace) -> usize {
        workspace.entries().iter().filter(|e| e.is_active()).count()
    }

    #[test]
    fn test_add_effects() {
        let mut workspace = Workspace::new();

        let effects = workspace.update(Action::Load("  https://example.com/profile ".to_string()));

        assert_eq!(
            effects,
            vec![
                Effect::CreateFrame {
                    id: 1,
                    handle: FrameHandle(1),
                    address: "https://example.com/profile".to_string(),
                    visible: true,
                },
                Effect::Activate(Some(1)),
                Effect::Persist,
                Effect::Notify(Notification::success("Loaded: profile")),
            ]
        );
        assert_eq!(workspace.entries()[0].title, "profile");
        assert_eq!(workspace.frame_state(1), Some(FrameState::FrameActive));
    }

    #[test]
    fn test_add_second_does_not_steal_active() {
        let workspace = create_test_workspace(&["https://a.test", "https://b.test"]);

        assert_eq!(workspace.active_id(), Some(1));
        assert_eq!(workspace.frame_state(2), Some(FrameState::FrameVisibleInactive));
    }

    #[test]
    fn test_add_invalid_address() {
        let mut workspace = abc();

        let effects = workspace.update(Action::Load("not a url".to_string()));

        assert_eq!(effects, vec![Effect::Notify(Notification::error("Please enter a valid URL"))]);
        assert_eq!(workspace.len(), 3);
        assert_eq!(workspace.next_id(), 4);
    }

    #[test]
    fn test_add_empty_address() {
        let mut workspace = Workspace::new();

        assert_eq!(workspace.add("   "), Err(DockError::InvalidAddress(String::new())));
        let effects = workspace.update(Action::Load(String::new()));
        assert_eq!(notifications(&effects)[0].message, "Please enter a URL");
    }

    #[test]
    fn test_add_duplicate_address() {
        let mut workspace = abc();

        assert_eq!(
            workspace.add("https://b.test/b"),
            Err(DockError::DuplicateAddress("https://b.test/b".to_string()))
        );
        assert!(workspace.take_effects().is_empty());
        assert_eq!(workspace.len(), 3);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut workspace = abc();
        workspace.remove(&[3]);

        let id = workspace.add("https://d.test").unwrap();

        assert_eq!(id, 4);
    }

    #[test]
    fn test_disable_active_promotes_next_and_reenable_does_not_retake() {
        let mut workspace = abc();
        assert_eq!(workspace.active_id(), Some(1));

        let effects = workspace.update(Action::SetFlag {
            index: 0,
            flag: Flag::Enabled,
            value: false,
        });
        assert_eq!(
            effects,
            vec![Effect::DestroyFrame(1), Effect::Activate(Some(2)), Effect::Persist]
        );
        assert_eq!(workspace.active_id(), Some(2));
        assert_eq!(workspace.frame_state(1), Some(FrameState::NoFrame));

        workspace.set_flag(0, Flag::Enabled, true);
        assert_eq!(workspace.active_id(), Some(2));
        assert_eq!(workspace.frame_state(1), Some(FrameState::FrameVisibleInactive));
    }

    #[test]
    fn test_reenable_creates_fresh_frame() {
        let mut workspace = abc();
        let before = workspace.entries()[1].frame().unwrap().handle;

        workspace.toggle_flag(1, Flag::Enabled);
        workspace.toggle_flag(1, Flag::Enabled);

        let after = workspace.entries()[1].frame().unwrap().handle;
        assert_ne!(before, after);
    }

    #[test]
    fn test_disable_last_eligible_clears_active() {
        let mut workspace = create_test_workspace(&["https://a.test"]);

        let effects = workspace.update(Action::ToggleFlag {
            index: 0,
            flag: Flag::Enabled,
        });

        assert!(effects.contains(&Effect::Activate(None)));
        assert_eq!(workspace.active_id(), None);
    }

    #[test]
    fn test_hide_active_promotes_next() {
        let mut workspace = abc();

        let effects = workspace.update(Action::SetFlag {
            index: 0,
            flag: Flag::Visible,
            value: false,
        });

        assert_eq!(
            effects,
            vec![
                Effect::ShowFrame {
                    id: 1,
                    visible: false
                },
                Effect::Activate(Some(2)),
                Effect::Persist,
            ]
        );
        assert_eq!(workspace.frame_state(1), Some(FrameState::FrameHidden));
    }

    #[test]
    fn test_show_promotes_when_nothing_active() {
        let mut workspace = create_test_workspace(&["https://a.test"]);
        workspace.set_flag(0, Flag::Visible, false);
        assert_eq!(workspace.active_id(), None);
        workspace.take_effects();

        let effects = workspace.update(Action::SetFlag {
            index: 0,
            flag: Flag::Visible,
            value: true,
        });

        assert_eq!(
            effects,
            vec![
                Effect::ShowFrame {
                    id: 1,
                    visible: true
                },
                Effect::Activate(Some(1)),
                Effect::Persist,
            ]
        );
    }

    #[test]
    fn test_enable_hidden_entry_keeps_frame_hidden() {
        let mut workspace = create_test_workspace(&["https://a.test"]);
        workspace.set_flag(0, Flag::Visible, false);
        workspace.set_flag(0, Flag::Enabled, false);
        workspace.take_effects();

        workspace.set_flag(0, Flag::Enabled, true);

        assert_eq!(workspace.frame_state(1), Some(FrameState::FrameHidden));
        assert_eq!(workspace.active_id(), None);
    }

    #[test]
    fn test_visibility_of_disabled_entry_has_no_frame_effects() {
        let mut workspace = abc();
        workspace.set_flag(2, Flag::Enabled, false);
        workspace.take_effects();

        let effects = workspace.update(Action::ToggleFlag {
            index: 2,
            flag: Flag::Visible,
        });

        assert_eq!(effects, vec![Effect::Persist]);
        assert_eq!(workspace.frame_state(3), Some(FrameState::NoFrame));
    }

    #[test]
    fn test_set_flag_is_idempotent() {
        let mut workspace = abc();
        workspace.set_flag(1, Flag::Enabled, false);
        workspace.take_effects();
        let before = workspace.snapshot();

        let disabled_again = workspace.update(Action::SetFlag {
            index: 1,
            flag: Flag::Enabled,
            value: false,
        });
        let enabled_again = workspace.update(Action::SetFlag {
            index: 0,
            flag: Flag::Enabled,
            value: true,
        });

        assert!(disabled_again.is_empty());
        assert!(enabled_again.is_empty());
        assert_eq!(workspace.snapshot(), before);
        assert_eq!(workspace.active_id(), Some(1));
    }

    #[test]
    fn test_frame_load_failure_disables_entry() {
        let mut workspace = abc();
        let handle = workspace.entries()[0].frame().unwrap().handle;

        let effects = workspace.update(Action::FrameLoadFailed { id: 1, handle });

        assert!(!workspace.entries()[0].enabled);
        assert_eq!(workspace.active_id(), Some(2));
        let notes = notifications(&effects);
        assert_eq!(notes[0].message, "Failed to load: a");
        assert_eq!(notes[0].level, Level::Error);
    }

    #[test]
    fn test_stale_frame_load_failure_is_ignored() {
        let mut workspace = abc();
        let stale = workspace.entries()[0].frame().unwrap().handle;
        workspace.toggle_flag(0, Flag::Enabled);
        workspace.toggle_flag(0, Flag::Enabled);
        workspace.take_effects();

        assert!(workspace.update(Action::FrameLoadFailed { id: 1, handle: stale }).is_empty());
        assert!(workspace.update(Action::FrameLoadFailed { id: 99, handle: stale }).is_empty());
        assert!(workspace.entries()[0].enabled);
    }

    #[test]
    fn test_remove_remaps_selection() {
        let mut workspace = abc();
        workspace.select(0, true);
        workspace.select(2, true);
        workspace.take_effects();

        let effects = workspace.update(Action::Remove(vec![1]));

        assert_eq!(effects[0], Effect::DestroyFrame(1));
        assert_eq!(workspace.selection().indices(), &[1]);
        assert_eq!(workspace.entries()[1].id, 3);
        assert_eq!(notifications(&effects)[0].message, "Deleted: a");
    }

    #[test]
    fn test_remove_active_leaves_nothing_active() {
        let mut workspace = abc();

        workspace.remove(&[1]);

        assert_eq!(active_count(&workspace), 0);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut workspace = abc();

        assert!(workspace.update(Action::Remove(vec![42])).is_empty());
        assert_eq!(workspace.len(), 3);
    }

    #[test]
    fn test_remove_selected() {
        let mut workspace = abc();
        workspace.select_all();

        let effects = workspace.update(Action::RemoveSelected);

        assert!(workspace.is_empty());
        assert!(workspace.selection().is_empty());
        assert_eq!(notifications(&effects)[0].message, "Deleted 3 apps: a, b, c");
    }

    #[test]
    fn test_remove_selected_without_selection_warns() {
        let mut workspace = abc();

        let effects = workspace.update(Action::RemoveSelected);

        assert_eq!(
            effects,
            vec![Effect::Notify(Notification::warning("Please select app(s) to delete"))]
        );
    }

    #[test]
    fn test_reorder_swaps_and_remaps() {
        let mut workspace = abc();
        workspace.select(1, false);
        workspace.take_effects();

        let effects = workspace.update(Action::Reorder {
            index: 1,
            direction: Direction::Up,
        });

        assert_eq!(effects, vec![Effect::Persist]);
        let ids: Vec<EntryId> = workspace.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
        assert_eq!(workspace.selection().indices(), &[0]);
    }

    #[test]
    fn test_reorder_out_of_bounds_is_noop() {
        let mut workspace = abc();

        assert!(workspace.update(Action::Reorder { index: 0, direction: Direction::Up }).is_empty());
        assert!(workspace.update(Action::Reorder { index: 2, direction: Direction::Down }).is_empty());
        assert!(workspace.update(Action::Reorder { index: 7, direction: Direction::Up }).is_empty());
    }

    #[test]
    fn test_select_activates_last_selected() {
        let mut workspace = abc();

        let effects = workspace.update(Action::Select { index: 2, multi: false });

        assert_eq!(effects, vec![Effect::Activate(Some(3))]);
        assert_eq!(workspace.active_id(), Some(3));
    }

    #[test]
    fn test_select_ineligible_keeps_active() {
        let mut workspace = abc();
        workspace.set_flag(2, Flag::Visible, false);
        workspace.take_effects();

        let effects = workspace.update(Action::Select { index: 2, multi: false });

        assert!(effects.is_empty());
        assert_eq!(workspace.selection().indices(), &[2]);
        assert_eq!(workspace.active_id(), Some(1));
    }

    #[test]
    fn test_navigate_single_and_extend() {
        let mut workspace = abc();

        workspace.navigate(Direction::Down, false);
        assert_eq!(workspace.selection().indices(), &[0]);

        workspace.navigate(Direction::Down, true);
        workspace.navigate(Direction::Down, true);
        assert_eq!(workspace.selection().indices(), &[0, 1, 2]);

        workspace.navigate(Direction::Up, false);
        assert_eq!(workspace.selection().indices(), &[1]);
        assert_eq!(workspace.active_id(), Some(2));
    }

    #[test]
    fn test_navigate_past_end_toggles_off() {
        let mut workspace = abc();
        workspace.select(2, false);

        workspace.navigate(Direction::Down, false);

        assert!(workspace.selection().is_empty());
    }

    #[test]
    fn test_navigate_empty_list() {
        let mut workspace = Workspace::new();
        workspace.navigate(Direction::Down, true);
        assert!(workspace.selection().is_empty());
    }

    #[test]
    fn test_restore() {
        let snapshot = Snapshot::new(
            vec![
                EntryRecord {
                    id: 4,
                    address: "https://a.test".to_string(),
                    title: "a.test".to_string(),
                    visible: false,
                    enabled: true,
                },
                EntryRecord {
                    id: 2,
                    address: "https://b.test".to_string(),
                    title: "b.test".to_string(),
                    visible: true,
                    enabled: false,
                },
                EntryRecord {
                    id: 7,
                    address: "https://c.test".to_string(),
                    title: "c.test".to_string(),
                    visible: true,
                    enabled: true,
                },
            ],
            5,
        );

        let mut workspace = Workspace::restore(snapshot.clone());
        let effects = workspace.take_effects();

        let created: Vec<EntryId> = effects
            .iter()
            .filter_map(|e| match e {
                Effect::CreateFrame { id, .. } => Some(*id),
                _ => None,
            })
            .collect();
        assert_eq!(created, vec![4, 7]);
        assert_eq!(workspace.active_id(), Some(7));
        assert_eq!(workspace.frame_state(4), Some(FrameState::FrameHidden));
        assert_eq!(workspace.next_id(), 8);
        assert_eq!(workspace.snapshot().entries, snapshot.entries);
    }
}
