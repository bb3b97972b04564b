//! Swipe State Machine
//!
//! Platform-free core of the swipe-to-reveal gesture. Every row is
//! `Closed` unless it occupies the board's single slot, so at most one row
//! can be dragging or open at any time.

/// Gesture tuning, in CSS pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeConfig {
    /// How far a row slides left to reveal its actions
    pub max_reveal: f64,
    /// Minimum leftward travel on release for the row to stay open
    pub threshold: f64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            max_reveal: 64.0,
            threshold: 16.0,
        }
    }
}

/// Per-row gesture state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowState {
    Closed,
    Dragging,
    Open,
}

#[derive(Clone, Debug, PartialEq)]
enum Slot<K> {
    Dragging {
        key: K,
        pointer: Option<i32>,
        start_x: f64,
        offset: f64,
        moved: bool,
    },
    Open {
        key: K,
        /// False right after a drag opened the row, so the click the browser
        /// synthesizes from that same press does not close it again
        armed: bool,
    },
}

/// Swipe state for a whole list
#[derive(Clone, Debug, PartialEq)]
pub struct SwipeBoard<K> {
    config: SwipeConfig,
    slot: Option<Slot<K>>,
}

impl<K: Clone + PartialEq> SwipeBoard<K> {
    pub fn new(config: SwipeConfig) -> Self {
        Self { config, slot: None }
    }

    pub fn config(&self) -> SwipeConfig {
        self.config
    }

    pub fn state(&self, key: &K) -> RowState {
        match &self.slot {
            Some(Slot::Dragging { key: k, .. }) if k == key => RowState::Dragging,
            Some(Slot::Open { key: k, .. }) if k == key => RowState::Open,
            _ => RowState::Closed,
        }
    }

    /// Current horizontal translation of a row (zero or negative)
    pub fn offset(&self, key: &K) -> f64 {
        match &self.slot {
            Some(Slot::Dragging { key: k, offset, .. }) if k == key => *offset,
            Some(Slot::Open { key: k, .. }) if k == key => -self.config.max_reveal,
            _ => 0.0,
        }
    }

    pub fn open_key(&self) -> Option<&K> {
        match &self.slot {
            Some(Slot::Open { key, .. }) => Some(key),
            _ => None,
        }
    }

    pub fn dragging_key(&self) -> Option<&K> {
        match &self.slot {
            Some(Slot::Dragging { key, .. }) => Some(key),
            _ => None,
        }
    }

    /// Press on a row. Any other open row closes; a row that was already
    /// open keeps its translation until the pointer moves.
    pub fn press(&mut self, key: K, pointer: Option<i32>, x: f64) {
        let offset = self.offset(&key);
        self.slot = Some(Slot::Dragging {
            key,
            pointer,
            start_x: x,
            offset,
            moved: false,
        });
    }

    /// Move the active drag. Returns false if nothing is being dragged by
    /// this pointer.
    pub fn drag(&mut self, pointer: Option<i32>, x: f64) -> bool {
        let max_reveal = self.config.max_reveal;
        match &mut self.slot {
            Some(Slot::Dragging {
                pointer: active,
                start_x,
                offset,
                moved,
                ..
            }) => {
                if let (Some(active), Some(pointer)) = (*active, pointer) {
                    if active != pointer {
                        return false;
                    }
                }
                let dx = x - *start_x;
                // leftward only; rightward movement snaps shut
                *offset = if dx < 0.0 { dx.max(-max_reveal) } else { 0.0 };
                if dx != 0.0 {
                    *moved = true;
                }
                true
            }
            _ => false,
        }
    }

    /// Finish the active drag, snapping open or closed.
    /// Returns the released row and where it settled.
    pub fn release(&mut self, pointer: Option<i32>) -> Option<(K, RowState)> {
        let (key, offset, moved) = match &self.slot {
            Some(Slot::Dragging {
                key,
                pointer: active,
                offset,
                moved,
                ..
            }) => {
                if let (Some(active), Some(pointer)) = (*active, pointer) {
                    if active != pointer {
                        return None;
                    }
                }
                (key.clone(), *offset, *moved)
            }
            _ => return None,
        };

        if offset <= -self.config.threshold {
            self.slot = Some(Slot::Open {
                key: key.clone(),
                armed: !moved,
            });
            Some((key, RowState::Open))
        } else {
            self.slot = None;
            Some((key, RowState::Closed))
        }
    }

    /// Tap on a row's content. Closes it if it is open; returns true when
    /// the tap closed the row.
    pub fn tap(&mut self, key: &K) -> bool {
        match &mut self.slot {
            Some(Slot::Open { key: k, armed }) if k == key => {
                if *armed {
                    self.slot = None;
                    true
                } else {
                    *armed = true;
                    false
                }
            }
            _ => false,
        }
    }

    /// Drop any state held for a row that no longer exists
    pub fn forget(&mut self, key: &K) {
        let held = match &self.slot {
            Some(Slot::Dragging { key: k, .. }) | Some(Slot::Open { key: k, .. }) => k == key,
            None => false,
        };
        if held {
            self.slot = None;
        }
    }

    pub fn close_all(&mut self) {
        self.slot = None;
    }
}
