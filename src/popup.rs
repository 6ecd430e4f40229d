//! Open/closed state of a popup editor and its pending value.
//!
//! The state is an immutable value: every gesture produces a new state
//! through [`EditorState::apply`], and the caller reports the committed
//! value (if any) to whoever owns the field.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Popup {
    #[default]
    Closed,
    Open,
}

/// User gesture reaching an editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture<T> {
    /// Interaction with the input surface.
    Open,
    /// New in-progress value typed into the open editor.
    Edit(T),
    /// Confirm key: keep the pending value.
    Confirm,
    /// Cancel key: drop the pending value.
    Dismiss,
    /// Interaction outside the editor bounds; treated as a dismiss.
    ClickOutside,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState<T> {
    popup: Popup,
    committed: T,
    pending: T,
}

impl<T: Clone> EditorState<T> {
    pub fn new(value: T) -> Self {
        EditorState {
            popup: Popup::Closed,
            pending: value.clone(),
            committed: value,
        }
    }

    pub fn popup(&self) -> Popup {
        self.popup
    }

    pub fn is_open(&self) -> bool {
        self.popup == Popup::Open
    }

    /// Last confirmed value.
    pub fn committed(&self) -> &T {
        &self.committed
    }

    /// Value being edited; equals the committed value while closed.
    pub fn pending(&self) -> &T {
        &self.pending
    }

    /// Apply a gesture, returning the new state and the value to report
    /// when the gesture committed one.
    pub fn apply(self, gesture: Gesture<T>) -> (Self, Option<T>) {
        match (self.popup, gesture) {
            (Popup::Closed, Gesture::Open) => {
                log::debug!("popup opened");
                let pending = self.committed.clone();
                (
                    EditorState {
                        popup: Popup::Open,
                        pending,
                        ..self
                    },
                    None,
                )
            }
            (Popup::Open, Gesture::Edit(value)) => (
                EditorState {
                    pending: value,
                    ..self
                },
                None,
            ),
            (Popup::Open, Gesture::Confirm) => {
                log::debug!("popup confirmed");
                let committed = self.pending.clone();
                (
                    EditorState {
                        popup: Popup::Closed,
                        committed: committed.clone(),
                        pending: committed.clone(),
                    },
                    Some(committed),
                )
            }
            (Popup::Open, Gesture::Dismiss | Gesture::ClickOutside) => {
                log::debug!("popup dismissed, pending value dropped");
                let pending = self.committed.clone();
                (
                    EditorState {
                        popup: Popup::Closed,
                        pending,
                        ..self
                    },
                    None,
                )
            }
            (_, gesture) => {
                log::trace!(
                    "ignored {:?} gesture while {:?}",
                    GestureKind::of(&gesture),
                    self.popup
                );
                (self, None)
            }
        }
    }

    /// Keypad toggle: opens a closed editor, or commits `value` and closes
    /// an open one.
    pub fn toggle(self, value: T) -> (Self, Option<T>) {
        match self.popup {
            Popup::Closed => self.apply(Gesture::Open),
            Popup::Open => self.apply(Gesture::Edit(value)).0.apply(Gesture::Confirm),
        }
    }
}

/// Gesture without its payload, for logging values that are not `Debug`.
#[derive(Debug)]
enum GestureKind {
    Open,
    Edit,
    Confirm,
    Dismiss,
    ClickOutside,
}

impl GestureKind {
    fn of<T>(gesture: &Gesture<T>) -> Self {
        match gesture {
            Gesture::Open => GestureKind::Open,
            Gesture::Edit(_) => GestureKind::Edit,
            Gesture::Confirm => GestureKind::Confirm,
            Gesture::Dismiss => GestureKind::Dismiss,
            Gesture::ClickOutside => GestureKind::ClickOutside,
        }
    }
}
