//! Which modal affordance is open. At most one at a time.

use crate::state::{Notifier, State};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dialog {
    Login,
    Signup,
    Referral,
}

#[derive(Clone, Debug)]
pub struct Dialogs {
    open: State<Option<Dialog>>,
}

impl Dialogs {
    pub fn new(notifier: &Notifier) -> Self {
        Self {
            open: State::new(None, notifier),
        }
    }

    pub fn current(&self) -> Option<Dialog> {
        self.open.get()
    }

    pub fn is_open(&self, dialog: Dialog) -> bool {
        self.current() == Some(dialog)
    }

    pub fn open(&self, dialog: Dialog) {
        self.open.replace(Some(dialog));
    }

    pub fn close(&self) {
        if self.current().is_some() {
            self.open.replace(None);
        }
    }

    /// Close `dialog` only if it is the one showing.
    pub fn close_if(&self, dialog: Dialog) {
        if self.is_open(dialog) {
            self.open.replace(None);
        }
    }
}
