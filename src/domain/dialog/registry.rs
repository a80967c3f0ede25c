//! Lookup of dialog implementations by id.

use std::collections::HashMap;
use std::sync::Arc;

use super::dialogs::{BookingDialog, BreakfastDialog, DateResolverDialog};
use super::errors::DialogError;
use super::frame::DialogId;
use super::waterfall::Dialog;

#[derive(Clone, Default)]
pub struct DialogRegistry {
    dialogs: HashMap<DialogId, Arc<dyn Dialog>>,
}

impl DialogRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the booking dialog and both of its sub-dialogs.
    pub fn hotel(max_date_attempts: Option<u32>) -> Self {
        Self::new()
            .with(BookingDialog::new())
            .with(BreakfastDialog::new())
            .with(DateResolverDialog::new(max_date_attempts))
    }

    pub fn with(mut self, dialog: impl Dialog + 'static) -> Self {
        self.dialogs.insert(dialog.id(), Arc::new(dialog));
        self
    }

    pub fn get(&self, id: DialogId) -> Result<&dyn Dialog, DialogError> {
        self.dialogs
            .get(&id)
            .map(|d| d.as_ref())
            .ok_or(DialogError::UnknownDialog(id))
    }
}

impl std::fmt::Debug for DialogRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogRegistry")
            .field("dialogs", &self.dialogs.keys().collect::<Vec<_>>())
            .finish()
    }
}
