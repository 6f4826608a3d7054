pub mod confirmation;
pub mod notifications;
mod reading_lists;

pub use confirmation::{
    AutoConfirm, ConfirmOptions, ConfirmationDialog, ConfirmationError, Confirmer, Severity,
};
pub use notifications::{ConsoleNotifier, NotificationLevel, Notifier, ToastStack};
pub use reading_lists::{ControllerError, Deletion, ReadingListController, Selection};
