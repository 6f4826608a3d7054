pub mod services;

pub use services::{ReadingListController, ToastStack};
