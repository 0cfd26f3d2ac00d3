pub mod layout;
pub mod utils;
pub mod views;
pub mod widgets;
