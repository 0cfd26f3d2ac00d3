pub mod app;
pub mod events;
pub mod theme;
pub mod ui;

#[cfg(test)]
mod test_support;
