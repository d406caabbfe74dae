/// Загрузка и сохранение таблиц

pub mod loader;

pub use loader::DataLoader;
