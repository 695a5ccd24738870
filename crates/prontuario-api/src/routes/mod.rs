pub mod documents;
pub mod exports;
pub mod health;
pub mod patients;
pub mod profile;
pub mod reference;
pub mod sessions;
pub mod summary;
