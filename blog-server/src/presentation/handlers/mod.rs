pub(crate) mod careers;
pub(crate) mod health;
pub(crate) mod pages;
pub(crate) mod posts;
