pub(crate) mod careers_service;
