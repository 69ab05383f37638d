pub(crate) mod sheet;
