pub(crate) mod career;
