pub(crate) mod form;
