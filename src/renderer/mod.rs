pub(crate) mod colours;
pub(crate) mod drawing;
pub(crate) mod fonts;
