//! Usage: Small cross-cutting helpers.

pub(crate) mod mutex_ext;
