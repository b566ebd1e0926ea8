pub(crate) mod buffers;
pub(crate) use buffers::*;

#[cfg(test)]
pub(crate) mod testing;
