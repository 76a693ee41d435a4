use std::{collections::HashSet, hash::Hash};

#[macro_export]
macro_rules! assert_unique {
    ($slice:expr) => {{
        let slice = &$slice[..];
        assert!(
            $crate::slice::is_unique(slice),
            "expected `{}` to be unique, but it wasn't; actual={:?}",
            stringify!($slice),
            slice,
        );
    }};
}

#[macro_export]
macro_rules! assert_empty {
    ($slice:expr) => {{
        match &$slice[..] {
            [] => {}
            actual => panic!("expected slice to be empty; actual={:?}", actual),
        }
    }};
}

pub fn is_unique<T: Eq + Hash>(slice: &[T]) -> bool {
    let mut s = HashSet::new();
    slice.iter().all(|el| s.insert(el))
}
