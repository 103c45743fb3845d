//! Assertions over search results.

use chainsearch::hir::{
    Accessibility, SymbolRef, SymbolService, TypeDescriptor, is_assignable,
};
use chainsearch::ide::{ChainPath, SearchBounds};
use rustc_hash::FxHashSet;

/// Element names of a chain, entry point first.
pub fn chain_names(path: &ChainPath) -> Vec<&str> {
    path.elements().iter().map(|e| e.name()).collect()
}

pub fn all_chain_names(paths: &[ChainPath]) -> Vec<Vec<&str>> {
    paths.iter().map(chain_names).collect()
}

/// Check every property a result list must satisfy regardless of input.
pub fn assert_chain_invariants<S: SymbolService + ?Sized>(
    service: &S,
    paths: &[ChainPath],
    bounds: SearchBounds,
    access: &Accessibility,
) {
    assert!(
        paths.len() <= bounds.max_chains,
        "{} chains exceed cap {}",
        paths.len(),
        bounds.max_chains
    );

    for path in paths {
        let names = chain_names(path);
        assert!(
            (bounds.min_depth..=bounds.max_depth).contains(&path.len()),
            "chain {names:?} outside depth bounds"
        );

        let mut seen = FxHashSet::default();
        for element in path.elements() {
            assert!(seen.insert(element.symbol()), "chain {names:?} repeats an element");
            if let SymbolRef::Member(member) = element.symbol() {
                let data = service.member_data(member).unwrap();
                assert!(
                    access.is_accessible(service, data),
                    "chain {names:?} uses inaccessible {}",
                    element.name()
                );
            }
        }

        let target: TypeDescriptor = path.target();
        assert!(
            is_assignable(service, &path.last().return_type(), &target),
            "chain {names:?} does not produce its target"
        );
        assert!(target.dimension() <= path.last().dimension());
    }
}
