//! Member lookup tests: inheritance, overrides and access rules.

use chainsearch::hir::{
    MemberDef, MemberDescriptor, MemberLookup, SymbolRef, SymbolService, TypeDef, TypeDescriptor,
    TypeIndex, supertypes,
};
use chainsearch::base::TypeId;

use crate::helpers::counting_service::CountingService;
use crate::helpers::shop_fixture::shop;

fn names(members: &[MemberDescriptor]) -> Vec<&str> {
    members.iter().map(|m| m.name()).collect()
}

/// `lib.Shape` (interface) <- `lib.Polygon` <- `app.Square`, with members of
/// every visibility on `lib.Polygon`.
fn shapes() -> (TypeIndex, [TypeId; 4]) {
    let mut index = TypeIndex::new();
    let shape = index.add_type(TypeDef::interface("lib.Shape"));
    let polygon = index.add_type(TypeDef::class("lib.Polygon"));
    let square = index.add_type(TypeDef::class("app.Square"));
    let canvas = index.add_type(TypeDef::class("app.Canvas"));
    index.add_interface(polygon, shape);
    index.set_superclass(square, polygon);

    index.add_member(shape, MemberDef::method("bounds", "Shape"));
    index.add_member(polygon, MemberDef::method("bounds", "Polygon"));
    index.add_member(polygon, MemberDef::field("corners", "int").protected());
    index.add_member(polygon, MemberDef::field("cache", "Polygon").package_private());
    index.add_member(polygon, MemberDef::field("points", "Polygon").private());
    index.add_member(polygon, MemberDef::method("unit", "Polygon").as_static());
    index.add_member(square, MemberDef::method("bounds", "Square"));
    index.add_member(square, MemberDef::method("rotate", "Square").param("degrees", "int"));

    (index, [shape, polygon, square, canvas])
}

#[test]
fn test_covariant_overrides_collapse_to_most_specific() {
    let (index, [_, _, square, _]) = shapes();
    let mut lookup = MemberLookup::new(&index, square);
    let members = lookup.find_members(&TypeDescriptor::nominal(square), false);

    let bounds: Vec<_> = members.iter().filter(|m| m.name() == "bounds").collect();
    assert_eq!(bounds.len(), 1);
    assert_eq!(bounds[0].return_type(), TypeDescriptor::nominal(square));
}

#[test]
fn test_subclass_in_other_package_sees_protected_not_package() {
    let (index, [_, _, square, _]) = shapes();
    let mut lookup = MemberLookup::new(&index, square);
    let members = lookup.find_members(&TypeDescriptor::nominal(square), false);
    assert_eq!(names(&members), vec!["bounds", "rotate", "corners"]);
}

#[test]
fn test_unrelated_type_sees_public_only() {
    let (index, [_, polygon, _, canvas]) = shapes();
    let mut lookup = MemberLookup::new(&index, canvas);
    let members = lookup.find_members(&TypeDescriptor::nominal(polygon), false);
    assert_eq!(names(&members), vec!["bounds"]);
}

#[test]
fn test_same_package_sees_package_private() {
    let (mut index, [_, polygon, _, _]) = shapes();
    let triangle = index.add_type(TypeDef::class("lib.Triangle"));
    let mut lookup = MemberLookup::new(&index, triangle);
    let members = lookup.find_members(&TypeDescriptor::nominal(polygon), false);
    assert_eq!(names(&members), vec!["bounds", "corners", "cache"]);
}

#[test]
fn test_static_mode_lists_static_members_of_supertypes() {
    let (index, [_, _, square, canvas]) = shapes();
    let mut lookup = MemberLookup::new(&index, canvas);
    let members = lookup.find_members(&TypeDescriptor::nominal(square), true);
    assert_eq!(names(&members), vec!["unit"]);
}

#[test]
fn test_interface_members_reached_through_superclass() {
    let mut index = TypeIndex::new();
    let named = index.add_type(TypeDef::interface("lib.Named"));
    let base = index.add_type(TypeDef::class("lib.Base"));
    let leaf = index.add_type(TypeDef::class("lib.Leaf"));
    index.add_interface(base, named);
    index.set_superclass(leaf, base);
    let label = index.add_member(named, MemberDef::method("label", "Named"));

    let mut lookup = MemberLookup::new(&index, leaf);
    let members = lookup.find_members(&TypeDescriptor::nominal(leaf), false);
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].symbol(), SymbolRef::Member(label));
}

#[test]
fn test_private_field_of_unrelated_type_is_never_a_candidate() {
    let shop = shop();
    let mut lookup = MemberLookup::new(&shop.index, shop.main);

    let vault = lookup.find_members(&TypeDescriptor::nominal(shop.vault), false);
    assert_eq!(names(&vault), vec!["open"]);
    let order = lookup.find_members(&TypeDescriptor::nominal(shop.order), false);
    assert!(!names(&order).contains(&"billing"));
    assert!(!lookup.is_accessible(shop.member_id(shop.vault, "address")));
}

#[test]
fn test_lookup_cache_avoids_second_service_walk() {
    let shop = shop();
    let counting = CountingService::new(&shop.index);
    let mut lookup = MemberLookup::new(&counting, shop.main);
    let customer = TypeDescriptor::nominal(shop.customer);

    lookup.find_members(&customer, false);
    let reads = counting.member_reads();
    lookup.find_members(&customer, false);
    assert_eq!(counting.member_reads(), reads);
    assert_eq!(lookup.stats().cache_hits, 1);
}

/// `app.Leaf` extends a superclass the index does not know and implements
/// `app.Labeled`.
fn leaf_with_broken_superclass() -> (TypeIndex, TypeId, TypeId) {
    let mut index = TypeIndex::new();
    let labeled = index.add_type(TypeDef::interface("app.Labeled"));
    let leaf = index.add_type(TypeDef::class("app.Leaf"));
    index.set_superclass(leaf, TypeId(999));
    index.add_interface(leaf, labeled);
    index.add_member(labeled, MemberDef::method("label", "Labeled"));
    index.add_member(leaf, MemberDef::field("size", "int"));
    (index, leaf, labeled)
}

#[test]
fn test_unknown_superclass_skips_only_that_branch() {
    let (index, leaf, labeled) = leaf_with_broken_superclass();
    let walked: Vec<_> = supertypes(&index, leaf).collect();
    assert_eq!(walked, vec![leaf, TypeId(999), labeled]);

    let mut lookup = MemberLookup::new(&index, leaf);
    let members = lookup.find_members(&TypeDescriptor::nominal(leaf), false);
    assert_eq!(names(&members), vec!["size", "label"]);
}

#[test]
fn test_unreadable_declared_members_skip_that_type() {
    let (index, leaf, _) = leaf_with_broken_superclass();
    let service = CountingService::new(&index).with_broken_type(leaf);
    let mut lookup = MemberLookup::new(&service, leaf);
    let members = lookup.find_members(&TypeDescriptor::nominal(leaf), false);
    assert_eq!(names(&members), vec!["label"]);
}

#[test]
fn test_unreadable_member_is_skipped_and_counted() {
    let (index, leaf, _) = leaf_with_broken_superclass();
    let size = index.declared_members(leaf).unwrap()[0];
    let service = CountingService::new(&index).with_broken_member(size);
    let mut lookup = MemberLookup::new(&service, leaf);
    let members = lookup.find_members(&TypeDescriptor::nominal(leaf), false);
    assert_eq!(names(&members), vec!["label"]);
    assert_eq!(lookup.stats().skipped_members, 1);
}
