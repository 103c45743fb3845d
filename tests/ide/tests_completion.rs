//! Chain completion tests for the IDE layer.

use std::time::Duration;

use chainsearch::base::LocalId;
use chainsearch::hir::{MemberDef, PrimitiveType, TypeDescriptor};
use chainsearch::ide::{
    ChainOptions, ChainRequest, CompletionKind, LocalVar, SearchBounds, chain_completions,
};
use tokio_util::sync::CancellationToken;

use crate::helpers::shop_fixture::{shop, shop_with_shipments};

fn labels(items: &[chainsearch::ide::CompletionItem]) -> Vec<&str> {
    items.iter().map(|i| i.label.as_ref()).collect()
}

#[test]
fn test_completions_from_receiver_field() {
    let shop = shop_with_shipments();
    let request = ChainRequest::new(shop.main, [TypeDescriptor::nominal(shop.address)])
        .with_options(ChainOptions::default().with_bounds(SearchBounds::new(10, 2, 3)));

    let items = chain_completions(&shop.index, &request, &CancellationToken::new());
    assert_eq!(
        labels(&items),
        vec![
            "order.getCustomer().getAddress()",
            "order.getShipment().getDestination()",
        ]
    );
    assert!(items.iter().all(|i| i.kind == CompletionKind::Method));
    assert!(items.iter().all(|i| i.detail.as_deref() == Some("Address")));
}

#[test]
fn test_shadowing_local_forces_this_prefix() {
    let shop = shop();
    let request = ChainRequest::new(shop.main, [TypeDescriptor::nominal(shop.address)])
        .with_local(LocalVar::new(LocalId(0), "order", "Customer"))
        .with_options(ChainOptions::default().with_bounds(SearchBounds::new(10, 2, 3)));

    let items = chain_completions(&shop.index, &request, &CancellationToken::new());
    assert_eq!(
        labels(&items),
        vec!["order.getAddress()", "this.order.getCustomer().getAddress()"]
    );
}

#[test]
fn test_static_context_uses_anchors_only() {
    let mut shop = shop();
    shop.index.add_member(
        shop.address,
        MemberDef::method("of", "Address").param("zip", "int").as_static(),
    );
    shop.index
        .add_member(shop.address, MemberDef::field("EMPTY", "Address").as_static());

    let request = ChainRequest::new(shop.main, [TypeDescriptor::nominal(shop.address)])
        .with_static_context(true)
        .with_static_anchor(shop.address)
        .with_options(ChainOptions::default().with_bounds(SearchBounds::new(10, 1, 3)));

    let items = chain_completions(&shop.index, &request, &CancellationToken::new());
    assert_eq!(labels(&items), vec!["Address.of(zip)", "Address.EMPTY"]);
    assert_eq!(
        items[0].insert_text.as_deref(),
        Some("Address.of(${1:zip})")
    );
    assert_eq!(items[1].kind, CompletionKind::Field);
}

#[test]
fn test_array_result_indexed_to_expected_dimension() {
    let mut shop = shop();
    shop.index
        .add_member(shop.customer, MemberDef::method("getAddresses", "Address[]"));

    let request = ChainRequest::new(shop.main, [TypeDescriptor::nominal(shop.address)])
        .with_local(LocalVar::new(LocalId(0), "customer", "Customer"))
        .with_options(ChainOptions::default().with_bounds(SearchBounds::new(10, 2, 2)));

    let items = chain_completions(&shop.index, &request, &CancellationToken::new());
    assert_eq!(
        labels(&items),
        vec!["customer.getAddress()", "customer.getAddresses()[]"]
    );
    assert_eq!(
        items[1].insert_text.as_deref(),
        Some("customer.getAddresses()[${1:i}]")
    );
    assert_eq!(items[1].detail.as_deref(), Some("Address"));
}

#[test]
fn test_primitive_target_completes_through_fields() {
    let shop = shop();
    let request = ChainRequest::new(shop.main, [TypeDescriptor::primitive(PrimitiveType::Int)])
        .with_local(LocalVar::new(LocalId(0), "customer", "Customer"))
        .with_options(ChainOptions::default().with_bounds(SearchBounds::new(10, 2, 3)));

    let items = chain_completions(&shop.index, &request, &CancellationToken::new());
    assert_eq!(labels(&items), vec!["customer.getAddress().zip"]);
    assert_eq!(items[0].kind, CompletionKind::Field);
    assert_eq!(items[0].detail.as_deref(), Some("int"));
}

#[test]
fn test_ignored_target_type_yields_nothing() {
    let shop = shop();
    let options = ChainOptions::default()
        .with_bounds(SearchBounds::new(10, 1, 3))
        .with_ignored_types(["shop.Address"]);
    let request = ChainRequest::new(shop.main, [TypeDescriptor::nominal(shop.address)])
        .with_options(options);

    assert!(chain_completions(&shop.index, &request, &CancellationToken::new()).is_empty());
}

#[test]
fn test_zero_timeout_returns_immediately() {
    let shop = shop();
    let options = ChainOptions::default()
        .with_bounds(SearchBounds::new(10, 1, 3))
        .with_timeout(Duration::ZERO);
    let request = ChainRequest::new(shop.main, [TypeDescriptor::nominal(shop.address)])
        .with_options(options);

    assert!(chain_completions(&shop.index, &request, &CancellationToken::new()).is_empty());
}
