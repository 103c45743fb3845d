//! A small order-management model used across integration tests.
//!
//! ```text
//! shop.Main      order: Order (private)
//! shop.Order     getCustomer(): Customer, getId(): long, billing: Address (private)
//! shop.Customer  getAddress(): Address, getLastOrder(): Order
//! shop.Address   zip: int
//! bank.Vault     address: shop.Address (private), open(): shop.Address
//! java.lang.Integer
//! ```
//!
//! [`shop_with_shipments`] adds `shop.Shipment` and `Order.getShipment()`, a
//! second route from `Order` to `Address`.

use chainsearch::base::{LocalId, MemberId, TypeId};
use chainsearch::hir::{MemberDef, MemberDescriptor, SymbolService, TypeDef, TypeIndex};

pub struct Shop {
    pub index: TypeIndex,
    pub main: TypeId,
    pub order: TypeId,
    pub customer: TypeId,
    pub address: TypeId,
    pub vault: TypeId,
    pub integer: TypeId,
    pub shipment: Option<TypeId>,
}

pub fn shop() -> Shop {
    let mut index = TypeIndex::new();
    let integer = index.add_type(TypeDef::class("java.lang.Integer"));
    let main = index.add_type(TypeDef::class("shop.Main"));
    let order = index.add_type(TypeDef::class("shop.Order"));
    let customer = index.add_type(TypeDef::class("shop.Customer"));
    let address = index.add_type(TypeDef::class("shop.Address"));
    let vault = index.add_type(TypeDef::class("bank.Vault"));

    index.add_member(main, MemberDef::field("order", "Order").private());

    index.add_member(order, MemberDef::method("getCustomer", "Customer"));
    index.add_member(order, MemberDef::method("getId", "long"));
    index.add_member(order, MemberDef::field("billing", "Address").private());

    index.add_member(customer, MemberDef::method("getAddress", "Address"));
    index.add_member(customer, MemberDef::method("getLastOrder", "Order"));

    index.add_member(address, MemberDef::field("zip", "int"));

    index.add_member(vault, MemberDef::field("address", "shop.Address").private());
    index.add_member(vault, MemberDef::method("open", "shop.Address"));

    Shop {
        index,
        main,
        order,
        customer,
        address,
        vault,
        integer,
        shipment: None,
    }
}

pub fn shop_with_shipments() -> Shop {
    let mut shop = shop();
    let shipment = shop.index.add_type(TypeDef::class("shop.Shipment"));
    shop.index
        .add_member(shop.order, MemberDef::method("getShipment", "Shipment"));
    shop.index
        .add_member(shipment, MemberDef::method("getDestination", "Address"));
    shop.index
        .add_member(shipment, MemberDef::method("getOrder", "Order"));
    shop.shipment = Some(shipment);
    shop
}

impl Shop {
    /// The declared member `name` of `owner`.
    pub fn member_id(&self, owner: TypeId, name: &str) -> MemberId {
        self.index
            .declared_members(owner)
            .unwrap()
            .iter()
            .copied()
            .find(|&id| self.index.member_data(id).unwrap().name.as_str() == name)
            .unwrap_or_else(|| panic!("no member {name}"))
    }

    pub fn member(&self, owner: TypeId, name: &str) -> MemberDescriptor {
        MemberDescriptor::from_member(&self.index, self.member_id(owner, name)).unwrap()
    }

    /// The `Main.order` field, the usual entry point.
    pub fn order_field(&self) -> MemberDescriptor {
        self.member(self.main, "order")
    }

    pub fn local(&self, id: u32, name: &str, signature: &str) -> MemberDescriptor {
        MemberDescriptor::local(&self.index, LocalId(id), name, signature, self.main).unwrap()
    }
}
