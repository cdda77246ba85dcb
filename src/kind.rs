//! The nine entity types and the foreign-key graph between them.

/// Entity types known to the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display)]
pub enum EntityKind {
    Dealer,
    Customer,
    Address,
    Location,
    ProductType,
    Product,
    CustomerOrder,
    OrderDetail,
    OrderShipping,
}

impl EntityKind {
    /// The only order in which population tasks may run: every kind comes after all of its parents.
    pub const POPULATION_ORDER: [EntityKind; 9] = [
        EntityKind::Dealer,
        EntityKind::Customer,
        EntityKind::Address,
        EntityKind::Location,
        EntityKind::ProductType,
        EntityKind::Product,
        EntityKind::CustomerOrder,
        EntityKind::OrderDetail,
        EntityKind::OrderShipping,
    ];

    /// Mock-data resource the entity is populated from.
    pub fn resource(&self) -> &'static str {
        match self {
            EntityKind::Dealer => "dealer",
            EntityKind::Customer => "customer",
            EntityKind::Address => "customer_address",
            EntityKind::Location => "dealer_location",
            EntityKind::ProductType => "dealer_product_type",
            EntityKind::Product => "dealer_products",
            EntityKind::CustomerOrder => "customer_order",
            EntityKind::OrderDetail => "customer_order_detail",
            EntityKind::OrderShipping => "customer_order_shipping",
        }
    }

    /// Parents a row of this kind must reference. Optional references (product location) are not listed.
    pub fn parents(&self) -> &'static [EntityKind] {
        match self {
            EntityKind::Dealer => &[],
            EntityKind::Customer => &[EntityKind::Dealer],
            EntityKind::Address => &[EntityKind::Customer],
            EntityKind::Location => &[EntityKind::Dealer],
            EntityKind::ProductType => &[EntityKind::Dealer],
            EntityKind::Product => &[EntityKind::Dealer, EntityKind::ProductType],
            EntityKind::CustomerOrder => &[EntityKind::Dealer, EntityKind::Customer],
            EntityKind::OrderDetail => &[EntityKind::CustomerOrder, EntityKind::Product],
            EntityKind::OrderShipping => &[EntityKind::Address, EntityKind::CustomerOrder, EntityKind::OrderDetail],
        }
    }
}
