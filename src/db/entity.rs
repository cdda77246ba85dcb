pub mod address;
pub mod customer;
pub mod customer_order;
pub mod dealer;
pub mod location;
pub mod order_detail;
pub mod order_shipping;
pub mod product;
pub mod product_type;

pub use address::Entity as Addresses;
pub use address::Model as Address;
pub use customer::Entity as Customers;
pub use customer::Model as Customer;
pub use customer_order::Entity as CustomerOrders;
pub use customer_order::Model as CustomerOrder;
pub use dealer::Entity as Dealers;
pub use dealer::Model as Dealer;
pub use location::Entity as Locations;
pub use location::Model as Location;
pub use order_detail::Entity as OrderDetails;
pub use order_detail::Model as OrderDetail;
pub use order_shipping::Entity as OrderShippings;
pub use order_shipping::Model as OrderShipping;
pub use product::Entity as Products;
pub use product::Model as Product;
pub use product_type::Entity as ProductTypes;
pub use product_type::Model as ProductType;
