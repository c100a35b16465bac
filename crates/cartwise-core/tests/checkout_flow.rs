//! End-to-end checkout runs against a small grocery catalog.

use cartwise_core::{
    Catalog, CoreError, Customer, FixedClock, Money, Product, ProductId, RecordingSink,
    SinkMessage, WriterSink,
};
use chrono::{Days, NaiveDate};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

struct Store {
    catalog: Catalog,
    cheese: ProductId,
    biscuits: ProductId,
    tv: ProductId,
}

fn store() -> Store {
    let mut catalog = Catalog::new();
    let cheese = catalog
        .insert(
            Product::new("Cheese", Money::from_major(100), 10)
                .with_expiry(today() + Days::new(3))
                .with_shipping(0.4),
        )
        .unwrap();
    let biscuits = catalog
        .insert(
            Product::new("Biscuits", Money::from_major(150), 5)
                .with_expiry(today() + Days::new(2))
                .with_shipping(0.7),
        )
        .unwrap();
    let tv = catalog
        .insert(Product::new("TV", Money::from_major(50), 20).with_shipping(2.0))
        .unwrap();
    Store {
        catalog,
        cheese,
        biscuits,
        tv,
    }
}

#[test]
fn test_reference_checkout() {
    let mut s = store();
    let mut customer = Customer::new("Amr", Money::from_major(1000)).unwrap();

    customer.add_to_cart(&s.catalog, s.cheese, 2).unwrap();
    customer.add_to_cart(&s.catalog, s.biscuits, 1).unwrap();
    customer.add_to_cart(&s.catalog, s.tv, 1).unwrap();

    assert_eq!(customer.cart().shippable_units(), 4);

    let mut sink = RecordingSink::new();
    let receipt = customer
        .checkout(&mut s.catalog, &FixedClock(today()), &mut sink)
        .unwrap();

    // 2 x 100 + 1 x 150 + 1 x 50
    assert_eq!(receipt.subtotal, Money::from_major(400));
    assert_eq!(receipt.shipping, Money::from_major(40));
    assert_eq!(receipt.total, Money::from_major(440));
    assert_eq!(receipt.remaining_balance, Money::from_major(560));
    assert_eq!(customer.balance(), Money::from_major(560));

    assert_eq!(s.catalog.get(s.cheese).unwrap().available_quantity(), 8);
    assert_eq!(s.catalog.get(s.biscuits).unwrap().available_quantity(), 4);
    assert_eq!(s.catalog.get(s.tv).unwrap().available_quantity(), 19);

    assert!(customer.cart().is_empty());
    assert_eq!(customer.cart().shippable_units(), 0);

    let messages = sink.into_messages();
    assert_eq!(messages.len(), 2);
    match &messages[0] {
        SinkMessage::Shipment(notice) => {
            assert_eq!(notice.items.len(), 3);
            assert!((notice.total_weight_kg - 3.5).abs() < 1e-9);
        }
        other => panic!("expected shipment notice first, got {other:?}"),
    }
    assert!(matches!(&messages[1], SinkMessage::Receipt(r) if r == &receipt));
}

#[test]
fn test_reference_checkout_text_output() {
    let mut s = store();
    let mut customer = Customer::new("Amr", Money::from_major(1000)).unwrap();
    customer.add_to_cart(&s.catalog, s.cheese, 2).unwrap();
    customer.add_to_cart(&s.catalog, s.biscuits, 1).unwrap();
    customer.add_to_cart(&s.catalog, s.tv, 1).unwrap();

    let mut sink = WriterSink::new(Vec::new());
    customer
        .checkout(&mut s.catalog, &FixedClock(today()), &mut sink)
        .unwrap();

    let text = String::from_utf8(sink.into_inner()).unwrap();
    assert_eq!(
        text,
        "** Shipment notice **\n\
         2x Cheese 0.4kg\n\
         1x Biscuits 0.7kg\n\
         1x TV 2.0kg\n\
         Total package weight 3.5kg\n\
         ** Checkout receipt **\n\
         2x Cheese $200.00\n\
         1x Biscuits $150.00\n\
         1x TV $50.00\n\
         ----------------------\n\
         Subtotal $400.00\n\
         Shipping $40.00\n\
         Amount $440.00\n\
         Your current balance: $560.00\n"
    );
}

#[test]
fn test_failed_checkout_can_be_retried_after_fixing_cart() {
    let mut s = store();
    let mut customer = Customer::new("Amr", Money::from_major(100)).unwrap();
    customer.add_to_cart(&s.catalog, s.cheese, 2).unwrap();

    let err = customer
        .checkout(&mut s.catalog, &FixedClock(today()), &mut RecordingSink::new())
        .unwrap_err();
    assert!(matches!(err, CoreError::InsufficientBalance { .. }));
    assert_eq!(s.catalog.get(s.cheese).unwrap().available_quantity(), 10);

    customer.clear_cart();
    customer.add_to_cart(&s.catalog, s.tv, 1).unwrap();
    let receipt = customer
        .checkout(&mut s.catalog, &FixedClock(today()), &mut RecordingSink::new())
        .unwrap();
    assert_eq!(receipt.total, Money::from_major(60));
    assert_eq!(customer.balance(), Money::from_major(40));
}

#[test]
fn test_stock_sold_to_one_customer_is_visible_to_another() {
    let mut s = store();
    let mut first = Customer::new("Amr", Money::from_major(1000)).unwrap();
    let mut second = Customer::new("Mona", Money::from_major(1000)).unwrap();

    first.add_to_cart(&s.catalog, s.biscuits, 4).unwrap();
    second.add_to_cart(&s.catalog, s.biscuits, 3).unwrap();

    first
        .checkout(&mut s.catalog, &FixedClock(today()), &mut RecordingSink::new())
        .unwrap();
    assert_eq!(s.catalog.get(s.biscuits).unwrap().available_quantity(), 1);

    let err = second
        .checkout(&mut s.catalog, &FixedClock(today()), &mut RecordingSink::new())
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::OutOfStock { available: 1, requested: 3, .. }
    ));
    assert_eq!(second.balance(), Money::from_major(1000));
}

#[test]
fn test_cart_expires_between_adds_and_checkout() {
    let mut s = store();
    let mut customer = Customer::new("Amr", Money::from_major(1000)).unwrap();
    customer.add_to_cart(&s.catalog, s.biscuits, 1).unwrap();

    // Biscuits expire on today + 2
    let later = FixedClock(today() + Days::new(3));
    let err = customer
        .checkout(&mut s.catalog, &later, &mut RecordingSink::new())
        .unwrap_err();
    assert!(matches!(err, CoreError::ExpiredItem { .. }));
    assert_eq!(customer.cart().len(), 1);
}
