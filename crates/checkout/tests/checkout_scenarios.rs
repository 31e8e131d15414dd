use std::sync::atomic::{AtomicUsize, Ordering};

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use flexorder_checkout::{CheckoutError, CheckoutFacade, CheckoutOutcome, CheckoutStage};
use flexorder_core::{DomainError, DomainResult};
use flexorder_events::{Event, RecordingObserver};
use flexorder_inventory::{InMemoryInventory, Inventory};
use flexorder_invoicing::{InMemoryInvoicing, Invoice, Invoicing};
use flexorder_sales::{
    Adjust, DeclineReason, DiscountPlan, LineItem, Order, PaymentMethod, PriceComponent,
    ShippingStrategy,
};

fn order(
    values: &[Decimal],
    payment: PaymentMethod,
    shipping: ShippingStrategy,
    gift_wrap: bool,
) -> Order {
    let items = values
        .iter()
        .enumerate()
        .map(|(i, v)| LineItem::new(format!("item-{}", i + 1), *v).unwrap())
        .collect();
    Order::new(items, payment, shipping, gift_wrap).unwrap()
}

/// Inventory that refuses every registration.
struct RejectingInventory;

impl Inventory for RejectingInventory {
    fn register_order(&self, _order: &Order) -> DomainResult<()> {
        Err(DomainError::unavailable("warehouse offline"))
    }
}

/// Invoicing that only counts calls.
#[derive(Default)]
struct CountingInvoicing {
    calls: AtomicUsize,
    inner: InMemoryInvoicing,
}

impl Invoicing for CountingInvoicing {
    fn issue(&self, order: &Order, amount: Decimal) -> DomainResult<Invoice> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.issue(order, amount)
    }
}

#[test]
fn scenario_a_pix_discount_completes() {
    let facade = CheckoutFacade::in_memory().with_observer(RecordingObserver::new());
    let chain = order(
        &[dec!(150), dec!(80)],
        PaymentMethod::InstantTransfer,
        ShippingStrategy::Standard,
        false,
    )
    .with_pix_discount();
    let order_id = chain.order().id_typed();

    let outcome = facade.checkout(&chain).unwrap();

    let quote = outcome.quote();
    assert_eq!(quote.base_value, dec!(230));
    assert_eq!(quote.value_after_adjustments, dec!(218.5));
    assert_eq!(quote.shipping_cost, dec!(10.925));
    assert_eq!(quote.gift_wrap_fee, Decimal::ZERO);
    assert_eq!(quote.final_amount, dec!(229.425));
    assert_eq!(outcome.stage(), CheckoutStage::Completed);

    assert!(facade.inventory().contains(order_id));
    let invoice = outcome.invoice().expect("completed checkout carries an invoice");
    assert_eq!(invoice.order_id(), order_id);
    assert_eq!(invoice.amount(), dec!(229.425));
    assert_eq!(facade.invoicing().issued(), vec![invoice.clone()]);

    let events = facade.observer().events();
    assert!(events.iter().all(|e| e.order_id() == order_id));
    assert_eq!(events.last().map(|e| e.stage()), Some(CheckoutStage::Completed));
}

#[test]
fn scenario_b_credit_limit_aborts_without_side_effects() {
    let facade = CheckoutFacade::in_memory().with_observer(RecordingObserver::new());
    let raw = order(
        &[dec!(2000)],
        PaymentMethod::CreditCard,
        ShippingStrategy::Express,
        false,
    );

    let outcome = facade.checkout(&raw).unwrap();

    assert_eq!(outcome.final_amount(), dec!(2215));
    match &outcome {
        CheckoutOutcome::Aborted(declined) => assert_eq!(
            declined.reason,
            DeclineReason::CreditLimitExceeded { limit: dec!(1000) }
        ),
        other => panic!("expected Aborted, got {other:?}"),
    }

    assert!(facade.inventory().is_empty());
    assert!(facade.invoicing().issued().is_empty());
    assert_eq!(
        facade.observer().event_types(),
        vec![
            "checkout.started",
            "checkout.priced",
            "checkout.shipping_calculated",
            "checkout.payment.declined",
            "checkout.aborted",
        ]
    );
    assert!(facade.observer().events().iter().any(|e| e.is_adverse()));
}

#[test]
fn raw_gift_wrap_order_pays_the_fee_after_shipping() {
    let facade = CheckoutFacade::in_memory();
    let raw = order(
        &[dec!(600)],
        PaymentMethod::CreditCard,
        ShippingStrategy::Express,
        true,
    );

    let outcome = facade.checkout(&raw).unwrap();

    // 600 + (60 + 15) + 5
    assert_eq!(outcome.quote().gift_wrap_fee, dec!(5));
    assert_eq!(outcome.final_amount(), dec!(680));
    assert!(outcome.is_completed());
}

#[test]
fn chained_gift_wrap_is_not_charged_again() {
    let facade = CheckoutFacade::in_memory();
    let chain = order(
        &[dec!(600)],
        PaymentMethod::CreditCard,
        ShippingStrategy::Express,
        true,
    )
    .with_bulk_discount()
    .with_gift_wrap();

    let outcome = facade.checkout(&chain).unwrap();

    // 600 -> 540 -> 545, shipping 54.5 + 15
    assert_eq!(outcome.quote().value_after_adjustments, dec!(545));
    assert_eq!(outcome.quote().gift_wrap_fee, Decimal::ZERO);
    assert_eq!(outcome.final_amount(), dec!(614.5));
}

#[test]
fn decorated_gift_wrap_order_without_surcharge_pays_no_fee() {
    let facade = CheckoutFacade::in_memory();
    let chain = order(
        &[dec!(230)],
        PaymentMethod::InstantTransfer,
        ShippingStrategy::InstantPremium,
        true,
    )
    .with_pix_discount();

    let outcome = facade.checkout(&chain).unwrap();

    // 218.5 + 50, the fallback is reserved for bare orders
    assert_eq!(outcome.quote().gift_wrap_fee, Decimal::ZERO);
    assert_eq!(outcome.final_amount(), dec!(268.5));
}

#[test]
fn out_of_range_amount_fails_before_payment() {
    let facade = CheckoutFacade::new(InMemoryInventory::new(), CountingInvoicing::default())
        .with_observer(RecordingObserver::new());
    let raw = order(
        &[Decimal::MAX],
        PaymentMethod::InstantTransfer,
        ShippingStrategy::InstantPremium,
        false,
    );

    match facade.checkout(&raw) {
        Err(CheckoutError::Configuration(DomainError::InvariantViolation(_))) => {}
        other => panic!("expected configuration fault, got {other:?}"),
    }

    assert!(facade.inventory().is_empty());
    assert_eq!(facade.invoicing().calls.load(Ordering::SeqCst), 0);
    assert_eq!(facade.observer().event_types(), vec!["checkout.started"]);
}

#[test]
fn inventory_failure_is_an_error_and_skips_invoicing() {
    let facade = CheckoutFacade::new(RejectingInventory, CountingInvoicing::default());
    let raw = order(
        &[dec!(100)],
        PaymentMethod::InstantTransfer,
        ShippingStrategy::Standard,
        false,
    );
    let order_id = raw.id_typed();

    let err = facade.checkout(&raw).unwrap_err();

    assert_eq!(
        err,
        CheckoutError::Inventory {
            order_id,
            source: DomainError::unavailable("warehouse offline"),
        }
    );
    assert!(err.is_post_payment());
    assert_eq!(facade.invoicing().calls.load(Ordering::SeqCst), 0);
}

fn checkout_items(items: Vec<LineItem>) -> Result<CheckoutOutcome, CheckoutError> {
    let raw = Order::new(
        items,
        PaymentMethod::CreditCard,
        ShippingStrategy::Standard,
        false,
    )?;
    CheckoutFacade::in_memory().checkout(&raw)
}

#[test]
fn empty_order_is_a_configuration_fault_not_a_decline() {
    match checkout_items(Vec::new()) {
        Err(CheckoutError::Configuration(DomainError::Validation(_))) => {}
        other => panic!("expected configuration fault, got {other:?}"),
    }
}

#[test]
fn discount_plan_chains_go_through_the_facade() {
    let facade = CheckoutFacade::in_memory();
    let raw = order(
        &[dec!(520)],
        PaymentMethod::InstantTransfer,
        ShippingStrategy::InstantPremium,
        false,
    );
    let plan = DiscountPlan::for_order(&raw);
    let chain = plan.apply(raw);

    let outcome = facade.checkout(chain.as_ref()).unwrap();

    // PIX first: 494 no longer qualifies for bulk
    assert_eq!(outcome.quote().value_after_adjustments, dec!(494));
    assert_eq!(outcome.final_amount(), dec!(544));
}

#[test]
fn repeated_checkout_of_the_same_chain_quotes_identically() {
    let facade = CheckoutFacade::in_memory();
    let chain = order(
        &[dec!(320), dec!(280)],
        PaymentMethod::AlternateTransfer,
        ShippingStrategy::Standard,
        true,
    )
    .with_pix_discount()
    .with_bulk_discount()
    .with_gift_wrap();

    let first = facade.checkout(&chain).unwrap();
    let second = facade.checkout(&chain).unwrap();

    assert_eq!(first.quote(), second.quote());
    // inventory registration is idempotent per order, invoicing is not
    assert_eq!(facade.inventory().len(), 1);
    assert_eq!(facade.invoicing().issued().len(), 2);
}

fn cents() -> impl Strategy<Value = Decimal> {
    (1i64..300_000).prop_map(|c| Decimal::new(c, 2))
}

fn shipping() -> impl Strategy<Value = ShippingStrategy> {
    prop_oneof![
        Just(ShippingStrategy::Standard),
        Just(ShippingStrategy::Express),
        Just(ShippingStrategy::InstantPremium),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// A decline never reaches inventory or invoicing.
    #[test]
    fn declines_have_no_collaborator_side_effects(
        values in prop::collection::vec(cents(), 1..5),
        shipping in shipping(),
        gift_wrap in any::<bool>(),
    ) {
        let facade = CheckoutFacade::new(InMemoryInventory::new(), CountingInvoicing::default());
        let raw = order(&values, PaymentMethod::CreditCard, shipping, gift_wrap);

        let outcome = facade.checkout(&raw).unwrap();

        if outcome.final_amount() >= dec!(1000) {
            prop_assert_eq!(outcome.stage(), CheckoutStage::Aborted);
            prop_assert!(facade.inventory().is_empty());
            prop_assert_eq!(facade.invoicing().calls.load(Ordering::SeqCst), 0);
        } else {
            prop_assert_eq!(outcome.stage(), CheckoutStage::Completed);
            prop_assert_eq!(facade.inventory().len(), 1);
            prop_assert_eq!(facade.invoicing().calls.load(Ordering::SeqCst), 1);
        }
    }

    /// With flat shipping the fee's position does not matter, so a raw order
    /// and a chain with a surcharge must both charge it exactly once.
    #[test]
    fn gift_wrap_fee_is_charged_exactly_once(value in cents()) {
        let facade = CheckoutFacade::in_memory();
        let expected = value + dec!(50) + dec!(5);

        let raw = order(&[value], PaymentMethod::InstantTransfer, ShippingStrategy::InstantPremium, true);
        let chained = raw.clone().with_gift_wrap().with_gift_wrap();

        prop_assert_eq!(facade.checkout(&raw).unwrap().final_amount(), expected);
        prop_assert_eq!(facade.checkout(&chained).unwrap().final_amount(), expected);
    }
}
