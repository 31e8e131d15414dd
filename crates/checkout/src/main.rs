//! Runs the sample checkouts against the in-process collaborators.

use rust_decimal_macros::dec;

use flexorder_checkout::{CheckoutFacade, CheckoutOutcome};
use flexorder_events::TracingObserver;
use flexorder_sales::{Adjust, DiscountPlan, LineItem, Order, PaymentMethod, ShippingStrategy};

fn main() -> anyhow::Result<()> {
    flexorder_observability::init();

    let facade = CheckoutFacade::in_memory().with_observer(TracingObserver);

    // Instant transfer with the PIX discount and standard shipping.
    let cloak_and_potion = Order::new(
        vec![
            LineItem::new("Invisibility Cloak", dec!(150.00))?,
            LineItem::new("Flight Potion", dec!(80.00))?,
        ],
        PaymentMethod::InstantTransfer,
        ShippingStrategy::Standard,
        false,
    )?
    .with_pix_discount();
    report("pix discount", &facade.checkout(&cloak_and_potion)?)?;

    // Large credit card order: bulk discount, gift wrap, express shipping.
    let crystal = Order::new(
        vec![LineItem::new("Magic Crystal", dec!(600.00))?],
        PaymentMethod::CreditCard,
        ShippingStrategy::Express,
        true,
    )?
    .with_bulk_discount()
    .with_gift_wrap();
    report("bulk discount + gift wrap", &facade.checkout(&crystal)?)?;

    // Instant transfer without any discount.
    let healing_potion = Order::new(
        vec![LineItem::new("Healing Potion", dec!(100.00))?],
        PaymentMethod::InstantTransfer,
        ShippingStrategy::Standard,
        false,
    )?;
    report("no discount", &facade.checkout(&healing_potion)?)?;

    // Over the credit card limit: declined, nothing registered.
    let vip_item = Order::new(
        vec![LineItem::new("VIP Item", dec!(2000.00))?],
        PaymentMethod::CreditCard,
        ShippingStrategy::Express,
        false,
    )?;
    report("credit limit", &facade.checkout(&vip_item)?)?;

    // Adjustments picked from data instead of code.
    let plan: DiscountPlan =
        serde_json::from_str(r#"{ "pix": true, "bulk": true, "gift_wrap": true }"#)?;
    let spell_books = plan.apply(Order::new(
        vec![
            LineItem::new("Spell Book", dec!(320.00))?,
            LineItem::new("Enchanted Quill", dec!(280.00))?,
        ],
        PaymentMethod::InstantTransfer,
        ShippingStrategy::InstantPremium,
        true,
    )?);
    report("discount plan", &facade.checkout(spell_books.as_ref())?)?;

    tracing::info!(
        registered = facade.inventory().len(),
        invoiced = facade.invoicing().issued().len(),
        "sample checkouts finished"
    );
    Ok(())
}

fn report(label: &str, outcome: &CheckoutOutcome) -> anyhow::Result<()> {
    tracing::info!(
        scenario = label,
        status = %outcome.stage(),
        amount = %outcome.quote().final_amount_rounded(),
        outcome = %serde_json::to_string(outcome)?,
        "checkout finished"
    );
    Ok(())
}
