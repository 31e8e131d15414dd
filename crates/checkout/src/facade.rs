use chrono::Utc;
use tracing::{debug, error, info_span};

use flexorder_events::{NoopObserver, Observer};
use flexorder_inventory::{InMemoryInventory, Inventory};
use flexorder_invoicing::{InMemoryInvoicing, Invoicing};
use flexorder_sales::{Authorization, PriceComponent};

use crate::error::CheckoutError;
use crate::event::{
    CheckoutAborted, CheckoutCompleted, CheckoutEvent, CheckoutStarted, InvoiceIssued,
    OrderPriced, OrderRegistered, PaymentApproved, PaymentDeclined, ShippingCalculated,
};
use crate::outcome::{CheckoutOutcome, Declined, Quote, Receipt};

/// Single entry point for finishing a purchase.
///
/// Sequence, strictly forward:
/// 1. evaluate the adjustment chain
/// 2. add shipping (and the gift-wrap fee if the chain did not charge it)
/// 3. authorize the final amount with the order's payment method
/// 4. on approval: register with inventory, then issue the invoice
///
/// A decline ends the checkout with [`CheckoutOutcome::Aborted`]; neither
/// collaborator is called. Pricing and shipping are pure, so there is nothing
/// to roll back. A price outside the `Decimal` range is reported as
/// [`CheckoutError::Configuration`] before any payment is attempted.
pub struct CheckoutFacade<I, V, O = NoopObserver> {
    inventory: I,
    invoicing: V,
    observer: O,
}

impl<I, V> CheckoutFacade<I, V, NoopObserver>
where
    I: Inventory,
    V: Invoicing,
{
    pub fn new(inventory: I, invoicing: V) -> Self {
        Self {
            inventory,
            invoicing,
            observer: NoopObserver,
        }
    }
}

impl CheckoutFacade<InMemoryInventory, InMemoryInvoicing, NoopObserver> {
    /// Facade backed by the in-process collaborators.
    pub fn in_memory() -> Self {
        Self::new(InMemoryInventory::new(), InMemoryInvoicing::new())
    }
}

impl Default for CheckoutFacade<InMemoryInventory, InMemoryInvoicing, NoopObserver> {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl<I, V, O> CheckoutFacade<I, V, O>
where
    I: Inventory,
    V: Invoicing,
    O: Observer<CheckoutEvent>,
{
    /// Replace the observer that receives checkout events.
    pub fn with_observer<P>(self, observer: P) -> CheckoutFacade<I, V, P>
    where
        P: Observer<CheckoutEvent>,
    {
        CheckoutFacade {
            inventory: self.inventory,
            invoicing: self.invoicing,
            observer,
        }
    }

    pub fn inventory(&self) -> &I {
        &self.inventory
    }

    pub fn invoicing(&self) -> &V {
        &self.invoicing
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Run one checkout attempt.
    ///
    /// `chain` is either a bare [`flexorder_sales::Order`] or any adjustment
    /// chain wrapping one.
    pub fn checkout<C>(&self, chain: &C) -> Result<CheckoutOutcome, CheckoutError>
    where
        C: PriceComponent + ?Sized,
    {
        let order = chain.order();
        let order_id = order.id_typed();

        let span = info_span!("checkout", %order_id);
        let _guard = span.enter();

        self.emit(CheckoutEvent::CheckoutStarted(CheckoutStarted {
            order_id,
            base_value: order.base_value(),
            adjustments: chain.adjustments(),
            occurred_at: Utc::now(),
        }));

        let quote = Quote::compute(chain)?;

        self.emit(CheckoutEvent::OrderPriced(OrderPriced {
            order_id,
            value_after_adjustments: quote.value_after_adjustments,
            occurred_at: Utc::now(),
        }));
        self.emit(CheckoutEvent::ShippingCalculated(ShippingCalculated {
            order_id,
            shipping_strategy: quote.shipping_strategy,
            shipping_cost: quote.shipping_cost,
            gift_wrap_fee: quote.gift_wrap_fee,
            final_amount: quote.final_amount,
            occurred_at: Utc::now(),
        }));

        debug!(
            final_amount = %quote.final_amount,
            payment_method = %quote.payment_method,
            "authorizing payment"
        );

        match quote.payment_method.authorize(quote.final_amount) {
            Authorization::Declined { reason } => {
                self.emit(CheckoutEvent::PaymentDeclined(PaymentDeclined {
                    order_id,
                    payment_method: quote.payment_method,
                    amount: quote.final_amount,
                    reason,
                    occurred_at: Utc::now(),
                }));
                self.emit(CheckoutEvent::CheckoutAborted(CheckoutAborted {
                    order_id,
                    final_amount: quote.final_amount,
                    occurred_at: Utc::now(),
                }));

                Ok(CheckoutOutcome::Aborted(Declined { quote, reason }))
            }
            Authorization::Approved => {
                self.emit(CheckoutEvent::PaymentApproved(PaymentApproved {
                    order_id,
                    payment_method: quote.payment_method,
                    amount: quote.final_amount,
                    occurred_at: Utc::now(),
                }));

                self.inventory.register_order(order).map_err(|source| {
                    error!(error = %source, "inventory registration failed after payment approval");
                    CheckoutError::Inventory { order_id, source }
                })?;
                self.emit(CheckoutEvent::OrderRegistered(OrderRegistered {
                    order_id,
                    occurred_at: Utc::now(),
                }));

                let invoice = self
                    .invoicing
                    .issue(order, quote.final_amount)
                    .map_err(|source| {
                        error!(error = %source, "invoice emission failed after payment approval");
                        CheckoutError::Invoicing { order_id, source }
                    })?;
                self.emit(CheckoutEvent::InvoiceIssued(InvoiceIssued {
                    order_id,
                    invoice_id: invoice.id_typed(),
                    amount: invoice.amount(),
                    occurred_at: Utc::now(),
                }));

                self.emit(CheckoutEvent::CheckoutCompleted(CheckoutCompleted {
                    order_id,
                    final_amount: quote.final_amount,
                    occurred_at: Utc::now(),
                }));

                Ok(CheckoutOutcome::Completed(Receipt { quote, invoice }))
            }
        }
    }

    fn emit(&self, event: CheckoutEvent) {
        self.observer.notify(&event);
    }
}
