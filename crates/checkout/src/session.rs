//! The checkout session state machine.
//!
//! The multi-step checkout is modeled as a flat [`Screen`] enum plus
//! several independent in-memory collections, not a navigation stack:
//! one discrete "active screen" value drives which step is rendered,
//! and transitions are guarded by data-completeness checks. A failed
//! guard returns a [`Rejection`] and leaves the screen unchanged - a
//! rejected action, not an error.
//!
//! All state lives in [`CheckoutSession`], which is only ever mutated
//! from the single event-processing task. The two async operations
//! (catalog load, order submission) are awaited by that task; the order
//! payload is constructed by value before the await, so later cart
//! mutations cannot affect an in-flight submission.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{instrument, warn};
use uuid::Uuid;

use corner_market_core::{
    Address, CAMPAIGN_CATEGORY_ID, Category, OrderConfirmation, PaymentMethod, Product,
};

use crate::cart::{CartLineItem, CartStore};
use crate::catalog::normalize::ensure_campaign_category;
use crate::catalog::{CatalogClient, fallback_categories, fallback_products};
use crate::order::{build_order_payload, fallback_order_id};
use crate::registry::Registry;

/// The active checkout step. `Home` is initial; there is no terminal
/// state - `Success` returns to `Home` on user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Home,
    Category,
    Cart,
    Address,
    AddAddress,
    Payment,
    AddCard,
    Summary,
    Success,
}

/// A guarded transition that did not occur. Surfaced to the user as a
/// blocking prompt; the session state is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("cart is empty")]
    EmptyCart,
    #[error("no delivery address selected")]
    NoAddressSelected,
    #[error("no payment method selected")]
    NoPaymentSelected,
    #[error("order total must be positive")]
    ZeroTotal,
}

/// Validation failures for the add-address and add-card forms. While a
/// form fails validation its save action stays disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("address title is required")]
    MissingTitle,
    #[error("address detail is required")]
    MissingDetail,
    #[error("cardholder name is required")]
    MissingHolder,
    #[error("card number must be exactly 16 digits")]
    InvalidCardNumber,
    #[error("CVV must be exactly 3 digits")]
    InvalidCvv,
    #[error("expiry must be MM/YY with month 01-12")]
    InvalidExpiry,
}

// =============================================================================
// Forms
// =============================================================================

/// Input for the add-address screen.
#[derive(Debug, Clone, Default)]
pub struct AddressForm {
    pub title: String,
    pub detail: String,
    pub note: String,
}

impl AddressForm {
    /// Whether the save action is enabled: title and detail must both
    /// be non-empty after trimming.
    ///
    /// # Errors
    ///
    /// Returns the first failing field check.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.title.trim().is_empty() {
            return Err(FormError::MissingTitle);
        }
        if self.detail.trim().is_empty() {
            return Err(FormError::MissingDetail);
        }
        Ok(())
    }

    fn into_address(self) -> Address {
        let note = self.note.trim();
        Address {
            id: Uuid::new_v4().to_string(),
            title: self.title.trim().to_string(),
            detail: self.detail.trim().to_string(),
            note: if note.is_empty() {
                None
            } else {
                Some(note.to_string())
            },
        }
    }
}

/// Input for the add-card screen.
///
/// The raw number and CVV only live in this form; the saved
/// [`PaymentMethod`] retains a masked rendering of the number and
/// nothing else.
#[derive(Debug, Clone, Default)]
pub struct CardForm {
    pub holder: String,
    pub number: String,
    /// `MM/YY`.
    pub expiry: String,
    pub cvv: String,
}

impl CardForm {
    /// Whether the save action is enabled.
    ///
    /// # Errors
    ///
    /// Returns the first failing field check: non-empty holder, exactly
    /// 16 digits, 3-digit CVV, `MM/YY` expiry with month 01-12.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.holder.trim().is_empty() {
            return Err(FormError::MissingHolder);
        }
        if !is_digits(&self.number, 16) {
            return Err(FormError::InvalidCardNumber);
        }
        if !is_digits(&self.cvv, 3) {
            return Err(FormError::InvalidCvv);
        }
        if !is_valid_expiry(&self.expiry) {
            return Err(FormError::InvalidExpiry);
        }
        Ok(())
    }

    /// Masked rendering of the card number. Only meaningful after
    /// validation.
    fn masked_description(&self) -> String {
        let last4 = self.number.get(self.number.len().saturating_sub(4)..);
        format!("**** **** **** {}", last4.unwrap_or_default())
    }

    fn into_payment_method(self) -> PaymentMethod {
        let description = self.masked_description();
        PaymentMethod {
            id: Uuid::new_v4().to_string(),
            label: self.holder.trim().to_string(),
            description,
        }
    }
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn is_valid_expiry(value: &str) -> bool {
    let Some((month, year)) = value.split_once('/') else {
        return false;
    };
    if !is_digits(month, 2) || !is_digits(year, 2) {
        return false;
    }
    matches!(month.parse::<u8>(), Ok(1..=12))
}

// =============================================================================
// CheckoutSession
// =============================================================================

/// The single state container for a checkout session.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    products: Vec<Product>,
    categories: Vec<Category>,
    selected_category_id: String,
    cart: CartStore,
    addresses: Registry<Address>,
    payments: Registry<PaymentMethod>,
    screen: Screen,
    confirmation: Option<OrderConfirmation>,
}

impl CheckoutSession {
    /// Create a fresh session on the home screen.
    ///
    /// The payment registry starts with one saved demo card, matching
    /// the shipped storefront; the address registry starts empty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
            categories: Vec::new(),
            selected_category_id: CAMPAIGN_CATEGORY_ID.to_string(),
            cart: CartStore::new(),
            addresses: Registry::default(),
            payments: Registry::new(vec![PaymentMethod {
                id: "card".to_string(),
                label: "Credit card".to_string(),
                description: "Visa - **** 4242".to_string(),
            }]),
            screen: Screen::Home,
            confirmation: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub const fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn selected_category(&self) -> Option<&Category> {
        self.categories
            .iter()
            .find(|category| category.id == self.selected_category_id)
    }

    #[must_use]
    pub fn addresses(&self) -> &Registry<Address> {
        &self.addresses
    }

    #[must_use]
    pub fn payment_methods(&self) -> &Registry<PaymentMethod> {
        &self.payments
    }

    /// The last order confirmation, present after a submission reached
    /// the success screen.
    #[must_use]
    pub const fn confirmation(&self) -> Option<&OrderConfirmation> {
        self.confirmation.as_ref()
    }

    /// Products shown for the selected category: campaign products for
    /// the campaign pseudo-category, otherwise a tag match on the
    /// category id or name.
    #[must_use]
    pub fn visible_products(&self) -> Vec<&Product> {
        if self.selected_category_id == CAMPAIGN_CATEGORY_ID {
            return self
                .products
                .iter()
                .filter(|product| product.is_campaign)
                .collect();
        }
        let category_name = self
            .selected_category()
            .map(|category| category.name.as_str())
            .unwrap_or_default();
        self.products
            .iter()
            .filter(|product| product.matches_category(&self.selected_category_id, category_name))
            .collect()
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add one unit of a product to the cart.
    pub fn increase(&mut self, product_id: &str) {
        self.cart.increase(product_id);
    }

    /// Remove one unit of a product from the cart, saturating at zero.
    pub fn decrease(&mut self, product_id: &str) {
        self.cart.decrease(product_id);
    }

    #[must_use]
    pub fn quantity(&self, product_id: &str) -> u32 {
        self.cart.quantity(product_id)
    }

    /// Cart badge count.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.cart.total_quantity()
    }

    /// Current line items, joined against the loaded catalog.
    #[must_use]
    pub fn cart_line_items(&self) -> Vec<CartLineItem> {
        self.cart.line_items(&self.products)
    }

    /// Current cart total, recomputed on every read.
    #[must_use]
    pub fn cart_total(&self) -> Decimal {
        self.cart.total(&self.products)
    }

    fn cart_has_items(&self) -> bool {
        !self.cart_line_items().is_empty()
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Load products and categories from the catalog service.
    ///
    /// Never fatal: a failed or empty fetch degrades to the built-in
    /// fallback catalog. Categories get the campaign pseudo-category
    /// injected at the head on every load, and the selected category is
    /// reset to it when the previous selection no longer exists.
    #[instrument(skip_all)]
    pub async fn load_catalog(&mut self, client: &CatalogClient) {
        self.products = match client.get_products().await {
            Ok(products) if !products.is_empty() => products,
            Ok(_) => {
                warn!("Catalog returned no products, using fallback list");
                fallback_products()
            }
            Err(err) => {
                warn!(error = %err, "Product fetch failed, using fallback list");
                fallback_products()
            }
        };

        let active = match client.get_categories().await {
            Ok(categories) if !categories.is_empty() => categories,
            Ok(_) => {
                warn!("Catalog returned no categories, using fallback list");
                fallback_categories()
            }
            Err(err) => {
                warn!(error = %err, "Category fetch failed, using fallback list");
                fallback_categories()
            }
        };
        self.categories = ensure_campaign_category(active);

        if !self
            .categories
            .iter()
            .any(|category| category.id == self.selected_category_id)
        {
            self.selected_category_id = CAMPAIGN_CATEGORY_ID.to_string();
        }
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Select a category and show the category screen. Only meaningful
    /// from the home and category screens.
    pub fn select_category(&mut self, category_id: &str) {
        if matches!(self.screen, Screen::Home | Screen::Category) {
            self.selected_category_id = category_id.to_string();
            self.screen = Screen::Category;
        }
    }

    /// Open the cart screen. Only meaningful from the home, category,
    /// and cart screens.
    ///
    /// # Errors
    ///
    /// Rejected when the cart has no line items.
    pub fn open_cart(&mut self) -> Result<(), Rejection> {
        if matches!(self.screen, Screen::Home | Screen::Category | Screen::Cart) {
            if !self.cart_has_items() {
                return Err(Rejection::EmptyCart);
            }
            self.screen = Screen::Cart;
        }
        Ok(())
    }

    /// Start checkout. Only meaningful from the home, category, and
    /// cart screens.
    ///
    /// # Errors
    ///
    /// Rejected when the cart has no line items.
    pub fn checkout(&mut self) -> Result<(), Rejection> {
        if matches!(self.screen, Screen::Home | Screen::Category | Screen::Cart) {
            if !self.cart_has_items() {
                return Err(Rejection::EmptyCart);
            }
            self.screen = Screen::Address;
        }
        Ok(())
    }

    /// Navigate to the previous logical screen for the current one.
    pub fn go_back(&mut self) {
        self.screen = match self.screen {
            Screen::Home | Screen::Category | Screen::Cart | Screen::Success => Screen::Home,
            Screen::Address => Screen::Cart,
            Screen::AddAddress | Screen::Payment => Screen::Address,
            Screen::AddCard | Screen::Summary => Screen::Payment,
        };
    }

    /// Continue from the address screen.
    ///
    /// # Errors
    ///
    /// Rejected unless the selection pointer resolves to an existing
    /// address - a stale pointer after a delete blocks here.
    pub fn continue_to_payment(&mut self) -> Result<(), Rejection> {
        if self.addresses.selected().is_none() {
            return Err(Rejection::NoAddressSelected);
        }
        self.screen = Screen::Payment;
        Ok(())
    }

    /// Continue from the payment screen.
    ///
    /// # Errors
    ///
    /// Rejected unless the selection pointer resolves to an existing
    /// payment method.
    pub fn continue_to_summary(&mut self) -> Result<(), Rejection> {
        if self.payments.selected().is_none() {
            return Err(Rejection::NoPaymentSelected);
        }
        self.screen = Screen::Summary;
        Ok(())
    }

    /// Show the add-address form.
    pub fn begin_add_address(&mut self) {
        self.screen = Screen::AddAddress;
    }

    /// Save a new address and return to the address screen with it
    /// selected.
    ///
    /// # Errors
    ///
    /// Returns the form validation failure; the screen is unchanged.
    pub fn save_address(&mut self, form: AddressForm) -> Result<(), FormError> {
        form.validate()?;
        self.addresses.add(form.into_address());
        self.screen = Screen::Address;
        Ok(())
    }

    /// Delete a saved address. Deleting the selected one re-targets the
    /// selection to the first remaining address, or clears it.
    pub fn delete_address(&mut self, address_id: &str) {
        self.addresses.remove(address_id);
    }

    pub fn select_address(&mut self, address_id: &str) {
        self.addresses.select(address_id);
    }

    /// Show the add-card form.
    pub fn begin_add_card(&mut self) {
        self.screen = Screen::AddCard;
    }

    /// Save a new payment method and return to the payment screen with
    /// it selected. Only the masked card number is retained.
    ///
    /// # Errors
    ///
    /// Returns the form validation failure; the screen is unchanged.
    pub fn save_card(&mut self, form: CardForm) -> Result<(), FormError> {
        form.validate()?;
        self.payments.add(form.into_payment_method());
        self.screen = Screen::Payment;
        Ok(())
    }

    /// Delete a saved payment method, with the same selection
    /// re-targeting as addresses.
    pub fn delete_payment_method(&mut self, payment_id: &str) {
        self.payments.remove(payment_id);
    }

    pub fn select_payment_method(&mut self, payment_id: &str) {
        self.payments.select(payment_id);
    }

    /// Submit the order from the summary screen.
    ///
    /// Builds the payload by value, makes a single submission attempt,
    /// and always reaches the success screen afterwards: a network
    /// failure, a non-2xx status, or a response without an id all fall
    /// back to a locally synthesized 6-digit confirmation id. The cart
    /// is cleared exactly once on entry to success.
    ///
    /// # Errors
    ///
    /// Rejected (before any attempt) when the cart is empty, no address
    /// or payment method is selected, or the total is not positive.
    #[instrument(skip_all)]
    pub async fn submit_order(
        &mut self,
        client: &CatalogClient,
    ) -> Result<OrderConfirmation, Rejection> {
        let line_items = self.cart_line_items();
        if line_items.is_empty() {
            return Err(Rejection::EmptyCart);
        }
        let address = self.addresses.selected().ok_or(Rejection::NoAddressSelected)?;
        let payment = self.payments.selected().ok_or(Rejection::NoPaymentSelected)?;
        let total = self.cart_total();
        if total <= Decimal::ZERO {
            return Err(Rejection::ZeroTotal);
        }

        let payload = build_order_payload(&line_items, total, address, payment);

        let confirmation = match client.submit_order(&payload).await {
            Ok(response) => OrderConfirmation {
                // Some backend versions omit or blank the
                // server-assigned id.
                order_id: response
                    .order_id
                    .filter(|id| !id.is_empty())
                    .unwrap_or_else(fallback_order_id),
                recorded: true,
            },
            Err(err) => {
                warn!(error = %err, "Order submission failed, issuing local confirmation");
                OrderConfirmation {
                    order_id: fallback_order_id(),
                    recorded: false,
                }
            }
        };

        self.cart.clear();
        self.confirmation = Some(confirmation.clone());
        self.screen = Screen::Success;
        Ok(confirmation)
    }

    /// Return to the home screen from success.
    pub fn return_home(&mut self) {
        self.screen = Screen::Home;
    }
}

impl Default for CheckoutSession {
    fn default() -> Self {
        Self::new()
    }
}
