//! End-to-end storefront tests: widget input in, coordinator routing,
//! grid / cart / checkout state out.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use storefront_checkout::{CheckoutError, CheckoutPhase, CheckoutResult, OrderEndpoint, OrderForm, OrderRequest};
use storefront_core::{Money, SliderConfig, StepDirection};
use storefront_lib::commands::{self, Command, Outcome};
use storefront_lib::widgets::{PointerEvent, SliderTarget, SUCCESS_TITLE};
use storefront_lib::{AppError, Catalog, Storefront};
use tokio::sync::Notify;

// =============================================================================
// Test Endpoint
// =============================================================================

#[derive(Default)]
struct RecordingEndpoint {
    reject_with: Option<u16>,
    hold: bool,
    started: Notify,
    release: Notify,
    orders: Mutex<Vec<OrderRequest>>,
}

impl RecordingEndpoint {
    fn accepting() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn rejecting(status: u16) -> Arc<Self> {
        Arc::new(RecordingEndpoint {
            reject_with: Some(status),
            ..Default::default()
        })
    }

    fn holding() -> Arc<Self> {
        Arc::new(RecordingEndpoint {
            hold: true,
            ..Default::default()
        })
    }

    fn order_count(&self) -> usize {
        self.orders.lock().unwrap().len()
    }
}

#[async_trait]
impl OrderEndpoint for RecordingEndpoint {
    async fn submit(&self, order: &OrderRequest) -> CheckoutResult<()> {
        self.orders.lock().unwrap().push(order.clone());
        self.started.notify_one();
        if self.hold {
            self.release.notified().await;
        }
        match self.reject_with {
            None => Ok(()),
            Some(status) => Err(CheckoutError::Rejected { status }),
        }
    }
}

fn storefront_with(endpoint: Arc<RecordingEndpoint>) -> Storefront {
    Storefront::new(Catalog::bundled().unwrap(), SliderConfig::default(), endpoint).unwrap()
}

fn storefront() -> Storefront {
    storefront_with(RecordingEndpoint::accepting())
}

fn form() -> OrderForm {
    OrderForm::new("Santa Claus", "john@gmail.com", "+1234567", "North, Lapland, Snow Home")
}

// =============================================================================
// Filtering
// =============================================================================

#[test]
fn initial_filter_uses_widget_values() {
    let shop = storefront();

    // Slider starts at 3: the two level-4 curries are hidden.
    let shown = shop.grid().visible_ids();
    assert_eq!(shown.len(), 11);
    assert!(!shown.contains(&"red-curry-chicken".to_string()));
    assert!(!shown.contains(&"red-curry-vega".to_string()));
    assert_eq!(shop.grid().criteria().max_spiciness.map(|s| s.level()), Some(3));
    assert_eq!(shop.grid().criteria().category, None);
}

#[test]
fn slider_click_refilters_grid() {
    let shop = storefront();

    shop.slider().click(SliderTarget::Track, 1.0);
    assert_eq!(shop.grid().visible_ids().len(), 13);

    shop.slider().key(StepDirection::First);
    let shown = shop.grid().visible_ids();
    assert_eq!(
        shown,
        vec![
            "som-tam-papaya-salad",
            "chicken-cashew",
            "chicken-springrolls",
            "prawn-crackers",
            "jasmine-rice"
        ]
    );
}

#[test]
fn slider_drag_refilters_once_on_release() {
    let shop = storefront();
    let changes = Arc::new(Mutex::new(Vec::new()));
    let _sub = {
        let changes = changes.clone();
        shop.slider().changes().subscribe(move |v| changes.lock().unwrap().push(*v))
    };

    shop.slider().pointer_down(shop.viewport());
    for fraction in [0.6, 0.3, 0.1, -0.5] {
        shop.viewport().dispatch(PointerEvent::Move { fraction });
        // No refilter during the drag.
        assert_eq!(shop.grid().visible_ids().len(), 11);
    }
    shop.viewport().dispatch(PointerEvent::Up { fraction: 0.0 });

    assert_eq!(*changes.lock().unwrap(), vec![0]);
    assert_eq!(shop.grid().visible_ids().len(), 5);
    assert_eq!(shop.viewport().listener_count(), 0);
}

#[test]
fn cancelled_drag_changes_nothing() {
    let shop = storefront();

    shop.slider().pointer_down(shop.viewport());
    shop.viewport().dispatch(PointerEvent::Move { fraction: 0.0 });
    shop.viewport().dispatch(PointerEvent::Cancel);

    assert_eq!(shop.slider().value(), 3);
    assert_eq!(shop.grid().visible_ids().len(), 11);
    assert_eq!(shop.viewport().listener_count(), 0);
}

#[test]
fn ribbon_and_checkboxes_combine() {
    let shop = storefront();

    shop.ribbon().select("soups");
    assert_eq!(shop.grid().visible_ids(), vec!["tom-yam", "tom-kha", "tom-kha-vega"]);

    shop.nuts().set(true);
    assert_eq!(shop.grid().visible_ids(), vec!["tom-yam"]);

    shop.nuts().set(false);
    shop.vegetarian().set(true);
    assert_eq!(shop.grid().visible_ids(), vec!["tom-kha-vega"]);

    shop.ribbon().select("");
    assert_eq!(
        shop.grid().visible_ids(),
        vec!["som-tam-papaya-salad", "tom-kha-vega", "jasmine-rice"]
    );
}

// =============================================================================
// Cart
// =============================================================================

#[test]
fn adds_from_cards_and_carousel_reach_cart() {
    let shop = storefront();

    assert!(shop.grid().add("tom-yam"));
    assert!(shop.grid().add("tom-yam"));
    shop.carousel().add_current();

    let icon = shop.cart_icon().view();
    assert!(icon.visible);
    assert_eq!(icon.count, 3);
    // 2 × €7.00 + €16.00 penang shrimp
    assert_eq!(icon.total, Money::from_cents(3000));
    assert_eq!(shop.store().snapshot().items.len(), 2);
}

#[test]
fn unknown_product_add_is_ignored() {
    let shop = storefront();
    shop.grid().adds().emit(&"deep-fried-mars-bar".to_string());

    assert!(shop.store().is_empty());
    assert!(!shop.cart_icon().view().visible);
}

#[test]
fn add_then_remove_round_trip() {
    let shop = storefront();

    shop.grid().add("jasmine-rice");
    assert!(!shop.store().is_empty());
    assert_eq!(shop.store().total_count(), 1);

    shop.store().adjust_count("jasmine-rice", -1);
    assert!(shop.store().is_empty());
}

#[test]
fn checkout_counters_route_through_coordinator() {
    let shop = storefront();
    shop.grid().add("tom-kha");
    shop.grid().add("jasmine-rice");

    assert!(shop.cart_icon().activate());
    assert!(shop.checkout().is_open());

    shop.checkout().increment("tom-kha");
    let state = shop.checkout().state();
    assert_eq!(state.line("tom-kha").unwrap().count, 2);
    assert_eq!(state.total, Money::from_cents(1620));

    shop.checkout().decrement("jasmine-rice");
    shop.checkout().decrement("tom-kha");
    assert!(shop.checkout().is_open());

    shop.checkout().decrement("tom-kha");
    assert!(shop.store().is_empty());
    assert!(!shop.checkout().is_open());
    assert!(!shop.cart_icon().view().visible);
}

// =============================================================================
// Checkout
// =============================================================================

#[tokio::test]
async fn successful_order_empties_cart() {
    let endpoint = RecordingEndpoint::accepting();
    let shop = storefront_with(endpoint.clone());
    shop.grid().add("penang-shrimp");
    shop.cart_icon().activate();

    let receipt = shop.checkout().submit(form()).await.unwrap();

    assert_eq!(receipt.total, Money::from_cents(1600));
    assert_eq!(endpoint.order_count(), 1);
    assert!(shop.store().is_empty());
    assert_eq!(shop.checkout().state().title(), Some(SUCCESS_TITLE));
    assert!(!shop.cart_icon().view().visible);
}

#[tokio::test]
async fn failed_order_keeps_cart() {
    let shop = storefront_with(RecordingEndpoint::rejecting(502));
    shop.grid().add("penang-shrimp");
    shop.cart_icon().activate();

    let err = shop.checkout().submit(form()).await.unwrap_err();

    assert!(matches!(err, CheckoutError::Rejected { status: 502 }));
    assert_eq!(shop.store().total_count(), 1);
    assert_eq!(shop.store().phase(), CheckoutPhase::Open);
}

#[tokio::test]
async fn double_submit_is_rejected_while_in_flight() {
    let endpoint = RecordingEndpoint::holding();
    let shop = Arc::new(storefront_with(endpoint.clone()));
    shop.grid().add("penang-shrimp");
    shop.cart_icon().activate();

    let first = tokio::spawn({
        let shop = shop.clone();
        async move { shop.checkout().submit(form()).await }
    });
    endpoint.started.notified().await;

    assert!(shop.checkout().state().submitting);
    assert!(matches!(
        shop.checkout().submit(form()).await,
        Err(CheckoutError::AlreadyInProgress)
    ));

    endpoint.release.notify_one();
    assert!(first.await.unwrap().is_ok());
    assert_eq!(endpoint.order_count(), 1);
}

// =============================================================================
// Commands
// =============================================================================

async fn run(shop: &Storefront, line: &str) -> Result<Outcome, AppError> {
    let command: Command = line.parse()?;
    commands::execute(shop, command).await
}

#[tokio::test]
async fn command_session() {
    let endpoint = RecordingEndpoint::accepting();
    let shop = storefront_with(endpoint.clone());

    run(&shop, "veg on").await.unwrap();
    run(&shop, "add jasmine-rice").await.unwrap();
    let err = run(&shop, "add tom-yam").await.unwrap_err();
    assert_eq!(err.code().as_str(), "NOT_FOUND");

    run(&shop, "slider drag 0.9 1.0").await.unwrap();
    assert_eq!(shop.slider().value(), 4);

    run(&shop, "carousel next").await.unwrap();
    run(&shop, "carousel add").await.unwrap();
    assert_eq!(shop.store().total_count(), 2);

    let Outcome::Continue(text) = run(&shop, "cart open").await.unwrap() else {
        panic!("expected output");
    };
    assert!(text.contains("checkout  Your order"));
    assert!(text.contains("total €16.20"));

    let err = run(&shop, "cart open").await.unwrap_err();
    assert!(matches!(err, AppError::Checkout(CheckoutError::CheckoutAlreadyOpen)));

    let Outcome::Continue(text) =
        run(&shop, "order Santa Claus|john@gmail.com|+1234567|North, Lapland, Snow Home")
            .await
            .unwrap()
    else {
        panic!("expected output");
    };
    assert!(text.contains("placed: 2 item(s), €16.20"));
    assert!(text.contains("Success!"));
    assert_eq!(endpoint.order_count(), 1);

    assert_eq!(run(&shop, "quit").await.unwrap(), Outcome::Quit);
}

#[tokio::test]
async fn blank_form_field_is_invalid_argument() {
    let shop = storefront();
    run(&shop, "add jasmine-rice").await.unwrap();
    run(&shop, "cart open").await.unwrap();

    let err = run(&shop, "order Santa Claus|john@gmail.com| |North").await.unwrap_err();
    assert_eq!(err.code().as_str(), "INVALID_ARGUMENT");
}
