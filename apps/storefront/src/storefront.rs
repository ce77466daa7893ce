//! # Storefront
//!
//! Builds every widget, the cart store and the coordinator, and keeps them
//! alive together.
//!
//! ## Construction Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Catalog            products, categories, slides (validated)         │
//! │  2. CartStore          empty cart, order endpoint                       │
//! │  3. Widgets            carousel, ribbon, slider, checkboxes, grid,      │
//! │                        cart icon (observes store), checkout view        │
//! │  4. EventCoordinator   subscribes to widget channels, initial filter    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! A construction failure in step 3 (`InvalidArgument`) aborts the whole
//! storefront; nothing is left half-wired.

use std::sync::Arc;

use serde::Serialize;
use storefront_checkout::{CartStore, HttpOrderEndpoint, OrderEndpoint};
use storefront_core::{FilterCriteria, SliderConfig, SliderSnapshot};
use tracing::info;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::coordinator::{EventCoordinator, Sources, Targets};
use crate::error::AppResult;
use crate::widgets::{
    CarouselArrows, CartIcon, CartIconView, Carousel, CheckoutView, CheckoutViewState, FilterCheckbox,
    ProductsGrid, RibbonMenu, StepSlider, Viewport,
};

/// Serializable view of the whole storefront.
#[derive(Debug, Clone, Serialize)]
pub struct StorefrontView {
    pub carousel_slide: String,
    pub carousel_arrows: CarouselArrows,
    pub category: String,
    pub slider: SliderSnapshot,
    pub no_nuts: bool,
    pub vegetarian_only: bool,
    pub criteria: FilterCriteria,
    pub products: Vec<String>,
    pub cart_icon: CartIconView,
    pub checkout: CheckoutViewState,
}

pub struct Storefront {
    catalog: Arc<Catalog>,
    store: Arc<CartStore>,
    viewport: Viewport,
    carousel: Carousel,
    ribbon: RibbonMenu,
    slider: StepSlider,
    nuts: FilterCheckbox,
    vegetarian: FilterCheckbox,
    grid: Arc<ProductsGrid>,
    cart_icon: CartIcon,
    checkout: CheckoutView,
    coordinator: EventCoordinator,
}

impl Storefront {
    /// Builds a wired storefront.
    ///
    /// ## Errors
    /// `Core(InvalidArgument)` when the slides, categories or slider config
    /// cannot build their widgets.
    pub fn new(catalog: Catalog, slider: SliderConfig, endpoint: Arc<dyn OrderEndpoint>) -> AppResult<Self> {
        let catalog = Arc::new(catalog);
        let store = Arc::new(CartStore::new(endpoint));

        let carousel = Carousel::new(catalog.slides().to_vec())?;
        let ribbon = RibbonMenu::new(catalog.categories().to_vec())?;
        let slider = StepSlider::new(slider)?;
        let nuts = FilterCheckbox::nuts();
        let vegetarian = FilterCheckbox::vegetarian();
        let grid = Arc::new(ProductsGrid::new(catalog.products().to_vec()));
        let cart_icon = CartIcon::new(&store);
        let checkout = CheckoutView::new(store.clone());

        let targets = Targets {
            catalog: catalog.clone(),
            store: store.clone(),
            grid: grid.clone(),
        };
        let coordinator = EventCoordinator::wire(
            &targets,
            Sources {
                carousel: &carousel,
                ribbon: &ribbon,
                slider: &slider,
                nuts: &nuts,
                vegetarian: &vegetarian,
                cart_icon: &cart_icon,
                checkout: &checkout,
            },
        );

        info!(
            products = catalog.products().len(),
            shown = grid.visible_ids().len(),
            "Storefront ready"
        );

        Ok(Storefront {
            catalog,
            store,
            viewport: Viewport::new(),
            carousel,
            ribbon,
            slider,
            nuts,
            vegetarian,
            grid,
            cart_icon,
            checkout,
            coordinator,
        })
    }

    /// Loads the catalog and builds the HTTP order endpoint from `config`.
    pub fn from_config(config: &StorefrontConfig) -> AppResult<Self> {
        let catalog = Catalog::load(&config.catalog)?;
        let endpoint = HttpOrderEndpoint::new(&config.checkout.endpoint_url, config.checkout.timeout())?;
        info!(url = %endpoint.url(), "Orders go to");
        Self::new(catalog, config.slider, Arc::new(endpoint))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &Arc<CartStore> {
        &self.store
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn ribbon(&self) -> &RibbonMenu {
        &self.ribbon
    }

    pub fn slider(&self) -> &StepSlider {
        &self.slider
    }

    pub fn nuts(&self) -> &FilterCheckbox {
        &self.nuts
    }

    pub fn vegetarian(&self) -> &FilterCheckbox {
        &self.vegetarian
    }

    pub fn grid(&self) -> &ProductsGrid {
        &self.grid
    }

    pub fn cart_icon(&self) -> &CartIcon {
        &self.cart_icon
    }

    pub fn checkout(&self) -> &CheckoutView {
        &self.checkout
    }

    pub fn coordinator(&self) -> &EventCoordinator {
        &self.coordinator
    }

    pub fn view(&self) -> StorefrontView {
        StorefrontView {
            carousel_slide: self.carousel.current().id.clone(),
            carousel_arrows: self.carousel.arrows(),
            category: self.ribbon.value(),
            slider: self.slider.snapshot(),
            no_nuts: self.nuts.is_checked(),
            vegetarian_only: self.vegetarian.is_checked(),
            criteria: self.grid.criteria(),
            products: self.grid.visible_ids(),
            cart_icon: self.cart_icon.view(),
            checkout: self.checkout.state(),
        }
    }
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("products", &self.catalog.products().len())
            .field("coordinator", &self.coordinator)
            .finish_non_exhaustive()
    }
}
