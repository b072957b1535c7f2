//! Glitter Shop entry point
//!
//! In the browser this wires the DOM to the shop and starts the background
//! animation. Natively it runs a short headless session and logs it.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_shop {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, MouseEvent};

    use glitter_shop::catalog::fetch_catalog;
    use glitter_shop::effects::{AnimationLoop, BurstEffect, ParticleField};
    use glitter_shop::renderer::{CanvasSurface, DrawSurface};
    use glitter_shop::view::CartViewModel;
    use glitter_shop::{Shop, ShopConfig, ShopEvent, UiAction};

    /// Background animation: runs from page load, independent of the shop
    struct Background {
        field: ParticleField,
        clock: AnimationLoop,
        surface: CanvasSurface,
    }

    impl Background {
        fn new(document: &Document, config: &ShopConfig, seed: u64) -> Result<Self, JsValue> {
            let surface = CanvasSurface::from_element_id(document, "glitter-canvas")?;
            let (width, height) = window_size();
            surface.resize(width as u32, height as u32);
            Ok(Self {
                field: ParticleField::new(config, width, height, seed),
                clock: AnimationLoop::new(),
                surface,
            })
        }

        fn resize(&mut self) {
            let (width, height) = window_size();
            self.surface.resize(width as u32, height as u32);
            let (w, h) = self.surface.size();
            self.field.resize(w, h);
        }

        /// Draw one frame. Returns false once the clock is stopped.
        fn frame(&mut self, timestamp_ms: f64) -> bool {
            let Some(time) = self.clock.on_frame(timestamp_ms) else {
                return false;
            };
            self.field.frame(time, &mut self.surface);
            true
        }
    }

    /// Catalog, cart and bursts, available once the catalog has loaded
    struct Storefront {
        shop: Shop,
        bursts: BurstEffect,
    }

    fn window_size() -> (f32, f32) {
        let Some(window) = web_sys::window() else {
            return (0.0, 0.0);
        };
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        (w as f32, h as f32)
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Glitter Shop starting...");

        let config = ShopConfig::default();
        let document = document().ok_or_else(|| JsValue::from_str("no document"))?;
        let seed = js_sys::Date::now() as u64;

        // Background animates immediately, before the catalog arrives
        let background = Rc::new(RefCell::new(Background::new(&document, &config, seed)?));
        background.borrow_mut().clock.start();
        setup_resize(background.clone());
        request_animation_frame(background);

        let catalog = match fetch_catalog(&config.catalog_url).await {
            Ok(catalog) => catalog,
            Err(e) => {
                log::error!("Failed to load catalog: {}", e);
                return Err(JsValue::from_str(&e.to_string()));
            }
        };

        let store = Rc::new(RefCell::new(Storefront {
            bursts: BurstEffect::new(&config, seed.wrapping_add(1)),
            shop: Shop::with_memory_cart(catalog, config),
        }));

        if let Some(grid) = document.get_element_by_id("product-grid") {
            grid.set_inner_html(&store.borrow().shop.catalog_html());
        } else {
            log::warn!("#product-grid missing, products not rendered");
        }

        setup_product_grid(&document, store.clone());
        setup_cart_items(&document, store.clone());
        setup_cart_panel(&document, store.clone());

        apply_cart_view(&document, &store.borrow().shop.cart_view());

        log::info!("Glitter Shop ready ({} products)", store.borrow().shop.catalog().len());
        Ok(())
    }

    fn request_animation_frame(background: Rc<RefCell<Background>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame_loop(background, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(background: Rc<RefCell<Background>>, time: f64) {
        let keep_running = background.borrow_mut().frame(time);
        if keep_running {
            request_animation_frame(background);
        }
    }

    fn setup_resize(background: Rc<RefCell<Background>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            background.borrow_mut().resize();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Nearest ancestor of the event target matching `selector`
    fn closest_target(event: &MouseEvent, selector: &str) -> Option<Element> {
        let target: Element = event.target()?.dyn_into().ok()?;
        target.closest(selector).ok().flatten()
    }

    fn data_id(el: &Element) -> Option<u32> {
        el.get_attribute("data-id")?.parse().ok()
    }

    fn setup_product_grid(document: &Document, store: Rc<RefCell<Storefront>>) {
        let Some(grid) = document.get_element_by_id("product-grid") else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let Some(btn) = closest_target(&event, ".add-to-cart") else {
                return;
            };
            if btn.has_attribute("disabled") {
                return;
            }
            let Some(id) = data_id(&btn) else {
                return;
            };

            let events = store.borrow_mut().shop.dispatch(UiAction::AddToCart(id));
            handle_events(&store, &events, Some(&btn));
        });
        let _ = grid.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_cart_items(document: &Document, store: Rc<RefCell<Storefront>>) {
        let Some(items) = document.get_element_by_id("cart-items") else {
            log::warn!("#cart-items missing, cart controls disabled");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let Some(btn) = closest_target(&event, "button") else {
                return;
            };
            let Some(id) = data_id(&btn) else {
                return;
            };
            let classes = btn.class_list();
            let action = if classes.contains("cart-minus") {
                UiAction::Decrement(id)
            } else if classes.contains("cart-plus") {
                UiAction::Increment(id)
            } else {
                return;
            };

            let events = store.borrow_mut().shop.dispatch(action);
            handle_events(&store, &events, None);
        });
        let _ = items.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_cart_panel(document: &Document, store: Rc<RefCell<Storefront>>) {
        for (id, action) in [
            ("open-cart", UiAction::OpenCart),
            ("cart-overlay", UiAction::CloseCart),
            ("cart-close", UiAction::CloseCart),
        ] {
            let Some(el) = document.get_element_by_id(id) else {
                log::warn!("#{} missing", id);
                continue;
            };
            let store = store.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let events = store.borrow_mut().shop.dispatch(action);
                handle_events(&store, &events, None);
            });
            let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// React to shop events. `source` is the clicked button, used to place bursts.
    fn handle_events(store: &Rc<RefCell<Storefront>>, events: &[ShopEvent], source: Option<&Element>) {
        let Some(document) = document() else {
            return;
        };
        for event in events {
            match *event {
                ShopEvent::CartChanged(change) => {
                    log::debug!("Cart changed: {:?}", change);
                    apply_cart_view(&document, &store.borrow().shop.cart_view());
                }
                ShopEvent::PanelToggled { open } => toggle_cart_panel(&document, open),
                ShopEvent::BurstRequested { .. } => {
                    if let Some(btn) = source {
                        let rect = btn.get_bounding_client_rect();
                        let x = (rect.left() + rect.width() / 2.0) as f32;
                        spawn_burst(&document, store, x, rect.top() as f32);
                    }
                }
            }
        }
    }

    /// Replace the three cart regions from the view
    fn apply_cart_view(document: &Document, view: &CartViewModel) {
        if let Some(el) = document.get_element_by_id("cart-count") {
            el.set_text_content(Some(&view.badge));
        }
        if let Some(el) = document.get_element_by_id("cart-items") {
            el.set_inner_html(&view.items_html());
        }
        if let Some(el) = document.get_element_by_id("cart-total") {
            el.set_text_content(Some(&view.total));
        }
        if let Some(el) = document
            .get_element_by_id("cart-footer")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = el.style().set_property("display", view.footer_display());
        }
    }

    fn toggle_cart_panel(document: &Document, open: bool) {
        for id in ["cart-overlay", "cart-panel"] {
            if let Some(el) = document.get_element_by_id(id) {
                let _ = el.class_list().toggle_with_force("open", open);
            }
        }
    }

    /// Put a burst's glyphs on the page. Each glyph gets a transition on the
    /// next frame and a separate removal timer.
    fn spawn_burst(document: &Document, store: &Rc<RefCell<Storefront>>, x: f32, y: f32) {
        let (Some(window), Some(body)) = (web_sys::window(), document.body()) else {
            return;
        };

        let now = js_sys::Date::now();
        let (glyphs, transition_ms, lifetime_ms) = {
            let mut s = store.borrow_mut();
            let glyphs = s.bursts.burst(x, y, now);
            (glyphs, s.bursts.transition_ms(), s.bursts.lifetime_ms())
        };

        for glyph in glyphs {
            let Ok(span) = document.create_element("span") else {
                continue;
            };
            span.set_text_content(Some(&glyph.glyph));
            let _ = span.set_attribute("style", &glyph.initial_style(transition_ms));
            if body.append_child(&span).is_err() {
                continue;
            }

            // Transition
            {
                let span = span.clone();
                let transform = glyph.final_transform();
                let closure = Closure::once(move |_time: f64| {
                    if let Ok(el) = span.dyn_into::<HtmlElement>() {
                        let style = el.style();
                        let _ = style.set_property("transform", &transform);
                        let _ = style.set_property("opacity", "0");
                    }
                });
                let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
                closure.forget();
            }

            // Removal
            {
                let store = store.clone();
                let closure = Closure::once(move || {
                    span.remove();
                    let removed = store.borrow_mut().bursts.drain_due(js_sys::Date::now());
                    log::debug!("Removed {} burst glyphs", removed.len());
                });
                let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    closure.as_ref().unchecked_ref(),
                    lifetime_ms as i32,
                );
                closure.forget();
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_shop::run().await
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Glitter Shop (native) starting...");
    log::info!("The shop itself runs in the browser - build for wasm32 and serve it");

    if let Err(e) = headless_session() {
        log::error!("Headless session failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Load the bundled catalog, shop a little, and animate a few seconds of background
#[cfg(not(target_arch = "wasm32"))]
fn headless_session() -> Result<(), glitter_shop::CatalogError> {
    use glitter_shop::effects::{AnimationLoop, BurstEffect, ParticleField};
    use glitter_shop::{Catalog, CartStore, Shop, ShopConfig, ShopEvent, UiAction};

    let config = ShopConfig::default();
    let catalog = Catalog::from_json(include_str!("../assets/products.json"))?;
    log::info!("Catalog: {} products", catalog.len());

    let first = catalog.products().first().map(|p| p.id);
    let mut shop = Shop::with_memory_cart(catalog, config.clone());
    let mut bursts = BurstEffect::new(&config, 7);

    if let Some(id) = first {
        for action in [
            UiAction::OpenCart,
            UiAction::AddToCart(id),
            UiAction::AddToCart(id),
            UiAction::Increment(id),
            UiAction::Decrement(id),
        ] {
            for event in shop.dispatch(action) {
                match event {
                    ShopEvent::CartChanged(change) => {
                        let view = shop.cart_view();
                        log::info!("{:?} -> badge '{}', total {}", change, view.badge, view.total);
                    }
                    ShopEvent::BurstRequested { id } => {
                        let glyphs = bursts.burst(400.0, 300.0, 0.0);
                        log::info!("Burst for product {}: {} glyphs", id, glyphs.len());
                    }
                    ShopEvent::PanelToggled { open } => log::info!("Cart panel open: {}", open),
                }
            }
        }
    }
    log::info!(
        "Cart: {} items, {} {}",
        shop.cart().totals().items,
        shop.cart().totals().price,
        config.currency
    );
    log::info!("Glyphs removed after lifetime: {}", bursts.drain_due(config.burst_lifetime_ms).len());

    let mut field = ParticleField::new(&config, 1280.0, 720.0, 42);
    let mut clock = AnimationLoop::new();
    clock.start();
    let frames = clock.advance(180, |_| field.step());
    let lowest = field
        .particles()
        .iter()
        .map(|p| p.pos.y)
        .fold(f32::NEG_INFINITY, f32::max);
    log::info!("Animated {} frames, lowest particle at y={:.1}", frames, lowest);
    clock.stop();

    Ok(())
}
