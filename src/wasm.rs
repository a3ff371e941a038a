//! Browser entry points.
//!
//! Each page template calls one `init_*` function with the image handler
//! path once the DOM is parsed. Binding errors are returned to the caller
//! as JS errors naming the missing element. Listeners live as long as the
//! page, so they are never dropped.

use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, HtmlInputElement};

use crate::config::PageConfig;
use crate::dom::web::WebPage;
use crate::error::PageError;
use crate::pages::{ItemBidPage, ItemSellPage, PageKind, WelcomePage};
use crate::service::http::{BrowserFile, HttpImageService};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    // The console logger accepts everything; the page config narrows it down
    if console_log::init_with_level(log::Level::Trace).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::set_max_level(PageConfig::default().log_level.to_level_filter());
}

/// Set up the item bid page controllers.
#[wasm_bindgen]
pub fn init_item_bid(image_handler_path: &str) -> Result<(), JsValue> {
    mount(PageKind::ItemBid, PageConfig::new(image_handler_path))
}

/// Set up the item sell page controllers.
#[wasm_bindgen]
pub fn init_item_sell(image_handler_path: &str) -> Result<(), JsValue> {
    mount(PageKind::ItemSell, PageConfig::new(image_handler_path))
}

/// Set up the welcome page controllers.
#[wasm_bindgen]
pub fn init_welcome(image_handler_path: &str) -> Result<(), JsValue> {
    mount(PageKind::Welcome, PageConfig::new(image_handler_path))
}

/// Set up a page from a full JSON configuration.
///
/// `page` is one of `item_bid`, `item_sell` or `welcome`.
#[wasm_bindgen]
pub fn init_page_with_config(page: &str, config_json: &str) -> Result<(), JsValue> {
    let kind = page.parse::<PageKind>().map_err(|e| to_js(&e))?;
    let config = PageConfig::from_json(config_json).map_err(|e| to_js(&e))?;
    mount(kind, config)
}

fn to_js(err: &dyn std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn mount(kind: PageKind, config: PageConfig) -> Result<(), JsValue> {
    config.validate().map_err(|e| to_js(&e))?;
    log::set_max_level(config.log_level.to_level_filter());

    let result = match kind {
        PageKind::ItemBid => mount_item_bid(&config),
        PageKind::ItemSell => mount_item_sell(&config),
        PageKind::Welcome => mount_welcome(&config),
    };

    match result {
        Ok(()) => {
            log::info!("{kind:?} page ready ({})", config.image_handler_path);
            Ok(())
        }
        Err(e) => {
            log::error!("{kind:?} page setup failed: {e}");
            Err(to_js(&e))
        }
    }
}

/// Run `callback` on window load, or now if the page is already loaded.
fn on_window_load(page: &Rc<WebPage>, callback: impl FnOnce(Rc<WebPage>) + 'static) {
    if page.is_loaded() {
        callback(page.clone());
    } else {
        let loaded = page.clone();
        EventListener::once(page.window(), "load", move |_| callback(loaded)).forget();
    }
}

fn on_window_resize(page: &Rc<WebPage>, mut callback: impl FnMut(&WebPage) + 'static) {
    let resized = page.clone();
    EventListener::new(page.window(), "resize", move |_| callback(&resized)).forget();
}

fn mount_item_bid(config: &PageConfig) -> Result<(), PageError> {
    let page = Rc::new(WebPage::from_window()?);
    let service = Rc::new(HttpImageService::new(&config.image_handler_path));
    let controller = Rc::new(ItemBidPage::initialize(&*page, config)?);

    {
        let controller = controller.clone();
        on_window_resize(&page, move |page| {
            controller.on_resize(page);
        });
    }

    on_window_load(&page, move |page| {
        spawn_local(async move {
            controller.on_load(&*page, &*service).await;
        });
    });

    Ok(())
}

fn mount_item_sell(config: &PageConfig) -> Result<(), PageError> {
    let page = Rc::new(WebPage::from_window()?);
    let service = Rc::new(HttpImageService::new(&config.image_handler_path));
    let controller = Rc::new(ItemSellPage::initialize(&*page, config)?);

    {
        let controller = controller.clone();
        on_window_resize(&page, move |page| {
            controller.on_resize(page);
        });
    }

    {
        let (page, listener_controller) = (page.clone(), controller.clone());
        EventListener::new(controller.uploader().trigger(), "click", move |_| {
            listener_controller.on_add_picture_click(&*page);
        })
        .forget();
    }

    // The input sits inside the trigger: its click must not reach it again
    EventListener::new(controller.uploader().input(), "click", |event| {
        event.stop_propagation();
    })
    .forget();

    {
        let (page, service, listener_controller) =
            (page.clone(), service.clone(), controller.clone());
        EventListener::new(controller.uploader().input(), "change", move |event| {
            let files = selected_files(event);
            for task in listener_controller.on_files_selected(&*page, files) {
                let (page, service, controller) =
                    (page.clone(), service.clone(), listener_controller.clone());
                spawn_local(async move {
                    controller
                        .on_upload(&*page, &*service, task)
                        .await;
                });
            }
        })
        .forget();
    }

    on_window_load(&page, move |page| {
        spawn_local(async move {
            controller.on_load(&*page, &*service).await;
        });
    });

    Ok(())
}

fn selected_files(event: &Event) -> Vec<BrowserFile> {
    let Some(input) = event
        .target()
        .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
    else {
        return Vec::new();
    };

    input
        .files()
        .map(|list| {
            (0..list.length())
                .filter_map(|index| list.get(index))
                .map(BrowserFile)
                .collect()
        })
        .unwrap_or_default()
}

fn mount_welcome(config: &PageConfig) -> Result<(), PageError> {
    let page = Rc::new(WebPage::from_window()?);
    let service = Rc::new(HttpImageService::new(&config.image_handler_path));
    let controller = Rc::new(WelcomePage::initialize(&*page, config)?);

    if let Some(filter) = controller.filter() {
        for radio in filter.radios() {
            let (page, listener_controller) = (page.clone(), controller.clone());
            EventListener::new(radio, "click", move |_| {
                listener_controller.on_radio_click(&*page);
            })
            .forget();
        }
    }

    // animationend bubbles up to the card image container
    for card in controller.carousel().cards() {
        let (page, listener_controller) = (page.clone(), controller.clone());
        EventListener::new(&card.images, "animationend", move |event| {
            if let Some(image) = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
            {
                listener_controller.on_animation_end(&*page, &image);
            }
        })
        .forget();
    }

    on_window_load(&page, move |page| {
        // One request per card, all in flight together
        for index in 0..controller.carousel().cards().len() {
            let (page, service, controller) = (page.clone(), service.clone(), controller.clone());
            spawn_local(async move {
                controller
                    .carousel()
                    .load_card(&*page, &*service, index)
                    .await;
            });
        }
    });

    Ok(())
}
