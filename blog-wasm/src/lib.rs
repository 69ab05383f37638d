//! Браузерная точка входа блога.
//!
//! На `wasm32` модуль при загрузке находит на странице якоря списка или поста,
//! читает посты из Firestore через `fetch` и отрисовывает их в DOM.
//! На остальных платформах собираются только настройки.

pub mod config;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod firestore;

#[cfg(target_arch = "wasm32")]
mod entry {
    use blog_core::{PageAddress, PostRepository, SiteProfile, activate_page};
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::Document;

    use crate::config::BrowserConfig;
    use crate::dom::DomSurface;
    use crate::firestore::BrowserFirestore;

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();

        let Some(document) = web_sys::window().and_then(|window| window.document()) else {
            return;
        };

        if document.ready_state() == "loading" {
            let target = document.clone();
            let on_ready: Closure<dyn FnMut()> = Closure::once(move || activate(target));
            let _ = document.add_event_listener_with_callback(
                "DOMContentLoaded",
                on_ready.as_ref().unchecked_ref(),
            );
            on_ready.forget();
        } else {
            activate(document);
        }
    }

    fn activate(document: Document) {
        let Some(config) = BrowserConfig::from_build_env() else {
            web_sys::console::warn_1(&"blog: FIRESTORE_PROJECT_ID was not set at build time".into());
            return;
        };
        let href = web_sys::window()
            .and_then(|window| window.location().href().ok())
            .unwrap_or_default();

        wasm_bindgen_futures::spawn_local(async move {
            let collection = config.collection.clone();
            let repo = PostRepository::with_collection(BrowserFirestore::new(config), collection);
            let mut surface = DomSurface::new(document);

            let outcome = activate_page(
                &repo,
                &mut surface,
                &PageAddress::new(href),
                &SiteProfile::default(),
            )
            .await;
            if let Err(err) = outcome {
                web_sys::console::error_1(&format!("blog: {err}").into());
            }
        });
    }
}
