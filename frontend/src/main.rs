use yew::prelude::*;
use yew_router::prelude::*;
use log::{info, Level};
use web_sys::MouseEvent;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

mod carousel;
mod config;
mod guard;
mod submission;
mod components {
    pub mod book_call;
    pub mod testimonials;
}
mod pages {
    pub mod form;
    pub mod home;
}

use pages::{
    form::FormPage,
    home::Home,
};


#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/form")]
    Form,
    #[not_found]
    #[at("/404")]
    NotFound,
}


fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        },
        Route::Form => {
            info!("Rendering Form page");
            html! { <FormPage /> }
        },
        Route::NotFound => {
            info!("Unknown route, redirecting home");
            html! { <Redirect<Route> to={Route::Home} /> }
        },
    }
}


#[function_component(Nav)]
pub fn nav() -> Html {
    let menu_open = use_state(|| false);
    let is_scrolled = use_state(|| false);

    {
        let is_scrolled = is_scrolled.clone();
        use_effect_with_deps(move |_| {
            let destructor: Box<dyn FnOnce()> = if let Some(window) = web_sys::window() {
                let scroll_callback = Closure::<dyn Fn()>::new({
                    let is_scrolled = is_scrolled.clone();
                    move || {
                        if let Some(win) = web_sys::window() {
                            if let Ok(scroll_y) = win.scroll_y() {
                                is_scrolled.set(scroll_y > 80.0);
                            }
                        }
                    }
                });

                let _ = window.add_event_listener_with_callback("scroll", scroll_callback.as_ref().unchecked_ref());

                Box::new(move || {
                    let _ = window.remove_event_listener_with_callback("scroll", scroll_callback.as_ref().unchecked_ref());
                })
            } else {
                Box::new(|| ())
            };
            destructor
        }, ());
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| {
            menu_open.set(false);
        })
    };

    let menu_class = if *menu_open {
        "nav-right mobile-menu-open"
    } else {
        "nav-right"
    };

    html! {
        <nav class={classes!("top-nav", (*is_scrolled).then(|| "scrolled"))}>
            <style>
                {r#"
                    body {
                        margin: 0;
                        background: #0D0D12;
                        font-family: Inter, -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
                    }
                    .top-nav {
                        position: fixed;
                        top: 0;
                        left: 0;
                        right: 0;
                        z-index: 50;
                        transition: background 0.3s ease;
                    }
                    .top-nav.scrolled {
                        background: rgba(13, 13, 18, 0.85);
                        backdrop-filter: blur(12px);
                    }
                    .nav-content {
                        max-width: 80rem;
                        margin: 0 auto;
                        padding: 1.25rem 1.5rem;
                        display: flex;
                        align-items: center;
                        justify-content: space-between;
                    }
                    .nav-logo {
                        color: #FAF8F5;
                        font-weight: 700;
                        text-decoration: none;
                    }
                    .nav-right {
                        display: flex;
                        align-items: center;
                        gap: 2rem;
                    }
                    .nav-link {
                        color: rgba(250, 248, 245, 0.7);
                        text-decoration: none;
                        font-size: 0.875rem;
                    }
                    .nav-cta {
                        background: #C9A84C;
                        color: #0D0D12;
                        padding: 0.6rem 1.25rem;
                        border-radius: 9999px;
                        text-decoration: none;
                        font-weight: 600;
                        font-size: 0.875rem;
                    }
                    .burger-menu {
                        display: none;
                        flex-direction: column;
                        gap: 5px;
                        background: none;
                        border: none;
                        cursor: pointer;
                    }
                    .burger-menu span {
                        width: 22px;
                        height: 2px;
                        background: #FAF8F5;
                    }
                    @media (max-width: 768px) {
                        .burger-menu {
                            display: flex;
                        }
                        .nav-right {
                            display: none;
                        }
                        .nav-right.mobile-menu-open {
                            display: flex;
                            flex-direction: column;
                            position: absolute;
                            top: 100%;
                            left: 0;
                            right: 0;
                            padding: 1.5rem;
                            background: rgba(13, 13, 18, 0.95);
                        }
                    }
                "#}
            </style>
            <div class="nav-content">
                <Link<Route> to={Route::Home} classes="nav-logo">
                    {"OpportuneAI"}
                </Link<Route>>

                <button class="burger-menu" onclick={toggle_menu}>
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <div class={menu_class}>
                    <a href="/#testimonials" class="nav-link" onclick={close_menu.clone()}>
                        {"Members"}
                    </a>
                    <a href="/#join-club" class="nav-link" onclick={close_menu.clone()}>
                        {"Let's Talk!"}
                    </a>
                    <a href="/form?type=waitlist" class="nav-cta" onclick={close_menu}>
                        {"Join the Waitlist"}
                    </a>
                </div>
            </div>
        </nav>
    }
}


#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <Nav />
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}


fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    if let Err(e) = console_log::init_with_level(Level::Info) {
        gloo_console::error!(format!("error initializing log: {}", e));
    }

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
