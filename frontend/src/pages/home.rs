use yew::prelude::*;

use crate::components::book_call::BookCall;
use crate::components::testimonials::Testimonials;

#[function_component(Home)]
pub fn home() -> Html {
    // Scroll to top only on initial mount
    use_effect_with_deps(
        move |_| {
            if let Some(window) = web_sys::window() {
                window.scroll_to_with_x_and_y(0.0, 0.0);
            }
            || ()
        },
        (),
    );

    html! {
        <div class="home">
            <style>
                {r#"
                    .home {
                        background: #0D0D12;
                        color: #FAF8F5;
                    }
                    .home-hero {
                        min-height: 80vh;
                        display: flex;
                        flex-direction: column;
                        justify-content: flex-end;
                        padding: 8rem 1.5rem 6rem;
                        max-width: 80rem;
                        margin: 0 auto;
                    }
                    .home-hero h1 {
                        font-size: clamp(2.5rem, 7vw, 5.5rem);
                        line-height: 1;
                        margin: 0 0 1.5rem;
                    }
                    .home-hero h1 em {
                        font-family: 'Playfair Display', serif;
                        color: #C9A84C;
                    }
                    .home-hero p {
                        max-width: 36rem;
                        color: rgba(250, 248, 245, 0.6);
                        font-size: 1.125rem;
                        line-height: 1.6;
                    }
                    .home-ctas {
                        display: flex;
                        flex-wrap: wrap;
                        gap: 1rem;
                        margin-top: 2.5rem;
                    }
                    .home-cta {
                        padding: 1rem 2rem;
                        border-radius: 9999px;
                        text-decoration: none;
                        font-weight: 600;
                        font-size: 0.875rem;
                    }
                    .home-cta.primary {
                        background: #C9A84C;
                        color: #0D0D12;
                    }
                    .home-cta.secondary {
                        border: 1px solid rgba(201, 168, 76, 0.3);
                        color: #C9A84C;
                    }
                "#}
            </style>
            <section class="home-hero">
                <h1>{"Upskilling meets "}<em>{"Precision."}</em></h1>
                <p>
                    {"A private members' club offering practical career development, curated AI resources, and a collaborative network of AI enthusiasts."}
                </p>
                <div class="home-ctas">
                    <a class="home-cta primary" href="/form?type=waitlist">{"Join the Waiting List"}</a>
                    <a class="home-cta secondary" href="/form?type=partners">{"Enterprise Partnerships"}</a>
                </div>
            </section>
            <Testimonials />
            <BookCall />
        </div>
    }
}
