use yew::prelude::*;

use crate::config;

#[derive(Properties, PartialEq)]
pub struct BookCallProps {
    /// Prefills the scheduling form when the visitor already told us.
    #[prop_or_default]
    pub name: Option<String>,
    #[prop_or_default]
    pub email: Option<String>,
    #[prop_or(true)]
    pub full: bool,
}

#[function_component(BookCall)]
pub fn book_call(props: &BookCallProps) -> Html {
    let link = config::calendar_link(props.name.as_deref(), props.email.as_deref());

    let button = html! {
        <a class="book-button" href={link} target="_blank" rel="noopener noreferrer">
            <span>{"Book a Free Intro Call"}</span>
        </a>
    };

    if !props.full {
        return button;
    }

    html! {
        <section id="join-club" class="book-call">
            <style>
                {r#"
                    .book-call {
                        position: relative;
                        padding: 10rem 1.5rem;
                        background: radial-gradient(ellipse 60% 50% at 50% 60%, rgba(201,168,76,0.07) 0%, #0D0D12 70%);
                        text-align: center;
                    }
                    .book-call h2 {
                        font-family: 'Playfair Display', serif;
                        font-style: italic;
                        font-size: clamp(3.5rem, 9vw, 7rem);
                        line-height: 1;
                        color: #FAF8F5;
                        margin: 2rem 0;
                    }
                    .book-call p {
                        max-width: 28rem;
                        margin: 0 auto 2.5rem;
                        color: rgba(250, 248, 245, 0.5);
                        font-size: 1.125rem;
                        line-height: 1.6;
                    }
                    .book-eyebrow {
                        font-family: monospace;
                        font-size: 0.75rem;
                        letter-spacing: 0.2em;
                        text-transform: uppercase;
                        color: rgba(201, 168, 76, 0.5);
                    }
                    .book-button {
                        display: inline-block;
                        background: #C9A84C;
                        color: #0D0D12;
                        padding: 1.25rem 2.5rem;
                        border-radius: 9999px;
                        font-weight: 600;
                        text-decoration: none;
                        box-shadow: 0 0 40px rgba(201, 168, 76, 0.15);
                        transition: box-shadow 0.3s ease;
                    }
                    .book-button:hover {
                        box-shadow: 0 0 60px rgba(201, 168, 76, 0.3);
                    }
                    .book-powered {
                        display: block;
                        margin-top: 1rem;
                        font-family: monospace;
                        font-size: 0.75rem;
                        text-transform: uppercase;
                        letter-spacing: 0.2em;
                        color: rgba(250, 248, 245, 0.2);
                    }
                "#}
            </style>
            <span class="book-eyebrow">{"— Book a Session"}</span>
            <h2>{"Let's talk."}</h2>
            <p>{"30 minutes. No pitch. Just an honest conversation about where you want to go."}</p>
            { button }
            <span class="book-powered">{"Powered by Cal.com"}</span>
        </section>
    }
}
