use gloo_console::log;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_hooks::prelude::*;
use yew_router::prelude::*;

use crate::components::book_call::BookCall;
use crate::config;
use crate::guard::ledger::LocalStorageStore;
use crate::guard::{Decision, Field, FormInput, InterestKind, SubmissionGuard, Timestamp, ValidationResult};
use crate::submission::{send_submission, SubmissionPayload};
use crate::Route;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    Idle,
    Loading,
    Success,
    Error,
    RateLimited { minutes: i64 },
}

/// Roughly one round trip to the form backend.
const DECOY_DELAY_MS: u32 = 900;

/// Status shown right after the guard decides. A discarded bot submission
/// goes through the same loading state as a real one.
fn status_after(decision: &Decision, now: Timestamp) -> Status {
    match decision {
        Decision::SilentAccept | Decision::Proceed => Status::Loading,
        Decision::Invalid(_) => Status::Idle,
        Decision::RateLimited { retry_at } => Status::RateLimited {
            minutes: minutes_until(*retry_at, now),
        },
    }
}

fn minutes_until(retry_at: Timestamp, now: Timestamp) -> i64 {
    let remaining = (retry_at - now).max(0);
    ((remaining + 59_999) / 60_000).max(1)
}

fn text_setter(form: &UseStateHandle<FormInput>, set: fn(&mut FormInput, String)) -> Callback<InputEvent> {
    let form = form.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let mut next = (*form).clone();
        set(&mut next, input.value());
        form.set(next);
    })
}

#[function_component(FormPage)]
pub fn form_page() -> Html {
    let kind = use_search_param("type".to_string());
    let form = use_state(|| FormInput {
        interest: InterestKind::from_query(kind.as_deref()),
        ..FormInput::default()
    });
    let errors = use_state(ValidationResult::default);
    let status = use_state(|| Status::Idle);
    let guard = use_mut_ref(|| SubmissionGuard::new(LocalStorageStore));
    let navigator = use_navigator();

    let go_home = Callback::from(move |_: MouseEvent| {
        if let Some(navigator) = navigator.as_ref() {
            navigator.push(&Route::Home);
        }
    });

    let on_name = text_setter(&form, |f, v| f.name = v);
    let on_email = text_setter(&form, |f, v| f.email = v);
    let on_role = text_setter(&form, |f, v| f.role = v);
    let on_honeypot = text_setter(&form, |f, v| f.honeypot = v);
    let on_message = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.message = input.value();
            form.set(next);
        })
    };

    let on_submit = {
        let form = form.clone();
        let errors = errors.clone();
        let status = status.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *status == Status::Loading {
                return;
            }
            let input = (*form).clone();
            let now = chrono::Utc::now().timestamp_millis();
            let decision = guard.borrow_mut().evaluate(&input, now);

            errors.set(match &decision {
                Decision::Invalid(result) => result.clone(),
                _ => ValidationResult::default(),
            });
            status.set(status_after(&decision, now));

            match decision {
                Decision::SilentAccept => {
                    let status = status.clone();
                    spawn_local(async move {
                        TimeoutFuture::new(DECOY_DELAY_MS).await;
                        status.set(Status::Success);
                    });
                }
                Decision::Proceed => {
                    let status = status.clone();
                    let payload = SubmissionPayload::from(&input);
                    spawn_local(async move {
                        match send_submission(config::get_form_endpoint(), &payload).await {
                            Ok(()) => status.set(Status::Success),
                            Err(e) => {
                                log!("Submission failed: {}", e.to_string());
                                status.set(Status::Error);
                            }
                        }
                    });
                }
                Decision::Invalid(_) | Decision::RateLimited { .. } => {}
            }
        })
    };

    let interest_options = InterestKind::all().into_iter().map(|option| {
        let selected = form.interest == option;
        let onchange = {
            let form = form.clone();
            Callback::from(move |_: Event| {
                let mut next = (*form).clone();
                next.interest = option;
                form.set(next);
            })
        };
        html! {
            <label class={classes!("interest-option", selected.then(|| "selected"))}>
                <input type="radio" name="interest" value={option.value()}
                    checked={selected} {onchange} />
                <span>{option.label()}</span>
            </label>
        }
    });

    let field_error = |field: Field| match errors.error(field) {
        Some(message) => html! { <p class="field-error">{message}</p> },
        None => html! {},
    };

    let is_waitlist = form.interest == InterestKind::Waitlist;
    let is_loading = *status == Status::Loading;

    let body = if *status == Status::Success {
        html! {
            <div class="form-success">
                <h2>{"We got you."}</h2>
                <p>
                    { if is_waitlist {
                        "You're on the list. We'll reach out when the next cohort opens."
                    } else {
                        "Thanks for reaching out. Our partnerships team will be in touch shortly."
                    } }
                </p>
                <BookCall full={false} name={Some(form.name.clone())} email={Some(form.email.clone())} />
                <button class="form-back" onclick={go_home.clone()}>{"Back to Home"}</button>
            </div>
        }
    } else {
        html! {
            <>
                <div class="form-header">
                    <p class="form-eyebrow">{"— Get in touch"}</p>
                    <h1>{ if is_waitlist { "Reserve your seat." } else { "Let's build together." } }</h1>
                    <p class="form-lede">
                        { if is_waitlist {
                            "Spots are limited. Tell us a little about where you're headed."
                        } else {
                            "Serious about transformation at scale? Let's talk."
                        } }
                    </p>
                </div>
                <form class="lead-form" onsubmit={on_submit} novalidate={true}>
                    <div class="form-field">
                        <label>{"I'm here to"}</label>
                        <div class="interest-options">{ for interest_options }</div>
                    </div>

                    <div class="form-field">
                        <label for="name">{"Full Name"}</label>
                        <input id="name" type="text" name="name" placeholder="Jane Smith"
                            value={form.name.clone()} oninput={on_name} />
                        { field_error(Field::Name) }
                    </div>

                    <div class="form-field">
                        <label for="email">{"Email"}</label>
                        <input id="email" type="email" name="email" placeholder="jane@company.com"
                            value={form.email.clone()} oninput={on_email} />
                        { field_error(Field::Email) }
                    </div>

                    <div class="form-field">
                        <label for="role">{ if is_waitlist { "Current Role" } else { "Company & Role" } }</label>
                        <input id="role" type="text" name="role"
                            placeholder={ if is_waitlist { "e.g. Software Engineer at Acme" } else { "e.g. Head of L&D at Acme Corp" } }
                            value={form.role.clone()} oninput={on_role} />
                        { field_error(Field::Role) }
                    </div>

                    <div class="form-field">
                        <label for="message">{ if is_waitlist { "What do you want to build?" } else { "Tell us about your team" } }</label>
                        <textarea id="message" name="message" rows="4"
                            placeholder={ if is_waitlist {
                                "Share the project, skill, or outcome you're working toward…"
                            } else {
                                "Team size, current challenges, what success looks like for you…"
                            } }
                            value={form.message.clone()} oninput={on_message} />
                    </div>

                    // Off-screen trap for bots that fill every input.
                    <div class="form-trap" aria-hidden="true">
                        <label for="company_website">{"Company website"}</label>
                        <input id="company_website" type="text" name="company_website"
                            tabindex="-1" autocomplete="off"
                            value={form.honeypot.clone()} oninput={on_honeypot} />
                    </div>

                    {
                        match *status {
                            Status::Error => html! {
                                <p class="form-status">{"Something went wrong. Please try again or email us directly."}</p>
                            },
                            Status::RateLimited { minutes } => html! {
                                <p class="form-status">
                                    { format!("You've sent a few requests already. Please try again in {} minute{}.", minutes, if minutes == 1 { "" } else { "s" }) }
                                </p>
                            },
                            _ => html! {},
                        }
                    }

                    <button type="submit" class="form-submit" disabled={is_loading}>
                        <span>
                            { if is_loading {
                                "Sending…"
                            } else if is_waitlist {
                                "Join the Waiting List"
                            } else {
                                "Contact Partners"
                            } }
                        </span>
                    </button>
                </form>
            </>
        }
    };

    html! {
        <div class="form-page">
            <style>
                {r#"
                    .form-page {
                        min-height: 100vh;
                        padding: 2rem 1.5rem 4rem;
                        background: radial-gradient(ellipse 70% 55% at 50% 0%, rgba(201,168,76,0.06) 0%, #0D0D12 60%);
                        color: #FAF8F5;
                    }
                    .form-container {
                        max-width: 32rem;
                        margin: 4rem auto 0;
                    }
                    .form-back {
                        background: none;
                        border: none;
                        cursor: pointer;
                        font-family: monospace;
                        font-size: 0.75rem;
                        letter-spacing: 0.2em;
                        text-transform: uppercase;
                        color: rgba(201, 168, 76, 0.5);
                    }
                    .form-back:hover {
                        color: #C9A84C;
                    }
                    .form-eyebrow {
                        font-family: monospace;
                        font-size: 0.75rem;
                        letter-spacing: 0.2em;
                        text-transform: uppercase;
                        color: rgba(201, 168, 76, 0.5);
                    }
                    .form-header h1 {
                        font-family: 'Playfair Display', serif;
                        font-style: italic;
                        font-size: 3rem;
                        margin: 1rem 0 0.75rem;
                    }
                    .form-lede {
                        color: rgba(250, 248, 245, 0.4);
                        line-height: 1.6;
                        margin-bottom: 2.5rem;
                    }
                    .lead-form {
                        display: flex;
                        flex-direction: column;
                        gap: 1.25rem;
                    }
                    .form-field label {
                        display: block;
                        font-family: monospace;
                        font-size: 0.75rem;
                        letter-spacing: 0.2em;
                        text-transform: uppercase;
                        color: rgba(201, 168, 76, 0.4);
                        margin-bottom: 0.5rem;
                    }
                    .form-field input[type="text"],
                    .form-field input[type="email"],
                    .form-field textarea {
                        width: 100%;
                        box-sizing: border-box;
                        background: rgba(255, 255, 255, 0.04);
                        border: 1px solid rgba(255, 255, 255, 0.08);
                        border-radius: 0.75rem;
                        padding: 1rem 1.25rem;
                        color: #FAF8F5;
                        font-size: 0.875rem;
                        resize: none;
                    }
                    .form-field input:focus,
                    .form-field textarea:focus {
                        outline: none;
                        border-color: rgba(201, 168, 76, 0.5);
                    }
                    .interest-options {
                        display: grid;
                        gap: 0.75rem;
                    }
                    .interest-option {
                        display: flex !important;
                        align-items: center;
                        gap: 1rem;
                        padding: 1rem 1.25rem;
                        border-radius: 1rem;
                        border: 1px solid rgba(255, 255, 255, 0.08);
                        cursor: pointer;
                        text-transform: none !important;
                        letter-spacing: normal !important;
                        font-family: inherit !important;
                        font-size: 0.875rem !important;
                        color: rgba(250, 248, 245, 0.7) !important;
                    }
                    .interest-option.selected {
                        border-color: rgba(201, 168, 76, 0.6);
                        background: rgba(201, 168, 76, 0.08);
                    }
                    .field-error,
                    .form-status {
                        font-family: monospace;
                        font-size: 0.75rem;
                        color: rgba(248, 113, 113, 0.8);
                        margin: 0.5rem 0 0;
                    }
                    .form-trap {
                        position: absolute;
                        left: -10000px;
                        width: 1px;
                        height: 1px;
                        overflow: hidden;
                    }
                    .form-submit {
                        width: 100%;
                        padding: 1.25rem;
                        border: none;
                        border-radius: 9999px;
                        background: #C9A84C;
                        color: #0D0D12;
                        font-weight: 600;
                        cursor: pointer;
                    }
                    .form-submit:disabled {
                        opacity: 0.6;
                        cursor: not-allowed;
                    }
                    .form-success {
                        display: flex;
                        flex-direction: column;
                        align-items: center;
                        gap: 1.5rem;
                        text-align: center;
                    }
                    .form-success h2 {
                        font-family: 'Playfair Display', serif;
                        font-style: italic;
                        font-size: 3rem;
                        margin: 0;
                    }
                    .form-success p {
                        color: rgba(250, 248, 245, 0.5);
                        max-width: 24rem;
                        line-height: 1.6;
                    }
                "#}
            </style>
            <button class="form-back" onclick={go_home}>{"← Back to OpportuneAI"}</button>
            <div class="form-container">
                { body }
            </div>
        </div>
    }
}
