use log::debug;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::carousel::{CarouselController, Commit, DragChannel, Motion};
use crate::config;

struct Testimonial {
    quote: &'static str,
    name: &'static str,
    role: &'static str,
    detail: &'static str,
    avatar: &'static str,
}

const TESTIMONIALS: [Testimonial; 5] = [
    Testimonial {
        quote: "I kept putting off learning AI tools because every course felt the same, 40 hours of theory, 2 hours of anything useful. OpportuneAI was the first place where I actually shipped something on day two. Got promoted four months later. My manager still thinks I hired a junior.",
        name: "Lauren M.",
        role: "Product Manager · Fintech",
        detail: "Member since Jan 2026",
        avatar: "https://randomuser.me/api/portraits/women/44.jpg",
    },
    Testimonial {
        quote: "Landed my first $3.4k automation client three weeks after joining. I'm not even going to pretend I knew what I was doing. I basically reverse-engineered a workflow from a thread in the community and pitched it. Nobody told me it was that simple to just start.",
        name: "James R.",
        role: "English Teacher (Now Freelance Developer)",
        detail: "Member since Nov 2025",
        avatar: "https://randomuser.me/api/portraits/men/32.jpg",
    },
    Testimonial {
        quote: "I almost spent $800 on a tool that someone here talked me out of in about four messages. The community isn't just motivational fluff. People will tell you when you're wrong, and that's honestly rarer than it sounds.",
        name: "Sarah K.",
        role: "Marketing Director · SaaS",
        detail: "Member since Feb 2025",
        avatar: "https://randomuser.me/api/portraits/women/68.jpg",
    },
    Testimonial {
        quote: "Took me longer than I expected to transition out of teaching, about eight months, not three. But I'm now consulting on AI curriculum for two schools and making more than I ever did in a classroom. Still check the digest every Monday without fail.",
        name: "Daniel O.",
        role: "Math Teacher",
        detail: "Member since Aug 2025",
        avatar: "https://randomuser.me/api/portraits/men/75.jpg",
    },
    Testimonial {
        quote: "The prompting guide alone was worth it. Not the 'act as a CEO' stuff, there were actual structured prompting for engineering workflows. I sent it to my whole team. We cut sprint planning from three hours to forty minutes.",
        name: "Marcus T.",
        role: "Senior Software Engineer",
        detail: "Member since Mar 2025",
        avatar: "https://randomuser.me/api/portraits/men/46.jpg",
    },
];

enum TrackInput {
    Previous,
    Next,
    Begin(DragChannel, f64, Option<f64>),
    Move(f64),
    End(f64),
    Cancel,
    Resize(f64),
}

#[derive(Clone, Copy, PartialEq)]
struct TrackView {
    index: usize,
    count: usize,
    dragging: bool,
    at_start: bool,
    at_end: bool,
    motion: Motion,
}

fn settle(commit: Commit) -> Motion {
    debug!("Testimonial track settled on {}", commit.index);
    commit.motion
}

fn apply(carousel: &mut CarouselController, input: TrackInput) -> Option<Motion> {
    match input {
        TrackInput::Previous => Some(settle(carousel.previous())),
        TrackInput::Next => Some(settle(carousel.next())),
        TrackInput::Begin(channel, x, observed) => Some(carousel.begin_drag(channel, x, observed)),
        TrackInput::Move(x) => carousel.update_drag(x),
        TrackInput::End(x) => carousel.end_drag(x).map(settle),
        TrackInput::Cancel => carousel.cancel_drag().map(settle),
        TrackInput::Resize(step) => carousel.set_step(step).ok(),
    }
}

// The CSS transition is the animation driver: a new transform replaces
// whatever transition is in flight.
fn track_style(motion: &Motion) -> String {
    match *motion {
        Motion::Set { offset } => {
            format!("transform: translateX({}px); transition: none;", offset)
        }
        Motion::Animate { to, duration_ms, easing, .. } => format!(
            "transform: translateX({}px); transition: transform {}ms {};",
            to,
            duration_ms,
            easing.css()
        ),
    }
}

impl TrackView {
    fn of(carousel: &CarouselController, motion: Motion) -> Self {
        Self {
            index: carousel.current(),
            count: carousel.item_count(),
            dragging: carousel.is_dragging(),
            at_start: carousel.at_start(),
            at_end: carousel.at_end(),
            motion,
        }
    }
}

/// Horizontal translation of a computed CSS `transform` value.
fn translate_x(transform: &str) -> Option<f64> {
    let transform = transform.trim();
    if transform == "none" {
        return Some(0.0);
    }
    let (values, column) = if let Some(rest) = transform.strip_prefix("matrix3d(") {
        (rest, 12)
    } else if let Some(rest) = transform.strip_prefix("matrix(") {
        (rest, 4)
    } else {
        return None;
    };
    values
        .strip_suffix(')')?
        .split(',')
        .nth(column)?
        .trim()
        .parse()
        .ok()
}

// Where the track is actually drawn, including mid-transition.
fn observed_offset(track: &NodeRef) -> Option<f64> {
    let element = track.cast::<web_sys::Element>()?;
    let style = web_sys::window()?.get_computed_style(&element).ok()??;
    let transform = style.get_property_value("transform").ok()?;
    translate_x(&transform)
}

fn first_touch_x(e: &TouchEvent, changed: bool) -> Option<f64> {
    let list = if changed { e.changed_touches() } else { e.touches() };
    list.get(0).map(|touch| touch.client_x() as f64)
}

#[function_component(Testimonials)]
pub fn testimonials() -> Html {
    let carousel = use_mut_ref(|| {
        CarouselController::new(TESTIMONIALS.len(), config::FALLBACK_CARD_STEP).ok()
    });
    let view = {
        let carousel = carousel.clone();
        use_state(move || {
            carousel
                .borrow()
                .as_ref()
                .map(|c| TrackView::of(c, Motion::Set { offset: 0.0 }))
        })
    };
    let first_card = use_node_ref();
    let track = use_node_ref();

    let dispatch = {
        let carousel = carousel.clone();
        let view = view.clone();
        Callback::from(move |input: TrackInput| {
            let mut slot = carousel.borrow_mut();
            let Some(carousel) = slot.as_mut() else {
                return;
            };
            if let Some(motion) = apply(carousel, input) {
                view.set(Some(TrackView::of(carousel, motion)));
            }
        })
    };

    // Card width changes with the viewport, so measure on mount and on resize.
    {
        let first_card = first_card.clone();
        let dispatch = dispatch.clone();
        use_effect_with_deps(
            move |_| {
                let measure = move || {
                    if let Some(card) = first_card.cast::<web_sys::HtmlElement>() {
                        let width = card.offset_width() as f64;
                        if width > 0.0 {
                            dispatch.emit(TrackInput::Resize(width + config::CARD_GAP));
                        }
                    }
                };
                measure();
                let destructor: Box<dyn FnOnce()> = if let Some(window) = web_sys::window() {
                    let callback = Closure::<dyn Fn()>::new(measure);
                    let _ = window.add_event_listener_with_callback(
                        "resize",
                        callback.as_ref().unchecked_ref(),
                    );
                    Box::new(move || {
                        let _ = window.remove_event_listener_with_callback(
                            "resize",
                            callback.as_ref().unchecked_ref(),
                        );
                    })
                } else {
                    Box::new(|| ())
                };
                destructor
            },
            (),
        );
    }

    let on_previous = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| dispatch.emit(TrackInput::Previous))
    };
    let on_next = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| dispatch.emit(TrackInput::Next))
    };
    let on_mouse_down = {
        let dispatch = dispatch.clone();
        let track = track.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            let observed = observed_offset(&track);
            dispatch.emit(TrackInput::Begin(DragChannel::Pointer, e.client_x() as f64, observed));
        })
    };
    let on_mouse_move = {
        let dispatch = dispatch.clone();
        Callback::from(move |e: MouseEvent| dispatch.emit(TrackInput::Move(e.client_x() as f64)))
    };
    let on_mouse_up = {
        let dispatch = dispatch.clone();
        Callback::from(move |e: MouseEvent| dispatch.emit(TrackInput::End(e.client_x() as f64)))
    };
    let on_mouse_leave = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| dispatch.emit(TrackInput::Cancel))
    };
    let on_touch_start = {
        let dispatch = dispatch.clone();
        let track = track.clone();
        Callback::from(move |e: TouchEvent| {
            if let Some(x) = first_touch_x(&e, false) {
                dispatch.emit(TrackInput::Begin(DragChannel::Touch, x, observed_offset(&track)));
            }
        })
    };
    let on_touch_move = {
        let dispatch = dispatch.clone();
        Callback::from(move |e: TouchEvent| {
            if let Some(x) = first_touch_x(&e, false) {
                dispatch.emit(TrackInput::Move(x));
            }
        })
    };
    let on_touch_end = {
        let dispatch = dispatch.clone();
        Callback::from(move |e: TouchEvent| match first_touch_x(&e, true) {
            Some(x) => dispatch.emit(TrackInput::End(x)),
            None => dispatch.emit(TrackInput::Cancel),
        })
    };
    let on_touch_cancel = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: TouchEvent| dispatch.emit(TrackInput::Cancel))
    };

    let Some(view) = *view else {
        return html! {};
    };
    let index = view.index;
    let count = view.count;
    let progress = (index + 1) as f64 / count as f64 * 100.0;

    html! {
        <section id="testimonials" class="testimonials">
            <style>
                {r#"
                    .testimonials {
                        padding: 8rem 0;
                        background: #0D0D12;
                        overflow: hidden;
                    }
                    .testi-inner {
                        max-width: 80rem;
                        margin: 0 auto;
                        padding: 0 1.5rem;
                    }
                    .testi-header {
                        display: flex;
                        justify-content: space-between;
                        align-items: flex-end;
                        gap: 1.5rem;
                        margin-bottom: 4rem;
                    }
                    .testi-eyebrow {
                        font-family: monospace;
                        font-size: 0.75rem;
                        letter-spacing: 0.2em;
                        text-transform: uppercase;
                        color: rgba(201, 168, 76, 0.5);
                    }
                    .testi-header h2 {
                        font-size: 3rem;
                        color: #FAF8F5;
                        margin: 0.75rem 0 0;
                    }
                    .testi-arrows {
                        display: flex;
                        gap: 0.75rem;
                    }
                    .testi-arrow {
                        width: 3rem;
                        height: 3rem;
                        border-radius: 50%;
                        border: 1px solid rgba(255, 255, 255, 0.1);
                        background: transparent;
                        color: rgba(250, 248, 245, 0.4);
                        cursor: pointer;
                    }
                    .testi-arrow:disabled {
                        opacity: 0.2;
                        cursor: not-allowed;
                    }
                    .testi-viewport {
                        cursor: grab;
                        user-select: none;
                        touch-action: pan-y;
                    }
                    .testi-viewport.dragging {
                        cursor: grabbing;
                    }
                    .testi-track {
                        display: flex;
                        gap: 24px;
                        width: max-content;
                    }
                    .testi-card {
                        width: min(480px, 82vw);
                        min-height: 260px;
                        flex-shrink: 0;
                        display: flex;
                        flex-direction: column;
                        justify-content: space-between;
                        background: rgba(255, 255, 255, 0.04);
                        border: 1px solid rgba(255, 255, 255, 0.07);
                        border-radius: 2rem;
                        padding: 2.5rem;
                    }
                    .testi-card blockquote {
                        margin: 0;
                        font-style: italic;
                        font-size: 1.15rem;
                        line-height: 1.7;
                        color: rgba(250, 248, 245, 0.8);
                    }
                    .testi-card footer {
                        display: flex;
                        justify-content: space-between;
                        align-items: center;
                        margin-top: 2rem;
                        padding-top: 1.5rem;
                        border-top: 1px solid rgba(255, 255, 255, 0.07);
                    }
                    .testi-person {
                        display: flex;
                        align-items: center;
                        gap: 0.75rem;
                    }
                    .testi-person img {
                        width: 40px;
                        height: 40px;
                        border-radius: 50%;
                        object-fit: cover;
                    }
                    .testi-name {
                        color: #FAF8F5;
                        font-weight: 600;
                        font-size: 0.875rem;
                        margin: 0;
                    }
                    .testi-role {
                        font-family: monospace;
                        font-size: 0.65rem;
                        text-transform: uppercase;
                        color: rgba(201, 168, 76, 0.6);
                        margin: 0.125rem 0 0;
                    }
                    .testi-detail {
                        font-family: monospace;
                        font-size: 0.6rem;
                        text-transform: uppercase;
                        color: rgba(250, 248, 245, 0.2);
                        white-space: nowrap;
                    }
                    .testi-progress {
                        margin-top: 2.5rem;
                        display: flex;
                        align-items: center;
                        gap: 1.25rem;
                    }
                    .testi-bar {
                        flex: 1;
                        height: 1px;
                        background: rgba(255, 255, 255, 0.08);
                        position: relative;
                        overflow: hidden;
                    }
                    .testi-bar-fill {
                        position: absolute;
                        inset: 0 auto 0 0;
                        background: #C9A84C;
                        transition: width 700ms ease-out;
                    }
                    .testi-counter {
                        font-family: monospace;
                        font-size: 0.75rem;
                        letter-spacing: 0.2em;
                        color: rgba(250, 248, 245, 0.25);
                        font-variant-numeric: tabular-nums;
                    }
                    @media (max-width: 768px) {
                        .testi-header {
                            flex-direction: column;
                            align-items: flex-start;
                        }
                        .testi-header h2 {
                            font-size: 2.25rem;
                        }
                    }
                "#}
            </style>
            <div class="testi-inner">
                <div class="testi-header">
                    <div>
                        <p class="testi-eyebrow">{"— Members"}</p>
                        <h2>{"From the community."}</h2>
                        <p class="testi-eyebrow">{"Unfiltered. Unsolicited. Real."}</p>
                    </div>
                    <div class="testi-arrows">
                        <button class="testi-arrow" aria-label="Previous testimonial"
                            disabled={view.at_start} onclick={on_previous}>
                            {"←"}
                        </button>
                        <button class="testi-arrow" aria-label="Next testimonial"
                            disabled={view.at_end} onclick={on_next}>
                            {"→"}
                        </button>
                    </div>
                </div>

                <div class={classes!("testi-viewport", view.dragging.then(|| "dragging"))}
                    onmousedown={on_mouse_down}
                    onmousemove={on_mouse_move}
                    onmouseup={on_mouse_up}
                    onmouseleave={on_mouse_leave}
                    ontouchstart={on_touch_start}
                    ontouchmove={on_touch_move}
                    ontouchend={on_touch_end}
                    ontouchcancel={on_touch_cancel}
                >
                    <div class="testi-track" ref={track} style={track_style(&view.motion)}>
                        { for TESTIMONIALS.iter().enumerate().map(|(i, t)| html! {
                            <div class="testi-card" key={i.to_string()} ref={if i == 0 { first_card.clone() } else { NodeRef::default() }}>
                                <blockquote>{format!("\"{}\"", t.quote)}</blockquote>
                                <footer>
                                    <div class="testi-person">
                                        <img src={t.avatar} alt={t.name} />
                                        <div>
                                            <p class="testi-name">{t.name}</p>
                                            <p class="testi-role">{t.role}</p>
                                        </div>
                                    </div>
                                    <span class="testi-detail">{t.detail}</span>
                                </footer>
                            </div>
                        }) }
                    </div>
                </div>

                <div class="testi-progress">
                    <div class="testi-bar">
                        <div class="testi-bar-fill" style={format!("width: {}%;", progress)}></div>
                    </div>
                    <span class="testi-counter">
                        {format!("{:02} / {:02}", index + 1, count)}
                    </span>
                </div>
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::translate_x;

    #[test]
    fn reads_translation_from_computed_transform() {
        assert_eq!(translate_x("none"), Some(0.0));
        assert_eq!(translate_x("matrix(1, 0, 0, 1, -742.5, 0)"), Some(-742.5));
        assert_eq!(
            translate_x("matrix3d(1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, -300, 0, 0, 1)"),
            Some(-300.0)
        );
        assert_eq!(translate_x("rotate(45deg)"), None);
        assert_eq!(translate_x("matrix(1, 0)"), None);
    }
}
