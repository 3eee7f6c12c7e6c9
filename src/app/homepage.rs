use leptos::{html, prelude::*};

use crate::motion::{
    scale::{Easing, ScaleConfig, TranslateMode},
    StartPolicy, TypewriterConfig,
};

use super::hooks::{use_scroll_progress, use_star_field, use_type_writer};

const SENTENCES: &[&str] = &[
    "Hi, I’m Malique Edwards, a Junior Full-Stack Web Developer.",
    "I love crafting modern, responsive web experiences with clean, effective design.",
    "This portfolio highlights the projects I’ve worked on and the skills I’ve gained along the way.",
    "Take a look around, and feel free to reach out. I’d love to connect!",
];

fn landing_scale() -> ScaleConfig {
    ScaleConfig::builder()
        .min_scale(0.65)
        .scale_range(600.0)
        .border_radius_max(24.0)
        .translate_y_max(0.0)
        .easing(Easing::Linear)
        .translate(TranslateMode::None)
        .build()
        .unwrap_or_else(|e| {
            log::error!("landing scale: {e}");
            ScaleConfig::default()
        })
}

/// Landing section. Shrinks from the top as the page scrolls away.
#[component]
pub fn HomePage() -> impl IntoView {
    let (params, initialized) = use_scroll_progress(landing_scale());

    view! {
        <section
            class=move || {
                format!(
                    "home-section relative min-h-screen overflow-hidden origin-top flex items-center justify-center {}",
                    if initialized.get() { "" } else { "no-transition" },
                )
            }
            style:transform=move || params.get().transform()
            style:border-radius=move || params.get().radius_px()
        >
            <StarField />
            <div class="relative z-10 flex flex-col md:flex-row items-center gap-10 px-6">
                <a
                    href="https://github.com/yaadi-codes"
                    target="_blank"
                    rel="noopener noreferrer"
                >
                    <img
                        src="/images/avatar.svg"
                        alt="Profile Picture"
                        title="Click to visit my GitHub Account 👨‍💻."
                        class="w-48 h-48 rounded-full border-4 border-gold shadow-lg"
                    />
                </a>
                <HomeText />
            </div>
        </section>
    }
}

#[component]
fn HomeText() -> impl IntoView {
    let typed_ref = NodeRef::<html::Span>::new();
    let typed = use_type_writer(
        typed_ref,
        SENTENCES,
        TypewriterConfig {
            start: StartPolicy::WhenVisible,
            ..Default::default()
        },
    );

    view! {
        <div class="max-w-xl">
            <p class="text-4xl font-bold mb-4">
                "Hello, " <span>"World " <span class="wave" role="img" aria-label="waving hand">"👋"</span></span>
            </p>
            <p class="text-xl min-h-[4.5rem]">
                <span node_ref=typed_ref>{typed}</span>
                <span class="cursor" aria-hidden="true">"|"</span>
            </p>
            <p class="mt-6 flex gap-3">
                <a href="#projects" class="text-gold hover:underline">"View Projects"</a>
                "|"
                <a href="#contact" class="text-gold hover:underline">"Contact Me"</a>
            </p>
        </div>
    }
}

/// Decorative falling stars behind the landing content.
#[component]
fn StarField() -> impl IntoView {
    let stars = use_star_field();

    view! {
        <div class="falling-stars absolute inset-0 pointer-events-none" aria-hidden="true">
            <For each=move || stars.get() key=|star| star.id let:star>
                <div
                    class="star"
                    style:left=format!("{}%", star.left_pct)
                    style:animation-duration=format!("{}s", star.duration.as_secs_f64())
                >
                    <svg
                        viewBox="0 0 10 16"
                        xmlns="http://www.w3.org/2000/svg"
                        style:width=format!("{}px", star.width)
                        style:height=format!("{}px", star.height)
                    >
                        <polygon points="5,0 5.8,5 9,8 5.8,11 5,16 4.2,11 1,8 4.2,5" fill="#EEE8AA" />
                    </svg>
                </div>
            </For>
        </div>
    }
}
