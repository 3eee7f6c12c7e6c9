use leptos::prelude::*;

use super::hooks::{scroll_down_a_screen, use_header_hidden, use_scroll_cue};

const NAV_LINKS: [(&str, &str); 4] = [
    ("#home", "Home"),
    ("#about", "About"),
    ("#projects", "Projects"),
    ("#contact", "Contact"),
];

#[component]
pub fn Header() -> impl IntoView {
    let hidden = use_header_hidden();

    view! {
        <header class=move || {
            format!(
                "fixed top-0 inset-x-0 z-50 transition-transform duration-300 bg-night/80 backdrop-blur {}",
                if hidden.get() { "-translate-y-full" } else { "translate-y-0" },
            )
        }>
            <nav class="mx-auto max-w-6xl px-6 py-4 flex items-center justify-between">
                <a href="#home" class="text-xl font-bold text-gold">
                    "ME"
                </a>
                <ul class="flex gap-6">
                    {NAV_LINKS
                        .into_iter()
                        .map(|(href, label)| {
                            view! {
                                <li>
                                    <a href=href class="hover:text-gold transition-colors">
                                        {label}
                                    </a>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </nav>
        </header>
    }
}

/// Bouncing arrow that nudges visitors down the page.
#[component]
pub fn ScrollCue() -> impl IntoView {
    let visible = use_scroll_cue();

    view! {
        <button
            class=move || {
                format!(
                    "scroll-cue fixed bottom-8 left-1/2 -translate-x-1/2 z-40 text-3xl text-gold transition-opacity duration-500 {}",
                    if visible.get() { "opacity-100 animate-bounce" } else { "opacity-0 pointer-events-none" },
                )
            }
            aria-label="Scroll down"
            on:click=move |_| scroll_down_a_screen()
        >
            "↓"
        </button>
    }
}
