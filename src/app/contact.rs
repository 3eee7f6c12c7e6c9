use chrono::{Datelike, Utc};
use leptos::{html, prelude::*};

use super::hooks::use_animate_on_view;

const CONTACT_LINKS: [(&str, &str, &str, &str); 4] = [
    (
        "mailto:yaadicodes@gmail.com",
        "/icons/gmail.svg",
        "Email",
        "yaadicodes@gmail.com",
    ),
    (
        "https://www.linkedin.com/in/maliqueedwards876",
        "/icons/linkedin.svg",
        "LinkedIn",
        "LinkedIn",
    ),
    (
        "https://github.com/yaadi-codes",
        "/icons/github.svg",
        "GitHub",
        "GitHub",
    ),
    (
        "https://www.instagram.com/its.mali_/",
        "/icons/instagram.svg",
        "Instagram",
        "Instagram",
    ),
];

/// Compact footer with profile, contact links and copyright.
#[component]
pub fn ContactPage() -> impl IntoView {
    // only once the footer is mostly in view
    let footer_ref = NodeRef::<html::Footer>::new();
    let animated = use_animate_on_view(footer_ref, 0.6);
    let year = Utc::now().year();

    view! {
        <footer
            id="contact"
            node_ref=footer_ref
            class=move || {
                format!(
                    "contact-footer min-h-[30vh] flex flex-col items-center gap-6 py-16 px-6 {}",
                    if animated.get() { "animate" } else { "" },
                )
            }
        >
            <p class="text-gold uppercase tracking-widest">"Let's Connect"</p>
            <div class="flex items-center gap-4">
                <img
                    src="/images/avatar.svg"
                    alt="Malique Edwards"
                    class="w-16 h-16 rounded-full"
                />
                <div>
                    <h3 class="text-xl font-semibold">"Malique Edwards"</h3>
                    <p class="text-sm">"Full-Stack Developer"</p>
                </div>
            </div>
            <div class="flex flex-wrap justify-center gap-4">
                {CONTACT_LINKS
                    .into_iter()
                    .map(|(href, icon, alt, label)| {
                        let external = href.starts_with("http");
                        view! {
                            <a
                                href=href
                                target=external.then_some("_blank")
                                rel=external.then_some("noopener noreferrer")
                                class="flex items-center gap-2 rounded-md bg-night/60 px-4 py-2 hover:text-gold transition-colors"
                            >
                                <img src=icon alt=alt class="w-5 h-5" />
                                {label}
                            </a>
                        }
                    })
                    .collect_view()}
            </div>
            <div class="w-full max-w-3xl border-t border-gold/20"></div>
            <p class="text-sm">
                {format!("© {year} Malique Edwards • Made with ")}
                <span class="footer-heart">"❤️"</span>
                " and Rust"
            </p>
            <p class="text-xs opacity-60">{format!("Last built {}", env!("BUILD_TIME"))}</p>
        </footer>
    }
}
