use leptos::{html, prelude::*};

use super::hooks::use_on_screen;

/// Section that fades its content in and out with visibility. Children stay
/// mounted so the layout never jumps.
#[component]
pub fn ScrollView(
    #[prop(optional)] id: Option<&'static str>,
    #[prop(default = "auto")] height: &'static str,
    #[prop(default = 0.5)] threshold: f64,
    children: Children,
) -> impl IntoView {
    let section_ref = NodeRef::<html::Section>::new();
    let visible = use_on_screen(section_ref, threshold);

    view! {
        <section id=id node_ref=section_ref style:min-height=height class="scroll-view-section">
            <div class=move || {
                format!("scroll-view-content {}", if visible.get() { "fade-in" } else { "fade-out" })
            }>{children()}</div>
        </section>
    }
}
