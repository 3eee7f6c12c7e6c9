use leptos::{html, prelude::*};

use crate::{
    content::{CertStatus, Certification, PORTFOLIO},
    motion::{FlipFrame, ScaleConfig, ScrollCycle},
};

use super::hooks::{use_animate_on_view, use_flip_cycle, use_on_screen, use_scroll_scale_view};

const FLIP_WORDS: [&str; 3] = ["ideas", "skills", "mindset"];
const PANELS: usize = 4;

/// Word drum shared by every [`FlippingText`] slot on the page.
#[derive(Clone, Copy)]
struct FlipContext(Signal<FlipFrame>);

#[component]
pub fn AboutPage() -> impl IntoView {
    provide_context(FlipContext(use_flip_cycle(FLIP_WORDS.len())));
    let (stage_ref, params) = use_scroll_scale_view(ScaleConfig::default());

    view! {
        <section id="about" class="relative">
            <div
                node_ref=stage_ref
                class="about-stage mx-auto max-w-6xl bg-dusk overflow-hidden transition-transform duration-150"
                style:transform=move || params.get().transform()
                style:border-radius=move || params.get().radius_px()
            >
                <AboutSection>
                    <AboutIntro />
                </AboutSection>
            </div>
            <AboutCycle />
        </section>
    }
}

/// Full-height section whose content mounts only while it is on screen.
#[component]
fn AboutSection(
    #[prop(optional)] id: Option<&'static str>,
    #[prop(default = 0.6)] threshold: f64,
    children: ChildrenFn,
) -> impl IntoView {
    let section_ref = NodeRef::<html::Section>::new();
    let visible = use_on_screen(section_ref, threshold);

    view! {
        <section id=id node_ref=section_ref class="about-section min-h-screen flex items-center">
            {move || {
                visible
                    .get()
                    .then(|| view! { <div class="about-section-content fade-in w-full">{children()}</div> })
            }}
        </section>
    }
}

#[component]
fn FlippingText(slot: usize) -> impl IntoView {
    let FlipContext(frame) = expect_context::<FlipContext>();

    view! {
        <span class=move || format!("flip-word {}", frame.get().phase.class())>
            {move || frame.get().word_for_slot(&FLIP_WORDS, slot)}
        </span>
    }
}

#[component]
fn AboutIntro() -> impl IntoView {
    view! {
        <div class="px-8 py-16">
            <h2 class="text-gold uppercase tracking-widest mb-4">"Malique's Source Code"</h2>
            <h1 class="text-5xl font-bold mb-8">
                "The " <FlippingText slot=0 /> ", " <FlippingText slot=1 /> ", and "
                <FlippingText slot=2 /> " behind my work"
            </h1>
            <p class="text-lg max-w-3xl leading-relaxed">
                "A " <em>"Web Developer"</em> " in his third year at the "
                <em>"University of Technology, Jamaica"</em>
                " pursuing a Bachelor's Degree In " <em>"Computer Science"</em>
                ". I enjoy the art of building practical, scaleable, and well-structured web solutions that are easy to use and maintain. Get to know more about me."
            </p>
        </div>
    }
}

/// Sticky stage that swaps panels as the visitor scrolls past the trigger
/// zones stacked behind it.
#[component]
fn AboutCycle() -> impl IntoView {
    let cycle = RwSignal::new(ScrollCycle::new(PANELS));
    let current = Memo::new(move |_| cycle.with(ScrollCycle::current));

    view! {
        <div class="relative" style:height=format!("{}vh", PANELS * 100)>
            <div class="sticky top-0 h-screen overflow-hidden flex items-center">
                <div class="mx-auto max-w-6xl w-full px-6">
                    {move || match current.get() {
                        0 => view! { <HeroPanel /> }.into_any(),
                        1 => view! { <SkillsPanel /> }.into_any(),
                        2 => view! { <HobbiesPanel /> }.into_any(),
                        _ => view! { <CertificationsPanel /> }.into_any(),
                    }}
                </div>
            </div>
            <div class="absolute inset-0 flex flex-col pointer-events-none" aria-hidden="true">
                {(0..PANELS).map(|index| view! { <TriggerZone index=index cycle=cycle /> }).collect_view()}
            </div>
        </div>
    }
}

#[component]
fn TriggerZone(index: usize, cycle: RwSignal<ScrollCycle>) -> impl IntoView {
    let zone_ref = NodeRef::<html::Div>::new();
    let in_view = use_on_screen(zone_ref, 0.5);

    Effect::new(move |_| {
        cycle.update(|c| {
            c.register(index);
        });
    });
    on_cleanup(move || {
        let _ = cycle.try_update(|c| c.deregister(index));
    });
    Effect::new(move |_| {
        if in_view.get() {
            cycle.maybe_update(|c| c.activate(index));
        }
    });

    view! { <div node_ref=zone_ref class="flex-1"></div> }
}

#[component]
fn HeroPanel() -> impl IntoView {
    view! {
        <div class="fade-in flex flex-col md:flex-row items-center gap-12">
            <div class="flex-1">
                <p class="text-gold uppercase tracking-widest mb-4">"Malique's Source Code"</p>
                <h1 class="text-5xl font-bold mb-6 leading-tight">
                    "The " <FlippingText slot=0 /> "," <br /> <FlippingText slot=1 /> ", and"
                    <br /> <FlippingText slot=2 /> " behind" <br /> "my work"
                </h1>
                <p class="text-lg leading-relaxed">
                    "I'm a third-year computing student with a strong interest in web development and software design. I enjoy building practical, well-structured applications that are easy to use and easy to maintain."
                </p>
                <span class="inline-block mt-6 text-gold animate-pulse">"❯❯"</span>
            </div>
            <a href="https://github.com/yaadi-codes" target="_blank" rel="noopener noreferrer">
                <img
                    src="/images/avatar.svg"
                    alt="Profile Picture"
                    title="Click to visit my GitHub Account 👨‍💻"
                    class="w-64 h-64 rounded-2xl object-cover shadow-xl"
                />
            </a>
        </div>
    }
}

#[component]
fn PanelHeading(label: &'static str, title: &'static str, description: &'static str) -> impl IntoView {
    view! {
        <p class="text-gold uppercase tracking-widest">{label}</p>
        <h1 class="text-4xl font-bold my-3">{title}</h1>
        <p class="text-lg mb-8 max-w-3xl">{description}</p>
    }
}

#[component]
fn SkillsPanel() -> impl IntoView {
    let grid_ref = NodeRef::<html::Div>::new();
    let animated = use_animate_on_view(grid_ref, 0.2);

    view! {
        <PanelHeading
            label="Technical Arsenal"
            title="Skills & Technologies"
            description="A look at the tools, languages and frameworks I work with to build modern web applications"
        />
        <div
            node_ref=grid_ref
            class=move || format!("grid md:grid-cols-3 gap-6 {}", if animated.get() { "animate" } else { "" })
        >
            {PORTFOLIO
                .skills
                .iter()
                .map(|category| {
                    view! {
                        <div class="skill-card rounded-xl bg-night/60 p-6 border border-gold/20">
                            <span class="text-3xl">{category.icon.clone()}</span>
                            <h3 class="text-xl font-semibold mt-3">{category.title.clone()}</h3>
                            <p class="text-sm my-2">{category.description.clone()}</p>
                            <div class="flex flex-wrap gap-2">
                                {category
                                    .skills
                                    .iter()
                                    .map(|skill| {
                                        view! {
                                            <span class="text-xs rounded-full bg-gold/20 px-3 py-1">
                                                {skill.clone()}
                                            </span>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn HobbiesPanel() -> impl IntoView {
    let grid_ref = NodeRef::<html::Div>::new();
    let animated = use_animate_on_view(grid_ref, 0.2);

    view! {
        <PanelHeading
            label="Beyond The Code"
            title="Hobbies & Interests"
            description="What keeps me curious, balanced and inspired away from the keyboard"
        />
        <div
            node_ref=grid_ref
            class=move || format!("grid grid-cols-2 md:grid-cols-4 gap-4 {}", if animated.get() { "animate" } else { "" })
        >
            {PORTFOLIO
                .hobbies
                .iter()
                .map(|hobby| {
                    view! {
                        <div class="hobby-card group relative rounded-xl bg-night/60 p-4">
                            <span class="text-2xl">{hobby.icon.clone()}</span>
                            <h3 class="font-semibold mt-2">{hobby.title.clone()}</h3>
                            <p class="text-xs">{hobby.description.clone()}</p>
                            <ul class="hobby-preview hidden group-hover:block mt-2 text-xs text-gold">
                                {hobby
                                    .preview
                                    .iter()
                                    .map(|item| view! { <li>{item.clone()}</li> })
                                    .collect_view()}
                            </ul>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn CertificationsPanel() -> impl IntoView {
    let list_ref = NodeRef::<html::Div>::new();
    let animated = use_animate_on_view(list_ref, 0.2);

    view! {
        <PanelHeading
            label="Continuous Learning"
            title="Certifications"
            description="Courses and credentials I have earned, am working through, or have my eye on"
        />
        <div
            node_ref=list_ref
            class=move || format!("grid md:grid-cols-3 gap-6 {}", if animated.get() { "animate" } else { "" })
        >
            {CertStatus::ALL
                .into_iter()
                .map(|status| {
                    view! {
                        <div>
                            <h3 class="text-lg font-semibold mb-3">{status.heading()}</h3>
                            {PORTFOLIO
                                .certifications_with(status)
                                .into_iter()
                                .map(cert_card)
                                .collect_view()}
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

fn cert_card(cert: &Certification) -> impl IntoView {
    let body = view! {
        <p class="font-medium">{cert.name.clone()}</p>
        <p class="text-xs">{cert.issuer.clone()} {cert.year.clone().map(|y| format!(" · {y}"))}</p>
    };
    let class = format!(
        "block rounded-md bg-night/60 p-3 mb-3 border-l-4 {}",
        cert.status.accent_class()
    );
    match &cert.link {
        Some(href) => view! {
            <a href=href.clone() target="_blank" rel="noopener noreferrer" class=class>
                {body}
            </a>
        }
        .into_any(),
        None => view! { <div class=class>{body}</div> }.into_any(),
    }
}
