use leptos::{html, prelude::*};

use crate::content::{Project, PORTFOLIO};

use super::hooks::use_animate_on_view;

#[component]
pub fn ProjectsPage() -> impl IntoView {
    let selected = RwSignal::new(
        PORTFOLIO
            .projects
            .first()
            .map(|p| p.id.clone())
            .unwrap_or_default(),
    );
    let intro_ref = NodeRef::<html::Header>::new();
    let intro_animated = use_animate_on_view(intro_ref, 0.3);
    let spotlight_ref = NodeRef::<html::Div>::new();
    let spotlight_animated = use_animate_on_view(spotlight_ref, 0.2);

    view! {
        <div class="projects-page mx-auto max-w-6xl px-6 py-24">
            <header
                node_ref=intro_ref
                class=move || format!("projects-intro {}", if intro_animated.get() { "animate" } else { "" })
            >
                <p class="text-gold uppercase tracking-widest">"My Work"</p>
                <h2 class="text-4xl font-bold my-3">"Projects"</h2>
                <p class="text-lg max-w-3xl">
                    "A collection of projects showcasing my skills in full-stack development, modern frameworks, and clean code practices. Click any project to explore."
                </p>
            </header>
            <div
                node_ref=spotlight_ref
                class=move || format!("spotlight-section my-12 {}", if spotlight_animated.get() { "animate" } else { "" })
            >
                {move || PORTFOLIO.spotlight(&selected.get()).map(spotlight)}
            </div>
            <div class="carousel overflow-hidden">
                <div class="carousel-track flex gap-4 w-max">
                    {PORTFOLIO
                        .carousel()
                        .map(|(_, project)| view! { <CarouselCard project=project selected=selected /> })
                        .collect_view()}
                </div>
            </div>
        </div>
    }
}

fn screenshot(project: &Project, class: &'static str) -> AnyView {
    match project.primary_screenshot() {
        Some(src) => view! {
            <img src=src.to_string() alt=format!("{} screenshot", project.title) class=class />
        }
        .into_any(),
        None => view! {
            <div class=format!("{class} flex flex-col items-center justify-center bg-night/60")>
                <span class="text-4xl">"🖼️"</span>
                <span class="text-sm">"Preview"</span>
            </div>
        }
        .into_any(),
    }
}

fn spotlight(project: &'static Project) -> impl IntoView {
    let links = &project.links;
    view! {
        <div class="grid md:grid-cols-2 gap-10 items-center">
            {screenshot(project, "w-full aspect-video rounded-xl object-cover")}
            <div>
                <span class="text-xs uppercase text-gold">{project.category.clone()}</span>
                <h3 class="text-3xl font-bold mt-2">{project.title.clone()}</h3>
                <p class="italic mb-4">{project.subtitle.clone()}</p>
                <p class="leading-relaxed mb-6">{project.description.clone()}</p>
                <span class="text-sm">"Built with"</span>
                <div class="flex flex-wrap gap-2 mt-2 mb-6">
                    {project
                        .tech_stack
                        .iter()
                        .map(|tech| {
                            view! {
                                <span class="flex items-center gap-1 rounded-full bg-gold/20 px-3 py-1 text-xs">
                                    {tech
                                        .icon
                                        .clone()
                                        .map(|icon| view! { <img src=icon alt=tech.name.clone() class="w-4 h-4" /> })}
                                    {tech.name.clone()}
                                </span>
                            }
                        })
                        .collect_view()}
                </div>
                <div class="flex gap-3">
                    {links.live.clone().map(|href| view! { <ActionLink href=href icon="🔗" label="Live Demo" /> })}
                    {links.github.clone().map(|href| view! { <ActionLink href=href icon="📂" label="View Code" /> })}
                    {links.docs.clone().map(|href| view! { <ActionLink href=href icon="📄" label="Docs" /> })}
                </div>
            </div>
        </div>
    }
}

#[component]
fn ActionLink(href: String, icon: &'static str, label: &'static str) -> impl IntoView {
    view! {
        <a
            href=href
            target="_blank"
            rel="noopener noreferrer"
            class="rounded-md border border-gold/40 px-4 py-2 hover:bg-gold/20 transition-colors"
        >
            <span class="mr-2">{icon}</span>
            {label}
        </a>
    }
}

#[component]
fn CarouselCard(project: &'static Project, selected: RwSignal<String>) -> impl IntoView {
    let id = project.id.as_str();
    view! {
        <button
            class=move || {
                format!(
                    "carousel-card w-56 shrink-0 rounded-xl bg-night/60 p-3 text-left border-2 {}",
                    if selected.with(|s| s == id) { "border-gold" } else { "border-transparent" },
                )
            }
            on:click=move |_| selected.set(id.to_string())
        >
            {screenshot(project, "w-full h-32 rounded-md object-cover")}
            <h4 class="font-semibold mt-2">{project.title.clone()}</h4>
            <span class="text-xs text-gold">{project.category.clone()}</span>
        </button>
    }
}
