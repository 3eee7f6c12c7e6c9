mod about;
mod contact;
mod header;
pub mod hooks;
mod homepage;
mod projects;
mod scroll_view;

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{components::*, path};

use about::AboutPage;
use contact::ContactPage;
use header::{Header, ScrollCue};
use homepage::HomePage;
use projects::ProjectsPage;
use scroll_view::ScrollView;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <meta name="color-scheme" content="dark" />
                <meta
                    name="description"
                    content="Malique Edwards - developer, builder, and lifelong learner."
                />
                <link rel="icon" type="image/svg+xml" href="/favicon.svg" />
                <link rel="stylesheet" id="leptos" href="/pkg/yaadi-portfolio.css" />
                <MetaTags />
            </head>
            <body class="bg-night text-cream font-sans antialiased">
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title formatter=|title| format!("Malique Edwards - {title}") />

        <Router>
            <Header />
            <main class="flex flex-col w-full">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=path!("/") view=Portfolio />
                </Routes>
            </main>
            <ScrollCue />
        </Router>
    }
}

/// The single scrolling page: landing, about, projects and contact.
#[component]
fn Portfolio() -> impl IntoView {
    view! {
        <Title text="Portfolio" />
        <ScrollView id="home">
            <HomePage />
        </ScrollView>
        <AboutPage />
        <ScrollView id="projects" threshold=0.05>
            <ProjectsPage />
        </ScrollView>
        <ContactPage />
    }
}
