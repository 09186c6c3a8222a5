mod about;
mod components;
mod contact;
mod education;
mod experience;
mod hero;
mod navbar;
mod navigation;
mod skills;

use leptos::{either::Either, prelude::*, server_fn::codec::GetUrl};
use leptos_meta::*;
use leptos_router::{components::*, path};

#[cfg(feature = "ssr")]
use crate::site::load_site_data;
use crate::analytics::track_click;
use crate::site::SiteData;
use crate::tracker::Section;

use about::About;
use components::{LoadError, Loader};
use contact::Contact;
use education::Education;
use experience::Experience;
use hero::Hero;
use navbar::Navbar;
use navigation::{provide_navigation, use_navigation};
use skills::Skills;

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
                <link rel="shortcut icon" type="image/ico" href="/favicon.ico" />
                <link rel="stylesheet" id="leptos" href="/pkg/portfolio-site.css" />
                <MetaTags />
            </head>
            <body class="bg-slate-950 text-slate-100 antialiased">
                <App />
            </body>
        </html>
    }
}

#[server(input = GetUrl)]
pub async fn get_site_data() -> Result<SiteData, ServerFnError> {
    load_site_data().map_err(|e| {
        tracing::error!("{e}");
        ServerFnError::new(e.to_string())
    })
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    view! {
        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=path!("/") view=HomePage />
            </Routes>
        </Router>
    }
}

#[component]
fn HomePage() -> impl IntoView {
    let site = Resource::new(|| (), |_| get_site_data());
    view! {
        <Suspense fallback=|| view! { <Loader full_page=true /> }>
            {move || Suspend::new(async move {
                match site.await {
                    Ok(data) => Either::Left(view! { <Portfolio data /> }),
                    Err(e) => Either::Right(view! { <LoadError message=e.to_string() /> }),
                }
            })}
        </Suspense>
    }
}

#[component]
fn Portfolio(data: SiteData) -> impl IntoView {
    let links = data.visible_navigation().map(Section::from).collect::<Vec<_>>();
    provide_navigation(data.section_registry(), data.tracker_config());

    let SiteData {
        seo,
        hero,
        about,
        skills,
        experience,
        education,
        contact,
        ..
    } = data;

    let footer = format!("© {}", seo.author);

    view! {
        <Title text=seo.title />
        <Meta name="description" content=seo.description />
        <Meta name="keywords" content=seo.keywords />
        <Meta name="author" content=seo.author.clone() />
        <Meta property="og:image" content=seo.og_image />
        <Meta name="twitter:creator" content=seo.twitter_handle />
        <Navbar links />
        <main>
            <Hero hero />
            <About about=about.clone() />
            <Skills skills />
            <Experience experience />
            <Education education />
            <Contact contact about />
        </main>
        <Footer credit=footer />
    }
}

#[component]
fn Footer(credit: String) -> impl IntoView {
    let nav = use_navigation();
    view! {
        <footer class="py-10 px-4 border-t border-slate-800 text-sm text-slate-500">
            <nav class="flex flex-wrap justify-center gap-x-6 gap-y-2 mb-4" aria-label="Footer">
                {nav
                    .sections()
                    .into_iter()
                    .map(|section| {
                        let href = format!("#{}", section.id);
                        let id = section.id;
                        view! {
                            <a
                                href=href
                                class="hover:text-slate-200"
                                on:click=move |ev| {
                                    ev.prevent_default();
                                    track_click(&format!("footer-{id}"), "link");
                                    nav.navigate_to(&id);
                                }
                            >
                                {section.label}
                            </a>
                        }
                    })
                    .collect_view()}
            </nav>
            <p class="text-center">{credit}</p>
        </footer>
    }
}
