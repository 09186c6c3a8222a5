use leptos::{html, prelude::*};
use leptos_use::{
    use_intersection_observer_with_options, use_mouse, use_window_size,
    UseIntersectionObserverOptions, UseMouseReturn, UseWindowSizeReturn,
};

use crate::analytics::track_click;
use crate::site::{AboutData, Background};

/// Turns `true` the first time `target` is more than `threshold` visible and
/// stays that way.
pub fn use_reveal(target: NodeRef<html::Div>, threshold: f64) -> ReadSignal<bool> {
    let (revealed, set_revealed) = signal(false);
    use_intersection_observer_with_options(
        target,
        move |entries, observer| {
            if entries.iter().any(|entry| entry.is_intersecting()) {
                set_revealed.set(true);
                observer.disconnect();
            }
        },
        UseIntersectionObserverOptions::default().thresholds(vec![threshold]),
    );
    revealed
}

#[component]
pub fn SectionWrapper(
    #[prop(into)] id: String,
    #[prop(into)] title: String,
    #[prop(optional, into)] subtitle: Option<String>,
    #[prop(default = None)] background: Option<Background>,
    #[prop(optional)] alternate: bool,
    children: Children,
) -> impl IntoView {
    let class = if alternate {
        "relative py-20 px-4 bg-slate-900/60 overflow-hidden"
    } else {
        "relative py-20 px-4 overflow-hidden"
    };
    view! {
        <section id=id class=class>
            {background.map(|background| view! { <BackgroundLayer background /> })}
            <div class="relative z-10 max-w-6xl mx-auto">
                <header class="text-center mb-12">
                    <h2 class="text-3xl md:text-4xl font-bold mb-3">{title}</h2>
                    {subtitle
                        .filter(|s| !s.trim().is_empty())
                        .map(|s| view! { <p class="text-lg text-slate-400">{s}</p> })}
                    <span class="block w-16 h-1 mx-auto mt-4 rounded bg-sky-500" />
                </header>
                {children()}
            </div>
        </section>
    }
}

#[component]
pub fn BackgroundLayer(background: Background) -> impl IntoView {
    let Background {
        image,
        is_parallax,
        is_animated,
    } = background;
    let UseMouseReturn { x, y, .. } = use_mouse();
    let UseWindowSizeReturn { width, height } = use_window_size();

    let style = move || {
        let mut style = format!("background-image: url('{image}');");
        if is_parallax {
            style.push_str("background-attachment: fixed;");
        }
        if is_animated {
            let (w, h) = (width.get(), height.get());
            if w > 0.0 && h > 0.0 {
                // drift at most 10px from center toward the pointer
                let dx = (x.get() / w - 0.5) * 20.0;
                let dy = (y.get() / h - 0.5) * 20.0;
                style.push_str(&format!("transform: translate({dx:.1}px, {dy:.1}px) scale(1.05);"));
            }
        }
        style
    };

    view! {
        <div class="absolute inset-0 z-0 pointer-events-none" aria-hidden="true">
            <div
                class="absolute inset-0 bg-cover bg-center transition-transform duration-300 ease-out"
                style=style
            />
            <div class="absolute inset-0 bg-slate-950/75" />
        </div>
    }
}

#[component]
pub fn Tags(tags: Vec<String>) -> impl IntoView {
    view! {
        <ul class="flex flex-wrap gap-2">
            {tags
                .into_iter()
                .map(|tag| {
                    view! {
                        <li class="px-3 py-1 text-sm rounded-full bg-sky-500/10 text-sky-300 border border-sky-500/30">
                            {tag}
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
}

/// One entry on a vertical timeline, sliding in once it scrolls into view.
#[component]
pub fn TimelineItem(children: Children) -> impl IntoView {
    let target = NodeRef::<html::Div>::new();
    let revealed = use_reveal(target, 0.2);
    view! {
        <div
            node_ref=target
            class=move || {
                if revealed.get() {
                    "timeline-item relative pl-8 pb-10 border-l-2 border-sky-500/40 reveal revealed"
                } else {
                    "timeline-item relative pl-8 pb-10 border-l-2 border-sky-500/40 reveal"
                }
            }
        >
            <span class="absolute -left-[9px] top-1 w-4 h-4 rounded-full bg-sky-500 ring-4 ring-slate-950" />
            {children()}
        </div>
    }
}

#[component]
pub fn SocialButtons(about: AboutData) -> impl IntoView {
    let whatsapp = about.whatsapp_url();
    let links = [
        ("linkedin", "LinkedIn", about.linkedin),
        ("github", "GitHub", about.github),
        ("codepen", "CodePen", about.codepen),
        ("whatsapp", "WhatsApp", whatsapp),
    ];
    view! {
        <div class="flex gap-3">
            {links
                .into_iter()
                .filter_map(|(key, label, href)| {
                    let href = href.filter(|h| !h.trim().is_empty())?;
                    Some(
                        view! {
                            <a
                                href=href
                                target="_blank"
                                rel="noopener noreferrer"
                                aria-label=label
                                title=label
                                class="flex items-center justify-center w-10 h-10 rounded-full bg-slate-800 hover:bg-sky-600 transition-colors"
                                on:click=move |_| track_click(&format!("social-{key}"), "link")
                            >
                                <img src=format!("/icons/{key}.svg") alt="" width="20" height="20" />
                            </a>
                        },
                    )
                })
                .collect_view()}
        </div>
    }
}

#[component]
pub fn Loader(#[prop(optional)] full_page: bool) -> impl IntoView {
    let class = if full_page {
        "flex items-center justify-center min-h-screen"
    } else {
        "flex items-center justify-center py-8"
    };
    view! {
        <div class=class role="status" aria-label="Loading">
            <span class="loader-dot" />
            <span class="loader-dot" />
            <span class="loader-dot" />
        </div>
    }
}

#[component]
pub fn LoadError(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-screen gap-4 px-4 text-center">
            <h1 class="text-2xl font-bold text-red-400">"Something went wrong"</h1>
            <p class="text-slate-400">{message}</p>
        </div>
    }
}
