use std::time::Duration;

use leptos::prelude::*;
use leptos_use::use_interval_fn;

use super::components::BackgroundLayer;
use super::navigation::use_navigation;
use crate::analytics::track_click;
use crate::site::HeroData;

#[component]
pub fn Hero(hero: HeroData) -> impl IntoView {
    let nav = use_navigation();
    let background = hero.effective_background();
    let titles = StoredValue::new(hero.titles);
    let (index, set_index) = signal(0usize);
    let (flipping, set_flipping) = signal(false);
    let flip = Duration::from_millis(hero.flip_animation_duration);

    if titles.with_value(|t| t.len() > 1) {
        // the text swaps when the flip finishes
        use_interval_fn(
            move || {
                set_flipping.set(true);
                set_timeout(
                    move || {
                        let len = titles.with_value(Vec::len).max(1);
                        set_index.update(|i| *i = (*i + 1) % len);
                        set_flipping.set(false);
                    },
                    flip,
                );
            },
            hero.title_change_interval,
        );
    }

    let current_title = move || titles.with_value(|t| t.get(index.get()).cloned().unwrap_or_default());

    view! {
        <section id="home" class="relative flex items-center justify-center min-h-screen px-4 overflow-hidden">
            {background.map(|background| view! { <BackgroundLayer background /> })}
            <div class="relative z-10 text-center">
                <p class="text-xl text-sky-300 mb-2">{hero.greeting}</p>
                <h1 class="text-5xl md:text-7xl font-extrabold mb-6">{hero.heading}</h1>
                <div class="flip-container text-2xl md:text-3xl font-medium h-12">
                    <span
                        class=move || if flipping.get() { "flip-title flipping" } else { "flip-title" }
                        style=format!("animation-duration: {}ms", flip.as_millis())
                    >
                        {current_title}
                    </span>
                </div>
            </div>
            <button
                type="button"
                class="absolute bottom-10 left-1/2 -translate-x-1/2 z-10 flex flex-col items-center gap-2 text-slate-300 hover:text-white"
                on:click=move |_| {
                    track_click("hero-scroll-down", "button");
                    nav.navigate_to("about");
                }
            >
                <span class="text-sm uppercase tracking-widest">{hero.scroll_text}</span>
                <span class="scroll-indicator" aria-hidden="true" />
            </button>
        </section>
    }
}
