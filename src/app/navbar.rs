use leptos::prelude::*;
use leptos_use::use_window_scroll;

use super::navigation::use_navigation;
use crate::analytics::track_click;
use crate::tracker::Section;

/// The bar stays out of the way over the hero.
const SHOW_AFTER_SCROLL_Y: f64 = 100.0;

#[component]
pub fn Navbar(links: Vec<Section>) -> impl IntoView {
    let nav = use_navigation();
    let active = nav.active_section();
    let (_, scroll_y) = use_window_scroll();
    let (menu_open, set_menu_open) = signal(false);

    let go = move |id: &str, element: &str| {
        track_click(element, "link");
        set_menu_open.set(false);
        nav.navigate_to(id);
    };

    view! {
        <nav
            class=move || {
                if scroll_y.get() >= SHOW_AFTER_SCROLL_Y {
                    "navbar navbar-scrolled fixed top-0 inset-x-0 z-50 bg-slate-950/90 backdrop-blur shadow-lg"
                } else {
                    "navbar navbar-hidden fixed top-0 inset-x-0 z-50"
                }
            }
            aria-label="Primary"
        >
            <div class="mx-auto px-4 sm:px-6 lg:px-8 py-3 max-w-6xl flex items-center justify-between">
                <a
                    href="#home"
                    aria-label="Home"
                    class="flex items-center"
                    on:click=move |ev| {
                        ev.prevent_default();
                        go("home", "nav-home");
                    }
                >
                    <img src="/icons/home.svg" alt="" width="24" height="24" />
                </a>
                <button
                    type="button"
                    class="md:hidden flex flex-col gap-1 p-2"
                    aria-controls="primary-navigation"
                    aria-expanded=move || menu_open.get().to_string()
                    aria-label=move || if menu_open.get() { "Close menu" } else { "Open menu" }
                    on:click=move |_| {
                        track_click("mobile-menu-toggle", "button");
                        set_menu_open.update(|open| *open = !*open);
                    }
                >
                    <span class="block w-6 h-0.5 bg-white" />
                    <span class="block w-6 h-0.5 bg-white" />
                    <span class="block w-6 h-0.5 bg-white" />
                </button>
                <ul
                    id="primary-navigation"
                    class=move || {
                        if menu_open.get() {
                            "flex flex-col md:flex-row absolute md:static top-full inset-x-0 bg-slate-950 md:bg-transparent gap-2 md:gap-6 p-4 md:p-0"
                        } else {
                            "hidden md:flex md:flex-row gap-6"
                        }
                    }
                >
                    {links
                        .into_iter()
                        .map(|Section { id, label }| {
                            let href = format!("#{id}");
                            let element = format!("nav-{id}");
                            let id = StoredValue::new(id);
                            let is_active = move || id.with_value(|id| active.with(|a| a == id));
                            view! {
                                <li>
                                    <a
                                        href=href
                                        aria-current=move || is_active().then_some("page")
                                        class=move || {
                                            if is_active() {
                                                "nav-link active text-sky-400 font-semibold"
                                            } else {
                                                "nav-link text-slate-200 hover:text-white"
                                            }
                                        }
                                        on:click=move |ev| {
                                            ev.prevent_default();
                                            id.with_value(|id| go(id, &element));
                                        }
                                    >
                                        {label}
                                    </a>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
                <a
                    href="#contact"
                    aria-label="Contact"
                    class="hidden md:flex items-center"
                    on:click=move |ev| {
                        ev.prevent_default();
                        go("contact", "nav-contact");
                    }
                >
                    <img src="/icons/email.svg" alt="" width="24" height="24" />
                </a>
            </div>
        </nav>
    }
}
