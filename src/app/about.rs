use leptos::{either::Either, html, prelude::*};

use super::components::{use_reveal, SectionWrapper, SocialButtons, Tags};
use super::navigation::use_navigation;
use crate::analytics::track_click;
use crate::site::AboutData;

#[component]
pub fn About(about: AboutData) -> impl IntoView {
    let nav = use_navigation();
    let target = NodeRef::<html::Div>::new();
    let revealed = use_reveal(target, 0.25);

    let photo = if about.image_url.trim().is_empty() {
        Either::Left(view! {
            <div class="w-64 h-64 rounded-2xl bg-slate-800 flex items-center justify-center text-6xl text-slate-600">
                "?"
            </div>
        })
    } else {
        Either::Right(view! {
            <img
                src=about.image_url.clone()
                alt=about.heading.clone()
                class="w-64 h-64 object-cover rounded-2xl shadow-xl"
                loading="lazy"
            />
        })
    };

    let resume = (!about.resume_url.trim().is_empty()).then(|| {
        view! {
            <a
                href=about.resume_url.clone()
                target="_blank"
                rel="noopener noreferrer"
                class="btn btn-outline"
                on:click=|_| track_click("about-resume", "link")
            >
                {about.resume_button_text.clone()}
            </a>
        }
    });

    let AboutData {
        heading,
        subheading,
        contact_button_text,
        title_tags,
        about_content,
        ..
    } = about.clone();

    view! {
        <SectionWrapper id="about" title=heading subtitle=subheading>
            <div
                node_ref=target
                class=move || if revealed.get() { "reveal revealed" } else { "reveal" }
            >
                <div class="flex flex-col md:flex-row items-center gap-10">
                    <div class="flex-shrink-0">{photo}</div>
                    <div class="flex flex-col gap-6">
                        <Tags tags=title_tags />
                        <div class="prose prose-invert max-w-none leading-relaxed" inner_html=about_content />
                        <div class="flex flex-wrap gap-4">
                            <button
                                type="button"
                                class="btn btn-primary"
                                on:click=move |_| {
                                    track_click("about-contact", "button");
                                    nav.navigate_to("contact");
                                }
                            >
                                {contact_button_text}
                            </button>
                            {resume}
                        </div>
                        <SocialButtons about />
                    </div>
                </div>
            </div>
        </SectionWrapper>
    }
}
