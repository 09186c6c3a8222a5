use leptos::prelude::*;

use super::components::{SectionWrapper, Tags, TimelineItem};
use crate::analytics::track_click;
use crate::site::{ExperienceData, JobItem};

/// Paragraphs shown before "Show More".
const COLLAPSED_PARAGRAPHS: usize = 3;

#[component]
pub fn Experience(experience: ExperienceData) -> impl IntoView {
    let ExperienceData {
        heading,
        subheading,
        jobs,
        background,
    } = experience;
    view! {
        <SectionWrapper id="experience" title=heading subtitle=subheading background=background>
            <div class="max-w-3xl mx-auto">
                {jobs
                    .into_iter()
                    .enumerate()
                    .map(|(index, job)| view! { <Job job index /> })
                    .collect_view()}
            </div>
        </SectionWrapper>
    }
}

#[component]
fn Job(job: JobItem, index: usize) -> impl IntoView {
    let (expanded, set_expanded) = signal(false);
    let collapsible = job.description.len() > COLLAPSED_PARAGRAPHS;
    let description = StoredValue::new(job.description);

    let paragraphs = move || {
        let shown = if expanded.get() {
            usize::MAX
        } else {
            COLLAPSED_PARAGRAPHS
        };
        description.with_value(|paragraphs| {
            paragraphs
                .iter()
                .take(shown)
                .map(|p| view! { <li class="leading-relaxed">{p.clone()}</li> })
                .collect_view()
        })
    };

    let meta = [job.employment_type, job.date_range, job.location]
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" · ");

    view! {
        <TimelineItem>
            <h3 class="text-xl font-semibold">{job.title}</h3>
            <p class="text-sky-300">{job.company}</p>
            <p class="text-sm text-slate-400 mb-4">{meta}</p>
            <ul class="list-disc pl-5 space-y-2 text-slate-300">{paragraphs}</ul>
            {collapsible
                .then(|| {
                    view! {
                        <button
                            type="button"
                            class="mt-3 text-sm text-sky-400 hover:text-sky-300"
                            aria-expanded=move || expanded.get().to_string()
                            on:click=move |_| {
                                let action = if expanded.get_untracked() { "less" } else { "more" };
                                track_click(&format!("experience-show-{action}-{index}"), "button");
                                set_expanded.update(|e| *e = !*e);
                            }
                        >
                            {move || if expanded.get() { "Show Less" } else { "Show More" }}
                        </button>
                    }
                })}
            <div class="mt-4">
                <Tags tags=job.skills />
            </div>
        </TimelineItem>
    }
}
