use leptos::{html, prelude::*};

use super::components::{use_reveal, SectionWrapper};
use crate::motion::{next_count, stagger_delay, COUNT_TICK};
use crate::site::{SkillItem, SkillsData};

#[component]
pub fn Skills(skills: SkillsData) -> impl IntoView {
    let heading = skills.heading_or_default().to_string();
    let subheading = skills.subheading_or_default().to_string();
    let target = NodeRef::<html::Div>::new();
    let revealed = use_reveal(target, 0.3);

    view! {
        <SectionWrapper id="skills" title=heading subtitle=subheading alternate=true>
            <div node_ref=target class="grid gap-8 md:grid-cols-2">
                {skills
                    .items
                    .into_iter()
                    .enumerate()
                    .map(|(index, skill)| view! { <SkillBar skill index revealed /> })
                    .collect_view()}
            </div>
        </SectionWrapper>
    }
}

#[component]
fn SkillBar(skill: SkillItem, index: usize, revealed: ReadSignal<bool>) -> impl IntoView {
    let target = skill.percentage.min(100);
    let (shown, set_shown) = signal(0u32);
    let (started, set_started) = signal(false);
    let interval = StoredValue::new(None::<IntervalHandle>);

    Effect::watch(
        move || revealed.get(),
        move |revealed, _, _| {
            if !*revealed {
                return;
            }
            set_timeout(
                move || {
                    set_started.set(true);
                    let handle = set_interval_with_handle(
                        move || {
                            let next = next_count(shown.get_untracked(), target);
                            set_shown.set(next);
                            if next >= target {
                                if let Some(handle) = interval.try_get_value().flatten() {
                                    handle.clear();
                                }
                            }
                        },
                        COUNT_TICK,
                    );
                    match handle {
                        Ok(handle) => {
                            _ = interval.try_set_value(Some(handle));
                        }
                        Err(e) => {
                            log::warn!("couldn't animate skill bar: {e:?}");
                            set_shown.set(target);
                        }
                    }
                },
                stagger_delay(index),
            );
        },
        false,
    );
    on_cleanup(move || {
        if let Some(handle) = interval.try_get_value().flatten() {
            handle.clear();
        }
    });

    view! {
        <div class="skill-item">
            <div class="flex items-center justify-between mb-2">
                <div class="flex items-center gap-3">
                    {skill
                        .icon_src
                        .map(|src| view! { <img src=src alt="" width="28" height="28" /> })}
                    <div>
                        <h3 class="font-semibold">{skill.title}</h3>
                        <p class="text-sm text-slate-400">{skill.subtitle}</p>
                    </div>
                </div>
                <span class="font-mono text-sky-300">{move || format!("{}%", shown.get())}</span>
            </div>
            <div
                class="h-2 rounded-full bg-slate-800 overflow-hidden"
                role="progressbar"
                aria-valuemin="0"
                aria-valuemax="100"
                aria-valuenow=target.to_string()
            >
                <div
                    class="h-full rounded-full bg-gradient-to-r from-sky-500 to-indigo-500 transition-[width] duration-1000 ease-out"
                    style=move || {
                        format!("width: {}%", if started.get() { target } else { 0 })
                    }
                />
            </div>
            {skill
                .description
                .map(|description| {
                    view! { <p class="mt-2 text-sm text-slate-400">{description}</p> }
                })}
        </div>
    }
}
