use leptos::prelude::*;

use super::components::{SectionWrapper, Tags, TimelineItem};
use crate::site::{CertificationItem, EducationData};

#[component]
pub fn Education(education: EducationData) -> impl IntoView {
    let EducationData {
        heading,
        subheading,
        background,
        academics,
        certifications,
    } = education;

    view! {
        <SectionWrapper id="education" title=heading subtitle=subheading background=background alternate=true>
            <div class="grid gap-12 lg:grid-cols-2">
                <div>
                    <h3 class="text-2xl font-semibold mb-6">"Academics"</h3>
                    {academics
                        .into_iter()
                        .map(|item| {
                            let degree = if item.field_of_study.trim().is_empty() {
                                item.degree
                            } else {
                                format!("{}, {}", item.degree, item.field_of_study)
                            };
                            view! {
                                <TimelineItem>
                                    <h4 class="text-lg font-semibold">{degree}</h4>
                                    <p class="text-sky-300">{item.school}</p>
                                    <p class="text-sm text-slate-400 mb-3">{item.date_range}</p>
                                    <Tags tags=item.tags />
                                </TimelineItem>
                            }
                        })
                        .collect_view()}
                </div>
                {(!certifications.is_empty())
                    .then(|| {
                        view! {
                            <div>
                                <h3 class="text-2xl font-semibold mb-6">"Certifications"</h3>
                                <ul class="space-y-4">
                                    {certifications
                                        .into_iter()
                                        .map(|cert| view! { <Certification cert /> })
                                        .collect_view()}
                                </ul>
                            </div>
                        }
                    })}
            </div>
        </SectionWrapper>
    }
}

#[component]
fn Certification(cert: CertificationItem) -> impl IntoView {
    let credential = (!cert.credential_id.trim().is_empty())
        .then(|| format!("Credential ID {}", cert.credential_id));
    view! {
        <li class="p-4 rounded-xl bg-slate-800/60 border border-slate-700">
            <h4 class="font-semibold">{cert.name}</h4>
            <p class="text-sm text-sky-300">{cert.issuer}</p>
            <p class="text-sm text-slate-400">{cert.issue_date}</p>
            {credential.map(|c| view! { <p class="text-xs text-slate-500 mt-1">{c}</p> })}
        </li>
    }
}
