use std::time::Duration;

use leptos::{either::Either, ev::SubmitEvent, prelude::*, task::spawn_local};

use super::components::{SectionWrapper, SocialButtons};
use crate::analytics::track_click;
use crate::contact::{ContactMessage, FormField, FormStatus, ValidationErrors};
use crate::site::{AboutData, ContactData, StatusMessage};

/// How long the success or failure banner stays up.
const STATUS_RESET: Duration = Duration::from_secs(5);

#[server]
pub async fn send_contact_message(message: ContactMessage) -> Result<(), ServerFnError> {
    use crate::email::EmailClient;

    message
        .validate()
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    let Some(client) = use_context::<EmailClient>() else {
        tracing::error!("contact message dropped: email is not configured");
        return Err(ServerFnError::new("Email is not configured"));
    };
    client
        .send(&message)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[component]
pub fn Contact(contact: ContactData, about: AboutData) -> impl IntoView {
    let ContactData {
        heading,
        subheading,
        get_in_touch_heading,
        get_in_touch_text,
        email,
        phone,
        location,
        form_labels,
        form_buttons,
        form_messages,
    } = contact;

    let form = RwSignal::new(ContactMessage::default());
    let errors = RwSignal::new(ValidationErrors::default());
    let status = RwSignal::new(FormStatus::Idle);
    let sending = Signal::derive(move || status.get() == FormStatus::Sending);
    let reset = StoredValue::new(None::<TimeoutHandle>);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if sending.get_untracked() {
            return;
        }
        track_click("contact-form-submit", "form");
        let message = form.get_untracked();
        if let Err(e) = message.validate() {
            errors.set(e);
            return;
        }
        if let Some(handle) = reset.get_value() {
            handle.clear();
        }
        status.set(FormStatus::Sending);
        spawn_local(async move {
            match send_contact_message(message).await {
                Ok(()) => {
                    status.set(FormStatus::Sent);
                    form.set(ContactMessage::default());
                }
                Err(e) => {
                    log::warn!("contact form submission failed: {e}");
                    status.set(FormStatus::Failed);
                }
            }
            match set_timeout_with_handle(move || status.set(FormStatus::Idle), STATUS_RESET) {
                Ok(handle) => {
                    _ = reset.try_set_value(Some(handle));
                }
                Err(e) => log::warn!("couldn't schedule form reset: {e:?}"),
            }
        });
    };

    let mail_href = format!("mailto:{email}");
    let info = [("Phone", phone), ("Location", location)]
        .into_iter()
        .filter_map(|(label, value)| value.map(|v| (label, v)))
        .map(|(label, value)| {
            view! {
                <p>
                    <span class="text-slate-400">{label}": "</span>
                    {value}
                </p>
            }
        })
        .collect_view();

    view! {
        <SectionWrapper id="contact" title=heading subtitle=subheading>
            <div class="grid gap-12 lg:grid-cols-2">
                <div class="flex flex-col gap-4">
                    <h3 class="text-2xl font-semibold">{get_in_touch_heading}</h3>
                    <p class="text-slate-300 leading-relaxed">{get_in_touch_text}</p>
                    <p>
                        <span class="text-slate-400">"Email: "</span>
                        <a
                            href=mail_href
                            class="text-sky-400 hover:text-sky-300"
                            on:click=|_| track_click("contact-email", "link")
                        >
                            {email}
                        </a>
                    </p>
                    {info}
                    <SocialButtons about />
                </div>
                <form class="flex flex-col gap-4" novalidate=true on:submit=on_submit>
                    <FormInput field=FormField::Name label=form_labels.name form errors sending />
                    <FormInput field=FormField::Email label=form_labels.email form errors sending />
                    <FormInput field=FormField::Subject label=form_labels.subject form errors sending />
                    <FormInput field=FormField::Message label=form_labels.message form errors sending />
                    <button type="submit" class="btn btn-primary self-start" disabled=sending>
                        {move || {
                            if sending.get() {
                                form_buttons.sending.clone()
                            } else {
                                form_buttons.submit.clone()
                            }
                        }}
                    </button>
                    {move || match status.get() {
                        FormStatus::Sent => {
                            Some(Either::Left(view! { <StatusBanner message=form_messages.success.clone() ok=true /> }))
                        }
                        FormStatus::Failed => {
                            Some(Either::Right(view! { <StatusBanner message=form_messages.error.clone() ok=false /> }))
                        }
                        FormStatus::Idle | FormStatus::Sending => None,
                    }}
                </form>
            </div>
        </SectionWrapper>
    }
}

#[component]
fn FormInput(
    field: FormField,
    label: String,
    form: RwSignal<ContactMessage>,
    errors: RwSignal<ValidationErrors>,
    sending: Signal<bool>,
) -> impl IntoView {
    let id = format!("contact-{}", field.id());
    let value = move || form.with(|f| f.field(field).to_string());
    let error = move || errors.with(|e| e.get(field));
    let on_input = move |ev| {
        form.update(|f| f.set_field(field, event_target_value(&ev)));
        errors.update(|e| e.clear(field));
    };
    let class = move || {
        if error().is_some() {
            "w-full px-4 py-2 rounded-md bg-slate-900 border border-red-500 focus:outline-none focus:ring-2 focus:ring-red-500"
        } else {
            "w-full px-4 py-2 rounded-md bg-slate-900 border border-slate-700 focus:outline-none focus:ring-2 focus:ring-sky-500"
        }
    };

    let input = if field == FormField::Message {
        Either::Left(view! {
            <textarea
                id=id.clone()
                name=field.id()
                rows="6"
                class=class
                prop:value=value
                on:input=on_input
                disabled=sending
            />
        })
    } else {
        let kind = if field == FormField::Email { "email" } else { "text" };
        Either::Right(view! {
            <input
                id=id.clone()
                name=field.id()
                type=kind
                class=class
                prop:value=value
                on:input=on_input
                disabled=sending
            />
        })
    };

    view! {
        <div class="flex flex-col gap-1">
            <label for=id class="text-sm text-slate-300">{label}</label>
            {input}
            {move || error().map(|msg| view! { <p class="text-sm text-red-400" role="alert">{msg}</p> })}
        </div>
    }
}

#[component]
fn StatusBanner(message: StatusMessage, ok: bool) -> impl IntoView {
    let class = if ok {
        "p-4 rounded-md bg-emerald-500/10 border border-emerald-500/40 text-emerald-300"
    } else {
        "p-4 rounded-md bg-red-500/10 border border-red-500/40 text-red-300"
    };
    view! {
        <div class=class role="status">
            <p class="font-semibold">{message.title}</p>
            <p class="text-sm">{message.text}</p>
        </div>
    }
}
