use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// What the visitor typed into the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Subject,
    Message,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Email,
        FormField::Subject,
        FormField::Message,
    ];

    pub fn id(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Subject => "subject",
            FormField::Message => "message",
        }
    }
}

/// Per-field validation messages. Empty means the form is valid.
#[derive(Error, Debug, Clone, Default, PartialEq, Eq)]
#[error("invalid contact form")]
pub struct ValidationErrors {
    name: Option<&'static str>,
    email: Option<&'static str>,
    subject: Option<&'static str>,
    message: Option<&'static str>,
}

impl ValidationErrors {
    fn slot(&mut self, field: FormField) -> &mut Option<&'static str> {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Subject => &mut self.subject,
            FormField::Message => &mut self.message,
        }
    }

    pub fn get(&self, field: FormField) -> Option<&'static str> {
        match field {
            FormField::Name => self.name,
            FormField::Email => self.email,
            FormField::Subject => self.subject,
            FormField::Message => self.message,
        }
    }

    pub fn clear(&mut self, field: FormField) {
        *self.slot(field) = None;
    }

    pub fn is_empty(&self) -> bool {
        FormField::ALL.iter().all(|f| self.get(*f).is_none())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Sending,
    Sent,
    Failed,
}

impl ContactMessage {
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Subject => &self.subject,
            FormField::Message => &self.message,
        }
    }

    pub fn set_field(&mut self, field: FormField, value: String) {
        match field {
            FormField::Name => self.name = value,
            FormField::Email => self.email = value,
            FormField::Subject => self.subject = value,
            FormField::Message => self.message = value,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.name = Some("Name is required");
        } else if name.chars().count() < 2 {
            errors.name = Some("Name must be at least 2 characters");
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.email = Some("Email is required");
        } else if !EMAIL_RE.is_match(email) {
            errors.email = Some("Please enter a valid email address");
        }

        let subject = self.subject.trim();
        if subject.is_empty() {
            errors.subject = Some("Subject is required");
        } else if subject.chars().count() < 3 {
            errors.subject = Some("Subject must be at least 3 characters");
        }

        let message = self.message.trim();
        if message.is_empty() {
            errors.message = Some("Message is required");
        } else if message.chars().count() < 10 {
            errors.message = Some("Message must be at least 10 characters");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Body of the notification mail sent to the site owner.
pub fn render_email_html(msg: &ContactMessage) -> String {
    let name = escape_html(msg.name.trim());
    let email = escape_html(msg.email.trim());
    let subject = escape_html(msg.subject.trim());
    let message = escape_html(msg.message.trim()).replace('\n', "<br>");

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>New Contact Form Submission</title>
  </head>
  <body style="font-family: 'Inter', -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #1a1a1a; max-width: 800px; margin: 0 auto; padding: 20px; background-color: #f5f5f5;">
    <div style="background-color: #ffffff; border-radius: 12px; padding: 20px;">
      <div style="text-align: center; margin-bottom: 30px; padding-bottom: 20px; border-bottom: 1px solid #eaeaea;">
        <h1 style="color: #111827; font-size: 28px; font-weight: 600; margin: 0;">New Contact Form Submission</h1>
        <p style="color: #6b7280; margin: 8px 0 0; font-size: 16px;">You have received a new message from your website</p>
      </div>
      <div style="background-color: #f9fafb; border-radius: 8px; padding: 24px; margin-bottom: 24px;">
        <h2 style="color: #111827; font-size: 18px; font-weight: 600; margin: 0 0 16px;">Contact Details</h2>
        <table style="width: 100%; border-collapse: collapse;">
          <tr>
            <td style="padding: 12px 0; border-bottom: 1px solid #e5e7eb;"><strong style="color: #4b5563;">Name:</strong></td>
            <td style="padding: 12px 0; border-bottom: 1px solid #e5e7eb; color: #111827;">{name}</td>
          </tr>
          <tr>
            <td style="padding: 12px 0; border-bottom: 1px solid #e5e7eb;"><strong style="color: #4b5563;">Email:</strong></td>
            <td style="padding: 12px 0; border-bottom: 1px solid #e5e7eb;"><a href="mailto:{email}" style="color: #2563eb; text-decoration: none;">{email}</a></td>
          </tr>
          <tr>
            <td style="padding: 12px 0;"><strong style="color: #4b5563;">Subject:</strong></td>
            <td style="padding: 12px 0; color: #111827;">{subject}</td>
          </tr>
        </table>
      </div>
      <div style="margin-bottom: 24px;">
        <h2 style="color: #111827; font-size: 18px; font-weight: 600; margin: 0 0 16px;">Message</h2>
        <div style="background-color: #f9fafb; padding: 20px; border-radius: 8px; border-left: 4px solid #2563eb; color: #374151; font-size: 15px; line-height: 1.7;">{message}</div>
      </div>
      <div style="margin-top: 32px; padding-top: 24px; border-top: 1px solid #eaeaea; text-align: center;">
        <p style="color: #6b7280; font-size: 14px; margin: 0 0 8px;">This email was sent from your website's contact form</p>
        <p style="color: #6b7280; font-size: 14px; margin: 0;">You can reply directly to this email to respond to {name}</p>
      </div>
    </div>
  </body>
</html>
"#
    )
}
