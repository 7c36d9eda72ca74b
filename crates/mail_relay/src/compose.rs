use shared::domain::ContactFields;

use crate::{MailAddressing, OutgoingMail};

pub fn compose_contact_mail(addressing: &MailAddressing, fields: &ContactFields) -> OutgoingMail {
    OutgoingMail {
        from_name: addressing.sender_name.clone(),
        from_address: addressing.sender_address.clone(),
        to: addressing.recipient.clone(),
        reply_to: fields.email.clone(),
        subject: format!("Portfolio Contact: {}", fields.name),
        text_body: format!(
            "Name: {}\nEmail: {}\n\nMessage:\n{}",
            fields.name, fields.email, fields.message
        ),
        html_body: html_body(fields),
    }
}

fn html_body(fields: &ContactFields) -> String {
    let name = escape_html(&fields.name);
    let email = escape_html(&fields.email);
    let message = escape_html(&fields.message);
    format!(
        r#"<div style="font-family: sans-serif; max-width: 600px; margin: 0 auto; padding: 20px; background-color: #1e293b; color: #f8fafc;">
  <h2 style="color: #f8fafc; margin-bottom: 30px;">New Contact Form Submission</h2>
  <div style="background-color: rgba(255,255,255,0.05); padding: 20px; border-radius: 12px; margin-bottom: 20px;">
    <p style="margin: 10px 0;"><strong style="color: #38bdf8;">From:</strong> {name}</p>
    <p style="margin: 10px 0;"><strong style="color: #38bdf8;">Email:</strong> {email}</p>
  </div>
  <div style="background-color: rgba(255,255,255,0.05); padding: 20px; border-radius: 12px;">
    <strong style="color: #38bdf8;">Message:</strong>
    <p style="white-space: pre-wrap; margin-top: 10px;">{message}</p>
  </div>
</div>"#
    )
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "tests/compose_tests.rs"]
mod tests;
