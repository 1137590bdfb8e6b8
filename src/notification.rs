//! Notification email composed from a submission.
//!
//! # Example
//!
//! ```
//! use contact_relay::{notification, Address, Submission};
//!
//! let submission = Submission::new("Ada", "ada@example.com", "Hello!");
//! let email = notification::compose(
//!     &submission,
//!     &Address::with_name("Portfolio Contact Form", "portfolio@yourdomain.com"),
//!     &Address::with_name("Portfolio Owner", "owner@example.com"),
//! );
//!
//! assert_eq!(email.subject, "Portfolio Contact - Message from Ada");
//! assert_eq!(email.reply_to[0].email, "ada@example.com");
//! ```

use crate::address::Address;
use crate::email::Email;
use crate::submission::Submission;

const HEADING: &str = "New Contact Form Submission";
const FOOTER: &str = "Sent from your portfolio contact form";

/// Subject line for a submission.
pub fn subject(submission: &Submission) -> String {
    format!("Portfolio Contact - Message from {}", submission.name)
}

/// Build the email the site owner receives.
///
/// Replies go to the submitter.
pub fn compose(submission: &Submission, sender: &Address, recipient: &Address) -> Email {
    Email::new()
        .from(sender)
        .to(recipient)
        .reply_to((submission.name.as_str(), submission.email.as_str()))
        .subject(subject(submission))
        .html_body(render_html(submission))
        .text_body(render_text(submission))
}

/// Plain-text body.
pub fn render_text(submission: &Submission) -> String {
    format!(
        "{HEADING}\n\nName: {}\nEmail: {}\n\nMessage:\n{}\n\n---\n{FOOTER}",
        submission.name, submission.email, submission.message
    )
}

/// HTML body. Submitter-controlled text is escaped before interpolation.
pub fn render_html(submission: &Submission) -> String {
    let name = escape_html(&submission.name);
    let email = escape_html(&submission.email);
    let message = escape_html(&submission.message).replace('\n', "<br>");

    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px; border: 1px solid #e0e0e0; border-radius: 8px;">
  <h2 style="color: #333; border-bottom: 2px solid #007bff; padding-bottom: 10px;">{HEADING}</h2>
  <div style="margin: 20px 0;">
    <p><strong>Name:</strong> {name}</p>
    <p><strong>Email:</strong> <a href="mailto:{email}" style="color: #007bff; text-decoration: none;">{email}</a></p>
  </div>
  <div style="margin: 20px 0;">
    <p><strong>Message:</strong></p>
    <div style="background-color: #f8f9fa; padding: 15px; border-left: 4px solid #007bff; margin: 10px 0;">{message}</div>
  </div>
  <hr style="border: none; border-top: 1px solid #e0e0e0; margin: 20px 0;">
  <p style="color: #666; font-size: 14px; text-align: center;"><em>{FOOTER}</em></p>
</div>"#
    )
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
