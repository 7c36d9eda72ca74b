use super::*;

fn fields() -> ContactFields {
    ContactFields::new("Ada", "ada@example.org", "Hello there\nsecond line")
}

#[test]
fn envelope_comes_from_fixed_addressing() {
    let mail = compose_contact_mail(&MailAddressing::default(), &fields());
    assert_eq!(mail.from_name, "Portfolio Contact Form");
    assert_eq!(mail.from_address, "contact@mandip.dev");
    assert_eq!(mail.to, "hello@mandip.dev");
    assert_eq!(mail.reply_to, "ada@example.org");
}

#[test]
fn subject_and_text_body_are_derived_from_fields() {
    let mail = compose_contact_mail(&MailAddressing::default(), &fields());
    assert_eq!(mail.subject, "Portfolio Contact: Ada");
    assert_eq!(
        mail.text_body,
        "Name: Ada\nEmail: ada@example.org\n\nMessage:\nHello there\nsecond line"
    );
}

#[test]
fn html_body_escapes_user_markup() {
    let mut input = fields();
    input.message = "<script>alert('x')</script> & more".into();
    let mail = compose_contact_mail(&MailAddressing::default(), &input);
    assert!(!mail.html_body.contains("<script>"));
    assert!(mail
        .html_body
        .contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; more"));
    assert!(mail.html_body.contains("New Contact Form Submission"));
}

#[test]
fn escape_html_leaves_plain_text_alone() {
    assert_eq!(escape_html("plain text 123"), "plain text 123");
    assert_eq!(escape_html("\"q\""), "&quot;q&quot;");
}
