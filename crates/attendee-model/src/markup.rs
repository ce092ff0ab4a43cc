//! Committed attendee list markup
//!
//! Downstream triple extraction reads this fragment back, so the element
//! structure and attribute order are fixed. Only the text content varies.

use crate::entity::Membership;

const LIST_OPEN: &str = "<ul>";
const LIST_CLOSE: &str = "</ul>";

/// Render the full list fragment, one item per attendee in the given order
#[must_use]
pub fn render_attendee_list<'a, I>(attendees: I) -> String
where
    I: IntoIterator<Item = &'a Membership>,
{
    let mut out = String::from(LIST_OPEN);
    for attendee in attendees {
        out.push_str(&render_attendee_item(attendee));
    }
    out.push_str(LIST_CLOSE);
    out
}

/// Render a single `<li>` for one attendee
#[must_use]
pub fn render_attendee_item(attendee: &Membership) -> String {
    let member = &attendee.member;
    format!(
        concat!(
            r#"<li property="notable:meetingAttendee" typeof="org:Membership">"#,
            r#"<span typeof="foaf:Person" property="org:member">"#,
            r#"<span property="foaf:firstName">{first}</span>"#,
            r#"<span property="foaf:LastName">{last}</span>"#,
            r#"<span property="org:memberOf" typeof="org:Organization">"#,
            r#"<span property="skos:label">{org}</span>"#,
            "</span></span></li>"
        ),
        first = escape_text(&member.firstname),
        last = escape_text(&member.lastname),
        org = escape_text(member.organization_title()),
    )
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
